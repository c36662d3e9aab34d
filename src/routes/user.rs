use actix_web::{post, web};
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::{DbUserCreate, RegisterUserPayload, UserCreateRes};
use crate::types::validate::Validator;
use crate::utils::crypto::hash_password;

#[post("")]
async fn register(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<RegisterUserPayload>,
) -> ApiResult<UserCreateRes> {
    validator.check(&*body)?;
    let body = body.into_inner();

    let id = db
        .create_user(DbUserCreate {
            name: body.name.trim().to_string(),
            email: body.email.trim().to_lowercase(),
            password_hash: hash_password(&body.password)?,
        })
        .await?;

    Ok(ApiResponse::Created(UserCreateRes { id }))
}
