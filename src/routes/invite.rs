use actix_web::{get, post, web};
use entity::invite::Model as InviteModel;
use serde::Serialize;
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::invite::{CreateInvitePayload, InviteInfo, InviteStatus};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::validate::Validator;

#[derive(Serialize)]
pub struct Decision {
    pub message: String,
    pub status: InviteStatus,
}

#[post("")]
async fn create_invite(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<CreateInvitePayload>,
) -> ApiResult<InviteModel> {
    validator.check(&*body)?;
    let invite = db.create_invite(body.into_inner()).await?;
    Ok(ApiResponse::Created(invite))
}

#[get("/from/{user_id}")]
async fn invites_from(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<InviteInfo>> {
    Ok(ApiResponse::Ok(db.invites_from(&path.into_inner()).await?))
}

#[get("/to/{user_id}")]
async fn invites_to(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<InviteInfo>> {
    Ok(ApiResponse::Ok(db.invites_to(&path.into_inner()).await?))
}

#[get("/{id}")]
async fn get_invite(db: web::Data<Arc<DbService>>, path: web::Path<String>) -> ApiResult<InviteModel> {
    Ok(ApiResponse::Ok(db.get_invite(&path.into_inner()).await?))
}

#[post("/{id}/approve")]
async fn approve_invite(db: web::Data<Arc<DbService>>, path: web::Path<String>) -> ApiResult<Decision> {
    let status = db.approve_invite(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(Decision {
        message: "Successfully accepted invite and joined team!".into(),
        status,
    }))
}

#[post("/{id}/decline")]
async fn decline_invite(db: web::Data<Arc<DbService>>, path: web::Path<String>) -> ApiResult<Decision> {
    let status = db.decline_invite(&path.into_inner()).await?;
    Ok(ApiResponse::Ok(Decision {
        message: "Invite declined.".into(),
        status,
    }))
}
