use actix_web::{get, web};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize)]
pub struct Response {
    pub status: &'static str,
}

#[get("")]
async fn health(db: web::Data<Arc<DbService>>) -> ApiResult<Response> {
    if let Err(e) = db.connection().ping().await {
        error!("Health check could not reach the database: {}", e);
        return Err(AppError::Internal("database unreachable".into()));
    }
    Ok(ApiResponse::Ok(Response { status: "ok" }))
}
