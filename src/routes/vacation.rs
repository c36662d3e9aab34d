use actix_web::{get, post, web};
use entity::vacation_approval::Model as ApprovalModel;
use entity::vacation_request::Model as RequestModel;
use std::sync::Arc;

use crate::db::service::DbService;
use crate::db::vacation::ApprovalOutcome;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::vacation::{
    CreateVacationRequestPayload, VacationApprovalPayload, VacationRequestInfo,
};
use crate::types::validate::Validator;

#[post("/request")]
async fn create_request(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<CreateVacationRequestPayload>,
) -> ApiResult<RequestModel> {
    validator.check(&*body)?;
    let request = db.create_vacation_request(body.into_inner()).await?;
    Ok(ApiResponse::Created(request))
}

#[post("/requests/updateApproval")]
async fn update_approval(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<VacationApprovalPayload>,
) -> ApiResult<ApprovalOutcome> {
    validator.check(&*body)?;
    Ok(ApiResponse::Ok(db.update_approval(body.into_inner()).await?))
}

#[get("/requests/to/{user_id}")]
async fn requests_to(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<VacationRequestInfo>> {
    Ok(ApiResponse::Ok(db.requests_for(&path.into_inner()).await?))
}

#[get("/requests/from/{user_id}")]
async fn requests_from(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<VacationRequestInfo>> {
    Ok(ApiResponse::Ok(db.requests_from(&path.into_inner()).await?))
}

#[get("/requests/{id}/approvals")]
async fn approvals(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<ApprovalModel>> {
    Ok(ApiResponse::Ok(db.approvals_for(&path.into_inner()).await?))
}
