use actix_web::{delete, get, post, web};
use entity::team::Model as TeamModel;
use std::sync::Arc;

use crate::db::service::DbService;
use crate::types::response::{ApiResponse, ApiResult, Message};
use crate::types::team::{AddTeamPayload, TeamUser, UserToTeamPayload};
use crate::types::validate::Validator;

/// Mounted behind the admin bearer check in `configure_routes`.
pub async fn create_team(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<AddTeamPayload>,
) -> ApiResult<TeamModel> {
    validator.check(&*body)?;
    let team = db.create_team(body.name.trim().to_string()).await?;
    Ok(ApiResponse::Created(team))
}

#[get("")]
async fn list_teams(db: web::Data<Arc<DbService>>) -> ApiResult<Vec<TeamModel>> {
    Ok(ApiResponse::Ok(db.list_teams().await?))
}

#[post("/users")]
async fn add_user(
    db: web::Data<Arc<DbService>>,
    validator: web::Data<Validator>,
    body: web::Json<UserToTeamPayload>,
) -> ApiResult<Message> {
    validator.check(&*body)?;
    db.add_user_to_team(&body.user_id, &body.team_id, body.role).await?;
    Ok(ApiResponse::Created(Message::new(
        "Successfully added user to team.",
    )))
}

#[get("/{id}")]
async fn get_team(db: web::Data<Arc<DbService>>, path: web::Path<String>) -> ApiResult<TeamModel> {
    Ok(ApiResponse::Ok(db.get_team(&path.into_inner()).await?))
}

#[get("/{id}/users")]
async fn team_users(
    db: web::Data<Arc<DbService>>,
    path: web::Path<String>,
) -> ApiResult<Vec<TeamUser>> {
    let team_id = path.into_inner();
    db.get_team(&team_id).await?;
    Ok(ApiResponse::Ok(db.list_users_in_team(&team_id).await?))
}

#[delete("/{team_id}/users/{user_id}")]
async fn remove_user(
    db: web::Data<Arc<DbService>>,
    path: web::Path<(String, String)>,
) -> ApiResult<Message> {
    let (team_id, user_id) = path.into_inner();
    db.remove_user_from_team(&user_id, &team_id).await?;
    Ok(ApiResponse::NoContent)
}
