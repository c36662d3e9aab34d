use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Column as UserColumn, Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;

use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::user::DbUserCreate;
use crate::utils::crypto::new_id;

impl DbService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(UserColumn::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {id}")))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user with email {email}")))?)
    }

    /// Signup: create user. The password must already be hashed.
    pub async fn create_user(&self, payload: DbUserCreate) -> Result<String, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::AlreadyExists);
        }
        let uid = new_id();

        User::insert(UserActive {
            id: Set(uid.clone()),
            name: Set(payload.name),
            email: Set(payload.email),
            password: Set(payload.password_hash),
            created_at: Set(Utc::now()),
        })
        .exec(&self.database_connection)
        .await
        .map_err(|e| match AppError::from(e) {
            err if err.is_unique_violation() => AppError::AlreadyExists,
            err => err,
        })?;

        info!("Registered user {}", uid);
        Ok(uid)
    }
}
