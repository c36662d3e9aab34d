use async_trait::async_trait;
use chrono::Utc;
use entity::team::{ActiveModel as TeamActive, Column as TeamColumn, Entity as Team, Model as TeamModel};
use entity::user::{Column as UserColumn, Entity as User};
use entity::user_team::{
    ActiveModel as MembershipActive, Column as MembershipColumn, Entity as Membership,
    Model as MembershipModel,
};
use sea_orm::sea_query::{Alias, Expr, Order, Query};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::db::executor::{self, Executor};
use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::team::{TeamUser, UserRole};
use crate::utils::crypto::new_id;

/// Who is on a team. Invite approval asks this before it opens a transaction.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
    async fn roster(&self, team_id: &str) -> Result<Vec<String>, AppError>;
}

#[async_trait]
impl MembershipLookup for DbService {
    async fn roster(&self, team_id: &str) -> Result<Vec<String>, AppError> {
        Ok(Membership::find()
            .filter(MembershipColumn::TeamId.eq(team_id))
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|m| m.user_id)
            .collect())
    }
}

/// Single membership insert through whatever handle the caller holds.
pub async fn insert_membership<E>(
    db: &E,
    user_id: &str,
    team_id: &str,
    role: UserRole,
) -> Result<(), AppError>
where
    E: Executor + ?Sized,
{
    executor::execute(
        db,
        &Membership::insert(MembershipActive {
            id: Set(new_id()),
            user_id: Set(user_id.to_string()),
            team_id: Set(team_id.to_string()),
            role: Set(role.code()),
            created_at: Set(Utc::now()),
        }),
    )
    .await?;
    Ok(())
}

impl DbService {
    pub async fn team_exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        Ok(Team::find()
            .filter(TeamColumn::Name.eq(name))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn create_team(&self, name: String) -> Result<TeamModel, AppError> {
        if self.team_exists_by_name(&name).await? {
            return Err(AppError::AlreadyExists);
        }
        let team = TeamModel {
            id: new_id(),
            name,
            created_at: Utc::now(),
        };
        Team::insert(TeamActive {
            id: Set(team.id.clone()),
            name: Set(team.name.clone()),
            created_at: Set(team.created_at),
        })
        .exec(&self.database_connection)
        .await
        .map_err(|e| match AppError::from(e) {
            err if err.is_unique_violation() => AppError::AlreadyExists,
            err => err,
        })?;
        info!("Created team {} ({})", team.name, team.id);
        Ok(team)
    }

    pub async fn get_team(&self, id: &str) -> Result<TeamModel, AppError> {
        Ok(Team::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("team {id}")))?)
    }

    pub async fn get_team_by_name(&self, name: &str) -> Result<TeamModel, AppError> {
        Ok(Team::find()
            .filter(TeamColumn::Name.eq(name))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("team named {name}")))?)
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamModel>, AppError> {
        Ok(Team::find()
            .order_by_asc(TeamColumn::Name)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn rename_team(&self, team_id: &str, new_name: String) -> Result<TeamModel, AppError> {
        let team = self.get_team(team_id).await?;
        if team.name == new_name {
            return Ok(team);
        }
        if self.team_exists_by_name(&new_name).await? {
            return Err(AppError::AlreadyExists);
        }
        let mut am: TeamActive = team.into();
        am.name = Set(new_name);
        Ok(am.update(&self.database_connection).await?)
    }

    /// Adds `user_id` to the roster of `team_id`. A second add of the same pair is a conflict.
    pub async fn add_user_to_team(
        &self,
        user_id: &str,
        team_id: &str,
        role: UserRole,
    ) -> Result<(), AppError> {
        self.get_team(team_id).await?;
        self.get_user_by_id(user_id).await?;

        insert_membership(&self.database_connection, user_id, team_id, role)
            .await
            .map_err(|e| e.on_unique_violation("user is already a part of the team"))?;
        info!("Added user {} to team {} as {}", user_id, team_id, role);
        Ok(())
    }

    pub async fn remove_user_from_team(&self, user_id: &str, team_id: &str) -> Result<(), AppError> {
        let removed = executor::execute(
            &self.database_connection,
            &Membership::delete_many()
                .filter(MembershipColumn::UserId.eq(user_id))
                .filter(MembershipColumn::TeamId.eq(team_id)),
        )
        .await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!(
                "user {user_id} is not a member of team {team_id}"
            )));
        }
        Ok(())
    }

    pub async fn get_membership(
        &self,
        user_id: &str,
        team_id: &str,
    ) -> Result<Option<MembershipModel>, AppError> {
        Ok(Membership::find()
            .filter(MembershipColumn::UserId.eq(user_id))
            .filter(MembershipColumn::TeamId.eq(team_id))
            .one(&self.database_connection)
            .await?)
    }

    /// Roster with user details, oldest member first.
    pub async fn list_users_in_team(&self, team_id: &str) -> Result<Vec<TeamUser>, AppError> {
        let db = &self.database_connection;
        let stmt = Query::select()
            .expr_as(Expr::col((User, UserColumn::Id)), Alias::new("id"))
            .expr_as(Expr::col((User, UserColumn::Name)), Alias::new("name"))
            .expr_as(Expr::col((User, UserColumn::Email)), Alias::new("email"))
            .expr_as(Expr::col((Membership, MembershipColumn::CreatedAt)), Alias::new("added_at"))
            .expr_as(Expr::col((Membership, MembershipColumn::Role)), Alias::new("role"))
            .from(Membership)
            .inner_join(
                User,
                Expr::col((User, UserColumn::Id)).equals((Membership, MembershipColumn::UserId)),
            )
            .and_where(Expr::col((Membership, MembershipColumn::TeamId)).eq(team_id))
            .order_by((Membership, MembershipColumn::CreatedAt), Order::Asc)
            .to_owned();

        executor::project(db, db.backend()?.build(&stmt)).await
    }
}
