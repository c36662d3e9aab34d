use chrono::Utc;
use entity::invite::{
    ActiveModel as InviteActive, Column as InviteColumn, Entity as Invite, Model as InviteModel,
};
use entity::team::{Column as TeamColumn, Entity as Team};
use entity::user::{Column as UserColumn, Entity as User};
use sea_orm::sea_query::{Alias, Expr, JoinType, Order, Query, SelectStatement};
use sea_orm::{DbErr, EntityTrait, Set};
use tracing::{info, warn};

use crate::db::executor::{self, Executor};
use crate::db::service::DbService;
use crate::db::teams::MembershipLookup;
use crate::macros::decode;
use crate::types::error::AppError;
use crate::types::invite::{CreateInvitePayload, InviteInfo, InviteStatus};
use crate::utils::crypto::new_id;
use crate::workflow::invite::{self as flow, InviteEvent};

impl DbService {
    /// Records a new open invite after checking that everything it points at exists.
    pub async fn create_invite(&self, payload: CreateInvitePayload) -> Result<InviteModel, AppError> {
        self.get_team(&payload.team_id).await?;
        self.get_user_by_id(&payload.from_user_id).await?;
        self.get_user_by_id(&payload.to_user_id).await?;

        let invite = InviteModel {
            id: new_id(),
            invite_type: payload.invite_type.code(),
            from_user_id: payload.from_user_id,
            to_user_id: payload.to_user_id,
            team_id: payload.team_id,
            status: InviteStatus::Open.code(),
            created_at: Utc::now(),
            changed_at: None,
        };

        executor::execute(
            &self.database_connection,
            &Invite::insert(InviteActive {
                id: Set(invite.id.clone()),
                invite_type: Set(invite.invite_type),
                from_user_id: Set(invite.from_user_id.clone()),
                to_user_id: Set(invite.to_user_id.clone()),
                team_id: Set(invite.team_id.clone()),
                status: Set(invite.status),
                created_at: Set(invite.created_at),
                changed_at: Set(None),
            }),
        )
        .await?;

        info!(
            "Invite {} created: {} -> {} for team {}",
            invite.id, invite.from_user_id, invite.to_user_id, invite.team_id
        );
        Ok(invite)
    }

    pub async fn get_invite(&self, id: &str) -> Result<InviteModel, AppError> {
        Ok(Invite::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("invite {id}")))?)
    }

    pub async fn approve_invite(&self, invite_id: &str) -> Result<InviteStatus, AppError> {
        self.approve_invite_with(invite_id, self).await
    }

    /// Approves an invite using `members` to find out who is already on the team.
    ///
    /// The transition table is consulted before the roster, so a refused transition reads the
    /// same whether or not the user is on the team. The roster check happens outside the
    /// transaction. Two approvals racing past it are separated by the unique membership
    /// index: the second insert fails, its scope rolls back and the caller gets `Conflict`.
    pub async fn approve_invite_with(
        &self,
        invite_id: &str,
        members: &dyn MembershipLookup,
    ) -> Result<InviteStatus, AppError> {
        let invite = self.get_invite(invite_id).await?;
        let policy = self.policy;
        flow::transition(policy, decode(invite.status)?, InviteEvent::Approve)?;

        let roster = members.roster(&invite.team_id).await?;
        if roster.iter().any(|u| *u == invite.to_user_id) {
            warn!(
                "Invite {}: user {} is already on team {}",
                invite.id, invite.to_user_id, invite.team_id
            );
            return Err(AppError::Conflict("user is already a part of the team".into()));
        }

        self.run_atomic(move |txn| {
            Box::pin(async move { flow::apply(txn, &invite, InviteEvent::Approve, policy).await })
        })
        .await
    }

    pub async fn decline_invite(&self, invite_id: &str) -> Result<InviteStatus, AppError> {
        let invite = self.get_invite(invite_id).await?;

        let policy = self.policy;
        self.run_atomic(move |txn| {
            Box::pin(async move { flow::apply(txn, &invite, InviteEvent::Decline, policy).await })
        })
        .await
    }

    /// Invites sent by `user_id`, newest first.
    pub async fn invites_from(&self, user_id: &str) -> Result<Vec<InviteInfo>, AppError> {
        let stmt = invite_info_query()
            .and_where(Expr::col((Invite, InviteColumn::FromUserId)).eq(user_id))
            .to_owned();
        let db = &self.database_connection;
        executor::project(db, db.backend()?.build(&stmt)).await
    }

    /// Invites addressed to `user_id`, newest first.
    pub async fn invites_to(&self, user_id: &str) -> Result<Vec<InviteInfo>, AppError> {
        let stmt = invite_info_query()
            .and_where(Expr::col((Invite, InviteColumn::ToUserId)).eq(user_id))
            .to_owned();
        let db = &self.database_connection;
        executor::project(db, db.backend()?.build(&stmt)).await
    }
}

fn invite_info_query() -> SelectStatement {
    let ufrom = Alias::new("ufrom");
    let uto = Alias::new("uto");

    Query::select()
        .expr_as(Expr::col((Invite, InviteColumn::Id)), Alias::new("id"))
        .expr_as(Expr::col((ufrom.clone(), UserColumn::Name)), Alias::new("from_user_name"))
        .expr_as(Expr::col((uto.clone(), UserColumn::Name)), Alias::new("to_user_name"))
        .expr_as(Expr::col((Team, TeamColumn::Name)), Alias::new("team_name"))
        .expr_as(Expr::col((Invite, InviteColumn::Status)), Alias::new("status"))
        .expr_as(Expr::col((Invite, InviteColumn::CreatedAt)), Alias::new("created_at"))
        .from(Invite)
        .join_as(
            JoinType::InnerJoin,
            User,
            ufrom.clone(),
            Expr::col((ufrom, UserColumn::Id)).equals((Invite, InviteColumn::FromUserId)),
        )
        .join_as(
            JoinType::InnerJoin,
            User,
            uto.clone(),
            Expr::col((uto, UserColumn::Id)).equals((Invite, InviteColumn::ToUserId)),
        )
        .inner_join(
            Team,
            Expr::col((Team, TeamColumn::Id)).equals((Invite, InviteColumn::TeamId)),
        )
        .order_by((Invite, InviteColumn::CreatedAt), Order::Desc)
        .to_owned()
}
