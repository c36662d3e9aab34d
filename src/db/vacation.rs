use chrono::Utc;
use entity::team::{Column as TeamColumn, Entity as Team};
use entity::user::{Column as UserColumn, Entity as User};
use entity::vacation_approval::{
    ActiveModel as ApprovalActive, Column as ApprovalColumn, Entity as VacationApproval,
    Model as ApprovalModel,
};
use entity::vacation_request::{
    ActiveModel as RequestActive, Column as RequestColumn, Entity as VacationRequest,
    Model as RequestModel,
};
use sea_orm::sea_query::{Alias, Expr, JoinType, Order, Query, SelectStatement};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

use crate::db::executor::{self, Executor};
use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::types::vacation::{
    ApprovalStatus, CreateVacationRequestPayload, RequestStatus, VacationApprovalPayload,
    VacationRequestInfo,
};
use crate::utils::crypto::new_id;
use crate::workflow::vacation::{self as flow, ApprovalEvent};

/// Outcome of one approval decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub approval_status: ApprovalStatus,
    pub request_status: RequestStatus,
}

impl DbService {
    /// Creates a request together with its first approval, addressed to `to_user_id`.
    /// Either both rows exist afterwards or neither does.
    pub async fn create_vacation_request(
        &self,
        payload: CreateVacationRequestPayload,
    ) -> Result<RequestModel, AppError> {
        self.get_team(&payload.team_id).await?;
        self.get_user_by_id(&payload.to_user_id).await?;
        self.get_user_by_id(&payload.requested_from).await?;

        let now = Utc::now();
        let request = RequestModel {
            id: new_id(),
            requested_from: payload.requested_from,
            to_user_id: payload.to_user_id,
            team_id: payload.team_id,
            info: payload.info,
            status: RequestStatus::Open.code(),
            from_date: payload.from_date,
            to_date: payload.to_date,
            created_at: now,
            changed_at: None,
        };

        let row = request.clone();
        self.run_atomic(move |txn| {
            Box::pin(async move {
                executor::execute(
                    txn,
                    &VacationRequest::insert(RequestActive {
                        id: Set(row.id.clone()),
                        requested_from: Set(row.requested_from),
                        to_user_id: Set(row.to_user_id.clone()),
                        team_id: Set(row.team_id),
                        info: Set(row.info),
                        status: Set(row.status),
                        from_date: Set(row.from_date),
                        to_date: Set(row.to_date),
                        created_at: Set(row.created_at),
                        changed_at: Set(None),
                    }),
                )
                .await?;

                executor::execute(
                    txn,
                    &VacationApproval::insert(ApprovalActive {
                        request_id: Set(row.id),
                        approver_id: Set(row.to_user_id),
                        status: Set(ApprovalStatus::Open.code()),
                        changed_at: Set(now),
                    }),
                )
                .await?;
                Ok(())
            })
        })
        .await?;

        info!(
            "Vacation request {} from {} sent to {} ({} - {})",
            request.id, request.requested_from, request.to_user_id, request.from_date, request.to_date
        );
        Ok(request)
    }

    pub async fn get_vacation_request(&self, id: &str) -> Result<RequestModel, AppError> {
        Ok(VacationRequest::find_by_id(id.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("vacation request {id}")))?)
    }

    /// Records an approver's decision and recomputes the request's status in the same scope.
    /// A missing (request, approver) pair is `NotFound`.
    pub async fn update_approval(
        &self,
        payload: VacationApprovalPayload,
    ) -> Result<ApprovalOutcome, AppError> {
        let policy = self.policy;
        let event = ApprovalEvent::toward(payload.status);

        self.run_atomic(move |txn| {
            Box::pin(async move {
                let approval = executor::find_one::<ApprovalModel, _, _>(
                    txn,
                    &VacationApproval::find_by_id((
                        payload.request_id.clone(),
                        payload.approver_id.clone(),
                    )),
                )
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!(
                        "approval of {} by {}",
                        payload.request_id, payload.approver_id
                    ))
                })?;

                let (approval_status, request_status) =
                    flow::apply(txn, &approval, event, policy).await?;
                Ok(ApprovalOutcome {
                    approval_status,
                    request_status,
                })
            })
        })
        .await
    }

    pub async fn approvals_for(&self, request_id: &str) -> Result<Vec<ApprovalModel>, AppError> {
        self.get_vacation_request(request_id).await?;
        Ok(VacationApproval::find()
            .filter(ApprovalColumn::RequestId.eq(request_id))
            .order_by_asc(ApprovalColumn::ApproverId)
            .all(&self.database_connection)
            .await?)
    }

    /// Requests waiting on `approver_id`, through the approvals addressed to them.
    pub async fn requests_for(&self, approver_id: &str) -> Result<Vec<VacationRequestInfo>, AppError> {
        let stmt = request_info_query()
            .inner_join(
                VacationApproval,
                Expr::col((VacationApproval, ApprovalColumn::RequestId))
                    .equals((VacationRequest, RequestColumn::Id)),
            )
            .and_where(Expr::col((VacationApproval, ApprovalColumn::ApproverId)).eq(approver_id))
            .to_owned();
        let db = &self.database_connection;
        executor::project(db, db.backend()?.build(&stmt)).await
    }

    /// Requests filed by `user_id`.
    pub async fn requests_from(&self, user_id: &str) -> Result<Vec<VacationRequestInfo>, AppError> {
        let stmt = request_info_query()
            .and_where(Expr::col((VacationRequest, RequestColumn::RequestedFrom)).eq(user_id))
            .to_owned();
        let db = &self.database_connection;
        executor::project(db, db.backend()?.build(&stmt)).await
    }
}

fn request_info_query() -> SelectStatement {
    let ufrom = Alias::new("ufrom");
    let uto = Alias::new("uto");

    Query::select()
        .expr_as(Expr::col((VacationRequest, RequestColumn::Id)), Alias::new("id"))
        .expr_as(Expr::col((ufrom.clone(), UserColumn::Name)), Alias::new("from_user_name"))
        .expr_as(Expr::col((uto.clone(), UserColumn::Name)), Alias::new("to_user_name"))
        .expr_as(Expr::col((Team, TeamColumn::Name)), Alias::new("team_name"))
        .expr_as(Expr::col((VacationRequest, RequestColumn::Info)), Alias::new("info"))
        .expr_as(Expr::col((VacationRequest, RequestColumn::Status)), Alias::new("status"))
        .expr_as(Expr::col((VacationRequest, RequestColumn::FromDate)), Alias::new("from_date"))
        .expr_as(Expr::col((VacationRequest, RequestColumn::ToDate)), Alias::new("to_date"))
        .expr_as(Expr::col((VacationRequest, RequestColumn::ChangedAt)), Alias::new("changed_at"))
        .from(VacationRequest)
        .join_as(
            JoinType::InnerJoin,
            User,
            ufrom.clone(),
            Expr::col((ufrom, UserColumn::Id)).equals((VacationRequest, RequestColumn::RequestedFrom)),
        )
        .join_as(
            JoinType::InnerJoin,
            User,
            uto.clone(),
            Expr::col((uto, UserColumn::Id)).equals((VacationRequest, RequestColumn::ToUserId)),
        )
        .inner_join(
            Team,
            Expr::col((Team, TeamColumn::Id)).equals((VacationRequest, RequestColumn::TeamId)),
        )
        .order_by((VacationRequest, RequestColumn::FromDate), Order::Asc)
        .to_owned()
}
