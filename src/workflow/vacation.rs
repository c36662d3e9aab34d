use std::fmt;

use chrono::Utc;
use entity::vacation_approval::{
    Column as ApprovalColumn, Entity as VacationApproval, Model as ApprovalModel,
};
use entity::vacation_request::{Column as RequestColumn, Entity as VacationRequest};
use sea_orm::{sea_query::Expr, ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use crate::db::executor::{self, Executor};
use crate::macros::decode;
use crate::types::error::AppError;
use crate::types::vacation::{ApprovalStatus, RequestStatus};
use crate::workflow::TransitionPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalEvent {
    Approve,
    Decline,
    Reopen,
}

impl ApprovalEvent {
    /// The event an approver sends by asking for `status`.
    pub fn toward(status: ApprovalStatus) -> Self {
        match status {
            ApprovalStatus::Approved => ApprovalEvent::Approve,
            ApprovalStatus::Declined => ApprovalEvent::Decline,
            ApprovalStatus::Open => ApprovalEvent::Reopen,
        }
    }

    fn target(self) -> ApprovalStatus {
        match self {
            ApprovalEvent::Approve => ApprovalStatus::Approved,
            ApprovalEvent::Decline => ApprovalStatus::Declined,
            ApprovalEvent::Reopen => ApprovalStatus::Open,
        }
    }
}

impl fmt::Display for ApprovalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApprovalEvent::Approve => f.write_str("approve"),
            ApprovalEvent::Decline => f.write_str("decline"),
            ApprovalEvent::Reopen => f.write_str("reopen"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalEffect {
    /// Recompute the parent request's status from all of its approvals.
    ReconcileRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApprovalTransition {
    pub next: ApprovalStatus,
    pub effects: &'static [ApprovalEffect],
}

/// The approval transition table.
pub fn transition(
    policy: TransitionPolicy,
    from: ApprovalStatus,
    event: ApprovalEvent,
) -> Result<ApprovalTransition, AppError> {
    let allowed = match (policy, from, event) {
        (_, ApprovalStatus::Open, ApprovalEvent::Approve | ApprovalEvent::Decline) => true,
        (TransitionPolicy::Permissive, _, _) => true,
        (TransitionPolicy::Strict, _, _) => false,
    };

    if !allowed {
        return Err(AppError::InvalidTransition {
            entity: "vacation approval",
            from: from.to_string(),
            event: event.to_string(),
        });
    }

    Ok(ApprovalTransition {
        next: event.target(),
        effects: &[ApprovalEffect::ReconcileRequest],
    })
}

pub fn sources(policy: TransitionPolicy, event: ApprovalEvent) -> Vec<ApprovalStatus> {
    ApprovalStatus::ALL
        .iter()
        .copied()
        .filter(|from| transition(policy, *from, event).is_ok())
        .collect()
}

/// Request status implied by its approvals.
///
/// One decline declines the request, all approvals approve it. While decisions are still
/// missing a substitution already recorded on the request is kept, anything else is open.
pub fn derive_request_status(current: RequestStatus, approvals: &[ApprovalStatus]) -> RequestStatus {
    if approvals.contains(&ApprovalStatus::Declined) {
        return RequestStatus::Declined;
    }
    if !approvals.is_empty() && approvals.iter().all(|a| *a == ApprovalStatus::Approved) {
        return RequestStatus::Approved;
    }
    match current {
        RequestStatus::SubstitutedMember | RequestStatus::SubstitutedTeamlead => current,
        _ => RequestStatus::Open,
    }
}

/// Moves one approval through `event`, then brings the parent request in line.
/// Returns the approval's new status and the request's resulting status.
pub async fn apply<E>(
    db: &E,
    approval: &ApprovalModel,
    event: ApprovalEvent,
    policy: TransitionPolicy,
) -> Result<(ApprovalStatus, RequestStatus), AppError>
where
    E: Executor + ?Sized,
{
    let from: ApprovalStatus = decode(approval.status)?;
    let step = transition(policy, from, event)?;
    let allowed: Vec<i32> = sources(policy, event).into_iter().map(i32::from).collect();

    let changed = executor::execute(
        db,
        &VacationApproval::update_many()
            .col_expr(ApprovalColumn::Status, Expr::value(step.next.code()))
            .col_expr(ApprovalColumn::ChangedAt, Expr::value(Utc::now()))
            .filter(ApprovalColumn::RequestId.eq(approval.request_id.as_str()))
            .filter(ApprovalColumn::ApproverId.eq(approval.approver_id.as_str()))
            .filter(ApprovalColumn::Status.is_in(allowed)),
    )
    .await?;

    if changed == 0 {
        return Err(AppError::Conflict(format!(
            "approval of {} by {} was changed by another request",
            approval.request_id, approval.approver_id
        )));
    }

    let mut request_status = RequestStatus::Open;
    for effect in step.effects {
        match effect {
            ApprovalEffect::ReconcileRequest => {
                request_status = reconcile_request(db, &approval.request_id).await?;
            }
        }
    }

    info!(
        "Approval of {} by {} moved {} -> {}, request is {}",
        approval.request_id, approval.approver_id, from, step.next, request_status
    );
    Ok((step.next, request_status))
}

async fn reconcile_request<E>(db: &E, request_id: &str) -> Result<RequestStatus, AppError>
where
    E: Executor + ?Sized,
{
    let request = executor::find_one::<entity::vacation_request::Model, _, _>(
        db,
        &VacationRequest::find_by_id(request_id.to_string()),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("vacation request {request_id}")))?;

    let approvals = executor::find_all::<ApprovalModel, _, _>(
        db,
        &VacationApproval::find().filter(ApprovalColumn::RequestId.eq(request_id)),
    )
    .await?
    .iter()
    .map(|a| decode(a.status))
    .collect::<Result<Vec<ApprovalStatus>, _>>()?;

    let current: RequestStatus = decode(request.status)?;
    let next = derive_request_status(current, &approvals);

    if next != current {
        executor::execute(
            db,
            &VacationRequest::update_many()
                .col_expr(RequestColumn::Status, Expr::value(next.code()))
                .col_expr(RequestColumn::ChangedAt, Expr::value(Utc::now()))
                .filter(RequestColumn::Id.eq(request_id)),
        )
        .await?;
    }

    Ok(next)
}
