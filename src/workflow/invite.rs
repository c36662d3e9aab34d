use std::fmt;

use chrono::Utc;
use entity::invite::{Column, Entity as Invite, Model as InviteModel};
use sea_orm::{sea_query::Expr, ColumnTrait, EntityTrait, QueryFilter};
use tracing::info;

use crate::db::executor::{self, Executor};
use crate::db::teams::insert_membership;
use crate::macros::decode;
use crate::types::error::AppError;
use crate::types::invite::InviteStatus;
use crate::types::team::UserRole;
use crate::workflow::TransitionPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteEvent {
    Approve,
    Decline,
}

impl fmt::Display for InviteEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InviteEvent::Approve => f.write_str("approve"),
            InviteEvent::Decline => f.write_str("decline"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteEffect {
    /// Put the invited user on the invite's team roster.
    AddMember(UserRole),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InviteTransition {
    pub next: InviteStatus,
    pub effects: &'static [InviteEffect],
}

const ACCEPT: InviteTransition = InviteTransition {
    next: InviteStatus::Accepted,
    effects: &[InviteEffect::AddMember(UserRole::Member)],
};

const DECLINE: InviteTransition = InviteTransition {
    next: InviteStatus::Declined,
    effects: &[],
};

/// The invite transition table.
pub fn transition(
    policy: TransitionPolicy,
    from: InviteStatus,
    event: InviteEvent,
) -> Result<InviteTransition, AppError> {
    use InviteEvent::*;
    use InviteStatus::*;

    match (policy, from, event) {
        (_, Open, Approve) => Ok(ACCEPT),
        (_, Open, Decline) => Ok(DECLINE),
        (TransitionPolicy::Permissive, _, Approve) => Ok(ACCEPT),
        (TransitionPolicy::Permissive, _, Decline) => Ok(DECLINE),
        (TransitionPolicy::Strict, from, event) => Err(AppError::InvalidTransition {
            entity: "invite",
            from: from.to_string(),
            event: event.to_string(),
        }),
    }
}

/// States `event` may start from under `policy`.
pub fn sources(policy: TransitionPolicy, event: InviteEvent) -> Vec<InviteStatus> {
    InviteStatus::ALL
        .iter()
        .copied()
        .filter(|from| transition(policy, *from, event).is_ok())
        .collect()
}

/// Moves `invite` through `event` and performs the transition's side effects.
///
/// Meant to run inside one atomic scope. The status write only matches rows still in an
/// allowed source state, so a decision made concurrently is reported instead of overwritten.
pub async fn apply<E>(
    db: &E,
    invite: &InviteModel,
    event: InviteEvent,
    policy: TransitionPolicy,
) -> Result<InviteStatus, AppError>
where
    E: Executor + ?Sized,
{
    let from: InviteStatus = decode(invite.status)?;
    let step = transition(policy, from, event)?;
    let allowed: Vec<i32> = sources(policy, event).into_iter().map(i32::from).collect();

    let changed = executor::execute(
        db,
        &Invite::update_many()
            .col_expr(Column::Status, Expr::value(step.next.code()))
            .col_expr(Column::ChangedAt, Expr::value(Utc::now()))
            .filter(Column::Id.eq(invite.id.as_str()))
            .filter(Column::Status.is_in(allowed)),
    )
    .await?;

    if changed == 0 {
        return Err(AppError::Conflict(format!(
            "invite {} was changed by another request",
            invite.id
        )));
    }

    for effect in step.effects {
        match effect {
            InviteEffect::AddMember(role) => {
                insert_membership(db, &invite.to_user_id, &invite.team_id, *role)
                    .await
                    .map_err(|e| e.on_unique_violation("user is already a part of the team"))?;
            }
        }
    }

    info!("Invite {} moved {} -> {}", invite.id, from, step.next);
    Ok(step.next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_invites_can_be_decided_under_both_policies() {
        for policy in [TransitionPolicy::Permissive, TransitionPolicy::Strict] {
            let t = transition(policy, InviteStatus::Open, InviteEvent::Approve).unwrap();
            assert_eq!(t.next, InviteStatus::Accepted);
            assert_eq!(t.effects, &[InviteEffect::AddMember(UserRole::Member)]);

            let t = transition(policy, InviteStatus::Open, InviteEvent::Decline).unwrap();
            assert_eq!(t.next, InviteStatus::Declined);
            assert!(t.effects.is_empty());
        }
    }

    // Re-deciding a closed invite is allowed today. Kept as the default until the
    // product side says otherwise; `strict` below is the alternative.
    #[test]
    fn permissive_policy_allows_redeciding() {
        let p = TransitionPolicy::Permissive;
        for from in [InviteStatus::Accepted, InviteStatus::Declined] {
            assert_eq!(
                transition(p, from, InviteEvent::Decline).unwrap().next,
                InviteStatus::Declined
            );
            assert_eq!(
                transition(p, from, InviteEvent::Approve).unwrap().next,
                InviteStatus::Accepted
            );
        }
        assert_eq!(sources(p, InviteEvent::Decline), InviteStatus::ALL.to_vec());
    }

    #[test]
    fn strict_policy_only_leaves_open() {
        let p = TransitionPolicy::Strict;
        let err = transition(p, InviteStatus::Declined, InviteEvent::Decline).unwrap_err();
        match err {
            AppError::InvalidTransition { entity, from, event } => {
                assert_eq!(entity, "invite");
                assert_eq!(from, "declined");
                assert_eq!(event, "decline");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(transition(p, InviteStatus::Accepted, InviteEvent::Approve).is_err());
        assert_eq!(sources(p, InviteEvent::Approve), vec![InviteStatus::Open]);
    }
}
