//! Explicit state machines for invites and vacation approvals.
//!
//! Each entity has a transition table `(state, event) -> (next state, side effects)`.
//! Anything outside the table fails with [`AppError::InvalidTransition`].
//!
//! [`AppError::InvalidTransition`]: crate::types::error::AppError::InvalidTransition

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod invite;
pub mod vacation;

/// How strictly decided entities are protected from being decided again.
///
/// `Permissive` keeps the long-standing behavior: an invite or approval can be moved to
/// any decision from any state. `Strict` only allows leaving the open state. Which one
/// the product wants is still undecided, so it is a deployment setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl FromStr for TransitionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(format!("unknown transition policy '{other}'")),
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionPolicy::Permissive => f.write_str("permissive"),
            TransitionPolicy::Strict => f.write_str("strict"),
        }
    }
}
