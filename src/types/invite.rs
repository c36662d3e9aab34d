use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::types::validate::{Validate, ValidationErrors, Validator};

int_enum! {
    pub enum InviteStatus {
        Open = 0 => "open",
        Accepted = 1 => "accepted",
        Declined = 2 => "declined",
    }
}

int_enum! {
    pub enum InviteType {
        TeamInvite = 0 => "team invite",
        GroupInvite = 1 => "group invite",
    }
}

impl Default for InviteType {
    fn default() -> Self {
        InviteType::TeamInvite
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvitePayload {
    #[serde(default)]
    pub invite_type: InviteType,
    pub from_user_id: String,
    pub to_user_id: String,
    pub team_id: String,
}

impl Validate for CreateInvitePayload {
    fn validate(&self, _: &Validator, errors: &mut ValidationErrors) {
        errors.require_uuid("fromUserId", &self.from_user_id);
        errors.require_uuid("toUserId", &self.to_user_id);
        errors.require_uuid("teamId", &self.team_id);
    }
}

/// Display row for invite lists: names instead of ids.
#[derive(Serialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct InviteInfo {
    pub id: String,
    pub from_user_name: String,
    pub to_user_name: String,
    pub team_name: String,
    pub status: i32,
    pub created_at: DateTime<Utc>,
}
