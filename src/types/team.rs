use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::types::validate::{Validate, ValidationErrors, Validator};

int_enum! {
    pub enum UserRole {
        Administrator = 0 => "administrator",
        Member = 1 => "member",
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AddTeamPayload {
    pub name: String,
}

impl Validate for AddTeamPayload {
    fn validate(&self, _: &Validator, errors: &mut ValidationErrors) {
        errors.require("name", &self.name);
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UserToTeamPayload {
    pub user_id: String,
    pub team_id: String,
    #[serde(rename = "userRole")]
    pub role: UserRole,
}

impl Validate for UserToTeamPayload {
    fn validate(&self, _: &Validator, errors: &mut ValidationErrors) {
        errors.require_uuid("userId", &self.user_id);
        errors.require_uuid("teamId", &self.team_id);
    }
}

/// Roster entry: a user as seen from one team.
#[derive(Serialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct TeamUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub added_at: DateTime<Utc>,
    #[serde(rename = "userRole")]
    pub role: i32,
}
