use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::types::validate::{Validate, ValidationErrors, Validator};

int_enum! {
    pub enum RequestStatus {
        Open = 0 => "open",
        SubstitutedMember = 1 => "substituted by member",
        SubstitutedTeamlead = 2 => "substituted by teamlead",
        Approved = 3 => "approved",
        Declined = 4 => "declined",
    }
}

int_enum! {
    pub enum ApprovalStatus {
        Open = 0 => "open",
        Approved = 1 => "approved",
        Declined = 2 => "declined",
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CreateVacationRequestPayload {
    pub requested_from: String,
    pub to_user_id: String,
    pub team_id: String,
    pub info: String,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
}

impl Validate for CreateVacationRequestPayload {
    fn validate(&self, _: &Validator, errors: &mut ValidationErrors) {
        errors.require_uuid("requestedFrom", &self.requested_from);
        errors.require_uuid("toUserId", &self.to_user_id);
        errors.require_uuid("teamId", &self.team_id);
        errors.require("info", &self.info);
        if self.from_date > self.to_date {
            errors.push("toDate", "must not be before fromDate");
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VacationApprovalPayload {
    pub request_id: String,
    pub approver_id: String,
    pub status: ApprovalStatus,
}

impl Validate for VacationApprovalPayload {
    fn validate(&self, _: &Validator, errors: &mut ValidationErrors) {
        errors.require_uuid("requestId", &self.request_id);
        errors.require_uuid("approverId", &self.approver_id);
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, FromQueryResult)]
#[serde(rename_all = "camelCase")]
pub struct VacationRequestInfo {
    pub id: String,
    pub from_user_name: String,
    pub to_user_name: String,
    pub team_name: String,
    pub info: String,
    pub status: i32,
    pub from_date: NaiveDate,
    pub to_date: NaiveDate,
    pub changed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> CreateVacationRequestPayload {
        CreateVacationRequestPayload {
            requested_from: uuid::Uuid::new_v4().to_string(),
            to_user_id: uuid::Uuid::new_v4().to_string(),
            team_id: uuid::Uuid::new_v4().to_string(),
            info: "PTO".into(),
            from_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            to_date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(Validator::default().check(&payload()).is_ok());
    }

    #[test]
    fn reversed_dates_and_blank_info_are_both_reported() {
        let mut p = payload();
        p.info = "  ".into();
        std::mem::swap(&mut p.from_date, &mut p.to_date);

        let mut errors = ValidationErrors::default();
        p.validate(&Validator::default(), &mut errors);
        assert!(errors.has("info"));
        assert!(errors.has("toDate"));
        assert_eq!(errors.fields().len(), 2);
    }

    #[test]
    fn approval_status_travels_as_integer() {
        let body = serde_json::json!({
            "requestId": uuid::Uuid::new_v4().to_string(),
            "approverId": uuid::Uuid::new_v4().to_string(),
            "status": 2
        });
        let p: VacationApprovalPayload = serde_json::from_value(body).unwrap();
        assert_eq!(p.status, ApprovalStatus::Declined);

        let bad = serde_json::json!({ "requestId": "a", "approverId": "b", "status": 9 });
        assert!(serde_json::from_value::<VacationApprovalPayload>(bad).is_err());
    }
}
