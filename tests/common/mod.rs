use std::sync::Arc;

use holiday_planner::db::service::DbService;
use holiday_planner::types::invite::{CreateInvitePayload, InviteType};
use holiday_planner::types::user::DbUserCreate;
use holiday_planner::workflow::TransitionPolicy;
use sea_orm::ConnectOptions;
use uuid::Uuid;

pub mod client;
#[cfg(feature = "postgres-tests")]
pub mod postgres;

pub struct TestContext {
    pub db: Arc<DbService>,
}

impl TestContext {
    pub async fn new() -> TestContext {
        Self::with_policy(TransitionPolicy::Permissive).await
    }

    pub async fn with_policy(policy: TransitionPolicy) -> TestContext {
        // every pooled sqlite memory connection is its own database, so keep exactly one
        let mut options = ConnectOptions::new("sqlite::memory:");
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let db = DbService::connect(options)
            .await
            .expect("Failed to initialize DbService")
            .with_transition_policy(policy);

        TestContext { db: Arc::new(db) }
    }

    pub async fn user(&self, name: &str) -> String {
        self.db
            .create_user(DbUserCreate {
                name: name.to_string(),
                email: format!("{}-{}@test.com", name.to_lowercase(), Uuid::new_v4()),
                password_hash: "not-a-real-hash".to_string(),
            })
            .await
            .expect("Failed to create user")
    }

    pub async fn team(&self, name: &str) -> String {
        self.db
            .create_team(name.to_string())
            .await
            .expect("Failed to create team")
            .id
    }

    #[allow(dead_code)]
    pub fn invite_payload(&self, from: &str, to: &str, team: &str) -> CreateInvitePayload {
        CreateInvitePayload {
            invite_type: InviteType::TeamInvite,
            from_user_id: from.to_string(),
            to_user_id: to.to_string(),
            team_id: team.to_string(),
        }
    }
}
