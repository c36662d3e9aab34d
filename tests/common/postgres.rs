use std::ops::Deref;
use std::sync::Arc;

use holiday_planner::db::service::DbService;
use holiday_planner::workflow::TransitionPolicy;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use super::TestContext;

/// `TestContext` backed by a disposable Postgres container instead of sqlite.
pub struct PostgresContext {
    ctx: TestContext,
    _container: ContainerAsync<Postgres>,
}

impl PostgresContext {
    pub async fn new(policy: TransitionPolicy) -> PostgresContext {
        let container = Postgres::default()
            .start()
            .await
            .expect("Failed to start postgres container");

        let host = container.get_host().await.expect("Failed to get host");
        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get port");
        let db_url = format!("postgresql://postgres:postgres@{}:{}/postgres", host, port);

        let db = DbService::new(&db_url)
            .await
            .expect("Failed to initialize DbService")
            .with_transition_policy(policy);

        PostgresContext {
            ctx: TestContext { db: Arc::new(db) },
            _container: container,
        }
    }
}

impl Deref for PostgresContext {
    type Target = TestContext;

    fn deref(&self) -> &TestContext {
        &self.ctx
    }
}
