use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::workflow::TransitionPolicy;

#[derive(Clone)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
    pub(crate) policy: TransitionPolicy,
}

impl DbService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        Self::connect(ConnectOptions::new(uri)).await
    }

    /// Connects with explicit pool options and brings the schema up to date.
    pub async fn connect(options: ConnectOptions) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let database_connection = Database::connect(options).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Database ready.");
        Ok(Self {
            database_connection,
            policy: TransitionPolicy::default(),
        })
    }

    pub fn with_transition_policy(mut self, policy: TransitionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn transition_policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
