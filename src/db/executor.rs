//! One way to run statements, whether the caller holds the pool or an open transaction.
//!
//! Workflow code takes `&E where E: Executor + ?Sized` and never names the concrete handle.
//! The two adapters are `DatabaseConnection` (standalone writes) and `DatabaseTransaction`
//! (writes that belong to a scope opened by [`DbService::run_atomic`]).
//!
//! [`DbService::run_atomic`]: crate::db::service::DbService::run_atomic

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, FromQueryResult,
    QueryResult, QueryTrait, Statement,
};

use crate::types::error::AppError;

#[async_trait]
pub trait Executor: Send + Sync {
    /// Backend the statements must be built for. Fails for handles that cannot execute.
    fn backend(&self) -> Result<DbBackend, AppError>;

    /// Runs a mutation and returns the number of rows it touched.
    async fn exec(&self, stmt: Statement) -> Result<u64, AppError>;

    async fn fetch_opt(&self, stmt: Statement) -> Result<Option<QueryResult>, AppError>;

    async fn fetch(&self, stmt: Statement) -> Result<Vec<QueryResult>, AppError>;
}

#[async_trait]
impl Executor for DatabaseConnection {
    fn backend(&self) -> Result<DbBackend, AppError> {
        match self {
            DatabaseConnection::Disconnected => Err(AppError::UnsupportedHandle),
            conn => Ok(conn.get_database_backend()),
        }
    }

    async fn exec(&self, stmt: Statement) -> Result<u64, AppError> {
        self.backend()?;
        let res = ConnectionTrait::execute(self, stmt).await?;
        Ok(res.rows_affected())
    }

    async fn fetch_opt(&self, stmt: Statement) -> Result<Option<QueryResult>, AppError> {
        self.backend()?;
        Ok(ConnectionTrait::query_one(self, stmt).await?)
    }

    async fn fetch(&self, stmt: Statement) -> Result<Vec<QueryResult>, AppError> {
        self.backend()?;
        Ok(ConnectionTrait::query_all(self, stmt).await?)
    }
}

#[async_trait]
impl Executor for DatabaseTransaction {
    fn backend(&self) -> Result<DbBackend, AppError> {
        Ok(self.get_database_backend())
    }

    async fn exec(&self, stmt: Statement) -> Result<u64, AppError> {
        let res = ConnectionTrait::execute(self, stmt).await?;
        Ok(res.rows_affected())
    }

    async fn fetch_opt(&self, stmt: Statement) -> Result<Option<QueryResult>, AppError> {
        Ok(ConnectionTrait::query_one(self, stmt).await?)
    }

    async fn fetch(&self, stmt: Statement) -> Result<Vec<QueryResult>, AppError> {
        Ok(ConnectionTrait::query_all(self, stmt).await?)
    }
}

/// Builds `mutation` for the handle's backend and runs it.
pub async fn execute<E, Q>(db: &E, mutation: &Q) -> Result<u64, AppError>
where
    E: Executor + ?Sized,
    Q: QueryTrait + Sync,
{
    let stmt = mutation.build(db.backend()?);
    db.exec(stmt).await
}

pub async fn find_one<M, E, Q>(db: &E, query: &Q) -> Result<Option<M>, AppError>
where
    M: FromQueryResult,
    E: Executor + ?Sized,
    Q: QueryTrait + Sync,
{
    let stmt = query.build(db.backend()?);
    match db.fetch_opt(stmt).await? {
        Some(row) => Ok(Some(M::from_query_result(&row, "")?)),
        None => Ok(None),
    }
}

pub async fn find_all<M, E, Q>(db: &E, query: &Q) -> Result<Vec<M>, AppError>
where
    M: FromQueryResult,
    E: Executor + ?Sized,
    Q: QueryTrait + Sync,
{
    let stmt = query.build(db.backend()?);
    db.fetch(stmt)
        .await?
        .iter()
        .map(|row| M::from_query_result(row, "").map_err(AppError::from))
        .collect()
}

/// Runs an already built statement whose rows map onto a display projection.
pub async fn project<M, E>(db: &E, stmt: Statement) -> Result<Vec<M>, AppError>
where
    M: FromQueryResult,
    E: Executor + ?Sized,
{
    db.fetch(stmt)
        .await?
        .iter()
        .map(|row| M::from_query_result(row, "").map_err(AppError::from))
        .collect()
}
