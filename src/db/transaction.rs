use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;

use futures::FutureExt;
use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::{error, warn};

use crate::db::service::DbService;
use crate::types::error::AppError;

/// Future returned by a unit of work. Borrows the transaction it runs in.
pub type UnitOfWork<'c, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'c>>;

impl DbService {
    /// Runs `work` inside a fresh transaction.
    ///
    /// Commits when `work` returns `Ok`, and reports a failed commit as an error.
    /// Rolls back when `work` returns `Err` and hands that error back untouched.
    /// Rolls back when `work` panics, then resumes the panic.
    /// There is no nesting, retry or timeout here.
    pub async fn run_atomic<T, F>(&self, work: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> UnitOfWork<'c, T> + Send,
    {
        let txn = self.database_connection.begin().await?;

        let outcome = AssertUnwindSafe(work(&txn)).catch_unwind().await;

        match outcome {
            Ok(Ok(value)) => {
                txn.commit().await.map_err(|err| {
                    error!("Commit failed: {}", err);
                    AppError::Internal(format!("commit failed: {err}"))
                })?;
                Ok(value)
            }
            Ok(Err(err)) => {
                if let Err(rb) = txn.rollback().await {
                    warn!("Rollback after '{}' failed: {}", err, rb);
                }
                Err(err)
            }
            Err(fault) => {
                if let Err(rb) = txn.rollback().await {
                    warn!("Rollback after panic failed: {}", rb);
                }
                panic::resume_unwind(fault)
            }
        }
    }
}
