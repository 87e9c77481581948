//! Execution log port: append-only record of rule executions.

use std::future::Future;

use nautilus_domain::error::NautilusError;
use nautilus_domain::execution::ExecutionResult;

/// Append-only store of [`ExecutionResult`]s.
pub trait ExecutionLog {
    /// Append one result. Entries keep append order.
    fn append(
        &self,
        result: ExecutionResult,
    ) -> impl Future<Output = Result<(), NautilusError>> + Send;

    /// Snapshot of every retained result, oldest first.
    fn get_all(&self) -> impl Future<Output = Result<Vec<ExecutionResult>, NautilusError>> + Send;

    /// Drop every retained result.
    fn clear(&self) -> impl Future<Output = Result<(), NautilusError>> + Send;
}

impl<T: ExecutionLog + Send + Sync> ExecutionLog for std::sync::Arc<T> {
    fn append(
        &self,
        result: ExecutionResult,
    ) -> impl Future<Output = Result<(), NautilusError>> + Send {
        (**self).append(result)
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ExecutionResult>, NautilusError>> + Send {
        (**self).get_all()
    }

    fn clear(&self) -> impl Future<Output = Result<(), NautilusError>> + Send {
        (**self).clear()
    }
}
