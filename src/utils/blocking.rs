use tokio::task;

use crate::errors::Result;

/// Runs store work (file I/O under a write lock) on tokio's blocking pool so a
/// contended lock never parks a runtime worker.
pub async fn run_blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work).await?
}
