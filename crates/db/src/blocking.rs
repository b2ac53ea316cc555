use thiserror::Error;
use tokio::runtime::{Builder, Runtime};
use tracing::info;

use pipeboard_core::config::StorageConfig;
use pipeboard_core::errors::ApplicationError;
use pipeboard_core::store::SlotStore;

use crate::repositories::{RepositoryError, SlotRepository, SqlSlotRepository};
use crate::{connect_with_settings, migrations};

#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to build storage runtime: {0}")]
    Runtime(#[source] std::io::Error),
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Drives an async [`SlotRepository`] from synchronous callers on a private
/// current-thread runtime. Must not be used from inside another runtime.
pub struct BlockingSlotStore<R: SlotRepository> {
    repository: R,
    runtime: Runtime,
}

impl<R: SlotRepository> BlockingSlotStore<R> {
    pub fn new(repository: R) -> Result<Self, OpenError> {
        let runtime = current_thread_runtime()?;
        Ok(Self::with_runtime(repository, runtime))
    }

    pub fn with_runtime(repository: R, runtime: Runtime) -> Self {
        Self { repository, runtime }
    }
}

impl<R: SlotRepository> SlotStore for BlockingSlotStore<R> {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        self.runtime.block_on(self.repository.get(key)).map_err(persistence)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.runtime.block_on(self.repository.set(key, value)).map_err(persistence)
    }

    fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        self.runtime.block_on(self.repository.remove(key)).map_err(persistence)
    }
}

impl<R: SlotRepository> Drop for BlockingSlotStore<R> {
    fn drop(&mut self) {
        self.runtime.block_on(self.repository.close());
    }
}

fn persistence(error: RepositoryError) -> ApplicationError {
    ApplicationError::Persistence(error.to_string())
}

fn current_thread_runtime() -> Result<Runtime, OpenError> {
    Builder::new_current_thread().enable_all().build().map_err(OpenError::Runtime)
}

/// Connects, migrates, and wraps the configured SQLite database as a slot store.
pub fn open_sqlite_slot(
    storage: &StorageConfig,
) -> Result<BlockingSlotStore<SqlSlotRepository>, OpenError> {
    let runtime = current_thread_runtime()?;
    let pool = runtime
        .block_on(connect_with_settings(
            &storage.database_url,
            storage.max_connections,
            storage.timeout_secs,
        ))
        .map_err(OpenError::Connect)?;
    runtime.block_on(migrations::run_pending(&pool)).map_err(OpenError::Migration)?;

    info!(
        event_name = "storage.sqlite_opened",
        database_url = %storage.database_url,
        "sqlite slot store ready"
    );

    Ok(BlockingSlotStore::with_runtime(SqlSlotRepository::new(pool), runtime))
}
