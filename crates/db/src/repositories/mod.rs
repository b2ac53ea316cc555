use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod slot;

pub use memory::InMemorySlotRepository;
pub use slot::SqlSlotRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Async key-value storage for serialized collections.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
    async fn remove(&self, key: &str) -> Result<(), RepositoryError>;

    /// Releases pooled resources. Defaults to a no-op.
    async fn close(&self) {}
}
