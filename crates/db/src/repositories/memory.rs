use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{RepositoryError, SlotRepository};

#[derive(Default)]
pub struct InMemorySlotRepository {
    slots: RwLock<HashMap<String, String>>,
}

#[async_trait::async_trait]
impl SlotRepository for InMemorySlotRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut slots = self.slots.write().await;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), RepositoryError> {
        let mut slots = self.slots.write().await;
        slots.remove(key);
        Ok(())
    }
}
