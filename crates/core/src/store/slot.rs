use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::ApplicationError;

/// A single-key string store holding the serialized collection.
pub trait SlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError>;
    fn remove(&self, key: &str) -> Result<(), ApplicationError>;
}

impl<T: SlotStore + ?Sized> SlotStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        (**self).remove(key)
    }
}

/// Process-local slot store; clones share the same slots.
#[derive(Clone, Debug, Default)]
pub struct MemorySlotStore {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl SlotStore for MemorySlotStore {
    fn get(&self, key: &str) -> Result<Option<String>, ApplicationError> {
        match self.slots.lock() {
            Ok(slots) => Ok(slots.get(key).cloned()),
            Err(poisoned) => Ok(poisoned.into_inner().get(key).cloned()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ApplicationError> {
        match self.slots.lock() {
            Ok(mut slots) => slots.insert(key.to_owned(), value.to_owned()),
            Err(poisoned) => poisoned.into_inner().insert(key.to_owned(), value.to_owned()),
        };
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ApplicationError> {
        match self.slots.lock() {
            Ok(mut slots) => slots.remove(key),
            Err(poisoned) => poisoned.into_inner().remove(key),
        };
        Ok(())
    }
}
