//! Authoritative in-memory customer collection backed by a single key-value
//! slot.
//!
//! Every mutation serializes the next collection and writes it to the slot
//! before the in-memory state is replaced, so a failed write leaves both the
//! slot and memory at their previous values.

pub mod clock;
pub mod slot;

use std::collections::HashSet;

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::domain::customer::{Customer, CustomerId, CustomerPatch};
use crate::errors::{ApplicationError, ImportError};

pub use clock::{Clock, ManualClock, SystemClock};
pub use slot::{MemorySlotStore, SlotStore};

pub const DEFAULT_SLOT_KEY: &str = "proto_crm_customers_v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub customers: Vec<Customer>,
    pub exported_at: String,
}

pub struct RecordStore<S, C = SystemClock> {
    slot: S,
    clock: C,
    key: String,
    customers: Vec<Customer>,
}

impl<S, C> RecordStore<S, C>
where
    S: SlotStore,
    C: Clock,
{
    /// Loads the collection from `slot`. Absent or unreadable data yields an
    /// empty collection.
    pub fn open(slot: S, clock: C, key: impl Into<String>) -> Self {
        let key = key.into();
        let customers = load_collection(&slot, &key);
        info!(
            event_name = "store.loaded",
            slot_key = %key,
            customer_count = customers.len(),
            "customer collection loaded"
        );
        Self { slot, clock, key, customers }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn slot_key(&self) -> &str {
        &self.key
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    pub fn get(&self, id: &CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|customer| &customer.id == id)
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&Customer>
    where
        P: Fn(&Customer) -> bool,
    {
        self.customers.iter().filter(|customer| predicate(customer)).collect()
    }

    /// Creates the record when `patch.id` is unknown, otherwise merges the
    /// present patch fields over the stored record. Only `updatedAt` moves on
    /// update.
    pub fn upsert(&mut self, patch: CustomerPatch) -> Result<Customer, ApplicationError> {
        let now = self.clock.now_millis();
        let mut next = self.customers.clone();

        let (customer, created) = match next.iter().position(|existing| existing.id == patch.id) {
            Some(index) => {
                let existing = &mut next[index];
                patch.apply_to(existing);
                existing.updated_at = now;
                (existing.clone(), false)
            }
            None => {
                let customer = patch.into_customer(now);
                next.insert(0, customer.clone());
                (customer, true)
            }
        };

        self.commit(next)?;
        info!(
            event_name = if created { "store.customer_created" } else { "store.customer_updated" },
            customer_id = %customer.id,
            status = %customer.status,
            "customer upserted"
        );
        Ok(customer)
    }

    /// Returns whether a record was removed. Deleting an unknown id does not
    /// touch the slot.
    pub fn delete(&mut self, id: &CustomerId) -> Result<bool, ApplicationError> {
        if self.get(id).is_none() {
            debug!(event_name = "store.delete_missing", customer_id = %id, "nothing to delete");
            return Ok(false);
        }

        let next = self.customers.iter().filter(|customer| &customer.id != id).cloned().collect();
        self.commit(next)?;
        info!(event_name = "store.customer_deleted", customer_id = %id, "customer deleted");
        Ok(true)
    }

    /// Replaces the whole collection. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, customers: Vec<Customer>) -> Result<(), ApplicationError> {
        let next = dedupe_by_id(customers);
        let count = next.len();
        self.commit(next)?;
        info!(event_name = "store.replaced", customer_count = count, "customer collection replaced");
        Ok(())
    }

    /// Removes the slot key and empties the collection.
    pub fn reset(&mut self) -> Result<(), ApplicationError> {
        self.slot.remove(&self.key)?;
        self.customers.clear();
        info!(event_name = "store.reset", slot_key = %self.key, "customer collection reset");
        Ok(())
    }

    pub fn import_json(&mut self, payload: &str) -> Result<usize, ImportError> {
        let customers = match parse_import_payload(payload) {
            Ok(customers) => customers,
            Err(error) => {
                warn!(event_name = "store.import_rejected", error = %error, "import rejected");
                return Err(error);
            }
        };
        self.replace_all(customers)?;
        Ok(self.customers.len())
    }

    pub fn export(&self) -> ExportPayload {
        ExportPayload {
            customers: self.customers.clone(),
            exported_at: self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    fn commit(&mut self, next: Vec<Customer>) -> Result<(), ApplicationError> {
        let raw = serde_json::to_string(&next)
            .map_err(|error| ApplicationError::Serialization(error.to_string()))?;
        self.slot.set(&self.key, &raw)?;
        self.customers = next;
        Ok(())
    }
}

/// Accepts only `{ "customers": [...] }`; every entry must be a valid
/// customer record.
pub fn parse_import_payload(payload: &str) -> Result<Vec<Customer>, ImportError> {
    let value: Value =
        serde_json::from_str(payload).map_err(|error| ImportError::Parse(error.to_string()))?;
    let Some(entries) = value.get("customers").and_then(Value::as_array) else {
        return Err(ImportError::InvalidFormat);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Customer::deserialize(entry)
                .map_err(|error| ImportError::InvalidRecord { index, message: error.to_string() })
        })
        .collect()
}

fn load_collection<S: SlotStore>(slot: &S, key: &str) -> Vec<Customer> {
    let raw = match slot.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(error) => {
            warn!(event_name = "store.load_failed", error = %error, "slot read failed; starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Customer>>(&raw) {
        Ok(customers) => dedupe_by_id(customers),
        Err(error) => {
            warn!(
                event_name = "store.load_invalid",
                error = %error,
                "stored collection is not a valid customer array; starting empty"
            );
            Vec::new()
        }
    }
}

fn dedupe_by_id(customers: Vec<Customer>) -> Vec<Customer> {
    let mut seen = HashSet::new();
    let before = customers.len();
    let unique: Vec<Customer> =
        customers.into_iter().filter(|customer| seen.insert(customer.id.clone())).collect();
    if unique.len() != before {
        warn!(
            event_name = "store.duplicate_ids_dropped",
            dropped = before - unique.len(),
            "duplicate customer ids dropped"
        );
    }
    unique
}
