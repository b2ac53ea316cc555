pub mod blocking;
pub mod connection;
pub mod migrations;
pub mod repositories;

pub use blocking::{open_sqlite_slot, BlockingSlotStore, OpenError};
pub use connection::{connect_with_settings, DbPool};
pub use repositories::{
    InMemorySlotRepository, RepositoryError, SlotRepository, SqlSlotRepository,
};
