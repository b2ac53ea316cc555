pub mod board;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fixtures;
pub mod store;

pub use board::{
    build_board, group_by_status, Board, BoardColumn, BoardView, CustomerCard, CustomerQuery,
    StatusBuckets, StatusFilter,
};
pub use domain::customer::{Customer, CustomerId, CustomerPatch, CustomerStatus};
pub use errors::{ApplicationError, DomainError, ImportError};
pub use fixtures::SampleDataset;
pub use store::{
    Clock, ExportPayload, ManualClock, MemorySlotStore, RecordStore, SlotStore, SystemClock,
    DEFAULT_SLOT_KEY,
};
