//! Rule-based customer assistant.
//!
//! Prompts are classified by keyword containment into a fixed set of intents
//! and answered from canned templates filled with fields of the selected
//! customer. Nothing here writes to the record.
//!
//! - [`intent`] ordered keyword rules and [`classify`](intent::classify)
//! - [`signals`] staleness and risk-tag evaluation
//! - [`templates`] response text
//! - [`engine`] [`ResponseEngine`](engine::ResponseEngine), the entry point

pub mod engine;
pub mod intent;
pub mod signals;
pub mod templates;

pub use engine::{AgentReply, ResponseEngine};
pub use intent::{classify, Intent};
pub use signals::{is_stale, RiskSignals, STALE_AFTER_DAYS};
