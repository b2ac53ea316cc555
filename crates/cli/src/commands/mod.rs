pub mod ask;
pub mod board;
pub mod config;
pub mod records;
pub mod reset;
pub mod seed;
pub mod transfer;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use pipeboard_core::config::{AppConfig, LoadOptions, StorageBackend};
use pipeboard_core::errors::{ApplicationError, ImportError};
use pipeboard_core::store::{MemorySlotStore, RecordStore, SlotStore, SystemClock};
use pipeboard_db::{open_sqlite_slot, OpenError};

pub type Store = RecordStore<Box<dyn SlotStore>, SystemClock>;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        Self::ok(command, message.into(), None)
    }

    /// Attaches `data` to the outcome; a value that cannot be serialized
    /// turns the result into a failure.
    pub fn success_with_data<T: Serialize>(
        command: &str,
        message: impl Into<String>,
        data: &T,
    ) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self::ok(command, message.into(), Some(value)),
            Err(error) => Self::failure(
                command,
                "serialization",
                format!("failed to serialize command data: {error}"),
                4,
            ),
        }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn not_found(command: &str, id: &str) -> Self {
        Self::failure(command, "not_found", format!("no customer with id `{id}`"), 5)
    }

    pub fn from_application_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Domain(_) => 5,
            ApplicationError::Configuration(_) => 2,
            ApplicationError::Persistence(_) | ApplicationError::Serialization(_) => 4,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }

    pub fn from_import_error(command: &str, error: &ImportError) -> Self {
        match error {
            ImportError::Application(inner) => Self::from_application_error(command, inner),
            _ => Self::failure(command, "invalid_input", error.to_string(), 5),
        }
    }

    fn ok(command: &str, message: String, data: Option<Value>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message,
            data,
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

pub(crate) fn load_config(command: &str, options: &LoadOptions) -> Result<AppConfig, CommandResult> {
    AppConfig::load(options.clone()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })
}

/// Loads config, installs logging, and opens the record store on the
/// configured backend.
pub(crate) fn open_store(command: &str, options: &LoadOptions) -> Result<Store, CommandResult> {
    let config = load_config(command, options)?;
    crate::logging::init(&config.logging);

    let slot: Box<dyn SlotStore> = match config.storage.backend {
        StorageBackend::Sqlite => Box::new(
            open_sqlite_slot(&config.storage).map_err(|error| open_failure(command, &error))?,
        ),
        StorageBackend::Memory => Box::new(MemorySlotStore::default()),
    };

    debug!(
        event_name = "cli.store_opened",
        command,
        backend = ?config.storage.backend,
        slot_key = %config.storage.slot_key,
        "record store opened"
    );
    Ok(RecordStore::open(slot, SystemClock, config.storage.slot_key))
}

fn open_failure(command: &str, error: &OpenError) -> CommandResult {
    match error {
        OpenError::Runtime(_) => CommandResult::failure(
            command,
            "runtime_init",
            format!("failed to initialize async runtime: {error}"),
            3,
        ),
        OpenError::Connect(_) => {
            CommandResult::failure(command, "db_connectivity", error.to_string(), 4)
        }
        OpenError::Migration(_) => CommandResult::failure(command, "migration", error.to_string(), 4),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use pipeboard_core::errors::{ApplicationError, DomainError, ImportError};

    use super::CommandResult;

    fn parse(output: &str) -> Value {
        serde_json::from_str(output).expect("command output should be JSON")
    }

    #[test]
    fn success_omits_data_when_absent() {
        let result = CommandResult::success("seed", "done");
        let payload = parse(&result.output);

        assert_eq!(result.exit_code, 0);
        assert_eq!(payload["status"], "ok");
        assert!(payload["error_class"].is_null());
        assert!(payload.get("data").is_none());
    }

    #[test]
    fn success_with_data_embeds_value() {
        let result = CommandResult::success_with_data("show", "found", &vec!["a", "b"]);
        let payload = parse(&result.output);

        assert_eq!(payload["data"][1], "b");
    }

    #[test]
    fn application_errors_map_to_exit_codes() {
        let domain = ApplicationError::from(DomainError::InvalidDate("2025-13-01".to_owned()));
        let storage = ApplicationError::Persistence("locked".to_owned());

        let domain_result = CommandResult::from_application_error("add", &domain);
        let storage_result = CommandResult::from_application_error("add", &storage);

        assert_eq!(domain_result.exit_code, 5);
        assert_eq!(parse(&domain_result.output)["error_class"], "invalid_input");
        assert_eq!(storage_result.exit_code, 4);
        assert_eq!(parse(&storage_result.output)["error_class"], "storage");
    }

    #[test]
    fn malformed_import_is_an_input_error() {
        let result = CommandResult::from_import_error("import", &ImportError::InvalidFormat);

        assert_eq!(result.exit_code, 5);
        assert_eq!(parse(&result.output)["error_class"], "invalid_input");
    }
}
