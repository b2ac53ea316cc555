use std::env;
use std::fs;
use std::path::Path;

use serde::Serialize;
use toml::Value;

use pipeboard_core::config::{resolve_config_path, LoadOptions};

use crate::commands::{load_config, CommandResult};

#[derive(Debug, Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match load_config("config", options) {
        Ok(config) => config,
        Err(failure) => return failure,
    };

    let config_file_path = resolve_config_path(options.config_path.as_deref());
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let overrides = &options.overrides;
    let source = |key_path: &str, override_label: Option<&str>, env_keys: &[&str]| {
        field_source(
            key_path,
            override_label,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        )
    };

    let entries = vec![
        ConfigEntry {
            key: "storage.backend",
            value: format!("{:?}", config.storage.backend),
            source: source(
                "storage.backend",
                overrides.storage_backend.map(|_| "--memory"),
                &["PIPEBOARD_STORAGE_BACKEND"],
            ),
        },
        ConfigEntry {
            key: "storage.database_url",
            value: config.storage.database_url.clone(),
            source: source(
                "storage.database_url",
                overrides.database_url.as_ref().map(|_| "--database-url"),
                &["PIPEBOARD_DATABASE_URL"],
            ),
        },
        ConfigEntry {
            key: "storage.max_connections",
            value: config.storage.max_connections.to_string(),
            source: source(
                "storage.max_connections",
                None,
                &["PIPEBOARD_DATABASE_MAX_CONNECTIONS"],
            ),
        },
        ConfigEntry {
            key: "storage.timeout_secs",
            value: config.storage.timeout_secs.to_string(),
            source: source("storage.timeout_secs", None, &["PIPEBOARD_DATABASE_TIMEOUT_SECS"]),
        },
        ConfigEntry {
            key: "storage.slot_key",
            value: config.storage.slot_key.clone(),
            source: source(
                "storage.slot_key",
                overrides.slot_key.as_ref().map(|_| "slot_key"),
                &["PIPEBOARD_SLOT_KEY"],
            ),
        },
        ConfigEntry {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source(
                "logging.level",
                overrides.log_level.as_ref().map(|_| "--log-level"),
                &["PIPEBOARD_LOGGING_LEVEL", "PIPEBOARD_LOG_LEVEL"],
            ),
        },
        ConfigEntry {
            key: "logging.format",
            value: format!("{:?}", config.logging.format),
            source: source(
                "logging.format",
                overrides.log_format.map(|_| "log_format"),
                &["PIPEBOARD_LOGGING_FORMAT", "PIPEBOARD_LOG_FORMAT"],
            ),
        },
    ];

    let mut lines =
        vec!["effective config (source precedence: override > env > file > default):".to_string()];
    lines.extend(entries.iter().map(render_line));

    CommandResult::success_with_data("config", lines.join("\n"), &entries)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    override_label: Option<&str>,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(label) = override_label {
        return format!("override ({label})");
    }

    // Blank env values are ignored by the loader, so they are not a source.
    if let Some(env_key) = env_keys.iter().find(|key| env_is_set(key)) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn env_is_set(key: &str) -> bool {
    env::var(key).is_ok_and(|value| !value.trim().is_empty())
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(entry: &ConfigEntry) -> String {
    format!("- {} = {} (source: {})", entry.key, entry.value, entry.source)
}
