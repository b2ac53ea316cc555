pub mod commands;
pub mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::records::RecordFields;
use pipeboard_core::config::{ConfigOverrides, LoadOptions, StorageBackend};

#[derive(Debug, Parser)]
#[command(
    name = "pipeboard",
    about = "Pipeboard customer pipeline CLI",
    long_about = "Manage the customer pipeline board, edit records, and ask the keyword assistant about a customer.",
    after_help = "Examples:\n  pipeboard seed\n  pipeboard board --status RISK\n  pipeboard ask cust-seed-003 \"리스크 체크\""
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Config file (default: pipeboard.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "URL", help = "Override storage.database_url")]
    database_url: Option<String>,
    #[arg(long, global = true, help = "Use a process-local store that is discarded on exit")]
    memory: bool,
    #[arg(long, global = true, value_name = "LEVEL", help = "Override logging.level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Show the pipeline grouped by status, newest first")]
    Board {
        #[arg(long, help = "ALL, LEAD, ACTIVE, RISK or CLOSED")]
        status: Option<String>,
        #[arg(long, help = "Case-insensitive text search")]
        query: Option<String>,
    },
    #[command(about = "Show one customer record")]
    Show { id: String },
    #[command(about = "Create a customer record")]
    Add {
        #[command(flatten)]
        fields: RecordFields,
    },
    #[command(about = "Update fields of an existing customer record")]
    Update {
        id: String,
        #[command(flatten)]
        fields: RecordFields,
        #[arg(long, conflicts_with = "last_contact")]
        clear_last_contact: bool,
        #[arg(long, conflicts_with = "next_action")]
        clear_next_action: bool,
    },
    #[command(about = "Delete a customer record")]
    Delete {
        id: String,
        #[arg(long, help = "Confirm the deletion")]
        yes: bool,
    },
    #[command(about = "Ask the keyword assistant about a customer")]
    Ask {
        id: String,
        #[arg(required = true, num_args = 1.., help = "Prompt text, e.g. 요약 or 리스크 체크")]
        prompt: Vec<String>,
    },
    #[command(about = "Replace all records with the sample pipeline")]
    Seed,
    #[command(about = "Remove every stored record")]
    Reset {
        #[arg(long, help = "Confirm the reset")]
        yes: bool,
    },
    #[command(about = "Export all records as JSON")]
    Export {
        #[arg(long, value_name = "PATH", help = "Output file (default: customers-export.json)")]
        output: Option<PathBuf>,
        #[arg(long, conflicts_with = "output", help = "Embed the payload in the command output")]
        stdout: bool,
    },
    #[command(about = "Replace all records from an exported JSON file")]
    Import { path: PathBuf },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                storage_backend: self.memory.then_some(StorageBackend::Memory),
                database_url: self.database_url.clone(),
                log_level: self.log_level.clone(),
                ..ConfigOverrides::default()
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.load_options();

    let result = match cli.command {
        Command::Board { status, query } => {
            commands::board::run(&options, status.as_deref(), query.as_deref())
        }
        Command::Show { id } => commands::records::show(&options, &id),
        Command::Add { fields } => commands::records::add(&options, fields),
        Command::Update { id, fields, clear_last_contact, clear_next_action } => {
            commands::records::update(&options, &id, fields, clear_last_contact, clear_next_action)
        }
        Command::Delete { id, yes } => commands::records::delete(&options, &id, yes),
        Command::Ask { id, prompt } => commands::ask::run(&options, &id, &prompt.join(" ")),
        Command::Seed => commands::seed::run(&options),
        Command::Reset { yes } => commands::reset::run(&options, yes),
        Command::Export { output, stdout } => {
            commands::transfer::export(&options, output.as_deref(), stdout)
        }
        Command::Import { path } => commands::transfer::import(&options, &path),
        Command::Config => commands::config::run(&options),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
