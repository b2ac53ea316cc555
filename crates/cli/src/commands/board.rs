use pipeboard_core::board::{build_board, CustomerQuery, StatusFilter};
use pipeboard_core::config::LoadOptions;
use pipeboard_core::errors::ApplicationError;

use crate::commands::{open_store, CommandResult};

pub fn run(options: &LoadOptions, status: Option<&str>, query: Option<&str>) -> CommandResult {
    let status = match status.map(str::parse::<StatusFilter>).transpose() {
        Ok(status) => status.unwrap_or_default(),
        Err(error) => {
            return CommandResult::from_application_error("board", &ApplicationError::from(error))
        }
    };
    let query = CustomerQuery::new(status, query.unwrap_or_default());

    let store = match open_store("board", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    let board = build_board(store.list(), &query);
    let summary = board
        .columns
        .iter()
        .map(|column| format!("{} {}", column.status, column.count))
        .collect::<Vec<_>>()
        .join(" / ");

    CommandResult::success_with_data("board", summary, &board)
}
