use pipeboard_core::config::LoadOptions;

use crate::commands::{open_store, CommandResult};

pub fn run(options: &LoadOptions, confirmed: bool) -> CommandResult {
    if !confirmed {
        return CommandResult::failure(
            "reset",
            "confirmation_required",
            "reset removes every stored customer; pass --yes to confirm",
            5,
        );
    }

    let mut store = match open_store("reset", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    let removed = store.len();
    match store.reset() {
        Ok(()) => CommandResult::success("reset", format!("removed {removed} customers")),
        Err(error) => CommandResult::from_application_error("reset", &error),
    }
}
