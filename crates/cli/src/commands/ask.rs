use chrono::Utc;
use serde::Serialize;

use pipeboard_agent::{templates, AgentReply, ResponseEngine};
use pipeboard_core::board::BoardView;
use pipeboard_core::config::LoadOptions;
use pipeboard_core::domain::customer::CustomerId;

use crate::commands::{open_store, CommandResult};

#[derive(Debug, Serialize)]
struct AskData {
    /// Selection acknowledgement shown before the reply.
    greeting: String,
    #[serde(flatten)]
    reply: AgentReply,
}

pub fn run(options: &LoadOptions, id: &str, prompt: &str) -> CommandResult {
    let store = match open_store("ask", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    let mut view = BoardView::default();
    view.select(CustomerId(id.trim().to_owned()));
    let Some(customer) = view.selected_customer(store.list()) else {
        return CommandResult::not_found("ask", id);
    };

    let reply = ResponseEngine::default().answer(prompt, Some(customer), Utc::now());
    let message = reply.text.clone();
    let data = AskData { greeting: templates::greeting(customer), reply };
    CommandResult::success_with_data("ask", message, &data)
}
