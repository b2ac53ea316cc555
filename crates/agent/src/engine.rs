use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use tracing::debug;

use pipeboard_core::domain::customer::Customer;

use crate::intent::{classify, Intent};
use crate::signals::RiskSignals;
use crate::templates;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentReply {
    /// `None` when no record was selected.
    pub intent: Option<Intent>,
    pub text: String,
}

/// Stateless prompt responder. The time zone decides where "midnight" falls
/// when a contact date is compared with the current instant.
#[derive(Clone, Debug)]
pub struct ResponseEngine<Tz: TimeZone = Local> {
    tz: Tz,
}

impl Default for ResponseEngine<Local> {
    fn default() -> Self {
        Self { tz: Local }
    }
}

impl<Tz: TimeZone> ResponseEngine<Tz> {
    pub fn with_time_zone(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn respond(&self, prompt: &str, selected: Option<&Customer>, now: DateTime<Utc>) -> String {
        self.answer(prompt, selected, now).text
    }

    pub fn answer(&self, prompt: &str, selected: Option<&Customer>, now: DateTime<Utc>) -> AgentReply {
        let Some(customer) = selected else {
            return AgentReply { intent: None, text: templates::NO_SELECTION.to_owned() };
        };

        let intent = classify(prompt);
        let signals = RiskSignals::evaluate(customer, now, &self.tz);
        debug!(
            event_name = "agent.intent_classified",
            customer_id = %customer.id,
            intent = intent.as_str(),
            stale = signals.stale,
            risk_signal = signals.has_risk_signal(),
            "prompt classified"
        );

        let text = match intent {
            Intent::Summary => templates::summary(customer, &signals),
            Intent::NextActions => templates::next_actions(&signals),
            Intent::RiskCheck => templates::risk_check(&signals),
            Intent::CallScript => templates::call_script(customer),
            Intent::Help => templates::HELP.to_owned(),
        };

        AgentReply { intent: Some(intent), text }
    }
}
