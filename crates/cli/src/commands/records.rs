use clap::Args;

use pipeboard_core::config::LoadOptions;
use pipeboard_core::domain::customer::{
    parse_optional_date, parse_tags, CustomerId, CustomerPatch,
};
use pipeboard_core::errors::{ApplicationError, DomainError};

use crate::commands::{open_store, CommandResult};

/// Editable fields shared by `add` and `update`. Absent flags leave the
/// stored value untouched.
#[derive(Debug, Clone, Default, Args)]
pub struct RecordFields {
    #[arg(long, help = "Customer name (required for add)")]
    pub name: Option<String>,
    #[arg(long)]
    pub company: Option<String>,
    #[arg(long)]
    pub owner: Option<String>,
    #[arg(long, help = "LEAD, ACTIVE, RISK or CLOSED")]
    pub status: Option<String>,
    #[arg(long, help = "Comma-separated tags")]
    pub tags: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Last contact date; empty clears it")]
    pub last_contact: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD", help = "Next action date; empty clears it")]
    pub next_action: Option<String>,
}

impl RecordFields {
    fn into_patch(self, id: CustomerId) -> Result<CustomerPatch, DomainError> {
        let mut patch = CustomerPatch::new(id);

        if let Some(name) = self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::InvariantViolation("name is required".to_owned()));
            }
            patch = patch.with_name(name);
        }
        if let Some(company) = self.company {
            patch = patch.with_company(company.trim());
        }
        if let Some(owner) = self.owner {
            patch = patch.with_owner(owner.trim());
        }
        if let Some(status) = self.status {
            patch = patch.with_status(status.parse()?);
        }
        if let Some(tags) = self.tags {
            patch = patch.with_tags(parse_tags(&tags));
        }
        if let Some(notes) = self.notes {
            patch = patch.with_notes(notes.trim());
        }
        if let Some(raw) = self.last_contact {
            patch = patch.with_last_contact(parse_optional_date(Some(&raw))?);
        }
        if let Some(raw) = self.next_action {
            patch = patch.with_next_action(parse_optional_date(Some(&raw))?);
        }

        Ok(patch)
    }
}

pub fn show(options: &LoadOptions, id: &str) -> CommandResult {
    let store = match open_store("show", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match store.get(&CustomerId(id.trim().to_owned())) {
        Some(customer) => CommandResult::success_with_data("show", customer.name.clone(), customer),
        None => CommandResult::not_found("show", id),
    }
}

pub fn add(options: &LoadOptions, fields: RecordFields) -> CommandResult {
    if fields.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
        return invalid_input("add", DomainError::InvariantViolation("name is required".to_owned()));
    }
    let patch = match fields.into_patch(CustomerId::generate()) {
        Ok(patch) => patch,
        Err(error) => return invalid_input("add", error),
    };

    let mut store = match open_store("add", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match store.upsert(patch) {
        Ok(customer) => CommandResult::success_with_data(
            "add",
            format!("created customer {}", customer.id),
            &customer,
        ),
        Err(error) => CommandResult::from_application_error("add", &error),
    }
}

pub fn update(
    options: &LoadOptions,
    id: &str,
    fields: RecordFields,
    clear_last_contact: bool,
    clear_next_action: bool,
) -> CommandResult {
    let id = match CustomerId::parse(id) {
        Ok(id) => id,
        Err(error) => return invalid_input("update", error),
    };
    let mut patch = match fields.into_patch(id.clone()) {
        Ok(patch) => patch,
        Err(error) => return invalid_input("update", error),
    };
    if clear_last_contact {
        patch = patch.with_last_contact(None);
    }
    if clear_next_action {
        patch = patch.with_next_action(None);
    }

    let mut store = match open_store("update", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };
    if store.get(&id).is_none() {
        return CommandResult::not_found("update", id.as_str());
    }

    match store.upsert(patch) {
        Ok(customer) => CommandResult::success_with_data(
            "update",
            format!("updated customer {}", customer.id),
            &customer,
        ),
        Err(error) => CommandResult::from_application_error("update", &error),
    }
}

pub fn delete(options: &LoadOptions, id: &str, confirmed: bool) -> CommandResult {
    if !confirmed {
        return CommandResult::failure(
            "delete",
            "confirmation_required",
            format!("deleting `{id}` cannot be undone; pass --yes to confirm"),
            5,
        );
    }

    let mut store = match open_store("delete", options) {
        Ok(store) => store,
        Err(failure) => return failure,
    };

    match store.delete(&CustomerId(id.trim().to_owned())) {
        Ok(true) => CommandResult::success("delete", format!("deleted customer {}", id.trim())),
        Ok(false) => CommandResult::not_found("delete", id),
        Err(error) => CommandResult::from_application_error("delete", &error),
    }
}

fn invalid_input(command: &str, error: DomainError) -> CommandResult {
    CommandResult::from_application_error(command, &ApplicationError::from(error))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use pipeboard_core::domain::customer::{CustomerId, CustomerStatus};
    use pipeboard_core::errors::DomainError;

    use super::RecordFields;

    fn id() -> CustomerId {
        CustomerId("c-1".to_owned())
    }

    #[test]
    fn absent_flags_produce_empty_patch() {
        let patch = RecordFields::default().into_patch(id()).expect("patch");

        assert!(patch.name.is_none());
        assert!(patch.tags.is_none());
        assert!(patch.last_contact.is_none());
    }

    #[test]
    fn fields_are_trimmed_and_parsed() {
        let fields = RecordFields {
            name: Some("  김민지 ".to_owned()),
            status: Some("risk".to_owned()),
            tags: Some(" 제조업, ,대출상담 ".to_owned()),
            last_contact: Some("2025-12-10".to_owned()),
            next_action: Some("".to_owned()),
            ..RecordFields::default()
        };

        let patch = fields.into_patch(id()).expect("patch");

        assert_eq!(patch.name.as_deref(), Some("김민지"));
        assert_eq!(patch.status, Some(CustomerStatus::Risk));
        assert_eq!(patch.tags, Some(vec!["제조업".to_owned(), "대출상담".to_owned()]));
        assert_eq!(patch.last_contact, Some(NaiveDate::from_ymd_opt(2025, 12, 10)));
        assert_eq!(patch.next_action, Some(None));
    }

    #[test]
    fn blank_name_is_rejected() {
        let fields = RecordFields { name: Some("   ".to_owned()), ..RecordFields::default() };
        assert!(matches!(fields.into_patch(id()), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn bad_status_and_date_are_rejected() {
        let bad_status = RecordFields { status: Some("WON".to_owned()), ..RecordFields::default() };
        assert!(matches!(bad_status.into_patch(id()), Err(DomainError::UnknownStatus(_))));

        let bad_date =
            RecordFields { last_contact: Some("2025-13-40".to_owned()), ..RecordFields::default() };
        assert!(matches!(bad_date.into_patch(id()), Err(DomainError::InvalidDate(_))));
    }
}
