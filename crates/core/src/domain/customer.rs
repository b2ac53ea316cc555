use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::DomainError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl CustomerId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvariantViolation("customer id must not be empty".to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pipeline stage of a customer. The board renders one column per variant in
/// declaration order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CustomerStatus {
    #[default]
    Lead,
    Active,
    Risk,
    Closed,
}

impl CustomerStatus {
    pub const ALL: [CustomerStatus; 4] = [Self::Lead, Self::Active, Self::Risk, Self::Closed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lead => "LEAD",
            Self::Active => "ACTIVE",
            Self::Risk => "RISK",
            Self::Closed => "CLOSED",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Lead => 0,
            Self::Active => 1,
            Self::Risk => 2,
            Self::Closed => 3,
        }
    }
}

impl fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerStatus {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "LEAD" => Ok(Self::Lead),
            "ACTIVE" => Ok(Self::Active),
            "RISK" => Ok(Self::Risk),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::UnknownStatus(value.trim().to_owned())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub last_contact: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub next_action: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

impl Customer {
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            name: String::new(),
            company: String::new(),
            owner: String::new(),
            status: CustomerStatus::default(),
            tags: Vec::new(),
            notes: String::new(),
            last_contact: None,
            next_action: None,
            created_at: 0,
            updated_at: 0,
        }
    }
}

/// Field-level update for [`Customer`]. `None` leaves the stored value alone;
/// for the date fields `Some(None)` clears the stored date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerPatch {
    pub id: CustomerId,
    pub name: Option<String>,
    pub company: Option<String>,
    pub owner: Option<String>,
    pub status: Option<CustomerStatus>,
    pub tags: Option<Vec<String>>,
    pub notes: Option<String>,
    pub last_contact: Option<Option<NaiveDate>>,
    pub next_action: Option<Option<NaiveDate>>,
}

impl CustomerPatch {
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            name: None,
            company: None,
            owner: None,
            status: None,
            tags: None,
            notes: None,
            last_contact: None,
            next_action: None,
        }
    }

    /// Patch that carries every caller-owned field of `customer`.
    pub fn full(customer: &Customer) -> Self {
        Self {
            id: customer.id.clone(),
            name: Some(customer.name.clone()),
            company: Some(customer.company.clone()),
            owner: Some(customer.owner.clone()),
            status: Some(customer.status),
            tags: Some(customer.tags.clone()),
            notes: Some(customer.notes.clone()),
            last_contact: Some(customer.last_contact),
            next_action: Some(customer.next_action),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_status(mut self, status: CustomerStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_last_contact(mut self, date: Option<NaiveDate>) -> Self {
        self.last_contact = Some(date);
        self
    }

    pub fn with_next_action(mut self, date: Option<NaiveDate>) -> Self {
        self.next_action = Some(date);
        self
    }

    pub(crate) fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(company) = self.company {
            customer.company = company;
        }
        if let Some(owner) = self.owner {
            customer.owner = owner;
        }
        if let Some(status) = self.status {
            customer.status = status;
        }
        if let Some(tags) = self.tags {
            customer.tags = tags;
        }
        if let Some(notes) = self.notes {
            customer.notes = notes;
        }
        if let Some(last_contact) = self.last_contact {
            customer.last_contact = last_contact;
        }
        if let Some(next_action) = self.next_action {
            customer.next_action = next_action;
        }
    }

    pub(crate) fn into_customer(self, now_ms: i64) -> Customer {
        let mut customer = Customer::new(self.id.clone());
        self.apply_to(&mut customer);
        customer.created_at = now_ms;
        customer.updated_at = now_ms;
        customer
    }
}

/// Splits comma-separated tag input, trimming entries and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input.split(',').map(str::trim).filter(|tag| !tag.is_empty()).map(str::to_owned).collect()
}

/// Empty input means "no date".
pub fn parse_optional_date(raw: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| DomainError::InvalidDate(value.to_owned())),
    }
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    parse_optional_date(raw.as_deref()).map_err(serde::de::Error::custom)
}
