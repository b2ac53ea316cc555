use std::str::FromStr;

use serde::Serialize;

use crate::domain::customer::{Customer, CustomerId, CustomerStatus};
use crate::errors::DomainError;

/// Cards show at most this many tags.
pub const CARD_TAG_LIMIT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CustomerStatus),
}

impl StatusFilter {
    pub fn accepts(self, status: CustomerStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        value.parse().map(Self::Only)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomerQuery {
    pub status: StatusFilter,
    pub text: String,
}

impl CustomerQuery {
    pub fn new(status: StatusFilter, text: impl Into<String>) -> Self {
        Self { status, text: text.into() }
    }

    /// Status is checked first; a failing status never reaches the text match.
    pub fn matches(&self, customer: &Customer) -> bool {
        if !self.status.accepts(customer.status) {
            return false;
        }

        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        search_haystack(customer).contains(&needle)
    }
}

fn search_haystack(customer: &Customer) -> String {
    let tags = customer.tags.join(",");
    [
        customer.name.as_str(),
        customer.company.as_str(),
        customer.owner.as_str(),
        tags.as_str(),
        customer.notes.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// Records partitioned by status, in input order within each bucket.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusBuckets<'a> {
    buckets: [Vec<&'a Customer>; 4],
}

impl<'a> StatusBuckets<'a> {
    pub fn bucket(&self, status: CustomerStatus) -> &[&'a Customer] {
        &self.buckets[status.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (CustomerStatus, &[&'a Customer])> + '_ {
        CustomerStatus::ALL.into_iter().map(move |status| (status, self.bucket(status)))
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    fn into_buckets(self) -> [Vec<&'a Customer>; 4] {
        self.buckets
    }
}

pub fn group_by_status<'a, I>(records: I) -> StatusBuckets<'a>
where
    I: IntoIterator<Item = &'a Customer>,
{
    let mut grouped = StatusBuckets::default();
    for customer in records {
        grouped.buckets[customer.status.index()].push(customer);
    }
    grouped
}

/// Explicit UI state: which record is selected and which filters are active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardView {
    pub selected: Option<CustomerId>,
    pub query: CustomerQuery,
}

impl BoardView {
    pub fn select(&mut self, id: CustomerId) {
        self.selected = Some(id);
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_customer<'a>(&self, records: &'a [Customer]) -> Option<&'a Customer> {
        let selected = self.selected.as_ref()?;
        records.iter().find(|customer| &customer.id == selected)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerCard {
    pub id: CustomerId,
    pub name: String,
    pub meta: String,
    pub contact: String,
    pub tags: Vec<String>,
    pub updated_at: i64,
}

impl CustomerCard {
    pub fn from_customer(customer: &Customer) -> Self {
        let name = if customer.name.is_empty() { "(이름없음)" } else { customer.name.as_str() };
        let company = or_dash(&customer.company);
        let owner = or_dash(&customer.owner);

        let mut contact = match customer.last_contact {
            Some(date) => format!("최근 {date}"),
            None => "최근 접촉 없음".to_owned(),
        };
        if let Some(next) = customer.next_action {
            contact.push_str(&format!(" / 다음 {next}"));
        }

        Self {
            id: customer.id.clone(),
            name: name.to_owned(),
            meta: format!("{company} · {owner}"),
            contact,
            tags: customer.tags.iter().take(CARD_TAG_LIMIT).cloned().collect(),
            updated_at: customer.updated_at,
        }
    }
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    pub status: CustomerStatus,
    pub count: usize,
    pub cards: Vec<CustomerCard>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
}

/// Filters, groups, and orders each column by `updatedAt`, newest first.
pub fn build_board(records: &[Customer], query: &CustomerQuery) -> Board {
    let grouped = group_by_status(records.iter().filter(|customer| query.matches(customer)));

    let columns = CustomerStatus::ALL
        .into_iter()
        .zip(grouped.into_buckets())
        .map(|(status, mut bucket)| {
            bucket.sort_by(|left, right| right.updated_at.cmp(&left.updated_at));
            BoardColumn {
                status,
                count: bucket.len(),
                cards: bucket.into_iter().map(CustomerCard::from_customer).collect(),
            }
        })
        .collect();

    Board { columns }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::domain::customer::{Customer, CustomerId, CustomerStatus};

    use super::{
        build_board, group_by_status, BoardView, CustomerCard, CustomerQuery, StatusFilter,
    };

    fn customer(id: &str, status: CustomerStatus, updated_at: i64) -> Customer {
        let mut customer = Customer::new(CustomerId(id.to_owned()));
        customer.name = format!("name-{id}");
        customer.status = status;
        customer.updated_at = updated_at;
        customer
    }

    #[test]
    fn status_filter_parses_all_and_statuses() {
        assert_eq!("ALL".parse::<StatusFilter>().expect("all"), StatusFilter::All);
        assert_eq!(
            "risk".parse::<StatusFilter>().expect("risk"),
            StatusFilter::Only(CustomerStatus::Risk)
        );
        assert!("NOPE".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn text_query_matches_concatenated_fields_case_insensitively() {
        let mut record = customer("a", CustomerStatus::Lead, 0);
        record.company = "Minji Trading".to_owned();
        record.tags = vec!["제조업".to_owned(), "대출상담".to_owned()];
        record.notes = "운영자금 문의".to_owned();

        let query = |text: &str| CustomerQuery::new(StatusFilter::All, text);
        assert!(query("  MINJI ").matches(&record));
        assert!(query("제조업,대출").matches(&record));
        assert!(query("운영자금").matches(&record));
        assert!(query("").matches(&record));
        assert!(!query("ERP").matches(&record));
    }

    #[test]
    fn failing_status_filter_is_never_rescued_by_text_query() {
        let mut record = customer("a", CustomerStatus::Active, 0);
        record.notes = "everything".to_owned();

        for status in CustomerStatus::ALL {
            for text in ["", "every", "name-a", "zzz"] {
                let query = CustomerQuery::new(StatusFilter::Only(status), text);
                if status != CustomerStatus::Active {
                    assert!(!query.matches(&record), "{status} / {text:?} must not match");
                }
            }
        }
    }

    #[test]
    fn grouping_partitions_and_preserves_input_order() {
        let records = vec![
            customer("1", CustomerStatus::Risk, 0),
            customer("2", CustomerStatus::Lead, 0),
            customer("3", CustomerStatus::Risk, 0),
            customer("4", CustomerStatus::Closed, 0),
        ];

        let grouped = group_by_status(&records);

        assert_eq!(grouped.total(), records.len());
        let risk_ids: Vec<&str> =
            grouped.bucket(CustomerStatus::Risk).iter().map(|c| c.id.as_str()).collect();
        assert_eq!(risk_ids, vec!["1", "3"]);
        assert!(grouped.bucket(CustomerStatus::Active).is_empty());
        assert_eq!(grouped.iter().count(), 4);
    }

    #[test]
    fn grouping_empty_input_yields_empty_buckets() {
        let grouped = group_by_status(std::iter::empty::<&Customer>());
        assert_eq!(grouped.total(), 0);
    }

    #[test]
    fn board_sorts_each_column_by_updated_at_descending() {
        let records = vec![
            customer("old", CustomerStatus::Lead, 10),
            customer("new", CustomerStatus::Lead, 30),
            customer("mid", CustomerStatus::Lead, 20),
            customer("other", CustomerStatus::Closed, 5),
        ];

        let board = build_board(&records, &CustomerQuery::default());

        let lead = &board.columns[0];
        assert_eq!(lead.status, CustomerStatus::Lead);
        let order: Vec<&str> = lead.cards.iter().map(|card| card.id.as_str()).collect();
        assert_eq!(order, vec!["new", "mid", "old"]);
        assert_eq!(board.columns[3].count, 1);
    }

    #[test]
    fn board_respects_active_filter() {
        let records =
            vec![customer("a", CustomerStatus::Lead, 0), customer("b", CustomerStatus::Risk, 0)];
        let query = CustomerQuery::new(StatusFilter::Only(CustomerStatus::Risk), "");

        let board = build_board(&records, &query);

        let total: usize = board.columns.iter().map(|column| column.count).sum();
        assert_eq!(total, 1);
        assert_eq!(board.columns[2].cards[0].id.as_str(), "b");
    }

    #[test]
    fn card_projection_uses_placeholders_and_truncates_tags() {
        let mut record = Customer::new(CustomerId("a".to_owned()));
        record.tags = ["a", "b", "c", "d", "e"].iter().map(|tag| tag.to_string()).collect();
        let card = CustomerCard::from_customer(&record);

        assert_eq!(card.name, "(이름없음)");
        assert_eq!(card.meta, "- · -");
        assert_eq!(card.contact, "최근 접촉 없음");
        assert_eq!(card.tags.len(), 4);

        record.last_contact = NaiveDate::from_ymd_opt(2025, 12, 10);
        record.next_action = NaiveDate::from_ymd_opt(2025, 12, 27);
        let card = CustomerCard::from_customer(&record);
        assert_eq!(card.contact, "최근 2025-12-10 / 다음 2025-12-27");
    }

    #[test]
    fn view_state_resolves_selection() {
        let records = vec![customer("a", CustomerStatus::Lead, 0)];
        let mut view = BoardView::default();
        assert!(view.selected_customer(&records).is_none());

        view.select(CustomerId("a".to_owned()));
        assert_eq!(view.selected_customer(&records).map(|c| c.name.as_str()), Some("name-a"));

        view.clear_selection();
        assert!(view.selected_customer(&records).is_none());
    }
}
