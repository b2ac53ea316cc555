use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use pipeboard_core::domain::customer::{Customer, CustomerStatus};

/// Days without contact after which a record counts as stale.
pub const STALE_AFTER_DAYS: i64 = 21;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Matched as case-insensitive substrings of each tag.
pub const RISK_TAG_KEYWORDS: &[&str] = &[
    "위험",
    "연체",
    "부실",
    "민원",
    "소송",
    "overdue",
    "delinquent",
    "distressed",
    "complaint",
    "litigation",
];

/// Derived, read-only view of a record used by the response templates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RiskSignals {
    pub tags: Vec<String>,
    pub risk_tag: bool,
    pub stale: bool,
    pub risk_status: bool,
}

impl RiskSignals {
    pub fn evaluate<Tz: TimeZone>(customer: &Customer, now: DateTime<Utc>, tz: &Tz) -> Self {
        let tags = customer
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>();
        let risk_tag = tags.iter().any(|tag| is_risk_tag(tag));

        Self {
            tags,
            risk_tag,
            stale: is_stale(customer.last_contact, now, tz),
            risk_status: customer.status == CustomerStatus::Risk,
        }
    }

    pub fn has_risk_signal(&self) -> bool {
        self.risk_tag || self.risk_status
    }
}

pub fn is_risk_tag(tag: &str) -> bool {
    let normalized = tag.to_lowercase();
    RISK_TAG_KEYWORDS.iter().any(|keyword| normalized.contains(keyword))
}

/// A missing date is stale. Otherwise the date is read as midnight in `tz`
/// and the record is stale once strictly more than 21 days have elapsed.
pub fn is_stale<Tz: TimeZone>(last_contact: Option<NaiveDate>, now: DateTime<Utc>, tz: &Tz) -> bool {
    let Some(date) = last_contact else {
        return true;
    };
    let elapsed_ms = now.timestamp_millis() - local_midnight_millis(date, tz);
    elapsed_ms > STALE_AFTER_DAYS * MILLIS_PER_DAY
}

/// Longest span scanned for the end of a DST gap.
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Start of `date` in `tz`. When midnight falls in a DST gap, the first
/// valid local instant after it is used.
fn local_midnight_millis<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    (0..=MAX_GAP_MINUTES)
        .find_map(|minutes| {
            tz.from_local_datetime(&(midnight + Duration::minutes(minutes))).earliest()
        })
        .map(|local| local.timestamp_millis())
        .unwrap_or_else(|| midnight.and_utc().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, NaiveDate, TimeZone, Utc};

    use pipeboard_core::domain::customer::{Customer, CustomerId, CustomerStatus};

    use super::{is_risk_tag, is_stale, RiskSignals};

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn absent_last_contact_is_always_stale() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        assert!(is_stale(None, now, &Utc));
        assert!(is_stale(None, now - Duration::days(365), &Utc));
    }

    #[test]
    fn exactly_twenty_one_days_is_not_stale() {
        let midnight = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let now = midnight + Duration::days(21);

        assert!(!is_stale(date(2025, 1, 1), now, &Utc));
        assert!(is_stale(date(2025, 1, 1), now + Duration::seconds(1), &Utc));
        assert!(is_stale(date(2025, 1, 1), now + Duration::milliseconds(1), &Utc));
    }

    #[test]
    fn midnight_is_interpreted_in_the_given_zone() {
        let seoul = FixedOffset::east_opt(9 * 3600).unwrap();
        let local_midnight = seoul.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let boundary = (local_midnight + Duration::days(21)).with_timezone(&Utc);

        assert!(!is_stale(date(2025, 1, 1), boundary, &seoul));
        assert!(is_stale(date(2025, 1, 1), boundary + Duration::seconds(1), &seoul));
        // The same instant read in UTC is nine hours short of the boundary.
        assert!(!is_stale(date(2025, 1, 1), boundary + Duration::hours(8), &Utc));
    }

    #[test]
    fn future_contact_dates_are_fresh() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert!(!is_stale(date(2025, 3, 1), now, &Utc));
    }

    #[test]
    fn risk_tags_match_keywords_case_insensitively_as_substrings() {
        assert!(is_risk_tag("연체주의"));
        assert!(is_risk_tag("고위험"));
        assert!(is_risk_tag("Overdue-90d"));
        assert!(is_risk_tag("LITIGATION"));
        assert!(!is_risk_tag("제조업"));
        assert!(!is_risk_tag("risk"));
    }

    #[test]
    fn signals_trim_tags_and_flag_risk_status() {
        let mut customer = Customer::new(CustomerId("a".to_owned()));
        customer.tags = vec![" 무역 ".to_owned(), "  ".to_owned(), "IT".to_owned()];
        customer.status = CustomerStatus::Risk;
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        let signals = RiskSignals::evaluate(&customer, now, &Utc);

        assert_eq!(signals.tags, vec!["무역", "IT"]);
        assert!(!signals.risk_tag);
        assert!(signals.risk_status);
        assert!(signals.has_risk_signal());
        assert!(signals.stale);
    }

    #[test]
    fn midnight_in_dst_gap_starts_at_first_valid_local_instant() {
        // Santiago skips 00:00-01:00 local on 2024-09-08; 01:00 -03:00 is 04:00Z.
        let tz = chrono_tz::America::Santiago;
        let first_instant = Utc.with_ymd_and_hms(2024, 9, 8, 4, 0, 0).unwrap();
        let limit = first_instant + Duration::days(21);

        assert!(!is_stale(date(2024, 9, 8), limit - Duration::hours(1), &tz));
        assert!(!is_stale(date(2024, 9, 8), limit, &tz));
        assert!(is_stale(date(2024, 9, 8), limit + Duration::milliseconds(1), &tz));
    }
}
