use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::customer::{Customer, CustomerId, CustomerStatus};
use crate::errors::ApplicationError;
use crate::store::{Clock, RecordStore, SlotStore};

/// Sample pipeline: one customer per status column.
const SEED_CUSTOMERS: &[SeedCustomerContract] = &[
    SeedCustomerContract {
        id: "cust-seed-001",
        name: "김민지",
        company: "민지상사",
        owner: "RM 강태희",
        status: CustomerStatus::Lead,
        tags: &["제조업", "대출상담"],
        notes: "운영자금 문의. 매출 변동성 있음.",
        last_contact: Some((2025, 12, 10)),
        next_action: Some((2025, 12, 27)),
    },
    SeedCustomerContract {
        id: "cust-seed-002",
        name: "이준호",
        company: "준호테크",
        owner: "RM 박서연",
        status: CustomerStatus::Active,
        tags: &["IT", "급여이체"],
        notes: "ERP 연동 관심. 결제/정산 자동화 논의.",
        last_contact: Some((2025, 12, 21)),
        next_action: Some((2025, 12, 29)),
    },
    SeedCustomerContract {
        id: "cust-seed-003",
        name: "최유라",
        company: "유라무역",
        owner: "RM 강태희",
        status: CustomerStatus::Risk,
        tags: &["무역", "고위험", "연체주의"],
        notes: "연체 가능성 모니터링 필요. 자료 요청 예정.",
        last_contact: Some((2025, 11, 28)),
        next_action: Some((2025, 12, 26)),
    },
    SeedCustomerContract {
        id: "cust-seed-004",
        name: "정현수",
        company: "현수푸드",
        owner: "RM 김도윤",
        status: CustomerStatus::Closed,
        tags: &["유통"],
        notes: "계약 종료(경쟁사 전환). 재접촉은 2026 Q1 검토.",
        last_contact: Some((2025, 10, 2)),
        next_action: None,
    },
];

struct SeedCustomerContract {
    id: &'static str,
    name: &'static str,
    company: &'static str,
    owner: &'static str,
    status: CustomerStatus,
    tags: &'static [&'static str],
    notes: &'static str,
    last_contact: Option<(i32, u32, u32)>,
    next_action: Option<(i32, u32, u32)>,
}

impl SeedCustomerContract {
    fn to_customer(&self, now_ms: i64) -> Customer {
        Customer {
            id: CustomerId(self.id.to_string()),
            name: self.name.to_string(),
            company: self.company.to_string(),
            owner: self.owner.to_string(),
            status: self.status,
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
            notes: self.notes.to_string(),
            last_contact: self.last_contact.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            next_action: self.next_action.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            created_at: now_ms,
            updated_at: now_ms,
        }
    }
}

pub struct SampleDataset;

impl SampleDataset {
    pub fn customers(now_ms: i64) -> Vec<Customer> {
        SEED_CUSTOMERS.iter().map(|seed| seed.to_customer(now_ms)).collect()
    }

    /// Replaces the store contents with the sample pipeline.
    pub fn load<S, C>(store: &mut RecordStore<S, C>) -> Result<SeedResult, ApplicationError>
    where
        S: SlotStore,
        C: Clock,
    {
        let now_ms = store.clock().now_millis();
        store.replace_all(Self::customers(now_ms))?;

        Ok(SeedResult {
            customers_seeded: SEED_CUSTOMERS
                .iter()
                .map(|seed| CustomerSeedInfo {
                    customer_id: seed.id.to_string(),
                    name: seed.name.to_string(),
                    status: seed.status,
                })
                .collect(),
        })
    }

    pub fn verify<S, C>(store: &RecordStore<S, C>) -> VerificationResult
    where
        S: SlotStore,
        C: Clock,
    {
        let checks = SEED_CUSTOMERS
            .iter()
            .map(|seed| {
                let present = store
                    .get(&CustomerId(seed.id.to_string()))
                    .is_some_and(|customer| customer.status == seed.status);
                (seed.id, present)
            })
            .collect::<Vec<_>>();
        let all_present = checks.iter().all(|(_, present)| *present);

        VerificationResult { all_present, checks }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeedResult {
    pub customers_seeded: Vec<CustomerSeedInfo>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerSeedInfo {
    pub customer_id: String,
    pub name: String,
    pub status: CustomerStatus,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
