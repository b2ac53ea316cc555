use pipeboard_core::domain::customer::Customer;

use crate::signals::RiskSignals;

pub const NO_SELECTION: &str = "먼저 왼쪽에서 고객을 선택해주세요.";

pub const HELP: &str =
    "가능한 요청 예시: ‘이 고객 요약’, ‘다음 액션 추천’, ‘리스크 체크’, ‘상담 스크립트’";

const UNKNOWN_COMPANY: &str = "회사 미상";
const UNASSIGNED_OWNER: &str = "미지정";
const EMPTY: &str = "-";
const DEFAULT_SCHEDULE: &str = "이번 주 내";

pub fn greeting(customer: &Customer) -> String {
    format!(
        "선택됨: {} ({})\n원하시면 “한줄요약/다음액션/리스크체크”를 눌러보세요.",
        customer.name,
        or_placeholder(&customer.company, UNKNOWN_COMPANY)
    )
}

pub fn summary(customer: &Customer, signals: &RiskSignals) -> String {
    let tags = if signals.tags.is_empty() { EMPTY.to_owned() } else { signals.tags.join(", ") };
    [
        format!(
            "{} ({}) — 상태 {}.",
            customer.name,
            or_placeholder(&customer.company, UNKNOWN_COMPANY),
            customer.status
        ),
        format!("담당: {} / 태그: {}", or_placeholder(&customer.owner, UNASSIGNED_OWNER), tags),
        format!(
            "최근접촉: {} / 다음액션: {}",
            date_or(customer.last_contact, EMPTY),
            date_or(customer.next_action, EMPTY)
        ),
    ]
    .join("\n")
}

pub fn next_actions(signals: &RiskSignals) -> String {
    let mut actions = vec![
        "1) 최근 상담/요청사항을 3줄로 정리해 CRM 메모 업데이트",
        "2) 다음 액션일 확정(콜/방문/서류요청) + 고객에게 캘린더 제안",
    ];
    if signals.stale {
        actions.push("3) 최근 접촉이 오래됨 → ‘안부/현황 체크’ 메시지 템플릿 발송");
    } else {
        actions.push("3) 직전 대화 이슈 후속(견적/조건/서류) 체크리스트 공유");
    }
    if signals.has_risk_signal() {
        actions.push("4) 리스크 포인트(연체/민원/재무악화) 관련 확인 질문 3개 준비");
    }
    actions.join("\n")
}

pub fn risk_check(signals: &RiskSignals) -> String {
    let staleness = if signals.stale { "주의(오래됨)" } else { "양호" };
    let risk = if signals.has_risk_signal() { "있음" } else { "특이사항 없음" };
    [
        format!("- 최근 접촉 공백 여부: {staleness}"),
        format!("- 태그 기반 위험신호: {risk}"),
        "- 확인 질문 예시:".to_owned(),
        "  1) 최근 3개월 매출/현금흐름 변동이 있었나요?".to_owned(),
        "  2) 결제/상환 일정 이슈(지연/연체) 징후가 있었나요?".to_owned(),
        "  3) 민원/분쟁/소송 등 대외 리스크가 있나요?".to_owned(),
    ]
    .join("\n")
}

pub fn call_script(customer: &Customer) -> String {
    [
        format!(
            "안녕하세요 {}님, 지난번 논의했던 건 관련해 진행 상황 확인드리려고 연락드렸습니다.",
            customer.name
        ),
        "1) 현재 가장 우선순위가 높은 니즈가 무엇인지(자금/결제/운영자금/투자 등) 다시 한 번 확인드려도 될까요?"
            .to_owned(),
        "2) 필요 서류/데이터는 최소화해서 안내드리겠습니다. 오늘 통화 후 체크리스트를 문자/메일로 보내드릴게요."
            .to_owned(),
        format!(
            "3) 다음 단계(조건 제안/심사/실행) 일정은 {} 기준으로 잡아도 괜찮을까요?",
            date_or(customer.next_action, DEFAULT_SCHEDULE)
        ),
    ]
    .join("\n")
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

fn date_or(date: Option<chrono::NaiveDate>, placeholder: &str) -> String {
    date.map(|date| date.to_string()).unwrap_or_else(|| placeholder.to_owned())
}
