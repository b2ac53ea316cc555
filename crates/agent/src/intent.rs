use serde::Serialize;

/// Purpose of a free-text prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Summary,
    NextActions,
    RiskCheck,
    CallScript,
    Help,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::NextActions => "next_actions",
            Self::RiskCheck => "risk_check",
            Self::CallScript => "call_script",
            Self::Help => "help",
        }
    }
}

/// Evaluated top to bottom; the first rule with a contained keyword wins.
pub const INTENT_RULES: &[(Intent, &[&str])] = &[
    (Intent::Summary, &["한 줄", "한줄", "요약"]),
    (Intent::NextActions, &["다음", "액션", "추천"]),
    (Intent::RiskCheck, &["리스크", "이상", "체크"]),
    (Intent::CallScript, &["스크립트", "상담"]),
];

pub fn classify(prompt: &str) -> Intent {
    let normalized = prompt.to_lowercase();
    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| normalized.contains(keyword)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Help)
}
