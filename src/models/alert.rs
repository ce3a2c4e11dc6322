use serde::{Deserialize, Serialize};

/// 动态告警 (建档/入账时追加, 最新在前)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub message: String,
    pub time: String,
    pub icon: String,
}

impl Alert {
    pub fn now(kind: AlertKind, message: String) -> Self {
        Self {
            kind,
            message,
            time: "Just now".to_string(),
            icon: kind.icon().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Critical,
    Warning,
    Success,
    Info,
}

impl AlertKind {
    pub fn icon(&self) -> &'static str {
        match self {
            AlertKind::Critical => "🔴",
            AlertKind::Warning => "🟡",
            AlertKind::Success => "🟢",
            AlertKind::Info => "🔵",
        }
    }
}
