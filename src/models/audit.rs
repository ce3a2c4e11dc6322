use serde::{Deserialize, Serialize};

/// 审计说明 (按发票ID查表; 不存在即无说明, 不是错误)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditExplanation {
    pub summary: String,
    pub evidence: Vec<String>,
    pub recommendation: String,
    pub graph_path: String,
}
