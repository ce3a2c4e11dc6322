use serde::{Deserialize, Serialize};

/// 供应商主数据 (含一次性计算的风险字段)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub gstin: String,
    pub name: String,
    pub state: String,
    pub risk_score: f64,
    pub status: VendorStatus,
    pub total_transactions: u32,
    pub missed_filings: u32,
    pub avg_days_late: u32,
}

/// 供应商合规状态 (由风险分数阈值决定)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VendorStatus {
    Compliant,
    Review,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl VendorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Compliant => "Compliant",
            VendorStatus::Review => "Review",
            VendorStatus::HighRisk => "High Risk",
        }
    }
}

impl std::fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 新增供应商请求体 (缺失的数值特征走默认值)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDraft {
    pub name: String,
    pub gstin: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub total_transactions: Option<u32>,
    #[serde(default)]
    pub missed_filings: u32,
    #[serde(default)]
    pub avg_days_late: u32,
}

impl VendorDraft {
    pub fn features(&self) -> RiskFeatures {
        RiskFeatures {
            missed_filings: self.missed_filings,
            avg_days_late: self.avg_days_late,
            total_transactions: self.total_transactions,
        }
    }
}

/// 风险评分输入特征 (what-if 预测与建档共用)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFeatures {
    #[serde(default)]
    pub missed_filings: u32,
    #[serde(default)]
    pub avg_days_late: u32,
    /// 缺省按 100 笔历史交易计
    #[serde(default)]
    pub total_transactions: Option<u32>,
}
