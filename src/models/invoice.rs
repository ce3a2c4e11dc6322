use serde::{Deserialize, Serialize};

/// 进项发票 (派生字段在入账时一次性计算, 之后不再重算)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: String,
    pub vendor_id: String,
    pub vendor_name: String,
    pub gstin: String,
    pub date: String,
    pub taxable_amount: f64,
    pub cgst: f64,
    pub sgst: f64,
    pub igst: f64,
    pub total_tax: f64,
    pub total: f64,
    pub hsn: String,
    pub period: String,
    pub gstr1_reported: bool,
    pub gstr2b_reported: bool,
    pub e_invoice: bool,
    pub e_way_bill: bool,
    pub match_status: MatchStatus,
    pub risk_level: RiskLevel,
}

impl Invoice {
    pub fn is_mismatch(&self) -> bool {
        self.match_status != MatchStatus::Matched
    }
}

/// GSTR-1 / GSTR-2B 交叉核对结果
///
/// 计算路径只会产出 `Matched` 与 `MissingInGstr1`;
/// 其余类别仅出现在种子数据或上游已定案的历史记录里。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Matched,
    #[serde(rename = "Missing in GSTR-1")]
    MissingInGstr1,
    #[serde(rename = "Missing in GSTR-2B")]
    MissingInGstr2b,
    #[serde(rename = "Tax Amount Mismatch")]
    TaxAmountMismatch,
    #[serde(rename = "HSN Mismatch")]
    HsnMismatch,
    #[serde(rename = "Late Filing")]
    LateFiling,
    #[serde(rename = "E-Way Bill Missing")]
    EWayBillMissing,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Matched => "Matched",
            MatchStatus::MissingInGstr1 => "Missing in GSTR-1",
            MatchStatus::MissingInGstr2b => "Missing in GSTR-2B",
            MatchStatus::TaxAmountMismatch => "Tax Amount Mismatch",
            MatchStatus::HsnMismatch => "HSN Mismatch",
            MatchStatus::LateFiling => "Late Filing",
            MatchStatus::EWayBillMissing => "E-Way Bill Missing",
        }
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 发票风险等级 (计算路径只产出 High/Low, Medium 仅见于种子数据)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// 新增发票请求体
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub vendor_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub taxable_amount: f64,
    #[serde(default)]
    pub cgst: f64,
    #[serde(default)]
    pub sgst: f64,
    #[serde(default)]
    pub igst: f64,
    #[serde(default)]
    pub hsn: String,
    #[serde(default)]
    pub period: String,
    #[serde(default = "default_true")]
    pub gstr1_reported: bool,
    #[serde(default = "default_true")]
    pub gstr2b_reported: bool,
    #[serde(default = "default_true")]
    pub e_invoice: bool,
    #[serde(default = "default_true")]
    pub e_way_bill: bool,
}

fn default_true() -> bool {
    true
}
