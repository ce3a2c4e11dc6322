//! 错配分类 — 发票申报标志到核对结果的唯一规则入口

use crate::models::{MatchStatus, RiskLevel};

/// 出现在买方 GSTR-2B 却缺席卖方 GSTR-1 → `Missing in GSTR-1`, 其余视为已核对。
pub fn classify(gstr1_reported: bool, gstr2b_reported: bool) -> MatchStatus {
    if !gstr1_reported && gstr2b_reported {
        MatchStatus::MissingInGstr1
    } else {
        MatchStatus::Matched
    }
}

/// 计算路径二值: 有错配即 High, 否则 Low。
pub fn risk_level(status: MatchStatus) -> RiskLevel {
    if status == MatchStatus::Matched {
        RiskLevel::Low
    } else {
        RiskLevel::High
    }
}
