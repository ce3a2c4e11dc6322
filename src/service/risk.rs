//! 供应商风险评分 — 固定线性加权, 无训练、无外部模型调用
//!
//! 线上写入与本地回退共用这一份实现, 两条路径逐位一致。

use crate::models::{RiskFeatures, VendorStatus};
use serde::{Deserialize, Serialize};

const MIN_SCORE: f64 = 0.05;
const MAX_SCORE: f64 = 0.95;

/// 评分 + 分类结果
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: f64,
    pub status: VendorStatus,
}

/// 固定公式: 漏报 0.28 + 延迟 0.22 + 交易量 0.12 + 申报标志 0.12 + 常数 0.08
///
/// 所有输入缺省/截断, 永不拒绝。
pub fn score(features: &RiskFeatures) -> f64 {
    let missed = (f64::from(features.missed_filings) / 6.0).min(1.0) * 0.28;
    let late = (f64::from(features.avg_days_late) / 20.0).min(1.0) * 0.22;

    let tx = features.total_transactions.unwrap_or(100);
    let volume_weight = if tx < 50 {
        0.8
    } else if tx < 100 {
        0.4
    } else {
        0.1
    };
    let volume = volume_weight * 0.12;

    let filing_weight = if features.missed_filings > 2 { 0.7 } else { 0.2 };
    let filing = filing_weight * 0.12;

    let raw = missed + late + volume + filing + 0.3 * 0.08;
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

/// 分数 → 状态: >=0.60 高风险, >=0.30 复核, 否则合规
pub fn classify(score: f64) -> VendorStatus {
    if score >= 0.6 {
        VendorStatus::HighRisk
    } else if score >= 0.3 {
        VendorStatus::Review
    } else {
        VendorStatus::Compliant
    }
}

pub fn assess(features: &RiskFeatures) -> RiskAssessment {
    let score = score(features);
    RiskAssessment {
        score,
        status: classify(score),
    }
}
