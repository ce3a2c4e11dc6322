//! KPI 与错配聚合 — 对全量集合的纯函数重算, 无隐藏可变状态

use crate::models::{Invoice, MatchStatus, Vendor, VendorStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 错配类型 → 展示色 (配置表, 未收录的类型走默认色)
const TYPE_COLORS: &[(MatchStatus, &str)] = &[
    (MatchStatus::MissingInGstr1, "#ef4444"),
    (MatchStatus::TaxAmountMismatch, "#f59e0b"),
    (MatchStatus::HsnMismatch, "#8b5cf6"),
    (MatchStatus::LateFiling, "#3b82f6"),
    (MatchStatus::EWayBillMissing, "#06b6d4"),
    (MatchStatus::MissingInGstr2b, "#ec4899"),
];

const DEFAULT_COLOR: &str = "#6366f1";

pub fn display_color(status: MatchStatus) -> &'static str {
    TYPE_COLORS
        .iter()
        .find(|(s, _)| *s == status)
        .map(|(_, c)| *c)
        .unwrap_or(DEFAULT_COLOR)
}

/// 某一错配类型的汇总行
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MismatchTypeSummary {
    #[serde(rename = "type")]
    pub match_status: MatchStatus,
    pub count: usize,
    pub total_tax: f64,
    pub color: &'static str,
}

/// 仪表盘 KPI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub total_invoices: usize,
    pub total_mismatches: usize,
    #[serde(rename = "atRiskITC")]
    pub at_risk_itc: f64,
    pub vendors_monitored: usize,
    pub match_rate: f64,
    pub avg_resolution_days: f64,
    pub high_risk_vendors: usize,
}

/// 错配子序列, 原始顺序保留
pub fn mismatches(invoices: &[Invoice]) -> Vec<Invoice> {
    invoices.iter().filter(|i| i.is_mismatch()).cloned().collect()
}

/// 按错配类型分组 (首次出现顺序), 计数 + 税额求和
pub fn mismatch_types(mismatches: &[Invoice]) -> Vec<MismatchTypeSummary> {
    let mut groups: IndexMap<MatchStatus, MismatchTypeSummary> = IndexMap::new();
    for inv in mismatches {
        let entry = groups
            .entry(inv.match_status)
            .or_insert_with(|| MismatchTypeSummary {
                match_status: inv.match_status,
                count: 0,
                total_tax: 0.0,
                color: display_color(inv.match_status),
            });
        entry.count += 1;
        entry.total_tax += inv.total_tax;
    }
    groups.into_values().collect()
}

/// 全量 KPI 重算; 空集合时 matchRate 取 0
pub fn kpi(vendors: &[Vendor], invoices: &[Invoice]) -> KpiSummary {
    let mismatched: Vec<&Invoice> = invoices.iter().filter(|i| i.is_mismatch()).collect();
    let total_mismatches = mismatched.len();
    let at_risk_itc: f64 = mismatched.iter().map(|i| i.total_tax).sum();
    let match_rate = if invoices.is_empty() {
        0.0
    } else {
        let pct = (invoices.len() - total_mismatches) as f64 / invoices.len() as f64 * 100.0;
        (pct * 10.0).round() / 10.0
    };
    let high_risk_vendors = vendors
        .iter()
        .filter(|v| v.status == VendorStatus::HighRisk)
        .count();

    KpiSummary {
        total_invoices: invoices.len(),
        total_mismatches,
        at_risk_itc,
        vendors_monitored: vendors.len(),
        match_rate,
        avg_resolution_days: 4.2,
        high_risk_vendors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskLevel;

    fn invoice(id: &str, status: MatchStatus, total_tax: f64) -> Invoice {
        Invoice {
            id: id.to_string(),
            vendor_id: "V001".to_string(),
            vendor_name: "Test Vendor".to_string(),
            gstin: "29AABCU9603R1ZM".to_string(),
            date: "2025-07-15".to_string(),
            taxable_amount: total_tax * 5.0,
            cgst: total_tax / 2.0,
            sgst: total_tax / 2.0,
            igst: 0.0,
            total_tax,
            total: total_tax * 6.0,
            hsn: "7208".to_string(),
            period: "2025-07".to_string(),
            gstr1_reported: status == MatchStatus::Matched,
            gstr2b_reported: true,
            e_invoice: true,
            e_way_bill: true,
            match_status: status,
            risk_level: if status == MatchStatus::Matched {
                RiskLevel::Low
            } else {
                RiskLevel::High
            },
        }
    }

    fn vendor(id: &str, status: VendorStatus) -> Vendor {
        Vendor {
            id: id.to_string(),
            gstin: "36AAACH7409R1ZK".to_string(),
            name: "Vendor".to_string(),
            state: "Telangana".to_string(),
            risk_score: 0.5,
            status,
            total_transactions: 100,
            missed_filings: 0,
            avg_days_late: 0,
        }
    }

    #[test]
    fn mismatches_preserve_order() {
        let invoices = vec![
            invoice("A", MatchStatus::MissingInGstr1, 100.0),
            invoice("B", MatchStatus::Matched, 50.0),
            invoice("C", MatchStatus::LateFiling, 25.0),
        ];
        let out = mismatches(&invoices);
        let ids: Vec<&str> = out.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "C"]);
    }

    #[test]
    fn groups_keep_first_occurrence_order() {
        let invoices = vec![
            invoice("A", MatchStatus::LateFiling, 10.0),
            invoice("B", MatchStatus::MissingInGstr1, 20.0),
            invoice("C", MatchStatus::LateFiling, 30.0),
        ];
        let groups = mismatch_types(&mismatches(&invoices));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].match_status, MatchStatus::LateFiling);
        assert_eq!(groups[0].count, 2);
        assert!((groups[0].total_tax - 40.0).abs() < 1e-9);
        assert_eq!(groups[0].color, "#3b82f6");
        assert_eq!(groups[1].match_status, MatchStatus::MissingInGstr1);
        assert_eq!(groups[1].color, "#ef4444");
    }

    #[test]
    fn unmapped_status_gets_default_color() {
        assert_eq!(display_color(MatchStatus::Matched), "#6366f1");
    }

    #[test]
    fn kpi_sums_tax_at_risk_and_rounds_match_rate() {
        let vendors = vec![
            vendor("V001", VendorStatus::HighRisk),
            vendor("V002", VendorStatus::Compliant),
        ];
        let invoices = vec![
            invoice("A", MatchStatus::MissingInGstr1, 81000.0),
            invoice("B", MatchStatus::Matched, 1000.0),
            invoice("C", MatchStatus::Matched, 1000.0),
        ];
        let k = kpi(&vendors, &invoices);
        assert_eq!(k.total_invoices, 3);
        assert_eq!(k.total_mismatches, 1);
        assert!((k.at_risk_itc - 81000.0).abs() < 1e-9);
        assert_eq!(k.vendors_monitored, 2);
        assert_eq!(k.high_risk_vendors, 1);
        assert!((k.match_rate - 66.7).abs() < 1e-9);
    }

    #[test]
    fn kpi_on_empty_collections_is_all_zero() {
        let k = kpi(&[], &[]);
        assert_eq!(k.total_invoices, 0);
        assert_eq!(k.match_rate, 0.0);
        assert_eq!(k.at_risk_itc, 0.0);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let vendors = vec![vendor("V001", VendorStatus::Review)];
        let invoices = vec![
            invoice("A", MatchStatus::MissingInGstr1, 81000.0),
            invoice("B", MatchStatus::Matched, 1000.0),
        ];
        let first = serde_json::to_value(kpi(&vendors, &invoices)).unwrap();
        let second = serde_json::to_value(kpi(&vendors, &invoices)).unwrap();
        assert_eq!(first, second);

        let g1 = serde_json::to_value(mismatch_types(&mismatches(&invoices))).unwrap();
        let g2 = serde_json::to_value(mismatch_types(&mismatches(&invoices))).unwrap();
        assert_eq!(g1, g2);
    }
}
