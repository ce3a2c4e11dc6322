//! 审计说明生成 — 模板拼接, 不调用任何外部模型
//!
//! 种子发票的说明是手写查表 (见 store::seed), 新入账的错配发票
//! 用这里的模板现场生成一条并写回查表。

use crate::models::{AuditExplanation, Invoice, Vendor};

/// 印度位分组: 4,50,000 / 1,40,400 (末三位一组, 其余两位一组)
pub fn format_inr(amount: f64) -> String {
    let n = amount.round() as i64;
    let digits = n.abs().to_string();
    let mut grouped = String::new();
    let len = digits.len();
    if len <= 3 {
        grouped.push_str(&digits);
    } else {
        let head = &digits[..len - 3];
        let mut head_groups: Vec<&str> = Vec::new();
        let mut rest = head;
        while rest.len() > 2 {
            let split = rest.len() - 2;
            head_groups.push(&rest[split..]);
            rest = &rest[..split];
        }
        head_groups.push(rest);
        head_groups.reverse();
        grouped.push_str(&head_groups.join(","));
        grouped.push(',');
        grouped.push_str(&digits[len - 3..]);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// 为错配发票生成模板化说明
pub fn explanation_for(invoice: &Invoice, vendor: Option<&Vendor>) -> AuditExplanation {
    let vendor_name = vendor.map(|v| v.name.as_str()).unwrap_or("Unknown");
    let vendor_risk_pct = vendor.map(|v| v.risk_score * 100.0).unwrap_or(0.0).round();

    AuditExplanation {
        summary: format!(
            "Invoice {} (₹{} taxable) from {} is flagged: {}.",
            invoice.id,
            format_inr(invoice.taxable_amount),
            vendor_name,
            invoice.match_status,
        ),
        evidence: vec![
            format!("Invoice date: {}, period: {}", invoice.date, invoice.period),
            if invoice.gstr2b_reported {
                "Invoice in GSTR-2B".to_string()
            } else {
                "NOT in GSTR-2B".to_string()
            },
            if invoice.gstr1_reported {
                "Invoice in Vendor GSTR-1".to_string()
            } else {
                "MISSING from Vendor GSTR-1".to_string()
            },
            if invoice.e_invoice {
                "e-Invoice generated".to_string()
            } else {
                "No e-Invoice".to_string()
            },
            format!("Vendor risk: {vendor_risk_pct:.0}%"),
        ],
        recommendation: format!(
            "ITC of ₹{} is at risk. Contact vendor to reconcile.",
            format_inr(invoice.total_tax),
        ),
        graph_path: format!(
            "Your Entity → GSTR-2B ({}) → {} → {}",
            invoice.period,
            invoice.id,
            vendor.map(|v| v.name.as_str()).unwrap_or("Vendor"),
        ),
    }
}
