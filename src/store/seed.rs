//! 静态回退数据集 — 上游不可达时整体替换用
//!
//! 与上游服务的种子完全同形; riskScore/matchStatus 等派生字段
//! 是历史定案值, 原样保留, 不做重算。

use crate::models::{
    Alert, AlertKind, AuditExplanation, Invoice, MatchStatus, RiskLevel, Vendor, VendorStatus,
};
use crate::store::Dataset;
use std::collections::HashMap;

#[allow(clippy::too_many_arguments)]
fn vendor(
    id: &str,
    name: &str,
    gstin: &str,
    state: &str,
    risk_score: f64,
    status: VendorStatus,
    total_transactions: u32,
    missed_filings: u32,
    avg_days_late: u32,
) -> Vendor {
    Vendor {
        id: id.to_string(),
        gstin: gstin.to_string(),
        name: name.to_string(),
        state: state.to_string(),
        risk_score,
        status,
        total_transactions,
        missed_filings,
        avg_days_late,
    }
}

/// 标志位顺序: gstr1Reported, gstr2bReported, eInvoice, eWayBill
#[allow(clippy::too_many_arguments)]
fn invoice(
    id: &str,
    vendor_id: &str,
    vendor_name: &str,
    gstin: &str,
    date: &str,
    taxable_amount: f64,
    cgst: f64,
    sgst: f64,
    igst: f64,
    hsn: &str,
    period: &str,
    flags: (bool, bool, bool, bool),
    match_status: MatchStatus,
    risk_level: RiskLevel,
) -> Invoice {
    let total_tax = cgst + sgst + igst;
    Invoice {
        id: id.to_string(),
        vendor_id: vendor_id.to_string(),
        vendor_name: vendor_name.to_string(),
        gstin: gstin.to_string(),
        date: date.to_string(),
        taxable_amount,
        cgst,
        sgst,
        igst,
        total_tax,
        total: taxable_amount + total_tax,
        hsn: hsn.to_string(),
        period: period.to_string(),
        gstr1_reported: flags.0,
        gstr2b_reported: flags.1,
        e_invoice: flags.2,
        e_way_bill: flags.3,
        match_status,
        risk_level,
    }
}

pub fn seed_vendors() -> Vec<Vendor> {
    use VendorStatus::{Compliant, HighRisk, Review};
    vec![
        vendor("V001", "Tata Steel Ltd", "29AABCU9603R1ZM", "Karnataka", 0.12, Compliant, 245, 0, 0),
        vendor("V002", "Reliance Industries", "27AABCR9718E1ZL", "Maharashtra", 0.08, Compliant, 312, 0, 0),
        vendor("V003", "Infosys Technologies", "29AABCI1332L1ZJ", "Karnataka", 0.15, Compliant, 189, 0, 1),
        vendor("V004", "Wipro Limited", "29AABCW6273R1ZA", "Karnataka", 0.22, Compliant, 156, 1, 2),
        vendor("V005", "Hyderabad Steels Pvt", "36AAACH7409R1ZK", "Telangana", 0.78, HighRisk, 67, 4, 12),
        vendor("V006", "Bajaj Auto Ltd", "27AABCB8482K1Z5", "Maharashtra", 0.19, Compliant, 198, 0, 1),
        vendor("V007", "Hindalco Industries", "22AABCH0812J1ZF", "Chhattisgarh", 0.35, Review, 143, 1, 3),
        vendor("V008", "ITC Limited", "19AABCI5765M1ZO", "West Bengal", 0.11, Compliant, 276, 0, 0),
        vendor("V009", "Mahindra & Mahindra", "27AABCM5964F1ZE", "Maharashtra", 0.28, Compliant, 167, 1, 2),
        vendor("V010", "SunPharma Industries", "09AABCS1429B1ZE", "Uttar Pradesh", 0.65, HighRisk, 89, 3, 8),
        vendor("V011", "Grasim Industries", "09AABCG0127K1ZP", "Uttar Pradesh", 0.18, Compliant, 134, 0, 1),
        vendor("V012", "NTPC Limited", "07AABCN8726L1ZF", "Delhi", 0.09, Compliant, 223, 0, 0),
        vendor("V013", "EID Parry India", "33AABCE9012P1ZS", "Tamil Nadu", 0.72, HighRisk, 56, 4, 10),
        vendor("V014", "Godrej Consumer", "27AABCG3456R1ZM", "Maharashtra", 0.31, Review, 145, 1, 3),
        vendor("V015", "Hero MotoCorp", "06AABCH7890K1ZR", "Haryana", 0.14, Compliant, 201, 0, 1),
        vendor("V016", "DLF Limited", "07AABCD1234L1ZP", "Delhi", 0.42, Review, 98, 2, 5),
        vendor("V017", "Asian Paints", "27AABCA5678E1ZK", "Maharashtra", 0.10, Compliant, 267, 0, 0),
        vendor("V018", "Jubilant Foodworks", "09AABCJ9012B1ZM", "Uttar Pradesh", 0.55, Review, 78, 2, 6),
        vendor("V019", "Torrent Pharma", "24AABCT3456P1ZG", "Gujarat", 0.48, Review, 112, 2, 4),
        vendor("V020", "Adani Enterprises", "24AABCA7890E1ZL", "Gujarat", 0.25, Compliant, 189, 1, 2),
    ]
}

pub fn seed_invoices() -> Vec<Invoice> {
    use MatchStatus::{EWayBillMissing, HsnMismatch, LateFiling, Matched, MissingInGstr1, TaxAmountMismatch};
    use RiskLevel::{High, Low, Medium};
    vec![
        invoice("INV-2025-001", "V005", "Hyderabad Steels Pvt", "36AAACH7409R1ZK", "2025-07-15", 450000.0, 40500.0, 40500.0, 0.0, "7208", "2025-07", (false, true, true, true), MissingInGstr1, High),
        invoice("INV-2025-002", "V001", "Tata Steel Ltd", "29AABCU9603R1ZM", "2025-07-18", 780000.0, 70200.0, 70200.0, 0.0, "7210", "2025-07", (true, true, true, true), Matched, Low),
        invoice("INV-2025-003", "V010", "SunPharma Industries", "09AABCS1429B1ZE", "2025-07-22", 320000.0, 0.0, 0.0, 38400.0, "3004", "2025-07", (true, true, true, true), TaxAmountMismatch, Medium),
        invoice("INV-2025-004", "V013", "EID Parry India", "33AABCE9012P1ZS", "2025-07-25", 1200000.0, 0.0, 0.0, 140400.0, "1701", "2025-07", (false, true, true, false), MissingInGstr1, High),
        invoice("INV-2025-005", "V002", "Reliance Industries", "27AABCR9718E1ZL", "2025-07-28", 560000.0, 50400.0, 50400.0, 0.0, "2710", "2025-07", (true, true, true, true), Matched, Low),
        invoice("INV-2025-006", "V006", "Bajaj Auto Ltd", "27AABCB8482K1Z5", "2025-08-02", 890000.0, 80100.0, 80100.0, 0.0, "8711", "2025-08", (true, true, true, true), Matched, Low),
        invoice("INV-2025-007", "V018", "Jubilant Foodworks", "09AABCJ9012B1ZM", "2025-08-05", 95000.0, 0.0, 0.0, 17100.0, "2106", "2025-08", (false, true, false, true), MissingInGstr1, High),
        invoice("INV-2025-008", "V003", "Infosys Technologies", "29AABCI1332L1ZJ", "2025-08-08", 1500000.0, 135000.0, 135000.0, 0.0, "9983", "2025-08", (true, true, true, false), Matched, Low),
        invoice("INV-2025-009", "V007", "Hindalco Industries", "22AABCH0812J1ZF", "2025-08-10", 410000.0, 0.0, 0.0, 49200.0, "7208", "2025-08", (true, true, true, true), HsnMismatch, Medium),
        invoice("INV-2025-010", "V008", "ITC Limited", "19AABCI5765M1ZO", "2025-08-12", 230000.0, 0.0, 0.0, 27600.0, "2401", "2025-08", (true, true, true, true), Matched, Low),
        invoice("INV-2025-011", "V005", "Hyderabad Steels Pvt", "36AAACH7409R1ZK", "2025-08-15", 670000.0, 0.0, 0.0, 120600.0, "7208", "2025-08", (false, true, true, true), MissingInGstr1, High),
        invoice("INV-2025-012", "V009", "Mahindra & Mahindra", "27AABCM5964F1ZE", "2025-08-18", 340000.0, 30600.0, 30600.0, 0.0, "8429", "2025-08", (true, true, true, true), Matched, Low),
        invoice("INV-2025-013", "V014", "Godrej Consumer", "27AABCG3456R1ZM", "2025-08-20", 120000.0, 10800.0, 10800.0, 0.0, "3401", "2025-08", (true, true, true, true), LateFiling, Medium),
        invoice("INV-2025-014", "V015", "Hero MotoCorp", "06AABCH7890K1ZR", "2025-09-01", 980000.0, 0.0, 0.0, 176400.0, "8711", "2025-09", (true, true, true, true), Matched, Low),
        invoice("INV-2025-015", "V019", "Torrent Pharma", "24AABCT3456P1ZG", "2025-09-03", 150000.0, 0.0, 0.0, 18000.0, "3004", "2025-09", (true, true, true, true), EWayBillMissing, Medium),
        invoice("INV-2025-016", "V012", "NTPC Limited", "07AABCN8726L1ZF", "2025-09-05", 2100000.0, 189000.0, 189000.0, 0.0, "2716", "2025-09", (true, true, true, true), Matched, Low),
        invoice("INV-2025-017", "V016", "DLF Limited", "07AABCD1234L1ZP", "2025-09-08", 4500000.0, 405000.0, 405000.0, 0.0, "9972", "2025-09", (true, true, true, false), Matched, Low),
        invoice("INV-2025-018", "V010", "SunPharma Industries", "09AABCS1429B1ZE", "2025-09-10", 280000.0, 0.0, 0.0, 33600.0, "2933", "2025-09", (false, true, true, true), MissingInGstr1, High),
        invoice("INV-2025-019", "V020", "Adani Enterprises", "24AABCA7890E1ZL", "2025-09-12", 670000.0, 0.0, 0.0, 120600.0, "2701", "2025-09", (true, true, true, true), Matched, Low),
        invoice("INV-2025-020", "V004", "Wipro Limited", "29AABCW6273R1ZA", "2025-09-15", 890000.0, 80100.0, 80100.0, 0.0, "9983", "2025-09", (true, true, true, false), Matched, Low),
    ]
}

pub fn seed_alerts() -> Vec<Alert> {
    fn alert(kind: AlertKind, message: &str, time: &str) -> Alert {
        Alert {
            kind,
            message: message.to_string(),
            time: time.to_string(),
            icon: kind.icon().to_string(),
        }
    }
    vec![
        alert(AlertKind::Critical, "5 invoices missing from vendor GSTR-1 filings", "2 hours ago"),
        alert(AlertKind::Warning, "Vendor V005 risk score increased to 78%", "5 hours ago"),
        alert(AlertKind::Success, "GSTR-2B auto-reconciliation completed for Aug 2025", "1 day ago"),
        alert(AlertKind::Warning, "3 vendors have pending GSTR-1 amendments", "1 day ago"),
        alert(AlertKind::Critical, "₹8.1L ITC at risk due to unmatched invoices", "2 days ago"),
    ]
}

pub fn seed_dataset() -> Dataset {
    Dataset {
        vendors: seed_vendors(),
        invoices: seed_invoices(),
        alerts: seed_alerts(),
    }
}

/// 手写审计说明 — 仅覆盖种子数据里的四张示例发票
pub fn seed_explanations() -> HashMap<String, AuditExplanation> {
    let mut map = HashMap::new();

    map.insert(
        "INV-2025-001".to_string(),
        AuditExplanation {
            summary: "Invoice INV-2025-001 (₹4,50,000 taxable, ₹81,000 tax) claimed as purchase by your entity under GSTR-2B for July 2025 is flagged because the supplier Hyderabad Steels Pvt (GSTIN: 36AAACH7409R1ZK) has NOT reported this invoice in their GSTR-1 for the same period.".to_string(),
            evidence: vec![
                "Invoice INV-2025-001 appears in your GSTR-2B (auto-populated) for July 2025".to_string(),
                "Cross-reference with Vendor's GSTR-1 for July 2025: NO matching entry found".to_string(),
                "e-Invoice IRN was generated (valid), but vendor failed to include it in their return".to_string(),
                "Vendor Hyderabad Steels has a compliance risk score of 0.78 (High Risk)".to_string(),
                "This vendor has 4 missed filings in the past 12 months".to_string(),
            ],
            recommendation: "ITC of ₹81,000 is at risk of disallowance under Section 16(2)(aa) of CGST Act. Recommend contacting the vendor to file an amendment or withholding ITC claim until GSTR-1 is updated.".to_string(),
            graph_path: "Your Entity → GSTR-2B (Jul-25) → INV-2025-001 → [MISSING: Vendor GSTR-1] → Hyderabad Steels Pvt".to_string(),
        },
    );

    map.insert(
        "INV-2025-003".to_string(),
        AuditExplanation {
            summary: "Invoice INV-2025-003 (₹3,20,000 taxable) from SunPharma Industries shows a tax amount discrepancy between GSTR-1 and GSTR-2B entries. The vendor reported ₹36,000 total tax in GSTR-1 vs ₹38,400 in your GSTR-2B.".to_string(),
            evidence: vec![
                "GSTR-2B shows IGST: ₹38,400 on this inter-state supply".to_string(),
                "Vendor's GSTR-1 shows IGST: ₹36,000".to_string(),
                "Tax rate discrepancy: 12% applied in GSTR-2B vs. 11.25% in GSTR-1".to_string(),
                "HSN code 3004 (pharmaceutical products) applicable rate is 12% GST".to_string(),
                "Vendor may have applied incorrect tax rate in their filing".to_string(),
            ],
            recommendation: "Difference of ₹2,400 needs reconciliation. The correct rate for HSN 3004 is 12%. Vendor should file an amendment to GSTR-1 to correct the tax amount.".to_string(),
            graph_path: "Your Entity → GSTR-2B → INV-2025-003 (₹38,400 tax) → [MISMATCH] → Vendor GSTR-1 (₹36,000 tax) → SunPharma Industries".to_string(),
        },
    );

    map.insert(
        "INV-2025-004".to_string(),
        AuditExplanation {
            summary: "Invoice INV-2025-004 (₹12,00,000 taxable, ₹1,40,400 tax) from EID Parry India is completely absent from the vendor's GSTR-1 filing for July 2025. No e-Way Bill was generated for this shipment either.".to_string(),
            evidence: vec![
                "Invoice appears in your GSTR-2B for July 2025".to_string(),
                "EID Parry's GSTR-1 for July 2025: NO matching invoice found".to_string(),
                "e-Invoice IRN exists, confirming the supply was invoiced electronically".to_string(),
                "No e-Way Bill found for goods movement on this invoice".to_string(),
                "Vendor EID Parry has a risk score of 0.72 (High Risk) with 4 missed filings".to_string(),
            ],
            recommendation: "This represents a significant ITC risk of ₹1,40,400. The absence of both GSTR-1 entry and e-Way Bill raises compliance concerns. Escalate to vendor management for immediate resolution. Consider filing a complaint on the GST portal.".to_string(),
            graph_path: "Your Entity → GSTR-2B → INV-2025-004 → [MISSING: e-Way Bill] → [MISSING: Vendor GSTR-1] → EID Parry India".to_string(),
        },
    );

    map.insert(
        "INV-2025-009".to_string(),
        AuditExplanation {
            summary: "Invoice INV-2025-009 from Hindalco Industries has an HSN code mismatch. Your purchase register records HSN 7208 (flat-rolled steel) but the vendor's GSTR-1 reports HSN 7606 (aluminium plates and sheets).".to_string(),
            evidence: vec![
                "Your GSTR-2B entry: HSN 7208 - Flat-rolled products of iron or steel".to_string(),
                "Vendor's GSTR-1 entry: HSN 7606 - Aluminium plates, sheets and strip".to_string(),
                "Tax amount matches: ₹49,200 in both records".to_string(),
                "HSN classification affects applicable tax rate brackets".to_string(),
                "Hindalco has a moderate risk score of 0.35".to_string(),
            ],
            recommendation: "HSN mismatch may not affect ITC eligibility if tax amounts match, but needs correction for accurate reporting. Request vendor to verify correct HSN classification.".to_string(),
            graph_path: "Your Entity → GSTR-2B (HSN:7208) → INV-2025-009 → [HSN MISMATCH] → Vendor GSTR-1 (HSN:7606) → Hindalco Industries".to_string(),
        },
    );

    map
}
