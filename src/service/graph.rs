//! 图谱投影 — 供应商/发票/申报表的节点边视图, 每次调用全量重建

use crate::models::{
    EdgeKind, GraphEdge, GraphNode, GraphView, Invoice, NodeGroup, ReturnType, Vendor,
};
use chrono::NaiveDate;
use std::collections::HashSet;

const MAX_LABEL_CHARS: usize = 14;

/// 供应商名超过 14 字符截成 13 字符加省略号
fn vendor_label(name: &str) -> String {
    if name.chars().count() > MAX_LABEL_CHARS {
        let truncated: String = name.chars().take(MAX_LABEL_CHARS - 1).collect();
        format!("{truncated}…")
    } else {
        name.to_string()
    }
}

/// "2025-07" → "Jul 25"; 解析失败时原样返回
fn month_label(period: &str) -> String {
    NaiveDate::parse_from_str(&format!("{period}-01"), "%Y-%m-%d")
        .map(|d| d.format("%b %y").to_string())
        .unwrap_or_else(|_| period.to_string())
}

/// "INV-2025-007" → "INV-007"
fn invoice_label(id: &str) -> String {
    let parts: Vec<&str> = id.split('-').collect();
    match parts.as_slice() {
        [prefix, _year, seq] => format!("{prefix}-{seq}"),
        _ => id.to_string(),
    }
}

/// 发票号末三位, 作 IRN / EWB 节点标签
fn last3(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    chars[chars.len().saturating_sub(3)..].iter().collect()
}

fn gstr_node_id(return_type: ReturnType, period: &str) -> String {
    format!("g-{return_type}-{period}")
}

/// 全量投影: 每个供应商、发票、实际被引用的 (申报表, 期间) 组合
/// 以及可选的 e-Invoice / e-Way Bill 各成一个节点; 关系成有向边。
///
/// 边的两端必须都在本次产出的节点集里, 悬挂引用直接丢弃。
pub fn project(vendors: &[Vendor], invoices: &[Invoice]) -> GraphView {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();

    let mut vendor_ids: HashSet<&str> = HashSet::new();
    for v in vendors {
        let mut node = GraphNode::new(
            format!("v-{}", v.id),
            vendor_label(&v.name),
            NodeGroup::Vendor,
        );
        node.gstin = Some(v.gstin.clone());
        node.risk = Some(v.risk_score);
        node.state = Some(v.state.clone());
        node.status = Some(v.status.to_string());
        nodes.push(node);
        vendor_ids.insert(v.id.as_str());
    }

    // 只为实际被某张发票引用的期间建申报表节点
    let mut gstr_ids: HashSet<String> = HashSet::new();
    let mut seen_periods: HashSet<&str> = HashSet::new();
    for inv in invoices {
        if inv.period.is_empty() || !seen_periods.insert(inv.period.as_str()) {
            continue;
        }
        for rt in ReturnType::ALL {
            let id = gstr_node_id(rt, &inv.period);
            let mut node = GraphNode::new(
                id.clone(),
                format!("{rt} {}", month_label(&inv.period)),
                NodeGroup::Gstr,
            );
            node.return_type = Some(rt);
            node.period = Some(inv.period.clone());
            nodes.push(node);
            gstr_ids.insert(id);
        }
    }

    for inv in invoices {
        let inv_node_id = format!("i-{}", inv.id);
        let mut node = GraphNode::new(inv_node_id.clone(), invoice_label(&inv.id), NodeGroup::Invoice);
        node.amount = Some(inv.total);
        node.match_status = Some(inv.match_status);
        let flag = if inv.is_mismatch() { "flagged" } else { "matched" };
        node.status = Some(flag.to_string());
        nodes.push(node);

        if vendor_ids.contains(inv.vendor_id.as_str()) {
            edges.push(GraphEdge {
                source: format!("v-{}", inv.vendor_id),
                target: inv_node_id.clone(),
                label: "ISSUED",
                kind: EdgeKind::Issued,
            });
        }
        if inv.gstr2b_reported && !inv.period.is_empty() {
            let g2 = gstr_node_id(ReturnType::Gstr2b, &inv.period);
            if gstr_ids.contains(&g2) {
                edges.push(GraphEdge {
                    source: inv_node_id.clone(),
                    target: g2,
                    label: "IN_2B",
                    kind: EdgeKind::Reported,
                });
            }
        }
        if inv.gstr1_reported && !inv.period.is_empty() {
            let g1 = gstr_node_id(ReturnType::Gstr1, &inv.period);
            if gstr_ids.contains(&g1) {
                edges.push(GraphEdge {
                    source: inv_node_id.clone(),
                    target: g1,
                    label: "IN_1",
                    kind: EdgeKind::Reported,
                });
            }
        }
        if inv.e_invoice {
            let e_id = format!("e-{}", inv.id);
            nodes.push(GraphNode::new(
                e_id.clone(),
                format!("IRN-{}", last3(&inv.id)),
                NodeGroup::EInvoice,
            ));
            edges.push(GraphEdge {
                source: inv_node_id.clone(),
                target: e_id,
                label: "E_INV",
                kind: EdgeKind::EInvoice,
            });
        }
        if inv.e_way_bill {
            let w_id = format!("w-{}", inv.id);
            nodes.push(GraphNode::new(
                w_id.clone(),
                format!("EWB-{}", last3(&inv.id)),
                NodeGroup::EWayBill,
            ));
            edges.push(GraphEdge {
                source: inv_node_id,
                target: w_id,
                label: "EWB",
                kind: EdgeKind::EWayBill,
            });
        }
    }

    GraphView { nodes, edges }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MatchStatus, RiskLevel, VendorStatus};
    use std::collections::HashSet;

    fn vendor(id: &str, name: &str) -> Vendor {
        Vendor {
            id: id.to_string(),
            gstin: "36AAACH7409R1ZK".to_string(),
            name: name.to_string(),
            state: "Telangana".to_string(),
            risk_score: 0.78,
            status: VendorStatus::HighRisk,
            total_transactions: 67,
            missed_filings: 4,
            avg_days_late: 12,
        }
    }

    fn invoice(id: &str, vendor_id: &str, period: &str, gstr1: bool, gstr2b: bool) -> Invoice {
        Invoice {
            id: id.to_string(),
            vendor_id: vendor_id.to_string(),
            vendor_name: "Hyderabad Steels Pvt".to_string(),
            gstin: "36AAACH7409R1ZK".to_string(),
            date: "2025-07-15".to_string(),
            taxable_amount: 450_000.0,
            cgst: 40_500.0,
            sgst: 40_500.0,
            igst: 0.0,
            total_tax: 81_000.0,
            total: 531_000.0,
            hsn: "7208".to_string(),
            period: period.to_string(),
            gstr1_reported: gstr1,
            gstr2b_reported: gstr2b,
            e_invoice: true,
            e_way_bill: true,
            match_status: if !gstr1 && gstr2b {
                MatchStatus::MissingInGstr1
            } else {
                MatchStatus::Matched
            },
            risk_level: RiskLevel::High,
        }
    }

    fn assert_no_dangling(view: &GraphView) {
        let ids: HashSet<&str> = view.nodes.iter().map(|n| n.id.as_str()).collect();
        for e in &view.edges {
            assert!(ids.contains(e.source.as_str()), "dangling source {}", e.source);
            assert!(ids.contains(e.target.as_str()), "dangling target {}", e.target);
        }
    }

    #[test]
    fn every_edge_endpoint_exists() {
        let vendors = vec![vendor("V005", "Hyderabad Steels Pvt"), vendor("V001", "Tata Steel Ltd")];
        let invoices = vec![
            invoice("INV-2025-001", "V005", "2025-07", false, true),
            invoice("INV-2025-002", "V001", "2025-08", true, true),
            // 引用不存在的供应商: 不应产生 issued 边
            invoice("INV-2025-003", "V999", "2025-07", true, true),
        ];
        let view = project(&vendors, &invoices);
        assert_no_dangling(&view);
        let issued = view
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Issued)
            .count();
        assert_eq!(issued, 2);
    }

    #[test]
    fn gstr_nodes_cover_each_referenced_period_once() {
        let invoices = vec![
            invoice("INV-2025-001", "V005", "2025-07", false, true),
            invoice("INV-2025-002", "V005", "2025-07", true, true),
            invoice("INV-2025-003", "V005", "2025-08", true, true),
        ];
        let view = project(&[vendor("V005", "Hyderabad Steels Pvt")], &invoices);
        let gstr: Vec<&GraphNode> = view
            .nodes
            .iter()
            .filter(|n| n.group == NodeGroup::Gstr)
            .collect();
        assert_eq!(gstr.len(), 4); // 2 期间 × 2 表
        assert!(gstr.iter().any(|n| n.label == "GSTR-1 Jul 25"));
        assert!(gstr.iter().any(|n| n.label == "GSTR-2B Aug 25"));
    }

    #[test]
    fn flagged_invoice_skips_gstr1_edge() {
        let view = project(
            &[vendor("V005", "Hyderabad Steels Pvt")],
            &[invoice("INV-2025-001", "V005", "2025-07", false, true)],
        );
        let reported: Vec<&GraphEdge> = view
            .edges
            .iter()
            .filter(|e| e.kind == EdgeKind::Reported)
            .collect();
        assert_eq!(reported.len(), 1);
        assert_eq!(reported[0].target, "g-GSTR-2B-2025-07");
    }

    #[test]
    fn long_vendor_names_are_truncated() {
        let view = project(&[vendor("V001", "Hindustan Aeronautics Limited")], &[]);
        assert_eq!(view.nodes[0].label, "Hindustan Aer…");
        let short = project(&[vendor("V002", "Tata Steel")], &[]);
        assert_eq!(short.nodes[0].label, "Tata Steel");
    }

    #[test]
    fn invoice_labels_drop_the_year() {
        assert_eq!(invoice_label("INV-2025-007"), "INV-007");
        assert_eq!(invoice_label("FREEFORM"), "FREEFORM");
    }

    #[test]
    fn unparseable_period_falls_back_to_raw_label() {
        assert_eq!(month_label("not-a-period"), "not-a-period");
        assert_eq!(month_label("2025-07"), "Jul 25");
    }

    #[test]
    fn hiding_vendors_drops_their_edges() {
        let vendors = vec![vendor("V005", "Hyderabad Steels Pvt")];
        let invoices = vec![invoice("INV-2025-001", "V005", "2025-07", false, true)];
        let view = project(&vendors, &invoices);
        let filtered = view.retain_groups(&[
            NodeGroup::Invoice,
            NodeGroup::Gstr,
            NodeGroup::EInvoice,
            NodeGroup::EWayBill,
        ]);
        assert_no_dangling(&filtered);
        assert!(filtered.nodes.iter().all(|n| n.group != NodeGroup::Vendor));
        assert!(filtered.edges.iter().all(|e| e.kind != EdgeKind::Issued));
        // 其余边保持完整
        assert!(filtered.edges.iter().any(|e| e.kind == EdgeKind::Reported));
    }
}
