//! 核对服务 — 读视图、两条写入口、一条纯预测查询
//!
//! 所有派生结构 (KPI/错配分组/图谱) 都是锁内快照上的纯函数重算;
//! 评分与分类只走 service::risk / service::classify 这一份规范实现,
//! 在线与离线路径绝不各写一套公式。在线写入以上游定案的记录为准,
//! 本地只做镜像; 离线派生时 ID 铸造与追加同锁完成。

use crate::error::{ReconcileError, Result};
use crate::models::{
    Alert, AlertKind, AuditExplanation, GraphView, Invoice, InvoiceDraft, RiskFeatures, Vendor,
    VendorDraft, VendorStatus,
};
use crate::service::{aggregate, classify, explain, graph, risk};
use crate::source::{StoredInvoice, StoredVendor, UpstreamClient};
use crate::store::MemoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

/// 写入落点: 上游确认 / 仅本地
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaveMode {
    Online,
    LocalOnly,
}

/// 写入结果: 完整派生后的记录 + 伴生告警 + 落点
#[derive(Debug, Clone, Serialize)]
pub struct MutationOutcome<T> {
    pub record: T,
    pub alert: Alert,
    pub mode: SaveMode,
}

pub struct ReconcileService {
    store: Arc<MemoryStore>,
    upstream: Option<UpstreamClient>,
    online: bool,
}

impl ReconcileService {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            upstream: None,
            online: false,
        }
    }

    pub fn with_upstream(store: Arc<MemoryStore>, upstream: UpstreamClient, online: bool) -> Self {
        Self {
            store,
            upstream: Some(upstream),
            online,
        }
    }

    pub fn online(&self) -> bool {
        self.online
    }

    // ---- 读视图 (每次调用重算, 无缓存) ----

    pub fn vendors(&self) -> Vec<Vendor> {
        self.store.vendors()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.store.invoices()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.store.alerts()
    }

    pub fn mismatches(&self) -> Vec<Invoice> {
        aggregate::mismatches(&self.store.invoices())
    }

    pub fn mismatch_types(&self) -> Vec<aggregate::MismatchTypeSummary> {
        aggregate::mismatch_types(&self.mismatches())
    }

    pub fn kpi(&self) -> aggregate::KpiSummary {
        let (vendors, invoices) = self.store.snapshot();
        aggregate::kpi(&vendors, &invoices)
    }

    pub fn graph(&self) -> GraphView {
        let (vendors, invoices) = self.store.snapshot();
        graph::project(&vendors, &invoices)
    }

    pub fn explain(&self, invoice_id: &str) -> Option<AuditExplanation> {
        self.store.explanation(invoice_id)
    }

    // ---- 纯查询 ----

    pub fn predict_risk(&self, features: &RiskFeatures) -> risk::RiskAssessment {
        risk::assess(features)
    }

    // ---- 写入口 ----

    /// 建档: 上游接受写入时以其富化的记录和告警为准, 原样落盘;
    /// 否则本地按规范公式派生。上游 4xx 视为拒绝, 本地不落盘;
    /// 传输失败降级为仅本地保存。
    pub async fn add_vendor(&self, draft: VendorDraft) -> Result<MutationOutcome<Vendor>> {
        if let Some(stored) = self.push_upstream_vendor(&draft).await? {
            self.store.push_vendor(stored.vendor.clone());
            self.store.push_alert(stored.alert.clone());
            return Ok(MutationOutcome {
                record: stored.vendor,
                alert: stored.alert,
                mode: SaveMode::Online,
            });
        }

        let assessment = risk::assess(&draft.features());
        let vendor = self.store.append_vendor(|count| Vendor {
            id: format!("V{:03}", count + 1),
            gstin: draft.gstin,
            name: draft.name,
            state: draft.state,
            risk_score: (assessment.score * 100.0).round() / 100.0,
            status: assessment.status,
            total_transactions: draft.total_transactions.unwrap_or(0),
            missed_filings: draft.missed_filings,
            avg_days_late: draft.avg_days_late,
        });

        let kind = match vendor.status {
            VendorStatus::HighRisk => AlertKind::Critical,
            VendorStatus::Review => AlertKind::Warning,
            VendorStatus::Compliant => AlertKind::Success,
        };
        let alert = Alert::now(
            kind,
            format!(
                "New vendor {} added — Risk: {:.0}% ({})",
                vendor.name,
                assessment.score * 100.0,
                vendor.status
            ),
        );
        self.store.push_alert(alert.clone());
        Ok(MutationOutcome {
            record: vendor,
            alert,
            mode: SaveMode::LocalOnly,
        })
    }

    /// 入账: 派生字段 (totalTax/total/matchStatus/riskLevel) 一次性算定;
    /// 在线路径直接镜像上游定案的记录。
    pub async fn add_invoice(&self, draft: InvoiceDraft) -> Result<MutationOutcome<Invoice>> {
        if let Some(stored) = self.push_upstream_invoice(&draft).await? {
            if stored.invoice.is_mismatch() {
                let vendor = self.store.find_vendor(&stored.invoice.vendor_id);
                self.store.insert_explanation(
                    stored.invoice.id.clone(),
                    explain::explanation_for(&stored.invoice, vendor.as_ref()),
                );
            }
            self.store.push_invoice(stored.invoice.clone());
            self.store.push_alert(stored.alert.clone());
            return Ok(MutationOutcome {
                record: stored.invoice,
                alert: stored.alert,
                mode: SaveMode::Online,
            });
        }

        let match_status = classify::classify(draft.gstr1_reported, draft.gstr2b_reported);
        let total_tax = draft.cgst + draft.sgst + draft.igst;
        let vendor = self.store.find_vendor(&draft.vendor_id);

        let invoice = self.store.append_invoice(|count| Invoice {
            id: format!("INV-2025-{:03}", count + 1),
            vendor_id: draft.vendor_id,
            vendor_name: vendor
                .as_ref()
                .map(|v| v.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            gstin: vendor.as_ref().map(|v| v.gstin.clone()).unwrap_or_default(),
            date: draft.date,
            taxable_amount: draft.taxable_amount,
            cgst: draft.cgst,
            sgst: draft.sgst,
            igst: draft.igst,
            total_tax,
            total: draft.taxable_amount + total_tax,
            hsn: draft.hsn,
            period: draft.period,
            gstr1_reported: draft.gstr1_reported,
            gstr2b_reported: draft.gstr2b_reported,
            e_invoice: draft.e_invoice,
            e_way_bill: draft.e_way_bill,
            match_status,
            risk_level: classify::risk_level(match_status),
        });

        let alert = if invoice.is_mismatch() {
            // 错配即刻生成审计说明, 供查表接口返回
            self.store.insert_explanation(
                invoice.id.clone(),
                explain::explanation_for(&invoice, vendor.as_ref()),
            );
            Alert::now(
                AlertKind::Critical,
                format!(
                    "Mismatch: {} from {} — {} (₹{} tax)",
                    invoice.id,
                    invoice.vendor_name,
                    invoice.match_status,
                    explain::format_inr(invoice.total_tax)
                ),
            )
        } else {
            Alert::now(
                AlertKind::Success,
                format!("Invoice {} from {} matched", invoice.id, invoice.vendor_name),
            )
        };

        self.store.push_alert(alert.clone());
        Ok(MutationOutcome {
            record: invoice,
            alert,
            mode: SaveMode::LocalOnly,
        })
    }

    /// 在线时把草稿推给上游; Some = 上游定案的记录, None = 走本地路径
    async fn push_upstream_vendor(&self, draft: &VendorDraft) -> Result<Option<StoredVendor>> {
        let Some(upstream) = self.upstream.as_ref().filter(|_| self.online) else {
            return Ok(None);
        };
        match upstream.push_vendor(draft).await {
            Ok(stored) => Ok(Some(stored)),
            Err(ReconcileError::Rejected(msg)) => Err(ReconcileError::Rejected(msg)),
            Err(e) => {
                warn!("Upstream vendor write failed, keeping record locally: {e}");
                Ok(None)
            }
        }
    }

    async fn push_upstream_invoice(&self, draft: &InvoiceDraft) -> Result<Option<StoredInvoice>> {
        let Some(upstream) = self.upstream.as_ref().filter(|_| self.online) else {
            return Ok(None);
        };
        match upstream.push_invoice(draft).await {
            Ok(stored) => Ok(Some(stored)),
            Err(ReconcileError::Rejected(msg)) => Err(ReconcileError::Rejected(msg)),
            Err(e) => {
                warn!("Upstream invoice write failed, keeping record locally: {e}");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchStatus;
    use crate::store::{seed_dataset, seed_explanations};
    use std::collections::HashSet;

    fn offline_service() -> ReconcileService {
        let store = Arc::new(MemoryStore::new(seed_dataset(), seed_explanations()));
        ReconcileService::new(store)
    }

    #[tokio::test]
    async fn add_vendor_derives_score_and_status_once() {
        let service = offline_service();
        let outcome = service
            .add_vendor(VendorDraft {
                name: "Ashok Leyland".to_string(),
                gstin: "33AAACA1234L1Z5".to_string(),
                state: "Tamil Nadu".to_string(),
                total_transactions: Some(30),
                missed_filings: 6,
                avg_days_late: 20,
            })
            .await
            .unwrap();
        assert_eq!(outcome.record.id, "V021");
        assert_eq!(outcome.mode, SaveMode::LocalOnly);
        assert!((outcome.record.risk_score - 0.70).abs() < 1e-9); // 0.704 rounded to 2dp
        assert_eq!(outcome.record.status, VendorStatus::HighRisk);
        assert_eq!(outcome.alert.kind, AlertKind::Critical);
        assert_eq!(service.vendors().len(), 21);
        assert_eq!(service.alerts()[0].message, outcome.alert.message);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_vendor_writes_mint_unique_ids() {
        let service = Arc::new(offline_service());
        let barrier = Arc::new(tokio::sync::Barrier::new(8));
        let mut handles = Vec::new();
        for i in 0..8 {
            let service = Arc::clone(&service);
            let barrier = Arc::clone(&barrier);
            handles.push(tokio::spawn(async move {
                barrier.wait().await;
                service
                    .add_vendor(VendorDraft {
                        name: format!("Vendor {i}"),
                        gstin: format!("29AABCV{i:03}0R1ZM"),
                        state: "Karnataka".to_string(),
                        total_transactions: Some(100),
                        missed_filings: 0,
                        avg_days_late: 0,
                    })
                    .await
                    .unwrap()
                    .record
                    .id
            }));
        }
        let mut ids = HashSet::new();
        for handle in handles {
            let id = handle.await.unwrap();
            assert!(ids.insert(id.clone()), "duplicate id {id}");
        }
        assert_eq!(service.vendors().len(), 28); // 20 seeded + 8 new
    }

    #[tokio::test]
    async fn add_invoice_for_unknown_vendor_degrades_gracefully() {
        let service = offline_service();
        let outcome = service
            .add_invoice(InvoiceDraft {
                vendor_id: "V999".to_string(),
                date: "2025-09-20".to_string(),
                taxable_amount: 1000.0,
                cgst: 90.0,
                sgst: 90.0,
                igst: 0.0,
                hsn: "7208".to_string(),
                period: "2025-09".to_string(),
                gstr1_reported: true,
                gstr2b_reported: true,
                e_invoice: true,
                e_way_bill: true,
            })
            .await
            .unwrap();
        assert_eq!(outcome.record.vendor_name, "Unknown");
        assert_eq!(outcome.record.gstin, "");
        assert_eq!(outcome.record.match_status, MatchStatus::Matched);
        assert_eq!(outcome.alert.kind, AlertKind::Success);
    }

    #[tokio::test]
    async fn predict_risk_does_not_mutate_collections() {
        let service = offline_service();
        let before = (service.vendors().len(), service.invoices().len(), service.alerts().len());
        let assessment = service.predict_risk(&RiskFeatures {
            missed_filings: 6,
            avg_days_late: 20,
            total_transactions: Some(30),
        });
        assert!((assessment.score - 0.704).abs() < 1e-9);
        assert_eq!(assessment.status, VendorStatus::HighRisk);
        let after = (service.vendors().len(), service.invoices().len(), service.alerts().len());
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn mismatched_invoice_gains_an_explanation() {
        let service = offline_service();
        let outcome = service
            .add_invoice(InvoiceDraft {
                vendor_id: "V005".to_string(),
                date: "2025-09-21".to_string(),
                taxable_amount: 200_000.0,
                cgst: 18_000.0,
                sgst: 18_000.0,
                igst: 0.0,
                hsn: "7208".to_string(),
                period: "2025-09".to_string(),
                gstr1_reported: false,
                gstr2b_reported: true,
                e_invoice: true,
                e_way_bill: true,
            })
            .await
            .unwrap();
        assert_eq!(outcome.record.match_status, MatchStatus::MissingInGstr1);
        let explanation = service.explain(&outcome.record.id);
        assert!(explanation.is_some());
        assert!(service.explain("INV-0000-000").is_none());
    }
}
