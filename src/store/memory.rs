//! 追加式内存数据集 — 注入到服务层的显式存储对象
//!
//! 集合只增不改不删; axum 并发服务, 所以用 RwLock 把
//! 单写者假设落到显式同步上。ID 铸造与追加必须同锁完成。

use crate::models::{Alert, AuditExplanation, Invoice, Vendor};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// 三个源集合的一次快照 (摄取边界的交换单位)
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub vendors: Vec<Vendor>,
    pub invoices: Vec<Invoice>,
    pub alerts: Vec<Alert>,
}

const ALERT_FEED_LIMIT: usize = 20;

pub struct MemoryStore {
    data: RwLock<Dataset>,
    explanations: RwLock<HashMap<String, AuditExplanation>>,
}

impl MemoryStore {
    pub fn new(data: Dataset, explanations: HashMap<String, AuditExplanation>) -> Self {
        Self {
            data: RwLock::new(data),
            explanations: RwLock::new(explanations),
        }
    }

    // 写者 panic 不会留下改了一半的记录 (追加先构造后 push),
    // 所以污染标记直接摘掉继续用
    fn read(&self) -> RwLockReadGuard<'_, Dataset> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Dataset> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn explanations_read(&self) -> RwLockReadGuard<'_, HashMap<String, AuditExplanation>> {
        self.explanations.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn explanations_write(&self) -> RwLockWriteGuard<'_, HashMap<String, AuditExplanation>> {
        self.explanations.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn vendors(&self) -> Vec<Vendor> {
        self.read().vendors.clone()
    }

    pub fn invoices(&self) -> Vec<Invoice> {
        self.read().invoices.clone()
    }

    /// 最新在前, 最多 20 条
    pub fn alerts(&self) -> Vec<Alert> {
        self.read().alerts.iter().take(ALERT_FEED_LIMIT).cloned().collect()
    }

    /// 供派生管线一次锁内取两个集合, 避免撕裂快照
    pub fn snapshot(&self) -> (Vec<Vendor>, Vec<Invoice>) {
        let data = self.read();
        (data.vendors.clone(), data.invoices.clone())
    }

    pub fn vendor_count(&self) -> usize {
        self.read().vendors.len()
    }

    pub fn invoice_count(&self) -> usize {
        self.read().invoices.len()
    }

    pub fn find_vendor(&self, vendor_id: &str) -> Option<Vendor> {
        self.read().vendors.iter().find(|v| v.id == vendor_id).cloned()
    }

    /// 计数读取与追加在同一把写锁内完成, 并发建档不会铸出重复 ID
    pub fn append_vendor(&self, make: impl FnOnce(usize) -> Vendor) -> Vendor {
        let mut data = self.write();
        let vendor = make(data.vendors.len());
        data.vendors.push(vendor.clone());
        vendor
    }

    /// 同上, 发票侧
    pub fn append_invoice(&self, make: impl FnOnce(usize) -> Invoice) -> Invoice {
        let mut data = self.write();
        let invoice = make(data.invoices.len());
        data.invoices.push(invoice.clone());
        invoice
    }

    /// 上游已定案的记录原样落盘 (ID 由上游铸造)
    pub fn push_vendor(&self, vendor: Vendor) {
        self.write().vendors.push(vendor);
    }

    pub fn push_invoice(&self, invoice: Invoice) {
        self.write().invoices.push(invoice);
    }

    pub fn push_alert(&self, alert: Alert) {
        self.write().alerts.insert(0, alert);
    }

    pub fn explanation(&self, invoice_id: &str) -> Option<AuditExplanation> {
        self.explanations_read().get(invoice_id).cloned()
    }

    pub fn insert_explanation(&self, invoice_id: String, explanation: AuditExplanation) {
        self.explanations_write().insert(invoice_id, explanation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AlertKind, VendorStatus};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn vendor(id: &str) -> Vendor {
        Vendor {
            id: id.to_string(),
            gstin: "29AABCU9603R1ZM".to_string(),
            name: "Vendor".to_string(),
            state: "Karnataka".to_string(),
            risk_score: 0.1,
            status: VendorStatus::Compliant,
            total_transactions: 100,
            missed_filings: 0,
            avg_days_late: 0,
        }
    }

    #[test]
    fn alerts_are_newest_first_and_capped() {
        let store = MemoryStore::new(Dataset::default(), HashMap::new());
        for i in 0..25 {
            store.push_alert(Alert::now(AlertKind::Info, format!("alert {i}")));
        }
        let feed = store.alerts();
        assert_eq!(feed.len(), 20);
        assert_eq!(feed[0].message, "alert 24");
        assert_eq!(feed[19].message, "alert 5");
    }

    #[test]
    fn collections_are_append_only_in_order() {
        let store = MemoryStore::new(Dataset::default(), HashMap::new());
        assert_eq!(store.vendor_count(), 0);
        assert!(store.find_vendor("V001").is_none());
        assert!(store.explanation("INV-2025-001").is_none());
    }

    #[test]
    fn concurrent_appends_mint_unique_ids() {
        let store = Arc::new(MemoryStore::new(Dataset::default(), HashMap::new()));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = Arc::clone(&store);
            handles.push(std::thread::spawn(move || {
                for _ in 0..50 {
                    store.append_vendor(|n| vendor(&format!("V{:03}", n + 1)));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let ids: HashSet<String> = store.vendors().iter().map(|v| v.id.clone()).collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.vendor_count(), 400);
    }

    #[test]
    fn store_survives_a_panicked_writer() {
        let store = Arc::new(MemoryStore::new(Dataset::default(), HashMap::new()));
        store.push_alert(Alert::now(AlertKind::Info, "before".to_string()));
        let poisoner = Arc::clone(&store);
        let result = std::thread::spawn(move || {
            poisoner.append_vendor(|_| panic!("writer died"));
        })
        .join();
        assert!(result.is_err());
        assert_eq!(store.vendor_count(), 0);
        assert_eq!(store.alerts().len(), 1);
        store.push_alert(Alert::now(AlertKind::Info, "after".to_string()));
        assert_eq!(store.alerts()[0].message, "after");
    }
}
