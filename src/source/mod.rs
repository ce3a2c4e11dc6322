//! 上游数据源客户端 — 三个读端点并行拉取, 任一失败即整体回退种子数据
//!
//! 无重试、无退避、无部分合并; 失败只体现为 offline 标志加一条日志。

use crate::error::{ReconcileError, Result};
use crate::models::{Alert, Invoice, InvoiceDraft, Vendor, VendorDraft};
use crate::store::{seed_dataset, Dataset};
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

pub struct UpstreamClient {
    base_url: String,
    http: Client,
}

/// 上游写端点的响应体 (服务端富化后的记录 + 伴生告警)
#[derive(Debug, Deserialize)]
pub struct StoredVendor {
    pub vendor: Vendor,
    pub alert: Alert,
}

#[derive(Debug, Deserialize)]
pub struct StoredInvoice {
    pub invoice: Invoice,
    pub alert: Alert,
}

impl UpstreamClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    async fn get_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    pub async fn fetch_vendors(&self) -> Result<Vec<Vendor>> {
        self.get_list("/api/vendors").await
    }

    pub async fn fetch_invoices(&self) -> Result<Vec<Invoice>> {
        self.get_list("/api/invoices").await
    }

    pub async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        self.get_list("/api/alerts").await
    }

    /// 三个集合并行拉取; 全部成功才算一份可用快照
    pub async fn fetch_dataset(&self) -> Result<Dataset> {
        let (vendors, invoices, alerts) = futures::try_join!(
            self.fetch_vendors(),
            self.fetch_invoices(),
            self.fetch_alerts(),
        )?;
        Ok(Dataset {
            vendors,
            invoices,
            alerts,
        })
    }

    async fn post<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self.http.post(&url).json(body).send().await?;
        if response.status().is_client_error() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(ReconcileError::Rejected(format!("{status}: {detail}")));
        }
        Ok(response.error_for_status()?.json().await?)
    }

    pub async fn push_vendor(&self, draft: &VendorDraft) -> Result<StoredVendor> {
        self.post("/api/vendors", draft).await
    }

    pub async fn push_invoice(&self, draft: &InvoiceDraft) -> Result<StoredInvoice> {
        self.post("/api/invoices", draft).await
    }
}

/// 启动时装载数据集: 上游可达用上游, 否则整体换成静态种子。
/// 返回 (数据集, 是否在线)。
pub async fn load_initial(upstream: Option<&UpstreamClient>) -> (Dataset, bool) {
    match upstream {
        Some(client) => match client.fetch_dataset().await {
            Ok(dataset) => {
                info!(
                    "Loaded upstream dataset: {} vendors, {} invoices, {} alerts",
                    dataset.vendors.len(),
                    dataset.invoices.len(),
                    dataset.alerts.len()
                );
                (dataset, true)
            }
            Err(e) => {
                warn!("Upstream unreachable, using fallback dataset: {e}");
                (seed_dataset(), false)
            }
        },
        None => {
            info!("No upstream configured, using fallback dataset");
            (seed_dataset(), false)
        }
    }
}
