use crate::error::ReconcileError;
use crate::models::{
    Alert, AuditExplanation, GraphView, Invoice, InvoiceDraft, RiskFeatures, Vendor, VendorDraft,
    VendorStatus,
};
use crate::service::{KpiSummary, MismatchTypeSummary, ReconcileService, SaveMode};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// 服务横幅
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub service: &'static str,
    pub status: &'static str,
    pub mode: &'static str,
    pub version: &'static str,
}

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

/// 写入响应体 (记录 + 伴生告警 + 落点)
#[derive(Debug, Serialize)]
pub struct AddVendorResponse {
    pub vendor: Vendor,
    pub alert: Alert,
    pub mode: SaveMode,
}

#[derive(Debug, Serialize)]
pub struct AddInvoiceResponse {
    pub invoice: Invoice,
    pub alert: Alert,
    pub mode: SaveMode,
}

/// what-if 预测响应体
#[derive(Debug, Serialize)]
pub struct RiskPrediction {
    pub score: f64,
    pub status: VendorStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResponse {
    pub invoice_id: String,
    pub explanation: Option<AuditExplanation>,
}

fn mutation_error(e: ReconcileError) -> Response {
    let status = match &e {
        ReconcileError::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorResponse {
        success: false,
        message: format!("Error: {e}"),
    };
    (status, Json(body)).into_response()
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn service_info(State(service): State<Arc<ReconcileService>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service: "GST Reconcile Core",
        status: "online",
        mode: if service.online() { "upstream" } else { "fallback" },
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn get_vendors(State(service): State<Arc<ReconcileService>>) -> Json<Vec<Vendor>> {
    Json(service.vendors())
}

pub async fn get_invoices(State(service): State<Arc<ReconcileService>>) -> Json<Vec<Invoice>> {
    Json(service.invoices())
}

pub async fn get_alerts(State(service): State<Arc<ReconcileService>>) -> Json<Vec<Alert>> {
    Json(service.alerts())
}

pub async fn get_mismatches(State(service): State<Arc<ReconcileService>>) -> Json<Vec<Invoice>> {
    Json(service.mismatches())
}

pub async fn get_mismatch_types(
    State(service): State<Arc<ReconcileService>>,
) -> Json<Vec<MismatchTypeSummary>> {
    Json(service.mismatch_types())
}

pub async fn get_stats(State(service): State<Arc<ReconcileService>>) -> Json<KpiSummary> {
    Json(service.kpi())
}

pub async fn get_graph(State(service): State<Arc<ReconcileService>>) -> Json<GraphView> {
    Json(service.graph())
}

pub async fn add_vendor(
    State(service): State<Arc<ReconcileService>>,
    Json(draft): Json<VendorDraft>,
) -> Response {
    match service.add_vendor(draft).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AddVendorResponse {
                vendor: outcome.record,
                alert: outcome.alert,
                mode: outcome.mode,
            }),
        )
            .into_response(),
        Err(e) => mutation_error(e),
    }
}

pub async fn add_invoice(
    State(service): State<Arc<ReconcileService>>,
    Json(draft): Json<InvoiceDraft>,
) -> Response {
    match service.add_invoice(draft).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(AddInvoiceResponse {
                invoice: outcome.record,
                alert: outcome.alert,
                mode: outcome.mode,
            }),
        )
            .into_response(),
        Err(e) => mutation_error(e),
    }
}

pub async fn predict_risk(
    State(service): State<Arc<ReconcileService>>,
    Json(features): Json<RiskFeatures>,
) -> Json<RiskPrediction> {
    let assessment = service.predict_risk(&features);
    Json(RiskPrediction {
        score: (assessment.score * 10_000.0).round() / 10_000.0,
        status: assessment.status,
    })
}

pub async fn explain_invoice(
    State(service): State<Arc<ReconcileService>>,
    Path(invoice_id): Path<String>,
) -> Json<ExplainResponse> {
    let explanation = service.explain(&invoice_id);
    Json(ExplainResponse {
        invoice_id,
        explanation,
    })
}
