use axum::{
    routing::{get, post},
    Router,
};
use gst_reconcile_core::{api, source, AppConfig, MemoryStore, ReconcileService, UpstreamClient};
use gst_reconcile_core::store::seed_explanations;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 使用本地时间格式
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::from_env();
    info!("Starting server with config: {:?}", config);

    // 上游可达则用上游快照, 否则整体回退种子数据
    let upstream = config
        .upstream
        .base_url
        .as_deref()
        .map(UpstreamClient::new);
    let (dataset, online) = source::load_initial(upstream.as_ref()).await;
    info!(
        "Dataset ready ({} mode)",
        if online { "upstream" } else { "fallback" }
    );

    let store = Arc::new(MemoryStore::new(dataset, seed_explanations()));
    let service = Arc::new(match upstream {
        Some(client) => ReconcileService::with_upstream(store, client, online),
        None => ReconcileService::new(store),
    });

    // 构建路由
    let app = Router::new()
        .route("/health", get(api::health_check))
        .route("/", get(api::service_info))
        .route("/api/vendors", get(api::get_vendors).post(api::add_vendor))
        .route("/api/invoices", get(api::get_invoices).post(api::add_invoice))
        .route("/api/alerts", get(api::get_alerts))
        .route("/api/mismatches", get(api::get_mismatches))
        .route("/api/mismatch-types", get(api::get_mismatch_types))
        .route("/api/stats", get(api::get_stats))
        .route("/api/graph", get(api::get_graph))
        .route("/api/predict-risk", post(api::predict_risk))
        .route("/api/explain/:invoice_id", get(api::explain_invoice))
        .with_state(service)
        .layer(ServiceBuilder::new());

    // 启动服务器
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET  /api/vendors | /api/invoices | /api/alerts");
    info!("  GET  /api/mismatches | /api/mismatch-types | /api/stats | /api/graph");
    info!("  POST /api/vendors | /api/invoices | /api/predict-risk");
    info!("  GET  /api/explain/:invoice_id");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
