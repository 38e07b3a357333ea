use analytics::AnalyticsEngine;
use axum::{routing::get, Router};
use configuration::{Config, ReportDefaults};
use core_types::SaleRecord;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
///
/// The record store is loaded once at startup and shared immutably; every
/// request re-runs the pipeline over it.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<Vec<SaleRecord>>,
    pub engine: AnalyticsEngine,
    pub defaults: ReportDefaults,
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    // Note: Tracing is initialized by the binary, not here, so different
    // subscribers never conflict.

    let records = ingestion::load_sales_file(&config.dataset.path)?;
    let app_state = Arc::new(AppState {
        records: Arc::new(records),
        engine: AnalyticsEngine::new(),
        defaults: config.report,
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/filters", get(handlers::get_filter_domain))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/kpis", get(handlers::get_kpis))
        .route("/api/revenue-series", get(handlers::get_revenue_series))
        .route("/api/ranking", get(handlers::get_ranking))
        .route("/api/leader-share", get(handlers::get_leader_share))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
