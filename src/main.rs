// =============================================================================
// LOGISTICS DASHBOARD SERVICE - Main Entry Point
// =============================================================================
// This is the main entry point for the logistics dashboard data service.
//
// WHAT THIS SERVICE DOES:
// - Serves equipment, materials, warehouses, reports and notifications to
//   the logistics dashboard from an in-memory mock store
// - Synthesizes per-organization-level statistics and chart series
// - Waits a configurable delay on every call to mimic a remote backend
// - Exposes Prometheus metrics for observability
//
// LEARNING GOALS:
// - Understand Rust async programming with Tokio
// - Learn Axum web framework patterns
// - Share mutable state safely across request handlers
// =============================================================================

// -----------------------------------------------------------------------------
// MODULE DECLARATIONS
// -----------------------------------------------------------------------------
mod aggregate; // Organization-level rollups (aggregate.rs)
mod api; // Namespaced call contract (api.rs)
mod config; // Configuration loading (config.rs)
mod dashboard; // Dashboard statistics and charts (dashboard.rs)
mod error; // Error types (error.rs)
mod filter; // Search / filter / paginate (filter.rs)
mod fixtures; // Seed data (fixtures.rs)
mod handlers; // HTTP request handlers (handlers.rs)
mod latency; // Simulated network delay (latency.rs)
mod metrics; // Prometheus metrics setup (metrics.rs)
mod models; // Data structures (models.rs)
mod response; // Response envelope (response.rs)
mod store; // In-memory store (store.rs)

// -----------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------
use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::LogisticsApi;
use crate::config::Config;
use crate::fixtures::Fixtures;
use crate::metrics::setup_metrics;
use crate::store::MockStore;

// -----------------------------------------------------------------------------
// APPLICATION STATE
// -----------------------------------------------------------------------------
// Shared by every request handler through State<Arc<AppState>>.
//
// LEARNING NOTE:
// The store inside `api` already wraps its collections in Arc<RwLock<..>>,
// so the outer Arc only saves cloning the struct per request.
#[derive(Clone)]
pub struct AppState {
    pub api: LogisticsApi,

    // Prometheus metrics handle
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

/// All routes, without middleware
fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // ----- Health & Metrics -----
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics_handler))
        // ----- Users -----
        .route(
            "/api/v1/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/v1/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // ----- Equipment -----
        .route(
            "/api/v1/equipment",
            get(handlers::list_equipment).post(handlers::create_equipment),
        )
        .route(
            "/api/v1/equipment/:id",
            get(handlers::get_equipment)
                .put(handlers::update_equipment)
                .delete(handlers::delete_equipment),
        )
        .route("/api/v1/equipment/type/:type", get(handlers::equipment_by_type))
        // ----- Materials -----
        .route("/api/v1/materials", get(handlers::list_materials))
        .route("/api/v1/materials/low-stock", get(handlers::low_stock_materials))
        .route("/api/v1/materials/:id", get(handlers::get_material))
        .route(
            "/api/v1/materials/:id/stock",
            post(handlers::update_material_stock),
        )
        // ----- Warehouses -----
        .route("/api/v1/warehouses", get(handlers::list_warehouses))
        .route("/api/v1/warehouses/:id", get(handlers::get_warehouse))
        // ----- Dashboard -----
        .route("/api/v1/dashboard/stats", get(handlers::dashboard_stats))
        .route(
            "/api/v1/dashboard/charts/organization",
            get(handlers::organization_chart),
        )
        .route(
            "/api/v1/dashboard/charts/status-distribution",
            get(handlers::status_distribution_chart),
        )
        .route(
            "/api/v1/dashboard/charts/value-by-organization",
            get(handlers::value_by_organization_chart),
        )
        .route(
            "/api/v1/dashboard/charts/monthly-trend",
            get(handlers::monthly_trend_chart),
        )
        // ----- Reports -----
        .route("/api/v1/reports", get(handlers::list_reports))
        .route("/api/v1/reports/generate", post(handlers::generate_report))
        .route("/api/v1/reports/:id", get(handlers::get_report))
        // ----- Notifications -----
        .route("/api/v1/notifications", get(handlers::list_notifications))
        .route(
            "/api/v1/notifications/unread-count",
            get(handlers::unread_count),
        )
        .route(
            "/api/v1/notifications/:id/read",
            post(handlers::mark_notification_read),
        )
        // ----- Search -----
        .route("/api/v1/search", get(handlers::global_search))
        .route(
            "/api/v1/search/suggestions",
            get(handlers::search_suggestions),
        )
        // ----- Organization-level views -----
        .route(
            "/api/v1/warehouse-operations/:level",
            get(handlers::warehouse_operations),
        )
        .route("/api/v1/summary-table/:level", get(handlers::summary_table))
        .route(
            "/api/v1/inventory-charts/:level",
            get(handlers::inventory_charts),
        )
        .route(
            "/api/v1/summary-section/:warehouse",
            get(handlers::summary_section),
        )
        .with_state(state)
}

// -----------------------------------------------------------------------------
// MAIN FUNCTION
// -----------------------------------------------------------------------------
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -------------------------------------------------------------------------
    // STEP 1: Load environment variables
    // -------------------------------------------------------------------------
    dotenvy::dotenv().ok(); // .ok() ignores errors (file might not exist)

    // -------------------------------------------------------------------------
    // STEP 2: Initialize logging/tracing
    // -------------------------------------------------------------------------
    // RUST_LOG controls log levels
    // Example: RUST_LOG=info,logistics_dashboard_service=debug
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,logistics_dashboard_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("Starting Logistics Dashboard Service...");

    // -------------------------------------------------------------------------
    // STEP 3: Load configuration
    // -------------------------------------------------------------------------
    let config = Config::from_env()?;
    info!(
        port = config.port,
        simulate_latency = config.simulate_latency,
        delay_ms = config.delay_ms,
        "Configuration loaded"
    );

    // -------------------------------------------------------------------------
    // STEP 4: Set up Prometheus metrics
    // -------------------------------------------------------------------------
    let metrics_handle = setup_metrics().context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics initialized");

    // -------------------------------------------------------------------------
    // STEP 5: Seed the mock store
    // -------------------------------------------------------------------------
    let store = MockStore::new(Fixtures::sample());
    let api = LogisticsApi::new(store, config.latency());

    // Publish the starting gauges so /metrics isn't empty before first use
    for material in api.store().list_materials(&Default::default()).await.items {
        metrics::set_stock_level(&material.id, &material.location, material.current_stock);
    }
    metrics::set_low_stock_count(api.store().low_stock_materials().await.len());
    metrics::set_unread_count(api.store().unread_count().await);
    let mismatches = api.store().dashboard().stats.total_mismatches();
    if !mismatches.is_empty() {
        debug!(?mismatches, "Authored totals differ from command + division + unit");
    }
    info!("Mock store seeded");

    // -------------------------------------------------------------------------
    // STEP 6: Create application state and routes
    // -------------------------------------------------------------------------
    let state = Arc::new(AppState {
        api,
        metrics_handle,
    });

    let app = router(state)
        // CORS layer: the dashboard is served from a different origin
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Trace layer: Log every request
        .layer(TraceLayer::new_for_http());

    // -------------------------------------------------------------------------
    // STEP 7: Start the HTTP server
    // -------------------------------------------------------------------------
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(address = %addr, "Logistics Dashboard Service is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
