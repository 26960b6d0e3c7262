// =============================================================================
// HANDLERS MODULE
// =============================================================================
// This module contains all HTTP request handlers (controller layer).
//
// LEARNING NOTES:
// - Handlers are async functions that receive requests and return responses
// - Axum uses "extractors" to parse request data (path params, JSON body, etc.)
// - State is shared via the State<T> extractor
//
// Every /api/v1 handler is a thin adapter: extract, call the matching
// LogisticsApi function, record the request metric, return the envelope.
// A not-found error becomes a 404 with the failure envelope (error.rs).
// =============================================================================

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Instant;

use crate::aggregate::{
    InventoryChartsData, OperationType, OrganizationLevel, SummarySectionData, SummaryTableData,
    WarehouseOperationsData,
};
use crate::dashboard::{ChartData, DashboardFilters, DashboardStats, StatusKind};
use crate::error::{AppError, AppResult};
use crate::filter::FilterOptions;
use crate::metrics;
use crate::models::*;
use crate::response::{ApiResponse, ApiResult};
use crate::AppState;

type Reply<T> = AppResult<Json<ApiResponse<T>>>;

/// Record the request metric and hand the envelope to axum
fn respond<T>(method: &str, endpoint: &str, start: Instant, result: ApiResult<T>) -> Reply<T> {
    let status = match &result {
        Ok(_) => 200,
        Err(err) => err.status().as_u16(),
    };
    metrics::record_http_request(method, endpoint, status, start.elapsed().as_secs_f64());
    result.map(Json)
}

// =============================================================================
// EXTRACTORS
// =============================================================================
// axum's own extractors reject with a plain-text body. These wrap them so a
// bad path, query or body answers with the failure envelope like every other
// /api/v1 error.

#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

// =============================================================================
// HEALTH CHECK & METRICS
// =============================================================================

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "logistics-dashboard-service".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Prometheus metrics in text exposition format
///
/// GET /metrics
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// Dashboard query. Lists are comma-separated; unknown entries are skipped.
///
/// # Example
/// GET /api/v1/dashboard/stats?organizationLevels=command,unit&statuses=repair
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub organization_levels: Option<String>,
    pub statuses: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

fn split_list<T>(raw: &Option<String>, parse: fn(&str) -> Option<T>) -> Vec<T> {
    raw.as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter_map(parse)
        .collect()
}

impl DashboardQuery {
    /// True when the caller sent no dashboard parameter at all
    pub fn is_empty(&self) -> bool {
        self.organization_levels.is_none()
            && self.statuses.is_none()
            && self.from.is_none()
            && self.to.is_none()
    }

    /// A period is only set when both ends are given
    pub fn to_filters(&self) -> DashboardFilters {
        DashboardFilters {
            organization_levels: split_list(&self.organization_levels, OrganizationLevel::parse),
            statuses: split_list(&self.statuses, StatusKind::parse),
            period: self.from.zip(self.to).map(|(from, to)| Period { from, to }),
        }
    }
}

/// Query for the organization-level views; dashboard filters are flattened in
#[derive(Debug, Default, Deserialize)]
pub struct ViewQuery {
    #[serde(default)]
    pub operation: Option<OperationType>,
    #[serde(flatten)]
    pub filters: DashboardQuery,
}

impl ViewQuery {
    fn filters(&self) -> Option<DashboardFilters> {
        (!self.filters.is_empty()).then(|| self.filters.to_filters())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// USERS
// =============================================================================

/// GET /api/v1/users?search=&page=&limit=
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    ApiQuery(options): ApiQuery<FilterOptions>,
) -> Reply<Vec<User>> {
    let start = Instant::now();
    let result = state.api.users().list(options).await;
    respond("GET", "/api/v1/users", start, result)
}

/// GET /api/v1/users/:id
pub async fn get_user(State(state): State<Arc<AppState>>, ApiPath(id): ApiPath<String>) -> Reply<User> {
    let start = Instant::now();
    let result = state.api.users().get(&id).await;
    respond("GET", "/api/v1/users/:id", start, result)
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(new_user): ApiJson<NewUser>,
) -> Reply<User> {
    let start = Instant::now();
    let result = state.api.users().create(new_user).await;
    respond("POST", "/api/v1/users", start, result)
}

/// PUT /api/v1/users/:id
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Reply<User> {
    let start = Instant::now();
    let result = state.api.users().update(&id, patch).await;
    respond("PUT", "/api/v1/users/:id", start, result)
}

/// DELETE /api/v1/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<MessageBody> {
    let start = Instant::now();
    let result = state.api.users().delete(&id).await;
    respond("DELETE", "/api/v1/users/:id", start, result)
}

// =============================================================================
// EQUIPMENT
// =============================================================================

/// GET /api/v1/equipment?search=&category=&status=&page=&limit=
pub async fn list_equipment(
    State(state): State<Arc<AppState>>,
    ApiQuery(options): ApiQuery<FilterOptions>,
) -> Reply<Vec<Equipment>> {
    let start = Instant::now();
    let result = state.api.equipment().list(options).await;
    respond("GET", "/api/v1/equipment", start, result)
}

/// GET /api/v1/equipment/:id
pub async fn get_equipment(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<Equipment> {
    let start = Instant::now();
    let result = state.api.equipment().get(&id).await;
    respond("GET", "/api/v1/equipment/:id", start, result)
}

/// POST /api/v1/equipment
pub async fn create_equipment(
    State(state): State<Arc<AppState>>,
    ApiJson(new_equipment): ApiJson<NewEquipment>,
) -> Reply<Equipment> {
    let start = Instant::now();
    let result = state.api.equipment().create(new_equipment).await;
    respond("POST", "/api/v1/equipment", start, result)
}

/// PUT /api/v1/equipment/:id
pub async fn update_equipment(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(patch): ApiJson<EquipmentPatch>,
) -> Reply<Equipment> {
    let start = Instant::now();
    let result = state.api.equipment().update(&id, patch).await;
    respond("PUT", "/api/v1/equipment/:id", start, result)
}

/// DELETE /api/v1/equipment/:id
pub async fn delete_equipment(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<MessageBody> {
    let start = Instant::now();
    let result = state.api.equipment().delete(&id).await;
    respond("DELETE", "/api/v1/equipment/:id", start, result)
}

/// GET /api/v1/equipment/type/:type
pub async fn equipment_by_type(
    State(state): State<Arc<AppState>>,
    ApiPath(kind): ApiPath<EquipmentType>,
) -> Reply<Vec<Equipment>> {
    let start = Instant::now();
    let result = state.api.equipment().by_type(kind).await;
    respond("GET", "/api/v1/equipment/type/:type", start, result)
}

// =============================================================================
// MATERIALS
// =============================================================================

/// GET /api/v1/materials?search=&category=&page=&limit=
pub async fn list_materials(
    State(state): State<Arc<AppState>>,
    ApiQuery(options): ApiQuery<FilterOptions>,
) -> Reply<Vec<Material>> {
    let start = Instant::now();
    let result = state.api.materials().list(options).await;
    respond("GET", "/api/v1/materials", start, result)
}

/// GET /api/v1/materials/:id
pub async fn get_material(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<Material> {
    let start = Instant::now();
    let result = state.api.materials().get(&id).await;
    respond("GET", "/api/v1/materials/:id", start, result)
}

/// GET /api/v1/materials/low-stock
pub async fn low_stock_materials(State(state): State<Arc<AppState>>) -> Reply<Vec<Material>> {
    let start = Instant::now();
    let result = state.api.materials().low_stock().await;
    respond("GET", "/api/v1/materials/low-stock", start, result)
}

/// Adjust a material's stock by a signed quantity
///
/// POST /api/v1/materials/:id/stock
///
/// # Request Body
/// ```json
/// { "quantity": -250, "reason": "Cấp phát huấn luyện" }
/// ```
pub async fn update_material_stock(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
    ApiJson(request): ApiJson<StockUpdateRequest>,
) -> Reply<Material> {
    let start = Instant::now();
    let result = state.api.materials().update_stock(&id, request).await;
    respond("POST", "/api/v1/materials/:id/stock", start, result)
}

// =============================================================================
// WAREHOUSES
// =============================================================================

/// GET /api/v1/warehouses
pub async fn list_warehouses(State(state): State<Arc<AppState>>) -> Reply<Vec<Warehouse>> {
    let start = Instant::now();
    let result = state.api.warehouses().list().await;
    respond("GET", "/api/v1/warehouses", start, result)
}

/// GET /api/v1/warehouses/:id
pub async fn get_warehouse(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<Warehouse> {
    let start = Instant::now();
    let result = state.api.warehouses().get(&id).await;
    respond("GET", "/api/v1/warehouses/:id", start, result)
}

// =============================================================================
// DASHBOARD
// =============================================================================

/// GET /api/v1/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Reply<DashboardStats> {
    let start = Instant::now();
    let result = state.api.dashboard().stats(&query.to_filters()).await;
    respond("GET", "/api/v1/dashboard/stats", start, result)
}

/// GET /api/v1/dashboard/charts/organization
pub async fn organization_chart(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Reply<ChartData> {
    let start = Instant::now();
    let result = state.api.dashboard().organization_chart(&query.to_filters()).await;
    respond("GET", "/api/v1/dashboard/charts/organization", start, result)
}

/// GET /api/v1/dashboard/charts/status-distribution
pub async fn status_distribution_chart(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Reply<ChartData> {
    let start = Instant::now();
    let result = state
        .api
        .dashboard()
        .status_distribution_chart(&query.to_filters())
        .await;
    respond("GET", "/api/v1/dashboard/charts/status-distribution", start, result)
}

/// GET /api/v1/dashboard/charts/value-by-organization
pub async fn value_by_organization_chart(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Reply<ChartData> {
    let start = Instant::now();
    let result = state
        .api
        .dashboard()
        .value_by_organization_chart(&query.to_filters())
        .await;
    respond("GET", "/api/v1/dashboard/charts/value-by-organization", start, result)
}

/// GET /api/v1/dashboard/charts/monthly-trend
pub async fn monthly_trend_chart(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<DashboardQuery>,
) -> Reply<ChartData> {
    let start = Instant::now();
    let result = state.api.dashboard().monthly_trend_chart(&query.to_filters()).await;
    respond("GET", "/api/v1/dashboard/charts/monthly-trend", start, result)
}

// =============================================================================
// REPORTS
// =============================================================================

/// GET /api/v1/reports?search=&status=&page=&limit=
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    ApiQuery(options): ApiQuery<FilterOptions>,
) -> Reply<Vec<Report>> {
    let start = Instant::now();
    let result = state.api.reports().list(options).await;
    respond("GET", "/api/v1/reports", start, result)
}

/// GET /api/v1/reports/:id
pub async fn get_report(State(state): State<Arc<AppState>>, ApiPath(id): ApiPath<String>) -> Reply<Report> {
    let start = Instant::now();
    let result = state.api.reports().get(&id).await;
    respond("GET", "/api/v1/reports/:id", start, result)
}

/// Generate a report (slow on purpose)
///
/// POST /api/v1/reports/generate
///
/// # Request Body
/// ```json
/// { "type": "inventory", "period": { "from": "2024-01-01T00:00:00Z", "to": "2024-01-31T00:00:00Z" } }
/// ```
pub async fn generate_report(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<GenerateReportRequest>,
) -> Reply<Report> {
    let start = Instant::now();
    let result = state.api.reports().generate(request).await;
    respond("POST", "/api/v1/reports/generate", start, result)
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// GET /api/v1/notifications
pub async fn list_notifications(State(state): State<Arc<AppState>>) -> Reply<Vec<Notification>> {
    let start = Instant::now();
    let result = state.api.notifications().list().await;
    respond("GET", "/api/v1/notifications", start, result)
}

/// POST /api/v1/notifications/:id/read
pub async fn mark_notification_read(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<String>,
) -> Reply<MessageBody> {
    let start = Instant::now();
    let result = state.api.notifications().mark_read(&id).await;
    respond("POST", "/api/v1/notifications/:id/read", start, result)
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(State(state): State<Arc<AppState>>) -> Reply<CountBody> {
    let start = Instant::now();
    let result = state.api.notifications().unread_count().await;
    respond("GET", "/api/v1/notifications/unread-count", start, result)
}

// =============================================================================
// SEARCH
// =============================================================================

/// GET /api/v1/search?q=ak
pub async fn global_search(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Reply<SearchResults> {
    let start = Instant::now();
    let result = state.api.search().global(&params.q).await;
    respond("GET", "/api/v1/search", start, result)
}

/// GET /api/v1/search/suggestions?q=kho
pub async fn search_suggestions(
    State(state): State<Arc<AppState>>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Reply<Vec<String>> {
    let start = Instant::now();
    let result = state.api.search().suggestions(&params.q).await;
    respond("GET", "/api/v1/search/suggestions", start, result)
}

// =============================================================================
// ORGANIZATION-LEVEL VIEWS
// =============================================================================
// Any dashboard parameter on these routes selects the `_with_filters` variant.

/// GET /api/v1/warehouse-operations/:level
pub async fn warehouse_operations(
    State(state): State<Arc<AppState>>,
    ApiPath(level): ApiPath<OrganizationLevel>,
    ApiQuery(query): ApiQuery<ViewQuery>,
) -> Reply<WarehouseOperationsData> {
    let start = Instant::now();
    let ops = state.api.warehouse_operations();
    let result = match query.filters() {
        Some(filters) => ops.get_with_filters(level, Some(&filters)).await,
        None => ops.get(level).await,
    };
    respond("GET", "/api/v1/warehouse-operations/:level", start, result)
}

/// GET /api/v1/summary-table/:level
pub async fn summary_table(
    State(state): State<Arc<AppState>>,
    ApiPath(level): ApiPath<OrganizationLevel>,
    ApiQuery(query): ApiQuery<ViewQuery>,
) -> Reply<SummaryTableData> {
    let start = Instant::now();
    let table = state.api.summary_table();
    let result = match query.filters() {
        Some(filters) => table.get_with_filters(level, Some(&filters)).await,
        None => table.get(level).await,
    };
    respond("GET", "/api/v1/summary-table/:level", start, result)
}

/// GET /api/v1/inventory-charts/:level?operation=xuat
pub async fn inventory_charts(
    State(state): State<Arc<AppState>>,
    ApiPath(level): ApiPath<OrganizationLevel>,
    ApiQuery(query): ApiQuery<ViewQuery>,
) -> Reply<InventoryChartsData> {
    let start = Instant::now();
    let operation = query.operation.unwrap_or_default();
    let charts = state.api.inventory_charts();
    let result = match query.filters() {
        Some(filters) => charts.get_with_filters(level, operation, Some(&filters)).await,
        None => charts.get(level, operation).await,
    };
    respond("GET", "/api/v1/inventory-charts/:level", start, result)
}

/// GET /api/v1/summary-section/:warehouse
pub async fn summary_section(
    State(state): State<Arc<AppState>>,
    ApiPath(warehouse): ApiPath<String>,
) -> Reply<SummarySectionData> {
    let start = Instant::now();
    let result = state.api.summary_section().get(&warehouse).await;
    respond("GET", "/api/v1/summary-section/:warehouse", start, result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn test_malformed_body_rejects_with_envelope() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/materials/mt-001/stock")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"quantity": "lots"}"#))
            .unwrap();

        let err = match ApiJson::<StockUpdateRequest>::from_request(request, &()).await {
            Ok(_) => panic!("body should not parse"),
            Err(err) => err,
        };
        assert_eq!(err.code(), "INVALID_REQUEST");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_query_and_path_reject_with_envelope() {
        let (mut parts, _) = Request::builder()
            .uri("/api/v1/users?page=abc")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let err = match ApiQuery::<FilterOptions>::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("query should not parse"),
            Err(err) => err,
        };
        assert_eq!(err.code(), "INVALID_REQUEST");

        // No route matched, so there are no path params to read
        let err = match ApiPath::<OrganizationLevel>::from_request_parts(&mut parts, &()).await {
            Ok(_) => panic!("path should not parse"),
            Err(err) => err,
        };
        assert_eq!(err.to_response().code.as_deref(), Some("INVALID_REQUEST"));
    }

    #[test]
    fn test_dashboard_query_parses_lists() {
        let query = DashboardQuery {
            organization_levels: Some("command, unit,bogus".to_string()),
            statuses: Some("repair".to_string()),
            from: None,
            to: None,
        };
        let filters = query.to_filters();

        assert_eq!(
            filters.organization_levels,
            vec![OrganizationLevel::Command, OrganizationLevel::Unit]
        );
        assert_eq!(filters.statuses, vec![StatusKind::Repair]);
        assert!(filters.period.is_none());
        assert!(!query.is_empty());
    }

    #[test]
    fn test_empty_query_means_no_filters() {
        let query = DashboardQuery::default();
        assert!(query.is_empty());
        assert_eq!(query.to_filters(), DashboardFilters::default());

        let view = ViewQuery::default();
        assert!(view.filters().is_none());
    }

    #[test]
    fn test_period_needs_both_ends() {
        let from: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let to: DateTime<Utc> = "2024-01-31T00:00:00Z".parse().unwrap();

        let half = DashboardQuery {
            from: Some(from),
            ..DashboardQuery::default()
        };
        assert!(half.to_filters().period.is_none());

        let full = DashboardQuery {
            from: Some(from),
            to: Some(to),
            ..DashboardQuery::default()
        };
        assert_eq!(full.to_filters().period, Some(Period { from, to }));
    }
}
