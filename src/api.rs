// =============================================================================
// API MODULE
// =============================================================================
// The call contract the dashboard programs against: one namespace per domain,
// every function async, every answer an `ApiResult<T>`.
//
// Each call follows the same steps:
//   1. await the simulated delay (before touching the store)
//   2. read or mutate the store
//   3. wrap the result in the response envelope
//
// LEARNING NOTES:
// - Namespaces are small borrowed views (`UsersApi<'_>`), so
//   `api.users().get("user-001").await` reads like the dashboard's
//   `api.users.getUserById("user-001")`
// - Nothing here returns an error except lookups by an unknown id
// =============================================================================

use chrono::Utc;
use tracing::{debug, info};

use crate::aggregate::{
    summary_section, InventoryChartsData, OperationType, OrganizationLevel, SummarySectionData,
    SummaryTableData, WarehouseOperationsData,
};
use crate::dashboard::{
    apply_dashboard_filters, organization_chart, status_distribution_chart,
    value_by_organization_chart, ChartData, DashboardFilters, DashboardStats,
};
use crate::filter::FilterOptions;
use crate::latency::{CallWeight, Latency};
use crate::metrics;
use crate::models::*;
use crate::response::{ApiResponse, ApiResult};
use crate::store::MockStore;

/// Entry point to every namespace
#[derive(Debug, Clone)]
pub struct LogisticsApi {
    store: MockStore,
    latency: Latency,
}

impl LogisticsApi {
    pub fn new(store: MockStore, latency: Latency) -> Self {
        Self { store, latency }
    }

    pub fn store(&self) -> &MockStore {
        &self.store
    }

    async fn pause(&self) {
        self.latency.pause(CallWeight::Standard).await;
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { api: self }
    }

    pub fn equipment(&self) -> EquipmentApi<'_> {
        EquipmentApi { api: self }
    }

    pub fn materials(&self) -> MaterialsApi<'_> {
        MaterialsApi { api: self }
    }

    pub fn warehouses(&self) -> WarehousesApi<'_> {
        WarehousesApi { api: self }
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi { api: self }
    }

    pub fn reports(&self) -> ReportsApi<'_> {
        ReportsApi { api: self }
    }

    pub fn notifications(&self) -> NotificationsApi<'_> {
        NotificationsApi { api: self }
    }

    pub fn search(&self) -> SearchApi<'_> {
        SearchApi { api: self }
    }

    pub fn warehouse_operations(&self) -> WarehouseOperationsApi<'_> {
        WarehouseOperationsApi { api: self }
    }

    pub fn summary_table(&self) -> SummaryTableApi<'_> {
        SummaryTableApi { api: self }
    }

    pub fn inventory_charts(&self) -> InventoryChartsApi<'_> {
        InventoryChartsApi { api: self }
    }

    pub fn summary_section(&self) -> SummarySectionApi<'_> {
        SummarySectionApi { api: self }
    }
}

// =============================================================================
// USERS
// =============================================================================

pub struct UsersApi<'a> {
    api: &'a LogisticsApi,
}

impl UsersApi<'_> {
    pub async fn list(&self, options: FilterOptions) -> ApiResult<Vec<User>> {
        self.api.pause().await;
        let found = self.api.store.list_users(&options).await;
        debug!(total = found.total, "Listed users");
        Ok(ApiResponse::with_total(found.items, found.total).paged(options.page, options.limit))
    }

    pub async fn get(&self, id: &str) -> ApiResult<User> {
        self.api.pause().await;
        self.api.store.find_user(id).await.map(ApiResponse::wrap)
    }

    pub async fn create(&self, new_user: NewUser) -> ApiResult<User> {
        self.api.pause().await;
        let user = self.api.store.insert_user(new_user).await;
        info!(user_id = %user.id, role = ?user.role, "User created");
        Ok(ApiResponse::wrap(user))
    }

    pub async fn update(&self, id: &str, patch: UserPatch) -> ApiResult<User> {
        self.api.pause().await;
        let user = self.api.store.update_user(id, patch).await?;
        info!(user_id = %id, "User updated");
        Ok(ApiResponse::wrap(user))
    }

    pub async fn delete(&self, id: &str) -> ApiResult<MessageBody> {
        self.api.pause().await;
        self.api.store.remove_user(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(ApiResponse::wrap(MessageBody::new("Xóa người dùng thành công")))
    }
}

// =============================================================================
// EQUIPMENT
// =============================================================================

pub struct EquipmentApi<'a> {
    api: &'a LogisticsApi,
}

impl EquipmentApi<'_> {
    pub async fn list(&self, options: FilterOptions) -> ApiResult<Vec<Equipment>> {
        self.api.pause().await;
        let found = self.api.store.list_equipment(&options).await;
        debug!(total = found.total, "Listed equipment");
        Ok(ApiResponse::with_total(found.items, found.total).paged(options.page, options.limit))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Equipment> {
        self.api.pause().await;
        self.api.store.find_equipment(id).await.map(ApiResponse::wrap)
    }

    /// New equipment always starts with an empty maintenance history
    pub async fn create(&self, new_equipment: NewEquipment) -> ApiResult<Equipment> {
        self.api.pause().await;
        let equipment = self.api.store.insert_equipment(new_equipment).await;
        info!(equipment_id = %equipment.id, code = %equipment.code, "Equipment registered");
        Ok(ApiResponse::wrap(equipment))
    }

    pub async fn update(&self, id: &str, patch: EquipmentPatch) -> ApiResult<Equipment> {
        self.api.pause().await;
        let equipment = self.api.store.update_equipment(id, patch).await?;
        info!(equipment_id = %id, status = equipment.status.as_str(), "Equipment updated");
        Ok(ApiResponse::wrap(equipment))
    }

    pub async fn delete(&self, id: &str) -> ApiResult<MessageBody> {
        self.api.pause().await;
        self.api.store.remove_equipment(id).await?;
        info!(equipment_id = %id, "Equipment deleted");
        Ok(ApiResponse::wrap(MessageBody::new("Xóa trang bị thành công")))
    }

    pub async fn by_type(&self, kind: EquipmentType) -> ApiResult<Vec<Equipment>> {
        self.api.pause().await;
        let items = self.api.store.equipment_by_type(kind).await;
        let total = items.len();
        Ok(ApiResponse::with_total(items, total))
    }
}

// =============================================================================
// MATERIALS
// =============================================================================

pub struct MaterialsApi<'a> {
    api: &'a LogisticsApi,
}

impl MaterialsApi<'_> {
    pub async fn list(&self, options: FilterOptions) -> ApiResult<Vec<Material>> {
        self.api.pause().await;
        let found = self.api.store.list_materials(&options).await;
        debug!(total = found.total, "Listed materials");
        Ok(ApiResponse::with_total(found.items, found.total).paged(options.page, options.limit))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Material> {
        self.api.pause().await;
        self.api.store.find_material(id).await.map(ApiResponse::wrap)
    }

    pub async fn low_stock(&self) -> ApiResult<Vec<Material>> {
        self.api.pause().await;
        let items = self.api.store.low_stock_materials().await;
        let total = items.len();
        metrics::set_low_stock_count(total);
        Ok(ApiResponse::with_total(items, total))
    }

    // -------------------------------------------------------------------------
    // STOCK UPDATE
    // -------------------------------------------------------------------------
    /// Apply a signed delta to a material's stock
    ///
    /// - positive delta: an "in" movement
    /// - zero or negative delta: an "out" movement of |delta|
    ///
    /// `totalValue` is recomputed from the new stock and the unit cost.
    pub async fn update_stock(&self, id: &str, request: StockUpdateRequest) -> ApiResult<Material> {
        self.api.pause().await;

        info!(
            material_id = %id,
            delta = request.quantity,
            reason = %request.reason,
            "Adjusting stock"
        );

        let material = self
            .api
            .store
            .adjust_stock(id, request.quantity, &request.reason)
            .await?;

        if let Some(movement) = material.stock_movements.last() {
            metrics::record_stock_movement(&material.id, movement.kind);
        }
        metrics::set_stock_level(&material.id, &material.location, material.current_stock);
        metrics::set_low_stock_count(self.api.store.low_stock_materials().await.len());

        if material.is_low_stock() {
            tracing::warn!(
                material_id = %material.id,
                current_stock = material.current_stock,
                min_stock = material.min_stock,
                "Material at or below minimum stock"
            );
        }

        Ok(ApiResponse::wrap(material))
    }
}

// =============================================================================
// WAREHOUSES
// =============================================================================

pub struct WarehousesApi<'a> {
    api: &'a LogisticsApi,
}

impl WarehousesApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Warehouse>> {
        self.api.pause().await;
        let items = self.api.store.warehouses().await;
        let total = items.len();
        Ok(ApiResponse::with_total(items, total))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Warehouse> {
        self.api.pause().await;
        self.api.store.find_warehouse(id).await.map(ApiResponse::wrap)
    }
}

// =============================================================================
// DASHBOARD
// =============================================================================

pub struct DashboardApi<'a> {
    api: &'a LogisticsApi,
}

impl DashboardApi<'_> {
    pub async fn stats(&self, filters: &DashboardFilters) -> ApiResult<DashboardStats> {
        self.api.pause().await;
        let dashboard = self.api.store.dashboard();
        debug!(?filters, "Building dashboard stats");
        Ok(ApiResponse::wrap(apply_dashboard_filters(&dashboard.stats, filters)))
    }

    pub async fn organization_chart(&self, filters: &DashboardFilters) -> ApiResult<ChartData> {
        self.api.pause().await;
        let dashboard = self.api.store.dashboard();
        Ok(ApiResponse::wrap(organization_chart(
            &dashboard.organization_chart,
            &dashboard.stats,
            filters,
        )))
    }

    pub async fn status_distribution_chart(&self, filters: &DashboardFilters) -> ApiResult<ChartData> {
        self.api.pause().await;
        let dashboard = self.api.store.dashboard();
        Ok(ApiResponse::wrap(status_distribution_chart(
            &dashboard.status_distribution_chart,
            &dashboard.stats,
            filters,
        )))
    }

    pub async fn value_by_organization_chart(&self, filters: &DashboardFilters) -> ApiResult<ChartData> {
        self.api.pause().await;
        let dashboard = self.api.store.dashboard();
        Ok(ApiResponse::wrap(value_by_organization_chart(
            &dashboard.value_by_organization_chart,
            &dashboard.stats,
            filters,
        )))
    }

    /// The trend series has no per-period breakdown, so filters don't change it
    pub async fn monthly_trend_chart(&self, filters: &DashboardFilters) -> ApiResult<ChartData> {
        self.api.pause().await;
        debug!(period = ?filters.period, "Monthly trend requested");
        Ok(ApiResponse::wrap(self.api.store.dashboard().monthly_trend_chart.clone()))
    }
}

// =============================================================================
// REPORTS
// =============================================================================

pub struct ReportsApi<'a> {
    api: &'a LogisticsApi,
}

impl ReportsApi<'_> {
    pub async fn list(&self, options: FilterOptions) -> ApiResult<Vec<Report>> {
        self.api.pause().await;
        let found = self.api.store.list_reports(&options).await;
        Ok(ApiResponse::with_total(found.items, found.total).paged(options.page, options.limit))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Report> {
        self.api.pause().await;
        self.api.store.find_report(id).await.map(ApiResponse::wrap)
    }

    pub async fn generate(&self, request: GenerateReportRequest) -> ApiResult<Report> {
        self.api.latency.pause(CallWeight::Heavy).await;
        let report = self.api.store.insert_report(request).await;
        info!(report_id = %report.id, kind = report.kind.as_str(), "Report generated");
        Ok(ApiResponse::wrap(report))
    }
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

pub struct NotificationsApi<'a> {
    api: &'a LogisticsApi,
}

impl NotificationsApi<'_> {
    pub async fn list(&self) -> ApiResult<Vec<Notification>> {
        self.api.pause().await;
        let items = self.api.store.notifications().await;
        let total = items.len();
        Ok(ApiResponse::with_total(items, total))
    }

    pub async fn mark_read(&self, id: &str) -> ApiResult<MessageBody> {
        self.api.pause().await;
        self.api.store.mark_notification_read(id).await?;
        metrics::set_unread_count(self.api.store.unread_count().await);
        debug!(notification_id = %id, "Notification marked read");
        Ok(ApiResponse::wrap(MessageBody::new("Đã đánh dấu đã đọc")))
    }

    pub async fn unread_count(&self) -> ApiResult<CountBody> {
        self.api.latency.pause(CallWeight::Light).await;
        let count = self.api.store.unread_count().await;
        metrics::set_unread_count(count);
        Ok(ApiResponse::wrap(CountBody { count }))
    }
}

// =============================================================================
// SEARCH
// =============================================================================

pub struct SearchApi<'a> {
    api: &'a LogisticsApi,
}

impl SearchApi<'_> {
    pub async fn global(&self, query: &str) -> ApiResult<SearchResults> {
        self.api.pause().await;
        let results = self.api.store.search(query).await;
        debug!(query, total = results.total, "Global search");
        Ok(ApiResponse::wrap(results))
    }

    pub async fn suggestions(&self, query: &str) -> ApiResult<Vec<String>> {
        self.api.latency.pause(CallWeight::Light).await;
        Ok(ApiResponse::wrap(self.api.store.suggestions(query)))
    }
}

// =============================================================================
// ORGANIZATION-LEVEL VIEWS
// =============================================================================
// The `_with_filters` variants accept dashboard filters but only use their
// presence: the views are synthesized from base figures and have nothing to
// slice, so a filtered request just gets a fresh `lastUpdated`.

pub struct WarehouseOperationsApi<'a> {
    api: &'a LogisticsApi,
}

impl WarehouseOperationsApi<'_> {
    pub async fn get(&self, level: OrganizationLevel) -> ApiResult<WarehouseOperationsData> {
        self.api.pause().await;
        Ok(ApiResponse::wrap(self.api.store.warehouse_operations(level)))
    }

    pub async fn get_with_filters(
        &self,
        level: OrganizationLevel,
        filters: Option<&DashboardFilters>,
    ) -> ApiResult<WarehouseOperationsData> {
        self.api.pause().await;
        let mut data = self.api.store.warehouse_operations(level);
        if filters.is_some() {
            data.last_updated = Utc::now();
        }
        Ok(ApiResponse::wrap(data))
    }
}

pub struct SummaryTableApi<'a> {
    api: &'a LogisticsApi,
}

impl SummaryTableApi<'_> {
    pub async fn get(&self, level: OrganizationLevel) -> ApiResult<SummaryTableData> {
        self.api.pause().await;
        Ok(ApiResponse::wrap(self.api.store.summary_table(level)))
    }

    pub async fn get_with_filters(
        &self,
        level: OrganizationLevel,
        filters: Option<&DashboardFilters>,
    ) -> ApiResult<SummaryTableData> {
        self.api.pause().await;
        let mut data = self.api.store.summary_table(level);
        if filters.is_some() {
            data.last_updated = Utc::now();
        }
        Ok(ApiResponse::wrap(data))
    }
}

pub struct InventoryChartsApi<'a> {
    api: &'a LogisticsApi,
}

impl InventoryChartsApi<'_> {
    pub async fn get(&self, level: OrganizationLevel, operation: OperationType) -> ApiResult<InventoryChartsData> {
        self.api.pause().await;
        Ok(ApiResponse::wrap(self.api.store.inventory_charts(level, operation)))
    }

    pub async fn get_with_filters(
        &self,
        level: OrganizationLevel,
        operation: OperationType,
        filters: Option<&DashboardFilters>,
    ) -> ApiResult<InventoryChartsData> {
        self.api.pause().await;
        let mut data = self.api.store.inventory_charts(level, operation);
        if filters.is_some() {
            data.last_updated = Utc::now();
        }
        Ok(ApiResponse::wrap(data))
    }
}

pub struct SummarySectionApi<'a> {
    api: &'a LogisticsApi,
}

impl SummarySectionApi<'_> {
    /// Donut charts for a warehouse filter key ("all", "k92", ...)
    pub async fn get(&self, warehouse: &str) -> ApiResult<SummarySectionData> {
        self.api.pause().await;
        Ok(ApiResponse::wrap(summary_section(warehouse)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::StatusKind;
    use crate::fixtures::Fixtures;
    use chrono::TimeZone;

    fn api() -> LogisticsApi {
        LogisticsApi::new(MockStore::new(Fixtures::sample()), Latency::None)
    }

    fn new_user() -> NewUser {
        NewUser {
            name: "Hoàng Văn E".to_string(),
            email: "hoangvane@military.vn".to_string(),
            role: UserRole::Operator,
            department: "Kho vật tư".to_string(),
            position: "Thủ kho".to_string(),
            avatar: None,
            is_active: true,
            last_login: None,
        }
    }

    #[tokio::test]
    async fn test_user_lifecycle() {
        let api = api();

        let created = api.users().create(new_user()).await.unwrap().data;
        assert!(created.id.starts_with("user-"));

        let patch = UserPatch {
            position: Some("Trưởng kho".to_string()),
            ..UserPatch::default()
        };
        let updated = api.users().update(&created.id, patch).await.unwrap().data;
        assert_eq!(updated.position, "Trưởng kho");
        assert_eq!(updated.email, created.email);

        let deleted = api.users().delete(&created.id).await.unwrap();
        assert_eq!(deleted.data.message, "Xóa người dùng thành công");

        let err = api.users().get(&created.id).await.unwrap_err();
        assert_eq!(err.code(), "USER_NOT_FOUND");
        assert_eq!(err.to_response().message, "Người dùng không tồn tại");
    }

    #[tokio::test]
    async fn test_list_echoes_pagination() {
        let api = api();

        let defaults = api.users().list(FilterOptions::default()).await.unwrap();
        assert_eq!(defaults.total, Some(4));
        assert_eq!(defaults.page, Some(1));
        assert_eq!(defaults.limit, Some(10));
        assert_eq!(defaults.data.len(), 4);

        let second = api
            .equipment()
            .list(FilterOptions::default().page(2, 3))
            .await
            .unwrap();
        assert_eq!(second.total, Some(4));
        assert_eq!(second.page, Some(2));
        assert_eq!(second.limit, Some(3));
        assert_eq!(second.data.len(), 1);
        assert_eq!(second.data[0].id, "eq-004");
    }

    #[tokio::test]
    async fn test_equipment_filters() {
        let api = api();

        let active = api
            .equipment()
            .list(FilterOptions::default().status("active"))
            .await
            .unwrap();
        assert_eq!(active.total, Some(3));

        let vehicles = api.equipment().by_type(EquipmentType::Vehicle).await.unwrap();
        assert_eq!(vehicles.total, Some(1));
        assert_eq!(vehicles.data[0].code, "PT-001");

        // Users have no status field, so a status predicate matches none
        let users = api
            .users()
            .list(FilterOptions::default().status("active"))
            .await
            .unwrap();
        assert_eq!(users.total, Some(0));
    }

    #[tokio::test]
    async fn test_update_stock_inbound() {
        let api = api();

        let request = StockUpdateRequest {
            quantity: 2500,
            reason: "Nhập kho bổ sung".to_string(),
        };
        let material = api.materials().update_stock("mt-001", request).await.unwrap().data;

        assert_eq!(material.current_stock, 17_500);
        assert_eq!(material.total_value, 17_500 * 2_500);
        assert_eq!(material.stock_movements.len(), 2);

        let movement = &material.stock_movements[1];
        assert_eq!(movement.kind, MovementType::In);
        assert_eq!(movement.quantity, 2500);
        assert_eq!(movement.reason, "Nhập kho bổ sung");
    }

    #[tokio::test]
    async fn test_update_stock_unknown_material() {
        let request = StockUpdateRequest {
            quantity: 1,
            reason: "x".to_string(),
        };
        let err = api().materials().update_stock("mt-404", request).await.unwrap_err();
        assert_eq!(err.code(), "MATERIAL_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_unknown_ids_per_namespace() {
        let api = api();

        assert_eq!(api.equipment().get("eq-404").await.unwrap_err().code(), "EQUIPMENT_NOT_FOUND");
        assert_eq!(api.warehouses().get("wh-404").await.unwrap_err().code(), "WAREHOUSE_NOT_FOUND");
        assert_eq!(api.reports().get("rpt-404").await.unwrap_err().code(), "REPORT_NOT_FOUND");
        assert_eq!(
            api.notifications().mark_read("notif-404").await.unwrap_err().code(),
            "NOTIFICATION_NOT_FOUND"
        );

        let warehouse = api.warehouses().get("wh-001").await.unwrap().data;
        assert_eq!(warehouse.sections.len(), 2);
    }

    #[tokio::test]
    async fn test_notifications() {
        let api = api();

        assert_eq!(api.notifications().unread_count().await.unwrap().data.count, 2);

        let body = api.notifications().mark_read("notif-002").await.unwrap();
        assert_eq!(body.data.message, "Đã đánh dấu đã đọc");
        assert_eq!(api.notifications().unread_count().await.unwrap().data.count, 1);

        let all = api.notifications().list().await.unwrap();
        assert_eq!(all.total, Some(4));
    }

    #[tokio::test]
    async fn test_report_generation() {
        let api = api();
        let period = Period {
            from: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            to: Utc.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap(),
        };

        let report = api
            .reports()
            .generate(GenerateReportRequest {
                kind: ReportType::Usage,
                period,
            })
            .await
            .unwrap()
            .data;
        assert!(report.id.starts_with("rpt-"));
        assert_eq!(report.generated_by, "Nguyễn Văn A");
        assert_eq!(report.summary, "Báo cáo đã được tạo thành công");

        let completed = api
            .reports()
            .list(FilterOptions::default().status("completed"))
            .await
            .unwrap();
        assert_eq!(completed.total, Some(2));

        let by_type = api
            .reports()
            .list(FilterOptions::default().search("MAINTENANCE"))
            .await
            .unwrap();
        assert_eq!(by_type.total, Some(1));
        assert_eq!(by_type.data[0].id, "rpt-002");
    }

    #[tokio::test]
    async fn test_dashboard_filters() {
        let api = api();
        let filters = DashboardFilters {
            organization_levels: vec![OrganizationLevel::Command, OrganizationLevel::Unit],
            statuses: vec![StatusKind::ReadyCombat],
            period: None,
        };

        let stats = api.dashboard().stats(&filters).await.unwrap().data;
        assert_eq!(stats.organizations.len(), 2);
        assert!(stats.organizations.iter().all(|o| o.statuses.len() == 1));

        let chart = api.dashboard().organization_chart(&filters).await.unwrap().data;
        assert_eq!(chart.datasets[0].data, vec![6200.0, 1500.0]);

        let unfiltered = api
            .dashboard()
            .monthly_trend_chart(&DashboardFilters::default())
            .await
            .unwrap()
            .data;
        assert_eq!(unfiltered.labels.len(), 7);
        assert_eq!(unfiltered.datasets.len(), 2);
    }

    #[tokio::test]
    async fn test_search_namespace() {
        let api = api();

        let results = api.search().global("kamaz").await.unwrap().data;
        assert_eq!(results.equipment.len(), 1);
        assert_eq!(results.total, 1);

        let suggestions = api.search().suggestions("pin").await.unwrap().data;
        assert_eq!(suggestions, vec!["Pin AA"]);
    }

    #[tokio::test]
    async fn test_filtered_views_refresh_timestamp() {
        let built = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let api = LogisticsApi::new(MockStore::built_at(Fixtures::sample(), built), Latency::None);
        let filters = DashboardFilters::default();

        let plain = api.summary_table().get(OrganizationLevel::Division).await.unwrap().data;
        assert_eq!(plain.last_updated, built);

        let refreshed = api
            .summary_table()
            .get_with_filters(OrganizationLevel::Division, Some(&filters))
            .await
            .unwrap()
            .data;
        assert!(refreshed.last_updated > built);
        assert_eq!(refreshed.current_balance, plain.current_balance);

        let untouched = api
            .warehouse_operations()
            .get_with_filters(OrganizationLevel::Unit, None)
            .await
            .unwrap()
            .data;
        assert_eq!(untouched.last_updated, built);

        let charts = api
            .inventory_charts()
            .get_with_filters(OrganizationLevel::Total, OperationType::Outbound, Some(&filters))
            .await
            .unwrap()
            .data;
        assert_eq!(charts.operation_type, OperationType::Outbound);
        assert!(charts.last_updated > built);
    }

    #[tokio::test]
    async fn test_summary_section_namespace() {
        let data = api().summary_section().get("k97").await.unwrap().data;
        assert_eq!(data.multiplier, 0.6);
        assert!(!data.charts.is_empty());
    }
}
