// =============================================================================
// STORE MODULE
// =============================================================================
// In-memory record collections plus the precomputed aggregate views.
//
// LEARNING NOTES:
// - Records live behind a tokio RwLock: many readers OR one writer
// - A write guard is never held across an .await, so overlapping updates
//   to the same material serialize and none of their movements are lost
// - Aggregate views never change after startup, so they sit outside the lock
//
// Wrapping the collections in a struct lets the API layer speak in domain
// operations (find, insert, adjust stock) instead of touching vectors.
// =============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::aggregate::{
    inventory_charts, summary_table, warehouse_operations, InventoryChartsData, OperationType,
    OrganizationLevel, SummaryTableData, WarehouseOperationsData,
};
use crate::error::{AppError, AppResult, Entity};
use crate::filter::{apply_filters, FilterOptions, Filtered};
use crate::fixtures::{DashboardFixtures, Fixtures};
use crate::models::*;

/// Name recorded on movements and reports created through the API
pub const ACTING_USER: &str = "Nguyễn Văn A";

const GLOBAL_SEARCH_LIMIT: usize = 5;
const SUGGESTION_LIMIT: usize = 10;

// -----------------------------------------------------------------------------
// RECORD IDS
// -----------------------------------------------------------------------------
/// Anything that can be looked up by id
trait Record {
    const ENTITY: Entity;
    fn id(&self) -> &str;
}

macro_rules! record {
    ($ty:ty, $entity:expr) => {
        impl Record for $ty {
            const ENTITY: Entity = $entity;
            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

record!(User, Entity::User);
record!(Equipment, Entity::Equipment);
record!(Material, Entity::Material);
record!(Warehouse, Entity::Warehouse);
record!(Report, Entity::Report);
record!(Notification, Entity::Notification);

fn find<'a, T: Record>(items: &'a [T], id: &str) -> AppResult<&'a T> {
    items
        .iter()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(T::ENTITY, id))
}

fn find_mut<'a, T: Record>(items: &'a mut [T], id: &str) -> AppResult<&'a mut T> {
    items
        .iter_mut()
        .find(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(T::ENTITY, id))
}

fn remove<T: Record>(items: &mut Vec<T>, id: &str) -> AppResult<T> {
    let index = items
        .iter()
        .position(|item| item.id() == id)
        .ok_or_else(|| AppError::not_found(T::ENTITY, id))?;
    Ok(items.remove(index))
}

/// `prefix-<uuid>`, matching the shape of the seeded ids
fn new_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

fn contains_lower(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

// -----------------------------------------------------------------------------
// STATE
// -----------------------------------------------------------------------------

#[derive(Debug)]
struct Records {
    users: Vec<User>,
    equipment: Vec<Equipment>,
    materials: Vec<Material>,
    warehouses: Vec<Warehouse>,
    reports: Vec<Report>,
    notifications: Vec<Notification>,
}

#[derive(Debug)]
struct Views {
    built_at: DateTime<Utc>,
    dashboard: DashboardFixtures,
    search_suggestions: Vec<String>,
    warehouse_operations: BTreeMap<OrganizationLevel, WarehouseOperationsData>,
    summary_tables: BTreeMap<OrganizationLevel, SummaryTableData>,
    inventory_charts: BTreeMap<(OrganizationLevel, OperationType), InventoryChartsData>,
}

impl Views {
    fn build(dashboard: DashboardFixtures, search_suggestions: Vec<String>, now: DateTime<Utc>) -> Self {
        let mut warehouse_ops = BTreeMap::new();
        let mut tables = BTreeMap::new();
        let mut charts = BTreeMap::new();

        for level in OrganizationLevel::ALL {
            warehouse_ops.insert(level, warehouse_operations(level, now));
            tables.insert(level, summary_table(level, now));
            for operation in OperationType::ALL {
                charts.insert((level, operation), inventory_charts(level, operation, now));
            }
        }

        Self {
            built_at: now,
            dashboard,
            search_suggestions,
            warehouse_operations: warehouse_ops,
            summary_tables: tables,
            inventory_charts: charts,
        }
    }
}

/// Shared handle to the mock data. Cloning is cheap; clones see the same data.
#[derive(Debug, Clone)]
pub struct MockStore {
    records: Arc<RwLock<Records>>,
    views: Arc<Views>,
}

impl MockStore {
    pub fn new(fixtures: Fixtures) -> Self {
        Self::built_at(fixtures, Utc::now())
    }

    /// Seed the store, stamping the aggregate views with `now`
    pub fn built_at(fixtures: Fixtures, now: DateTime<Utc>) -> Self {
        let Fixtures {
            users,
            equipment,
            materials,
            warehouses,
            reports,
            notifications,
            dashboard,
            search_suggestions,
        } = fixtures;

        tracing::debug!(
            users = users.len(),
            equipment = equipment.len(),
            materials = materials.len(),
            warehouses = warehouses.len(),
            "Seeding mock store"
        );

        Self {
            records: Arc::new(RwLock::new(Records {
                users,
                equipment,
                materials,
                warehouses,
                reports,
                notifications,
            })),
            views: Arc::new(Views::build(dashboard, search_suggestions, now)),
        }
    }

    // =========================================================================
    // USERS
    // =========================================================================

    pub async fn list_users(&self, options: &FilterOptions) -> Filtered<User> {
        apply_filters(&self.records.read().await.users, options)
    }

    pub async fn find_user(&self, id: &str) -> AppResult<User> {
        find(&self.records.read().await.users, id).cloned()
    }

    pub async fn insert_user(&self, new_user: NewUser) -> User {
        let user = new_user.into_user(new_id("user"), Utc::now());
        self.records.write().await.users.push(user.clone());
        user
    }

    pub async fn update_user(&self, id: &str, patch: UserPatch) -> AppResult<User> {
        let mut records = self.records.write().await;
        let user = find_mut(&mut records.users, id)?;
        patch.apply(user);
        Ok(user.clone())
    }

    pub async fn remove_user(&self, id: &str) -> AppResult<User> {
        remove(&mut self.records.write().await.users, id)
    }

    // =========================================================================
    // EQUIPMENT
    // =========================================================================

    pub async fn list_equipment(&self, options: &FilterOptions) -> Filtered<Equipment> {
        apply_filters(&self.records.read().await.equipment, options)
    }

    pub async fn find_equipment(&self, id: &str) -> AppResult<Equipment> {
        find(&self.records.read().await.equipment, id).cloned()
    }

    pub async fn equipment_by_type(&self, kind: EquipmentType) -> Vec<Equipment> {
        self.records
            .read()
            .await
            .equipment
            .iter()
            .filter(|e| e.kind == kind)
            .cloned()
            .collect()
    }

    pub async fn insert_equipment(&self, new_equipment: NewEquipment) -> Equipment {
        let equipment = new_equipment.into_equipment(new_id("eq"));
        self.records.write().await.equipment.push(equipment.clone());
        equipment
    }

    pub async fn update_equipment(&self, id: &str, patch: EquipmentPatch) -> AppResult<Equipment> {
        let mut records = self.records.write().await;
        let equipment = find_mut(&mut records.equipment, id)?;
        patch.apply(equipment);
        Ok(equipment.clone())
    }

    pub async fn remove_equipment(&self, id: &str) -> AppResult<Equipment> {
        remove(&mut self.records.write().await.equipment, id)
    }

    // =========================================================================
    // MATERIALS
    // =========================================================================

    pub async fn list_materials(&self, options: &FilterOptions) -> Filtered<Material> {
        apply_filters(&self.records.read().await.materials, options)
    }

    pub async fn find_material(&self, id: &str) -> AppResult<Material> {
        find(&self.records.read().await.materials, id).cloned()
    }

    pub async fn low_stock_materials(&self) -> Vec<Material> {
        self.records
            .read()
            .await
            .materials
            .iter()
            .filter(|m| m.is_low_stock())
            .cloned()
            .collect()
    }

    /// Apply a signed stock delta and record it in the movement ledger.
    ///
    /// Stock may go negative; the dashboard shows whatever the ledger says.
    pub async fn adjust_stock(&self, id: &str, delta: i64, reason: &str) -> AppResult<Material> {
        let mut records = self.records.write().await;
        let material = find_mut(&mut records.materials, id)?;

        // Everything is computed before the record changes, so a rejected
        // delta leaves stock, value and ledger untouched
        let (current_stock, total_value, quantity) = material
            .current_stock
            .checked_add(delta)
            .and_then(|stock| Some((stock, stock.checked_mul(material.unit_cost)?)))
            .and_then(|(stock, value)| Some((stock, value, delta.checked_abs()?)))
            .ok_or_else(|| AppError::stock_out_of_range(id))?;

        material.current_stock = current_stock;
        material.total_value = total_value;
        material.stock_movements.push(StockMovement {
            id: new_id("sm"),
            material_id: material.id.clone(),
            kind: if delta > 0 {
                MovementType::In
            } else {
                MovementType::Out
            },
            quantity,
            reason: reason.to_string(),
            date: Utc::now(),
            performed_by: ACTING_USER.to_string(),
            from_location: None,
            to_location: None,
            cost: None,
        });

        Ok(material.clone())
    }

    // =========================================================================
    // WAREHOUSES
    // =========================================================================

    pub async fn warehouses(&self) -> Vec<Warehouse> {
        self.records.read().await.warehouses.clone()
    }

    pub async fn find_warehouse(&self, id: &str) -> AppResult<Warehouse> {
        find(&self.records.read().await.warehouses, id).cloned()
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    pub async fn list_reports(&self, options: &FilterOptions) -> Filtered<Report> {
        apply_filters(&self.records.read().await.reports, options)
    }

    pub async fn find_report(&self, id: &str) -> AppResult<Report> {
        find(&self.records.read().await.reports, id).cloned()
    }

    pub async fn insert_report(&self, request: GenerateReportRequest) -> Report {
        let GenerateReportRequest { kind, period } = request;
        let report = Report {
            id: new_id("rpt"),
            title: format!(
                "Báo cáo {} - {} đến {}",
                kind.as_str(),
                period.from.format("%d/%m/%Y"),
                period.to.format("%d/%m/%Y")
            ),
            kind,
            period,
            generated_by: ACTING_USER.to_string(),
            generated_at: Utc::now(),
            status: ReportStatus::Completed,
            data: serde_json::json!({}),
            summary: "Báo cáo đã được tạo thành công".to_string(),
        };
        self.records.write().await.reports.push(report.clone());
        report
    }

    // =========================================================================
    // NOTIFICATIONS
    // =========================================================================

    pub async fn notifications(&self) -> Vec<Notification> {
        self.records.read().await.notifications.clone()
    }

    pub async fn mark_notification_read(&self, id: &str) -> AppResult<()> {
        let mut records = self.records.write().await;
        find_mut(&mut records.notifications, id)?.is_read = true;
        Ok(())
    }

    pub async fn unread_count(&self) -> usize {
        self.records
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.is_read)
            .count()
    }

    // =========================================================================
    // SEARCH
    // =========================================================================

    /// Case-insensitive match across equipment, materials and users, at most
    /// five hits of each
    pub async fn search(&self, query: &str) -> SearchResults {
        let needle = query.to_lowercase();
        let records = self.records.read().await;

        let equipment: Vec<Equipment> = records
            .equipment
            .iter()
            .filter(|e| {
                contains_lower(&e.name, &needle)
                    || contains_lower(&e.code, &needle)
                    || contains_lower(&e.category, &needle)
            })
            .take(GLOBAL_SEARCH_LIMIT)
            .cloned()
            .collect();

        let materials: Vec<Material> = records
            .materials
            .iter()
            .filter(|m| {
                contains_lower(&m.name, &needle)
                    || contains_lower(&m.code, &needle)
                    || contains_lower(&m.category, &needle)
            })
            .take(GLOBAL_SEARCH_LIMIT)
            .cloned()
            .collect();

        let users: Vec<User> = records
            .users
            .iter()
            .filter(|u| {
                contains_lower(&u.name, &needle)
                    || contains_lower(&u.department, &needle)
                    || contains_lower(&u.position, &needle)
            })
            .take(GLOBAL_SEARCH_LIMIT)
            .cloned()
            .collect();

        let total = equipment.len() + materials.len() + users.len();
        SearchResults {
            equipment,
            materials,
            users,
            total,
        }
    }

    pub fn suggestions(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.views
            .search_suggestions
            .iter()
            .filter(|s| contains_lower(s, &needle))
            .take(SUGGESTION_LIMIT)
            .cloned()
            .collect()
    }

    // =========================================================================
    // AGGREGATE VIEWS
    // =========================================================================

    pub fn dashboard(&self) -> &DashboardFixtures {
        &self.views.dashboard
    }

    pub fn warehouse_operations(&self, level: OrganizationLevel) -> WarehouseOperationsData {
        self.views
            .warehouse_operations
            .get(&level)
            .cloned()
            .unwrap_or_else(|| warehouse_operations(level, self.views.built_at))
    }

    pub fn summary_table(&self, level: OrganizationLevel) -> SummaryTableData {
        self.views
            .summary_tables
            .get(&level)
            .cloned()
            .unwrap_or_else(|| summary_table(level, self.views.built_at))
    }

    pub fn inventory_charts(&self, level: OrganizationLevel, operation: OperationType) -> InventoryChartsData {
        self.views
            .inventory_charts
            .get(&(level, operation))
            .cloned()
            .unwrap_or_else(|| inventory_charts(level, operation, self.views.built_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MockStore {
        MockStore::new(Fixtures::sample())
    }

    #[tokio::test]
    async fn test_find_known_and_unknown_ids() {
        let store = store();

        let user = store.find_user("user-002").await.unwrap();
        assert_eq!(user.name, "Trần Thị B");

        let err = store.find_warehouse("wh-999").await.unwrap_err();
        assert_eq!(err.code(), "WAREHOUSE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_adjust_stock_rejects_out_of_range_delta() {
        let store = store();
        let before = store.find_material("mt-004").await.unwrap();
        let before_min = store.find_material("mt-001").await.unwrap();

        let err = store
            .adjust_stock("mt-004", 10_000_000_000_000, "Nhập")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "STOCK_OUT_OF_RANGE");

        let err = store.adjust_stock("mt-001", i64::MIN, "Xuất").await.unwrap_err();
        assert_eq!(err.code(), "STOCK_OUT_OF_RANGE");

        // Nothing changed
        assert_eq!(store.find_material("mt-004").await.unwrap(), before);
        assert_eq!(store.find_material("mt-001").await.unwrap(), before_min);
    }

    #[tokio::test]
    async fn test_adjust_stock_updates_value_and_ledger() {
        let store = store();

        let material = store.adjust_stock("mt-002", -150, "Cấp phát").await.unwrap();
        assert_eq!(material.current_stock, 350);
        assert_eq!(material.total_value, 350 * 85_000);

        let movement = material.stock_movements.last().unwrap();
        assert_eq!(material.stock_movements.len(), 1);
        assert_eq!(movement.kind, MovementType::Out);
        assert_eq!(movement.quantity, 150);
        assert_eq!(movement.performed_by, ACTING_USER);
        assert!(movement.id.starts_with("sm-"));
    }

    #[tokio::test]
    async fn test_zero_delta_is_recorded_as_outbound() {
        let store = store();
        let material = store.adjust_stock("mt-004", 0, "Kiểm kê").await.unwrap();
        assert_eq!(material.current_stock, 50);
        assert_eq!(material.stock_movements.last().unwrap().kind, MovementType::Out);
    }

    #[tokio::test]
    async fn test_concurrent_adjustments_keep_every_movement() {
        let store = store();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.adjust_stock("mt-001", 10, "Nhập bổ sung").await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let material = store.find_material("mt-001").await.unwrap();
        assert_eq!(material.current_stock, 15_000 + 200);
        assert_eq!(material.stock_movements.len(), 1 + 20);
        assert_eq!(material.total_value, material.current_stock * material.unit_cost);
    }

    #[tokio::test]
    async fn test_remove_then_lookup_fails() {
        let store = store();
        store.remove_equipment("eq-003").await.unwrap();

        assert!(store.find_equipment("eq-003").await.is_err());
        assert!(store.remove_equipment("eq-003").await.is_err());
        assert_eq!(store.list_equipment(&FilterOptions::default()).await.total, 3);
    }

    #[tokio::test]
    async fn test_low_stock_uses_inclusive_minimum() {
        let store = store();
        assert!(store.low_stock_materials().await.is_empty());

        store.adjust_stock("mt-004", -30, "Cấp phát").await.unwrap();
        let low = store.low_stock_materials().await;
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].id, "mt-004");
    }

    #[tokio::test]
    async fn test_mark_read_lowers_unread_count() {
        let store = store();
        assert_eq!(store.unread_count().await, 2);

        store.mark_notification_read("notif-001").await.unwrap();
        assert_eq!(store.unread_count().await, 1);

        // Marking twice is harmless
        store.mark_notification_read("notif-001").await.unwrap();
        assert_eq!(store.unread_count().await, 1);
    }

    #[tokio::test]
    async fn test_search_groups_and_total() {
        let store = store();

        let results = store.search("ak-74").await;
        assert_eq!(results.equipment.len(), 1);
        assert_eq!(results.materials.len(), 1);
        assert!(results.users.is_empty());
        assert_eq!(results.total, 2);

        let by_department = store.search("KHO").await;
        assert!(by_department.users.iter().any(|u| u.id == "user-002"));
    }

    #[tokio::test]
    async fn test_search_caps_each_group() {
        let mut fixtures = Fixtures::sample();
        let template = fixtures.users[0].clone();
        fixtures.users = (0..8)
            .map(|i| User {
                id: format!("user-{i}"),
                ..template.clone()
            })
            .collect();

        let results = MockStore::new(fixtures).search("nguyễn").await;
        assert_eq!(results.users.len(), 5);
        assert_eq!(results.total, 5);
    }

    #[test]
    fn test_suggestions_filter_and_cap() {
        let store = store();
        assert_eq!(store.suggestions("kho"), vec!["Kho A1", "Tồn kho"]);
        assert_eq!(store.suggestions("").len(), 10);
    }

    #[tokio::test]
    async fn test_generated_report_is_listed() {
        let store = store();
        let period = Fixtures::sample().reports[0].period;

        let report = store
            .insert_report(GenerateReportRequest {
                kind: ReportType::Financial,
                period,
            })
            .await;
        assert_eq!(report.status, ReportStatus::Completed);
        assert_eq!(report.title, "Báo cáo financial - 01/01/2024 đến 31/01/2024");

        let listed = store.list_reports(&FilterOptions::default()).await;
        assert_eq!(listed.total, 3);
        assert_eq!(listed.items.last().map(|r| r.id.as_str()), Some(report.id.as_str()));
    }

    #[test]
    fn test_views_are_stamped_at_build_time() {
        let now = Utc::now();
        let store = MockStore::built_at(Fixtures::sample(), now);

        for level in OrganizationLevel::ALL {
            assert_eq!(store.warehouse_operations(level).last_updated, now);
            assert_eq!(store.summary_table(level).last_updated, now);
            for op in OperationType::ALL {
                let charts = store.inventory_charts(level, op);
                assert_eq!(charts.organization_level, level);
                assert_eq!(charts.operation_type, op);
            }
        }
    }
}
