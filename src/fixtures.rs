// =============================================================================
// FIXTURES MODULE
// =============================================================================
// Sample records the store is seeded with at startup. Tests build their own
// `Fixtures` (or tweak the sample) and hand them to `MockStore::new`, so no
// module-level state is shared between tests.
// =============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;

use crate::aggregate::OrganizationLevel;
use crate::dashboard::{
    ChartData, ChartDataset, DashboardStats, DashboardSummary, OrganizationData, StatusData,
};
use crate::models::*;

/// Everything the store holds at process start
#[derive(Debug, Clone)]
pub struct Fixtures {
    pub users: Vec<User>,
    pub equipment: Vec<Equipment>,
    pub materials: Vec<Material>,
    pub warehouses: Vec<Warehouse>,
    pub reports: Vec<Report>,
    pub notifications: Vec<Notification>,
    pub dashboard: DashboardFixtures,
    pub search_suggestions: Vec<String>,
}

/// Authored dashboard statistics and chart series
#[derive(Debug, Clone)]
pub struct DashboardFixtures {
    pub stats: DashboardStats,
    pub organization_chart: ChartData,
    pub status_distribution_chart: ChartData,
    pub value_by_organization_chart: ChartData,
    pub monthly_trend_chart: ChartData,
}

// -----------------------------------------------------------------------------
// HELPERS
// -----------------------------------------------------------------------------

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    at(year, month, day, 0, 0)
}

fn s(value: &str) -> String {
    value.to_string()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn specs(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
}

fn dataset(label: &str, data: &[f64], background: &[&str], border: Option<&[&str]>) -> ChartDataset {
    ChartDataset {
        label: s(label),
        data: data.to_vec(),
        background_color: Some(strings(background)),
        border_color: border.map(strings),
    }
}

impl Fixtures {
    /// The sample data set the service ships with
    pub fn sample() -> Self {
        Self {
            users: users(),
            equipment: equipment(),
            materials: materials(),
            warehouses: warehouses(),
            reports: reports(),
            notifications: notifications(),
            dashboard: dashboard(),
            search_suggestions: strings(&[
                "AK-74",
                "KAMAZ",
                "Pin AA",
                "Đạn 5.45mm",
                "Bộ đàm Harris",
                "Áo giáp",
                "Dầu nhớt",
                "Phụ tùng",
                "Kho A1",
                "Bảo trì",
                "Tồn kho",
                "Báo cáo",
                "Thống kê",
                "Vũ khí",
                "Phương tiện",
            ]),
        }
    }
}

// =============================================================================
// USERS
// =============================================================================

#[allow(clippy::too_many_arguments)]
fn user(
    id: &str,
    name: &str,
    email: &str,
    role: UserRole,
    department: &str,
    position: &str,
    last_login: DateTime<Utc>,
    created_at: DateTime<Utc>,
) -> User {
    User {
        id: s(id),
        name: s(name),
        email: s(email),
        role,
        department: s(department),
        position: s(position),
        avatar: None,
        is_active: true,
        last_login: Some(last_login),
        created_at,
    }
}

fn users() -> Vec<User> {
    vec![
        user(
            "user-001",
            "Nguyễn Văn A",
            "nguyenvana@military.vn",
            UserRole::Admin,
            "Quản lý hậu cần",
            "Chỉ huy",
            at(2024, 1, 15, 8, 30),
            day(2023, 1, 1),
        ),
        user(
            "user-002",
            "Trần Thị B",
            "tranthib@military.vn",
            UserRole::Manager,
            "Kho vũ khí",
            "Quản lý kho",
            at(2024, 1, 15, 9, 15),
            day(2023, 2, 15),
        ),
        user(
            "user-003",
            "Lê Văn C",
            "levanc@military.vn",
            UserRole::Operator,
            "Bảo trì trang bị",
            "Kỹ thuật viên",
            at(2024, 1, 14, 16, 45),
            day(2023, 3, 10),
        ),
        user(
            "user-004",
            "Phạm Thị D",
            "phamthid@military.vn",
            UserRole::Viewer,
            "Kế toán",
            "Kế toán viên",
            at(2024, 1, 13, 14, 20),
            day(2023, 4, 20),
        ),
    ]
}

// =============================================================================
// EQUIPMENT
// =============================================================================

fn equipment() -> Vec<Equipment> {
    vec![
        Equipment {
            id: s("eq-001"),
            name: s("Súng trường AK-74"),
            code: s("VK-001"),
            category: s("Vũ khí cá nhân"),
            kind: EquipmentType::Weapon,
            status: EquipmentStatus::Active,
            condition: EquipmentCondition::Excellent,
            quantity: 150,
            unit: s("khẩu"),
            manufacturer: s("Kalashnikov"),
            model: s("AK-74M"),
            serial_number: Some(s("AK74-2024-001")),
            purchase_date: day(2023, 5, 15),
            warranty_expiry: Some(day(2028, 5, 15)),
            last_maintenance: Some(day(2024, 1, 10)),
            next_maintenance: Some(day(2024, 4, 10)),
            location: s("Kho A1"),
            assigned_to: None,
            cost: 25_000_000,
            images: None,
            specifications: specs(&[
                ("caliber", "5.45×39mm"),
                ("weight", "3.3kg"),
                ("length", "943mm"),
                ("fireRate", "650 rounds/min"),
            ]),
            maintenance_history: vec![MaintenanceRecord {
                id: s("mt-001"),
                equipment_id: s("eq-001"),
                kind: MaintenanceType::Routine,
                description: s("Bảo dưỡng định kỳ quý I/2024"),
                performed_by: s("Lê Văn C"),
                date: day(2024, 1, 10),
                cost: 500_000,
                status: MaintenanceStatus::Completed,
            }],
        },
        Equipment {
            id: s("eq-002"),
            name: s("Xe tải quân sự KAMAZ"),
            code: s("PT-001"),
            category: s("Phương tiện vận tải"),
            kind: EquipmentType::Vehicle,
            status: EquipmentStatus::Maintenance,
            condition: EquipmentCondition::Good,
            quantity: 12,
            unit: s("chiếc"),
            manufacturer: s("KAMAZ"),
            model: s("KAMAZ-5350"),
            serial_number: Some(s("KMZ-2023-001")),
            purchase_date: day(2023, 3, 20),
            warranty_expiry: Some(day(2026, 3, 20)),
            last_maintenance: Some(day(2024, 1, 5)),
            next_maintenance: Some(day(2024, 3, 5)),
            location: s("Bãi xe B2"),
            assigned_to: None,
            cost: 1_500_000_000,
            images: None,
            specifications: specs(&[
                ("payload", "6000kg"),
                ("fuelType", "Diesel"),
                ("enginePower", "260HP"),
                ("transmission", "Manual 10-speed"),
            ]),
            maintenance_history: Vec::new(),
        },
        Equipment {
            id: s("eq-003"),
            name: s("Bộ đàm Harris PRC-152"),
            code: s("TT-001"),
            category: s("Thiết bị thông tin"),
            kind: EquipmentType::Communication,
            status: EquipmentStatus::Active,
            condition: EquipmentCondition::Excellent,
            quantity: 80,
            unit: s("bộ"),
            manufacturer: s("Harris Corporation"),
            model: s("PRC-152A"),
            serial_number: Some(s("HR152-2024-001")),
            purchase_date: day(2024, 1, 10),
            warranty_expiry: Some(day(2027, 1, 10)),
            last_maintenance: Some(day(2024, 1, 12)),
            next_maintenance: Some(day(2024, 7, 12)),
            location: s("Kho điện tử C1"),
            assigned_to: None,
            cost: 450_000_000,
            images: None,
            specifications: specs(&[
                ("frequency", "30-512 MHz"),
                ("channels", "999"),
                ("batteryLife", "8-12 hours"),
                ("weight", "1.7kg"),
            ]),
            maintenance_history: Vec::new(),
        },
        Equipment {
            id: s("eq-004"),
            name: s("Áo giáp chống đạn Level IIIA"),
            code: s("BV-001"),
            category: s("Bảo vệ cá nhân"),
            kind: EquipmentType::Protection,
            status: EquipmentStatus::Active,
            condition: EquipmentCondition::Good,
            quantity: 200,
            unit: s("bộ"),
            manufacturer: s("Point Blank"),
            model: s("Interceptor Body Armor"),
            serial_number: None,
            purchase_date: day(2023, 8, 15),
            warranty_expiry: Some(day(2028, 8, 15)),
            last_maintenance: None,
            next_maintenance: None,
            location: s("Kho trang bị D1"),
            assigned_to: None,
            cost: 180_000_000,
            images: None,
            specifications: specs(&[
                ("protection", "Level IIIA"),
                ("material", "Kevlar"),
                ("weight", "2.8kg"),
                ("coverage", "Front and back panels"),
            ]),
            maintenance_history: Vec::new(),
        },
    ]
}

// =============================================================================
// MATERIALS
// =============================================================================

fn materials() -> Vec<Material> {
    vec![
        Material {
            id: s("mt-001"),
            name: s("Đạn súng trường 5.45×39mm"),
            code: s("DAN-001"),
            category: s("Đạn dược"),
            kind: MaterialType::Ammunition,
            current_stock: 15_000,
            min_stock: 5_000,
            max_stock: 25_000,
            unit: s("viên"),
            unit_cost: 2_500,
            total_value: 37_500_000,
            supplier: s("Z111 Factory"),
            location: s("Kho đạn A1"),
            expiry_date: None,
            batch_number: Some(s("BATCH-2024-001")),
            last_restocked: day(2024, 1, 5),
            stock_movements: vec![StockMovement {
                id: s("sm-001"),
                material_id: s("mt-001"),
                kind: MovementType::In,
                quantity: 5_000,
                reason: s("Nhập kho định kỳ"),
                date: day(2024, 1, 5),
                performed_by: s("Trần Thị B"),
                from_location: None,
                to_location: None,
                cost: Some(12_500_000),
            }],
        },
        Material {
            id: s("mt-002"),
            name: s("Dầu nhớt động cơ 15W-40"),
            code: s("DM-001"),
            category: s("Nhiên liệu & dầu mỡ"),
            kind: MaterialType::Supply,
            current_stock: 500,
            min_stock: 100,
            max_stock: 1_000,
            unit: s("lít"),
            unit_cost: 85_000,
            total_value: 42_500_000,
            supplier: s("Petrolimex"),
            location: s("Kho nhiên liệu B1"),
            expiry_date: Some(day(2026, 12, 31)),
            batch_number: Some(s("OIL-2024-001")),
            last_restocked: day(2024, 1, 8),
            stock_movements: Vec::new(),
        },
        Material {
            id: s("mt-003"),
            name: s("Pin AA Alkaline"),
            code: s("PIN-001"),
            category: s("Điện tử"),
            kind: MaterialType::Consumable,
            current_stock: 2_000,
            min_stock: 500,
            max_stock: 3_000,
            unit: s("viên"),
            unit_cost: 15_000,
            total_value: 30_000_000,
            supplier: s("Duracell Vietnam"),
            location: s("Kho điện tử C1"),
            expiry_date: Some(day(2027, 6, 30)),
            batch_number: Some(s("DURACELL-2024-001")),
            last_restocked: day(2024, 1, 12),
            stock_movements: Vec::new(),
        },
        Material {
            id: s("mt-004"),
            name: s("Phụ tùng thay thế AK-74"),
            code: s("PT-AK74-001"),
            category: s("Phụ tùng"),
            kind: MaterialType::SparePart,
            current_stock: 50,
            min_stock: 20,
            max_stock: 100,
            unit: s("bộ"),
            unit_cost: 1_200_000,
            total_value: 60_000_000,
            supplier: s("Arsenal JSC"),
            location: s("Kho phụ tùng A2"),
            expiry_date: None,
            batch_number: None,
            last_restocked: day(2023, 12, 20),
            stock_movements: Vec::new(),
        },
    ]
}

// =============================================================================
// WAREHOUSES
// =============================================================================

fn warehouses() -> Vec<Warehouse> {
    vec![
        Warehouse {
            id: s("wh-001"),
            name: s("Kho vũ khí chính"),
            code: s("KVK-A"),
            kind: WarehouseType::Main,
            location: s("Khu A, Doanh trại 1"),
            capacity: 10_000,
            current_utilization: 7_500,
            manager: s("Trần Thị B"),
            status: WarehouseStatus::Active,
            security_level: SecurityLevel::Classified,
            facilities: strings(&["Camera giám sát", "Hệ thống báo động", "Kiểm soát nhiệt độ"]),
            sections: vec![
                WarehouseSection {
                    id: s("sec-001"),
                    warehouse_id: s("wh-001"),
                    name: s("Khu A1 - Súng trường"),
                    code: s("A1"),
                    capacity: 3_000,
                    current_utilization: 2_500,
                    material_types: strings(&["Vũ khí cá nhân"]),
                },
                WarehouseSection {
                    id: s("sec-002"),
                    warehouse_id: s("wh-001"),
                    name: s("Khu A2 - Phụ tùng"),
                    code: s("A2"),
                    capacity: 2_000,
                    current_utilization: 1_500,
                    material_types: strings(&["Phụ tùng"]),
                },
            ],
        },
        Warehouse {
            id: s("wh-002"),
            name: s("Kho vật tư tiêu hao"),
            code: s("KVT-B"),
            kind: WarehouseType::Secondary,
            location: s("Khu B, Doanh trại 1"),
            capacity: 5_000,
            current_utilization: 3_200,
            manager: s("Lê Văn E"),
            status: WarehouseStatus::Active,
            security_level: SecurityLevel::Medium,
            facilities: strings(&["Camera giám sát", "Thông gió tự động"]),
            sections: Vec::new(),
        },
    ]
}

// =============================================================================
// REPORTS & NOTIFICATIONS
// =============================================================================

fn reports() -> Vec<Report> {
    vec![
        Report {
            id: s("rpt-001"),
            title: s("Báo cáo tồn kho tháng 1/2024"),
            kind: ReportType::Inventory,
            period: Period {
                from: day(2024, 1, 1),
                to: day(2024, 1, 31),
            },
            generated_by: s("Nguyễn Văn A"),
            generated_at: at(2024, 2, 1, 9, 0),
            status: ReportStatus::Completed,
            data: json!({
                "totalItems": 18050,
                "totalValue": 15_750_000_000_i64,
                "lowStockItems": 3,
                "outOfStockItems": 0,
            }),
            summary: s("Tình hình tồn kho ổn định, có 3 mặt hàng dưới mức tối thiểu cần bổ sung"),
        },
        Report {
            id: s("rpt-002"),
            title: s("Báo cáo bảo trì trang bị Q4/2023"),
            kind: ReportType::Maintenance,
            period: Period {
                from: day(2023, 10, 1),
                to: day(2023, 12, 31),
            },
            generated_by: s("Lê Văn C"),
            generated_at: at(2024, 1, 5, 14, 30),
            status: ReportStatus::Approved,
            data: json!({
                "totalMaintenance": 45,
                "routineMaintenance": 35,
                "emergencyRepairs": 10,
                "totalCost": 450_000_000,
            }),
            summary: s("Hoạt động bảo trì đạt 95% kế hoạch, chi phí trong tầm kiểm soát"),
        },
    ]
}

fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: s("notif-001"),
            kind: NotificationType::Warning,
            title: s("Vật tư sắp hết hạn"),
            message: s("Pin AA Alkaline sẽ hết hạn trong 6 tháng tới"),
            timestamp: at(2024, 1, 15, 8, 30),
            is_read: false,
            action_url: Some(s("/inventory/mt-003")),
        },
        Notification {
            id: s("notif-002"),
            kind: NotificationType::Error,
            title: s("Trang bị cần bảo trì"),
            message: s("Xe tải KAMAZ đã quá hạn bảo trì định kỳ"),
            timestamp: at(2024, 1, 14, 16, 45),
            is_read: false,
            action_url: Some(s("/equipment/eq-002")),
        },
        Notification {
            id: s("notif-003"),
            kind: NotificationType::Info,
            title: s("Nhập kho thành công"),
            message: s("Đã nhập 5000 viên đạn 5.45×39mm vào kho"),
            timestamp: at(2024, 1, 5, 10, 15),
            is_read: true,
            action_url: None,
        },
        Notification {
            id: s("notif-004"),
            kind: NotificationType::Success,
            title: s("Báo cáo hoàn thành"),
            message: s("Báo cáo tồn kho tháng 1/2024 đã được tạo thành công"),
            timestamp: at(2024, 2, 1, 9, 0),
            is_read: true,
            action_url: None,
        },
    ]
}

// =============================================================================
// DASHBOARD
// =============================================================================
// Figures per organization, in StatusKind::ALL order:
// total, in_system, in_storage, technical_support, repair, national_reserve,
// ready_combat, pending_disposal, other

fn dashboard() -> DashboardFixtures {
    let organizations = vec![
        OrganizationData::new(
            OrganizationLevel::Total,
            "Toàn quân",
            [
                StatusData::new(15_750, 48_500_000_000, 2.5),
                StatusData::new(12_800, 39_200_000_000, 1.8),
                StatusData::new(2_400, 7_350_000_000, 5.2),
                StatusData::new(180, 550_000_000, -2.1),
                StatusData::new(120, 380_000_000, -8.5),
                StatusData::new(200, 850_000_000, 0.8),
                StatusData::new(11_500, 35_200_000_000, 3.1),
                StatusData::new(30, 45_000_000, -15.2),
                StatusData::new(20, 25_000_000, 1.2),
            ],
        ),
        OrganizationData::new(
            OrganizationLevel::Command,
            "Bộ Tư lệnh Quân chủng",
            [
                StatusData::new(8_200, 25_800_000_000, 3.2),
                StatusData::new(6_900, 21_700_000_000, 2.8),
                StatusData::new(1_000, 3_150_000_000, 4.8),
                StatusData::new(100, 315_000_000, -1.5),
                StatusData::new(70, 220_000_000, -12.3),
                StatusData::new(80, 380_000_000, 1.2),
                StatusData::new(6_200, 19_500_000_000, 4.1),
                StatusData::new(15, 25_000_000, -18.5),
                StatusData::new(35, 110_000_000, 8.2),
            ],
        ),
        OrganizationData::new(
            OrganizationLevel::Division,
            "Ban Chỉ Huy các Binh chủng",
            [
                StatusData::new(4_800, 14_200_000_000, 1.8),
                StatusData::new(4_100, 12_100_000_000, 1.2),
                StatusData::new(580, 1_720_000_000, 6.5),
                StatusData::new(50, 148_000_000, -3.2),
                StatusData::new(30, 89_000_000, -5.8),
                StatusData::new(60, 285_000_000, -0.5),
                StatusData::new(3_800, 11_200_000_000, 2.8),
                StatusData::new(10, 12_000_000, -8.9),
                StatusData::new(10, 15_000_000, 5.1),
            ],
        ),
        OrganizationData::new(
            OrganizationLevel::Unit,
            "Các Đơn vị trực thuộc",
            [
                StatusData::new(2_750, 8_500_000_000, 2.1),
                StatusData::new(1_800, 5_400_000_000, 0.8),
                StatusData::new(820, 2_480_000_000, 4.2),
                StatusData::new(30, 87_000_000, -1.8),
                StatusData::new(20, 71_000_000, -3.2),
                StatusData::new(60, 185_000_000, 2.1),
                StatusData::new(1_500, 4_500_000_000, 1.8),
                StatusData::new(5, 8_000_000, -25.2),
                StatusData::new(15, 69_000_000, 12.8),
            ],
        ),
    ];

    let stats = DashboardStats {
        last_updated: at(2024, 1, 15, 8, 0),
        period: Period {
            from: day(2024, 1, 1),
            to: day(2024, 1, 15),
        },
        organizations,
        summary: DashboardSummary {
            total_quantity: 15_750,
            total_value: 48_500_000_000,
            total_change_percent: 2.5,
        },
    };

    DashboardFixtures {
        stats,
        organization_chart: ChartData {
            labels: strings(&["Bộ Tư lệnh", "Ban Chỉ Huy", "Đơn vị trực thuộc"]),
            datasets: vec![dataset(
                "Số lượng trang bị",
                &[8200.0, 4800.0, 2750.0],
                &["#ef4444", "#3b82f6", "#10b981"],
                None,
            )],
        },
        status_distribution_chart: ChartData {
            labels: strings(&[
                "Sẵn sàng chiến đấu",
                "Trên hệ thống",
                "Trong kho",
                "Dự trữ quốc gia",
                "Bảo đảm kỹ thuật",
                "Sửa chữa",
                "Chờ thanh lý",
                "Khác",
            ]),
            datasets: vec![dataset(
                "Số lượng",
                &[11500.0, 12800.0, 2400.0, 200.0, 180.0, 120.0, 30.0, 20.0],
                &[
                    "#10b981", "#3b82f6", "#f59e0b", "#8b5cf6", "#06b6d4", "#ef4444", "#f97316",
                    "#6b7280",
                ],
                None,
            )],
        },
        value_by_organization_chart: ChartData {
            labels: strings(&["Bộ Tư lệnh", "Ban Chỉ Huy", "Đơn vị trực thuộc"]),
            datasets: vec![dataset(
                "Giá trị (tỷ VNĐ)",
                &[25.8, 14.2, 8.5],
                &["#dc2626", "#059669", "#7c3aed"],
                None,
            )],
        },
        monthly_trend_chart: ChartData {
            labels: strings(&[
                "T7/2023", "T8/2023", "T9/2023", "T10/2023", "T11/2023", "T12/2023", "T1/2024",
            ]),
            datasets: vec![
                dataset(
                    "Tổng số lượng",
                    &[15200.0, 15350.0, 15180.0, 15650.0, 15480.0, 15720.0, 15750.0],
                    &["rgba(59, 130, 246, 0.1)"],
                    Some(&["#3b82f6"]),
                ),
                dataset(
                    "Sẵn sàng chiến đấu",
                    &[11100.0, 11280.0, 11050.0, 11420.0, 11250.0, 11380.0, 11500.0],
                    &["rgba(16, 185, 129, 0.1)"],
                    Some(&["#10b981"]),
                ),
            ],
        },
    }
}
