// =============================================================================
// AGGREGATE BUILDER
// =============================================================================
// Builds the organization-level variants of the dashboard's aggregate panels
// (warehouse operations, summary table, per-warehouse inventory charts) from
// hand-authored base figures.
//
// Every figure is `floor(base * multiplier)` where the multiplier comes from
// the organization level:
//
//   total 1.0 | command 0.65 | division 0.4 | unit 0.25
//
// These panels are not computed from the record collections in the store.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ORGANIZATION LEVELS
// =============================================================================

/// Rollup scope in the military hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganizationLevel {
    Total,
    Command,
    Division,
    Unit,
}

impl OrganizationLevel {
    pub const ALL: [OrganizationLevel; 4] = [
        OrganizationLevel::Total,
        OrganizationLevel::Command,
        OrganizationLevel::Division,
        OrganizationLevel::Unit,
    ];

    /// The single multiplier table for every level-scaled panel
    pub fn multiplier(self) -> f64 {
        match self {
            OrganizationLevel::Total => 1.0,
            OrganizationLevel::Command => 0.65,
            OrganizationLevel::Division => 0.4,
            OrganizationLevel::Unit => 0.25,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "total" => Some(OrganizationLevel::Total),
            "command" => Some(OrganizationLevel::Command),
            "division" => Some(OrganizationLevel::Division),
            "unit" => Some(OrganizationLevel::Unit),
            _ => None,
        }
    }
}

/// `floor(base * multiplier)`
pub fn scale(base: i64, multiplier: f64) -> i64 {
    (base as f64 * multiplier).floor() as i64
}

/// Scale a base figure for an organization level
pub fn scale_for(base: i64, level: OrganizationLevel) -> i64 {
    scale(base, level.multiplier())
}

// =============================================================================
// WAREHOUSE OPERATIONS
// =============================================================================
// Three sections (equipment, supplies, materiel), each with six order-status
// cards. Every card splits its count into outbound / inbound / transfer.

const DETAIL_LABELS: [&str; 3] = ["Xuất kho", "Nhập kho", "Điều chuyển"];

#[derive(Debug, Clone, Copy)]
enum CardTotal {
    Count(i64),
    /// Rendered as "done/required"
    Ratio(i64, i64),
}

struct CardBase {
    title: &'static str,
    total: CardTotal,
    details: [i64; 3],
}

struct SectionBase {
    title: &'static str,
    color: &'static str,
    cards: [CardBase; 6],
}

const fn card(title: &'static str, total: CardTotal, details: [i64; 3]) -> CardBase {
    CardBase {
        title,
        total,
        details,
    }
}

const OPERATION_SECTIONS: [SectionBase; 3] = [
    SectionBase {
        title: "Trang Bị",
        color: "#0074D6",
        cards: [
            card("Mệnh lệnh chờ viết lệnh", CardTotal::Count(12), [4, 5, 3]),
            card("Mệnh lệnh đã viết lệnh", CardTotal::Count(40), [15, 18, 7]),
            card("Lệnh đã bổ sung", CardTotal::Count(34), [12, 14, 8]),
            card("Lệnh chưa thực hiện xong", CardTotal::Count(5), [2, 2, 1]),
            card("Lệnh quá thời hạn", CardTotal::Count(20), [8, 7, 5]),
            card("Lệnh yêu cầu xử lý", CardTotal::Ratio(40, 44), [15, 12, 13]),
        ],
    },
    SectionBase {
        title: "Vật Tư",
        color: "#599D7B",
        cards: [
            card("Kế hoạch chờ viết lệnh", CardTotal::Count(12), [3, 6, 3]),
            card("Kế hoạch đã viết lệnh", CardTotal::Count(40), [16, 15, 9]),
            card("Lệnh đã thực hiện xong", CardTotal::Count(34), [13, 12, 9]),
            card("Lệnh chưa thực hiện xong", CardTotal::Count(5), [1, 2, 2]),
            card("Lệnh quá thời hạn", CardTotal::Count(20), [7, 8, 5]),
            card("Lệnh yêu cầu xử lý", CardTotal::Ratio(40, 44), [16, 14, 10]),
        ],
    },
    SectionBase {
        title: "Vật chất",
        color: "#ECC94B",
        cards: [
            card("Kế hoạch chờ viết lệnh", CardTotal::Count(12), [4, 4, 4]),
            card("Kế hoạch đã viết lệnh", CardTotal::Count(40), [13, 14, 13]),
            card("Lệnh đã thực hiện xong", CardTotal::Count(34), [11, 12, 11]),
            card("Lệnh chưa thực hiện xong", CardTotal::Count(5), [2, 2, 1]),
            card("Lệnh quá thời hạn", CardTotal::Count(20), [6, 7, 7]),
            card("Lệnh yêu cầu xử lý", CardTotal::Ratio(40, 44), [13, 14, 13]),
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationDetail {
    pub label: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationCard {
    pub title: String,
    pub total: String,
    pub details: Vec<OperationDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationSection {
    pub title: String,
    pub color: String,
    pub cards: Vec<OperationCard>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseOperationsData {
    pub last_updated: DateTime<Utc>,
    pub organization_level: OrganizationLevel,
    pub sections: Vec<OperationSection>,
}

pub fn warehouse_operations(level: OrganizationLevel, now: DateTime<Utc>) -> WarehouseOperationsData {
    let sections = OPERATION_SECTIONS
        .iter()
        .map(|section| OperationSection {
            title: section.title.to_string(),
            color: section.color.to_string(),
            cards: section
                .cards
                .iter()
                .map(|base| OperationCard {
                    title: base.title.to_string(),
                    total: match base.total {
                        CardTotal::Count(n) => scale_for(n, level).to_string(),
                        CardTotal::Ratio(done, required) => {
                            format!("{}/{}", scale_for(done, level), scale_for(required, level))
                        }
                    },
                    details: DETAIL_LABELS
                        .iter()
                        .zip(base.details)
                        .map(|(label, value)| OperationDetail {
                            label: label.to_string(),
                            value: scale_for(value, level),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    WarehouseOperationsData {
        last_updated: now,
        organization_level: level,
        sections,
    }
}

// =============================================================================
// INVENTORY CATEGORIES
// =============================================================================

/// The seven stock categories shared by the summary table and the charts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryCategory {
    EquipmentGroup1,
    EquipmentGroup2,
    SupplyGroup1,
    SupplyGroup2,
    NationalReserve,
    CombatReady,
    Materiel,
}

impl InventoryCategory {
    pub const ALL: [InventoryCategory; 7] = [
        InventoryCategory::EquipmentGroup1,
        InventoryCategory::EquipmentGroup2,
        InventoryCategory::SupplyGroup1,
        InventoryCategory::SupplyGroup2,
        InventoryCategory::NationalReserve,
        InventoryCategory::CombatReady,
        InventoryCategory::Materiel,
    ];

    /// Key used by the dashboard (JSON field / `categoryKey`)
    pub fn key(self) -> &'static str {
        match self {
            InventoryCategory::EquipmentGroup1 => "trangBiNhom1",
            InventoryCategory::EquipmentGroup2 => "trangBiNhom2",
            InventoryCategory::SupplyGroup1 => "vatTuNhom1",
            InventoryCategory::SupplyGroup2 => "vatTuNhom2",
            InventoryCategory::NationalReserve => "dtqg",
            InventoryCategory::CombatReady => "sscd",
            InventoryCategory::Materiel => "vatChat",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            InventoryCategory::EquipmentGroup1 => "Trang Bị Nhóm 1",
            InventoryCategory::EquipmentGroup2 => "Trang Bị Nhóm 2",
            InventoryCategory::SupplyGroup1 => "Vật Tư Nhóm 1",
            InventoryCategory::SupplyGroup2 => "Vật Tư Nhóm 2",
            InventoryCategory::NationalReserve => "DTQG",
            InventoryCategory::CombatReady => "SSCĐ",
            InventoryCategory::Materiel => "Vật Chất",
        }
    }
}

// =============================================================================
// SUMMARY TABLE
// =============================================================================

/// One row of the summary table: a figure per inventory category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "trangBiNhom1")]
    pub equipment_group_1: i64,
    #[serde(rename = "trangBiNhom2")]
    pub equipment_group_2: i64,
    #[serde(rename = "vatTuNhom1")]
    pub supply_group_1: i64,
    #[serde(rename = "vatTuNhom2")]
    pub supply_group_2: i64,
    #[serde(rename = "dtqg")]
    pub national_reserve: i64,
    #[serde(rename = "sscd")]
    pub combat_ready: i64,
    #[serde(rename = "vatChat")]
    pub materiel: i64,
}

impl SummaryRow {
    pub fn from_fn(mut f: impl FnMut(InventoryCategory) -> i64) -> Self {
        Self {
            equipment_group_1: f(InventoryCategory::EquipmentGroup1),
            equipment_group_2: f(InventoryCategory::EquipmentGroup2),
            supply_group_1: f(InventoryCategory::SupplyGroup1),
            supply_group_2: f(InventoryCategory::SupplyGroup2),
            national_reserve: f(InventoryCategory::NationalReserve),
            combat_ready: f(InventoryCategory::CombatReady),
            materiel: f(InventoryCategory::Materiel),
        }
    }

    pub fn get(&self, category: InventoryCategory) -> i64 {
        match category {
            InventoryCategory::EquipmentGroup1 => self.equipment_group_1,
            InventoryCategory::EquipmentGroup2 => self.equipment_group_2,
            InventoryCategory::SupplyGroup1 => self.supply_group_1,
            InventoryCategory::SupplyGroup2 => self.supply_group_2,
            InventoryCategory::NationalReserve => self.national_reserve,
            InventoryCategory::CombatReady => self.combat_ready,
            InventoryCategory::Materiel => self.materiel,
        }
    }

    fn scaled(base: [i64; 7], level: OrganizationLevel) -> Self {
        let mut figures = base.into_iter();
        Self::from_fn(|_| scale_for(figures.next().unwrap_or_default(), level))
    }
}

// Base figures in InventoryCategory::ALL order
const OPENING_BASE: [i64; 7] = [2500, 1800, 15000, 8500, 1200, 3200, 5800];
const INCREASE_BASE: [i64; 7] = [180, 120, 2800, 1500, 80, 220, 850];
const DECREASE_BASE: [i64; 7] = [85, 95, 2200, 1200, 45, 180, 720];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryTableData {
    pub last_updated: DateTime<Utc>,
    pub organization_level: OrganizationLevel,
    #[serde(rename = "tonDauKy")]
    pub opening_balance: SummaryRow,
    #[serde(rename = "tang")]
    pub increases: SummaryRow,
    #[serde(rename = "giam")]
    pub decreases: SummaryRow,
    /// opening + increases - decreases, computed from the scaled rows
    #[serde(rename = "tonHienTai")]
    pub current_balance: SummaryRow,
}

pub fn summary_table(level: OrganizationLevel, now: DateTime<Utc>) -> SummaryTableData {
    let opening_balance = SummaryRow::scaled(OPENING_BASE, level);
    let increases = SummaryRow::scaled(INCREASE_BASE, level);
    let decreases = SummaryRow::scaled(DECREASE_BASE, level);
    let current_balance = SummaryRow::from_fn(|category| {
        opening_balance.get(category) + increases.get(category) - decreases.get(category)
    });

    SummaryTableData {
        last_updated: now,
        organization_level: level,
        opening_balance,
        increases,
        decreases,
        current_balance,
    }
}

// =============================================================================
// INVENTORY CHARTS
// =============================================================================

/// Inbound ("nhap") or outbound ("xuat") flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum OperationType {
    #[default]
    #[serde(rename = "nhap")]
    Inbound,
    #[serde(rename = "xuat")]
    Outbound,
}

impl OperationType {
    pub const ALL: [OperationType; 2] = [OperationType::Inbound, OperationType::Outbound];
}

/// Number of warehouses plotted per category
pub const CHART_WAREHOUSES: usize = 13;

#[derive(Debug, Clone, Copy)]
struct ChartBase {
    tdm: i64,
    tsl: i64,
    cl: i64,
    value: i64,
}

const fn chart_base(tdm: i64, tsl: i64, cl: i64, value: i64) -> ChartBase {
    ChartBase { tdm, tsl, cl, value }
}

fn chart_base_for(category: InventoryCategory, operation: OperationType) -> ChartBase {
    use InventoryCategory::*;
    use OperationType::*;

    match (category, operation) {
        (EquipmentGroup1, Inbound) => chart_base(120, 1800, 85, 320),
        (EquipmentGroup1, Outbound) => chart_base(120, 2200, 85, 360),
        (EquipmentGroup2, Inbound) => chart_base(100, 1200, 80, 250),
        (EquipmentGroup2, Outbound) => chart_base(100, 1800, 80, 310),
        (SupplyGroup1, Inbound) => chart_base(150, 7500, 90, 400),
        (SupplyGroup1, Outbound) => chart_base(150, 8500, 90, 440),
        (SupplyGroup2, Inbound) => chart_base(80, 4500, 75, 180),
        (SupplyGroup2, Outbound) => chart_base(80, 5500, 75, 220),
        (NationalReserve, Inbound) => chart_base(200, 1000, 95, 480),
        (NationalReserve, Outbound) => chart_base(200, 1400, 95, 520),
        (CombatReady, Inbound) => chart_base(160, 2500, 88, 360),
        (CombatReady, Outbound) => chart_base(160, 3100, 88, 400),
        (Materiel, Inbound) => chart_base(90, 5500, 70, 200),
        (Materiel, Outbound) => chart_base(90, 6500, 70, 240),
    }
}

/// Per-warehouse spread: 0.7 + last digit of the warehouse index * 0.06
pub fn warehouse_variation(index: usize) -> f64 {
    0.7 + (index % 10) as f64 * 0.06
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseChartData {
    pub warehouse_id: String,
    pub warehouse_name: String,
    /// Floor area (m²)
    pub tdm: i64,
    /// Total quantity
    pub tsl: i64,
    /// Quality (%), not scaled by organization level
    pub cl: i64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChartData {
    pub category_name: String,
    pub category_key: String,
    pub warehouses: Vec<WarehouseChartData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryChartsData {
    pub last_updated: DateTime<Utc>,
    pub organization_level: OrganizationLevel,
    pub operation_type: OperationType,
    pub categories: Vec<CategoryChartData>,
}

fn warehouse_chart(
    index: usize,
    category: InventoryCategory,
    operation: OperationType,
    multiplier: f64,
) -> WarehouseChartData {
    let base = chart_base_for(category, operation);
    let variation = warehouse_variation(index);

    WarehouseChartData {
        warehouse_id: format!("warehouse_{index}"),
        // Full index, not the last digit: "Kho 11".."Kho 13" would repeat 1..3
        warehouse_name: format!("Kho {index}"),
        tdm: scale_varied(base.tdm, variation, multiplier),
        tsl: scale_varied(base.tsl, variation, multiplier),
        cl: scale(base.cl, 0.9 + variation * 0.1),
        value: scale_varied(base.value, variation, multiplier),
    }
}

/// `floor(base * variation * multiplier)`, multiplied left to right
fn scale_varied(base: i64, variation: f64, multiplier: f64) -> i64 {
    (base as f64 * variation * multiplier).floor() as i64
}

pub fn inventory_charts(
    level: OrganizationLevel,
    operation: OperationType,
    now: DateTime<Utc>,
) -> InventoryChartsData {
    let multiplier = level.multiplier();

    let categories = InventoryCategory::ALL
        .iter()
        .map(|&category| CategoryChartData {
            category_name: category.display_name().to_string(),
            category_key: category.key().to_string(),
            warehouses: (1..=CHART_WAREHOUSES)
                .map(|index| warehouse_chart(index, category, operation, multiplier))
                .collect(),
        })
        .collect();

    InventoryChartsData {
        last_updated: now,
        organization_level: level,
        operation_type: operation,
        categories,
    }
}

// =============================================================================
// SUMMARY SECTION
// =============================================================================
// Donut charts of stock age per category, scaled by a per-warehouse
// multiplier rather than an organization level.

const WAREHOUSE_MULTIPLIERS: [(&str, f64); 5] = [
    ("all", 1.0),
    ("k92", 0.8),
    ("k95", 0.9),
    ("k97", 0.6),
    ("k99", 0.7),
];

/// Multiplier for a warehouse filter key; unknown keys fall back to 1.0
pub fn warehouse_multiplier(key: &str) -> f64 {
    WAREHOUSE_MULTIPLIERS
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(1.0, |(_, multiplier)| *multiplier)
}

const SEGMENT_LABELS: [&str; 4] = ["0 → 5", "5 → 10", "10 → 20", "> 20"];

struct DonutBase {
    title: &'static str,
    total: i64,
    // (percentage, num1, num2, num3) per segment
    segments: [(u32, i64, i64, f64); 4],
}

const DONUT_CHARTS: [DonutBase; 7] = [
    DonutBase {
        title: "Trang Bị Nhóm 1",
        total: 5000,
        segments: [(36, 12, 1200, 132.3), (21, 8, 450, 89.5), (17, 6, 300, 55.1), (9, 5, 350, 32.6)],
    },
    DonutBase {
        title: "Trang Bị Nhóm 2",
        total: 3800,
        segments: [(42, 15, 980, 108.2), (25, 10, 380, 76.4), (20, 8, 250, 45.8), (13, 6, 290, 28.9)],
    },
    DonutBase {
        title: "Vật Tư Nhóm 1",
        total: 12500,
        segments: [
            (28, 18, 2800, 285.6),
            (32, 22, 1850, 198.7),
            (25, 16, 1200, 142.3),
            (15, 12, 950, 89.4),
        ],
    },
    DonutBase {
        title: "Vật Tư Nhóm 2",
        total: 8900,
        segments: [(34, 14, 1680, 156.8), (28, 11, 980, 112.3), (22, 9, 720, 89.6), (16, 7, 580, 67.2)],
    },
    DonutBase {
        title: "DTQG",
        total: 2200,
        segments: [(45, 8, 450, 98.7), (30, 6, 280, 65.4), (15, 4, 180, 42.1), (10, 3, 120, 28.9)],
    },
    DonutBase {
        title: "SSCĐ",
        total: 6700,
        segments: [(38, 16, 1420, 178.9), (27, 12, 850, 125.6), (20, 9, 580, 89.7), (15, 7, 450, 67.8)],
    },
    DonutBase {
        title: "Vật Chất",
        total: 15800,
        segments: [
            (32, 25, 3200, 389.6),
            (29, 20, 2400, 278.4),
            (24, 16, 1850, 198.7),
            (15, 12, 1400, 145.8),
        ],
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySegment {
    pub label: String,
    pub percentage: u32,
    pub num1: i64,
    pub num2: i64,
    /// Value in thousands, one decimal place
    pub num3: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryChart {
    pub title: String,
    pub total: i64,
    pub segments: Vec<SummarySegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarySectionData {
    pub warehouse: String,
    pub multiplier: f64,
    pub charts: Vec<SummaryChart>,
}

pub fn summary_section(warehouse: &str) -> SummarySectionData {
    let multiplier = warehouse_multiplier(warehouse);

    let charts = DONUT_CHARTS
        .iter()
        .map(|chart| SummaryChart {
            title: chart.title.to_string(),
            total: scale(chart.total, multiplier),
            segments: SEGMENT_LABELS
                .iter()
                .zip(chart.segments)
                .map(|(label, (percentage, num1, num2, num3))| SummarySegment {
                    label: label.to_string(),
                    percentage,
                    num1: scale(num1, multiplier),
                    num2: scale(num2, multiplier),
                    num3: (num3 * multiplier * 10.0).round() / 10.0,
                })
                .collect(),
        })
        .collect();

    SummarySectionData {
        warehouse: warehouse.to_string(),
        multiplier,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_multiplier_table() {
        let multipliers: Vec<f64> = OrganizationLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert_eq!(multipliers, vec![1.0, 0.65, 0.4, 0.25]);
    }

    #[test]
    fn test_scale_truncates() {
        assert_eq!(scale_for(12, OrganizationLevel::Command), 7); // 7.8
        assert_eq!(scale_for(5, OrganizationLevel::Unit), 1); // 1.25
        assert_eq!(scale_for(44, OrganizationLevel::Division), 17); // 17.6
        assert_eq!(scale_for(40, OrganizationLevel::Total), 40);
    }

    #[test]
    fn test_warehouse_operations_layout() {
        let data = warehouse_operations(OrganizationLevel::Unit, now());

        assert_eq!(data.sections.len(), 3);
        assert!(data.sections.iter().all(|s| s.cards.len() == 6));

        let first = &data.sections[0].cards[0];
        assert_eq!(first.total, "3");
        let values: Vec<i64> = first.details.iter().map(|d| d.value).collect();
        assert_eq!(values, vec![1, 1, 0]);
        assert_eq!(first.details[0].label, "Xuất kho");

        // Last card shows handled/required
        assert_eq!(data.sections[0].cards[5].total, "10/11");
    }

    #[test]
    fn test_summary_table_balances() {
        for level in OrganizationLevel::ALL {
            let table = summary_table(level, now());
            for category in InventoryCategory::ALL {
                assert_eq!(
                    table.current_balance.get(category),
                    table.opening_balance.get(category) + table.increases.get(category)
                        - table.decreases.get(category)
                );
            }
        }

        let command = summary_table(OrganizationLevel::Command, now());
        assert_eq!(command.opening_balance.equipment_group_1, 1625);
        assert_eq!(command.decreases.equipment_group_1, 55); // 85 * 0.65 = 55.25
    }

    #[test]
    fn test_summary_row_serializes_with_dashboard_keys() {
        let table = summary_table(OrganizationLevel::Total, now());
        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(json["tonDauKy"]["trangBiNhom1"], 2500);
        assert_eq!(json["tang"]["vatChat"], 850);
        assert_eq!(json["organizationLevel"], "total");
    }

    #[test]
    fn test_inventory_charts_shape() {
        let charts = inventory_charts(OrganizationLevel::Total, OperationType::Outbound, now());

        assert_eq!(charts.categories.len(), 7);
        for category in &charts.categories {
            assert_eq!(category.warehouses.len(), CHART_WAREHOUSES);
        }
        let first = &charts.categories[0].warehouses[0];
        assert_eq!(first.warehouse_id, "warehouse_1");
        // 2200 * 0.76
        assert_eq!(first.tsl, (2200.0 * warehouse_variation(1)).floor() as i64);
    }

    #[test]
    fn test_chart_quality_ignores_level() {
        let total = inventory_charts(OrganizationLevel::Total, OperationType::Inbound, now());
        let unit = inventory_charts(OrganizationLevel::Unit, OperationType::Inbound, now());

        for (a, b) in total.categories.iter().zip(&unit.categories) {
            for (wa, wb) in a.warehouses.iter().zip(&b.warehouses) {
                assert_eq!(wa.cl, wb.cl);
                assert!(wb.tsl <= wa.tsl);
            }
        }
    }

    #[test]
    fn test_operation_type_wire_names() {
        assert_eq!(serde_json::to_value(OperationType::Inbound).unwrap(), "nhap");
        assert_eq!(serde_json::to_value(OperationType::Outbound).unwrap(), "xuat");
        assert_eq!(OperationType::default(), OperationType::Inbound);
    }

    #[test]
    fn test_summary_section_scaling() {
        let k92 = summary_section("k92");
        assert_eq!(k92.multiplier, 0.8);
        assert_eq!(k92.charts[0].total, 4000);
        assert_eq!(k92.charts[0].segments[0].num2, 960);
        assert_eq!(k92.charts[0].segments[0].percentage, 36);

        let unknown = summary_section("k00");
        assert_eq!(unknown.multiplier, 1.0);
        assert_eq!(unknown.charts[6].total, 15800);
    }

    proptest! {
        #[test]
        fn prop_scale_is_floor_of_product(base in 0i64..1_000_000, index in 0usize..4) {
            let level = OrganizationLevel::ALL[index];
            let expected = (base as f64 * level.multiplier()).floor() as i64;
            prop_assert_eq!(scale_for(base, level), expected);
            prop_assert!(scale_for(base, level) <= base);
        }
    }
}
