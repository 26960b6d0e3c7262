// =============================================================================
// MODELS MODULE
// =============================================================================
// This module defines the record types held by the mock store and the
// request bodies accepted by the API.
//
// LEARNING NOTES:
// - Records are plain structs; the store owns them and hands out clones
// - Enums replace the string unions used by the dashboard client
// - `rename_all = "camelCase"` keeps the JSON shape the dashboard expects
// =============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// USERS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Manager,
    Operator,
    Viewer,
}

/// A dashboard account. Users carry no category or status field, so a list
/// query that sets either predicate matches no user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub position: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Request body for creating a user. The store assigns `id` and `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub department: String,
    pub position: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl NewUser {
    pub fn into_user(self, id: String, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            department: self.department,
            position: self.position,
            avatar: self.avatar,
            is_active: self.is_active,
            last_login: self.last_login,
            created_at,
        }
    }
}

/// Partial update for a user. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
    pub last_login: Option<DateTime<Utc>>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(role) = self.role {
            user.role = role;
        }
        if let Some(department) = self.department {
            user.department = department;
        }
        if let Some(position) = self.position {
            user.position = position;
        }
        if self.avatar.is_some() {
            user.avatar = self.avatar;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if self.last_login.is_some() {
            user.last_login = self.last_login;
        }
    }
}

// =============================================================================
// EQUIPMENT
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Weapon,
    Vehicle,
    Communication,
    Protection,
    Tool,
}

/// Lifecycle state of an equipment record (not to be confused with the
/// dashboard's [`StatusKind`](crate::dashboard::StatusKind) buckets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Active,
    Maintenance,
    Damaged,
    Retired,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Active => "active",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::Damaged => "damaged",
            EquipmentStatus::Retired => "retired",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentCondition {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Routine,
    Repair,
    Upgrade,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Completed,
    Pending,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: String,
    pub equipment_id: String,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: String,
    pub performed_by: String,
    pub date: DateTime<Utc>,
    pub cost: i64,
    pub status: MaintenanceStatus,
}

/// A tracked equipment line (a batch of identical items, e.g. 150 rifles).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    pub status: EquipmentStatus,
    pub condition: EquipmentCondition,
    pub quantity: i64,
    pub unit: String,
    pub manufacturer: String,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    pub purchase_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty_expiry: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_maintenance: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_maintenance: Option<DateTime<Utc>>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    pub cost: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifications: Option<BTreeMap<String, String>>,
    pub maintenance_history: Vec<MaintenanceRecord>,
}

/// Request body for registering equipment. New equipment starts with an
/// empty maintenance history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEquipment {
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: EquipmentType,
    pub status: EquipmentStatus,
    pub condition: EquipmentCondition,
    pub quantity: i64,
    pub unit: String,
    pub manufacturer: String,
    pub model: String,
    #[serde(default)]
    pub serial_number: Option<String>,
    pub purchase_date: DateTime<Utc>,
    #[serde(default)]
    pub warranty_expiry: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_maintenance: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_maintenance: Option<DateTime<Utc>>,
    pub location: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    pub cost: i64,
    #[serde(default)]
    pub images: Option<Vec<String>>,
    #[serde(default)]
    pub specifications: Option<BTreeMap<String, String>>,
}

impl NewEquipment {
    pub fn into_equipment(self, id: String) -> Equipment {
        Equipment {
            id,
            name: self.name,
            code: self.code,
            category: self.category,
            kind: self.kind,
            status: self.status,
            condition: self.condition,
            quantity: self.quantity,
            unit: self.unit,
            manufacturer: self.manufacturer,
            model: self.model,
            serial_number: self.serial_number,
            purchase_date: self.purchase_date,
            warranty_expiry: self.warranty_expiry,
            last_maintenance: self.last_maintenance,
            next_maintenance: self.next_maintenance,
            location: self.location,
            assigned_to: self.assigned_to,
            cost: self.cost,
            images: self.images,
            specifications: self.specifications,
            maintenance_history: Vec::new(),
        }
    }
}

/// Partial update for equipment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub code: Option<String>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<EquipmentType>,
    pub status: Option<EquipmentStatus>,
    pub condition: Option<EquipmentCondition>,
    pub quantity: Option<i64>,
    pub location: Option<String>,
    pub assigned_to: Option<String>,
    pub cost: Option<i64>,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
    pub maintenance_history: Option<Vec<MaintenanceRecord>>,
}

impl EquipmentPatch {
    pub fn apply(self, equipment: &mut Equipment) {
        if let Some(name) = self.name {
            equipment.name = name;
        }
        if let Some(code) = self.code {
            equipment.code = code;
        }
        if let Some(category) = self.category {
            equipment.category = category;
        }
        if let Some(kind) = self.kind {
            equipment.kind = kind;
        }
        if let Some(status) = self.status {
            equipment.status = status;
        }
        if let Some(condition) = self.condition {
            equipment.condition = condition;
        }
        if let Some(quantity) = self.quantity {
            equipment.quantity = quantity;
        }
        if let Some(location) = self.location {
            equipment.location = location;
        }
        if self.assigned_to.is_some() {
            equipment.assigned_to = self.assigned_to;
        }
        if let Some(cost) = self.cost {
            equipment.cost = cost;
        }
        if self.last_maintenance.is_some() {
            equipment.last_maintenance = self.last_maintenance;
        }
        if self.next_maintenance.is_some() {
            equipment.next_maintenance = self.next_maintenance;
        }
        if let Some(history) = self.maintenance_history {
            equipment.maintenance_history = history;
        }
    }
}

// =============================================================================
// MATERIALS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialType {
    Consumable,
    SparePart,
    Supply,
    Ammunition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementType {
    In,
    Out,
    Transfer,
    Adjustment,
}

/// One entry of a material's append-only stock ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: String,
    pub material_id: String,
    #[serde(rename = "type")]
    pub kind: MovementType,
    /// Always non-negative; the direction lives in `kind`
    pub quantity: i64,
    pub reason: String,
    pub date: DateTime<Utc>,
    pub performed_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<i64>,
}

/// A stocked consumable, spare part, supply or ammunition line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: MaterialType,
    pub current_stock: i64,
    pub min_stock: i64,
    pub max_stock: i64,
    pub unit: String,
    pub unit_cost: i64,
    /// `current_stock * unit_cost`, recomputed on every stock update
    pub total_value: i64,
    pub supplier: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    pub last_restocked: DateTime<Utc>,
    pub stock_movements: Vec<StockMovement>,
}

impl Material {
    /// Stock at or below the configured minimum
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

/// Request body for a stock update.
///
/// # Example JSON
/// ```json
/// { "quantity": -250, "reason": "Cấp phát huấn luyện" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdateRequest {
    /// Signed delta: positive receives stock, negative issues it
    pub quantity: i64,
    pub reason: String,
}

// =============================================================================
// WAREHOUSES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseType {
    Main,
    Secondary,
    Temporary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarehouseStatus {
    Active,
    Maintenance,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
    Classified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseSection {
    pub id: String,
    pub warehouse_id: String,
    pub name: String,
    pub code: String,
    pub capacity: i64,
    pub current_utilization: i64,
    pub material_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: WarehouseType,
    pub location: String,
    pub capacity: i64,
    pub current_utilization: i64,
    pub manager: String,
    pub status: WarehouseStatus,
    pub security_level: SecurityLevel,
    pub facilities: Vec<String>,
    pub sections: Vec<WarehouseSection>,
}

// =============================================================================
// REPORTS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    Inventory,
    Maintenance,
    Financial,
    Usage,
    Security,
}

impl ReportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportType::Inventory => "inventory",
            ReportType::Maintenance => "maintenance",
            ReportType::Financial => "financial",
            ReportType::Usage => "usage",
            ReportType::Security => "security",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Draft,
    Completed,
    Approved,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Completed => "completed",
            ReportStatus::Approved => "approved",
        }
    }
}

/// Inclusive reporting window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub period: Period,
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
    pub status: ReportStatus,
    /// Free-form figures; shape depends on the report type
    pub data: serde_json::Value,
    pub summary: String,
}

/// Request body for generating a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReportRequest {
    #[serde(rename = "type")]
    pub kind: ReportType,
    pub period: Period,
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Info,
    Warning,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

// =============================================================================
// SMALL RESPONSE BODIES
// =============================================================================

/// Confirmation body returned by delete / mark-read operations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountBody {
    pub count: usize,
}

/// Grouped hits of a global search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub equipment: Vec<Equipment>,
    pub materials: Vec<Material>,
    pub users: Vec<User>,
    pub total: usize,
}

// =============================================================================
// HEALTH CHECK RESPONSE
// =============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}
