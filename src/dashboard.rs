// =============================================================================
// DASHBOARD MODULE
// =============================================================================
// Organization/status statistics and the chart series derived from them.
//
// The statistics are authored per organization level. The "total" entry is
// its own figure set and is NOT recomputed from command + division + unit;
// the authored numbers don't add up exactly and the dashboard shows them as
// given.
// =============================================================================

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::OrganizationLevel;
use crate::models::Period;

// =============================================================================
// STATUS KINDS
// =============================================================================

/// The nine equipment-status buckets every organization reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Total,
    InSystem,
    InStorage,
    TechnicalSupport,
    Repair,
    NationalReserve,
    ReadyCombat,
    PendingDisposal,
    Other,
}

impl StatusKind {
    pub const ALL: [StatusKind; 9] = [
        StatusKind::Total,
        StatusKind::InSystem,
        StatusKind::InStorage,
        StatusKind::TechnicalSupport,
        StatusKind::Repair,
        StatusKind::NationalReserve,
        StatusKind::ReadyCombat,
        StatusKind::PendingDisposal,
        StatusKind::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Total => "Tổng hợp",
            StatusKind::InSystem => "Trên hệ thống",
            StatusKind::InStorage => "Trong kho",
            StatusKind::TechnicalSupport => "Bảo đảm kỹ thuật",
            StatusKind::Repair => "Sửa chữa",
            StatusKind::NationalReserve => "Dự trữ quốc gia",
            StatusKind::ReadyCombat => "Sẵn sàng chiến đấu",
            StatusKind::PendingDisposal => "Chờ thanh lý",
            StatusKind::Other => "Khác",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "total" => Some(StatusKind::Total),
            "in_system" => Some(StatusKind::InSystem),
            "in_storage" => Some(StatusKind::InStorage),
            "technical_support" => Some(StatusKind::TechnicalSupport),
            "repair" => Some(StatusKind::Repair),
            "national_reserve" => Some(StatusKind::NationalReserve),
            "ready_combat" => Some(StatusKind::ReadyCombat),
            "pending_disposal" => Some(StatusKind::PendingDisposal),
            "other" => Some(StatusKind::Other),
            _ => None,
        }
    }
}

// =============================================================================
// STATISTICS
// =============================================================================

/// Figures for one (organization, status) bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusData {
    pub quantity: i64,
    /// VND
    pub value: i64,
    /// Change versus the previous period, in percent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

impl StatusData {
    pub const fn new(quantity: i64, value: i64, change_percent: f64) -> Self {
        Self {
            quantity,
            value,
            change_percent: Some(change_percent),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationData {
    pub organization_level: OrganizationLevel,
    pub name: String,
    pub statuses: BTreeMap<StatusKind, StatusData>,
}

impl OrganizationData {
    /// Build an organization with an entry for every status kind.
    /// `figures` is in [`StatusKind::ALL`] order.
    pub fn new(level: OrganizationLevel, name: impl Into<String>, figures: [StatusData; 9]) -> Self {
        Self {
            organization_level: level,
            name: name.into(),
            statuses: StatusKind::ALL.into_iter().zip(figures).collect(),
        }
    }

    pub fn total_quantity(&self) -> i64 {
        self.statuses.values().map(|s| s.quantity).sum()
    }

    pub fn total_value(&self) -> i64 {
        self.statuses.values().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_quantity: i64,
    pub total_value: i64,
    pub total_change_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub last_updated: DateTime<Utc>,
    pub period: Period,
    /// One entry per organization level, in level order
    pub organizations: Vec<OrganizationData>,
    pub summary: DashboardSummary,
}

impl DashboardStats {
    /// Command + division + unit summed per status, for comparing against
    /// the authored "total" entry. Change percentages don't sum, so they're
    /// left out.
    pub fn child_rollup(&self) -> BTreeMap<StatusKind, StatusData> {
        let mut rollup = BTreeMap::new();
        for org in self
            .organizations
            .iter()
            .filter(|o| o.organization_level != OrganizationLevel::Total)
        {
            for (kind, figures) in &org.statuses {
                let entry = rollup.entry(*kind).or_insert(StatusData {
                    quantity: 0,
                    value: 0,
                    change_percent: None,
                });
                entry.quantity += figures.quantity;
                entry.value += figures.value;
            }
        }
        rollup
    }

    /// Statuses where the authored total differs from the child rollup
    pub fn total_mismatches(&self) -> Vec<StatusKind> {
        let Some(total) = self
            .organizations
            .iter()
            .find(|o| o.organization_level == OrganizationLevel::Total)
        else {
            return Vec::new();
        };
        let rollup = self.child_rollup();
        total
            .statuses
            .iter()
            .filter(|(kind, figures)| {
                rollup
                    .get(*kind)
                    .map_or(true, |r| r.quantity != figures.quantity || r.value != figures.value)
            })
            .map(|(kind, _)| *kind)
            .collect()
    }
}

// =============================================================================
// CHARTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    /// Replace labels and the first dataset's series, keeping its styling
    fn with_series(&self, labels: Vec<String>, data: Vec<f64>) -> ChartData {
        let mut chart = self.clone();
        chart.labels = labels;
        match chart.datasets.first_mut() {
            Some(first) => {
                first.data = data;
                chart.datasets.truncate(1);
            }
            None => chart.datasets.push(ChartDataset {
                label: String::new(),
                data,
                background_color: None,
                border_color: None,
            }),
        }
        chart
    }
}

// =============================================================================
// FILTERS
// =============================================================================

/// Dashboard query. Empty lists mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFilters {
    pub organization_levels: Vec<OrganizationLevel>,
    pub statuses: Vec<StatusKind>,
    pub period: Option<Period>,
}

/// Keep only the selected organizations, then only the selected status
/// entries of each, then stamp the requested period.
///
/// The period is only echoed back: the statistics carry no per-day data to
/// slice.
pub fn apply_dashboard_filters(stats: &DashboardStats, filters: &DashboardFilters) -> DashboardStats {
    let mut filtered = stats.clone();

    if !filters.organization_levels.is_empty() {
        filtered
            .organizations
            .retain(|org| filters.organization_levels.contains(&org.organization_level));
    }

    if !filters.statuses.is_empty() {
        for org in &mut filtered.organizations {
            org.statuses.retain(|kind, _| filters.statuses.contains(kind));
        }
    }

    if let Some(period) = filters.period {
        filtered.period = period;
    }

    filtered
}

/// Equipment count per organization. Recomputed only when organization
/// levels are selected.
pub fn organization_chart(base: &ChartData, stats: &DashboardStats, filters: &DashboardFilters) -> ChartData {
    if filters.organization_levels.is_empty() {
        return base.clone();
    }

    let filtered = apply_dashboard_filters(stats, filters);
    let labels = filtered.organizations.iter().map(|o| o.name.clone()).collect();
    let data = filtered
        .organizations
        .iter()
        .map(|o| o.total_quantity() as f64)
        .collect();

    base.with_series(labels, data)
}

/// Quantity per status, summed over the remaining organizations. Recomputed
/// only when statuses are selected.
pub fn status_distribution_chart(
    base: &ChartData,
    stats: &DashboardStats,
    filters: &DashboardFilters,
) -> ChartData {
    if filters.statuses.is_empty() {
        return base.clone();
    }

    let filtered = apply_dashboard_filters(stats, filters);
    let mut totals: BTreeMap<StatusKind, i64> = BTreeMap::new();
    for org in &filtered.organizations {
        for (kind, figures) in &org.statuses {
            *totals.entry(*kind).or_default() += figures.quantity;
        }
    }

    let labels = totals.keys().map(|k| k.label().to_string()).collect();
    let data = totals.values().map(|&q| q as f64).collect();

    base.with_series(labels, data)
}

const BILLION: f64 = 1_000_000_000.0;

/// Value per organization in billions of VND. Recomputed only when
/// organization levels are selected.
pub fn value_by_organization_chart(
    base: &ChartData,
    stats: &DashboardStats,
    filters: &DashboardFilters,
) -> ChartData {
    if filters.organization_levels.is_empty() {
        return base.clone();
    }

    let filtered = apply_dashboard_filters(stats, filters);
    let labels = filtered.organizations.iter().map(|o| o.name.clone()).collect();
    let data = filtered
        .organizations
        .iter()
        .map(|o| o.total_value() as f64 / BILLION)
        .collect();

    base.with_series(labels, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::Fixtures;

    fn stats() -> DashboardStats {
        Fixtures::sample().dashboard.stats
    }

    #[test]
    fn test_every_organization_has_every_status() {
        for org in &stats().organizations {
            assert_eq!(org.statuses.len(), StatusKind::ALL.len());
        }
    }

    #[test]
    fn test_total_is_stored_not_derived() {
        let stats = stats();
        let children: i64 = stats.organizations[1..]
            .iter()
            .map(|o| o.statuses[&StatusKind::Other].quantity)
            .sum();
        let total = stats.organizations[0].statuses[&StatusKind::Other].quantity;

        // 35 + 10 + 15 against the authored 20
        assert_eq!(children, 60);
        assert_eq!(total, 20);
    }

    #[test]
    fn test_child_rollup_sums_lower_levels() {
        let stats = stats();
        let rollup = stats.child_rollup();
        assert_eq!(rollup.len(), StatusKind::ALL.len());
        assert_eq!(rollup[&StatusKind::Other].quantity, 60);
        assert_eq!(rollup[&StatusKind::Other].change_percent, None);
        assert!(stats.total_mismatches().contains(&StatusKind::Other));
    }

    #[test]
    fn test_no_mismatches_when_total_matches() {
        let mut stats = stats();
        let rollup = stats.child_rollup();
        for (kind, figures) in stats.organizations[0].statuses.iter_mut() {
            figures.quantity = rollup[kind].quantity;
            figures.value = rollup[kind].value;
        }
        assert!(stats.total_mismatches().is_empty());
    }

    #[test]
    fn test_filter_by_level_and_status() {
        let filters = DashboardFilters {
            organization_levels: vec![OrganizationLevel::Command, OrganizationLevel::Unit],
            statuses: vec![StatusKind::Repair],
            period: None,
        };
        let filtered = apply_dashboard_filters(&stats(), &filters);

        assert_eq!(filtered.organizations.len(), 2);
        assert!(filtered.organizations.iter().all(|o| o.statuses.len() == 1));
        assert_eq!(filtered.organizations[1].statuses[&StatusKind::Repair].quantity, 20);
    }

    #[test]
    fn test_period_is_replaced() {
        let base = stats();
        let mut period = base.period;
        period.to = period.to + chrono::Duration::days(30);
        let filters = DashboardFilters {
            period: Some(period),
            ..DashboardFilters::default()
        };

        let filtered = apply_dashboard_filters(&base, &filters);
        assert_eq!(filtered.period, period);
        assert_eq!(filtered.organizations, base.organizations);
    }

    #[test]
    fn test_organization_chart_sums_quantities() {
        let fixtures = Fixtures::sample();
        let filters = DashboardFilters {
            organization_levels: vec![OrganizationLevel::Division],
            statuses: vec![StatusKind::InStorage, StatusKind::Repair],
            period: None,
        };
        let chart = organization_chart(
            &fixtures.dashboard.organization_chart,
            &fixtures.dashboard.stats,
            &filters,
        );

        assert_eq!(chart.labels, vec!["Ban Chỉ Huy các Binh chủng".to_string()]);
        assert_eq!(chart.datasets[0].data, vec![610.0]);
        // styling survives
        assert!(chart.datasets[0].background_color.is_some());
    }

    #[test]
    fn test_unfiltered_charts_are_returned_as_authored() {
        let fixtures = Fixtures::sample();
        let filters = DashboardFilters::default();
        let chart = value_by_organization_chart(
            &fixtures.dashboard.value_by_organization_chart,
            &fixtures.dashboard.stats,
            &filters,
        );
        assert_eq!(chart, fixtures.dashboard.value_by_organization_chart);
    }

    #[test]
    fn test_status_distribution_sums_across_organizations() {
        let fixtures = Fixtures::sample();
        let filters = DashboardFilters {
            organization_levels: vec![OrganizationLevel::Command, OrganizationLevel::Division],
            statuses: vec![StatusKind::ReadyCombat],
            period: None,
        };
        let chart = status_distribution_chart(
            &fixtures.dashboard.status_distribution_chart,
            &fixtures.dashboard.stats,
            &filters,
        );

        assert_eq!(chart.labels, vec!["Sẵn sàng chiến đấu".to_string()]);
        assert_eq!(chart.datasets[0].data, vec![10000.0]);
    }

    #[test]
    fn test_status_kind_parse() {
        assert_eq!(StatusKind::parse("ready_combat"), Some(StatusKind::ReadyCombat));
        assert_eq!(StatusKind::parse("in_system"), Some(StatusKind::InSystem));
        assert_eq!(StatusKind::parse("bogus"), None);
    }
}
