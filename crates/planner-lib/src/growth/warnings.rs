//! Capacity-limit warnings
//!
//! Compares projected node counts to the topology's node ceiling. The
//! "first occurrence wins" rule is an explicit reduction over the
//! year-ordered point sequence so it stays independently testable.

use serde::{Deserialize, Serialize};

use super::ProjectionPoint;

/// Ceiling share at which a Warning fires.
pub const WARNING_UTILIZATION: f64 = 0.70;

/// Ceiling share at which the warning escalates to Critical.
pub const CRITICAL_UTILIZATION: f64 = 0.90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    Warning,
    Critical,
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningSeverity::Warning => write!(f, "warning"),
            WarningSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// A projected year crossing a capacity threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityWarning {
    pub severity: WarningSeverity,
    /// Year the threshold is first crossed.
    pub year: u32,
    pub projected_nodes: u32,
    pub node_ceiling: u32,
    pub utilization_percent: f64,
    pub message: String,
}

/// Fold the year-ordered points into at most one warning per severity
/// tier; the first year to cross each threshold wins.
pub fn collect_capacity_warnings(
    points: &[ProjectionPoint],
    node_ceiling: u32,
) -> Vec<CapacityWarning> {
    if node_ceiling == 0 {
        return Vec::new();
    }

    let first_crossing = |threshold: f64, severity: WarningSeverity| {
        points
            .iter()
            .find(|p| p.nodes as f64 >= node_ceiling as f64 * threshold)
            .map(|p| {
                let utilization = p.nodes as f64 / node_ceiling as f64 * 100.0;
                CapacityWarning {
                    severity,
                    year: p.year,
                    projected_nodes: p.nodes,
                    node_ceiling,
                    utilization_percent: utilization,
                    message: format!(
                        "projected {} nodes in year {} reach {:.0}% of the {}-node ceiling",
                        p.nodes, p.year, utilization, node_ceiling
                    ),
                }
            })
    };

    let mut warnings = Vec::new();
    if let Some(critical) = first_crossing(CRITICAL_UTILIZATION, WarningSeverity::Critical) {
        warnings.push(critical);
    }
    if let Some(warning) = first_crossing(WARNING_UTILIZATION, WarningSeverity::Warning) {
        warnings.push(warning);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(year: u32, nodes: u32) -> ProjectionPoint {
        ProjectionPoint {
            year,
            apps: 0,
            nodes,
            workers: 0,
            cpu_cores: 0.0,
            ram_gb: 0.0,
            storage_gb: 0.0,
            monthly_cost: 0.0,
            growth_vs_previous_percent: 0.0,
            growth_vs_baseline_percent: 0.0,
        }
    }

    #[test]
    fn test_no_warnings_below_threshold() {
        let points = vec![point(0, 100), point(1, 200), point(2, 400)];
        assert!(collect_capacity_warnings(&points, 1000).is_empty());
    }

    #[test]
    fn test_first_occurrence_wins() {
        let points = vec![
            point(0, 100),
            point(1, 750),
            point(2, 800),
            point(3, 950),
            point(4, 990),
        ];
        let warnings = collect_capacity_warnings(&points, 1000);
        assert_eq!(warnings.len(), 2);
        let critical = &warnings[0];
        assert_eq!(critical.severity, WarningSeverity::Critical);
        assert_eq!(critical.year, 3);
        let warning = &warnings[1];
        assert_eq!(warning.severity, WarningSeverity::Warning);
        assert_eq!(warning.year, 1);
    }

    #[test]
    fn test_single_tier_when_only_warning_crossed() {
        let points = vec![point(0, 100), point(1, 720)];
        let warnings = collect_capacity_warnings(&points, 1000);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].severity, WarningSeverity::Warning);
        assert!((warnings[0].utilization_percent - 72.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_ceiling_emits_nothing() {
        let points = vec![point(0, 100)];
        assert!(collect_capacity_warnings(&points, 0).is_empty());
    }
}
