//! Growth projection
//!
//! Projects a baseline sizing and cost estimate over a multi-year
//! horizon:
//! - `pattern` supplies the year-over-year growth factors
//! - `warnings` reduces the points against the topology node ceiling
//! - `recommend` derives ranked scaling recommendations

mod pattern;
mod recommend;
mod warnings;

pub use pattern::{GrowthPattern, S_CURVE_MIDPOINT, S_CURVE_STEEPNESS};
pub use recommend::{
    derive_recommendations, RecommendationPriority, ScalingRecommendation,
    OPTIMIZATION_SAVINGS_FRACTION,
};
pub use warnings::{
    collect_capacity_warnings, CapacityWarning, WarningSeverity, CRITICAL_UTILIZATION,
    WARNING_UTILIZATION,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::DEFAULT_MAX_CLUSTER_NODES;
use crate::cluster::ClusterSizingResult;
use crate::cost::CostBreakdown;
use crate::error::PlanError;
use crate::vm::VmSizingResult;

/// Longest supported projection horizon.
pub const MAX_PROJECTION_YEARS: u32 = 10;

/// Caller-selected growth parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthSettings {
    pub years: u32,
    pub annual_growth_percent: f64,
    pub pattern: GrowthPattern,
    pub cost_inflation_percent: f64,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        Self {
            years: 3,
            annual_growth_percent: 20.0,
            pattern: GrowthPattern::Linear,
            cost_inflation_percent: 3.0,
        }
    }
}

/// Node ceiling the projection is checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologyLimits {
    pub max_cluster_nodes: u32,
}

impl Default for TopologyLimits {
    fn default() -> Self {
        Self {
            max_cluster_nodes: DEFAULT_MAX_CLUSTER_NODES,
        }
    }
}

/// Year-0 metrics the projection grows from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthBaseline {
    pub apps: u32,
    pub nodes: u32,
    pub workers: u32,
    pub cpu_cores: f64,
    pub ram_gb: f64,
    pub storage_gb: f64,
    pub monthly_cost: f64,
}

impl GrowthBaseline {
    pub fn from_cluster_sizing(sizing: &ClusterSizingResult, cost: &CostBreakdown) -> Self {
        Self {
            apps: sizing.total_apps,
            nodes: sizing.total_nodes.total(),
            workers: sizing.total_nodes.workers,
            cpu_cores: sizing.total_resources.cpu_cores,
            ram_gb: sizing.total_resources.ram_gb,
            storage_gb: sizing.total_resources.disk_gb,
            monthly_cost: cost.monthly_total,
        }
    }

    pub fn from_vm_sizing(sizing: &VmSizingResult, cost: &CostBreakdown) -> Self {
        Self {
            // Role instances play the app role for VM fleets.
            apps: sizing.total_instances,
            nodes: sizing.total_instances,
            workers: sizing.total_instances,
            cpu_cores: sizing.total_resources.cpu_cores,
            ram_gb: sizing.total_resources.ram_gb,
            storage_gb: sizing.total_resources.disk_gb,
            monthly_cost: cost.monthly_total,
        }
    }
}

/// One projected year. Year 0 is the baseline, unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: u32,
    pub apps: u32,
    pub nodes: u32,
    pub workers: u32,
    pub cpu_cores: f64,
    pub ram_gb: f64,
    pub storage_gb: f64,
    pub monthly_cost: f64,
    pub growth_vs_previous_percent: f64,
    pub growth_vs_baseline_percent: f64,
}

/// Full multi-year forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthProjection {
    pub settings: GrowthSettings,
    pub points: Vec<ProjectionPoint>,
    pub warnings: Vec<CapacityWarning>,
    pub recommendations: Vec<ScalingRecommendation>,
    pub generated_at: i64,
}

/// Continuous metric values carried between years so integer rounding
/// never compounds.
#[derive(Debug, Clone, Copy)]
struct RunningMetrics {
    apps: f64,
    nodes: f64,
    workers: f64,
    cpu_cores: f64,
    ram_gb: f64,
    storage_gb: f64,
    monthly_cost: f64,
}

/// Project baseline sizing and cost over the configured horizon.
pub fn project_growth(
    baseline: &GrowthBaseline,
    settings: &GrowthSettings,
    limits: &TopologyLimits,
) -> Result<GrowthProjection, PlanError> {
    validate(baseline, settings)?;
    debug!(
        years = settings.years,
        pattern = ?settings.pattern,
        "projecting growth"
    );

    let rate = settings.annual_growth_percent / 100.0;
    let inflation = settings.cost_inflation_percent / 100.0;

    let mut current = RunningMetrics {
        apps: baseline.apps as f64,
        nodes: baseline.nodes as f64,
        workers: baseline.workers as f64,
        cpu_cores: baseline.cpu_cores,
        ram_gb: baseline.ram_gb,
        storage_gb: baseline.storage_gb,
        monthly_cost: baseline.monthly_cost,
    };
    let baseline_apps = current.apps;

    // Year 0 is the baseline verbatim; no growth applied.
    let mut points = vec![ProjectionPoint {
        year: 0,
        apps: baseline.apps,
        nodes: baseline.nodes,
        workers: baseline.workers,
        cpu_cores: baseline.cpu_cores,
        ram_gb: baseline.ram_gb,
        storage_gb: baseline.storage_gb,
        monthly_cost: baseline.monthly_cost,
        growth_vs_previous_percent: 0.0,
        growth_vs_baseline_percent: 0.0,
    }];

    for year in 1..=settings.years {
        let factor = settings.pattern.factor(rate, year);
        let previous_apps = current.apps;

        current = RunningMetrics {
            apps: current.apps * factor,
            nodes: current.nodes * factor,
            workers: current.workers * factor,
            cpu_cores: current.cpu_cores * factor,
            ram_gb: current.ram_gb * factor,
            storage_gb: current.storage_gb * factor,
            // Cost compounds inflation on top of the growth pattern.
            monthly_cost: current.monthly_cost * factor * (1.0 + inflation),
        };

        points.push(ProjectionPoint {
            year,
            apps: current.apps.ceil() as u32,
            nodes: current.nodes.ceil() as u32,
            workers: current.workers.ceil() as u32,
            cpu_cores: current.cpu_cores,
            ram_gb: current.ram_gb,
            storage_gb: current.storage_gb,
            monthly_cost: current.monthly_cost,
            growth_vs_previous_percent: percent_change(previous_apps, current.apps),
            growth_vs_baseline_percent: percent_change(baseline_apps, current.apps),
        });
    }

    let warnings = collect_capacity_warnings(&points, limits.max_cluster_nodes);
    let recommendations = derive_recommendations(&points, &warnings);

    Ok(GrowthProjection {
        settings: *settings,
        points,
        warnings,
        recommendations,
        generated_at: chrono::Utc::now().timestamp(),
    })
}

fn validate(baseline: &GrowthBaseline, settings: &GrowthSettings) -> Result<(), PlanError> {
    if settings.years == 0 || settings.years > MAX_PROJECTION_YEARS {
        return Err(PlanError::invalid(format!(
            "projection years must be in 1..={}, got {}",
            MAX_PROJECTION_YEARS, settings.years
        )));
    }
    if settings.annual_growth_percent <= -100.0 {
        return Err(PlanError::invalid(
            "annual growth must be above -100 percent",
        ));
    }
    if settings.cost_inflation_percent <= -100.0 {
        return Err(PlanError::invalid(
            "cost inflation must be above -100 percent",
        ));
    }
    if !baseline.monthly_cost.is_finite() || baseline.monthly_cost < 0.0 {
        return Err(PlanError::degenerate("baseline monthly cost is not usable"));
    }
    Ok(())
}

fn percent_change(from: f64, to: f64) -> f64 {
    if from <= 0.0 {
        0.0
    } else {
        (to / from - 1.0) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_baseline() -> GrowthBaseline {
        GrowthBaseline {
            apps: 100,
            nodes: 20,
            workers: 14,
            cpu_cores: 160.0,
            ram_gb: 640.0,
            storage_gb: 4000.0,
            monthly_cost: 10_000.0,
        }
    }

    #[test]
    fn test_year_zero_is_exact_baseline() {
        let projection = project_growth(
            &sample_baseline(),
            &GrowthSettings::default(),
            &TopologyLimits::default(),
        )
        .unwrap();
        let p0 = &projection.points[0];
        assert_eq!(p0.year, 0);
        assert_eq!(p0.apps, 100);
        assert_eq!(p0.nodes, 20);
        assert_eq!(p0.workers, 14);
        assert_eq!(p0.cpu_cores, 160.0);
        assert_eq!(p0.monthly_cost, 10_000.0);
        assert_eq!(p0.growth_vs_baseline_percent, 0.0);
    }

    #[test]
    fn test_point_count_is_years_plus_baseline() {
        let settings = GrowthSettings {
            years: 5,
            ..Default::default()
        };
        let projection = project_growth(
            &sample_baseline(),
            &settings,
            &TopologyLimits::default(),
        )
        .unwrap();
        assert_eq!(projection.points.len(), 6);
        assert_eq!(projection.points.last().unwrap().year, 5);
    }

    #[test]
    fn test_linear_growth_compounds_yearly() {
        let settings = GrowthSettings {
            years: 2,
            annual_growth_percent: 10.0,
            pattern: GrowthPattern::Linear,
            cost_inflation_percent: 0.0,
        };
        let projection = project_growth(
            &sample_baseline(),
            &settings,
            &TopologyLimits::default(),
        )
        .unwrap();
        let p2 = &projection.points[2];
        assert!((p2.cpu_cores - 160.0 * 1.21).abs() < 1e-9);
        assert_eq!(p2.apps, 121);
    }

    #[test]
    fn test_cost_compounds_inflation_on_growth() {
        let settings = GrowthSettings {
            years: 1,
            annual_growth_percent: 10.0,
            pattern: GrowthPattern::Linear,
            cost_inflation_percent: 5.0,
        };
        let projection = project_growth(
            &sample_baseline(),
            &settings,
            &TopologyLimits::default(),
        )
        .unwrap();
        let p1 = &projection.points[1];
        assert!((p1.monthly_cost - 10_000.0 * 1.1 * 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_warning_emitted_when_ceiling_approached() {
        let settings = GrowthSettings {
            years: 5,
            annual_growth_percent: 30.0,
            pattern: GrowthPattern::Linear,
            cost_inflation_percent: 0.0,
        };
        // 20 nodes growing 30%/yr: 26, 34, 44, 58, 75.
        let limits = TopologyLimits {
            max_cluster_nodes: 80,
        };
        let projection =
            project_growth(&sample_baseline(), &settings, &limits).unwrap();
        assert!(!projection.warnings.is_empty());
        let warning = projection
            .warnings
            .iter()
            .find(|w| w.severity == WarningSeverity::Warning)
            .unwrap();
        // 70% of 80 is 56, first crossed in year 4 (58 nodes).
        assert_eq!(warning.year, 4);
    }

    #[test]
    fn test_years_out_of_range_rejected() {
        for years in [0, 11] {
            let settings = GrowthSettings {
                years,
                ..Default::default()
            };
            let err = project_growth(
                &sample_baseline(),
                &settings,
                &TopologyLimits::default(),
            )
            .unwrap_err();
            assert!(matches!(err, PlanError::InvalidInput(_)));
        }
    }

    #[test]
    fn test_growth_deltas_reported() {
        let settings = GrowthSettings {
            years: 2,
            annual_growth_percent: 20.0,
            pattern: GrowthPattern::Linear,
            cost_inflation_percent: 0.0,
        };
        let projection = project_growth(
            &sample_baseline(),
            &settings,
            &TopologyLimits::default(),
        )
        .unwrap();
        let p2 = &projection.points[2];
        assert!((p2.growth_vs_previous_percent - 20.0).abs() < 1e-9);
        assert!((p2.growth_vs_baseline_percent - 44.0).abs() < 1e-9);
    }
}
