//! Scaling recommendations
//!
//! Deterministic heuristics over the final projection point and the
//! warning list, ordered by priority then recommended year.

use serde::{Deserialize, Serialize};

use super::warnings::{CapacityWarning, WarningSeverity};
use super::ProjectionPoint;

/// Share of the final monthly cost a resource-optimization pass is
/// expected to recover.
pub const OPTIMIZATION_SAVINGS_FRACTION: f64 = 0.15;

/// Priority order is the sort order: High first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingRecommendation {
    pub priority: RecommendationPriority,
    /// Year by which to act.
    pub year: u32,
    pub title: String,
    pub detail: String,
    pub estimated_monthly_savings: Option<f64>,
}

/// Derive ranked recommendations from a projection.
///
/// The heuristics read the year-ordered points and the already-reduced
/// warning list; they never mutate either.
pub fn derive_recommendations(
    points: &[ProjectionPoint],
    warnings: &[CapacityWarning],
) -> Vec<ScalingRecommendation> {
    let mut recommendations = Vec::new();
    let (Some(baseline), Some(last)) = (points.first(), points.last()) else {
        return recommendations;
    };

    if let Some(critical) = warnings
        .iter()
        .find(|w| w.severity == WarningSeverity::Critical)
    {
        recommendations.push(ScalingRecommendation {
            priority: RecommendationPriority::High,
            year: critical.year.saturating_sub(1),
            title: "Split the cluster".to_string(),
            detail: format!(
                "projected nodes reach {:.0}% of the {}-node ceiling in year {}; plan a second cluster before then",
                critical.utilization_percent, critical.node_ceiling, critical.year
            ),
            estimated_monthly_savings: None,
        });
    }

    if let Some(year) = first_year_over(points, |p| growth_over(p.apps, baseline.apps), 100.0) {
        recommendations.push(ScalingRecommendation {
            priority: RecommendationPriority::Medium,
            year,
            title: "Enable autoscaling".to_string(),
            detail: format!(
                "application count more than doubles versus baseline by year {}; autoscaling absorbs the growth without manual resizing",
                year
            ),
            estimated_monthly_savings: None,
        });
    }

    if let Some(year) = first_year_over(points, |p| growth_over(p.nodes, baseline.nodes), 50.0) {
        recommendations.push(ScalingRecommendation {
            priority: RecommendationPriority::Medium,
            year,
            title: "Move to larger node shapes".to_string(),
            detail: format!(
                "node count grows more than 50% versus baseline by year {}; fewer, larger nodes reduce per-node overhead",
                year
            ),
            estimated_monthly_savings: None,
        });
    }

    if let Some(year) = first_year_over(
        points,
        |p| growth_over_f64(p.monthly_cost, baseline.monthly_cost),
        75.0,
    ) {
        recommendations.push(ScalingRecommendation {
            priority: RecommendationPriority::Medium,
            year,
            title: "Run a resource-optimization pass".to_string(),
            detail: format!(
                "monthly cost grows more than 75% versus baseline by year {}; right-sizing typically recovers ~15%",
                year
            ),
            estimated_monthly_savings: Some(last.monthly_cost * OPTIMIZATION_SAVINGS_FRACTION),
        });
    }

    recommendations.sort_by(|a, b| a.priority.cmp(&b.priority).then(a.year.cmp(&b.year)));
    recommendations
}

/// First year whose metric exceeds the threshold percent growth.
fn first_year_over(
    points: &[ProjectionPoint],
    metric: impl Fn(&ProjectionPoint) -> f64,
    threshold_percent: f64,
) -> Option<u32> {
    points
        .iter()
        .find(|p| metric(p) > threshold_percent)
        .map(|p| p.year)
}

fn growth_over(current: u32, baseline: u32) -> f64 {
    growth_over_f64(current as f64, baseline as f64)
}

fn growth_over_f64(current: f64, baseline: f64) -> f64 {
    if baseline <= 0.0 {
        0.0
    } else {
        (current / baseline - 1.0) * 100.0
    }
}
