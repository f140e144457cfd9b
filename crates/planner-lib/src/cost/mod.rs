//! Cost estimation
//!
//! Consumes a sizing result plus a pricing model and produces a
//! categorized monthly/yearly breakdown:
//! - `cloud` prices compute/storage/network against rate tables
//! - `onprem` amortizes hardware and adds data-center and labor models
//! - license and support categories are shared by both variants
//!
//! Percentages and per-environment shares are always derived from the
//! finalized totals, never estimated independently.

mod cloud;
mod onprem;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::PricingModel;
use crate::cluster::ClusterSizingResult;
use crate::error::PlanError;
use crate::models::ResourceTotals;
use crate::vm::VmSizingResult;

/// Billing hours per month.
pub const HOURS_PER_MONTH: f64 = 730.0;

/// Cost categories across both deployment targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Compute,
    Storage,
    Network,
    License,
    Support,
    DataCenter,
    Labor,
}

impl CostCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CostCategory::Compute => "Compute",
            CostCategory::Storage => "Storage",
            CostCategory::Network => "Network",
            CostCategory::License => "License",
            CostCategory::Support => "Support",
            CostCategory::DataCenter => "Data Center",
            CostCategory::Labor => "Labor",
        }
    }
}

impl std::fmt::Display for CostCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Support tier, priced as a percentage of all other categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportTier {
    #[default]
    None,
    Basic,
    Developer,
    Business,
    Enterprise,
}

impl SupportTier {
    pub fn percent(&self) -> f64 {
        match self {
            SupportTier::None => 0.0,
            SupportTier::Basic => 3.0,
            SupportTier::Developer => 5.0,
            SupportTier::Business => 10.0,
            SupportTier::Enterprise => 15.0,
        }
    }
}

/// Where the sized infrastructure runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentTarget {
    #[default]
    Cloud,
    OnPremises,
}

/// Caller-selected cost knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostOptions {
    pub distribution: String,
    pub target: DeploymentTarget,
    pub support_tier: SupportTier,
    pub egress_gb_month: f64,
    pub registry_storage_gb: f64,
}

impl Default for CostOptions {
    fn default() -> Self {
        Self {
            distribution: "kubernetes".to_string(),
            target: DeploymentTarget::Cloud,
            support_tier: SupportTier::None,
            egress_gb_month: 1000.0,
            registry_storage_gb: 100.0,
        }
    }
}

/// One priced line inside a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLineItem {
    pub label: String,
    pub monthly: f64,
}

/// One category's monthly cost and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCost {
    pub category: CostCategory,
    pub monthly: f64,
    pub percent_of_total: f64,
    pub items: Vec<CostLineItem>,
}

/// Cost attributed to one environment, proportional to its share of
/// the sized infrastructure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvCostShare {
    pub label: String,
    pub share_percent: f64,
    pub monthly: f64,
}

/// Full categorized cost estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub currency: String,
    pub monthly_total: f64,
    pub yearly_total: f64,
    pub categories: Vec<CategoryCost>,
    pub by_environment: Vec<EnvCostShare>,
    pub generated_at: i64,
}

/// What cost estimation needs from a sizing result, independent of
/// whether it came from clusters or VM fleets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBasis {
    /// Total nodes or VM instances.
    pub nodes: u32,
    pub clusters: u32,
    pub managed_control_plane: bool,
    /// Provider-managed load balancers billed hourly.
    pub load_balancers: u32,
    pub resources: ResourceTotals,
    /// Environment label -> allocation weight. Node counts for
    /// clusters, combined CPU+RAM for VM fleets.
    pub environment_weights: Vec<(String, f64)>,
}

impl ClusterSizingResult {
    /// Allocation weights are node counts: a consistent, auditable rule
    /// rather than a separately priced calculation.
    pub fn cost_basis(&self) -> CostBasis {
        CostBasis {
            nodes: self.total_nodes.total(),
            clusters: self.clusters.len() as u32,
            managed_control_plane: self.managed_control_plane,
            // One provider load balancer fronting each cluster ingress.
            load_balancers: self.clusters.len() as u32,
            resources: self.total_resources,
            environment_weights: self
                .clusters
                .iter()
                .map(|c| (c.label.clone(), c.nodes.total() as f64))
                .collect(),
        }
    }
}

impl VmSizingResult {
    /// Allocation weights are combined CPU+RAM per environment.
    pub fn cost_basis(&self) -> CostBasis {
        CostBasis {
            nodes: self.total_instances,
            clusters: 0,
            managed_control_plane: false,
            load_balancers: self.cloud_lb_count,
            resources: self.total_resources,
            environment_weights: self
                .environments
                .iter()
                .map(|e| {
                    (
                        e.environment.label().to_string(),
                        e.resources.cpu_cores + e.resources.ram_gb,
                    )
                })
                .collect(),
        }
    }
}

/// Estimate monthly and yearly cost for a sizing result.
pub fn estimate_cost(
    basis: &CostBasis,
    pricing: &PricingModel,
    options: &CostOptions,
) -> Result<CostBreakdown, PlanError> {
    validate(basis, pricing, options)?;
    debug!(deployment = ?options.target, nodes = basis.nodes, "estimating cost");

    let mut categories = match options.target {
        DeploymentTarget::Cloud => cloud::categories(basis, pricing, options),
        DeploymentTarget::OnPremises => onprem::categories(basis, pricing)?,
    };

    // License applies to both targets; absent table entries mean the
    // distribution is unlicensed.
    let license_monthly =
        pricing.license_rate(&options.distribution) / 12.0 * basis.nodes as f64;
    categories.push(category(
        CostCategory::License,
        vec![CostLineItem {
            label: format!("{} subscription", options.distribution),
            monthly: license_monthly,
        }],
    ));

    // Support is a percentage of everything else, so it is priced last.
    let subtotal: f64 = categories.iter().map(|c| c.monthly).sum();
    let support_monthly = subtotal * options.support_tier.percent() / 100.0;
    categories.push(category(
        CostCategory::Support,
        vec![CostLineItem {
            label: format!("{:?} support plan", options.support_tier),
            monthly: support_monthly,
        }],
    ));

    let monthly_total: f64 = categories.iter().map(|c| c.monthly).sum();
    for cat in &mut categories {
        cat.percent_of_total = if monthly_total > 0.0 {
            cat.monthly / monthly_total * 100.0
        } else {
            0.0
        };
    }

    Ok(CostBreakdown {
        currency: pricing.currency.clone(),
        monthly_total,
        yearly_total: monthly_total * 12.0,
        categories,
        by_environment: allocate(basis, monthly_total),
        generated_at: chrono::Utc::now().timestamp(),
    })
}

fn validate(
    basis: &CostBasis,
    pricing: &PricingModel,
    options: &CostOptions,
) -> Result<(), PlanError> {
    if options.egress_gb_month < 0.0 || options.registry_storage_gb < 0.0 {
        return Err(PlanError::invalid(
            "egress and registry storage must be >= 0",
        ));
    }
    let rates = [
        pricing.cpu_core_hour,
        pricing.ram_gb_hour,
        pricing.managed_control_plane_hour,
        pricing.block_storage_gb_month,
        pricing.registry_storage_gb_month,
        pricing.egress_gb,
        pricing.load_balancer_hour,
        pricing.nat_gateway_month,
    ];
    if rates.iter().any(|r| r.is_nan() || *r < 0.0) {
        return Err(PlanError::invalid("pricing rates must be >= 0"));
    }
    if !basis.resources.cpu_cores.is_finite() || !basis.resources.ram_gb.is_finite() {
        return Err(PlanError::degenerate("sizing totals are not finite"));
    }
    Ok(())
}

pub(crate) fn category(kind: CostCategory, items: Vec<CostLineItem>) -> CategoryCost {
    let monthly = items.iter().map(|i| i.monthly).sum();
    CategoryCost {
        category: kind,
        monthly,
        // Finalized once the grand total is known.
        percent_of_total: 0.0,
        items,
    }
}

/// Split the finalized total across environments by their weights.
fn allocate(basis: &CostBasis, monthly_total: f64) -> Vec<EnvCostShare> {
    let total_weight: f64 = basis.environment_weights.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }
    basis
        .environment_weights
        .iter()
        .map(|(label, weight)| {
            let share = weight / total_weight;
            EnvCostShare {
                label: label.clone(),
                share_percent: share * 100.0,
                monthly: monthly_total * share,
            }
        })
        .collect()
}
