//! Catalog lookup tables
//!
//! Read-only tables supplied by the caller once per calculation:
//! - distribution identifier -> topology capabilities and node shapes
//! - technology identifier -> per-tier footprints and VM role templates
//! - provider/region identifier -> pricing model
//!
//! The engine owns the table types and the typed lookup; the contents
//! come from the caller. A missing key is reported, never substituted.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{NodeSpec, PerTier, TierFootprint};

/// Default node ceiling for distributions that do not declare one.
pub const DEFAULT_MAX_CLUSTER_NODES: u32 = 2000;

/// Node shapes for one cluster role, production and non-production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoleSpecs {
    pub production: NodeSpec,
    pub non_production: NodeSpec,
}

impl RoleSpecs {
    /// Same shape regardless of environment class.
    pub fn uniform(spec: NodeSpec) -> Self {
        Self {
            production: spec,
            non_production: spec,
        }
    }

    pub fn for_class(&self, production_class: bool) -> &NodeSpec {
        if production_class {
            &self.production
        } else {
            &self.non_production
        }
    }
}

/// What one distribution can do and what its nodes look like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopologyCapabilities {
    /// Control plane is hosted by the provider; no control-plane nodes
    /// are counted or priced.
    pub has_managed_control_plane: bool,
    /// Distribution separates router/registry/monitoring workloads onto
    /// dedicated infrastructure nodes.
    pub has_infrastructure_nodes: bool,
    pub control_plane: RoleSpecs,
    pub worker: RoleSpecs,
    pub infrastructure: RoleSpecs,
    /// Upper bound on nodes per cluster, used for capacity warnings.
    pub max_cluster_nodes: u32,
}

/// Template for one VM role: per-tier shapes and a default instance
/// count used when a scenario does not set one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmRoleTemplate {
    pub role: String,
    pub shapes: PerTier<NodeSpec>,
    pub default_instances: u32,
}

/// Per-technology resource footprints and VM role templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub footprints: PerTier<TierFootprint>,
    /// Multiplier applied to VM RAM for memory-heavy runtimes.
    pub memory_multiplier: f64,
    pub vm_roles: Vec<VmRoleTemplate>,
}

impl TechnologyProfile {
    pub fn vm_role(&self, role: &str) -> Result<&VmRoleTemplate, PlanError> {
        self.vm_roles
            .iter()
            .find(|t| t.role == role)
            .ok_or_else(|| PlanError::unknown_key("vm role", role))
    }
}

/// Distribution -> topology capability table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopologyCatalog {
    entries: HashMap<String, TopologyCapabilities>,
}

impl TopologyCatalog {
    pub fn new(entries: HashMap<String, TopologyCapabilities>) -> Self {
        Self { entries }
    }

    pub fn get(&self, distribution: &str) -> Result<&TopologyCapabilities, PlanError> {
        self.entries
            .get(distribution)
            .ok_or_else(|| PlanError::unknown_key("distribution", distribution))
    }

    pub fn distributions(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Technology -> footprint/template table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TechnologyCatalog {
    entries: HashMap<String, TechnologyProfile>,
}

impl TechnologyCatalog {
    pub fn new(entries: HashMap<String, TechnologyProfile>) -> Self {
        Self { entries }
    }

    pub fn get(&self, technology: &str) -> Result<&TechnologyProfile, PlanError> {
        self.entries
            .get(technology)
            .ok_or_else(|| PlanError::unknown_key("technology", technology))
    }

    pub fn technologies(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Rates for the on-premises cost model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnPremPricing {
    /// Acquisition cost of one server, amortized over the refresh cycle.
    pub server_unit_cost: f64,
    pub hardware_refresh_years: u32,
    pub rack_unit_month: f64,
    pub power_cooling_month: f64,
    pub admin_salary_year: f64,
    pub servers_per_admin: u32,
}

/// Cloud and on-premises rates for one provider/region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingModel {
    pub currency: String,
    pub cpu_core_hour: f64,
    pub ram_gb_hour: f64,
    pub managed_control_plane_hour: f64,
    pub block_storage_gb_month: f64,
    pub registry_storage_gb_month: f64,
    pub egress_gb: f64,
    pub load_balancer_hour: f64,
    pub nat_gateway_month: f64,
    /// Per-node-per-year license rate by distribution. A distribution
    /// absent from this table is unlicensed, not an error.
    pub license_per_node_year: HashMap<String, f64>,
    pub on_premises: OnPremPricing,
}

impl PricingModel {
    pub fn license_rate(&self, distribution: &str) -> f64 {
        self.license_per_node_year
            .get(distribution)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Provider/region -> pricing model table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingCatalog {
    entries: HashMap<String, PricingModel>,
}

impl PricingCatalog {
    pub fn new(entries: HashMap<String, PricingModel>) -> Self {
        Self { entries }
    }

    pub fn get(&self, region: &str) -> Result<&PricingModel, PlanError> {
        self.entries
            .get(region)
            .ok_or_else(|| PlanError::unknown_key("pricing region", region))
    }
}
