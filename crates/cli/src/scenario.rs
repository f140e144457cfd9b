//! Scenario files
//!
//! One JSON document holding the workload, policy, catalog keys, and
//! growth settings for a planning run. Every field has a default so a
//! minimal file (or none at all) still produces a complete scenario.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use planner_lib::cluster::ClusterMode;
use planner_lib::cost::{CostOptions, DeploymentTarget, SupportTier};
use planner_lib::growth::GrowthSettings;
use planner_lib::models::{AppTier, EnvWorkload, Environment, TierCount, WorkloadSpec};
use planner_lib::policy::PolicySettings;
use planner_lib::vm::{
    EnvVmConfig, HaPattern, LoadBalancerOption, VmRoleConfig, DEFAULT_SYSTEM_OVERHEAD_PERCENT,
};

/// Cost knobs carried in the scenario; the distribution key lives at
/// the scenario root and is merged in when building [`CostOptions`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CostSection {
    pub target: DeploymentTarget,
    pub support_tier: SupportTier,
    pub egress_gb_month: f64,
    pub registry_storage_gb: f64,
}

impl Default for CostSection {
    fn default() -> Self {
        let defaults = CostOptions::default();
        Self {
            target: defaults.target,
            support_tier: defaults.support_tier,
            egress_gb_month: defaults.egress_gb_month,
            registry_storage_gb: defaults.registry_storage_gb,
        }
    }
}

/// A complete planning scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub distribution: String,
    pub technology: String,
    /// Pricing region; falls back to the CAPP_REGION setting.
    pub region: Option<String>,
    pub cluster_mode: ClusterMode,
    pub workload: WorkloadSpec,
    pub policy: PolicySettings,
    pub vm_environments: Vec<EnvVmConfig>,
    pub vm_system_overhead_percent: f64,
    pub cost: CostSection,
    pub growth: GrowthSettings,
}

impl Default for Scenario {
    fn default() -> Self {
        let mut workload = WorkloadSpec::default();
        workload.environments.dev = EnvWorkload {
            enabled: true,
            apps: TierCount {
                small: 10,
                medium: 5,
                ..Default::default()
            },
        };
        workload.environments.production = EnvWorkload {
            enabled: true,
            apps: TierCount {
                small: 20,
                medium: 40,
                large: 10,
                ..Default::default()
            },
        };

        Self {
            distribution: "openshift".to_string(),
            technology: "spring-boot".to_string(),
            region: None,
            cluster_mode: ClusterMode::IsolatedPerEnvironment,
            workload,
            policy: PolicySettings::default(),
            vm_environments: vec![EnvVmConfig {
                environment: Environment::Production,
                enabled: true,
                ha_pattern: HaPattern::NPlusOne,
                load_balancer: LoadBalancerOption::HaPair,
                roles: vec![
                    VmRoleConfig {
                        role: "app-server".to_string(),
                        tier: AppTier::Medium,
                        instances: 4,
                    },
                    VmRoleConfig {
                        role: "database".to_string(),
                        tier: AppTier::Large,
                        instances: 2,
                    },
                ],
                extra_storage_gb: 500.0,
            }],
            vm_system_overhead_percent: DEFAULT_SYSTEM_OVERHEAD_PERCENT,
            cost: CostSection::default(),
            growth: GrowthSettings::default(),
        }
    }
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse scenario file {}", path.display()))
    }

    /// Pricing region, resolved against the settings fallback.
    pub fn resolved_region(&self, fallback: &str) -> String {
        self.region.clone().unwrap_or_else(|| fallback.to_string())
    }

    /// Cost options with the scenario's distribution key merged in.
    pub fn cost_options(&self) -> CostOptions {
        CostOptions {
            distribution: self.distribution.clone(),
            target: self.cost.target,
            support_tier: self.cost.support_tier,
            egress_gb_month: self.cost.egress_gb_month,
            registry_storage_gb: self.cost.registry_storage_gb,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scenario_has_enabled_environments() {
        let scenario = Scenario::default();
        assert_eq!(scenario.workload.enabled_environments().len(), 2);
    }

    #[test]
    fn test_minimal_file_round_trips() {
        let scenario: Scenario = serde_json::from_str("{}").unwrap();
        assert_eq!(scenario.distribution, "openshift");

        let json = serde_json::to_string(&scenario).unwrap();
        let back: Scenario = serde_json::from_str(&json).unwrap();
        assert_eq!(back.technology, scenario.technology);
    }

    #[test]
    fn test_partial_override() {
        let scenario: Scenario =
            serde_json::from_str(r#"{"distribution": "eks", "region": "eu-west"}"#).unwrap();
        assert_eq!(scenario.distribution, "eks");
        assert_eq!(scenario.resolved_region("us-east"), "eu-west");
        assert_eq!(Scenario::default().resolved_region("us-east"), "us-east");
    }
}
