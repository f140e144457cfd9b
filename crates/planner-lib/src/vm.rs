//! VM fleet sizing
//!
//! Role-based virtual-machine fleets: no control-plane or
//! infrastructure-node distinction, but HA multipliers per environment
//! and load-balancer sizing instead.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::TechnologyProfile;
use crate::error::PlanError;
use crate::models::{AppTier, Environment, NodeSpec, ResourceTotals};

/// System overhead added to every VM's CPU and RAM (OS, agents).
pub const DEFAULT_SYSTEM_OVERHEAD_PERCENT: f64 = 10.0;

/// Redundancy scheme for the VMs of one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HaPattern {
    None,
    ActiveActive,
    ActivePassive,
    NPlusOne,
    NPlusTwo,
}

impl HaPattern {
    /// HA-adjusted instance count, always whole instances.
    ///
    /// Active-active needs at least a pair; active-passive doubles the
    /// fleet; N+1/N+2 add spares (the ceil(base x (N+k)/N) rule with
    /// N = base collapses to base + k).
    pub fn adjusted_instances(&self, base: u32) -> u32 {
        if base == 0 {
            return 0;
        }
        match self {
            HaPattern::None => base,
            HaPattern::ActiveActive => base.max(2),
            HaPattern::ActivePassive => base * 2,
            HaPattern::NPlusOne => base + 1,
            HaPattern::NPlusTwo => base + 2,
        }
    }
}

/// Load-balancer provisioning for one environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadBalancerOption {
    None,
    /// One self-managed LB VM.
    Single,
    /// Two self-managed LB VMs.
    HaPair,
    /// Provider-managed; no VMs, priced in the network category.
    CloudManaged,
}

impl LoadBalancerOption {
    pub fn instances(&self) -> u32 {
        match self {
            LoadBalancerOption::None | LoadBalancerOption::CloudManaged => 0,
            LoadBalancerOption::Single => 1,
            LoadBalancerOption::HaPair => 2,
        }
    }

    /// Fixed shape of one self-managed load-balancer VM.
    pub fn vm_spec(&self) -> NodeSpec {
        match self {
            LoadBalancerOption::None | LoadBalancerOption::CloudManaged => NodeSpec::default(),
            LoadBalancerOption::Single | LoadBalancerOption::HaPair => {
                NodeSpec::new(2.0, 4.0, 50.0)
            }
        }
    }

    pub fn is_cloud_managed(&self) -> bool {
        matches!(self, LoadBalancerOption::CloudManaged)
    }
}

/// One role the scenario wants deployed in an environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmRoleConfig {
    pub role: String,
    pub tier: AppTier,
    pub instances: u32,
}

/// VM fleet configuration for one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVmConfig {
    pub environment: Environment,
    pub enabled: bool,
    pub ha_pattern: HaPattern,
    pub load_balancer: LoadBalancerOption,
    pub roles: Vec<VmRoleConfig>,
    pub extra_storage_gb: f64,
}

/// Sized instances of one role in one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmRoleInstance {
    pub role: String,
    pub tier: AppTier,
    pub base_instances: u32,
    pub ha_instances: u32,
    pub per_instance: NodeSpec,
    pub resources: ResourceTotals,
}

/// VM fleet sizing for one environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvVmSizing {
    pub environment: Environment,
    pub ha_pattern: HaPattern,
    pub load_balancer: LoadBalancerOption,
    pub roles: Vec<VmRoleInstance>,
    pub lb_instances: u32,
    pub total_instances: u32,
    pub resources: ResourceTotals,
}

/// Full VM fleet sizing result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VmSizingResult {
    pub environments: Vec<EnvVmSizing>,
    pub total_instances: u32,
    /// Environments that chose a provider-managed load balancer; priced
    /// in the network cost category.
    pub cloud_lb_count: u32,
    pub total_resources: ResourceTotals,
    pub generated_at: i64,
}

/// Size role-based VM fleets for the configured environments.
pub fn calculate_vm_fleet_sizing(
    technology: &TechnologyProfile,
    configs: &[EnvVmConfig],
    system_overhead_percent: f64,
) -> Result<VmSizingResult, PlanError> {
    if system_overhead_percent < 0.0 {
        return Err(PlanError::invalid(format!(
            "system overhead must be >= 0, got {}",
            system_overhead_percent
        )));
    }
    if technology.memory_multiplier <= 0.0 {
        return Err(PlanError::invalid(format!(
            "memory multiplier must be > 0, got {}",
            technology.memory_multiplier
        )));
    }

    let enabled: Vec<&EnvVmConfig> = configs.iter().filter(|c| c.enabled).collect();
    if enabled.is_empty() {
        return Err(PlanError::invalid("no environments enabled for VM sizing"));
    }

    let mut environments = Vec::with_capacity(enabled.len());
    for config in enabled {
        environments.push(size_environment(technology, config, system_overhead_percent)?);
    }

    let total_instances = environments.iter().map(|e| e.total_instances).sum();
    let cloud_lb_count = environments
        .iter()
        .filter(|e| e.load_balancer.is_cloud_managed())
        .count() as u32;
    let total_resources = environments
        .iter()
        .fold(ResourceTotals::default(), |acc, e| acc.plus(&e.resources));

    debug!(total_instances, cloud_lb_count, "sized VM fleet");

    Ok(VmSizingResult {
        environments,
        total_instances,
        cloud_lb_count,
        total_resources,
        generated_at: chrono::Utc::now().timestamp(),
    })
}

fn size_environment(
    technology: &TechnologyProfile,
    config: &EnvVmConfig,
    overhead_percent: f64,
) -> Result<EnvVmSizing, PlanError> {
    let overhead = 1.0 + overhead_percent / 100.0;

    let mut roles = Vec::with_capacity(config.roles.len());
    for role_config in &config.roles {
        let template = technology.vm_role(&role_config.role)?;
        let shape = template.shapes.get(role_config.tier);

        // Base footprint by role and tier, RAM scaled for memory-heavy
        // runtimes, then CPU and RAM inflated by the system overhead.
        let per_instance = NodeSpec {
            cpu_cores: shape.cpu_cores * overhead,
            ram_gb: shape.ram_gb * technology.memory_multiplier * overhead,
            disk_gb: shape.disk_gb,
        };

        let base = if role_config.instances > 0 {
            role_config.instances
        } else {
            template.default_instances
        };
        let ha_instances = config.ha_pattern.adjusted_instances(base);

        roles.push(VmRoleInstance {
            role: role_config.role.clone(),
            tier: role_config.tier,
            base_instances: base,
            ha_instances,
            per_instance,
            resources: per_instance.times(ha_instances),
        });
    }

    let lb_instances = config.load_balancer.instances();
    let lb_resources = config.load_balancer.vm_spec().times(lb_instances);

    let mut resources = roles
        .iter()
        .fold(ResourceTotals::default(), |acc, r| acc.plus(&r.resources));
    resources = resources.plus(&lb_resources);
    resources.disk_gb += config.extra_storage_gb;

    let total_instances = roles.iter().map(|r| r.ha_instances).sum::<u32>() + lb_instances;

    Ok(EnvVmSizing {
        environment: config.environment,
        ha_pattern: config.ha_pattern,
        load_balancer: config.load_balancer,
        roles,
        lb_instances,
        total_instances,
        resources,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::VmRoleTemplate;
    use crate::models::{PerTier, TierFootprint};

    fn sample_technology() -> TechnologyProfile {
        TechnologyProfile {
            footprints: PerTier::<TierFootprint>::default(),
            memory_multiplier: 1.5,
            vm_roles: vec![VmRoleTemplate {
                role: "app-server".to_string(),
                shapes: PerTier {
                    small: NodeSpec::new(2.0, 4.0, 50.0),
                    medium: NodeSpec::new(4.0, 8.0, 100.0),
                    large: NodeSpec::new(8.0, 16.0, 200.0),
                    extra_large: NodeSpec::new(16.0, 32.0, 400.0),
                },
                default_instances: 2,
            }],
        }
    }

    fn sample_config(ha: HaPattern, lb: LoadBalancerOption) -> EnvVmConfig {
        EnvVmConfig {
            environment: Environment::Production,
            enabled: true,
            ha_pattern: ha,
            load_balancer: lb,
            roles: vec![VmRoleConfig {
                role: "app-server".to_string(),
                tier: AppTier::Medium,
                instances: 3,
            }],
            extra_storage_gb: 0.0,
        }
    }

    #[test]
    fn test_ha_adjustments() {
        assert_eq!(HaPattern::None.adjusted_instances(3), 3);
        assert_eq!(HaPattern::ActiveActive.adjusted_instances(1), 2);
        assert_eq!(HaPattern::ActiveActive.adjusted_instances(4), 4);
        assert_eq!(HaPattern::ActivePassive.adjusted_instances(3), 6);
        assert_eq!(HaPattern::NPlusOne.adjusted_instances(3), 4);
        assert_eq!(HaPattern::NPlusTwo.adjusted_instances(3), 5);
        // No instances configured means nothing to make redundant
        assert_eq!(HaPattern::ActivePassive.adjusted_instances(0), 0);
    }

    #[test]
    fn test_memory_multiplier_and_overhead_applied() {
        let result = calculate_vm_fleet_sizing(
            &sample_technology(),
            &[sample_config(HaPattern::None, LoadBalancerOption::None)],
            10.0,
        )
        .unwrap();
        let role = &result.environments[0].roles[0];
        // Medium shape 4 cpu / 8 GB: cpu 4 * 1.1, ram 8 * 1.5 * 1.1
        assert!((role.per_instance.cpu_cores - 4.4).abs() < 1e-9);
        assert!((role.per_instance.ram_gb - 13.2).abs() < 1e-9);
        assert_eq!(role.per_instance.disk_gb, 100.0);
    }

    #[test]
    fn test_load_balancer_pair_added() {
        let result = calculate_vm_fleet_sizing(
            &sample_technology(),
            &[sample_config(HaPattern::None, LoadBalancerOption::HaPair)],
            0.0,
        )
        .unwrap();
        let env = &result.environments[0];
        assert_eq!(env.lb_instances, 2);
        assert_eq!(env.total_instances, 5);
        // LB pair contributes 2 x (2 cpu / 4 GB / 50 GB)
        assert!((env.resources.cpu_cores - (3.0 * 4.0 + 4.0)).abs() < 1e-9);
    }

    #[test]
    fn test_cloud_managed_lb_counted_not_sized() {
        let result = calculate_vm_fleet_sizing(
            &sample_technology(),
            &[sample_config(HaPattern::None, LoadBalancerOption::CloudManaged)],
            0.0,
        )
        .unwrap();
        assert_eq!(result.environments[0].lb_instances, 0);
        assert_eq!(result.cloud_lb_count, 1);
    }

    #[test]
    fn test_extra_storage_added_to_disk() {
        let mut config = sample_config(HaPattern::None, LoadBalancerOption::None);
        config.extra_storage_gb = 500.0;
        let result =
            calculate_vm_fleet_sizing(&sample_technology(), &[config], 0.0).unwrap();
        // 3 instances x 100 GB + 500 GB extra
        assert_eq!(result.total_resources.disk_gb, 800.0);
    }

    #[test]
    fn test_zero_instances_uses_template_default() {
        let mut config = sample_config(HaPattern::None, LoadBalancerOption::None);
        config.roles[0].instances = 0;
        let result =
            calculate_vm_fleet_sizing(&sample_technology(), &[config], 0.0).unwrap();
        assert_eq!(result.environments[0].roles[0].base_instances, 2);
    }

    #[test]
    fn test_unknown_role_is_error() {
        let mut config = sample_config(HaPattern::None, LoadBalancerOption::None);
        config.roles[0].role = "cache".to_string();
        let err =
            calculate_vm_fleet_sizing(&sample_technology(), &[config], 0.0).unwrap_err();
        assert!(matches!(err, PlanError::UnknownCatalogKey { .. }));
    }

    #[test]
    fn test_no_enabled_environments_rejected() {
        let mut config = sample_config(HaPattern::None, LoadBalancerOption::None);
        config.enabled = false;
        let err =
            calculate_vm_fleet_sizing(&sample_technology(), &[config], 0.0).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }
}
