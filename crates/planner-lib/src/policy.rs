//! Sizing policy settings
//!
//! Headroom, replicas, overcommit, and node floor/ceiling rules. The
//! defaults mirror common production practice; callers override per
//! scenario. `validate` rejects values no sizing rule can interpret.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::PerEnv;

/// Minimum worker nodes per cluster.
pub const DEFAULT_MIN_WORKERS: u32 = 3;

/// Minimum infrastructure nodes when the topology supports them.
pub const DEFAULT_MIN_INFRA: u32 = 3;

/// Ceiling on infrastructure nodes.
pub const DEFAULT_MAX_INFRA: u32 = 30;

/// Worker count above which the control plane grows from 3 to 5.
pub const DEFAULT_LARGE_CLUSTER_WORKER_THRESHOLD: u32 = 100;

/// Apps handled per infrastructure node.
pub const DEFAULT_APPS_PER_INFRA_NODE: u32 = 25;

/// App count at which a production cluster gets the raised infra floor.
pub const DEFAULT_LARGE_DEPLOYMENT_APP_THRESHOLD: u32 = 50;

/// Raised infrastructure floor for large production deployments.
pub const DEFAULT_LARGE_PRODUCTION_INFRA_FLOOR: u32 = 5;

/// Fraction of node capacity left after system daemons and kubelet
/// reservations.
pub const DEFAULT_SYSTEM_RESERVE_FRACTION: f64 = 0.8;

/// Overcommit ratios, production vs non-production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OvercommitRatios {
    pub production: f64,
    pub non_production: f64,
}

impl OvercommitRatios {
    pub fn for_class(&self, production_class: bool) -> f64 {
        if production_class {
            self.production
        } else {
            self.non_production
        }
    }
}

/// All tunable sizing policy in one immutable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicySettings {
    /// Extra worker capacity above the computed minimum, percent.
    pub headroom_percent: PerEnv<f64>,
    /// Replicas per application.
    pub replicas: PerEnv<u32>,
    pub cpu_overcommit: OvercommitRatios,
    pub ram_overcommit: OvercommitRatios,
    pub system_reserve_fraction: f64,
    pub min_workers: u32,
    /// No ceiling when absent.
    pub max_workers: Option<u32>,
    pub min_infra: u32,
    pub max_infra: u32,
    pub apps_per_infra_node: u32,
    pub large_cluster_worker_threshold: u32,
    pub large_deployment_app_threshold: u32,
    pub large_production_infra_floor: u32,
}

impl Default for PolicySettings {
    fn default() -> Self {
        Self {
            headroom_percent: PerEnv {
                dev: 0.0,
                test: 0.0,
                staging: 10.0,
                production: 20.0,
            },
            replicas: PerEnv {
                dev: 1,
                test: 1,
                staging: 2,
                production: 3,
            },
            cpu_overcommit: OvercommitRatios {
                production: 1.0,
                non_production: 2.0,
            },
            ram_overcommit: OvercommitRatios {
                production: 1.0,
                non_production: 1.5,
            },
            system_reserve_fraction: DEFAULT_SYSTEM_RESERVE_FRACTION,
            min_workers: DEFAULT_MIN_WORKERS,
            max_workers: None,
            min_infra: DEFAULT_MIN_INFRA,
            max_infra: DEFAULT_MAX_INFRA,
            apps_per_infra_node: DEFAULT_APPS_PER_INFRA_NODE,
            large_cluster_worker_threshold: DEFAULT_LARGE_CLUSTER_WORKER_THRESHOLD,
            large_deployment_app_threshold: DEFAULT_LARGE_DEPLOYMENT_APP_THRESHOLD,
            large_production_infra_floor: DEFAULT_LARGE_PRODUCTION_INFRA_FLOOR,
        }
    }
}

impl PolicySettings {
    /// Reject settings no sizing rule can interpret. Runs before any
    /// computation so a bad scenario never produces partial results.
    pub fn validate(&self) -> Result<(), PlanError> {
        for env in crate::models::Environment::ALL {
            let headroom = *self.headroom_percent.get(env);
            if headroom < 0.0 {
                return Err(PlanError::invalid(format!(
                    "headroom for {} must be >= 0, got {}",
                    env, headroom
                )));
            }
        }
        if self.cpu_overcommit.production <= 0.0
            || self.cpu_overcommit.non_production <= 0.0
            || self.ram_overcommit.production <= 0.0
            || self.ram_overcommit.non_production <= 0.0
        {
            return Err(PlanError::invalid("overcommit ratios must be > 0"));
        }
        if self.system_reserve_fraction <= 0.0 || self.system_reserve_fraction > 1.0 {
            return Err(PlanError::invalid(format!(
                "system reserve fraction must be in (0, 1], got {}",
                self.system_reserve_fraction
            )));
        }
        if self.apps_per_infra_node == 0 {
            return Err(PlanError::invalid("apps per infra node must be > 0"));
        }
        if let Some(max) = self.max_workers {
            if max < self.min_workers {
                return Err(PlanError::invalid(format!(
                    "max workers {} below min workers {}",
                    max, self.min_workers
                )));
            }
        }
        if self.max_infra < self.min_infra {
            return Err(PlanError::invalid(format!(
                "max infra {} below min infra {}",
                self.max_infra, self.min_infra
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(PolicySettings::default().validate().is_ok());
    }

    #[test]
    fn test_negative_headroom_rejected() {
        let mut policy = PolicySettings::default();
        policy.headroom_percent.dev = -5.0;
        assert!(matches!(
            policy.validate(),
            Err(PlanError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_overcommit_rejected() {
        let mut policy = PolicySettings::default();
        policy.cpu_overcommit.non_production = 0.0;
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_reserve_fraction_bounds() {
        let mut policy = PolicySettings::default();
        policy.system_reserve_fraction = 0.0;
        assert!(policy.validate().is_err());
        policy.system_reserve_fraction = 1.2;
        assert!(policy.validate().is_err());
        policy.system_reserve_fraction = 1.0;
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn test_worker_ceiling_below_floor_rejected() {
        let mut policy = PolicySettings::default();
        policy.max_workers = Some(2);
        assert!(policy.validate().is_err());
    }
}
