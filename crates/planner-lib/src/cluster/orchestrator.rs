//! Topology orchestration
//!
//! Decides how many cluster calculations to run for a given cluster
//! mode and how to combine their outputs. Pure dispatch: no state
//! persists across invocations.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{TechnologyProfile, TopologyCapabilities};
use crate::error::PlanError;
use crate::models::{Environment, WorkloadSpec};
use crate::policy::PolicySettings;

use super::calculator::{size_cluster, ClusterRequest};
use super::ClusterSizingResult;

/// How environments map onto clusters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterMode {
    /// One independent cluster per enabled environment.
    IsolatedPerEnvironment,
    /// All enabled environments merged into one cluster, sized with
    /// production policy throughout.
    SingleShared,
    /// One cluster for a single environment. A standalone cluster is
    /// always sized and priced as production, whatever environment it
    /// represents.
    SingleScoped(Environment),
}

impl std::fmt::Display for ClusterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClusterMode::IsolatedPerEnvironment => write!(f, "isolated per environment"),
            ClusterMode::SingleShared => write!(f, "single shared"),
            ClusterMode::SingleScoped(env) => write!(f, "single cluster ({})", env),
        }
    }
}

/// Size the cluster topology for a workload.
///
/// Entry point for container-orchestration sizing: validates policy,
/// dispatches on the cluster mode, and returns a fully-populated result
/// with element-wise grand totals.
pub fn calculate_cluster_sizing(
    workload: &WorkloadSpec,
    technology: &TechnologyProfile,
    topology: &TopologyCapabilities,
    policy: &PolicySettings,
    mode: ClusterMode,
    distribution: &str,
) -> Result<ClusterSizingResult, PlanError> {
    policy.validate()?;
    debug!(%mode, distribution, "sizing clusters");

    let clusters = match mode {
        ClusterMode::IsolatedPerEnvironment => {
            let environments = workload.enabled_environments();
            if environments.is_empty() {
                return Err(PlanError::invalid("no environments enabled in workload"));
            }
            environments
                .into_iter()
                .map(|env| {
                    let request = ClusterRequest {
                        label: env.label(),
                        production_class: env.is_production(),
                        apps: workload.for_env(env).apps,
                        replicas: *policy.replicas.get(env),
                        headroom_percent: *policy.headroom_percent.get(env),
                    };
                    size_cluster(&request, technology, topology, policy)
                })
                .collect::<Result<Vec<_>, _>>()?
        }
        ClusterMode::SingleShared => {
            if workload.enabled_environments().is_empty() {
                return Err(PlanError::invalid("no environments enabled in workload"));
            }
            // The shared cluster has no prod/non-prod distinction:
            // merged app counts, production replicas and headroom.
            let request = ClusterRequest {
                label: "Shared Cluster",
                production_class: true,
                apps: workload.merged_apps(),
                replicas: *policy.replicas.get(Environment::Production),
                headroom_percent: *policy.headroom_percent.get(Environment::Production),
            };
            vec![size_cluster(&request, technology, topology, policy)?]
        }
        ClusterMode::SingleScoped(env) => {
            let env_workload = workload.for_env(env);
            if !env_workload.enabled {
                return Err(PlanError::invalid(format!(
                    "scoped environment {} is not enabled in the workload",
                    env
                )));
            }
            let request = ClusterRequest {
                label: env.label(),
                production_class: true,
                apps: env_workload.apps,
                replicas: *policy.replicas.get(Environment::Production),
                headroom_percent: *policy.headroom_percent.get(Environment::Production),
            };
            vec![size_cluster(&request, technology, topology, policy)?]
        }
    };

    Ok(ClusterSizingResult::from_clusters(
        mode,
        distribution,
        topology.has_managed_control_plane,
        clusters,
    ))
}
