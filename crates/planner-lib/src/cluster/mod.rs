//! Cluster sizing
//!
//! This module converts a workload description into node counts and
//! aggregate resources for container-orchestration clusters:
//! - `calculator` sizes one cluster for one environment class
//! - `orchestrator` dispatches over the cluster mode and combines
//!   per-cluster results

mod calculator;
mod orchestrator;

pub use orchestrator::{calculate_cluster_sizing, ClusterMode};

use serde::{Deserialize, Serialize};

use crate::models::ResourceTotals;

/// Node counts by role for one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NodeCounts {
    pub control_plane: u32,
    pub infrastructure: u32,
    pub workers: u32,
}

impl NodeCounts {
    pub fn total(&self) -> u32 {
        self.control_plane + self.infrastructure + self.workers
    }

    pub fn plus(&self, other: &NodeCounts) -> NodeCounts {
        NodeCounts {
            control_plane: self.control_plane + other.control_plane,
            infrastructure: self.infrastructure + other.infrastructure,
            workers: self.workers + other.workers,
        }
    }
}

/// Sizing of a single cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvClusterSizing {
    /// Display label: the environment name, or "Shared Cluster".
    pub label: String,
    /// Whether the cluster was sized with production shapes and policy.
    pub production_class: bool,
    pub nodes: NodeCounts,
    pub apps: u32,
    pub replicas: u32,
    /// apps x replicas
    pub pods: u32,
    pub resources: ResourceTotals,
}

/// Full result set of one cluster sizing calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSizingResult {
    pub mode: ClusterMode,
    pub distribution: String,
    /// Echoed from the topology so cost estimation does not need a
    /// second catalog lookup.
    pub managed_control_plane: bool,
    pub clusters: Vec<EnvClusterSizing>,
    pub total_nodes: NodeCounts,
    pub total_resources: ResourceTotals,
    pub total_apps: u32,
    pub total_pods: u32,
    pub generated_at: i64,
}

impl ClusterSizingResult {
    /// Grand totals are an element-wise sum over the member clusters.
    pub(crate) fn from_clusters(
        mode: ClusterMode,
        distribution: &str,
        managed_control_plane: bool,
        clusters: Vec<EnvClusterSizing>,
    ) -> Self {
        let total_nodes = clusters
            .iter()
            .fold(NodeCounts::default(), |acc, c| acc.plus(&c.nodes));
        let total_resources = clusters
            .iter()
            .fold(ResourceTotals::default(), |acc, c| acc.plus(&c.resources));
        let total_apps = clusters.iter().map(|c| c.apps).sum();
        let total_pods = clusters.iter().map(|c| c.pods).sum();
        Self {
            mode,
            distribution: distribution.to_string(),
            managed_control_plane,
            clusters,
            total_nodes,
            total_resources,
            total_apps,
            total_pods,
            generated_at: chrono::Utc::now().timestamp(),
        }
    }
}
