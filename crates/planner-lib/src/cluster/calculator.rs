//! Node calculation for a single cluster
//!
//! Converts one environment's app counts into worker, control-plane,
//! and infrastructure node counts plus aggregate resources.

use crate::catalog::{TechnologyProfile, TopologyCapabilities};
use crate::error::PlanError;
use crate::models::{AppTier, TierCount};
use crate::policy::PolicySettings;

use super::{EnvClusterSizing, NodeCounts};

/// Inputs for sizing one cluster. The environment class drives spec and
/// overcommit selection; the label is carried through to the result.
pub(super) struct ClusterRequest<'a> {
    pub label: &'a str,
    pub production_class: bool,
    pub apps: TierCount,
    pub replicas: u32,
    pub headroom_percent: f64,
}

/// Size one cluster.
pub(super) fn size_cluster(
    request: &ClusterRequest<'_>,
    technology: &TechnologyProfile,
    topology: &TopologyCapabilities,
    policy: &PolicySettings,
) -> Result<EnvClusterSizing, PlanError> {
    let (required_cpu, required_ram) =
        required_resources(&request.apps, technology, request.replicas);

    let workers = worker_count(
        required_cpu,
        required_ram,
        request.production_class,
        request.headroom_percent,
        topology,
        policy,
    )?;

    let control_plane = control_plane_count(workers, topology, policy);
    let total_apps = request.apps.total();
    let infrastructure =
        infrastructure_count(total_apps, request.production_class, topology, policy);

    let nodes = NodeCounts {
        control_plane,
        infrastructure,
        workers,
    };

    // Workers always use the production shape, whatever the environment:
    // all workers are capacity-homogeneous across environments so that
    // pricing stays consistent. Control-plane and infrastructure shapes
    // follow the environment class.
    let resources = topology
        .worker
        .production
        .times(workers)
        .plus(
            &topology
                .control_plane
                .for_class(request.production_class)
                .times(control_plane),
        )
        .plus(
            &topology
                .infrastructure
                .for_class(request.production_class)
                .times(infrastructure),
        );

    Ok(EnvClusterSizing {
        label: request.label.to_string(),
        production_class: request.production_class,
        nodes,
        apps: total_apps,
        replicas: request.replicas,
        pods: total_apps * request.replicas,
        resources,
    })
}

/// Total CPU/RAM demanded by the workload: app count x tier footprint x
/// replicas, summed over tiers.
fn required_resources(
    apps: &TierCount,
    technology: &TechnologyProfile,
    replicas: u32,
) -> (f64, f64) {
    let mut cpu = 0.0;
    let mut ram = 0.0;
    for tier in AppTier::ALL {
        let count = *apps.get(tier) as f64;
        let footprint = technology.footprints.get(tier);
        cpu += count * footprint.cpu_cores * replicas as f64;
        ram += count * footprint.ram_gb * replicas as f64;
    }
    (cpu, ram)
}

/// Worker count: demand divided by usable per-node capacity, floored,
/// then inflated by headroom and capped by the configured ceiling.
fn worker_count(
    required_cpu: f64,
    required_ram: f64,
    production_class: bool,
    headroom_percent: f64,
    topology: &TopologyCapabilities,
    policy: &PolicySettings,
) -> Result<u32, PlanError> {
    let worker_spec = &topology.worker.production;
    let cpu_capacity = worker_spec.cpu_cores
        * policy.system_reserve_fraction
        * policy.cpu_overcommit.for_class(production_class);
    let ram_capacity = worker_spec.ram_gb
        * policy.system_reserve_fraction
        * policy.ram_overcommit.for_class(production_class);

    if cpu_capacity <= 0.0 || ram_capacity <= 0.0 {
        return Err(PlanError::degenerate(format!(
            "worker capacity is zero (cpu {:.3}, ram {:.3}); check the worker node spec",
            cpu_capacity, ram_capacity
        )));
    }

    let by_cpu = (required_cpu / cpu_capacity).ceil() as u32;
    let by_ram = (required_ram / ram_capacity).ceil() as u32;
    let mut workers = by_cpu.max(by_ram).max(policy.min_workers);

    if headroom_percent > 0.0 {
        workers = (workers as f64 * (1.0 + headroom_percent / 100.0)).ceil() as u32;
    }
    if let Some(max) = policy.max_workers {
        workers = workers.min(max);
    }
    Ok(workers)
}

/// Control plane: none when managed, five past the large-cluster
/// threshold, three otherwise (HA quorum).
fn control_plane_count(
    workers: u32,
    topology: &TopologyCapabilities,
    policy: &PolicySettings,
) -> u32 {
    if topology.has_managed_control_plane {
        0
    } else if workers > policy.large_cluster_worker_threshold {
        5
    } else {
        3
    }
}

/// Infrastructure nodes: app-count driven with a floor, a raised floor
/// for large production deployments, and a ceiling.
fn infrastructure_count(
    total_apps: u32,
    production_class: bool,
    topology: &TopologyCapabilities,
    policy: &PolicySettings,
) -> u32 {
    if !topology.has_infrastructure_nodes {
        return 0;
    }
    let by_apps = total_apps.div_ceil(policy.apps_per_infra_node);
    let mut infra = policy.min_infra.max(by_apps);
    if production_class && total_apps >= policy.large_deployment_app_threshold {
        infra = infra.max(policy.large_production_infra_floor);
    }
    infra.min(policy.max_infra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoleSpecs;
    use crate::models::{NodeSpec, PerTier, TierFootprint};

    fn sample_technology() -> TechnologyProfile {
        TechnologyProfile {
            footprints: PerTier {
                small: TierFootprint {
                    cpu_cores: 0.25,
                    ram_gb: 0.5,
                },
                medium: TierFootprint {
                    cpu_cores: 0.5,
                    ram_gb: 1.0,
                },
                large: TierFootprint {
                    cpu_cores: 1.0,
                    ram_gb: 2.0,
                },
                extra_large: TierFootprint {
                    cpu_cores: 2.0,
                    ram_gb: 4.0,
                },
            },
            memory_multiplier: 1.0,
            vm_roles: vec![],
        }
    }

    fn sample_topology(managed: bool, infra: bool) -> TopologyCapabilities {
        TopologyCapabilities {
            has_managed_control_plane: managed,
            has_infrastructure_nodes: infra,
            control_plane: RoleSpecs {
                production: NodeSpec::new(4.0, 16.0, 120.0),
                non_production: NodeSpec::new(2.0, 8.0, 120.0),
            },
            worker: RoleSpecs {
                production: NodeSpec::new(8.0, 32.0, 200.0),
                non_production: NodeSpec::new(4.0, 16.0, 200.0),
            },
            infrastructure: RoleSpecs {
                production: NodeSpec::new(4.0, 16.0, 300.0),
                non_production: NodeSpec::new(2.0, 8.0, 300.0),
            },
            max_cluster_nodes: 2000,
        }
    }

    fn prod_request(apps: TierCount) -> ClusterRequest<'static> {
        ClusterRequest {
            label: "Production",
            production_class: true,
            apps,
            replicas: 3,
            headroom_percent: 0.0,
        }
    }

    #[test]
    fn test_zero_apps_still_gets_worker_floor() {
        let sizing = size_cluster(
            &prod_request(TierCount::default()),
            &sample_technology(),
            &sample_topology(false, false),
            &PolicySettings::default(),
        )
        .unwrap();
        assert_eq!(sizing.nodes.workers, 3);
        assert_eq!(sizing.nodes.control_plane, 3);
        assert_eq!(sizing.nodes.infrastructure, 0);
    }

    #[test]
    fn test_managed_control_plane_is_zero() {
        // 70 medium apps at 0.5 cpu / 1 GB, replicas 3:
        // required cpu = 105, required ram = 210.
        // Worker capacity (prod): 8 * 0.8 * 1.0 = 6.4 cpu, 32 * 0.8 * 1.0 = 25.6 GB.
        // by_cpu = ceil(105/6.4) = 17, by_ram = ceil(210/25.6) = 9.
        let apps = TierCount {
            medium: 70,
            ..Default::default()
        };
        let sizing = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(true, false),
            &PolicySettings::default(),
        )
        .unwrap();
        assert_eq!(sizing.nodes.control_plane, 0);
        assert_eq!(sizing.nodes.workers, 17);
    }

    #[test]
    fn test_large_cluster_gets_five_control_plane_nodes() {
        let apps = TierCount {
            extra_large: 600,
            ..Default::default()
        };
        let sizing = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(false, false),
            &PolicySettings::default(),
        )
        .unwrap();
        assert!(sizing.nodes.workers > 100);
        assert_eq!(sizing.nodes.control_plane, 5);
    }

    #[test]
    fn test_infra_floor_raised_for_large_production() {
        // 50 apps in production: max(3, ceil(50/25)) = 3, raised to 5
        // because the environment is production-class and apps >= 50.
        let apps = TierCount {
            small: 50,
            ..Default::default()
        };
        let sizing = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(false, true),
            &PolicySettings::default(),
        )
        .unwrap();
        assert_eq!(sizing.nodes.infrastructure, 5);
    }

    #[test]
    fn test_infra_floor_not_raised_for_non_production() {
        let apps = TierCount {
            small: 50,
            ..Default::default()
        };
        let request = ClusterRequest {
            label: "Dev",
            production_class: false,
            apps,
            replicas: 1,
            headroom_percent: 0.0,
        };
        let sizing = size_cluster(
            &request,
            &sample_technology(),
            &sample_topology(false, true),
            &PolicySettings::default(),
        )
        .unwrap();
        assert_eq!(sizing.nodes.infrastructure, 3);
    }

    #[test]
    fn test_headroom_zero_is_noop() {
        // 40 medium apps, replicas 3: required cpu 60, ram 120.
        // by_cpu = ceil(60/6.4) = 10, by_ram = ceil(120/25.6) = 5.
        // Headroom 0 must leave the raw demand-based count untouched.
        let apps = TierCount {
            medium: 40,
            ..Default::default()
        };
        let sizing = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(false, false),
            &PolicySettings::default(),
        )
        .unwrap();
        assert_eq!(sizing.nodes.workers, 10);
    }

    #[test]
    fn test_headroom_inflates_workers() {
        let apps = TierCount {
            medium: 40,
            ..Default::default()
        };
        let base = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(false, false),
            &PolicySettings::default(),
        )
        .unwrap();

        let mut inflated = prod_request(apps);
        inflated.headroom_percent = 25.0;
        let with_headroom = size_cluster(
            &inflated,
            &sample_technology(),
            &sample_topology(false, false),
            &PolicySettings::default(),
        )
        .unwrap();
        let expected = (base.nodes.workers as f64 * 1.25).ceil() as u32;
        assert_eq!(with_headroom.nodes.workers, expected);
    }

    #[test]
    fn test_monotonic_in_app_count() {
        let policy = PolicySettings::default();
        let technology = sample_technology();
        let topology = sample_topology(false, false);
        let mut previous = 0;
        for medium in [0u32, 10, 20, 40, 80, 160, 320] {
            let apps = TierCount {
                medium,
                ..Default::default()
            };
            let sizing = size_cluster(&prod_request(apps), &technology, &topology, &policy)
                .unwrap();
            assert!(
                sizing.nodes.workers >= previous,
                "workers decreased from {} to {} at {} apps",
                previous,
                sizing.nodes.workers,
                medium
            );
            previous = sizing.nodes.workers;
        }
    }

    #[test]
    fn test_non_production_uses_production_worker_shape() {
        // 16 small apps at 0.25 cpu / 0.5 GB, replicas 1 in dev.
        // Non-prod overcommit is 2x cpu / 1.5x ram, so capacity uses the
        // production worker shape: 8 * 0.8 * 2.0 = 12.8 cpu per node.
        let apps = TierCount {
            small: 16,
            ..Default::default()
        };
        let request = ClusterRequest {
            label: "Dev",
            production_class: false,
            apps,
            replicas: 1,
            headroom_percent: 0.0,
        };
        let topology = sample_topology(false, false);
        let sizing = size_cluster(
            &request,
            &sample_technology(),
            &topology,
            &PolicySettings::default(),
        )
        .unwrap();
        // Floor applies; the aggregate must price 3 production-shaped
        // workers plus 3 non-production control-plane nodes.
        assert_eq!(sizing.nodes.workers, 3);
        let expected = topology
            .worker
            .production
            .times(3)
            .plus(&topology.control_plane.non_production.times(3));
        assert_eq!(sizing.resources, expected);
    }

    #[test]
    fn test_zero_capacity_worker_spec_is_degenerate() {
        let mut topology = sample_topology(false, false);
        topology.worker = RoleSpecs::uniform(NodeSpec::new(0.0, 0.0, 0.0));
        let apps = TierCount {
            medium: 10,
            ..Default::default()
        };
        let err = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &topology,
            &PolicySettings::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlanError::Degenerate(_)));
    }

    #[test]
    fn test_infra_ceiling_applies() {
        let mut policy = PolicySettings::default();
        policy.max_infra = 4;
        let apps = TierCount {
            small: 500,
            ..Default::default()
        };
        let sizing = size_cluster(
            &prod_request(apps),
            &sample_technology(),
            &sample_topology(false, true),
            &policy,
        )
        .unwrap();
        assert_eq!(sizing.nodes.infrastructure, 4);
    }
}
