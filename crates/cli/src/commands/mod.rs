//! CLI command implementations

pub mod catalog;
pub mod cost;
pub mod forecast;
pub mod size;

use anyhow::Result;

use planner_lib::catalog::PricingModel;
use planner_lib::cluster::ClusterSizingResult;
use planner_lib::cost::CostBreakdown;
use planner_lib::vm::VmSizingResult;
use planner_lib::{calculate_cluster_sizing, calculate_vm_fleet_sizing, estimate_cost};

use crate::defaults;
use crate::scenario::Scenario;

/// Run the cluster sizing for a scenario against the built-in catalogs.
pub(crate) fn cluster_sizing(scenario: &Scenario) -> Result<ClusterSizingResult> {
    let topologies = defaults::default_topologies();
    let technologies = defaults::default_technologies();
    let topology = topologies.get(&scenario.distribution)?;
    let technology = technologies.get(&scenario.technology)?;
    let result = calculate_cluster_sizing(
        &scenario.workload,
        technology,
        topology,
        &scenario.policy,
        scenario.cluster_mode,
        &scenario.distribution,
    )?;
    Ok(result)
}

/// Run the VM fleet sizing for a scenario.
pub(crate) fn vm_sizing(scenario: &Scenario) -> Result<VmSizingResult> {
    let technologies = defaults::default_technologies();
    let technology = technologies.get(&scenario.technology)?;
    let result = calculate_vm_fleet_sizing(
        technology,
        &scenario.vm_environments,
        scenario.vm_system_overhead_percent,
    )?;
    Ok(result)
}

/// Look up the pricing model for a scenario.
pub(crate) fn pricing(scenario: &Scenario, fallback_region: &str) -> Result<PricingModel> {
    let catalog = defaults::default_pricing();
    let region = scenario.resolved_region(fallback_region);
    Ok(catalog.get(&region)?.clone())
}

/// Cost estimate over cluster or VM sizing, as the scenario directs.
pub(crate) fn cost_estimate(
    scenario: &Scenario,
    fallback_region: &str,
    vms: bool,
) -> Result<CostBreakdown> {
    let basis = if vms {
        vm_sizing(scenario)?.cost_basis()
    } else {
        cluster_sizing(scenario)?.cost_basis()
    };
    let pricing = pricing(scenario, fallback_region)?;
    let breakdown = estimate_cost(&basis, &pricing, &scenario.cost_options())?;
    Ok(breakdown)
}
