//! Built-in default catalogs
//!
//! The engine consumes catalogs supplied by its caller; this module is
//! that caller-side data for the CLI. Entries are indicative shapes and
//! list rates, not provider quotes.

use std::collections::HashMap;

use planner_lib::catalog::{
    OnPremPricing, PricingCatalog, PricingModel, RoleSpecs, TechnologyCatalog,
    TechnologyProfile, TopologyCapabilities, TopologyCatalog, VmRoleTemplate,
};
use planner_lib::models::{NodeSpec, PerTier, TierFootprint};

pub fn default_topologies() -> TopologyCatalog {
    let mut entries = HashMap::new();

    entries.insert(
        "kubernetes".to_string(),
        TopologyCapabilities {
            has_managed_control_plane: false,
            has_infrastructure_nodes: false,
            control_plane: RoleSpecs {
                production: NodeSpec::new(4.0, 16.0, 120.0),
                non_production: NodeSpec::new(2.0, 8.0, 120.0),
            },
            worker: RoleSpecs {
                production: NodeSpec::new(8.0, 32.0, 200.0),
                non_production: NodeSpec::new(4.0, 16.0, 200.0),
            },
            infrastructure: RoleSpecs::uniform(NodeSpec::default()),
            max_cluster_nodes: 5000,
        },
    );

    entries.insert(
        "openshift".to_string(),
        TopologyCapabilities {
            has_managed_control_plane: false,
            has_infrastructure_nodes: true,
            control_plane: RoleSpecs {
                production: NodeSpec::new(8.0, 32.0, 200.0),
                non_production: NodeSpec::new(4.0, 16.0, 120.0),
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
        },
    );

    // Managed offerings share worker shapes; the provider hosts the
    // control plane.
    for (name, ceiling) in [("eks", 13500u32), ("aks", 5000), ("gke", 15000)] {
        entries.insert(
            name.to_string(),
            TopologyCapabilities {
                has_managed_control_plane: true,
                has_infrastructure_nodes: false,
                control_plane: RoleSpecs::uniform(NodeSpec::default()),
                worker: RoleSpecs {
                    production: NodeSpec::new(8.0, 32.0, 200.0),
                    non_production: NodeSpec::new(4.0, 16.0, 200.0),
                },
                infrastructure: RoleSpecs::uniform(NodeSpec::default()),
                max_cluster_nodes: ceiling,
            },
        );
    }

    TopologyCatalog::new(entries)
}

pub fn default_technologies() -> TechnologyCatalog {
    let mut entries = HashMap::new();

    entries.insert(
        "spring-boot".to_string(),
        TechnologyProfile {
            footprints: PerTier {
                small: TierFootprint {
                    cpu_cores: 0.25,
                    ram_gb: 0.75,
                },
                medium: TierFootprint {
                    cpu_cores: 0.5,
                    ram_gb: 1.5,
                },
                large: TierFootprint {
                    cpu_cores: 1.0,
                    ram_gb: 3.0,
                },
                extra_large: TierFootprint {
                    cpu_cores: 2.0,
                    ram_gb: 6.0,
                },
            },
            memory_multiplier: 1.5,
            vm_roles: standard_vm_roles(),
        },
    );

    entries.insert(
        "nodejs".to_string(),
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
            vm_roles: standard_vm_roles(),
        },
    );

    entries.insert(
        "go".to_string(),
        TechnologyProfile {
            footprints: PerTier {
                small: TierFootprint {
                    cpu_cores: 0.25,
                    ram_gb: 0.25,
                },
                medium: TierFootprint {
                    cpu_cores: 0.5,
                    ram_gb: 0.5,
                },
                large: TierFootprint {
                    cpu_cores: 1.0,
                    ram_gb: 1.0,
                },
                extra_large: TierFootprint {
                    cpu_cores: 2.0,
                    ram_gb: 2.0,
                },
            },
            memory_multiplier: 0.75,
            vm_roles: standard_vm_roles(),
        },
    );

    TechnologyCatalog::new(entries)
}

fn standard_vm_roles() -> Vec<VmRoleTemplate> {
    vec![
        VmRoleTemplate {
            role: "app-server".to_string(),
            shapes: PerTier {
                small: NodeSpec::new(2.0, 4.0, 50.0),
                medium: NodeSpec::new(4.0, 8.0, 100.0),
                large: NodeSpec::new(8.0, 16.0, 200.0),
                extra_large: NodeSpec::new(16.0, 32.0, 400.0),
            },
            default_instances: 2,
        },
        VmRoleTemplate {
            role: "database".to_string(),
            shapes: PerTier {
                small: NodeSpec::new(2.0, 8.0, 200.0),
                medium: NodeSpec::new(4.0, 16.0, 500.0),
                large: NodeSpec::new(8.0, 32.0, 1000.0),
                extra_large: NodeSpec::new(16.0, 64.0, 2000.0),
            },
            default_instances: 1,
        },
        VmRoleTemplate {
            role: "message-queue".to_string(),
            shapes: PerTier {
                small: NodeSpec::new(1.0, 2.0, 50.0),
                medium: NodeSpec::new(2.0, 4.0, 100.0),
                large: NodeSpec::new(4.0, 8.0, 200.0),
                extra_large: NodeSpec::new(8.0, 16.0, 400.0),
            },
            default_instances: 1,
        },
    ]
}

pub fn default_pricing() -> PricingCatalog {
    let mut entries = HashMap::new();

    let license_per_node_year =
        HashMap::from([("openshift".to_string(), 2200.0)]);

    entries.insert(
        "us-east".to_string(),
        PricingModel {
            currency: "USD".to_string(),
            cpu_core_hour: 0.04,
            ram_gb_hour: 0.005,
            managed_control_plane_hour: 0.10,
            block_storage_gb_month: 0.10,
            registry_storage_gb_month: 0.023,
            egress_gb: 0.09,
            load_balancer_hour: 0.025,
            nat_gateway_month: 32.85,
            license_per_node_year: license_per_node_year.clone(),
            on_premises: OnPremPricing {
                server_unit_cost: 12_000.0,
                hardware_refresh_years: 4,
                rack_unit_month: 25.0,
                power_cooling_month: 65.0,
                admin_salary_year: 125_000.0,
                servers_per_admin: 30,
            },
        },
    );

    entries.insert(
        "eu-west".to_string(),
        PricingModel {
            currency: "EUR".to_string(),
            cpu_core_hour: 0.044,
            ram_gb_hour: 0.0055,
            managed_control_plane_hour: 0.11,
            block_storage_gb_month: 0.11,
            registry_storage_gb_month: 0.025,
            egress_gb: 0.09,
            load_balancer_hour: 0.028,
            nat_gateway_month: 35.0,
            license_per_node_year,
            on_premises: OnPremPricing {
                server_unit_cost: 13_000.0,
                hardware_refresh_years: 4,
                rack_unit_month: 30.0,
                power_cooling_month: 80.0,
                admin_salary_year: 110_000.0,
                servers_per_admin: 30,
            },
        },
    );

    PricingCatalog::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalogs_resolve() {
        let topologies = default_topologies();
        for name in ["kubernetes", "openshift", "eks", "aks", "gke"] {
            assert!(topologies.get(name).is_ok(), "missing {}", name);
        }
        let technologies = default_technologies();
        for name in ["spring-boot", "nodejs", "go"] {
            assert!(technologies.get(name).is_ok(), "missing {}", name);
        }
        assert!(default_pricing().get("us-east").is_ok());
    }

    #[test]
    fn test_managed_offerings_have_no_control_plane_nodes() {
        let topologies = default_topologies();
        for name in ["eks", "aks", "gke"] {
            assert!(topologies.get(name).unwrap().has_managed_control_plane);
        }
        assert!(!topologies.get("openshift").unwrap().has_managed_control_plane);
    }
}
