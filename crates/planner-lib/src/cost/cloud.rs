//! Cloud cost categories
//!
//! Compute, storage, and network priced against provider rate tables.

use crate::catalog::PricingModel;

use super::{category, CategoryCost, CostBasis, CostCategory, CostLineItem, CostOptions,
    HOURS_PER_MONTH};

pub(super) fn categories(
    basis: &CostBasis,
    pricing: &PricingModel,
    options: &CostOptions,
) -> Vec<CategoryCost> {
    vec![
        compute(basis, pricing),
        storage(basis, pricing, options),
        network(basis, pricing, options),
    ]
}

fn compute(basis: &CostBasis, pricing: &PricingModel) -> CategoryCost {
    let mut items = vec![
        CostLineItem {
            label: format!("{:.0} CPU cores", basis.resources.cpu_cores),
            monthly: basis.resources.cpu_cores * pricing.cpu_core_hour * HOURS_PER_MONTH,
        },
        CostLineItem {
            label: format!("{:.0} GB RAM", basis.resources.ram_gb),
            monthly: basis.resources.ram_gb * pricing.ram_gb_hour * HOURS_PER_MONTH,
        },
    ];
    if basis.managed_control_plane && basis.clusters > 0 {
        items.push(CostLineItem {
            label: format!("Managed control plane x {}", basis.clusters),
            monthly: pricing.managed_control_plane_hour
                * HOURS_PER_MONTH
                * basis.clusters as f64,
        });
    }
    category(CostCategory::Compute, items)
}

fn storage(basis: &CostBasis, pricing: &PricingModel, options: &CostOptions) -> CategoryCost {
    category(
        CostCategory::Storage,
        vec![
            CostLineItem {
                label: format!("{:.0} GB block storage", basis.resources.disk_gb),
                monthly: basis.resources.disk_gb * pricing.block_storage_gb_month,
            },
            CostLineItem {
                label: format!("{:.0} GB registry storage", options.registry_storage_gb),
                monthly: options.registry_storage_gb * pricing.registry_storage_gb_month,
            },
        ],
    )
}

fn network(basis: &CostBasis, pricing: &PricingModel, options: &CostOptions) -> CategoryCost {
    category(
        CostCategory::Network,
        vec![
            CostLineItem {
                label: format!("{:.0} GB egress", options.egress_gb_month),
                monthly: options.egress_gb_month * pricing.egress_gb,
            },
            CostLineItem {
                label: format!("Load balancers x {}", basis.load_balancers),
                monthly: basis.load_balancers as f64
                    * pricing.load_balancer_hour
                    * HOURS_PER_MONTH,
            },
            CostLineItem {
                label: "NAT gateway".to_string(),
                monthly: pricing.nat_gateway_month,
            },
        ],
    )
}
