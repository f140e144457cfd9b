//! On-premises cost categories
//!
//! Hardware acquisition amortized over the refresh cycle, plus
//! data-center and labor models keyed off server count. No cloud rate
//! tables are involved.

use crate::catalog::PricingModel;
use crate::error::PlanError;

use super::{category, CategoryCost, CostBasis, CostCategory, CostLineItem};

pub(super) fn categories(
    basis: &CostBasis,
    pricing: &PricingModel,
) -> Result<Vec<CategoryCost>, PlanError> {
    let onprem = &pricing.on_premises;
    if onprem.hardware_refresh_years == 0 {
        return Err(PlanError::invalid("hardware refresh cycle must be >= 1 year"));
    }
    if onprem.servers_per_admin == 0 {
        return Err(PlanError::invalid("servers per admin must be > 0"));
    }

    let servers = basis.nodes;
    let amortized = onprem.server_unit_cost * servers as f64
        / (onprem.hardware_refresh_years as f64 * 12.0);
    let compute = category(
        CostCategory::Compute,
        vec![CostLineItem {
            label: format!(
                "{} servers amortized over {} years",
                servers, onprem.hardware_refresh_years
            ),
            monthly: amortized,
        }],
    );

    let data_center = category(
        CostCategory::DataCenter,
        vec![
            CostLineItem {
                label: format!("Rack space x {}", servers),
                monthly: onprem.rack_unit_month * servers as f64,
            },
            CostLineItem {
                label: format!("Power and cooling x {}", servers),
                monthly: onprem.power_cooling_month * servers as f64,
            },
        ],
    );

    let admins = servers.div_ceil(onprem.servers_per_admin);
    let labor = category(
        CostCategory::Labor,
        vec![CostLineItem {
            label: format!("{} platform administrators", admins),
            monthly: admins as f64 * onprem.admin_salary_year / 12.0,
        }],
    );

    Ok(vec![compute, data_center, labor])
}

#[cfg(test)]
mod tests {
    use super::super::tests::{sample_basis, sample_pricing};
    use super::super::{estimate_cost, CostCategory, CostOptions, DeploymentTarget};
    use super::*;

    fn onprem_options() -> CostOptions {
        CostOptions {
            target: DeploymentTarget::OnPremises,
            ..Default::default()
        }
    }

    #[test]
    fn test_hardware_amortization() {
        let cats = categories(&sample_basis(), &sample_pricing()).unwrap();
        let compute = cats
            .iter()
            .find(|c| c.category == CostCategory::Compute)
            .unwrap();
        // 20 servers x 12000 over 48 months
        assert!((compute.monthly - 12_000.0 * 20.0 / 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_labor_rounds_admins_up() {
        let cats = categories(&sample_basis(), &sample_pricing()).unwrap();
        let labor = cats
            .iter()
            .find(|c| c.category == CostCategory::Labor)
            .unwrap();
        // 20 servers at 30 per admin still needs one full admin
        assert!((labor.monthly - 120_000.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cloud_categories_on_prem() {
        let breakdown = estimate_cost(
            &sample_basis(),
            &sample_pricing(),
            &onprem_options(),
        )
        .unwrap();
        let kinds: Vec<CostCategory> =
            breakdown.categories.iter().map(|c| c.category).collect();
        assert!(!kinds.contains(&CostCategory::Storage));
        assert!(!kinds.contains(&CostCategory::Network));
        assert!(kinds.contains(&CostCategory::DataCenter));
        assert!(kinds.contains(&CostCategory::Labor));
    }

    #[test]
    fn test_zero_refresh_cycle_rejected() {
        let mut pricing = sample_pricing();
        pricing.on_premises.hardware_refresh_years = 0;
        let err = categories(&sample_basis(), &pricing).unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
    }
}
