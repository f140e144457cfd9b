//! Cost estimation CLI command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::output::{format_currency, format_percent, OutputFormat};
use crate::scenario::Scenario;

/// Row for the category breakdown table
#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Share")]
    share: String,
}

/// Row for the per-environment allocation table
#[derive(Tabled)]
struct EnvironmentRow {
    #[tabled(rename = "Environment")]
    label: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
}

/// Estimate cost for the scenario and print the breakdown
pub fn run(
    scenario: &Scenario,
    fallback_region: &str,
    vms: bool,
    format: OutputFormat,
) -> Result<()> {
    let breakdown = super::cost_estimate(scenario, fallback_region, vms)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
        }
        OutputFormat::Table => {
            println!("{}", "Cost Estimate".bold());
            println!("{}", "=".repeat(50));
            let basis_label = if vms { "VM fleet" } else { "cluster" };
            println!("Basis:                  {}", basis_label.cyan());
            println!();

            let rows: Vec<CategoryRow> = breakdown
                .categories
                .iter()
                .map(|c| CategoryRow {
                    category: c.category.to_string(),
                    monthly: format_currency(c.monthly, &breakdown.currency),
                    share: format_percent(c.percent_of_total),
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            println!();
            println!(
                "{}  {}  ({} / year)",
                "Monthly Total:".bold(),
                format_currency(breakdown.monthly_total, &breakdown.currency)
                    .green()
                    .bold(),
                format_currency(breakdown.yearly_total, &breakdown.currency)
            );

            if !breakdown.by_environment.is_empty() {
                println!();
                println!("{}", "Allocation by Environment".bold());
                println!("{}", "-".repeat(50));
                let rows: Vec<EnvironmentRow> = breakdown
                    .by_environment
                    .iter()
                    .map(|e| EnvironmentRow {
                        label: e.label.clone(),
                        share: format_percent(e.share_percent),
                        monthly: format_currency(e.monthly, &breakdown.currency),
                    })
                    .collect();
                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
            }
        }
    }

    Ok(())
}
