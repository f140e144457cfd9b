//! Growth forecast CLI command

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use planner_lib::estimate_cost;
use planner_lib::growth::{project_growth, GrowthBaseline, TopologyLimits};

use crate::defaults;
use crate::output::{
    color_priority, color_severity, format_cores, format_currency, format_gb, format_percent,
    print_info, print_warning, OutputFormat,
};
use crate::scenario::Scenario;

/// Row for the year-by-year projection table
#[derive(Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: u32,
    #[tabled(rename = "Apps")]
    apps: u32,
    #[tabled(rename = "Nodes")]
    nodes: u32,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "RAM")]
    ram: String,
    #[tabled(rename = "Monthly Cost")]
    cost: String,
    #[tabled(rename = "vs Baseline")]
    baseline_growth: String,
}

/// Project growth for the scenario and print the forecast
pub fn run(
    scenario: &Scenario,
    fallback_region: &str,
    years: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let sizing = super::cluster_sizing(scenario)?;
    let pricing = super::pricing(scenario, fallback_region)?;
    let breakdown = estimate_cost(&sizing.cost_basis(), &pricing, &scenario.cost_options())?;

    let mut settings = scenario.growth;
    if let Some(years) = years {
        settings.years = years;
    }

    let topologies = defaults::default_topologies();
    let limits = TopologyLimits {
        max_cluster_nodes: topologies.get(&scenario.distribution)?.max_cluster_nodes,
    };

    let baseline = GrowthBaseline::from_cluster_sizing(&sizing, &breakdown);
    let projection = project_growth(&baseline, &settings, &limits)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&projection)?);
        }
        OutputFormat::Table => {
            println!("{}", "Growth Forecast".bold());
            println!("{}", "=".repeat(50));
            println!(
                "Horizon:                {} years at {}/yr ({:?})",
                settings.years,
                format_percent(settings.annual_growth_percent),
                settings.pattern
            );
            println!();

            let rows: Vec<YearRow> = projection
                .points
                .iter()
                .map(|p| YearRow {
                    year: p.year,
                    apps: p.apps,
                    nodes: p.nodes,
                    cpu: format_cores(p.cpu_cores),
                    ram: format_gb(p.ram_gb),
                    cost: format_currency(p.monthly_cost, &breakdown.currency),
                    baseline_growth: format_percent(p.growth_vs_baseline_percent),
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            if !projection.warnings.is_empty() {
                println!();
                println!("{}", "Capacity Warnings".bold());
                println!("{}", "-".repeat(50));
                for warning in &projection.warnings {
                    print_warning(&format!(
                        "[{}] {}",
                        color_severity(warning.severity),
                        warning.message
                    ));
                }
            }

            if !projection.recommendations.is_empty() {
                println!();
                println!("{}", "Recommendations".bold());
                println!("{}", "-".repeat(50));
                for rec in &projection.recommendations {
                    let savings = rec
                        .estimated_monthly_savings
                        .map(|s| {
                            format!(" (est. {} / month)", format_currency(s, &breakdown.currency))
                        })
                        .unwrap_or_default();
                    print_info(&format!(
                        "[{}] year {}: {}. {}{}",
                        color_priority(rec.priority),
                        rec.year,
                        rec.title.bold(),
                        rec.detail,
                        savings
                    ));
                }
            }
        }
    }

    Ok(())
}
