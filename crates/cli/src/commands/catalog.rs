//! Catalog listing CLI commands

use anyhow::Result;
use tabled::Tabled;

use crate::defaults;
use crate::output::OutputFormat;

/// Row for the distributions table
#[derive(Tabled, serde::Serialize)]
struct DistributionRow {
    #[tabled(rename = "Distribution")]
    name: String,
    #[tabled(rename = "Managed CP")]
    managed: String,
    #[tabled(rename = "Infra Nodes")]
    infra: String,
    #[tabled(rename = "Node Ceiling")]
    ceiling: u32,
}

/// Row for the technologies table
#[derive(Tabled, serde::Serialize)]
struct TechnologyRow {
    #[tabled(rename = "Technology")]
    name: String,
    #[tabled(rename = "Medium App")]
    medium: String,
    #[tabled(rename = "Mem Multiplier")]
    multiplier: String,
    #[tabled(rename = "VM Roles")]
    roles: usize,
}

/// List the built-in distributions
pub fn distributions(format: OutputFormat) -> Result<()> {
    let catalog = defaults::default_topologies();

    let rows: Vec<DistributionRow> = catalog
        .distributions()
        .into_iter()
        .filter_map(|name| catalog.get(name).ok().map(|caps| (name, caps)))
        .map(|(name, caps)| DistributionRow {
            name: name.to_string(),
            managed: flag(caps.has_managed_control_plane),
            infra: flag(caps.has_infrastructure_nodes),
            ceiling: caps.max_cluster_nodes,
        })
        .collect();

    print_rows(rows, format)
}

/// List the built-in technologies
pub fn technologies(format: OutputFormat) -> Result<()> {
    let catalog = defaults::default_technologies();

    let rows: Vec<TechnologyRow> = catalog
        .technologies()
        .into_iter()
        .filter_map(|name| catalog.get(name).ok().map(|profile| (name, profile)))
        .map(|(name, profile)| {
            let medium = &profile.footprints.medium;
            TechnologyRow {
                name: name.to_string(),
                medium: format!("{} cpu / {} GB", medium.cpu_cores, medium.ram_gb),
                multiplier: format!("{:.2}x", profile.memory_multiplier),
                roles: profile.vm_roles.len(),
            }
        })
        .collect();

    print_rows(rows, format)
}

fn flag(value: bool) -> String {
    let mark = if value { "✓" } else { "" };
    mark.to_string()
}

fn print_rows<T: Tabled + serde::Serialize>(rows: Vec<T>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Table => {
            let table = tabled::Table::new(&rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }
    Ok(())
}
