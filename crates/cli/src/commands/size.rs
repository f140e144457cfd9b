//! Sizing CLI commands

use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use crate::output::{format_cores, format_gb, OutputFormat};
use crate::scenario::Scenario;

/// Row for the per-cluster sizing table
#[derive(Tabled)]
struct ClusterRow {
    #[tabled(rename = "Cluster")]
    label: String,
    #[tabled(rename = "Control Plane")]
    control_plane: u32,
    #[tabled(rename = "Infra")]
    infrastructure: u32,
    #[tabled(rename = "Workers")]
    workers: u32,
    #[tabled(rename = "Total Nodes")]
    total: u32,
    #[tabled(rename = "Apps")]
    apps: u32,
    #[tabled(rename = "Pods")]
    pods: u32,
    #[tabled(rename = "CPU")]
    cpu: String,
    #[tabled(rename = "RAM")]
    ram: String,
    #[tabled(rename = "Disk")]
    disk: String,
}

/// Row for the per-role VM sizing table
#[derive(Tabled)]
struct VmRoleRow {
    #[tabled(rename = "Environment")]
    environment: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Tier")]
    tier: String,
    #[tabled(rename = "Base")]
    base: u32,
    #[tabled(rename = "With HA")]
    ha: u32,
    #[tabled(rename = "CPU/VM")]
    cpu: String,
    #[tabled(rename = "RAM/VM")]
    ram: String,
}

/// Size the cluster topology and print the result
pub fn run_cluster(scenario: &Scenario, format: OutputFormat) -> Result<()> {
    let result = super::cluster_sizing(scenario)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!("{}", "Cluster Sizing".bold());
            println!("{}", "=".repeat(50));
            println!("Distribution:           {}", result.distribution.cyan());
            println!("Mode:                   {}", result.mode);
            println!();

            let rows: Vec<ClusterRow> = result
                .clusters
                .iter()
                .map(|c| ClusterRow {
                    label: c.label.clone(),
                    control_plane: c.nodes.control_plane,
                    infrastructure: c.nodes.infrastructure,
                    workers: c.nodes.workers,
                    total: c.nodes.total(),
                    apps: c.apps,
                    pods: c.pods,
                    cpu: format_cores(c.resources.cpu_cores),
                    ram: format_gb(c.resources.ram_gb),
                    disk: format_gb(c.resources.disk_gb),
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            println!();
            println!(
                "Total: {} nodes ({} workers), {} cores, {} RAM, {} disk",
                result.total_nodes.total().to_string().bold(),
                result.total_nodes.workers,
                format_cores(result.total_resources.cpu_cores),
                format_gb(result.total_resources.ram_gb),
                format_gb(result.total_resources.disk_gb),
            );
        }
    }

    Ok(())
}

/// Size the VM fleets and print the result
pub fn run_vms(scenario: &Scenario, format: OutputFormat) -> Result<()> {
    let result = super::vm_sizing(scenario)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Table => {
            println!("{}", "VM Fleet Sizing".bold());
            println!("{}", "=".repeat(50));

            let rows: Vec<VmRoleRow> = result
                .environments
                .iter()
                .flat_map(|env| {
                    env.roles.iter().map(|r| VmRoleRow {
                        environment: env.environment.to_string(),
                        role: r.role.clone(),
                        tier: r.tier.to_string(),
                        base: r.base_instances,
                        ha: r.ha_instances,
                        cpu: format_cores(r.per_instance.cpu_cores),
                        ram: format_gb(r.per_instance.ram_gb),
                    })
                })
                .collect();
            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);

            for env in &result.environments {
                if env.lb_instances > 0 {
                    println!(
                        "{}: {} load balancer VM(s)",
                        env.environment, env.lb_instances
                    );
                }
            }

            println!();
            println!(
                "Total: {} instances, {} cores, {} RAM, {} disk",
                result.total_instances.to_string().bold(),
                format_cores(result.total_resources.cpu_cores),
                format_gb(result.total_resources.ram_gb),
                format_gb(result.total_resources.disk_gb),
            );
        }
    }

    Ok(())
}
