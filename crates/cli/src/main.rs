//! Capacity Planner CLI
//!
//! A command-line tool for sizing cluster and VM topologies from a
//! scenario file, estimating their cost, and forecasting growth.

mod commands;
mod config;
mod defaults;
mod output;
mod scenario;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scenario::Scenario;

/// Capacity Planner CLI
#[derive(Parser)]
#[command(name = "capp")]
#[command(author, version, about = "CLI for the capacity sizing & forecasting engine", long_about = None)]
pub struct Cli {
    /// Scenario file (JSON); built-in example scenario when omitted
    #[arg(long, short, global = true, env = "CAPP_SCENARIO")]
    pub scenario: Option<PathBuf>,

    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size infrastructure from the scenario workload
    #[command(subcommand)]
    Size(SizeCommands),

    /// Estimate monthly and yearly cost
    Cost {
        /// Price the VM fleet instead of the cluster topology
        #[arg(long)]
        vms: bool,
    },

    /// Project growth over a multi-year horizon
    Forecast {
        /// Override the scenario's horizon (1-10 years)
        #[arg(long)]
        years: Option<u32>,
    },

    /// Inspect the built-in catalogs
    #[command(subcommand)]
    Catalog(CatalogCommands),
}

#[derive(Subcommand)]
pub enum SizeCommands {
    /// Size the cluster topology
    Cluster,

    /// Size the role-based VM fleets
    Vms,
}

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List known distributions
    Distributions,

    /// List known technologies
    Technologies,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let settings = config::CliSettings::load()?;
    let scenario = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };

    match cli.command {
        Commands::Size(SizeCommands::Cluster) => {
            commands::size::run_cluster(&scenario, cli.format)
        }
        Commands::Size(SizeCommands::Vms) => commands::size::run_vms(&scenario, cli.format),
        Commands::Cost { vms } => {
            commands::cost::run(&scenario, &settings.region, vms, cli.format)
        }
        Commands::Forecast { years } => {
            commands::forecast::run(&scenario, &settings.region, years, cli.format)
        }
        Commands::Catalog(CatalogCommands::Distributions) => {
            commands::catalog::distributions(cli.format)
        }
        Commands::Catalog(CatalogCommands::Technologies) => {
            commands::catalog::technologies(cli.format)
        }
    }
}

/// Initialize tracing with an env filter; logs go to stderr so table
/// output stays clean.
fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
