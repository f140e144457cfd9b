//! Output formatting utilities

use clap::ValueEnum;
use colored::Colorize;

use planner_lib::growth::{RecommendationPriority, WarningSeverity};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format currency
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{:.2} {}", amount, currency),
    }
}

/// Format CPU cores as human-readable string
pub fn format_cores(cores: f64) -> String {
    if cores.fract() == 0.0 {
        format!("{:.0}", cores)
    } else {
        format!("{:.1}", cores)
    }
}

/// Format gigabytes as human-readable string
pub fn format_gb(gb: f64) -> String {
    if gb >= 1024.0 {
        format!("{:.1}Ti", gb / 1024.0)
    } else {
        format!("{:.0}Gi", gb)
    }
}

/// Format a percentage
pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}

/// Color warning severity based on tier
pub fn color_severity(severity: WarningSeverity) -> String {
    match severity {
        WarningSeverity::Warning => severity.to_string().yellow().to_string(),
        WarningSeverity::Critical => severity.to_string().red().bold().to_string(),
    }
}

/// Color recommendation priority
pub fn color_priority(priority: RecommendationPriority) -> String {
    match priority {
        RecommendationPriority::High => "high".red().to_string(),
        RecommendationPriority::Medium => "medium".yellow().to_string(),
        RecommendationPriority::Low => "low".green().to_string(),
    }
}
