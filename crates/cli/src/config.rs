//! CLI settings
//!
//! Environment-driven defaults (CAPP_ prefix) for values a scenario
//! file does not pin down.

use anyhow::Result;
use serde::Deserialize;

/// Settings resolved from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct CliSettings {
    /// Default pricing region when the scenario does not set one.
    #[serde(default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    "us-east".to_string()
}

impl CliSettings {
    /// Load settings from CAPP_-prefixed environment variables.
    pub fn load() -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("CAPP"))
            .build()?;

        Ok(settings.try_deserialize().unwrap_or_else(|_| CliSettings {
            region: default_region(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_environment() {
        let settings = CliSettings::load().unwrap();
        assert!(!settings.region.is_empty());
    }
}
