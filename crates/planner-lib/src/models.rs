//! Core data model for capacity calculations
//!
//! All types here are plain values: created whole by a single
//! calculation call, never mutated afterwards, and safe to share
//! between concurrent callers.

use serde::{Deserialize, Serialize};

/// Deployment environment classes, ordered least to most critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 4] = [
        Environment::Dev,
        Environment::Test,
        Environment::Staging,
        Environment::Production,
    ];

    /// Production-class environments get production node shapes and
    /// production overcommit ratios.
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Environment::Dev => "Dev",
            Environment::Test => "Test",
            Environment::Staging => "Staging",
            Environment::Production => "Production",
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A value carried for every environment. Fully keyed: there is no
/// missing-entry case to fall back from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerEnv<T> {
    pub dev: T,
    pub test: T,
    pub staging: T,
    pub production: T,
}

impl<T> PerEnv<T> {
    pub fn get(&self, env: Environment) -> &T {
        match env {
            Environment::Dev => &self.dev,
            Environment::Test => &self.test,
            Environment::Staging => &self.staging,
            Environment::Production => &self.production,
        }
    }
}

impl<T: Clone> PerEnv<T> {
    /// Same value for every environment.
    pub fn uniform(value: T) -> Self {
        Self {
            dev: value.clone(),
            test: value.clone(),
            staging: value.clone(),
            production: value,
        }
    }
}

/// Application size classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppTier {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl AppTier {
    pub const ALL: [AppTier; 4] = [
        AppTier::Small,
        AppTier::Medium,
        AppTier::Large,
        AppTier::ExtraLarge,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AppTier::Small => "Small",
            AppTier::Medium => "Medium",
            AppTier::Large => "Large",
            AppTier::ExtraLarge => "Extra-Large",
        }
    }
}

impl std::fmt::Display for AppTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A value carried for every application tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerTier<T> {
    pub small: T,
    pub medium: T,
    pub large: T,
    pub extra_large: T,
}

impl<T> PerTier<T> {
    pub fn get(&self, tier: AppTier) -> &T {
        match tier {
            AppTier::Small => &self.small,
            AppTier::Medium => &self.medium,
            AppTier::Large => &self.large,
            AppTier::ExtraLarge => &self.extra_large,
        }
    }
}

/// Application counts keyed by tier.
pub type TierCount = PerTier<u32>;

impl TierCount {
    pub fn total(&self) -> u32 {
        self.small + self.medium + self.large + self.extra_large
    }

    /// Element-wise sum, used when merging environments into a shared
    /// cluster workload.
    pub fn plus(&self, other: &TierCount) -> TierCount {
        TierCount {
            small: self.small + other.small,
            medium: self.medium + other.medium,
            large: self.large + other.large,
            extra_large: self.extra_large + other.extra_large,
        }
    }
}

/// One environment's slice of the workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvWorkload {
    pub enabled: bool,
    pub apps: TierCount,
}

/// The declarative workload description: app counts by tier for every
/// environment. Immutable during a calculation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkloadSpec {
    pub environments: PerEnv<EnvWorkload>,
}

impl WorkloadSpec {
    pub fn for_env(&self, env: Environment) -> &EnvWorkload {
        self.environments.get(env)
    }

    pub fn enabled_environments(&self) -> Vec<Environment> {
        Environment::ALL
            .into_iter()
            .filter(|e| self.for_env(*e).enabled)
            .collect()
    }

    /// Summed app counts across all enabled environments, used by the
    /// single-shared cluster mode.
    pub fn merged_apps(&self) -> TierCount {
        self.enabled_environments()
            .into_iter()
            .fold(TierCount::default(), |acc, env| {
                acc.plus(&self.for_env(env).apps)
            })
    }
}

/// CPU and RAM requirement of one application tier for one technology.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TierFootprint {
    pub cpu_cores: f64,
    pub ram_gb: f64,
}

/// One node or VM shape. A value type: compared and combined by
/// arithmetic, never aliased.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSpec {
    pub cpu_cores: f64,
    pub ram_gb: f64,
    pub disk_gb: f64,
}

impl NodeSpec {
    pub fn new(cpu_cores: f64, ram_gb: f64, disk_gb: f64) -> Self {
        Self {
            cpu_cores,
            ram_gb,
            disk_gb,
        }
    }

    /// Aggregate resources of `count` nodes of this shape.
    pub fn times(&self, count: u32) -> ResourceTotals {
        let n = count as f64;
        ResourceTotals {
            cpu_cores: self.cpu_cores * n,
            ram_gb: self.ram_gb * n,
            disk_gb: self.disk_gb * n,
        }
    }
}

/// Aggregate CPU/RAM/disk across a set of nodes or instances.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceTotals {
    pub cpu_cores: f64,
    pub ram_gb: f64,
    pub disk_gb: f64,
}

impl ResourceTotals {
    pub fn plus(&self, other: &ResourceTotals) -> ResourceTotals {
        ResourceTotals {
            cpu_cores: self.cpu_cores + other.cpu_cores,
            ram_gb: self.ram_gb + other.ram_gb,
            disk_gb: self.disk_gb + other.disk_gb,
        }
    }
}
