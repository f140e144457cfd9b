//! Capacity sizing & forecasting engine
//!
//! This crate provides the core functionality for:
//! - Cluster node sizing across deployment topologies
//! - Role-based VM fleet sizing with HA patterns
//! - Cost estimation for cloud and on-premises targets
//! - Multi-year growth projections with capacity warnings
//!
//! Every entry point is a pure, synchronous function of its inputs:
//! no I/O, no shared mutable state, safe to call concurrently.

pub mod catalog;
pub mod cluster;
pub mod cost;
pub mod error;
pub mod growth;
pub mod models;
pub mod policy;
pub mod vm;

pub use cluster::{calculate_cluster_sizing, ClusterMode, ClusterSizingResult};
pub use cost::{estimate_cost, CostBreakdown, CostOptions};
pub use error::PlanError;
pub use growth::{project_growth, GrowthProjection, GrowthSettings, TopologyLimits};
pub use models::*;
pub use policy::PolicySettings;
pub use vm::{calculate_vm_fleet_sizing, VmSizingResult};
