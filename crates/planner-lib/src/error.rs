//! Typed errors for the sizing engine
//!
//! Every entry point is a pure function, so all failure modes are
//! reported as explicit `Result` values. Nothing is retried internally.

use thiserror::Error;

/// Errors produced by the sizing, cost, and projection calculations.
#[derive(Debug, Error)]
pub enum PlanError {
    /// Input rejected before any computation ran. Floors and ceilings
    /// defined by sizing rules are policy, not errors; this variant
    /// covers values no rule can interpret (zero overcommit, years out
    /// of range, negative rates).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A catalog lookup failed. The engine never silently substitutes
    /// another entry's data for a missing key.
    #[error("unknown {kind} '{key}'")]
    UnknownCatalogKey { kind: &'static str, key: String },

    /// A computation would have produced NaN or infinity, e.g. sizing
    /// against a zero-capacity node spec.
    #[error("degenerate arithmetic: {0}")]
    Degenerate(String),
}

impl PlanError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        PlanError::InvalidInput(msg.into())
    }

    pub fn unknown_key(kind: &'static str, key: impl Into<String>) -> Self {
        PlanError::UnknownCatalogKey {
            kind,
            key: key.into(),
        }
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        PlanError::Degenerate(msg.into())
    }
}
