//! Year-over-year growth factors
//!
//! Linear and exponential growth compound identically when applied
//! iteratively by year. The S-curve approximates slow-fast-slow
//! adoption: cumulative adoption follows a logistic centered
//! mid-horizon, so the per-year rate is modulated by the logistic's
//! discrete increment, which peaks at the midpoint.

use serde::{Deserialize, Serialize};

/// Logistic midpoint: growth peaks near year 2.5 of the horizon.
pub const S_CURVE_MIDPOINT: f64 = 2.5;

/// Logistic steepness.
pub const S_CURVE_STEEPNESS: f64 = 1.5;

/// How growth is distributed across the projection horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPattern {
    #[default]
    Linear,
    Exponential,
    SCurve,
}

impl GrowthPattern {
    /// Multiplier applied to a metric going from year - 1 to year,
    /// given the annual rate as a fraction.
    pub fn factor(&self, rate: f64, year: u32) -> f64 {
        match self {
            // Compounding is iterative by year, so linear and
            // exponential share the single-year form.
            GrowthPattern::Linear | GrowthPattern::Exponential => 1.0 + rate,
            GrowthPattern::SCurve => {
                let curr = logistic(S_CURVE_STEEPNESS * (year as f64 - S_CURVE_MIDPOINT));
                let prev =
                    logistic(S_CURVE_STEEPNESS * (year as f64 - 1.0 - S_CURVE_MIDPOINT));
                1.0 + rate * 2.0 * (curr - prev)
            }
        }
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_factor() {
        assert!((GrowthPattern::Linear.factor(0.2, 1) - 1.2).abs() < 1e-12);
        assert!((GrowthPattern::Linear.factor(0.2, 5) - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_exponential_compounds_iteratively() {
        // Identical single-year form; compounding happens by applying
        // the factor once per year.
        let mut value = 100.0;
        for year in 1..=3 {
            value *= GrowthPattern::Exponential.factor(0.1, year);
        }
        assert!((value - 100.0 * 1.1f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn test_logistic_symmetry() {
        assert!((logistic(0.0) - 0.5).abs() < 1e-12);
        assert!((logistic(3.0) + logistic(-3.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_s_curve_increment_peaks_mid_horizon() {
        // With a 20%/yr rate over 5 years, the year-3 increment (near
        // the 2.5 midpoint) must exceed both year-1 and year-5.
        let rate = 0.2;
        let mut value = 100.0;
        let mut increments = Vec::new();
        for year in 1..=5 {
            let next = value * GrowthPattern::SCurve.factor(rate, year);
            increments.push(next - value);
            value = next;
        }
        let (y1, y3, y5) = (increments[0], increments[2], increments[4]);
        assert!(y3 > y1, "year 3 increment {} not above year 1 {}", y3, y1);
        assert!(y3 > y5, "year 3 increment {} not above year 5 {}", y3, y5);
    }

    #[test]
    fn test_s_curve_factor_symmetric_around_midpoint() {
        // The year-2 and year-4 intervals sit symmetrically around the
        // 2.5 midpoint and carry the same logistic increment.
        let f2 = GrowthPattern::SCurve.factor(0.2, 2);
        let f4 = GrowthPattern::SCurve.factor(0.2, 4);
        assert!((f2 - f4).abs() < 1e-12);
    }
}
