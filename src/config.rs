//! Tunable knobs the outer loop would otherwise hardcode.
//!
//! `ProblemData`, `CostEvaluator`, and the search driver are all
//! constructible without a `SolverConfig` — this type exists purely so a
//! host application has one serializable place to store the values it
//! passes to those constructors, rather than scattering magic numbers.

use serde::{Deserialize, Serialize};

/// Numeric precision used when reporting measures to the outer loop.
///
/// Internally every measure is carried as `f64` (the segment algebras in
/// §4.1 are defined over continuous arithmetic); `Integer` truncates at the
/// point values leave the core, matching the reference solver's two
/// build-time variants without compiling two copies of the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Precision {
    Integer,
    Double,
}

impl Precision {
    /// Rounds a raw measure to this precision.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Precision::Integer => value.trunc(),
            Precision::Double => value,
        }
    }
}

impl Default for Precision {
    fn default() -> Self {
        Precision::Double
    }
}

/// Solver-wide configuration, serializable so a host binary can load it
/// from a config file rather than hardcoding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Initial capacity-violation penalty coefficient (`λ₁`).
    pub capacity_penalty: f64,
    /// Initial time-warp penalty coefficient (`λ₂`).
    pub time_warp_penalty: f64,
    /// Size `k` of each client's granular neighbour list.
    pub neighbourhood_size: usize,
    /// Seed for the driver's RNG.
    pub seed: u32,
    /// Whether time-window feasibility is tracked at all.
    pub time_windows_enabled: bool,
    /// Output precision for reported measures.
    pub precision: Precision,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            capacity_penalty: 1.0,
            time_warp_penalty: 1.0,
            neighbourhood_size: 10,
            seed: 0,
            time_windows_enabled: cfg!(feature = "time_windows"),
            precision: Precision::Double,
        }
    }
}

impl SolverConfig {
    pub fn with_capacity_penalty(mut self, value: f64) -> Self {
        self.capacity_penalty = value;
        self
    }

    pub fn with_time_warp_penalty(mut self, value: f64) -> Self {
        self.time_warp_penalty = value;
        self
    }

    pub fn with_neighbourhood_size(mut self, value: usize) -> Self {
        self.neighbourhood_size = value;
        self
    }

    pub fn with_seed(mut self, value: u32) -> Self {
        self.seed = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_truncates_only_in_integer_mode() {
        assert_eq!(Precision::Integer.apply(3.7), 3.0);
        assert_eq!(Precision::Double.apply(3.7), 3.7);
    }

    #[test]
    fn builder_methods_chain() {
        let cfg = SolverConfig::default()
            .with_capacity_penalty(2.0)
            .with_time_warp_penalty(5.0)
            .with_neighbourhood_size(20)
            .with_seed(7);
        assert_eq!(cfg.capacity_penalty, 2.0);
        assert_eq!(cfg.time_warp_penalty, 5.0);
        assert_eq!(cfg.neighbourhood_size, 20);
        assert_eq!(cfg.seed, 7);
    }

    #[test]
    fn default_respects_time_windows_feature() {
        let cfg = SolverConfig::default();
        assert_eq!(cfg.time_windows_enabled, cfg!(feature = "time_windows"));
    }
}
