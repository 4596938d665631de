//! Converts raw route statistics into a scalar objective.

/// Sentinel returned by [`CostEvaluator::cost`] for an infeasible solution.
///
/// Chosen large enough to dominate any reachable penalised cost on a
/// realistic instance, and small enough that summing a handful of sentinels
/// (e.g. across routes) does not overflow to `f64::INFINITY`.
pub const INFEASIBLE_COST: f64 = f64::MAX / 2.0;

/// Converts distance, fixed costs, and infeasibility measures into a single
/// penalised objective. Carries no state beyond its two penalty
/// coefficients — it is read many times during search and never mutated by
/// an operator's `evaluate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostEvaluator {
    capacity_penalty: f64,
    time_warp_penalty: f64,
}

impl CostEvaluator {
    pub fn new(capacity_penalty: f64, time_warp_penalty: f64) -> Self {
        Self {
            capacity_penalty,
            time_warp_penalty,
        }
    }

    pub fn capacity_penalty_coefficient(&self) -> f64 {
        self.capacity_penalty
    }

    pub fn time_warp_penalty_coefficient(&self) -> f64 {
        self.time_warp_penalty
    }

    /// Penalty for `excess_load` units carried over capacity.
    pub fn load_penalty(&self, excess_load: f64) -> f64 {
        excess_load.max(0.0) * self.capacity_penalty
    }

    /// Penalty for `time_warp` minutes of schedule infeasibility.
    pub fn tw_penalty(&self, time_warp: f64) -> f64 {
        time_warp.max(0.0) * self.time_warp_penalty
    }

    /// The full penalised objective: distance plus fixed vehicle costs plus
    /// weighted infeasibility plus any uncollected prizes.
    pub fn penalised_cost(
        &self,
        distance: f64,
        fixed_vehicle_cost: f64,
        excess_load: f64,
        time_warp: f64,
        uncollected_prizes: f64,
    ) -> f64 {
        distance
            + fixed_vehicle_cost
            + self.load_penalty(excess_load)
            + self.tw_penalty(time_warp)
            + uncollected_prizes
    }

    /// `penalised_cost` if the solution is feasible (`excess_load == 0` and
    /// `time_warp == 0`), else [`INFEASIBLE_COST`].
    pub fn cost(
        &self,
        distance: f64,
        fixed_vehicle_cost: f64,
        excess_load: f64,
        time_warp: f64,
        uncollected_prizes: f64,
    ) -> f64 {
        if excess_load > 0.0 || time_warp > 0.0 {
            return INFEASIBLE_COST;
        }
        distance + fixed_vehicle_cost + uncollected_prizes
    }
}
