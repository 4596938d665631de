//! Immutable solution: an ordered list of routes plus the derived
//! aggregates and neighbour map the outer loop and diversity metrics read.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::error::{Result, RoutingError};
use crate::solution::Route;

/// A complete assignment of clients to vehicle routes.
///
/// Constructing a `Solution` validates internal consistency (every visited
/// client index exists, every vehicle type has enough available vehicles for
/// the number of routes assigned to it) and precomputes the aggregates used
/// by the cost evaluator and by diversity metrics — it never partially
/// represents an inconsistent assignment.
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    missing_clients: Vec<usize>,
    neighbours: Vec<Option<(usize, usize)>>,
    distance: f64,
    fixed_vehicle_cost: f64,
    load: f64,
    time_warp: f64,
    prizes: f64,
    uncollected_prizes: f64,
}

impl Solution {
    /// Builds a solution from a vehicle-type assignment per route.
    ///
    /// `routes` is a list of `(vehicle_type, visits)` pairs. Fails if a
    /// client index is out of range, a client appears more than once, a
    /// vehicle type is used by more routes than it has available vehicles,
    /// or a vehicle type index is out of range.
    pub fn new(data: &ProblemData, routes: Vec<(usize, Vec<usize>)>) -> Result<Self> {
        let mut seen = vec![false; data.num_clients()];
        let mut vehicles_used = vec![0usize; data.vehicle_types().len()];

        for (vehicle_type, visits) in &routes {
            let vt = data.vehicle_types().get(*vehicle_type).ok_or(
                RoutingError::VehicleTypeUnavailable {
                    vehicle_type: *vehicle_type,
                    available: data.vehicle_types().len(),
                    assigned: *vehicle_type + 1,
                },
            )?;
            vehicles_used[*vehicle_type] += 1;
            if vehicles_used[*vehicle_type] > vt.num_available() {
                return Err(RoutingError::VehicleTypeUnavailable {
                    vehicle_type: *vehicle_type,
                    available: vt.num_available(),
                    assigned: vehicles_used[*vehicle_type],
                });
            }
            for &loc in visits {
                let client_idx = loc
                    .checked_sub(data.num_depots())
                    .filter(|&c| c < data.num_clients())
                    .ok_or(RoutingError::IndexOutOfRange {
                        index: loc,
                        len: data.num_locations(),
                    })?;
                if seen[client_idx] {
                    return Err(RoutingError::InconsistentSolution { client: loc });
                }
                seen[client_idx] = true;
            }
        }

        let built: Vec<Route> = routes
            .into_iter()
            .map(|(vehicle_type, visits)| Route::new(data, vehicle_type, visits))
            .collect();

        let mut neighbours = vec![None; data.num_locations()];
        for route in &built {
            let depot = data.vehicle_types()[route.vehicle_type()].depot_index();
            let chain: Vec<usize> = std::iter::once(depot)
                .chain(route.visits().iter().copied())
                .chain(std::iter::once(depot))
                .collect();
            for window in chain.windows(3) {
                neighbours[window[1]] = Some((window[0], window[2]));
            }
        }

        let distance = built.iter().map(Route::distance).sum();
        let load = built.iter().map(Route::load).sum();
        let time_warp = built.iter().map(Route::time_warp).sum();
        let prizes_collected: f64 = built.iter().map(Route::prizes).sum();
        let fixed_vehicle_cost = built
            .iter()
            .map(|r| data.vehicle_types()[r.vehicle_type()].fixed_cost())
            .sum();

        let total_prizes: f64 = data.clients().iter().map(|c| c.prize()).sum();
        let uncollected_prizes = total_prizes - prizes_collected;
        let prizes = prizes_collected;

        let missing_clients: Vec<usize> = seen
            .iter()
            .enumerate()
            .filter(|(_, &visited)| !visited)
            .map(|(idx, _)| idx + data.num_depots())
            .collect();

        tracing::debug!(
            num_routes = built.len(),
            num_missing = missing_clients.len(),
            distance,
            "constructed Solution"
        );

        Ok(Self {
            routes: built,
            missing_clients,
            neighbours,
            distance,
            fixed_vehicle_cost,
            load,
            time_warp,
            prizes,
            uncollected_prizes,
        })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn num_clients(&self, data: &ProblemData) -> usize {
        data.num_clients() - self.missing_clients.len()
    }

    pub fn missing_clients(&self) -> &[usize] {
        &self.missing_clients
    }

    pub fn num_missing_clients(&self) -> usize {
        self.missing_clients.len()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn fixed_vehicle_cost(&self) -> f64 {
        self.fixed_vehicle_cost
    }

    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn excess_load(&self, data: &ProblemData) -> f64 {
        self.routes
            .iter()
            .map(|r| r.excess_load(data.vehicle_types()[r.vehicle_type()].capacity()))
            .sum()
    }

    pub fn time_warp(&self) -> f64 {
        self.time_warp
    }

    pub fn prizes(&self) -> f64 {
        self.prizes
    }

    pub fn uncollected_prizes(&self) -> f64 {
        self.uncollected_prizes
    }

    /// Predecessor/successor of `location` in whichever route visits it, or
    /// `None` if the location is an unvisited client or a depot not at the
    /// edge of any route.
    pub fn neighbours(&self, location: usize) -> Option<(usize, usize)> {
        self.neighbours.get(location).copied().flatten()
    }

    pub fn neighbours_map(&self) -> &[Option<(usize, usize)>] {
        &self.neighbours
    }

    /// The feasible/infeasible penalised cost of this solution under `ce`.
    pub fn cost(&self, data: &ProblemData, ce: &CostEvaluator) -> f64 {
        ce.cost(
            self.distance,
            self.fixed_vehicle_cost,
            self.excess_load(data),
            self.time_warp,
            self.uncollected_prizes,
        )
    }

    /// The always-finite penalised cost of this solution under `ce`.
    pub fn penalised_cost(&self, data: &ProblemData, ce: &CostEvaluator) -> f64 {
        ce.penalised_cost(
            self.distance,
            self.fixed_vehicle_cost,
            self.excess_load(data),
            self.time_warp,
            self.uncollected_prizes,
        )
    }

    /// Broken-pairs distance to `other`: the fraction of clients whose
    /// predecessor or successor differs between the two solutions.
    ///
    /// Used as the diversity metric between population members.
    pub fn broken_pairs_distance(&self, other: &Solution, data: &ProblemData) -> f64 {
        let mut broken = 0usize;
        for client in data.num_depots()..data.num_locations() {
            if self.neighbours(client) != other.neighbours(client) {
                broken += 1;
            }
        }
        broken as f64 / data.num_clients() as f64
    }
}
