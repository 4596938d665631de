//! Repair operators consumed by the outer loop to reinsert clients a
//! destroy operator (or an infeasible crossover) left unassigned.
//!
//! # Reference
//!
//! Ropke, S. & Pisinger, D. (2006). "An Adaptive Large Neighborhood Search
//! Heuristic for the Pickup and Delivery Problem with Time Windows",
//! *Transportation Science* 40(4), 455-472.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::solution::{Route, Solution};

fn route_penalised_cost(data: &ProblemData, route: &Route, ce: &CostEvaluator) -> f64 {
    let capacity = data.vehicle_types()[route.vehicle_type()].capacity();
    ce.penalised_cost(
        route.distance(),
        data.vehicle_types()[route.vehicle_type()].fixed_cost(),
        route.excess_load(capacity),
        route.time_warp(),
        0.0,
    )
}

/// Where `best_insertion` would place a client: into an existing route at a
/// given slot, or into a freshly opened route on an available vehicle type.
enum Insertion {
    Existing { route: usize, pos: usize },
    NewRoute { vehicle_type: usize },
}

/// Scans every position of every existing route, plus opening a new route on
/// each vehicle type with spare availability, and returns the cheapest.
/// Comparing the two kinds of candidate directly is what lets a client start
/// a fresh route instead of being crammed into an already-full one whenever
/// that is actually the cheaper option.
fn best_insertion(
    data: &ProblemData,
    ce: &CostEvaluator,
    routes: &[(usize, Vec<usize>)],
    used: &[usize],
    client: usize,
) -> Option<(Insertion, f64)> {
    let mut best: Option<(Insertion, f64)> = None;
    for (ri, (vehicle_type, visits)) in routes.iter().enumerate() {
        let old_route = Route::new(data, *vehicle_type, visits.clone());
        let old_cost = route_penalised_cost(data, &old_route, ce);
        for pos in 0..=visits.len() {
            let mut trial = visits.clone();
            trial.insert(pos, client);
            let new_route = Route::new(data, *vehicle_type, trial);
            let delta = route_penalised_cost(data, &new_route, ce) - old_cost;
            if best.as_ref().is_none_or(|b| delta < b.1) {
                best = Some((Insertion::Existing { route: ri, pos }, delta));
            }
        }
    }
    for (vehicle_type, vt) in data.vehicle_types().iter().enumerate() {
        if used[vehicle_type] >= vt.num_available() {
            continue;
        }
        let new_route = Route::new(data, vehicle_type, vec![client]);
        let delta = route_penalised_cost(data, &new_route, ce);
        if best.as_ref().is_none_or(|b| delta < b.1) {
            best = Some((Insertion::NewRoute { vehicle_type }, delta));
        }
    }
    best
}

/// Inserts every client in `unvisited` at its cheapest position, one at a
/// time, cheapest client first. Each client's candidates span every slot of
/// every existing route plus opening a new route on any vehicle type with
/// spare availability, so a client is only packed into a costly existing
/// route when no fresh vehicle is available or cheaper. A client with no
/// feasible placement at all (no routes and no spare vehicle) is left
/// unassigned rather than panicking.
pub fn greedy_repair(
    solution: &Solution,
    unvisited: &[usize],
    data: &ProblemData,
    ce: &CostEvaluator,
) -> Solution {
    let mut routes: Vec<(usize, Vec<usize>)> = solution
        .routes()
        .iter()
        .map(|r| (r.vehicle_type(), r.visits().to_vec()))
        .collect();
    let mut used: Vec<usize> = vec![0; data.vehicle_types().len()];
    for (vt, _) in &routes {
        used[*vt] += 1;
    }

    let mut pending = unvisited.to_vec();
    while !pending.is_empty() {
        let mut chosen: Option<(usize, Insertion, f64)> = None;
        for (pi, &client) in pending.iter().enumerate() {
            if let Some((insertion, delta)) = best_insertion(data, ce, &routes, &used, client) {
                if chosen.as_ref().is_none_or(|c| delta < c.2) {
                    chosen = Some((pi, insertion, delta));
                }
            }
        }

        let Some((pi, insertion, _)) = chosen else {
            pending.remove(0);
            continue;
        };
        let client = pending.remove(pi);
        match insertion {
            Insertion::Existing { route, pos } => routes[route].1.insert(pos, client),
            Insertion::NewRoute { vehicle_type } => {
                used[vehicle_type] += 1;
                routes.push((vehicle_type, vec![client]));
            }
        }
    }

    Solution::new(data, routes).expect("repair only ever reinserts valid client indices")
}

/// Inserts each client in `unvisited` into the existing route whose
/// centroid is nearest, at that route's best position. Cheaper than
/// [`greedy_repair`] (one insertion scan per client instead of a full
/// cheapest-first ranking) at the cost of route-assignment quality.
pub fn nearest_route_insert(
    solution: &Solution,
    unvisited: &[usize],
    data: &ProblemData,
    ce: &CostEvaluator,
) -> Solution {
    let mut routes: Vec<(usize, Vec<usize>)> = solution
        .routes()
        .iter()
        .map(|r| (r.vehicle_type(), r.visits().to_vec()))
        .collect();

    for &client in unvisited {
        let location = data.location(client).expect("valid client");
        let (cx, cy) = (location.x(), location.y());

        let nearest = solution
            .routes()
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                let da = (a.centroid().0 - cx).powi(2) + (a.centroid().1 - cy).powi(2);
                let db = (b.centroid().0 - cx).powi(2) + (b.centroid().1 - cy).powi(2);
                da.partial_cmp(&db).unwrap()
            })
            .map(|(idx, _)| idx);

        let Some(ri) = nearest else { continue };
        let vehicle_type = routes[ri].0;
        let visits = routes[ri].1.clone();
        let old_route = Route::new(data, vehicle_type, visits.clone());
        let old_cost = route_penalised_cost(data, &old_route, ce);

        let mut best_pos = 0;
        let mut best_delta = f64::INFINITY;
        for pos in 0..=visits.len() {
            let mut trial = visits.clone();
            trial.insert(pos, client);
            let new_route = Route::new(data, vehicle_type, trial);
            let delta = route_penalised_cost(data, &new_route, ce) - old_cost;
            if delta < best_delta {
                best_delta = delta;
                best_pos = pos;
            }
        }
        routes[ri].1.insert(best_pos, client);
    }

    Solution::new(data, routes).expect("repair only ever reinserts valid client indices")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, VehicleType};
    use crate::matrix::Matrix;

    fn data() -> ProblemData {
        let depots = vec![Depot::new(0.0, 0.0)];
        let clients = (1..=4)
            .map(|i| Client::new(i as f64, 0.0, 1.0, 0.0, 0.0).unwrap())
            .collect();
        let n = 5;
        let coords: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let mut grid = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                grid[i * n + j] = (coords[i] - coords[j]).abs();
            }
        }
        let distances = Matrix::from_data(n, grid.clone()).unwrap();
        let durations = Matrix::from_data(n, grid).unwrap();
        let vts = vec![VehicleType::new(3, 100.0, 0)];
        ProblemData::new(depots, clients, distances, durations, vts).unwrap()
    }

    #[test]
    fn greedy_repair_inserts_all_unvisited_clients() {
        let data = data();
        let ce = CostEvaluator::new(1.0, 1.0);
        let solution = Solution::new(&data, vec![(0, vec![1])]).unwrap();
        let repaired = greedy_repair(&solution, &[2, 3, 4], &data, &ce);
        assert_eq!(repaired.num_missing_clients(), 0);
    }

    #[test]
    fn nearest_route_insert_places_client_in_closest_route() {
        let data = data();
        let ce = CostEvaluator::new(1.0, 1.0);
        let solution = Solution::new(&data, vec![(0, vec![1]), (0, vec![4])]).unwrap();
        let repaired = nearest_route_insert(&solution, &[2], &data, &ce);
        let r1 = &repaired.routes()[0];
        assert!(r1.visits().contains(&2));
    }
}
