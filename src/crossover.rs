//! Genetic recombination operators consumed by the outer loop's population
//! manager: leaf functions only, no selection or replacement policy.

use u_metaheur::ga::operators::order_crossover;

use crate::data::ProblemData;
use crate::rng::Rng;
use crate::solution::Solution;

/// Flattens a solution into a permutation of compact client ids
/// (`location - num_depots`), route by route, missing clients appended.
fn giant_tour(solution: &Solution, data: &ProblemData) -> Vec<usize> {
    let mut tour: Vec<usize> = solution
        .routes()
        .iter()
        .flat_map(|r| r.visits().iter().map(|&loc| loc - data.num_depots()))
        .collect();
    tour.extend(
        solution
            .missing_clients()
            .iter()
            .map(|&loc| loc - data.num_depots()),
    );
    tour
}

/// Greedily repacks a compact-id giant tour into vehicle routes, filling
/// each available vehicle instance in turn until its capacity would be
/// exceeded. Clients left over once every vehicle instance is used are
/// dropped (the outer loop's repair operators reinsert them).
///
/// A simplified stand-in for the Prins (2004) split dynamic program, which
/// assumes a single vehicle type; ours must pack a heterogeneous fleet.
fn split_giant_tour(data: &ProblemData, tour: &[usize]) -> Vec<(usize, Vec<usize>)> {
    let mut vehicle_queue = Vec::new();
    for (idx, vt) in data.vehicle_types().iter().enumerate() {
        for _ in 0..vt.num_available() {
            vehicle_queue.push(idx);
        }
    }

    let mut routes = Vec::new();
    let mut i = 0;
    for vehicle_type in vehicle_queue {
        if i >= tour.len() {
            break;
        }
        let capacity = data.vehicle_types()[vehicle_type].capacity();
        let mut visits = Vec::new();
        let mut load = 0.0;
        while i < tour.len() {
            let location = tour[i] + data.num_depots();
            let delivery = data.location(location).expect("valid client").delivery();
            if !visits.is_empty() && load + delivery > capacity {
                break;
            }
            visits.push(location);
            load += delivery;
            i += 1;
        }
        routes.push((vehicle_type, visits));
    }
    routes
}

/// Ordered crossover (Davis, 1985) over giant-tour encodings of two parent
/// solutions: recombines client visiting order, then repacks the child tour
/// into vehicle routes.
pub fn ordered_crossover(
    parents: (&Solution, &Solution),
    data: &ProblemData,
    rng: &mut Rng,
) -> Solution {
    let t1 = giant_tour(parents.0, data);
    let t2 = giant_tour(parents.1, data);
    let (child, _) = order_crossover(&t1, &t2, rng);
    let routes = split_giant_tour(data, &child);
    Solution::new(data, routes).expect("crossover preserves the client multiset")
}

/// Selective route exchange: injects a whole route from `parents.1` into
/// `parents.0`, removing its clients from wherever they appeared in
/// `parents.0` so the result stays consistent.
pub fn selective_route_exchange(
    parents: (&Solution, &Solution),
    data: &ProblemData,
    rng: &mut Rng,
) -> Solution {
    let (base, donor) = parents;
    if donor.num_routes() == 0 {
        return base.clone();
    }
    let donor_route = &donor.routes()[rng.randint(donor.num_routes() as u32) as usize];
    let incoming: std::collections::HashSet<usize> = donor_route.visits().iter().copied().collect();

    let mut routes: Vec<(usize, Vec<usize>)> = base
        .routes()
        .iter()
        .map(|r| {
            let visits = r
                .visits()
                .iter()
                .copied()
                .filter(|c| !incoming.contains(c))
                .collect();
            (r.vehicle_type(), visits)
        })
        .collect();
    routes.push((donor_route.vehicle_type(), donor_route.visits().to_vec()));

    Solution::new(data, routes).expect("route exchange preserves the client multiset")
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
        let vts = vec![VehicleType::new(2, 3.0, 0)];
        ProblemData::new(depots, clients, distances, durations, vts).unwrap()
    }

    #[test]
    fn ordered_crossover_preserves_all_clients() {
        let data = data();
        let p1 = Solution::new(&data, vec![(0, vec![1, 2]), (0, vec![3, 4])]).unwrap();
        let p2 = Solution::new(&data, vec![(0, vec![4, 3, 2, 1])]).unwrap();
        let mut rng = Rng::new(11);
        let child = ordered_crossover((&p1, &p2), &data, &mut rng);
        assert_eq!(child.num_missing_clients(), 0);
    }

    #[test]
    fn selective_route_exchange_merges_a_donor_route() {
        let data = data();
        let p1 = Solution::new(&data, vec![(0, vec![1, 2])]).unwrap();
        let p2 = Solution::new(&data, vec![(0, vec![3, 4])]).unwrap();
        let mut rng = Rng::new(3);
        let child = selective_route_exchange((&p1, &p2), &data, &mut rng);
        assert_eq!(child.num_routes(), 2);
    }
}
