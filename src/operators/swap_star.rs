//! `SwapStar`: exchanges one client from each of two routes, reinserting
//! each at its best *free* position in the other route rather than at its
//! counterpart's old slot.
//!
//! # Algorithm
//!
//! Maintains, per route, two caches: `removal_cost[client]` (the cost delta
//! of removing that client) and `three_best[client]` (the three cheapest
//! insertion positions for that client in this route, sorted ascending).
//! Keeping three guarantees a valid insertion choice even when the cheapest
//! position is the slot just vacated by the move's counterpart. Both caches
//! are invalidated per route by [`SwapStar::update`]; [`SwapStar::init`]
//! marks every route dirty.
//!
//! # Reference
//!
//! Vidal, T. (2022). "Hybrid genetic search for the CVRP: Open-source
//! implementation and SWAP* neighborhood." Computers & Operations Research.

use std::collections::HashMap;

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::route_cost;
use crate::search::SearchRoute;

#[derive(Debug, Clone, Copy)]
pub struct SwapStarMove {
    pub pos_u: usize,
    pub pos_v: usize,
    pub u: usize,
    pub v: usize,
    pub insert_u_pos: usize,
    pub insert_v_pos: usize,
    pub delta: f64,
}

#[derive(Default)]
pub struct SwapStar {
    removal_cost: Vec<HashMap<usize, f64>>,
    three_best: Vec<HashMap<usize, Vec<(usize, f64)>>>,
    dirty: Vec<bool>,
}

impl SwapStar {
    pub fn new(num_routes: usize) -> Self {
        Self {
            removal_cost: vec![HashMap::new(); num_routes],
            three_best: vec![HashMap::new(); num_routes],
            dirty: vec![true; num_routes],
        }
    }

    /// Marks every route's caches stale.
    pub fn init(&mut self) {
        for id in 0..self.dirty.len() {
            self.update(id);
        }
    }

    /// Marks route `route_id`'s caches stale after it was mutated.
    pub fn update(&mut self, route_id: usize) {
        self.dirty[route_id] = true;
        self.removal_cost[route_id].clear();
        self.three_best[route_id].clear();
    }

    fn removal_cost(
        &mut self,
        data: &ProblemData,
        ce: &CostEvaluator,
        routes: &[SearchRoute],
        route_id: usize,
        pos: usize,
    ) -> f64 {
        let route = &routes[route_id];
        let client = route.location_at(pos);
        if let Some(&c) = self.removal_cost[route_id].get(&client) {
            return c;
        }
        let mut visits = route.visits().to_vec();
        visits.remove(pos - 1);
        let trial = SearchRoute::new(data, route.vehicle_type(), visits);
        let delta = route_cost(&trial, ce) - route_cost(route, ce);
        self.removal_cost[route_id].insert(client, delta);
        delta
    }

    fn three_best_insertion(
        &mut self,
        data: &ProblemData,
        ce: &CostEvaluator,
        routes: &[SearchRoute],
        route_id: usize,
        client: usize,
    ) -> Vec<(usize, f64)> {
        if let Some(cached) = self.three_best[route_id].get(&client) {
            return cached.clone();
        }
        let route = &routes[route_id];
        let base_cost = route_cost(route, ce);
        let mut candidates: Vec<(usize, f64)> = Vec::with_capacity(route.size() + 1);
        for to_pos in 1..=route.size() + 1 {
            let mut visits = route.visits().to_vec();
            visits.insert(to_pos - 1, client);
            let trial = SearchRoute::new(data, route.vehicle_type(), visits);
            candidates.push((to_pos, route_cost(&trial, ce) - base_cost));
        }
        candidates.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
        candidates.truncate(3);
        self.three_best[route_id].insert(client, candidates.clone());
        candidates
    }

    /// Cheapest cached insertion position for `client` into `route_id`,
    /// other than `excluded_pos` (the slot the move's counterpart vacates).
    fn best_insertion_excluding(
        &mut self,
        data: &ProblemData,
        ce: &CostEvaluator,
        routes: &[SearchRoute],
        route_id: usize,
        client: usize,
        excluded_pos: usize,
    ) -> (usize, f64) {
        self.three_best_insertion(data, ce, routes, route_id, client)
            .into_iter()
            .find(|&(pos, _)| pos != excluded_pos && pos != excluded_pos + 1)
            .unwrap_or((excluded_pos, f64::INFINITY))
    }

    /// Evaluates every `(u, v)` pair across `r1_id`/`r2_id`, tie-breaking
    /// deterministically by ascending `(u, v)` client index.
    pub fn evaluate(
        &mut self,
        data: &ProblemData,
        ce: &CostEvaluator,
        routes: &[SearchRoute],
        r1_id: usize,
        r2_id: usize,
    ) -> Option<SwapStarMove> {
        if self.dirty[r1_id] {
            self.dirty[r1_id] = false;
        }
        if self.dirty[r2_id] {
            self.dirty[r2_id] = false;
        }

        let mut best: Option<SwapStarMove> = None;
        for pos_u in 1..=routes[r1_id].size() {
            let u = routes[r1_id].location_at(pos_u);
            let remove_u = self.removal_cost(data, ce, routes, r1_id, pos_u);
            for pos_v in 1..=routes[r2_id].size() {
                let v = routes[r2_id].location_at(pos_v);
                let remove_v = self.removal_cost(data, ce, routes, r2_id, pos_v);
                let (insert_u_pos, insert_u) =
                    self.best_insertion_excluding(data, ce, routes, r2_id, u, pos_v);
                let (insert_v_pos, insert_v) =
                    self.best_insertion_excluding(data, ce, routes, r1_id, v, pos_u);
                let delta = remove_u + insert_u + remove_v + insert_v;
                let better = match &best {
                    None => delta < -1e-9,
                    Some(b) => {
                        delta < b.delta - 1e-12
                            || ((delta - b.delta).abs() < 1e-12 && (u, v) < (b.u, b.v))
                    }
                };
                if delta < -1e-9 && better {
                    best = Some(SwapStarMove {
                        pos_u,
                        pos_v,
                        u,
                        v,
                        insert_u_pos,
                        insert_v_pos,
                        delta,
                    });
                }
            }
        }
        best
    }

    /// Applies a move returned by [`SwapStar::evaluate`] and invalidates
    /// both routes' caches.
    pub fn apply(
        &mut self,
        mv: &SwapStarMove,
        r1: &mut SearchRoute,
        r2: &mut SearchRoute,
        r1_id: usize,
        r2_id: usize,
    ) {
        let mut v1 = r1.visits().to_vec();
        let mut v2 = r2.visits().to_vec();
        v1.remove(mv.pos_u - 1);
        v2.remove(mv.pos_v - 1);
        let insert_v_pos = mv.insert_v_pos.min(v1.len() + 1);
        let insert_u_pos = mv.insert_u_pos.min(v2.len() + 1);
        v1.insert(insert_v_pos - 1, mv.v);
        v2.insert(insert_u_pos - 1, mv.u);
        r1.set_visits(v1);
        r2.set_visits(v2);
        r1.update();
        r2.update();
        self.update(r1_id);
        self.update(r2_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, ProblemData, VehicleType};
    use crate::matrix::Matrix;

    fn data() -> ProblemData {
        let depots = vec![Depot::new(0.0, 0.0)];
        let clients = vec![
            Client::new(1.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(10.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(11.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
            Client::new(2.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
        ];
        let n = 5;
        let coords = [0.0f64, 1.0, 10.0, 11.0, 2.0];
        let mut grid = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                grid[i * n + j] = (coords[i] - coords[j]).abs();
            }
        }
        let distances = Matrix::from_data(n, grid.clone()).unwrap();
        let durations = Matrix::from_data(n, grid).unwrap();
        let vts = vec![VehicleType::new(2, 100.0, 0)];
        ProblemData::new(depots, clients, distances, durations, vts).unwrap()
    }

    #[test]
    fn finds_improving_cross_route_swap() {
        let data = data();
        let ce = CostEvaluator::new(1.0, 1.0);
        // client at location 3 (index1, coord 10) sits far from route 1's
        // other member; location 4 (index4, coord 2) sits far from route 2.
        let routes = vec![
            SearchRoute::new(&data, 0, vec![1, 3]),
            SearchRoute::new(&data, 0, vec![2, 4]),
        ];
        let mut op = SwapStar::new(2);
        op.init();
        let mv = op.evaluate(&data, &ce, &routes, 0, 1);
        assert!(mv.is_some());
    }

    #[test]
    fn cache_is_cleared_on_update() {
        let data = data();
        let ce = CostEvaluator::new(1.0, 1.0);
        let routes = vec![
            SearchRoute::new(&data, 0, vec![1, 3]),
            SearchRoute::new(&data, 0, vec![2, 4]),
        ];
        let mut op = SwapStar::new(2);
        op.init();
        op.removal_cost(&data, &ce, &routes, 0, 1);
        assert!(!op.removal_cost[0].is_empty());
        op.update(0);
        assert!(op.removal_cost[0].is_empty());
    }
}
