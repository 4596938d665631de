//! `TwoOpt`: reverses a sub-segment within one route, or exchanges the
//! suffixes of two routes, breaking exactly two edges and reconnecting them
//! the other way.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems."

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::route_cost;
use crate::search::SearchRoute;

pub struct TwoOpt;

impl TwoOpt {
    /// Evaluates reversing the sub-segment of `route` strictly between
    /// slots `pos1` and `pos2` (both full-locations indices, `pos1 < pos2`).
    pub fn evaluate_intra(
        data: &ProblemData,
        ce: &CostEvaluator,
        route: &SearchRoute,
        pos1: usize,
        pos2: usize,
    ) -> Option<f64> {
        if pos1 + 1 >= pos2 || pos2 >= route.locations().len() {
            return None;
        }
        let old_cost = route_cost(route, ce);
        let new_visits = Self::reversed_visits(route, pos1, pos2);
        let trial = SearchRoute::new(data, route.vehicle_type(), new_visits);
        Some(route_cost(&trial, ce) - old_cost)
    }

    pub fn apply_intra(route: &mut SearchRoute, pos1: usize, pos2: usize) {
        let new_visits = Self::reversed_visits(route, pos1, pos2);
        route.set_visits(new_visits);
        route.update();
    }

    fn reversed_visits(route: &SearchRoute, pos1: usize, pos2: usize) -> Vec<usize> {
        let locs = route.locations();
        let mut new_locs = Vec::with_capacity(locs.len());
        new_locs.extend_from_slice(&locs[..=pos1]);
        new_locs.extend(locs[pos1 + 1..=pos2].iter().rev());
        new_locs.extend_from_slice(&locs[pos2 + 1..]);
        new_locs[1..new_locs.len() - 1].to_vec()
    }

    /// Evaluates exchanging the suffixes of `r1` after slot `pos1` and `r2`
    /// after slot `pos2` (full-locations indices). Only meaningful when
    /// both routes share the same depot.
    pub fn evaluate_inter(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
    ) -> Option<f64> {
        if r1.depot() != r2.depot() {
            return None;
        }
        if pos1 >= r1.locations().len() - 1 || pos2 >= r2.locations().len() - 1 {
            return None;
        }
        let old_cost = route_cost(r1, ce) + route_cost(r2, ce);
        let (new_v1, new_v2) = Self::spliced_suffixes(r1, pos1, r2, pos2);
        let trial1 = SearchRoute::new(data, r1.vehicle_type(), new_v1);
        let trial2 = SearchRoute::new(data, r2.vehicle_type(), new_v2);
        let new_cost = route_cost(&trial1, ce) + route_cost(&trial2, ce);
        Some(new_cost - old_cost)
    }

    pub fn apply_inter(r1: &mut SearchRoute, pos1: usize, r2: &mut SearchRoute, pos2: usize) {
        let (new_v1, new_v2) = Self::spliced_suffixes(r1, pos1, r2, pos2);
        r1.set_visits(new_v1);
        r2.set_visits(new_v2);
        r1.update();
        r2.update();
    }

    fn spliced_suffixes(
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        let l1 = r1.locations();
        let l2 = r2.locations();
        let mut new1 = Vec::with_capacity(l1.len());
        new1.extend_from_slice(&l1[..=pos1]);
        new1.extend_from_slice(&l2[pos2 + 1..]);

        let mut new2 = Vec::with_capacity(l2.len());
        new2.extend_from_slice(&l2[..=pos2]);
        new2.extend_from_slice(&l1[pos1 + 1..]);

        (
            new1[1..new1.len() - 1].to_vec(),
            new2[1..new2.len() - 1].to_vec(),
        )
    }
}
