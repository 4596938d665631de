//! `MoveTwoClientsReversed`: relocates two consecutive clients, inserting
//! them at the target position in reverse order.
//!
//! A variant of `Exchange<2, 0>` that additionally reverses the pair,
//! catching improvements plain relocation misses when the pair's internal
//! orientation matters for the destination's neighbours.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::route_cost;
use crate::search::SearchRoute;

pub struct MoveTwoClientsReversed;

impl MoveTwoClientsReversed {
    fn spliced(
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
    ) -> (Vec<usize>, Vec<usize>) {
        let i1 = pos1 - 1;
        let i2 = pos2 - 1;
        let v1 = r1.visits().to_vec();
        let v2 = r2.visits().to_vec();
        let mut pair = v1[i1..i1 + 2].to_vec();
        pair.reverse();

        let mut new_v1 = Vec::with_capacity(v1.len());
        new_v1.extend_from_slice(&v1[..i1]);
        new_v1.extend_from_slice(&v1[i1 + 2..]);

        let mut new_v2 = Vec::with_capacity(v2.len() + 2);
        new_v2.extend_from_slice(&v2[..i2]);
        new_v2.extend_from_slice(&pair);
        new_v2.extend_from_slice(&v2[i2..]);

        (new_v1, new_v2)
    }

    /// Evaluates relocating the pair starting at slot `pos1` in `r1` into
    /// `r2` at slot `pos2`, reversed. Requires `pos1 + 1 <= r1.size()` and
    /// that `r1`/`r2` are different routes.
    pub fn evaluate(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
    ) -> Option<f64> {
        if pos1 < 1 || pos1 + 1 > r1.size() {
            return None;
        }
        if pos2 < 1 || pos2 > r2.size() + 1 {
            return None;
        }
        let old_cost = route_cost(r1, ce) + route_cost(r2, ce);
        let (new_v1, new_v2) = Self::spliced(r1, pos1, r2, pos2);
        let trial1 = SearchRoute::new(data, r1.vehicle_type(), new_v1);
        let trial2 = SearchRoute::new(data, r2.vehicle_type(), new_v2);
        let new_cost = route_cost(&trial1, ce) + route_cost(&trial2, ce);
        Some(new_cost - old_cost)
    }

    pub fn apply(r1: &mut SearchRoute, pos1: usize, r2: &mut SearchRoute, pos2: usize) {
        let (new_v1, new_v2) = Self::spliced(r1, pos1, r2, pos2);
        r1.set_visits(new_v1);
        r2.set_visits(new_v2);
        r1.update();
        r2.update();
    }
}
