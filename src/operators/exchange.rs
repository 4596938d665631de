//! `Exchange<N, M>`: swap `N` consecutive clients starting at one position
//! with `M` consecutive clients starting at another.
//!
//! `M = 0` degenerates to relocating `N` clients; `N = M` is a symmetric
//! swap. Both routes may be the same route (an intra-route reordering) or
//! two different routes.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::route_cost;
use crate::search::SearchRoute;

/// One client position within a route: a 1-based slot index into the
/// route's client range `[1, size]`.
pub struct Exchange<const N: usize, const M: usize>;

impl<const N: usize, const M: usize> Exchange<N, M> {
    fn guard(
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
        same_route: bool,
    ) -> bool {
        if N == 0 && M == 0 {
            return false;
        }
        if pos1 < 1 || pos1 + N - 1 > r1.size() {
            return false;
        }
        if M > 0 && (pos2 < 1 || pos2 + M - 1 > r2.size()) {
            return false;
        }
        if M == 0 && pos2 < 1 {
            return false;
        }
        if same_route {
            if N == M && pos1 >= pos2 {
                // Only consider ordered pairs once to avoid double counting.
                return false;
            }
            let (lo, hi) = if pos1 <= pos2 {
                (pos1, pos2)
            } else {
                (pos2, pos1)
            };
            let (lo_len, hi_len) = if pos1 <= pos2 { (N, M) } else { (M, N) };
            if lo + lo_len > hi {
                return false; // overlapping segments
            }
            if lo + lo_len == hi && lo_len > 0 && hi_len > 0 {
                // Adjacent same-route swaps are trivial / handled by 2-opt.
                return false;
            }
        }
        true
    }

    /// Evaluates the cost delta of swapping the `N`-segment at `pos1` in
    /// `r1` with the `M`-segment at `pos2` in `r2`. Returns `None` if the
    /// guards reject the move.
    pub fn evaluate(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
        same_route: bool,
    ) -> Option<f64> {
        if !Self::guard(r1, pos1, r2, pos2, same_route) {
            return None;
        }

        let (new_v1, new_v2) = Self::spliced(r1, pos1, r2, pos2, same_route);

        if same_route {
            let old_cost = route_cost(r1, ce);
            let trial = SearchRoute::new(data, r1.vehicle_type(), new_v1);
            let new_cost = route_cost(&trial, ce);
            Some(new_cost - old_cost)
        } else {
            let old_cost = route_cost(r1, ce) + route_cost(r2, ce);
            let trial1 = SearchRoute::new(data, r1.vehicle_type(), new_v1);
            let trial2 = SearchRoute::new(data, r2.vehicle_type(), new_v2);
            let new_cost = route_cost(&trial1, ce) + route_cost(&trial2, ce);
            Some(new_cost - old_cost)
        }
    }

    fn spliced(
        r1: &SearchRoute,
        pos1: usize,
        r2: &SearchRoute,
        pos2: usize,
        same_route: bool,
    ) -> (Vec<usize>, Vec<usize>) {
        let i1 = pos1 - 1;
        let i2 = pos2.saturating_sub(1);

        if same_route {
            let v = r1.visits().to_vec();
            let (lo, lo_n, hi, hi_n) = if i1 <= i2 {
                (i1, N, i2, M)
            } else {
                (i2, M, i1, N)
            };
            let seg_lo = v[lo..lo + lo_n].to_vec();
            let seg_hi = v[hi..hi + hi_n].to_vec();
            let mut new_v = Vec::with_capacity(v.len());
            new_v.extend_from_slice(&v[..lo]);
            new_v.extend_from_slice(&seg_hi);
            new_v.extend_from_slice(&v[lo + lo_n..hi]);
            new_v.extend_from_slice(&seg_lo);
            new_v.extend_from_slice(&v[hi + hi_n..]);
            (new_v.clone(), new_v)
        } else {
            let v1 = r1.visits().to_vec();
            let v2 = r2.visits().to_vec();
            let seg_a = v1[i1..i1 + N].to_vec();
            let seg_b = if M > 0 {
                v2[i2..i2 + M].to_vec()
            } else {
                Vec::new()
            };

            let mut new_v1 = Vec::with_capacity(v1.len());
            new_v1.extend_from_slice(&v1[..i1]);
            new_v1.extend_from_slice(&seg_b);
            new_v1.extend_from_slice(&v1[i1 + N..]);

            let mut new_v2 = Vec::with_capacity(v2.len());
            if M > 0 {
                new_v2.extend_from_slice(&v2[..i2]);
                new_v2.extend_from_slice(&seg_a);
                new_v2.extend_from_slice(&v2[i2 + M..]);
            } else {
                // Relocate: insert segment A at position pos2 in r2.
                new_v2.extend_from_slice(&v2[..i2]);
                new_v2.extend_from_slice(&seg_a);
                new_v2.extend_from_slice(&v2[i2..]);
            }
            (new_v1, new_v2)
        }
    }

    /// Applies the swap computed by `evaluate` to `r1`/`r2` directly.
    pub fn apply(r1: &mut SearchRoute, pos1: usize, r2: &mut SearchRoute, pos2: usize) {
        let (new_v1, new_v2) = Self::spliced(r1, pos1, r2, pos2, false);
        r1.set_visits(new_v1);
        r2.set_visits(new_v2);
        r1.update();
        r2.update();
    }

    /// Applies an intra-route swap to a single route.
    pub fn apply_same_route(route: &mut SearchRoute, pos1: usize, pos2: usize) {
        let (new_v, _) = Self::spliced(route, pos1, route, pos2, true);
        route.set_visits(new_v);
        route.update();
    }
}
