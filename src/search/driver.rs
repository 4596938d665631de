//! Local search driver: projects a `Solution` to mutable routes, applies
//! node- and route-level operators to convergence, and exports an
//! improved `Solution`.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::{
    Exchange, MoveTwoClientsReversed, RelocateStar, SwapRoutes, SwapStar, TwoOpt,
};
use crate::rng::Rng;
use crate::search::SearchRoute;
use crate::solution::Solution;

/// Drives first-improvement local search over a set of mutable routes.
///
/// Single-threaded and synchronous: one `run()` call performs node-operator
/// sweeps, then route-operator sweeps, alternating until neither phase
/// finds an improving move.
pub struct Driver<'a> {
    data: &'a ProblemData,
    ce: CostEvaluator,
    routes: Vec<SearchRoute<'a>>,
    neighbours: Vec<Vec<usize>>,
    rng: Rng,
    swap_star: SwapStar,
}

impl<'a> Driver<'a> {
    /// Projects `solution`'s routes to mutable search routes and builds a
    /// granular neighbour list of the `k` nearest locations (by distance)
    /// for every client.
    pub fn new(
        data: &'a ProblemData,
        ce: CostEvaluator,
        solution: &Solution,
        seed: u32,
        k: usize,
    ) -> Self {
        let routes: Vec<SearchRoute<'a>> = solution
            .routes()
            .iter()
            .map(|r| SearchRoute::new(data, r.vehicle_type(), r.visits().to_vec()))
            .collect();

        let neighbours = (0..data.num_locations())
            .map(|loc| Self::k_nearest(data, loc, k))
            .collect();

        let swap_star = SwapStar::new(routes.len());
        Self {
            data,
            ce,
            routes,
            neighbours,
            rng: Rng::new(seed),
            swap_star,
        }
    }

    fn k_nearest(data: &ProblemData, from: usize, k: usize) -> Vec<usize> {
        let mut candidates: Vec<usize> = (0..data.num_locations())
            .filter(|&to| to != from && to >= data.num_depots())
            .collect();
        candidates.sort_by(|&a, &b| {
            data.distance(from, a)
                .partial_cmp(&data.distance(from, b))
                .unwrap()
        });
        candidates.truncate(k);
        candidates
    }

    /// Finds the `(route, position)` slot currently holding `location`, if
    /// any route visits it.
    fn locate(&self, location: usize) -> Option<(usize, usize)> {
        self.routes.iter().enumerate().find_map(|(r, route)| {
            route
                .visits()
                .iter()
                .position(|&c| c == location)
                .map(|i| (r, i + 1))
        })
    }

    fn node_sweep(&mut self) -> bool {
        let mut improved_any = false;
        let mut clients: Vec<usize> = (data_client_range(self.data)).collect();
        self.rng.shuffle(&mut clients);

        for u in clients {
            let Some((ru, pu)) = self.locate(u) else {
                continue;
            };
            let candidates = self.neighbours[u].clone();
            for v in candidates {
                let Some((rv, pv)) = self.locate(v) else {
                    continue;
                };
                if ru == rv && pu == pv {
                    continue;
                }

                if ru == rv {
                    let (lo, hi) = (pu.min(pv), pu.max(pv));
                    if let Some(delta) =
                        TwoOpt::evaluate_intra(self.data, &self.ce, &self.routes[ru], lo - 1, hi)
                    {
                        if delta < -1e-9 {
                            TwoOpt::apply_intra(&mut self.routes[ru], lo - 1, hi);
                            self.swap_star.update(ru);
                            improved_any = true;
                            break;
                        }
                    }
                    if let Some(delta) = Exchange::<1, 1>::evaluate(
                        self.data,
                        &self.ce,
                        &self.routes[ru],
                        pu,
                        &self.routes[rv],
                        pv,
                        true,
                    ) {
                        if delta < -1e-9 {
                            Exchange::<1, 1>::apply_same_route(&mut self.routes[ru], pu, pv);
                            self.swap_star.update(ru);
                            improved_any = true;
                            break;
                        }
                    }
                } else {
                    if let Some(delta) = Exchange::<1, 0>::evaluate(
                        self.data,
                        &self.ce,
                        &self.routes[ru],
                        pu,
                        &self.routes[rv],
                        pv,
                        false,
                    ) {
                        if delta < -1e-9 {
                            let (a, b) = split_pair(&mut self.routes, ru, rv);
                            Exchange::<1, 0>::apply(a, pu, b, pv);
                            self.swap_star.update(ru);
                            self.swap_star.update(rv);
                            improved_any = true;
                            break;
                        }
                    }
                    if let Some(delta) = Exchange::<1, 1>::evaluate(
                        self.data,
                        &self.ce,
                        &self.routes[ru],
                        pu,
                        &self.routes[rv],
                        pv,
                        false,
                    ) {
                        if delta < -1e-9 {
                            let (a, b) = split_pair(&mut self.routes, ru, rv);
                            Exchange::<1, 1>::apply(a, pu, b, pv);
                            self.swap_star.update(ru);
                            self.swap_star.update(rv);
                            improved_any = true;
                            break;
                        }
                    }
                    if pu < self.routes[ru].size() {
                        if let Some(delta) = MoveTwoClientsReversed::evaluate(
                            self.data,
                            &self.ce,
                            &self.routes[ru],
                            pu,
                            &self.routes[rv],
                            pv,
                        ) {
                            if delta < -1e-9 {
                                let (a, b) = split_pair(&mut self.routes, ru, rv);
                                MoveTwoClientsReversed::apply(a, pu, b, pv);
                                self.swap_star.update(ru);
                                self.swap_star.update(rv);
                                improved_any = true;
                                break;
                            }
                        }
                    }
                }
            }
        }
        improved_any
    }

    fn route_sweep(&mut self) -> bool {
        let n = self.routes.len();
        if n < 2 {
            return false;
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if let Some(delta) =
                    RelocateStar::best_move(self.data, &self.ce, &self.routes[i], &self.routes[j])
                {
                    if delta.delta < -1e-9 {
                        let (a, b) = split_pair(&mut self.routes, i, j);
                        RelocateStar::apply(&delta, a, b);
                        self.swap_star.update(i);
                        self.swap_star.update(j);
                        return true;
                    }
                }

                if let Some(mv) = self
                    .swap_star
                    .evaluate(self.data, &self.ce, &self.routes, i, j)
                {
                    if mv.delta < -1e-9 {
                        let (a, b) = split_pair(&mut self.routes, i, j);
                        self.swap_star.apply(&mv, a, b, i, j);
                        return true;
                    }
                }

                if let Some(delta) =
                    SwapRoutes::evaluate(self.data, &self.ce, &self.routes[i], &self.routes[j])
                {
                    if delta < -1e-9 {
                        let (a, b) = split_pair(&mut self.routes, i, j);
                        SwapRoutes::apply(a, b);
                        self.swap_star.update(i);
                        self.swap_star.update(j);
                        return true;
                    }
                }

                if self.routes[i].depot() == self.routes[j].depot() {
                    if let Some((pos1, pos2, delta)) = Self::best_inter_two_opt(
                        self.data,
                        &self.ce,
                        &self.routes[i],
                        &self.routes[j],
                    ) {
                        if delta < -1e-9 {
                            let (a, b) = split_pair(&mut self.routes, i, j);
                            TwoOpt::apply_inter(a, pos1, b, pos2);
                            self.swap_star.update(i);
                            self.swap_star.update(j);
                            return true;
                        }
                    }
                }
            }
        }
        false
    }

    fn best_inter_two_opt(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        r2: &SearchRoute,
    ) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for pos1 in 0..r1.locations().len() - 1 {
            for pos2 in 0..r2.locations().len() - 1 {
                if let Some(delta) = TwoOpt::evaluate_inter(data, ce, r1, pos1, r2, pos2) {
                    if best.as_ref().is_none_or(|b| delta < b.2) {
                        best = Some((pos1, pos2, delta));
                    }
                }
            }
        }
        best
    }

    /// Runs node- then route-operator sweeps, alternating until a full
    /// round of both finds no improving move, then exports a `Solution`.
    pub fn run(mut self) -> Solution {
        self.swap_star.init();
        loop {
            let mut improved = self.node_sweep();
            improved |= self.route_sweep();
            if !improved {
                break;
            }
        }
        self.export()
    }

    fn export(&self) -> Solution {
        let routes = self
            .routes
            .iter()
            .map(|r| (r.vehicle_type(), r.visits().to_vec()))
            .collect();
        Solution::new(self.data, routes).expect("search driver preserves solution consistency")
    }
}

fn data_client_range(data: &ProblemData) -> std::ops::Range<usize> {
    data.num_depots()..data.num_locations()
}

/// Borrows two distinct elements of `routes` mutably by index.
fn split_pair<'a, 'b>(
    routes: &'a mut [SearchRoute<'b>],
    i: usize,
    j: usize,
) -> (&'a mut SearchRoute<'b>, &'a mut SearchRoute<'b>) {
    assert_ne!(i, j);
    if i < j {
        let (left, right) = routes.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = routes.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
