//! `SwapRoutes`: for two routes of *different* vehicle types, exchanges
//! their entire client sequences — equivalent to a 2-opt between the depot
//! positions of both routes.

use crate::cost::CostEvaluator;
use crate::data::ProblemData;
use crate::operators::route_cost;
use crate::search::SearchRoute;

pub struct SwapRoutes;

impl SwapRoutes {
    /// Evaluates exchanging `r1` and `r2`'s full visit sequences. Only
    /// meaningful when the routes have different vehicle types — same-type
    /// routes would gain nothing since the sequences are interchangeable.
    pub fn evaluate(
        data: &ProblemData,
        ce: &CostEvaluator,
        r1: &SearchRoute,
        r2: &SearchRoute,
    ) -> Option<f64> {
        if r1.vehicle_type() == r2.vehicle_type() {
            return None;
        }
        let old_cost = route_cost(r1, ce) + route_cost(r2, ce);
        let trial1 = SearchRoute::new(data, r1.vehicle_type(), r2.visits().to_vec());
        let trial2 = SearchRoute::new(data, r2.vehicle_type(), r1.visits().to_vec());
        let new_cost = route_cost(&trial1, ce) + route_cost(&trial2, ce);
        Some(new_cost - old_cost)
    }

    pub fn apply(r1: &mut SearchRoute, r2: &mut SearchRoute) {
        let v1 = r1.visits().to_vec();
        let v2 = r2.visits().to_vec();
        r1.set_visits(v2);
        r2.set_visits(v1);
        r1.update();
        r2.update();
    }
}
