//! Local search operators.
//!
//! Every operator implements one of two contracts: a *node operator*
//! (`evaluate(U, V) -> delta_cost`, `apply(U, V)`) over client positions, or
//! a *route operator* over whole routes. `evaluate` is always a pure
//! function of the current routes; `apply` is the only place mutation
//! happens.

mod exchange;
mod move_two_clients_reversed;
mod relocate_star;
mod swap_routes;
mod swap_star;
mod two_opt;

pub use exchange::Exchange;
pub use move_two_clients_reversed::MoveTwoClientsReversed;
pub use relocate_star::RelocateStar;
pub use swap_routes::SwapRoutes;
pub use swap_star::SwapStar;
pub use two_opt::TwoOpt;

use crate::cost::CostEvaluator;
use crate::search::SearchRoute;

/// Penalised cost of a single route in isolation (no prize term — these
/// operators only reposition already-assigned, required clients).
pub(crate) fn route_cost(route: &SearchRoute, ce: &CostEvaluator) -> f64 {
    ce.penalised_cost(
        route.distance(),
        route.fixed_vehicle_cost(),
        route.excess_load(),
        route.time_warp(),
        0.0,
    )
}
