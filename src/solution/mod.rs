//! Immutable solution representation: canonical, hash-equatable routes
//! produced by the search driver and consumed by the outer loop/population.

mod route;
#[allow(clippy::module_inception)]
mod solution;

pub use route::Route;
pub use solution::Solution;
