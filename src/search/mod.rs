//! Mutable search state: the route representation local-search operators
//! act on, and the driver that sweeps operators to convergence.

mod driver;
mod route;

pub use driver::Driver;
pub use route::SearchRoute;
