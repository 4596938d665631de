//! Immutable problem description: clients, depots, vehicle types, and the
//! distance/duration matrices that relate them.

mod client;
mod depot;
mod problem_data;
mod vehicle_type;

pub use client::Client;
pub use depot::Depot;
pub use problem_data::{Location, ProblemData};
pub use vehicle_type::VehicleType;
