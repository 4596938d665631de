//! # vrp-core
//!
//! Vehicle routing optimization library built around a segment-algebra
//! route representation (Vidal et al., 2014) that lets local-search
//! operators evaluate a candidate move in time proportional to the pieces
//! being recombined rather than the whole route.
//!
//! ## Modules
//!
//! - [`data`] — Immutable problem description: clients, depots, vehicle
//!   types, and the distance/duration matrices relating them.
//! - [`segments`] — Associative distance/load/duration segment algebra.
//! - [`solution`] — Immutable, hash-equatable solution representation.
//! - [`search`] — Mutable route representation and the local-search driver.
//! - [`operators`] — Node- and route-level local-search neighbourhoods.
//! - [`repair`] — Greedy client (re-)insertion.
//! - [`crossover`] — Genetic recombination operators.
//! - [`cost`] — Penalised-cost objective.
//! - [`config`] — Solver-wide tunables.
//! - [`error`] — Crate-wide error taxonomy.

pub mod config;
pub mod cost;
pub mod crossover;
pub mod data;
pub mod error;
pub mod matrix;
pub mod operators;
pub mod repair;
pub mod rng;
pub mod search;
pub mod segments;
pub mod solution;
