//! Crate-wide error taxonomy.
//!
//! Errors are raised only at construction boundaries (`ProblemData`,
//! `Solution`) and at explicit indexing operations. The operator and
//! segment-algebra layers are total functions and never return `Result`;
//! infeasibility is encoded as penalised cost, not as an error.

use thiserror::Error;

/// Errors that can arise while building or indexing routing data.
#[derive(Debug, Error, PartialEq)]
pub enum RoutingError {
    /// A distance or duration matrix was not `n x n`.
    #[error("matrix has {rows} rows but {expected} locations were declared")]
    NonSquareMatrix { rows: usize, expected: usize },

    /// A negative entry appeared in a distance or duration matrix.
    #[error("negative measure {value} at ({from}, {to})")]
    NegativeMeasure { from: usize, to: usize, value: f64 },

    /// `tw_early > tw_late` for a client, depot, or vehicle type.
    #[error("invalid time window [{early}, {late}] for location {location}")]
    InvalidTimeWindow {
        location: usize,
        early: f64,
        late: f64,
    },

    /// A vehicle type referenced a depot index outside `[0, num_depots)`.
    #[error("depot index {depot} out of range (num_depots = {num_depots})")]
    DepotIndexOutOfRange { depot: usize, num_depots: usize },

    /// An index was out of bounds for a route or the location table.
    #[error("index {index} out of range (len = {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A `Solution` was constructed referencing a client that does not exist,
    /// or that appears in more than one route.
    #[error("solution is inconsistent at client {client}")]
    InconsistentSolution { client: usize },

    /// A `Solution` assigned more routes to a vehicle type than are available.
    #[error(
        "vehicle type {vehicle_type} has {available} available but {assigned} routes were assigned"
    )]
    VehicleTypeUnavailable {
        vehicle_type: usize,
        available: usize,
        assigned: usize,
    },
}

/// Convenience alias used throughout fallible constructors.
pub type Result<T> = std::result::Result<T, RoutingError>;
