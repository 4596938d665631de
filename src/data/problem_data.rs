//! Immutable problem description.

use crate::data::{Client, Depot, VehicleType};
use crate::error::{Result, RoutingError};
use crate::matrix::Matrix;

/// A reference to one location, resolved to either a depot or a client.
#[derive(Debug, Clone, Copy)]
pub enum Location<'a> {
    Depot(&'a Depot),
    Client(&'a Client),
}

impl Location<'_> {
    pub fn x(&self) -> f64 {
        match self {
            Location::Depot(d) => d.x(),
            Location::Client(c) => c.x(),
        }
    }

    pub fn y(&self) -> f64 {
        match self {
            Location::Depot(d) => d.y(),
            Location::Client(c) => c.y(),
        }
    }

    pub fn tw_early(&self) -> f64 {
        match self {
            Location::Depot(d) => d.tw_early(),
            Location::Client(c) => c.tw_early(),
        }
    }

    pub fn tw_late(&self) -> f64 {
        match self {
            Location::Depot(d) => d.tw_late(),
            Location::Client(c) => c.tw_late(),
        }
    }

    pub fn delivery(&self) -> f64 {
        match self {
            Location::Depot(_) => 0.0,
            Location::Client(c) => c.delivery(),
        }
    }

    pub fn pickup(&self) -> f64 {
        match self {
            Location::Depot(_) => 0.0,
            Location::Client(c) => c.pickup(),
        }
    }

    pub fn service_duration(&self) -> f64 {
        match self {
            Location::Depot(_) => 0.0,
            Location::Client(c) => c.service_duration(),
        }
    }

    pub fn release_time(&self) -> f64 {
        match self {
            Location::Depot(_) => 0.0,
            Location::Client(c) => c.release_time(),
        }
    }

    pub fn prize(&self) -> f64 {
        match self {
            Location::Depot(_) => 0.0,
            Location::Client(c) => c.prize(),
        }
    }

    pub fn required(&self) -> bool {
        match self {
            Location::Depot(_) => true,
            Location::Client(c) => c.required(),
        }
    }

    pub fn is_depot(&self) -> bool {
        matches!(self, Location::Depot(_))
    }
}

/// Immutable description of a VRP instance: locations, a distance matrix, a
/// duration matrix, and the available vehicle types.
///
/// Depots occupy location indices `[0, num_depots)`; clients occupy
/// `[num_depots, num_locations)`.
///
/// # Examples
///
/// ```
/// use vrp_core::data::{Client, Depot, ProblemData, VehicleType};
/// use vrp_core::matrix::Matrix;
///
/// let depots = vec![Depot::new(0.0, 0.0)];
/// let clients = vec![Client::new(1.0, 0.0, 5.0, 0.0, 0.0).unwrap()];
/// let distances = Matrix::from_data(2, vec![0.0, 1.0, 1.0, 0.0]).unwrap();
/// let durations = distances.clone();
/// let vehicle_types = vec![VehicleType::new(1, 10.0, 0)];
///
/// let data = ProblemData::new(depots, clients, distances, durations, vehicle_types).unwrap();
/// assert_eq!(data.num_locations(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemData {
    depots: Vec<Depot>,
    clients: Vec<Client>,
    distances: Matrix,
    durations: Matrix,
    vehicle_types: Vec<VehicleType>,
}

impl ProblemData {
    pub fn new(
        depots: Vec<Depot>,
        clients: Vec<Client>,
        distances: Matrix,
        durations: Matrix,
        vehicle_types: Vec<VehicleType>,
    ) -> Result<Self> {
        let num_locations = depots.len() + clients.len();

        if distances.size() != num_locations {
            return Err(RoutingError::NonSquareMatrix {
                rows: distances.size(),
                expected: num_locations,
            });
        }
        if durations.size() != num_locations {
            return Err(RoutingError::NonSquareMatrix {
                rows: durations.size(),
                expected: num_locations,
            });
        }

        for vt in &vehicle_types {
            if vt.depot_index() >= depots.len() {
                return Err(RoutingError::DepotIndexOutOfRange {
                    depot: vt.depot_index(),
                    num_depots: depots.len(),
                });
            }
        }

        tracing::debug!(
            num_depots = depots.len(),
            num_clients = clients.len(),
            num_vehicle_types = vehicle_types.len(),
            "constructed ProblemData"
        );

        Ok(Self {
            depots,
            clients,
            distances,
            durations,
            vehicle_types,
        })
    }

    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn num_locations(&self) -> usize {
        self.depots.len() + self.clients.len()
    }

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    /// Resolves a location index to a depot or client.
    ///
    /// Fails with [`RoutingError::IndexOutOfRange`] rather than clamping.
    pub fn location(&self, index: usize) -> Result<Location<'_>> {
        if index < self.depots.len() {
            return Ok(Location::Depot(&self.depots[index]));
        }
        let client_idx = index - self.depots.len();
        self.clients
            .get(client_idx)
            .map(Location::Client)
            .ok_or(RoutingError::IndexOutOfRange {
                index,
                len: self.num_locations(),
            })
    }

    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    pub fn duration(&self, from: usize, to: usize) -> f64 {
        self.durations.get(from, to)
    }

    pub fn distances(&self) -> &Matrix {
        &self.distances
    }

    pub fn durations(&self) -> &Matrix {
        &self.durations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<Depot>, Vec<Client>, Matrix, Matrix, Vec<VehicleType>) {
        let depots = vec![Depot::new(0.0, 0.0)];
        let clients = vec![
            Client::new(1.0, 0.0, 5.0, 0.0, 0.0).unwrap(),
            Client::new(2.0, 0.0, 5.0, 0.0, 0.0).unwrap(),
        ];
        let n = 3;
        let mut data = vec![0.0f64; n * n];
        let coords = [0.0f64, 1.0, 2.0];
        for i in 0..n {
            for j in 0..n {
                data[i * n + j] = (coords[i] - coords[j]).abs();
            }
        }
        let distances = Matrix::from_data(n, data.clone()).unwrap();
        let durations = Matrix::from_data(n, data).unwrap();
        let vehicle_types = vec![VehicleType::new(2, 15.0, 0)];
        (depots, clients, distances, durations, vehicle_types)
    }

    #[test]
    fn construction_succeeds_for_consistent_instance() {
        let (depots, clients, distances, durations, vts) = sample();
        let data = ProblemData::new(depots, clients, distances, durations, vts).unwrap();
        assert_eq!(data.num_depots(), 1);
        assert_eq!(data.num_clients(), 2);
        assert_eq!(data.num_locations(), 3);
    }

    #[test]
    fn rejects_mismatched_distance_matrix_size() {
        let (depots, clients, _distances, durations, vts) = sample();
        let wrong = Matrix::new(2);
        let err = ProblemData::new(depots, clients, wrong, durations, vts).unwrap_err();
        assert!(matches!(err, RoutingError::NonSquareMatrix { .. }));
    }

    #[test]
    fn rejects_vehicle_type_with_invalid_depot_index() {
        let (depots, clients, distances, durations, _vts) = sample();
        let bad_vts = vec![VehicleType::new(1, 10.0, 5)];
        let err = ProblemData::new(depots, clients, distances, durations, bad_vts).unwrap_err();
        assert!(matches!(err, RoutingError::DepotIndexOutOfRange { .. }));
    }

    #[test]
    fn location_resolves_depots_then_clients() {
        let (depots, clients, distances, durations, vts) = sample();
        let data = ProblemData::new(depots, clients, distances, durations, vts).unwrap();
        assert!(data.location(0).unwrap().is_depot());
        assert!(!data.location(1).unwrap().is_depot());
        assert!(!data.location(2).unwrap().is_depot());
    }

    #[test]
    fn location_out_of_range_fails_instead_of_clamping() {
        let (depots, clients, distances, durations, vts) = sample();
        let data = ProblemData::new(depots, clients, distances, durations, vts).unwrap();
        let err = data.location(99).unwrap_err();
        assert!(matches!(err, RoutingError::IndexOutOfRange { .. }));
    }
}
