//! Mutable search route: the indexed sequence local-search operators
//! mutate directly, with cached prefix/suffix segment summaries.

use crate::data::ProblemData;
use crate::segments::{DistanceSegment, DurationSegment, LoadSegment};

/// One vehicle's mutable visit sequence during a search pass.
///
/// Slot `0` holds the starting depot and slot `size() + 1` holds the
/// returning depot (the same depot, by invariant); clients occupy
/// `[1, size()]`. After any mutation the cached `before`/`after` segment
/// arrays are stale until [`SearchRoute::update`] is called.
pub struct SearchRoute<'a> {
    data: &'a ProblemData,
    vehicle_type: usize,
    depot: usize,
    locations: Vec<usize>,
    prefix_distance: Vec<DistanceSegment>,
    prefix_duration: Vec<DurationSegment>,
    prefix_load: Vec<LoadSegment>,
    suffix_distance: Vec<DistanceSegment>,
    suffix_duration: Vec<DurationSegment>,
    suffix_load: Vec<LoadSegment>,
    dirty: bool,
}

impl<'a> SearchRoute<'a> {
    /// Creates a search route for `vehicle_type` visiting `visits` in order.
    pub fn new(data: &'a ProblemData, vehicle_type: usize, visits: Vec<usize>) -> Self {
        let depot = data.vehicle_types()[vehicle_type].depot_index();
        let locations: Vec<usize> = std::iter::once(depot)
            .chain(visits)
            .chain(std::iter::once(depot))
            .collect();
        let mut route = Self {
            data,
            vehicle_type,
            depot,
            locations,
            prefix_distance: Vec::new(),
            prefix_duration: Vec::new(),
            prefix_load: Vec::new(),
            suffix_distance: Vec::new(),
            suffix_duration: Vec::new(),
            suffix_load: Vec::new(),
            dirty: true,
        };
        route.update();
        route
    }

    fn single_duration(&self, loc: usize) -> DurationSegment {
        let location = self.data.location(loc).expect("valid location");
        DurationSegment::single(
            loc,
            location.service_duration(),
            location.tw_early(),
            location.tw_late(),
            location.release_time(),
        )
    }

    fn single_load(&self, loc: usize) -> LoadSegment {
        let location = self.data.location(loc).expect("valid location");
        LoadSegment::single(location.delivery(), location.pickup())
    }

    /// Inserts `location` at slot `pos`, shifting everything from `pos`
    /// onward one slot right. `pos` must be in `[1, size() + 1]`.
    pub fn insert(&mut self, pos: usize, location: usize) {
        self.locations.insert(pos, location);
        self.dirty = true;
    }

    /// Removes the visit at slot `pos`. `pos` must be in `[1, size()]`.
    pub fn remove(&mut self, pos: usize) -> usize {
        self.dirty = true;
        self.locations.remove(pos)
    }

    /// Swaps the visits at slots `a` and `b`.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.locations.swap(a, b);
        self.dirty = true;
    }

    /// Replaces the client sequence wholesale, keeping the same depot at
    /// both ends. Used by operators that compute a new sequence directly
    /// (`Exchange`, `TwoOpt`, …) rather than splicing slot by slot.
    pub fn set_visits(&mut self, visits: Vec<usize>) {
        self.locations = std::iter::once(self.depot)
            .chain(visits)
            .chain(std::iter::once(self.depot))
            .collect();
        self.dirty = true;
    }

    /// Recomputes the prefix/suffix caches. Must be called before any
    /// segment query following a mutation.
    pub fn update(&mut self) {
        if !self.dirty {
            return;
        }
        let n = self.locations.len();
        self.prefix_distance = Vec::with_capacity(n);
        self.prefix_duration = Vec::with_capacity(n);
        self.prefix_load = Vec::with_capacity(n);
        self.suffix_distance = Vec::with_capacity(n);
        self.suffix_duration = Vec::with_capacity(n);
        self.suffix_load = Vec::with_capacity(n);

        for (i, &loc) in self.locations.iter().enumerate() {
            let d = DistanceSegment::single(loc);
            let t = self.single_duration(loc);
            let l = self.single_load(loc);
            if i == 0 {
                self.prefix_distance.push(d);
                self.prefix_duration.push(t);
                self.prefix_load.push(l);
            } else {
                self.prefix_distance.push(DistanceSegment::merge(
                    &self.prefix_distance[i - 1],
                    &d,
                    self.data.distances(),
                ));
                self.prefix_duration.push(DurationSegment::merge(
                    &self.prefix_duration[i - 1],
                    &t,
                    self.data.durations(),
                ));
                self.prefix_load
                    .push(LoadSegment::merge(&self.prefix_load[i - 1], &l));
            }
        }

        for (k, &loc) in self.locations.iter().enumerate().rev() {
            let d = DistanceSegment::single(loc);
            let t = self.single_duration(loc);
            let l = self.single_load(loc);
            if k == n - 1 {
                self.suffix_distance.push(d);
                self.suffix_duration.push(t);
                self.suffix_load.push(l);
            } else {
                let prev = self.suffix_distance.last().unwrap();
                self.suffix_distance
                    .push(DistanceSegment::merge(&d, prev, self.data.distances()));
                let prev = self.suffix_duration.last().unwrap();
                self.suffix_duration
                    .push(DurationSegment::merge(&t, prev, self.data.durations()));
                let prev = self.suffix_load.last().unwrap();
                self.suffix_load.push(LoadSegment::merge(&l, prev));
            }
        }
        self.suffix_distance.reverse();
        self.suffix_duration.reverse();
        self.suffix_load.reverse();

        self.dirty = false;
    }

    /// Segment summarizing the prefix `[0, i]`.
    pub fn before(&self, i: usize) -> (DistanceSegment, DurationSegment, LoadSegment) {
        (
            self.prefix_distance[i],
            self.prefix_duration[i],
            self.prefix_load[i],
        )
    }

    /// Segment summarizing the suffix `[i, end]`.
    pub fn after(&self, i: usize) -> (DistanceSegment, DurationSegment, LoadSegment) {
        (
            self.suffix_distance[i],
            self.suffix_duration[i],
            self.suffix_load[i],
        )
    }

    /// Segment summarizing the inclusive sub-chain `[i, j]`, synthesized
    /// on demand by folding the single-location segments between them.
    pub fn between(&self, i: usize, j: usize) -> (DistanceSegment, DurationSegment, LoadSegment) {
        assert!(i <= j, "between requires i <= j");
        let mut d = DistanceSegment::single(self.locations[i]);
        let mut t = self.single_duration(self.locations[i]);
        let mut l = self.single_load(self.locations[i]);
        for &loc in &self.locations[i + 1..=j] {
            d = DistanceSegment::merge(&d, &DistanceSegment::single(loc), self.data.distances());
            t = DurationSegment::merge(&t, &self.single_duration(loc), self.data.durations());
            l = LoadSegment::merge(&l, &self.single_load(loc));
        }
        (d, t, l)
    }

    pub fn distance(&self) -> f64 {
        self.prefix_distance.last().map_or(0.0, |s| s.distance())
    }

    pub fn duration(&self) -> f64 {
        self.prefix_duration.last().map_or(0.0, |s| s.duration())
    }

    pub fn load(&self) -> f64 {
        self.prefix_load.last().map_or(0.0, |s| s.load())
    }

    pub fn time_warp(&self) -> f64 {
        self.time_warp_with_duration_limit(self.max_duration())
    }

    pub fn time_warp_with_duration_limit(&self, max_duration: f64) -> f64 {
        self.prefix_duration
            .last()
            .map_or(0.0, |s| s.time_warp_with_duration_limit(max_duration))
    }

    pub fn excess_load(&self) -> f64 {
        (self.load() - self.capacity()).max(0.0)
    }

    pub fn capacity(&self) -> f64 {
        self.data.vehicle_types()[self.vehicle_type].capacity()
    }

    pub fn fixed_vehicle_cost(&self) -> f64 {
        self.data.vehicle_types()[self.vehicle_type].fixed_cost()
    }

    pub fn max_duration(&self) -> f64 {
        self.data.vehicle_types()[self.vehicle_type].max_duration()
    }

    pub fn vehicle_type(&self) -> usize {
        self.vehicle_type
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    /// Number of client visits (excludes both depot slots).
    pub fn size(&self) -> usize {
        self.locations.len() - 2
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn location_at(&self, pos: usize) -> usize {
        self.locations[pos]
    }

    pub fn locations(&self) -> &[usize] {
        &self.locations
    }

    /// Client visits only, excluding the start/end depot slots.
    pub fn visits(&self) -> &[usize] {
        &self.locations[1..self.locations.len() - 1]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Client, Depot, VehicleType};
    use crate::matrix::Matrix;

    fn data() -> ProblemData {
        let depots = vec![Depot::new(0.0, 0.0)];
        let clients = vec![
            Client::new(1.0, 0.0, 3.0, 0.0, 0.0).unwrap(),
            Client::new(2.0, 0.0, 4.0, 0.0, 0.0).unwrap(),
            Client::new(3.0, 0.0, 1.0, 0.0, 0.0).unwrap(),
        ];
        let n = 4;
        let coords = [0.0f64, 1.0, 2.0, 3.0];
        let mut grid = vec![0.0f64; n * n];
        for i in 0..n {
            for j in 0..n {
                grid[i * n + j] = (coords[i] - coords[j]).abs();
            }
        }
        let distances = Matrix::from_data(n, grid.clone()).unwrap();
        let durations = Matrix::from_data(n, grid).unwrap();
        let vts = vec![VehicleType::new(1, 10.0, 0)];
        ProblemData::new(depots, clients, distances, durations, vts).unwrap()
    }

    #[test]
    fn before_and_after_recombine_to_full_route_summary() {
        let data = data();
        let route = SearchRoute::new(&data, 0, vec![1, 2, 3]);
        for i in 0..route.locations().len() - 1 {
            let (bd, _, _) = route.before(i);
            let (ad, _, _) = route.after(i + 1);
            let whole = DistanceSegment::merge(&bd, &ad, data.distances());
            assert!((whole.distance() - route.distance()).abs() < 1e-9);
        }
    }

    #[test]
    fn insert_then_update_changes_distance() {
        let data = data();
        let mut route = SearchRoute::new(&data, 0, vec![1, 3]);
        let before = route.distance();
        // Insert client 2 at the front: detours via 1 and 3 instead of
        // passing through them in coordinate order, so distance must change.
        route.insert(1, 2);
        assert!(route.is_dirty());
        route.update();
        assert!(!route.is_dirty());
        assert_ne!(route.distance(), before);
        assert_eq!(route.size(), 3);
    }

    #[test]
    fn remove_shrinks_route_and_updates_load() {
        let data = data();
        let mut route = SearchRoute::new(&data, 0, vec![1, 2, 3]);
        route.remove(1);
        route.update();
        assert_eq!(route.size(), 2);
        assert!((route.load() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn between_matches_direct_merge_of_before_after_slices() {
        let data = data();
        let route = SearchRoute::new(&data, 0, vec![1, 2, 3]);
        let (bd, _, _) = route.before(1);
        let (between_d, _, _) = route.between(2, 3);
        let combined = DistanceSegment::merge(&bd, &between_d, data.distances());
        let (full, _, _) = route.before(3);
        assert!((combined.distance() - full.distance()).abs() < 1e-9);
    }

    #[test]
    fn empty_route_has_zero_size_but_valid_depot_to_depot_distance() {
        let data = data();
        let route = SearchRoute::new(&data, 0, vec![]);
        assert!(route.is_empty());
        assert_eq!(route.distance(), 0.0);
    }
}
