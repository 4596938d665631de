//! Immutable route: the canonical, hash-equatable record of one vehicle's
//! visit sequence once a search pass has converged.

use crate::data::ProblemData;

/// One vehicle's visit sequence and its precomputed aggregates.
///
/// `visits` holds client location indices only — the depot the route starts
/// and ends at is implied by `vehicle_type`, not stored per-visit.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    vehicle_type: usize,
    visits: Vec<usize>,
    distance: f64,
    duration: f64,
    load: f64,
    time_warp: f64,
    prizes: f64,
    centroid: (f64, f64),
    start_time: f64,
    end_time: f64,
    slack: f64,
}

impl Route {
    /// Builds a route from an already-ordered client sequence, computing
    /// every aggregate from the problem data's segment algebras.
    ///
    /// `depot` is the location index of the depot this route starts and
    /// ends at (must match `data.vehicle_types()[vehicle_type].depot_index()`
    /// resolved to a location index, i.e. `depot_index` itself since depots
    /// occupy `[0, num_depots)`).
    #[allow(clippy::too_many_arguments)]
    pub fn new(data: &ProblemData, vehicle_type: usize, visits: Vec<usize>) -> Self {
        use crate::segments::{DistanceSegment, DurationSegment, LoadSegment};

        let vt = &data.vehicle_types()[vehicle_type];
        let depot = vt.depot_index();
        let chain: Vec<usize> = std::iter::once(depot)
            .chain(visits.iter().copied())
            .chain(std::iter::once(depot))
            .collect();

        let mut dist_seg = DistanceSegment::single(chain[0]);
        let mut dur_seg = DurationSegment::single(chain[0], 0.0, vt.tw_early(), vt.tw_late(), 0.0);
        let mut load_seg = LoadSegment::single(0.0, 0.0);
        let mut prizes = 0.0;
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;

        for &loc in &chain[1..] {
            let location = data.location(loc).expect("route visits a valid location");
            dist_seg =
                DistanceSegment::merge(&dist_seg, &DistanceSegment::single(loc), data.distances());
            dur_seg = DurationSegment::merge(
                &dur_seg,
                &DurationSegment::single(
                    loc,
                    location.service_duration(),
                    location.tw_early(),
                    location.tw_late(),
                    location.release_time(),
                ),
                data.durations(),
            );
            load_seg = LoadSegment::merge(
                &load_seg,
                &LoadSegment::single(location.delivery(), location.pickup()),
            );
            if !location.is_depot() {
                prizes += location.prize();
                sum_x += location.x();
                sum_y += location.y();
            }
        }

        let n = visits.len().max(1) as f64;
        let centroid = if visits.is_empty() {
            (
                data.location(depot).unwrap().x(),
                data.location(depot).unwrap().y(),
            )
        } else {
            (sum_x / n, sum_y / n)
        };

        let time_warp = dur_seg.time_warp_with_duration_limit(vt.max_duration());
        let start_time = dur_seg.tw_early();
        let end_time = start_time + dur_seg.duration();
        let slack = dur_seg.tw_late() - dur_seg.tw_early();

        Self {
            vehicle_type,
            visits,
            distance: dist_seg.distance(),
            duration: dur_seg.duration(),
            load: load_seg.load(),
            time_warp,
            prizes,
            centroid,
            start_time,
            end_time,
            slack,
        }
    }

    pub fn vehicle_type(&self) -> usize {
        self.vehicle_type
    }

    pub fn visits(&self) -> &[usize] {
        &self.visits
    }

    pub fn size(&self) -> usize {
        self.visits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn load(&self) -> f64 {
        self.load
    }

    pub fn time_warp(&self) -> f64 {
        self.time_warp
    }

    pub fn excess_load(&self, capacity: f64) -> f64 {
        (self.load - capacity).max(0.0)
    }

    pub fn prizes(&self) -> f64 {
        self.prizes
    }

    pub fn centroid(&self) -> (f64, f64) {
        self.centroid
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn slack(&self) -> f64 {
        self.slack
    }
}
