//! Concatenable duration segment algebra — the Vidal (2014) representation
//! of a partial route's time-feasibility projection.
//!
//! # Reference
//!
//! Vidal, T. (2014). "A unified solution framework for multi-attribute
//! vehicle routing problems", European Journal of Operational Research.
//!
//! With the `time_windows` Cargo feature disabled, this type degenerates to
//! a bare travel-duration accumulator — no time-warp or window fields exist
//! at all, so the whole time-window code path compiles out rather than
//! merely evaluating to zero at runtime.

use crate::matrix::Matrix;

/// A partial route's schedule summary between `idx_first` and `idx_last`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSegment {
    idx_first: usize,
    idx_last: usize,
    duration: f64,
    #[cfg(feature = "time_windows")]
    time_warp: f64,
    #[cfg(feature = "time_windows")]
    tw_early: f64,
    #[cfg(feature = "time_windows")]
    tw_late: f64,
    #[cfg(feature = "time_windows")]
    release_time: f64,
}

#[cfg(feature = "time_windows")]
impl DurationSegment {
    /// A single-location segment.
    ///
    /// `service_duration` is the time spent at the location; `tw_early`/
    /// `tw_late` bound the feasible departure time; `release_time` is the
    /// earliest the location may be visited at all (e.g. pickup availability).
    pub fn single(
        location: usize,
        service_duration: f64,
        tw_early: f64,
        tw_late: f64,
        release_time: f64,
    ) -> Self {
        Self {
            idx_first: location,
            idx_last: location,
            duration: service_duration,
            time_warp: 0.0,
            tw_early,
            tw_late,
            release_time,
        }
    }

    pub fn idx_first(&self) -> usize {
        self.idx_first
    }

    pub fn idx_last(&self) -> usize {
        self.idx_last
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn time_warp(&self) -> f64 {
        self.time_warp
    }

    pub fn tw_early(&self) -> f64 {
        self.tw_early
    }

    pub fn tw_late(&self) -> f64 {
        self.tw_late
    }

    pub fn release_time(&self) -> f64 {
        self.release_time
    }

    /// Total infeasibility given the vehicle's `max_duration`: the
    /// segment's own time-warp plus duration overrun plus release-time
    /// lateness. `max_duration` is read here only — `merge` never consumes
    /// it, so the schedule algebra is independent of any one vehicle type.
    pub fn time_warp_with_duration_limit(&self, max_duration: f64) -> f64 {
        self.time_warp
            + (self.duration - max_duration).max(0.0)
            + (self.release_time - self.tw_late).max(0.0)
    }

    /// Concatenates `a` then `b`, connected by `durations[a.idx_last, b.idx_first]`.
    pub fn merge(a: &Self, b: &Self, durations: &Matrix) -> Self {
        let t = durations.get(a.idx_last, b.idx_first);
        let diff = a.duration - a.time_warp + t;

        let time_warp = a.time_warp + b.time_warp + (a.tw_early + diff - b.tw_late).max(0.0);
        let tw_early =
            (b.tw_early - diff).max(a.tw_early) - (a.tw_early + diff - b.tw_late).max(0.0);
        let tw_late = (b.tw_late - diff).min(a.tw_late) + (b.tw_early - diff - a.tw_late).max(0.0);
        let duration = a.duration + b.duration + t + (b.tw_early - diff - a.tw_late).max(0.0);
        let release_time = a.release_time.max(b.release_time);

        Self {
            idx_first: a.idx_first,
            idx_last: b.idx_last,
            duration,
            time_warp,
            tw_early,
            tw_late,
            release_time,
        }
    }

    /// Concatenates `a`, `b`, then `c`. Equivalent to `merge(merge(a, b), c)`.
    pub fn merge3(a: &Self, b: &Self, c: &Self, durations: &Matrix) -> Self {
        Self::merge(&Self::merge(a, b, durations), c, durations)
    }
}

#[cfg(not(feature = "time_windows"))]
impl DurationSegment {
    /// A single-location segment. Time-window parameters are accepted and
    /// ignored so call sites need not be feature-gated.
    pub fn single(
        location: usize,
        service_duration: f64,
        _tw_early: f64,
        _tw_late: f64,
        _release_time: f64,
    ) -> Self {
        Self {
            idx_first: location,
            idx_last: location,
            duration: service_duration,
        }
    }

    pub fn idx_first(&self) -> usize {
        self.idx_first
    }

    pub fn idx_last(&self) -> usize {
        self.idx_last
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn time_warp(&self) -> f64 {
        0.0
    }

    pub fn tw_early(&self) -> f64 {
        0.0
    }

    pub fn tw_late(&self) -> f64 {
        f64::INFINITY
    }

    pub fn release_time(&self) -> f64 {
        0.0
    }

    pub fn time_warp_with_duration_limit(&self, max_duration: f64) -> f64 {
        (self.duration - max_duration).max(0.0)
    }

    pub fn merge(a: &Self, b: &Self, durations: &Matrix) -> Self {
        let t = durations.get(a.idx_last, b.idx_first);
        Self {
            idx_first: a.idx_first,
            idx_last: b.idx_last,
            duration: a.duration + t + b.duration,
        }
    }

    pub fn merge3(a: &Self, b: &Self, c: &Self, durations: &Matrix) -> Self {
        Self::merge(&Self::merge(a, b, durations), c, durations)
    }
}
