//! Client locations.

use crate::error::{Result, RoutingError};

/// A location to be visited: demand to deliver and/or pick up, an optional
/// time window, and (for prize-collecting variants) an optional prize for
/// visiting it.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    x: f64,
    y: f64,
    delivery: f64,
    pickup: f64,
    service_duration: f64,
    tw_early: f64,
    tw_late: f64,
    release_time: f64,
    prize: f64,
    required: bool,
    name: String,
}

impl Client {
    /// Creates a client with no time window restriction, required (must be
    /// visited) and with no prize.
    pub fn new(x: f64, y: f64, delivery: f64, pickup: f64, service_duration: f64) -> Result<Self> {
        Self::full(
            x,
            y,
            delivery,
            pickup,
            service_duration,
            0.0,
            f64::INFINITY,
            0.0,
            0.0,
            true,
            String::new(),
        )
    }

    /// Creates a client with every field explicit.
    #[allow(clippy::too_many_arguments)]
    pub fn full(
        x: f64,
        y: f64,
        delivery: f64,
        pickup: f64,
        service_duration: f64,
        tw_early: f64,
        tw_late: f64,
        release_time: f64,
        prize: f64,
        required: bool,
        name: String,
    ) -> Result<Self> {
        if tw_early > tw_late {
            return Err(RoutingError::InvalidTimeWindow {
                location: 0,
                early: tw_early,
                late: tw_late,
            });
        }
        if release_time > tw_late {
            return Err(RoutingError::InvalidTimeWindow {
                location: 0,
                early: release_time,
                late: tw_late,
            });
        }
        Ok(Self {
            x,
            y,
            delivery,
            pickup,
            service_duration,
            tw_early,
            tw_late,
            release_time,
            prize,
            required,
            name,
        })
    }

    pub fn with_time_window(mut self, tw_early: f64, tw_late: f64) -> Result<Self> {
        if tw_early > tw_late {
            return Err(RoutingError::InvalidTimeWindow {
                location: 0,
                early: tw_early,
                late: tw_late,
            });
        }
        self.tw_early = tw_early;
        self.tw_late = tw_late;
        Ok(self)
    }

    pub fn with_prize(mut self, prize: f64, required: bool) -> Self {
        self.prize = prize;
        self.required = required;
        self
    }

    pub fn with_release_time(mut self, release_time: f64) -> Result<Self> {
        if release_time > self.tw_late {
            return Err(RoutingError::InvalidTimeWindow {
                location: 0,
                early: release_time,
                late: self.tw_late,
            });
        }
        self.release_time = release_time;
        Ok(self)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn delivery(&self) -> f64 {
        self.delivery
    }

    pub fn pickup(&self) -> f64 {
        self.pickup
    }

    pub fn service_duration(&self) -> f64 {
        self.service_duration
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

    pub fn prize(&self) -> f64 {
        self.prize
    }

    pub fn required(&self) -> bool {
        self.required
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
