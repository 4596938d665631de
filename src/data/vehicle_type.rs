//! Vehicle types: a class of interchangeable vehicles sharing capacity,
//! depot, shift window, and cost parameters.

/// A class of vehicles available to serve routes.
///
/// # Examples
///
/// ```
/// use vrp_core::data::VehicleType;
///
/// let vt = VehicleType::new(4, 15.0, 0).with_fixed_cost(10.0);
/// assert_eq!(vt.num_available(), 4);
/// assert_eq!(vt.capacity(), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleType {
    num_available: usize,
    capacity: f64,
    depot_index: usize,
    fixed_cost: f64,
    tw_early: f64,
    tw_late: f64,
    max_duration: f64,
    name: String,
}

impl VehicleType {
    /// Creates a vehicle type with `num_available` vehicles of the given
    /// capacity, based at `depot_index`. No fixed cost, an unrestricted
    /// shift window, and no duration limit by default.
    pub fn new(num_available: usize, capacity: f64, depot_index: usize) -> Self {
        Self {
            num_available,
            capacity,
            depot_index,
            fixed_cost: 0.0,
            tw_early: 0.0,
            tw_late: f64::INFINITY,
            max_duration: f64::INFINITY,
            name: String::new(),
        }
    }

    pub fn with_fixed_cost(mut self, fixed_cost: f64) -> Self {
        self.fixed_cost = fixed_cost;
        self
    }

    pub fn with_shift_window(mut self, tw_early: f64, tw_late: f64) -> Self {
        self.tw_early = tw_early;
        self.tw_late = tw_late;
        self
    }

    pub fn with_max_duration(mut self, max_duration: f64) -> Self {
        self.max_duration = max_duration;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn num_available(&self) -> usize {
        self.num_available
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    pub fn depot_index(&self) -> usize {
        self.depot_index
    }

    pub fn fixed_cost(&self) -> f64 {
        self.fixed_cost
    }

    pub fn tw_early(&self) -> f64 {
        self.tw_early
    }

    pub fn tw_late(&self) -> f64 {
        self.tw_late
    }

    pub fn max_duration(&self) -> f64 {
        self.max_duration
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
