//! Settings for the dispatch core.
//!
//! Pure data types with no parsing or serialization logic; the transport
//! layer that would load these from a file or environment is out of scope,
//! so configuration is constructed programmatically.

use chrono::{NaiveTime, TimeDelta};
use chrono_tz::Tz;

use crate::model::Location;

/// Default destination airport for trips (DFW cargo apron).
pub const DEFAULT_AIRPORT_LAT: f64 = 32.8998;
pub const DEFAULT_AIRPORT_LON: f64 = -97.0403;

/// Default number of intersections fetched per route.
pub const DEFAULT_INTERSECTION_COUNT: usize = 10;

/// Default number of intersections served per batch.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Complete configuration for the dispatch core.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Destination airport for all trips and departure legs.
    pub airport: Location,
    /// Civil timezone for all wall-clock arithmetic (day rollover,
    /// daily schedules, ETA computation).
    pub zone: Tz,
    /// Number of intersections fetched when a route is (re)computed.
    pub intersection_count: usize,
    /// Number of intersections dispensed per batch draw.
    pub batch_size: usize,
    /// ETA penalty applied when an advisory reports a delay without a
    /// route change.
    pub delay_penalty: TimeDelta,
    /// Loading time reserved at the pickup location before departing
    /// toward the airport.
    pub pickup_buffer: TimeDelta,
    /// Local time of the daily assignment refresh.
    pub refresh_at: NaiveTime,
    /// Local time of the daily assignment cache clear.
    pub clear_at: NaiveTime,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            airport: Location::new(DEFAULT_AIRPORT_LAT, DEFAULT_AIRPORT_LON),
            zone: chrono_tz::America::Chicago,
            intersection_count: DEFAULT_INTERSECTION_COUNT,
            batch_size: DEFAULT_BATCH_SIZE,
            delay_penalty: TimeDelta::minutes(5),
            pickup_buffer: TimeDelta::hours(1),
            refresh_at: NaiveTime::from_hms_opt(4, 5, 0).expect("valid literal time"),
            clear_at: NaiveTime::from_hms_opt(23, 59, 0).expect("valid literal time"),
        }
    }
}

impl DispatchConfig {
    /// Sets a custom batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Sets a custom intersection count.
    pub fn with_intersection_count(mut self, count: usize) -> Self {
        self.intersection_count = count.max(1);
        self
    }

    /// Sets a custom destination airport.
    pub fn with_airport(mut self, airport: Location) -> Self {
        self.airport = airport;
        self
    }
}
