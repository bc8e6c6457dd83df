//! Routing source abstraction.

use chrono::NaiveDateTime;

use super::SourceError;
use crate::model::{Location, Route};

/// Trait for route computation between two points.
///
/// Implementors return a traffic-aware travel duration in whole seconds,
/// the distance in meters, and an encoded path polyline.
pub trait RoutingSource: Send + Sync {
    /// Computes a route from `origin` to `destination` under current
    /// traffic conditions.
    fn compute_route(&self, origin: Location, destination: Location) -> Result<Route, SourceError>;

    /// Computes a route assuming departure around `depart_at`.
    ///
    /// The departure solver passes the target arrival instant here as a
    /// proxy for departure-time traffic conditions. Implementations
    /// without time-dependent data may ignore the hint.
    fn compute_route_at(
        &self,
        origin: Location,
        destination: Location,
        _depart_at: NaiveDateTime,
    ) -> Result<Route, SourceError> {
        self.compute_route(origin, destination)
    }
}

/// Mean radius of the Earth in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points in meters.
fn haversine_m(a: Location, b: Location) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Simulated routing source.
///
/// Derives the travel duration from great-circle distance at a fixed
/// cruise speed, making routes deterministic for a given origin and
/// destination.
#[derive(Debug, Clone)]
pub struct SimRoutingSource {
    /// Assumed cruise speed in meters per second.
    speed_mps: f64,
}

/// Default cruise speed (60 km/h).
const DEFAULT_SPEED_MPS: f64 = 60_000.0 / 3600.0;

impl SimRoutingSource {
    pub fn new() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
        }
    }

    /// Sets a custom cruise speed in meters per second.
    pub fn with_speed_mps(mut self, speed_mps: f64) -> Self {
        self.speed_mps = speed_mps.max(1.0);
        self
    }
}

impl Default for SimRoutingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutingSource for SimRoutingSource {
    fn compute_route(&self, origin: Location, destination: Location) -> Result<Route, SourceError> {
        let distance_meters = haversine_m(origin, destination);
        let duration_seconds = (distance_meters / self.speed_mps).ceil() as u32;
        Ok(Route {
            duration_seconds,
            distance_meters,
            encoded_path: format!("sim:{}->{}", origin, destination),
        })
    }
}
