//! Road intersection source abstraction.

use rand::Rng;

use super::SourceError;
use crate::model::{Intersection, Location, Route};

/// Trait for enumerating road intersections along a route.
pub trait IntersectionSource: Send + Sync {
    /// Returns `count` intersections between `start` and `end`, ordered
    /// by 1-based sequence number.
    fn intersections(
        &self,
        route: &Route,
        start: Location,
        end: Location,
        count: usize,
    ) -> Result<Vec<Intersection>, SourceError>;
}

/// Simulated intersection source.
///
/// Interpolates `count` points between the endpoints with a small random
/// offset, standing in for an OSM-backed lookup along the actual path.
pub struct SimIntersectionSource;

impl SimIntersectionSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimIntersectionSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionSource for SimIntersectionSource {
    fn intersections(
        &self,
        _route: &Route,
        start: Location,
        end: Location,
        count: usize,
    ) -> Result<Vec<Intersection>, SourceError> {
        let mut rng = rand::rng();
        let lat_step = (end.latitude - start.latitude) / (count as f64 + 1.0);
        let lon_step = (end.longitude - start.longitude) / (count as f64 + 1.0);

        let intersections = (1..=count)
            .map(|i| {
                let lat = start.latitude + lat_step * i as f64 + rng.random::<f64>() * 0.005;
                let lon = start.longitude + lon_step * i as f64 + rng.random::<f64>() * 0.005;
                Intersection::new(i as u32, Location::new(lat, lon))
            })
            .collect();
        Ok(intersections)
    }
}
