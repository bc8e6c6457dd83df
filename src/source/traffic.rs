//! Traffic advisory source abstraction.

use rand::Rng;
use tracing::info;

use super::SourceError;
use crate::model::{Advisory, Location, Severity};

/// Trait for live traffic advisories.
pub trait TrafficSource: Send + Sync {
    /// Returns the current advisory for a location.
    fn advisory(&self, location: Location) -> Result<Advisory, SourceError>;

    /// Reports a truck's position upstream. Best-effort: implementations
    /// log failures and never surface them to the caller.
    fn notify_location(&self, location: Location, driver_id: &str);
}

/// Simulated traffic advisory source.
///
/// Serves a rotating set of canned advisories. When the selected advisory
/// signals a route change, a relevant location is synthesized slightly
/// ahead of the reported position.
pub struct SimTrafficSource {
    options: Vec<Advisory>,
}

impl SimTrafficSource {
    pub fn new() -> Self {
        let options = vec![
            Advisory {
                message: "Maintain ~50 km/h to pass next light while green.".into(),
                severity: Severity::Info,
                route_changed: false,
                relevant_location: None,
            },
            Advisory {
                message: "Traffic congestion ahead; expect 5 min delay.".into(),
                severity: Severity::Info,
                route_changed: false,
                relevant_location: None,
            },
            Advisory {
                message: "Optimal speed is 60 km/h for current road conditions.".into(),
                severity: Severity::Info,
                route_changed: false,
                relevant_location: None,
            },
            Advisory {
                message: "Road closure reported ahead, change route immediately.".into(),
                severity: Severity::Warning,
                route_changed: true,
                relevant_location: None,
            },
            Advisory {
                message: "Accident reported at next intersection, consider alternate route.".into(),
                severity: Severity::Warning,
                route_changed: true,
                relevant_location: None,
            },
            Advisory {
                message: "Expect a brief stop at traffic light, maintain 40 km/h.".into(),
                severity: Severity::Info,
                route_changed: false,
                relevant_location: None,
            },
        ];
        Self { options }
    }
}

impl Default for SimTrafficSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TrafficSource for SimTrafficSource {
    fn advisory(&self, location: Location) -> Result<Advisory, SourceError> {
        let mut rng = rand::rng();
        let selected = &self.options[rng.random_range(0..self.options.len())];

        if selected.route_changed {
            // Place the triggering event a couple of kilometers ahead.
            let offset_lat = location.latitude + 0.02 + rng.random::<f64>() * 0.01;
            let offset_lon = location.longitude - 0.02 - rng.random::<f64>() * 0.01;
            Ok(Advisory {
                relevant_location: Some(Location::new(offset_lat, offset_lon)),
                ..selected.clone()
            })
        } else {
            Ok(selected.clone())
        }
    }

    fn notify_location(&self, location: Location, driver_id: &str) {
        info!(%location, driver_id, "location update received");
    }
}
