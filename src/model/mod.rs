//! Domain types for the dispatch core.

mod assignment;
mod trip;

pub use assignment::{Assignment, FlightInfo, Manifest, TimeDetails};
pub use trip::{Trip, TripReceipt};

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic point (decimal degrees).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// A driver from the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: String,
    pub name: String,
    pub license_number: String,
    pub phone_number: String,
}

/// A truck from the fleet catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    pub truck_id: String,
    pub license_plate: String,
    pub model: String,
    pub capacity: String,
}

/// An airport parking slot.
///
/// Reservation is exclusive: at most one trip holds a given slot id at a
/// time. The `reserved` flag reflects the state at the instant the slot
/// was read from the parking source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingSlot {
    pub slot_id: String,
    pub gate_id: String,
    pub reserved: bool,
}

impl ParkingSlot {
    pub fn new(slot_id: impl Into<String>, gate_id: impl Into<String>) -> Self {
        Self {
            slot_id: slot_id.into(),
            gate_id: gate_id.into(),
            reserved: false,
        }
    }
}

/// A computed route between two points.
///
/// Durations are whole seconds; the routing source is expected to account
/// for time-dependent traffic when a departure hint is supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub duration_seconds: u32,
    pub distance_meters: f64,
    pub encoded_path: String,
}

/// Severity of a traffic advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
        }
    }
}

/// A traffic-condition message for a location.
///
/// `route_changed` signals that the current route is no longer viable and
/// must be recomputed. `relevant_location` optionally points at the
/// triggering event (accident, closure).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub message: String,
    pub severity: Severity,
    pub route_changed: bool,
    pub relevant_location: Option<Location>,
}

impl Advisory {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
            route_changed: false,
            relevant_location: None,
        }
    }

    /// Whether the advisory text denotes a delay condition.
    pub fn denotes_delay(&self) -> bool {
        self.message.contains("delay")
    }
}

/// A point along a route where the road crosses another.
///
/// Sequence numbers are 1-based in route order. The advisory is populated
/// lazily as the intersection is dequeued for a driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intersection {
    pub sequence_number: u32,
    pub location: Location,
    pub advisory: Option<Advisory>,
}

impl Intersection {
    pub fn new(sequence_number: u32, location: Location) -> Self {
        Self {
            sequence_number,
            location,
            advisory: None,
        }
    }
}

/// An airside parking reservation for a flight pickup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkingReservation {
    pub parking_id: String,
    pub location: Location,
}

/// A dock reservation at a flight terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DockReservation {
    pub dock_id: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_display_rounds_to_four_places() {
        let loc = Location::new(32.123456, -96.987654);
        assert_eq!(loc.to_string(), "(32.1235, -96.9877)");
    }

    #[test]
    fn advisory_detects_delay_wording() {
        let advisory = Advisory::info("Traffic congestion ahead; expect 5 min delay.");
        assert!(advisory.denotes_delay());

        let advisory = Advisory::info("Maintain ~50 km/h to pass next light while green.");
        assert!(!advisory.denotes_delay());
    }

    #[test]
    fn new_slot_starts_unreserved() {
        let slot = ParkingSlot::new("SLOT-A1", "GateA");
        assert!(!slot.reserved);
    }

    #[test]
    fn severity_display_matches_wire_values() {
        assert_eq!(Severity::Info.to_string(), "INFO");
        assert_eq!(Severity::Warning.to_string(), "WARNING");
    }
}
