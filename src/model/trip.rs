//! The trip aggregate.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{Advisory, Intersection, Location, ParkingSlot, Route};

/// A truck's trip toward the airport.
///
/// The route, latest advisory and upcoming-intersections batch are
/// ephemeral: they live only in the in-memory object, are never written to
/// durable storage, and come back empty on reload. A trip is either active
/// or completed; completion is terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    pub trip_id: String,
    pub driver_id: String,
    pub truck_id: String,
    pub current_location: Location,
    pub reserved_slot: Option<ParkingSlot>,
    pub start_time: NaiveDateTime,
    pub estimated_arrival: NaiveDateTime,
    pub active: bool,

    /// Current route (ephemeral).
    pub route: Option<Route>,
    /// Latest traffic advisory (ephemeral).
    pub latest_advisory: Option<Advisory>,
    /// Most recently drawn intersection batch (ephemeral).
    pub upcoming: Vec<Intersection>,
}

impl Trip {
    /// Returns a copy with the ephemeral fields cleared, suitable for
    /// durable storage.
    pub fn persisted(&self) -> Trip {
        Trip {
            route: None,
            latest_advisory: None,
            upcoming: Vec::new(),
            ..self.clone()
        }
    }
}

/// Minimal confirmation returned when a trip completes.
///
/// The full trip projection is not returned since the record is being
/// retired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripReceipt {
    pub trip_id: String,
    pub truck_id: String,
    pub completed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_trip() -> Trip {
        let start = NaiveDate::from_ymd_opt(2025, 4, 17)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        Trip {
            trip_id: "trip-1".into(),
            driver_id: "DRIVER001".into(),
            truck_id: "TRUCK001".into(),
            current_location: Location::new(32.90, -96.80),
            reserved_slot: Some(ParkingSlot::new("SLOT-A1", "GateA")),
            start_time: start,
            estimated_arrival: start + chrono::TimeDelta::minutes(45),
            active: true,
            route: Some(Route {
                duration_seconds: 2700,
                distance_meters: 30_000.0,
                encoded_path: "sim".into(),
            }),
            latest_advisory: Some(Advisory::info("clear")),
            upcoming: vec![Intersection::new(1, Location::new(32.91, -96.82))],
        }
    }

    #[test]
    fn persisted_strips_ephemeral_fields() {
        let trip = sample_trip();
        let stored = trip.persisted();

        assert!(stored.route.is_none());
        assert!(stored.latest_advisory.is_none());
        assert!(stored.upcoming.is_empty());
        // Durable fields survive
        assert_eq!(stored.trip_id, trip.trip_id);
        assert_eq!(stored.reserved_slot, trip.reserved_slot);
        assert_eq!(stored.estimated_arrival, trip.estimated_arrival);
        assert!(stored.active);
    }
}
