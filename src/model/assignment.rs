//! Dispatch assignment and flight-pickup DTOs.
//!
//! Field names mirror the transportation wire format (snake_case) since
//! these cross the HTTP boundary handled by the excluded transport layer.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{DockReservation, Location, ParkingReservation};

/// One manifest entry from the transportation backend, not yet assigned
/// to a truck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub company_name: String,
    pub dispatcher_name: String,
    pub location: Location,
    pub task_type: String,
    pub flight_number: String,
    pub pickup_time: String,
    pub priority: String,
}

/// One unit of dispatch work: a manifest matched to a truck.
///
/// The `id` is generated at cache-insertion time and is stable for the
/// day, not across refresh cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(default)]
    pub id: String,
    pub company_name: String,
    pub dispatcher_name: String,
    pub location: Location,
    pub task_type: String,
    pub flight_number: String,
    pub pickup_time: String,
    pub priority: String,
    pub trucker_name: String,
    pub truck_id: String,
}

/// Arrival details for a flight, as reported by the transportation
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightInfo {
    pub flight_number: String,
    pub arrival_time: NaiveTime,
    pub terminal: String,
}

/// Computed flight-pickup schedule: four chained instants plus the
/// airside resources reserved for the pickup.
///
/// Produced on demand; cached only best-effort, keyed by assignment id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeDetails {
    pub assignment_id: String,
    pub flight_number: String,
    pub flight_terminal: String,
    /// Target arrival at the airport (the flight's next occurrence).
    pub target_arrival: NaiveDateTime,
    /// Latest safe departure from the pickup location.
    pub pickup_departure: NaiveDateTime,
    /// Required arrival at the pickup location (departure minus loading
    /// buffer).
    pub pickup_arrival: NaiveDateTime,
    /// Latest safe departure from the truck's current location.
    pub current_departure: NaiveDateTime,
    pub parking: ParkingReservation,
    pub dock: DockReservation,
}
