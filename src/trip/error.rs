//! Error taxonomy for dispatch operations.

use thiserror::Error;

use crate::source::SourceError;
use crate::store::StoreError;

/// Failure of a dispatch operation.
///
/// Every variant carries a stable machine-readable code (see
/// [`DispatchError::code`]); callers branch on the code, never on the
/// shape of a returned trip. A completed trip is reported as
/// [`DispatchError::TripAlreadyCompleted`] rather than by any sentinel
/// field on the trip itself.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DispatchError {
    #[error("driver not found: {0}")]
    DriverNotFound(String),

    #[error("truck not found: {0}")]
    TruckNotFound(String),

    #[error("trip not found: {0}")]
    TripNotFound(String),

    #[error("trip is already completed: {0}")]
    TripAlreadyCompleted(String),

    #[error("route fetch failed: {0}")]
    RouteFetchFailed(#[source] SourceError),

    #[error("traffic advisory fetch failed: {0}")]
    TrafficFetchFailed(#[source] SourceError),

    #[error("intersection fetch failed: {0}")]
    IntersectionFetchFailed(#[source] SourceError),

    #[error("parking source unavailable: {0}")]
    ParkingFetchFailed(#[source] SourceError),

    #[error("no parking slots available at the airport")]
    NoParkingSlots,

    #[error("failed to reserve parking slot {0}")]
    SlotReservationFailed(String),

    #[error("held parking slot {0} is no longer available")]
    ParkingSlotUnavailable(String),

    #[error("persistence failed: {0}")]
    Persistence(#[from] StoreError),

    #[error("assignment not found: {0}")]
    AssignmentNotFound(String),

    #[error("flight info unavailable: {0}")]
    FlightInfoUnavailable(#[source] SourceError),

    #[error("dock reservation failed: {0}")]
    DockReservationFailed(#[source] SourceError),
}

impl DispatchError {
    /// Stable machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            DispatchError::DriverNotFound(_) => "DRIVER_NOT_FOUND",
            DispatchError::TruckNotFound(_) => "TRUCK_NOT_FOUND",
            DispatchError::TripNotFound(_) => "TRIP_NOT_FOUND",
            DispatchError::TripAlreadyCompleted(_) => "TRIP_ALREADY_COMPLETED",
            DispatchError::RouteFetchFailed(_) => "ROUTE_FETCH_FAILED",
            DispatchError::TrafficFetchFailed(_) => "TRAFFIC_FETCH_FAILED",
            DispatchError::IntersectionFetchFailed(_) => "OSM_FETCH_FAILED",
            DispatchError::ParkingFetchFailed(_) => "PARKING_FETCH_FAILED",
            DispatchError::NoParkingSlots => "NO_PARKING_SLOTS",
            DispatchError::SlotReservationFailed(_) => "SLOT_RESERVATION_FAILED",
            DispatchError::ParkingSlotUnavailable(_) => "PARKING_SLOT_UNAVAILABLE",
            DispatchError::Persistence(_) => "DB_SAVE_FAILED",
            DispatchError::AssignmentNotFound(_) => "ASSIGNMENT_NOT_FOUND",
            DispatchError::FlightInfoUnavailable(_) => "FLIGHT_INFO_FAILED",
            DispatchError::DockReservationFailed(_) => "DOCK_RESERVATION_FAILED",
        }
    }
}
