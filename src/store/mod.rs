//! Persistence seams for entity records.
//!
//! The core only needs lookup-by-id and save/delete; the real durable
//! store (and its optimistic locking for concurrent trip writers) is an
//! external collaborator. In-memory implementations back tests and demos.

mod memory;

pub use memory::{InMemoryCatalog, InMemoryTripStore};

use thiserror::Error;

use crate::model::{Driver, Trip, Truck};

/// Errors raised by a durable store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A write or delete was rejected.
    #[error("store write failed: {0}")]
    WriteFailed(String),
}

/// Lookup of driver records.
pub trait DriverStore: Send + Sync {
    fn find(&self, driver_id: &str) -> Result<Option<Driver>, StoreError>;
}

/// Lookup of truck records.
pub trait TruckStore: Send + Sync {
    fn find(&self, truck_id: &str) -> Result<Option<Truck>, StoreError>;
}

/// Durable trip records.
///
/// Implementations must not persist the trip's ephemeral fields (route,
/// latest advisory, upcoming batch): a save followed by a find returns
/// them empty.
pub trait TripStore: Send + Sync {
    fn find(&self, trip_id: &str) -> Result<Option<Trip>, StoreError>;

    fn save(&self, trip: &Trip) -> Result<(), StoreError>;

    fn delete(&self, trip_id: &str) -> Result<(), StoreError>;
}
