//! In-memory store implementations.

use dashmap::DashMap;
use std::collections::HashMap;

use super::{DriverStore, StoreError, TripStore, TruckStore};
use crate::model::{Driver, Trip, Truck};

/// In-memory driver and truck catalog, seeded with the demo fleet.
pub struct InMemoryCatalog {
    drivers: HashMap<String, Driver>,
    trucks: HashMap<String, Truck>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn empty() -> Self {
        Self {
            drivers: HashMap::new(),
            trucks: HashMap::new(),
        }
    }

    /// Creates a catalog seeded with two drivers and two trucks.
    pub fn seeded() -> Self {
        let mut catalog = Self::empty();
        catalog.add_driver(Driver {
            driver_id: "DRIVER001".into(),
            name: "Alice".into(),
            license_number: "LIC12345".into(),
            phone_number: "9999999999".into(),
        });
        catalog.add_driver(Driver {
            driver_id: "DRIVER002".into(),
            name: "Bob".into(),
            license_number: "LIC56789".into(),
            phone_number: "8888888888".into(),
        });
        catalog.add_truck(Truck {
            truck_id: "TRUCK001".into(),
            license_plate: "AB-123-CD".into(),
            model: "VolvoX".into(),
            capacity: "10T".into(),
        });
        catalog.add_truck(Truck {
            truck_id: "TRUCK002".into(),
            license_plate: "EF-456-GH".into(),
            model: "FordF".into(),
            capacity: "8T".into(),
        });
        catalog
    }

    pub fn add_driver(&mut self, driver: Driver) {
        self.drivers.insert(driver.driver_id.clone(), driver);
    }

    pub fn add_truck(&mut self, truck: Truck) {
        self.trucks.insert(truck.truck_id.clone(), truck);
    }
}

impl DriverStore for InMemoryCatalog {
    fn find(&self, driver_id: &str) -> Result<Option<Driver>, StoreError> {
        Ok(self.drivers.get(driver_id).cloned())
    }
}

impl TruckStore for InMemoryCatalog {
    fn find(&self, truck_id: &str) -> Result<Option<Truck>, StoreError> {
        Ok(self.trucks.get(truck_id).cloned())
    }
}

/// In-memory trip store.
///
/// Stores the persisted projection of each trip, so ephemeral fields are
/// dropped on save exactly as a durable store would drop transient
/// columns.
pub struct InMemoryTripStore {
    trips: DashMap<String, Trip>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self {
            trips: DashMap::new(),
        }
    }
}

impl Default for InMemoryTripStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TripStore for InMemoryTripStore {
    fn find(&self, trip_id: &str) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.get(trip_id).map(|t| t.value().clone()))
    }

    fn save(&self, trip: &Trip) -> Result<(), StoreError> {
        self.trips.insert(trip.trip_id.clone(), trip.persisted());
        Ok(())
    }

    fn delete(&self, trip_id: &str) -> Result<(), StoreError> {
        self.trips.remove(trip_id);
        Ok(())
    }
}
