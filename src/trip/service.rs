//! The trip state machine.

use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{DispatchError, IntersectionBatchCache};
use crate::config::DispatchConfig;
use crate::model::{Intersection, Location, Trip, TripReceipt};
use crate::source::{IntersectionSource, ParkingSource, RoutingSource, TrafficSource};
use crate::store::{DriverStore, TripStore, TruckStore};

/// Orchestrates a trip's lifecycle against the external sources.
///
/// `schedule` creates an active trip with a route, a reserved parking
/// slot and a primed intersection queue; `update_location` reacts to the
/// latest traffic advisory (re-routing or extending the ETA) and
/// re-verifies the slot; `complete` is terminal. Each trip record is
/// assumed single-writer at any moment; serializing concurrent updates
/// for one trip id is the durable store's concern.
pub struct TripService {
    drivers: Arc<dyn DriverStore>,
    trucks: Arc<dyn TruckStore>,
    trips: Arc<dyn TripStore>,
    traffic: Arc<dyn TrafficSource>,
    routing: Arc<dyn RoutingSource>,
    parking: Arc<dyn ParkingSource>,
    intersections: Arc<dyn IntersectionSource>,
    batches: Arc<IntersectionBatchCache>,
    config: DispatchConfig,
}

impl TripService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        drivers: Arc<dyn DriverStore>,
        trucks: Arc<dyn TruckStore>,
        trips: Arc<dyn TripStore>,
        traffic: Arc<dyn TrafficSource>,
        routing: Arc<dyn RoutingSource>,
        parking: Arc<dyn ParkingSource>,
        intersections: Arc<dyn IntersectionSource>,
        batches: Arc<IntersectionBatchCache>,
        config: DispatchConfig,
    ) -> Self {
        Self {
            drivers,
            trucks,
            trips,
            traffic,
            routing,
            parking,
            intersections,
            batches,
            config,
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.config.zone).naive_local()
    }

    /// Draws the next intersection batch for a trip, attaching a current
    /// advisory to each drawn item. Advisory lookups are best-effort.
    fn draw_batch(&self, trip_id: &str) -> Vec<Intersection> {
        let mut batch = self.batches.next_batch(trip_id, self.config.batch_size);
        for intersection in &mut batch {
            match self.traffic.advisory(intersection.location) {
                Ok(advisory) => intersection.advisory = Some(advisory),
                Err(error) => {
                    debug!(
                        %error,
                        sequence = intersection.sequence_number,
                        "no advisory for intersection"
                    );
                }
            }
        }
        batch
    }

    /// Schedules a truck toward the airport.
    ///
    /// Validates the driver and truck, computes the initial route,
    /// reserves a parking slot, persists the trip, and primes the
    /// intersection queue, returning the trip with its first batch drawn.
    ///
    /// Steps already completed externally are not rolled back on a later
    /// failure: a reserved slot stays reserved even if persistence or the
    /// intersection fetch fails afterward.
    pub fn schedule(
        &self,
        truck_id: &str,
        driver_id: &str,
        location: Location,
    ) -> Result<Trip, DispatchError> {
        let driver = self
            .drivers
            .find(driver_id)?
            .ok_or_else(|| DispatchError::DriverNotFound(driver_id.to_string()))?;
        let truck = self
            .trucks
            .find(truck_id)?
            .ok_or_else(|| DispatchError::TruckNotFound(truck_id.to_string()))?;

        // The initial advisory is informational; a traffic outage must
        // not block scheduling.
        let advisory = match self.traffic.advisory(location) {
            Ok(advisory) => Some(advisory),
            Err(error) => {
                warn!(%error, "initial advisory unavailable");
                None
            }
        };

        let route = self
            .routing
            .compute_route(location, self.config.airport)
            .map_err(DispatchError::RouteFetchFailed)?;

        let available = self
            .parking
            .list_available()
            .map_err(DispatchError::ParkingFetchFailed)?;
        let chosen = available.first().ok_or(DispatchError::NoParkingSlots)?;
        let reserved = self
            .parking
            .reserve(&chosen.slot_id)
            .map_err(DispatchError::ParkingFetchFailed)?
            .ok_or_else(|| DispatchError::SlotReservationFailed(chosen.slot_id.clone()))?;

        let now = self.local_now();
        let mut trip = Trip {
            trip_id: Uuid::new_v4().to_string(),
            driver_id: driver.driver_id,
            truck_id: truck.truck_id,
            current_location: location,
            reserved_slot: Some(reserved),
            start_time: now,
            estimated_arrival: now + TimeDelta::seconds(i64::from(route.duration_seconds)),
            active: true,
            route: Some(route.clone()),
            latest_advisory: advisory,
            upcoming: Vec::new(),
        };

        self.trips.save(&trip)?;

        let fetched = self
            .intersections
            .intersections(
                &route,
                location,
                self.config.airport,
                self.config.intersection_count,
            )
            .map_err(DispatchError::IntersectionFetchFailed)?;
        self.batches.put(&trip.trip_id, fetched);
        trip.upcoming = self.draw_batch(&trip.trip_id);

        info!(
            trip_id = %trip.trip_id,
            truck_id,
            driver_id,
            eta = %trip.estimated_arrival,
            "trip scheduled"
        );
        Ok(trip)
    }

    /// Records a position update and reacts to the current advisory.
    ///
    /// A route-change advisory recomputes the route and replaces the
    /// intersection queue (the next batch restarts at sequence 1); a
    /// delay advisory extends the ETA instead. Either way the held
    /// parking slot is re-verified, falling back to any other free slot
    /// if it has been invalidated.
    pub fn update_location(
        &self,
        trip_id: &str,
        new_location: Location,
    ) -> Result<Trip, DispatchError> {
        let mut trip = self
            .trips
            .find(trip_id)?
            .ok_or_else(|| DispatchError::TripNotFound(trip_id.to_string()))?;
        if !trip.active {
            return Err(DispatchError::TripAlreadyCompleted(trip_id.to_string()));
        }

        trip.current_location = new_location;

        // Fire-and-forget position report.
        self.traffic.notify_location(new_location, &trip.driver_id);

        let advisory = self
            .traffic
            .advisory(new_location)
            .map_err(DispatchError::TrafficFetchFailed)?;
        trip.latest_advisory = Some(advisory.clone());

        if advisory.route_changed {
            self.batches.remove(trip_id);
            let route = self
                .routing
                .compute_route(new_location, self.config.airport)
                .map_err(DispatchError::RouteFetchFailed)?;
            trip.estimated_arrival =
                self.local_now() + TimeDelta::seconds(i64::from(route.duration_seconds));

            let fetched = self
                .intersections
                .intersections(
                    &route,
                    new_location,
                    self.config.airport,
                    self.config.intersection_count,
                )
                .map_err(DispatchError::IntersectionFetchFailed)?;
            self.batches.put(trip_id, fetched);
            trip.route = Some(route);
            info!(trip_id, advisory = %advisory.message, "route recomputed after advisory");
        } else {
            if advisory.denotes_delay() {
                trip.estimated_arrival += self.config.delay_penalty;
                info!(trip_id, eta = %trip.estimated_arrival, "delay reported, ETA extended");
            }
            trip.upcoming = self.draw_batch(trip_id);
        }

        if let Some(slot) = trip.reserved_slot.clone() {
            let verified = self
                .parking
                .verify(&slot.slot_id)
                .map_err(DispatchError::ParkingFetchFailed)?;
            match verified {
                Some(fresh) => trip.reserved_slot = Some(fresh),
                None => {
                    warn!(
                        trip_id,
                        slot_id = %slot.slot_id,
                        "held parking slot invalidated, reserving another"
                    );
                    let available = self
                        .parking
                        .list_available()
                        .map_err(DispatchError::ParkingFetchFailed)?;
                    let fallback = available.first().ok_or(DispatchError::NoParkingSlots)?;
                    let reserved = self
                        .parking
                        .reserve(&fallback.slot_id)
                        .map_err(DispatchError::ParkingFetchFailed)?
                        .ok_or_else(|| {
                            DispatchError::ParkingSlotUnavailable(slot.slot_id.clone())
                        })?;
                    trip.reserved_slot = Some(reserved);
                }
            }
        }

        self.trips.save(&trip)?;
        Ok(trip)
    }

    /// Completes a trip. Terminal: any later operation on the same id
    /// fails with `TRIP_ALREADY_COMPLETED`.
    pub fn complete(&self, trip_id: &str) -> Result<TripReceipt, DispatchError> {
        let mut trip = self
            .trips
            .find(trip_id)?
            .ok_or_else(|| DispatchError::TripNotFound(trip_id.to_string()))?;
        if !trip.active {
            return Err(DispatchError::TripAlreadyCompleted(trip_id.to_string()));
        }

        self.parking.confirm_arrival(&trip.truck_id);
        self.batches.remove(trip_id);

        trip.active = false;
        // The terminal record is kept so that later operations can be
        // distinguished from an unknown trip id.
        self.trips.save(&trip)?;

        let completed_at = self.local_now();
        info!(trip_id, truck_id = %trip.truck_id, "trip completed");
        Ok(TripReceipt {
            trip_id: trip.trip_id,
            truck_id: trip.truck_id,
            completed_at,
        })
    }

    /// Reads a trip. Ephemeral fields (route, advisory, upcoming batch)
    /// come back empty by store contract.
    pub fn get(&self, trip_id: &str) -> Result<Trip, DispatchError> {
        self.trips
            .find(trip_id)?
            .ok_or_else(|| DispatchError::TripNotFound(trip_id.to_string()))
    }
}
