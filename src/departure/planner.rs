//! Flight-pickup planning: assignment lookup, backward scheduling, and
//! airside resource reservation.

use std::sync::Arc;

use chrono::{NaiveDateTime, TimeDelta, Utc};
use chrono_tz::Tz;
use dashmap::DashMap;
use tracing::{debug, info};

use super::solver::plan_flight_pickup;
use crate::assignment::AssignmentCache;
use crate::model::{Location, TimeDetails};
use crate::source::{ParkingSource, RoutingSource, TransportationSource};
use crate::trip::DispatchError;

/// Produces [`TimeDetails`] for an assignment: when to leave the current
/// position, when to leave the pickup, and which airside parking and dock
/// were reserved for the flight.
///
/// Results are cached best-effort by assignment id; the cache dies with
/// the process and is never consulted for correctness.
pub struct FlightPlanner {
    routing: Arc<dyn RoutingSource>,
    parking: Arc<dyn ParkingSource>,
    transportation: Arc<dyn TransportationSource>,
    assignments: Arc<AssignmentCache>,
    airport: Location,
    zone: Tz,
    pickup_buffer: TimeDelta,
    details_cache: DashMap<String, TimeDetails>,
}

impl FlightPlanner {
    pub fn new(
        routing: Arc<dyn RoutingSource>,
        parking: Arc<dyn ParkingSource>,
        transportation: Arc<dyn TransportationSource>,
        assignments: Arc<AssignmentCache>,
        airport: Location,
        zone: Tz,
        pickup_buffer: TimeDelta,
    ) -> Self {
        Self {
            routing,
            parking,
            transportation,
            assignments,
            airport,
            zone,
            pickup_buffer,
            details_cache: DashMap::new(),
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.zone).naive_local()
    }

    /// Computes the full pickup schedule for an assignment.
    ///
    /// # Errors
    ///
    /// `ASSIGNMENT_NOT_FOUND` if the id is not in today's snapshot,
    /// `FLIGHT_INFO_FAILED` if the flight lookup fails,
    /// `ROUTE_FETCH_FAILED` if either leg cannot be solved, and
    /// `DOCK_RESERVATION_FAILED` if airside reservation fails.
    pub fn flight_info(
        &self,
        assignment_id: &str,
        current: Location,
    ) -> Result<TimeDetails, DispatchError> {
        let assignment = self
            .assignments
            .get(assignment_id)
            .ok_or_else(|| DispatchError::AssignmentNotFound(assignment_id.to_string()))?;

        let flight = self
            .transportation
            .flight_info(&assignment.flight_number)
            .map_err(DispatchError::FlightInfoUnavailable)?;

        let plan = plan_flight_pickup(
            self.routing.as_ref(),
            current,
            assignment.location,
            self.airport,
            flight.arrival_time,
            self.pickup_buffer,
            self.local_now(),
        )
        .map_err(DispatchError::RouteFetchFailed)?;

        let parking = self
            .parking
            .reserve_parking()
            .map_err(DispatchError::DockReservationFailed)?;
        let dock = self
            .parking
            .reserve_dock(&flight.terminal)
            .map_err(DispatchError::DockReservationFailed)?;

        let details = TimeDetails {
            assignment_id: assignment_id.to_string(),
            flight_number: flight.flight_number,
            flight_terminal: flight.terminal,
            target_arrival: plan.target_arrival,
            pickup_departure: plan.pickup_departure,
            pickup_arrival: plan.pickup_arrival,
            current_departure: plan.current_departure,
            parking,
            dock,
        };

        info!(
            assignment_id,
            flight = %details.flight_number,
            depart_current = %details.current_departure,
            depart_pickup = %details.pickup_departure,
            "flight pickup planned"
        );
        self.details_cache
            .insert(assignment_id.to_string(), details.clone());
        Ok(details)
    }

    /// Returns the last computed schedule for an assignment, if any.
    pub fn cached(&self, assignment_id: &str) -> Option<TimeDetails> {
        let details = self
            .details_cache
            .get(assignment_id)
            .map(|d| d.value().clone());
        if details.is_none() {
            debug!(assignment_id, "no cached flight schedule");
        }
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, Manifest};
    use crate::source::{
        FixedRoutingSource, ScriptedTransportationSource, SimParkingSource, SourceError,
    };
    use std::collections::HashMap;

    const CHICAGO: Tz = chrono_tz::America::Chicago;

    fn assignment(id: &str) -> Assignment {
        Assignment {
            id: id.into(),
            company_name: "AirCargo Inc".into(),
            dispatcher_name: "Dana".into(),
            location: Location::new(32.9853, -96.7501),
            task_type: "pickup".into(),
            flight_number: "AA1234".into(),
            pickup_time: "09:30".into(),
            priority: "high".into(),
            trucker_name: "Alice".into(),
            truck_id: "TRUCK001".into(),
        }
    }

    fn planner_with(
        routing: Arc<FixedRoutingSource>,
        transportation: Arc<ScriptedTransportationSource>,
    ) -> FlightPlanner {
        let cache = Arc::new(AssignmentCache::new());
        cache.replace(HashMap::from([("A-1".to_string(), assignment("A-1"))]));

        FlightPlanner::new(
            routing,
            Arc::new(SimParkingSource::new()),
            transportation,
            cache,
            Location::new(32.8998, -97.0403),
            CHICAGO,
            TimeDelta::hours(1),
        )
    }

    fn scripted_transportation() -> Arc<ScriptedTransportationSource> {
        Arc::new(ScriptedTransportationSource::new(
            Vec::<Manifest>::new(),
            Vec::new(),
        ))
    }

    #[test]
    fn plans_and_caches_time_details() {
        let planner = planner_with(
            Arc::new(FixedRoutingSource::new(1800)),
            scripted_transportation(),
        );
        let current = Location::new(32.90, -96.80);

        let details = planner.flight_info("A-1", current).unwrap();
        assert_eq!(details.flight_number, "AA1234");
        assert_eq!(details.flight_terminal, "B");
        assert_eq!(
            details.pickup_departure,
            details.target_arrival - TimeDelta::seconds(1800)
        );
        assert!(details.dock.dock_id.contains("-B-"));
        assert!(!details.parking.parking_id.is_empty());

        assert_eq!(planner.cached("A-1"), Some(details));
    }

    #[test]
    fn unknown_assignment_is_a_typed_error() {
        let planner = planner_with(
            Arc::new(FixedRoutingSource::new(1800)),
            scripted_transportation(),
        );
        let err = planner
            .flight_info("missing", Location::new(32.90, -96.80))
            .unwrap_err();
        assert_eq!(err.code(), "ASSIGNMENT_NOT_FOUND");
        assert!(planner.cached("missing").is_none());
    }

    #[test]
    fn flight_lookup_failure_is_typed() {
        let transportation = scripted_transportation();
        transportation.set_failing(true);
        let planner = planner_with(Arc::new(FixedRoutingSource::new(1800)), transportation);

        let err = planner
            .flight_info("A-1", Location::new(32.90, -96.80))
            .unwrap_err();
        assert_eq!(err.code(), "FLIGHT_INFO_FAILED");
        assert!(matches!(
            err,
            DispatchError::FlightInfoUnavailable(SourceError::Unavailable(_))
        ));
    }

    #[test]
    fn routing_failure_is_typed_and_skips_reservation() {
        let routing = Arc::new(FixedRoutingSource::new(1800));
        routing.set_failing(true);
        let planner = planner_with(routing, scripted_transportation());

        let err = planner
            .flight_info("A-1", Location::new(32.90, -96.80))
            .unwrap_err();
        assert_eq!(err.code(), "ROUTE_FETCH_FAILED");
        assert!(planner.cached("A-1").is_none());
    }
}
