//! Backward departure-time computation.

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::model::Location;
use crate::source::{RoutingSource, SourceError};

/// The four chained instants of a flight-pickup schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct DeparturePlan {
    /// Arrival deadline at the airport (the flight's next occurrence).
    pub target_arrival: NaiveDateTime,
    /// Latest departure from the pickup location that meets the deadline.
    pub pickup_departure: NaiveDateTime,
    /// Required arrival at the pickup location.
    pub pickup_arrival: NaiveDateTime,
    /// Latest departure from the current position that meets the pickup
    /// arrival.
    pub current_departure: NaiveDateTime,
}

/// Computes the latest departure time for one leg.
///
/// The routing source is asked for a traffic-aware duration with the
/// arrival instant as the departure hint (an approximation of
/// arrival-time traffic, not a backward simulation); the duration is then
/// subtracted in whole seconds.
pub fn solve_leg(
    routing: &dyn RoutingSource,
    origin: Location,
    destination: Location,
    target_arrival: NaiveDateTime,
) -> Result<NaiveDateTime, SourceError> {
    let route = routing.compute_route_at(origin, destination, target_arrival)?;
    Ok(target_arrival - TimeDelta::seconds(i64::from(route.duration_seconds)))
}

/// Chains two legs backward from a flight's arrival time.
///
/// The flight time names its next occurrence: if the computed pickup
/// departure is not after `now`, the target rolls forward exactly one
/// day and the leg is solved again. The pickup arrival sits
/// `pickup_buffer` before the pickup departure (loading time) and rolls
/// forward a day likewise if it has already passed.
///
/// `now` must be wall-clock time in the same civil zone as the result.
pub fn plan_flight_pickup(
    routing: &dyn RoutingSource,
    current: Location,
    pickup: Location,
    airport: Location,
    flight_arrival: NaiveTime,
    pickup_buffer: TimeDelta,
    now: NaiveDateTime,
) -> Result<DeparturePlan, SourceError> {
    let mut target_arrival = now.date().and_time(flight_arrival);
    let mut pickup_departure = solve_leg(routing, pickup, airport, target_arrival)?;
    if pickup_departure <= now {
        target_arrival += TimeDelta::days(1);
        pickup_departure = solve_leg(routing, pickup, airport, target_arrival)?;
    }

    let mut pickup_arrival = pickup_departure - pickup_buffer;
    if pickup_arrival < now {
        pickup_arrival += TimeDelta::days(1);
    }

    let current_departure = solve_leg(routing, current, pickup, pickup_arrival)?;

    Ok(DeparturePlan {
        target_arrival,
        pickup_departure,
        pickup_arrival,
        current_departure,
    })
}
