//! Departure-time solving for flight pickups.
//!
//! Works backward from a fixed arrival deadline: given when a flight
//! lands, when must the truck leave the pickup location, and before that,
//! when must it leave its current position. All arithmetic is civil time
//! in one fixed zone, so day-rollover decisions follow the local wall
//! clock rather than UTC.

mod planner;
mod solver;

pub use planner::FlightPlanner;
pub use solver::{plan_flight_pickup, solve_leg, DeparturePlan};
