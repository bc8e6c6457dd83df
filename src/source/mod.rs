//! External collaborator abstractions.
//!
//! The dispatch core talks to five outside systems: traffic advisories,
//! routing, airport parking, road intersections, and the transportation
//! backend that produces manifests and dispatch assignments. Each is
//! modeled as a `Send + Sync` trait so implementations (HTTP clients,
//! simulators, test scripts) can be used interchangeably.
//!
//! The `Sim*` implementations are in-process ports of the upstream mock
//! services; they stand in for the real clients in tests and demos.

mod error;
mod intersection;
mod parking;
mod routing;
mod traffic;
mod transportation;

pub use error::SourceError;
pub use intersection::{IntersectionSource, SimIntersectionSource};
pub use parking::{ParkingSource, SimParkingSource};
pub use routing::{RoutingSource, SimRoutingSource};
pub use traffic::{SimTrafficSource, TrafficSource};
pub use transportation::{SimTransportationSource, TransportationSource};

#[cfg(test)]
pub use routing::tests::FixedRoutingSource;
#[cfg(test)]
pub use traffic::tests::ScriptedTrafficSource;
#[cfg(test)]
pub use transportation::tests::ScriptedTransportationSource;
