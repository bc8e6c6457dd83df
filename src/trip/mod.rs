//! Trip lifecycle: scheduling, live location updates, and completion.
//!
//! The state machine has one active state (scheduled trips are
//! immediately en route) and one terminal state (completed). Every
//! operation returns either a domain object or a typed
//! [`DispatchError`]; failures never masquerade as zero-valued trips.

mod batch;
mod error;
mod service;

pub use batch::IntersectionBatchCache;
pub use error::DispatchError;
pub use service::TripService;
