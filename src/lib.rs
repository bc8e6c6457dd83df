//! Airhaul - airport truck dispatch core
//!
//! This library provides the scheduling and trip-tracking core for a fleet
//! of trucks dispatched toward an airport: a daily assignment snapshot
//! cache, a backward-chained departure-time solver, and a trip state
//! machine that reacts to live traffic advisories.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use airhaul::service::DispatchService;
//! use airhaul::config::DispatchConfig;
//!
//! let service = DispatchService::new(DispatchConfig::default());
//!
//! // Schedule a trip toward the airport
//! let trip = service.trips().schedule("TRUCK001", "DRIVER001", location)?;
//! ```

pub mod assignment;
pub mod config;
pub mod departure;
pub mod logging;
pub mod model;
pub mod service;
pub mod source;
pub mod store;
pub mod trip;

/// Version of the airhaul library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
