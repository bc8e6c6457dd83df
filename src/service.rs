//! High-level facade wiring the dispatch core together.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::assignment::{AssignmentCache, AssignmentScheduler, ClearDaemon, RefreshDaemon};
use crate::config::DispatchConfig;
use crate::departure::FlightPlanner;
use crate::source::{
    SimIntersectionSource, SimParkingSource, SimRoutingSource, SimTrafficSource,
    SimTransportationSource,
};
use crate::store::{InMemoryCatalog, InMemoryTripStore};
use crate::trip::{IntersectionBatchCache, TripService};

/// Facade over the dispatch core, wired with the simulated sources and
/// in-memory stores.
///
/// Encapsulates component creation so a transport layer (or a demo) only
/// deals with three entry points: the trip service, the assignment
/// cache/scheduler, and the flight planner.
///
/// # Example
///
/// ```ignore
/// use airhaul::config::DispatchConfig;
/// use airhaul::model::Location;
/// use airhaul::service::DispatchService;
///
/// let service = DispatchService::new(DispatchConfig::default());
/// let trip = service.trips().schedule("TRUCK001", "DRIVER001", Location::new(32.90, -96.80))?;
/// ```
pub struct DispatchService {
    config: DispatchConfig,
    assignments: Arc<AssignmentCache>,
    scheduler: Arc<AssignmentScheduler>,
    planner: Arc<FlightPlanner>,
    trips: Arc<TripService>,
}

impl DispatchService {
    /// Creates a fully wired dispatch core from configuration.
    pub fn new(config: DispatchConfig) -> Self {
        let catalog = Arc::new(InMemoryCatalog::seeded());
        let trip_store = Arc::new(InMemoryTripStore::new());
        let traffic = Arc::new(SimTrafficSource::new());
        let routing = Arc::new(SimRoutingSource::new());
        let parking = Arc::new(SimParkingSource::new());
        let intersections = Arc::new(SimIntersectionSource::new());
        let transportation = Arc::new(SimTransportationSource::new());

        let assignments = Arc::new(AssignmentCache::new());
        let scheduler = Arc::new(AssignmentScheduler::new(
            transportation.clone(),
            Arc::clone(&assignments),
        ));
        let planner = Arc::new(FlightPlanner::new(
            routing.clone(),
            parking.clone(),
            transportation,
            Arc::clone(&assignments),
            config.airport,
            config.zone,
            config.pickup_buffer,
        ));
        let batches = Arc::new(IntersectionBatchCache::new());
        let trips = Arc::new(TripService::new(
            catalog.clone(),
            catalog,
            trip_store,
            traffic,
            routing,
            parking,
            intersections,
            batches,
            config.clone(),
        ));

        Self {
            config,
            assignments,
            scheduler,
            planner,
            trips,
        }
    }

    /// The trip state machine.
    pub fn trips(&self) -> &TripService {
        &self.trips
    }

    /// The day's assignment snapshot.
    pub fn assignments(&self) -> &AssignmentCache {
        &self.assignments
    }

    /// The assignment refresh scheduler.
    pub fn scheduler(&self) -> &AssignmentScheduler {
        &self.scheduler
    }

    /// The flight-pickup planner.
    pub fn planner(&self) -> &FlightPlanner {
        &self.planner
    }

    /// Spawns the two daily timer daemons.
    ///
    /// Each runs until `shutdown` is cancelled; the returned handles can
    /// be awaited for a clean drain. The daemons are independent: one
    /// failing does not cancel the other.
    pub fn spawn_daemons(&self, shutdown: &CancellationToken) -> Vec<JoinHandle<()>> {
        info!(
            refresh_at = %self.config.refresh_at,
            clear_at = %self.config.clear_at,
            zone = %self.config.zone,
            "starting assignment daemons"
        );
        let refresh = RefreshDaemon::new(
            Arc::clone(&self.scheduler),
            self.config.zone,
            self.config.refresh_at,
        );
        let clear = ClearDaemon::new(
            Arc::clone(&self.scheduler),
            self.config.zone,
            self.config.clear_at,
        );
        vec![
            tokio::spawn(refresh.run(shutdown.clone())),
            tokio::spawn(clear.run(shutdown.clone())),
        ]
    }
}
