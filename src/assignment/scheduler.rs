//! Daily assignment refresh.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use super::AssignmentCache;
use crate::source::{SourceError, TransportationSource};

/// Fetches the day's manifests, has them dispatched, and publishes the
/// result to the [`AssignmentCache`].
pub struct AssignmentScheduler {
    transportation: Arc<dyn TransportationSource>,
    cache: Arc<AssignmentCache>,
}

impl AssignmentScheduler {
    pub fn new(transportation: Arc<dyn TransportationSource>, cache: Arc<AssignmentCache>) -> Self {
        Self {
            transportation,
            cache,
        }
    }

    /// Runs one refresh cycle.
    ///
    /// Each cached assignment gets a freshly generated id, stable for the
    /// rest of the day. If either upstream call fails the previous
    /// snapshot is left intact and the error is returned for the caller
    /// (normally the daemon) to surface.
    pub fn refresh(&self) -> Result<usize, SourceError> {
        let manifests = self.transportation.manifests()?;
        let assignments = self.transportation.assign_tasks(&manifests)?;

        let snapshot: HashMap<String, _> = assignments
            .into_iter()
            .map(|mut assignment| {
                let id = Uuid::new_v4().to_string();
                assignment.id = id.clone();
                (id, assignment)
            })
            .collect();

        let count = snapshot.len();
        self.cache.replace(snapshot);
        info!(count, "published daily assignment snapshot");
        Ok(count)
    }

    /// Empties the cache ahead of the next cycle.
    pub fn clear(&self) {
        self.cache.clear();
        info!("cleared daily assignment cache");
    }

    /// Convenience refresh that only logs on failure, for use where no
    /// caller can consume the error.
    pub fn refresh_logged(&self) {
        if let Err(error) = self.refresh() {
            warn!(%error, "daily assignment refresh failed; keeping previous snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, Location, Manifest};
    use crate::source::ScriptedTransportationSource;

    fn manifest(flight: &str) -> Manifest {
        Manifest {
            company_name: "AirCargo Inc".into(),
            dispatcher_name: "Dana".into(),
            location: Location::new(32.9853, -96.7501),
            task_type: "pickup".into(),
            flight_number: flight.into(),
            pickup_time: "09:30".into(),
            priority: "high".into(),
        }
    }

    fn assignment(flight: &str, truck_id: &str) -> Assignment {
        Assignment {
            id: String::new(),
            company_name: "AirCargo Inc".into(),
            dispatcher_name: "Dana".into(),
            location: Location::new(32.9853, -96.7501),
            task_type: "pickup".into(),
            flight_number: flight.into(),
            pickup_time: "09:30".into(),
            priority: "high".into(),
            trucker_name: "Alice".into(),
            truck_id: truck_id.into(),
        }
    }

    fn scheduler_with(
        source: Arc<ScriptedTransportationSource>,
    ) -> (AssignmentScheduler, Arc<AssignmentCache>) {
        let cache = Arc::new(AssignmentCache::new());
        (
            AssignmentScheduler::new(source, Arc::clone(&cache)),
            cache,
        )
    }

    #[test]
    fn refresh_publishes_assignments_with_fresh_ids() {
        let source = Arc::new(ScriptedTransportationSource::new(
            vec![manifest("AA1234"), manifest("UA0456")],
            vec![
                assignment("AA1234", "TRUCK001"),
                assignment("UA0456", "TRUCK002"),
            ],
        ));
        let (scheduler, cache) = scheduler_with(source);

        let count = scheduler.refresh().unwrap();
        assert_eq!(count, 2);

        let all = cache.get_all();
        assert_eq!(all.len(), 2);
        for a in &all {
            assert!(!a.id.is_empty());
            assert_eq!(cache.get(&a.id).unwrap().flight_number, a.flight_number);
        }
    }

    #[test]
    fn ids_are_regenerated_each_cycle() {
        let source = Arc::new(ScriptedTransportationSource::new(
            vec![manifest("AA1234")],
            vec![assignment("AA1234", "TRUCK001")],
        ));
        let (scheduler, cache) = scheduler_with(source);

        scheduler.refresh().unwrap();
        let first_id = cache.get_all()[0].id.clone();
        scheduler.refresh().unwrap();
        let second_id = cache.get_all()[0].id.clone();

        assert_ne!(first_id, second_id);
        assert!(cache.get(&first_id).is_none());
    }

    #[test]
    fn failed_refresh_keeps_previous_snapshot() {
        let source = Arc::new(ScriptedTransportationSource::new(
            vec![manifest("AA1234")],
            vec![assignment("AA1234", "TRUCK001")],
        ));
        let (scheduler, cache) = scheduler_with(Arc::clone(&source));

        scheduler.refresh().unwrap();
        assert_eq!(cache.len(), 1);

        source.set_failing(true);
        assert!(scheduler.refresh().is_err());
        assert_eq!(cache.len(), 1, "stale snapshot must survive a failed refresh");
    }

    #[test]
    fn clear_empties_snapshot() {
        let source = Arc::new(ScriptedTransportationSource::new(
            vec![manifest("AA1234")],
            vec![assignment("AA1234", "TRUCK001")],
        ));
        let (scheduler, cache) = scheduler_with(source);

        scheduler.refresh().unwrap();
        scheduler.clear();
        assert!(cache.is_empty());
    }
}
