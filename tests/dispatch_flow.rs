//! End-to-end flows through the public facade.

use airhaul::config::DispatchConfig;
use airhaul::model::Location;
use airhaul::service::DispatchService;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn start_location() -> Location {
    Location::new(32.90, -96.80)
}

#[test]
fn trip_lifecycle_schedule_update_complete() {
    let service = DispatchService::new(DispatchConfig::default());

    let trip = service
        .trips()
        .schedule("TRUCK001", "DRIVER001", start_location())
        .expect("schedule");

    assert!(trip.active);
    assert!(trip.route.is_some());
    let slot = trip.reserved_slot.clone().expect("slot reserved");
    assert!(slot.reserved);

    assert!(!trip.upcoming.is_empty());
    assert!(trip.upcoming.len() <= 3);
    assert_eq!(trip.upcoming[0].sequence_number, 1);

    // Drive a few position updates; the simulated advisories may or may
    // not force a re-route, but the trip must stay active and keep a
    // reserved slot either way.
    let mut position = start_location();
    for _ in 0..3 {
        position = Location::new(position.latitude - 0.01, position.longitude - 0.03);
        let updated = service
            .trips()
            .update_location(&trip.trip_id, position)
            .expect("update");
        assert!(updated.active);
        assert!(updated.reserved_slot.is_some());
        assert_eq!(updated.current_location, position);
        assert!(updated.latest_advisory.is_some());
    }

    let receipt = service.trips().complete(&trip.trip_id).expect("complete");
    assert_eq!(receipt.trip_id, trip.trip_id);

    // Terminal state: no further transitions.
    let err = service
        .trips()
        .update_location(&trip.trip_id, position)
        .unwrap_err();
    assert_eq!(err.code(), "TRIP_ALREADY_COMPLETED");
    let err = service.trips().complete(&trip.trip_id).unwrap_err();
    assert_eq!(err.code(), "TRIP_ALREADY_COMPLETED");

    // The record survives as a terminal read.
    let stored = service.trips().get(&trip.trip_id).expect("get");
    assert!(!stored.active);
}

#[test]
fn unknown_entities_fail_with_stable_codes() {
    let service = DispatchService::new(DispatchConfig::default());

    let err = service
        .trips()
        .schedule("TRUCK001", "DRIVER999", start_location())
        .unwrap_err();
    assert_eq!(err.code(), "DRIVER_NOT_FOUND");

    let err = service
        .trips()
        .schedule("TRUCK999", "DRIVER001", start_location())
        .unwrap_err();
    assert_eq!(err.code(), "TRUCK_NOT_FOUND");

    let err = service.trips().get("no-such-trip").unwrap_err();
    assert_eq!(err.code(), "TRIP_NOT_FOUND");
}

#[test]
fn assignment_snapshot_supports_truck_queries_and_flight_planning() {
    let service = DispatchService::new(DispatchConfig::default());

    let count = service.scheduler().refresh().expect("refresh");
    assert_eq!(count, 2);

    let all = service.assignments().get_all();
    assert_eq!(all.len(), 2);
    assert!(all.iter().all(|a| !a.id.is_empty()));

    let mine = service.assignments().get_by_truck("TRUCK001");
    assert_eq!(mine.len(), 1);

    // Plan the pickup for that assignment and read it back from the
    // best-effort cache.
    let assignment_id = &mine[0].id;
    let details = service
        .planner()
        .flight_info(assignment_id, start_location())
        .expect("flight info");

    assert_eq!(&details.assignment_id, assignment_id);
    assert!(details.pickup_departure < details.target_arrival);
    assert!(!details.parking.parking_id.is_empty());
    assert!(!details.dock.dock_id.is_empty());

    assert_eq!(
        service.planner().cached(assignment_id),
        Some(details)
    );

    // The nightly clear leaves nothing behind.
    service.scheduler().clear();
    assert!(service.assignments().get_all().is_empty());
    let err = service
        .planner()
        .flight_info(assignment_id, start_location())
        .unwrap_err();
    assert_eq!(err.code(), "ASSIGNMENT_NOT_FOUND");
}

#[tokio::test]
async fn daemons_start_and_drain_on_shutdown() {
    let service = DispatchService::new(DispatchConfig::default());
    let shutdown = CancellationToken::new();

    let handles = service.spawn_daemons(&shutdown);
    assert_eq!(handles.len(), 2);

    tokio::time::sleep(Duration::from_millis(50)).await;
    shutdown.cancel();

    for handle in handles {
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("daemon drained")
            .expect("daemon task");
    }
}
