//! Transportation backend abstraction: manifests, dispatch assignment,
//! and flight information.

use chrono::NaiveTime;

use super::SourceError;
use crate::model::{Assignment, FlightInfo, Location, Manifest};

/// Trait for the transportation backend.
pub trait TransportationSource: Send + Sync {
    /// Returns the day's manifests.
    fn manifests(&self) -> Result<Vec<Manifest>, SourceError>;

    /// Submits manifests for dispatch assignment.
    ///
    /// Returned assignments carry no id; ids are generated at
    /// cache-insertion time.
    fn assign_tasks(&self, manifests: &[Manifest]) -> Result<Vec<Assignment>, SourceError>;

    /// Looks up arrival time and terminal for a flight.
    fn flight_info(&self, flight_number: &str) -> Result<FlightInfo, SourceError>;
}

/// Simulated transportation backend serving a small in-code manifest set
/// and flight table.
pub struct SimTransportationSource {
    manifests: Vec<Manifest>,
}

impl SimTransportationSource {
    pub fn new() -> Self {
        let manifests = vec![
            Manifest {
                company_name: "AirCargo Inc".into(),
                dispatcher_name: "Dana".into(),
                location: Location::new(32.9853, -96.7501),
                task_type: "pickup".into(),
                flight_number: "AA1234".into(),
                pickup_time: "09:30".into(),
                priority: "high".into(),
            },
            Manifest {
                company_name: "Lone Star Freight".into(),
                dispatcher_name: "Raj".into(),
                location: Location::new(32.7767, -96.7970),
                task_type: "pickup".into(),
                flight_number: "UA0456".into(),
                pickup_time: "13:00".into(),
                priority: "normal".into(),
            },
        ];
        Self { manifests }
    }
}

impl Default for SimTransportationSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportationSource for SimTransportationSource {
    fn manifests(&self) -> Result<Vec<Manifest>, SourceError> {
        Ok(self.manifests.clone())
    }

    fn assign_tasks(&self, manifests: &[Manifest]) -> Result<Vec<Assignment>, SourceError> {
        // Round-robin over the two seeded trucks.
        let fleet = [("TRUCK001", "Alice"), ("TRUCK002", "Bob")];
        let assignments = manifests
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let (truck_id, trucker_name) = fleet[i % fleet.len()];
                Assignment {
                    id: String::new(),
                    company_name: m.company_name.clone(),
                    dispatcher_name: m.dispatcher_name.clone(),
                    location: m.location,
                    task_type: m.task_type.clone(),
                    flight_number: m.flight_number.clone(),
                    pickup_time: m.pickup_time.clone(),
                    priority: m.priority.clone(),
                    trucker_name: trucker_name.into(),
                    truck_id: truck_id.into(),
                }
            })
            .collect();
        Ok(assignments)
    }

    fn flight_info(&self, flight_number: &str) -> Result<FlightInfo, SourceError> {
        let (arrival, terminal) = match flight_number {
            "AA1234" => ("14:00", "B"),
            "UA0456" => ("18:30", "E"),
            _ => ("11:00", "A"),
        };
        let arrival_time = NaiveTime::parse_from_str(arrival, "%H:%M")
            .map_err(|e| SourceError::InvalidResponse(e.to_string()))?;
        Ok(FlightInfo {
            flight_number: flight_number.into(),
            arrival_time,
            terminal: terminal.into(),
        })
    }
}
