//! Airport parking source abstraction.

use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use tracing::info;

use super::SourceError;
use crate::model::{DockReservation, Location, ParkingReservation, ParkingSlot};

/// Trait for the airport parking and dock backend.
///
/// Slot reservation must be exclusive per slot id: of two concurrent
/// `reserve` calls for the same slot, exactly one wins.
pub trait ParkingSource: Send + Sync {
    /// Returns all currently unreserved slots.
    fn list_available(&self) -> Result<Vec<ParkingSlot>, SourceError>;

    /// Reserves a slot if it is still available.
    ///
    /// Returns the reserved slot, or `None` if the slot is unknown or
    /// already taken.
    fn reserve(&self, slot_id: &str) -> Result<Option<ParkingSlot>, SourceError>;

    /// Re-checks a held reservation.
    ///
    /// Returns the slot if the reservation is still valid, `None` if it
    /// has been invalidated upstream.
    fn verify(&self, slot_id: &str) -> Result<Option<ParkingSlot>, SourceError>;

    /// Notifies the airport that a truck has arrived. Best-effort.
    fn confirm_arrival(&self, truck_id: &str);

    /// Reserves airside parking for a flight pickup.
    fn reserve_parking(&self) -> Result<ParkingReservation, SourceError>;

    /// Reserves a dock at the given terminal.
    fn reserve_dock(&self, terminal: &str) -> Result<DockReservation, SourceError>;
}

/// Simulated airport parking backend.
///
/// Seeds three gates with two slots each. All mutation goes through the
/// slot table's per-entry locks, so concurrent reservations of one slot
/// resolve to a single winner.
pub struct SimParkingSource {
    slots: DashMap<String, ParkingSlot>,
    airside_seq: AtomicU32,
}

impl SimParkingSource {
    pub fn new() -> Self {
        let slots = DashMap::new();
        for slot in [
            ParkingSlot::new("SLOT-A1", "GateA"),
            ParkingSlot::new("SLOT-A2", "GateA"),
            ParkingSlot::new("SLOT-B1", "GateB"),
            ParkingSlot::new("SLOT-B2", "GateB"),
            ParkingSlot::new("SLOT-C1", "GateC"),
            ParkingSlot::new("SLOT-C2", "GateC"),
        ] {
            slots.insert(slot.slot_id.clone(), slot);
        }
        Self {
            slots,
            airside_seq: AtomicU32::new(1),
        }
    }

    /// Drops a slot from the table, simulating upstream invalidation of
    /// an existing reservation.
    pub fn revoke(&self, slot_id: &str) {
        self.slots.remove(slot_id);
    }

    /// Returns a reserved slot to the available pool.
    pub fn release(&self, slot_id: &str) {
        if let Some(mut slot) = self.slots.get_mut(slot_id) {
            slot.reserved = false;
        }
    }
}

impl Default for SimParkingSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ParkingSource for SimParkingSource {
    fn list_available(&self) -> Result<Vec<ParkingSlot>, SourceError> {
        let mut available: Vec<ParkingSlot> = self
            .slots
            .iter()
            .filter(|entry| !entry.reserved)
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; keep the listing stable.
        available.sort_by(|a, b| a.slot_id.cmp(&b.slot_id));
        Ok(available)
    }

    fn reserve(&self, slot_id: &str) -> Result<Option<ParkingSlot>, SourceError> {
        match self.slots.get_mut(slot_id) {
            Some(mut slot) if !slot.reserved => {
                slot.reserved = true;
                Ok(Some(slot.clone()))
            }
            _ => Ok(None),
        }
    }

    fn verify(&self, slot_id: &str) -> Result<Option<ParkingSlot>, SourceError> {
        match self.slots.get(slot_id) {
            Some(slot) if slot.reserved => Ok(Some(slot.clone())),
            _ => Ok(None),
        }
    }

    fn confirm_arrival(&self, truck_id: &str) {
        info!(truck_id, "arrival confirmed at airport");
    }

    fn reserve_parking(&self) -> Result<ParkingReservation, SourceError> {
        let seq = self.airside_seq.fetch_add(1, Ordering::Relaxed);
        Ok(ParkingReservation {
            parking_id: format!("APRON-{seq:03}"),
            location: Location::new(32.8971, -97.0382),
        })
    }

    fn reserve_dock(&self, terminal: &str) -> Result<DockReservation, SourceError> {
        let seq = self.airside_seq.fetch_add(1, Ordering::Relaxed);
        Ok(DockReservation {
            dock_id: format!("DOCK-{terminal}-{seq:03}"),
            location: Location::new(32.8975, -97.0359),
        })
    }
}
