//! Thread-safe snapshot cache for the day's assignments.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::model::Assignment;

/// The day's dispatch assignments, keyed by generated assignment id.
///
/// All reads resolve against the currently published snapshot: a refresh
/// builds a complete replacement map and swaps it in one step, so a
/// reader holds either the old set or the new set, never a mix.
pub struct AssignmentCache {
    snapshot: RwLock<Arc<HashMap<String, Assignment>>>,
}

impl AssignmentCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Publishes `assignments` as the new snapshot, discarding the old
    /// one entirely.
    pub fn replace(&self, assignments: HashMap<String, Assignment>) {
        let mut guard = self.snapshot.write().expect("assignment cache poisoned");
        *guard = Arc::new(assignments);
    }

    /// Empties the cache.
    pub fn clear(&self) {
        self.replace(HashMap::new());
    }

    fn current(&self) -> Arc<HashMap<String, Assignment>> {
        Arc::clone(&self.snapshot.read().expect("assignment cache poisoned"))
    }

    /// Looks up one assignment by id.
    pub fn get(&self, assignment_id: &str) -> Option<Assignment> {
        self.current().get(assignment_id).cloned()
    }

    /// Returns every assignment in the current snapshot.
    pub fn get_all(&self) -> Vec<Assignment> {
        self.current().values().cloned().collect()
    }

    /// Returns the assignments for one truck. Ordering is unspecified.
    pub fn get_by_truck(&self, truck_id: &str) -> Vec<Assignment> {
        self.current()
            .values()
            .filter(|a| a.truck_id == truck_id)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }
}

impl Default for AssignmentCache {
    fn default() -> Self {
        Self::new()
    }
}
