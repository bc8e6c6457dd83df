//! Per-trip FIFO cache of upcoming intersections.

use std::collections::VecDeque;

use dashmap::DashMap;

use crate::model::Intersection;

/// Holds each trip's pending intersections and dispenses them in
/// fixed-size batches, preserving route order.
///
/// Dequeuing goes through the map's per-entry lock, so concurrent drains
/// of one trip's queue deliver every intersection exactly once, in
/// sequence. Contents are in-memory only and are regenerable from the
/// trip's route.
pub struct IntersectionBatchCache {
    queues: DashMap<String, VecDeque<Intersection>>,
}

impl IntersectionBatchCache {
    pub fn new() -> Self {
        Self {
            queues: DashMap::new(),
        }
    }

    /// Replaces the trip's queue wholesale with `intersections`.
    pub fn put(&self, trip_id: &str, intersections: Vec<Intersection>) {
        self.queues
            .insert(trip_id.to_string(), intersections.into());
    }

    /// Dequeues up to `n` intersections in original order.
    ///
    /// Returns fewer than `n` (or none) once the queue is exhausted, and
    /// an empty batch for an unknown trip. Never blocks.
    pub fn next_batch(&self, trip_id: &str, n: usize) -> Vec<Intersection> {
        match self.queues.get_mut(trip_id) {
            Some(mut queue) => {
                let take = n.min(queue.len());
                queue.drain(..take).collect()
            }
            None => Vec::new(),
        }
    }

    /// Discards the trip's queue.
    pub fn remove(&self, trip_id: &str) {
        self.queues.remove(trip_id);
    }

    /// Number of intersections still pending for a trip.
    pub fn pending(&self, trip_id: &str) -> usize {
        self.queues.get(trip_id).map_or(0, |q| q.len())
    }
}

impl Default for IntersectionBatchCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn sequence(n: u32) -> Vec<Intersection> {
        (1..=n)
            .map(|i| Intersection::new(i, Location::new(32.0 + i as f64 * 0.01, -96.0)))
            .collect()
    }

    #[test]
    fn drains_in_original_order() {
        let cache = IntersectionBatchCache::new();
        cache.put("trip-1", sequence(10));

        let mut seen = Vec::new();
        loop {
            let batch = cache.next_batch("trip-1", 3);
            if batch.is_empty() {
                break;
            }
            assert!(batch.len() <= 3);
            seen.extend(batch.into_iter().map(|i| i.sequence_number));
        }
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn order_holds_across_any_batch_split() {
        for split in 1..=11 {
            let cache = IntersectionBatchCache::new();
            cache.put("trip-1", sequence(10));

            let mut seen = Vec::new();
            loop {
                let batch = cache.next_batch("trip-1", split);
                if batch.is_empty() {
                    break;
                }
                seen.extend(batch.into_iter().map(|i| i.sequence_number));
            }
            assert_eq!(seen, (1..=10).collect::<Vec<_>>(), "split {split}");
        }
    }

    #[test]
    fn unknown_trip_yields_empty_batch() {
        let cache = IntersectionBatchCache::new();
        assert!(cache.next_batch("nobody", 3).is_empty());
    }

    #[test]
    fn put_replaces_rather_than_appends() {
        let cache = IntersectionBatchCache::new();
        cache.put("trip-1", sequence(10));
        cache.next_batch("trip-1", 3);

        // A route change installs a fresh sequence; consumption restarts
        // at 1.
        cache.put("trip-1", sequence(4));
        let batch = cache.next_batch("trip-1", 3);
        assert_eq!(
            batch.iter().map(|i| i.sequence_number).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(cache.pending("trip-1"), 1);
    }

    #[test]
    fn remove_discards_queue() {
        let cache = IntersectionBatchCache::new();
        cache.put("trip-1", sequence(5));
        cache.remove("trip-1");
        assert!(cache.next_batch("trip-1", 3).is_empty());
        assert_eq!(cache.pending("trip-1"), 0);
    }

    #[test]
    fn concurrent_drains_deliver_each_item_exactly_once() {
        let cache = Arc::new(IntersectionBatchCache::new());
        cache.put("trip-1", sequence(100));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let mut mine = Vec::new();
                    loop {
                        let batch = cache.next_batch("trip-1", 3);
                        if batch.is_empty() {
                            break;
                        }
                        // Each batch is internally ordered.
                        for pair in batch.windows(2) {
                            assert!(pair[0].sequence_number < pair[1].sequence_number);
                        }
                        mine.extend(batch.into_iter().map(|i| i.sequence_number));
                    }
                    mine
                })
            })
            .collect();

        let mut all: Vec<u32> = Vec::new();
        for handle in handles {
            all.extend(handle.join().unwrap());
        }

        let distinct: HashSet<u32> = all.iter().copied().collect();
        assert_eq!(all.len(), 100, "every intersection delivered");
        assert_eq!(distinct.len(), 100, "no intersection delivered twice");
    }
}
