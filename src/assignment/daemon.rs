//! Timer daemons for the daily refresh and clear.
//!
//! Each daemon runs in its own background task, sleeping until the next
//! occurrence of its configured local time and then invoking the
//! scheduler. The two are independent: a failing refresh never cancels
//! the clear, and vice versa.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Days, LocalResult, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::AssignmentScheduler;

/// Returns the next wall-clock occurrence of `at` strictly after `after`,
/// in `after`'s timezone.
///
/// A local time made nonexistent by a DST transition resolves to the same
/// time on the following day; an ambiguous local time resolves to its
/// earlier instant.
pub fn next_occurrence(after: DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let zone = after.timezone();
    let first_offset = u64::from(after.time() >= at);

    for offset in first_offset..first_offset + 3 {
        let Some(date) = after.date_naive().checked_add_days(Days::new(offset)) else {
            break;
        };
        match zone.from_local_datetime(&date.and_time(at)) {
            LocalResult::Single(next) => return next,
            LocalResult::Ambiguous(earliest, _) => return earliest,
            LocalResult::None => continue,
        }
    }
    after + TimeDelta::days(1)
}

async fn sleep_until(zone: &Tz, at: NaiveTime) {
    let now = Utc::now().with_timezone(zone);
    let next = next_occurrence(now, at);
    let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
    tokio::time::sleep(wait).await;
}

/// Background daemon that refreshes the assignment snapshot once a day.
pub struct RefreshDaemon {
    scheduler: Arc<AssignmentScheduler>,
    zone: Tz,
    at: NaiveTime,
}

impl RefreshDaemon {
    pub fn new(scheduler: Arc<AssignmentScheduler>, zone: Tz, at: NaiveTime) -> Self {
        Self {
            scheduler,
            zone,
            at,
        }
    }

    /// Runs the daemon until shutdown is signalled.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(zone = %self.zone, at = %self.at, "assignment refresh daemon starting");
        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("assignment refresh daemon shutting down");
                    break;
                }

                _ = sleep_until(&self.zone, self.at) => {
                    self.scheduler.refresh_logged();
                }
            }
        }
    }
}

/// Background daemon that clears the assignment snapshot once a day.
pub struct ClearDaemon {
    scheduler: Arc<AssignmentScheduler>,
    zone: Tz,
    at: NaiveTime,
}

impl ClearDaemon {
    pub fn new(scheduler: Arc<AssignmentScheduler>, zone: Tz, at: NaiveTime) -> Self {
        Self {
            scheduler,
            zone,
            at,
        }
    }

    /// Runs the daemon until shutdown is signalled.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(zone = %self.zone, at = %self.at, "assignment clear daemon starting");
        loop {
            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    info!("assignment clear daemon shutting down");
                    break;
                }

                _ = sleep_until(&self.zone, self.at) => {
                    self.scheduler.clear();
                }
            }
        }
    }
}
