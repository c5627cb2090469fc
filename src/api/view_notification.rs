//! Debounced outbound view-changed notifications.
//!
//! The engine owns no timers. Each non-silent view commit (re)schedules one
//! pending notification due a quiet period later; the host polls and
//! forwards whatever has come due.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::TimeRange;
use crate::error::{TimelineError, TimelineResult};
use crate::render::Renderer;

use super::TimelineEngine;

pub const DEFAULT_QUIET_PERIOD_MS: f64 = 120.0;

/// Millisecond time source driving the debouncer.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        chrono::Utc::now().timestamp_millis() as f64
    }
}

/// Hand-driven clock for tests and replay. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewNotificationConfig {
    /// Off by default: the host opts in to receiving view changes.
    pub notify_view_changes: bool,
    pub quiet_period_ms: f64,
}

impl Default for ViewNotificationConfig {
    fn default() -> Self {
        Self {
            notify_view_changes: false,
            quiet_period_ms: DEFAULT_QUIET_PERIOD_MS,
        }
    }
}

impl ViewNotificationConfig {
    pub fn validate(self) -> TimelineResult<Self> {
        if !self.quiet_period_ms.is_finite() || self.quiet_period_ms < 0.0 {
            return Err(TimelineError::InvalidData(
                "notification quiet period must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendingNotification {
    pub view: TimeRange,
    pub due_at_ms: f64,
}

/// Trailing-edge debouncer holding at most one pending notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewNotifier {
    quiet_period_ms: f64,
    pending: Option<PendingNotification>,
}

impl ViewNotifier {
    #[must_use]
    pub fn new(quiet_period_ms: f64) -> Self {
        Self {
            quiet_period_ms,
            pending: None,
        }
    }

    /// Replaces any pending notification; the quiet period restarts at `now_ms`.
    pub fn schedule(&mut self, view: TimeRange, now_ms: f64) {
        self.pending = Some(PendingNotification {
            view,
            due_at_ms: now_ms + self.quiet_period_ms,
        });
    }

    /// Takes the pending notification once it is due.
    pub fn poll(&mut self, now_ms: f64) -> Option<TimeRange> {
        match self.pending {
            Some(pending) if now_ms >= pending.due_at_ms => {
                self.pending = None;
                Some(pending.view)
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingNotification> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }
}

impl<R: Renderer> TimelineEngine<R> {
    pub(super) fn schedule_view_notification(&mut self) {
        if !self.notify_view_changes || self.destroyed {
            return;
        }
        let now = self.clock.now_ms();
        let view = self.state.view().as_range();
        self.notifier.schedule(view, now);
        trace!(
            start = view.start,
            end = view.end,
            due_in_ms = self.notifier.quiet_period_ms,
            "view notification scheduled"
        );
    }

    /// Returns the debounced `{start, end}` once its quiet period has elapsed.
    pub fn poll_view_notification(&mut self) -> Option<TimeRange> {
        let delivered = self.notifier.poll(self.clock.now_ms());
        if let Some(view) = delivered {
            debug!(start = view.start, end = view.end, "view notification delivered");
        }
        delivered
    }

    #[must_use]
    pub fn pending_view_notification(&self) -> Option<PendingNotification> {
        self.notifier.pending()
    }

    #[must_use]
    pub fn notifies_view_changes(&self) -> bool {
        self.notify_view_changes
    }

    /// Turns outbound notifications on or off. Turning them off drops any pending one.
    pub fn set_notify_view_changes(&mut self, enabled: bool) {
        self.notify_view_changes = enabled;
        if !enabled {
            self.notifier.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, ViewNotifier};
    use crate::core::TimeRange;

    #[test]
    fn rapid_schedules_coalesce_into_last_view() {
        let mut notifier = ViewNotifier::new(120.0);
        notifier.schedule(TimeRange::new(0.0, 10.0), 0.0);
        notifier.schedule(TimeRange::new(5.0, 15.0), 50.0);
        assert_eq!(notifier.poll(150.0), None);
        assert_eq!(notifier.poll(170.0), Some(TimeRange::new(5.0, 15.0)));
        assert_eq!(notifier.poll(1_000.0), None);
    }

    #[test]
    fn manual_clock_clones_share_time() {
        let clock = ManualClock::new(10.0);
        let handle = clock.clone();
        handle.advance(5.0);
        assert_eq!(clock.now_ms(), 15.0);
        handle.set(100.0);
        assert_eq!(clock.now_ms(), 100.0);
    }
}
