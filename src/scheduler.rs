use std::time::{Duration, Instant};

/// Cancellable fixed-step timer driven by host-supplied timestamps.
///
/// The host calls [`TickScheduler::poll`] as often as it likes (typically
/// once per rendered frame); the scheduler answers whether a logic tick is
/// due. It never fires more than one tick per poll and does not replay
/// ticks missed while the host was stalled.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TickScheduler {
    interval: Duration,
    last_tick_at: Option<Instant>,
    next_due: Option<Instant>,
    stopped_at: Option<Instant>,
}

impl TickScheduler {
    /// Creates a stopped scheduler with the given period.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick_at: None,
            next_due: None,
            stopped_at: None,
        }
    }

    /// Starts a fresh period at `now`, discarding any paused progress.
    pub fn start(&mut self, now: Instant) {
        self.last_tick_at = Some(now);
        self.next_due = Some(now + self.interval);
        self.stopped_at = None;
    }

    /// Stops scheduling and remembers how far into the period it was.
    pub fn stop(&mut self, now: Instant) {
        if self.next_due.is_some() {
            self.stopped_at = Some(now);
        }
        self.next_due = None;
    }

    /// Continues a stopped period, excluding the stopped wall-clock time from
    /// both the next due time and the interpolation reference.
    pub fn resume(&mut self, now: Instant) {
        if self.is_running() {
            return;
        }

        let Some(stopped_at) = self.stopped_at.take() else {
            self.start(now);
            return;
        };

        let paused_for = now.saturating_duration_since(stopped_at);
        let last = self.last_tick_at.unwrap_or(stopped_at) + paused_for;
        let remaining = (last + self.interval).saturating_duration_since(now);

        self.last_tick_at = Some(last);
        self.next_due = Some(now + remaining);
    }

    /// Replaces the period and, when running, restarts the timer at `now`
    /// instead of letting the old period run out.
    pub fn reschedule(&mut self, now: Instant, interval: Duration) {
        self.interval = interval;
        if self.is_running() {
            self.next_due = Some(now + interval);
        }
    }

    /// Returns true when a tick is due at `now` and records it as fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };

        if now < due {
            return false;
        }

        self.last_tick_at = Some(now);
        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Fraction of the current period elapsed at `now`, in `[0, 1]`.
    ///
    /// Frozen at the stop time while stopped.
    #[must_use]
    pub fn alpha(&self, now: Instant) -> f32 {
        let Some(last) = self.last_tick_at else {
            return 0.0;
        };

        let reference = if self.is_running() {
            now
        } else {
            self.stopped_at.unwrap_or(now)
        };

        if self.interval.is_zero() {
            return 1.0;
        }

        let elapsed = reference.saturating_duration_since(last);
        (elapsed.as_secs_f32() / self.interval.as_secs_f32()).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
