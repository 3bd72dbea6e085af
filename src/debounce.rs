use std::time::{Duration, Instant};

struct Pending<T> {
    token: u64,
    value: T,
    due: Instant,
}

/// Holds at most one pending value until a quiet period has elapsed since it
/// was scheduled.  Scheduling again replaces the pending value and restarts
/// the quiet period.
///
/// The debouncer never reads the clock itself: callers pass `now`, which
/// keeps it deterministic and usable from any event loop.  Two ways of
/// driving it are supported:
///
/// * polling: call [`Debouncer::poll`] with the current time; it yields the
///   value once the quiet period has elapsed.
/// * timer callbacks: arm a timer for [`Debouncer::quiet_period`] with the
///   token returned by [`Debouncer::schedule`] and call [`Debouncer::fire`]
///   from it.  A timer belonging to a replaced value fires with a stale token
///   and gets nothing.
///
/// ```rust
/// use std::time::{Duration, Instant};
/// use vault_highlight::Debouncer;
///
/// let start = Instant::now();
/// let mut debouncer = Debouncer::new(Duration::from_millis(300));
/// debouncer.schedule("fox", start);
/// debouncer.schedule("f", start + Duration::from_millis(100));
/// assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
/// assert_eq!(debouncer.poll(start + Duration::from_millis(400)), Some("f"));
/// ```
pub struct Debouncer<T> {
    quiet_period: Duration,
    pending: Option<Pending<T>>,
    last_token: u64,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_period: Duration) -> Debouncer<T> {
        Debouncer {
            quiet_period,
            pending: None,
            last_token: 0,
        }
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Replace any pending value with `value`, due one quiet period after
    /// `now`.  Returns the token identifying this scheduling.
    pub fn schedule(&mut self, value: T, now: Instant) -> u64 {
        self.last_token += 1;
        self.pending = Some(Pending {
            token: self.last_token,
            value,
            due: now + self.quiet_period,
        });
        self.last_token
    }

    /// Drop the pending value, if any, and return it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Take the pending value if its quiet period has elapsed at `now`.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.due => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value if `token` is the one returned by the latest
    /// [`Debouncer::schedule`].  Stale tokens leave the pending value alone.
    pub fn fire(&mut self, token: u64) -> Option<T> {
        match &self.pending {
            Some(p) if p.token == token => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Take the pending value regardless of the quiet period.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn value_is_released_only_after_the_quiet_period() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        assert_eq!(debouncer.poll(t0), None::<&str>);

        debouncer.schedule("fox", t0);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.due_at(), Some(t0 + ms(300)));
        assert_eq!(debouncer.poll(t0 + ms(299)), None);
        assert_eq!(debouncer.poll(t0 + ms(300)), Some("fox"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(t0 + ms(900)), None);
    }

    #[test]
    fn new_input_replaces_pending_value_and_restarts_timer() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule("fox", t0);
        debouncer.schedule("f", t0 + ms(200));

        assert_eq!(debouncer.poll(t0 + ms(300)), None);
        assert_eq!(debouncer.poll(t0 + ms(500)), Some("f"));
        assert_eq!(debouncer.poll(t0 + ms(800)), None);
    }

    #[test]
    fn stale_timer_tokens_are_ignored() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        let first = debouncer.schedule("fox".to_string(), t0);
        let second = debouncer.schedule("f".to_string(), t0 + ms(50));
        assert_ne!(first, second);

        assert_eq!(debouncer.fire(first), None);
        assert!(debouncer.is_pending());
        assert_eq!(debouncer.fire(second).as_deref(), Some("f"));
        assert_eq!(debouncer.fire(second), None);
    }

    #[test]
    fn cancel_and_flush_take_the_pending_value() {
        let t0 = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));
        debouncer.schedule(1, t0);
        assert_eq!(debouncer.cancel(), Some(1));
        assert_eq!(debouncer.cancel(), None);

        debouncer.schedule(2, t0);
        assert_eq!(debouncer.flush(), Some(2));
        assert_eq!(debouncer.due_at(), None);
    }
}
