//! Debounced calls driven by explicit page time.
//!
//! Every call re-arms a `wait` timer. In leading mode (`immediate = true`)
//! a call runs only when no timer is armed, so the first event of a burst
//! fires and the rest are swallowed until the burst has been quiet for
//! `wait`. In trailing mode the latest arguments run once the timer expires,
//! which the host observes by calling `tick`.
//!
//! [`DebounceTimer`] only decides *when*: it hands back the arguments that
//! should run. [`Debounced`] pairs a timer with the function to run, for
//! callers that own their handler outright.

use std::time::Duration;

/// Wrap `func` in a debouncer.
pub fn debounce<A, F>(func: F, wait: Duration, immediate: bool) -> Debounced<A, F>
where
    F: FnMut(A),
{
    Debounced {
        func,
        timer: DebounceTimer::new(wait, immediate),
    }
}

// ============================================================================
// Timer
// ============================================================================

/// Debounce timing state without an attached function.
#[derive(Debug, Clone)]
pub struct DebounceTimer<A> {
    wait: Duration,
    immediate: bool,
    /// Expiry of the armed timer, `None` when idle.
    deadline: Option<Duration>,
    /// Arguments held for a trailing call.
    pending: Option<A>,
}

impl<A> DebounceTimer<A> {
    pub const fn new(wait: Duration, immediate: bool) -> Self {
        Self {
            wait,
            immediate,
            deadline: None,
            pending: None,
        }
    }

    /// Register a call at `now`.
    ///
    /// Returns the arguments to run right away, if any. A trailing call
    /// whose timer already expired takes precedence over a leading one.
    pub fn call(&mut self, now: Duration, args: A) -> Option<A> {
        let expired = self.tick(now);

        let call_now = self.immediate && self.deadline.is_none();
        self.deadline = Some(now + self.wait);

        if call_now {
            return Some(args);
        }
        if !self.immediate {
            self.pending = Some(args);
        }
        expired
    }

    /// Advance to `now`, returning trailing arguments whose timer expired.
    pub fn tick(&mut self, now: Duration) -> Option<A> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                self.pending.take()
            }
            _ => None,
        }
    }

    /// Whether a timer is currently armed.
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

// ============================================================================
// Function + Timer
// ============================================================================

/// A debounced function together with its timer state.
pub struct Debounced<A, F> {
    func: F,
    timer: DebounceTimer<A>,
}

impl<A, F> Debounced<A, F>
where
    F: FnMut(A),
{
    /// Register a call at `now`. Returns `true` if `func` ran.
    pub fn call(&mut self, now: Duration, args: A) -> bool {
        // In trailing mode an expired timer is flushed before re-arming.
        if let Some(expired) = self.timer.tick(now) {
            (self.func)(expired);
        }
        match self.timer.call(now, args) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    /// Advance the timer to `now`. Returns `true` if a trailing call ran.
    pub fn tick(&mut self, now: Duration) -> bool {
        match self.timer.tick(now) {
            Some(args) => {
                (self.func)(args);
                true
            }
            None => false,
        }
    }

    pub const fn is_armed(&self) -> bool {
        self.timer.is_armed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_leading_fires_first_event_only() {
        let mut calls = Vec::new();
        let mut d = debounce(|x: u32| calls.push(x), ms(10), true);

        assert!(d.call(ms(0), 1));
        assert!(!d.call(ms(4), 2));
        assert!(!d.call(ms(9), 3));
        drop(d);

        assert_eq!(calls, vec![1]);
    }

    #[test]
    fn test_leading_rearms_on_every_call() {
        let mut calls = Vec::new();
        let mut d = debounce(|x: u32| calls.push(x), ms(10), true);

        d.call(ms(0), 1);
        // Each call pushes the deadline out, so 15ms is still inside the burst.
        d.call(ms(8), 2);
        d.call(ms(15), 3);
        // Quiet since 15, expired at 25.
        d.call(ms(25), 4);
        drop(d);

        assert_eq!(calls, vec![1, 4]);
    }

    #[test]
    fn test_leading_never_fires_trailing() {
        let mut count = 0;
        let mut d = debounce(|_: ()| count += 1, ms(10), true);

        d.call(ms(0), ());
        d.call(ms(5), ());
        assert!(!d.tick(ms(100)));
        assert!(!d.is_armed());
        drop(d);

        assert_eq!(count, 1);
    }

    #[test]
    fn test_trailing_fires_latest_args_after_quiet_gap() {
        let mut calls = Vec::new();
        let mut d = debounce(|x: u32| calls.push(x), ms(10), false);

        assert!(!d.call(ms(0), 1));
        assert!(!d.call(ms(5), 2));
        assert!(!d.tick(ms(14)));
        assert!(d.tick(ms(15)));
        assert!(!d.tick(ms(30)));
        drop(d);

        assert_eq!(calls, vec![2]);
    }

    #[test]
    fn test_trailing_expired_timer_flushes_before_new_call() {
        let mut calls = Vec::new();
        let mut d = debounce(|x: u32| calls.push(x), ms(10), false);

        d.call(ms(0), 1);
        // No tick in between: the expired call is flushed by the next one.
        assert!(!d.call(ms(50), 2));
        d.tick(ms(60));
        drop(d);

        assert_eq!(calls, vec![1, 2]);
    }

    #[test]
    fn test_timer_hands_back_leading_args() {
        let mut timer = DebounceTimer::new(ms(10), true);

        assert_eq!(timer.call(ms(0), 500.0), Some(500.0));
        assert_eq!(timer.call(ms(3), 520.0), None);
        assert!(timer.is_armed());
        assert_eq!(timer.tick(ms(13)), None);
        assert!(!timer.is_armed());
        assert_eq!(timer.call(ms(40), 900.0), Some(900.0));
    }
}
