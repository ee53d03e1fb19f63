use {
    auto_impl::auto_impl,
    std::{
        sync::atomic::{AtomicI64, Ordering},
        time::{SystemTime, UNIX_EPOCH},
    },
};

/// Point in time, in seconds since the Unix epoch.
pub type Timestamp = i64;

/// Source of the current time for TTL checks.
///
/// Expiry is always evaluated lazily, at the moment a region is looked at;
/// nothing sweeps expired regions in the background.
#[auto_impl(&, Arc)]
pub trait Clock {
    /// Returns the current time.
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as Timestamp)
            .unwrap_or_default()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock(AtomicI64);

impl ManualClock {
    /// Creates a clock stopped at the given time.
    pub fn new(now: Timestamp) -> Self {
        Self(AtomicI64::new(now))
    }

    /// Moves the clock to the given time.
    pub fn set(&self, now: Timestamp) {
        self.0.store(now, Ordering::Release);
    }

    /// Moves the clock forward by `secs` seconds.
    pub fn advance(&self, secs: i64) {
        self.0.fetch_add(secs, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.0.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::Arc};

    #[test]
    fn manual_clock() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now(), 100);
        clock.advance(5);
        assert_eq!(clock.now(), 105);
        clock.set(42);
        assert_eq!(clock.now(), 42);

        // Shared handles observe the same time.
        let shared = Arc::new(clock);
        let handle = Arc::clone(&shared);
        shared.advance(1);
        assert_eq!(handle.now(), 43);
        assert_eq!((&*handle).now(), 43);
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.now() > 0);
    }
}
