//!
//! Mockable wall clock
//!
//! Reads go through a thread-local clock so tests can move time around without sleeping
//!

use arc_swap::ArcSwap;
use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::{Duration, SystemTime},
};

thread_local! {
    static THREAD_CLOCK: ArcSwap<Clock> = ArcSwap::new(Arc::new(Clock::default()));
}

#[inline]
fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

/// Handle to move a mocked clock
#[derive(Clone, Debug)]
pub struct MockHandle {
    offset: Arc<AtomicI64>,
}

impl MockHandle {
    /// Move the clock forward
    pub fn advance(&self, by: Duration) {
        self.offset.fetch_add(duration_millis(by), Ordering::AcqRel);
    }

    /// Move the clock backwards
    pub fn rewind(&self, by: Duration) {
        self.offset.fetch_sub(duration_millis(by), Ordering::AcqRel);
    }

    /// Set the offset from the system clock in milliseconds
    pub fn set_offset(&self, millis: i64) {
        self.offset.store(millis, Ordering::Release);
    }
}

/// Guard which will reinstall the previous thread-local clock upon drop
#[derive(Debug)]
pub struct ClockGuard {
    old_clock: Arc<Clock>,
}

impl Drop for ClockGuard {
    fn drop(&mut self) {
        THREAD_CLOCK.with(|clock| clock.store(Arc::clone(&self.old_clock)));
    }
}

/// Wall clock with an optional offset
#[derive(Clone, Debug, Default)]
pub struct Clock {
    offset: Option<Arc<AtomicI64>>,
}

impl Clock {
    /// Construct a clock that reads the system time as-is
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a mockable clock and the handle to move it
    #[must_use]
    pub fn mockable() -> (Self, MockHandle) {
        let offset = Arc::new(AtomicI64::default());
        let handle = MockHandle {
            offset: Arc::clone(&offset),
        };

        (
            Self {
                offset: Some(offset),
            },
            handle,
        )
    }

    /// Install this clock for the current thread
    ///
    /// As long as the guard is kept alive, [`now_millis`] reads this clock
    #[must_use]
    pub fn enter(&self) -> ClockGuard {
        let old_clock = THREAD_CLOCK.with(|clock| clock.swap(Arc::new(self.clone())));
        ClockGuard { old_clock }
    }

    /// Milliseconds since the Unix epoch, offset applied
    ///
    /// Saturates at zero for times before the epoch
    #[must_use]
    pub fn now_millis(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map_or(0, |since_epoch| {
                u64::try_from(since_epoch.as_millis()).unwrap_or(u64::MAX)
            });

        match self.offset {
            Some(ref offset) => now.saturating_add_signed(offset.load(Ordering::Acquire)),
            None => now,
        }
    }
}

/// Milliseconds since the Unix epoch, read from the thread-local clock
#[must_use]
pub fn now_millis() -> u64 {
    THREAD_CLOCK.with(|clock| clock.load().now_millis())
}

#[cfg(test)]
mod test {
    use super::Clock;
    use std::time::Duration;

    #[test]
    fn can_advance() {
        let (clock, mock) = Clock::mockable();
        let _guard = clock.enter();

        let before = super::now_millis();
        mock.advance(Duration::from_secs(60));
        let after = super::now_millis();

        assert!((60_000..61_000).contains(&(after - before)));
    }

    #[test]
    fn can_rewind() {
        let (clock, mock) = Clock::mockable();
        let _guard = clock.enter();

        let before = super::now_millis();
        mock.rewind(Duration::from_secs(60));
        let after = super::now_millis();

        assert!((59_000..=60_000).contains(&(before - after)));
    }

    #[test]
    fn guard_restores_clock() {
        let (clock, mock) = Clock::mockable();
        mock.advance(Duration::from_secs(3600));

        {
            let _guard = clock.enter();
            assert!(super::now_millis() > Clock::new().now_millis() + 3_000_000);
        }

        assert!(super::now_millis() < Clock::new().now_millis() + 3_000_000);
    }
}
