use crate::{SystemClock, TimeSource};
use portable_atomic::{AtomicU64, Ordering};
use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

/// Milliseconds elapsed since the clock was created, updated by a ticker
/// thread.
#[derive(Debug)]
struct Ticker {
    elapsed: AtomicU64,
}

/// A wall-clock anchored time source that never goes backwards.
///
/// The wall clock is read once at construction. After that, a background
/// thread advances a shared counter once per millisecond using a monotonic
/// timer (`Instant`), so readings are immune to later system clock
/// adjustments and cost a single atomic load.
///
/// Clones share the same ticker. The thread exits once the last clone is
/// dropped.
///
/// Readings may lag the real clock by up to a millisecond and drift away from
/// the wall clock over long uptimes.
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    ticker: Arc<Ticker>,
    anchor_millis: u64,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Starts a new clock anchored to the current system time.
    ///
    /// # Example
    ///
    /// ```
    /// use snowmint::{MonotonicClock, SnowflakeGenerator, DEFAULT_EPOCH};
    ///
    /// let generator = SnowflakeGenerator::with_clock(7, DEFAULT_EPOCH, MonotonicClock::new());
    /// let a = generator.next_compact();
    /// let b = generator.next_compact();
    /// assert!(a < b);
    /// ```
    pub fn new() -> Self {
        let start = Instant::now();
        let anchor_millis = SystemClock.current_millis();

        let ticker = Arc::new(Ticker {
            elapsed: AtomicU64::new(0),
        });

        let weak = Arc::downgrade(&ticker);
        thread::spawn(move || {
            let mut tick = 0;

            loop {
                // Sleep until the next whole millisecond since `start`
                let target = start + Duration::from_millis(tick);
                let now = Instant::now();
                if now < target {
                    thread::sleep(target - now);
                }

                let Some(ticker) = weak.upgrade() else {
                    break;
                };

                let now_ms = start.elapsed().as_millis() as u64;
                ticker.elapsed.store(now_ms, Ordering::Release);
                tick = now_ms + 1;
            }
        });

        Self {
            ticker,
            anchor_millis,
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.anchor_millis + self.ticker.elapsed.load(Ordering::Acquire)
    }
}
