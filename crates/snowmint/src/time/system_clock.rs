use crate::TimeSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// The standard system wall clock.
///
/// Readings follow `SystemTime::now()` and may move backwards when the
/// clock is adjusted (NTP, VM pauses, manual changes). The generator
/// absorbs such regressions by stalling until the clock catches up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn current_millis(&self) -> u64 {
        // A clock set before 1970 reads as zero.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_millis() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_unix_milliseconds() {
        let before = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();
        let ms = SystemClock.current_millis();
        let after = SystemTime::now().duration_since(UNIX_EPOCH).unwrap();

        assert!(ms >= before.as_millis() as u64);
        assert!(ms <= after.as_millis() as u64);
    }
}
