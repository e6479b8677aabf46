use core::fmt;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    CompactId, DEFAULT_EPOCH, ExtendedId, Radix, RadixExt, Result, SnowflakeId, SystemClock,
    TimeSource,
    generator::mutex::{Mutex, lock},
};

/// The mutable part of a generator, guarded by its mutex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct State {
    /// Wall-clock millisecond (not epoch-relative) of the last issued ID.
    pub(crate) last_timestamp: u64,
    /// Sequence value of the last issued ID.
    pub(crate) sequence: u64,
}

/// A lock-based Snowflake ID generator for one logical node.
///
/// One instance produces both [`CompactId`] (64-bit) and [`ExtendedId`]
/// (128-bit) identifiers from a single shared state. Every call runs the
/// whole read-check-increment-commit sequence under one mutex, so the IDs
/// handed out are strictly increasing in the order callers acquire the lock,
/// for every width, no matter how many threads share the generator.
///
/// Production never fails:
/// - If the clock reads earlier than the last issued timestamp, the caller
///   busy-waits (yielding to the scheduler) until it catches up.
/// - If the sequence space of the current millisecond is exhausted, the
///   caller busy-waits for the next millisecond.
///
/// Both waits hold the lock and have no timeout, so a stalled clock delays
/// every caller.
///
/// ## Caveats
///
/// - `node_id` is masked to the width of each layout's node field and never
///   validated. Callers must pick a node ID that fits.
/// - An epoch later than the current time yields wrapped timestamp fields.
///
/// ## Example
///
/// ```
/// use snowmint::SnowflakeGenerator;
///
/// let generator = SnowflakeGenerator::new(1981);
///
/// let a = generator.id64();
/// let b = generator.id64();
/// assert!(a < b);
///
/// let c = generator.id128();
/// let d = generator.id128();
/// assert!(c < d);
/// ```
pub struct SnowflakeGenerator<T = SystemClock>
where
    T: TimeSource,
{
    #[cfg(feature = "cache-padded")]
    pub(crate) state: crossbeam_utils::CachePadded<Mutex<State>>,
    #[cfg(not(feature = "cache-padded"))]
    pub(crate) state: Mutex<State>,
    node_id: u64,
    epoch: u64,
    clock: T,
}

impl SnowflakeGenerator<SystemClock> {
    /// Creates a generator for `node_id` using [`DEFAULT_EPOCH`] and the
    /// system clock.
    pub fn new(node_id: u64) -> Self {
        Self::with_epoch(node_id, DEFAULT_EPOCH)
    }

    /// Creates a generator for `node_id` whose timestamps count from `epoch`
    /// (measured from 1970-01-01 UTC), using the system clock.
    ///
    /// `epoch` must not be in the future; see the type-level caveats. An
    /// epoch wider than `u64::MAX` milliseconds saturates.
    pub fn with_epoch(node_id: u64, epoch: Duration) -> Self {
        Self::with_clock(node_id, epoch, SystemClock)
    }
}

impl<T> SnowflakeGenerator<T>
where
    T: TimeSource,
{
    /// Creates a generator reading time from `clock`.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    /// use snowmint::{SnowflakeGenerator, TimeSource};
    ///
    /// struct FixedTime;
    /// impl TimeSource for FixedTime {
    ///     fn current_millis(&self) -> u64 {
    ///         1_000
    ///     }
    /// }
    ///
    /// let generator = SnowflakeGenerator::with_clock(3, Duration::from_millis(400), FixedTime);
    /// let id = generator.next_compact();
    /// assert_eq!(id.timestamp(), 600);
    /// assert_eq!(id.node_id(), 3);
    /// assert_eq!(id.sequence(), 0);
    /// ```
    pub fn with_clock(node_id: u64, epoch: Duration, clock: T) -> Self {
        Self {
            #[cfg(feature = "cache-padded")]
            state: crossbeam_utils::CachePadded::new(Mutex::new(State::default())),
            #[cfg(not(feature = "cache-padded"))]
            state: Mutex::new(State::default()),
            node_id,
            epoch: u64::try_from(epoch.as_millis()).unwrap_or(u64::MAX),
            clock,
        }
    }

    /// The node ID as supplied at construction, before any masking.
    pub const fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The epoch timestamps are measured from.
    pub const fn epoch(&self) -> Duration {
        Duration::from_millis(self.epoch)
    }

    /// The underlying time source.
    pub const fn clock(&self) -> &T {
        &self.clock
    }

    pub(crate) fn state(&self) -> &Mutex<State> {
        &self.state
    }

    /// Generates the next ID for the layout `ID`.
    ///
    /// Blocks (busy-waiting) while the clock is behind the last issued
    /// timestamp or while the current millisecond has no sequence room left.
    ///
    /// # Example
    ///
    /// ```
    /// use snowmint::{ExtendedId, SnowflakeGenerator};
    ///
    /// let generator = SnowflakeGenerator::new(0xABCD);
    /// let id: ExtendedId = generator.next_id();
    /// assert_eq!(id.node_id(), 0xABCD);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn next_id<ID>(&self) -> ID
    where
        ID: SnowflakeId,
    {
        let mut state = lock(self.state());
        let mut now = self.clock.current_millis();

        let sequence = loop {
            if now < state.last_timestamp {
                now = self.cold_clock_behind(now, state.last_timestamp);
            }

            if now > state.last_timestamp {
                break 0;
            }

            match state.sequence.checked_add(1) {
                Some(next) if next <= ID::max_sequence() => break next,
                _ => {
                    state.sequence = 0;
                    now = self.cold_sequence_exhausted(now);
                }
            }
        };

        state.last_timestamp = now;
        state.sequence = sequence;

        ID::from_components(now.wrapping_sub(self.epoch), self.node_id, sequence)
    }

    /// Generates the next 64-bit ID.
    pub fn next_compact(&self) -> CompactId {
        self.next_id()
    }

    /// Generates the next 128-bit ID.
    pub fn next_extended(&self) -> ExtendedId {
        self.next_id()
    }

    /// Generates the next 64-bit ID as a raw integer.
    pub fn id64(&self) -> u64 {
        self.next_compact().to_raw()
    }

    /// Generates the next 128-bit ID as a raw integer.
    pub fn id128(&self) -> u128 {
        self.next_extended().to_raw()
    }

    /// Returns the wall-clock instant embedded in `id`.
    ///
    /// Only reads the epoch, so it never contends with production. The ID
    /// must come from a generator with the same epoch; a mismatch silently
    /// yields a wrong instant.
    ///
    /// Instants past `u64::MAX` milliseconds, or past the latest
    /// `SystemTime` the platform can represent, saturate to that limit.
    pub fn extract_time<ID>(&self, id: &ID) -> SystemTime
    where
        ID: SnowflakeId,
    {
        let millis = id.timestamp().saturating_add(self.epoch);
        UNIX_EPOCH
            .checked_add(Duration::from_millis(millis))
            .unwrap_or_else(|| cold_latest_instant(millis))
    }

    /// Returns the instant embedded in a raw 64-bit ID.
    pub fn extract_time_64(&self, raw: u64) -> SystemTime {
        self.extract_time(&CompactId::from_raw(raw))
    }

    /// Returns the instant embedded in a raw 128-bit ID.
    pub fn extract_time_128(&self, raw: u128) -> SystemTime {
        self.extract_time(&ExtendedId::from_raw(raw))
    }

    /// Parses `text` in `radix` as an `ID` and returns its embedded instant.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `text` is empty, contains a character
    /// that is not a digit of `radix`, or does not fit the layout's width.
    ///
    /// [`Error::Parse`]: crate::Error::Parse
    pub fn extract_time_str<ID>(&self, text: &str, radix: Radix) -> Result<SystemTime>
    where
        ID: SnowflakeId,
    {
        let id = ID::decode(text, radix)?;
        Ok(self.extract_time(&id))
    }

    /// Parses a 64-bit ID from `text` and returns its embedded instant.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::extract_time_str`].
    pub fn extract_time_64_str(&self, text: &str, radix: Radix) -> Result<SystemTime> {
        self.extract_time_str::<CompactId>(text, radix)
    }

    /// Parses a 128-bit ID from `text` and returns its embedded instant.
    ///
    /// # Errors
    ///
    /// See [`SnowflakeGenerator::extract_time_str`].
    pub fn extract_time_128_str(&self, text: &str, radix: Radix) -> Result<SystemTime> {
        self.extract_time_str::<ExtendedId>(text, radix)
    }

    /// Polls the clock, yielding between reads, until it reaches `target`.
    fn wait_until(&self, target: u64) -> u64 {
        loop {
            let now = self.clock.current_millis();
            if now >= target {
                return now;
            }
            std::thread::yield_now();
        }
    }

    #[cold]
    #[inline(never)]
    fn cold_clock_behind(&self, _now: u64, last_timestamp: u64) -> u64 {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            behind_ms = last_timestamp - _now,
            "clock moved backwards, stalling until it catches up"
        );
        self.wait_until(last_timestamp)
    }

    #[cold]
    #[inline(never)]
    fn cold_sequence_exhausted(&self, now: u64) -> u64 {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            timestamp = now,
            "sequence exhausted, waiting for the next millisecond"
        );
        self.wait_until(now.saturating_add(1))
    }
}

/// Latest instant at or below `UNIX_EPOCH + millis` that `SystemTime` can
/// hold.
#[cold]
#[inline(never)]
fn cold_latest_instant(millis: u64) -> SystemTime {
    let (mut low, mut high) = (0, millis);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if UNIX_EPOCH.checked_add(Duration::from_millis(mid)).is_some() {
            low = mid;
        } else {
            high = mid - 1;
        }
    }
    UNIX_EPOCH + Duration::from_millis(low)
}

impl<T> fmt::Debug for SnowflakeGenerator<T>
where
    T: TimeSource,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeGenerator")
            .field("node_id", &self.node_id)
            .field("epoch", &self.epoch)
            .finish_non_exhaustive()
    }
}
