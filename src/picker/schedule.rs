//! Schedule: The deceleration table that slows a run down.
//!
//! A run starts ticking at a base interval. After every tick the interval
//! grows by the increment of the band the elapsed time falls in:
//!
//! ```text
//! elapsed   0s ────── 3s ──── 4s ──── 5s ────────── 7s
//! increment     +0ms    +30ms   +50ms      +70ms
//! ```
//!
//! Band starts are stored as absolute durations but rescale
//! proportionally when the total duration changes, so a 3.5 s run slows
//! down at 1.5 s, 2 s and 2.5 s.

use crate::error::ConfigError;
use std::time::Duration;

/// Default length of a run.
pub const DEFAULT_TOTAL: Duration = Duration::from_secs(7);

/// Default interval between the first ticks.
pub const DEFAULT_BASE_INTERVAL: Duration = Duration::from_millis(50);

/// One row of the deceleration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// The band applies once elapsed time is strictly greater than this.
    pub after: Duration,
    /// Amount added to the interval after each tick in this band.
    pub increment: Duration,
}

impl Band {
    /// Create a band.
    pub const fn new(after: Duration, increment: Duration) -> Self {
        Self { after, increment }
    }
}

/// Timing of a run: total length, starting interval and deceleration bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    total: Duration,
    base_interval: Duration,
    bands: Vec<Band>,
}

impl Schedule {
    /// The default schedule rescaled to `total`.
    pub fn new(total: Duration) -> Self {
        Self::default().with_total(total)
    }

    /// Change the total duration, rescaling every band start in proportion.
    #[must_use]
    pub fn with_total(mut self, total: Duration) -> Self {
        let old = self.total.as_nanos();
        if old != 0 {
            let new = total.as_nanos();
            for band in &mut self.bands {
                band.after = nanos(band.after.as_nanos() * new / old);
            }
        }
        self.total = total;
        self
    }

    /// Change the base interval.
    #[must_use]
    pub fn with_base_interval(mut self, base_interval: Duration) -> Self {
        self.base_interval = base_interval;
        self
    }

    /// Replace the bands. They are expected in increasing `after` order;
    /// see [`Schedule::validate`].
    #[must_use]
    pub fn with_bands(mut self, bands: impl Into<Vec<Band>>) -> Self {
        self.bands = bands.into();
        self
    }

    /// Total run length.
    #[inline]
    pub const fn total(&self) -> Duration {
        self.total
    }

    /// Interval between the first ticks.
    #[inline]
    pub const fn base_interval(&self) -> Duration {
        self.base_interval
    }

    /// The deceleration bands.
    #[inline]
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Check that the schedule can drive a run.
    ///
    /// # Errors
    ///
    /// Returns an error if the total or base interval is zero, or if bands
    /// are out of order, start at or past the total, or have decreasing
    /// increments.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }
        if self.base_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        let in_range = self.bands.iter().all(|b| b.after < self.total);
        let ordered = self
            .bands
            .windows(2)
            .all(|w| w[0].after < w[1].after && w[0].increment <= w[1].increment);
        if !(in_range && ordered) {
            return Err(ConfigError::BandOrder);
        }
        Ok(())
    }

    /// Increment applied after a tick that ends at `elapsed`.
    pub fn increment_at(&self, elapsed: Duration) -> Duration {
        self.bands
            .iter()
            .rev()
            .find(|band| elapsed > band.after)
            .map_or(Duration::ZERO, |band| band.increment)
    }

    /// The sleep intervals of a run on a clock where ticks take no time.
    ///
    /// The sum of the returned intervals is at least the total and exceeds
    /// it by less than the last interval.
    pub fn simulate(&self) -> Vec<Duration> {
        let mut intervals = Vec::new();
        if self.base_interval.is_zero() {
            return intervals;
        }

        let mut elapsed = Duration::ZERO;
        let mut interval = self.base_interval;
        while elapsed < self.total {
            intervals.push(interval);
            elapsed += interval;
            interval += self.increment_at(elapsed);
        }
        intervals
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            total: DEFAULT_TOTAL,
            base_interval: DEFAULT_BASE_INTERVAL,
            bands: vec![
                Band::new(Duration::from_secs(3), Duration::from_millis(30)),
                Band::new(Duration::from_secs(4), Duration::from_millis(50)),
                Band::new(Duration::from_secs(5), Duration::from_millis(70)),
            ],
        }
    }
}

/// Build a duration from a nanosecond count, saturating at `u64::MAX` ns.
#[allow(clippy::cast_possible_truncation)]
fn nanos(n: u128) -> Duration {
    Duration::from_nanos(n.min(u128::from(u64::MAX)) as u64)
}
