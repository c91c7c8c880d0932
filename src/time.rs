//! Wall-clock sampling.

use chrono::{DateTime, Local, NaiveTime, TimeZone, Timelike};

/// One reading of the wall clock on a 12-hour dial.
///
/// Fields are normalized on construction: hours wrap into `0..12`, minutes and
/// seconds are clamped to `0..60` and the sub-second fraction to `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSample {
    hours: u32,
    minutes: u32,
    seconds: u32,
    sub_second: f64,
}

impl TimeSample {
    pub fn new(hours: u32, minutes: u32, seconds: u32, sub_second: f64) -> Self {
        let sub_second = if sub_second.is_finite() {
            sub_second.clamp(0.0, MAX_FRACTION)
        } else {
            0.0
        };
        Self {
            hours: hours % 12,
            minutes: minutes.min(59),
            seconds: seconds.min(59),
            sub_second,
        }
    }

    /// Builds a sample from any time of day. Nanosecond values at or past one
    /// second (leap seconds) are folded into the last representable fraction.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        let nanos = time.nanosecond().min(999_999_999);
        Self::new(
            time.hour12().1 % 12,
            time.minute(),
            time.second(),
            f64::from(nanos) / 1_000_000_000.0,
        )
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn sub_second(&self) -> f64 {
        self.sub_second
    }
}

const MAX_FRACTION: f64 = 1.0 - f64::EPSILON;

/// Source of the current time of day
pub trait Clock {
    fn sample(&self) -> TimeSample;
}

/// Reads the host's local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn sample(&self) -> TimeSample {
        TimeSample::from_time(&Local::now())
    }
}

/// Always reports the same time. Used for tests and still renders.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: NaiveTime,
}

impl FixedClock {
    pub const fn new(time: NaiveTime) -> Self {
        Self { time }
    }

    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self::new(instant.time())
    }
}

impl Clock for FixedClock {
    fn sample(&self) -> TimeSample {
        TimeSample::from_time(&self.time)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn sample(&self) -> TimeSample {
        (**self).sample()
    }
}

/// Reads the current local wall-clock time.
pub fn sample_time() -> TimeSample {
    SystemClock.sample()
}
