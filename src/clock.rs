//! # Wall Clock
//!
//! The time and heartbeat commands carry the current local time of day.
//! [`Clock`] is the seam that lets tests pin that time.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Local, TimeZone, Timelike};

use crate::error::DisplayError;

/// Local time of day, one byte per field as the panel expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl WallTime {
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    pub fn from_timelike<T: Timelike>(t: &T) -> Self {
        Self {
            hour: t.hour() as u8,
            minute: t.minute() as u8,
            second: t.second() as u8,
        }
    }
}

/// Source of the current local time.
pub trait Clock {
    fn now(&self) -> Result<WallTime, DisplayError>;
}

/// The host's system clock, converted to the local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Result<WallTime, DisplayError> {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| {
                DisplayError::ClockUnavailable(format!("system time before epoch: {}", e))
            })?;

        let secs = i64::try_from(since_epoch.as_secs())
            .map_err(|_| DisplayError::ClockUnavailable("system time out of range".to_string()))?;

        let local = Local
            .timestamp_opt(secs, since_epoch.subsec_nanos())
            .single()
            .ok_or_else(|| {
                DisplayError::ClockUnavailable(format!("no unique local time for {}", secs))
            })?;

        Ok(WallTime::from_timelike(&local))
    }
}

/// A clock frozen at a fixed time, or permanently unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub Option<WallTime>);

impl FixedClock {
    pub const fn at(hour: u8, minute: u8, second: u8) -> Self {
        Self(Some(WallTime::new(hour, minute, second)))
    }

    pub const fn unavailable() -> Self {
        Self(None)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<WallTime, DisplayError> {
        self.0
            .ok_or_else(|| DisplayError::ClockUnavailable("clock is unavailable".to_string()))
    }
}
