//! # Process Clock
//!
//! The source of "now" for value types that need it.
//!
//! A [`ClockSlot`] holds at most one [`TimeSource`]. The process-wide slot is
//! reached through [`process_clock`]; tests build their own `ClockSlot` so
//! they never share state.
//!
//! ## Slot States
//!
//! | State | Reached by | `install` / `remove` |
//! |-------|------------|----------------------|
//! | `Uninitialized` | start, `remove` | allowed |
//! | `Replaceable` | `install` | allowed |
//! | `Locked` | first `get_instance` on an empty slot | `ConfigurationConflict` |
//!
//! Only the automatic installation of [`SystemClock`] locks the slot.
//! Installing a source explicitly leaves it replaceable, and reading an
//! explicitly installed source does not lock it either.

use crate::FacetworkError;
use chrono::{DateTime, Local, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// =============================================================================
// TIME SOURCES
// =============================================================================

/// Something that can tell the time.
pub trait TimeSource: Send + Sync + fmt::Debug {
    /// Milliseconds since midnight, January 1, 1970 UTC.
    fn time(&self) -> i64;
}

/// The operating system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn time(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A settable clock for fixtures and tests.
#[derive(Debug, Default)]
pub struct FixtureClock {
    millis: AtomicI64,
}

impl FixtureClock {
    /// Create a fixture clock reading `millis`.
    #[must_use]
    pub fn new(millis: i64) -> Self {
        Self {
            millis: AtomicI64::new(millis),
        }
    }

    /// Create a fixture clock and install it into `slot`.
    ///
    /// Fails with `ConfigurationConflict` if the slot is locked.
    pub fn install(slot: &ClockSlot, millis: i64) -> Result<Arc<Self>, FacetworkError> {
        let clock = Arc::new(Self::new(millis));
        slot.install(clock.clone())?;
        Ok(clock)
    }

    /// Set the time.
    pub fn set_time(&self, millis: i64) {
        self.millis.store(millis, Ordering::SeqCst);
    }

    /// Set the time to midnight UTC of the given date.
    pub fn set_date(&self, year: i32, month: u32, day: u32) -> Result<(), FacetworkError> {
        let midnight = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .ok_or_else(|| {
                FacetworkError::InvalidArgument(format!(
                    "invalid date {:04}-{:02}-{:02}",
                    year, month, day
                ))
            })?;
        self.set_time(midnight.and_utc().timestamp_millis());
        Ok(())
    }

    /// Move the time forward (or back, with negative values).
    ///
    /// Fails with `InvalidArgument` if the offset or the result is out of
    /// range; the time is left unchanged.
    pub fn add_time(&self, hours: i64, minutes: i64) -> Result<(), FacetworkError> {
        let delta = TimeDelta::try_hours(hours)
            .zip(TimeDelta::try_minutes(minutes))
            .and_then(|(h, m)| h.checked_add(&m))
            .ok_or_else(|| {
                FacetworkError::InvalidArgument(format!(
                    "offset of {}h{}m is out of range",
                    hours, minutes
                ))
            })?;
        self.shift(delta)
    }

    /// Move the time forward by whole days.
    ///
    /// Fails with `InvalidArgument` if the offset or the result is out of
    /// range; the time is left unchanged.
    pub fn add_days(&self, days: i64) -> Result<(), FacetworkError> {
        let delta = TimeDelta::try_days(days).ok_or_else(|| {
            FacetworkError::InvalidArgument(format!("offset of {} days is out of range", days))
        })?;
        self.shift(delta)
    }

    fn shift(&self, delta: TimeDelta) -> Result<(), FacetworkError> {
        let offset = delta.num_milliseconds();
        self.millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(offset)
            })
            .map(|_| ())
            .map_err(|current| {
                FacetworkError::InvalidArgument(format!(
                    "time {} ms shifted by {} ms overflows",
                    current, offset
                ))
            })
    }
}

impl TimeSource for FixtureClock {
    fn time(&self) -> i64 {
        self.millis.load(Ordering::SeqCst)
    }
}

// =============================================================================
// CLOCK SLOT
// =============================================================================

/// Observable state of a [`ClockSlot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockState {
    /// No time source installed.
    Uninitialized,
    /// A time source is installed and may still be replaced or removed.
    Replaceable,
    /// The default time source was installed on first read; terminal.
    Locked,
}

impl fmt::Display for ClockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockState::Uninitialized => f.write_str("uninitialized"),
            ClockState::Replaceable => f.write_str("replaceable"),
            ClockState::Locked => f.write_str("locked"),
        }
    }
}

#[derive(Debug)]
struct SlotState {
    instance: Option<Arc<dyn TimeSource>>,
    replaceable: bool,
}

impl SlotState {
    fn ensure_replaceable(&self) -> Result<(), FacetworkError> {
        if !self.replaceable && self.instance.is_some() {
            return Err(FacetworkError::ConfigurationConflict(
                "clock already set up".to_string(),
            ));
        }
        Ok(())
    }
}

/// A cell holding the current time source.
///
/// Every transition happens under one mutex, so concurrent first reads
/// install exactly one default source.
#[derive(Debug)]
pub struct ClockSlot {
    state: Mutex<SlotState>,
}

impl Default for ClockSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSlot {
    /// Create an empty, replaceable slot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                instance: None,
                replaceable: true,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The installed time source.
    ///
    /// If none is installed, installs [`SystemClock`] and locks the slot.
    pub fn get_instance(&self) -> Arc<dyn TimeSource> {
        let mut state = self.lock();
        match &state.instance {
            Some(instance) => Arc::clone(instance),
            None => {
                let instance: Arc<dyn TimeSource> = Arc::new(SystemClock);
                state.instance = Some(Arc::clone(&instance));
                state.replaceable = false;
                tracing::info!("system clock installed; clock slot locked");
                instance
            }
        }
    }

    /// Check if a time source is installed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.lock().instance.is_some()
    }

    /// Current state of the slot.
    #[must_use]
    pub fn state(&self) -> ClockState {
        let state = self.lock();
        match (&state.instance, state.replaceable) {
            (None, _) => ClockState::Uninitialized,
            (Some(_), true) => ClockState::Replaceable,
            (Some(_), false) => ClockState::Locked,
        }
    }

    /// Install a time source, replacing any current one.
    ///
    /// Fails with `ConfigurationConflict` if the slot is locked. Does not
    /// lock the slot.
    pub fn install(&self, source: Arc<dyn TimeSource>) -> Result<(), FacetworkError> {
        let mut state = self.lock();
        if let Err(e) = state.ensure_replaceable() {
            tracing::warn!(source = ?source, "refusing to replace locked clock");
            return Err(e);
        }
        let replaced = state.instance.replace(source).is_some();
        tracing::info!(replaced, "clock installed");
        Ok(())
    }

    /// Remove the installed time source.
    ///
    /// Returns whether one was installed. Fails with `ConfigurationConflict`
    /// if the slot is locked.
    pub fn remove(&self) -> Result<bool, FacetworkError> {
        let mut state = self.lock();
        state.ensure_replaceable()?;
        let removed = state.instance.take().is_some();
        if removed {
            tracing::debug!("clock removed");
        }
        Ok(removed)
    }

    /// Milliseconds since the epoch, from the installed time source.
    pub fn time(&self) -> i64 {
        self.get_instance().time()
    }

    /// The current time in the local time zone.
    pub fn time_as_calendar(&self) -> Result<DateTime<Local>, FacetworkError> {
        let millis = self.time();
        DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|utc| utc.with_timezone(&Local))
            .ok_or_else(|| {
                FacetworkError::InvalidArgument(format!("time {} ms is out of range", millis))
            })
    }
}

// =============================================================================
// PROCESS-WIDE SLOT
// =============================================================================

static PROCESS_CLOCK: ClockSlot = ClockSlot::new();

/// The process-wide clock slot.
#[must_use]
pub fn process_clock() -> &'static ClockSlot {
    &PROCESS_CLOCK
}

/// Milliseconds since the epoch from the process clock.
pub fn get_time() -> i64 {
    PROCESS_CLOCK.time()
}

/// The process clock time in the local time zone.
pub fn get_time_as_calendar() -> Result<DateTime<Local>, FacetworkError> {
    PROCESS_CLOCK.time_as_calendar()
}

/// Check if the process clock has a time source.
#[must_use]
pub fn is_initialized() -> bool {
    PROCESS_CLOCK.is_initialized()
}

// =============================================================================
// TESTS
// =============================================================================
