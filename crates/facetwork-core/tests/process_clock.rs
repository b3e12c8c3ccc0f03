//! # Process Clock Test
//!
//! Exercises the process-wide slot. This file is its own test binary and
//! holds a single test, so no other test can touch the slot first.

use facetwork_core::clock::{self, get_time, get_time_as_calendar, process_clock};
use facetwork_core::{ClockState, FacetworkError, FixtureClock};
use std::sync::Arc;

#[test]
fn process_clock_locks_on_first_default_read() {
    let slot = process_clock();
    assert!(!clock::is_initialized());
    assert_eq!(slot.state(), ClockState::Uninitialized);

    // A fixture installed up front is used and can be withdrawn again.
    let fixture = FixtureClock::install(slot, 1_000).expect("install fixture");
    assert_eq!(get_time(), 1_000);
    fixture.add_days(1).expect("add days");
    assert_eq!(get_time(), 1_000 + 86_400_000);
    assert_eq!(slot.state(), ClockState::Replaceable);
    assert!(slot.remove().expect("remove fixture"));
    assert!(!clock::is_initialized());

    // First read of an empty slot installs the system clock and locks it.
    let first = slot.get_instance();
    assert!(clock::is_initialized());
    assert_eq!(slot.state(), ClockState::Locked);
    assert!(Arc::ptr_eq(&first, &slot.get_instance()));
    assert!(get_time() > 1_600_000_000_000);
    assert!(get_time_as_calendar().is_ok());

    assert!(matches!(
        FixtureClock::install(slot, 0),
        Err(FacetworkError::ConfigurationConflict(_))
    ));
    assert!(matches!(
        slot.remove(),
        Err(FacetworkError::ConfigurationConflict(_))
    ));
}
