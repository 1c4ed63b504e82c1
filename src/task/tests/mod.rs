//! Unit tests for the task module.
//!
//! Tests are organised by layer: value and aggregate rules, list query
//! evaluation, and service orchestration against in-memory and mocked
//! repositories.


use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::MockClock;
use std::sync::{Arc, Mutex};

/// Mock clock that starts at `start` and advances one second per UTC read.
fn step_clock(start: DateTime<Utc>) -> MockClock {
    let now = Arc::new(Mutex::new(start));
    let local_now = Arc::clone(&now);
    let mut clock = MockClock::new();
    clock.expect_utc().returning(move || {
        let mut current = now.lock().expect("clock lock");
        let read = *current;
        *current = read + Duration::seconds(1);
        read
    });
    clock
        .expect_local()
        .returning(move || local_now.lock().expect("clock lock").with_timezone(&Local));
    clock
}

/// Step clock starting at 2026-01-01 09:00 UTC.
pub(super) fn epoch_clock() -> MockClock {
    step_clock(
        Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
            .single()
            .expect("valid start instant"),
    )
}
