//! Unit tests for the board client.


use crate::task::domain::{
    PersistedTaskData, Priority, Subject, Task, TaskId, TaskOrder, TaskStatus,
};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use mockable::MockClock;

/// Mock clock frozen at a wall-clock time in the local zone, so reminder
/// checks do not depend on where the tests run.
pub(super) fn clock_at(hour: u32, minute: u32) -> MockClock {
    let wall = NaiveDate::from_ymd_opt(2026, 3, 2)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .expect("valid wall-clock time");
    let local = Local
        .from_local_datetime(&wall)
        .earliest()
        .expect("wall-clock time exists locally");
    let mut clock = MockClock::new();
    clock.expect_local().returning(move || local);
    clock
        .expect_utc()
        .returning(move || local.with_timezone(&Utc));
    clock
}

pub(super) fn noon() -> MockClock {
    clock_at(12, 0)
}

pub(super) fn task(title: &str, status: TaskStatus) -> Task {
    let at = Utc
        .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid instant");
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: title.to_owned(),
        description: title.to_owned(),
        completed: status.is_completed(),
        priority: Priority::Medium,
        due_date: None,
        category: "general".to_owned(),
        subject: Subject::General,
        status,
        order: TaskOrder::default(),
        created_at: at,
        updated_at: at,
    })
}
