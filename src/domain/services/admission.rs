//! Scheduling rules applied before an appointment is admitted.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Why a requested slot cannot be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleViolation {
    #[error("Appointment date cannot be in the past")]
    DateInPast,

    #[error("Appointment time has already passed")]
    TimeInPast,
}

/// Reject slots that lie before `now` (UTC).
///
/// A slot starting exactly at the current time-of-day is still accepted.
pub fn check_schedule(
    date: NaiveDate,
    time: NaiveTime,
    now: DateTime<Utc>,
) -> Result<(), ScheduleViolation> {
    let today = now.date_naive();

    if date < today {
        return Err(ScheduleViolation::DateInPast);
    }
    if date == today && time < now.time() {
        return Err(ScheduleViolation::TimeInPast);
    }
    Ok(())
}
