//! PostgreSQL adapters - database implementations of the storage ports.

mod calendar_reader;
mod deadline_reader;
mod directory_reader;
mod schedule_repository;
mod session_repository;

pub use calendar_reader::PostgresCalendarReader;
pub use deadline_reader::PostgresDeadlineReader;
pub use directory_reader::PostgresDirectoryReader;
pub use schedule_repository::PostgresScheduleRepository;
pub use session_repository::PostgresSessionRepository;

use chrono::Weekday;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Weekday column encoding: 0 = Sunday through 6 = Saturday.
pub(crate) fn weekday_to_i16(day: Weekday) -> i16 {
    day.num_days_from_sunday() as i16
}

pub(crate) fn weekday_from_i16(value: i16) -> Result<Weekday, DomainError> {
    Ok(match value {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        6 => Weekday::Sat,
        other => {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid weekday value in database: {}", other),
            ))
        }
    })
}
