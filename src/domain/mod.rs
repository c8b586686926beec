//! Domain layer - pure business logic with no infrastructure dependencies.

pub mod calendar;
pub mod foundation;
pub mod schedule;
pub mod session;
