//! Command and query handlers, one file per operation.

pub mod calendar;
pub mod schedule;
pub mod session;

#[cfg(test)]
pub(crate) mod support;
