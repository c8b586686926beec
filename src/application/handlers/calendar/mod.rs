//! Calendar query handlers.

mod get_events;

pub use get_events::{GetCalendarEventsHandler, GetCalendarEventsQuery};
