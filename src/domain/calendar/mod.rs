//! Calendar events: the read-only projection merging class sessions with
//! quiz/assignment deadlines.

mod color;
mod event;

pub use color::EventColor;
pub use event::{CalendarEvent, EventKind};
