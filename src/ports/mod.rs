//! Ports - interfaces to every external collaborator.
//!
//! The engine consumes durable storage, the room provider, the realtime
//! channel, the user directory, and the deadline-event source exclusively
//! through these traits; adapters supply the implementations.

mod calendar_reader;
mod deadline_reader;
mod directory_reader;
mod realtime_notifier;
mod room_provisioning;
mod schedule_repository;
mod session_repository;

pub use calendar_reader::{CalendarReader, DateRange, SessionCalendarRow, SessionScope};
pub use deadline_reader::{DeadlineItem, DeadlineReader, DeadlineScope, ADMIN_DEADLINE_CAP};
pub use directory_reader::DirectoryReader;
pub use realtime_notifier::{session_channel, RealtimeNotifier};
pub use room_provisioning::RoomProvisioningClient;
pub use schedule_repository::ScheduleRepository;
pub use session_repository::SessionRepository;
