//! Session lifecycle command handlers.

mod cancel_session;
mod end_session;
mod join_session;
mod start_session;
mod update_disposition;

pub use cancel_session::{CancelSessionCommand, CancelSessionHandler};
pub use end_session::{EndSessionCommand, EndSessionHandler, EndSessionResult};
pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinSessionResult};
pub use start_session::{StartSessionCommand, StartSessionHandler, StartSessionResult};
pub use update_disposition::{UpdateDispositionCommand, UpdateDispositionHandler};
