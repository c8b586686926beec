//! HTTP middleware and extractors.

mod auth;

pub use auth::AuthUser;
