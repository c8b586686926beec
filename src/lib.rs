//! Classhive - Multi-Role Tutoring Platform Backend
//!
//! This crate implements the class scheduling and live session engine:
//! recurring-class expansion, the dual-state session lifecycle, role-gated
//! live room access, and the merged per-user calendar projection.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
