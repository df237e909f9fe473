//! Inline editing of a server-rendered timesheet table.
//!
//! The [`controller::PortalController`] keeps at most one row open for editing, validates
//! durations before submitting, and after every successful mutation replaces the table body
//! with a fresh rendering fetched from the server.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod console;
pub mod controller;
pub mod domain;
pub mod markup;
pub mod telemetry;

pub use controller::{classify, Gesture, Intent, Outcome, PortalController, PortalOptions};
pub use domain::{is_valid_duration, PortalError, RemoteError};
