//! Reminder notifications the host platform schedules.
//!
//! # Responsibility
//! - Build the weekly "weeks left" and daily reflection notification requests.
//! - Define the scheduler seam implemented by the host.
//! - Carry the one-shot "open reflection entry" signal from a notification tap.
//!
//! # See also
//! - `service::life_service` for the `weeks_remaining` value used in bodies.

pub mod plan;
pub mod signal;
