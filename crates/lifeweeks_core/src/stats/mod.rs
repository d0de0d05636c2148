//! Life statistics engine.
//!
//! # Responsibility
//! - Pure date arithmetic from a birth date and an injected `now`.
//! - Memoization of the last result with a weekly staleness gate.
//!
//! # Invariants
//! - Nothing in this module reads the system clock.

pub mod cache;
pub mod date_math;
