//! Domain model for life stats and daily reflections.
//!
//! # Responsibility
//! - Define the records the engine computes, caches and persists.
//! - Own the label mapping for reflection types so storage and wire formats
//!   agree on one normalization rule.

pub mod life_stats;
pub mod reflection;
