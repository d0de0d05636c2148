//! Flutter-facing bindings for `lifeweeks_core`.

pub mod api;
