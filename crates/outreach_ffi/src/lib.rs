//! Flutter-facing bindings for the outreach tracker core.

pub mod api;
