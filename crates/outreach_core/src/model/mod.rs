//! Domain model for tracked professor outreach.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep email normalization in one place so every entry path agrees.
//!
//! # Invariants
//! - Every record is identified by its normalized institution email.

pub mod professor;
