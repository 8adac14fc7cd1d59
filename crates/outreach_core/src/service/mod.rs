//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store edits, persistence and spreadsheet I/O into
//!   use-case level APIs.
//! - Keep CLI/FFI layers decoupled from file formats.

pub mod tracker_service;
