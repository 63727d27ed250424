//! Core abstractions for merchant-rs
//!
//! This crate carries the domain error taxonomy shared by every other crate
//! in the workspace. Analyzer lookup failures, the degenerate burn-rate case,
//! reasoning-engine failures, and audit-log write failures all flow through
//! [`Error`] so callers see one coherent surface.

pub mod error;

// Re-export main types
pub use error::{Error, Result};
