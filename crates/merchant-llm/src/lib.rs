//! Reasoning engine abstraction for merchant-rs
//!
//! The strategy coordinator treats text generation as an opaque, injectable
//! capability: a directive goes in, a decision comes out, and anything can go
//! wrong in between. This crate provides:
//!
//! - The [`ReasoningEngine`] trait (single fallible text-in/text-out method)
//! - [`EngineError`] for everything the boundary can report
//! - A concrete Gemini implementation (behind the `gemini` feature)
//!
//! Tests substitute a deterministic stub for the trait; nothing in the
//! decision pipeline depends on a concrete provider.

pub mod engine;
pub mod error;

// Re-export main types
pub use engine::ReasoningEngine;
pub use error::{EngineError, Result};

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;
