//! Concrete reasoning engine implementations

#[cfg(feature = "gemini")]
mod gemini;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiEngine};
