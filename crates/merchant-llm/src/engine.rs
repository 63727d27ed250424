//! Reasoning engine trait definition

use crate::Result;
use async_trait::async_trait;

/// Trait for reasoning engines
///
/// Implementations wrap an external text-generation capability. The
/// coordinator sends a single directive and expects a single decision text;
/// callers must tolerate latency and failure and never assume the engine is
/// synchronous-fast.
#[async_trait]
pub trait ReasoningEngine: Send + Sync {
    /// Generate a decision from a directive
    ///
    /// # Arguments
    ///
    /// * `directive` - The full directive text (business context,
    ///   constraints, and output format)
    ///
    /// # Returns
    ///
    /// The engine's decision text
    async fn reason(&self, directive: &str) -> Result<String>;

    /// Get the engine name (e.g., "gemini")
    fn name(&self) -> &str;
}
