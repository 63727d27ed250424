//! Strategy coordination for merchant-rs
//!
//! The [`StrategyCoordinator`] composes the three analyzer assessments into a
//! single directive, optionally overridden by an injected crisis condition,
//! submits it to the reasoning engine once under a caller-visible timeout,
//! and writes every successful decision through the audit log. Engine
//! failures surface as user-visible errors and are never logged.

pub mod config;
pub mod coordinator;
pub mod prompts;
pub mod result;

// Re-export main types
pub use config::StrategyConfig;
pub use coordinator::StrategyCoordinator;
pub use prompts::{DirectiveContext, build_directive};
pub use result::StrategyDecision;
