//! Read-only business data tables for merchant-rs
//!
//! The decision pipeline consumes four tables owned by external
//! collaborators: financial metrics, per-product inventory, competitor
//! pricing, and dated sales history. Each table loads once from CSV into an
//! immutable in-memory structure; analyzers only read. Every table also has
//! an in-memory constructor so tests and the sample-data generator can
//! inject records without touching disk.

pub mod competitors;
pub mod financials;
pub mod inventory;
pub mod sales;

// Re-export main types
pub use competitors::{CompetitorRecord, CompetitorTable};
pub use financials::FinancialMetrics;
pub use inventory::{InventoryTable, ProductRecord};
pub use sales::{SalesHistory, SalesWindow};
