//! Signal analyzers for merchant-rs
//!
//! Three leaf analyzers each own one signal domain and expose a pure query
//! over immutable source tables:
//!
//! - [`FinanceAnalyzer`] — cash runway and health classification
//! - [`InventoryAnalyzer`] — stock-vs-velocity classification per product
//! - [`CompetitorAnalyzer`] — price position per product
//!
//! Analyzers are explicitly constructed with `Arc`-shared tables; there is no
//! process-wide shared state, so tests build isolated instances per case.

pub mod competitor;
pub mod finance;
pub mod inventory;

// Re-export main types
pub use competitor::{CompetitorAnalyzer, PricePosition, PriceStanding};
pub use finance::{FinanceAnalyzer, FinanceHealth, FinancialStatus};
pub use inventory::{DEFAULT_SALES_WINDOW, InventoryAnalyzer, InventoryAssessment, StockLevel};
