//! Inventory analyzer
//!
//! Classifies each product by stock level against its recent sales velocity.

use merchant_core::Result;
use merchant_data::{InventoryTable, SalesHistory};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Canonical trailing-window length, in daily observations
pub const DEFAULT_SALES_WINDOW: usize = 7;

/// Stock above this with stagnant sales is dead inventory
const OVERSTOCK_STOCK_FLOOR: u32 = 100;
/// Window total below this counts as stagnant
const OVERSTOCK_SALES_CEILING: u32 = 10;
/// Stock below this is scarce
const LOW_STOCK_CEILING: u32 = 10;
/// Window total above this is hot
const HIGH_DEMAND_FLOOR: u32 = 30;

/// Stock-vs-velocity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StockLevel {
    /// High stock with stagnant sales
    Overstock,
    /// Stock is nearly exhausted
    LowStock,
    /// Recent sales are unusually strong
    HighDemand,
    /// Nothing remarkable
    Normal,
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Overstock => "OVERSTOCK (dead inventory)",
            Self::LowStock => "LOW STOCK (scarcity)",
            Self::HighDemand => "HIGH DEMAND",
            Self::Normal => "NORMAL",
        };
        write!(f, "{label}")
    }
}

/// Derived assessment for one product
#[derive(Debug, Clone, Serialize)]
pub struct InventoryAssessment {
    /// Product key
    pub product_id: String,
    /// Display name
    pub name: String,
    /// Units on hand
    pub stock: u32,
    /// Units sold across the trailing window
    pub recent_sales: u32,
    /// Configured window length in days
    pub window_days: usize,
    /// Derived classification
    pub level: StockLevel,
}

/// Analyzer for the stock-vs-velocity signal
pub struct InventoryAnalyzer {
    inventory: Arc<InventoryTable>,
    sales: Arc<SalesHistory>,
    window: usize,
}

impl InventoryAnalyzer {
    /// Create an analyzer with the canonical 7-day window
    pub fn new(inventory: Arc<InventoryTable>, sales: Arc<SalesHistory>) -> Self {
        Self {
            inventory,
            sales,
            window: DEFAULT_SALES_WINDOW,
        }
    }

    /// Override the trailing window length
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Assess one product
    ///
    /// Fails with [`merchant_core::Error::ProductNotFound`] when the product
    /// has no inventory record or no sales series. A history shorter than the
    /// configured window sums only the observations that exist.
    pub fn analyze(&self, product_id: &str) -> Result<InventoryAssessment> {
        let product = self.inventory.product(product_id)?;
        let window = self.sales.window(product_id, self.window)?;
        let recent_sales = window.total();
        let level = classify(product.current_stock, recent_sales);

        debug!(product_id, stock = product.current_stock, recent_sales, %level, "assessed inventory");
        Ok(InventoryAssessment {
            product_id: product.product_id.clone(),
            name: product.name.clone(),
            stock: product.current_stock,
            recent_sales,
            window_days: self.window,
            level,
        })
    }
}

/// First matching rule wins: overstock, then low stock, then high demand.
/// A product with both high stock and strong sales falls through the
/// conjunctive overstock guard into HIGH_DEMAND or NORMAL, never both.
fn classify(stock: u32, recent_sales: u32) -> StockLevel {
    if stock > OVERSTOCK_STOCK_FLOOR && recent_sales < OVERSTOCK_SALES_CEILING {
        StockLevel::Overstock
    } else if stock < LOW_STOCK_CEILING {
        StockLevel::LowStock
    } else if recent_sales > HIGH_DEMAND_FLOOR {
        StockLevel::HighDemand
    } else {
        StockLevel::Normal
    }
}
