//! Competitor analyzer
//!
//! Compares our listed price against the observed competitor price. Pure
//! function of the two prices; the sign of the difference decides the
//! classification.

use merchant_core::Result;
use merchant_data::{CompetitorTable, InventoryTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Price position classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PriceStanding {
    /// Our price is above the competitor's
    Overpriced,
    /// Our price is below the competitor's
    Underpriced,
    /// Prices match exactly
    Competitive,
}

impl fmt::Display for PriceStanding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Overpriced => "OVERPRICED",
            Self::Underpriced => "UNDERPRICED",
            Self::Competitive => "COMPETITIVE",
        };
        write!(f, "{label}")
    }
}

/// Derived price position for one product
#[derive(Debug, Clone, Serialize)]
pub struct PricePosition {
    /// Product key
    pub product_id: String,
    /// Our listed price
    pub my_price: f64,
    /// Competitor's listed price
    pub competitor_price: f64,
    /// Whether the competitor is running a promotion
    pub promo_active: bool,
    /// Derived classification
    pub standing: PriceStanding,
}

impl PricePosition {
    /// Signed price difference (ours minus theirs)
    pub fn diff(&self) -> f64 {
        self.my_price - self.competitor_price
    }

    /// One-line description used verbatim in directives
    pub fn describe(&self) -> String {
        match self.standing {
            PriceStanding::Overpriced => {
                format!("Overpriced by ${:.2} (we are losing)", self.diff())
            }
            PriceStanding::Underpriced => {
                format!("Underpriced by ${:.2} (we are winning)", -self.diff())
            }
            PriceStanding::Competitive => "Competitive".to_string(),
        }
    }
}

/// Analyzer for the market pressure signal
pub struct CompetitorAnalyzer {
    inventory: Arc<InventoryTable>,
    competitors: Arc<CompetitorTable>,
}

impl CompetitorAnalyzer {
    /// Create a new competitor analyzer
    pub fn new(inventory: Arc<InventoryTable>, competitors: Arc<CompetitorTable>) -> Self {
        Self {
            inventory,
            competitors,
        }
    }

    /// Compare our price against the competitor's for one product
    ///
    /// Fails with [`merchant_core::Error::ProductNotFound`] when either the
    /// inventory record or the competitor observation is missing.
    pub fn compare(&self, product_id: &str) -> Result<PricePosition> {
        let product = self.inventory.product(product_id)?;
        let record = self.competitors.record(product_id)?;

        let diff = product.selling_price - record.competitor_price;
        let standing = if diff > 0.0 {
            PriceStanding::Overpriced
        } else if diff < 0.0 {
            PriceStanding::Underpriced
        } else {
            PriceStanding::Competitive
        };

        debug!(product_id, diff, %standing, "compared prices");
        Ok(PricePosition {
            product_id: product.product_id.clone(),
            my_price: product.selling_price,
            competitor_price: record.competitor_price,
            promo_active: record.promo_active,
            standing,
        })
    }
}
