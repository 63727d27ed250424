//! Strategy generation result

use chrono::{DateTime, Utc};
use merchant_analytics::{FinanceHealth, PriceStanding, StockLevel};
use serde::Serialize;

/// Result of one strategy generation
///
/// Immutable once constructed; the decision text is exactly what the engine
/// returned and what the audit fingerprint covers.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyDecision {
    /// Product key
    pub product_id: String,
    /// Product display name
    pub product_name: String,
    /// Finance classification as presented to the engine (post-override)
    pub finance_health: FinanceHealth,
    /// Inventory classification
    pub stock_level: StockLevel,
    /// Price position classification
    pub price_standing: PriceStanding,
    /// The full directive submitted to the engine
    pub directive: String,
    /// The engine's decision text
    pub decision: String,
    /// Audit fingerprint of the decision text
    pub fingerprint: String,
    /// When the decision was generated
    pub generated_at: DateTime<Utc>,
}

impl StrategyDecision {
    /// Format a report for operator display
    pub fn format_report(&self) -> String {
        let mut report = String::new();

        report.push_str(&format!(
            "# Strategy: {} ({})\n\n",
            self.product_name, self.product_id
        ));
        report.push_str(&format!(
            "Signals: finance {} / inventory {} / price {}\n\n",
            self.finance_health, self.stock_level, self.price_standing
        ));
        report.push_str(&self.decision);
        report.push_str(&format!(
            "\n\nAudit fingerprint: {} ({})\n",
            self.fingerprint,
            self.generated_at.to_rfc3339()
        ));

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_report() {
        let decision = StrategyDecision {
            product_id: "P001".to_string(),
            product_name: "High-End Laptop".to_string(),
            finance_health: FinanceHealth::Critical,
            stock_level: StockLevel::LowStock,
            price_standing: PriceStanding::Overpriced,
            directive: "...".to_string(),
            decision: "DECISION: Hold".to_string(),
            fingerprint: "2cf24dba5fb0a30e".to_string(),
            generated_at: Utc::now(),
        };

        let report = decision.format_report();
        assert!(report.contains("High-End Laptop"));
        assert!(report.contains("CRITICAL"));
        assert!(report.contains("DECISION: Hold"));
        assert!(report.contains("2cf24dba5fb0a30e"));
    }
}
