//! Finance analyzer
//!
//! Computes cash runway from the financial metrics table and classifies the
//! result. The analyzer holds no mutable state; every call recomputes from
//! the read-only source.

use merchant_core::{Error, Result};
use merchant_data::FinancialMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Metric name for available cash
pub const METRIC_CASH_BALANCE: &str = "cash_balance";

/// Metric name for monthly burn rate
pub const METRIC_MONTHLY_BURN_RATE: &str = "monthly_burn_rate";

/// Runway below this many months is classified CRITICAL
const CRITICAL_RUNWAY_MONTHS: f64 = 3.0;

/// Financial health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinanceHealth {
    /// Runway comfortably covers the near term
    Healthy,
    /// Runway is under three months
    Critical,
    /// Injected crisis condition; only ever produced by an override
    Emergency,
}

impl FinanceHealth {
    /// Whether this health level constrains strategy to LIQUIDATION or HOLD
    pub fn is_constrained(self) -> bool {
        matches!(self, Self::Critical | Self::Emergency)
    }
}

impl fmt::Display for FinanceHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Healthy => "HEALTHY",
            Self::Critical => "CRITICAL",
            Self::Emergency => "EMERGENCY",
        };
        write!(f, "{label}")
    }
}

/// Snapshot of the cash position with its derived classification
#[derive(Debug, Clone, Serialize)]
pub struct FinancialStatus {
    /// Available cash
    pub cash: f64,
    /// Monthly burn rate (always positive)
    pub monthly_burn: f64,
    /// Months of operation remaining, rounded to one decimal
    pub runway_months: f64,
    /// Derived health classification
    pub health: FinanceHealth,
}

impl FinancialStatus {
    /// One-line narrative used verbatim in directives
    pub fn narrative(&self) -> String {
        format!(
            "Cash runway: {:.1} months. Status: {}.",
            self.runway_months, self.health
        )
    }
}

/// Analyzer for the cash position signal
pub struct FinanceAnalyzer {
    metrics: Arc<FinancialMetrics>,
}

impl FinanceAnalyzer {
    /// Create a new finance analyzer over a metrics table
    pub fn new(metrics: Arc<FinancialMetrics>) -> Self {
        Self { metrics }
    }

    /// Compute the current financial status
    ///
    /// Fails with [`Error::MetricNotFound`] when a required metric is absent
    /// and [`Error::NonPositiveBurnRate`] when the burn rate is zero or
    /// negative. Deterministic for fixed source data; no side effects.
    pub fn status(&self) -> Result<FinancialStatus> {
        let cash = self.metrics.get(METRIC_CASH_BALANCE)?;
        let monthly_burn = self.metrics.get(METRIC_MONTHLY_BURN_RATE)?;

        if monthly_burn <= 0.0 {
            return Err(Error::NonPositiveBurnRate(monthly_burn));
        }

        let runway_months = round_to_tenth(cash / monthly_burn);
        let health = if runway_months < CRITICAL_RUNWAY_MONTHS {
            FinanceHealth::Critical
        } else {
            FinanceHealth::Healthy
        };

        debug!(cash, monthly_burn, runway_months, %health, "computed financial status");
        Ok(FinancialStatus {
            cash,
            monthly_burn,
            runway_months,
            health,
        })
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer(cash: f64, burn: f64) -> FinanceAnalyzer {
        FinanceAnalyzer::new(Arc::new(FinancialMetrics::from_pairs([
            (METRIC_CASH_BALANCE, cash),
            (METRIC_MONTHLY_BURN_RATE, burn),
        ])))
    }

    #[test]
    fn test_tight_cash_is_critical() {
        let status = analyzer(12000.0, 5000.0).status().unwrap();
        assert_eq!(status.runway_months, 2.4);
        assert_eq!(status.health, FinanceHealth::Critical);
    }

    #[test]
    fn test_long_runway_is_healthy() {
        let status = analyzer(60000.0, 5000.0).status().unwrap();
        assert_eq!(status.runway_months, 12.0);
        assert_eq!(status.health, FinanceHealth::Healthy);
    }

    #[test]
    fn test_three_month_boundary() {
        // Exactly 3.0 months is not below the threshold.
        let status = analyzer(15000.0, 5000.0).status().unwrap();
        assert_eq!(status.runway_months, 3.0);
        assert_eq!(status.health, FinanceHealth::Healthy);
    }

    #[test]
    fn test_runway_rounds_to_one_decimal() {
        let status = analyzer(10000.0, 3000.0).status().unwrap();
        assert_eq!(status.runway_months, 3.3);
    }

    #[test]
    fn test_zero_burn_fails_explicitly() {
        let err = analyzer(12000.0, 0.0).status().unwrap_err();
        assert!(matches!(err, Error::NonPositiveBurnRate(b) if b == 0.0));
    }

    #[test]
    fn test_negative_burn_fails_explicitly() {
        let err = analyzer(12000.0, -100.0).status().unwrap_err();
        assert!(matches!(err, Error::NonPositiveBurnRate(_)));
    }

    #[test]
    fn test_missing_metric_fails() {
        let analyzer = FinanceAnalyzer::new(Arc::new(FinancialMetrics::from_pairs([(
            METRIC_CASH_BALANCE,
            12000.0,
        )])));
        let err = analyzer.status().unwrap_err();
        assert!(matches!(err, Error::MetricNotFound(m) if m == METRIC_MONTHLY_BURN_RATE));
    }

    #[test]
    fn test_narrative_wording() {
        let status = analyzer(12000.0, 5000.0).status().unwrap();
        assert_eq!(status.narrative(), "Cash runway: 2.4 months. Status: CRITICAL.");
    }
}
