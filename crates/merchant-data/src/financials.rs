//! Financial metrics table
//!
//! A flat metric/value table (`cash_balance`, `monthly_burn_rate`, ...)
//! loaded from CSV. Lookups for absent metrics fail explicitly; the finance
//! analyzer never substitutes defaults.

use merchant_core::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct MetricRow {
    metric: String,
    value: f64,
}

/// Read-only financial metrics, keyed by metric name
#[derive(Debug, Clone, Default)]
pub struct FinancialMetrics {
    metrics: HashMap<String, f64>,
}

impl FinancialMetrics {
    /// Load metrics from a `metric,value` CSV file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Source(format!("cannot open {}: {e}", path.display())))?;

        let mut metrics = HashMap::new();
        for row in reader.deserialize() {
            let row: MetricRow =
                row.map_err(|e| Error::Source(format!("bad row in {}: {e}", path.display())))?;
            metrics.insert(row.metric, row.value);
        }

        debug!(count = metrics.len(), path = %path.display(), "loaded financial metrics");
        Ok(Self { metrics })
    }

    /// Build a table directly from metric/value pairs
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            metrics: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Look up a metric by name
    ///
    /// Returns [`Error::MetricNotFound`] for absent metrics.
    pub fn get(&self, metric: &str) -> Result<f64> {
        self.metrics
            .get(metric)
            .copied()
            .ok_or_else(|| Error::MetricNotFound(metric.to_string()))
    }

    /// Number of metrics in the table
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
