//! Dated sales history
//!
//! The source table has one row per date and one `<product_id>_sales` column
//! per product. Rows are sorted by date at load time so "trailing window" is
//! well-defined regardless of file order.

use chrono::NaiveDate;
use merchant_core::{Error, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const DATE_COLUMN: &str = "date";
const SALES_SUFFIX: &str = "_sales";

/// The trailing daily sale counts for one product, oldest first
///
/// When the history holds fewer observations than the requested window, the
/// window is simply shorter; missing days are never padded with zeros and
/// never treated as an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesWindow {
    daily: Vec<u32>,
}

impl SalesWindow {
    /// Build a window from daily counts, oldest first
    pub fn new(daily: Vec<u32>) -> Self {
        Self { daily }
    }

    /// Total units sold across the window
    pub fn total(&self) -> u32 {
        self.daily.iter().sum()
    }

    /// Number of observations actually present
    pub fn len(&self) -> usize {
        self.daily.len()
    }

    /// Check if the window holds no observations
    pub fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// The daily counts, oldest first
    pub fn daily(&self) -> &[u32] {
        &self.daily
    }
}

/// Read-only per-product daily sales series
#[derive(Debug, Clone, Default)]
pub struct SalesHistory {
    /// Daily counts per product, aligned oldest first
    series: HashMap<String, Vec<u32>>,
}

impl SalesHistory {
    /// Load the sales history from CSV
    ///
    /// The header must contain a `date` column; every `<product_id>_sales`
    /// column becomes one product series. Rows are sorted by date ascending.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Source(format!("cannot open {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::Source(format!("cannot read header of {}: {e}", path.display())))?
            .clone();

        let date_index = headers
            .iter()
            .position(|h| h == DATE_COLUMN)
            .ok_or_else(|| {
                Error::Source(format!("{} has no '{DATE_COLUMN}' column", path.display()))
            })?;

        // (column index, product id) for every sales column
        let sales_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter_map(|(i, h)| {
                h.strip_suffix(SALES_SUFFIX)
                    .map(|product_id| (i, product_id.to_string()))
            })
            .collect();

        let mut rows: Vec<(NaiveDate, Vec<u32>)> = Vec::new();
        for record in reader.records() {
            let record = record
                .map_err(|e| Error::Source(format!("bad row in {}: {e}", path.display())))?;

            let date_field = record.get(date_index).unwrap_or_default();
            let date = NaiveDate::parse_from_str(date_field, "%Y-%m-%d").map_err(|e| {
                Error::Source(format!("bad date '{date_field}' in {}: {e}", path.display()))
            })?;

            let mut counts = Vec::with_capacity(sales_columns.len());
            for (index, product_id) in &sales_columns {
                let field = record.get(*index).unwrap_or_default();
                let count: u32 = field.parse().map_err(|e| {
                    Error::Source(format!(
                        "bad sales count '{field}' for {product_id} in {}: {e}",
                        path.display()
                    ))
                })?;
                counts.push(count);
            }
            rows.push((date, counts));
        }

        rows.sort_by_key(|(date, _)| *date);

        let mut series: HashMap<String, Vec<u32>> = sales_columns
            .iter()
            .map(|(_, product_id)| (product_id.clone(), Vec::with_capacity(rows.len())))
            .collect();
        for (_, counts) in &rows {
            for ((_, product_id), count) in sales_columns.iter().zip(counts) {
                if let Some(column) = series.get_mut(product_id) {
                    column.push(*count);
                }
            }
        }

        debug!(
            products = series.len(),
            days = rows.len(),
            path = %path.display(),
            "loaded sales history"
        );
        Ok(Self { series })
    }

    /// Build a history directly from per-product series, oldest first
    pub fn from_series<I, S>(series: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<u32>)>,
        S: Into<String>,
    {
        Self {
            series: series.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// The trailing window of daily sales for a product
    ///
    /// Returns the most recent `window` observations, or the full (shorter)
    /// history when fewer exist. Fails with [`Error::ProductNotFound`] if the
    /// product has no sales series at all.
    pub fn window(&self, product_id: &str, window: usize) -> Result<SalesWindow> {
        let column = self
            .series
            .get(product_id)
            .ok_or_else(|| Error::ProductNotFound(product_id.to_string()))?;

        let start = column.len().saturating_sub(window);
        Ok(SalesWindow::new(column[start..].to_vec()))
    }
}
