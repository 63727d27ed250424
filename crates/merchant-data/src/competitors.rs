//! Competitor pricing table

use merchant_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Observed competitor state for one product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorRecord {
    /// Product the observation refers to
    pub product_id: String,

    /// Competitor's listed price
    pub competitor_price: f64,

    /// Whether the competitor is currently running a promotion
    #[serde(rename = "competitor_promo")]
    pub promo_active: bool,
}

/// Read-only competitor pricing observations
#[derive(Debug, Clone, Default)]
pub struct CompetitorTable {
    records: Vec<CompetitorRecord>,
}

impl CompetitorTable {
    /// Load competitor observations from CSV
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Source(format!("cannot open {}: {e}", path.display())))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: CompetitorRecord =
                row.map_err(|e| Error::Source(format!("bad row in {}: {e}", path.display())))?;
            records.push(record);
        }

        debug!(count = records.len(), path = %path.display(), "loaded competitor data");
        Ok(Self { records })
    }

    /// Build a table directly from records
    pub fn from_records(records: Vec<CompetitorRecord>) -> Self {
        Self { records }
    }

    /// Look up the observation for a product
    ///
    /// Returns [`Error::ProductNotFound`] if the product has no competitor
    /// record.
    pub fn record(&self, product_id: &str) -> Result<&CompetitorRecord> {
        self.records
            .iter()
            .find(|r| r.product_id == product_id)
            .ok_or_else(|| Error::ProductNotFound(product_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_lookup() {
        let table = CompetitorTable::from_records(vec![CompetitorRecord {
            product_id: "P001".to_string(),
            competitor_price: 1150.0,
            promo_active: true,
        }]);

        let record = table.record("P001").unwrap();
        assert_eq!(record.competitor_price, 1150.0);
        assert!(record.promo_active);
    }

    #[test]
    fn test_missing_record_fails() {
        let table = CompetitorTable::default();
        assert!(matches!(
            table.record("P001").unwrap_err(),
            Error::ProductNotFound(_)
        ));
    }

    #[test]
    fn test_load_from_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("competitors.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "product_id,competitor_price,competitor_promo").unwrap();
        writeln!(file, "P001,1150,true").unwrap();
        writeln!(file, "P002,10,false").unwrap();

        let table = CompetitorTable::load(&path).unwrap();
        assert!(table.record("P001").unwrap().promo_active);
        assert!(!table.record("P002").unwrap().promo_active);
    }
}
