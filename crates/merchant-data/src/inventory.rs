//! Inventory table
//!
//! Per-product stock records owned by an external inventory source. The core
//! only reads; stock counts are unsigned by construction.

use merchant_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// A single product as the inventory source describes it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Unique product key (e.g., "P001")
    pub product_id: String,

    /// Display name
    #[serde(rename = "product_name")]
    pub name: String,

    /// Unit cost to us
    #[serde(default)]
    pub cost_price: f64,

    /// Current listed price
    pub selling_price: f64,

    /// Units on hand
    pub current_stock: u32,

    /// Reorder threshold configured by the operator
    #[serde(default)]
    pub min_stock_threshold: u32,

    /// Vendor contact for restock requests
    #[serde(default)]
    pub vendor_email: Option<String>,
}

/// Read-only product inventory
#[derive(Debug, Clone, Default)]
pub struct InventoryTable {
    products: Vec<ProductRecord>,
}

impl InventoryTable {
    /// Load the inventory from CSV
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Source(format!("cannot open {}: {e}", path.display())))?;

        let mut products = Vec::new();
        for row in reader.deserialize() {
            let record: ProductRecord =
                row.map_err(|e| Error::Source(format!("bad row in {}: {e}", path.display())))?;
            products.push(record);
        }

        debug!(count = products.len(), path = %path.display(), "loaded inventory");
        Ok(Self { products })
    }

    /// Build a table directly from records
    pub fn from_records(products: Vec<ProductRecord>) -> Self {
        Self { products }
    }

    /// Look up a product by id
    ///
    /// Returns [`Error::ProductNotFound`] for unknown ids.
    pub fn product(&self, product_id: &str) -> Result<&ProductRecord> {
        self.products
            .iter()
            .find(|p| p.product_id == product_id)
            .ok_or_else(|| Error::ProductNotFound(product_id.to_string()))
    }

    /// All products, in source order
    pub fn products(&self) -> &[ProductRecord] {
        &self.products
    }
}
