//! Canonical sample tables
//!
//! Writes the four-product demo data set so the tool runs out of the box:
//! a scarce laptop, a dead-stock mouse, hot-selling headphones, and an
//! unremarkable keyboard, with tight cash and undercutting competitors.

use anyhow::{Context, Result};
use chrono::{Days, Utc};
use merchant_data::{CompetitorRecord, ProductRecord};
use std::path::Path;

/// Trailing days of sales history to generate
const HISTORY_DAYS: u64 = 7;

struct SampleProduct {
    record: ProductRecord,
    competitor_price: f64,
    competitor_promo: bool,
    daily_sales: [u32; HISTORY_DAYS as usize],
}

fn product(
    id: &str,
    name: &str,
    cost: f64,
    price: f64,
    stock: u32,
    threshold: u32,
    vendor: &str,
) -> ProductRecord {
    ProductRecord {
        product_id: id.to_string(),
        name: name.to_string(),
        cost_price: cost,
        selling_price: price,
        current_stock: stock,
        min_stock_threshold: threshold,
        vendor_email: Some(vendor.to_string()),
    }
}

fn samples() -> Vec<SampleProduct> {
    vec![
        SampleProduct {
            // Scarce: stock under the low-stock line.
            record: product("P001", "High-End Laptop", 800.0, 1200.0, 5, 10, "vendor.tech.1@example.com"),
            competitor_price: 1150.0,
            competitor_promo: true,
            daily_sales: [1, 0, 1, 0, 0, 1, 0],
        },
        SampleProduct {
            // Dead stock: huge pile, barely moving.
            record: product("P002", "Basic Mouse", 5.0, 15.0, 600, 50, "vendor.abc.2@example.com"),
            competitor_price: 10.0,
            competitor_promo: true,
            daily_sales: [2, 1, 2, 1, 1, 2, 1],
        },
        SampleProduct {
            // Hot seller.
            record: product("P003", "Noise-Cancel Headphones", 50.0, 110.0, 45, 20, "vendor.global.3@example.com"),
            competitor_price: 120.0,
            competitor_promo: false,
            daily_sales: [5, 8, 6, 7, 9, 8, 7],
        },
        SampleProduct {
            record: product("P004", "Mech Keyboard", 40.0, 80.0, 120, 30, "vendor.supply.4@example.com"),
            competitor_price: 75.0,
            competitor_promo: false,
            daily_sales: [3, 2, 3, 4, 3, 2, 3],
        },
    ]
}

/// Write all four sample tables into `dir`
pub fn generate(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("cannot create data directory {}", dir.display()))?;

    let samples = samples();
    write_inventory(dir, &samples)?;
    write_financials(dir)?;
    write_competitors(dir, &samples)?;
    write_sales_history(dir, &samples)?;
    Ok(())
}

fn write_inventory(dir: &Path, samples: &[SampleProduct]) -> Result<()> {
    let path = dir.join("inventory.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    for sample in samples {
        writer.serialize(&sample.record)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_financials(dir: &Path) -> Result<()> {
    let path = dir.join("financials.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    writer.write_record(["metric", "value"])?;
    // Roughly 2.4 months of runway: tight on purpose.
    writer.write_record(["cash_balance", "12000"])?;
    writer.write_record(["monthly_burn_rate", "5000"])?;
    writer.write_record(["fixed_costs", "3000"])?;
    writer.flush()?;
    Ok(())
}

fn write_competitors(dir: &Path, samples: &[SampleProduct]) -> Result<()> {
    let path = dir.join("competitors.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    for sample in samples {
        writer.serialize(CompetitorRecord {
            product_id: sample.record.product_id.clone(),
            competitor_price: sample.competitor_price,
            promo_active: sample.competitor_promo,
        })?;
    }
    writer.flush()?;
    Ok(())
}

fn write_sales_history(dir: &Path, samples: &[SampleProduct]) -> Result<()> {
    let path = dir.join("sales_history.csv");
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("cannot create {}", path.display()))?;

    let mut header = vec!["date".to_string()];
    header.extend(
        samples
            .iter()
            .map(|s| format!("{}_sales", s.record.product_id)),
    );
    writer.write_record(&header)?;

    // Newest-first rows, matching how the source system exports.
    let today = Utc::now().date_naive();
    for day in 0..HISTORY_DAYS {
        let date = today
            .checked_sub_days(Days::new(day))
            .context("date arithmetic underflow")?;
        let mut row = vec![date.format("%Y-%m-%d").to_string()];
        for sample in samples {
            row.push(sample.daily_sales[day as usize].to_string());
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use merchant_data::{CompetitorTable, FinancialMetrics, InventoryTable, SalesHistory};

    #[test]
    fn test_generated_tables_load() {
        let dir = tempfile::tempdir().unwrap();
        generate(dir.path()).unwrap();

        let metrics = FinancialMetrics::load(dir.path().join("financials.csv")).unwrap();
        assert_eq!(metrics.get("cash_balance").unwrap(), 12000.0);

        let inventory = InventoryTable::load(dir.path().join("inventory.csv")).unwrap();
        assert_eq!(inventory.products().len(), 4);
        assert_eq!(inventory.product("P002").unwrap().current_stock, 600);

        let competitors = CompetitorTable::load(dir.path().join("competitors.csv")).unwrap();
        assert!(competitors.record("P001").unwrap().promo_active);

        let sales = SalesHistory::load(dir.path().join("sales_history.csv")).unwrap();
        assert_eq!(sales.window("P003", 7).unwrap().total(), 50);
    }

    #[test]
    fn test_generation_is_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        generate(dir.path()).unwrap();
        generate(dir.path()).unwrap();

        let inventory = InventoryTable::load(dir.path().join("inventory.csv")).unwrap();
        assert_eq!(inventory.products().len(), 4);
    }
}
