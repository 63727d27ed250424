//! Operator CLI for merchant-rs
//!
//! # Usage
//!
//! ```bash
//! # Write the sample tables, then inspect and decide
//! merchant-cli gen-data
//! merchant-cli status
//! merchant-cli inventory P002
//!
//! # Strategy generation needs the reasoning engine
//! export GEMINI_API_KEY="..."
//! merchant-cli strategy P001 --crisis
//! merchant-cli logs
//! ```

mod sample_data;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use merchant_analytics::{CompetitorAnalyzer, FinanceAnalyzer, InventoryAnalyzer};
use merchant_audit::{AuditLog, DEFAULT_RECENT_LOGS};
use merchant_data::{CompetitorTable, FinancialMetrics, InventoryTable, SalesHistory};
use merchant_llm::providers::GeminiEngine;
use merchant_strategy::StrategyCoordinator;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "merchant-cli")]
#[command(about = "Decision support for a single-seller e-commerce operator", long_about = None)]
struct Args {
    /// Directory holding the business data tables
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Audit log store (defaults to <data-dir>/audit_log.csv)
    #[arg(long)]
    audit_log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the current financial status
    Status,
    /// Assess one product's stock against its sales velocity
    Inventory {
        /// Product id (e.g., P001)
        product_id: String,
    },
    /// Compare our price against the competitor's
    Price {
        /// Product id (e.g., P001)
        product_id: String,
    },
    /// Generate an audited marketing strategy for one product
    Strategy {
        /// Product id (e.g., P001)
        product_id: String,
        /// Inject the crisis simulation into the directive
        #[arg(long)]
        crisis: bool,
    },
    /// Show the most recent audit entries
    Logs {
        /// Number of entries to show
        #[arg(long, default_value_t = DEFAULT_RECENT_LOGS)]
        limit: usize,
    },
    /// Write the canonical sample tables into the data directory
    GenData,
}

/// The four source tables, loaded together
struct Tables {
    metrics: Arc<FinancialMetrics>,
    inventory: Arc<InventoryTable>,
    competitors: Arc<CompetitorTable>,
    sales: Arc<SalesHistory>,
}

impl Tables {
    fn load(data_dir: &std::path::Path) -> Result<Self> {
        Ok(Self {
            metrics: Arc::new(FinancialMetrics::load(data_dir.join("financials.csv"))?),
            inventory: Arc::new(InventoryTable::load(data_dir.join("inventory.csv"))?),
            competitors: Arc::new(CompetitorTable::load(data_dir.join("competitors.csv"))?),
            sales: Arc::new(SalesHistory::load(data_dir.join("sales_history.csv"))?),
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn,merchant=info".to_string()),
        )
        .init();

    let args = Args::parse();
    let audit_path = args
        .audit_log
        .clone()
        .unwrap_or_else(|| args.data_dir.join("audit_log.csv"));

    match args.command {
        Command::Status => {
            let tables = Tables::load(&args.data_dir)?;
            let status = FinanceAnalyzer::new(tables.metrics).status()?;
            println!("Cash:          ${:.2}", status.cash);
            println!("Monthly burn:  ${:.2}", status.monthly_burn);
            println!("{}", status.narrative());
        }
        Command::Inventory { product_id } => {
            let tables = Tables::load(&args.data_dir)?;
            let assessment =
                InventoryAnalyzer::new(tables.inventory, tables.sales).analyze(&product_id)?;
            println!("{} ({})", assessment.name, assessment.product_id);
            println!("Stock:         {} units", assessment.stock);
            println!(
                "{}-day sales:   {} units",
                assessment.window_days, assessment.recent_sales
            );
            println!("Status:        {}", assessment.level);
        }
        Command::Price { product_id } => {
            let tables = Tables::load(&args.data_dir)?;
            let position = CompetitorAnalyzer::new(tables.inventory, tables.competitors)
                .compare(&product_id)?;
            println!("Our price:     ${:.2}", position.my_price);
            println!("Competitor:    ${:.2}", position.competitor_price);
            if position.promo_active {
                println!("Competitor is running a promotion");
            }
            println!("Position:      {}", position.describe());
        }
        Command::Strategy { product_id, crisis } => {
            let tables = Tables::load(&args.data_dir)?;
            let engine = Arc::new(
                GeminiEngine::from_env().context("reasoning engine configuration failed")?,
            );
            let audit = Arc::new(AuditLog::new(audit_path));

            let coordinator = StrategyCoordinator::new(
                FinanceAnalyzer::new(tables.metrics),
                InventoryAnalyzer::new(Arc::clone(&tables.inventory), tables.sales),
                CompetitorAnalyzer::new(tables.inventory, tables.competitors),
                engine,
                audit,
            );

            info!(product_id = %product_id, crisis, "generating strategy");
            let decision = coordinator.generate_strategy(&product_id, crisis).await?;
            println!("{}", decision.format_report());
        }
        Command::Logs { limit } => {
            let audit = AuditLog::new(audit_path);
            let entries = audit.recent(limit);
            if entries.is_empty() {
                println!("No audit entries.");
            } else {
                for entry in entries {
                    println!(
                        "{}  {:<16}  {:<6}  {}  {}  {}",
                        entry.timestamp.to_rfc3339(),
                        entry.agent_name,
                        entry.product_id,
                        entry.action,
                        entry.reasoning_fingerprint,
                        entry.verification_status,
                    );
                }
            }
        }
        Command::GenData => {
            sample_data::generate(&args.data_dir)?;
            println!("Sample tables written to {}", args.data_dir.display());
        }
    }

    Ok(())
}
