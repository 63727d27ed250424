//! Strategy coordinator
//!
//! Composes the three analyzer assessments into one directive, submits it to
//! the reasoning engine, and writes the result through the audit log.

use crate::config::StrategyConfig;
use crate::prompts::{DirectiveContext, build_directive};
use crate::result::StrategyDecision;
use chrono::Utc;
use merchant_analytics::{CompetitorAnalyzer, FinanceAnalyzer, FinanceHealth, InventoryAnalyzer};
use merchant_audit::AuditLog;
use merchant_core::{Error, Result};
use merchant_llm::ReasoningEngine;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// Action label recorded for every generated strategy
const ACTION_STRATEGY_GENERATION: &str = "Strategy Generation";

/// Narrative substituted into the directive when a crisis is injected.
/// The underlying financial snapshot is never touched.
const CRISIS_NARRATIVE: &str =
    "CRITICAL: cash runway is under two weeks. Bankruptcy imminent. Status: EMERGENCY.";

/// Coordinator that turns analyzer signals into an audited decision
pub struct StrategyCoordinator {
    finance: FinanceAnalyzer,
    inventory: InventoryAnalyzer,
    competitor: CompetitorAnalyzer,
    engine: Arc<dyn ReasoningEngine>,
    audit: Arc<AuditLog>,
    config: StrategyConfig,
}

impl StrategyCoordinator {
    /// Create a coordinator with the default configuration
    pub fn new(
        finance: FinanceAnalyzer,
        inventory: InventoryAnalyzer,
        competitor: CompetitorAnalyzer,
        engine: Arc<dyn ReasoningEngine>,
        audit: Arc<AuditLog>,
    ) -> Self {
        Self {
            finance,
            inventory,
            competitor,
            engine,
            audit,
            config: StrategyConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: StrategyConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a marketing strategy for one product
    ///
    /// Analyzer lookup failures propagate unchanged; there are no defaults
    /// and no partial strategies. The engine is invoked exactly once under
    /// the configured timeout; any failure — error, timeout, or an empty
    /// decision — returns [`Error::EngineFailure`] without writing an audit
    /// entry. On success the decision is fingerprinted and appended before
    /// it is returned.
    pub async fn generate_strategy(
        &self,
        product_id: &str,
        crisis_override: bool,
    ) -> Result<StrategyDecision> {
        // Gather intelligence; fail fast on any lookup miss.
        let finance = self.finance.status()?;
        let assessment = self.inventory.analyze(product_id)?;
        let position = self.competitor.compare(product_id)?;

        // Presentation-time crisis override, scoped to this invocation.
        let (finance_health, finance_narrative) = if crisis_override {
            (FinanceHealth::Emergency, CRISIS_NARRATIVE.to_string())
        } else {
            (finance.health, finance.narrative())
        };

        let context = DirectiveContext {
            finance_narrative,
            inventory_status: assessment.level.to_string(),
            stock: assessment.stock,
            recent_sales: assessment.recent_sales,
            window_days: assessment.window_days,
            price_position: position.describe(),
            my_price: format!("{:.2}", position.my_price),
            competitor_price: format!("{:.2}", position.competitor_price),
            promo_active: position.promo_active,
            product_name: assessment.name.clone(),
            product_id: assessment.product_id.clone(),
        };
        let directive = build_directive(&context)?;

        info!(
            product_id,
            crisis_override,
            engine = self.engine.name(),
            "submitting directive"
        );

        // Single attempt; a timeout is just another engine failure.
        let decision = match timeout(self.config.engine_timeout, self.engine.reason(&directive))
            .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                warn!(product_id, error = %e, "reasoning engine failed");
                return Err(e.into());
            }
            Err(_) => {
                warn!(product_id, "reasoning engine timed out");
                return Err(Error::EngineFailure(format!(
                    "no response within {:?}",
                    self.config.engine_timeout
                )));
            }
        };

        if decision.trim().is_empty() {
            warn!(product_id, "reasoning engine returned an empty decision");
            return Err(Error::EngineFailure(
                "engine returned an empty decision".to_string(),
            ));
        }

        let fingerprint = self.audit.log_event(
            &self.config.agent_name,
            product_id,
            ACTION_STRATEGY_GENERATION,
            &decision,
        )?;

        Ok(StrategyDecision {
            product_id: assessment.product_id,
            product_name: assessment.name,
            finance_health,
            stock_level: assessment.level,
            price_standing: position.standing,
            directive,
            decision,
            fingerprint,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use merchant_data::{
        CompetitorRecord, CompetitorTable, FinancialMetrics, InventoryTable, ProductRecord,
        SalesHistory,
    };
    use merchant_llm::EngineError;
    use std::time::Duration;

    /// Deterministic engine stub: fixed reply, fixed failure, or a stall.
    enum StubEngine {
        Reply(&'static str),
        Fail,
        Stall,
    }

    #[async_trait]
    impl ReasoningEngine for StubEngine {
        async fn reason(&self, _directive: &str) -> merchant_llm::Result<String> {
            match self {
                Self::Reply(text) => Ok((*text).to_string()),
                Self::Fail => Err(EngineError::RequestFailed("stub offline".to_string())),
                Self::Stall => {
                    tokio::time::sleep(Duration::from_secs(60)).await;
                    Ok("too late".to_string())
                }
            }
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    struct Fixture {
        coordinator: StrategyCoordinator,
        audit: Arc<AuditLog>,
        metrics: Arc<FinancialMetrics>,
        _dir: tempfile::TempDir,
    }

    /// Canonical scenario: tight cash (CRITICAL), scarce laptop (LOW_STOCK),
    /// competitor undercutting us (OVERPRICED).
    fn fixture(engine: StubEngine) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let audit = Arc::new(AuditLog::new(dir.path().join("audit_log.csv")));

        let metrics = Arc::new(FinancialMetrics::from_pairs([
            ("cash_balance", 12000.0),
            ("monthly_burn_rate", 5000.0),
        ]));
        let inventory = Arc::new(InventoryTable::from_records(vec![ProductRecord {
            product_id: "P001".to_string(),
            name: "High-End Laptop".to_string(),
            cost_price: 800.0,
            selling_price: 1200.0,
            current_stock: 5,
            min_stock_threshold: 10,
            vendor_email: None,
        }]));
        let competitors = Arc::new(CompetitorTable::from_records(vec![CompetitorRecord {
            product_id: "P001".to_string(),
            competitor_price: 1150.0,
            promo_active: false,
        }]));
        let sales = Arc::new(SalesHistory::from_series([(
            "P001",
            vec![1, 0, 1, 0, 0, 1, 0],
        )]));

        let coordinator = StrategyCoordinator::new(
            FinanceAnalyzer::new(Arc::clone(&metrics)),
            InventoryAnalyzer::new(Arc::clone(&inventory), sales),
            CompetitorAnalyzer::new(inventory, competitors),
            Arc::new(engine),
            Arc::clone(&audit),
        );

        Fixture {
            coordinator,
            audit,
            metrics,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn test_directive_carries_all_classifications_and_constraints() {
        let fx = fixture(StubEngine::Reply("DECISION: Hold"));
        let decision = fx.coordinator.generate_strategy("P001", false).await.unwrap();

        assert!(decision.directive.contains("Status: CRITICAL."));
        assert!(decision.directive.contains("LOW STOCK"));
        assert!(decision.directive.contains("Overpriced by $50.00"));
        assert!(decision.directive.contains("Do not spend money on ads."));
        assert_eq!(decision.finance_health, FinanceHealth::Critical);
    }

    #[tokio::test]
    async fn test_success_is_audited_with_matching_fingerprint() {
        let fx = fixture(StubEngine::Reply("DECISION: Hold"));
        let decision = fx.coordinator.generate_strategy("P001", false).await.unwrap();

        assert_eq!(decision.decision, "DECISION: Hold");
        assert_eq!(decision.fingerprint, merchant_audit::fingerprint("DECISION: Hold"));

        let entries = fx.audit.recent(10);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].agent_name, "MarketingAgent");
        assert_eq!(entries[0].product_id, "P001");
        assert_eq!(entries[0].action, "Strategy Generation");
        assert_eq!(entries[0].reasoning_fingerprint, decision.fingerprint);
    }

    #[tokio::test]
    async fn test_crisis_override_changes_directive_only() {
        let fx = fixture(StubEngine::Reply("DECISION: Liquidation"));
        let decision = fx.coordinator.generate_strategy("P001", true).await.unwrap();

        assert_eq!(decision.finance_health, FinanceHealth::Emergency);
        assert!(decision.directive.contains("Bankruptcy imminent"));
        assert!(!decision.directive.contains("2.4 months"));

        // An independent read of the same source is unchanged.
        let status = FinanceAnalyzer::new(Arc::clone(&fx.metrics)).status().unwrap();
        assert_eq!(status.health, FinanceHealth::Critical);
        assert_eq!(status.runway_months, 2.4);
    }

    #[tokio::test]
    async fn test_engine_failure_returns_error_and_skips_logging() {
        let fx = fixture(StubEngine::Fail);
        let err = fx.coordinator.generate_strategy("P001", false).await.unwrap_err();

        assert!(matches!(err, Error::EngineFailure(_)));
        assert!(fx.audit.recent(10).is_empty());
    }

    #[tokio::test]
    async fn test_empty_decision_is_not_logged() {
        let fx = fixture(StubEngine::Reply("   \n"));
        let err = fx.coordinator.generate_strategy("P001", false).await.unwrap_err();

        assert!(matches!(err, Error::EngineFailure(_)));
        assert!(fx.audit.recent(10).is_empty());
    }

    #[tokio::test]
    async fn test_engine_timeout_is_an_engine_failure() {
        let fx = fixture(StubEngine::Stall);
        let coordinator = fx
            .coordinator
            .with_config(StrategyConfig::default().with_engine_timeout(Duration::from_millis(20)));

        let err = coordinator.generate_strategy("P001", false).await.unwrap_err();
        assert!(matches!(err, Error::EngineFailure(_)));
        assert!(fx.audit.recent(10).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_product_propagates_unchanged() {
        let fx = fixture(StubEngine::Reply("DECISION: Hold"));
        let err = fx.coordinator.generate_strategy("P999", false).await.unwrap_err();

        assert!(matches!(err, Error::ProductNotFound(id) if id == "P999"));
        assert!(fx.audit.recent(10).is_empty());
    }
}
