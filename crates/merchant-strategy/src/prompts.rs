//! Directive template
//!
//! The directive embeds all three assessments plus the business-rule
//! constraints as instructions to the engine; the constraints are presented
//! in the text, not enforced as code branches that alter data.

use merchant_core::{Error, Result};
use minijinja::Environment;
use serde::Serialize;

const DIRECTIVE_TEMPLATE: &str = r"You are the autonomous marketing strategist for a single-seller e-commerce store.
Make one strategic decision from the business context below.

--- BUSINESS CONTEXT ---
CASH STATUS: {{ finance_narrative }}
INVENTORY: {{ inventory_status }} (stock: {{ stock }} units, {{ window_days }}-day sales: {{ recent_sales }} units)
COMPETITOR: {{ price_position }} (our price: ${{ my_price }}, theirs: ${{ competitor_price }}{% if promo_active %}, competitor promo running{% endif %})

--- PRODUCT ---
{{ product_name }} ({{ product_id }})

--- MISSION ---
Decide the immediate marketing action.

CRITICAL INSTRUCTION:
If CASH STATUS is CRITICAL or EMERGENCY, you MUST choose LIQUIDATION or HOLD. Do not spend money on ads.
If INVENTORY is OVERSTOCK, you MUST clear the stock.

OUTPUT FORMAT:
DECISION: [Aggressive Push / Liquidation / Hold / Price Match]
REASONING: [short explanation]
ACTION: [specific tactic]
";

/// Everything the directive template interpolates
#[derive(Debug, Clone, Serialize)]
pub struct DirectiveContext {
    /// Finance narrative, post-override when a crisis is injected
    pub finance_narrative: String,
    /// Inventory classification label
    pub inventory_status: String,
    /// Units on hand
    pub stock: u32,
    /// Units sold across the trailing window
    pub recent_sales: u32,
    /// Configured window length in days
    pub window_days: usize,
    /// Price position description
    pub price_position: String,
    /// Our price, pre-formatted to currency precision
    pub my_price: String,
    /// Competitor price, pre-formatted to currency precision
    pub competitor_price: String,
    /// Whether the competitor runs a promotion
    pub promo_active: bool,
    /// Product display name
    pub product_name: String,
    /// Product key
    pub product_id: String,
}

/// Render the directive for one product
pub fn build_directive(context: &DirectiveContext) -> Result<String> {
    let mut env = Environment::new();
    env.add_template("directive", DIRECTIVE_TEMPLATE)
        .map_err(|e| Error::Other(format!("directive template invalid: {e}")))?;
    let template = env
        .get_template("directive")
        .map_err(|e| Error::Other(format!("directive template missing: {e}")))?;
    template
        .render(context)
        .map_err(|e| Error::Other(format!("directive render failed: {e}")))
}
