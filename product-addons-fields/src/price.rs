//! Price resolution.
//!
//! Addon and option prices arrive from the catalog either as numbers or as
//! strings typed into an admin form. [`Amount`] keeps whichever shape was
//! stored, and [`resolve_price`] turns it into a monetary delta according to
//! its [`PriceType`].

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Pricing semantics of an addon or option price.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    /// The literal amount.
    #[default]
    #[serde(alias = "flat")]
    FlatFee,
    /// A percentage of the base amount.
    #[serde(alias = "percent", alias = "percentage")]
    PercentageBased,
    /// The amount once per unit.
    #[serde(alias = "quantity", alias = "per_unit")]
    QuantityBased,
}

impl PriceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::FlatFee => "flat_fee",
            PriceType::PercentageBased => "percentage_based",
            PriceType::QuantityBased => "quantity_based",
        }
    }
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored price, numeric or textual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value; anything unparseable or non-finite is `0`.
    pub fn value(&self) -> f64 {
        match self {
            Amount::Number(n) if n.is_finite() => *n,
            Amount::Number(_) => 0.0,
            Amount::Text(s) => coerce_amount(s),
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Number(0.0)
    }
}

impl From<f64> for Amount {
    fn from(n: f64) -> Self {
        Amount::Number(n)
    }
}

impl From<&str> for Amount {
    fn from(s: &str) -> Self {
        Amount::Text(s.to_string())
    }
}

/// What a price is computed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceContext {
    /// Units of the line item, used by quantity-based prices.
    pub quantity: f64,
    /// Line price before addons, used by percentage-based prices.
    pub base_amount: f64,
}

impl PriceContext {
    pub fn new(quantity: f64, base_amount: f64) -> Self {
        Self {
            quantity,
            base_amount,
        }
    }
}

impl Default for PriceContext {
    fn default() -> Self {
        Self {
            quantity: 1.0,
            base_amount: 0.0,
        }
    }
}

/// Compute the price delta for `amount` under `price_type`.
pub fn resolve_price(amount: &Amount, price_type: PriceType, context: &PriceContext) -> f64 {
    let price = amount.value();
    match price_type {
        PriceType::FlatFee => price,
        PriceType::PercentageBased => context.base_amount * price / 100.0,
        PriceType::QuantityBased => price * context.quantity,
    }
}

/// Parse a human-entered amount.
///
/// Accepts surrounding whitespace, a leading `+`, and either `.` or `,` as the
/// decimal separator. When both appear, whichever comes last is the decimal
/// separator and the other groups thousands. Returns `None` for anything else.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect();
    if compact.is_empty() {
        return None;
    }

    let normalized = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => compact.replace(',', ""),
        (Some(_), Some(_)) => compact.replace('.', "").replace(',', "."),
        (None, Some(_)) if compact.matches(',').count() == 1 => compact.replace(',', "."),
        (None, Some(_)) => compact.replace(',', ""),
        _ => compact,
    };

    // Reject words f64::from_str would otherwise accept, like "inf" or "NaN".
    if !normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
    {
        return None;
    }

    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse an amount, falling back to `0` when it is malformed.
pub fn coerce_amount(raw: &str) -> f64 {
    match parse_amount(raw) {
        Some(n) => n,
        None => {
            if !raw.trim().is_empty() {
                debug!(raw, "malformed amount, pricing at zero");
            }
            0.0
        }
    }
}
