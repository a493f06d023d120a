use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FieldValue;
use crate::calculations::common::percent_of;

/// Most tiers a book of business may hold.
pub const MAX_TIERS: usize = 5;

/// Fewest tiers a book of business may hold.
pub const MIN_TIERS: usize = 1;

/// One line of an existing book of business: a dollar base and the
/// commission rate earned on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    pub label: String,
    /// Annualized book amount in dollars.
    pub amount: FieldValue,
    /// Commission rate on a 0–100 scale. Not clamped.
    pub pct: FieldValue,
}

impl Tier {
    /// The tier a fresh book starts with, numbered from one.
    pub fn numbered(n: usize) -> Self {
        Self {
            label: format!("Book {n}"),
            amount: FieldValue::Number(Decimal::new(250_000, 0)),
            pct: FieldValue::Number(Decimal::new(5, 0)),
        }
    }

    /// Commission earned on this tier: `amount * (pct / 100)`.
    pub fn commission(&self) -> Decimal {
        percent_of(self.amount.value(), self.pct.value())
    }
}

/// A single-field replacement for one tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierEdit {
    Label(String),
    Amount(FieldValue),
    Pct(FieldValue),
}

/// The editable fields of a [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TierField {
    Label,
    Amount,
    Pct,
}

impl TierField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Amount => "amount",
            Self::Pct => "pct",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "label" => Some(Self::Label),
            "amount" => Some(Self::Amount),
            "pct" => Some(Self::Pct),
            _ => None,
        }
    }
}
