use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A numeric input as the user last left it.
///
/// `Empty` is the state of a field that was cleared while editing: it is
/// redisplayed blank and computes as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FieldValue {
    #[default]
    Empty,
    Number(Decimal),
}

impl FieldValue {
    /// The value used in arithmetic; `Empty` counts as zero.
    pub fn value(&self) -> Decimal {
        match self {
            Self::Empty => Decimal::ZERO,
            Self::Number(n) => *n,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// A whole-number value.
    pub fn whole(n: i64) -> Self {
        Self::Number(Decimal::from(n))
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Number(n) => write!(f, "{}", n.normalize()),
        }
    }
}

/// A value exactly as an input surface emits it, before coercion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInput<'a> {
    /// Free text typed into a field; may be empty or malformed.
    Text(&'a str),
    /// A float from a slider or similar widget; may be non-finite.
    Float(f64),
    /// A value that is already a valid number.
    Decimal(Decimal),
    /// No value at all.
    Missing,
}

impl<'a> From<&'a str> for RawInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawInput<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Decimal> for RawInput<'_> {
    fn from(value: Decimal) -> Self {
        Self::Decimal(value)
    }
}

impl From<FieldValue> for RawInput<'static> {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Empty => Self::Text(""),
            FieldValue::Number(n) => Self::Decimal(n),
        }
    }
}
