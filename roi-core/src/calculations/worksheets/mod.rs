//! Derived-value worksheets.
//!
//! [`commission`] computes the headline figures from the calculator inputs;
//! [`scenarios`] lays the same figures out per book tier for side-by-side
//! comparison.

pub mod commission;
pub mod scenarios;

pub use commission::{CommissionRate, CommissionResult, CommissionWorksheet};
pub use scenarios::{ScenarioRow, ScenarioTable, ScenarioTotals};
