//! Commission calculations for the channel partner ROI calculator.
//!
//! [`coerce`] turns raw field input into numbers, [`common`] holds the
//! shared percentage and rounding helpers, and [`worksheets`] derives the
//! full result set from the current inputs.

pub mod coerce;
pub mod common;
pub mod worksheets;

pub use worksheets::{
    CommissionRate, CommissionResult, CommissionWorksheet, ScenarioRow, ScenarioTable,
    ScenarioTotals,
};
