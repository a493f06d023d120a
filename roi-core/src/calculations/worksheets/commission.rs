//! Commission worksheet for the channel partner ROI calculator.
//!
//! Derives the projected blended revenue from the current
//! [`CalculatorInputs`]. Every figure is recomputed from scratch on each
//! call; nothing is cached between calls.
//!
//! # Worksheet Structure
//!
//! | Line | Description |
//! |------|-------------|
//! | 1    | Book commission: Σ tier amount × tier rate |
//! | 2    | Master plan commission: Line 1 × master plan % |
//! | 3    | Total WSE: clients × avg. WSE per client, or total WSE entered directly |
//! | 4    | Converted WSE: Line 3 × conversion rate, rounded half-up to a whole employee |
//! | 5    | Total payroll: Line 3 × avg. annual wage (informational) |
//! | 6    | Gross management fee: Line 4 × fee per WSE |
//! | 7    | Management fee commission: Line 6 × commission rate |
//! | 8    | Adjusted book: Line 1 × book portion % |
//! | 9    | Total revenue: Line 7 + Line 8 + Line 2 |
//! | 10a  | Value added: Line 9 − Line 1 |
//! | 10b  | Value added %: Line 10a ÷ Line 1 (undefined when Line 1 ≤ 0) |
//! | 11a  | Management fee share: Line 7 ÷ Line 9 (zero when Line 9 ≤ 0) |
//! | 11b  | Book share: Line 8 ÷ Line 9 (zero when Line 9 ≤ 0) |
//!
//! The shares sum to 100% only when the master plan commission is zero.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roi_core::CalculatorInputs;
//! use roi_core::calculations::CommissionWorksheet;
//!
//! let inputs = CalculatorInputs::default();
//! let result = CommissionWorksheet::default().calculate(&inputs);
//!
//! assert_eq!(result.total_book_commission, dec!(12500));
//! assert_eq!(result.converted_wse, dec!(90));
//! assert_eq!(result.gross_mgmt_fee, dec!(135000));
//! assert_eq!(result.mgmt_fee_commission, dec!(20250));
//! assert_eq!(result.total_revenue, dec!(32875));
//! assert_eq!(result.value_added_pct, Some(dec!(163)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::scenarios::ScenarioTable;
use crate::calculations::common::{change_pct, percent_of, round_half_up_whole, share_of};
use crate::{CalculatorInputs, InputMode};

/// Where the management fee commission rate comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommissionRate {
    /// A constant rate; the input field is ignored and edits are refused.
    Fixed(Decimal),
    /// The rate is read from [`CalculatorInputs::commission_pct`].
    Adjustable,
}

impl Default for CommissionRate {
    fn default() -> Self {
        Self::Fixed(Decimal::new(15, 0))
    }
}

/// Every derived figure shown on the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionResult {
    /// Current annual commission from the existing book (Line 1).
    pub total_book_commission: Decimal,

    /// Bonus commission from the master health plan (Line 2).
    pub master_plan_commission: Decimal,

    /// Total worksite employees under the active input mode (Line 3).
    pub total_wse: Decimal,

    /// Worksite employees assumed to convert, a whole number (Line 4).
    pub converted_wse: Decimal,

    /// Payroll across all WSE. Shown for context only (Line 5).
    pub total_payroll: Decimal,

    /// Annual management fee billed on converted WSE (Line 6).
    pub gross_mgmt_fee: Decimal,

    /// Commission rate applied to the gross management fee.
    pub commission_pct: Decimal,

    /// Commission earned on the management fee (Line 7).
    pub mgmt_fee_commission: Decimal,

    /// Book commission after the book portion is applied (Line 8).
    pub adjusted_book: Decimal,

    /// Projected blended revenue (Line 9).
    pub total_revenue: Decimal,

    /// Revenue gained over the current book (Line 10a).
    pub value_added_abs: Decimal,

    /// Value added as a percentage of the current book (Line 10b).
    ///
    /// `None` when the book commission is zero or negative.
    pub value_added_pct: Option<Decimal>,

    /// Management fee commission as a share of total revenue (Line 11a).
    pub mgmt_share: Decimal,

    /// Adjusted book as a share of total revenue (Line 11b).
    pub book_share: Decimal,

    /// Per-tier breakdown against the shared management fee commission.
    pub scenarios: ScenarioTable,
}

/// Calculator for the commission worksheet.
#[derive(Debug, Clone, Default)]
pub struct CommissionWorksheet {
    commission_rate: CommissionRate,
}

impl CommissionWorksheet {
    pub fn new(commission_rate: CommissionRate) -> Self {
        Self { commission_rate }
    }

    pub fn commission_rate(&self) -> CommissionRate {
        self.commission_rate
    }

    /// Calculates every line of the worksheet from the current inputs.
    ///
    /// Never fails: empty fields count as zero and ratios against a zero
    /// base are reported as zero or `None`.
    pub fn calculate(
        &self,
        inputs: &CalculatorInputs,
    ) -> CommissionResult {
        // Lines 1-2: existing book
        let total_book_commission = inputs.total_book_commission();
        let master_plan_pct = inputs.master_plan_pct.value();
        let master_plan_commission = percent_of(total_book_commission, master_plan_pct);

        // Lines 3-6: WSE sizing and the management fee
        let total_wse = self.total_wse(inputs);
        let converted_wse = self.converted_wse(total_wse, inputs.conversion_rate.value());
        let total_payroll = total_wse.saturating_mul(inputs.avg_annual_wage.value());
        let gross_mgmt_fee = converted_wse.saturating_mul(inputs.mgmt_fee_per_wse.value());

        // Lines 7-9: blended revenue
        let commission_pct = self.effective_commission_pct(inputs);
        let mgmt_fee_commission = self.commission_from_rate(gross_mgmt_fee, commission_pct);
        let book_portion_pct = inputs.book_portion_pct.value();
        let adjusted_book = percent_of(total_book_commission, book_portion_pct);
        let total_revenue = self.total_revenue(
            mgmt_fee_commission,
            adjusted_book,
            master_plan_commission,
        );

        // Lines 10-11: uplift and shares
        let value_added_abs = total_revenue.saturating_sub(total_book_commission);
        let value_added_pct = change_pct(value_added_abs, total_book_commission);
        let mgmt_share = share_of(mgmt_fee_commission, total_revenue);
        let book_share = share_of(adjusted_book, total_revenue);

        let scenarios = ScenarioTable::build(
            inputs.tiers(),
            mgmt_fee_commission,
            book_portion_pct,
            master_plan_pct,
        );

        debug!(
            mode = inputs.input_mode.as_str(),
            %total_book_commission,
            %converted_wse,
            %gross_mgmt_fee,
            %total_revenue,
            "commission worksheet recalculated"
        );

        CommissionResult {
            total_book_commission,
            master_plan_commission,
            total_wse,
            converted_wse,
            total_payroll,
            gross_mgmt_fee,
            commission_pct,
            mgmt_fee_commission,
            adjusted_book,
            total_revenue,
            value_added_abs,
            value_added_pct,
            mgmt_share,
            book_share,
            scenarios,
        }
    }

    /// Commission earned on the gross management fee at `rate_pct`.
    pub fn commission_from_rate(
        &self,
        gross_mgmt_fee: Decimal,
        rate_pct: Decimal,
    ) -> Decimal {
        percent_of(gross_mgmt_fee, rate_pct)
    }

    /// Reads only the active mode's fields.
    fn total_wse(
        &self,
        inputs: &CalculatorInputs,
    ) -> Decimal {
        match inputs.input_mode {
            InputMode::ByClients => inputs
                .clients
                .value()
                .saturating_mul(inputs.avg_wse_per_client.value()),
            InputMode::ByWse => inputs.total_wse_direct.value(),
        }
    }

    fn converted_wse(
        &self,
        total_wse: Decimal,
        conversion_rate: Decimal,
    ) -> Decimal {
        round_half_up_whole(percent_of(total_wse, conversion_rate))
    }

    fn effective_commission_pct(
        &self,
        inputs: &CalculatorInputs,
    ) -> Decimal {
        match self.commission_rate {
            CommissionRate::Fixed(pct) => pct,
            CommissionRate::Adjustable => inputs.commission_pct.value(),
        }
    }

    fn total_revenue(
        &self,
        mgmt_fee_commission: Decimal,
        adjusted_book: Decimal,
        master_plan_commission: Decimal,
    ) -> Decimal {
        mgmt_fee_commission
            .saturating_add(adjusted_book)
            .saturating_add(master_plan_commission)
    }
}
