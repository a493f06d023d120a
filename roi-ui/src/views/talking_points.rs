//! Narrative talking points and the closing disclaimer.

use std::fmt;

use roi_core::CalculatorInputs;
use roi_core::calculations::CommissionResult;

use crate::utils::{format_currency, format_whole_pct};

pub const DISCLAIMER: [&str; 2] = [
    "This calculator provides a high level illustration based solely on the information \
     entered above. It is not a quote or guarantee. For advanced AOR scenarios, custom \
     commission structures, multi-tier book analysis, or full revenue optimization models, \
     please contact our sales team.",
    "Your current book commission is estimated based on your annualized group health \
     insurance billing. If eligible, placing your book on ESI's Master Health Plan may \
     provide an additional commission percentage (default: 1 percent in this model). \
     Actual qualification depends on underwriting requirements and plan participation rules.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TalkingPoints {
    pub bullets: Vec<String>,
}

impl TalkingPoints {
    pub const HEADING: &'static str = "3. Understanding Your Estimated Earnings";

    pub fn capture(
        inputs: &CalculatorInputs,
        result: &CommissionResult,
    ) -> Self {
        let conversion = format_whole_pct(inputs.conversion_rate.value());
        let bullets = vec![
            "Your current book commission is based on your annualized book of business. \
             This calculator uses your entered book structure to estimate those totals."
                .to_string(),
            "ESI's management fee creates a new supplemental revenue stream that adds to \
             your existing book rather than replacing it."
                .to_string(),
            format!(
                "You indicated a {conversion} conversion, this scenario generates {} in \
                 management-fee commissions, bringing your total estimated revenue to {}.",
                format_currency(result.mgmt_fee_commission),
                format_currency(result.total_revenue),
            ),
            "All values shown are illustrative. Actual compensation depends on client mix, \
             underwriting requirements, eligibility, and final agreements."
                .to_string(),
        ];

        Self { bullets }
    }
}

impl fmt::Display for TalkingPoints {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", Self::HEADING)?;
        for bullet in &self.bullets {
            writeln!(f, "  • {bullet}")?;
        }
        Ok(())
    }
}
