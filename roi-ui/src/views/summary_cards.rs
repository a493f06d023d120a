//! Summary cards, the book section and the opportunity section.

use std::fmt;

use roi_core::calculations::CommissionResult;
use roi_core::{CalculatorInputs, FieldValue, InputField, InputMode};

use crate::utils::{format_count, format_currency, format_pct, format_whole_pct};

/// One headline figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
    pub caption: Option<String>,
}

pub fn cards(result: &CommissionResult) -> Vec<Card> {
    vec![
        Card {
            title: "Current Annual Commission (Book)",
            value: format_currency(result.total_book_commission),
            caption: None,
        },
        Card {
            title: "Converted WSE to ESI",
            value: format_count(result.converted_wse),
            caption: Some(format!("of {} total WSE", format_count(result.total_wse))),
        },
        Card {
            title: "Gross Management Fee (Annual)",
            value: format_currency(result.gross_mgmt_fee),
            caption: None,
        },
    ]
}

impl fmt::Display for Card {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.value)?;
        if let Some(caption) = &self.caption {
            write!(f, " ({caption})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierLine {
    pub label: String,
    pub amount: String,
    pub pct: String,
    pub commission: String,
}

/// Section 1: the current book of business.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSection {
    pub tiers: Vec<TierLine>,
    pub total: String,
}

impl BookSection {
    pub const HEADING: &'static str = "1. Current Book of Business";
    pub const NOTE: &'static str =
        "Add up to five books to mirror your existing commission structure.";

    pub fn capture(
        inputs: &CalculatorInputs,
        result: &CommissionResult,
    ) -> Self {
        let tiers = inputs
            .tiers()
            .iter()
            .map(|tier| TierLine {
                label: tier.label.clone(),
                amount: blank_or(tier.amount, format_currency),
                pct: blank_or(tier.pct, |v| format!("{}%", v.normalize())),
                commission: format_currency(tier.commission()),
            })
            .collect();

        Self {
            tiers,
            total: format_currency(result.total_book_commission),
        }
    }
}

impl fmt::Display for BookSection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", Self::HEADING)?;
        for (index, tier) in self.tiers.iter().enumerate() {
            writeln!(
                f,
                "  [{index}] {}: {} at {} = {}",
                tier.label, tier.amount, tier.pct, tier.commission
            )?;
        }
        writeln!(f, "  Current Book Commission Total: {}", self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: &'static str,
    pub value: String,
}

/// Section 2: worksite employees and the management fee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpportunitySection {
    pub mode: &'static str,
    pub inputs: Vec<LineItem>,
    pub total_payroll: String,
    pub gross_fee: String,
    pub conversion: String,
    pub commission_rate: String,
}

impl OpportunitySection {
    pub const HEADING: &'static str = "2. ESI Opportunity (Management Fee)";
    pub const NOTE: &'static str =
        "Estimate worksite employees (WSE) and commissions from ESI's management fee.";

    pub fn capture(
        inputs: &CalculatorInputs,
        result: &CommissionResult,
    ) -> Self {
        // Only the active mode's sizing fields are shown.
        let sizing: &[InputField] = match inputs.input_mode {
            InputMode::ByClients => &[InputField::Clients, InputField::AvgWsePerClient],
            InputMode::ByWse => &[InputField::TotalWseDirect],
        };
        let mut items: Vec<LineItem> = sizing
            .iter()
            .map(|&field| LineItem {
                label: field.label(),
                value: blank_or(inputs.field(field), format_count),
            })
            .collect();
        for field in [InputField::AvgAnnualWage, InputField::MgmtFeePerWse] {
            items.push(LineItem {
                label: field.label(),
                value: blank_or(inputs.field(field), format_currency),
            });
        }
        items.push(LineItem {
            label: InputField::MasterPlanPct.label(),
            value: blank_or(inputs.master_plan_pct, format_pct),
        });

        Self {
            mode: inputs.input_mode.label(),
            inputs: items,
            total_payroll: format_currency(result.total_payroll),
            gross_fee: format_currency(result.gross_mgmt_fee),
            conversion: format_whole_pct(inputs.conversion_rate.value()),
            commission_rate: format_pct(result.commission_pct),
        }
    }
}

impl fmt::Display for OpportunitySection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{}", Self::HEADING)?;
        writeln!(f, "  Mode: {}", self.mode)?;
        for item in &self.inputs {
            writeln!(f, "  {}: {}", item.label, item.value)?;
        }
        writeln!(f, "  Conversion Rate: {}", self.conversion)?;
        writeln!(f, "  Commission Rate: {}", self.commission_rate)?;
        writeln!(f, "  Total payroll: {}", self.total_payroll)?;
        writeln!(f, "  Gross fee on converted WSE: {}", self.gross_fee)
    }
}

/// Empty fields display blank; numbers go through `format`.
fn blank_or(
    value: FieldValue,
    format: impl Fn(rust_decimal::Decimal) -> String,
) -> String {
    match value {
        FieldValue::Empty => String::new(),
        FieldValue::Number(n) => format(n),
    }
}
