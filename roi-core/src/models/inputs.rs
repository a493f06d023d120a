use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{FieldValue, InputMode, MAX_TIERS, MIN_TIERS, Tier, TierEdit};

/// Reasons an edit is refused. A refused edit leaves the inputs untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("a book of business holds at most {} tiers", MAX_TIERS)]
    TierLimitReached,

    #[error("the last remaining tier cannot be removed")]
    LastTier,

    #[error("no tier at index {index} (book has {len})")]
    TierOutOfRange { index: usize, len: usize },

    #[error("a book of business needs 1 to 5 tiers, got {0}")]
    InvalidTierCount(usize),

    #[error("{0} is fixed by configuration")]
    FieldLocked(InputField),
}

/// The scalar (non-tier) inputs, each with a stable id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputField {
    Clients,
    AvgWsePerClient,
    TotalWseDirect,
    AvgAnnualWage,
    MgmtFeePerWse,
    ConversionRate,
    MasterPlanPct,
    CommissionPct,
    BookPortionPct,
}

impl InputField {
    pub const ALL: [InputField; 9] = [
        Self::Clients,
        Self::AvgWsePerClient,
        Self::TotalWseDirect,
        Self::AvgAnnualWage,
        Self::MgmtFeePerWse,
        Self::ConversionRate,
        Self::MasterPlanPct,
        Self::CommissionPct,
        Self::BookPortionPct,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::AvgWsePerClient => "avgWsePerClient",
            Self::TotalWseDirect => "totalWseDirect",
            Self::AvgAnnualWage => "avgAnnualWage",
            Self::MgmtFeePerWse => "mgmtFeePerWse",
            Self::ConversionRate => "conversionRate",
            Self::MasterPlanPct => "masterPlanPct",
            Self::CommissionPct => "commissionPct",
            Self::BookPortionPct => "bookPortionPct",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == s)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Clients => "Number of Clients",
            Self::AvgWsePerClient => "Avg. WSE per Client",
            Self::TotalWseDirect => "Total WSE (direct)",
            Self::AvgAnnualWage => "Avg. Annual Wage ($)",
            Self::MgmtFeePerWse => "Management Fee per WSE ($)",
            Self::ConversionRate => "Conversion Rate %",
            Self::MasterPlanPct => "Master Plan Commission %",
            Self::CommissionPct => "Management Fee Commission %",
            Self::BookPortionPct => "Book Portion %",
        }
    }
}

impl fmt::Display for InputField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Everything the user can edit on the calculator.
///
/// The tier list is private so the 1–5 tier bound can only change through
/// [`add_tier`](Self::add_tier), [`remove_tier`](Self::remove_tier) and
/// [`replace_tiers`](Self::replace_tiers).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalculatorInputs {
    tiers: Vec<Tier>,
    pub input_mode: InputMode,
    pub clients: FieldValue,
    pub avg_wse_per_client: FieldValue,
    pub total_wse_direct: FieldValue,
    pub avg_annual_wage: FieldValue,
    pub mgmt_fee_per_wse: FieldValue,
    /// Share of total WSE converting, 0–100.
    pub conversion_rate: FieldValue,
    pub master_plan_pct: FieldValue,
    /// Commission earned on the gross management fee, 0–100.
    pub commission_pct: FieldValue,
    /// Portion of the existing book carried into total revenue, 0–100.
    pub book_portion_pct: FieldValue,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            tiers: vec![Tier::numbered(1)],
            input_mode: InputMode::ByClients,
            clients: FieldValue::whole(20),
            avg_wse_per_client: FieldValue::whole(18),
            total_wse_direct: FieldValue::whole(360),
            avg_annual_wage: FieldValue::whole(55_000),
            mgmt_fee_per_wse: FieldValue::whole(1_500),
            conversion_rate: FieldValue::whole(25),
            master_plan_pct: FieldValue::whole(1),
            commission_pct: FieldValue::whole(15),
            book_portion_pct: FieldValue::whole(100),
        }
    }
}

impl CalculatorInputs {
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Appends a default tier labelled `Book N`, where `N` is the new count.
    ///
    /// Returns the index of the new tier.
    pub fn add_tier(&mut self) -> Result<usize, EditError> {
        if self.tiers.len() >= MAX_TIERS {
            return Err(EditError::TierLimitReached);
        }
        self.tiers.push(Tier::numbered(self.tiers.len() + 1));
        Ok(self.tiers.len() - 1)
    }

    /// Removes the tier at `index` and returns it.
    pub fn remove_tier(
        &mut self,
        index: usize,
    ) -> Result<Tier, EditError> {
        self.check_index(index)?;
        if self.tiers.len() <= MIN_TIERS {
            return Err(EditError::LastTier);
        }
        Ok(self.tiers.remove(index))
    }

    /// Replaces exactly one field of the tier at `index`.
    pub fn update_tier(
        &mut self,
        index: usize,
        edit: TierEdit,
    ) -> Result<(), EditError> {
        self.check_index(index)?;
        let tier = &mut self.tiers[index];
        match edit {
            TierEdit::Label(label) => tier.label = label,
            TierEdit::Amount(amount) => tier.amount = amount,
            TierEdit::Pct(pct) => tier.pct = pct,
        }
        Ok(())
    }

    /// Swaps in a whole book at once, e.g. from an import.
    pub fn replace_tiers(
        &mut self,
        tiers: Vec<Tier>,
    ) -> Result<(), EditError> {
        if !(MIN_TIERS..=MAX_TIERS).contains(&tiers.len()) {
            return Err(EditError::InvalidTierCount(tiers.len()));
        }
        self.tiers = tiers;
        Ok(())
    }

    pub fn field(
        &self,
        field: InputField,
    ) -> FieldValue {
        *self.field_slot(field)
    }

    /// Replaces exactly one scalar input. The other mode's values are left
    /// alone so switching modes back and forth never mixes them.
    pub fn set_field(
        &mut self,
        field: InputField,
        value: FieldValue,
    ) {
        *self.field_slot_mut(field) = value;
    }

    pub fn set_input_mode(
        &mut self,
        mode: InputMode,
    ) {
        self.input_mode = mode;
    }

    /// Discards every edit and restores the documented defaults.
    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Sum of every tier's commission.
    pub fn total_book_commission(&self) -> Decimal {
        crate::calculations::common::sum(self.tiers.iter().map(Tier::commission))
    }

    fn check_index(
        &self,
        index: usize,
    ) -> Result<(), EditError> {
        if index >= self.tiers.len() {
            return Err(EditError::TierOutOfRange {
                index,
                len: self.tiers.len(),
            });
        }
        Ok(())
    }

    fn field_slot(
        &self,
        field: InputField,
    ) -> &FieldValue {
        match field {
            InputField::Clients => &self.clients,
            InputField::AvgWsePerClient => &self.avg_wse_per_client,
            InputField::TotalWseDirect => &self.total_wse_direct,
            InputField::AvgAnnualWage => &self.avg_annual_wage,
            InputField::MgmtFeePerWse => &self.mgmt_fee_per_wse,
            InputField::ConversionRate => &self.conversion_rate,
            InputField::MasterPlanPct => &self.master_plan_pct,
            InputField::CommissionPct => &self.commission_pct,
            InputField::BookPortionPct => &self.book_portion_pct,
        }
    }

    fn field_slot_mut(
        &mut self,
        field: InputField,
    ) -> &mut FieldValue {
        match field {
            InputField::Clients => &mut self.clients,
            InputField::AvgWsePerClient => &mut self.avg_wse_per_client,
            InputField::TotalWseDirect => &mut self.total_wse_direct,
            InputField::AvgAnnualWage => &mut self.avg_annual_wage,
            InputField::MgmtFeePerWse => &mut self.mgmt_fee_per_wse,
            InputField::ConversionRate => &mut self.conversion_rate,
            InputField::MasterPlanPct => &mut self.master_plan_pct,
            InputField::CommissionPct => &mut self.commission_pct,
            InputField::BookPortionPct => &mut self.book_portion_pct,
        }
    }
}
