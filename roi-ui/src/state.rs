//! Application state for the ROI calculator.
//!
//! Holds the editable inputs together with the results derived from them.
//! Every mutating method recomputes the results before returning, so a
//! reader never observes numbers older than the last edit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

use roi_core::calculations::coerce::coerce;
use roi_core::calculations::{CommissionRate, CommissionResult, CommissionWorksheet};
use roi_core::{
    CalculatorInputs, EditError, InputField, InputMode, RawInput, Tier, TierEdit, TierField,
};

use crate::config::CalculatorConfig;
use crate::views::ResultsView;

#[derive(Debug)]
pub struct AppState {
    inputs: CalculatorInputs,
    worksheet: CommissionWorksheet,
    result: CommissionResult,
    /// Starting percentages re-applied on reset.
    baseline: CalculatorConfig,
    /// Raised while an export is in flight. Shared with the export guard.
    exporting: Arc<AtomicBool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(CalculatorConfig::default())
    }
}

impl AppState {
    pub fn new(config: CalculatorConfig) -> Self {
        let worksheet = CommissionWorksheet::new(config.commission_rate());
        let mut inputs = CalculatorInputs::default();
        config.apply_to(&mut inputs);
        let result = worksheet.calculate(&inputs);

        Self {
            inputs,
            worksheet,
            result,
            baseline: config,
            exporting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn inputs(&self) -> &CalculatorInputs {
        &self.inputs
    }

    pub fn result(&self) -> &CommissionResult {
        &self.result
    }

    pub fn commission_rate(&self) -> CommissionRate {
        self.worksheet.commission_rate()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Handle to the exporting flag, for an export guard to raise and clear.
    pub fn exporting_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.exporting)
    }

    /// Captures the current results for display or export.
    pub fn view(&self) -> ResultsView {
        ResultsView::capture(&self.inputs, &self.result)
    }

    /// Coerces `raw` and stores it in `field`.
    ///
    /// The commission rate field refuses edits while the rate is fixed.
    pub fn apply_field(
        &mut self,
        field: InputField,
        raw: RawInput<'_>,
    ) -> Result<(), EditError> {
        if field == InputField::CommissionPct
            && matches!(self.commission_rate(), CommissionRate::Fixed(_))
        {
            return Err(EditError::FieldLocked(field));
        }
        let value = coerce(raw);
        debug!(field = field.as_str(), %value, "field updated");
        self.inputs.set_field(field, value);
        self.recalculate();
        Ok(())
    }

    pub fn set_input_mode(
        &mut self,
        mode: InputMode,
    ) {
        debug!(mode = mode.as_str(), "input mode changed");
        self.inputs.set_input_mode(mode);
        self.recalculate();
    }

    /// Appends a default tier and returns its index.
    pub fn add_tier(&mut self) -> Result<usize, EditError> {
        let index = self.inputs.add_tier()?;
        self.recalculate();
        Ok(index)
    }

    pub fn remove_tier(
        &mut self,
        index: usize,
    ) -> Result<Tier, EditError> {
        let removed = self.inputs.remove_tier(index)?;
        self.recalculate();
        Ok(removed)
    }

    /// Replaces one field of one tier. Labels are taken verbatim; amounts
    /// and rates are coerced.
    pub fn update_tier(
        &mut self,
        index: usize,
        field: TierField,
        raw: &str,
    ) -> Result<(), EditError> {
        let edit = match field {
            TierField::Label => TierEdit::Label(raw.to_string()),
            TierField::Amount => TierEdit::Amount(coerce(RawInput::Text(raw))),
            TierField::Pct => TierEdit::Pct(coerce(RawInput::Text(raw))),
        };
        self.inputs.update_tier(index, edit)?;
        self.recalculate();
        Ok(())
    }

    /// Swaps in a whole book, e.g. from a CSV import.
    pub fn replace_tiers(
        &mut self,
        tiers: Vec<Tier>,
    ) -> Result<(), EditError> {
        self.inputs.replace_tiers(tiers)?;
        self.recalculate();
        Ok(())
    }

    /// Restores every input to its default and re-seeds the configured
    /// starting percentages.
    pub fn reset(&mut self) {
        self.inputs.reset_all();
        self.baseline.apply_to(&mut self.inputs);
        info!("calculator reset to defaults");
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.result = self.worksheet.calculate(&self.inputs);
    }
}
