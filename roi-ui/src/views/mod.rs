//! Presentation of calculator results.
//!
//! A [`ResultsView`] is a formatted snapshot of one calculation: every
//! figure already rendered as display text. The interactive session prints
//! it through `Display`; document renderers lay the same snapshot out for
//! export.
//!
//! - `summary_cards` - Headline cards, the book section and the opportunity section
//! - `scenario_table` - Per-tier comparison table with an optional totals row
//! - `talking_points` - Narrative bullets and the disclaimer

mod scenario_table;
mod summary_cards;
mod talking_points;

use std::fmt;

use roi_core::CalculatorInputs;
use roi_core::calculations::CommissionResult;

pub use scenario_table::{ScenarioLine, ScenarioSection};
pub use summary_cards::{BookSection, Card, LineItem, OpportunitySection, TierLine};
pub use talking_points::{DISCLAIMER, TalkingPoints};

pub const TITLE: &str = "ESI Channel Partner ROI Calculator";
pub const SUBTITLE: &str = "A high level summary of your estimated commissions and revenue \
                            outcomes based on the inputs below.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub cards: Vec<Card>,
    pub book: BookSection,
    pub opportunity: OpportunitySection,
    pub scenarios: ScenarioSection,
    pub talking_points: TalkingPoints,
}

impl ResultsView {
    /// Formats `result`, which must have been calculated from `inputs`.
    pub fn capture(
        inputs: &CalculatorInputs,
        result: &CommissionResult,
    ) -> Self {
        Self {
            cards: summary_cards::cards(result),
            book: BookSection::capture(inputs, result),
            opportunity: OpportunitySection::capture(inputs, result),
            scenarios: ScenarioSection::capture(&result.scenarios),
            talking_points: TalkingPoints::capture(inputs, result),
        }
    }
}

impl fmt::Display for ResultsView {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{SUBTITLE}")?;
        writeln!(f)?;
        for card in &self.cards {
            writeln!(f, "  {card}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.book)?;
        writeln!(f, "{}", self.opportunity)?;
        writeln!(f, "{}", self.scenarios)?;
        writeln!(f, "{}", self.talking_points)?;
        for paragraph in DISCLAIMER {
            writeln!(f, "{paragraph}")?;
        }
        Ok(())
    }
}
