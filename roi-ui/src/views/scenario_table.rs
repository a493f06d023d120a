//! Side-by-side scenario table, one row per book tier.

use std::fmt;

use roi_core::calculations::{ScenarioRow, ScenarioTable, ScenarioTotals};

use crate::utils::{format_currency, format_opt_pct, format_pct};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioLine {
    pub label: String,
    pub mgmt_commission: String,
    /// e.g. `61.6% of total`
    pub mgmt_share: String,
    pub current_book: String,
    pub book_share: String,
    pub total_revenue: String,
    /// Percentage, or the placeholder when the base is not positive.
    pub value_added_pct: String,
    /// e.g. `$20,375 added`
    pub value_added_abs: String,
}

impl ScenarioLine {
    fn from_row(row: &ScenarioRow) -> Self {
        Self {
            label: row.label.clone(),
            mgmt_commission: format_currency(row.mgmt_commission),
            mgmt_share: of_total(row.mgmt_share),
            current_book: format_currency(row.adjusted_book),
            book_share: of_total(row.book_share),
            total_revenue: format_currency(row.total_revenue),
            value_added_pct: format_opt_pct(row.uplift_pct),
            value_added_abs: added(row.uplift_abs),
        }
    }

    fn from_totals(totals: &ScenarioTotals) -> Self {
        Self {
            label: "Total".to_string(),
            mgmt_commission: format_currency(totals.mgmt_commission),
            mgmt_share: of_total(totals.mgmt_share),
            current_book: format_currency(totals.adjusted_book),
            book_share: of_total(totals.book_share),
            total_revenue: format_currency(totals.total_revenue),
            value_added_pct: format_opt_pct(totals.value_added_pct),
            value_added_abs: added(totals.value_added_abs),
        }
    }

    /// Single-line cells for plain-text output.
    fn cells(&self) -> [String; 5] {
        [
            self.label.clone(),
            format!("{} ({})", self.mgmt_commission, self.mgmt_share),
            format!("{} ({})", self.current_book, self.book_share),
            self.total_revenue.clone(),
            format!("{} ({})", self.value_added_pct, self.value_added_abs),
        ]
    }
}

fn of_total(share: rust_decimal::Decimal) -> String {
    format!("{} of total", format_pct(share))
}

fn added(amount: rust_decimal::Decimal) -> String {
    format!("{} added", format_currency(amount))
}

/// The scenario table as shown; totals only appear for a multi-tier book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioSection {
    pub rows: Vec<ScenarioLine>,
    pub totals: Option<ScenarioLine>,
}

impl ScenarioSection {
    pub const HEADING: &'static str = "Summary of Your Book Revenue Scenarios";
    pub const HEADERS: [&'static str; 5] = [
        "Scenario",
        "Management Fee Commission",
        "Your Current Book",
        "Total Revenue",
        "Value Added",
    ];

    pub fn capture(table: &ScenarioTable) -> Self {
        Self {
            rows: table.rows.iter().map(ScenarioLine::from_row).collect(),
            totals: table
                .shows_totals()
                .then(|| ScenarioLine::from_totals(&table.totals)),
        }
    }
}

impl fmt::Display for ScenarioSection {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let body: Vec<[String; 5]> = self
            .rows
            .iter()
            .chain(self.totals.as_ref())
            .map(ScenarioLine::cells)
            .collect();

        let mut widths = Self::HEADERS.map(|h| h.chars().count());
        for cells in &body {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        writeln!(f, "{}", Self::HEADING)?;
        write_row(f, &Self::HEADERS.map(String::from), &widths)?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "  {}", rule.join("  "))?;
        for cells in &body {
            write_row(f, cells, &widths)?;
        }
        Ok(())
    }
}

/// First column left-aligned, figures right-aligned.
fn write_row(
    f: &mut fmt::Formatter<'_>,
    cells: &[String; 5],
    widths: &[usize; 5],
) -> fmt::Result {
    write!(f, " ")?;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        let pad = width - cell.chars().count();
        if i == 0 {
            write!(f, " {cell}{}", " ".repeat(pad))?;
        } else {
            write!(f, "  {}{cell}", " ".repeat(pad))?;
        }
    }
    writeln!(f)
}
