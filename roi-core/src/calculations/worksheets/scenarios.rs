//! Per-tier scenario rows.
//!
//! Each tier of the existing book is compared side by side against the same
//! management fee commission. The management fee is one pool for the whole
//! partner, so every row carries it in full rather than a share of it.
//!
//! | Column | Per row |
//! |--------|---------|
//! | Book commission | tier amount × tier rate |
//! | Adjusted book | book commission × book portion % |
//! | Master plan | book commission × master plan % |
//! | Total revenue | shared management commission + adjusted book + master plan |
//! | Uplift | total revenue − book commission (and as a % of it) |
//!
//! The totals row sums every row and measures value added against the grand
//! book commission.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Tier;
use crate::calculations::common::{change_pct, percent_of, share_of, sum};

/// One tier's scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioRow {
    pub label: String,
    pub book_commission: Decimal,
    pub mgmt_commission: Decimal,
    pub adjusted_book: Decimal,
    pub master: Decimal,
    pub total_revenue: Decimal,
    pub uplift_abs: Decimal,
    /// `None` when this tier's book commission is zero or negative.
    pub uplift_pct: Option<Decimal>,
    pub mgmt_share: Decimal,
    pub book_share: Decimal,
}

/// Sums across every scenario row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTotals {
    pub mgmt_commission: Decimal,
    pub adjusted_book: Decimal,
    pub master: Decimal,
    pub total_revenue: Decimal,
    /// Grand book commission the totals are measured against.
    pub total_book_base: Decimal,
    pub value_added_abs: Decimal,
    pub value_added_pct: Option<Decimal>,
    pub mgmt_share: Decimal,
    pub book_share: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub rows: Vec<ScenarioRow>,
    pub totals: ScenarioTotals,
}

impl ScenarioTable {
    /// Builds one row per tier plus the totals row.
    pub fn build(
        tiers: &[Tier],
        shared_mgmt_commission: Decimal,
        book_portion_pct: Decimal,
        master_plan_pct: Decimal,
    ) -> Self {
        let rows: Vec<ScenarioRow> = tiers
            .iter()
            .map(|tier| {
                Self::row(
                    tier,
                    shared_mgmt_commission,
                    book_portion_pct,
                    master_plan_pct,
                )
            })
            .collect();
        let totals = Self::totals(&rows);

        Self { rows, totals }
    }

    /// Whether the presentation should show the totals row.
    pub fn shows_totals(&self) -> bool {
        self.rows.len() > 1
    }

    fn row(
        tier: &Tier,
        shared_mgmt_commission: Decimal,
        book_portion_pct: Decimal,
        master_plan_pct: Decimal,
    ) -> ScenarioRow {
        let book_commission = tier.commission();
        let adjusted_book = percent_of(book_commission, book_portion_pct);
        let master = percent_of(book_commission, master_plan_pct);
        let total_revenue = shared_mgmt_commission
            .saturating_add(adjusted_book)
            .saturating_add(master);
        let uplift_abs = total_revenue.saturating_sub(book_commission);

        ScenarioRow {
            label: tier.label.clone(),
            book_commission,
            mgmt_commission: shared_mgmt_commission,
            adjusted_book,
            master,
            total_revenue,
            uplift_abs,
            uplift_pct: change_pct(uplift_abs, book_commission),
            mgmt_share: share_of(shared_mgmt_commission, total_revenue),
            book_share: share_of(adjusted_book, total_revenue),
        }
    }

    fn totals(rows: &[ScenarioRow]) -> ScenarioTotals {
        let mgmt_commission = sum(rows.iter().map(|r| r.mgmt_commission));
        let adjusted_book = sum(rows.iter().map(|r| r.adjusted_book));
        let master = sum(rows.iter().map(|r| r.master));
        let total_revenue = sum(rows.iter().map(|r| r.total_revenue));
        let total_book_base = sum(rows.iter().map(|r| r.book_commission));
        let value_added_abs = total_revenue.saturating_sub(total_book_base);

        ScenarioTotals {
            mgmt_commission,
            adjusted_book,
            master,
            total_revenue,
            total_book_base,
            value_added_abs,
            value_added_pct: change_pct(value_added_abs, total_book_base),
            mgmt_share: share_of(mgmt_commission, total_revenue),
            book_share: share_of(adjusted_book, total_revenue),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::FieldValue;

    fn tier(
        label: &str,
        amount: Decimal,
        pct: Decimal,
    ) -> Tier {
        Tier {
            label: label.to_string(),
            amount: FieldValue::Number(amount),
            pct: FieldValue::Number(pct),
        }
    }

    fn two_tier_book() -> Vec<Tier> {
        vec![
            tier("Book 1", dec!(250000), dec!(5)),
            tier("Book 2", dec!(100000), dec!(10)),
        ]
    }

    // =========================================================================
    // row tests
    // =========================================================================

    #[test]
    fn row_carries_full_shared_mgmt_commission() {
        let table = ScenarioTable::build(&two_tier_book(), dec!(20250), dec!(100), dec!(1));

        assert_eq!(table.rows[0].mgmt_commission, dec!(20250));
        assert_eq!(table.rows[1].mgmt_commission, dec!(20250));
    }

    #[test]
    fn row_for_default_tier() {
        let table = ScenarioTable::build(&[Tier::numbered(1)], dec!(20250), dec!(100), dec!(1));
        let row = &table.rows[0];

        assert_eq!(row.label, "Book 1");
        assert_eq!(row.book_commission, dec!(12500));
        assert_eq!(row.adjusted_book, dec!(12500));
        assert_eq!(row.master, dec!(125));
        assert_eq!(row.total_revenue, dec!(32875));
        assert_eq!(row.uplift_abs, dec!(20375));
        assert_eq!(row.uplift_pct, Some(dec!(163)));
    }

    #[test]
    fn row_for_second_tier() {
        let table = ScenarioTable::build(&two_tier_book(), dec!(20250), dec!(100), dec!(1));
        let row = &table.rows[1];

        assert_eq!(row.book_commission, dec!(10000));
        assert_eq!(row.master, dec!(100));
        assert_eq!(row.total_revenue, dec!(30350));
        assert_eq!(row.uplift_abs, dec!(20350));
        assert_eq!(row.uplift_pct, Some(dec!(203.5)));
        assert_eq!(row.mgmt_share.round_dp(2), dec!(66.72));
        assert_eq!(row.book_share.round_dp(2), dec!(32.95));
    }

    #[test]
    fn row_with_zero_base_has_no_uplift_pct() {
        let book = vec![tier("Empty", dec!(0), dec!(5))];

        let table = ScenarioTable::build(&book, dec!(20250), dec!(100), dec!(1));

        assert_eq!(table.rows[0].uplift_pct, None);
        assert_eq!(table.rows[0].mgmt_share, dec!(100));
        assert_eq!(table.rows[0].book_share, dec!(0));
    }

    #[test]
    fn row_with_zero_total_has_zero_shares() {
        let book = vec![tier("Empty", dec!(0), dec!(0))];

        let table = ScenarioTable::build(&book, dec!(0), dec!(100), dec!(1));

        assert_eq!(table.rows[0].total_revenue, dec!(0));
        assert_eq!(table.rows[0].mgmt_share, dec!(0));
        assert_eq!(table.rows[0].book_share, dec!(0));
    }

    // =========================================================================
    // totals tests
    // =========================================================================

    #[test]
    fn totals_sum_rows() {
        let table = ScenarioTable::build(&two_tier_book(), dec!(20250), dec!(100), dec!(1));
        let totals = &table.totals;

        assert_eq!(totals.mgmt_commission, dec!(40500));
        assert_eq!(totals.adjusted_book, dec!(22500));
        assert_eq!(totals.master, dec!(225));
        assert_eq!(totals.total_revenue, dec!(63225));
        assert_eq!(totals.total_book_base, dec!(22500));
    }

    #[test]
    fn totals_measure_value_added_against_grand_book() {
        let table = ScenarioTable::build(&two_tier_book(), dec!(20250), dec!(100), dec!(1));
        let totals = &table.totals;

        assert_eq!(totals.value_added_abs, dec!(40725));
        assert_eq!(totals.value_added_pct, Some(dec!(181)));
        assert_eq!(totals.mgmt_share.round_dp(2), dec!(64.06));
        assert_eq!(totals.book_share.round_dp(2), dec!(35.59));
    }

    #[test]
    fn totals_row_shown_only_for_multiple_tiers() {
        let single = ScenarioTable::build(&[Tier::numbered(1)], dec!(20250), dec!(100), dec!(1));
        let double = ScenarioTable::build(&two_tier_book(), dec!(20250), dec!(100), dec!(1));

        assert!(!single.shows_totals());
        assert!(double.shows_totals());
    }
}
