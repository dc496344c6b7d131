//! The aggregation engine: per-person subtotals and proportional tax/tip.

use crate::{
    items::ExpenseItem,
    money::Money,
    participants::Registry,
    split::{allocate, distribute_proportionally},
};

/// Per-person results of a full recompute, all vectors in registry order.
///
/// `totals[i] = subtotals[i] + tax_shares[i] + tip_shares[i]` for every
/// participant, and each pool vector sums exactly to its input pool
/// whenever the total subtotal is nonzero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Totals {
    pub subtotals: Vec<Money>,
    pub tax_shares: Vec<Money>,
    pub tip_shares: Vec<Money>,
    pub totals: Vec<Money>,
}

impl Totals {
    /// Sum of all per-person subtotals.
    #[must_use]
    pub fn total_subtotal(&self) -> Money {
        self.subtotals.iter().copied().sum()
    }

    /// Grand total across participants, tax and tip included.
    #[must_use]
    pub fn grand_total(&self) -> Money {
        self.totals.iter().copied().sum()
    }
}

/// Runs every ledger item through the allocation engine, accumulates
/// per-person subtotals and distributes the tax and tip pools
/// proportionally to them.
///
/// Invalid items contribute their all-zero share vector; they are iterated,
/// not skipped, so one bad custom split never stops the rest of the bill
/// from computing. When every subtotal is zero no ratio is defined and both
/// pools stay undistributed.
#[must_use]
pub fn aggregate(
    items: &[ExpenseItem],
    participants: &Registry,
    tax: Money,
    tip: Money,
) -> Totals {
    let count = participants.len();
    let mut subtotals = vec![Money::ZERO; count];

    for item in items {
        let allocation = allocate(item.cost, &item.payer, participants);
        for (subtotal, share) in subtotals.iter_mut().zip(allocation.shares) {
            *subtotal += share;
        }
    }

    let weights: Vec<i64> = subtotals.iter().map(|m| m.cents()).collect();
    let tax_shares = distribute_proportionally(&weights, tax);
    let tip_shares = distribute_proportionally(&weights, tip);

    let totals = subtotals
        .iter()
        .zip(tax_shares.iter())
        .zip(tip_shares.iter())
        .map(|((subtotal, tax), tip)| *subtotal + *tax + *tip)
        .collect();

    Totals {
        subtotals,
        tax_shares,
        tip_shares,
        totals,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::*;
    use crate::{
        items::{PayerMode, SplitSpec},
        money::Percent,
    };

    fn cents(shares: &[Money]) -> Vec<i64> {
        shares.iter().map(|m| m.cents()).collect()
    }

    #[test]
    fn subtotals_accumulate_across_items() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let alice = registry.get(0).unwrap().id;
        let items = vec![
            ExpenseItem::new("Milk".to_string(), Money::new(3_49), PayerMode::Single(alice)),
            ExpenseItem::new("Bread".to_string(), Money::new(10_01), PayerMode::Even),
        ];

        let totals = aggregate(&items, &registry, Money::ZERO, Money::ZERO);
        assert_eq!(cents(&totals.subtotals), vec![849, 501]);
        assert_eq!(totals.totals, totals.subtotals);
    }

    #[test]
    fn tax_and_tip_follow_subtotal_ratios() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let alice = registry.get(0).unwrap().id;
        let bob = registry.get(1).unwrap().id;
        let items = vec![
            ExpenseItem::new("A".to_string(), Money::new(33_33), PayerMode::Single(alice)),
            ExpenseItem::new("B".to_string(), Money::new(66_67), PayerMode::Single(bob)),
        ];

        let totals = aggregate(&items, &registry, Money::new(10_00), Money::new(5_00));
        assert_eq!(cents(&totals.tax_shares), vec![333, 667]);
        assert_eq!(cents(&totals.tip_shares), vec![167, 333]);
        assert_eq!(cents(&totals.totals), vec![3833, 7667]);
        assert_eq!(totals.grand_total(), Money::new(115_00));
    }

    #[test]
    fn zero_subtotal_leaves_pools_undistributed() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let totals = aggregate(&[], &registry, Money::new(99_99), Money::new(12_34));
        assert_eq!(cents(&totals.tax_shares), vec![0, 0]);
        assert_eq!(cents(&totals.tip_shares), vec![0, 0]);
        assert_eq!(totals.grand_total(), Money::ZERO);
    }

    #[test]
    fn invalid_items_contribute_zero_but_others_compute() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let imbalanced: HashMap<Uuid, Percent> = registry
            .ids()
            .zip([Percent::new(60_00), Percent::new(41_00)])
            .collect();
        let items = vec![
            ExpenseItem::new(
                "Broken".to_string(),
                Money::new(50_00),
                PayerMode::Custom(SplitSpec::Percent(imbalanced)),
            ),
            ExpenseItem::new(
                "Ghost payer".to_string(),
                Money::new(7_00),
                PayerMode::Single(Uuid::new_v4()),
            ),
            ExpenseItem::new("Bread".to_string(), Money::new(10_00), PayerMode::Even),
        ];

        let totals = aggregate(&items, &registry, Money::new(2_00), Money::ZERO);
        assert_eq!(cents(&totals.subtotals), vec![500, 500]);
        assert_eq!(cents(&totals.tax_shares), vec![100, 100]);
    }

    #[test]
    fn pools_reconcile_exactly_for_awkward_ratios() {
        let registry = Registry::new(&["Alice", "Bob", "Carol"]);
        let ids: Vec<Uuid> = registry.ids().collect();
        let items: Vec<ExpenseItem> = ids
            .iter()
            .zip([Money::new(10_00), Money::new(10_00), Money::new(10_00)])
            .map(|(id, cost)| ExpenseItem::new("x".to_string(), cost, PayerMode::Single(*id)))
            .collect();

        let totals = aggregate(&items, &registry, Money::new(1_00), Money::new(0_01));
        let tax_sum: i64 = totals.tax_shares.iter().map(|m| m.cents()).sum();
        let tip_sum: i64 = totals.tip_shares.iter().map(|m| m.cents()).sum();
        assert_eq!(tax_sum, 100);
        assert_eq!(tip_sum, 1);
    }
}
