//! The allocation engine: distributes one amount across the registry.
//!
//! Two distribution rules exist and both reconcile exactly, in cents, with
//! the remainder on the **last** participant in registry order:
//!
//! - even split: every slot gets the truncated per-head share, the last slot
//!   absorbs the leftover cents;
//! - proportional split ([`distribute_proportionally`]): every slot but the
//!   last gets its weight-rounded share, the last slot gets the pool minus
//!   what was distributed. Used for percentage splits and for the tax and
//!   tip pools.

use crate::{
    items::{PayerMode, SplitSpec},
    money::Money,
    participants::Registry,
};

/// Result of allocating one amount: one share per participant, in registry
/// order.
///
/// `valid == false` means the amount could not be allocated (imbalanced
/// custom split or a payer that no longer exists); the shares are all zero
/// and the item simply contributes nothing downstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub shares: Vec<Money>,
    pub valid: bool,
}

impl Allocation {
    fn invalid(count: usize) -> Self {
        Self {
            shares: vec![Money::ZERO; count],
            valid: false,
        }
    }

    fn of(shares: Vec<Money>) -> Self {
        Self {
            shares,
            valid: true,
        }
    }

    /// Sum of all shares. Equals the allocated amount for a valid
    /// allocation, zero otherwise.
    #[must_use]
    pub fn total(&self) -> Money {
        self.shares.iter().copied().sum()
    }
}

/// Allocates `cost` across the registry according to `payer`.
///
/// Never fails: inconsistent input (a deleted payer, a stale custom split)
/// yields an all-zero invalid allocation so a recompute over the whole
/// ledger always completes.
#[must_use]
pub fn allocate(cost: Money, payer: &PayerMode, participants: &Registry) -> Allocation {
    let count = participants.len();
    match payer {
        PayerMode::Single(id) => match participants.index_of(*id) {
            Some(index) => {
                let mut shares = vec![Money::ZERO; count];
                shares[index] = cost;
                Allocation::of(shares)
            }
            None => Allocation::invalid(count),
        },
        PayerMode::Even => Allocation::of(split_evenly(cost, count)),
        PayerMode::Custom(spec) => {
            if !split_valid(spec, cost, participants) {
                return Allocation::invalid(count);
            }
            match spec {
                SplitSpec::Dollar(values) => Allocation::of(
                    participants
                        .ids()
                        .map(|id| values.get(&id).copied().unwrap_or(Money::ZERO))
                        .collect(),
                ),
                SplitSpec::Percent(values) => {
                    let weights: Vec<i64> = participants
                        .ids()
                        .map(|id| values.get(&id).map_or(0, |p| p.hundredths()))
                        .collect();
                    Allocation::of(distribute_proportionally(&weights, cost))
                }
            }
        }
    }
}

/// Divides `amount` equally: every slot gets `amount / count` truncated to
/// cents, the last slot additionally absorbs the remainder.
#[must_use]
pub fn split_evenly(amount: Money, count: usize) -> Vec<Money> {
    if count == 0 {
        return Vec::new();
    }

    let base = amount.cents() / count as i64;
    let mut shares = vec![Money::new(base); count];
    let remainder = amount.cents() - base * count as i64;
    if remainder != 0 {
        shares[count - 1] += Money::new(remainder);
    }
    shares
}

/// Splits `pool` proportionally to `weights`.
///
/// Every slot but the last gets its share rounded half-up to the cent; the
/// last slot gets whatever reconciles the sum to `pool` exactly. All-zero
/// weights mean no ratio is defined and every share is zero, whatever the
/// pool.
#[must_use]
pub fn distribute_proportionally(weights: &[i64], pool: Money) -> Vec<Money> {
    let count = weights.len();
    if count == 0 {
        return Vec::new();
    }

    let total: i64 = weights.iter().sum();
    if total == 0 {
        return vec![Money::ZERO; count];
    }

    let mut shares = vec![Money::ZERO; count];
    let mut distributed = 0i64;
    for (index, weight) in weights.iter().enumerate().take(count - 1) {
        // Widen before multiplying; pool * weight can exceed i64 for large
        // receipts with basis-point weights.
        let numerator = pool.cents() as i128 * *weight as i128;
        let denominator = total as i128;
        let share = ((numerator + denominator / 2) / denominator) as i64;
        shares[index] = Money::new(share);
        distributed += share;
    }
    shares[count - 1] = Money::new(pool.cents() - distributed);
    shares
}

/// Pure validation predicate for a custom split against an item cost.
///
/// Valid iff the value map covers exactly the current registry ids and the
/// values sum to 100% (percent unit) or to the cost (dollar unit). Exposed
/// separately from [`allocate`] so the presentation layer can check a spec
/// on every keystroke without recomputing aggregation.
#[must_use]
pub fn split_valid(spec: &SplitSpec, cost: Money, participants: &Registry) -> bool {
    if spec.len() != participants.len() {
        return false;
    }

    match spec {
        SplitSpec::Percent(values) => {
            if !participants.ids().all(|id| values.contains_key(&id)) {
                return false;
            }
            let sum: i64 = values.values().map(|p| p.hundredths()).sum();
            sum == crate::money::Percent::FULL.hundredths()
        }
        SplitSpec::Dollar(values) => {
            if !participants.ids().all(|id| values.contains_key(&id)) {
                return false;
            }
            let sum: Money = values.values().copied().sum();
            sum == cost
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use uuid::Uuid;

    use super::*;
    use crate::money::Percent;

    fn cents(shares: &[Money]) -> Vec<i64> {
        shares.iter().map(|m| m.cents()).collect()
    }

    #[test]
    fn even_split_remainder_to_last() {
        assert_eq!(cents(&split_evenly(Money::new(10_01), 2)), vec![500, 501]);
        assert_eq!(
            cents(&split_evenly(Money::new(30_00), 3)),
            vec![1000, 1000, 1000]
        );
        assert_eq!(cents(&split_evenly(Money::new(2), 3)), vec![0, 0, 2]);
        assert_eq!(cents(&split_evenly(Money::ZERO, 2)), vec![0, 0]);
    }

    #[test]
    fn even_split_sums_exactly() {
        for amount in [0, 1, 99, 100, 10_01, 33_33, 100_000_01] {
            for count in 2..=7 {
                let shares = split_evenly(Money::new(amount), count);
                let total: i64 = shares.iter().map(|m| m.cents()).sum();
                assert_eq!(total, amount, "amount {amount} count {count}");
            }
        }
    }

    #[test]
    fn proportional_rounds_all_but_last() {
        // Ratios 33.33 / 66.67 over a 10.00 pool: round(3.333) = 3.33,
        // the rest reconciles the sum.
        let shares = distribute_proportionally(&[33_33, 66_67], Money::new(10_00));
        assert_eq!(cents(&shares), vec![333, 667]);
    }

    #[test]
    fn proportional_sums_exactly() {
        for pool in [1, 99, 10_00, 10_01, 999_99] {
            for weights in [vec![1, 1], vec![33_33, 66_67], vec![1, 2, 4], vec![97, 1, 1, 1]] {
                let shares = distribute_proportionally(&weights, Money::new(pool));
                let total: i64 = shares.iter().map(|m| m.cents()).sum();
                assert_eq!(total, pool, "pool {pool} weights {weights:?}");
            }
        }
    }

    #[test]
    fn proportional_zero_weights_mean_zero_shares() {
        let shares = distribute_proportionally(&[0, 0, 0], Money::new(50_00));
        assert_eq!(cents(&shares), vec![0, 0, 0]);
    }

    #[test]
    fn single_payer_gets_everything() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let bob = registry.get(1).unwrap().id;

        let allocation = allocate(Money::new(12_50), &PayerMode::Single(bob), &registry);
        assert!(allocation.valid);
        assert_eq!(cents(&allocation.shares), vec![0, 1250]);
    }

    #[test]
    fn deleted_payer_contributes_nothing() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let allocation = allocate(
            Money::new(12_50),
            &PayerMode::Single(Uuid::new_v4()),
            &registry,
        );
        assert!(!allocation.valid);
        assert_eq!(cents(&allocation.shares), vec![0, 0]);
    }

    #[test]
    fn percent_split_allocates_proportionally() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let values: HashMap<Uuid, Percent> = registry
            .ids()
            .zip([Percent::new(50_00), Percent::new(50_00)])
            .collect();
        let payer = PayerMode::Custom(SplitSpec::Percent(values));

        let allocation = allocate(Money::new(10_01), &payer, &registry);
        assert!(allocation.valid);
        assert_eq!(allocation.total(), Money::new(10_01));
        assert_eq!(cents(&allocation.shares), vec![501, 500]);
    }

    #[test]
    fn imbalanced_percent_split_is_invalid() {
        // 60 + 41 = 101%.
        let registry = Registry::new(&["Alice", "Bob"]);
        let values: HashMap<Uuid, Percent> = registry
            .ids()
            .zip([Percent::new(60_00), Percent::new(41_00)])
            .collect();
        let payer = PayerMode::Custom(SplitSpec::Percent(values));

        let allocation = allocate(Money::new(50_00), &payer, &registry);
        assert!(!allocation.valid);
        assert_eq!(cents(&allocation.shares), vec![0, 0]);
    }

    #[test]
    fn dollar_split_uses_values_verbatim() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let values: HashMap<Uuid, Money> = registry
            .ids()
            .zip([Money::new(4_00), Money::new(6_00)])
            .collect();
        let payer = PayerMode::Custom(SplitSpec::Dollar(values));

        let allocation = allocate(Money::new(10_00), &payer, &registry);
        assert!(allocation.valid);
        assert_eq!(cents(&allocation.shares), vec![400, 600]);
    }

    #[test]
    fn dollar_split_off_by_a_cent_is_invalid() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let values: HashMap<Uuid, Money> = registry
            .ids()
            .zip([Money::new(4_00), Money::new(5_99)])
            .collect();
        let spec = SplitSpec::Dollar(values);

        assert!(!split_valid(&spec, Money::new(10_00), &registry));
        let allocation = allocate(Money::new(10_00), &PayerMode::Custom(spec), &registry);
        assert!(!allocation.valid);
        assert_eq!(allocation.total(), Money::ZERO);
    }

    #[test]
    fn stale_split_missing_a_participant_is_invalid() {
        let registry = Registry::new(&["Alice", "Bob", "Carol"]);
        // Spec written when only two people existed.
        let values: HashMap<Uuid, Percent> = registry
            .ids()
            .take(2)
            .zip([Percent::new(50_00), Percent::new(50_00)])
            .collect();
        let spec = SplitSpec::Percent(values);

        assert!(!split_valid(&spec, Money::new(10_00), &registry));
    }
}
