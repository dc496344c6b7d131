//! The single top-level state object owned by the presentation layer.

use uuid::Uuid;

use crate::{
    aggregate::{Totals, aggregate},
    items::{ExpenseItem, PayerMode},
    money::Money,
    participants::Registry,
};

/// Everything a bill-splitting session holds: the participant registry, the
/// item ledger and the tax/tip pools.
///
/// There is no cached result to invalidate; [`Session::recompute`] derives
/// fresh [`Totals`] from the current state on every call, which for
/// human-entered receipts is always cheap.
#[derive(Clone, Debug)]
pub struct Session {
    participants: Registry,
    items: Vec<ExpenseItem>,
    tax: Money,
    tip: Money,
}

impl Session {
    /// Creates a session with the given participant names (padded to the
    /// two-person floor) and an empty ledger.
    #[must_use]
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            participants: Registry::new(names),
            items: Vec::new(),
            tax: Money::ZERO,
            tip: Money::ZERO,
        }
    }

    #[must_use]
    pub fn participants(&self) -> &Registry {
        &self.participants
    }

    pub fn add_participant(&mut self) -> Uuid {
        self.participants.add()
    }

    /// Refused (returns `false`) when the registry is at the two-person
    /// floor.
    pub fn remove_participant(&mut self, id: Uuid) -> bool {
        self.participants.remove(id)
    }

    pub fn rename_participant(&mut self, id: Uuid, name: &str) -> bool {
        self.participants.rename(id, name)
    }

    #[must_use]
    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    #[must_use]
    pub fn item(&self, id: Uuid) -> Option<&ExpenseItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Appends a ledger item and returns its id.
    pub fn add_item(&mut self, name: String, cost: Money, payer: PayerMode) -> Uuid {
        let item = ExpenseItem::new(name, cost, payer);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Replaces an item's editable fields. Returns `false` for an unknown id.
    pub fn update_item(&mut self, id: Uuid, name: String, cost: Money, payer: PayerMode) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.name = name;
                item.cost = cost;
                item.payer = payer;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, id: Uuid) -> bool {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn tax(&self) -> Money {
        self.tax
    }

    pub fn set_tax(&mut self, tax: Money) {
        self.tax = tax;
    }

    #[must_use]
    pub fn tip(&self) -> Money {
        self.tip
    }

    pub fn set_tip(&mut self, tip: Money) {
        self.tip = tip;
    }

    /// Full synchronous recompute over the current state.
    #[must_use]
    pub fn recompute(&self) -> Totals {
        aggregate(&self.items, &self.participants, self.tax, self.tip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_refused_at_floor() {
        let mut session = Session::new(&["Alice", "Bob"]);
        let alice = session.participants().get(0).unwrap().id;

        assert!(!session.remove_participant(alice));
        assert_eq!(session.participants().len(), 2);
    }

    #[test]
    fn item_lifecycle() {
        let mut session = Session::new(&["Alice", "Bob"]);
        let id = session.add_item("Milk".to_string(), Money::new(3_49), PayerMode::Even);
        assert_eq!(session.items().len(), 1);

        assert!(session.update_item(id, "Oat milk".to_string(), Money::new(4_99), PayerMode::Even));
        assert_eq!(session.item(id).unwrap().name, "Oat milk");

        assert!(session.remove_item(id));
        assert!(session.items().is_empty());
        assert!(!session.remove_item(id));
    }

    #[test]
    fn recompute_reflects_current_state() {
        let mut session = Session::new(&["Alice", "Bob"]);
        session.add_item("Bread".to_string(), Money::new(10_00), PayerMode::Even);
        session.set_tax(Money::new(1_00));

        let totals = session.recompute();
        assert_eq!(totals.subtotals, vec![Money::new(5_00), Money::new(5_00)]);
        assert_eq!(totals.tax_shares, vec![Money::new(0_50), Money::new(0_50)]);

        session.set_tax(Money::ZERO);
        let totals = session.recompute();
        assert_eq!(totals.tax_shares, vec![Money::ZERO, Money::ZERO]);
    }
}
