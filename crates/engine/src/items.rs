//! Expense entries and their allocation modes.

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    money::{Money, Percent},
    participants::Registry,
};

/// How an item's cost is assigned across the registry.
#[derive(Clone, Debug, PartialEq)]
pub enum PayerMode {
    /// The whole cost lands on one participant.
    Single(Uuid),
    /// Divided equally, remainder to the last participant.
    Even,
    /// Explicit per-participant percentages or dollar amounts.
    Custom(SplitSpec),
}

impl PayerMode {
    /// Display label for summaries and exports. An unresolved participant id
    /// falls back to its string form, mirroring what the user would see in a
    /// stale selector.
    #[must_use]
    pub fn label(&self, participants: &Registry) -> String {
        match self {
            PayerMode::Single(id) => participants
                .name_of(*id)
                .map(str::to_string)
                .unwrap_or_else(|| id.to_string()),
            PayerMode::Even => "Split Evenly".to_string(),
            PayerMode::Custom(_) => "Custom Split".to_string(),
        }
    }
}

/// Custom-split specification: one value per participant, either as
/// percentages of the cost or as literal dollar amounts.
#[derive(Clone, Debug, PartialEq)]
pub enum SplitSpec {
    Percent(HashMap<Uuid, Percent>),
    Dollar(HashMap<Uuid, Money>),
}

impl SplitSpec {
    /// Number of per-participant values in the spec.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SplitSpec::Percent(values) => values.len(),
            SplitSpec::Dollar(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One line-item expense.
#[derive(Clone, Debug)]
pub struct ExpenseItem {
    pub id: Uuid,
    pub name: String,
    pub cost: Money,
    pub payer: PayerMode,
}

impl ExpenseItem {
    #[must_use]
    pub fn new(name: String, cost: Money, payer: PayerMode) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            cost,
            payer,
        }
    }

    /// Display name, falling back when the field was left blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "Unnamed Item"
        } else {
            trimmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_resolves_names() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let alice = registry.get(0).unwrap().id;

        assert_eq!(PayerMode::Single(alice).label(&registry), "Alice");
        assert_eq!(PayerMode::Even.label(&registry), "Split Evenly");
        assert_eq!(
            PayerMode::Custom(SplitSpec::Percent(HashMap::new())).label(&registry),
            "Custom Split"
        );
    }

    #[test]
    fn label_falls_back_to_id_when_unresolved() {
        let registry = Registry::new(&["Alice", "Bob"]);
        let ghost = Uuid::new_v4();
        assert_eq!(PayerMode::Single(ghost).label(&registry), ghost.to_string());
    }

    #[test]
    fn blank_names_fall_back() {
        let item = ExpenseItem::new("  ".to_string(), Money::new(100), PayerMode::Even);
        assert_eq!(item.display_name(), "Unnamed Item");
    }
}
