//! Per-item breakdown rows for the running-total view and the CSV export.

use crate::{money::Money, session::Session, split::allocate};

/// One ledger item resolved into display form: payer label and the share
/// each participant carries for it.
#[derive(Clone, Debug)]
pub struct ItemRow {
    pub name: String,
    pub cost: Money,
    pub payer: String,
    pub shares: Vec<Money>,
    pub valid: bool,
}

/// Resolves every ledger item into an [`ItemRow`], in ledger order.
///
/// Invalid items keep their cost and label but carry all-zero shares, so a
/// consumer can render them highlighted without special-casing the math.
#[must_use]
pub fn item_rows(session: &Session) -> Vec<ItemRow> {
    session
        .items()
        .iter()
        .map(|item| {
            let allocation = allocate(item.cost, &item.payer, session.participants());
            ItemRow {
                name: item.display_name().to_string(),
                cost: item.cost,
                payer: item.payer.label(session.participants()),
                shares: allocation.shares,
                valid: allocation.valid,
            }
        })
        .collect()
}

/// Payer label used for the Tax and Tip rows.
pub const RATIO_LABEL: &str = "Split by ratio";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::PayerMode;

    fn registry_names() -> Vec<String> {
        vec!["Alice".to_string(), "Bob".to_string()]
    }

    #[test]
    fn rows_resolve_labels_and_shares() {
        let mut session = Session::new(&registry_names());
        let alice = session.participants().get(0).unwrap().id;
        session.add_item("Milk".to_string(), Money::new(3_49), PayerMode::Single(alice));
        session.add_item(String::new(), Money::new(10_01), PayerMode::Even);

        let rows = item_rows(&session);
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].name, "Milk");
        assert_eq!(rows[0].payer, "Alice");
        assert_eq!(rows[0].shares, vec![Money::new(3_49), Money::ZERO]);
        assert!(rows[0].valid);

        assert_eq!(rows[1].name, "Unnamed Item");
        assert_eq!(rows[1].payer, "Split Evenly");
        assert_eq!(rows[1].shares, vec![Money::new(5_00), Money::new(5_01)]);
    }

    #[test]
    fn invalid_row_keeps_cost_with_zero_shares() {
        let mut session = Session::new(&registry_names());
        session.add_item(
            "Ghost".to_string(),
            Money::new(9_99),
            PayerMode::Single(uuid::Uuid::new_v4()),
        );

        let rows = item_rows(&session);
        assert!(!rows[0].valid);
        assert_eq!(rows[0].cost, Money::new(9_99));
        assert_eq!(rows[0].shares, vec![Money::ZERO, Money::ZERO]);
    }
}
