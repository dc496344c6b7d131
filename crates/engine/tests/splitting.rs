use std::collections::HashMap;

use engine::{Money, PayerMode, Percent, Session, SplitSpec};
use uuid::Uuid;

fn two_person_session() -> Session {
    Session::new(&["Alice", "Bob"])
}

fn participant_id(session: &Session, index: usize) -> Uuid {
    session
        .participants()
        .get(index)
        .expect("participant missing")
        .id
}

fn cents(shares: &[Money]) -> Vec<i64> {
    shares.iter().map(|m| m.cents()).collect()
}

#[test]
fn even_split_assigns_odd_cent_to_last_person() {
    let mut session = two_person_session();
    session.add_item("Groceries".to_string(), Money::new(10_01), PayerMode::Even);

    let totals = session.recompute();
    assert_eq!(cents(&totals.subtotals), vec![500, 501]);
    assert_eq!(totals.total_subtotal(), Money::new(10_01));
}

#[test]
fn even_split_with_no_remainder() {
    let mut session = Session::new(&["Alice", "Bob", "Carol"]);
    session.add_item("Dinner".to_string(), Money::new(30_00), PayerMode::Even);

    let totals = session.recompute();
    assert_eq!(cents(&totals.subtotals), vec![1000, 1000, 1000]);
}

#[test]
fn tax_follows_subtotal_ratio_with_remainder_to_last() {
    let mut session = two_person_session();
    let alice = participant_id(&session, 0);
    let bob = participant_id(&session, 1);
    session.add_item("A".to_string(), Money::new(33_33), PayerMode::Single(alice));
    session.add_item("B".to_string(), Money::new(66_67), PayerMode::Single(bob));
    session.set_tax(Money::new(10_00));

    let totals = session.recompute();
    assert_eq!(cents(&totals.tax_shares), vec![333, 667]);
    assert_eq!(
        totals.tax_shares.iter().copied().sum::<Money>(),
        Money::new(10_00)
    );
}

#[test]
fn imbalanced_percent_split_contributes_nothing() {
    let mut session = two_person_session();
    let values: HashMap<Uuid, Percent> = session
        .participants()
        .ids()
        .zip([Percent::new(60_00), Percent::new(41_00)])
        .collect();
    session.add_item(
        "Wine".to_string(),
        Money::new(50_00),
        PayerMode::Custom(SplitSpec::Percent(values)),
    );
    session.set_tax(Money::new(5_00));
    session.set_tip(Money::new(5_00));

    let totals = session.recompute();
    assert_eq!(cents(&totals.subtotals), vec![0, 0]);
    // No subtotal, no ratio: both pools stay undistributed.
    assert_eq!(cents(&totals.tax_shares), vec![0, 0]);
    assert_eq!(cents(&totals.tip_shares), vec![0, 0]);
    assert_eq!(totals.grand_total(), Money::ZERO);
}

#[test]
fn valid_dollar_split_passes_values_through() {
    let mut session = two_person_session();
    let values: HashMap<Uuid, Money> = session
        .participants()
        .ids()
        .zip([Money::new(12_34), Money::new(7_66)])
        .collect();
    session.add_item(
        "Takeout".to_string(),
        Money::new(20_00),
        PayerMode::Custom(SplitSpec::Dollar(values)),
    );

    let totals = session.recompute();
    assert_eq!(cents(&totals.subtotals), vec![1234, 766]);
}

#[test]
fn removing_participant_at_floor_is_a_noop() {
    let mut session = two_person_session();
    let alice = participant_id(&session, 0);

    assert!(!session.remove_participant(alice));
    assert_eq!(session.participants().len(), 2);

    // Above the floor the removal goes through, and an item paid by the
    // removed person degrades to a zero contribution instead of an error.
    session.add_participant();
    let carol = participant_id(&session, 2);
    session.add_item("Snacks".to_string(), Money::new(5_00), PayerMode::Single(carol));
    assert!(session.remove_participant(carol));

    let totals = session.recompute();
    assert_eq!(cents(&totals.subtotals), vec![0, 0]);
}

#[test]
fn totals_are_componentwise_sums() {
    let mut session = two_person_session();
    let alice = participant_id(&session, 0);
    session.add_item("A".to_string(), Money::new(25_00), PayerMode::Single(alice));
    session.add_item("B".to_string(), Money::new(10_01), PayerMode::Even);
    session.set_tax(Money::new(3_17));
    session.set_tip(Money::new(6_00));

    let totals = session.recompute();
    for i in 0..2 {
        assert_eq!(
            totals.totals[i],
            totals.subtotals[i] + totals.tax_shares[i] + totals.tip_shares[i]
        );
    }
    assert_eq!(
        totals.grand_total(),
        Money::new(25_00 + 10_01 + 3_17 + 6_00)
    );
}

#[test]
fn breakdown_rows_match_summary() {
    let mut session = two_person_session();
    let alice = participant_id(&session, 0);
    session.add_item("Milk".to_string(), Money::new(3_49), PayerMode::Single(alice));
    session.add_item("Bread".to_string(), Money::new(10_01), PayerMode::Even);

    let rows = engine::item_rows(&session);
    let totals = session.recompute();

    let mut accumulated = vec![Money::ZERO; 2];
    for row in &rows {
        for (acc, share) in accumulated.iter_mut().zip(&row.shares) {
            *acc += *share;
        }
    }
    assert_eq!(accumulated, totals.subtotals);
}
