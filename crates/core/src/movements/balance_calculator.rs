//! Balance derivation from a movement history.

use std::cmp::Ordering;

use super::movements_model::{validate_quantity, Movement, MovementKind};
use crate::{Error, Result};

fn chronological(a: &Movement, b: &Movement) -> Ordering {
    a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id))
}

/// Folds the history of one SKU/warehouse pair into its current balance.
///
/// The latest `BALANCE_SNAPSHOT` (by timestamp, then id) seeds the total
/// and only movements at or after its timestamp are replayed, minus any
/// snapshot ordered before the seed. Without a
/// snapshot the whole history is replayed from zero. The input does not
/// need to be sorted.
pub fn compute_balance(history: &[Movement]) -> i64 {
    let mut ordered: Vec<&Movement> = history.iter().collect();
    ordered.sort_by(|a, b| chronological(a, b));

    let seed_at = ordered
        .iter()
        .rposition(|m| m.kind == MovementKind::BalanceSnapshot);

    let (mut total, replay): (i64, Vec<&Movement>) = match seed_at {
        Some(at) => {
            let seed = ordered[at];
            // Earlier snapshots never override the seed, even on a timestamp tie.
            let same_instant = ordered[..at].iter().copied().filter(|m| {
                m.timestamp == seed.timestamp && m.kind != MovementKind::BalanceSnapshot
            });
            (
                seed.quantity,
                same_instant.chain(ordered[at + 1..].iter().copied()).collect(),
            )
        }
        None => (0, ordered),
    };

    for movement in replay {
        match movement.kind {
            MovementKind::Entry => total += movement.quantity,
            MovementKind::Exit => total -= movement.quantity,
            MovementKind::BalanceSnapshot => total = movement.quantity,
        }
    }
    total
}

/// Checks a prospective movement against the pair's current balance.
pub fn check_movement(
    sku: &str,
    warehouse_id: i32,
    kind: MovementKind,
    quantity: i64,
    current_balance: i64,
) -> Result<()> {
    validate_quantity(kind, quantity)?;
    if kind == MovementKind::Exit && quantity > current_balance {
        return Err(Error::InsufficientBalance {
            sku: sku.to_string(),
            warehouse_id,
            available: current_balance,
            requested: quantity,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;

    fn base() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn mv(id: i32, kind: MovementKind, quantity: i64, minute: i64) -> Movement {
        Movement {
            id,
            sku: "SKU-1".to_string(),
            warehouse_id: 1,
            quantity,
            kind,
            timestamp: base() + Duration::minutes(minute),
            note: None,
            balance: 0,
        }
    }

    #[test]
    fn test_empty_history_is_zero() {
        assert_eq!(compute_balance(&[]), 0);
    }

    #[test]
    fn test_entry_exit_snapshot_sequence() {
        let mut history = vec![mv(1, MovementKind::Entry, 5, 0)];
        assert_eq!(compute_balance(&history), 5);
        history.push(mv(2, MovementKind::Exit, 3, 1));
        assert_eq!(compute_balance(&history), 2);
        history.push(mv(3, MovementKind::BalanceSnapshot, 100, 2));
        assert_eq!(compute_balance(&history), 100);
        history.push(mv(4, MovementKind::Entry, 1, 3));
        assert_eq!(compute_balance(&history), 101);
    }

    #[test]
    fn test_movements_before_snapshot_are_ignored() {
        let history = vec![
            mv(1, MovementKind::Entry, 50, 0),
            mv(2, MovementKind::BalanceSnapshot, 10, 5),
            mv(3, MovementKind::Exit, 4, 6),
            // Backdated entry recorded after the count.
            mv(4, MovementKind::Entry, 7, 1),
        ];
        assert_eq!(compute_balance(&history), 6);
    }

    #[test]
    fn test_latest_snapshot_wins_on_timestamp_tie() {
        let history = vec![
            mv(1, MovementKind::BalanceSnapshot, 40, 0),
            mv(2, MovementKind::BalanceSnapshot, 30, 0),
        ];
        assert_eq!(compute_balance(&history), 30);
    }

    #[test]
    fn test_tied_snapshots_keep_entries_at_that_instant() {
        let history = vec![
            mv(3, MovementKind::BalanceSnapshot, 30, 0),
            mv(2, MovementKind::Entry, 5, 0),
            mv(1, MovementKind::BalanceSnapshot, 40, 0),
            mv(4, MovementKind::Exit, 2, 1),
        ];
        assert_eq!(compute_balance(&history), 33);
    }

    #[test]
    fn test_same_timestamp_as_seed_is_replayed() {
        let history = vec![
            mv(1, MovementKind::Entry, 3, 0),
            mv(2, MovementKind::BalanceSnapshot, 20, 0),
        ];
        // The entry shares the seed's timestamp, so it counts after the seed.
        assert_eq!(compute_balance(&history), 23);
    }

    #[test]
    fn test_check_movement_rejects_overdraw() {
        let err = check_movement("SKU-1", 2, MovementKind::Exit, 11, 10).unwrap_err();
        match err {
            Error::InsufficientBalance {
                available,
                requested,
                warehouse_id,
                ..
            } => {
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
                assert_eq!(warehouse_id, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(check_movement("SKU-1", 2, MovementKind::Exit, 10, 10).is_ok());
        assert!(check_movement("SKU-1", 2, MovementKind::Entry, 0, 10).is_err());
        assert!(check_movement("SKU-1", 2, MovementKind::BalanceSnapshot, 0, 10).is_ok());
    }

    fn kind_strategy() -> impl Strategy<Value = MovementKind> {
        prop_oneof![
            4 => Just(MovementKind::Entry),
            4 => Just(MovementKind::Exit),
            1 => Just(MovementKind::BalanceSnapshot),
        ]
    }

    /// Histories with distinct timestamps, as the recorder writes them.
    fn history_strategy() -> impl Strategy<Value = Vec<Movement>> {
        prop::collection::vec((kind_strategy(), 0i64..1_000), 0..40).prop_map(|steps| {
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (kind, qty))| mv(i as i32 + 1, kind, qty, i as i64))
                .collect()
        })
    }

    fn running_sum(history: &[Movement]) -> i64 {
        history.iter().fold(0, |acc, m| match m.kind {
            MovementKind::Entry => acc + m.quantity,
            MovementKind::Exit => acc - m.quantity,
            MovementKind::BalanceSnapshot => m.quantity,
        })
    }

    proptest! {
        #[test]
        fn prop_balance_matches_running_sum(history in history_strategy()) {
            prop_assert_eq!(compute_balance(&history), running_sum(&history));
        }

        #[test]
        fn prop_balance_ignores_input_order(
            (history, shuffled) in history_strategy()
                .prop_flat_map(|h| (Just(h.clone()), Just(h).prop_shuffle()))
        ) {
            prop_assert_eq!(compute_balance(&shuffled), compute_balance(&history));
        }

        #[test]
        fn prop_history_after_last_snapshot_decides(history in history_strategy(), count in 0i64..500) {
            let mut with_count = history.clone();
            let next_id = history.len() as i32 + 1;
            with_count.push(mv(next_id, MovementKind::BalanceSnapshot, count, history.len() as i64));
            prop_assert_eq!(compute_balance(&with_count), count);
        }
    }
}
