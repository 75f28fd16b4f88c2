use analysis::coords::DisplayPosition;
use analysis::keyevents::{self, KeyEvent, ProbabilityChange};
use analysis::model;
use proptest::prelude::*;

fn key_event(index: usize, delta: f64) -> KeyEvent {
    KeyEvent {
        match_clock: keyevents::match_clock(index as u64 * 1000),
        minute: index as u64,
        kind: "Champion Kill".to_owned(),
        position: DisplayPosition { x: 0.0, y: 0.0 },
        description: format!("Event {}", index),
        player_team_probability_change: ProbabilityChange {
            before: 0.5,
            after: 0.5 + delta,
            delta,
        },
    }
}

proptest! {
    #[test]
    fn advantage_is_bounded(a in 0.0f64..1e7, b in 0.0f64..1e7) {
        let advantage = model::normalized_advantage(a, b);
        prop_assert!((-1.0..=1.0).contains(&advantage));
    }

    #[test]
    fn equal_sides_have_no_advantage(a in 0.0f64..1e7) {
        prop_assert_eq!(0.0, model::normalized_advantage(a, a));
        prop_assert_eq!(0.5, model::win_probability(a, a, model::DEFAULT_EXPONENT));
    }

    #[test]
    fn probability_is_bounded(a in 0.0f64..1e7, b in 0.0f64..1e7, exponent in 0.5f64..4.0) {
        let probability = model::win_probability(a, b, exponent);
        prop_assert!((0.0..=1.0).contains(&probability));
    }

    #[test]
    fn momentum_telescopes(probabilities in prop::collection::vec(0.0f64..=1.0, 1..60)) {
        let impacts = model::momentum_impacts(&probabilities);

        prop_assert_eq!(probabilities.len(), impacts.len());
        prop_assert_eq!(None, impacts[impacts.len() - 1]);

        let defined: Vec<f64> = impacts.iter().filter_map(|i| *i).collect();
        prop_assert_eq!(probabilities.len() - 1, defined.len());

        let total: f64 = defined.iter().sum();
        let expected = probabilities[probabilities.len() - 1] - probabilities[0];
        prop_assert!((total - expected).abs() < 1e-9);
    }

    #[test]
    fn ranking_is_idempotent(deltas in prop::collection::vec(-0.5f64..0.5, 0..40), top_n in 0usize..10) {
        let candidates: Vec<_> = deltas
            .iter()
            .enumerate()
            .map(|(i, d)| key_event(i, *d))
            .collect();

        let first = keyevents::rank(candidates.clone(), top_n);
        let second = keyevents::rank(candidates, top_n);
        prop_assert_eq!(&first, &second);

        prop_assert!(first.len() <= top_n);
        for pair in first.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (da, db) = (
                a.player_team_probability_change.delta.abs(),
                b.player_team_probability_change.delta.abs(),
            );
            prop_assert!(da >= db);
            if da == db {
                prop_assert!(a.minute < b.minute);
            }
        }

        let reranked = keyevents::rank(first.clone(), top_n);
        prop_assert_eq!(first, reranked);
    }
}
