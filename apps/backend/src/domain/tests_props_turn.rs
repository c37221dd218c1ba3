//! Property-based tests for turn engine invariants.

use std::time::{Duration, Instant};

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::events::EVENT_CATALOG;
use crate::domain::test_prelude::{self, started, LIMIT};
use crate::domain::turn::{apply_event, take_turn, TurnAction};

const NAMES: [&str; 7] = ["Ana", "Beto", "Caro", "Dani", "Eli", "Fer", "Gus"];

fn action() -> impl Strategy<Value = TurnAction> {
    prop_oneof![
        4 => Just(TurnAction::RollDice),
        1 => Just(TurnAction::PlayMinigame),
    ]
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: each successful dice turn changes exactly one previously active
    /// player by the event's deltas and bumps the turn counter by one.
    #[test]
    fn prop_single_player_delta(
        players in 2usize..=7,
        event_idx in 0..EVENT_CATALOG.len(),
        warmup in 0usize..5,
        seed in any::<u64>(),
    ) {
        let now = Instant::now();
        let mut s = started(&NAMES[..players], now);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..warmup {
            if take_turn(&mut s, TurnAction::RollDice, None, &mut rng, now, LIMIT).is_err() {
                break;
            }
        }
        prop_assume!(!s.game_over);

        let before = s.clone();
        let actor_id = before.players[before.current_idx].id;
        let event = EVENT_CATALOG[event_idx];
        apply_event(&mut s, None, &event, 4, now, LIMIT).unwrap();

        prop_assert_eq!(s.turn_number, before.turn_number + 1);
        prop_assert!(s.version > before.version);

        let after_actor = s
            .players
            .iter()
            .chain(s.eliminated.iter())
            .find(|p| p.id == actor_id)
            .unwrap();
        let before_actor = &before.players[before.current_idx];
        prop_assert_eq!(after_actor.lives, before_actor.lives + event.lives_change);
        prop_assert_eq!(after_actor.points, before_actor.points + event.points_change);

        for p in before.players.iter().filter(|p| p.id != actor_id) {
            let now_p = s.players.iter().find(|q| q.id == p.id).unwrap();
            prop_assert_eq!(now_p, p);
        }
    }

    /// Property: across any sequence of turns the roster is conserved, the
    /// index stays in bounds while running, and a finished game has a winner.
    #[test]
    fn prop_sequence_invariants(
        players in 2usize..=7,
        actions in prop::collection::vec(action(), 1..80),
        seed in any::<u64>(),
        minutes_per_turn in 0u64..3,
    ) {
        let created = Instant::now();
        let mut s = started(&NAMES[..players], created);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut now = created;

        for action in actions {
            let was_over = s.game_over;
            let eliminated_before = s.eliminated.clone();
            let result = take_turn(&mut s, action, None, &mut rng, now, LIMIT);

            if was_over {
                prop_assert!(result.is_err());
                continue;
            }
            prop_assert!(result.is_ok());

            prop_assert_eq!(s.players.len() + s.eliminated.len(), players);
            prop_assert!(s.eliminated.starts_with(&eliminated_before));
            prop_assert!(s.eliminated.iter().all(|p| p.lives <= 0));
            prop_assert!(s.players.iter().all(|p| p.lives > 0));

            if s.game_over {
                prop_assert!(s.winner.is_some());
            } else {
                prop_assert!(s.current_idx < s.players.len());
                prop_assert!(s.players.len() >= 2);
            }

            now += Duration::from_secs(60 * minutes_per_turn);
        }
    }

    /// Property: once set, the winner never changes.
    #[test]
    fn prop_winner_set_once(seed in any::<u64>()) {
        let created = Instant::now();
        let mut s = started(&NAMES[..3], created);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let late = created + LIMIT;
        take_turn(&mut s, TurnAction::RollDice, None, &mut rng, late, LIMIT).unwrap();
        prop_assert!(s.game_over);
        let winner = s.winner.clone();
        let _ = take_turn(&mut s, TurnAction::RollDice, None, &mut rng, late, LIMIT);
        prop_assert_eq!(s.winner, winner);
    }
}
