//! Turn engine scenarios: rotation, elimination, and both game-over paths.

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::domain::events::{EventCard, EventKind};
use crate::domain::session::{GamePhase, Player};
use crate::domain::test_prelude::{lobby, started, LIMIT};
use crate::domain::turn::{apply_event, apply_minigame, take_turn, TurnAction};
use crate::errors::domain::{ConflictKind, DomainError};

const HIT: EventCard = EventCard {
    title: "Hit",
    description: "lose one",
    kind: EventKind::Negative,
    lives_change: -1,
    points_change: 0,
};

const KNOCKOUT: EventCard = EventCard {
    title: "Knockout",
    description: "lose everything",
    kind: EventKind::Negative,
    lives_change: -10,
    points_change: 0,
};

fn jackpot(points: i32) -> EventCard {
    EventCard {
        title: "Jackpot",
        description: "points",
        kind: EventKind::Positive,
        lives_change: 0,
        points_change: points,
    }
}

#[test]
fn ana_and_beto_first_turn() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto"], now);
    assert_eq!(s.turn_number, 1);
    assert_eq!(s.current_player().unwrap().name, "Ana");

    apply_event(&mut s, None, &HIT, 3, now, LIMIT).unwrap();

    assert_eq!(s.players[0].name, "Ana");
    assert_eq!(s.players[0].lives, 4);
    assert_eq!(s.players[0].points, 0);
    assert_eq!(s.current_player().unwrap().name, "Beto");
    assert_eq!(s.turn_number, 2);

    let last = s.last_event.as_ref().unwrap();
    assert_eq!(last.player_name, "Ana");
    assert_eq!(last.dice_roll, Some(3));
    assert!(!last.eliminated);
}

#[test]
fn turn_before_start_is_rejected() {
    let now = Instant::now();
    let mut s = lobby(&["Ana", "Beto"], now);
    let err = apply_event(&mut s, None, &HIT, 1, now, LIMIT).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::GameNotStarted, _)
    ));
    assert_eq!(s.players[0].lives, 5);
}

#[test]
fn out_of_turn_actor_is_rejected_without_mutation() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto"], now);
    let beto = s.players[1].id;
    let version = s.version;

    let err = apply_event(&mut s, Some(beto), &HIT, 1, now, LIMIT).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::NotYourTurn, _)));
    assert_eq!(err.detail(), "It is Ana's turn");
    assert_eq!(s.version, version);
    assert_eq!(s.turn_number, 1);

    let ana = s.players[0].id;
    apply_event(&mut s, Some(ana), &HIT, 1, now, LIMIT).unwrap();
}

#[test]
fn elimination_down_to_one_player_ends_the_game() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto"], now);

    apply_event(&mut s, None, &KNOCKOUT, 6, now, LIMIT).unwrap();

    assert!(s.game_over);
    assert_eq!(s.phase(), GamePhase::Finished);
    assert_eq!(s.players.len(), 1);
    assert_eq!(s.eliminated.len(), 1);
    assert_eq!(s.eliminated[0].name, "Ana");
    assert_eq!(s.winner.as_ref().unwrap().name, "Beto");
    assert!(s.last_event.as_ref().unwrap().eliminated);
    assert_eq!(s.finished_at, Some(now));
}

#[test]
fn elimination_in_the_middle_keeps_index_on_next_player() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto", "Caro"], now);
    apply_event(&mut s, None, &HIT, 1, now, LIMIT).unwrap(); // Ana
    assert_eq!(s.current_idx, 1);

    apply_event(&mut s, None, &KNOCKOUT, 1, now, LIMIT).unwrap(); // Beto out
    assert!(!s.game_over);
    assert_eq!(s.players.len(), 2);
    assert_eq!(s.current_idx, 1);
    assert_eq!(s.current_player().unwrap().name, "Caro");
}

#[test]
fn elimination_of_last_slot_wraps_to_first() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto", "Caro"], now);
    apply_event(&mut s, None, &HIT, 1, now, LIMIT).unwrap();
    apply_event(&mut s, None, &HIT, 1, now, LIMIT).unwrap();
    assert_eq!(s.current_idx, 2);

    apply_event(&mut s, None, &KNOCKOUT, 1, now, LIMIT).unwrap(); // Caro out
    assert_eq!(s.current_idx, 0);
    assert_eq!(s.current_player().unwrap().name, "Ana");
}

#[test]
fn timeout_picks_highest_points_first_in_rotation_on_tie() {
    let created = Instant::now();
    let mut s = started(&["Ana", "Beto", "Caro"], created);

    apply_event(&mut s, None, &jackpot(2), 1, created, LIMIT).unwrap(); // Ana 2
    apply_event(&mut s, None, &jackpot(5), 1, created, LIMIT).unwrap(); // Beto 5
    assert!(!s.game_over);

    // Caro ties Beto on the turn that crosses the limit.
    let late = created + LIMIT;
    apply_event(&mut s, None, &jackpot(5), 1, late, LIMIT).unwrap();

    assert!(s.game_over);
    assert_eq!(s.winner.as_ref().unwrap().name, "Beto");
    assert_eq!(s.players.len(), 3);
}

#[test]
fn just_before_the_limit_the_game_continues() {
    let created = Instant::now();
    let mut s = started(&["Ana", "Beto"], created);
    let almost = created + LIMIT - Duration::from_millis(1);
    apply_event(&mut s, None, &HIT, 1, almost, LIMIT).unwrap();
    assert!(!s.game_over);
}

#[test]
fn finished_game_rejects_turns_without_mutation() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto"], now);
    apply_event(&mut s, None, &KNOCKOUT, 1, now, LIMIT).unwrap();
    let frozen = s.clone();

    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for action in [TurnAction::RollDice, TurnAction::PlayMinigame] {
        let err = take_turn(&mut s, action, None, &mut rng, now, LIMIT).unwrap_err();
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::GameAlreadyOver, _)
        ));
    }
    assert_eq!(s.version, frozen.version);
    assert_eq!(s.players, frozen.players);
    assert_eq!(s.winner, frozen.winner);
}

#[test]
fn minigame_grants_a_life_and_advances() {
    let now = Instant::now();
    let mut s = started(&["Ana", "Beto"], now);

    apply_minigame(&mut s, None, 1, now, LIMIT).unwrap();

    assert_eq!(s.players[1].lives, 6);
    assert_eq!(s.players[0].lives, 5);
    assert_eq!(s.current_player().unwrap().name, "Beto");
    assert_eq!(s.turn_number, 2);

    let last = s.last_event.as_ref().unwrap();
    assert_eq!(last.title, "Minigame");
    assert_eq!(last.player_name, "Beto");
    assert_eq!(last.dice_roll, None);
}

#[test]
fn minigame_still_honours_the_time_limit() {
    let created = Instant::now();
    let mut s = started(&["Ana", "Beto"], created);
    apply_minigame(&mut s, None, 0, created + LIMIT, LIMIT).unwrap();
    assert!(s.game_over);
    assert_eq!(s.winner.as_ref().unwrap().name, "Ana");
}

#[test]
fn seeded_turns_are_reproducible() {
    let now = Instant::now();
    let run = |seed: u64| {
        let mut s = started(&["Ana", "Beto", "Caro"], now);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..10 {
            if take_turn(&mut s, TurnAction::RollDice, None, &mut rng, now, LIMIT).is_err() {
                break;
            }
        }
        let tally = |players: &[Player]| {
            players
                .iter()
                .map(|p| (p.name.clone(), p.lives, p.points))
                .collect::<Vec<_>>()
        };
        (tally(&s.players), tally(&s.eliminated), s.turn_number)
    };
    assert_eq!(run(99), run(99));
}
