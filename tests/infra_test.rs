// tests/infra_test.rs

use std::path::PathBuf;
use std::sync::Arc;

use log::Level;

use poker_tournament::domain::{
    card::parse_cards,
    chips::Chips,
    deck::Deck,
    hand::{DecisionRecord, GameStateSnapshot, Street},
    player::{Dossier, Observation},
    tournament::{TournamentConfig, TournamentStatus},
};
use poker_tournament::engine::actions::{Decision, PlayerAction};
use poker_tournament::engine::hand_history::HandEventKind;
use poker_tournament::engine::RandomSource;
use poker_tournament::infra::{
    generate_player_name, DeterministicRng, EventSink, FileStore, InMemoryStore, MemorySink,
    PersistenceError, PlayerStateBlob, PlayerStore, RngSeed, SystemRng, TournamentEvent,
};
use poker_tournament::strategy::{StrategyEntry, StrategyState};
use poker_tournament::{TournamentRuntime, TournamentSnapshot};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("poker_tournament_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn sample_blob(name: &str) -> PlayerStateBlob {
    let mut dossier = Dossier::new();
    dossier.record("villain", Observation::Aggressive);
    dossier.record("villain", Observation::Bluff);

    PlayerStateBlob {
        name: name.to_string(),
        history: vec![DecisionRecord {
            game_state: GameStateSnapshot {
                street: Street::Turn,
                current_bet: Chips(30),
                player: name.to_string(),
                stack: Chips(4800),
                community_cards: parse_cards("Ah Kd 7c 2s").unwrap(),
            },
            decision: Decision::Call,
        }],
        dossier,
        strategy: StrategyState::from_entries(vec![
            StrategyEntry { action: Decision::Fold, regret: -1.5, weight: 0.25 },
            StrategyEntry { action: Decision::Call, regret: 3.0, weight: 7.75 },
        ]),
    }
}

//
// RNG
//
#[test]
fn deterministic_rng_repeats_for_same_seed() {
    let mut a = DeterministicRng::seed_from_u64(123);
    let mut b = DeterministicRng::seed_from_u64(123);
    for _ in 0..100 {
        assert_eq!(a.gen_range_u64(10, 100), b.gen_range_u64(10, 100));
    }

    let da = Deck::shuffled_with(&mut DeterministicRng::seed_from_u64(1));
    let db = Deck::shuffled_with(&mut DeterministicRng::seed_from_u64(2));
    assert_ne!(da, db);
}

#[test]
fn ranges_are_inclusive_and_degenerate_ranges_return_low() {
    let mut rng = DeterministicRng::seed_from_u64(9);
    let mut seen_low = false;
    let mut seen_high = false;
    for _ in 0..2000 {
        let x = rng.gen_range_u64(1, 4);
        assert!((1..=4).contains(&x));
        seen_low |= x == 1;
        seen_high |= x == 4;

        let y = rng.gen_range_i64(-20, 20);
        assert!((-20..=20).contains(&y));
    }
    assert!(seen_low && seen_high);

    assert_eq!(rng.gen_range_u64(7, 7), 7);
    assert_eq!(rng.gen_range_u64(9, 3), 9);
    assert_eq!(rng.gen_range_i64(-5, -8), -5);
    assert_eq!(SystemRng.gen_range_u64(5, 5), 5);
}

#[test]
fn system_rng_shuffles_a_full_deck() {
    let deck = Deck::shuffled_with(&mut SystemRng);
    assert_eq!(deck.len(), 52);
}

#[test]
fn derived_seeds_differ_per_round_and_table() {
    let base = RngSeed::from_u64(42);
    assert_eq!(base.derive(1, 0), RngSeed::from_u64(42).derive(1, 0));
    assert_ne!(base.derive(1, 0), base.derive(1, 1));
    assert_ne!(base.derive(1, 0), base.derive(2, 0));
    assert_ne!(base.derive(1, 0), RngSeed::from_u64(43).derive(1, 0));

    let mut a = base.derive(3, 5).to_rng();
    let mut b = base.derive(3, 5).to_rng();
    assert_eq!(a.gen_range_u64(0, u64::MAX - 1), b.gen_range_u64(0, u64::MAX - 1));
}

//
// имена
//
#[test]
fn player_names_are_readable_and_unique_by_id() {
    let mut rng = DeterministicRng::seed_from_u64(5);
    let names: Vec<String> = (1..=50).map(|id| generate_player_name(&mut rng, id)).collect();

    assert!(names[0].ends_with("001"));
    assert!(names[49].ends_with("050"));
    assert!(names.iter().all(|n| n.chars().all(|c| c.is_ascii_alphanumeric())));

    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());

    let mut again = DeterministicRng::seed_from_u64(5);
    assert_eq!(generate_player_name(&mut again, 1), names[0]);
}

//
// хранилища
//
#[test]
fn in_memory_store_round_trips_player_state() {
    let mut store = InMemoryStore::new();
    assert!(matches!(store.load_player("hero"), Err(PersistenceError::NotFound(_))));

    let blob = sample_blob("hero");
    store.save_player(&blob).unwrap();
    assert_eq!(store.load_player("hero").unwrap(), blob);
    assert_eq!(store.player_count(), 1);
}

#[test]
fn corrupted_record_is_a_decode_error() {
    let mut store = InMemoryStore::new();
    store.insert_raw("hero", b"not json at all".to_vec());
    assert!(matches!(store.load_player("hero"), Err(PersistenceError::Decode(_))));
}

#[test]
fn file_store_writes_one_file_per_player() {
    let dir = scratch_dir("players");
    let mut store = FileStore::open(&dir).unwrap();
    assert!(dir.is_dir());

    let blob = sample_blob("Lucky Fox/007");
    store.save_player(&blob).unwrap();

    let path = store.player_path("Lucky Fox/007");
    assert_eq!(path.file_name().unwrap(), "Lucky_Fox_007_state.json");
    assert!(path.exists());
    assert_eq!(store.load_player("Lucky Fox/007").unwrap(), blob);
    assert!(matches!(store.load_player("nobody"), Err(PersistenceError::NotFound(_))));

    std::fs::write(store.player_path("broken"), b"{").unwrap();
    assert!(matches!(store.load_player("broken"), Err(PersistenceError::Decode(_))));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn file_store_keeps_tournament_snapshot() {
    let dir = scratch_dir("snapshot");
    let mut store = FileStore::open(&dir).unwrap();
    assert!(matches!(store.load_snapshot(), Err(PersistenceError::NotFound(_))));

    let config = TournamentConfig {
        num_players: 4,
        seed: Some(3),
        ..TournamentConfig::default()
    };
    let runtime = TournamentRuntime::setup(config, Arc::new(MemorySink::new())).unwrap();
    store.save_snapshot(&TournamentSnapshot::from_runtime(&runtime)).unwrap();

    let restored = store.load_snapshot().unwrap();
    assert_eq!(restored.seed, 3);
    assert_eq!(restored.round, 1);
    assert_eq!(restored.players.len(), 4);
    assert_eq!(restored.status, TournamentStatus::Running);

    let _ = std::fs::remove_dir_all(&dir);
}

//
// события
//
#[test]
fn memory_sink_keeps_events_in_order() {
    let sink = MemorySink::new();
    assert!(sink.is_empty());

    sink.record(&TournamentEvent::Error { message: "first".into() });
    sink.record(&TournamentEvent::PlayerEliminated {
        player_id: 3,
        name: "SlyOtter003".into(),
        place: 7,
        round: 2,
    });

    let events = sink.events();
    assert_eq!(sink.len(), 2);
    assert!(matches!(&events[0], TournamentEvent::Error { message } if message == "first"));
    assert_eq!(events[1].to_string(), "SlyOtter003 eliminated in round 2, place 7");
}

#[test]
fn decisions_log_at_debug_and_errors_at_error() {
    let acted = TournamentEvent::Hand {
        table_id: 1,
        round: 1,
        event: HandEventKind::PlayerActed {
            action: PlayerAction {
                player_id: 1,
                seat: 0,
                decision: Decision::Raise,
                amount: Chips(40),
            },
            game_state: GameStateSnapshot {
                street: Street::Preflop,
                current_bet: Chips(20),
                player: "hero".into(),
                stack: Chips(5000),
                community_cards: Vec::new(),
            },
            pot_after: Chips(190),
        },
    };
    assert_eq!(acted.level(), Level::Debug);
    assert!(acted.to_string().contains("hero decided raise"));

    let finished = TournamentEvent::TournamentFinished {
        status: TournamentStatus::Aborted {
            round: 3,
            remaining: vec!["a".into(), "b".into()],
        },
        rounds_played: 2,
    };
    assert_eq!(finished.level(), Level::Info);
    assert_eq!(
        finished.to_string(),
        "Tournament aborted: no blinds for round 3, 2 players left"
    );

    assert_eq!(TournamentEvent::Error { message: "x".into() }.level(), Level::Error);
}
