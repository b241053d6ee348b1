use std::collections::HashSet;

use poker_tournament::domain::{
    blinds::BlindStructure,
    card::Card,
    chips::Chips,
    hand::Street,
    player::Player,
};
use poker_tournament::engine::{
    actions::Decision,
    betting::{conduct_street, MAX_BET, MIN_BET},
    errors::EngineError,
    game_loop::{collect_blinds, play_hand, play_hand_async, HandSetup},
    hand_history::{HandEventKind, HandHistory},
    pot::Pot,
};
use poker_tournament::eval::EvaluatorKind;
use poker_tournament::infra::rng::DeterministicRng;
use poker_tournament::strategy::{ConfigurationError, StrategyConfig, StrategyEngine};

fn players(n: u64, stack: u64) -> Vec<Player> {
    let config = StrategyConfig {
        iterations: 25,
        ..StrategyConfig::default()
    };
    (1..=n)
        .map(|id| Player::new(id, format!("P{id}"), Chips(stack), StrategyEngine::new(&config).unwrap()))
        .collect()
}

fn setup(round: u32) -> HandSetup {
    HandSetup {
        table_id: 1,
        round,
        blinds: BlindStructure::default_structure()
            .level_by_number(round)
            .cloned()
            .unwrap(),
        evaluator: EvaluatorKind::Reference,
    }
}

fn total_stacks(players: &[Player]) -> Chips {
    players.iter().map(|p| p.stack).sum()
}

//
// collect_blinds
//
#[test]
fn collect_blinds_heads_up_scenario() {
    let mut table = players(2, 5000);
    let mut pot = Pot::new();
    let mut history = HandHistory::new();
    let level = BlindStructure::default_structure().level_by_number(1).cloned().unwrap();

    let collected = collect_blinds(&mut table, &level, &mut pot, &mut history);

    assert_eq!(table[0].stack, Chips(4950));
    assert_eq!(table[1].stack, Chips(4900));
    assert_eq!(pot.total, Chips(150));
    assert_eq!(collected, Chips(150));
    // Анте не собирается.
    assert_eq!(pot.blinds, Chips(150));
    assert_eq!(pot.bets, Chips::ZERO);

    match &history.events[0].kind {
        HandEventKind::BlindsPosted {
            small_blind,
            big_blind,
        } => {
            assert_eq!(*small_blind, Some((0, 1, Chips(50))));
            assert_eq!(*big_blind, Some((1, 2, Chips(100))));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn short_stack_posts_what_it_has() {
    let mut table = players(3, 5000);
    table[1].stack = Chips(60);
    let mut pot = Pot::new();
    let mut history = HandHistory::new();
    let level = BlindStructure::default_structure().level_by_number(1).cloned().unwrap();

    collect_blinds(&mut table, &level, &mut pot, &mut history);

    assert_eq!(table[1].stack, Chips::ZERO);
    assert_eq!(pot.total, Chips(110));
    // Третье место блайнд не платит.
    assert_eq!(table[2].stack, Chips(5000));
}

#[test]
fn pot_take_empties_the_pot() {
    let mut pot = Pot::new();
    pot.add_blind(Chips(150));
    pot.add_bet(Chips(70));
    assert_eq!(pot.total, Chips(220));
    assert_eq!(pot.take(), Chips(220));
    assert!(pot.is_empty());
    assert_eq!(pot, Pot::new());
}

//
// conduct_street
//
#[test]
fn every_player_acts_once_per_street() {
    let mut table = players(3, 5000);
    let mut pot = Pot::new();
    let mut history = HandHistory::new();
    let mut rng = DeterministicRng::seed_from_u64(5);

    conduct_street(&mut table, Street::Flop, &[], &mut pot, &mut rng, &mut history).unwrap();

    let actions: Vec<_> = history.actions().cloned().collect();
    assert_eq!(actions.len(), 3);
    assert_eq!(
        actions.iter().map(|a| a.player_id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let contributed: Chips = actions.iter().map(|a| a.amount).sum();
    assert_eq!(pot.total, contributed);
    assert_eq!(pot.bets, contributed);

    for event in &history.events {
        if let HandEventKind::PlayerActed { action, game_state, .. } = &event.kind {
            let bet = game_state.current_bet.0;
            assert!((MIN_BET..=MAX_BET).contains(&bet));
            match action.decision {
                Decision::Fold => assert_eq!(action.amount, Chips::ZERO),
                Decision::Call => assert_eq!(action.amount, game_state.current_bet),
                Decision::Raise => assert!((MIN_BET..=MAX_BET).contains(&action.amount.0)),
            }
        }
    }

    // Стеки за call/raise не списываются.
    assert_eq!(total_stacks(&table), Chips(15_000));

    // Каждый видел решения двух соседей.
    for p in &table {
        assert_eq!(p.history.len(), 1);
        assert_eq!(p.dossier.len(), 2);
        assert!(p.dossier.get(&p.name).is_none());
    }
}

//
// play_hand
//
#[test]
fn full_hand_awards_exactly_the_collected_pot() {
    let mut table = players(4, 5000);
    let before = total_stacks(&table);
    let mut rng = DeterministicRng::seed_from_u64(99);

    let (summary, history) = play_hand(&mut table, &setup(1), &mut rng).unwrap();

    let bets: Chips = history.actions().map(|a| a.amount).sum();
    assert_eq!(summary.blinds_collected, Chips(150));
    assert_eq!(summary.bets_collected, bets);
    assert_eq!(summary.total_pot, summary.blinds_collected + summary.bets_collected);

    // Блайнды ушли со стеков, весь банк вернулся победителю.
    assert_eq!(total_stacks(&table), before + bets);

    let winners: Vec<_> = summary.results.iter().filter(|r| r.is_winner).collect();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].player_id, summary.winner);
    assert_eq!(winners[0].won, summary.total_pot);

    let awarded: Vec<Chips> = history
        .events
        .iter()
        .filter_map(|e| match &e.kind {
            HandEventKind::PotAwarded { amount, .. } => Some(*amount),
            _ => None,
        })
        .collect();
    assert_eq!(awarded, vec![summary.total_pot]);
}

#[test]
fn full_hand_deals_distinct_cards_and_four_streets() {
    let mut table = players(8, 5000);
    let mut rng = DeterministicRng::seed_from_u64(1);

    let (summary, history) = play_hand(&mut table, &setup(2), &mut rng).unwrap();

    assert_eq!(summary.board.len(), 5);
    let mut seen: HashSet<Card> = summary.board.iter().copied().collect();
    for p in &table {
        assert_eq!(p.hole_cards.len(), 2);
        for c in &p.hole_cards {
            assert!(seen.insert(*c), "card {c} dealt twice");
        }
        assert_eq!(p.history.len(), 4);
    }

    let streets: Vec<Street> = history
        .events
        .iter()
        .filter_map(|e| match &e.kind {
            HandEventKind::StreetChanged { street } => Some(*street),
            _ => None,
        })
        .collect();
    assert_eq!(streets, Street::ORDER.to_vec());

    assert!(matches!(history.events.first().map(|e| &e.kind), Some(HandEventKind::HandStarted { .. })));
    assert!(matches!(history.events.last().map(|e| &e.kind), Some(HandEventKind::HandFinished { .. })));
    assert_eq!(history.actions().count(), 8 * 4);

    // Все, кто сидел за столом, вскрываются на шоудауне.
    let reveals = history
        .events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::ShowdownReveal { .. }))
        .count();
    assert_eq!(reveals, 8);
    assert_eq!(summary.results.len(), 8);
}

#[test]
fn opponents_are_recorded_for_every_decision() {
    let mut table = players(3, 5000);
    let mut rng = DeterministicRng::seed_from_u64(17);
    play_hand(&mut table, &setup(1), &mut rng).unwrap();

    for p in &table {
        for other in table.iter().filter(|o| o.id != p.id) {
            let stats = p.dossier.get(&other.name).unwrap();
            assert_eq!(stats.aggressive + stats.fold + stats.call, 4);
        }
    }
}

#[test]
fn single_player_cannot_play_a_hand() {
    let mut table = players(1, 5000);
    let mut rng = DeterministicRng::seed_from_u64(0);
    let err = play_hand(&mut table, &setup(1), &mut rng).unwrap_err();
    assert!(matches!(err, EngineError::NotEnoughPlayers { seated: 1 }));
    assert_eq!(err.to_string(), "not enough players for a hand: 1 seated");
    assert_eq!(table[0].stack, Chips(5000));
}

#[test]
fn broken_strategy_surfaces_as_engine_error() {
    let mut table = players(2, 5000);
    table[1].strategy =
        serde_json::from_str(r#"{ "iterations": 0, "actions": ["call"], "state": [] }"#).unwrap();
    let mut rng = DeterministicRng::seed_from_u64(0);

    let err = play_hand(&mut table, &setup(1), &mut rng).unwrap_err();
    assert!(matches!(err, EngineError::Strategy(ConfigurationError::ZeroIterations)));
}

#[tokio::test]
async fn async_hand_matches_sync_hand() {
    let mut sync_table = players(5, 5000);
    let mut async_table = sync_table.clone();

    let mut rng = DeterministicRng::seed_from_u64(2024);
    let (sync_summary, sync_history) = play_hand(&mut sync_table, &setup(1), &mut rng).unwrap();

    let mut rng = DeterministicRng::seed_from_u64(2024);
    let (async_summary, async_history) = play_hand_async(&mut async_table, &setup(1), &mut rng)
        .await
        .unwrap();

    assert_eq!(sync_summary, async_summary);
    assert_eq!(sync_history, async_history);
    for (a, b) in sync_table.iter().zip(&async_table) {
        assert_eq!(a.stack, b.stack);
        assert_eq!(a.history, b.history);
    }
}
