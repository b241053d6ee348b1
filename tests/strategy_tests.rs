use poker_tournament::domain::chips::Chips;
use poker_tournament::domain::hand::{GameStateSnapshot, Street};
use poker_tournament::engine::actions::Decision;
use poker_tournament::infra::rng::DeterministicRng;
use poker_tournament::strategy::{
    regret_matching, ConfigurationError, FixedPayoffs, PayoffModel, RandomPayoffs, StrategyConfig,
    StrategyEngine, StrategyEntry, StrategyState,
};

const EPS: f64 = 1e-9;

fn snapshot(bet: u64) -> GameStateSnapshot {
    GameStateSnapshot {
        street: Street::Preflop,
        current_bet: Chips(bet),
        player: "hero".into(),
        stack: Chips(5000),
        community_cards: Vec::new(),
    }
}

fn engine(iterations: u32) -> StrategyEngine {
    StrategyEngine::new(&StrategyConfig {
        iterations,
        ..StrategyConfig::default()
    })
    .unwrap()
}

//
// regret_matching
//
#[test]
fn empty_state_gives_uniform_probabilities() {
    let probs = regret_matching(&StrategyState::new(), &Decision::ALL);
    assert_eq!(probs.len(), 3);
    for p in &probs {
        assert!((p - 1.0 / 3.0).abs() < EPS);
    }
    assert!((probs.iter().sum::<f64>() - 1.0).abs() < EPS);
}

#[test]
fn non_positive_regrets_give_uniform_probabilities() {
    let state = StrategyState::from_entries(vec![
        StrategyEntry { action: Decision::Fold, regret: -3.0, weight: 0.0 },
        StrategyEntry { action: Decision::Call, regret: 0.0, weight: 0.0 },
        StrategyEntry { action: Decision::Raise, regret: -100.0, weight: 0.0 },
    ]);
    let probs = regret_matching(&state, &Decision::ALL);
    for p in &probs {
        assert!((p - 1.0 / 3.0).abs() < EPS);
    }
}

#[test]
fn positive_regrets_are_matched_proportionally() {
    let state = StrategyState::from_entries(vec![
        StrategyEntry { action: Decision::Fold, regret: -5.0, weight: 0.0 },
        StrategyEntry { action: Decision::Call, regret: 10.0, weight: 0.0 },
        StrategyEntry { action: Decision::Raise, regret: 30.0, weight: 0.0 },
    ]);
    let probs = regret_matching(&state, &Decision::ALL);
    assert!(probs[0].abs() < EPS);
    assert!((probs[1] - 0.25).abs() < EPS);
    assert!((probs[2] - 0.75).abs() < EPS);
}

#[test]
fn regret_matching_on_empty_action_set_is_empty() {
    assert!(regret_matching(&StrategyState::new(), &[]).is_empty());
}

//
// конфигурация
//
#[test]
fn zero_iterations_is_a_configuration_error() {
    let err = StrategyEngine::new(&StrategyConfig {
        iterations: 0,
        ..StrategyConfig::default()
    })
    .unwrap_err();
    assert_eq!(err, ConfigurationError::ZeroIterations);
}

#[test]
fn empty_or_duplicate_actions_are_configuration_errors() {
    let empty = StrategyConfig {
        iterations: 10,
        actions: Vec::new(),
    };
    assert_eq!(empty.validate(), Err(ConfigurationError::EmptyActionSet));

    let duplicate = StrategyConfig {
        iterations: 10,
        actions: vec![Decision::Call, Decision::Raise, Decision::Call],
    };
    assert_eq!(
        StrategyEngine::new(&duplicate).unwrap_err(),
        ConfigurationError::DuplicateAction(Decision::Call)
    );
}

#[test]
fn engine_restored_with_zero_iterations_refuses_to_decide() {
    let mut broken: StrategyEngine =
        serde_json::from_str(r#"{ "iterations": 0, "actions": ["fold"], "state": [] }"#).unwrap();
    let mut payoffs = FixedPayoffs::new(0.0, 0.0, 0.0);
    assert_eq!(
        broken.decide(&snapshot(50), &mut payoffs),
        Err(ConfigurationError::ZeroIterations)
    );
}

//
// decide / train
//
#[test]
fn decide_accumulates_weights_toward_best_payoff() {
    let mut engine = engine(10);
    let mut payoffs = FixedPayoffs::new(-10.0, 0.0, 25.0);

    let decision = engine.decide(&snapshot(50), &mut payoffs).unwrap();
    assert_eq!(decision, Decision::Raise);

    // Первый проход равномерный, дальше весь вес уходит в raise.
    let raise = engine.state.get(Decision::Raise);
    assert!((raise.weight - (1.0 / 3.0 + 9.0)).abs() < EPS);
    assert!((raise.regret - 20.0).abs() < EPS);
    assert!((engine.state.get(Decision::Fold).weight - 1.0 / 3.0).abs() < EPS);
}

#[test]
fn equal_payoffs_break_ties_by_action_order() {
    let mut engine = engine(5);
    let mut payoffs = FixedPayoffs::new(1.0, 1.0, 1.0);
    assert_eq!(engine.decide(&snapshot(50), &mut payoffs).unwrap(), Decision::Fold);

    let mut reordered = StrategyEngine::new(&StrategyConfig {
        iterations: 5,
        actions: vec![Decision::Raise, Decision::Call],
    })
    .unwrap();
    assert_eq!(reordered.decide(&snapshot(50), &mut payoffs).unwrap(), Decision::Raise);
}

#[test]
fn state_carries_over_between_decisions() {
    let mut engine = engine(4);
    let mut payoffs = FixedPayoffs::new(-10.0, 5.0, 0.0);
    engine.decide(&snapshot(50), &mut payoffs).unwrap();
    let after_first = engine.state.get(Decision::Call).weight;
    engine.decide(&snapshot(50), &mut payoffs).unwrap();
    assert!(engine.state.get(Decision::Call).weight > after_first);
}

#[test]
fn average_strategy_sums_to_one() {
    let mut engine = engine(20);
    let mut rng = DeterministicRng::seed_from_u64(3);
    let mut payoffs = RandomPayoffs::new(&mut rng);
    engine.decide(&snapshot(60), &mut payoffs).unwrap();

    let total: f64 = engine.average_strategy().iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-6);
}

//
// payoff
//
#[test]
fn random_payoffs_stay_in_their_ranges() {
    let mut rng = DeterministicRng::seed_from_u64(11);
    let mut payoffs = RandomPayoffs::new(&mut rng);
    let bet = Chips(40);

    for _ in 0..500 {
        assert_eq!(payoffs.payoff(Decision::Fold, bet), -40.0);
        let call = payoffs.payoff(Decision::Call, bet);
        assert!((-40.0..=40.0).contains(&call));
        assert_eq!(call.fract(), 0.0);
        let raise = payoffs.payoff(Decision::Raise, bet);
        assert!((40.0..=80.0).contains(&raise));
    }
}

//
// сериализация
//
#[test]
fn strategy_state_serializes_as_explicit_entries() {
    let mut engine = engine(3);
    let mut payoffs = FixedPayoffs::new(-10.0, 0.0, 25.0);
    engine.decide(&snapshot(50), &mut payoffs).unwrap();

    let json = serde_json::to_value(&engine.state).unwrap();
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["action"], "fold");

    let restored: StrategyState = serde_json::from_value(json).unwrap();
    assert_eq!(restored, engine.state);
}
