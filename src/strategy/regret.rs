use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::hand::GameStateSnapshot;
use crate::engine::actions::Decision;
use crate::strategy::errors::ConfigurationError;
use crate::strategy::payoff::PayoffModel;

/// Количество проходов по умолчанию на одно решение.
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Настройки стратегии из конфига турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StrategyConfig {
    /// Сколько проходов regret matching на одно решение.
    pub iterations: u32,
    /// Набор действий; порядок задаёт тай-брейк при выборе.
    pub actions: Vec<Decision>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            actions: Decision::ALL.to_vec(),
        }
    }
}

impl StrategyConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate_parts(self.iterations, &self.actions)
    }
}

fn validate_parts(iterations: u32, actions: &[Decision]) -> Result<(), ConfigurationError> {
    if iterations == 0 {
        return Err(ConfigurationError::ZeroIterations);
    }
    if actions.is_empty() {
        return Err(ConfigurationError::EmptyActionSet);
    }
    for (idx, action) in actions.iter().enumerate() {
        if actions[..idx].contains(action) {
            return Err(ConfigurationError::DuplicateAction(*action));
        }
    }
    Ok(())
}

/// Накопленные значения по одному действию.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionStats {
    pub regret: f64,
    pub weight: f64,
}

/// Одна запись сериализованного состояния.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrategyEntry {
    pub action: Decision,
    pub regret: f64,
    pub weight: f64,
}

/// Состояние стратегии: действие -> (накопленный regret, накопленный вес).
///
/// Создаётся пустым, меняется только процедурой решения своего игрока.
/// Сериализуется явным списком записей.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(into = "Vec<StrategyEntry>", from = "Vec<StrategyEntry>")]
pub struct StrategyState {
    entries: BTreeMap<Decision, ActionStats>,
}

impl StrategyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Значения по действию; для ещё не встречавшегося действия нули.
    pub fn get(&self, action: Decision) -> ActionStats {
        self.entries.get(&action).copied().unwrap_or_default()
    }

    pub fn entry_mut(&mut self, action: Decision) -> &mut ActionStats {
        self.entries.entry(action).or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_entries(&self) -> Vec<StrategyEntry> {
        self.entries
            .iter()
            .map(|(&action, stats)| StrategyEntry {
                action,
                regret: stats.regret,
                weight: stats.weight,
            })
            .collect()
    }

    /// Повторяющиеся действия: побеждает последняя запись.
    pub fn from_entries(entries: impl IntoIterator<Item = StrategyEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| {
                (
                    e.action,
                    ActionStats {
                        regret: e.regret,
                        weight: e.weight,
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

impl From<StrategyState> for Vec<StrategyEntry> {
    fn from(state: StrategyState) -> Self {
        state.to_entries()
    }
}

impl From<Vec<StrategyEntry>> for StrategyState {
    fn from(entries: Vec<StrategyEntry>) -> Self {
        StrategyState::from_entries(entries)
    }
}

/// Regret matching: вероятность действия пропорциональна его
/// положительному regret. Если положительных нет: равномерно.
pub fn regret_matching(state: &StrategyState, actions: &[Decision]) -> Vec<f64> {
    if actions.is_empty() {
        return Vec::new();
    }

    let positive: Vec<f64> = actions
        .iter()
        .map(|&a| state.get(a).regret.max(0.0))
        .collect();
    let sum: f64 = positive.iter().sum();

    if sum > 0.0 {
        positive.iter().map(|r| r / sum).collect()
    } else {
        let uniform = 1.0 / actions.len() as f64;
        vec![uniform; actions.len()]
    }
}

/// Процедура решения одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StrategyEngine {
    iterations: u32,
    actions: Vec<Decision>,
    pub state: StrategyState,
}

impl StrategyEngine {
    pub fn new(config: &StrategyConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            iterations: config.iterations,
            actions: config.actions.clone(),
            state: StrategyState::new(),
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn actions(&self) -> &[Decision] {
        &self.actions
    }

    /// Прогнать `iterations` проходов для ситуации `game_state`.
    ///
    /// В каждом проходе: выигрыши тянутся один раз, вероятности считаются
    /// по regret на начало прохода, затем обновляются regret и веса всех действий.
    pub fn train<P: PayoffModel + ?Sized>(
        &mut self,
        game_state: &GameStateSnapshot,
        payoffs: &mut P,
    ) -> Result<(), ConfigurationError> {
        // Движок мог прийти из снимка в обход конструктора.
        validate_parts(self.iterations, &self.actions)?;

        let bet = game_state.current_bet;
        for _ in 0..self.iterations {
            let utilities: Vec<f64> = self
                .actions
                .iter()
                .map(|&a| payoffs.payoff(a, bet))
                .collect();
            let probabilities = regret_matching(&self.state, &self.actions);
            let expected: f64 = probabilities
                .iter()
                .zip(&utilities)
                .map(|(p, u)| p * u)
                .sum();

            for ((&action, &utility), &probability) in
                self.actions.iter().zip(&utilities).zip(&probabilities)
            {
                let stats = self.state.entry_mut(action);
                stats.regret += utility - expected;
                stats.weight += probability;
            }
        }
        Ok(())
    }

    /// Обучиться на ситуации и выбрать действие с наибольшим накопленным весом.
    pub fn decide<P: PayoffModel + ?Sized>(
        &mut self,
        game_state: &GameStateSnapshot,
        payoffs: &mut P,
    ) -> Result<Decision, ConfigurationError> {
        self.train(game_state, payoffs)?;
        self.best_action().ok_or(ConfigurationError::EmptyActionSet)
    }

    /// Действие с наибольшим весом; при равенстве первое по порядку.
    pub fn best_action(&self) -> Option<Decision> {
        let mut best: Option<(Decision, f64)> = None;
        for &action in &self.actions {
            let weight = self.state.get(action).weight;
            match best {
                Some((_, w)) if weight <= w => {}
                _ => best = Some((action, weight)),
            }
        }
        best.map(|(action, _)| action)
    }

    /// Средняя стратегия: нормированные накопленные веса.
    pub fn average_strategy(&self) -> Vec<(Decision, f64)> {
        let total: f64 = self.actions.iter().map(|&a| self.state.get(a).weight).sum();
        self.actions
            .iter()
            .map(|&a| {
                let p = if total > 0.0 {
                    self.state.get(a).weight / total
                } else {
                    1.0 / self.actions.len() as f64
                };
                (a, p)
            })
            .collect()
    }
}
