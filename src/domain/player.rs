use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{DecisionRecord, GameStateSnapshot};
use crate::domain::PlayerId;
use crate::engine::actions::Decision;
use crate::infra::persistence::PlayerStateBlob;
use crate::strategy::{ConfigurationError, PayoffModel, StrategyEngine};

/// Что игрок заметил за оппонентом.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Observation {
    Aggressive,
    Fold,
    Call,
    Bluff,
}

impl From<Decision> for Observation {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Fold => Observation::Fold,
            Decision::Call => Observation::Call,
            Decision::Raise => Observation::Aggressive,
        }
    }
}

/// Счётчики по одному оппоненту. Новая запись всегда начинается с нулей.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpponentStats {
    pub aggressive: u32,
    pub fold: u32,
    pub call: u32,
    pub bluff: u32,
}

impl OpponentStats {
    pub fn bump(&mut self, observation: Observation) {
        let counter = match observation {
            Observation::Aggressive => &mut self.aggressive,
            Observation::Fold => &mut self.fold,
            Observation::Call => &mut self.call,
            Observation::Bluff => &mut self.bluff,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Досье: имя оппонента -> счётчики. Запись создаётся при первом наблюдении.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dossier {
    entries: BTreeMap<String, OpponentStats>,
}

impl Dossier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Запись по оппоненту; если её нет, создаётся нулевая.
    pub fn entry(&mut self, opponent: &str) -> &mut OpponentStats {
        self.entries.entry(opponent.to_string()).or_default()
    }

    pub fn record(&mut self, opponent: &str, observation: Observation) {
        self.entry(opponent).bump(observation);
    }

    pub fn get(&self, opponent: &str) -> Option<&OpponentStats> {
        self.entries.get(opponent)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OpponentStats)> {
        self.entries.iter()
    }
}

/// Игрок турнира. Один и тот же объект живёт в наборе игроков турнира
/// и в каждый момент сидит ровно за одним столом.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: Chips,
    /// Стек на старте, от него считается профит.
    pub initial_stack: Chips,
    /// Карманные карты текущей раздачи.
    pub hole_cards: Vec<Card>,
    /// Журнал решений (только дописывается).
    pub history: Vec<DecisionRecord>,
    pub dossier: Dossier,
    /// Стратегия принадлежит только этому игроку.
    pub strategy: StrategyEngine,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: Chips, strategy: StrategyEngine) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            initial_stack: stack,
            hole_cards: Vec::new(),
            history: Vec::new(),
            dossier: Dossier::new(),
            strategy,
        }
    }

    pub fn is_busted(&self) -> bool {
        self.stack.is_zero()
    }

    /// Принять решение и записать его в историю.
    pub fn make_decision<P: PayoffModel + ?Sized>(
        &mut self,
        game_state: GameStateSnapshot,
        payoffs: &mut P,
    ) -> Result<Decision, ConfigurationError> {
        let decision = self.strategy.decide(&game_state, payoffs)?;
        self.history.push(DecisionRecord {
            game_state,
            decision,
        });
        Ok(decision)
    }

    pub fn record_opponent_action(&mut self, opponent: &str, observation: Observation) {
        self.dossier.record(opponent, observation);
    }

    /// Дообучение на последнем контексте решения. Без истории ничего не делает.
    pub fn adjust_strategy<P: PayoffModel + ?Sized>(
        &mut self,
        payoffs: &mut P,
    ) -> Result<(), ConfigurationError> {
        match self.history.last() {
            Some(last) => self.strategy.train(&last.game_state, payoffs),
            None => Ok(()),
        }
    }

    /// Профит относительно стартового стека.
    pub fn profit(&self) -> i64 {
        self.stack.as_i64() - self.initial_stack.as_i64()
    }

    /// Сколько раз игрок рейзил начиная с позиции `since` в истории.
    pub fn raises_since(&self, since: usize) -> usize {
        self.history
            .iter()
            .skip(since)
            .filter(|r| r.decision == Decision::Raise)
            .count()
    }

    /// Упаковать обучаемое состояние игрока.
    pub fn to_state_blob(&self) -> PlayerStateBlob {
        PlayerStateBlob {
            name: self.name.clone(),
            history: self.history.clone(),
            dossier: self.dossier.clone(),
            strategy: self.strategy.state.clone(),
        }
    }

    /// Восстановить обучаемое состояние (стек не трогаем).
    pub fn restore_from(&mut self, blob: PlayerStateBlob) {
        self.history = blob.history;
        self.dossier = blob.dossier;
        self.strategy.state = blob.strategy;
    }
}
