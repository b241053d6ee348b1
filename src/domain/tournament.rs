// src/domain/tournament.rs

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::blinds::BlindStructure;
use crate::domain::chips::Chips;
use crate::domain::table::{DEFAULT_TABLE_CAPACITY, MAX_TABLE_CAPACITY};
use crate::domain::PlayerId;
use crate::engine::errors::EngineError;
use crate::eval::EvaluatorKind;
use crate::strategy::{ConfigurationError, StrategyConfig};

/// Как обрабатываются столы внутри раунда.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Столы по очереди, один за другим.
    #[default]
    Sequential,
    /// Каждый стол идёт отдельной задачей, уступающей управление
    /// после каждого решения игрока.
    Cooperative,
}

/// Конфигурация турнира. Всё, что можно задать из JSON или CLI.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TournamentConfig {
    pub name: String,

    /// Сколько игроков создаётся на старте.
    pub num_players: u32,

    /// Стартовый стек каждого игрока.
    pub starting_stack: Chips,

    /// Максимум игроков за столом.
    pub table_capacity: u8,

    /// Раунд -> блайнды.
    pub blind_structure: BlindStructure,

    /// Место -> доля призового фонда.
    pub payout_structure: BTreeMap<u32, f64>,

    /// Призовой фонд (0 = без выплат).
    pub prize_pool: Chips,

    /// Параметры regret-matching.
    pub strategy: StrategyConfig,

    pub execution: ExecutionMode,

    /// Какой классификатор рук использовать на шоудауне.
    pub evaluator: EvaluatorKind,

    /// Сид турнира. None: берём случайный при старте.
    pub seed: Option<u64>,

    /// Жёсткий лимит раундов. Достигли при >1 игроке: FinishedAmbiguous.
    pub max_rounds: Option<u32>,

    /// Дообучать стратегии выживших между раундами.
    pub adjust_strategy_between_rounds: bool,

    /// Подтягивать сохранённое состояние игроков при создании.
    pub load_previous_state: bool,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        let mut payout_structure = BTreeMap::new();
        payout_structure.insert(1, 0.5);
        payout_structure.insert(2, 0.3);
        payout_structure.insert(3, 0.2);

        Self {
            name: "Regret Matching Freezeout".to_string(),
            num_players: 160,
            starting_stack: Chips::new(5000),
            table_capacity: DEFAULT_TABLE_CAPACITY as u8,
            blind_structure: BlindStructure::default_structure(),
            payout_structure,
            prize_pool: Chips::ZERO,
            strategy: StrategyConfig::default(),
            execution: ExecutionMode::Sequential,
            evaluator: EvaluatorKind::Reference,
            seed: None,
            max_rounds: None,
            adjust_strategy_between_rounds: false,
            load_previous_state: false,
        }
    }
}

impl TournamentConfig {
    /// Прочитать конфиг из JSON-строки (недостающие поля берутся по умолчанию).
    pub fn from_json_str(json: &str) -> Result<Self, TournamentError> {
        serde_json::from_str(json)
            .map_err(|e| TournamentError::InvalidConfig(format!("TournamentConfig: {e}")))
    }

    pub fn from_file(path: &Path) -> Result<Self, TournamentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            TournamentError::InvalidConfig(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&raw)
    }

    /// Жёсткая валидация конфига турнира.
    pub fn validate_full(&self) -> Result<(), TournamentError> {
        if self.num_players < 2 {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: num_players must be at least 2".into(),
            ));
        }

        if self.starting_stack.is_zero() {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: starting_stack = 0".into(),
            ));
        }

        let capacity = self.table_capacity as usize;
        if !(2..=MAX_TABLE_CAPACITY).contains(&capacity) {
            return Err(TournamentError::InvalidConfig(format!(
                "TournamentConfig: table_capacity must be in [2, {MAX_TABLE_CAPACITY}]"
            )));
        }

        self.blind_structure
            .validate()
            .map_err(TournamentError::InvalidConfig)?;

        let mut total_share = 0.0;
        for (place, share) in &self.payout_structure {
            if *place == 0 || !(0.0..=1.0).contains(share) {
                return Err(TournamentError::InvalidConfig(format!(
                    "TournamentConfig: bad payout entry {place} -> {share}"
                )));
            }
            total_share += share;
        }
        if total_share > 1.0 + 1e-9 {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: payout shares sum above 1".into(),
            ));
        }

        if let Some(0) = self.max_rounds {
            return Err(TournamentError::InvalidConfig(
                "TournamentConfig: max_rounds = 0".into(),
            ));
        }

        self.strategy.validate()?;

        Ok(())
    }
}

/// Статус турнира (машина состояний оркестратора).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TournamentStatus {
    Running,
    /// Остался ровно один игрок.
    Finished { winner: PlayerId, name: String },
    /// Лимит раундов исчерпан, а игроков больше одного.
    FinishedAmbiguous { remaining: Vec<String> },
    /// Для текущего раунда нет блайндов.
    Aborted { round: u32, remaining: Vec<String> },
}

impl TournamentStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, TournamentStatus::Running)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TournamentStatus::Running => "running",
            TournamentStatus::Finished { .. } => "finished",
            TournamentStatus::FinishedAmbiguous { .. } => "finished_ambiguous",
            TournamentStatus::Aborted { .. } => "aborted",
        }
    }
}

/// Место игрока по итогам турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinishingPlace {
    pub player_id: PlayerId,
    pub name: String,
    pub place: u32,
    /// В каком раунде вылетел (None: победитель).
    pub eliminated_in_round: Option<u32>,
}

/// Ошибки, которые могут возникать при работе с турниром.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("invalid tournament config: {0}")]
    InvalidConfig(String),

    #[error("no blinds defined for round {round}")]
    NoBlindsForRound { round: u32 },

    #[error("tournament is not running (status: {status})")]
    NotRunning { status: &'static str },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Engine(#[from] EngineError),
}
