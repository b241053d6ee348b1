use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::player::Player;
use crate::domain::tournament::{FinishingPlace, TournamentConfig, TournamentError, TournamentStatus};
use crate::infra::events::EventSink;
use crate::infra::persistence::PersistenceError;
use crate::tournament::runtime::{RuntimeParts, TournamentRuntime};

/// Снимок всего турнира: всё, что нужно, чтобы продолжить `simulate()`
/// с того же раунда с теми же игроками.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSnapshot {
    pub config: TournamentConfig,
    /// Следующий раунд.
    pub round: u32,
    pub players: Vec<Player>,
    pub eliminated: Vec<Player>,
    pub finishing: Vec<FinishingPlace>,
    pub status: TournamentStatus,
    pub seed: u64,
    pub total_entries: u32,
    pub hands_played: u64,
}

impl TournamentSnapshot {
    /// Упаковать живой рантайм в снимок.
    pub fn from_runtime(runtime: &TournamentRuntime) -> Self {
        Self {
            config: runtime.config.clone(),
            round: runtime.round,
            players: runtime.players.clone(),
            eliminated: runtime.eliminated.clone(),
            finishing: runtime.finishing.clone(),
            status: runtime.status.clone(),
            seed: runtime.seed,
            total_entries: runtime.total_entries,
            hands_played: runtime.hands_played,
        }
    }

    /// Развернуть снимок обратно в рантайм. Конфиг проверяется заново.
    pub fn into_runtime(self, sink: Arc<dyn EventSink>) -> Result<TournamentRuntime, TournamentError> {
        self.config.validate_full()?;
        let parts = RuntimeParts {
            config: self.config,
            round: self.round,
            players: self.players,
            eliminated: self.eliminated,
            finishing: self.finishing,
            status: self.status,
            seed: self.seed,
            total_entries: self.total_entries,
            hands_played: self.hands_played,
        };
        Ok(TournamentRuntime::from_parts(parts, sink))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec_pretty(self).map_err(PersistenceError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        serde_json::from_slice(bytes).map_err(PersistenceError::Decode)
    }
}
