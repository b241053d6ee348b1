use thiserror::Error;

use crate::strategy::ConfigurationError;

/// Ошибки движка раздачи.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("deck is exhausted")]
    DeckExhausted,

    #[error("not enough players for a hand: {seated} seated")]
    NotEnoughPlayers { seated: usize },

    #[error("player strategy is misconfigured: {0}")]
    Strategy(#[from] ConfigurationError),
}
