use thiserror::Error;

use crate::engine::actions::Decision;

/// Неверная настройка стратегии. Ловится при старте турнира.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("strategy iterations must be positive")]
    ZeroIterations,

    #[error("strategy action set is empty")]
    EmptyActionSet,

    #[error("action `{0}` is listed twice in the strategy action set")]
    DuplicateAction(Decision),
}
