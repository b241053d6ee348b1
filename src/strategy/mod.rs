//! Политика выбора действия на основе regret matching.
//!
//! Каждый игрок владеет своим `StrategyEngine`. Генерация выигрышей
//! вынесена за трейт `PayoffModel`, чтобы ядро regret matching можно было
//! кормить как случайными, так и заранее заданными выигрышами.

pub mod errors;
pub mod payoff;
pub mod regret;

pub use errors::ConfigurationError;
pub use payoff::{FixedPayoffs, PayoffModel, RandomPayoffs};
pub use regret::{regret_matching, ActionStats, StrategyConfig, StrategyEngine, StrategyEntry, StrategyState};
