//! Симулятор многостолового покерного турнира на выбывание.
//!
//! Турнир рассаживает игроков по столам, играет раздачи раунд за раундом
//! по расписанию блайндов, на шоудауне оценивает руки и пересаживает
//! выживших, пока не останется один игрок. Решения игроков принимает
//! политика regret matching.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod state;
pub mod strategy;
pub mod tournament;

pub use domain::tournament::{ExecutionMode, TournamentConfig, TournamentError, TournamentStatus};
pub use state::TournamentSnapshot;
pub use tournament::TournamentRuntime;
