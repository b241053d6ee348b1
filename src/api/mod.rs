//! Внешняя сторона турнира.
//!
//! - DTO (dto.rs): итоговый отчёт для CLI и логов;
//! - server.rs: минимальный HTTP-эндпоинт «турнир жив».

pub mod dto;
pub mod server;

pub use dto::{StandingDto, TournamentReport};
pub use server::{liveness_app, run_liveness, DEFAULT_BIND, LIVENESS_TEXT};
