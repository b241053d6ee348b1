//! Движок одной раздачи за одним столом.
//!
//! Основные операции:
//!   - `collect_blinds` – собрать малый/большой блайнд с мест 0 и 1
//!   - `conduct_street` – провести одну улицу ставок
//!   - `play_hand` / `play_hand_async` – полная раздача до шоудауна

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod pot;

pub use actions::{Decision, PlayerAction};
pub use betting::{conduct_street, conduct_street_async, MAX_BET, MIN_BET};
pub use errors::EngineError;
pub use game_loop::{collect_blinds, deal_hole_cards, play_hand, play_hand_async, HandSetup};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;

/// RNG интерфейс для engine.
/// Реализации живут в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);

    /// Равномерное целое из [lo, hi]. При lo > hi возвращает lo.
    fn gen_range_u64(&mut self, lo: u64, hi: u64) -> u64;

    /// Равномерное целое со знаком из [lo, hi]. При lo > hi возвращает lo.
    fn gen_range_i64(&mut self, lo: i64, hi: i64) -> i64;
}
