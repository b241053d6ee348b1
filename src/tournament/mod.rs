//! Оркестратор турнира: посадка, раунды, выбывание, выплаты.

pub mod payouts;
pub mod runtime;
pub mod seating;

pub use payouts::{get_payouts, payout_for_place};
pub use runtime::TournamentRuntime;
pub use seating::{partition_into_tables, table_count};
