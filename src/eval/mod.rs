//! Модуль оценки силы покерных рук.
//!
//! Основные функции:
//!   `evaluate(cards) -> HandValue`: упрощённый классификатор турнира;
//!   `evaluate_best_hand(cards) -> HandValue`: лучшая 5-карточная рука;
//!   `compare` / `best_of`: сравнение рук.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{best_of, compare, evaluate, evaluate_best_hand, EvaluatorKind};
pub use hand_rank::{HandCategory, HandValue};
