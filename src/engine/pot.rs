use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Банк одной раздачи за одним столом.
///
/// Принадлежит задаче, которая ведёт раздачу; между столами не делится.
/// Инвариант: `total == blinds + bets`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
    /// Собрано блайндами.
    pub blinds: Chips,
    /// Внесено коллами и рейзами.
    pub bets: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_blind(&mut self, amount: Chips) {
        self.blinds += amount;
        self.total += amount;
    }

    pub fn add_bet(&mut self, amount: Chips) {
        self.bets += amount;
        self.total += amount;
    }

    pub fn is_empty(&self) -> bool {
        self.total.is_zero()
    }

    /// Забрать весь банк для выплаты; после этого банк пуст.
    pub fn take(&mut self) -> Chips {
        let total = self.total;
        self.reset();
        total
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
