use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId, SeatIndex};

/// Решение игрока на улице. Других действий в симуляции нет.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Fold,
    Call,
    Raise,
}

impl Decision {
    /// Полный набор действий в порядке перечисления (он же порядок тай-брейка).
    pub const ALL: [Decision; 3] = [Decision::Fold, Decision::Call, Decision::Raise];

    pub fn label(self) -> &'static str {
        match self {
            Decision::Fold => "fold",
            Decision::Call => "call",
            Decision::Raise => "raise",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Конкретное действие игрока вместе с тем, сколько ушло в банк.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// В каком месте он сидит.
    pub seat: SeatIndex,
    pub decision: Decision,
    /// Взнос в банк: 0 за fold, текущая ставка за call, случайная сумма за raise.
    pub amount: Chips,
}
