use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{GameStateSnapshot, Street};
use crate::domain::{PlayerId, SeatIndex, TableId};
use crate::engine::actions::PlayerAction;
use crate::eval::HandValue;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { table_id: TableId, round: u32 },

    /// Блайнды (место, игрок, реально внесённая сумма).
    BlindsPosted {
        small_blind: Option<(SeatIndex, PlayerId, Chips)>,
        big_blind: Option<(SeatIndex, PlayerId, Chips)>,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    /// Открыты общие карты на борде.
    BoardDealt { street: Street, cards: Vec<Card> },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Решение игрока вместе с полным снимком ситуации.
    PlayerActed {
        action: PlayerAction,
        game_state: GameStateSnapshot,
        pot_after: Chips,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        value: HandValue,
    },

    /// Выплата банка.
    PotAwarded {
        seat: SeatIndex,
        player_id: PlayerId,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { table_id: TableId, round: u32 },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи. Порядок событий внутри раздачи сохраняется.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = u32::try_from(self.events.len()).unwrap_or(u32::MAX);
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Все решения игроков по порядку.
    pub fn actions(&self) -> impl Iterator<Item = &PlayerAction> {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed { action, .. } => Some(action),
            _ => None,
        })
    }
}
