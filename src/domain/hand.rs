use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{PlayerId, TableId};
use crate::engine::actions::Decision;
use crate::eval::HandValue;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Порядок улиц в раздаче.
    pub const ORDER: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Сколько общих карт открывается перед улицей.
    pub fn cards_revealed(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "Pre-Flop",
            Street::Flop => "Flop",
            Street::Turn => "Turn",
            Street::River => "River",
        };
        f.write_str(name)
    }
}

/// Лёгкий снимок игровой ситуации, который видит игрок в момент решения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameStateSnapshot {
    pub street: Street,
    /// Текущая ставка (случайная, 10..=100).
    pub current_bet: Chips,
    /// Кто принимает решение.
    pub player: String,
    /// Стек игрока на момент решения.
    pub stack: Chips,
    /// Открытые общие карты.
    pub community_cards: Vec<Card>,
}

impl fmt::Display for GameStateSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board: Vec<String> = self.community_cards.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "{{street: {}, current_bet: {}, player: {}, stack: {}, community_cards: [{}]}}",
            self.street,
            self.current_bet,
            self.player,
            self.stack,
            board.join(" ")
        )
    }
}

/// Запись в истории игрока: контекст решения + само решение.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DecisionRecord {
    pub game_state: GameStateSnapshot,
    pub decision: Decision,
}

/// Результат конкретного игрока на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerHandResult {
    pub player_id: PlayerId,
    pub name: String,
    pub value: HandValue,
    /// Сколько фишек получил из банка (0 у проигравших).
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи за одним столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandSummary {
    pub table_id: TableId,
    pub round: u32,
    pub board: Vec<Card>,
    /// Сколько собрано блайндами.
    pub blinds_collected: Chips,
    /// Сколько внесено коллами и рейзами.
    pub bets_collected: Chips,
    /// Весь банк, отданный победителю.
    pub total_pot: Chips,
    pub winner: PlayerId,
    pub results: Vec<PlayerHandResult>,
}
