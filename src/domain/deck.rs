use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;
use crate::infra::rng::SystemRng;

/// Колода карт. В домене это просто упорядоченный список карт,
/// сверху колоды лежит последний элемент.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Hearts 2..A, Diamonds 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards }
    }

    /// Перемешанная колода с внешним источником случайности
    /// (детерминированный RNG в тестах, сид стола в турнире).
    pub fn shuffled_with<R: RandomSource>(rng: &mut R) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    /// Перемешанная колода на системном RNG.
    pub fn new_shuffled() -> Self {
        Self::shuffled_with(&mut SystemRng)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        self.cards.pop().ok_or(EngineError::DeckExhausted)
    }

    /// Взять n карт сверху.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.draw()?);
        }
        Ok(taken)
    }

    /// Сжечь карту: тот же draw, результат выбрасываем.
    pub fn burn(&mut self) -> Result<(), EngineError> {
        self.draw().map(|_| ())
    }
}
