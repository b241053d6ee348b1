use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Категория покерной руки по силе. Порядок вариантов = порядок силы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        };
        f.write_str(name)
    }
}

/// Оценка руки: категория + ранги для тай-брейка (по убыванию).
///
/// Сравнение: сначала категория, затем ранги попарно слева направо;
/// если одна из последовательностей кончилась раньше: ничья.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandValue {
    pub category: HandCategory,
    pub tiebreak: Vec<u8>,
}

impl HandValue {
    pub fn new(category: HandCategory, tiebreak: Vec<u8>) -> Self {
        Self { category, tiebreak }
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        // Тай-брейк сравнивается лексикографически; при равном префиксе
        // длиннее та рука, в которой больше карт.
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HandValue {}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreak)
    }
}
