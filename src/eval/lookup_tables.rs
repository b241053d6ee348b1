use crate::domain::card::{Rank, Suit};

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска стрита по старшей карте (5..=14). Для wheel (старшая = 5)
/// туз идёт как младшая карта.
const fn straight_mask(high: u8) -> RankMask {
    if high == 5 {
        // A2345
        return 0b1_0000_0000_1111;
    }
    let low = high - 4;
    0b1_1111 << (low - 2)
}

/// Все стриты от сильнейшего (broadway) к слабейшему (wheel):
/// (старшая карта, маска).
pub const STRAIGHTS: [(u8, RankMask); 10] = [
    (14, straight_mask(14)),
    (13, straight_mask(13)),
    (12, straight_mask(12)),
    (11, straight_mask(11)),
    (10, straight_mask(10)),
    (9, straight_mask(9)),
    (8, straight_mask(8)),
    (7, straight_mask(7)),
    (6, straight_mask(6)),
    (5, straight_mask(5)),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Индекс масти для счётчиков.
pub fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Hearts => 0,
        Suit::Diamonds => 1,
        Suit::Clubs => 2,
        Suit::Spades => 3,
    }
}

/// Найти стрит в битовой маске рангов.
/// Возвращает ранги стрита от старшего к младшему (wheel: 5,4,3,2,A→1).
pub fn detect_straight(rank_mask: RankMask) -> Option<[u8; 5]> {
    STRAIGHTS
        .iter()
        .find(|(_, sm)| rank_mask & sm == *sm)
        .map(|&(high, _)| {
            if high == 5 {
                [5, 4, 3, 2, 1]
            } else {
                [high, high - 1, high - 2, high - 3, high - 4]
            }
        })
}
