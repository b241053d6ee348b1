use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

use super::hand_rank::{HandCategory, HandValue};
use super::lookup_tables::{detect_straight, rank_to_bit, suit_index, RankMask};

/// Какой классификатор используется на шоудауне.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EvaluatorKind {
    /// Упрощённый классификатор турнира: смотрит на все карты сразу
    /// и различает только straight flush / four of a kind / straight / flush / high card.
    #[default]
    Reference,
    /// Полноценная оценка: лучшая 5-карточная комбинация из N карт.
    Standard,
}

impl EvaluatorKind {
    pub fn evaluate(self, cards: &[Card]) -> HandValue {
        match self {
            EvaluatorKind::Reference => evaluate(cards),
            EvaluatorKind::Standard => evaluate_best_hand(cards),
        }
    }

    /// Сравнить две руки: `Greater` если выигрывает `a`, `Equal` при ничьей.
    pub fn compare(self, a: &[Card], b: &[Card]) -> Ordering {
        self.evaluate(a).cmp(&self.evaluate(b))
    }
}

/// Упрощённый классификатор.
///
/// Все переданные карты (карманные + борд) рассматриваются как одна рука:
/// - flush: все карты одной масти;
/// - straight: ранги по убыванию идут строго подряд через все карты;
/// - four of a kind: все ранги одинаковые (на 5+ разных картах не бывает).
///
/// Пары, две пары, сет и фулл-хаус этот классификатор не выдаёт.
/// Тай-брейк: все ранги по убыванию.
pub fn evaluate(cards: &[Card]) -> HandValue {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = match cards.first() {
        Some(first) => cards.iter().all(|c| c.suit == first.suit),
        None => false,
    };
    let is_straight = values.windows(2).all(|w| w[0] == w[1] + 1);
    let all_same_rank = match values.first() {
        Some(&v) => values.iter().all(|&x| x == v),
        None => false,
    };

    let category = if is_flush && is_straight {
        HandCategory::StraightFlush
    } else if all_same_rank {
        HandCategory::FourOfAKind
    } else if is_straight {
        HandCategory::Straight
    } else if is_flush {
        HandCategory::Flush
    } else {
        HandCategory::HighCard
    };

    HandValue::new(category, values)
}

/// Сравнить две руки упрощённым классификатором.
pub fn compare(a: &[Card], b: &[Card]) -> Ordering {
    EvaluatorKind::Reference.compare(a, b)
}

/// Индекс лучшей руки; при равенстве первая из лучших.
pub fn best_of(values: &[HandValue]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (idx, value) in values.iter().enumerate() {
        match best {
            None => best = Some(idx),
            Some(b) if value.cmp(&values[b]) == Ordering::Greater => best = Some(idx),
            _ => {}
        }
    }
    best
}

/// Полноценная оценка: лучшая 5-карточная комбинация из всех карт.
///
/// Меньше 5 карт: оцениваем как есть, только по повторам рангов.
pub fn evaluate_best_hand(cards: &[Card]) -> HandValue {
    let n = cards.len();
    if n < 5 {
        return classify(cards);
    }

    let mut best: Option<HandValue> = None;

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = classify(&five);
                        if best.as_ref().map_or(true, |cur| value > *cur) {
                            best = Some(value);
                        }
                    }
                }
            }
        }
    }

    best.unwrap_or_else(|| classify(cards))
}

/// Оценка набора до 5 карт по стандартным правилам.
fn classify(cards: &[Card]) -> HandValue {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // используем индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards {
        suit_counts[suit_index(card.suit)] += 1;
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let full_hand = cards.len() == 5;
    let is_flush = full_hand && suit_counts.iter().any(|&c| c == 5);
    let straight = if full_hand { detect_straight(rank_mask) } else { None };

    // (ранг, количество), сначала по количеству, затем по рангу: оба по убыванию.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (r, rank_counts[r as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let first = groups.first().map_or(0, |g| g.1);
    let second = groups.get(1).map_or(0, |g| g.1);
    let group_ranks: Vec<u8> = groups.iter().map(|g| g.0).collect();

    if let (true, Some(ranks)) = (is_flush, straight) {
        return HandValue::new(HandCategory::StraightFlush, ranks.to_vec());
    }

    let category = match (first, second) {
        (f, _) if f >= 4 => HandCategory::FourOfAKind,
        (3, s) if s >= 2 => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        _ if straight.is_some() => HandCategory::Straight,
        (3, _) => HandCategory::ThreeOfAKind,
        (2, 2) => HandCategory::TwoPair,
        (2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    match (category, straight) {
        (HandCategory::Straight, Some(ranks)) => HandValue::new(category, ranks.to_vec()),
        _ => HandValue::new(category, group_ranks),
    }
}
