use std::collections::BTreeMap;

use crate::domain::chips::Chips;

/// Выплата за место: доля призового фонда, округлённая вниз.
/// Места без доли получают 0.
pub fn payout_for_place(prize_pool: Chips, structure: &BTreeMap<u32, f64>, place: u32) -> Chips {
    match structure.get(&place) {
        Some(&share) if share > 0.0 => Chips::new((prize_pool.0 as f64 * share).floor() as u64),
        _ => Chips::ZERO,
    }
}

/// Таблица выплат по всем призовым местам.
pub fn get_payouts(prize_pool: Chips, structure: &BTreeMap<u32, f64>) -> BTreeMap<u32, Chips> {
    structure
        .keys()
        .map(|&place| (place, payout_for_place(prize_pool, structure, place)))
        .collect()
}
