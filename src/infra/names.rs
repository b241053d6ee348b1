use crate::domain::PlayerId;
use crate::engine::RandomSource;

const ADJECTIVES: [&str; 16] = [
    "Bold", "Calm", "Clever", "Daring", "Eager", "Fierce", "Gentle", "Happy", "Icy", "Jolly",
    "Lucky", "Mighty", "Quiet", "Rapid", "Sly", "Wild",
];

const NOUNS: [&str; 16] = [
    "Badger", "Cobra", "Eagle", "Falcon", "Fox", "Hawk", "Jaguar", "Lynx", "Mantis", "Orca",
    "Otter", "Panther", "Raven", "Shark", "Tiger", "Wolf",
];

/// Читаемое уникальное имя игрока: прилагательное + существительное + id.
/// Уникальность обеспечивает id, слова только для читаемости.
pub fn generate_player_name<R: RandomSource>(rng: &mut R, id: PlayerId) -> String {
    let adjective = ADJECTIVES[pick(rng, ADJECTIVES.len())];
    let noun = NOUNS[pick(rng, NOUNS.len())];
    format!("{adjective}{noun}{id:03}")
}

fn pick<R: RandomSource>(rng: &mut R, len: usize) -> usize {
    let max = u64::try_from(len.saturating_sub(1)).unwrap_or(0);
    usize::try_from(rng.gen_range_u64(0, max)).unwrap_or(0)
}
