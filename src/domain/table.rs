use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, TableId};

/// Индекс места за столом (0..capacity-1).
pub type SeatIndex = u8;

/// Вместимость стола по умолчанию.
pub const DEFAULT_TABLE_CAPACITY: usize = 8;

/// Сколько игроков обслуживает одна колода:
/// 2 * n карманных + 3 burn + 5 борда <= 52.
pub const MAX_TABLE_CAPACITY: usize = 22;

/// Стол на один раунд: упорядоченный список игроков по местам.
///
/// Игроки хранятся в турнире, стол держит только их id.
/// Места 0 и 1 платят малый и большой блайнд.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub seats: Vec<PlayerId>,
}

impl Table {
    pub fn new(id: TableId, name: String, seats: Vec<PlayerId>) -> Self {
        Self { id, name, seats }
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|&p| p == player_id)
            .and_then(|idx| SeatIndex::try_from(idx).ok())
    }

    pub fn contains(&self, player_id: PlayerId) -> bool {
        self.seats.contains(&player_id)
    }
}
