use crate::domain::table::Table;
use crate::domain::{PlayerId, TableId};

/// Разложить активных игроков по столам вместимостью `capacity`.
///
/// Игроки идут по порядку; последний стол может оказаться неполным.
/// Если игроков не больше `capacity`, получается ровно один стол.
pub fn partition_into_tables(round: u32, player_ids: &[PlayerId], capacity: usize) -> Vec<Table> {
    // Гарантируем минимум 2, чтобы не делить на 0.
    let capacity = capacity.max(2);

    player_ids
        .chunks(capacity)
        .enumerate()
        .map(|(index, chunk)| {
            let table_id = table_id_for(index);
            Table::new(table_id, format!("R{round}-Table{table_id}"), chunk.to_vec())
        })
        .collect()
}

/// Id стола по его номеру в раунде (столы нумеруются с 1).
pub fn table_id_for(index: usize) -> TableId {
    TableId::try_from(index).unwrap_or(TableId::MAX).saturating_add(1)
}

/// Сколько столов понадобится для `players` игроков.
pub fn table_count(players: usize, capacity: usize) -> usize {
    players.div_ceil(capacity.max(2))
}
