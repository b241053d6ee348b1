use core::fmt;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::tournament::TournamentStatus;
use crate::domain::PlayerId;
use crate::tournament::payouts::payout_for_place;
use crate::tournament::runtime::TournamentRuntime;

/// Итог одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StandingDto {
    pub player_id: PlayerId,
    pub name: String,
    /// Место; None, пока турнир идёт и игрок ещё в игре.
    pub place: Option<u32>,
    pub stack: Chips,
    /// Стек минус стартовый стек.
    pub profit: i64,
    /// Сколько решений принял за турнир.
    pub decisions: usize,
    pub payout: Chips,
    pub eliminated_in_round: Option<u32>,
}

/// Итоговый отчёт турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TournamentReport {
    pub name: String,
    pub status: TournamentStatus,
    pub rounds_played: u32,
    /// Сколько «минут» турнира прошло по расписанию блайндов.
    pub simulated_minutes: u32,
    pub hands_played: u64,
    /// Сумма стеков всех игроков.
    pub total_chips: Chips,
    /// Сначала по месту, затем неразмещённые.
    pub standings: Vec<StandingDto>,
}

impl TournamentReport {
    /// Собрать отчёт по рантайму.
    ///
    /// Места выбывших берутся из порядка выбывания. Если турнир остановлен
    /// с несколькими игроками, оставшиеся ранжируются по стеку
    /// (при равенстве по порядку мест) и занимают места 1..=n.
    pub fn from_runtime(runtime: &TournamentRuntime) -> Self {
        let config = &runtime.config;

        let mut places: HashMap<PlayerId, (u32, Option<u32>)> = runtime
            .finishing
            .iter()
            .map(|f| (f.player_id, (f.place, f.eliminated_in_round)))
            .collect();

        if matches!(
            runtime.status,
            TournamentStatus::Aborted { .. } | TournamentStatus::FinishedAmbiguous { .. }
        ) {
            let mut survivors: Vec<&Player> = runtime.players.iter().collect();
            // sort_by стабилен: равные стеки остаются в порядке мест.
            survivors.sort_by(|a, b| b.stack.cmp(&a.stack));
            for (rank, player) in survivors.into_iter().enumerate() {
                let place = u32::try_from(rank + 1).unwrap_or(u32::MAX);
                places.entry(player.id).or_insert((place, None));
            }
        }

        let mut standings: Vec<StandingDto> = runtime
            .players
            .iter()
            .chain(runtime.eliminated.iter())
            .map(|p| {
                let (place, eliminated_in_round) = match places.get(&p.id) {
                    Some(&(place, round)) => (Some(place), round),
                    None => (None, None),
                };
                StandingDto {
                    player_id: p.id,
                    name: p.name.clone(),
                    place,
                    stack: p.stack,
                    profit: p.profit(),
                    decisions: p.history.len(),
                    payout: place.map_or(Chips::ZERO, |pl| {
                        payout_for_place(config.prize_pool, &config.payout_structure, pl)
                    }),
                    eliminated_in_round,
                }
            })
            .collect();

        standings.sort_by_key(|s| s.place.unwrap_or(u32::MAX));

        let rounds_played = runtime.rounds_played();
        Self {
            name: config.name.clone(),
            status: runtime.status.clone(),
            rounds_played,
            simulated_minutes: config.blind_structure.elapsed_minutes(rounds_played),
            hands_played: runtime.hands_played,
            total_chips: standings.iter().map(|s| s.stack).sum(),
            standings,
        }
    }

    pub fn standing(&self, name: &str) -> Option<&StandingDto> {
        self.standings.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tournament: {}", self.name)?;
        writeln!(f, "Status: {}", self.status.label())?;
        writeln!(
            f,
            "Rounds played: {} ({} minutes), hands: {}",
            self.rounds_played, self.simulated_minutes, self.hands_played
        )?;
        writeln!(f, "{:>5}  {:<24} {:>10} {:>10} {:>9} {:>8}", "place", "player", "stack", "profit", "decisions", "payout")?;
        for s in &self.standings {
            let place = s.place.map_or_else(|| "-".to_string(), |p| p.to_string());
            writeln!(
                f,
                "{:>5}  {:<24} {:>10} {:>10} {:>9} {:>8}",
                place, s.name, s.stack, s.profit, s.decisions, s.payout
            )?;
        }
        Ok(())
    }
}
