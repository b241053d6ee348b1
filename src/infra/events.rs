//! Журнал событий турнира.
//!
//! Турнир отдаёт структурированные события в `EventSink`; `LogSink` пишет
//! их строками через `log`, `MemorySink` копит в памяти для тестов.

use core::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::blinds::BlindLevel;
use crate::domain::tournament::{ExecutionMode, TournamentStatus};
use crate::domain::{PlayerId, TableId};
use crate::engine::hand_history::HandEventKind;

/// Файл журнала по умолчанию.
pub const DEFAULT_LOG_FILE: &str = "tournament_log.txt";

/// Событие турнира.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum TournamentEvent {
    TournamentStarted {
        name: String,
        players: usize,
        tables: usize,
        mode: ExecutionMode,
    },
    RoundStarted {
        round: u32,
        blinds: BlindLevel,
        tables: usize,
        players: usize,
    },
    /// Событие внутри раздачи за конкретным столом.
    Hand {
        table_id: TableId,
        round: u32,
        event: HandEventKind,
    },
    PlayerEliminated {
        player_id: PlayerId,
        name: String,
        place: u32,
        round: u32,
    },
    TournamentFinished {
        status: TournamentStatus,
        rounds_played: u32,
    },
    Error {
        message: String,
    },
}

impl TournamentEvent {
    /// Уровень лога: решения в DEBUG, ошибки в ERROR, остальное в INFO.
    pub fn level(&self) -> Level {
        match self {
            TournamentEvent::Hand {
                event: HandEventKind::PlayerActed { .. },
                ..
            } => Level::Debug,
            TournamentEvent::Error { .. } => Level::Error,
            _ => Level::Info,
        }
    }
}

fn join_cards(cards: &[crate::domain::card::Card]) -> String {
    cards
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for TournamentEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TournamentEvent::TournamentStarted {
                name,
                players,
                tables,
                mode,
            } => write!(
                f,
                "Tournament '{name}' started: {players} players at {tables} tables ({mode:?})"
            ),
            TournamentEvent::RoundStarted {
                round,
                blinds,
                tables,
                players,
            } => write!(
                f,
                "Round {round}: blinds {}/{} ante {}, {players} players at {tables} tables",
                blinds.small_blind, blinds.big_blind, blinds.ante
            ),
            TournamentEvent::Hand {
                table_id,
                round,
                event,
            } => {
                write!(f, "[round {round} table {table_id}] ")?;
                match event {
                    HandEventKind::HandStarted { .. } => write!(f, "hand started"),
                    HandEventKind::BlindsPosted {
                        small_blind,
                        big_blind,
                    } => {
                        let sb = small_blind.as_ref().map_or(0, |b| b.2 .0);
                        let bb = big_blind.as_ref().map_or(0, |b| b.2 .0);
                        write!(f, "blinds posted: small {sb}, big {bb}")
                    }
                    HandEventKind::HoleCardsDealt {
                        player_id, cards, ..
                    } => write!(f, "player {player_id} dealt [{}]", join_cards(cards)),
                    HandEventKind::BoardDealt { street, cards } => {
                        write!(f, "{street} dealt [{}]", join_cards(cards))
                    }
                    HandEventKind::StreetChanged { street } => write!(f, "--- {street} ---"),
                    HandEventKind::PlayerActed {
                        action,
                        game_state,
                        pot_after,
                    } => write!(
                        f,
                        "{} decided {} ({}), pot {pot_after}; state {game_state}",
                        game_state.player, action.decision, action.amount
                    ),
                    HandEventKind::ShowdownReveal {
                        player_id,
                        hole_cards,
                        value,
                        ..
                    } => write!(
                        f,
                        "showdown: player {player_id} [{}] has {value}",
                        join_cards(hole_cards)
                    ),
                    HandEventKind::PotAwarded {
                        player_id, amount, ..
                    } => write!(f, "pot of {amount} awarded to player {player_id}"),
                    HandEventKind::HandFinished { .. } => write!(f, "hand finished"),
                }
            }
            TournamentEvent::PlayerEliminated {
                name, place, round, ..
            } => write!(f, "{name} eliminated in round {round}, place {place}"),
            TournamentEvent::TournamentFinished {
                status,
                rounds_played,
            } => match status {
                TournamentStatus::Finished { name, .. } => {
                    write!(f, "Tournament finished after {rounds_played} rounds, winner: {name}")
                }
                TournamentStatus::FinishedAmbiguous { remaining } => write!(
                    f,
                    "Tournament stopped after {rounds_played} rounds with {} players left",
                    remaining.len()
                ),
                TournamentStatus::Aborted { round, remaining } => write!(
                    f,
                    "Tournament aborted: no blinds for round {round}, {} players left",
                    remaining.len()
                ),
                TournamentStatus::Running => write!(f, "Tournament still running"),
            },
            TournamentEvent::Error { message } => write!(f, "error: {message}"),
        }
    }
}

/// Приёмник событий. Порядок событий одной раздачи сохраняется,
/// между столами не определён.
pub trait EventSink: Send + Sync {
    fn record(&self, event: &TournamentEvent);
}

/// Пишет события в `log` одной строкой.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn record(&self, event: &TournamentEvent) {
        log::log!(event.level(), "{event}");
    }
}

/// Копит события в памяти.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<TournamentEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TournamentEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn record(&self, event: &TournamentEvent) {
        let mut guard = self
            .events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.push(event.clone());
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot create log file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger already initialized: {0}")]
    AlreadyInitialized(#[from] log::SetLoggerError),
}

/// Логирование в файл (DEBUG и выше) и в терминал (`terminal_level` и выше).
pub fn init_logging(path: &Path, terminal_level: LevelFilter) -> Result<(), LoggingError> {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();
    let file = simplelog::WriteLogger::new(LevelFilter::Debug, config.clone(), File::create(path)?);
    let term = simplelog::TermLogger::new(
        terminal_level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}
