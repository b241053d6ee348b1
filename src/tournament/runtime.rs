// src/tournament/runtime.rs

use std::sync::Arc;

use futures::future::join_all;
use log::{debug, info, warn};

use crate::api::dto::TournamentReport;
use crate::domain::blinds::BlindLevel;
use crate::domain::hand::HandSummary;
use crate::domain::player::Player;
use crate::domain::table::Table;
use crate::domain::tournament::{
    ExecutionMode, FinishingPlace, TournamentConfig, TournamentError, TournamentStatus,
};
use crate::domain::PlayerId;
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{play_hand, play_hand_async, HandSetup};
use crate::engine::hand_history::HandHistory;
use crate::infra::events::{EventSink, TournamentEvent};
use crate::infra::names::generate_player_name;
use crate::infra::persistence::{PersistenceError, PlayerStore};
use crate::infra::rng::DeterministicRng;
use crate::infra::rng_seed::RngSeed;
use crate::strategy::{RandomPayoffs, StrategyEngine};
use crate::tournament::seating::{partition_into_tables, table_count};

/// Номер «раунда» для RNG имён игроков (раунды турнира начинаются с 1).
const SETUP_STREAM: u32 = 0;
/// Номер «стола» для RNG дообучения между раундами.
const ADJUST_STREAM: u64 = u64::MAX;

type HandOutcome = Result<(HandSummary, HandHistory), EngineError>;

/// Рантайм турнира: владеет игроками, расписанием блайндов и счётчиком раундов.
///
/// `players` хранит активных игроков в порядке посадки. Столы раунда строит
/// `tables()`: последовательные куски этого списка по `table_capacity`.
pub struct TournamentRuntime {
    pub config: TournamentConfig,
    /// Номер следующего раунда (с 1).
    pub round: u32,
    pub players: Vec<Player>,
    /// Выбывшие, в порядке выбывания.
    pub eliminated: Vec<Player>,
    pub finishing: Vec<FinishingPlace>,
    pub status: TournamentStatus,
    /// Сид турнира (из конфига или случайный).
    pub seed: u64,
    /// Количество участников на старте.
    pub total_entries: u32,
    pub hands_played: u64,
    /// Итоги раздач последнего сыгранного раунда.
    pub last_round: Vec<HandSummary>,
    sink: Arc<dyn EventSink>,
}

impl TournamentRuntime {
    /// Создать турнир: проверить конфиг, создать игроков со стартовым стеком.
    pub fn setup(config: TournamentConfig, sink: Arc<dyn EventSink>) -> Result<Self, TournamentError> {
        config.validate_full()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut names_rng = RngSeed::from_u64(seed).derive(SETUP_STREAM, 0).to_rng();

        let mut players = Vec::with_capacity(config.num_players as usize);
        for id in 1..=PlayerId::from(config.num_players) {
            let name = generate_player_name(&mut names_rng, id);
            let strategy = StrategyEngine::new(&config.strategy)?;
            players.push(Player::new(id, name, config.starting_stack, strategy));
        }

        let runtime = Self {
            total_entries: config.num_players,
            config,
            round: 1,
            players,
            eliminated: Vec::new(),
            finishing: Vec::new(),
            status: TournamentStatus::Running,
            seed,
            hands_played: 0,
            last_round: Vec::new(),
            sink,
        };

        runtime.sink.record(&TournamentEvent::TournamentStarted {
            name: runtime.config.name.clone(),
            players: runtime.players.len(),
            tables: table_count(runtime.players.len(), runtime.capacity()),
            mode: runtime.config.execution,
        });
        info!("tournament seed: {seed}");

        Ok(runtime)
    }

    /// То же, что `setup`, плюс подтягивание сохранённого состояния игроков,
    /// если это включено в конфиге. Ошибка чтения не фатальна:
    /// игрок просто начинает с чистого листа.
    pub fn setup_with_store(
        config: TournamentConfig,
        sink: Arc<dyn EventSink>,
        store: &dyn PlayerStore,
    ) -> Result<Self, TournamentError> {
        let mut runtime = Self::setup(config, sink)?;
        if runtime.config.load_previous_state {
            runtime.load_players(store);
        }
        Ok(runtime)
    }

    /// Восстановить рантайм из уже собранных частей (снимок турнира).
    pub(crate) fn from_parts(parts: RuntimeParts, sink: Arc<dyn EventSink>) -> Self {
        Self {
            config: parts.config,
            round: parts.round,
            players: parts.players,
            eliminated: parts.eliminated,
            finishing: parts.finishing,
            status: parts.status,
            seed: parts.seed,
            total_entries: parts.total_entries,
            hands_played: parts.hands_played,
            last_round: Vec::new(),
            sink,
        }
    }

    /// Сколько игроков восстановлено.
    pub fn load_players(&mut self, store: &dyn PlayerStore) -> usize {
        let mut restored = 0;
        for player in self.players.iter_mut() {
            match store.load_player(&player.name) {
                Ok(blob) => {
                    player.restore_from(blob);
                    restored += 1;
                }
                Err(PersistenceError::NotFound(_)) => {
                    debug!("no saved state for {}", player.name);
                }
                Err(e) => {
                    warn!("cannot load state for {}: {e}", player.name);
                    self.sink.record(&TournamentEvent::Error {
                        message: format!("load {}: {e}", player.name),
                    });
                }
            }
        }
        restored
    }

    /// Сохранить всех игроков (активных и выбывших). Ошибка записи одного
    /// игрока не мешает сохранить остальных. Возвращает число сохранённых.
    pub fn save_players(&self, store: &mut dyn PlayerStore) -> usize {
        let mut saved = 0;
        for player in self.players.iter().chain(self.eliminated.iter()) {
            match store.save_player(&player.to_state_blob()) {
                Ok(()) => saved += 1,
                Err(e) => {
                    warn!("cannot save state for {}: {e}", player.name);
                    self.sink.record(&TournamentEvent::Error {
                        message: format!("save {}: {e}", player.name),
                    });
                }
            }
        }
        saved
    }

    pub fn capacity(&self) -> usize {
        usize::from(self.config.table_capacity).max(2)
    }

    pub fn rounds_played(&self) -> u32 {
        self.round.saturating_sub(1)
    }

    /// Посадка на текущий раунд.
    pub fn tables(&self) -> Vec<Table> {
        let ids: Vec<PlayerId> = self.players.iter().map(|p| p.id).collect();
        partition_into_tables(self.round, &ids, self.capacity())
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players
            .iter()
            .chain(self.eliminated.iter())
            .find(|p| p.id == id)
    }

    pub fn report(&self) -> TournamentReport {
        TournamentReport::from_runtime(self)
    }

    /// Запуск в режиме из конфига.
    pub async fn run(&mut self) -> Result<TournamentStatus, TournamentError> {
        match self.config.execution {
            ExecutionMode::Sequential => self.simulate(),
            ExecutionMode::Cooperative => self.simulate_cooperative().await,
        }
    }

    /// Играть раунды, пока турнир не завершится, столы по очереди.
    pub fn simulate(&mut self) -> Result<TournamentStatus, TournamentError> {
        while self.status.is_running() {
            self.step_round()?;
        }
        Ok(self.status.clone())
    }

    /// То же, но столы раунда идут одновременно как отдельные задачи.
    pub async fn simulate_cooperative(&mut self) -> Result<TournamentStatus, TournamentError> {
        while self.status.is_running() {
            self.step_round_async().await?;
        }
        Ok(self.status.clone())
    }

    /// Один раунд, столы по очереди.
    pub fn step_round(&mut self) -> Result<&TournamentStatus, TournamentError> {
        let Some((blinds, tables)) = self.begin_round()? else {
            return Ok(&self.status);
        };

        let setups = self.hand_setups(&tables, &blinds);
        let mut rngs = self.table_rngs(setups.len());

        let outcomes: Vec<HandOutcome> = seat_players(&mut self.players, &tables)
            .into_iter()
            .zip(setups.iter())
            .zip(rngs.iter_mut())
            .map(|((seated, setup), rng)| play_hand(seated, setup, rng))
            .collect();

        self.end_round(&setups, outcomes)?;
        Ok(&self.status)
    }

    /// Один раунд, столы вперемешку: каждая раздача уступает управление после
    /// каждого решения. Столы владеют непересекающимися кусками игроков и
    /// своими банками, поэтому результат совпадает с `step_round`.
    pub async fn step_round_async(&mut self) -> Result<&TournamentStatus, TournamentError> {
        let Some((blinds, tables)) = self.begin_round()? else {
            return Ok(&self.status);
        };

        let setups = self.hand_setups(&tables, &blinds);
        let mut rngs = self.table_rngs(setups.len());

        let hands = seat_players(&mut self.players, &tables)
            .into_iter()
            .zip(setups.iter())
            .zip(rngs.iter_mut())
            .map(|((seated, setup), rng)| play_hand_async(seated, setup, rng));
        let outcomes: Vec<HandOutcome> = join_all(hands).await;

        self.end_round(&setups, outcomes)?;
        Ok(&self.status)
    }

    /// Проверки перед раундом и посадка. None: турнир завершился и играть нечего.
    fn begin_round(&mut self) -> Result<Option<(BlindLevel, Vec<Table>)>, TournamentError> {
        if !self.status.is_running() {
            return Err(TournamentError::NotRunning {
                status: self.status.label(),
            });
        }
        if self.settle() {
            return Ok(None);
        }

        let blinds = self
            .config
            .blind_structure
            .level_by_number(self.round)
            .cloned()
            .ok_or(TournamentError::NoBlindsForRound { round: self.round })?;

        let tables = self.tables();
        debug!(
            "round {}: {}",
            self.round,
            tables
                .iter()
                .map(|t| format!("{} ({})", t.name, t.seated_count()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        self.sink.record(&TournamentEvent::RoundStarted {
            round: self.round,
            blinds: blinds.clone(),
            tables: tables.len(),
            players: self.players.len(),
        });

        Ok(Some((blinds, tables)))
    }

    fn hand_setups(&self, tables: &[Table], blinds: &BlindLevel) -> Vec<HandSetup> {
        tables
            .iter()
            .map(|table| HandSetup {
                table_id: table.id,
                round: self.round,
                blinds: blinds.clone(),
                evaluator: self.config.evaluator,
            })
            .collect()
    }

    /// Свой RNG на каждый стол: от сида турнира, раунда и номера стола.
    fn table_rngs(&self, tables: usize) -> Vec<DeterministicRng> {
        let base = RngSeed::from_u64(self.seed);
        (0..tables)
            .map(|index| base.derive(self.round, index as u64).to_rng())
            .collect()
    }

    fn end_round(&mut self, setups: &[HandSetup], outcomes: Vec<HandOutcome>) -> Result<(), TournamentError> {
        self.last_round.clear();

        for (setup, outcome) in setups.iter().zip(outcomes) {
            match outcome {
                Ok((summary, history)) => {
                    for event in history.events {
                        self.sink.record(&TournamentEvent::Hand {
                            table_id: setup.table_id,
                            round: setup.round,
                            event: event.kind,
                        });
                    }
                    self.hands_played += 1;
                    self.last_round.push(summary);
                }
                Err(EngineError::NotEnoughPlayers { seated }) => {
                    warn!(
                        "round {} table {}: only {seated} player(s) seated, hand skipped",
                        setup.round, setup.table_id
                    );
                }
                Err(e) => {
                    self.sink.record(&TournamentEvent::Error {
                        message: format!("round {} table {}: {e}", setup.round, setup.table_id),
                    });
                    return Err(e.into());
                }
            }
        }

        if self.config.adjust_strategy_between_rounds {
            let mut rng = RngSeed::from_u64(self.seed)
                .derive(self.round, ADJUST_STREAM)
                .to_rng();
            let mut payoffs = RandomPayoffs::new(&mut rng);
            for player in self.players.iter_mut().filter(|p| !p.is_busted()) {
                player.adjust_strategy(&mut payoffs)?;
            }
        }

        let played = self.round;
        self.round += 1;
        self.eliminate_busted(played);
        self.settle();
        Ok(())
    }

    /// Пересадка: остаются только игроки с положительным стеком.
    /// Первый выбывший получает худшее место; внутри раунда по порядку мест.
    fn eliminate_busted(&mut self, round: u32) {
        let (alive, busted): (Vec<Player>, Vec<Player>) =
            self.players.drain(..).partition(|p| !p.is_busted());
        self.players = alive;

        for player in busted {
            let finished = u32::try_from(self.finishing.len()).unwrap_or(u32::MAX);
            let place = self.total_entries.saturating_sub(finished);
            self.sink.record(&TournamentEvent::PlayerEliminated {
                player_id: player.id,
                name: player.name.clone(),
                place,
                round,
            });
            self.finishing.push(FinishingPlace {
                player_id: player.id,
                name: player.name.clone(),
                place,
                eliminated_in_round: Some(round),
            });
            self.eliminated.push(player);
        }
    }

    /// Проверить условия завершения и перевести статус. true: турнир окончен.
    fn settle(&mut self) -> bool {
        if !self.status.is_running() {
            return true;
        }

        let names: Vec<String> = self.players.iter().map(|p| p.name.clone()).collect();

        let status = if self.players.len() == 1 {
            let winner = &self.players[0];
            self.finishing.push(FinishingPlace {
                player_id: winner.id,
                name: winner.name.clone(),
                place: 1,
                eliminated_in_round: None,
            });
            TournamentStatus::Finished {
                winner: winner.id,
                name: winner.name.clone(),
            }
        } else if self.players.is_empty() {
            TournamentStatus::FinishedAmbiguous {
                remaining: Vec::new(),
            }
        } else if self.config.max_rounds.is_some_and(|max| self.round > max) {
            TournamentStatus::FinishedAmbiguous { remaining: names }
        } else if self
            .config
            .blind_structure
            .level_by_number(self.round)
            .is_none()
        {
            TournamentStatus::Aborted {
                round: self.round,
                remaining: names,
            }
        } else {
            return false;
        };

        self.status = status;
        self.sink.record(&TournamentEvent::TournamentFinished {
            status: self.status.clone(),
            rounds_played: self.rounds_played(),
        });
        true
    }
}

/// Разрезать список игроков по столам раунда: кусок на стол, в порядке мест.
/// Столы построены по этому же списку, поэтому места совпадают с порядком игроков.
fn seat_players<'a>(mut players: &'a mut [Player], tables: &[Table]) -> Vec<&'a mut [Player]> {
    let mut seated = Vec::with_capacity(tables.len());
    for table in tables {
        let n = table.seated_count().min(players.len());
        let (head, tail) = std::mem::take(&mut players).split_at_mut(n);
        debug_assert!(head.iter().map(|p| p.id).eq(table.seats.iter().copied()));
        seated.push(head);
        players = tail;
    }
    seated
}

/// Части рантайма, которые переживают сохранение.
pub(crate) struct RuntimeParts {
    pub config: TournamentConfig,
    pub round: u32,
    pub players: Vec<Player>,
    pub eliminated: Vec<Player>,
    pub finishing: Vec<FinishingPlace>,
    pub status: TournamentStatus,
    pub seed: u64,
    pub total_entries: u32,
    pub hands_played: u64,
}
