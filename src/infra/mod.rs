//! Инфраструктурный слой вокруг турнира:
//! - RNG-реализации и вывод seed'ов для столов;
//! - хранилище состояния игроков и снимка турнира;
//! - журнал событий и настройка логирования;
//! - генерация имён игроков.

pub mod events;
pub mod names;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use events::{init_logging, EventSink, LogSink, MemorySink, TournamentEvent, DEFAULT_LOG_FILE};
pub use names::generate_player_name;
pub use persistence::{FileStore, InMemoryStore, PersistenceError, PlayerStateBlob, PlayerStore};
pub use rng::*;
pub use rng_seed::RngSeed;
