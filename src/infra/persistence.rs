use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::hand::DecisionRecord;
use crate::domain::player::Dossier;
use crate::state::TournamentSnapshot;
use crate::strategy::StrategyState;

/// Имя файла снимка турнира в `FileStore`.
pub const SNAPSHOT_FILE: &str = "tournament_snapshot.json";

/// Ошибки сохранения / загрузки состояния.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot encode state: {0}")]
    Encode(serde_json::Error),

    #[error("cannot decode state: {0}")]
    Decode(serde_json::Error),

    #[error("no stored state for `{0}`")]
    NotFound(String),
}

/// Обучаемое состояние игрока: история, досье, стратегия.
/// Ключ: имя игрока. Стек сюда не входит.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerStateBlob {
    pub name: String,
    pub history: Vec<DecisionRecord>,
    pub dossier: Dossier,
    pub strategy: StrategyState,
}

impl PlayerStateBlob {
    pub fn to_bytes(&self) -> Result<Vec<u8>, PersistenceError> {
        serde_json::to_vec(self).map_err(PersistenceError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PersistenceError> {
        serde_json::from_slice(bytes).map_err(PersistenceError::Decode)
    }
}

/// Абстракция хранилища состояния игроков и снимка турнира.
///
/// Запись состояния одного игрока монопольна: турнир пишет
/// каждого игрока один раз, из одного места.
pub trait PlayerStore {
    fn load_player(&self, name: &str) -> Result<PlayerStateBlob, PersistenceError>;

    fn save_player(&mut self, blob: &PlayerStateBlob) -> Result<(), PersistenceError>;

    fn load_snapshot(&self) -> Result<TournamentSnapshot, PersistenceError>;

    fn save_snapshot(&mut self, snapshot: &TournamentSnapshot) -> Result<(), PersistenceError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
/// Хранит сериализованные байты, как и файловое хранилище.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    players: HashMap<String, Vec<u8>>,
    snapshot: Option<Vec<u8>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Положить произвольные байты под именем игрока (для проверки битых записей).
    pub fn insert_raw(&mut self, name: &str, bytes: Vec<u8>) {
        self.players.insert(name.to_string(), bytes);
    }
}

impl PlayerStore for InMemoryStore {
    fn load_player(&self, name: &str) -> Result<PlayerStateBlob, PersistenceError> {
        let bytes = self
            .players
            .get(name)
            .ok_or_else(|| PersistenceError::NotFound(name.to_string()))?;
        PlayerStateBlob::from_bytes(bytes)
    }

    fn save_player(&mut self, blob: &PlayerStateBlob) -> Result<(), PersistenceError> {
        self.players.insert(blob.name.clone(), blob.to_bytes()?);
        Ok(())
    }

    fn load_snapshot(&self) -> Result<TournamentSnapshot, PersistenceError> {
        let bytes = self
            .snapshot
            .as_ref()
            .ok_or_else(|| PersistenceError::NotFound(SNAPSHOT_FILE.to_string()))?;
        TournamentSnapshot::from_bytes(bytes)
    }

    fn save_snapshot(&mut self, snapshot: &TournamentSnapshot) -> Result<(), PersistenceError> {
        self.snapshot = Some(snapshot.to_bytes()?);
        Ok(())
    }
}

/// Файловое хранилище: `<dir>/<name>_state.json` и `<dir>/tournament_snapshot.json`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Каталог создаётся при необходимости.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn player_path(&self, name: &str) -> PathBuf {
        let safe: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{safe}_state.json"))
    }

    fn read(&self, path: &Path, key: &str) -> Result<Vec<u8>, PersistenceError> {
        match fs::read(path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(PersistenceError::NotFound(key.to_string()))
            }
            Err(e) => Err(PersistenceError::Io(e)),
        }
    }
}

impl PlayerStore for FileStore {
    fn load_player(&self, name: &str) -> Result<PlayerStateBlob, PersistenceError> {
        let bytes = self.read(&self.player_path(name), name)?;
        PlayerStateBlob::from_bytes(&bytes)
    }

    fn save_player(&mut self, blob: &PlayerStateBlob) -> Result<(), PersistenceError> {
        fs::write(self.player_path(&blob.name), blob.to_bytes()?)?;
        Ok(())
    }

    fn load_snapshot(&self) -> Result<TournamentSnapshot, PersistenceError> {
        let bytes = self.read(&self.dir.join(SNAPSHOT_FILE), SNAPSHOT_FILE)?;
        TournamentSnapshot::from_bytes(&bytes)
    }

    fn save_snapshot(&mut self, snapshot: &TournamentSnapshot) -> Result<(), PersistenceError> {
        fs::write(self.dir.join(SNAPSHOT_FILE), snapshot.to_bytes()?)?;
        Ok(())
    }
}
