//! RngSeed: доменный seed для RNG турнира.
//!
//! Позволяет:
//!   - хранить базовый seed турнира (u64 или [u8;32])
//!   - выводить независимый seed для каждой раздачи:
//!         new = H(domain || base || round || table_index)
//!   - создавать DeterministicRng из seed
//!
//! Благодаря этому результат раунда не зависит от того, в каком порядке
//! обрабатываются столы.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Seed из u64 (сид турнира из конфига).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с контекстом раздачи:
    ///   - round (номер раунда турнира)
    ///   - table_index (номер стола в раунде)
    pub fn derive(&self, round: u32, table_index: u64) -> Self {
        let mut hasher = Sha256::new();

        hasher.update(b"POKER_TOURNAMENT_RNG_V1");
        hasher.update(self.bytes);
        hasher.update(round.to_le_bytes());
        hasher.update(table_index.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());

        Self { bytes: out }
    }

    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed(self.bytes)
    }
}
