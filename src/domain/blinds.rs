// src/domain/blinds.rs

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Один уровень блайндов, привязанный к номеру раунда турнира.
/// Пример: level = 2, SB = 100, BB = 200, ante = 25, duration_minutes = 15.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    /// Номер раунда (1, 2, 3, ...).
    pub level: u32,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Анте. Входит в расписание, но при сборе блайндов не взимается.
    pub ante: Chips,
    /// Сколько «минут» длится раунд (для отчёта о симулированном времени).
    pub duration_minutes: u32,
}

impl BlindLevel {
    pub fn new(
        level: u32,
        small_blind: Chips,
        big_blind: Chips,
        ante: Chips,
        duration_minutes: u32,
    ) -> Self {
        Self {
            level,
            small_blind,
            big_blind,
            ante,
            duration_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind.is_zero() {
            return Err(format!("BlindLevel {}: small_blind = 0", self.level));
        }
        if self.big_blind.0 <= self.small_blind.0 {
            return Err(format!(
                "BlindLevel {}: big_blind ({}) <= small_blind ({})",
                self.level, self.big_blind.0, self.small_blind.0
            ));
        }
        Ok(())
    }
}

/// Расписание блайндов турнира: раунд -> уровень.
/// Конечное: дальше последнего уровня турнир не продвигается.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindStructure {
    pub levels: Vec<BlindLevel>,
}

impl BlindStructure {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self { levels }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("BlindStructure: empty levels".into());
        }

        let mut expected_level = 1u32;
        for lvl in &self.levels {
            lvl.validate()?;
            if lvl.level != expected_level {
                return Err(format!(
                    "BlindStructure: expected level {}, got {}",
                    expected_level, lvl.level
                ));
            }
            expected_level += 1;
        }

        Ok(())
    }

    /// Блайнды для раунда; None, если раунд за пределами расписания.
    pub fn level_by_number(&self, number: u32) -> Option<&BlindLevel> {
        self.levels.iter().find(|lvl| lvl.level == number)
    }

    /// Номер последнего определённого раунда.
    pub fn last_level(&self) -> u32 {
        self.levels.iter().map(|lvl| lvl.level).max().unwrap_or(0)
    }

    /// Суммарная длительность первых `rounds` раундов в минутах.
    pub fn elapsed_minutes(&self, rounds: u32) -> u32 {
        self.levels
            .iter()
            .filter(|lvl| lvl.level <= rounds)
            .map(|lvl| lvl.duration_minutes)
            .sum()
    }

    /// Расписание по умолчанию: два раунда по 15 минут.
    pub fn default_structure() -> Self {
        Self::new(vec![
            BlindLevel::new(1, Chips::new(50), Chips::new(100), Chips::new(10), 15),
            BlindLevel::new(2, Chips::new(100), Chips::new(200), Chips::new(25), 15),
        ])
    }
}

impl Default for BlindStructure {
    fn default() -> Self {
        Self::default_structure()
    }
}
