use crate::domain::chips::Chips;
use crate::engine::actions::Decision;
use crate::engine::RandomSource;

/// Источник выигрышей для одного прохода regret matching.
pub trait PayoffModel {
    /// Выигрыш действия при текущей ставке.
    fn payoff(&mut self, action: Decision, current_bet: Chips) -> f64;
}

/// Случайные выигрыши турнира при ставке `b`:
/// fold = -b, call ∈ [-b, b], raise ∈ [b, 2b] (целые).
pub struct RandomPayoffs<'a, R: RandomSource + ?Sized> {
    rng: &'a mut R,
}

impl<'a, R: RandomSource + ?Sized> RandomPayoffs<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }
}

impl<R: RandomSource + ?Sized> PayoffModel for RandomPayoffs<'_, R> {
    fn payoff(&mut self, action: Decision, current_bet: Chips) -> f64 {
        let b = current_bet.as_i64();
        match action {
            Decision::Fold => -b as f64,
            Decision::Call => self.rng.gen_range_i64(-b, b) as f64,
            Decision::Raise => self.rng.gen_range_i64(b, b.saturating_mul(2)) as f64,
        }
    }
}

/// Фиксированные выигрыши, не зависящие от ставки. Для тестов
/// и детерминированного дообучения.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedPayoffs {
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
}

impl FixedPayoffs {
    pub fn new(fold: f64, call: f64, raise: f64) -> Self {
        Self { fold, call, raise }
    }
}

impl PayoffModel for FixedPayoffs {
    fn payoff(&mut self, action: Decision, _current_bet: Chips) -> f64 {
        match action {
            Decision::Fold => self.fold,
            Decision::Call => self.call,
            Decision::Raise => self.raise,
        }
    }
}
