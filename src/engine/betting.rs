use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{GameStateSnapshot, Street};
use crate::domain::player::{Observation, Player};
use crate::domain::SeatIndex;
use crate::engine::actions::{Decision, PlayerAction};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::pot::Pot;
use crate::engine::RandomSource;
use crate::strategy::RandomPayoffs;

/// Нижняя граница случайной текущей ставки и размера рейза.
pub const MIN_BET: u64 = 10;
/// Верхняя граница случайной текущей ставки и размера рейза.
pub const MAX_BET: u64 = 100;

/// Провести одну улицу: каждый игрок действует ровно один раз, по порядку мест.
///
/// На рейз никто не отвечает, стеки за call/raise не списываются:
/// взнос только увеличивает банк.
pub fn conduct_street<R: RandomSource>(
    players: &mut [Player],
    street: Street,
    board: &[Card],
    pot: &mut Pot,
    rng: &mut R,
    history: &mut HandHistory,
) -> Result<(), EngineError> {
    for idx in 0..players.len() {
        act(players, idx, street, board, pot, rng, history)?;
    }
    Ok(())
}

/// То же, что `conduct_street`, но после каждого решения уступает планировщику,
/// чтобы столы одного раунда шли вперемешку.
pub async fn conduct_street_async<R: RandomSource>(
    players: &mut [Player],
    street: Street,
    board: &[Card],
    pot: &mut Pot,
    rng: &mut R,
    history: &mut HandHistory,
) -> Result<(), EngineError> {
    for idx in 0..players.len() {
        act(players, idx, street, board, pot, rng, history)?;
        tokio::task::yield_now().await;
    }
    Ok(())
}

/// Ход одного игрока.
fn act<R: RandomSource>(
    players: &mut [Player],
    idx: usize,
    street: Street,
    board: &[Card],
    pot: &mut Pot,
    rng: &mut R,
    history: &mut HandHistory,
) -> Result<Decision, EngineError> {
    let current_bet = Chips::new(rng.gen_range_u64(MIN_BET, MAX_BET));

    let player = &mut players[idx];
    let game_state = GameStateSnapshot {
        street,
        current_bet,
        player: player.name.clone(),
        stack: player.stack,
        community_cards: board.to_vec(),
    };

    let decision = {
        let mut payoffs = RandomPayoffs::new(&mut *rng);
        player.make_decision(game_state.clone(), &mut payoffs)?
    };

    let amount = match decision {
        Decision::Fold => Chips::ZERO,
        Decision::Call => current_bet,
        Decision::Raise => Chips::new(rng.gen_range_u64(MIN_BET, MAX_BET)),
    };
    pot.add_bet(amount);

    let action = PlayerAction {
        player_id: player.id,
        seat: seat_index(idx),
        decision,
        amount,
    };
    history.push(HandEventKind::PlayerActed {
        action,
        game_state,
        pot_after: pot.total,
    });

    // Остальные за столом видят решение и обновляют досье.
    let actor = players[idx].name.clone();
    let observation = Observation::from(decision);
    for (other_idx, other) in players.iter_mut().enumerate() {
        if other_idx != idx {
            other.record_opponent_action(&actor, observation);
        }
    }

    Ok(decision)
}

pub(crate) fn seat_index(idx: usize) -> SeatIndex {
    SeatIndex::try_from(idx).unwrap_or(SeatIndex::MAX)
}
