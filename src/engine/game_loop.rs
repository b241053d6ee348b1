use crate::domain::blinds::BlindLevel;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, PlayerHandResult, Street};
use crate::domain::player::{Observation, Player};
use crate::domain::TableId;
use crate::engine::betting::{conduct_street, conduct_street_async, seat_index};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::pot::Pot;
use crate::engine::RandomSource;
use crate::eval::{best_of, EvaluatorKind, HandCategory, HandValue};

/// Параметры одной раздачи за одним столом.
#[derive(Clone, Debug)]
pub struct HandSetup {
    pub table_id: TableId,
    pub round: u32,
    pub blinds: BlindLevel,
    pub evaluator: EvaluatorKind,
}

/// Внутреннее состояние раздачи между улицами.
struct HandState {
    deck: Deck,
    pot: Pot,
    board: Vec<Card>,
    history: HandHistory,
    /// Длина истории решений каждого игрока на старте раздачи.
    history_marks: Vec<usize>,
}

/// Полная раздача: блайнды, карманные карты, четыре улицы, шоудаун, выплата.
pub fn play_hand<R: RandomSource>(
    players: &mut [Player],
    setup: &HandSetup,
    rng: &mut R,
) -> Result<(HandSummary, HandHistory), EngineError> {
    let mut state = start_hand(players, setup, rng)?;

    for street in Street::ORDER {
        reveal_board(&mut state, street)?;
        conduct_street(
            players,
            street,
            &state.board,
            &mut state.pot,
            rng,
            &mut state.history,
        )?;
    }

    finish_hand(players, setup, state)
}

/// Та же раздача, но с точками уступки после каждого решения.
/// При одинаковом RNG результат совпадает с `play_hand`.
pub async fn play_hand_async<R: RandomSource>(
    players: &mut [Player],
    setup: &HandSetup,
    rng: &mut R,
) -> Result<(HandSummary, HandHistory), EngineError> {
    let mut state = start_hand(players, setup, rng)?;

    for street in Street::ORDER {
        reveal_board(&mut state, street)?;
        conduct_street_async(
            players,
            street,
            &state.board,
            &mut state.pot,
            rng,
            &mut state.history,
        )
        .await?;
    }

    finish_hand(players, setup, state)
}

/// Собрать малый блайнд с места 0 и большой с места 1.
///
/// Короткий стек вносит сколько есть, в минус не уходит.
/// Анте не собирается. Возвращает собранную сумму.
pub fn collect_blinds(
    players: &mut [Player],
    level: &BlindLevel,
    pot: &mut Pot,
    history: &mut HandHistory,
) -> Chips {
    let mut post = |seat: usize, amount: Chips| {
        players.get_mut(seat).map(|p| {
            let paid = take_from_stack(p, amount);
            pot.add_blind(paid);
            (seat_index(seat), p.id, paid)
        })
    };

    let small_blind = post(0, level.small_blind);
    let big_blind = post(1, level.big_blind);

    let collected = small_blind.map_or(Chips::ZERO, |b| b.2) + big_blind.map_or(Chips::ZERO, |b| b.2);
    history.push(HandEventKind::BlindsPosted {
        small_blind,
        big_blind,
    });
    collected
}

/// Раздать по две карманные карты каждому игроку.
pub fn deal_hole_cards(
    players: &mut [Player],
    deck: &mut Deck,
    history: &mut HandHistory,
) -> Result<(), EngineError> {
    for (idx, player) in players.iter_mut().enumerate() {
        player.hole_cards = deck.draw_n(2)?;
        history.push(HandEventKind::HoleCardsDealt {
            seat: seat_index(idx),
            player_id: player.id,
            cards: player.hole_cards.clone(),
        });
    }
    Ok(())
}

/// Снять фишки со стека с учётом того, что стек может быть меньше суммы.
fn take_from_stack(player: &mut Player, amount: Chips) -> Chips {
    let real = if player.stack < amount {
        player.stack
    } else {
        amount
    };
    player.stack -= real;
    real
}

fn start_hand<R: RandomSource>(
    players: &mut [Player],
    setup: &HandSetup,
    rng: &mut R,
) -> Result<HandState, EngineError> {
    if players.len() < 2 {
        return Err(EngineError::NotEnoughPlayers {
            seated: players.len(),
        });
    }

    let mut state = HandState {
        deck: Deck::shuffled_with(rng),
        pot: Pot::new(),
        board: Vec::with_capacity(5),
        history: HandHistory::new(),
        history_marks: players.iter().map(|p| p.history.len()).collect(),
    };

    state.history.push(HandEventKind::HandStarted {
        table_id: setup.table_id,
        round: setup.round,
    });

    collect_blinds(players, &setup.blinds, &mut state.pot, &mut state.history);
    deal_hole_cards(players, &mut state.deck, &mut state.history)?;

    Ok(state)
}

/// Перед каждой улицей кроме префлопа: burn + открыть карты борда.
fn reveal_board(state: &mut HandState, street: Street) -> Result<(), EngineError> {
    let count = street.cards_revealed();
    if count > 0 {
        state.deck.burn()?;
        let cards = state.deck.draw_n(count)?;
        state.board.extend_from_slice(&cards);
        state.history.push(HandEventKind::BoardDealt { street, cards });
    }
    state.history.push(HandEventKind::StreetChanged { street });
    Ok(())
}

/// Шоудаун: карты открывают все, кто сидит за столом (сброс означает только
/// нулевой взнос). Весь банк уходит первому по порядку мест из лучших.
fn finish_hand(
    players: &mut [Player],
    setup: &HandSetup,
    mut state: HandState,
) -> Result<(HandSummary, HandHistory), EngineError> {
    let values: Vec<HandValue> = players
        .iter()
        .map(|p| {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&state.board);
            setup.evaluator.evaluate(&cards)
        })
        .collect();

    for (idx, (player, value)) in players.iter().zip(&values).enumerate() {
        state.history.push(HandEventKind::ShowdownReveal {
            seat: seat_index(idx),
            player_id: player.id,
            hole_cards: player.hole_cards.clone(),
            value: value.clone(),
        });
    }

    let winner_idx = best_of(&values).ok_or(EngineError::NotEnoughPlayers { seated: 0 })?;

    let blinds_collected = state.pot.blinds;
    let bets_collected = state.pot.bets;
    let total_pot = state.pot.take();

    let winner = &mut players[winner_idx];
    winner.stack += total_pot;
    let winner_id = winner.id;
    state.history.push(HandEventKind::PotAwarded {
        seat: seat_index(winner_idx),
        player_id: winner_id,
        amount: total_pot,
    });

    // Рейзил в этой раздаче, показал старшую карту и проиграл: блеф.
    let bluffers: Vec<usize> = (0..players.len())
        .filter(|&idx| {
            idx != winner_idx
                && values[idx].category == HandCategory::HighCard
                && players[idx].raises_since(state.history_marks[idx]) > 0
        })
        .collect();
    for &bluffer in &bluffers {
        let name = players[bluffer].name.clone();
        for (idx, other) in players.iter_mut().enumerate() {
            if idx != bluffer {
                other.record_opponent_action(&name, Observation::Bluff);
            }
        }
    }

    let results = players
        .iter()
        .zip(values)
        .enumerate()
        .map(|(idx, (p, value))| PlayerHandResult {
            player_id: p.id,
            name: p.name.clone(),
            value,
            won: if idx == winner_idx { total_pot } else { Chips::ZERO },
            is_winner: idx == winner_idx,
        })
        .collect();

    state.history.push(HandEventKind::HandFinished {
        table_id: setup.table_id,
        round: setup.round,
    });

    let summary = HandSummary {
        table_id: setup.table_id,
        round: setup.round,
        board: state.board,
        blinds_collected,
        bets_collected,
        total_pot,
        winner: winner_id,
        results,
    };

    Ok((summary, state.history))
}
