use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::systems::economy::{round_half_up, GoodId};
use crate::world::ReferenceData;

use super::types::{CostBasis, TradeKind, TradeRecord};

/// Appends a trade to the journal, dropping the oldest entries past the cap.
pub(crate) fn record_trade(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    kind: TradeKind,
    good: &GoodId,
    quantity: u32,
    price_per_unit: u32,
) -> TradeRecord {
    let (id, seq) = state.mint_id("trade", good.as_str());
    let town = data.town(state.current_town_id.as_str());
    let record = TradeRecord {
        id,
        seq,
        kind,
        good_id: good.clone(),
        good_name: data.good(good.as_str()).name.clone(),
        quantity,
        price_per_unit,
        total_value: i64::from(price_per_unit) * i64::from(quantity),
        town_id: town.id.clone(),
        town_name: town.name.clone(),
        turn: state.turn,
        season: state.current_season.clone(),
    };
    let journal = &mut state.trading_journal;
    journal.push(record.clone());
    let cap = cfg.logs.journal_cap;
    if journal.len() > cap {
        let overflow = journal.len() - cap;
        journal.drain(..overflow);
    }
    record
}

/// Folds a purchase into the running average. `held_before` is the quantity
/// owned before the purchase was credited.
pub(crate) fn add_to_cost_basis(
    state: &mut GameState,
    good: &GoodId,
    held_before: u32,
    quantity: u32,
    unit_price: u32,
) {
    let town = state.current_town_id.clone();
    let turn = state.turn;
    let season = state.current_season.clone();
    let previous = state
        .pending_purchases
        .get(good)
        .map(|basis| basis.price)
        .filter(|_| held_before > 0);
    let price = match previous {
        Some(avg) => {
            let held = f64::from(held_before);
            let added = f64::from(quantity);
            (avg * held + f64::from(unit_price) * added) / (held + added)
        }
        None => f64::from(unit_price),
    };
    state.pending_purchases.insert(
        good.clone(),
        CostBasis {
            price,
            town,
            turn,
            season,
        },
    );
}

/// Drops the basis once nothing of the good is left in the hold.
pub(crate) fn settle_cost_basis(state: &mut GameState, good: &GoodId) {
    if state.quantity(good) == 0 {
        state.pending_purchases.remove(good);
    }
}

pub fn cost_basis<'a>(state: &'a GameState, good: &GoodId) -> Option<&'a CostBasis> {
    state.pending_purchases.get(good)
}

/// Paper profit of the hold if sold at the current town's quotes.
pub fn unrealized_profit(state: &GameState) -> i64 {
    let paper: f64 = state
        .pending_purchases
        .iter()
        .filter_map(|(good, basis)| {
            let held = state.quantity(good);
            let quote = state
                .market_prices
                .get(&state.current_town_id)
                .and_then(|quotes| quotes.get(good))?;
            Some((f64::from(quote.sell) - basis.price) * f64::from(held))
        })
        .sum();
    round_half_up(paper)
}
