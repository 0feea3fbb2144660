use log::{debug, warn};

use crate::config::{GameConfig, LuxuryGate};
use crate::game_state::GameState;
use crate::logs;
use crate::systems::economy::{round_half_up_u32, GoodId};
use crate::systems::reputation::{
    gated_goods, get_town_reputation, update_reputation, ReputationAction, ReputationStatus,
    TownReputation,
};
use crate::world::{GoodCategory, GoodSpec, ReferenceData};

use super::inventory::{credit, debit};
use super::journal::{add_to_cost_basis, record_trade, settle_cost_basis};
use super::types::{TradeKind, TransactionResult};

const GAME_OVER: &str = "The journey is over";
const ZERO_QUANTITY: &str = "Quantity must be at least 1";

/// Whether standing in the current town lets the merchant buy `good`.
pub fn has_trade_access(gate: LuxuryGate, good: &GoodSpec, rep: &TownReputation) -> bool {
    match gate {
        LuxuryGate::AnyLuxury => {
            good.category != GoodCategory::Luxury
                || !rep.exclusive_goods_access.is_empty()
                || rep.status == ReputationStatus::Vip
        }
        LuxuryGate::ExclusiveOnly => {
            !gated_goods().contains(&good.id.as_str()) || rep.has_access(&good.id)
        }
    }
}

/// Buy quote per unit after the current town's reputation modifier.
pub fn effective_buy_price(state: &GameState, good: &GoodId) -> u32 {
    let rep = get_town_reputation(state, &state.current_town_id);
    round_half_up_u32(f64::from(state.current_price(good).buy) * rep.price_modifier)
}

/// Sell quote per unit. Better standing divides by a smaller modifier, so it
/// raises what the merchant receives.
pub fn effective_sell_price(state: &GameState, good: &GoodId) -> u32 {
    let rep = get_town_reputation(state, &state.current_town_id);
    round_half_up_u32(f64::from(state.current_price(good).sell) / rep.price_modifier)
}

/// Buys `quantity` units at the current town. Checks run in order and the
/// first failure is returned without touching the state.
pub fn buy_good(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    good: &GoodId,
    quantity: u32,
) -> TransactionResult {
    if state.game_status.is_over() {
        return TransactionResult::rejected(GAME_OVER);
    }
    if quantity == 0 {
        return TransactionResult::rejected(ZERO_QUANTITY);
    }
    let spec = data.good(good.as_str());
    let rep = get_town_reputation(state, &state.current_town_id);
    if !has_trade_access(cfg.trading.luxury_gate, spec, &rep) {
        return TransactionResult::rejected(format!(
            "Your reputation in {} is too low to buy {}!",
            data.town(state.current_town_id.as_str()).name,
            spec.name
        ));
    }

    let quote = state.current_price(good);
    if quantity > quote.available {
        return TransactionResult::rejected(format!(
            "Only {} {} available!",
            quote.available, spec.name
        ));
    }

    let unit_price = effective_buy_price(state, good);
    let total_cost = i64::from(unit_price) * i64::from(quantity);
    if total_cost > state.gold {
        return TransactionResult::rejected("Not enough gold!");
    }

    if state.current_cargo + quantity > state.cargo_limit {
        return TransactionResult::rejected("Not enough cargo space!");
    }

    let held_before = state.quantity(good);
    state.gold -= total_cost;
    credit(state, good, quantity);
    if let Some(market) = state
        .market_prices
        .get_mut(&state.current_town_id)
        .and_then(|quotes| quotes.get_mut(good))
    {
        market.available -= quantity;
    }
    add_to_cost_basis(state, good, held_before, quantity, unit_price);
    let record = record_trade(state, data, cfg, TradeKind::Buy, good, quantity, unit_price);
    let message = format!("Bought {quantity} {} for {total_cost} gold", spec.name);
    let town = state.current_town_id.clone();
    update_reputation(
        state,
        data,
        cfg,
        &town,
        cfg.trading.reputation_per_trade,
        ReputationAction::Purchase,
        &message,
    );

    debug!(
        "buy good={} qty={} unit={} gold_after={}",
        good, quantity, unit_price, state.gold
    );
    if let Err(err) = logs::trading::log_trade(&record, state.gold) {
        warn!("trade log write failed: {err:#}");
    }
    TransactionResult::completed(message, -total_cost, i64::from(quantity))
}

/// Sells `quantity` owned units at the current town.
pub fn sell_good(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    good: &GoodId,
    quantity: u32,
) -> TransactionResult {
    if state.game_status.is_over() {
        return TransactionResult::rejected(GAME_OVER);
    }
    if quantity == 0 {
        return TransactionResult::rejected(ZERO_QUANTITY);
    }
    let spec = data.good(good.as_str());
    let held = state.quantity(good);
    if quantity > held {
        return TransactionResult::rejected(format!("You only have {held} {}!", spec.name));
    }

    let unit_price = effective_sell_price(state, good);
    let earnings = i64::from(unit_price) * i64::from(quantity);
    state.gold += earnings;
    debit(state, good, quantity);
    settle_cost_basis(state, good);
    let record = record_trade(state, data, cfg, TradeKind::Sell, good, quantity, unit_price);
    let message = format!("Sold {quantity} {} for {earnings} gold", spec.name);
    let town = state.current_town_id.clone();
    update_reputation(
        state,
        data,
        cfg,
        &town,
        cfg.trading.reputation_per_trade,
        ReputationAction::Sale,
        &message,
    );

    debug!(
        "sell good={} qty={} unit={} gold_after={}",
        good, quantity, unit_price, state.gold
    );
    if let Err(err) = logs::trading::log_trade(&record, state.gold) {
        warn!("trade log write failed: {err:#}");
    }
    TransactionResult::completed(message, earnings, -i64::from(quantity))
}
