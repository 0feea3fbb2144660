use std::collections::BTreeMap;

use rand_core::RngCore;

use crate::config::GameConfig;
use crate::game_state::{ActiveEvent, GameState, MarketPrice};
use crate::world::ReferenceData;

use super::rng::{range_u32, uniform_f64};
use super::rounding::{round_half_up, round_half_up_u32};
use super::types::{GoodId, TownId};

/// Product of every active effect on `good` in `town`; 1.0 when nothing applies.
pub fn event_modifier(
    events: &[ActiveEvent],
    good: &GoodId,
    town: &TownId,
    current_town: &TownId,
) -> f64 {
    events
        .iter()
        .filter(|event| event.applies_to(town, current_town))
        .filter_map(|event| event.effect_for(good))
        .product()
}

/// Replaces every quote in `state.market_prices`.
///
/// Draw order is fixed: towns in catalog order, goods in catalog order, and per
/// pair one price draw followed by one stock draw.
pub fn generate_market_prices<R: RngCore + ?Sized>(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
) {
    let econ = &cfg.economy;
    let season = data.season(state.current_season.as_str());
    let mut prices = BTreeMap::new();

    for town in data.towns() {
        let mut quotes = BTreeMap::new();
        for good in data.goods() {
            let modifier = town.price_modifier(&good.id)
                * season.price_modifier(&good.id)
                * event_modifier(
                    &state.active_events,
                    &good.id,
                    &town.id,
                    &state.current_town_id,
                )
                * uniform_f64(rng, econ.random_min, econ.random_max);
            let final_price = round_half_up(f64::from(good.base_price) * modifier) as f64;

            let stock = range_u32(rng, econ.stock_min, econ.stock_max);
            let available =
                round_half_up_u32(f64::from(stock) * season.availability_modifier(&good.id)).max(1);

            quotes.insert(
                good.id.clone(),
                MarketPrice {
                    buy: round_half_up_u32(final_price * econ.buy_spread),
                    sell: round_half_up_u32(final_price * econ.sell_spread),
                    available,
                },
            );
        }
        prices.insert(town.id.clone(), quotes);
    }

    state.market_prices = prices;
}
