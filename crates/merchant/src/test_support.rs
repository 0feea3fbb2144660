//! Fixtures shared by unit tests across systems.

use crate::config::GameConfig;
use crate::game_state::{create_new_game_state, GameState, MarketPrice};
use crate::systems::economy::{DetRng, GoodId, TownId};
use crate::systems::reputation::TownReputation;
use crate::world::ReferenceData;

pub(crate) fn fresh_game(seed: u64) -> (ReferenceData, GameConfig, GameState) {
    let data = ReferenceData::builtin();
    let cfg = GameConfig::default();
    let state = create_new_game_state(&data, &cfg, &mut DetRng::from_seed(seed, 0));
    (data, cfg, state)
}

pub(crate) fn set_quote(
    state: &mut GameState,
    town: &str,
    good: &str,
    buy: u32,
    sell: u32,
    available: u32,
) {
    state
        .market_prices
        .entry(TownId::from(town))
        .or_default()
        .insert(
            GoodId::from(good),
            MarketPrice {
                buy,
                sell,
                available,
            },
        );
}

pub(crate) fn set_points(state: &mut GameState, town: &str, points: i32) {
    state.reputation.town_reputations.insert(
        TownId::from(town),
        TownReputation::with_points(TownId::from(town), points),
    );
}

/// Sets every quote in every town to the same values.
pub(crate) fn flatten_quotes(
    state: &mut GameState,
    data: &ReferenceData,
    buy: u32,
    sell: u32,
    available: u32,
) {
    for town in data.towns() {
        for good in data.goods() {
            set_quote(state, town.id.as_str(), good.id.as_str(), buy, sell, available);
        }
    }
}
