//! Owns everything a session needs and exposes the game operations as
//! methods, so callers never thread reference data, tuning and the random
//! source through each call by hand.

use log::info;
use rand_core::RngCore;

use crate::config::GameConfig;
use crate::game_state::{create_new_game_state, GameState};
use crate::systems::analytics::{
    calculate_route_analysis, calculate_trading_stats, create_price_alert, get_active_alerts,
    remove_price_alert, ActiveAlerts, AlertDirection, RouteAnalysis, TradingStats,
};
use crate::systems::economy::{DetRng, GoodId, TownId, RNG_TAG_SESSION};
use crate::systems::reputation::{get_town_reputation, TownReputation};
use crate::systems::save::{load_or_new, SaveError, SaveStore};
use crate::systems::trading::{
    buy_good, effective_buy_price, effective_sell_price, sell_good, TransactionResult,
};
use crate::systems::turn::{calculate_score, summarize, travel_to_town, GameSummary, TurnReport};
use crate::world::ReferenceData;

pub struct Merchant<R = DetRng> {
    data: ReferenceData,
    cfg: GameConfig,
    rng: R,
    state: GameState,
}

impl Merchant<DetRng> {
    /// Fresh game on the session stream of `world_seed`.
    pub fn from_seed(data: ReferenceData, cfg: GameConfig, world_seed: u64) -> Self {
        Self::new(data, cfg, DetRng::from_seed(world_seed, RNG_TAG_SESSION))
    }
}

impl<R: RngCore> Merchant<R> {
    pub fn new(data: ReferenceData, cfg: GameConfig, mut rng: R) -> Self {
        let state = create_new_game_state(&data, &cfg, &mut rng);
        Self {
            data,
            cfg,
            rng,
            state,
        }
    }

    /// Resumes whatever `store` holds, or starts fresh when it holds nothing
    /// usable.
    pub fn restore<S: SaveStore + ?Sized>(
        data: ReferenceData,
        cfg: GameConfig,
        mut rng: R,
        store: &S,
    ) -> Self {
        let state = load_or_new(store, &data, &cfg, &mut rng);
        Self {
            data,
            cfg,
            rng,
            state,
        }
    }

    /// Abandons the current game and starts over, keeping the random stream.
    pub fn new_game(&mut self) {
        info!("starting a new game at turn {}", self.state.turn);
        self.state = create_new_game_state(&self.data, &self.cfg, &mut self.rng);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn config(&self) -> &GameConfig {
        &self.cfg
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn buy(&mut self, good: &GoodId, quantity: u32) -> TransactionResult {
        buy_good(&mut self.state, &self.data, &self.cfg, good, quantity)
    }

    pub fn sell(&mut self, good: &GoodId, quantity: u32) -> TransactionResult {
        sell_good(&mut self.state, &self.data, &self.cfg, good, quantity)
    }

    /// Reputation-adjusted price to buy one unit here.
    pub fn buy_quote(&self, good: &GoodId) -> u32 {
        effective_buy_price(&self.state, good)
    }

    /// Reputation-adjusted price received for one unit here.
    pub fn sell_quote(&self, good: &GoodId) -> u32 {
        effective_sell_price(&self.state, good)
    }

    pub fn travel(&mut self, town: &TownId) -> Option<TurnReport> {
        travel_to_town(&mut self.state, &self.data, &self.cfg, &mut self.rng, town)
    }

    pub fn score(&self) -> i64 {
        calculate_score(&self.state, &self.data)
    }

    pub fn summary(&self) -> GameSummary {
        summarize(&self.state, &self.data, &self.cfg)
    }

    pub fn reputation(&self, town: &TownId) -> TownReputation {
        get_town_reputation(&self.state, town)
    }

    pub fn alerts(&self) -> ActiveAlerts<'_> {
        get_active_alerts(&self.state)
    }

    pub fn create_price_alert(
        &mut self,
        good: &GoodId,
        target_price: u32,
        direction: AlertDirection,
    ) -> String {
        create_price_alert(&mut self.state, &self.data, good, target_price, direction)
    }

    pub fn remove_price_alert(&mut self, alert_id: &str) -> bool {
        remove_price_alert(&mut self.state, alert_id)
    }

    pub fn route_analysis(&self) -> Vec<RouteAnalysis> {
        calculate_route_analysis(&self.state)
    }

    pub fn trading_stats(&self) -> TradingStats {
        calculate_trading_stats(&self.state)
    }

    pub fn save<S: SaveStore + ?Sized>(&self, store: &mut S) -> Result<(), SaveError> {
        store.save(&self.state)
    }
}
