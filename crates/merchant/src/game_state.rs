use std::collections::BTreeMap;

use log::debug;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::systems::analytics::{refresh_market_intel, MarketAlerts};
use crate::systems::economy::{generate_market_prices, EventId, GoodId, SeasonId, TownId};
use crate::systems::reputation::{initialize_reputation_system, ReputationSystem, TownReputation};
use crate::systems::trading::{CostBasis, TradeRecord};
use crate::world::{EventKind, EventSpec, FestivalSpec, ReferenceData};

/// Lifecycle of a single playthrough. Anything other than `Playing` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    /// Reserved; no rule currently produces a loss.
    Lost,
    Ended,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// Quote for one good in one town for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPrice {
    pub buy: u32,
    pub sell: u32,
    pub available: u32,
}

/// A live price effect with its remaining lifetime in turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEvent {
    pub id: EventId,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub effects: BTreeMap<GoodId, f64>,
    pub duration: u32,
    /// Town the merchant was in when a local event was drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_id: Option<TownId>,
}

impl ActiveEvent {
    pub fn from_catalog(spec: &EventSpec, town: &TownId) -> Self {
        let town_id = match spec.kind {
            EventKind::Local => Some(town.clone()),
            EventKind::Global | EventKind::Seasonal => None,
        };
        Self {
            id: spec.id.clone(),
            kind: spec.kind,
            title: spec.title.clone(),
            description: spec.description.clone(),
            effects: spec.effects.clone(),
            duration: spec.duration,
            town_id,
        }
    }

    pub fn from_festival(spec: &FestivalSpec) -> Self {
        Self {
            id: spec.id.clone(),
            kind: EventKind::Seasonal,
            title: spec.title.clone(),
            description: spec.description.clone(),
            effects: spec.effects.clone(),
            duration: spec.duration,
            town_id: None,
        }
    }

    /// Whether this event moves prices in `town` while the merchant stands in
    /// `current_town`. Local events only reach their own town, and only while
    /// the merchant is there.
    pub fn applies_to(&self, town: &TownId, current_town: &TownId) -> bool {
        match self.kind {
            EventKind::Global | EventKind::Seasonal => true,
            EventKind::Local => match &self.town_id {
                Some(origin) => origin == town && origin == current_town,
                None => town == current_town,
            },
        }
    }

    pub fn effect_for(&self, good: &GoodId) -> Option<f64> {
        self.effects.get(good).copied()
    }
}

/// The whole mutable game aggregate. Blocks added after the first release
/// carry `#[serde(default)]` so older saves deserialize and are completed by
/// [`GameState::fill_missing_blocks`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub current_town_id: TownId,
    pub turn: u32,
    pub max_turns: u32,
    #[serde(default)]
    pub current_season: SeasonId,
    #[serde(default)]
    pub season_turn: u32,
    pub gold: i64,
    pub target_gold: i64,
    pub inventory: BTreeMap<GoodId, u32>,
    pub current_cargo: u32,
    pub cargo_limit: u32,
    #[serde(default)]
    pub market_prices: BTreeMap<TownId, BTreeMap<GoodId, MarketPrice>>,
    #[serde(default)]
    pub active_events: Vec<ActiveEvent>,
    #[serde(default)]
    pub event_log: Vec<String>,
    #[serde(default)]
    pub trading_journal: Vec<TradeRecord>,
    #[serde(default)]
    pub pending_purchases: BTreeMap<GoodId, CostBasis>,
    #[serde(default)]
    pub market_alerts: MarketAlerts,
    #[serde(default)]
    pub reputation: ReputationSystem,
    pub game_status: GameStatus,
    #[serde(default)]
    pub record_seq: u64,
}

/// Fresh game in the first town and first season, with prices generated and
/// turn-1 market intel already computed.
pub fn create_new_game_state<R: RngCore + ?Sized>(
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
) -> GameState {
    let town = data.starting_town();
    let mut state = GameState {
        current_town_id: town.id.clone(),
        turn: 1,
        max_turns: cfg.economy.max_turns,
        current_season: data.first_season().id.clone(),
        season_turn: 1,
        gold: cfg.economy.starting_gold,
        target_gold: cfg.economy.target_gold,
        inventory: data.goods().iter().map(|g| (g.id.clone(), 0)).collect(),
        current_cargo: 0,
        cargo_limit: cfg.economy.cargo_limit,
        market_prices: BTreeMap::new(),
        active_events: Vec::new(),
        event_log: Vec::new(),
        trading_journal: Vec::new(),
        pending_purchases: BTreeMap::new(),
        market_alerts: MarketAlerts::default(),
        reputation: initialize_reputation_system(data),
        game_status: GameStatus::Playing,
        record_seq: 0,
    };
    state.push_log(
        format!("Welcome to {}! Your trading journey begins.", town.name),
        cfg.logs.event_log_cap,
    );
    generate_market_prices(&mut state, data, cfg, rng);
    refresh_market_intel(&mut state, data, cfg, rng);
    debug!(
        "new game: town={} season={} gold={}",
        state.current_town_id, state.current_season, state.gold
    );
    state
}

impl GameState {
    pub fn quantity(&self, good: &GoodId) -> u32 {
        self.inventory.get(good).copied().unwrap_or(0)
    }

    /// Quote for `good` in `town`. Prices exist for every catalog pair once
    /// generated, so a miss is a contract violation.
    pub fn price(&self, town: &TownId, good: &GoodId) -> MarketPrice {
        self.market_prices
            .get(town)
            .and_then(|goods| goods.get(good))
            .copied()
            .unwrap_or_else(|| panic!("no market price for `{good}` in `{town}`"))
    }

    pub fn current_price(&self, good: &GoodId) -> MarketPrice {
        self.price(&self.current_town_id, good)
    }

    /// Prepends a log line, keeping at most `cap` entries.
    pub fn push_log(&mut self, line: String, cap: usize) {
        self.event_log.insert(0, line);
        self.event_log.truncate(cap);
    }

    /// Advances the logical clock and returns the new tick.
    pub fn next_seq(&mut self) -> u64 {
        self.record_seq += 1;
        self.record_seq
    }

    /// Mints a stable record id from the logical clock and a salt.
    pub(crate) fn mint_id(&mut self, prefix: &str, salt: &str) -> (String, u64) {
        let seq = self.next_seq();
        let hash = wyhash::wyhash(salt.as_bytes(), seq);
        (format!("{prefix}-{seq}-{:08x}", hash as u32), seq)
    }

    pub fn cargo_total(&self) -> u32 {
        self.inventory.values().sum()
    }

    /// Defaults every block a save may predate. Safe to call on a complete
    /// state.
    pub fn fill_missing_blocks(&mut self, data: &ReferenceData) {
        if self.reputation.town_reputations.is_empty() {
            self.reputation = initialize_reputation_system(data);
        } else {
            for town in data.towns() {
                if !self.reputation.town_reputations.contains_key(&town.id) {
                    self.reputation
                        .town_reputations
                        .insert(town.id.clone(), TownReputation::neutral(town.id.clone()));
                }
            }
        }
        if data.try_season(self.current_season.as_str()).is_none() {
            self.current_season = data.first_season().id.clone();
        }
        if self.season_turn == 0 {
            self.season_turn = 1;
        }
        for good in data.goods() {
            self.inventory.entry(good.id.clone()).or_insert(0);
        }
        self.current_cargo = self.cargo_total();
        let last_seq = self
            .trading_journal
            .iter()
            .map(|record| record.seq)
            .chain(self.reputation.reputation_events.iter().map(|event| event.seq))
            .max()
            .unwrap_or(0);
        self.record_seq = self.record_seq.max(last_seq);
    }
}
