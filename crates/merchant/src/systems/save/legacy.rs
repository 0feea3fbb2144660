use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_state::{ActiveEvent, GameState, GameStatus, MarketPrice};
use crate::systems::analytics::MarketAlerts;
use crate::systems::economy::{EventId, GoodId, SeasonId, TownId};
use crate::systems::reputation::ReputationSystem;
use crate::world::{EventKind, ReferenceData};

/// First-release save layout: camelCase keys, no journal, alerts or
/// reputation, and season fields only in late 1.x revisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveV1 {
    pub current_town_id: TownId,
    pub gold: i64,
    pub inventory: BTreeMap<GoodId, u32>,
    pub turn: u32,
    pub max_turns: u32,
    pub cargo_limit: u32,
    #[serde(default)]
    pub current_cargo: u32,
    pub target_gold: i64,
    pub game_status: GameStatus,
    #[serde(default)]
    pub active_events: Vec<EventV1>,
    #[serde(default)]
    pub event_log: Vec<String>,
    #[serde(default)]
    pub market_prices: BTreeMap<TownId, BTreeMap<GoodId, MarketPrice>>,
    #[serde(default)]
    pub current_season: Option<SeasonId>,
    #[serde(default)]
    pub season_turn: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventV1 {
    pub id: EventId,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: BTreeMap<GoodId, f64>,
    pub duration: u32,
    #[serde(default)]
    pub weight: u32,
}

impl SaveV1 {
    pub fn upgrade(self, data: &ReferenceData) -> GameState {
        let active_events = self
            .active_events
            .into_iter()
            .filter(|event| event.duration > 0)
            .map(|event| ActiveEvent {
                id: event.id,
                kind: event.kind,
                title: event.title,
                description: event.description,
                effects: event.effects,
                duration: event.duration,
                town_id: None,
            })
            .collect();

        let mut state = GameState {
            current_town_id: self.current_town_id,
            turn: self.turn,
            max_turns: self.max_turns,
            current_season: self.current_season.unwrap_or_default(),
            season_turn: self.season_turn.unwrap_or(0),
            gold: self.gold,
            target_gold: self.target_gold,
            inventory: self.inventory,
            current_cargo: self.current_cargo,
            cargo_limit: self.cargo_limit,
            market_prices: self.market_prices,
            active_events,
            event_log: self.event_log,
            trading_journal: Vec::new(),
            pending_purchases: BTreeMap::new(),
            market_alerts: MarketAlerts::default(),
            reputation: ReputationSystem::default(),
            game_status: self.game_status,
            record_seq: 0,
        };
        state.fill_missing_blocks(data);
        state
    }
}
