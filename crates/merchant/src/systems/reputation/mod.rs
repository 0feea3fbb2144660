use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::systems::economy::{round_half_up, GoodId, TownId};
use crate::world::ReferenceData;

pub const MIN_POINTS: i32 = -100;
pub const MAX_POINTS: i32 = 100;

/// Points change that is worth a line in the player's event log.
const LOGGED_CHANGE: i32 = 5;

const EXCELLENT_ACCESS: &[&str] = &["gems"];
const VIP_ACCESS: &[&str] = &["gems", "exotic_spices", "rare_books"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationStatus {
    Blacklisted,
    Poor,
    Neutral,
    Good,
    Excellent,
    Vip,
}

impl ReputationStatus {
    pub fn from_points(points: i32) -> Self {
        match points {
            p if p <= -80 => Self::Blacklisted,
            p if p <= -40 => Self::Poor,
            p if p <= 20 => Self::Neutral,
            p if p <= 60 => Self::Good,
            p if p <= 85 => Self::Excellent,
            _ => Self::Vip,
        }
    }

    /// Multiplier applied to buy quotes; sell quotes are divided by it.
    pub fn price_modifier(self) -> f64 {
        match self {
            Self::Blacklisted => 1.5,
            Self::Poor => 1.2,
            Self::Neutral => 1.0,
            Self::Good => 0.9,
            Self::Excellent => 0.8,
            Self::Vip => 0.7,
        }
    }

    pub fn exclusive_goods(self) -> &'static [&'static str] {
        match self {
            Self::Excellent => EXCELLENT_ACCESS,
            Self::Vip => VIP_ACCESS,
            Self::Blacklisted | Self::Poor | Self::Neutral | Self::Good => &[],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Blacklisted => "Blacklisted",
            Self::Poor => "Poor",
            Self::Neutral => "Neutral",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
            Self::Vip => "VIP",
        }
    }

    /// Player-facing summary of what the tier means at the counter.
    pub fn description(self) -> &'static str {
        match self {
            Self::Blacklisted => "Banned from trading premium goods",
            Self::Poor => "Higher prices, limited access",
            Self::Neutral => "Standard trading conditions",
            Self::Good => "10% discount on all goods",
            Self::Excellent => "20% discount + rare gems access",
            Self::Vip => "30% discount + all exclusive goods",
        }
    }
}

/// Every good any tier can unlock.
pub fn gated_goods() -> &'static [&'static str] {
    VIP_ACCESS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TownReputation {
    pub town_id: TownId,
    pub points: i32,
    pub status: ReputationStatus,
    pub price_modifier: f64,
    pub exclusive_goods_access: Vec<GoodId>,
}

impl TownReputation {
    pub fn neutral(town_id: TownId) -> Self {
        Self::with_points(town_id, 0)
    }

    pub fn with_points(town_id: TownId, points: i32) -> Self {
        let points = points.clamp(MIN_POINTS, MAX_POINTS);
        let status = ReputationStatus::from_points(points);
        Self {
            town_id,
            points,
            status,
            price_modifier: status.price_modifier(),
            exclusive_goods_access: status
                .exclusive_goods()
                .iter()
                .map(|good| GoodId::from(*good))
                .collect(),
        }
    }

    pub fn has_access(&self, good: &GoodId) -> bool {
        self.exclusive_goods_access.contains(good)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReputationAction {
    Purchase,
    Sale,
    Adjustment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationEvent {
    pub id: String,
    pub town_id: TownId,
    pub action: ReputationAction,
    pub points_changed: i32,
    pub turn: u32,
    pub seq: u64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReputationSystem {
    /// Rounded mean of every town's points.
    pub global_reputation: i32,
    pub town_reputations: BTreeMap<TownId, TownReputation>,
    /// Newest first.
    pub reputation_events: Vec<ReputationEvent>,
}

impl ReputationSystem {
    fn recompute_global(&mut self) {
        if self.town_reputations.is_empty() {
            self.global_reputation = 0;
            return;
        }
        let total: i64 = self
            .town_reputations
            .values()
            .map(|rep| i64::from(rep.points))
            .sum();
        let mean = total as f64 / self.town_reputations.len() as f64;
        self.global_reputation = round_half_up(mean) as i32;
    }
}

/// Every known town at neutral standing.
pub fn initialize_reputation_system(data: &ReferenceData) -> ReputationSystem {
    ReputationSystem {
        global_reputation: 0,
        town_reputations: data
            .towns()
            .iter()
            .map(|town| (town.id.clone(), TownReputation::neutral(town.id.clone())))
            .collect(),
        reputation_events: Vec::new(),
    }
}

/// Standing in `town`, or a fresh neutral record when the town has none.
pub fn get_town_reputation(state: &GameState, town: &TownId) -> TownReputation {
    state
        .reputation
        .town_reputations
        .get(town)
        .cloned()
        .unwrap_or_else(|| TownReputation::neutral(town.clone()))
}

/// The only way points change. Clamps, re-derives the tier and the global
/// mean, and records an audit entry for any non-zero change.
pub fn update_reputation(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    town: &TownId,
    points_change: i32,
    action: ReputationAction,
    description: &str,
) {
    let before = get_town_reputation(state, town);
    let after = TownReputation::with_points(
        town.clone(),
        before.points.saturating_add(points_change),
    );
    let status_changed = before.status != after.status;
    state
        .reputation
        .town_reputations
        .insert(town.clone(), after.clone());
    state.reputation.recompute_global();

    if points_change != 0 {
        let (id, seq) = state.mint_id("rep", town.as_str());
        let event = ReputationEvent {
            id,
            town_id: town.clone(),
            action,
            points_changed: points_change,
            turn: state.turn,
            seq,
            description: description.to_string(),
        };
        let events = &mut state.reputation.reputation_events;
        events.insert(0, event);
        events.truncate(cfg.logs.reputation_events_cap);
    }

    if points_change.abs() >= LOGGED_CHANGE {
        let sign = if points_change > 0 { "+" } else { "" };
        state.push_log(
            format!(
                "[Reputation] {}: {sign}{points_change} ({description})",
                data.town(town.as_str()).name
            ),
            cfg.logs.event_log_cap,
        );
    }
    if status_changed {
        debug!(
            "reputation tier change town={} {:?} -> {:?} points={}",
            town, before.status, after.status, after.points
        );
    }
}

#[cfg(test)]
#[path = "tests/tiers.rs"]
mod tiers;
