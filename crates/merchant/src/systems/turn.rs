use log::{info, warn};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::{GameState, GameStatus};
use crate::logs;
use crate::systems::analytics::refresh_market_intel;
use crate::systems::calendar::{
    activate_event, expire_events, generate_random_event, generate_seasonal_event, update_seasons,
};
use crate::systems::economy::{generate_market_prices, round_half_up, EventId, SeasonId, TownId};
use crate::systems::trading::unrealized_profit;
use crate::world::ReferenceData;

/// Fraction of base price credited for goods still in the hold at scoring.
const INVENTORY_SCORE_RATE: f64 = 0.8;
/// Bonus per unused turn when the target was reached.
const EARLY_FINISH_BONUS: i64 = 50;

/// What one travel step changed. The state remains the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: u32,
    pub town: TownId,
    pub season_changed: Option<SeasonId>,
    pub expired_events: usize,
    pub events_drawn: Vec<EventId>,
    pub alerts_fired: Vec<String>,
    pub status: GameStatus,
}

/// Moves the merchant to `town` and advances the world by one turn.
///
/// The steps always run in the same order: season, expiry, random event,
/// festival, prices, market intel, termination, travel log. A finished game is
/// left untouched and yields `None`.
pub fn travel_to_town<R: RngCore + ?Sized>(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
    town: &TownId,
) -> Option<TurnReport> {
    if state.game_status.is_over() {
        warn!(
            "travel to {} ignored: game already {:?}",
            town, state.game_status
        );
        return None;
    }
    let destination = data.town(town.as_str());

    state.current_town_id = destination.id.clone();
    state.turn += 1;

    let season_changed = update_seasons(state, data, cfg);
    let expired_events = expire_events(state);

    let mut events_drawn = Vec::new();
    if let Some(event) = generate_random_event(state, data, cfg, rng) {
        events_drawn.push(event.id.clone());
        activate_event(state, data, cfg, event);
    }
    if let Some(festival) = generate_seasonal_event(state, data, rng) {
        events_drawn.push(festival.id.clone());
        activate_event(state, data, cfg, festival);
    }

    generate_market_prices(state, data, cfg, rng);
    let alerts_fired = refresh_market_intel(state, data, cfg, rng);

    if state.gold >= state.target_gold {
        state.game_status = GameStatus::Won;
    } else if state.turn > state.max_turns {
        state.game_status = GameStatus::Ended;
    }
    if state.game_status.is_over() {
        info!(
            "game over status={:?} turn={} gold={}",
            state.game_status, state.turn, state.gold
        );
    }

    state.push_log(
        format!("Traveled to {} (Turn {})", destination.name, state.turn),
        cfg.logs.event_log_cap,
    );
    state.event_log.truncate(cfg.logs.event_log_cap);

    let report = TurnReport {
        turn: state.turn,
        town: state.current_town_id.clone(),
        season_changed,
        expired_events,
        events_drawn,
        alerts_fired,
        status: state.game_status,
    };
    if let Err(err) = logs::trading::log_turn(&report, state.gold) {
        warn!("turn log write failed: {err:#}");
    }
    Some(report)
}

/// Final gold, an early-finish bonus on a win, and 80% of the hold's base
/// value.
pub fn calculate_score(state: &GameState, data: &ReferenceData) -> i64 {
    let mut score = state.gold;
    if state.game_status == GameStatus::Won {
        let turns_left = i64::from(state.max_turns) - i64::from(state.turn);
        score += turns_left * EARLY_FINISH_BONUS;
    }
    let hold: f64 = state
        .inventory
        .iter()
        .map(|(good, qty)| {
            f64::from(*qty) * f64::from(data.good(good.as_str()).base_price) * INVENTORY_SCORE_RATE
        })
        .sum();
    score + round_half_up(hold)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreRating {
    pub title: &'static str,
    pub stars: u8,
}

pub fn score_rating(score: i64) -> ScoreRating {
    let (title, stars) = match score {
        s if s >= 6000 => ("Legendary Merchant", 5),
        s if s >= 5000 => ("Master Trader", 4),
        s if s >= 3000 => ("Skilled Merchant", 3),
        s if s >= 2000 => ("Apprentice Trader", 2),
        _ => ("Novice Merchant", 1),
    };
    ScoreRating { title, stars }
}

/// End-of-journey recap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSummary {
    pub headline: &'static str,
    pub score: i64,
    pub rating: ScoreRating,
    pub status: GameStatus,
    pub final_gold: i64,
    /// Gold gained over the starting purse.
    pub profit: i64,
    pub unrealized_profit: i64,
    pub turns_used: u32,
    pub max_turns: u32,
}

pub fn summarize(state: &GameState, data: &ReferenceData, cfg: &GameConfig) -> GameSummary {
    let score = calculate_score(state, data);
    let profit = state.gold - cfg.economy.starting_gold;
    let headline = if state.game_status == GameStatus::Won {
        "Victory!"
    } else if state.gold >= state.target_gold {
        "Success!"
    } else if profit > 0 {
        "Profit Made!"
    } else {
        "Journey Complete"
    };
    GameSummary {
        headline,
        score,
        rating: score_rating(score),
        status: state.game_status,
        final_gold: state.gold,
        profit,
        unrealized_profit: unrealized_profit(state),
        turns_used: state.turn.saturating_sub(1),
        max_turns: state.max_turns,
    }
}

#[cfg(test)]
#[path = "tests/travel.rs"]
mod travel;
