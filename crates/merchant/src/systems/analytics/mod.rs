//! Derived market intelligence: route profitability, trading statistics,
//! price watches, trade opportunities and the news board.

pub mod alerts;
pub mod news;
pub mod opportunities;
pub mod routes;
pub mod stats;

use log::debug;
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::world::ReferenceData;

pub use alerts::{
    check_price_alerts, create_price_alert, remove_price_alert, AlertDirection, PriceAlert,
};
pub use news::{NewsItem, NewsKind, Severity};
pub use opportunities::{find_trade_opportunities, OpportunityKind, TradeOpportunity, Urgency};
pub use routes::{calculate_route_analysis, RouteAnalysis};
pub use stats::{calculate_trading_stats, RouteTotal, TradeBucket, TradingStats};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarketAlerts {
    pub price_alerts: Vec<PriceAlert>,
    /// Newest first.
    pub news: Vec<NewsItem>,
    /// Best margin first.
    pub opportunities: Vec<TradeOpportunity>,
    pub last_checked_turn: u32,
}

/// What the player should currently see on the alerts board.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAlerts<'a> {
    pub alerts: Vec<&'a PriceAlert>,
    pub opportunities: Vec<&'a TradeOpportunity>,
    pub news: Vec<&'a NewsItem>,
}

/// Recomputes watches, opportunities and news once per turn. Returns the ids
/// of price alerts that fired; empty when this turn was already processed.
pub fn refresh_market_intel<R: RngCore + ?Sized>(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
) -> Vec<String> {
    if state.market_alerts.last_checked_turn >= state.turn {
        return Vec::new();
    }
    let turn = state.turn;

    let fired = check_price_alerts(state, data, cfg);

    let opportunities = find_trade_opportunities(state, data, cfg);

    let mut board = std::mem::take(&mut state.market_alerts.news);
    board.retain(|item| item.is_live(turn));
    let fresh = news::generate_news(state, data, cfg, rng, &board, opportunities.first());
    board.splice(0..0, fresh);
    board.truncate(cfg.alerts.news_cap);

    debug!(
        "market intel turn={} opportunities={} news={} fired={}",
        turn,
        opportunities.len(),
        board.len(),
        fired.len()
    );
    let intel = &mut state.market_alerts;
    intel.opportunities = opportunities;
    intel.news = board;
    intel.last_checked_turn = turn;
    fired
}

pub fn get_active_alerts(state: &GameState) -> ActiveAlerts<'_> {
    let turn = state.turn;
    let intel = &state.market_alerts;
    ActiveAlerts {
        alerts: intel
            .price_alerts
            .iter()
            .filter(|alert| alert.is_active)
            .collect(),
        opportunities: intel
            .opportunities
            .iter()
            .filter(|opp| opp.valid_until >= turn)
            .collect(),
        news: intel.news.iter().filter(|item| item.is_live(turn)).collect(),
    }
}

#[cfg(test)]
#[path = "tests/alert_triggers.rs"]
mod alert_triggers;
#[cfg(test)]
#[path = "tests/intel_refresh.rs"]
mod intel_refresh;
#[cfg(test)]
#[path = "tests/route_matching.rs"]
mod route_matching;
