use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::systems::economy::{GoodId, SeasonId, TownId};
use crate::systems::trading::TradeKind;

use super::routes::{calculate_route_analysis, RouteAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeBucket {
    pub trades: u32,
    pub profit: i64,
    pub volume: u32,
}

impl TradeBucket {
    fn add(&mut self, route: &RouteAnalysis) {
        self.trades += 1;
        self.profit += route.profit;
        self.volume += route.quantity;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteTotal {
    pub from: TownId,
    pub to: TownId,
    pub profit: i64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TradingStats {
    /// Journal entries, buys and sells alike.
    pub total_trades: usize,
    pub total_profit: i64,
    pub total_loss: i64,
    pub net_profit: i64,
    pub best_trade: Option<RouteAnalysis>,
    pub worst_trade: Option<RouteAnalysis>,
    pub favorite_good: Option<GoodId>,
    pub most_profitable_route: Option<RouteTotal>,
    /// Net profit per matched route.
    pub average_profit_per_trade: f64,
    pub successful_trades: u32,
    pub lossful_trades: u32,
    pub trades_by_good: BTreeMap<GoodId, TradeBucket>,
    /// Keyed by the town the goods were bought in.
    pub trades_by_town: BTreeMap<TownId, TradeBucket>,
    pub trades_by_season: BTreeMap<SeasonId, TradeBucket>,
}

pub fn calculate_trading_stats(state: &GameState) -> TradingStats {
    let routes = calculate_route_analysis(state);
    let mut stats = TradingStats {
        total_trades: state.trading_journal.len(),
        ..TradingStats::default()
    };

    let mut pair_totals: BTreeMap<(TownId, TownId), i64> = BTreeMap::new();
    for route in &routes {
        if route.profit > 0 {
            stats.total_profit += route.profit;
            stats.successful_trades += 1;
        } else if route.profit < 0 {
            stats.total_loss += route.profit.abs();
            stats.lossful_trades += 1;
        }
        stats
            .trades_by_good
            .entry(route.good_id.clone())
            .or_default()
            .add(route);
        stats
            .trades_by_town
            .entry(route.from_town.clone())
            .or_default()
            .add(route);
        stats
            .trades_by_season
            .entry(route.season.clone())
            .or_default()
            .add(route);
        *pair_totals
            .entry((route.from_town.clone(), route.to_town.clone()))
            .or_insert(0) += route.profit;
    }
    stats.net_profit = stats.total_profit - stats.total_loss;
    if !routes.is_empty() {
        stats.average_profit_per_trade = stats.net_profit as f64 / routes.len() as f64;
    }
    // routes are sorted by profit, descending
    stats.best_trade = routes.first().cloned();
    stats.worst_trade = routes.last().cloned();

    let mut best_pair: Option<RouteTotal> = None;
    for ((from, to), profit) in pair_totals {
        if best_pair.as_ref().map_or(true, |best| profit > best.profit) {
            best_pair = Some(RouteTotal { from, to, profit });
        }
    }
    stats.most_profitable_route = best_pair;

    let mut sold: BTreeMap<&GoodId, u32> = BTreeMap::new();
    for record in &state.trading_journal {
        if record.kind == TradeKind::Sell {
            *sold.entry(&record.good_id).or_insert(0) += record.quantity;
        }
    }
    let mut favorite: Option<(&GoodId, u32)> = None;
    for (good, volume) in sold {
        if favorite.map_or(true, |(_, best)| volume > best) {
            favorite = Some((good, volume));
        }
    }
    stats.favorite_good = favorite.map(|(good, _)| good.clone());

    stats
}
