use serde::{Deserialize, Serialize};

use crate::game_state::GameState;
use crate::systems::economy::{GoodId, SeasonId, TownId};
use crate::systems::trading::{TradeKind, TradeRecord};

/// A sell matched against the most recent earlier buy of the same good.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteAnalysis {
    pub from_town: TownId,
    pub to_town: TownId,
    pub good_id: GoodId,
    pub good_name: String,
    pub buy_price: u32,
    pub sell_price: u32,
    pub quantity: u32,
    pub profit: i64,
    /// Profit over the matched buy's total value.
    pub profit_margin: f64,
    pub turn: u32,
    pub season: SeasonId,
}

impl RouteAnalysis {
    fn from_pair(buy: &TradeRecord, sell: &TradeRecord) -> Self {
        let profit =
            (i64::from(sell.price_per_unit) - i64::from(buy.price_per_unit)) * i64::from(sell.quantity);
        let profit_margin = if buy.total_value > 0 {
            profit as f64 / buy.total_value as f64
        } else {
            0.0
        };
        Self {
            from_town: buy.town_id.clone(),
            to_town: sell.town_id.clone(),
            good_id: sell.good_id.clone(),
            good_name: sell.good_name.clone(),
            buy_price: buy.price_per_unit,
            sell_price: sell.price_per_unit,
            quantity: sell.quantity,
            profit,
            profit_margin,
            turn: sell.turn,
            season: sell.season.clone(),
        }
    }
}

/// Every matched buy/sell pair in the journal, most profitable first. Sells
/// with no earlier buy of the same good are skipped.
pub fn calculate_route_analysis(state: &GameState) -> Vec<RouteAnalysis> {
    let journal = &state.trading_journal;
    let mut routes: Vec<RouteAnalysis> = journal
        .iter()
        .filter(|record| record.kind == TradeKind::Sell)
        .filter_map(|sell| {
            journal
                .iter()
                .filter(|buy| {
                    buy.kind == TradeKind::Buy && buy.good_id == sell.good_id && buy.seq < sell.seq
                })
                .max_by_key(|buy| buy.seq)
                .map(|buy| RouteAnalysis::from_pair(buy, sell))
        })
        .collect();
    routes.sort_by(|a, b| b.profit.cmp(&a.profit));
    routes
}
