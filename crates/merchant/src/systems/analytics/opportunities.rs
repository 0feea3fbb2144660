use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::systems::economy::{GoodId, TownId};
use crate::world::{EventKind, ReferenceData};

/// Stock at or below this in the target town reads as a shortage.
const SHORTAGE_STOCK: u32 = 15;
/// Stock at or above this in the source town reads as a surplus.
const SURPLUS_STOCK: u32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    PriceGap,
    Shortage,
    Surplus,
    Seasonal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl Urgency {
    pub fn from_margin(margin: f64) -> Self {
        if margin > 0.5 {
            Urgency::High
        } else if margin > 0.3 {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }
}

/// Buy here, sell there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOpportunity {
    pub id: String,
    pub kind: OpportunityKind,
    pub title: String,
    pub description: String,
    pub source_town_id: TownId,
    pub target_town_id: TownId,
    pub good_id: GoodId,
    pub good_name: String,
    pub source_town_name: String,
    pub target_town_name: String,
    pub source_price: u32,
    pub target_price: u32,
    /// Per unit.
    pub potential_profit: i64,
    pub profit_margin: f64,
    pub urgency: Urgency,
    pub valid_until: u32,
}

/// Scans every good against every other town and keeps the best margins.
pub fn find_trade_opportunities(
    state: &GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
) -> Vec<TradeOpportunity> {
    let alerts = &cfg.alerts;
    let here = data.town(state.current_town_id.as_str());
    let Some(local_quotes) = state.market_prices.get(&here.id) else {
        return Vec::new();
    };

    let mut found = Vec::new();
    for good in data.goods() {
        let Some(source) = local_quotes.get(&good.id) else {
            continue;
        };
        if source.buy == 0 {
            continue;
        }
        for town in data.towns().iter().filter(|town| town.id != here.id) {
            let Some(target) = state
                .market_prices
                .get(&town.id)
                .and_then(|quotes| quotes.get(&good.id))
            else {
                continue;
            };
            let profit = i64::from(target.sell) - i64::from(source.buy);
            let margin = profit as f64 / f64::from(source.buy);
            if profit <= alerts.opportunity_min_profit || margin <= alerts.opportunity_min_margin {
                continue;
            }

            let festival = state.active_events.iter().any(|event| {
                event.kind == EventKind::Seasonal && event.effects.contains_key(&good.id)
            });
            let kind = if festival {
                OpportunityKind::Seasonal
            } else if target.available <= SHORTAGE_STOCK {
                OpportunityKind::Shortage
            } else if source.available >= SURPLUS_STOCK {
                OpportunityKind::Surplus
            } else {
                OpportunityKind::PriceGap
            };
            let title = match kind {
                OpportunityKind::PriceGap => format!("{} price gap", good.name),
                OpportunityKind::Shortage => format!("{} shortage in {}", good.name, town.name),
                OpportunityKind::Surplus => format!("{} surplus in {}", good.name, here.name),
                OpportunityKind::Seasonal => format!("Festival demand for {}", good.name),
            };
            found.push(TradeOpportunity {
                id: format!("opp-{}-{}-{}", state.turn, good.id, town.id),
                kind,
                title,
                description: format!(
                    "Buy {} in {} for {}g and sell in {} for {}g",
                    good.name, here.name, source.buy, town.name, target.sell
                ),
                source_town_id: here.id.clone(),
                target_town_id: town.id.clone(),
                good_id: good.id.clone(),
                good_name: good.name.clone(),
                source_town_name: here.name.clone(),
                target_town_name: town.name.clone(),
                source_price: source.buy,
                target_price: target.sell,
                potential_profit: profit,
                profit_margin: margin,
                urgency: Urgency::from_margin(margin),
                valid_until: state.turn + alerts.opportunity_window_turns,
            });
        }
    }

    found.sort_by(|a, b| b.profit_margin.total_cmp(&a.profit_margin));
    found.truncate(alerts.opportunity_cap);
    found
}
