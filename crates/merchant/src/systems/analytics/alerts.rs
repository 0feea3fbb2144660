use log::info;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::systems::economy::GoodId;
use crate::world::ReferenceData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertDirection {
    /// Fires when the sell quote reaches the target.
    Above,
    /// Fires when the buy quote drops to the target.
    Below,
}

/// A player-defined price watch. Fires once, then stays inactive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: String,
    pub good_id: GoodId,
    pub good_name: String,
    pub target_price: u32,
    pub direction: AlertDirection,
    pub is_active: bool,
    pub created_turn: u32,
}

/// Registers a watch and returns its id.
pub fn create_price_alert(
    state: &mut GameState,
    data: &ReferenceData,
    good: &GoodId,
    target_price: u32,
    direction: AlertDirection,
) -> String {
    let spec = data.good(good.as_str());
    let (id, _) = state.mint_id("alert", good.as_str());
    state.market_alerts.price_alerts.push(PriceAlert {
        id: id.clone(),
        good_id: good.clone(),
        good_name: spec.name.clone(),
        target_price,
        direction,
        is_active: true,
        created_turn: state.turn,
    });
    id
}

/// Removes a watch; `false` when no alert has that id.
pub fn remove_price_alert(state: &mut GameState, alert_id: &str) -> bool {
    let alerts = &mut state.market_alerts.price_alerts;
    let before = alerts.len();
    alerts.retain(|alert| alert.id != alert_id);
    alerts.len() != before
}

/// Fires every active watch whose threshold the current town's quotes have
/// crossed. Returns the ids that fired.
pub fn check_price_alerts(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
) -> Vec<String> {
    let town = state.current_town_id.clone();
    let town_name = data.town(town.as_str()).name.clone();
    let mut lines = Vec::new();
    let mut fired = Vec::new();

    for alert in state
        .market_alerts
        .price_alerts
        .iter_mut()
        .filter(|alert| alert.is_active)
    {
        let Some(quote) = state
            .market_prices
            .get(&town)
            .and_then(|quotes| quotes.get(&alert.good_id))
        else {
            continue;
        };
        let (price, hit, side) = match alert.direction {
            AlertDirection::Above => (quote.sell, quote.sell >= alert.target_price, "sell price rose to"),
            AlertDirection::Below => (quote.buy, quote.buy <= alert.target_price, "buy price fell to"),
        };
        if !hit {
            continue;
        }
        alert.is_active = false;
        info!(
            "price alert fired id={} good={} price={} target={}",
            alert.id, alert.good_id, price, alert.target_price
        );
        lines.push(format!(
            "[Alert] {} {side} {price} in {town_name} (target {})",
            alert.good_name, alert.target_price
        ));
        fired.push(alert.id.clone());
    }

    for line in lines {
        state.push_log(line, cfg.logs.event_log_cap);
    }
    fired
}
