use serde::{Deserialize, Serialize};

use crate::systems::economy::{GoodId, SeasonId, TownId};

/// Direction of a trade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeKind {
    Buy,
    Sell,
}

impl TradeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TradeKind::Buy => "buy",
            TradeKind::Sell => "sell",
        }
    }
}

/// Outcome of a buy or sell request. Failures leave the game untouched and
/// carry no deltas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionResult {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gold_change: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_change: Option<i64>,
}

impl TransactionResult {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            gold_change: None,
            cargo_change: None,
        }
    }

    pub fn completed(message: String, gold_change: i64, cargo_change: i64) -> Self {
        Self {
            success: true,
            message,
            gold_change: Some(gold_change),
            cargo_change: Some(cargo_change),
        }
    }
}

/// One executed trade in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub id: String,
    /// Logical timestamp; strictly increasing across the whole game.
    pub seq: u64,
    pub kind: TradeKind,
    pub good_id: GoodId,
    pub good_name: String,
    pub quantity: u32,
    pub price_per_unit: u32,
    pub total_value: i64,
    pub town_id: TownId,
    pub town_name: String,
    pub turn: u32,
    pub season: SeasonId,
}

/// Weighted-average purchase price of the units currently held.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBasis {
    pub price: f64,
    /// Town and time of the most recent purchase.
    pub town: TownId,
    pub turn: u32,
    pub season: SeasonId,
}
