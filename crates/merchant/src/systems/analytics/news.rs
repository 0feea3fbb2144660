use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game_state::{ActiveEvent, GameState};
use crate::systems::economy::rng::{chance, choose};
use crate::systems::economy::{EventId, GoodId, TownId};
use crate::world::ReferenceData;

use super::opportunities::{TradeOpportunity, Urgency};

/// Turns a flavor item stays on the board.
const FLAVOR_LIFETIME: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NewsKind {
    Event,
    PriceChange,
    Opportunity,
    Weather,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Grades an event by its strongest price swing.
    pub fn from_swing(swing: f64) -> Self {
        if swing > 0.5 {
            Severity::High
        } else if swing > 0.25 {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub kind: NewsKind,
    pub title: String,
    pub content: String,
    pub impact: String,
    pub severity: Severity,
    pub turn: u32,
    /// Last turn the item is shown.
    pub expires_at: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town_id: Option<TownId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub good_ids: Vec<GoodId>,
    /// Event this item reports on, so it is not repeated while still shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event: Option<EventId>,
}

impl NewsItem {
    pub fn is_live(&self, turn: u32) -> bool {
        self.expires_at >= turn
    }
}

struct WeatherReport {
    title: &'static str,
    content: &'static str,
    impact: &'static str,
    severity: Severity,
}

const WEATHER_REPORTS: &[WeatherReport] = &[
    WeatherReport {
        title: "Clear Skies Ahead",
        content: "Fair weather along the trade roads speeds caravans between towns.",
        impact: "Travel conditions favorable",
        severity: Severity::Low,
    },
    WeatherReport {
        title: "Heavy Rains",
        content: "Downpours have turned the mountain passes to mud.",
        impact: "Caravans to Emberfall may be delayed",
        severity: Severity::Medium,
    },
    WeatherReport {
        title: "Storm Warning",
        content: "Sailors report a strong storm building off the northern coast.",
        impact: "Fishing fleets may stay in port",
        severity: Severity::High,
    },
    WeatherReport {
        title: "Early Frost",
        content: "An unexpected frost has settled over the farmlands.",
        impact: "Grain harvests at risk",
        severity: Severity::Medium,
    },
    WeatherReport {
        title: "Fog on the Moors",
        content: "Thick fog hangs over the roads near Greymoor.",
        impact: "Bandits may take advantage",
        severity: Severity::Low,
    },
];

/// Items for this turn, newest first: opportunity, event reports, volatility,
/// weather. Event reports are skipped for events that already have a live item
/// in `existing`.
pub(crate) fn generate_news<R: RngCore + ?Sized>(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
    existing: &[NewsItem],
    top_opportunity: Option<&TradeOpportunity>,
) -> Vec<NewsItem> {
    let turn = state.turn;
    let mut fresh = Vec::new();

    if chance(rng, cfg.alerts.weather_news_chance) {
        if let Some(report) = choose(rng, WEATHER_REPORTS) {
            let (id, _) = state.mint_id("news", report.title);
            fresh.push(NewsItem {
                id,
                kind: NewsKind::Weather,
                title: report.title.to_string(),
                content: report.content.to_string(),
                impact: report.impact.to_string(),
                severity: report.severity,
                turn,
                expires_at: turn + FLAVOR_LIFETIME,
                town_id: None,
                good_ids: Vec::new(),
                source_event: None,
            });
        }
    }

    if chance(rng, cfg.alerts.volatility_news_chance) {
        let good = choose(rng, data.goods());
        let town = choose(rng, data.towns());
        if let (Some(good), Some(town)) = (good, town) {
            let (id, _) = state.mint_id("news", good.id.as_str());
            fresh.push(NewsItem {
                id,
                kind: NewsKind::PriceChange,
                title: format!("{} Prices Volatile", good.name),
                content: format!(
                    "Merchants in {} report sharp swings in the {} market.",
                    town.name,
                    good.name.to_lowercase()
                ),
                impact: "Prices may move sharply next turn".to_string(),
                severity: Severity::Medium,
                turn,
                expires_at: turn + FLAVOR_LIFETIME,
                town_id: Some(town.id.clone()),
                good_ids: vec![good.id.clone()],
                source_event: None,
            });
        }
    }

    let events: Vec<ActiveEvent> = state
        .active_events
        .iter()
        .filter(|event| {
            !existing
                .iter()
                .any(|item| item.is_live(turn) && item.source_event.as_ref() == Some(&event.id))
        })
        .cloned()
        .collect();
    for event in events {
        let (id, _) = state.mint_id("news", event.id.as_str());
        fresh.push(event_report(id, &event, data, turn));
    }

    if let Some(opp) = top_opportunity.filter(|opp| opp.urgency == Urgency::High) {
        let (id, _) = state.mint_id("news", opp.id.as_str());
        fresh.push(NewsItem {
            id,
            kind: NewsKind::Opportunity,
            title: opp.title.clone(),
            content: opp.description.clone(),
            impact: format!("{:.0}% margin", opp.profit_margin * 100.0),
            severity: Severity::High,
            turn,
            expires_at: opp.valid_until,
            town_id: Some(opp.target_town_id.clone()),
            good_ids: vec![opp.good_id.clone()],
            source_event: None,
        });
    }

    fresh.reverse();
    fresh
}

fn event_report(id: String, event: &ActiveEvent, data: &ReferenceData, turn: u32) -> NewsItem {
    let swing = event
        .effects
        .values()
        .map(|effect| (effect - 1.0).abs())
        .fold(0.0_f64, f64::max);
    let name = |good: &GoodId| {
        data.try_good(good.as_str())
            .map(|spec| spec.name.clone())
            .unwrap_or_else(|| good.to_string())
    };
    let rising: Vec<String> = event
        .effects
        .iter()
        .filter(|(_, effect)| **effect > 1.0)
        .map(|(good, _)| name(good))
        .collect();
    let falling: Vec<String> = event
        .effects
        .iter()
        .filter(|(_, effect)| **effect < 1.0)
        .map(|(good, _)| name(good))
        .collect();
    let impact = match (rising.is_empty(), falling.is_empty()) {
        (false, false) => format!(
            "Prices up: {}; down: {}",
            rising.join(", "),
            falling.join(", ")
        ),
        (false, true) => format!("Prices up: {}", rising.join(", ")),
        (true, false) => format!("Prices down: {}", falling.join(", ")),
        (true, true) => "No price effect".to_string(),
    };
    NewsItem {
        id,
        kind: NewsKind::Event,
        title: event.title.clone(),
        content: event.description.clone(),
        impact,
        severity: Severity::from_swing(swing),
        turn,
        expires_at: turn + event.duration,
        town_id: event.town_id.clone(),
        good_ids: event.effects.keys().cloned().collect(),
        source_event: Some(event.id.clone()),
    }
}
