use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::systems::economy::{EventId, GoodId, SeasonId, TownId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TownSpec {
    pub id: TownId,
    pub name: String,
    pub description: String,
    /// Flavor tags; may name things that are not tradeable goods.
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub price_modifiers: BTreeMap<GoodId, f64>,
}

impl TownSpec {
    pub fn price_modifier(&self, good: &GoodId) -> f64 {
        self.price_modifiers.get(good).copied().unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodCategory {
    Food,
    Preservative,
    Luxury,
    RawMaterial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GoodSpec {
    pub id: GoodId,
    pub name: String,
    pub base_price: u32,
    pub category: GoodCategory,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeasonSpec {
    pub id: SeasonId,
    pub name: String,
    pub description: String,
    pub festival_chance: f64,
    /// Turns spent in this season before rolling to the next.
    pub duration: u32,
    #[serde(default)]
    pub goods_availability: BTreeMap<GoodId, f64>,
    #[serde(default)]
    pub price_modifiers: BTreeMap<GoodId, f64>,
}

impl SeasonSpec {
    pub fn price_modifier(&self, good: &GoodId) -> f64 {
        self.price_modifiers.get(good).copied().unwrap_or(1.0)
    }

    pub fn availability_modifier(&self, good: &GoodId) -> f64 {
        self.goods_availability.get(good).copied().unwrap_or(1.0)
    }
}

/// Scope of an event's price effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Global,
    Local,
    Seasonal,
}

/// Entry in the random event catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventSpec {
    pub id: EventId,
    pub kind: EventKind,
    pub title: String,
    pub description: String,
    pub effects: BTreeMap<GoodId, f64>,
    pub duration: u32,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FestivalSpec {
    pub id: EventId,
    pub season: SeasonId,
    pub title: String,
    pub description: String,
    pub effects: BTreeMap<GoodId, f64>,
    pub duration: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TownsFile {
    pub towns: Vec<TownSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GoodsFile {
    pub goods: Vec<GoodSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SeasonsFile {
    pub seasons: Vec<SeasonSpec>,
    #[serde(default)]
    pub festivals: Vec<FestivalSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EventsFile {
    pub events: Vec<EventSpec>,
}
