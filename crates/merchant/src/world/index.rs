use std::collections::HashMap;

use blake3::Hasher;
use smallvec::SmallVec;

use crate::systems::economy::{GoodId, SeasonId, TownId};

use super::schema::{EventSpec, FestivalSpec, GoodSpec, SeasonSpec, TownSpec};

/// Immutable lookup tables for towns, goods, seasons, festivals and the
/// random event catalog.
///
/// Lookups by id assume the id came from this same data set; an unknown id is
/// a contract violation and panics. Use the `try_` variants for ids that come
/// from user input.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    towns: Vec<TownSpec>,
    goods: Vec<GoodSpec>,
    seasons: Vec<SeasonSpec>,
    festivals: Vec<FestivalSpec>,
    events: Vec<EventSpec>,
    town_index: HashMap<TownId, usize>,
    good_index: HashMap<GoodId, usize>,
    season_index: HashMap<SeasonId, usize>,
}

impl ReferenceData {
    pub(crate) fn from_tables(
        towns: Vec<TownSpec>,
        goods: Vec<GoodSpec>,
        seasons: Vec<SeasonSpec>,
        festivals: Vec<FestivalSpec>,
        events: Vec<EventSpec>,
    ) -> Self {
        let town_index = towns
            .iter()
            .enumerate()
            .map(|(idx, town)| (town.id.clone(), idx))
            .collect();
        let good_index = goods
            .iter()
            .enumerate()
            .map(|(idx, good)| (good.id.clone(), idx))
            .collect();
        let season_index = seasons
            .iter()
            .enumerate()
            .map(|(idx, season)| (season.id.clone(), idx))
            .collect();
        Self {
            towns,
            goods,
            seasons,
            festivals,
            events,
            town_index,
            good_index,
            season_index,
        }
    }

    pub fn towns(&self) -> &[TownSpec] {
        &self.towns
    }

    pub fn goods(&self) -> &[GoodSpec] {
        &self.goods
    }

    pub fn seasons(&self) -> &[SeasonSpec] {
        &self.seasons
    }

    pub fn festivals(&self) -> &[FestivalSpec] {
        &self.festivals
    }

    pub fn events(&self) -> &[EventSpec] {
        &self.events
    }

    /// The town a new game starts in.
    pub fn starting_town(&self) -> &TownSpec {
        &self.towns[0]
    }

    pub fn first_season(&self) -> &SeasonSpec {
        &self.seasons[0]
    }

    pub fn try_town(&self, id: &str) -> Option<&TownSpec> {
        self.town_index.get(id).map(|idx| &self.towns[*idx])
    }

    pub fn town(&self, id: &str) -> &TownSpec {
        self.try_town(id)
            .unwrap_or_else(|| panic!("unknown town id `{id}`"))
    }

    pub fn try_good(&self, id: &str) -> Option<&GoodSpec> {
        self.good_index.get(id).map(|idx| &self.goods[*idx])
    }

    pub fn good(&self, id: &str) -> &GoodSpec {
        self.try_good(id)
            .unwrap_or_else(|| panic!("unknown good id `{id}`"))
    }

    pub fn try_season(&self, id: &str) -> Option<&SeasonSpec> {
        self.season_index.get(id).map(|idx| &self.seasons[*idx])
    }

    pub fn season(&self, id: &str) -> &SeasonSpec {
        self.try_season(id)
            .unwrap_or_else(|| panic!("unknown season id `{id}`"))
    }

    /// Season following `id` in the fixed cyclic order.
    pub fn next_season(&self, id: &str) -> &SeasonSpec {
        let idx = self
            .season_index
            .get(id)
            .copied()
            .unwrap_or_else(|| panic!("unknown season id `{id}`"));
        &self.seasons[(idx + 1) % self.seasons.len()]
    }

    pub fn festivals_for(&self, season: &str) -> SmallVec<[&FestivalSpec; 4]> {
        self.festivals
            .iter()
            .filter(|festival| festival.season.as_str() == season)
            .collect()
    }

    /// Stable digest of every table, logged when data is loaded so runs can be
    /// matched to the data they used.
    pub fn content_hash(&self) -> String {
        let mut hasher = Hasher::new();
        for bytes in [
            serde_json::to_vec(&self.towns),
            serde_json::to_vec(&self.goods),
            serde_json::to_vec(&self.seasons),
            serde_json::to_vec(&self.festivals),
            serde_json::to_vec(&self.events),
        ]
        .into_iter()
        .flatten()
        {
            hasher.update(&bytes);
        }
        hasher.finalize().to_hex().to_string()
    }
}
