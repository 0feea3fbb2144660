use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;
use thiserror::Error;

use super::index::ReferenceData;
use super::schema::{EventKind, EventsFile, GoodsFile, SeasonsFile, TownsFile};

const BUILTIN_TOWNS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/data/towns.toml"
));
const BUILTIN_GOODS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/data/goods.toml"
));
const BUILTIN_SEASONS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/data/seasons.toml"
));
const BUILTIN_EVENTS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../assets/data/events.toml"
));

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to parse {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} table is empty")]
    Empty(&'static str),
    #[error("duplicate {table} id `{id}`")]
    DuplicateId { table: &'static str, id: String },
    #[error("{owner} references unknown good `{good}`")]
    UnknownGood { owner: String, good: String },
    #[error("festival `{festival}` references unknown season `{season}`")]
    UnknownSeason { festival: String, season: String },
    #[error("catalog event `{0}` cannot be seasonal; festivals live in seasons.toml")]
    SeasonalInCatalog(String),
    #[error("{owner} has a non-positive duration")]
    ZeroDuration { owner: String },
}

/// Raw TOML sources for the four reference tables.
#[derive(Debug, Clone, Copy)]
pub struct DataSources<'a> {
    pub towns: &'a str,
    pub goods: &'a str,
    pub seasons: &'a str,
    pub events: &'a str,
}

impl ReferenceData {
    /// Tables shipped in `assets/data`, embedded at build time.
    pub fn builtin() -> Self {
        let sources = DataSources {
            towns: BUILTIN_TOWNS,
            goods: BUILTIN_GOODS,
            seasons: BUILTIN_SEASONS,
            events: BUILTIN_EVENTS,
        };
        Self::parse(sources).expect("embedded reference data is valid")
    }

    pub fn load_from_dir(dir: &Path) -> anyhow::Result<Self> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))
        };
        let towns = read("towns.toml")?;
        let goods = read("goods.toml")?;
        let seasons = read("seasons.toml")?;
        let events = read("events.toml")?;
        let data = Self::parse(DataSources {
            towns: &towns,
            goods: &goods,
            seasons: &seasons,
            events: &events,
        })
        .with_context(|| format!("validating reference data in {}", dir.display()))?;
        info!(
            "reference_data_hash={} dir={}",
            data.content_hash(),
            dir.display()
        );
        Ok(data)
    }

    pub fn parse(sources: DataSources<'_>) -> Result<Self, DataError> {
        let towns: TownsFile = parse_table("towns.toml", sources.towns)?;
        let goods: GoodsFile = parse_table("goods.toml", sources.goods)?;
        let seasons: SeasonsFile = parse_table("seasons.toml", sources.seasons)?;
        let events: EventsFile = parse_table("events.toml", sources.events)?;

        let data = ReferenceData::from_tables(
            towns.towns,
            goods.goods,
            seasons.seasons,
            seasons.festivals,
            events.events,
        );
        validate(&data)?;
        Ok(data)
    }
}

fn parse_table<T: serde::de::DeserializeOwned>(
    file: &'static str,
    raw: &str,
) -> Result<T, DataError> {
    toml::from_str(raw).map_err(|source| DataError::Parse { file, source })
}

fn validate(data: &ReferenceData) -> Result<(), DataError> {
    if data.towns().is_empty() {
        return Err(DataError::Empty("towns"));
    }
    if data.goods().is_empty() {
        return Err(DataError::Empty("goods"));
    }
    if data.seasons().is_empty() {
        return Err(DataError::Empty("seasons"));
    }

    unique_ids("town", data.towns().iter().map(|t| t.id.as_str()))?;
    unique_ids("good", data.goods().iter().map(|g| g.id.as_str()))?;
    unique_ids("season", data.seasons().iter().map(|s| s.id.as_str()))?;
    unique_ids(
        "event",
        data.events()
            .iter()
            .map(|e| e.id.as_str())
            .chain(data.festivals().iter().map(|f| f.id.as_str())),
    )?;

    let known_good = |owner: String, good: &str| {
        if data.try_good(good).is_some() {
            Ok(())
        } else {
            Err(DataError::UnknownGood {
                owner,
                good: good.to_string(),
            })
        }
    };

    for town in data.towns() {
        for good in town.price_modifiers.keys() {
            known_good(format!("town `{}`", town.id), good.as_str())?;
        }
    }
    for season in data.seasons() {
        if season.duration == 0 {
            return Err(DataError::ZeroDuration {
                owner: format!("season `{}`", season.id),
            });
        }
        for good in season
            .price_modifiers
            .keys()
            .chain(season.goods_availability.keys())
        {
            known_good(format!("season `{}`", season.id), good.as_str())?;
        }
    }
    for festival in data.festivals() {
        if data.try_season(festival.season.as_str()).is_none() {
            return Err(DataError::UnknownSeason {
                festival: festival.id.to_string(),
                season: festival.season.to_string(),
            });
        }
        if festival.duration == 0 {
            return Err(DataError::ZeroDuration {
                owner: format!("festival `{}`", festival.id),
            });
        }
        for good in festival.effects.keys() {
            known_good(format!("festival `{}`", festival.id), good.as_str())?;
        }
    }
    for event in data.events() {
        if event.kind == EventKind::Seasonal {
            return Err(DataError::SeasonalInCatalog(event.id.to_string()));
        }
        if event.duration == 0 {
            return Err(DataError::ZeroDuration {
                owner: format!("event `{}`", event.id),
            });
        }
        for good in event.effects.keys() {
            known_good(format!("event `{}`", event.id), good.as_str())?;
        }
    }
    Ok(())
}

fn unique_ids<'a>(
    table: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DataError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::DuplicateId {
                table,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
