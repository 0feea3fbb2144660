use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::GameConfig;
use crate::game_state::{create_new_game_state, GameState};
use crate::systems::analytics::find_trade_opportunities;
use crate::systems::economy::generate_market_prices;
use crate::systems::migrations::{migrate_to_latest, MigrateError};
use crate::world::ReferenceData;

pub mod legacy;

pub use legacy::SaveV1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaVersion {
    pub major: u32,
    pub minor: u32,
}

impl SchemaVersion {
    pub const fn v1_0() -> Self {
        Self { major: 1, minor: 0 }
    }

    pub const fn v2_0() -> Self {
        Self { major: 2, minor: 0 }
    }

    pub const fn current() -> Self {
        Self::v2_0()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaHeader {
    pub version: SchemaVersion,
}

/// On-disk envelope around a whole game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveFile {
    pub schema: SchemaHeader,
    pub state: GameState,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Migrate(#[from] MigrateError),
    #[error("save references unknown town `{0}`")]
    UnknownTown(String),
    #[error("save references unknown good `{0}`")]
    UnknownGood(String),
}

/// Pretty JSON envelope with a trailing newline.
pub fn encode(state: &GameState) -> Result<String, SaveError> {
    #[derive(Serialize)]
    struct Envelope<'a> {
        schema: SchemaHeader,
        state: &'a GameState,
    }

    let mut json = serde_json::to_string_pretty(&Envelope {
        schema: SchemaHeader {
            version: SchemaVersion::current(),
        },
        state,
    })?;
    if !json.ends_with('\n') {
        json.push('\n');
    }
    Ok(json)
}

/// Parses any supported save revision into a complete current state. Every
/// town and good the state points at must exist in `data`.
pub fn decode(raw: &str, data: &ReferenceData) -> Result<GameState, SaveError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let state = migrate_to_latest(value, data)?;
    if data.try_town(state.current_town_id.as_str()).is_none() {
        return Err(SaveError::UnknownTown(state.current_town_id.to_string()));
    }
    let held = state.inventory.keys().chain(state.pending_purchases.keys());
    let watched = state
        .market_alerts
        .price_alerts
        .iter()
        .map(|alert| &alert.good_id);
    if let Some(good) = held
        .chain(watched)
        .find(|good| data.try_good(good.as_str()).is_none())
    {
        return Err(SaveError::UnknownGood(good.to_string()));
    }
    Ok(state)
}

pub fn save_to_path(path: &Path, state: &GameState) -> Result<(), SaveError> {
    let json = encode(state)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, json)?;
    Ok(())
}

pub fn load_from_path(path: &Path, data: &ReferenceData) -> Result<GameState, SaveError> {
    let raw = fs::read_to_string(path)?;
    decode(&raw, data)
}

/// Where a game is kept between sessions.
pub trait SaveStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self, data: &ReferenceData) -> Result<Option<GameState>, SaveError>;
    fn save(&mut self, state: &GameState) -> Result<(), SaveError>;
    fn clear(&mut self) -> Result<(), SaveError>;
}

#[derive(Debug, Clone)]
pub struct FileSaveStore {
    path: PathBuf,
}

impl FileSaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for FileSaveStore {
    fn load(&self, data: &ReferenceData) -> Result<Option<GameState>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }
        load_from_path(&self.path, data).map(Some)
    }

    fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        save_to_path(&self.path, state)
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Keeps the encoded blob in memory; used by tests and embedders without a
/// filesystem.
#[derive(Debug, Clone, Default)]
pub struct MemorySaveStore {
    blob: Option<String>,
}

impl MemorySaveStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl SaveStore for MemorySaveStore {
    fn load(&self, data: &ReferenceData) -> Result<Option<GameState>, SaveError> {
        self.blob.as_deref().map(|raw| decode(raw, data)).transpose()
    }

    fn save(&mut self, state: &GameState) -> Result<(), SaveError> {
        self.blob = Some(encode(state)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SaveError> {
        self.blob = None;
        Ok(())
    }
}

/// Restores the saved game or starts a fresh one. An unreadable save is
/// logged and replaced by a new game. A restored game gets fresh quotes and
/// opportunities priced against them.
pub fn load_or_new<S, R>(
    store: &S,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
) -> GameState
where
    S: SaveStore + ?Sized,
    R: RngCore + ?Sized,
{
    match store.load(data) {
        Ok(Some(mut state)) => {
            generate_market_prices(&mut state, data, cfg, rng);
            state.market_alerts.opportunities = find_trade_opportunities(&state, data, cfg);
            info!(
                "restored game turn={} town={} gold={}",
                state.turn, state.current_town_id, state.gold
            );
            state
        }
        Ok(None) => create_new_game_state(data, cfg, rng),
        Err(err) => {
            warn!("save could not be restored, starting a new game: {err}");
            create_new_game_state(data, cfg, rng)
        }
    }
}

#[cfg(test)]
mod tests;
