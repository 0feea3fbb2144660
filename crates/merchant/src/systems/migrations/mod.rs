use log::debug;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::game_state::GameState;
use crate::systems::save::{SaveFile, SchemaVersion};
use crate::world::ReferenceData;

pub mod v1;

#[derive(Debug, Error)]
pub enum MigrateError {
    #[error("invalid save payload: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported save schema version {major}.{minor}")]
    UnsupportedVersion { major: u32, minor: u32 },
}

#[derive(Deserialize)]
struct SchemaProbe {
    version: SchemaVersion,
}

/// Brings any known save revision up to the current `GameState`, filling
/// blocks the payload predates.
pub fn migrate_to_latest(value: Value, data: &ReferenceData) -> Result<GameState, MigrateError> {
    let version = match value.get("schema").cloned() {
        Some(schema_value) => serde_json::from_value::<SchemaProbe>(schema_value)?.version,
        None => SchemaVersion::v1_0(),
    };
    debug!("migrating save schema {}.{}", version.major, version.minor);
    match (version.major, version.minor) {
        (2, 0) => {
            let file: SaveFile = serde_json::from_value(value)?;
            let mut state = file.state;
            state.fill_missing_blocks(data);
            Ok(state)
        }
        (1, _) => {
            let payload = match value {
                Value::Object(mut map) if map.contains_key("state") => {
                    map.remove("state").unwrap_or(Value::Null)
                }
                other => other,
            };
            Ok(v1::from_value(payload)?.upgrade(data))
        }
        (major, minor) => Err(MigrateError::UnsupportedVersion { major, minor }),
    }
}
