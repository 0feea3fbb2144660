use std::fs;
use std::path::Path;

use blake3::Hasher;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Gameplay tuning loaded from `assets/config/game.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    pub economy: EconomyCfg,
    pub events: EventsCfg,
    pub trading: TradingCfg,
    pub logs: LogsCfg,
    pub alerts: AlertsCfg,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EconomyCfg {
    pub starting_gold: i64,
    pub target_gold: i64,
    pub max_turns: u32,
    pub cargo_limit: u32,
    pub buy_spread: f64,
    pub sell_spread: f64,
    pub random_min: f64,
    pub random_max: f64,
    /// Inclusive lower bound of the base stock draw.
    pub stock_min: u32,
    /// Exclusive upper bound of the base stock draw.
    pub stock_max: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsCfg {
    /// Probability that a travel turn draws a catalog event at all.
    pub event_chance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradingCfg {
    pub reputation_per_trade: i32,
    pub luxury_gate: LuxuryGate,
}

/// Which goods require reputation-gated access before they can be bought.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LuxuryGate {
    /// Every luxury-category good is closed until the town grants at least
    /// one exclusive good (excellent standing) or VIP status.
    #[default]
    AnyLuxury,
    /// Only goods on an exclusive-access list are gated, and each one opens
    /// when the current tier lists it.
    ExclusiveOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogsCfg {
    pub event_log_cap: usize,
    pub journal_cap: usize,
    pub reputation_events_cap: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlertsCfg {
    pub news_cap: usize,
    pub weather_news_chance: f64,
    pub volatility_news_chance: f64,
    pub opportunity_cap: usize,
    pub opportunity_window_turns: u32,
    pub opportunity_min_profit: i64,
    pub opportunity_min_margin: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            economy: EconomyCfg {
                starting_gold: 1000,
                target_gold: 5000,
                max_turns: 20,
                cargo_limit: 100,
                buy_spread: 1.1,
                sell_spread: 0.9,
                random_min: 0.85,
                random_max: 1.15,
                stock_min: 10,
                stock_max: 50,
            },
            events: EventsCfg { event_chance: 0.3 },
            trading: TradingCfg {
                reputation_per_trade: 1,
                luxury_gate: LuxuryGate::AnyLuxury,
            },
            logs: LogsCfg {
                event_log_cap: 12,
                journal_cap: 100,
                reputation_events_cap: 50,
            },
            alerts: AlertsCfg {
                news_cap: 10,
                weather_news_chance: 0.3,
                volatility_news_chance: 0.4,
                opportunity_cap: 5,
                opportunity_window_turns: 3,
                opportunity_min_profit: 10,
                opportunity_min_margin: 0.15,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read game config: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to parse game config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to hash game config: {0}")]
    Hash(#[from] serde_json::Error),
    #[error("invalid game config: {0}")]
    Invalid(String),
}

pub fn load_game_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let raw = fs::read_to_string(path)?;
    parse_game_config(&raw)
}

pub fn parse_game_config(raw: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = toml::from_str(raw)?;
    validate(&config)?;
    log_schema_hash(&config)?;
    Ok(config)
}

fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    let econ = &config.economy;
    if econ.stock_min >= econ.stock_max {
        return Err(ConfigError::Invalid(format!(
            "stock range [{}, {}) is empty",
            econ.stock_min, econ.stock_max
        )));
    }
    if econ.random_min > econ.random_max || econ.random_min <= 0.0 {
        return Err(ConfigError::Invalid(format!(
            "random band [{}, {}] is not a positive range",
            econ.random_min, econ.random_max
        )));
    }
    if econ.buy_spread < econ.sell_spread {
        return Err(ConfigError::Invalid(
            "buy spread must not be below sell spread".to_string(),
        ));
    }
    if econ.max_turns == 0 || econ.cargo_limit == 0 {
        return Err(ConfigError::Invalid(
            "max_turns and cargo_limit must be positive".to_string(),
        ));
    }
    if config.logs.event_log_cap == 0 {
        return Err(ConfigError::Invalid(
            "event_log_cap must be positive".to_string(),
        ));
    }
    Ok(())
}

fn log_schema_hash(config: &GameConfig) -> Result<(), ConfigError> {
    let bytes = serde_json::to_vec(config)?;
    let mut hasher = Hasher::new();
    hasher.update(&bytes);
    let hash = hasher.finalize();
    info!("game_config_hash={}", hash.to_hex());
    Ok(())
}
