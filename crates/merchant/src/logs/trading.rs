use std::env;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context;
use serde::Serialize;

use crate::game_state::GameStatus;
use crate::systems::trading::TradeRecord;
use crate::systems::turn::TurnReport;

/// Overrides the directory traces are appended to.
pub const LOG_DIR_ENV: &str = "MERCHANT_LOG_DIR";
const DEFAULT_DIR: &str = "logs/merchant";

static LOGS_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "trade_logs"));

pub fn set_enabled(enabled: bool) {
    LOGS_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn enabled() -> bool {
    LOGS_ENABLED.load(Ordering::Relaxed)
}

fn log_dir() -> PathBuf {
    env::var_os(LOG_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR))
}

fn append_jsonl<T: Serialize>(file: &str, value: &T) -> anyhow::Result<()> {
    let dir = log_dir();
    create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;
    let path = dir.join(file);
    let mut handle = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    handle.write_all(&line)?;
    Ok(())
}

pub fn log_trade(record: &TradeRecord, gold_after: i64) -> anyhow::Result<()> {
    if !enabled() {
        return Ok(());
    }

    #[derive(Serialize)]
    struct TradeLog<'a> {
        seq: u64,
        turn: u32,
        season: &'a str,
        town: &'a str,
        good: &'a str,
        kind: &'static str,
        quantity: u32,
        price_per_unit: u32,
        total_value: i64,
        gold_after: i64,
    }

    let value = TradeLog {
        seq: record.seq,
        turn: record.turn,
        season: record.season.as_str(),
        town: record.town_id.as_str(),
        good: record.good_id.as_str(),
        kind: record.kind.as_str(),
        quantity: record.quantity,
        price_per_unit: record.price_per_unit,
        total_value: record.total_value,
        gold_after,
    };

    append_jsonl("trades.jsonl", &value)
}

pub fn log_turn(report: &TurnReport, gold: i64) -> anyhow::Result<()> {
    if !enabled() {
        return Ok(());
    }

    #[derive(Serialize)]
    struct TurnLog<'a> {
        turn: u32,
        town: &'a str,
        season_changed: Option<&'a str>,
        expired_events: usize,
        events_drawn: Vec<&'a str>,
        alerts_fired: usize,
        status: GameStatus,
        gold: i64,
    }

    let value = TurnLog {
        turn: report.turn,
        town: report.town.as_str(),
        season_changed: report.season_changed.as_ref().map(|season| season.as_str()),
        expired_events: report.expired_events,
        events_drawn: report.events_drawn.iter().map(|id| id.as_str()).collect(),
        alerts_fired: report.alerts_fired.len(),
        status: report.status,
        gold,
    };

    append_jsonl("turns.jsonl", &value)
}
