use std::path::PathBuf;

use clap::{ArgAction, Parser};

const DEFAULT_SEED: u64 = 0x4D45_5243_0000_0001;

fn parse_seed(value: &str) -> Result<u64, String> {
    let trimmed = value.trim();
    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(&hex.replace('_', ""), 16).map_err(|err| err.to_string())
    } else {
        trimmed
            .replace('_', "")
            .parse::<u64>()
            .map_err(|err| err.to_string())
    }
}

/// Plays one headless game with a greedy trader and reports how it went.
#[derive(Debug, Parser, Clone)]
#[command(name = "merchant-sim", version, disable_help_subcommand = true)]
pub struct CliOptions {
    /// World seed, decimal or 0x-prefixed hex.
    #[arg(long, value_parser = parse_seed, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
    /// Per-turn CSV trace.
    #[arg(long, default_value = "target/merchant_turns.csv")]
    pub out: PathBuf,
    /// Resume from and write back to this save file.
    #[arg(long)]
    pub save: Option<PathBuf>,
    /// Tuning file; the built-in defaults are used when absent.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Directory holding towns/goods/seasons/events tables.
    #[arg(long)]
    pub data: Option<PathBuf>,
    /// Append JSONL trade and turn traces.
    #[arg(long = "debug-logs", action = ArgAction::SetTrue)]
    pub debug_logs: bool,
    /// Print the summary as JSON instead of text.
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,
}

impl CliOptions {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
