use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use log::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use merchant::config::load_game_config;
use merchant::systems::save::FileSaveStore;
use merchant::systems::trading::cost_basis;
use merchant::systems::trading::inventory::free_space;
use merchant::{DetRng, GameConfig, GameStatus, GoodId, Merchant, ReferenceData, TownId, TurnReport};

mod cli;

use cli::CliOptions;

fn main() {
    if let Err(err) = try_main() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let opts = CliOptions::parse();
    init_logging(opts.debug_logs)?;
    merchant::logs::trading::set_enabled(opts.debug_logs);

    let data = match &opts.data {
        Some(dir) => ReferenceData::load_from_dir(dir)?,
        None => ReferenceData::builtin(),
    };
    let cfg = match &opts.config {
        Some(path) => load_game_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let rng = DetRng::from_seed(opts.seed, merchant::systems::economy::RNG_TAG_SESSION);

    let mut store = opts.save.as_ref().map(FileSaveStore::new);
    let mut game = match &store {
        Some(store) => Merchant::restore(data, cfg, rng, store),
        None => Merchant::new(data, cfg, rng),
    };

    run_sim(&mut game, &opts.out)?;

    if let Some(store) = store.as_mut() {
        game.save(store)
            .with_context(|| format!("writing save {}", store.path().display()))?;
    }

    let summary = game.summary();
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.headline);
        println!(
            "score {} ({}, {} stars)",
            summary.score, summary.rating.title, summary.rating.stars
        );
        println!(
            "gold {} profit {} unrealized {}",
            summary.final_gold, summary.profit, summary.unrealized_profit
        );
        println!("turns {}/{}", summary.turns_used, summary.max_turns);
    }
    Ok(())
}

/// `RUST_LOG` wins over `--debug-logs`. The library logs through `log`; the
/// subscriber picks those records up via its `tracing-log` bridge.
fn init_logging(debug_logs: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug_logs { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .context("installing logger")
}

fn run_sim(game: &mut Merchant, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let mut writer = BufWriter::new(file);
    writeln!(
        writer,
        "turn,town,season,gold,cargo,events_drawn,alerts_fired,status"
    )?;

    while game.state().game_status == GameStatus::Playing {
        let destination = trade_here(game);
        let Some(report) = game.travel(&destination) else {
            break;
        };
        write_row(&mut writer, game, &report)?;
    }

    writer.flush()?;
    info!(
        "sim finished turn={} gold={}",
        game.state().turn,
        game.state().gold
    );
    Ok(())
}

fn write_row(writer: &mut impl Write, game: &Merchant, report: &TurnReport) -> anyhow::Result<()> {
    let state = game.state();
    let events: Vec<&str> = report.events_drawn.iter().map(|id| id.as_str()).collect();
    let status = match report.status {
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
        GameStatus::Ended => "ended",
    };
    writeln!(
        writer,
        "{},{},{},{},{},{},{},{}",
        report.turn,
        report.town,
        state.current_season,
        state.gold,
        state.current_cargo,
        events.join(";"),
        report.alerts_fired.len(),
        status
    )?;
    Ok(())
}

/// Sells whatever clears its cost basis, then loads up on the widest spread
/// and returns where to take it.
fn trade_here(game: &mut Merchant) -> TownId {
    let final_leg = game.state().turn >= game.state().max_turns;

    let held: Vec<(GoodId, u32)> = game
        .state()
        .inventory
        .iter()
        .filter(|(_, qty)| **qty > 0)
        .map(|(good, qty)| (good.clone(), *qty))
        .collect();
    for (good, qty) in held {
        let paid = cost_basis(game.state(), &good).map_or(0.0, |basis| basis.price);
        if final_leg || f64::from(game.sell_quote(&good)) >= paid {
            game.sell(&good, qty);
        }
    }

    let fallback = next_town(game);
    if final_leg {
        return fallback;
    }

    for (good, destination) in ranked_routes(game) {
        let price = game.buy_quote(&good);
        if price == 0 {
            continue;
        }
        let state = game.state();
        let affordable = u32::try_from(state.gold / i64::from(price)).unwrap_or(u32::MAX);
        let qty = affordable
            .min(free_space(state))
            .min(state.current_price(&good).available);
        if qty > 0 && game.buy(&good, qty).success {
            return destination;
        }
    }
    fallback
}

/// Goods buyable here paired with the town paying the most for them, widest
/// positive spread first.
fn ranked_routes(game: &Merchant) -> Vec<(GoodId, TownId)> {
    let state = game.state();
    let here = &state.current_town_id;
    let mut routes: Vec<(i64, GoodId, TownId)> = game
        .data()
        .goods()
        .iter()
        .filter_map(|good| {
            let cost = i64::from(game.buy_quote(&good.id));
            game.data()
                .towns()
                .iter()
                .filter(|town| &town.id != here)
                .map(|town| {
                    let sell = i64::from(state.price(&town.id, &good.id).sell);
                    (sell - cost, good.id.clone(), town.id.clone())
                })
                .max_by_key(|(margin, _, _)| *margin)
        })
        .filter(|(margin, _, _)| *margin > 0)
        .collect();
    routes.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    routes
        .into_iter()
        .map(|(_, good, town)| (good, town))
        .collect()
}

fn next_town(game: &Merchant) -> TownId {
    let towns = game.data().towns();
    let here = &game.state().current_town_id;
    let idx = towns
        .iter()
        .position(|town| &town.id == here)
        .map_or(0, |idx| (idx + 1) % towns.len());
    towns[idx].id.clone()
}
