use crate::game_state::GameStatus;
use crate::systems::analytics::{create_price_alert, find_trade_opportunities, AlertDirection};
use crate::systems::economy::{DetRng, GoodId};
use crate::systems::migrations::{migrate_to_latest, MigrateError};
use crate::systems::save::{
    decode, encode, load_or_new, FileSaveStore, MemorySaveStore, SaveError, SaveStore,
    SchemaVersion,
};
use crate::systems::trading::buy_good;
use crate::systems::turn::calculate_score;
use crate::test_support::{fresh_game, set_quote};

#[test]
fn file_store_round_trips_a_played_game() {
    let (data, cfg, mut state) = fresh_game(11);
    let grain = GoodId::from("grain");
    assert!(buy_good(&mut state, &data, &cfg, &grain, 3).success);

    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = FileSaveStore::new(dir.path().join("nested/slot/game.json"));
    store.save(&state).expect("save");

    let raw = std::fs::read_to_string(store.path()).expect("read back");
    assert!(raw.ends_with('\n'));
    let value: serde_json::Value = serde_json::from_str(&raw).expect("json");
    assert_eq!(value["schema"]["version"]["major"], 2);

    let restored = store.load(&data).expect("load").expect("present");
    assert_eq!(restored, state);
}

#[test]
fn empty_stores_load_nothing() {
    let (data, _, _) = fresh_game(12);
    let dir = tempfile::tempdir().expect("temp dir");
    let store = FileSaveStore::new(dir.path().join("missing.json"));
    assert!(store.load(&data).expect("load").is_none());
    assert!(MemorySaveStore::new().load(&data).expect("load").is_none());
}

#[test]
fn clear_forgets_the_save() {
    let (data, _, state) = fresh_game(13);
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = FileSaveStore::new(dir.path().join("game.json"));
    store.save(&state).expect("save");
    store.clear().expect("clear");
    assert!(!store.path().exists());
    store.clear().expect("clearing twice is fine");

    let mut memory = MemorySaveStore::new();
    memory.save(&state).expect("save");
    assert!(memory.load(&data).expect("load").is_some());
    memory.clear().expect("clear");
    assert!(memory.load(&data).expect("load").is_none());
}

#[test]
fn corrupt_save_falls_back_to_new_game() {
    let (data, cfg, _) = fresh_game(14);
    let store = MemorySaveStore::with_blob("{ not json");
    assert!(matches!(store.load(&data), Err(SaveError::Serde(_))));

    let mut rng = DetRng::from_seed(14, 0);
    let state = load_or_new(&store, &data, &cfg, &mut rng);
    assert_eq!(state.turn, 1);
    assert_eq!(state.gold, cfg.economy.starting_gold);
}

#[test]
fn restored_games_get_fresh_quotes() {
    let (data, cfg, mut state) = fresh_game(15);
    state.turn = 7;
    state.market_prices.clear();
    let mut store = MemorySaveStore::new();
    store.save(&state).expect("save");

    let mut rng = DetRng::from_seed(15, 0);
    let restored = load_or_new(&store, &data, &cfg, &mut rng);
    assert_eq!(restored.turn, 7);
    assert_eq!(restored.market_prices.len(), data.towns().len());
    for quotes in restored.market_prices.values() {
        assert_eq!(quotes.len(), data.goods().len());
    }
}

#[test]
fn missing_blocks_are_defaulted() {
    let (data, _, state) = fresh_game(16);
    let mut value: serde_json::Value =
        serde_json::from_str(&encode(&state).expect("encode")).expect("json");
    let body = value["state"].as_object_mut().expect("state object");
    body.remove("reputation");
    body.remove("trading_journal");
    body.remove("market_alerts");
    body.remove("current_season");
    body.remove("season_turn");

    let restored = migrate_to_latest(value, &data).expect("migrates");
    assert_eq!(
        restored.reputation.town_reputations.len(),
        data.towns().len()
    );
    assert_eq!(restored.current_season.as_str(), "spring");
    assert_eq!(restored.season_turn, 1);
    assert!(restored.trading_journal.is_empty());
}

#[test]
fn first_release_saves_upgrade() {
    let (data, _, _) = fresh_game(17);
    let legacy = serde_json::json!({
        "currentTownId": "emberfall",
        "gold": 1450,
        "inventory": { "grain": 4, "iron": 2 },
        "turn": 6,
        "maxTurns": 20,
        "cargoLimit": 100,
        "currentCargo": 6,
        "targetGold": 5000,
        "gameStatus": "playing",
        "activeEvents": [{
            "id": "mine_collapse",
            "type": "local",
            "title": "Mine Collapse",
            "description": "A mine collapsed.",
            "effects": { "iron": 1.8 },
            "duration": 2,
            "weight": 10
        }],
        "eventLog": ["Traveled to Emberfall (Turn 6)"],
        "marketPrices": {}
    });

    let state = migrate_to_latest(legacy, &data).expect("legacy payload migrates");
    assert_eq!(state.current_town_id.as_str(), "emberfall");
    assert_eq!(state.gold, 1450);
    assert_eq!(state.current_cargo, 6);
    assert_eq!(state.quantity(&GoodId::from("gems")), 0);
    assert_eq!(state.current_season.as_str(), "spring");
    assert_eq!(state.reputation.town_reputations.len(), data.towns().len());
    assert_eq!(state.active_events.len(), 1);
    assert!(state.active_events[0].town_id.is_none());
    assert_eq!(state.game_status, GameStatus::Playing);
}

#[test]
fn explicit_v1_envelopes_upgrade() {
    let (data, _, _) = fresh_game(18);
    let value = serde_json::json!({
        "schema": { "version": { "major": 1, "minor": 2 } },
        "state": {
            "currentTownId": "northport",
            "gold": 900,
            "inventory": {},
            "turn": 3,
            "maxTurns": 20,
            "cargoLimit": 100,
            "targetGold": 5000,
            "gameStatus": "playing",
            "currentSeason": "summer",
            "seasonTurn": 2
        }
    });
    let state = migrate_to_latest(value, &data).expect("migrates");
    assert_eq!(state.current_season.as_str(), "summer");
    assert_eq!(state.season_turn, 2);
}

#[test]
fn rejects_unknown_schema_versions() {
    let (data, _, state) = fresh_game(19);
    let mut value: serde_json::Value =
        serde_json::from_str(&encode(&state).expect("encode")).expect("json");
    value["schema"]["version"]["major"] = serde_json::json!(3);

    let err = migrate_to_latest(value, &data).expect_err("unsupported version fails");
    match err {
        MigrateError::UnsupportedVersion { major, minor } => {
            assert_eq!((major, minor), (3, 0));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_town_is_a_persistence_failure() {
    let (data, _, mut state) = fresh_game(20);
    state.current_town_id = "atlantis".into();
    let raw = encode(&state).expect("encode");
    assert!(matches!(decode(&raw, &data), Err(SaveError::UnknownTown(_))));
}

#[test]
fn current_schema_is_two_zero() {
    assert_eq!(SchemaVersion::current(), SchemaVersion::v2_0());
    assert!(SchemaVersion::v1_0() < SchemaVersion::current());
}

#[test]
fn unknown_goods_in_the_hold_start_a_new_game() {
    let (data, cfg, state) = fresh_game(21);
    let mut value: serde_json::Value =
        serde_json::from_str(&encode(&state).expect("encode")).expect("json");
    value["state"]["inventory"]["moonstone"] = serde_json::json!(3);
    value["state"]["current_cargo"] = serde_json::json!(3);
    value["state"]["turn"] = serde_json::json!(5);
    let store = MemorySaveStore::with_blob(value.to_string());

    match store.load(&data) {
        Err(SaveError::UnknownGood(good)) => assert_eq!(good, "moonstone"),
        other => panic!("unexpected result: {other:?}"),
    }

    let mut rng = DetRng::from_seed(21, 0);
    let restored = load_or_new(&store, &data, &cfg, &mut rng);
    assert_eq!(restored.turn, 1);
    assert!(!restored.inventory.contains_key("moonstone"));
    assert_eq!(calculate_score(&restored, &data), cfg.economy.starting_gold);
}

#[test]
fn unknown_goods_in_watches_are_rejected() {
    let (data, _, mut state) = fresh_game(22);
    create_price_alert(&mut state, &data, &GoodId::from("grain"), 40, AlertDirection::Above);
    state.market_alerts.price_alerts[0].good_id = GoodId::from("moonstone");
    let raw = encode(&state).expect("encode");
    assert!(matches!(decode(&raw, &data), Err(SaveError::UnknownGood(_))));
}

#[test]
fn restored_opportunities_follow_the_fresh_quotes() {
    let (data, cfg, mut state) = fresh_game(23);
    // a gap no regenerated market can reproduce
    set_quote(&mut state, "northport", "grain", 1, 1, 30);
    set_quote(&mut state, "emberfall", "grain", 900, 900, 30);
    state.market_alerts.opportunities = find_trade_opportunities(&state, &data, &cfg);
    assert!(state
        .market_alerts
        .opportunities
        .iter()
        .any(|opp| opp.good_id.as_str() == "grain"));
    let stale = state.market_alerts.opportunities.clone();

    let mut store = MemorySaveStore::new();
    store.save(&state).expect("save");
    let mut rng = DetRng::from_seed(23, 0);
    let restored = load_or_new(&store, &data, &cfg, &mut rng);

    assert_ne!(restored.market_alerts.opportunities, stale);
    for opp in &restored.market_alerts.opportunities {
        let source = restored.price(&opp.source_town_id, &opp.good_id);
        let target = restored.price(&opp.target_town_id, &opp.good_id);
        assert_eq!(opp.source_price, source.buy);
        assert_eq!(opp.target_price, target.sell);
    }
}
