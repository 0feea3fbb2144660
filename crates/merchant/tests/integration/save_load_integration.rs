use merchant::systems::save::{FileSaveStore, MemorySaveStore, SaveStore};
use merchant::{DetRng, GameConfig, GoodId, Merchant, ReferenceData, TownId};
use tempfile::tempdir;

fn played_game() -> Merchant {
    let mut game = Merchant::from_seed(ReferenceData::builtin(), GameConfig::default(), 31);
    game.buy(&GoodId::from("grain"), 6);
    game.travel(&TownId::from("stonehold"));
    game.sell(&GoodId::from("grain"), 2);
    game
}

#[test]
fn file_save_resumes_the_same_journey() {
    let game = played_game();
    let dir = tempdir().expect("temp dir");
    let mut store = FileSaveStore::new(dir.path().join("saves/slot1.json"));
    game.save(&mut store).expect("save");

    let resumed = Merchant::restore(
        ReferenceData::builtin(),
        GameConfig::default(),
        DetRng::from_seed(31, 1),
        &store,
    );
    let (before, after) = (game.state(), resumed.state());
    assert_eq!(after.turn, before.turn);
    assert_eq!(after.gold, before.gold);
    assert_eq!(after.inventory, before.inventory);
    assert_eq!(after.trading_journal, before.trading_journal);
    assert_eq!(after.pending_purchases, before.pending_purchases);
    assert_eq!(after.reputation, before.reputation);
    assert_eq!(after.event_log, before.event_log);
    assert_eq!(after.record_seq, before.record_seq);
    assert_eq!(after.market_prices.len(), before.market_prices.len());
}

#[test]
fn resumed_games_keep_minting_fresh_ids() {
    let game = played_game();
    let mut store = MemorySaveStore::new();
    game.save(&mut store).expect("save");

    let mut resumed = Merchant::restore(
        ReferenceData::builtin(),
        GameConfig::default(),
        DetRng::from_seed(32, 0),
        &store,
    );
    let result = resumed.sell(&GoodId::from("grain"), 1);
    assert!(result.success, "{}", result.message);
    let journal = &resumed.state().trading_journal;
    let last = journal.last().expect("journal entry");
    assert!(journal[..journal.len() - 1]
        .iter()
        .all(|record| record.seq < last.seq && record.id != last.id));
}

#[test]
fn cleared_store_starts_over() {
    let game = played_game();
    let mut store = MemorySaveStore::new();
    game.save(&mut store).expect("save");
    store.clear().expect("clear");

    let fresh = Merchant::restore(
        ReferenceData::builtin(),
        GameConfig::default(),
        DetRng::from_seed(33, 0),
        &store,
    );
    assert_eq!(fresh.state().turn, 1);
    assert!(fresh.state().trading_journal.is_empty());
}

#[test]
fn future_saves_start_over() {
    let store = MemorySaveStore::with_blob(
        r#"{ "schema": { "version": { "major": 9, "minor": 1 } }, "state": {} }"#,
    );
    let game = Merchant::restore(
        ReferenceData::builtin(),
        GameConfig::default(),
        DetRng::from_seed(34, 0),
        &store,
    );
    assert_eq!(game.state().turn, 1);
}
