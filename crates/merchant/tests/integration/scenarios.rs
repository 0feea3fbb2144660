use merchant::systems::analytics::AlertDirection;
use merchant::systems::trading::buy_good;
use merchant::systems::turn::travel_to_town;
use merchant::{
    create_new_game_state, DetRng, GameConfig, GameStatus, GoodId, MarketPrice, Merchant,
    ReferenceData, TownId,
};

use crate::rng_support::ConstRng;

fn quote_grain(state: &mut merchant::GameState, buy: u32, sell: u32, available: u32) {
    state
        .market_prices
        .get_mut(&TownId::from("northport"))
        .expect("northport quotes")
        .insert(
            GoodId::from("grain"),
            MarketPrice {
                buy,
                sell,
                available,
            },
        );
}

#[test]
fn fresh_game_starts_in_the_first_town() {
    let game = Merchant::from_seed(ReferenceData::builtin(), GameConfig::default(), 1);
    let state = game.state();
    assert_eq!(state.gold, 1000);
    assert_eq!(state.turn, 1);
    assert_eq!(state.current_town_id, game.data().towns()[0].id);
    assert!(state.inventory.values().all(|qty| *qty == 0));
    assert_eq!(state.game_status, GameStatus::Playing);
}

#[test]
fn buying_five_at_twenty() {
    let data = ReferenceData::builtin();
    let cfg = GameConfig::default();
    let mut state = create_new_game_state(&data, &cfg, &mut DetRng::from_seed(2, 0));
    quote_grain(&mut state, 20, 18, 30);

    let result = buy_good(&mut state, &data, &cfg, &GoodId::from("grain"), 5);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.gold_change, Some(-100));
    assert_eq!(result.cargo_change, Some(5));
    assert_eq!(state.quantity(&GoodId::from("grain")), 5);
    assert_eq!(state.gold, 900);
}

#[test]
fn buying_past_stock_is_rejected() {
    let data = ReferenceData::builtin();
    let cfg = GameConfig::default();
    let mut state = create_new_game_state(&data, &cfg, &mut DetRng::from_seed(3, 0));
    quote_grain(&mut state, 20, 18, 30);
    let before = state.clone();

    let result = buy_good(&mut state, &data, &cfg, &GoodId::from("grain"), 31);
    assert!(!result.success);
    assert_eq!(result.message, "Only 30 Grain available!");
    assert_eq!(result.gold_change, None);
    assert_eq!(state, before);
}

#[test]
fn travel_regenerates_every_quote() {
    let mut game = Merchant::from_seed(ReferenceData::builtin(), GameConfig::default(), 4);
    for step in 0..12u32 {
        let town = game.data().towns()[(step as usize + 1) % 4].id.clone();
        let report = game.travel(&town).expect("still playing");
        assert_eq!(report.turn, step + 2);
        assert_eq!(game.state().turn, step + 2);
        let state = game.state();
        for town in game.data().towns() {
            for good in game.data().goods() {
                let quote = state.price(&town.id, &good.id);
                assert!(quote.buy >= quote.sell);
                assert!(quote.available >= 1);
            }
        }
        assert!(state.active_events.iter().all(|event| event.duration > 0));
    }
}

#[test]
fn reaching_the_target_wins() {
    let data = ReferenceData::builtin();
    let cfg = GameConfig::default();
    let mut rng = DetRng::from_seed(5, 0);
    let mut state = create_new_game_state(&data, &cfg, &mut rng);
    state.gold = cfg.economy.target_gold;
    travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("emberfall"));
    assert_eq!(state.game_status, GameStatus::Won);
}

#[test]
fn running_out_of_turns_ends() {
    let mut game = Merchant::from_seed(ReferenceData::builtin(), GameConfig::default(), 6);
    let towns: Vec<TownId> = game.data().towns().iter().map(|t| t.id.clone()).collect();
    for step in 0..19 {
        game.travel(&towns[step % towns.len()]);
    }
    assert_eq!(game.state().turn, 20);
    assert_eq!(game.state().game_status, GameStatus::Playing);

    let last = game.travel(&towns[0]).expect("final leg");
    assert_eq!(last.status, GameStatus::Ended);
    assert!(game.travel(&towns[1]).is_none());
    assert_eq!(game.state().turn, 21);
}

#[test]
fn above_alert_triggers_once() {
    let mut game = Merchant::new(
        ReferenceData::builtin(),
        GameConfig::default(),
        ConstRng::at(0.99),
    );
    let gems = GoodId::from("gems");
    let id = game.create_price_alert(&gems, 50, AlertDirection::Above);

    let report = game.travel(&TownId::from("northport")).expect("turn 2");
    assert_eq!(report.alerts_fired, vec![id]);
    assert!(game.alerts().alerts.is_empty());
    assert!(game
        .state()
        .event_log
        .iter()
        .any(|line| line.starts_with("[Alert] Precious Gems sell price rose to")));

    let report = game.travel(&TownId::from("emberfall")).expect("turn 3");
    assert!(report.alerts_fired.is_empty());
}
