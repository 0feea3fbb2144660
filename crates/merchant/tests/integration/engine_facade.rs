use merchant::systems::reputation::ReputationStatus;
use merchant::{GameConfig, GameStatus, GoodId, Merchant, ReferenceData, TownId};

fn game(seed: u64) -> Merchant {
    Merchant::from_seed(ReferenceData::builtin(), GameConfig::default(), seed)
}

#[test]
fn trades_build_reputation_and_journal() {
    let mut game = game(51);
    let grain = GoodId::from("grain");
    let here = game.state().current_town_id.clone();

    let bought = game.buy(&grain, 4);
    assert!(bought.success, "{}", bought.message);
    let sold = game.sell(&grain, 4);
    assert!(sold.success, "{}", sold.message);

    assert_eq!(game.reputation(&here).points, 2);
    assert_eq!(game.reputation(&here).status, ReputationStatus::Neutral);
    assert_eq!(game.trading_stats().total_trades, 2);
    assert_eq!(game.state().quantity(&grain), 0);
}

#[test]
fn routes_pair_sells_with_earlier_buys() {
    let mut game = game(52);
    let salt = GoodId::from("salt");
    assert!(game.buy(&salt, 5).success);
    let paid = game.state().trading_journal[0].price_per_unit;

    game.travel(&TownId::from("greymoor")).expect("turn 2");
    let sell_price = game.sell_quote(&salt);
    assert!(game.sell(&salt, 5).success);

    let routes = game.route_analysis();
    assert_eq!(routes.len(), 1);
    let route = &routes[0];
    assert_eq!(route.from_town.as_str(), "northport");
    assert_eq!(route.to_town.as_str(), "greymoor");
    assert_eq!(
        route.profit,
        (i64::from(sell_price) - i64::from(paid)) * 5
    );
    let stats = game.trading_stats();
    assert_eq!(stats.net_profit, route.profit);
}

#[test]
fn quotes_match_what_trades_charge() {
    let mut game = game(53);
    let iron = GoodId::from("iron");
    let quote = game.buy_quote(&iron);
    let result = game.buy(&iron, 2);
    assert!(result.success, "{}", result.message);
    assert_eq!(result.gold_change, Some(-2 * i64::from(quote)));
}

#[test]
fn alerts_can_be_withdrawn() {
    let mut game = game(54);
    let id = game.create_price_alert(
        &GoodId::from("silk"),
        500,
        merchant::systems::analytics::AlertDirection::Above,
    );
    assert_eq!(game.alerts().alerts.len(), 1);
    assert!(game.remove_price_alert(&id));
    assert!(!game.remove_price_alert(&id));
    assert!(game.alerts().alerts.is_empty());
}

#[test]
fn summary_reflects_the_journey() {
    let mut game = game(55);
    let towns: Vec<_> = game.data().towns().iter().map(|t| t.id.clone()).collect();
    let mut turn = 0;
    while game.state().game_status == GameStatus::Playing {
        game.travel(&towns[turn % towns.len()]);
        turn += 1;
    }
    let summary = game.summary();
    assert_eq!(summary.status, GameStatus::Ended);
    assert_eq!(summary.final_gold, 1000);
    assert_eq!(summary.score, game.score());
    assert_eq!(summary.headline, "Journey Complete");
    assert_eq!(summary.turns_used, 20);

    game.new_game();
    assert_eq!(game.state().turn, 1);
    assert_eq!(game.state().game_status, GameStatus::Playing);
}
