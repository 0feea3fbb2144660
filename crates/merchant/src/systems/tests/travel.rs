use crate::game_state::GameStatus;
use crate::systems::economy::{DetRng, GoodId, TownId};
use crate::systems::turn::{calculate_score, score_rating, summarize, travel_to_town};
use crate::test_support::fresh_game;

#[test]
fn travel_advances_exactly_one_turn() {
    let (data, cfg, mut state) = fresh_game(90);
    let mut rng = DetRng::from_seed(90, 1);
    let before = state.market_prices.clone();

    let report = travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("emberfall"))
        .expect("game in progress");

    assert_eq!(state.turn, 2);
    assert_eq!(report.turn, 2);
    assert_eq!(state.current_town_id.as_str(), "emberfall");
    assert_eq!(state.market_prices.len(), data.towns().len());
    assert_ne!(state.market_prices, before);
    assert_eq!(state.event_log[0], "Traveled to Emberfall (Turn 2)");
    assert_eq!(state.market_alerts.last_checked_turn, 2);
    assert_eq!(state.season_turn, 2);
}

#[test]
fn no_spent_events_survive_a_turn() {
    let (data, cfg, mut state) = fresh_game(91);
    let mut rng = DetRng::from_seed(91, 1);
    state.max_turns = 200;
    state.target_gold = i64::MAX;
    for step in 0..150 {
        let town = &data.towns()[step % data.towns().len()].id;
        travel_to_town(&mut state, &data, &cfg, &mut rng, town).expect("still playing");
        assert!(state.active_events.iter().all(|event| event.duration > 0));
        assert!(state.event_log.len() <= cfg.logs.event_log_cap);
    }
}

#[test]
fn reaching_target_gold_wins() {
    let (data, cfg, mut state) = fresh_game(92);
    let mut rng = DetRng::from_seed(92, 1);
    state.gold = 5000;
    let report = travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("stonehold"))
        .expect("report");
    assert_eq!(report.status, GameStatus::Won);
    assert_eq!(state.game_status, GameStatus::Won);
}

#[test]
fn running_out_of_turns_ends_the_game() {
    let (data, cfg, mut state) = fresh_game(93);
    let mut rng = DetRng::from_seed(93, 1);
    state.turn = 19;
    travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("greymoor"));
    assert_eq!(state.turn, 20);
    assert_eq!(state.game_status, GameStatus::Playing);

    travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("northport"));
    assert_eq!(state.turn, 21);
    assert_eq!(state.game_status, GameStatus::Ended);
}

#[test]
fn finished_games_ignore_travel() {
    let (data, cfg, mut state) = fresh_game(94);
    let mut rng = DetRng::from_seed(94, 1);
    state.game_status = GameStatus::Won;
    let before = state.clone();
    let report = travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("emberfall"));
    assert!(report.is_none());
    assert_eq!(state, before);
    assert_eq!(rng.cursor(), 0);
}

#[test]
#[should_panic(expected = "unknown town id")]
fn unknown_destination_is_a_contract_violation() {
    let (data, cfg, mut state) = fresh_game(95);
    let mut rng = DetRng::from_seed(95, 1);
    travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("atlantis"));
}

#[test]
fn seasons_roll_every_five_turns() {
    let (data, cfg, mut state) = fresh_game(96);
    let mut rng = DetRng::from_seed(96, 1);
    let mut changes = Vec::new();
    for _ in 0..5 {
        let report = travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from("northport"))
            .expect("report");
        changes.push(report.season_changed.map(|s| s.to_string()));
    }
    assert_eq!(
        changes,
        vec![None, None, None, None, Some("summer".to_string())]
    );
}

#[test]
fn same_seed_same_journey() {
    let run = || {
        let (data, cfg, mut state) = fresh_game(97);
        let mut rng = DetRng::from_seed(97, 1);
        for town in ["emberfall", "stonehold", "greymoor", "northport"] {
            travel_to_town(&mut state, &data, &cfg, &mut rng, &TownId::from(town));
        }
        state
    };
    assert_eq!(run(), run());
}

#[test]
fn score_counts_gold_hold_and_early_finish() {
    let (data, cfg, mut state) = fresh_game(98);
    state.inventory.insert(GoodId::from("grain"), 5);
    state.current_cargo = 5;
    // 5 grain at base 20, credited at 80%
    assert_eq!(calculate_score(&state, &data), 1000 + 80);

    state.game_status = GameStatus::Won;
    state.turn = 10;
    assert_eq!(calculate_score(&state, &data), 1000 + 80 + 10 * 50);

    let summary = summarize(&state, &data, &cfg);
    assert_eq!(summary.headline, "Victory!");
    assert_eq!(summary.turns_used, 9);
    assert_eq!(summary.profit, 0);
}

#[test]
fn rating_tiers() {
    assert_eq!(score_rating(6000).title, "Legendary Merchant");
    assert_eq!(score_rating(5999).stars, 4);
    assert_eq!(score_rating(3000).title, "Skilled Merchant");
    assert_eq!(score_rating(2000).stars, 2);
    assert_eq!(score_rating(-50).title, "Novice Merchant");
}

#[test]
fn summary_headlines_follow_outcome() {
    let (data, cfg, mut state) = fresh_game(99);
    state.game_status = GameStatus::Ended;
    assert_eq!(summarize(&state, &data, &cfg).headline, "Journey Complete");
    state.gold = 1500;
    assert_eq!(summarize(&state, &data, &cfg).headline, "Profit Made!");
    state.gold = 6000;
    assert_eq!(summarize(&state, &data, &cfg).headline, "Success!");
}
