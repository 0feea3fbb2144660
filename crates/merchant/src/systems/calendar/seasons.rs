use log::info;

use crate::config::GameConfig;
use crate::game_state::GameState;
use crate::systems::economy::SeasonId;
use crate::world::ReferenceData;

/// Advances the season counter, rolling into the next season once the
/// current one has run its duration. Returns the new season on a roll.
pub fn update_seasons(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
) -> Option<SeasonId> {
    state.season_turn += 1;
    let current = data.season(state.current_season.as_str());
    if state.season_turn <= current.duration {
        return None;
    }

    let next = data.next_season(current.id.as_str());
    info!(
        "season change {} -> {} at turn {}",
        current.id, next.id, state.turn
    );
    state.current_season = next.id.clone();
    state.season_turn = 1;
    state.push_log(
        format!("[Season] {} begins: {}", next.name, next.description),
        cfg.logs.event_log_cap,
    );
    Some(next.id.clone())
}
