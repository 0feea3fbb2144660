use log::debug;
use rand_core::RngCore;

use crate::config::GameConfig;
use crate::game_state::{ActiveEvent, GameState};
use crate::systems::economy::rng::{chance, choose};
use crate::systems::economy::sample_by_weight;
use crate::world::{EventKind, ReferenceData};

/// Ages every active event by one turn and drops the ones that ran out.
pub fn expire_events(state: &mut GameState) -> usize {
    let before = state.active_events.len();
    state.active_events.retain_mut(|event| {
        event.duration = event.duration.saturating_sub(1);
        event.duration > 0
    });
    let expired = before - state.active_events.len();
    if expired > 0 {
        debug!("expired {expired} events at turn {}", state.turn);
    }
    expired
}

/// Draws at most one catalog event. Most turns are quiet; when the roll
/// succeeds the pick is weighted by each entry's `weight`.
pub fn generate_random_event<R: RngCore + ?Sized>(
    state: &GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    rng: &mut R,
) -> Option<ActiveEvent> {
    if !chance(rng, cfg.events.event_chance) {
        return None;
    }
    sample_by_weight(rng, data.events(), |event| f64::from(event.weight))
        .map(|spec| ActiveEvent::from_catalog(spec, &state.current_town_id))
}

/// Rolls the current season's festival chance and, on success, picks one of
/// its festivals uniformly.
pub fn generate_seasonal_event<R: RngCore + ?Sized>(
    state: &GameState,
    data: &ReferenceData,
    rng: &mut R,
) -> Option<ActiveEvent> {
    let season = data.season(state.current_season.as_str());
    if !chance(rng, season.festival_chance) {
        return None;
    }
    let festivals = data.festivals_for(season.id.as_str());
    choose(rng, &festivals).map(|festival| ActiveEvent::from_festival(festival))
}

/// Pushes a drawn event onto the active list and announces it.
pub fn activate_event(
    state: &mut GameState,
    data: &ReferenceData,
    cfg: &GameConfig,
    event: ActiveEvent,
) {
    let line = match event.kind {
        EventKind::Global => format!("[Global] {}: {}", event.title, event.description),
        EventKind::Local => {
            let town = event.town_id.as_ref().unwrap_or(&state.current_town_id);
            format!(
                "[{}] {}: {}",
                data.town(town.as_str()).name,
                event.title,
                event.description
            )
        }
        EventKind::Seasonal => format!("[Festival] {}: {}", event.title, event.description),
    };
    debug!(
        "event activated id={} kind={:?} duration={}",
        event.id, event.kind, event.duration
    );
    state.active_events.push(event);
    state.push_log(line, cfg.logs.event_log_cap);
}
