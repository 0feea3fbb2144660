use crate::game_state::GameState;
use crate::systems::economy::GoodId;

/// Cargo space still free.
pub fn free_space(state: &GameState) -> u32 {
    state.cargo_limit.saturating_sub(state.current_cargo)
}

/// Adds units to the hold. Capacity is the caller's check.
pub(crate) fn credit(state: &mut GameState, good: &GoodId, units: u32) {
    *state.inventory.entry(good.clone()).or_insert(0) += units;
    state.current_cargo += units;
}

/// Removes units from the hold. Ownership is the caller's check.
pub(crate) fn debit(state: &mut GameState, good: &GoodId, units: u32) {
    let held = state.inventory.entry(good.clone()).or_insert(0);
    *held = held.saturating_sub(units);
    state.current_cargo = state.current_cargo.saturating_sub(units);
}
