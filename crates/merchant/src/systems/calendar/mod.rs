pub mod events;
pub mod seasons;

pub use events::{
    activate_event, expire_events, generate_random_event, generate_seasonal_event,
};
pub use seasons::update_seasons;

#[cfg(test)]
#[path = "tests/event_draws.rs"]
mod event_draws;
#[cfg(test)]
#[path = "tests/season_cycle.rs"]
mod season_cycle;
