pub mod config;
pub mod engine;
pub mod game_state;
pub mod logs;
pub mod systems;
pub mod world;

#[cfg(test)]
mod test_support;

pub use config::{GameConfig, LuxuryGate};
pub use engine::Merchant;
pub use game_state::{create_new_game_state, GameState, GameStatus, MarketPrice};
pub use systems::economy::{DetRng, EventId, GoodId, SeasonId, TownId};
pub use systems::trading::TransactionResult;
pub use systems::turn::{GameSummary, TurnReport};
pub use world::ReferenceData;
