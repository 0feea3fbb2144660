pub mod pricing;
pub mod rng;
pub mod rounding;
pub mod types;

pub use pricing::{event_modifier, generate_market_prices};
pub use rng::{sample_by_weight, DetRng, RNG_TAG_SESSION};
pub use rounding::{round_half_up, round_half_up_u32};
pub use types::{EventId, GoodId, SeasonId, TownId};

#[cfg(test)]
#[path = "tests/pricing_bounds.rs"]
mod pricing_bounds;
#[cfg(test)]
#[path = "tests/rng_discipline.rs"]
mod rng_discipline;
