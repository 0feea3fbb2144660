pub mod index;
pub mod loader;
pub mod schema;

pub use index::ReferenceData;
pub use loader::{DataError, DataSources};
pub use schema::{
    EventKind, EventSpec, FestivalSpec, GoodCategory, GoodSpec, SeasonSpec, TownSpec,
};
