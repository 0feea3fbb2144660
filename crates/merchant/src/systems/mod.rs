pub mod analytics;
pub mod calendar;
pub mod economy;
pub mod migrations;
pub mod reputation;
pub mod save;
pub mod trading;
pub mod turn;
