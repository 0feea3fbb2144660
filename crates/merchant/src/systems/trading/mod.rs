pub mod engine;
pub mod inventory;
pub mod journal;
pub mod types;

pub use engine::{buy_good, effective_buy_price, effective_sell_price, has_trade_access, sell_good};
pub use journal::{cost_basis, unrealized_profit};
pub use types::{CostBasis, TradeKind, TradeRecord, TransactionResult};

#[cfg(test)]
#[path = "tests/accounting_identity.rs"]
mod accounting_identity;
#[cfg(test)]
#[path = "tests/capacity_enforcement.rs"]
mod capacity_enforcement;
#[cfg(test)]
#[path = "tests/cost_basis.rs"]
mod cost_basis_tests;
#[cfg(test)]
#[path = "tests/reputation_gate.rs"]
mod reputation_gate;
