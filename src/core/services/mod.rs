//! Stateless computation services over the ledger value objects. Each is
//! a pure function of its inputs and may be called concurrently without
//! coordination.

pub mod balance_aggregator;
pub mod debt_simplifier;
pub mod split_calculator;

pub use balance_aggregator::BalanceAggregator;
pub use debt_simplifier::{DebtSimplifier, SETTLED_TOLERANCE_MINOR_UNITS};
pub use split_calculator::SplitCalculator;
