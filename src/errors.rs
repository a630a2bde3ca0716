use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::ParticipantId;
use crate::money::{CurrencyMismatch, Money};

/// Rejections raised while splitting an expense into shares. All indicate
/// a caller/input defect and are never retried internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SplitError {
    #[error("expense has no participants to split between")]
    NoParticipants,
    #[error("participant {0} is not part of the expense")]
    UnknownParticipant(ParticipantId),
    #[error("split amounts must sum to the expense total: expected {expected}, got {actual}")]
    AmountMismatch { expected: Money, actual: Money },
    #[error("percentages must sum to {expected}, got {actual}")]
    PercentageMismatch { expected: Decimal, actual: Decimal },
    #[error("weights must not sum to zero")]
    ZeroTotalWeight,
    #[error("participant {0} has a negative weight")]
    NegativeWeight(ParticipantId),
    #[error(transparent)]
    Currency(#[from] CurrencyMismatch),
}

/// Rejections raised while netting a group's ledger.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AggregationError {
    #[error(transparent)]
    Currency(#[from] CurrencyMismatch),
}

/// Rejections raised while reducing balances to transfers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimplificationError {
    /// The balances do not net out within tolerance. Signals an upstream
    /// aggregation bug; surfaced to the caller, never retried.
    #[error("ledger is unbalanced: balances net to {0}")]
    UnbalancedLedger(Money),
}
