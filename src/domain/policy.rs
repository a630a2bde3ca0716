use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::participant::ParticipantId;
use crate::money::Money;

/// How an expense total is divided among its participants.
///
/// Exactly one rule is active per expense; invalid field combinations are
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SplitPolicy {
    /// Even split over the expense participants minus `excluded`.
    Equal { excluded: BTreeSet<ParticipantId> },
    /// Caller-provided amounts that must sum to the expense total.
    Exact {
        amounts: BTreeMap<ParticipantId, Money>,
    },
    /// Percentages of the total, summing to 100.
    Percentage {
        percentages: BTreeMap<ParticipantId, Decimal>,
    },
    /// Proportional weights, non-negative and not all zero.
    Weighted {
        weights: BTreeMap<ParticipantId, Decimal>,
    },
}

impl SplitPolicy {
    /// Even split with nobody excluded.
    pub fn even() -> Self {
        Self::Equal {
            excluded: BTreeSet::new(),
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            SplitPolicy::Equal { .. } => PolicyKind::Equal,
            SplitPolicy::Exact { .. } => PolicyKind::Exact,
            SplitPolicy::Percentage { .. } => PolicyKind::Percentage,
            SplitPolicy::Weighted { .. } => PolicyKind::Weighted,
        }
    }
}

/// Audit tag recorded on every share produced from a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolicyKind {
    Equal,
    Exact,
    Percentage,
    Weighted,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PolicyKind::Equal => "Equal",
            PolicyKind::Exact => "Exact",
            PolicyKind::Percentage => "Percentage",
            PolicyKind::Weighted => "Weighted",
        };
        f.write_str(label)
    }
}
