use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::participant::ParticipantId;
use super::policy::PolicyKind;
use crate::money::Money;

/// One participant's owed portion of a single expense.
///
/// Recalculating an edited expense produces a fresh share set; shares are
/// replaced, never mutated. The percentage and weight fields echo the
/// policy input for audit and are `None` for the other policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub participant: ParticipantId,
    pub amount: Money,
    pub policy: PolicyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Decimal>,
}

impl Share {
    pub fn new(participant: ParticipantId, amount: Money, policy: PolicyKind) -> Self {
        Self {
            participant,
            amount,
            policy,
            percentage: None,
            weight: None,
        }
    }

    pub fn with_percentage(mut self, percentage: Decimal) -> Self {
        self.percentage = Some(percentage);
        self
    }

    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// A payer's contribution toward an expense; one expense may have several
/// payers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payer: ParticipantId,
    pub amount: Money,
}

impl Payment {
    pub fn new(payer: ParticipantId, amount: Money) -> Self {
        Self { payer, amount }
    }
}
