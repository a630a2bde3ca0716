use serde::{Deserialize, Serialize};

use super::participant::ParticipantId;
use crate::money::Money;

/// A participant's net ledger position: positive is owed by the group,
/// negative owes the group, zero is settled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetBalance {
    pub participant: ParticipantId,
    pub amount: Money,
}

impl NetBalance {
    pub fn new(participant: ParticipantId, amount: Money) -> Self {
        Self {
            participant,
            amount,
        }
    }
}

/// A point-to-point payment from a debtor to a creditor. As a simplifier
/// output it is advisory; recording an actual settlement is the caller's
/// job. `amount` is always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ParticipantId,
    pub to: ParticipantId,
    pub amount: Money,
}

impl Transfer {
    pub fn new(from: ParticipantId, to: ParticipantId, amount: Money) -> Self {
        Self { from, to, amount }
    }
}
