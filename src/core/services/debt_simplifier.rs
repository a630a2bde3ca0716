use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::domain::{NetBalance, ParticipantId, Transfer};
use crate::errors::SimplificationError;
use crate::money::Money;

/// Minor units within which a balance counts as settled (0.01 of a
/// two-exponent major unit). The same constant scales the ledger-drift
/// precondition in [`DebtSimplifier::simplify`].
pub const SETTLED_TOLERANCE_MINOR_UNITS: i64 = 1;

/// Settled means strictly inside the tolerance around zero.
fn is_settled(minor_units: i64) -> bool {
    minor_units.abs() < SETTLED_TOLERANCE_MINOR_UNITS
}

/// One side of an open position while transfers are being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenParty {
    remaining: i64,
    participant: ParticipantId,
}

impl Ord for OpenParty {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap order: largest remaining amount first, ties to the
        // smallest participant id for determinism.
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.participant.cmp(&self.participant))
    }
}

impl PartialOrd for OpenParty {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Reduces a group's net balances to a short list of settling transfers.
pub struct DebtSimplifier;

impl DebtSimplifier {
    /// Suggests transfers that drive every balance to zero.
    ///
    /// Greedy largest-debtor-to-largest-creditor matching over two
    /// priority heaps: deterministic, at most `n − 1` transfers for `n`
    /// unsettled balances, though not a proven transfer-count minimum.
    /// Fails with [`SimplificationError::UnbalancedLedger`] when the
    /// balances drift from zero by more than one minor unit per balance.
    pub fn simplify(balances: &[NetBalance]) -> Result<Vec<Transfer>, SimplificationError> {
        let Some(first) = balances.first() else {
            return Ok(Vec::new());
        };
        let currency = first.amount.currency().clone();

        let drift: i64 = balances.iter().map(|b| b.amount.minor_units()).sum();
        let budget = SETTLED_TOLERANCE_MINOR_UNITS * balances.len() as i64;
        if drift.abs() > budget {
            return Err(SimplificationError::UnbalancedLedger(Money::new(
                drift, currency,
            )));
        }
        tracing::debug!(balances = balances.len(), drift, "simplifying group debts");

        let mut debtors = BinaryHeap::new();
        let mut creditors = BinaryHeap::new();
        for balance in balances {
            let minor = balance.amount.minor_units();
            if is_settled(minor) {
                continue;
            }
            let party = OpenParty {
                remaining: minor.abs(),
                participant: balance.participant,
            };
            if minor < 0 {
                debtors.push(party);
            } else {
                creditors.push(party);
            }
        }

        // Residual left on the last party when the other side runs out is
        // inside the drift budget checked above and is dropped.
        let mut transfers = Vec::new();
        while let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) {
            let amount = debtor.remaining.min(creditor.remaining);
            transfers.push(Transfer::new(
                debtor.participant,
                creditor.participant,
                Money::new(amount, currency.clone()),
            ));
            debtor.remaining -= amount;
            creditor.remaining -= amount;
            if !is_settled(debtor.remaining) {
                debtors.push(debtor);
            }
            if !is_settled(creditor.remaining) {
                creditors.push(creditor);
            }
        }
        Ok(transfers)
    }
}
