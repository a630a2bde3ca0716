use std::collections::BTreeMap;

use crate::domain::{NetBalance, ParticipantId, Payment, Share, Transfer};
use crate::errors::AggregationError;
use crate::money::{CurrencyCode, CurrencyMismatch, Money};

/// Nets a group's shares, payments, and recorded settlements into one
/// balance per participant.
pub struct BalanceAggregator;

impl BalanceAggregator {
    /// Produces net balances in ascending participant order.
    ///
    /// Per participant: `net = paid − owed + settlements paid out −
    /// settlements received`, so a recorded settlement moves both parties
    /// toward zero. All amounts must share one currency; the first amount
    /// observed fixes the ledger currency. Participants appearing in no
    /// input are omitted; a participant whose activity nets to zero is
    /// still reported.
    pub fn aggregate(
        shares: &[Share],
        payments: &[Payment],
        settlements: &[Transfer],
    ) -> Result<Vec<NetBalance>, AggregationError> {
        tracing::debug!(
            shares = shares.len(),
            payments = payments.len(),
            settlements = settlements.len(),
            "aggregating group ledger"
        );

        let mut ledger = LedgerAccumulator::default();
        for share in shares {
            ledger.apply(share.participant, &share.amount, -1)?;
        }
        for payment in payments {
            ledger.apply(payment.payer, &payment.amount, 1)?;
        }
        for settlement in settlements {
            ledger.apply(settlement.from, &settlement.amount, 1)?;
            ledger.apply(settlement.to, &settlement.amount, -1)?;
        }
        Ok(ledger.into_balances())
    }
}

/// Running minor-unit totals keyed by participant. BTreeMap keeps the
/// output order deterministic.
#[derive(Default)]
struct LedgerAccumulator {
    currency: Option<CurrencyCode>,
    totals: BTreeMap<ParticipantId, i64>,
}

impl LedgerAccumulator {
    fn apply(
        &mut self,
        participant: ParticipantId,
        amount: &Money,
        direction: i64,
    ) -> Result<(), CurrencyMismatch> {
        let currency = self
            .currency
            .get_or_insert_with(|| amount.currency().clone());
        if currency != amount.currency() {
            return Err(CurrencyMismatch {
                expected: currency.clone(),
                found: amount.currency().clone(),
            });
        }
        *self.totals.entry(participant).or_default() += amount.minor_units() * direction;
        Ok(())
    }

    fn into_balances(self) -> Vec<NetBalance> {
        let Some(currency) = self.currency else {
            return Vec::new();
        };
        self.totals
            .into_iter()
            .map(|(participant, minor)| {
                NetBalance::new(participant, Money::new(minor, currency.clone()))
            })
            .collect()
    }
}
