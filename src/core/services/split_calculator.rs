use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::{ParticipantId, PolicyKind, Share, SplitPolicy};
use crate::errors::SplitError;
use crate::money::Money;

/// Turns an expense total and a split policy into per-participant shares.
pub struct SplitCalculator;

impl SplitCalculator {
    /// Splits `total` across `participants` according to `policy`.
    ///
    /// `participants` is an explicit ordered list: the Equal rule hands
    /// the division remainder to the first effective participant, and the
    /// Percentage/Weighted rules hand the rounding residual to the last,
    /// so the returned shares always sum to `total` exactly.
    pub fn calculate(
        total: &Money,
        policy: &SplitPolicy,
        participants: &[ParticipantId],
    ) -> Result<Vec<Share>, SplitError> {
        tracing::debug!(
            policy = %policy.kind(),
            participants = participants.len(),
            "splitting expense total {total}"
        );
        match policy {
            SplitPolicy::Equal { excluded } => Self::split_equal(total, excluded, participants),
            SplitPolicy::Exact { amounts } => Self::split_exact(total, amounts, participants),
            SplitPolicy::Percentage { percentages } => {
                Self::split_percentage(total, percentages, participants)
            }
            SplitPolicy::Weighted { weights } => Self::split_weighted(total, weights, participants),
        }
    }

    fn split_equal(
        total: &Money,
        excluded: &BTreeSet<ParticipantId>,
        participants: &[ParticipantId],
    ) -> Result<Vec<Share>, SplitError> {
        let effective: Vec<ParticipantId> = participants
            .iter()
            .copied()
            .filter(|participant| !excluded.contains(participant))
            .collect();
        if effective.is_empty() {
            return Err(SplitError::NoParticipants);
        }

        let count = effective.len() as i64;
        // div_euclid keeps the remainder in 0..count for negative totals too.
        let base = total.minor_units().div_euclid(count);
        let remainder = total.minor_units() - base * count;

        Ok(effective
            .iter()
            .enumerate()
            .map(|(idx, &participant)| {
                let minor = if idx == 0 { base + remainder } else { base };
                Share::new(
                    participant,
                    Money::new(minor, total.currency().clone()),
                    PolicyKind::Equal,
                )
            })
            .collect())
    }

    fn split_exact(
        total: &Money,
        amounts: &BTreeMap<ParticipantId, Money>,
        participants: &[ParticipantId],
    ) -> Result<Vec<Share>, SplitError> {
        let members = Self::ordered_members(amounts, participants)?;

        let mut actual = Money::zero(total.currency().clone());
        for amount in amounts.values() {
            actual = actual.checked_add(amount)?;
        }
        if actual != *total {
            return Err(SplitError::AmountMismatch {
                expected: total.clone(),
                actual,
            });
        }

        Ok(members
            .into_iter()
            .map(|participant| {
                Share::new(participant, amounts[&participant].clone(), PolicyKind::Exact)
            })
            .collect())
    }

    fn split_percentage(
        total: &Money,
        percentages: &BTreeMap<ParticipantId, Decimal>,
        participants: &[ParticipantId],
    ) -> Result<Vec<Share>, SplitError> {
        let members = Self::ordered_members(percentages, participants)?;

        let actual: Decimal = percentages.values().copied().sum();
        let tolerance = Decimal::new(1, 2);
        if (actual - Decimal::ONE_HUNDRED).abs() > tolerance {
            return Err(SplitError::PercentageMismatch {
                expected: Decimal::ONE_HUNDRED,
                actual,
            });
        }

        let mut shares = Vec::with_capacity(members.len());
        let mut allocated = 0i64;
        for (idx, &participant) in members.iter().enumerate() {
            let percentage = percentages[&participant];
            let minor = if idx + 1 == members.len() {
                // Last participant absorbs the rounding residual so the
                // shares sum to the total exactly.
                total.minor_units() - allocated
            } else {
                round_half_up(Decimal::from(total.minor_units()) * percentage / Decimal::ONE_HUNDRED)
            };
            allocated += minor;
            shares.push(
                Share::new(
                    participant,
                    Money::new(minor, total.currency().clone()),
                    PolicyKind::Percentage,
                )
                .with_percentage(percentage),
            );
        }
        Ok(shares)
    }

    fn split_weighted(
        total: &Money,
        weights: &BTreeMap<ParticipantId, Decimal>,
        participants: &[ParticipantId],
    ) -> Result<Vec<Share>, SplitError> {
        let members = Self::ordered_members(weights, participants)?;

        if let Some((&participant, _)) = weights
            .iter()
            .find(|(_, weight)| **weight < Decimal::ZERO)
        {
            return Err(SplitError::NegativeWeight(participant));
        }
        let total_weight: Decimal = weights.values().copied().sum();
        if total_weight.is_zero() {
            return Err(SplitError::ZeroTotalWeight);
        }

        let mut shares = Vec::with_capacity(members.len());
        let mut allocated = 0i64;
        for (idx, &participant) in members.iter().enumerate() {
            let weight = weights[&participant];
            let minor = if idx + 1 == members.len() {
                total.minor_units() - allocated
            } else {
                round_half_up(Decimal::from(total.minor_units()) * weight / total_weight)
            };
            allocated += minor;
            shares.push(
                Share::new(
                    participant,
                    Money::new(minor, total.currency().clone()),
                    PolicyKind::Weighted,
                )
                .with_weight(weight),
            );
        }
        Ok(shares)
    }

    /// Orders a policy's member keys by the caller-supplied participant
    /// order, rejecting keys that are not expense participants.
    fn ordered_members<V>(
        values: &BTreeMap<ParticipantId, V>,
        participants: &[ParticipantId],
    ) -> Result<Vec<ParticipantId>, SplitError> {
        if let Some(stray) = values
            .keys()
            .find(|participant| !participants.contains(participant))
        {
            return Err(SplitError::UnknownParticipant(*stray));
        }
        let members: Vec<ParticipantId> = participants
            .iter()
            .copied()
            .filter(|participant| values.contains_key(participant))
            .collect();
        if members.is_empty() {
            return Err(SplitError::NoParticipants);
        }
        Ok(members)
    }
}

/// Rounds a fractional minor-unit quantity half away from zero.
fn round_half_up(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
