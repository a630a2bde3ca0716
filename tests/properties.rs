use std::collections::BTreeMap;

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use split_core::core::services::{BalanceAggregator, DebtSimplifier, SplitCalculator};
use split_core::domain::{NetBalance, ParticipantId, Payment, SplitPolicy};
use split_core::money::{CurrencyCode, Money};

fn participant(n: u128) -> ParticipantId {
    ParticipantId(Uuid::from_u128(n + 1))
}

fn usd(minor: i64) -> Money {
    Money::new(minor, CurrencyCode::new("USD"))
}

fn roster(count: usize) -> Vec<ParticipantId> {
    (0..count as u128).map(participant).collect()
}

fn minor_amounts(shares: &[split_core::domain::Share]) -> Vec<i64> {
    shares.iter().map(|s| s.amount.minor_units()).collect()
}

proptest! {
    #[test]
    fn equal_shares_sum_exactly(total in -1_000_000i64..1_000_000, count in 1usize..8) {
        let participants = roster(count);
        let shares =
            SplitCalculator::calculate(&usd(total), &SplitPolicy::even(), &participants).unwrap();
        prop_assert_eq!(minor_amounts(&shares).iter().sum::<i64>(), total);
    }

    #[test]
    fn equal_share_spread_is_the_absorbed_remainder(
        total in -1_000_000i64..1_000_000,
        count in 2usize..8,
    ) {
        let participants = roster(count);
        let shares =
            SplitCalculator::calculate(&usd(total), &SplitPolicy::even(), &participants).unwrap();
        let amounts = minor_amounts(&shares);

        // Everyone but the first holds the floor share; the first holds
        // floor plus the whole remainder, which stays under the head count.
        let base = total.div_euclid(count as i64);
        let remainder = total - base * count as i64;
        prop_assert!(amounts.iter().skip(1).all(|&minor| minor == base));
        prop_assert_eq!(amounts[0], base + remainder);
        prop_assert!(remainder >= 0 && remainder < count as i64);
        if remainder <= 1 {
            let max = amounts.iter().max().unwrap();
            let min = amounts.iter().min().unwrap();
            prop_assert!(max - min <= 1);
        }
    }

    #[test]
    fn exact_shares_sum_exactly(amounts in prop::collection::vec(-100_000i64..100_000, 1..8)) {
        let participants = roster(amounts.len());
        let total: i64 = amounts.iter().sum();
        let policy = SplitPolicy::Exact {
            amounts: participants
                .iter()
                .copied()
                .zip(amounts.iter().map(|&minor| usd(minor)))
                .collect(),
        };
        let shares = SplitCalculator::calculate(&usd(total), &policy, &participants).unwrap();
        prop_assert_eq!(minor_amounts(&shares).iter().sum::<i64>(), total);
    }

    #[test]
    fn percentage_shares_sum_exactly(
        total in -1_000_000i64..1_000_000,
        parts in prop::collection::vec(1u64..1_000, 1..8),
    ) {
        let participants = roster(parts.len());
        let total_parts: u64 = parts.iter().sum();
        let mut hundredths: Vec<i64> =
            parts.iter().map(|&part| ((part * 10_000) / total_parts) as i64).collect();
        let assigned: i64 = hundredths.iter().take(parts.len() - 1).sum();
        let last = hundredths.len() - 1;
        hundredths[last] = 10_000 - assigned;

        let policy = SplitPolicy::Percentage {
            percentages: participants
                .iter()
                .copied()
                .zip(hundredths.iter().map(|&h| Decimal::new(h, 2)))
                .collect(),
        };
        let shares = SplitCalculator::calculate(&usd(total), &policy, &participants).unwrap();
        prop_assert_eq!(minor_amounts(&shares).iter().sum::<i64>(), total);
    }

    #[test]
    fn weighted_shares_sum_exactly(
        total in -1_000_000i64..1_000_000,
        weights in prop::collection::vec(0u32..1_000, 1..8),
    ) {
        prop_assume!(weights.iter().any(|&weight| weight > 0));
        let participants = roster(weights.len());
        let policy = SplitPolicy::Weighted {
            weights: participants
                .iter()
                .copied()
                .zip(weights.iter().map(|&weight| Decimal::from(weight)))
                .collect(),
        };
        let shares = SplitCalculator::calculate(&usd(total), &policy, &participants).unwrap();
        prop_assert_eq!(minor_amounts(&shares).iter().sum::<i64>(), total);
    }

    #[test]
    fn closed_ledgers_net_to_zero(
        count in 2usize..6,
        expenses in prop::collection::vec((0usize..6, 1i64..1_000_000), 1..6),
    ) {
        let participants = roster(count);
        let mut shares = Vec::new();
        let mut payments = Vec::new();
        for (payer_seed, total) in expenses {
            let payer = participants[payer_seed % count];
            let split =
                SplitCalculator::calculate(&usd(total), &SplitPolicy::even(), &participants)
                    .unwrap();
            shares.extend(split);
            payments.push(Payment::new(payer, usd(total)));
        }

        let balances = BalanceAggregator::aggregate(&shares, &payments, &[]).unwrap();
        prop_assert_eq!(
            balances.iter().map(|b| b.amount.minor_units()).sum::<i64>(),
            0
        );
    }

    #[test]
    fn simplify_settles_every_balance(
        seed_amounts in prop::collection::vec(-1_000_000i64..1_000_000, 1..10),
    ) {
        let mut amounts = seed_amounts;
        let correction: i64 = amounts.iter().sum();
        amounts.push(-correction);

        let balances: Vec<NetBalance> = amounts
            .iter()
            .enumerate()
            .map(|(idx, &minor)| NetBalance::new(participant(idx as u128), usd(minor)))
            .collect();
        let transfers = DebtSimplifier::simplify(&balances).unwrap();

        let nonzero = amounts.iter().filter(|&&minor| minor != 0).count();
        prop_assert!(transfers.len() <= nonzero.saturating_sub(1));

        let mut remaining: BTreeMap<ParticipantId, i64> = balances
            .iter()
            .map(|b| (b.participant, b.amount.minor_units()))
            .collect();
        for transfer in &transfers {
            prop_assert!(transfer.amount.minor_units() > 0);
            *remaining.get_mut(&transfer.from).unwrap() += transfer.amount.minor_units();
            *remaining.get_mut(&transfer.to).unwrap() -= transfer.amount.minor_units();
        }
        for &minor in remaining.values() {
            prop_assert!(minor.abs() <= 1);
        }
    }

    #[test]
    fn simplify_on_zeros_is_a_no_op(count in 0usize..8) {
        let balances: Vec<NetBalance> = (0..count as u128)
            .map(|idx| NetBalance::new(participant(idx), usd(0)))
            .collect();
        prop_assert!(DebtSimplifier::simplify(&balances).unwrap().is_empty());
    }
}
