use tracing::debug;

use crate::error::{OverflowSortError, Result};
use crate::settled::SettledEntry;

pub const DEFAULT_MAX_ROUNDS: u32 = 32;

/// How the round-0 working total is derived from a value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Seeding {
    #[default]
    Identity,
    /// `v * v`, which spreads small values across more rounds.
    Square,
}

impl Seeding {
    pub fn label(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Square => "square",
        }
    }

    fn seed(self, value: u64) -> Result<u128> {
        let wide = u128::from(value);
        let seed = match self {
            Self::Identity => wide,
            Self::Square => wide * wide,
        };
        // The first doubling is the only one that can exceed u64 territory.
        seed.checked_mul(2)
            .map(|_| seed)
            .ok_or(OverflowSortError::NumericOverflow { value })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TickEntry {
    pub round: u32,
    pub entry: SettledEntry,
}

/// Elements grouped by the round in which they settled, earliest first.
/// Inside a round, input order is kept.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TickOrder {
    pub entries: Vec<TickEntry>,
    /// Elements that did not settle within the round cap, in input order.
    pub unsettled: Vec<SettledEntry>,
}

impl TickOrder {
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|tick| tick.entry.value).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.unsettled.is_empty()
    }
}

/// Returns, per input element, the 1-based round in which it settles, or
/// `None` when it does not settle within `max_rounds`.
pub fn settlement_rounds(
    values: &[u64],
    threshold: u64,
    seeding: Seeding,
    max_rounds: u32,
) -> Result<Vec<Option<u32>>> {
    let threshold = u128::from(threshold);
    let mut current = values
        .iter()
        .map(|&value| seeding.seed(value))
        .collect::<Result<Vec<_>>>()?;

    let mut rounds = vec![None; values.len()];
    let mut pending: Vec<usize> = (0..values.len()).filter(|&i| current[i] != 0).collect();

    for round in 1..=max_rounds {
        if pending.is_empty() {
            break;
        }
        let before = pending.len();
        pending.retain(|&i| {
            let doubled = current[i] * 2;
            if doubled > threshold {
                rounds[i] = Some(round);
                false
            } else {
                current[i] = doubled;
                true
            }
        });
        debug!(
            round,
            settled = before - pending.len(),
            pending = pending.len(),
            seeding = seeding.label(),
            "schedule round"
        );
    }

    Ok(rounds)
}

/// Stable counting sort of the elements by settlement round.
pub fn tick_order(
    values: &[u64],
    threshold: u64,
    seeding: Seeding,
    max_rounds: u32,
) -> Result<TickOrder> {
    let rounds = settlement_rounds(values, threshold, seeding, max_rounds)?;

    let mut counts = vec![0_usize; max_rounds as usize + 1];
    let mut unsettled = Vec::new();
    for (index, round) in rounds.iter().enumerate() {
        match round {
            Some(round) => counts[*round as usize] += 1,
            None => unsettled.push(SettledEntry::new(values[index], index)),
        }
    }

    let mut start = 0_usize;
    for count in counts.iter_mut() {
        let c = *count;
        *count = start;
        start += c;
    }

    let mut slots: Vec<Option<TickEntry>> = vec![None; start];
    for (index, round) in rounds.iter().enumerate() {
        if let Some(round) = *round {
            let pos = &mut counts[round as usize];
            slots[*pos] = Some(TickEntry {
                round,
                entry: SettledEntry::new(values[index], index),
            });
            *pos += 1;
        }
    }

    Ok(TickOrder {
        entries: slots.into_iter().flatten().collect(),
        unsettled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_rounds_match_round_loop() {
        let rounds =
            settlement_rounds(&[10, 200, 200, 5], 255, Seeding::Identity, DEFAULT_MAX_ROUNDS)
                .unwrap();
        assert_eq!(rounds, vec![Some(5), Some(1), Some(1), Some(6)]);
    }

    #[test]
    fn zeros_never_settle() {
        let order = tick_order(&[0, 4, 0], 255, Seeding::Identity, DEFAULT_MAX_ROUNDS).unwrap();
        assert_eq!(order.values(), vec![4]);
        assert!(!order.is_complete());
        let unsettled: Vec<_> = order.unsettled.iter().map(|e| e.index).collect();
        assert_eq!(unsettled, vec![0, 2]);
    }

    #[test]
    fn tick_order_groups_by_round_then_index() {
        // 130 and 129 share round 1; 64 needs two doublings; 3 needs seven.
        let order =
            tick_order(&[3, 129, 64, 130], 255, Seeding::Identity, DEFAULT_MAX_ROUNDS).unwrap();
        let got: Vec<_> = order
            .entries
            .iter()
            .map(|t| (t.round, t.entry.value, t.entry.index))
            .collect();
        assert_eq!(got, vec![(1, 129, 1), (1, 130, 3), (2, 64, 2), (7, 3, 0)]);
        assert!(order.is_complete());
    }

    #[test]
    fn square_seeding_spreads_small_values() {
        let rounds =
            settlement_rounds(&[255, 2, 1], 65_535, Seeding::Square, DEFAULT_MAX_ROUNDS).unwrap();
        assert_eq!(rounds, vec![Some(1), Some(14), Some(16)]);
    }

    #[test]
    fn round_cap_leaves_elements_unsettled() {
        let order = tick_order(&[1, 200], 255, Seeding::Identity, 3).unwrap();
        assert_eq!(order.values(), vec![200]);
        assert_eq!(order.unsettled, vec![SettledEntry::new(1, 0)]);
    }

    #[test]
    fn square_seeding_rejects_unrepresentable_values() {
        let err = settlement_rounds(&[7, u64::MAX], 255, Seeding::Square, DEFAULT_MAX_ROUNDS)
            .unwrap_err();
        assert_eq!(err, OverflowSortError::NumericOverflow { value: u64::MAX });

        let ok = settlement_rounds(&[1 << 63], u64::MAX, Seeding::Square, DEFAULT_MAX_ROUNDS);
        assert_eq!(ok.unwrap(), vec![Some(1)]);
    }

    #[test]
    fn empty_input() {
        let order = tick_order(&[], 255, Seeding::Square, DEFAULT_MAX_ROUNDS).unwrap();
        assert!(order.entries.is_empty());
        assert!(order.is_complete());
    }
}
