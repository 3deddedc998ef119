use std::fmt;

use crate::settled::SettledEntry;

/// What happened in one round of an overflow sort.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoundRecord {
    /// 1-based round number.
    pub round: u32,
    /// Elements circulating when the round started.
    pub active: usize,
    /// Elements that settled this round, in input order.
    pub settled: Vec<SettledEntry>,
    /// Set for the final round that flushes zero-valued elements.
    pub drain: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortTrace {
    pub rounds: Vec<RoundRecord>,
}

impl SortTrace {
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Round in which the element at `index` settled.
    pub fn settled_round(&self, index: usize) -> Option<u32> {
        self.rounds
            .iter()
            .find(|record| record.settled.iter().any(|entry| entry.index == index))
            .map(|record| record.round)
    }

    pub fn settled_total(&self) -> usize {
        self.rounds.iter().map(|record| record.settled.len()).sum()
    }
}

impl fmt::Display for SortTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for record in &self.rounds {
            write!(
                f,
                "round {:>3}{} active={:<6} settled={:<6} [",
                record.round,
                if record.drain { " (drain)" } else { "" },
                record.active,
                record.settled.len(),
            )?;
            for (i, entry) in record.settled.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}@{}", entry.value, entry.index)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
