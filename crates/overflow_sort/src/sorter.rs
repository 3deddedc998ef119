use tracing::{debug, trace};

use crate::config::{SortConfig, validate_threshold};
use crate::error::Result;
use crate::settled::{InsertionStrategy, SettledEntry, SettledSequence};
use crate::trace::{RoundRecord, SortTrace};

/// A value still circulating. `current` is kept in `u128` so that doubling a
/// carried total (always `<= u64::MAX`) can never wrap.
#[derive(Clone, Copy, Debug)]
struct Element {
    current: u128,
    value: u64,
    index: usize,
}

/// Scratch buffers reused across invocations. Only the working sets live
/// here; every invocation builds its own result sequence.
#[derive(Clone, Debug, Default)]
struct RoundContext {
    active: Vec<Element>,
    next: Vec<Element>,
    stalled: Vec<Element>,
}

impl RoundContext {
    fn reset(&mut self, len: usize) {
        self.active.clear();
        self.next.clear();
        self.stalled.clear();
        self.active.reserve(len);
        self.next.reserve(len);
    }
}

#[derive(Clone, Debug)]
pub struct OverflowSorter {
    threshold: u64,
    insertion: InsertionStrategy,
    ctx: RoundContext,
}

impl OverflowSorter {
    pub fn new(threshold: u64) -> Self {
        Self {
            threshold,
            insertion: InsertionStrategy::default(),
            ctx: RoundContext::default(),
        }
    }

    pub fn from_config(config: &SortConfig) -> Self {
        Self::new(config.threshold)
    }

    pub fn with_insertion(mut self, insertion: InsertionStrategy) -> Self {
        self.insertion = insertion;
        self
    }

    #[inline]
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    #[inline]
    pub fn insertion(&self) -> InsertionStrategy {
        self.insertion
    }

    /// Sorts by original value descending; equal values keep input order.
    pub fn sort(&mut self, values: &[u64]) -> Vec<u64> {
        self.sort_entries(values).into_values()
    }

    pub fn sort_entries(&mut self, values: &[u64]) -> SettledSequence {
        self.run(values, None)
    }

    pub fn sort_traced(&mut self, values: &[u64]) -> (Vec<u64>, SortTrace) {
        let mut trace = SortTrace::default();
        let settled = self.run(values, Some(&mut trace));
        (settled.into_values(), trace)
    }

    fn run(&mut self, values: &[u64], mut trace: Option<&mut SortTrace>) -> SettledSequence {
        let threshold = u128::from(self.threshold);
        let strategy = self.insertion;
        let ctx = &mut self.ctx;
        ctx.reset(values.len());

        // A zero total never grows, so those elements wait for the drain round.
        for (index, &value) in values.iter().enumerate() {
            let element = Element {
                current: u128::from(value),
                value,
                index,
            };
            if value == 0 {
                ctx.stalled.push(element);
            } else {
                ctx.active.push(element);
            }
        }

        let mut settled = SettledSequence::with_capacity(values.len());
        let mut round = 0_u32;

        while !ctx.active.is_empty() {
            round += 1;
            let active = ctx.active.len();
            let mut record = trace.is_some().then(|| RoundRecord {
                round,
                active,
                settled: Vec::new(),
                drain: false,
            });
            let before = settled.len();

            for element in ctx.active.drain(..) {
                let doubled = element.current * 2;
                if doubled > threshold {
                    let entry = SettledEntry::new(element.value, element.index);
                    trace!(round, value = entry.value, index = entry.index, "element settled");
                    settled.insert(entry, strategy);
                    if let Some(record) = record.as_mut() {
                        record.settled.push(entry);
                    }
                } else {
                    ctx.next.push(Element {
                        current: doubled,
                        ..element
                    });
                }
            }

            debug!(
                round,
                active,
                settled = settled.len() - before,
                carried = ctx.next.len(),
                "overflow round"
            );
            if let (Some(trace), Some(record)) = (trace.as_mut(), record) {
                trace.rounds.push(record);
            }
            std::mem::swap(&mut ctx.active, &mut ctx.next);
        }

        if !ctx.stalled.is_empty() {
            round += 1;
            debug!(round, stalled = ctx.stalled.len(), "drain round");
            let mut record = RoundRecord {
                round,
                active: ctx.stalled.len(),
                settled: Vec::new(),
                drain: true,
            };
            for element in ctx.stalled.drain(..) {
                let entry = SettledEntry::new(element.value, element.index);
                settled.insert(entry, strategy);
                record.settled.push(entry);
            }
            if let Some(trace) = trace.as_mut() {
                trace.rounds.push(record);
            }
        }

        debug_assert_eq!(settled.len(), values.len());
        settled
    }
}

/// Upper bound on rounds for `threshold`, drain round included.
pub fn max_rounds(threshold: u64) -> u32 {
    threshold.max(1).ilog2() + 2
}

pub fn overflow_sort(values: &[u64], threshold: u64) -> Vec<u64> {
    OverflowSorter::new(threshold).sort(values)
}

/// Like [`overflow_sort`], for callers holding a signed threshold.
pub fn try_overflow_sort(values: &[u64], threshold: i64) -> Result<Vec<u64>> {
    let threshold = validate_threshold(threshold)?;
    Ok(overflow_sort(values, threshold))
}
