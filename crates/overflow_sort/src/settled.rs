/// An element that has overflowed the threshold, identified by its original
/// value and its position in the input.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct SettledEntry {
    pub value: u64,
    pub index: usize,
}

impl SettledEntry {
    #[inline]
    pub fn new(value: u64, index: usize) -> Self {
        Self { value, index }
    }

    /// `true` when `self` belongs strictly before `other`: larger value first,
    /// smaller original index first among equal values.
    #[inline]
    pub fn precedes(&self, other: &Self) -> bool {
        self.value > other.value || (self.value == other.value && self.index < other.index)
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum InsertionStrategy {
    /// Front-to-back scan for the first entry the new one precedes.
    LinearScan,
    /// Same position found with a binary search over the ordered prefix.
    #[default]
    BinarySearch,
}

impl InsertionStrategy {
    pub fn label(self) -> &'static str {
        match self {
            Self::LinearScan => "linear_scan",
            Self::BinarySearch => "binary_search",
        }
    }
}

/// Result sequence kept ordered by (value desc, index asc) on every insert.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SettledSequence {
    entries: Vec<SettledEntry>,
}

impl SettledSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, entry: SettledEntry, strategy: InsertionStrategy) {
        let pos = match strategy {
            InsertionStrategy::LinearScan => self.scan_position(&entry),
            InsertionStrategy::BinarySearch => self.search_position(&entry),
        };
        self.entries.insert(pos, entry);
        debug_assert!(self.is_ordered());
    }

    fn scan_position(&self, entry: &SettledEntry) -> usize {
        self.entries
            .iter()
            .position(|existing| entry.precedes(existing))
            .unwrap_or(self.entries.len())
    }

    // Entries before the insertion point are exactly those the new entry does
    // not precede; the ordering invariant makes that a partition.
    fn search_position(&self, entry: &SettledEntry) -> usize {
        self.entries
            .partition_point(|existing| !entry.precedes(existing))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn entries(&self) -> &[SettledEntry] {
        &self.entries
    }

    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|entry| entry.value).collect()
    }

    pub fn into_values(self) -> Vec<u64> {
        self.entries.into_iter().map(|entry| entry.value).collect()
    }

    pub fn is_ordered(&self) -> bool {
        self.entries.windows(2).all(|w| w[0].precedes(&w[1]))
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::all_insertion_strategies;

    fn build(entries: &[(u64, usize)], strategy: InsertionStrategy) -> SettledSequence {
        let mut seq = SettledSequence::new();
        for &(value, index) in entries {
            seq.insert(SettledEntry::new(value, index), strategy);
        }
        seq
    }

    #[test]
    fn precedes_orders_by_value_then_index() {
        let a = SettledEntry::new(9, 4);
        let b = SettledEntry::new(7, 0);
        let c = SettledEntry::new(9, 5);
        assert!(a.precedes(&b));
        assert!(!b.precedes(&a));
        assert!(a.precedes(&c));
        assert!(!c.precedes(&a));
        assert!(!a.precedes(&a));
    }

    #[test]
    fn insert_keeps_value_desc_index_asc() {
        for &strategy in all_insertion_strategies() {
            let seq = build(&[(5, 3), (200, 2), (10, 0), (200, 1), (5, 4)], strategy);
            let got: Vec<_> = seq.entries().iter().map(|e| (e.value, e.index)).collect();
            assert_eq!(
                got,
                vec![(200, 1), (200, 2), (10, 0), (5, 3), (5, 4)],
                "strategy={}",
                strategy.label()
            );
            assert!(seq.is_ordered());
        }
    }

    #[test]
    fn empty_sequence() {
        let seq = SettledSequence::with_capacity(8);
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert!(seq.values().is_empty());
        assert!(seq.is_ordered());
    }

    #[test]
    fn strategies_agree_on_random_insertions() {
        let mut rng = StdRng::seed_from_u64(0x5EED_2026);
        for &size in &[1_usize, 2, 17, 64, 300] {
            let mut entries: Vec<(u64, usize)> =
                (0..size).map(|i| (rng.random_range(0..32), i)).collect();
            for i in (1..entries.len()).rev() {
                let j = rng.random_range(0..=i);
                entries.swap(i, j);
            }

            let scan = build(&entries, InsertionStrategy::LinearScan);
            let search = build(&entries, InsertionStrategy::BinarySearch);
            assert_eq!(scan, search, "size={size}");
            assert_eq!(scan.len(), size);
        }
    }

    #[test]
    fn into_values_drops_indices() {
        let seq = build(&[(1, 0), (3, 1), (2, 2)], InsertionStrategy::BinarySearch);
        assert_eq!(seq.values(), vec![3, 2, 1]);
        assert_eq!(seq.into_values(), vec![3, 2, 1]);
    }
}
