use crate::error::{OverflowSortError, Result};

/// One-byte bound doubled once before comparison.
pub const DEFAULT_THRESHOLD: u64 = 255;
pub const DEFAULT_COUNT: usize = 100;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SortConfig {
    pub threshold: u64,
    pub count: usize,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            count: DEFAULT_COUNT,
        }
    }
}

impl SortConfig {
    pub fn new(threshold: u64, count: usize) -> Self {
        Self { threshold, count }
    }

    /// Builds a config from a signed threshold, rejecting negative values.
    pub fn try_new(threshold: i64, count: usize) -> Result<Self> {
        Ok(Self::new(validate_threshold(threshold)?, count))
    }
}

pub fn validate_threshold(threshold: i64) -> Result<u64> {
    u64::try_from(threshold).map_err(|_| OverflowSortError::negative_threshold(threshold))
}
