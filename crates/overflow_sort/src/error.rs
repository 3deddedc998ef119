use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverflowSortError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// The seeded working value of `value` cannot be doubled inside `u128`.
    #[error("numeric overflow: working value for {value} does not fit the doubling width")]
    NumericOverflow { value: u64 },
}

impl OverflowSortError {
    pub(crate) fn negative_threshold(threshold: i64) -> Self {
        Self::InvalidInput {
            reason: format!("threshold must be non-negative, got {threshold}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, OverflowSortError>;
