mod config;
mod error;
mod report;
mod schedule;
mod settled;
mod sorter;
mod source;
mod trace;

pub use config::{DEFAULT_COUNT, DEFAULT_THRESHOLD, SortConfig, validate_threshold};
pub use error::{OverflowSortError, Result};
pub use report::{format_sequence, render_report};
pub use schedule::{
    DEFAULT_MAX_ROUNDS, Seeding, TickEntry, TickOrder, settlement_rounds, tick_order,
};
pub use settled::{InsertionStrategy, SettledEntry, SettledSequence};
pub use sorter::{OverflowSorter, max_rounds, overflow_sort, try_overflow_sort};
pub use source::{Distribution, generate, sample};
pub use trace::{RoundRecord, SortTrace};

pub const ALL_INSERTION_STRATEGIES: [InsertionStrategy; 2] =
    [InsertionStrategy::LinearScan, InsertionStrategy::BinarySearch];

pub fn all_insertion_strategies() -> &'static [InsertionStrategy] {
    &ALL_INSERTION_STRATEGIES
}
