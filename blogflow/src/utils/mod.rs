//! Utility functions for clocks and timestamp handling.

mod clock;
pub mod timestamps;

pub use clock::{Clock, FixedClock, SystemClock};
pub use timestamps::{format_iso, iso_timestamp, synthesize_task_id, Timestamp, TASK_ID_PREFIX};

/// Counts whitespace-separated tokens.
///
/// # Examples
///
/// ```
/// assert_eq!(blogflow::utils::word_count("  one two\nthree\t"), 3);
/// assert_eq!(blogflow::utils::word_count(""), 0);
/// ```
#[must_use]
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
