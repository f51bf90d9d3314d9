//! Error types shared across tickgetter crates.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Error for invalid date ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// Start is not strictly earlier than end.
    #[error("Invalid date range: {from} is not earlier than {to}")]
    NotIncreasing {
        /// The requested start.
        from: DateTime<Utc>,
        /// The requested end.
        to: DateTime<Utc>,
    },
}
