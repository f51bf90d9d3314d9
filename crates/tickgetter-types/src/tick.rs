//! Tick data representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single tick as reported by the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Timestamp of the tick (UTC, millisecond precision).
    pub timestamp: DateTime<Utc>,
    /// Bid price.
    pub bid: f64,
    /// Ask (offer) price.
    pub ask: f64,
    /// Price of the last deal, zero for quote-only instruments.
    pub last: f64,
    /// Volume of the last deal.
    pub volume: f64,
    /// Terminal tick flags (which fields changed).
    pub flags: u32,
}

impl Tick {
    /// Column names in the order every formatter writes them.
    pub const COLUMNS: [&'static str; 6] = ["timestamp", "bid", "ask", "last", "volume", "flags"];

    /// Creates a new quote tick with no deal information.
    #[must_use]
    pub const fn new(timestamp: DateTime<Utc>, bid: f64, ask: f64) -> Self {
        Self {
            timestamp,
            bid,
            ask,
            last: 0.0,
            volume: 0.0,
            flags: 0,
        }
    }

    /// Sets the last deal price and volume.
    #[must_use]
    pub const fn with_deal(mut self, last: f64, volume: f64) -> Self {
        self.last = last;
        self.volume = volume;
        self
    }

    /// Sets the tick flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_builders() {
        let tick = Tick::new(Utc::now(), 1.0, 1.1)
            .with_deal(1.05, 3.0)
            .with_flags(6);
        assert_eq!(tick.last, 1.05);
        assert_eq!(tick.volume, 3.0);
        assert_eq!(tick.flags, 6);
    }
}
