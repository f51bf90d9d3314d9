//! Per-symbol tick batches.

use crate::{DateRange, Tick};

/// Ticks fetched for one symbol over one request window.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTicks {
    /// Symbol name.
    pub symbol: String,
    /// The ticks, in terminal order.
    pub ticks: Vec<Tick>,
    /// The window the ticks were requested for.
    pub range: DateRange,
    /// Broker label (company name without whitespace).
    pub broker: String,
}

impl SymbolTicks {
    /// Creates a new batch.
    #[must_use]
    pub fn new(
        symbol: impl Into<String>,
        ticks: Vec<Tick>,
        range: DateRange,
        broker: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            ticks,
            range,
            broker: broker.into(),
        }
    }

    /// Returns the number of ticks in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Returns true if the batch holds no ticks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    /// Returns `<symbol>_<broker>_<range stamp>.<extension>`.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!(
            "{}_{}_{}.{}",
            self.symbol,
            self.broker,
            self.range.file_stamp(),
            extension
        )
    }
}

/// Strips all whitespace from a company name.
#[must_use]
pub fn broker_label(company: &str) -> String {
    company.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_broker_label() {
        assert_eq!(broker_label("FBS Markets Inc."), "FBSMarketsInc.");
        assert_eq!(broker_label("  Alpari \t Ltd "), "AlpariLtd");
        assert_eq!(broker_label(""), "");
    }

    #[test]
    fn test_file_name() {
        let range = DateRange::from_dates(
            NaiveDate::from_ymd_opt(2022, 12, 2).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 19).unwrap(),
        )
        .unwrap();
        let batch = SymbolTicks::new("AUDCAD", Vec::new(), range, "FBS");
        assert_eq!(batch.file_name("xlsx"), "AUDCAD_FBS_2022_12_2_2023_1_19.xlsx");
        assert!(batch.is_empty());
    }
}
