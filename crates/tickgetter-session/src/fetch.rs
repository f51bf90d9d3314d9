//! Sequential per-symbol tick download.

use std::vec;

use tickgetter_terminal::{Terminal, TerminalStatus};
use tickgetter_types::{DateRange, SymbolTicks};

use crate::Session;

/// Result of fetching one symbol.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Ticks were received.
    Fetched(SymbolTicks),
    /// The symbol exists but the range holds no ticks.
    NoTicks {
        /// Symbol name.
        symbol: String,
    },
    /// A transient terminal condition; the symbol was skipped.
    Skipped {
        /// Symbol name.
        symbol: String,
        /// Why it was skipped.
        status: TerminalStatus,
    },
    /// The terminal reported an error for this symbol.
    Failed {
        /// Symbol name.
        symbol: String,
        /// Reported status.
        status: TerminalStatus,
    },
}

impl FetchOutcome {
    /// Returns the symbol this outcome is about.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Fetched(batch) => &batch.symbol,
            Self::NoTicks { symbol }
            | Self::Skipped { symbol, .. }
            | Self::Failed { symbol, .. } => symbol,
        }
    }

    /// Returns true if ticks were received.
    #[must_use]
    pub const fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }
}

/// Totals for a completed fetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Symbols queued after validation.
    pub requested: usize,
    /// Symbols for which ticks were received.
    pub fetched: usize,
    /// Total ticks received.
    pub ticks: usize,
    /// Symbols dropped by validation.
    pub rejected: Vec<String>,
    /// Symbols with no ticks or a terminal error.
    pub not_found: Vec<String>,
    /// Symbols skipped on a transient terminal condition.
    pub skipped: Vec<(String, TerminalStatus)>,
}

/// A one-shot run over a queue of symbols.
///
/// Each call to `next` requests exactly one symbol's ticks, in queue order.
/// A failing symbol never stops the run. Once exhausted the run logs its
/// totals and yields nothing more.
#[derive(Debug)]
pub struct FetchRun<'a, T: Terminal> {
    session: &'a mut Session<T>,
    queue: vec::IntoIter<String>,
    range: DateRange,
    broker: String,
    rejected: Vec<String>,
    not_found: Vec<String>,
    skipped: Vec<(String, TerminalStatus)>,
    finished: bool,
}

impl<'a, T: Terminal> FetchRun<'a, T> {
    /// Creates a run over already validated symbols.
    pub(crate) fn new(
        session: &'a mut Session<T>,
        queue: Vec<String>,
        rejected: Vec<String>,
        range: DateRange,
    ) -> Self {
        let broker = session.broker();
        tracing::info!("Symbols in the queue - {queue:?}");
        Self {
            session,
            queue: queue.into_iter(),
            range,
            broker,
            rejected,
            not_found: Vec::new(),
            skipped: Vec::new(),
            finished: false,
        }
    }

    /// Returns the request window of this run.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    /// Returns the number of symbols still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Returns the symbols dropped by validation.
    #[must_use]
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }

    /// Returns the symbols recorded as not found so far.
    #[must_use]
    pub fn not_found(&self) -> &[String] {
        &self.not_found
    }

    /// Returns the symbols skipped so far.
    #[must_use]
    pub fn skipped(&self) -> &[(String, TerminalStatus)] {
        &self.skipped
    }

    /// Consumes the run, returning `(rejected, not_found, skipped)`.
    #[must_use]
    pub fn into_lists(self) -> (Vec<String>, Vec<String>, Vec<(String, TerminalStatus)>) {
        (self.rejected, self.not_found, self.skipped)
    }

    fn fetch_one(&mut self, symbol: String) -> FetchOutcome {
        tracing::info!(
            "Parsing ticks of {symbol} from date {} to {}",
            self.range.from(),
            self.range.to()
        );
        let response = self
            .session
            .terminal_mut()
            .request_ticks(&symbol, &self.range);

        match response.status {
            TerminalStatus::Ok if !response.ticks.is_empty() => {
                tracing::info!("Ticks received: {}", response.ticks.len());
                FetchOutcome::Fetched(SymbolTicks::new(
                    symbol,
                    response.ticks,
                    self.range,
                    self.broker.clone(),
                ))
            }
            TerminalStatus::Ok => {
                tracing::warn!("Symbol {symbol} found but no ticks received");
                self.not_found.push(symbol.clone());
                FetchOutcome::NoTicks { symbol }
            }
            status @ TerminalStatus::RangeTooLarge => {
                tracing::warn!("Ticks of {symbol} do not fit in one request, skipping");
                self.skip(symbol, status)
            }
            status @ TerminalStatus::TerminalNotRunning => {
                tracing::warn!("Terminal is not launched, skipping {symbol}");
                self.skip(symbol, status)
            }
            status @ TerminalStatus::Other(_) => {
                tracing::error!("Can't get ticks from {symbol}; last error - {status}");
                self.not_found.push(symbol.clone());
                FetchOutcome::Failed { symbol, status }
            }
        }
    }

    fn skip(&mut self, symbol: String, status: TerminalStatus) -> FetchOutcome {
        self.skipped.push((symbol.clone(), status));
        FetchOutcome::Skipped { symbol, status }
    }

    fn finish(&mut self) {
        self.finished = true;
        tracing::info!("Done parsing ticks");
        if !self.not_found.is_empty() {
            tracing::info!("Ticks not found for symbols: {:?}", self.not_found);
        }
    }
}

impl<T: Terminal> Iterator for FetchRun<'_, T> {
    type Item = FetchOutcome;

    fn next(&mut self) -> Option<Self::Item> {
        match self.queue.next() {
            Some(symbol) => Some(self.fetch_one(symbol)),
            None => {
                if !self.finished {
                    self.finish();
                }
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.queue.len();
        (remaining, Some(remaining))
    }
}

impl<T: Terminal> ExactSizeIterator for FetchRun<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::path::PathBuf;
    use tickgetter_terminal::MemoryTerminal;
    use tickgetter_terminal::status::{RES_E_NO_MEMORY, RES_E_TERMINAL_NOT_RUNNING};
    use tickgetter_types::{Credentials, Tick};

    fn january() -> DateRange {
        DateRange::from_dates(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        )
        .unwrap()
    }

    fn ticks(n: usize) -> Vec<Tick> {
        (0..n)
            .map(|i| {
                let ts = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, i as u32).unwrap();
                Tick::new(ts, 1.1, 1.1002)
            })
            .collect()
    }

    fn logged_in(terminal: MemoryTerminal) -> Session<MemoryTerminal> {
        let mut session = Session::new(terminal);
        session
            .login(&Credentials {
                name: "Demo".to_string(),
                login: 1,
                password: "secret".to_string(),
                server: "Demo-Server".to_string(),
                path: PathBuf::from("memory"),
            })
            .unwrap();
        session
    }

    fn queue(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_outcomes_per_status() {
        let mut session = logged_in(
            MemoryTerminal::new("Demo Broker")
                .with_symbol("A")
                .with_symbol("EMPTY")
                .with_symbol("BIG")
                .with_symbol("DOWN")
                .with_symbol("BAD")
                .with_ticks("A", ticks(3))
                .with_status("BIG", RES_E_NO_MEMORY)
                .with_status("DOWN", RES_E_TERMINAL_NOT_RUNNING)
                .with_status("BAD", -2),
        );

        let mut run = FetchRun::new(
            &mut session,
            queue(&["A", "EMPTY", "BIG", "DOWN", "BAD"]),
            Vec::new(),
            january(),
        );
        assert_eq!(run.len(), 5);
        let outcomes: Vec<_> = run.by_ref().collect();

        match &outcomes[0] {
            FetchOutcome::Fetched(batch) => {
                assert_eq!(batch.symbol, "A");
                assert_eq!(batch.len(), 3);
                assert_eq!(batch.broker, "DemoBroker");
                assert_eq!(batch.range, january());
            }
            other => panic!("expected ticks, got {other:?}"),
        }
        assert_eq!(
            outcomes[1],
            FetchOutcome::NoTicks {
                symbol: "EMPTY".to_string()
            }
        );
        assert_eq!(
            outcomes[2],
            FetchOutcome::Skipped {
                symbol: "BIG".to_string(),
                status: TerminalStatus::RangeTooLarge
            }
        );
        assert_eq!(
            outcomes[3],
            FetchOutcome::Skipped {
                symbol: "DOWN".to_string(),
                status: TerminalStatus::TerminalNotRunning
            }
        );
        assert_eq!(
            outcomes[4],
            FetchOutcome::Failed {
                symbol: "BAD".to_string(),
                status: TerminalStatus::Other(-2)
            }
        );

        assert_eq!(run.not_found(), ["EMPTY", "BAD"]);
        assert_eq!(run.skipped().len(), 2);
        assert!(run.next().is_none());
    }

    #[test]
    fn test_requests_in_input_order() {
        let mut session = logged_in(
            MemoryTerminal::new("Demo")
                .with_symbol("C")
                .with_symbol("A")
                .with_symbol("B"),
        );

        let run = FetchRun::new(&mut session, queue(&["B", "C", "A", "B"]), Vec::new(), january());
        assert_eq!(run.count(), 4);
        assert_eq!(session.terminal().requests(), ["B", "C", "A", "B"]);
    }

    #[test]
    fn test_lazy_one_request_per_step() {
        let mut session = logged_in(
            MemoryTerminal::new("Demo")
                .with_symbol("A")
                .with_symbol("B")
                .with_ticks("A", ticks(1)),
        );

        let mut run = FetchRun::new(&mut session, queue(&["A", "B"]), Vec::new(), january());
        assert!(run.next().unwrap().is_fetched());
        assert_eq!(run.remaining(), 1);
        drop(run);
        assert_eq!(session.terminal().requests(), ["A"]);
    }

    #[test]
    fn test_symbol_accessor() {
        let outcome = FetchOutcome::Skipped {
            symbol: "X".to_string(),
            status: TerminalStatus::RangeTooLarge,
        };
        assert_eq!(outcome.symbol(), "X");
        assert!(!outcome.is_fetched());
    }
}
