//! Terminal result codes.
//!
//! Terminals report the outcome of the last request as a raw integer.
//! [`TerminalStatus::from_code`] is the only place those integers are
//! interpreted.

/// Request succeeded.
pub const RES_S_OK: i32 = 1;
/// Generic failure.
pub const RES_E_FAIL: i32 = -1;
/// Invalid request arguments.
pub const RES_E_INVALID_PARAMS: i32 = -2;
/// The requested range does not fit in terminal memory.
pub const RES_E_NO_MEMORY: i32 = -3;
/// The requested symbol does not exist.
pub const RES_E_NOT_FOUND: i32 = -4;
/// The terminal process is not running.
pub const RES_E_TERMINAL_NOT_RUNNING: i32 = -10001;

/// Outcome of a terminal request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalStatus {
    /// Request succeeded.
    Ok,
    /// The range holds too many ticks to copy at once.
    RangeTooLarge,
    /// The terminal is not running or not connected.
    TerminalNotRunning,
    /// Any other code.
    Other(i32),
}

impl TerminalStatus {
    /// Translates a raw terminal code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            RES_S_OK => Self::Ok,
            RES_E_NO_MEMORY => Self::RangeTooLarge,
            RES_E_TERMINAL_NOT_RUNNING => Self::TerminalNotRunning,
            other => Self::Other(other),
        }
    }

    /// Returns the raw code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Ok => RES_S_OK,
            Self::RangeTooLarge => RES_E_NO_MEMORY,
            Self::TerminalNotRunning => RES_E_TERMINAL_NOT_RUNNING,
            Self::Other(code) => code,
        }
    }

    /// Returns true for [`TerminalStatus::Ok`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::RangeTooLarge => write!(f, "range too large ({RES_E_NO_MEMORY})"),
            Self::TerminalNotRunning => {
                write!(f, "terminal not running ({RES_E_TERMINAL_NOT_RUNNING})")
            }
            Self::Other(code) => write!(f, "terminal error ({code})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code() {
        assert_eq!(TerminalStatus::from_code(1), TerminalStatus::Ok);
        assert_eq!(TerminalStatus::from_code(-3), TerminalStatus::RangeTooLarge);
        assert_eq!(
            TerminalStatus::from_code(-10001),
            TerminalStatus::TerminalNotRunning
        );
        assert_eq!(TerminalStatus::from_code(-4), TerminalStatus::Other(-4));
        assert_eq!(TerminalStatus::from_code(0), TerminalStatus::Other(0));
    }

    #[test]
    fn test_code_round_trips() {
        for code in [RES_S_OK, RES_E_FAIL, RES_E_INVALID_PARAMS, RES_E_NO_MEMORY, -10001] {
            assert_eq!(TerminalStatus::from_code(code).code(), code);
        }
    }
}
