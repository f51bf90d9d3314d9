//! Interactive prompts and argument parsing shared by commands.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use inquire::{MultiSelect, Select};
use tickgetter_lib::{AccountBook, DateRange};

/// Returns the given account key, or asks for one.
pub(crate) fn account_key(accounts: &AccountBook, given: Option<&str>) -> Result<String> {
    if let Some(key) = given {
        return Ok(key.to_string());
    }
    if accounts.is_empty() {
        bail!("No accounts configured. Add an [accounts.<key>] table to the config file.");
    }

    let keys: Vec<String> = accounts.keys().map(str::to_string).collect();
    Select::new("Select an account:", keys)
        .prompt()
        .context("Account selection cancelled")
}

/// Returns the given symbols, or asks the user to pick from `available`.
pub(crate) fn symbols(given: Vec<String>, available: Vec<String>) -> Result<Vec<String>> {
    if !given.is_empty() {
        return Ok(given);
    }

    let picked = MultiSelect::new("Select symbols to fetch:", available)
        .prompt()
        .context("Symbol selection cancelled")?;
    if picked.is_empty() {
        bail!("No symbols selected");
    }
    Ok(picked)
}

/// Parses a `YYYY-MM-DD` date.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("Invalid date: {s}"))
}

/// Builds the request window; missing ends fall back to the default window.
pub(crate) fn date_range(from: Option<&str>, to: Option<&str>) -> Result<DateRange> {
    let default = DateRange::default();
    let from = match from {
        Some(s) => parse_date(s)?,
        None => default.from().date_naive(),
    };
    let to = match to {
        Some(s) => parse_date(s)?,
        None => default.to().date_naive(),
    };
    Ok(DateRange::from_dates(from, to)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2022-12-02").unwrap(),
            NaiveDate::from_ymd_opt(2022, 12, 2).unwrap()
        );
        assert!(parse_date("02.12.2022").is_err());
    }

    #[test]
    fn test_date_range_defaults() {
        assert_eq!(date_range(None, None).unwrap(), DateRange::default());

        let range = date_range(Some("2021-06-01"), None).unwrap();
        assert_eq!(range.file_stamp(), "2021_6_1_2022_1_1");
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        assert!(date_range(Some("2023-01-19"), Some("2022-12-02")).is_err());
    }

    #[test]
    fn test_given_values_skip_prompts() {
        let accounts = AccountBook::new();
        assert_eq!(account_key(&accounts, Some("demo")).unwrap(), "demo");
        assert_eq!(
            symbols(vec!["EURUSD".to_string()], Vec::new()).unwrap(),
            ["EURUSD"]
        );
    }

    #[test]
    fn test_no_accounts_configured() {
        assert!(account_key(&AccountBook::new(), None).is_err());
    }
}
