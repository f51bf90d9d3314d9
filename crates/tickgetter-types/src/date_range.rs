//! Request window for tick retrieval.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Utc};

use crate::DateRangeError;

/// A half-open `[from, to)` window of UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl DateRange {
    /// Creates a new range, validating that `from < to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from >= to`.
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self, DateRangeError> {
        if from >= to {
            return Err(DateRangeError::NotIncreasing { from, to });
        }
        Ok(Self { from, to })
    }

    /// Creates a range spanning midnight UTC of `from` to midnight UTC of `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if `from` is not strictly before `to`.
    pub fn from_dates(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        Self::new(midnight_utc(from), midnight_utc(to))
    }

    /// Returns the inclusive start.
    #[must_use]
    pub const fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// Returns the exclusive end.
    #[must_use]
    pub const fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Returns true if the instant lies inside the window.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.from && instant < self.to
    }

    /// Returns `<y>_<m>_<d>_<y>_<m>_<d>` with unpadded numbers, as used in
    /// export file names.
    #[must_use]
    pub fn file_stamp(&self) -> String {
        format!(
            "{}_{}_{}_{}_{}_{}",
            self.from.year(),
            self.from.month(),
            self.from.day(),
            self.to.year(),
            self.to.month(),
            self.to.day()
        )
    }
}

impl Default for DateRange {
    /// The calendar year 2021.
    fn default() -> Self {
        // 2021-01-01T00:00:00Z and 2022-01-01T00:00:00Z
        Self {
            from: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(1_609_459_200),
            to: DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(1_640_995_200),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.from, self.to)
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_range_new() {
        let range = DateRange::from_dates(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert_eq!(range.from(), Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(range.to(), Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_date_range_rejects_reversed() {
        assert!(DateRange::from_dates(date(2024, 1, 31), date(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_date_range_rejects_empty() {
        let day = date(2024, 3, 5);
        let err = DateRange::from_dates(day, day).unwrap_err();
        assert!(matches!(err, DateRangeError::NotIncreasing { .. }));
    }

    #[test]
    fn test_contains_is_half_open() {
        let range = DateRange::from_dates(date(2024, 1, 1), date(2024, 1, 2)).unwrap();
        assert!(range.contains(range.from()));
        assert!(!range.contains(range.to()));
        assert!(range.contains(Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap()));
    }

    #[test]
    fn test_file_stamp_is_unpadded() {
        let range = DateRange::from_dates(date(2022, 12, 2), date(2023, 1, 19)).unwrap();
        assert_eq!(range.file_stamp(), "2022_12_2_2023_1_19");
    }

    #[test]
    fn test_default_is_2021() {
        let range = DateRange::default();
        assert_eq!(range.from().year(), 2021);
        assert_eq!(range.to().year(), 2022);
    }
}
