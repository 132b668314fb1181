//! Period of operation

use std::fmt;

use log::trace;

use crate::calendar::DayMonth;
use crate::fields::{split_date_range, FieldErr};

/// Default reference year for year-less dates
///
/// A leap year, so that `29FEB` is a valid date.
pub const DEFAULT_REFERENCE_YEAR: i32 = 2024;

/// The date range over which a flight pattern is valid
///
/// Written on the wire as ten characters: the effective date
/// followed by the termination date, like `01JUL26JUL`. Both
/// dates are inclusive.
///
/// ```
/// use scrplace::PeriodOfOperation;
///
/// let period = PeriodOfOperation::parse("01JUL26JUL").unwrap();
/// assert_eq!("01JUL", period.effective().to_string());
/// assert_eq!("26JUL", period.termination().to_string());
/// assert_eq!(25, period.duration_days());
/// assert_eq!("01JUL26JUL", period.to_string());
///
/// // termination must not precede the effective date
/// assert!(PeriodOfOperation::parse("26JUL01JUL").is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PeriodOfOperation {
    effective: DayMonth,
    termination: DayMonth,
    duration_days: u32,
}

impl PeriodOfOperation {
    /// Parse in the [default reference year](DEFAULT_REFERENCE_YEAR)
    pub fn parse(token: &str) -> Result<Self, FieldErr> {
        Self::parse_in_year(token, DEFAULT_REFERENCE_YEAR)
    }

    /// Parse, mapping both dates onto the given calendar `year`
    ///
    /// SSIM dates carry no year. Both dates must exist in `year`,
    /// and the effective date must not come after the
    /// termination date.
    pub fn parse_in_year(token: &str, year: i32) -> Result<Self, FieldErr> {
        let (from, to) = split_date_range(token)?;
        let effective = DayMonth::parse(from)?;
        let termination = DayMonth::parse(to)?;

        let from_date = effective
            .to_date(year)
            .ok_or_else(|| FieldErr::InvalidDate(from.to_owned()))?;
        let to_date = termination
            .to_date(year)
            .ok_or_else(|| FieldErr::InvalidDate(to.to_owned()))?;

        let days = to_date.signed_duration_since(from_date).num_days();
        if days < 0 {
            return Err(FieldErr::ReversedPeriod(token.to_owned()));
        }

        trace!("period \"{}\": {} days in {}", token, days, year);
        Ok(Self {
            effective,
            termination,
            duration_days: days as u32,
        })
    }

    /// First day of operation
    pub fn effective(&self) -> DayMonth {
        self.effective
    }

    /// Last day of operation
    pub fn termination(&self) -> DayMonth {
        self.termination
    }

    /// Whole days from the effective date to the termination date
    ///
    /// Zero for a single-day period.
    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    /// True if `date` falls within this period, inclusive
    pub fn contains(&self, date: DayMonth) -> bool {
        self.effective <= date && date <= self.termination
    }
}

impl fmt::Display for PeriodOfOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.effective, self.termination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let single = PeriodOfOperation::parse("20OCT20OCT").expect("bad period");
        assert_eq!(0, single.duration_days());
        assert_eq!(single.effective(), single.termination());

        let across = PeriodOfOperation::parse("30MAR26OCT").expect("bad period");
        assert_eq!(210, across.duration_days());

        let leap = PeriodOfOperation::parse("28FEB01MAR").expect("bad period");
        assert_eq!(2, leap.duration_days());
        assert_eq!(
            Err(FieldErr::InvalidDate("29FEB".to_owned())),
            PeriodOfOperation::parse_in_year("29FEB01MAR", 2025)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Err(FieldErr::DateRange("01JUL26JU".to_owned())),
            PeriodOfOperation::parse("01JUL26JU")
        );
        assert_eq!(
            Err(FieldErr::DayMonth("01XXX".to_owned())),
            PeriodOfOperation::parse("01XXX26JUL")
        );
        assert_eq!(
            Err(FieldErr::DayMonth("32JUL".to_owned())),
            PeriodOfOperation::parse("01JUL32JUL")
        );
        assert_eq!(
            Err(FieldErr::InvalidDate("31JUN".to_owned())),
            PeriodOfOperation::parse("01JUN31JUN")
        );
        assert_eq!(
            Err(FieldErr::ReversedPeriod("02JUL01JUL".to_owned())),
            PeriodOfOperation::parse("02JUL01JUL")
        );
    }

    #[test]
    fn test_contains() {
        let period = PeriodOfOperation::parse("01JUL26JUL").unwrap();
        assert!(period.contains(DayMonth::parse("01JUL").unwrap()));
        assert!(period.contains(DayMonth::parse("15JUL").unwrap()));
        assert!(period.contains(DayMonth::parse("26JUL").unwrap()));
        assert!(!period.contains(DayMonth::parse("27JUL").unwrap()));
        assert!(!period.contains(DayMonth::parse("30JUN").unwrap()));
    }
}
