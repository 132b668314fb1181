//! Year-less calendar values
//!
//! SSIM dates are written as a two-digit day and a three-letter
//! month abbreviation, like "`20OCT`." They carry no year: the
//! year is implied by the scheduling season of the message.

use std::fmt;

use chrono::{Month, NaiveDate, Weekday};
use lazy_static::lazy_static;
use phf::phf_map;
use regex::Regex;

use crate::fields::FieldErr;

/// Month abbreviations known to SSIM
static MONTHS: phf::Map<&'static str, Month> = phf_map! {
    "JAN" => Month::January,
    "FEB" => Month::February,
    "MAR" => Month::March,
    "APR" => Month::April,
    "MAY" => Month::May,
    "JUN" => Month::June,
    "JUL" => Month::July,
    "AUG" => Month::August,
    "SEP" => Month::September,
    "OCT" => Month::October,
    "NOV" => Month::November,
    "DEC" => Month::December,
};

// indexed by month number, less one
const MONTH_CODES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

// SSIM day 1 is Monday
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A year-less date, like `20OCT`
///
/// ```
/// use chrono::Month;
/// use scrplace::DayMonth;
///
/// let date = DayMonth::parse("05MAY").unwrap();
/// assert_eq!(5, date.day());
/// assert_eq!(Month::May, date.month());
/// assert_eq!("05MAY", date.to_string());
///
/// assert!(DayMonth::parse("32MAY").is_err());
/// assert!(DayMonth::parse("05XYZ").is_err());
/// ```
///
/// The day is only checked against the range `1..=31`. Use
/// [`to_date()`](DayMonth::to_date) to check the date against
/// a real calendar year.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayMonth {
    day: u8,
    month: Month,
}

impl DayMonth {
    /// Parse from a five-character `DDMMM` token
    pub fn parse(token: &str) -> Result<Self, FieldErr> {
        lazy_static! {
            static ref RE: Regex = Regex::new(r"^([0-9]{2})([A-Z]{3})$").expect("bad DDMMM regexp");
        }

        let err = || FieldErr::DayMonth(token.to_owned());
        let caps = RE.captures(token).ok_or_else(err)?;
        let day: u8 = caps[1].parse().map_err(|_| err())?;
        let month = *MONTHS.get(&caps[2]).ok_or_else(err)?;
        if !(1..=31).contains(&day) {
            return Err(err());
        }

        Ok(Self { day, month })
    }

    /// Day of the month, from 1 to 31
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Month of the year
    pub fn month(&self) -> Month {
        self.month
    }

    /// Place this date in the given calendar `year`
    ///
    /// Returns `None` if the date does not exist in that year,
    /// like `31APR` in any year or `29FEB` outside of leap years.
    pub fn to_date(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month.number_from_month(), self.day as u32)
    }

    // sorts by month, then day
    fn sort_key(&self) -> (u32, u8) {
        (self.month.number_from_month(), self.day)
    }
}

impl PartialOrd for DayMonth {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DayMonth {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for DayMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = MONTH_CODES[self.month.number_from_month() as usize - 1];
        write!(f, "{:02}{}", self.day, code)
    }
}

/// Days of operation
///
/// A seven-character token with one position per weekday,
/// Monday first. A position holds its own weekday digit
/// (`1` for Monday … `7` for Sunday) when the flight operates
/// on that day, or a placeholder (`0` or `.`) when it does not.
///
/// The token is carried verbatim. It is not rejected when
/// malformed; see [`is_well_formed()`](DaysOfOperation::is_well_formed).
///
/// ```
/// use chrono::Weekday;
/// use scrplace::DaysOfOperation;
///
/// let days = DaysOfOperation::new("0034507");
/// assert!(days.is_well_formed());
///
/// let weekdays: Vec<Weekday> = days.weekdays().collect();
/// assert_eq!(
///     vec![Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sun],
///     weekdays
/// );
///
/// assert!(!DaysOfOperation::new("7000000").is_well_formed());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DaysOfOperation(String);

impl DaysOfOperation {
    /// Wrap a days-of-operation token
    pub fn new<S>(token: S) -> Self
    where
        S: Into<String>,
    {
        Self(token.into())
    }

    /// The token, as received
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if every position holds its weekday digit or a placeholder
    pub fn is_well_formed(&self) -> bool {
        self.0.chars().count() == WEEKDAYS.len()
            && self
                .0
                .chars()
                .enumerate()
                .all(|(i, c)| is_placeholder(c) || is_weekday_digit(i, c))
    }

    /// Iterate over the weekdays on which the flight operates
    ///
    /// Positions which do not hold their own weekday digit are
    /// skipped.
    pub fn weekdays(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0
            .chars()
            .zip(WEEKDAYS.iter())
            .enumerate()
            .filter(|(i, (c, _))| is_weekday_digit(*i, *c))
            .map(|(_, (_, wd))| *wd)
    }
}

impl fmt::Display for DaysOfOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl AsRef<str> for DaysOfOperation {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

fn is_placeholder(c: char) -> bool {
    c == '0' || c == '.'
}

fn is_weekday_digit(position: usize, c: char) -> bool {
    c.to_digit(10) == Some(position as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_month() {
        let date = DayMonth::parse("20OCT").expect("bad date");
        assert_eq!(20, date.day());
        assert_eq!(Month::October, date.month());
        assert_eq!("20OCT", format!("{}", date));

        assert_eq!(
            Err(FieldErr::DayMonth("00JAN".to_owned())),
            DayMonth::parse("00JAN")
        );

        for bad in ["1JAN", "01Jan", "01JANU", "AAJAN", "01 JAN", "", "01ÉÉÉ"] {
            assert!(DayMonth::parse(bad).is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_day_month_to_date() {
        let leap = DayMonth::parse("29FEB").unwrap();
        assert_eq!(NaiveDate::from_ymd_opt(2024, 2, 29), leap.to_date(2024));
        assert_eq!(None, leap.to_date(2025));

        assert_eq!(None, DayMonth::parse("31APR").unwrap().to_date(2024));
    }

    #[test]
    fn test_day_month_ordering() {
        let a = DayMonth::parse("31JAN").unwrap();
        let b = DayMonth::parse("01FEB").unwrap();
        let c = DayMonth::parse("15FEB").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a, DayMonth::parse("31JAN").unwrap());
    }

    #[test]
    fn test_months_codebook() {
        assert_eq!(MONTH_CODES.len(), MONTHS.len());
        for (i, code) in MONTH_CODES.iter().enumerate() {
            let month = MONTHS.get(code).expect("month missing from codebook");
            assert_eq!(i as u32 + 1, month.number_from_month());
        }
    }

    #[test]
    fn test_days_of_operation() {
        assert!(DaysOfOperation::new("1234567").is_well_formed());
        assert!(DaysOfOperation::new("1000000").is_well_formed());
        assert!(DaysOfOperation::new("1.3.5.7").is_well_formed());
        assert!(!DaysOfOperation::new("123456").is_well_formed());
        assert!(!DaysOfOperation::new("12345678").is_well_formed());
        assert!(!DaysOfOperation::new("2000000").is_well_formed());
        assert!(!DaysOfOperation::new("X000000").is_well_formed());

        let all: Vec<Weekday> = DaysOfOperation::new("1234567").weekdays().collect();
        assert_eq!(WEEKDAYS.to_vec(), all);

        let none = DaysOfOperation::new("0000000");
        assert_eq!(0, none.weekdays().count());
        assert_eq!("0000000", none.as_str());
    }
}
