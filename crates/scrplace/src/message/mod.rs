//! Decoded SCR messages

mod action;
mod record;
mod service;

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::assembler::{decode, ParseError};
use crate::calendar::DayMonth;

pub use action::{ActionCode, UnrecognizedActionCode};
pub use record::{Leg, Movement, SlotRecord};
pub use service::{ServiceType, UnrecognizedServiceType};

pub(crate) use record::slot_key;

/// A decoded Slot Clearance Request message
///
/// An SCR message opens with a header:
///
/// ```txt
/// SCR
/// S25
/// 15OCT
/// KRK
/// ```
///
/// which gives the message identifier, the scheduling season,
/// the creation date, and the coordinated airport. Free-form
/// administrative lines may follow. The body contains slot
/// data lines and `GI`/`SI` annotations.
///
/// Messages are produced by an [`Assembler`](crate::Assembler)
/// or parsed directly:
///
/// ```
/// use scrplace::{Message, Movement};
///
/// let msg: Message = "SCR\nS25\n15OCT\nKRK\n\
///                     NLO3924 20OCT20OCT 1000000 082E75 1625WAW J\n\
///                     GI BRGDS"
///     .parse()
///     .unwrap();
///
/// assert_eq!(Some("SCR"), msg.identifier());
/// assert_eq!(Some("S25"), msg.season_code());
/// assert_eq!(Some("KRK"), msg.airport_code());
/// assert_eq!("15OCT", msg.message_date().unwrap().to_string());
/// assert_eq!("BRGDS", msg.general_info());
///
/// let rec = &msg.records()[0];
/// assert_eq!("LO", rec.carrier_code());
/// assert_eq!(Movement::Arrival, rec.movement());
/// ```
///
/// Parsing a `Message` discards validation issues. Use
/// [`decode()`](crate::decode) to keep them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Message {
    pub(crate) identifier: Option<String>,
    pub(crate) season: Option<String>,
    pub(crate) message_date: Option<DayMonth>,
    pub(crate) airport_code: Option<String>,
    pub(crate) administrative_lines: Vec<String>,
    pub(crate) records: Vec<SlotRecord>,
    pub(crate) general_info: String,
    pub(crate) special_info: String,
}

impl Message {
    /// Message identifier, normally `SCR`
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Season token, as received, like `S25`
    pub fn season_code(&self) -> Option<&str> {
        self.season.as_deref()
    }

    /// Scheduling season
    ///
    /// Returns `None` if the header lacks a season.
    pub fn season(&self) -> Option<Season> {
        self.season.as_deref().and_then(Season::parse)
    }

    /// Message creation date
    pub fn message_date(&self) -> Option<DayMonth> {
        self.message_date
    }

    /// Coordinated (clearance) airport
    pub fn airport_code(&self) -> Option<&str> {
        self.airport_code.as_deref()
    }

    /// Free-form header lines, in order
    pub fn administrative_lines(&self) -> &[String] {
        &self.administrative_lines
    }

    /// Slot records, in order of appearance
    pub fn records(&self) -> &[SlotRecord] {
        &self.records
    }

    /// General information (`GI`) text
    ///
    /// The trimmed text of every `GI` line, joined with a space.
    pub fn general_info(&self) -> &str {
        &self.general_info
    }

    /// Special information (`SI`) text
    pub fn special_info(&self) -> &str {
        &self.special_info
    }
}

impl FromStr for Message {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s.lines()).map(|decoded| decoded.message)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_missing = |v: Option<&str>| v.unwrap_or("(missing)").to_owned();

        writeln!(f, "{}", or_missing(self.identifier()))?;
        match (self.season_code(), self.season()) {
            (Some(code), Some(season)) => writeln!(f, "Season: {} ({})", code, season)?,
            (code, _) => writeln!(f, "Season: {}", or_missing(code))?,
        }
        match self.message_date {
            Some(date) => writeln!(f, "Date: {}", date)?,
            None => writeln!(f, "Date: (missing)")?,
        }
        writeln!(f, "Airport: {}", or_missing(self.airport_code()))?;

        for line in &self.administrative_lines {
            writeln!(f, "  {}", line)?;
        }
        for rec in &self.records {
            writeln!(f, "{}", rec)?;
        }
        if !self.general_info.is_empty() {
            writeln!(f, "GI: {}", self.general_info)?;
        }
        if !self.special_info.is_empty() {
            writeln!(f, "SI: {}", self.special_info)?;
        }
        Ok(())
    }
}

/// Kind of scheduling season
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SeasonKind {
    /// IATA summer season, from late March to late October
    Summer,

    /// IATA winter season, from late October to late March
    Winter,
}

/// IATA scheduling season, like `S25` or `W24`
///
/// ```
/// use scrplace::{Season, SeasonKind};
///
/// let season = Season::parse("W24").unwrap();
/// assert_eq!(SeasonKind::Winter, season.kind);
/// assert_eq!(2024, season.year);
/// assert_eq!("Winter 2024", season.to_string());
///
/// assert!(Season::parse("X24").is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Season {
    /// Summer or winter
    pub kind: SeasonKind,

    /// Calendar year in which the season starts
    pub year: i32,
}

impl Season {
    /// Parse a three-character season token
    pub fn parse(token: &str) -> Option<Self> {
        lazy_static! {
            static ref SEASON: Regex = Regex::new(r"^([SW])([0-9]{2})$").expect("bad season regexp");
        }

        let caps = SEASON.captures(token)?;
        let kind = match &caps[1] {
            "S" => SeasonKind::Summer,
            _ => SeasonKind::Winter,
        };
        let yy: i32 = caps[2].parse().ok()?;
        Some(Self {
            kind,
            year: 2000 + yy,
        })
    }

    /// True if `token` looks like a season
    pub fn is_season_token(token: &str) -> bool {
        Self::parse(token).is_some()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SeasonKind::Summer => write!(f, "Summer {}", self.year),
            SeasonKind::Winter => write!(f, "Winter {}", self.year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season() {
        assert_eq!(
            Some(Season {
                kind: SeasonKind::Summer,
                year: 2025
            }),
            Season::parse("S25")
        );
        for bad in ["S2", "S250", "s25", "W2X", "", "SCR"] {
            assert!(Season::parse(bad).is_none(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_message_display() {
        let msg = Message {
            identifier: Some("SCR".to_owned()),
            season: Some("S25".to_owned()),
            message_date: None,
            airport_code: Some("KRK".to_owned()),
            administrative_lines: vec!["/REF 1234".to_owned()],
            general_info: "BRGDS".to_owned(),
            ..Default::default()
        };

        let out = msg.to_string();
        assert!(out.starts_with("SCR\nSeason: S25 (Summer 2025)\nDate: (missing)\nAirport: KRK\n"));
        assert!(out.contains("  /REF 1234\n"));
        assert!(out.ends_with("GI: BRGDS\n"));
        assert!(!out.contains("SI:"));
    }
}
