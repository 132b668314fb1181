//! Field extractors for slot data tokens
//!
//! SCR slot data lines are split on whitespace, but several of
//! the resulting tokens pack more than one field together. The
//! functions in this module split such a token into its
//! sub-fields. They are pure functions of the token.
//!
//! | Token       | Fields                                   |
//! |-------------|------------------------------------------|
//! | `NLO3924`   | action code `N`, flight designator       |
//! | `LO3924`    | carrier `LO`, flight number `3924`       |
//! | `20OCT26OCT`| effective date, termination date         |
//! | `082E75`    | configuration `082`, aircraft type `E75` |
//! | `HAM0700`   | departure from `HAM` at 07:00 UTC        |
//! | `0750FRA`   | arrival at `FRA` at 07:50 UTC            |
//!
//! Every extractor reports failure as a [`FieldErr`] which names
//! the offending token.

use std::convert::TryFrom;

use chrono::NaiveTime;
use lazy_static::lazy_static;
use log::trace;
use regex::Regex;
use thiserror::Error;

use crate::message::{ActionCode, Movement};

/// Failure to decode a slot data token
///
/// Each variant carries the offending (sub-)token.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum FieldErr {
    /// Slot data line does not have 6, 7, 8, or 9 tokens
    #[error("unexpected token count {0}")]
    UnexpectedTokenCount(usize),

    /// Action code is missing or unrecognized
    #[error("unparsable action code in \"{0}\"")]
    ActionCode(String),

    /// Flight designator does not split into carrier and flight number
    #[error("unparsable flight designator \"{0}\"")]
    FlightDesignator(String),

    /// Period of operation is not ten characters long
    #[error("unparsable period of operation \"{0}\": expected DDMMMDDMMM")]
    DateRange(String),

    /// Date does not match `DDMMM`
    #[error("unparsable date \"{0}\": expected DDMMM")]
    DayMonth(String),

    /// Date does not exist in the reference year
    #[error("invalid calendar date \"{0}\"")]
    InvalidDate(String),

    /// Termination date is before the effective date
    #[error("termination date precedes effective date in \"{0}\"")]
    ReversedPeriod(String),

    /// Token is neither airport-then-time nor time-then-airport
    #[error("unparsable time/airport \"{0}\"")]
    TimeAirport(String),

    /// Time is not a valid 24-hour `HHMM`
    #[error("invalid UTC time in \"{0}\"")]
    InvalidTime(String),

    /// Configuration/aircraft type is not six characters
    #[error("unparsable configuration/aircraft type \"{0}\"")]
    ConfigAircraft(String),

    /// Service type token has the wrong number of characters
    #[error("service type \"{0}\" should be {1} character(s) long")]
    ServiceTypeWidth(String, usize),

    /// Turnaround legs are both arrivals or both departures
    #[error("turnaround \"{0}\" and \"{1}\" must pair one arrival with one departure")]
    TurnaroundLegs(String, String),
}

impl FieldErr {
    /// The token that failed to decode
    ///
    /// For [`UnexpectedTokenCount`](FieldErr::UnexpectedTokenCount),
    /// which concerns the whole line, this is empty. For
    /// [`TurnaroundLegs`](FieldErr::TurnaroundLegs), this is the
    /// first of the two legs.
    pub fn token(&self) -> &str {
        match self {
            Self::UnexpectedTokenCount(_) => "",
            Self::ActionCode(t)
            | Self::FlightDesignator(t)
            | Self::DateRange(t)
            | Self::DayMonth(t)
            | Self::InvalidDate(t)
            | Self::ReversedPeriod(t)
            | Self::TimeAirport(t)
            | Self::InvalidTime(t)
            | Self::ConfigAircraft(t)
            | Self::ServiceTypeWidth(t, _)
            | Self::TurnaroundLegs(t, _) => t,
        }
    }
}

/// A decoded time/airport token
///
/// See [`split_time_airport()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeAirport<'t> {
    /// Departure or arrival, from the token layout
    pub movement: Movement,

    /// Three-letter airport code
    pub airport: &'t str,

    /// UTC time of the movement
    pub time: NaiveTime,

    /// Day-change indicator, for arrivals only
    pub day_change: u8,
}

/// Split the leading action code from a flight designator
///
/// Used when the action code is written without a space,
/// like `NLO3924`. The first character must be a recognized
/// [`ActionCode`]. The remainder is returned unchecked.
///
/// ```
/// use scrplace::ActionCode;
/// use scrplace::fields::split_action_code;
///
/// assert_eq!(Ok((ActionCode::New, "LO3924")), split_action_code("NLO3924"));
/// assert!(split_action_code("QLO3924").is_err());
/// ```
pub fn split_action_code(token: &str) -> Result<(ActionCode, &str), FieldErr> {
    let mut chars = token.chars();
    let code = chars
        .next()
        .and_then(|c| ActionCode::try_from(c).ok())
        .ok_or_else(|| FieldErr::ActionCode(token.to_owned()))?;
    Ok((code, chars.as_str()))
}

/// Parse a stand-alone, one-character action code token
pub fn parse_action_code(token: &str) -> Result<ActionCode, FieldErr> {
    match split_action_code(token)? {
        (code, "") => Ok(code),
        _ => Err(FieldErr::ActionCode(token.to_owned())),
    }
}

/// Split a flight designator into carrier code and flight number
///
/// The carrier code is two characters (the IATA airline
/// designator, which may contain one digit) unless that would
/// leave a letter leading the flight number. In that case the
/// carrier is taken as three letters. The flight number is one
/// to four digits with an optional letter suffix.
///
/// ```
/// use scrplace::fields::split_flight_designator;
///
/// assert_eq!(Ok(("LH", "4123")), split_flight_designator("LH4123"));
/// assert_eq!(Ok(("U2", "1234")), split_flight_designator("U21234"));
/// assert_eq!(Ok(("BAW", "123A")), split_flight_designator("BAW123A"));
/// assert!(split_flight_designator("LH").is_err());
/// ```
pub fn split_flight_designator(token: &str) -> Result<(&str, &str), FieldErr> {
    lazy_static! {
        static ref IATA_CARRIER: Regex =
            Regex::new(r"^([A-Z][A-Z0-9]|[0-9][A-Z])$").expect("bad carrier regexp");
        static ref ICAO_CARRIER: Regex = Regex::new(r"^[A-Z]{3}$").expect("bad carrier regexp");
        static ref FLIGHT_NUMBER: Regex =
            Regex::new(r"^[0-9]{1,4}[A-Z]?$").expect("bad flight number regexp");
    }

    for (split, carrier_re) in [(2, &*IATA_CARRIER), (3, &*ICAO_CARRIER)] {
        if let (Some(carrier), Some(number)) = (token.get(..split), token.get(split..)) {
            if carrier_re.is_match(carrier) && FLIGHT_NUMBER.is_match(number) {
                trace!("flight designator \"{}\": {}/{}", token, carrier, number);
                return Ok((carrier, number));
            }
        }
    }

    Err(FieldErr::FlightDesignator(token.to_owned()))
}

/// Split a period of operation into its two `DDMMM` halves
///
/// The token must be exactly ten ASCII characters. The halves
/// are not validated here.
pub fn split_date_range(token: &str) -> Result<(&str, &str), FieldErr> {
    if token.len() != 10 || !token.is_ascii() {
        return Err(FieldErr::DateRange(token.to_owned()));
    }
    Ok(token.split_at(5))
}

/// Split configuration and aircraft type
///
/// The token is six alphanumeric characters: three for the
/// configuration or seat count (zero-padded) followed by the
/// three-character aircraft type.
///
/// ```
/// use scrplace::fields::split_config_aircraft;
///
/// assert_eq!(Ok(("082", "E75")), split_config_aircraft("082E75"));
/// assert!(split_config_aircraft("82E75").is_err());
/// ```
pub fn split_config_aircraft(token: &str) -> Result<(&str, &str), FieldErr> {
    if token.len() != 6 || !token.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FieldErr::ConfigAircraft(token.to_owned()));
    }
    Ok(token.split_at(3))
}

/// Decode a time/airport token
///
/// The layout of the token decides the movement:
///
/// * airport first (`HAM0700`) is a **departure**;
/// * time first (`0750FRA`) is an **arrival**. Arrivals may
///   carry one trailing day-change digit, like `0750FRA1`.
///
/// Times are UTC in 24-hour `HHMM` format.
///
/// ```
/// use scrplace::Movement;
/// use scrplace::fields::split_time_airport;
///
/// let dep = split_time_airport("HAM0700").unwrap();
/// assert_eq!(Movement::Departure, dep.movement);
/// assert_eq!("HAM", dep.airport);
///
/// let arr = split_time_airport("0750FRA1").unwrap();
/// assert_eq!(Movement::Arrival, arr.movement);
/// assert_eq!("FRA", arr.airport);
/// assert_eq!(1, arr.day_change);
///
/// assert!(split_time_airport("2500FRA").is_err());
/// ```
pub fn split_time_airport(token: &str) -> Result<TimeAirport<'_>, FieldErr> {
    lazy_static! {
        static ref AIRPORT_FIRST: Regex =
            Regex::new(r"^([A-Z]{3})([0-9]{4})$").expect("bad departure regexp");
        static ref TIME_FIRST: Regex =
            Regex::new(r"^([0-9]{4})([A-Z]{3})([0-9])?$").expect("bad arrival regexp");
    }

    let (movement, airport, hhmm, day_change) = if let Some(caps) = AIRPORT_FIRST.captures(token)
    {
        let airport = caps.get(1).map_or("", |m| m.as_str());
        let hhmm = caps.get(2).map_or("", |m| m.as_str());
        (Movement::Departure, airport, hhmm, 0u8)
    } else if let Some(caps) = TIME_FIRST.captures(token) {
        let day_change = caps
            .get(3)
            .and_then(|m| m.as_str().parse::<u8>().ok())
            .unwrap_or(0);
        let hhmm = caps.get(1).map_or("", |m| m.as_str());
        let airport = caps.get(2).map_or("", |m| m.as_str());
        (Movement::Arrival, airport, hhmm, day_change)
    } else {
        return Err(FieldErr::TimeAirport(token.to_owned()));
    };

    let time = parse_hhmm(hhmm).ok_or_else(|| FieldErr::InvalidTime(token.to_owned()))?;

    trace!("time/airport \"{}\": {:?} {} {}", token, movement, airport, time);
    Ok(TimeAirport {
        movement,
        airport,
        time,
        day_change,
    })
}

// four ASCII digits → 24-hour time
fn parse_hhmm(hhmm: &str) -> Option<NaiveTime> {
    let hour = hhmm.get(0..2)?.parse().ok()?;
    let minute = hhmm.get(2..4)?.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}
