//! Slot records

use std::convert::TryFrom;
use std::fmt;

use chrono::NaiveTime;

use super::{ActionCode, ServiceType, UnrecognizedServiceType};
use crate::calendar::DaysOfOperation;
use crate::period::PeriodOfOperation;

/// Direction of a flight leg, relative to its airport
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Movement {
    /// Leaving the airport
    Departure,

    /// Landing at the airport
    Arrival,
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Movement::Departure => "departure".fmt(f),
            Movement::Arrival => "arrival".fmt(f),
        }
    }
}

/// The airport and UTC time of one leg
///
/// A slot record describes either a departure or an arrival,
/// never both.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Leg {
    /// Departure from `airport` at `time`
    Departure {
        /// Three-letter airport code
        airport: String,

        /// UTC departure time
        time: NaiveTime,
    },

    /// Arrival at `airport` at `time`
    Arrival {
        /// Three-letter airport code
        airport: String,

        /// UTC arrival time
        time: NaiveTime,

        /// Days between the departure and the arrival, usually 0
        day_change: u8,
    },
}

impl Leg {
    /// Departure or arrival
    pub fn movement(&self) -> Movement {
        match self {
            Leg::Departure { .. } => Movement::Departure,
            Leg::Arrival { .. } => Movement::Arrival,
        }
    }

    /// Airport code
    pub fn airport(&self) -> &str {
        match self {
            Leg::Departure { airport, .. } | Leg::Arrival { airport, .. } => airport,
        }
    }

    /// UTC time
    pub fn time(&self) -> NaiveTime {
        match self {
            Leg::Departure { time, .. } | Leg::Arrival { time, .. } => *time,
        }
    }
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Departure { airport, time } => {
                write!(f, "DEP {} {}", airport, time.format("%H%M"))
            }
            Leg::Arrival {
                airport,
                time,
                day_change: 0,
            } => write!(f, "ARR {} {}", airport, time.format("%H%M")),
            Leg::Arrival {
                airport,
                time,
                day_change,
            } => write!(f, "ARR {} {}+{}", airport, time.format("%H%M"), day_change),
        }
    }
}

/// One leg of one flight's slot transaction
///
/// Produced by decoding a slot data line. A turnaround line
/// yields two records which share the action code, period,
/// days of operation, and equipment.
///
/// Records are immutable once decoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRecord {
    pub(crate) action_code: ActionCode,
    pub(crate) carrier_code: String,
    pub(crate) flight_number: String,
    pub(crate) period: PeriodOfOperation,
    pub(crate) days_of_operation: DaysOfOperation,
    pub(crate) configuration: String,
    pub(crate) aircraft_type: String,
    pub(crate) service_type: char,
    pub(crate) leg: Leg,
    pub(crate) line_number: usize,
    pub(crate) raw_line: String,
    pub(crate) slot_key: String,
}

impl SlotRecord {
    /// Action code
    pub fn action_code(&self) -> ActionCode {
        self.action_code
    }

    /// Carrier code, two or three characters
    pub fn carrier_code(&self) -> &str {
        &self.carrier_code
    }

    /// Flight number, with optional letter suffix
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Period of operation
    pub fn period(&self) -> &PeriodOfOperation {
        &self.period
    }

    /// Days of operation, as received
    pub fn days_of_operation(&self) -> &DaysOfOperation {
        &self.days_of_operation
    }

    /// Configuration or seat count, three characters
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Aircraft type, three characters
    pub fn aircraft_type(&self) -> &str {
        &self.aircraft_type
    }

    /// Service type letter, as received
    pub fn service_type_char(&self) -> char {
        self.service_type
    }

    /// Service type
    ///
    /// Fails if the letter is not a known [`ServiceType`]. Such
    /// records are still decoded.
    pub fn service_type(&self) -> Result<ServiceType, UnrecognizedServiceType> {
        ServiceType::try_from(self.service_type)
    }

    /// Leg data
    pub fn leg(&self) -> &Leg {
        &self.leg
    }

    /// Departure or arrival
    pub fn movement(&self) -> Movement {
        self.leg.movement()
    }

    /// Departure airport, for departure records
    pub fn departure_airport(&self) -> Option<&str> {
        match &self.leg {
            Leg::Departure { airport, .. } => Some(airport),
            _ => None,
        }
    }

    /// UTC departure time, for departure records
    pub fn departure_time(&self) -> Option<NaiveTime> {
        match &self.leg {
            Leg::Departure { time, .. } => Some(*time),
            _ => None,
        }
    }

    /// Arrival airport, for arrival records
    pub fn arrival_airport(&self) -> Option<&str> {
        match &self.leg {
            Leg::Arrival { airport, .. } => Some(airport),
            _ => None,
        }
    }

    /// UTC arrival time, for arrival records
    pub fn arrival_time(&self) -> Option<NaiveTime> {
        match &self.leg {
            Leg::Arrival { time, .. } => Some(*time),
            _ => None,
        }
    }

    /// Arrival day-change indicator, for arrival records
    pub fn day_change(&self) -> Option<u8> {
        match &self.leg {
            Leg::Arrival { day_change, .. } => Some(*day_change),
            _ => None,
        }
    }

    /// Source line number, starting from 1
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Source line, trimmed
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Slot key
    ///
    /// Identifies the slot across the messages of an exchange:
    /// carrier, flight number, effective date, termination date,
    /// and clearance airport, joined with `-`.
    ///
    /// ```
    /// let msg: scrplace::Message = "SCR\nS25\n15OCT\nKRK\n\
    ///     NLO3924 20OCT20OCT 1000000 082E75 1625WAW J"
    ///     .parse()
    ///     .unwrap();
    /// assert_eq!("LO-3924-20OCT-20OCT-KRK", msg.records()[0].slot_key());
    /// ```
    pub fn slot_key(&self) -> &str {
        &self.slot_key
    }

    /// Compute the slot key against a clearance airport
    pub fn slot_key_for(&self, clearance_airport: &str) -> String {
        slot_key(
            &self.carrier_code,
            &self.flight_number,
            &self.period,
            clearance_airport,
        )
    }
}

impl fmt::Display for SlotRecord {
    /// One-line summary, like
    /// `N LO3924 20OCT20OCT 1000000 082/E75 ARR WAW 1625 J`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:#} {}{} {} {} {}/{} {} {}",
            self.action_code,
            self.carrier_code,
            self.flight_number,
            self.period,
            self.days_of_operation,
            self.configuration,
            self.aircraft_type,
            self.leg,
            self.service_type
        )
    }
}

pub(crate) fn slot_key(
    carrier: &str,
    flight: &str,
    period: &PeriodOfOperation,
    clearance_airport: &str,
) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        carrier,
        flight,
        period.effective(),
        period.termination(),
        clearance_airport
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(leg: Leg) -> SlotRecord {
        let period = PeriodOfOperation::parse("01JUL26JUL").unwrap();
        SlotRecord {
            action_code: ActionCode::Holding,
            carrier_code: "LH".to_owned(),
            flight_number: "4123".to_owned(),
            slot_key: slot_key("LH", "4123", &period, "HAM"),
            period,
            days_of_operation: DaysOfOperation::new("0034507"),
            configuration: "120".to_owned(),
            aircraft_type: "319".to_owned(),
            service_type: 'J',
            leg,
            line_number: 5,
            raw_line: "HLH4123 LH4876 01JUL26JUL 0034507 120319 HAM0700 0750FRA JJ".to_owned(),
        }
    }

    #[test]
    fn test_departure_record() {
        let rec = record(Leg::Departure {
            airport: "HAM".to_owned(),
            time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
        });

        assert_eq!(Movement::Departure, rec.movement());
        assert_eq!(Some("HAM"), rec.departure_airport());
        assert_eq!(NaiveTime::from_hms_opt(7, 0, 0), rec.departure_time());
        assert_eq!(None, rec.arrival_airport());
        assert_eq!(None, rec.arrival_time());
        assert_eq!(None, rec.day_change());
        assert_eq!(Ok(ServiceType::ScheduledPassenger), rec.service_type());
        assert_eq!("LH-4123-01JUL-26JUL-HAM", rec.slot_key());
        assert_eq!("LH-4123-01JUL-26JUL-", rec.slot_key_for(""));
        assert_eq!(
            "H LH4123 01JUL26JUL 0034507 120/319 DEP HAM 0700 J",
            rec.to_string()
        );
    }

    #[test]
    fn test_arrival_record() {
        let mut rec = record(Leg::Arrival {
            airport: "FRA".to_owned(),
            time: NaiveTime::from_hms_opt(23, 50, 0).unwrap(),
            day_change: 1,
        });
        rec.service_type = 'Q';

        assert_eq!(Movement::Arrival, rec.movement());
        assert_eq!(None, rec.departure_airport());
        assert_eq!(Some("FRA"), rec.arrival_airport());
        assert_eq!(Some(1), rec.day_change());
        assert_eq!(Err(UnrecognizedServiceType('Q')), rec.service_type());
        assert!(rec.to_string().ends_with("ARR FRA 2350+1 Q"));
    }
}
