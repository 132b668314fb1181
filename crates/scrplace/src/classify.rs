//! Line classification

use std::convert::TryFrom;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::calendar::DayMonth;
use crate::fields::{parse_action_code, split_action_code, split_flight_designator, FieldErr};
use crate::message::{Message, Season};

// fewest tokens for a header-phase line to count as truncated slot data
const MIN_HEADER_SLOT_TOKENS: usize = 5;

/// Parser phase
///
/// The phase moves from `Header` to `Body` exactly once, on
/// the first slot data or `GI`/`SI` line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Reading header fields and administrative lines
    Header,

    /// Reading slot data and annotations
    Body,
}

/// A positional header field
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HeaderField {
    /// The `SCR` message identifier
    Identifier,

    /// Season, like `S25`
    Season,

    /// Message creation date, like `15OCT`
    MessageDate,

    /// Three-letter clearance airport
    AirportCode,
}

/// Arrangement of the tokens on a slot data line
///
/// The action code is either concatenated to the first flight
/// designator (*consolidated*, `NLO3924`) or written as a
/// separate token (*separated*, `N LO3924`). Turnaround lines
/// carry a second flight designator and a second time/airport.
///
/// | Layout                   | Tokens |
/// |--------------------------|--------|
/// | `SingleConsolidated`     | 6      |
/// | `SingleSeparated`        | 7      |
/// | `TurnaroundConsolidated` | 8      |
/// | `TurnaroundSeparated`    | 9      |
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotLayout {
    /// One leg, action code joined to the flight designator
    SingleConsolidated,

    /// One leg, action code in its own token
    SingleSeparated,

    /// Arrival and departure, action code joined to the first designator
    TurnaroundConsolidated,

    /// Arrival and departure, action code in its own token
    TurnaroundSeparated,
}

impl SlotLayout {
    /// Layout for a line with `count` whitespace-separated tokens
    pub fn from_token_count(count: usize) -> Option<Self> {
        match count {
            6 => Some(Self::SingleConsolidated),
            7 => Some(Self::SingleSeparated),
            8 => Some(Self::TurnaroundConsolidated),
            9 => Some(Self::TurnaroundSeparated),
            _ => None,
        }
    }

    /// Number of whitespace-separated tokens
    pub fn token_count(&self) -> usize {
        match self {
            Self::SingleConsolidated => 6,
            Self::SingleSeparated => 7,
            Self::TurnaroundConsolidated => 8,
            Self::TurnaroundSeparated => 9,
        }
    }

    /// True if the line describes two legs
    pub fn is_turnaround(&self) -> bool {
        matches!(self, Self::TurnaroundConsolidated | Self::TurnaroundSeparated)
    }

    /// True if the action code is a token of its own
    pub fn is_separated(&self) -> bool {
        matches!(self, Self::SingleSeparated | Self::TurnaroundSeparated)
    }
}

impl TryFrom<usize> for SlotLayout {
    type Error = FieldErr;

    fn try_from(count: usize) -> Result<Self, Self::Error> {
        Self::from_token_count(count).ok_or(FieldErr::UnexpectedTokenCount(count))
    }
}

impl fmt::Display for SlotLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = if self.is_turnaround() {
            "turnaround"
        } else {
            "single"
        };
        let sep = if self.is_separated() {
            "separated"
        } else {
            "consolidated"
        };
        write!(f, "{}/{}", turn, sep)
    }
}

/// The role of a line within a message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Header field
    Header(HeaderField),

    /// Free-form header line
    Administrative,

    /// Slot data, in the given layout
    SlotData(SlotLayout),

    /// Slot data with an unusable number of tokens
    MalformedSlotData {
        /// Whitespace-separated token count
        token_count: usize,
    },

    /// General information (`GI`) annotation
    GeneralInfo,

    /// Special information (`SI`) annotation
    SpecialInfo,

    /// Body line with no recognizable role
    Unrecognized,
}

impl LineKind {
    /// True if a line of this kind ends the header
    pub fn starts_body(&self) -> bool {
        matches!(
            self,
            Self::SlotData(_) | Self::MalformedSlotData { .. } | Self::GeneralInfo | Self::SpecialInfo
        )
    }
}

/// Classify a trimmed, non-empty line
///
/// `message` is the message decoded so far. Header fields are
/// recognized only while the message lacks them.
///
/// ```
/// use scrplace::{classify, LineKind, Message, Phase, SlotLayout};
///
/// let msg = Message::default();
/// assert_eq!(
///     LineKind::SlotData(SlotLayout::SingleConsolidated),
///     classify("NLO3924 20OCT20OCT 1000000 082E75 1625WAW J", Phase::Header, &msg)
/// );
/// assert_eq!(
///     LineKind::GeneralInfo,
///     classify("GI BRGDS", Phase::Body, &msg)
/// );
/// ```
pub fn classify(line: &str, phase: Phase, message: &Message) -> LineKind {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match phase {
        Phase::Header => {
            if let Some(field) = header_field(&tokens, message) {
                return LineKind::Header(field);
            }
            if let Some(kind) = annotation(line) {
                return kind;
            }
            match slot_data(&tokens) {
                Some(kind @ LineKind::SlotData(_)) => kind,
                Some(kind @ LineKind::MalformedSlotData { token_count })
                    if token_count >= MIN_HEADER_SLOT_TOKENS && has_flight_designator(&tokens) =>
                {
                    kind
                }
                _ => LineKind::Administrative,
            }
        }
        Phase::Body => annotation(line)
            .or_else(|| slot_data(&tokens))
            .unwrap_or(LineKind::Unrecognized),
    }
}

// header fields are single tokens, each taken only once
fn header_field(tokens: &[&str], message: &Message) -> Option<HeaderField> {
    lazy_static! {
        static ref AIRPORT: Regex = Regex::new(r"^[A-Z]{3}$").expect("bad airport regexp");
    }

    let token = match tokens {
        [token] => *token,
        _ => return None,
    };

    if token == "SCR" {
        return message.identifier.is_none().then_some(HeaderField::Identifier);
    }
    if message.season.is_none() && Season::is_season_token(token) {
        Some(HeaderField::Season)
    } else if message.message_date.is_none() && DayMonth::parse(token).is_ok() {
        Some(HeaderField::MessageDate)
    } else if message.airport_code.is_none() && AIRPORT.is_match(token) {
        Some(HeaderField::AirportCode)
    } else {
        None
    }
}

fn annotation(line: &str) -> Option<LineKind> {
    if line.starts_with("GI") {
        Some(LineKind::GeneralInfo)
    } else if line.starts_with("SI") {
        Some(LineKind::SpecialInfo)
    } else {
        None
    }
}

// any line led by an action code is slot data, well-formed or not
fn slot_data(tokens: &[&str]) -> Option<LineKind> {
    let first = tokens.first()?;
    split_action_code(first).ok()?;

    Some(match SlotLayout::from_token_count(tokens.len()) {
        Some(layout) => LineKind::SlotData(layout),
        None => LineKind::MalformedSlotData {
            token_count: tokens.len(),
        },
    })
}

// `NLO3924 ...` or `N LO3924 ...`
fn has_flight_designator(tokens: &[&str]) -> bool {
    match tokens {
        [code, designator, ..] if parse_action_code(code).is_ok() => {
            split_flight_designator(designator).is_ok()
        }
        [first, ..] => split_action_code(first)
            .and_then(|(_, designator)| split_flight_designator(designator))
            .is_ok(),
        [] => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_done() -> Message {
        Message {
            identifier: Some("SCR".to_owned()),
            season: Some("S25".to_owned()),
            message_date: DayMonth::parse("15OCT").ok(),
            airport_code: Some("KRK".to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn test_slot_layout() {
        for count in 6..=9 {
            let layout = SlotLayout::try_from(count).expect("bad count");
            assert_eq!(count, layout.token_count());
            assert_eq!(count >= 8, layout.is_turnaround());
            assert_eq!(count % 2 == 1, layout.is_separated());
        }
        assert_eq!(
            Err(FieldErr::UnexpectedTokenCount(5)),
            SlotLayout::try_from(5)
        );
        assert_eq!(None, SlotLayout::from_token_count(10));
        assert_eq!("turnaround/separated", SlotLayout::TurnaroundSeparated.to_string());
    }

    #[test]
    fn test_header_fields_in_order() {
        let mut msg = Message::default();
        assert_eq!(
            LineKind::Header(HeaderField::Identifier),
            classify("SCR", Phase::Header, &msg)
        );
        msg.identifier = Some("SCR".to_owned());
        assert_eq!(LineKind::Administrative, classify("SCR", Phase::Header, &msg));

        assert_eq!(
            LineKind::Header(HeaderField::Season),
            classify("W24", Phase::Header, &msg)
        );
        msg.season = Some("W24".to_owned());

        // once the season is known, S25 is not a date or airport
        assert_eq!(LineKind::Administrative, classify("S25", Phase::Header, &msg));

        assert_eq!(
            LineKind::Header(HeaderField::MessageDate),
            classify("15OCT", Phase::Header, &msg)
        );
        msg.message_date = DayMonth::parse("15OCT").ok();

        // airports which look like annotations are still airports
        assert_eq!(
            LineKind::Header(HeaderField::AirportCode),
            classify("SIN", Phase::Header, &msg)
        );
    }

    #[test]
    fn test_header_administrative() {
        let msg = header_done();
        for line in [
            "/REF 12345",
            "KRK",
            "15OCT",
            "REYT/SLOTS OFFICE",
            "N 20OCT",
            "HELLO WORLD",
            "A B C D E",
            "AB1234 SLOT DESK",
            "N LO3924 20OCT20OCT",
        ] {
            assert_eq!(
                LineKind::Administrative,
                classify(line, Phase::Header, &msg),
                "for {}",
                line
            );
        }
    }

    #[test]
    fn test_header_to_body() {
        let msg = header_done();
        assert_eq!(
            LineKind::SlotData(SlotLayout::TurnaroundConsolidated),
            classify(
                "HLH4123 LH4876 01JUL26JUL 0034507 120319 HAM0700 0750FRA JJ",
                Phase::Header,
                &msg
            )
        );
        assert_eq!(
            LineKind::SlotData(SlotLayout::SingleSeparated),
            classify("N LO3924 20OCT20OCT 1000000 082E75 1625WAW J", Phase::Header, &msg)
        );
        assert_eq!(LineKind::GeneralInfo, classify("GI BRGDS", Phase::Header, &msg));
        assert_eq!(LineKind::SpecialInfo, classify("SI", Phase::Header, &msg));

        // looks like slot data, but short
        let kind = classify("NLO3924 20OCT20OCT 1000000 082E75 1625WAW", Phase::Header, &msg);
        assert_eq!(LineKind::MalformedSlotData { token_count: 5 }, kind);
        assert!(kind.starts_body());
        assert_eq!(
            LineKind::MalformedSlotData { token_count: 10 },
            classify(
                "N LO3924 20OCT20OCT 1000000 082E75 1625WAW J X Y Z",
                Phase::Header,
                &msg
            )
        );
    }

    #[test]
    fn test_body() {
        let msg = header_done();
        assert_eq!(
            LineKind::SlotData(SlotLayout::TurnaroundSeparated),
            classify(
                "H LH4123 LH4876 01JUL26JUL 0034507 120319 HAM0700 0750FRA JJ",
                Phase::Body,
                &msg
            )
        );
        assert_eq!(
            LineKind::MalformedSlotData { token_count: 5 },
            classify("A B C D E", Phase::Body, &msg)
        );
        assert_eq!(LineKind::SpecialInfo, classify("SI KRK SLOTS", Phase::Body, &msg));

        // after the header, any line led by an action code is slot data
        assert_eq!(
            LineKind::MalformedSlotData { token_count: 1 },
            classify("KRK", Phase::Body, &msg)
        );
        assert_eq!(
            LineKind::MalformedSlotData { token_count: 1 },
            classify("REYT/15OCT25/", Phase::Body, &msg)
        );
        assert_eq!(LineKind::Unrecognized, classify("/REF 12345", Phase::Body, &msg));
        assert_eq!(LineKind::Unrecognized, classify("SCR", Phase::Body, &msg));
        assert!(!LineKind::Unrecognized.starts_body());
        assert!(!LineKind::Administrative.starts_body());
    }
}
