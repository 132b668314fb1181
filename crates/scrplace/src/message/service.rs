//! Service types

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;
use thiserror::Error;

/// Service type of a flight leg
///
/// The last token of a slot data line carries one service type
/// letter per leg. Slot records keep the letter as received; see
/// [`SlotRecord::service_type()`](crate::SlotRecord::service_type).
///
/// ```
/// # use std::convert::TryFrom;
/// use scrplace::ServiceType;
///
/// let svc = ServiceType::try_from('J').unwrap();
/// assert_eq!(ServiceType::ScheduledPassenger, svc);
/// assert_eq!("Scheduled passenger", svc.to_string());
/// assert_eq!("J", format!("{:#}", svc));
///
/// assert!(ServiceType::try_from('Q').is_err());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
pub enum ServiceType {
    /// Scheduled passenger service
    #[strum(serialize = "J", detailed_message = "Scheduled passenger")]
    ScheduledPassenger,

    /// Scheduled cargo or mail
    #[strum(serialize = "F", detailed_message = "Scheduled cargo/mail")]
    ScheduledCargo,

    /// Additional passenger flights
    #[strum(serialize = "G", detailed_message = "Additional passenger")]
    AdditionalPassenger,

    /// Passenger charter
    #[strum(serialize = "C", detailed_message = "Charter passenger")]
    CharterPassenger,

    /// Cargo or mail charter
    #[strum(serialize = "H", detailed_message = "Charter cargo/mail")]
    CharterCargo,

    /// Non-revenue positioning or ferry flight
    #[strum(serialize = "P", detailed_message = "Positioning/ferry")]
    Positioning,

    /// Technical test flight
    #[strum(serialize = "T", detailed_message = "Technical test")]
    TechnicalTest,

    /// Training flight
    #[strum(serialize = "K", detailed_message = "Training")]
    Training,

    /// Technical stop
    #[strum(serialize = "X", detailed_message = "Technical stop")]
    TechnicalStop,
}

impl ServiceType {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// SSIM one-letter representation
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// SSIM one-letter representation, as `char`
    pub fn as_char(&self) -> char {
        char::from(self.as_str().as_bytes()[0])
    }

    /// True for services which carry passengers
    pub fn is_passenger(&self) -> bool {
        matches!(
            self,
            Self::ScheduledPassenger | Self::AdditionalPassenger | Self::CharterPassenger
        )
    }
}

impl TryFrom<char> for ServiceType {
    type Error = UnrecognizedServiceType;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        Self::from_str(c.encode_utf8(&mut buf)).map_err(|_| UnrecognizedServiceType(c))
    }
}

impl AsRef<str> for ServiceType {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ServiceType {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like
    ///   "`Scheduled passenger`"
    /// * The alternate form is the one-letter code like "`J`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// An unrecognized service type letter
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("unrecognized service type '{0}'")]
pub struct UnrecognizedServiceType(pub char);

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_service_type_codebook() {
        const LETTERS: &str = "JFGCHPTKX";

        let mut count = 0;
        for svc in ServiceType::iter() {
            assert!(LETTERS.contains(svc.as_char()), "{:?}", svc);
            assert_eq!(Ok(svc), ServiceType::try_from(svc.as_char()));
            let _ = svc.as_display_str();
            count += 1;
        }
        assert_eq!(LETTERS.len(), count);
    }

    #[test]
    fn test_service_type_api() {
        assert!(ServiceType::CharterPassenger.is_passenger());
        assert!(!ServiceType::TechnicalStop.is_passenger());
        assert_eq!(
            Err(UnrecognizedServiceType('j')),
            ServiceType::try_from('j')
        );
        assert_eq!("X", ServiceType::TechnicalStop.as_ref());
    }
}
