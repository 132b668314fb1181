//! Action codes

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use strum::EnumMessage;
use thiserror::Error;

/// SCR action code
///
/// The first character of every slot data line. Action codes
/// describe the nature of the slot transaction. Airlines and
/// slot coordinators use distinct vocabularies:
///
/// | Airline | Meaning                                  |
/// |---------|------------------------------------------|
/// | `A`     | accept offer, no improvement desired     |
/// | `B`     | new entrant                              |
/// | `C`     | change                                   |
/// | `D`     | delete                                   |
/// | `E`     | eliminate                                |
/// | `F`     | historic slot use                        |
/// | `I`     | revised, continuation                    |
/// | `L`     | revised, no offer                        |
/// | `N`     | new slot                                 |
/// | `P`     | accept offer, keep request outstanding   |
/// | `R`     | revised                                  |
/// | `V`     | new entrant, year-round                  |
/// | `Y`     | new slot, continuation of previous season|
/// | `Z`     | decline offer                            |
///
/// | Coordinator | Meaning                              |
/// |-------------|--------------------------------------|
/// | `H`         | holding                              |
/// | `K`         | confirmation                         |
/// | `O`         | offer                                |
/// | `P`         | request pending                      |
/// | `T`         | allocated subject to conditions      |
/// | `U`         | unable to confirm                    |
/// | `W`         | unable to reconcile flight information |
/// | `X`         | delete confirmation                  |
///
/// The letter `P` belongs to both vocabularies.
///
/// ```
/// # use std::convert::TryFrom;
/// use scrplace::ActionCode;
///
/// let code = ActionCode::try_from('K').unwrap();
/// assert_eq!(ActionCode::Confirm, code);
/// assert!(code.is_coordinator());
/// assert!(!code.is_airline());
/// assert_eq!('K', code.as_char());
/// assert_eq!("Slot confirmed", code.to_string());
/// assert_eq!("K", format!("{:#}", code));
///
/// assert!(ActionCode::try_from('G').is_err());
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
pub enum ActionCode {
    /// Acceptance of an offer; no further improvement desired
    #[strum(serialize = "A", detailed_message = "Offer accepted")]
    Accept,

    /// New entrant request
    #[strum(serialize = "B", detailed_message = "New entrant")]
    NewEntrant,

    /// Change to an existing slot
    #[strum(serialize = "C", detailed_message = "Slot to be changed")]
    Change,

    /// Delete slot
    #[strum(serialize = "D", detailed_message = "Delete slot")]
    Delete,

    /// Eliminate slot
    #[strum(serialize = "E", detailed_message = "Eliminate slot")]
    Eliminate,

    /// Historic slot use
    #[strum(serialize = "F", detailed_message = "Historic slot use")]
    HistoricUse,

    /// Revised slot, continuation
    #[strum(serialize = "I", detailed_message = "Revised slot, continuation")]
    RevisedContinuation,

    /// Revised slot, no offer wanted
    #[strum(serialize = "L", detailed_message = "Revised slot, no offer")]
    RevisedNoOffer,

    /// New slot
    #[strum(serialize = "N", detailed_message = "New slot")]
    New,

    /// Accept offer and keep the request outstanding (airline), or
    /// request pending (coordinator)
    #[strum(serialize = "P", detailed_message = "Pending")]
    Pending,

    /// Revised slot
    #[strum(serialize = "R", detailed_message = "Revised slot")]
    Revised,

    /// New entrant with year-round status
    #[strum(serialize = "V", detailed_message = "New entrant, year-round")]
    NewEntrantYearRound,

    /// New slot, continuation from the previous adjacent season
    #[strum(serialize = "Y", detailed_message = "New slot, continuation")]
    NewContinuation,

    /// Decline offer
    #[strum(serialize = "Z", detailed_message = "Offer declined")]
    Decline,

    /// Holding slot
    #[strum(serialize = "H", detailed_message = "Holding slot")]
    Holding,

    /// New or revised slot confirmed
    #[strum(serialize = "K", detailed_message = "Slot confirmed")]
    Confirm,

    /// Slot offered
    #[strum(serialize = "O", detailed_message = "Slot offered")]
    Offer,

    /// Slot allocated subject to conditions
    #[strum(serialize = "T", detailed_message = "Allocated subject to conditions")]
    Conditional,

    /// Unable to confirm; slot not allocated
    #[strum(serialize = "U", detailed_message = "Unable to confirm")]
    Unable,

    /// Unable to reconcile flight information
    #[strum(serialize = "W", detailed_message = "Unable to reconcile")]
    Unreconciled,

    /// Slot deletion confirmed
    #[strum(serialize = "X", detailed_message = "Deletion confirmed")]
    DeleteConfirmed,
}

impl ActionCode {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// SCR one-letter representation
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// SCR one-letter representation, as `char`
    pub fn as_char(&self) -> char {
        char::from(self.as_str().as_bytes()[0])
    }

    /// True if airlines send this code
    pub fn is_airline(&self) -> bool {
        !self.is_coordinator() || *self == Self::Pending
    }

    /// True if slot coordinators send this code
    pub fn is_coordinator(&self) -> bool {
        matches!(
            self,
            Self::Holding
                | Self::Confirm
                | Self::Offer
                | Self::Pending
                | Self::Conditional
                | Self::Unable
                | Self::Unreconciled
                | Self::DeleteConfirmed
        )
    }
}

impl TryFrom<char> for ActionCode {
    type Error = UnrecognizedActionCode;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let mut buf = [0u8; 4];
        Self::from_str(c.encode_utf8(&mut buf)).map_err(|_| UnrecognizedActionCode(c))
    }
}

impl AsRef<str> for ActionCode {
    fn as_ref(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ActionCode {
    /// Printable string
    ///
    /// * The normal form is a human-readable string like "`New slot`"
    /// * The alternate form is the one-letter code like "`N`"
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// An unrecognized action code letter
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[error("unrecognized action code '{0}'")]
pub struct UnrecognizedActionCode(pub char);

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    #[test]
    fn test_action_code_api() {
        assert_eq!(Ok(ActionCode::New), ActionCode::try_from('N'));
        assert_eq!(Ok(ActionCode::Holding), ActionCode::try_from('H'));
        assert_eq!(
            Err(UnrecognizedActionCode('n')),
            ActionCode::try_from('n')
        );
        assert_eq!(
            "unrecognized action code 'Q'",
            ActionCode::try_from('Q').unwrap_err().to_string()
        );

        assert!(ActionCode::Pending.is_airline());
        assert!(ActionCode::Pending.is_coordinator());
        assert!(ActionCode::New.is_airline());
        assert!(!ActionCode::New.is_coordinator());
        assert_eq!("New slot", format!("{}", ActionCode::New));
        assert_eq!("N", format!("{:#}", ActionCode::New));
    }

    #[test]
    fn test_action_code_completeness() {
        const AIRLINE: &str = "ABCDEFILNPRVYZ";
        const COORDINATOR: &str = "HKOPTUWX";

        let mut letters = HashSet::new();
        for code in ActionCode::iter() {
            // one letter, unique, and back-convertible
            assert_eq!(1, code.as_str().len());
            assert!(letters.insert(code.as_char()));
            assert_eq!(Ok(code), ActionCode::try_from(code.as_char()));
            assert!(!code.as_display_str().is_empty());

            assert_eq!(AIRLINE.contains(code.as_char()), code.is_airline());
            assert_eq!(COORDINATOR.contains(code.as_char()), code.is_coordinator());
        }

        // P is shared
        assert_eq!(AIRLINE.len() + COORDINATOR.len() - 1, letters.len());
    }
}
