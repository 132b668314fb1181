//! # scrplace: A Slot Clearance Request Message Decoder
//!
//! This crate decodes SCR (Slot Clearance Request) messages. SCR
//! is the line-oriented text format which airlines and airport
//! slot coordinators exchange to request, offer, and confirm
//! takeoff and landing slots. It is part of the IATA Standard
//! Schedules Information Manual (SSIM).
//!
//! For a complete CLI binary, see the companion crate `scrdec`.
//!
//! ## Anatomy of an SCR message
//!
//! ```txt
//! SCR
//! S25
//! 15OCT
//! KRK
//! NLO3924 20OCT20OCT 1000000 082E75 1625WAW J
//! HLH4123 LH4876 01JUL26JUL 0034507 120319 HAM0700 0750FRA JJ
//! GI BRGDS COMPANY
//! ```
//!
//! 1. A header with the `SCR` identifier, the scheduling
//!    [season](crate::Season), the creation date, and the
//!    coordinated airport. Free-form administrative lines may
//!    follow.
//!
//! 2. Slot data lines. Each line describes one leg, or a
//!    *turnaround* of one arrival and one departure. Every
//!    leg becomes a [`SlotRecord`].
//!
//! 3. General (`GI`) and special (`SI`) information text.
//!
//! ## Decoding
//!
//! ```
//! use scrplace::{ActionCode, Movement, Severity, Verdict};
//!
//! let input = "SCR\nS25\n15OCT\nKRK\n\
//!              NLO3924 20OCT20OCT 1000000 082E75 1625WAW J\n";
//!
//! // structural failures abort decoding
//! let decoded = scrplace::decode(input.lines()).expect("fail to decode");
//!
//! let msg = &decoded.message;
//! assert_eq!(Some("KRK"), msg.airport_code());
//!
//! // slot records
//! let rec = &msg.records()[0];
//! assert_eq!(ActionCode::New, rec.action_code());
//! assert_eq!("New slot", &format!("{}", rec.action_code()));
//! assert_eq!(Movement::Arrival, rec.movement());
//! assert_eq!(Some("WAW"), rec.arrival_airport());
//! assert_eq!("LO-3924-20OCT-20OCT-KRK", rec.slot_key());
//!
//! // validation issues are collected, not thrown
//! assert_eq!(Verdict::Usable, decoded.validator.verdict());
//! ```
//!
//! A slot data line which cannot be decoded is a
//! [`ParseError`], and no message is produced. Missing header
//! fields and other problems are reported as [`Issue`]s of
//! increasing [`Severity`].
//!
//! To decode line by line, or to change the decoding options,
//! use an [`Assembler`] from an [`AssemblerBuilder`].
//!
//! ## Dates
//!
//! SSIM dates like `20OCT` carry no year. They are checked
//! against a [reference year](AssemblerBuilder::with_reference_year)
//! using `chrono`, which is part of this crate's public API.
//!
//! ## MSRV Policy
//!
//! A minimum supported rust version (MSRV) increase will be treated as a minor
//! version bump.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod assembler;
mod builder;
mod calendar;
mod classify;
mod decoder;
pub mod fields;
mod message;
mod period;
mod validation;

pub use assembler::{decode, Assembler, Decoded, ParseError};
pub use builder::AssemblerBuilder;
pub use calendar::{DayMonth, DaysOfOperation};
pub use classify::{classify, HeaderField, LineKind, Phase, SlotLayout};
pub use decoder::{decode_slot_line, LineContext};
pub use fields::FieldErr;
pub use message::{
    ActionCode, Leg, Message, Movement, Season, SeasonKind, ServiceType, SlotRecord,
    UnrecognizedActionCode, UnrecognizedServiceType,
};
pub use period::{PeriodOfOperation, DEFAULT_REFERENCE_YEAR};
pub use validation::{Assessment, Issue, Severity, Validator, Verdict};
