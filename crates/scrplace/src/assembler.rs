//! Message assembly

use log::{debug, info, warn};
use thiserror::Error;

use crate::builder::AssemblerBuilder;
use crate::calendar::DayMonth;
use crate::classify::{classify, HeaderField, LineKind, Phase};
use crate::decoder::{decode_slot_line, LineContext};
use crate::fields::FieldErr;
use crate::message::Message;
use crate::validation::{Issue, Severity, Validator};

/// Terminal failure to decode a message
///
/// A slot data line which fails to decode aborts the whole
/// parse. No [`Message`] is produced.
///
/// ```
/// use scrplace::{decode, FieldErr, Severity};
///
/// let err = decode(["SCR", "S25", "15OCT", "KRK", "NLO3924 20OCT20OCT 1000000 082E75 1625WAW"])
///     .unwrap_err();
/// assert_eq!(5, err.line_number());
/// assert_eq!(&FieldErr::UnexpectedTokenCount(5), err.cause());
/// assert_eq!(Severity::Critical, err.severity());
/// assert_eq!("line 5: unexpected token count 5", err.to_string());
/// ```
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("line {line_number}: {cause}")]
pub struct ParseError {
    line_number: usize,
    raw_line: String,
    #[source]
    cause: FieldErr,
}

impl ParseError {
    /// Source line number, starting from 1
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Offending source line, trimmed
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// The token-level failure
    pub fn cause(&self) -> &FieldErr {
        &self.cause
    }

    /// Always [`Severity::Critical`]
    pub fn severity(&self) -> Severity {
        Severity::Critical
    }
}

impl From<&ParseError> for Issue {
    fn from(err: &ParseError) -> Self {
        Issue::at_line(
            err.severity(),
            err.cause.to_string(),
            err.line_number,
            err.raw_line.clone(),
        )
        .with_cause(err.cause.clone())
    }
}

/// A successfully decoded message and its validation issues
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded message
    pub message: Message,

    /// Issues raised while decoding and validating
    pub validator: Validator,
}

/// Streaming SCR message assembler
///
/// Accepts the lines of one message, in order, with
/// [`push_line()`](Assembler::push_line). Call
/// [`finish()`](Assembler::finish) after the last line to run
/// the message-level checks and obtain the result.
///
/// ```
/// use scrplace::{Assembler, Phase};
///
/// let mut assembler = Assembler::new();
/// for line in ["SCR", "S25", "15OCT", "KRK"] {
///     assembler.push_line(line).unwrap();
/// }
/// assert_eq!(Phase::Header, assembler.phase());
///
/// assembler.push_line("NLO3924 20OCT20OCT 1000000 082E75 1625WAW J").unwrap();
/// assert_eq!(Phase::Body, assembler.phase());
///
/// let decoded = assembler.finish().unwrap();
/// assert_eq!(1, decoded.message.records().len());
/// assert!(decoded.validator.verdict().is_usable());
/// ```
///
/// Once a line fails to decode, the assembler is spent: every
/// further call returns the same error.
///
/// Each assembler decodes exactly one message. It is not meant
/// to be shared between threads.
#[derive(Clone, Debug)]
pub struct Assembler {
    reference_year: i32,
    advisory_checks: bool,
    phase: Phase,
    line_number: usize,
    message: Message,
    validator: Validator,
    failure: Option<ParseError>,
}

impl Assembler {
    /// New assembler with default options
    ///
    /// See [`AssemblerBuilder`] for the options.
    pub fn new() -> Self {
        AssemblerBuilder::default().build()
    }

    /// Process the next line
    ///
    /// Lines are trimmed of leading and trailing whitespace.
    /// Blank lines are ignored, but they still count towards
    /// line numbers.
    pub fn push_line(&mut self, line: &str) -> Result<(), ParseError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        self.line_number += 1;
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }

        let kind = classify(line, self.phase, &self.message);
        debug!("line {}: {:?}", self.line_number, kind);

        if self.phase == Phase::Header && kind.starts_body() {
            info!("header complete at line {}", self.line_number);
            self.phase = Phase::Body;
        }

        match kind {
            LineKind::Header(field) => self.set_header(field, line),
            LineKind::Administrative => self.message.administrative_lines.push(line.to_owned()),
            LineKind::SlotData(layout) => {
                let ctx = LineContext {
                    line_number: self.line_number,
                    clearance_airport: self.message.airport_code.as_deref(),
                    reference_year: self.reference_year,
                };
                match decode_slot_line(line, layout, &ctx) {
                    Ok(records) => {
                        if self.advisory_checks {
                            records
                                .iter()
                                .for_each(|rec| self.validator.advise_record(rec));
                        }
                        self.message.records.extend(records);
                    }
                    Err(err) => return self.fail(line, err),
                }
            }
            LineKind::MalformedSlotData { token_count } => {
                return self.fail(line, FieldErr::UnexpectedTokenCount(token_count));
            }
            LineKind::GeneralInfo => append_text(&mut self.message.general_info, line),
            LineKind::SpecialInfo => append_text(&mut self.message.special_info, line),
            LineKind::Unrecognized => {
                if self.advisory_checks {
                    self.validator.add_issue(Issue::at_line(
                        Severity::Minor,
                        "unrecognized line ignored",
                        self.line_number,
                        line,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Decode every line of `lines`, then [finish](Assembler::finish)
    pub fn decode<I, S>(mut self, lines: I) -> Result<Decoded, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref())?;
        }
        self.finish()
    }

    /// Complete the message
    ///
    /// Runs the message-level checks and returns the message
    /// with every issue raised. Returns the decode failure
    /// instead, if there was one.
    pub fn finish(mut self) -> Result<Decoded, ParseError> {
        if let Some(err) = self.failure {
            return Err(err);
        }

        self.validator.validate_message(&self.message);
        if self.advisory_checks {
            self.validator.advise_message(&self.message);
        }

        debug!(
            "decoded {} slot record(s) from {} line(s)",
            self.message.records.len(),
            self.line_number
        );
        Ok(Decoded {
            message: self.message,
            validator: self.validator,
        })
    }

    /// Current parser phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of lines pushed so far, including blank lines
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// The message decoded so far
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Issues raised so far
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    fn set_header(&mut self, field: HeaderField, line: &str) {
        let msg = &mut self.message;
        match field {
            HeaderField::Identifier => msg.identifier = Some(line.to_owned()),
            HeaderField::Season => msg.season = Some(line.to_owned()),
            HeaderField::MessageDate => msg.message_date = DayMonth::parse(line).ok(),
            HeaderField::AirportCode => msg.airport_code = Some(line.to_owned()),
        }
    }

    fn fail(&mut self, line: &str, cause: FieldErr) -> Result<(), ParseError> {
        let err = ParseError {
            line_number: self.line_number,
            raw_line: line.to_owned(),
            cause,
        };
        warn!("decoding aborted: {}", err);
        self.failure = Some(err.clone());
        Err(err)
    }
}

impl std::default::Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&AssemblerBuilder> for Assembler {
    fn from(cfg: &AssemblerBuilder) -> Self {
        Self {
            reference_year: cfg.reference_year(),
            advisory_checks: cfg.advisory_checks(),
            phase: Phase::Header,
            line_number: 0,
            message: Message::default(),
            validator: Validator::new(),
            failure: None,
        }
    }
}

/// Decode one message with default options
///
/// `lines` is any sequence of string-like lines.
///
/// ```
/// let decoded = scrplace::decode(
///     "SCR\nS25\n15OCT\nKRK\nGI BRGDS COMPANY\nGI SENDER NAME".lines()
/// ).unwrap();
///
/// assert_eq!("BRGDS COMPANY SENDER NAME", decoded.message.general_info());
/// assert_eq!("0 minor issue(s): message is usable", decoded.validator.summarize());
/// ```
pub fn decode<I, S>(lines: I) -> Result<Decoded, ParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Assembler::new().decode(lines)
}

// `GI`/`SI` text, joined with one space
fn append_text(text: &mut String, line: &str) {
    let rest = line.get(2..).unwrap_or("").trim();
    if rest.is_empty() {
        return;
    }
    if !text.is_empty() {
        text.push(' ');
    }
    text.push_str(rest);
}
