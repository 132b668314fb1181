//! Validation issues and their aggregation

use std::fmt;

use log::warn;
use strum::EnumMessage;

use crate::fields::FieldErr;
use crate::message::{Message, SlotRecord};

/// Severity of a validation issue
///
/// Severities are `Ord`, from least to most severe.
///
/// ```
/// use scrplace::Severity;
///
/// assert!(Severity::Minor < Severity::Major);
/// assert!(Severity::Major < Severity::Critical);
/// assert_eq!("critical", Severity::Critical.to_string());
/// assert_eq!("CRITICAL", format!("{:#}", Severity::Critical));
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::EnumMessage,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::IntoStaticStr,
)]
#[repr(u8)]
pub enum Severity {
    /// Advisory; the message is usable
    #[strum(serialize = "MINOR", detailed_message = "minor")]
    Minor,

    /// Should be fixed before the message is used
    #[strum(serialize = "MAJOR", detailed_message = "major")]
    Major,

    /// The message cannot be used
    #[strum(serialize = "CRITICAL", detailed_message = "critical")]
    Critical,
}

impl Severity {
    /// Human-readable string representation
    pub fn as_display_str(&self) -> &'static str {
        self.get_detailed_message().expect("missing definition")
    }

    /// Upper-case code, like `MAJOR`
    pub fn as_code_str(&self) -> &'static str {
        self.into()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.as_code_str().fmt(f)
        } else {
            self.as_display_str().fmt(f)
        }
    }
}

/// A validation issue
///
/// Issues are raised while decoding and by the checks that
/// run over the completed [`Message`]. Message-level issues
/// carry no line number.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    message: String,
    severity: Severity,
    line_number: Option<usize>,
    raw_line: String,
    cause: Option<FieldErr>,
}

impl Issue {
    /// Message-level issue
    pub fn new<S>(severity: Severity, message: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            message: message.into(),
            severity,
            line_number: None,
            raw_line: String::new(),
            cause: None,
        }
    }

    /// Issue raised by a source line
    pub fn at_line<S, L>(severity: Severity, message: S, line_number: usize, raw_line: L) -> Self
    where
        S: Into<String>,
        L: Into<String>,
    {
        Self {
            message: message.into(),
            severity,
            line_number: Some(line_number),
            raw_line: raw_line.into(),
            cause: None,
        }
    }

    /// Attach the underlying field error
    pub fn with_cause(mut self, cause: FieldErr) -> Self {
        self.cause = Some(cause);
        self
    }

    /// Human-readable description
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Source line number, for line-level issues
    pub fn line_number(&self) -> Option<usize> {
        self.line_number
    }

    /// Source line, trimmed, or empty for message-level issues
    pub fn raw_line(&self) -> &str {
        &self.raw_line
    }

    /// Underlying field error, if any
    pub fn cause(&self) -> Option<&FieldErr> {
        self.cause.as_ref()
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line_number {
            Some(num) => write!(f, "[{:#}] line {}: {}", self.severity, num, self.message),
            None => write!(f, "[{:#}] {}", self.severity, self.message),
        }
    }
}

/// Issue counts, by severity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Assessment {
    /// Number of [minor](Severity::Minor) issues
    pub minor: usize,

    /// Number of [major](Severity::Major) issues
    pub major: usize,

    /// Number of [critical](Severity::Critical) issues
    pub critical: usize,
}

impl Assessment {
    /// Verdict for these counts
    ///
    /// Any critical issue makes the message unusable. More than
    /// one major issue means it needs fixes. Otherwise it is
    /// usable.
    pub fn verdict(&self) -> Verdict {
        if self.critical > 0 {
            Verdict::Unusable
        } else if self.major > 1 {
            Verdict::NeedsFixes
        } else {
            Verdict::Usable
        }
    }
}

/// Overall verdict on a decoded message
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The message cannot be used
    Unusable,

    /// The message needs fixes before use
    NeedsFixes,

    /// The message is usable, perhaps with advisory issues
    Usable,
}

impl Verdict {
    /// True for [`Verdict::Usable`]
    pub fn is_usable(&self) -> bool {
        *self == Verdict::Usable
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Unusable => "unusable".fmt(f),
            Verdict::NeedsFixes => "needs fixes".fmt(f),
            Verdict::Usable => "usable".fmt(f),
        }
    }
}

/// Validation aggregator
///
/// Collects [`Issue`]s in the order they are raised. Issues are
/// never removed.
///
/// ```
/// use scrplace::{Issue, Severity, Validator, Verdict};
///
/// let mut validator = Validator::new();
/// validator.add_issue(Issue::new(Severity::Major, "missing message date"));
/// assert_eq!(Verdict::Usable, validator.verdict());
///
/// validator.add_issue(Issue::new(Severity::Major, "something else"));
/// assert_eq!(Verdict::NeedsFixes, validator.verdict());
///
/// validator.add_issue(Issue::new(Severity::Critical, "missing season"));
/// assert_eq!(Verdict::Unusable, validator.verdict());
/// assert_eq!(3, validator.issues().len());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validator {
    issues: Vec<Issue>,
}

impl Validator {
    /// Empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an issue
    pub fn add_issue(&mut self, issue: Issue) {
        warn!("{}", issue);
        self.issues.push(issue);
    }

    /// All issues, in the order they were raised
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues of at least the given severity
    pub fn issues_at_least(&self, severity: Severity) -> impl Iterator<Item = &Issue> + '_ {
        self.issues.iter().filter(move |i| i.severity >= severity)
    }

    /// Count issues by severity
    pub fn assess(&self) -> Assessment {
        self.issues
            .iter()
            .fold(Assessment::default(), |mut acc, issue| {
                match issue.severity {
                    Severity::Minor => acc.minor += 1,
                    Severity::Major => acc.major += 1,
                    Severity::Critical => acc.critical += 1,
                }
                acc
            })
    }

    /// Overall verdict
    pub fn verdict(&self) -> Verdict {
        self.assess().verdict()
    }

    /// Human-readable verdict
    ///
    /// ```
    /// use scrplace::Validator;
    ///
    /// assert_eq!(
    ///     "0 minor issue(s): message is usable",
    ///     Validator::new().summarize()
    /// );
    /// ```
    pub fn summarize(&self) -> String {
        let counts = self.assess();
        match counts.verdict() {
            Verdict::Unusable => format!(
                "{} minor, {} major, and {} CRITICAL issue(s): message is unusable",
                counts.minor, counts.major, counts.critical
            ),
            Verdict::NeedsFixes => format!(
                "{} minor and {} major issue(s): message needs fixes before use",
                counts.minor, counts.major
            ),
            Verdict::Usable if counts.major > 0 => format!(
                "{} minor and {} major issue(s): message is usable, but consider fixing them",
                counts.minor, counts.major
            ),
            Verdict::Usable if counts.minor > 0 => format!(
                "{} minor issue(s): message is usable, but consider fixing them",
                counts.minor
            ),
            Verdict::Usable => "0 minor issue(s): message is usable".to_owned(),
        }
    }

    /// Check the required header fields of a decoded message
    ///
    /// Raises one critical issue for each of: an identifier
    /// other than `SCR`, a missing season, and a missing
    /// airport code.
    pub fn validate_message(&mut self, message: &Message) {
        if message.identifier() != Some("SCR") {
            self.add_issue(Issue::new(Severity::Critical, "missing SCR identifier"));
        }
        if message.season_code().is_none() {
            self.add_issue(Issue::new(Severity::Critical, "missing season"));
        }
        if message.airport_code().is_none() {
            self.add_issue(Issue::new(Severity::Critical, "missing airport code"));
        }
    }

    /// Advisory checks over a decoded message
    pub fn advise_message(&mut self, message: &Message) {
        if message.message_date().is_none() {
            self.add_issue(Issue::new(Severity::Major, "missing message date"));
        }
    }

    /// Advisory checks over one decoded slot record
    pub fn advise_record(&mut self, record: &SlotRecord) {
        if let Err(err) = record.service_type() {
            self.add_issue(Issue::at_line(
                Severity::Minor,
                format!("{} for {}{}", err, record.carrier_code(), record.flight_number()),
                record.line_number(),
                record.raw_line(),
            ));
        }
        if !record.days_of_operation().is_well_formed() {
            self.add_issue(Issue::at_line(
                Severity::Major,
                format!(
                    "malformed days of operation \"{}\" for {}{}",
                    record.days_of_operation(),
                    record.carrier_code(),
                    record.flight_number()
                ),
                record.line_number(),
                record.raw_line(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use strum::IntoEnumIterator;

    #[test]
    fn test_severity() {
        let all: Vec<Severity> = Severity::iter().collect();
        assert_eq!(
            vec![Severity::Minor, Severity::Major, Severity::Critical],
            all
        );
        for sev in all {
            assert!(!sev.as_display_str().is_empty());
            assert_eq!(sev.as_code_str(), sev.as_display_str().to_uppercase());
        }
    }

    #[test]
    fn test_verdict_thresholds() {
        const CASES: &[(usize, usize, usize, Verdict)] = &[
            (0, 0, 0, Verdict::Usable),
            (5, 0, 0, Verdict::Usable),
            (5, 1, 0, Verdict::Usable),
            (0, 2, 0, Verdict::NeedsFixes),
            (0, 0, 1, Verdict::Unusable),
            (0, 7, 1, Verdict::Unusable),
        ];

        for (minor, major, critical, verdict) in CASES {
            let counts = Assessment {
                minor: *minor,
                major: *major,
                critical: *critical,
            };
            assert_eq!(*verdict, counts.verdict(), "for {:?}", counts);
        }
    }

    #[test]
    fn test_assess_and_summarize() {
        let mut validator = Validator::new();
        validator.add_issue(Issue::new(Severity::Minor, "a"));
        validator.add_issue(Issue::at_line(Severity::Minor, "b", 7, "X Y"));
        assert_eq!(
            "2 minor issue(s): message is usable, but consider fixing them",
            validator.summarize()
        );

        validator.add_issue(Issue::new(Severity::Major, "c"));
        validator.add_issue(Issue::new(Severity::Major, "d"));
        assert_eq!(
            "2 minor and 2 major issue(s): message needs fixes before use",
            validator.summarize()
        );

        validator.add_issue(Issue::new(Severity::Critical, "e"));
        assert_eq!(
            Assessment {
                minor: 2,
                major: 2,
                critical: 1
            },
            validator.assess()
        );
        assert_eq!(
            "2 minor, 2 major, and 1 CRITICAL issue(s): message is unusable",
            validator.summarize()
        );
        assert_eq!(3, validator.issues_at_least(Severity::Major).count());
        assert_eq!("b", validator.issues()[1].message());
    }

    #[test]
    fn test_issue_display() {
        let issue = Issue::at_line(Severity::Critical, "unexpected token count 5", 5, "N A B C D")
            .with_cause(FieldErr::UnexpectedTokenCount(5));
        assert_eq!("[CRITICAL] line 5: unexpected token count 5", issue.to_string());
        assert_eq!(Some(&FieldErr::UnexpectedTokenCount(5)), issue.cause());
        assert_eq!(
            "[MAJOR] missing message date",
            Issue::new(Severity::Major, "missing message date").to_string()
        );
    }

    #[test]
    fn test_validate_message() {
        let mut validator = Validator::new();
        validator.validate_message(&Message::default());
        validator.advise_message(&Message::default());
        let counts = validator.assess();
        assert_eq!(3, counts.critical);
        assert_eq!(1, counts.major);

        let msg = Message {
            identifier: Some("SCR".to_owned()),
            season: Some("S25".to_owned()),
            airport_code: None,
            ..Default::default()
        };
        let mut validator = Validator::new();
        validator.validate_message(&msg);
        assert_eq!(1, validator.issues().len());
        assert_eq!("missing airport code", validator.issues()[0].message());
        assert_eq!(None, validator.issues()[0].line_number());
    }
}
