use crate::assembler::Assembler;
use crate::period::DEFAULT_REFERENCE_YEAR;

/// Builds an SCR message assembler
///
/// The builder comes with a sensible set of default options,
/// and most callers will not need to change any of them.
///
/// ```
/// use scrplace::AssemblerBuilder;
///
/// let mut assembler = AssemblerBuilder::new()
///     .with_reference_year(2025)
///     .with_advisory_checks(false)
///     .build();
/// assembler.push_line("SCR").unwrap();
/// ```
///
/// The API specified by the builder is part of this crate's
/// API. The actual default values are *not*, however, and
/// are subject to revision in any minor release.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AssemblerBuilder {
    reference_year: i32,
    advisory_checks: bool,
}

impl AssemblerBuilder {
    /// New assembler builder with default options
    pub fn new() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            advisory_checks: true,
        }
    }

    /// Build an assembler
    ///
    /// Once built, the assembler is immediately ready to
    /// accept lines.
    pub fn build(&self) -> Assembler {
        Assembler::from(self)
    }

    /// Reference year for year-less dates
    ///
    /// SSIM dates like `29FEB` carry no year. Periods of
    /// operation are checked against this calendar year, and
    /// their durations are computed in it. The default is a
    /// leap year.
    ///
    /// Periods which cross the new year, as winter seasons do,
    /// are reported as reversed.
    pub fn with_reference_year(&mut self, year: i32) -> &mut Self {
        self.reference_year = year;
        self
    }

    /// Enable or disable advisory checks
    ///
    /// Advisory checks raise minor and major issues, such as
    /// unknown service types or malformed days of operation.
    /// They never abort the parse. Critical checks are always
    /// enabled.
    pub fn with_advisory_checks(&mut self, enable: bool) -> &mut Self {
        self.advisory_checks = enable;
        self
    }

    /// Reference year for year-less dates
    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// True if advisory checks are enabled
    pub fn advisory_checks(&self) -> bool {
        self.advisory_checks
    }
}

impl std::default::Default for AssemblerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
