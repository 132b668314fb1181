use std::fmt::Display;

use clap::{error::ErrorKind, CommandFactory, Parser};

/// Standard input filename
const STDIN_FILE: &str = "-";

/// Exit code when --strict is given and the message is not usable
pub const EXIT_NOT_USABLE: i32 = 2;

const USAGE_SHORT: &str = r#"
This program reads one Slot Clearance Request (SCR) message as text, decodes its header and slot data lines, and prints a report of the message and any validation issues.

See --help for more details.
"#;

const USAGE_LONG: &str = r#"
This program reads one Slot Clearance Request (SCR) message as text, decodes its header and slot data lines, and prints a report of the message and any validation issues.

    scrdec --file request.scr

A slot data line which cannot be decoded aborts the program with exit status 1. Other problems are reported as minor, major, or critical issues, followed by a verdict:

  usable       at most one major issue, and no critical issues
  needs fixes  more than one major issue
  unusable     one or more critical issues

With --strict, a verdict other than "usable" exits with status 2. Use --summary in scripts to print only the verdict.
"#;

/// Top-level program arguments
#[derive(Parser, Clone, Debug)]
#[command(version)]
#[command(about, long_about = None)]
#[command(after_help = USAGE_SHORT, after_long_help = USAGE_LONG)]
#[command(max_term_width = 100)]
pub struct Args {
    /// Verbosity level (-vvv for more)
    #[arg(short, long, default_value_t = 0, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print NOTHING, not even the verdict
    #[arg(short, long)]
    pub quiet: bool,

    /// Input file (or "-" for stdin)
    #[arg(long, default_value_t = STDIN_FILE.to_string())]
    pub file: String,

    /// Reference year for year-less SSIM dates
    ///
    /// Periods of operation are validated against this calendar
    /// year. Choose a leap year to accept 29FEB.
    #[arg(long, default_value_t = scrplace::DEFAULT_REFERENCE_YEAR)]
    pub year: i32,

    /// Disable advisory (minor and major) checks
    #[arg(long)]
    pub no_advisory: bool,

    /// Exit with status 2 unless the message is usable
    #[arg(long)]
    pub strict: bool,

    /// Print only the validation summary
    #[arg(long)]
    pub summary: bool,
}

impl Args {
    /// Return true if the user requests input from stdin
    pub fn input_is_stdin(&self) -> bool {
        self.file == STDIN_FILE
    }
}

/// A program-level error with exit code
#[derive(Debug)]
pub struct CliError {
    error: anyhow::Error,
    exit_code: i32,
}

impl CliError {
    /// Create new error with a custom exit code
    pub fn new(error: anyhow::Error, code: i32) -> CliError {
        CliError {
            error,
            exit_code: code,
        }
    }

    /// Print this error to the terminal
    ///
    /// Errors from clap are printed verbatim. Other types of errors
    /// are printed indirectly via clap's fancy formatter.
    pub fn print(&self) -> std::io::Result<()> {
        if let Some(e) = self.error.downcast_ref::<clap::Error>() {
            e.print()
        } else {
            Args::command()
                .error(ErrorKind::Format, self.to_string())
                .print()
        }
    }

    /// Print this error to the terminal and exit
    pub fn exit(&self) -> ! {
        drop(self.print());
        std::process::exit(self.exit_code);
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.error)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> CliError {
        CliError::new(err, 1)
    }
}

impl From<clap::Error> for CliError {
    fn from(err: clap::Error) -> CliError {
        let code = if err.use_stderr() { 1 } else { 0 };
        CliError::new(err.into(), code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clap() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["scrdec"]).expect("bad args");
        assert!(args.input_is_stdin());
        assert_eq!(scrplace::DEFAULT_REFERENCE_YEAR, args.year);
        assert!(!args.strict);

        let args = Args::try_parse_from([
            "scrdec",
            "--file",
            "msg.scr",
            "--year",
            "2025",
            "--no-advisory",
            "--strict",
            "-vv",
        ])
        .expect("bad args");
        assert!(!args.input_is_stdin());
        assert_eq!(2025, args.year);
        assert!(args.no_advisory);
        assert!(args.strict);
        assert_eq!(2, args.verbose);
    }
}
