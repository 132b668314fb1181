//! Decoding and reporting
//!
//! Lines are fed to an [`Assembler`] as they are read. A line
//! which fails to decode stops the program. Otherwise, the
//! decoded message is printed as a report:
//!
//! ```txt
//! SCR
//! Season: S25 (Summer 2025)
//! Date: 15OCT
//! Airport: KRK
//! N LO3924 20OCT20OCT 1000000 082/E75 ARR WAW 1625 J
//!
//! 0 minor issue(s): message is usable
//! ```

use std::io::{self, Write};

use anyhow::Context;
use log::{debug, info};
use scrplace::{Assembler, AssemblerBuilder, Decoded, Verdict};

use crate::cli::Args;

/// Run the application
///
/// Decodes the `input` lines with the options in `args` and
/// writes the report to `out`. Returns the verdict on the
/// decoded message.
pub fn run<I, W>(args: &Args, input: I, out: &mut W) -> Result<Verdict, anyhow::Error>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut assembler = make_assembler(args);

    for line in input {
        let line = line.context("unable to read input")?;
        assembler
            .push_line(&line)
            .context("unable to decode SCR message")?;
    }

    debug!("end of input after {} line(s)", assembler.line_number());
    let decoded = assembler
        .finish()
        .context("unable to decode SCR message")?;
    let verdict = decoded.validator.verdict();
    info!("message is {}", verdict);

    if !args.quiet {
        if args.summary {
            writeln!(out, "{}", decoded.validator.summarize())?;
        } else {
            render_report(&decoded, out)?;
        }
    }

    Ok(verdict)
}

/// Write the full report for a decoded message
pub fn render_report<W>(decoded: &Decoded, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    write!(out, "{}", decoded.message)?;
    writeln!(out)?;
    for issue in decoded.validator.issues() {
        writeln!(out, "{}", issue)?;
    }
    writeln!(out, "{}", decoded.validator.summarize())
}

fn make_assembler(args: &Args) -> Assembler {
    AssemblerBuilder::new()
        .with_reference_year(args.year)
        .with_advisory_checks(!args.no_advisory)
        .build()
}
