use std::io::{self, BufRead};

use anyhow::{anyhow, Context};
use clap::Parser;
use log::{info, LevelFilter};

mod app;
mod cli;

use cli::{Args, CliError, EXIT_NOT_USABLE};

fn main() {
    match scrdec() {
        Ok(()) => {}
        Err(cli_error) => cli_error.exit(),
    }
}

fn scrdec() -> Result<(), CliError> {
    // Parse options and start logging
    let args = Args::try_parse()?;
    log_setup(&args);

    // file setup: locks stdin in case we need it
    let stdin = io::stdin();
    let stdin_handle = stdin.lock();
    let inbuf = file_setup(&args, stdin_handle)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let verdict = app::run(&args, inbuf.lines(), &mut out)?;

    if args.strict && !verdict.is_usable() {
        return Err(CliError::new(
            anyhow!("message is {} (--strict)", verdict),
            EXIT_NOT_USABLE,
        ));
    }

    Ok(())
}

fn log_setup(args: &Args) {
    if args.quiet {
        // no logging
        return;
    } else if std::env::var_os("RUST_LOG").is_none() {
        // parameter controls
        let log_filter = match args.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        pretty_env_logger::formatted_builder()
            .filter_module("scrplace", log_filter)
            .filter_module("scrdec", log_filter)
            .init();
    } else {
        // environment controls
        pretty_env_logger::init();
    }
}

fn file_setup<'stdin>(
    args: &Args,
    stdin: std::io::StdinLock<'stdin>,
) -> Result<Box<dyn io::BufRead + 'stdin>, anyhow::Error> {
    if args.input_is_stdin() {
        info!("SCR decoder reading standard input");
        Ok(Box::new(stdin))
    } else {
        info!("SCR decoder reading file: \"{}\"", &args.file);
        Ok(Box::new(io::BufReader::new(
            std::fs::File::open(&args.file)
                .with_context(|| format!("Unable to open --file \"{}\"", args.file))?,
        )))
    }
}
