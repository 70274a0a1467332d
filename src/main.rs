//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use std::{io, process::ExitCode};

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use lzkn64_verify::harness::{self, report::write_report};
use lzkn64_verify::tools::cli::verify_opts_init;

fn main() -> io::Result<ExitCode> {
    // Available log levels are Error, Warn, Info, Debug, Trace. The command line narrows this.
    TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let opts = verify_opts_init();

    let outcome = harness::run(&opts)?;
    write_report(&mut io::stdout().lock(), &outcome, opts.verbose)?;

    info!("Done.");
    Ok(ExitCode::from(outcome.exit_code()))
}
