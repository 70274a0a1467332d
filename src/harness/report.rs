use std::io::{self, Write};

use paris::formatter::colorize_string;

use super::Outcome;

const SUCCESS: &str = "<bright-green><bold>Test successful!</>";
const FAILURE: &str = "<bright-red><bold>Test failed!</>";

/// Write the pass/fail line and, when `verbose` and failed, the offending files.
pub fn write_report<W: Write>(out: &mut W, outcome: &Outcome, verbose: bool) -> io::Result<()> {
    if outcome.passed() {
        writeln!(out, "{}", colorize_string(SUCCESS))?;
        return Ok(());
    }

    writeln!(out, "{}", colorize_string(FAILURE))?;
    if verbose {
        if !outcome.verdict.passed() {
            writeln!(out, "Nonmatching files:")?;
            for name in outcome.verdict.mismatch_names() {
                writeln!(out, "{}", name)?;
            }
        }
        if outcome.strict && !outcome.failed_invocations.is_empty() {
            writeln!(out, "Failed invocations:")?;
            for path in &outcome.failed_invocations {
                writeln!(out, "{}", path.display())?;
            }
        }
    }
    Ok(())
}
