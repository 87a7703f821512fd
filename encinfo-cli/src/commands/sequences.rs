//! Implementation of the 'sequences' subcommand.

use crate::cli::SequencesArgs;
use crate::error::CliResult;

use std::io::Write;

/// Writes the canonical sequence names of the selected standard, one per
/// line, in report order.
pub fn write_sequences<W: Write>(writer: &mut W, args: &SequencesArgs) -> CliResult<()> {
    for name in args.standard.sequences() {
        writeln!(writer, "{name}")?;
    }
    Ok(())
}

/// Prints the canonical sequence list to stdout.
pub fn run_sequences(args: &SequencesArgs) -> CliResult<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_sequences(&mut handle, args)?;
    handle.flush()?;
    Ok(())
}
