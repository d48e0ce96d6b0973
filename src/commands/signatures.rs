//! Command: map the methods of an object to their input signatures.
use std::io::Write;

use anyhow::Result;

use crate::bus::BusConnection;
use crate::cli::SignaturesOpts;
use crate::logging::Logger;
use crate::walker;

/// Run the signatures command.
///
/// Prints one `interface.Method(signature)` line per method, sorted.
///
/// # Errors
///
/// Returns an error if the bus cannot be walked or output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &SignaturesOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    if opts.object_path.is_none() {
        log.info(&format!("no path given, using the first object of {}", opts.bus_name));
    }
    let signatures =
        walker::method_signatures(conn, &opts.bus_name, opts.object_path.as_deref())?;
    for (method, signature) in &signatures {
        writeln!(out, "{method}({signature})")?;
    }
    Ok(())
}
