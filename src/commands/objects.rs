//! Command: list the object paths of a bus.
use std::io::Write;

use anyhow::Result;

use super::write_lines;
use crate::bus::BusConnection;
use crate::cli::ObjectsOpts;
use crate::logging::Logger;
use crate::walker;

/// Run the objects command.
///
/// # Errors
///
/// Returns an error if the walk fails or output cannot be written.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &ObjectsOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    log.stage(&format!("Walking {} from {}", opts.bus_name, opts.root));
    let paths = walker::list_object_paths(conn, &opts.bus_name, &opts.root)?;
    log.info(&format!("{} objects", paths.len()));
    write_lines(out, paths)
}
