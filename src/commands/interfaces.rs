//! Command: list the interfaces of one object.
use std::io::Write;

use anyhow::Result;

use super::write_lines;
use crate::bus::BusConnection;
use crate::cli::ObjectOpts;
use crate::logging::Logger;
use crate::walker;

/// Run the interfaces command.
///
/// # Errors
///
/// Returns an error if the object cannot be introspected or output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &ObjectOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    log.debug(&format!("{}:{}", opts.bus_name, opts.object_path));
    let interfaces = walker::list_interfaces(conn, &opts.bus_name, &opts.object_path)?;
    write_lines(out, interfaces)
}
