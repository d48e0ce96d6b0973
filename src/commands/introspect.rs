//! Command: print raw introspection XML.
use std::io::Write;

use anyhow::Result;

use crate::bus::BusConnection;
use crate::cli::IntrospectOpts;
use crate::logging::Logger;
use crate::walker::validate_object_path;

/// Run the introspect command.
///
/// # Errors
///
/// Returns an error if the path is invalid, the object cannot be reached, or
/// output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &IntrospectOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    validate_object_path(&opts.object_path)?;
    log.debug(&format!("{}:{}", opts.bus_name, opts.object_path));
    let xml = conn.introspect(&opts.bus_name, &opts.object_path)?;
    writeln!(out, "{}", xml.trim_end())?;
    Ok(())
}
