//! Command: list the arguments of one method or signal.
use std::io::Write;

use anyhow::Result;

use super::write_lines;
use crate::bus::BusConnection;
use crate::cli::ArgsOpts;
use crate::logging::Logger;
use crate::walker::{self, MemberSelector};

/// Run the args command.
///
/// Passing both `--method` and `--signal`, or neither, prints nothing and
/// still succeeds; a warning says why.
///
/// # Errors
///
/// Returns an error if the object cannot be introspected or output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &ArgsOpts,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(selector) = MemberSelector::from_options(opts.method.as_deref(), opts.signal.as_deref())
    else {
        log.warn("pass exactly one of --method or --signal");
        return Ok(());
    };

    let object = &opts.interface.object;
    let args = walker::list_arguments(
        conn,
        &object.bus_name,
        &object.object_path,
        &opts.interface.interface,
        &selector,
    )?;
    write_lines(out, args)
}
