//! Command: list the methods or the signals of one interface.
use std::io::Write;

use anyhow::Result;

use super::write_lines;
use crate::bus::BusConnection;
use crate::cli::InterfaceOpts;
use crate::introspect::MemberKind;
use crate::logging::Logger;
use crate::walker;

/// Run the methods or signals command.
///
/// An interface the object does not expose prints nothing.
///
/// # Errors
///
/// Returns an error if the object cannot be introspected or output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &InterfaceOpts,
    kind: MemberKind,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let members = walker::list_members(
        conn,
        &opts.object.bus_name,
        &opts.object.object_path,
        &opts.interface,
        kind,
    )?;
    if members.is_empty() {
        log.debug(&format!("no {kind}s on {}", opts.interface));
    }
    write_lines(out, members)
}
