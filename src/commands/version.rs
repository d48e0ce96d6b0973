//! Command: print version information.
use std::io::Write;

use anyhow::Result;

/// Version string baked in at build time, falling back to the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DBUSHELP_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the dbushelp version.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn run(out: &mut dyn Write) -> Result<()> {
    writeln!(out, "dbushelp {}", version())?;
    Ok(())
}
