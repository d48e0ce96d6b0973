//! Command: list bus names.
use std::io::Write;

use anyhow::Result;

use super::write_lines;
use crate::bus::BusConnection;
use crate::cli::BusesOpts;
use crate::logging::Logger;
use crate::walker::{self, ListBusesOptions};

/// Combine configured listing defaults with the command-line flags.
///
/// Flags can only move away from the defaults; they never restore them.
#[must_use]
pub fn listing_options(opts: &BusesOpts, defaults: ListBusesOptions) -> ListBusesOptions {
    ListBusesOptions {
        hide_inactive: defaults.hide_inactive && !opts.activatable,
        include_private: defaults.include_private || opts.private,
        sorted: defaults.sorted && !opts.unsorted,
    }
}

/// Run the buses command.
///
/// # Errors
///
/// Returns an error if the bus daemon cannot be queried or output fails.
pub fn run<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &BusesOpts,
    defaults: ListBusesOptions,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let listing = listing_options(opts, defaults);
    log.debug(&format!("{listing:?}"));
    let names = walker::list_buses(conn, &listing)?;
    write_lines(out, names)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let opts = BusesOpts {
            activatable: true,
            private: true,
            unsorted: true,
        };
        assert_eq!(
            listing_options(&opts, ListBusesOptions::default()),
            ListBusesOptions {
                hide_inactive: false,
                include_private: true,
                sorted: false,
            }
        );
    }

    #[test]
    fn no_flags_keep_configured_defaults() {
        let configured = ListBusesOptions {
            hide_inactive: true,
            include_private: true,
            sorted: false,
        };
        assert_eq!(listing_options(&BusesOpts::default(), configured), configured);
    }
}
