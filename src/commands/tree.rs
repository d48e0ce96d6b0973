//! Command: dump everything one or more buses expose.
//!
//! Buses are walked independently. A bus that fails to walk is reported as a
//! warning and skipped; the command still prints every other bus and then
//! fails with the number of buses it could not walk.
use std::io::Write;

use anyhow::Result;

use crate::bus::BusConnection;
use crate::cli::TreeOpts;
use crate::error::BusError;
use crate::logging::Logger;
use crate::walker::{self, BusReport, ListBusesOptions};

/// Run the tree command.
///
/// Without explicit bus names, buses are listed the way the `buses` command
/// lists them with the same `defaults`, plus private names when requested.
///
/// # Errors
///
/// Returns an error if the bus list cannot be fetched, output fails, or at
/// least one bus could not be walked.
pub fn run<C: BusConnection + Sync + ?Sized>(
    conn: &C,
    opts: &TreeOpts,
    defaults: ListBusesOptions,
    parallel: bool,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    let bus_names = if opts.bus_names.is_empty() {
        let listing = ListBusesOptions {
            include_private: defaults.include_private || opts.private,
            ..defaults
        };
        walker::list_buses(conn, &listing)?
    } else {
        opts.bus_names.clone()
    };

    log.stage(&format!("Walking {} buses", bus_names.len()));
    let results = walk_all(conn, &bus_names, parallel);

    let mut reports = Vec::with_capacity(results.len());
    let mut failed = 0_usize;
    for (bus_name, result) in bus_names.iter().zip(results) {
        match result {
            Ok(report) => reports.push(report),
            Err(e) => {
                log.warn(&format!("{bus_name}: {e}"));
                failed += 1;
            }
        }
    }

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &reports)?;
        writeln!(out)?;
    } else {
        for report in &reports {
            render(report, out)?;
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} bus(es) could not be walked");
    }
    Ok(())
}

/// Walk every bus, keeping results in input order.
fn walk_all<C: BusConnection + Sync + ?Sized>(
    conn: &C,
    bus_names: &[String],
    parallel: bool,
) -> Vec<Result<BusReport, BusError>> {
    if parallel && bus_names.len() > 1 {
        use rayon::prelude::*;
        bus_names
            .par_iter()
            .map(|name| walker::describe_bus(conn, name))
            .collect()
    } else {
        bus_names
            .iter()
            .map(|name| walker::describe_bus(conn, name))
            .collect()
    }
}

/// Write one bus as an indented listing.
fn render(report: &BusReport, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "{}", report.bus_name)?;
    for object in &report.objects {
        writeln!(out, "  {}", object.path)?;
        for iface in &object.interfaces {
            writeln!(out, "    {}", iface.name)?;
            for member in &iface.members {
                writeln!(out, "      {} {}", member.kind, member.name)?;
                for arg in &member.args {
                    writeln!(out, "        {arg}")?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::bus::MemoryBus;

    const ROOT: &str = r#"<node><node name="app"/></node>"#;
    const APP: &str = r#"<node>
  <interface name="com.example.App">
    <method name="Ping"><arg type="s" direction="out"/></method>
    <signal name="Changed"><arg name="value" type="u"/></signal>
  </interface>
</node>"#;

    fn bus() -> MemoryBus {
        MemoryBus::new()
            .with_document("svc", "/", ROOT)
            .with_document("svc", "/app", APP)
            .with_names(["svc"])
    }

    fn run_tree(conn: &MemoryBus, opts: &TreeOpts, parallel: bool) -> (Result<()>, String) {
        run_tree_with(conn, opts, ListBusesOptions::default(), parallel)
    }

    fn run_tree_with(
        conn: &MemoryBus,
        opts: &TreeOpts,
        defaults: ListBusesOptions,
        parallel: bool,
    ) -> (Result<()>, String) {
        let log = Logger::new("test");
        let mut out = Vec::new();
        let result = run(conn, opts, defaults, parallel, &log, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn renders_indented_listing() {
        let (result, text) = run_tree(&bus(), &TreeOpts::default(), false);
        result.unwrap();
        assert_eq!(
            text,
            "svc\n  /app\n    com.example.App\n      method Ping\n        s (out)\n      signal Changed\n        value: u (out)\n"
        );
    }

    #[test]
    fn json_lists_objects() {
        let opts = TreeOpts {
            json: true,
            ..TreeOpts::default()
        };
        let (result, text) = run_tree(&bus(), &opts, false);
        result.unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["bus_name"], "svc");
        assert_eq!(value[0]["objects"][0]["path"], "/app");
    }

    #[test]
    fn failing_bus_is_skipped_and_counted() {
        let opts = TreeOpts {
            bus_names: vec!["svc".to_string(), "gone".to_string()],
            ..TreeOpts::default()
        };
        let (result, text) = run_tree(&bus(), &opts, true);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("1 bus(es)"));
        assert!(text.starts_with("svc\n"), "healthy bus still printed");
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let conn = bus()
            .with_document("other", "/", APP)
            .with_names(["other"]);
        let (a, sequential) = run_tree(&conn, &TreeOpts::default(), false);
        let (b, parallel) = run_tree(&conn, &TreeOpts::default(), true);
        a.unwrap();
        b.unwrap();
        assert_eq!(sequential, parallel);
        assert!(sequential.starts_with("other\n"), "buses listed in sorted order");
    }

    #[test]
    fn configured_listing_selects_buses() {
        let conn = bus()
            .with_document("com.example.Lazy", "/", APP)
            .with_activatable(["com.example.Lazy"]);
        let defaults = ListBusesOptions {
            hide_inactive: false,
            ..ListBusesOptions::default()
        };
        let (result, text) = run_tree_with(&conn, &TreeOpts::default(), defaults, false);
        result.unwrap();
        assert!(text.starts_with("com.example.Lazy
"));
        assert!(!text.contains("svc"), "owned names are not listed");
    }

    #[test]
    fn private_flag_adds_to_configured_listing() {
        let conn = bus().with_names([":1.4"]);
        let defaults = ListBusesOptions {
            sorted: false,
            ..ListBusesOptions::default()
        };
        let opts = TreeOpts {
            private: true,
            ..TreeOpts::default()
        };
        let (result, text) = run_tree_with(&conn, &opts, defaults, false);
        result.unwrap();
        let buses: Vec<&str> = text.lines().filter(|l| !l.starts_with(' ')).collect();
        assert_eq!(buses, vec!["svc", ":1.4"]);
    }
}
