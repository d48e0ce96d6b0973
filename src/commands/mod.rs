//! Subcommand implementations.
//!
//! Every command writes its results to the `out` writer it is given (stdout
//! in the binary) and its progress to the [`Logger`], which goes to stderr.
pub mod arguments;
pub mod buses;
pub mod interfaces;
pub mod introspect;
pub mod members;
pub mod objects;
pub mod signatures;
pub mod tree;
pub mod version;

use std::fmt::Display;
use std::io::Write;

use anyhow::Result;

use crate::bus::{BusConnection, ZbusConnection};
use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::introspect::MemberKind;
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
///
/// Loads the configuration, applies command-line overrides, and opens the
/// bus connection so that each command does not have to repeat the
/// boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// Effective configuration.
    pub config: Config,
    /// Open connection to the selected bus.
    pub conn: ZbusConnection,
}

impl CommandSetup {
    /// Load configuration and connect to the configured bus.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is invalid or the bus
    /// cannot be reached.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        log.stage("Loading configuration");
        let config = Config::load(global.config.as_deref())?.apply_overrides(&global.overrides());
        log.debug(&format!("bus: {}", config.bus));
        if let Some(address) = &config.address {
            log.debug(&format!("address: {address}"));
        }

        log.stage("Connecting");
        let conn = match &config.address {
            Some(address) => ZbusConnection::connect_address(address)?,
            None => ZbusConnection::connect(config.bus)?,
        };
        log.info(&format!("connected to {}", conn.label()));

        Ok(Self { config, conn })
    }
}

/// Run `command` against `conn`.
///
/// `parallel` controls whether commands touching several buses walk them
/// concurrently.
///
/// # Errors
///
/// Returns the first error raised by the command.
pub fn dispatch<C: BusConnection + Sync + ?Sized>(
    conn: &C,
    config: &Config,
    command: &Command,
    parallel: bool,
    log: &Logger,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Buses(opts) => buses::run(conn, opts, config.buses.into(), log, out),
        Command::Objects(opts) => objects::run(conn, opts, log, out),
        Command::Interfaces(opts) => interfaces::run(conn, opts, log, out),
        Command::Methods(opts) => members::run(conn, opts, MemberKind::Method, log, out),
        Command::Signals(opts) => members::run(conn, opts, MemberKind::Signal, log, out),
        Command::Args(opts) => arguments::run(conn, opts, log, out),
        Command::Signatures(opts) => signatures::run(conn, opts, log, out),
        Command::Introspect(opts) => introspect::run(conn, opts, log, out),
        Command::Tree(opts) => tree::run(conn, opts, config.buses.into(), parallel, log, out),
        Command::Version => version::run(out),
    }
}

/// Write each item on its own line.
pub(crate) fn write_lines<I>(out: &mut dyn Write, items: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: Display,
{
    for item in items {
        writeln!(out, "{item}")?;
    }
    Ok(())
}
