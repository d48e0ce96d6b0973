//! Command-line interface definitions.
use clap::{Args, Parser, Subcommand};

use crate::bus::BusKind;
use crate::config::Overrides;

/// Top-level CLI entry point for dbushelp.
#[derive(Parser, Debug)]
#[command(
    name = "dbushelp",
    about = "Explore D-Bus services, objects, interfaces and their members",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Use the system bus
    #[arg(long, global = true, conflicts_with_all = ["session", "address"])]
    pub system: bool,

    /// Use the session bus (default)
    #[arg(long, global = true, conflicts_with = "address")]
    pub session: bool,

    /// Connect to an explicit bus address (e.g. unix:path=/run/dbus/system_bus_socket)
    #[arg(long, global = true)]
    pub address: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    /// Walk several buses one after another instead of in parallel
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

impl GlobalOpts {
    /// Configuration values forced on the command line.
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        let bus = if self.system {
            Some(BusKind::System)
        } else if self.session {
            Some(BusKind::Session)
        } else {
            None
        };
        Overrides {
            bus,
            address: self.address.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List bus names
    Buses(BusesOpts),
    /// List object paths exposing at least one interface
    Objects(ObjectsOpts),
    /// List interfaces of an object
    Interfaces(ObjectOpts),
    /// List methods of an interface
    Methods(InterfaceOpts),
    /// List signals of an interface
    Signals(InterfaceOpts),
    /// List arguments of one method or signal
    Args(ArgsOpts),
    /// Map every method of an object to its input signature
    Signatures(SignaturesOpts),
    /// Print the raw introspection XML of an object
    Introspect(IntrospectOpts),
    /// Dump every object, interface, member and argument of one or more buses
    Tree(TreeOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the per-command log file.
    #[must_use]
    pub const fn log_name(&self) -> &'static str {
        match self {
            Self::Buses(_) => "buses",
            Self::Objects(_) => "objects",
            Self::Interfaces(_) => "interfaces",
            Self::Methods(_) => "methods",
            Self::Signals(_) => "signals",
            Self::Args(_) => "args",
            Self::Signatures(_) => "signatures",
            Self::Introspect(_) => "introspect",
            Self::Tree(_) => "tree",
            Self::Version => "version",
        }
    }
}

/// Options for the `buses` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct BusesOpts {
    /// List activatable names instead of currently owned names
    #[arg(long)]
    pub activatable: bool,

    /// Include private names such as :1.42
    #[arg(long)]
    pub private: bool,

    /// Keep the order reported by the bus daemon
    #[arg(long)]
    pub unsorted: bool,
}

/// Options for the `objects` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ObjectsOpts {
    /// Bus name to walk, e.g. org.freedesktop.DBus
    pub bus_name: String,

    /// Object path to start from
    #[arg(long, default_value = "/")]
    pub root: String,
}

/// Options naming one object.
#[derive(Args, Debug, Clone)]
pub struct ObjectOpts {
    /// Bus name, e.g. org.freedesktop.DBus
    pub bus_name: String,

    /// Object path, e.g. /org/freedesktop/DBus
    pub object_path: String,
}

/// Options naming one interface of one object.
#[derive(Args, Debug, Clone)]
pub struct InterfaceOpts {
    /// The object to inspect.
    #[command(flatten)]
    pub object: ObjectOpts,

    /// Interface name, e.g. org.freedesktop.DBus.Introspectable
    pub interface: String,
}

/// Options for the `args` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ArgsOpts {
    /// The interface to inspect.
    #[command(flatten)]
    pub interface: InterfaceOpts,

    /// Method whose arguments to list
    #[arg(long)]
    pub method: Option<String>,

    /// Signal whose arguments to list
    #[arg(long)]
    pub signal: Option<String>,
}

/// Options for the `signatures` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SignaturesOpts {
    /// Bus name
    pub bus_name: String,

    /// Object path; defaults to the first object found on the bus
    pub object_path: Option<String>,
}

/// Options for the `introspect` subcommand.
#[derive(Args, Debug, Clone)]
pub struct IntrospectOpts {
    /// Bus name
    pub bus_name: String,

    /// Object path
    #[arg(default_value = "/")]
    pub object_path: String,
}

/// Options for the `tree` subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct TreeOpts {
    /// Bus names to dump; all owned names when empty
    pub bus_names: Vec<String>,

    /// Include private names when dumping all buses
    #[arg(long)]
    pub private: bool,

    /// Emit JSON instead of an indented listing
    #[arg(long)]
    pub json: bool,
}
