//! Access to a message bus.
//!
//! [`BusConnection`] is the only thing the walker needs from a bus: one
//! introspection call per object path plus the two name listings of the bus
//! daemon. [`ZbusConnection`] talks to a real bus; [`MemoryBus`] serves
//! canned documents for tests and offline experiments.
mod live;
mod memory;

pub use live::ZbusConnection;
pub use memory::MemoryBus;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::{BusError, ConfigError};

/// Leading character of private (unique) bus names such as `:1.42`.
pub const PRIVATE_NAME_SENTINEL: char = ':';

/// Well-known name of the bus daemon itself.
pub const DAEMON_NAME: &str = "org.freedesktop.DBus";

/// Query surface of a bus.
///
/// Implementations must be stateless between calls: every call is an
/// independent round trip, so callers may issue calls from several threads
/// when the implementation is `Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait BusConnection {
    /// Return the raw introspection XML of `object_path` on `bus_name`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the bus, the service, or the object
    /// cannot be reached.
    fn introspect(&self, bus_name: &str, object_path: &str) -> Result<String, BusError>;

    /// Names currently owned on the bus (`ListNames`).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the bus daemon cannot be reached.
    fn list_names(&self) -> Result<Vec<String>, BusError>;

    /// Names the bus daemon can start on demand (`ListActivatableNames`).
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the bus daemon cannot be reached.
    fn list_activatable_names(&self) -> Result<Vec<String>, BusError>;
}

/// Which standard bus to connect to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum BusKind {
    /// The per-login session bus.
    #[default]
    Session,
    /// The system-wide bus.
    System,
}

impl fmt::Display for BusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Session => write!(f, "session"),
            Self::System => write!(f, "system"),
        }
    }
}

impl FromStr for BusKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "session" | "user" => Ok(Self::Session),
            "system" => Ok(Self::System),
            _ => Err(ConfigError::InvalidBusKind(s.to_string())),
        }
    }
}

impl TryFrom<String> for BusKind {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Whether `name` is a private (unique) connection name.
#[must_use]
pub fn is_private_name(name: &str) -> bool {
    name.starts_with(PRIVATE_NAME_SENTINEL)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn bus_kind_parses_known_values() {
        assert_eq!("session".parse::<BusKind>().unwrap(), BusKind::Session);
        assert_eq!("SYSTEM".parse::<BusKind>().unwrap(), BusKind::System);
        assert_eq!("user".parse::<BusKind>().unwrap(), BusKind::Session);
    }

    #[test]
    fn bus_kind_rejects_unknown_values() {
        let err = "starter".parse::<BusKind>().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBusKind(ref s) if s == "starter"));
    }

    #[test]
    fn bus_kind_display_round_trips() {
        for kind in [BusKind::Session, BusKind::System] {
            assert_eq!(kind.to_string().parse::<BusKind>().unwrap(), kind);
        }
    }

    #[test]
    fn private_names_use_colon_sentinel() {
        assert!(is_private_name(":1.42"));
        assert!(!is_private_name("org.freedesktop.DBus"));
        assert!(!is_private_name(""));
    }
}
