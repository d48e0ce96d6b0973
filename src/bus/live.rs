//! [`BusConnection`] over a real bus using `zbus`'s blocking API.
use zbus::blocking::Connection;
use zbus::blocking::fdo::{DBusProxy, IntrospectableProxy};
use zbus::proxy::CacheProperties;

use super::{BusConnection, BusKind, DAEMON_NAME};
use crate::error::BusError;

/// A blocking connection to a session, system, or custom-address bus.
///
/// Each query builds a short-lived proxy; the connection itself is only
/// closed when this value is dropped by its owner.
#[derive(Debug, Clone)]
pub struct ZbusConnection {
    inner: Connection,
    label: String,
}

impl ZbusConnection {
    /// Connect to one of the standard buses.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the bus address cannot be resolved
    /// or the connection handshake fails.
    pub fn connect(kind: BusKind) -> Result<Self, BusError> {
        let label = format!("{kind} bus");
        let inner = match kind {
            BusKind::Session => Connection::session(),
            BusKind::System => Connection::system(),
        }
        .map_err(|e| BusError::connection(&label, e))?;
        tracing::debug!("connected to {label}");
        Ok(Self { inner, label })
    }

    /// Connect to a bus at an explicit address, e.g. `unix:path=/run/bus`.
    ///
    /// # Errors
    ///
    /// Returns [`BusError::Connection`] if the address is invalid or the
    /// connection handshake fails.
    pub fn connect_address(address: &str) -> Result<Self, BusError> {
        let label = format!("bus at {address}");
        let inner = zbus::blocking::connection::Builder::address(address)
            .and_then(zbus::blocking::connection::Builder::build)
            .map_err(|e| BusError::connection(&label, e))?;
        tracing::debug!("connected to {label}");
        Ok(Self { inner, label })
    }

    /// Human-readable description of the bus this connection talks to.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    fn daemon(&self) -> Result<DBusProxy<'_>, BusError> {
        DBusProxy::new(&self.inner).map_err(|e| BusError::connection(DAEMON_NAME, e))
    }
}

impl BusConnection for ZbusConnection {
    fn introspect(&self, bus_name: &str, object_path: &str) -> Result<String, BusError> {
        let target = format!("{bus_name}:{object_path}");
        let proxy = IntrospectableProxy::builder(&self.inner)
            .destination(bus_name)
            .and_then(|b| b.path(object_path))
            .map(|b| b.cache_properties(CacheProperties::No))
            .and_then(zbus::blocking::proxy::Builder::build)
            .map_err(|e| BusError::connection(&target, e))?;
        proxy
            .introspect()
            .map_err(|e| BusError::connection(&target, e))
    }

    fn list_names(&self) -> Result<Vec<String>, BusError> {
        let names = self
            .daemon()?
            .list_names()
            .map_err(|e| BusError::connection(DAEMON_NAME, e))?;
        Ok(names.iter().map(ToString::to_string).collect())
    }

    fn list_activatable_names(&self) -> Result<Vec<String>, BusError> {
        let names = self
            .daemon()?
            .list_activatable_names()
            .map_err(|e| BusError::connection(DAEMON_NAME, e))?;
        Ok(names.iter().map(ToString::to_string).collect())
    }
}
