//! In-memory bus serving canned introspection documents.
use std::collections::{HashMap, HashSet};
use std::io;
use std::sync::Mutex;

use super::BusConnection;
use crate::error::BusError;

const EMPTY_NODE: &str = "<node/>";

/// A synthetic bus for tests and offline inspection.
///
/// Documents are registered per `(bus name, object path)`. Introspecting an
/// unregistered path on a known bus name yields an empty `<node/>`, the way
/// real services answer for paths they do not export; an unknown bus name or
/// a path marked unreachable fails with [`BusError::Connection`].
///
/// Every introspection request is recorded so callers can check how the bus
/// was walked.
#[derive(Debug, Default)]
pub struct MemoryBus {
    documents: HashMap<(String, String), String>,
    services: HashSet<String>,
    names: Vec<String>,
    activatable: Vec<String>,
    unreachable: HashSet<(String, String)>,
    requests: Mutex<Vec<(String, String)>>,
}

impl MemoryBus {
    /// Create an empty bus with no services.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `xml` when `object_path` on `bus_name` is introspected.
    ///
    /// The bus name is also added to the `ListNames` result if it is not
    /// there yet.
    #[must_use]
    pub fn with_document(mut self, bus_name: &str, object_path: &str, xml: &str) -> Self {
        self.register(bus_name);
        self.documents
            .insert((bus_name.to_string(), object_path.to_string()), xml.to_string());
        self
    }

    /// Add names to the `ListNames` result, in the given order.
    #[must_use]
    pub fn with_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names.into_iter().map(Into::<String>::into) {
            self.register(&name);
        }
        self
    }

    /// Set the `ListActivatableNames` result.
    #[must_use]
    pub fn with_activatable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.activatable = names.into_iter().map(Into::into).collect();
        self
    }

    /// Make introspection of `object_path` on `bus_name` fail.
    #[must_use]
    pub fn with_unreachable(mut self, bus_name: &str, object_path: &str) -> Self {
        self.register(bus_name);
        self.unreachable
            .insert((bus_name.to_string(), object_path.to_string()));
        self
    }

    /// Every `(bus name, object path)` introspected so far, in call order.
    #[must_use]
    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests
            .lock()
            .map_or_else(|_| Vec::new(), |guard| guard.clone())
    }

    fn register(&mut self, bus_name: &str) {
        if self.services.insert(bus_name.to_string()) {
            self.names.push(bus_name.to_string());
        }
    }
}

impl BusConnection for MemoryBus {
    fn introspect(&self, bus_name: &str, object_path: &str) -> Result<String, BusError> {
        let key = (bus_name.to_string(), object_path.to_string());
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(key.clone());
        }
        let target = format!("{bus_name}:{object_path}");
        if !self.services.contains(bus_name) {
            return Err(BusError::connection(
                target,
                io::Error::new(io::ErrorKind::NotFound, "the name has no owner"),
            ));
        }
        if self.unreachable.contains(&key) {
            return Err(BusError::connection(
                target,
                io::Error::new(io::ErrorKind::TimedOut, "no reply"),
            ));
        }
        Ok(self
            .documents
            .get(&key)
            .map_or_else(|| EMPTY_NODE.to_string(), Clone::clone))
    }

    fn list_names(&self) -> Result<Vec<String>, BusError> {
        Ok(self.names.clone())
    }

    fn list_activatable_names(&self) -> Result<Vec<String>, BusError> {
        Ok(self.activatable.clone())
    }
}
