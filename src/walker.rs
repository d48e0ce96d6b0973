//! Bus topology walker.
//!
//! Every operation here is a stateless query-then-parse pass over a
//! caller-owned [`BusConnection`]: nothing is cached between calls, nothing
//! is retried, and errors propagate to the caller unchanged.
//!
//! [`list_object_paths`] is the only operation that issues more than one
//! introspection request. It walks the object tree depth-first with an
//! explicit work stack, so tree depth is bounded by memory rather than by the
//! call stack.
use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::bus::{BusConnection, is_private_name};
use crate::error::BusError;
use crate::introspect::{Argument, Direction, Interface, MemberKind, Node, parse_document};

/// Options for [`list_buses`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListBusesOptions {
    /// List names currently owned (`ListNames`) rather than names that can
    /// be activated (`ListActivatableNames`).
    pub hide_inactive: bool,
    /// Keep private names such as `:1.42`.
    pub include_private: bool,
    /// Sort lexicographically instead of keeping the daemon's order.
    pub sorted: bool,
}

impl Default for ListBusesOptions {
    fn default() -> Self {
        Self {
            hide_inactive: true,
            include_private: false,
            sorted: true,
        }
    }
}

/// Identifies one method or one signal of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberSelector {
    /// A method with the given name.
    Method(String),
    /// A signal with the given name.
    Signal(String),
}

impl MemberSelector {
    /// Build a selector from a pair of optional names.
    ///
    /// Exactly one of the two must be given; both or neither yields `None`.
    #[must_use]
    pub fn from_options(method: Option<&str>, signal: Option<&str>) -> Option<Self> {
        match (method, signal) {
            (Some(name), None) => Some(Self::Method(name.to_string())),
            (None, Some(name)) => Some(Self::Signal(name.to_string())),
            _ => None,
        }
    }

    /// Member kind the selector matches.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        match self {
            Self::Method(_) => MemberKind::Method,
            Self::Signal(_) => MemberKind::Signal,
        }
    }

    /// Member name the selector matches.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Method(name) | Self::Signal(name) => name,
        }
    }
}

/// Everything a bus exposes, object by object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusReport {
    /// Bus name that was walked.
    pub bus_name: String,
    /// Interface-bearing objects in traversal order.
    pub objects: Vec<ObjectReport>,
}

/// Interfaces exposed at one object path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectReport {
    /// Object path.
    pub path: String,
    /// Interfaces in document order.
    pub interfaces: Vec<Interface>,
}

/// Check that `path` is a valid D-Bus object path.
///
/// # Errors
///
/// Returns [`BusError::InvalidObjectPath`] if the path is empty, relative,
/// has empty segments or a trailing slash, or contains characters outside
/// `[A-Za-z0-9_]`.
pub fn validate_object_path(path: &str) -> Result<(), BusError> {
    let valid = match path.strip_prefix('/') {
        Some("") => true,
        Some(rest) => rest.split('/').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }),
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(BusError::InvalidObjectPath(path.to_string()))
    }
}

/// Join a child node name onto its parent path without doubling the root slash.
#[must_use]
pub fn child_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Introspect one object path and parse the result.
///
/// # Errors
///
/// Returns [`BusError::InvalidObjectPath`] before any request is made if the
/// path is malformed, [`BusError::Connection`] if the object cannot be
/// reached, and [`BusError::Parse`] if the reply is not a valid document.
pub fn introspect<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    object_path: &str,
) -> Result<Node, BusError> {
    validate_object_path(object_path)?;
    tracing::debug!("introspecting {bus_name}:{object_path}");
    let xml = conn.introspect(bus_name, object_path)?;
    parse_document(&xml).map_err(|source| BusError::Parse {
        bus_name: bus_name.to_string(),
        object_path: object_path.to_string(),
        source,
    })
}

/// List the names registered on the bus.
///
/// # Errors
///
/// Returns [`BusError::Connection`] if the bus daemon cannot be reached.
pub fn list_buses<C: BusConnection + ?Sized>(
    conn: &C,
    opts: &ListBusesOptions,
) -> Result<Vec<String>, BusError> {
    let names = if opts.hide_inactive {
        conn.list_names()?
    } else {
        conn.list_activatable_names()?
    };
    let mut names: Vec<String> = names
        .into_iter()
        .filter(|name| opts.include_private || !is_private_name(name))
        .collect();
    if opts.sorted {
        names.sort();
    }
    tracing::debug!("{} bus names listed", names.len());
    Ok(names)
}

/// List every interface-bearing object path at or below `root_path`.
///
/// Paths come back in depth-first pre-order: a path precedes its
/// descendants, and a child's whole subtree precedes its next sibling.
/// Routing nodes without interfaces are traversed but not returned.
///
/// # Errors
///
/// Propagates any [`introspect`] error, and returns
/// [`BusError::DuplicateObjectPath`] if the service leads the walk to the
/// same path twice.
pub fn list_object_paths<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    root_path: &str,
) -> Result<Vec<String>, BusError> {
    Ok(walk_objects(conn, bus_name, root_path)?
        .into_iter()
        .map(|(path, _)| path)
        .collect())
}

/// Walk the tree below `root_path`, keeping the parsed node of every
/// interface-bearing path.
///
/// Every visited path is recorded, routing nodes included, so a service
/// that names the same path twice (or names a node after its parent) ends
/// the walk instead of looping.
fn walk_objects<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    root_path: &str,
) -> Result<Vec<(String, Node)>, BusError> {
    validate_object_path(root_path)?;

    let mut pending = vec![root_path.to_string()];
    let mut seen: HashSet<String> = HashSet::new();
    let mut objects = Vec::new();

    while let Some(path) = pending.pop() {
        if !seen.insert(path.clone()) {
            return Err(BusError::DuplicateObjectPath(path));
        }
        let node = introspect(conn, bus_name, &path)?;
        let children: Vec<String> = node
            .child_names()
            .map(|name| child_path(&path, name))
            .collect();

        // Reversed so the first declared child is popped next.
        pending.extend(children.into_iter().rev());
        if node.has_interfaces() {
            objects.push((path, node));
        }
    }

    tracing::debug!("{bus_name}: {} objects under {root_path}", objects.len());
    Ok(objects)
}

/// List the interfaces attached directly to `object_path`.
///
/// # Errors
///
/// Propagates any [`introspect`] error.
pub fn list_interfaces<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    object_path: &str,
) -> Result<Vec<String>, BusError> {
    let node = introspect(conn, bus_name, object_path)?;
    Ok(node.interfaces.into_iter().map(|i| i.name).collect())
}

/// List the names of the methods or signals of `interface`.
///
/// An interface that is not exposed at the path yields an empty list.
///
/// # Errors
///
/// Propagates any [`introspect`] error.
pub fn list_members<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    object_path: &str,
    interface: &str,
    kind: MemberKind,
) -> Result<Vec<String>, BusError> {
    let node = introspect(conn, bus_name, object_path)?;
    Ok(node
        .interfaces_named(interface)
        .flat_map(|i| i.members_of(kind))
        .map(|m| m.name.clone())
        .collect())
}

/// List the arguments of the first member matching `selector`.
///
/// An unknown interface or member yields an empty list.
///
/// # Errors
///
/// Propagates any [`introspect`] error.
pub fn list_arguments<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    object_path: &str,
    interface: &str,
    selector: &MemberSelector,
) -> Result<Vec<Argument>, BusError> {
    let node = introspect(conn, bus_name, object_path)?;
    Ok(node
        .interfaces_named(interface)
        .flat_map(|i| i.members_of(selector.kind()))
        .find(|m| m.name == selector.name())
        .map(|m| m.args.clone())
        .unwrap_or_default())
}

/// Map `"<interface>.<method>"` to the input signature of every method at a path.
///
/// When an interface declares the same method name twice, the first
/// declaration wins.
///
/// Without an explicit path, the first interface-bearing object of the bus
/// is used; a bus without objects yields an empty map.
///
/// # Errors
///
/// Propagates any [`introspect`] or [`list_object_paths`] error.
pub fn method_signatures<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
    object_path: Option<&str>,
) -> Result<BTreeMap<String, String>, BusError> {
    let path = match object_path {
        Some(path) => path.to_string(),
        None => match list_object_paths(conn, bus_name, "/")?.into_iter().next() {
            Some(first) => first,
            None => return Ok(BTreeMap::new()),
        },
    };

    let node = introspect(conn, bus_name, &path)?;
    let mut signatures = BTreeMap::new();
    for iface in &node.interfaces {
        for method in iface.members_of(MemberKind::Method) {
            signatures
                .entry(format!("{}.{}", iface.name, method.name))
                .or_insert_with(|| method.signature(Direction::In));
        }
    }
    Ok(signatures)
}

/// Walk a bus and collect the interfaces of every object.
///
/// Each node is introspected exactly once; the report is built from the
/// same documents the walk followed.
///
/// # Errors
///
/// Propagates any [`introspect`] error or a duplicate path found by the walk.
pub fn describe_bus<C: BusConnection + ?Sized>(
    conn: &C,
    bus_name: &str,
) -> Result<BusReport, BusError> {
    let objects = walk_objects(conn, bus_name, "/")?
        .into_iter()
        .map(|(path, node)| ObjectReport {
            path,
            interfaces: node.interfaces,
        })
        .collect();
    Ok(BusReport {
        bus_name: bus_name.to_string(),
        objects,
    })
}
