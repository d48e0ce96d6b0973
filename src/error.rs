//! Domain-specific error types for dbushelp.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors (e.g., [`BusError`], [`ConfigError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! DbushelpError
//! ├── Bus(BusError): unreachable services, bad documents, bad paths
//! │   └── Parse(ParseError): introspection XML that does not fit the schema
//! └── Config(ConfigError): config file I/O and syntax
//! ```
//!
//! Empty listings (unknown interface, unknown member) are deliberately *not*
//! errors; callers must not treat an empty result as a failure.

use thiserror::Error;

/// Boxed error from the underlying bus client library.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Top-level error type for dbushelp.
///
/// Aggregates domain-specific sub-errors and is convertible to
/// [`anyhow::Error`] for use at CLI command boundaries.
#[derive(Error, Debug)]
pub enum DbushelpError {
    /// Bus query or traversal error.
    #[error("Bus error: {0}")]
    Bus(#[from] BusError),

    /// Configuration-related error (parsing, I/O).
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors raised while querying a bus or walking its object tree.
#[derive(Error, Debug)]
pub enum BusError {
    /// The bus, the named service, or the object could not be reached.
    ///
    /// Never retried internally; the caller decides whether to try again.
    #[error("Could not reach {target}: {source}")]
    Connection {
        /// What was being addressed, e.g. `org.foo.Bar:/org/foo`.
        target: String,
        /// Underlying error from the bus client.
        source: BoxedSource,
    },

    /// The introspection document returned by a service could not be parsed.
    #[error("Invalid introspection data from {bus_name}:{object_path}: {source}")]
    Parse {
        /// Bus name that produced the document.
        bus_name: String,
        /// Object path that produced the document.
        object_path: String,
        /// Parser failure.
        source: ParseError,
    },

    /// The same object path was discovered twice during one traversal.
    ///
    /// Signals a malformed tree reported by the service.
    #[error("Object path '{0}' was discovered more than once")]
    DuplicateObjectPath(String),

    /// The object path is not a valid D-Bus object path.
    #[error("Invalid object path '{0}'")]
    InvalidObjectPath(String),
}

impl BusError {
    /// Wrap a client library error as a [`BusError::Connection`].
    pub fn connection(
        target: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Connection {
            target: target.into(),
            source: Box::new(source),
        }
    }
}

/// Errors that arise from parsing an introspection document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The text is not well-formed XML.
    #[error("malformed XML: {0}")]
    Malformed(String),

    /// An element appeared where the introspection schema does not allow it.
    #[error("unexpected <{element}> inside {parent}")]
    UnexpectedElement {
        /// Name of the offending element.
        element: String,
        /// Description of where it appeared.
        parent: String,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element lacking the attribute.
        element: String,
        /// Name of the missing attribute.
        attribute: String,
    },

    /// An `<arg>` carries a direction other than `in` or `out`.
    #[error("invalid argument direction '{0}'")]
    InvalidDirection(String),

    /// The document contains no root `<node>` element.
    #[error("document has no root <node> element")]
    NoRootNode,
}

/// Errors that arise from loading the configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading the config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file contains invalid TOML or unknown keys.
    #[error("Invalid TOML syntax in {file}: {message}")]
    InvalidSyntax {
        /// Path to the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// The `bus` key names an unknown bus kind.
    #[error("Invalid bus '{0}': must be one of session, system")]
    InvalidBusKind(String),
}
