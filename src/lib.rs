//! D-Bus topology explorer.
//!
//! Enumerates the services on a message bus and walks each service's object
//! tree through the standard `Introspect` method, answering questions such as
//! "which objects does this service export", "which interfaces does this
//! object implement" and "what arguments does this method take".
//!
//! The public API is organised into four layers:
//!
//! - **[`bus`]**: the connection seam, with a zbus-backed and an in-memory implementation
//! - **[`introspect`]**: the introspection document model and its XML parser
//! - **[`walker`]**: stateless queries that introspect and parse on every call
//! - **[`commands`]**: top-level subcommand orchestration for the `dbushelp` binary
#![cfg_attr(test, allow(missing_docs))]
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod bus;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod introspect;
pub mod logging;
pub mod walker;
