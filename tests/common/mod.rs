// Shared helpers for integration tests.
//
// Builds synthetic services on a `MemoryBus` so each integration test can
// describe an object tree without writing introspection XML by hand.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::fmt::Write as _;

use dbushelp::bus::MemoryBus;
use dbushelp::logging::Logger;

/// Render a `<node>` document with the given interfaces (each a complete
/// `<interface>` element) and child node names.
pub fn node_xml(interfaces: &[&str], children: &[&str]) -> String {
    let mut xml = String::from("<node>\n");
    for iface in interfaces {
        xml.push_str(iface);
        xml.push('\n');
    }
    for child in children {
        writeln!(xml, "  <node name=\"{child}\"/>").expect("write to string");
    }
    xml.push_str("</node>\n");
    xml
}

/// An `<interface>` element with one argument-less method.
pub fn simple_interface(name: &str) -> String {
    format!("  <interface name=\"{name}\">\n    <method name=\"Ping\"/>\n  </interface>")
}

/// Fluent builder for one synthetic service.
///
/// Paths are registered with their interfaces and children; every path that
/// is never registered answers with an empty node.
pub struct ServiceBuilder {
    bus_name: String,
    bus: MemoryBus,
}

impl ServiceBuilder {
    /// Begin a service named `bus_name` on a fresh bus.
    pub fn new(bus_name: &str) -> Self {
        Self::on(MemoryBus::new(), bus_name)
    }

    /// Begin a service named `bus_name` on an existing bus.
    pub fn on(bus: MemoryBus, bus_name: &str) -> Self {
        Self {
            bus_name: bus_name.to_string(),
            bus,
        }
    }

    /// Register `path` with interfaces (by name) and child node names.
    pub fn object(mut self, path: &str, interfaces: &[&str], children: &[&str]) -> Self {
        let ifaces: Vec<String> = interfaces.iter().map(|i| simple_interface(i)).collect();
        let refs: Vec<&str> = ifaces.iter().map(String::as_str).collect();
        self.bus = self
            .bus
            .with_document(&self.bus_name, path, &node_xml(&refs, children));
        self
    }

    /// Register `path` with a raw XML document.
    pub fn raw(mut self, path: &str, xml: &str) -> Self {
        self.bus = self.bus.with_document(&self.bus_name, path, xml);
        self
    }

    /// Finish building and return the bus.
    pub fn build(self) -> MemoryBus {
        self.bus
    }
}

/// Join a child name onto a parent path the way a walker should.
pub fn join(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{name}")
    } else {
        format!("{parent}/{name}")
    }
}

/// Build a chain `/n/n/.../n` of `depth` levels below `/`, every level
/// carrying one interface. Returns the bus and the expected walk order.
pub fn deep_service(bus_name: &str, depth: usize) -> (MemoryBus, Vec<String>) {
    let mut builder = ServiceBuilder::new(bus_name).object("/", &[], &["n"]);
    let mut expected = Vec::with_capacity(depth);
    let mut path = String::from("/n");
    for level in 0..depth {
        let children: &[&str] = if level + 1 < depth { &["n"] } else { &[] };
        builder = builder.object(&path, &["com.example.Level"], children);
        expected.push(path.clone());
        path.push_str("/n");
    }
    (builder.build(), expected)
}

/// Build a tree of the given `fanout` and `depth` where every node below the
/// root carries one interface. Returns the bus and the expected pre-order.
pub fn wide_service(bus_name: &str, fanout: usize, depth: usize) -> (MemoryBus, Vec<String>) {
    layered_service(bus_name, fanout, depth, |_| true)
}

/// Build a tree of the given `fanout` and `depth` where nodes at level `n`
/// (the root is level 0 and never carries one) get an interface only when
/// `bearing(n)` holds. Returns the bus and the expected pre-order of the
/// interface-bearing paths.
pub fn layered_service(
    bus_name: &str,
    fanout: usize,
    depth: usize,
    bearing: impl Fn(usize) -> bool,
) -> (MemoryBus, Vec<String>) {
    let names: Vec<String> = (0..fanout).map(|i| format!("c{i}")).collect();
    let mut expected = Vec::new();
    let builder = add_level(
        ServiceBuilder::new(bus_name),
        "/",
        &names,
        0,
        depth,
        &bearing,
        &mut expected,
    );
    (builder.build(), expected)
}

fn add_level(
    mut builder: ServiceBuilder,
    path: &str,
    names: &[String],
    level: usize,
    depth: usize,
    bearing: &dyn Fn(usize) -> bool,
    expected: &mut Vec<String>,
) -> ServiceBuilder {
    let children: Vec<&str> = if level < depth {
        names.iter().map(String::as_str).collect()
    } else {
        Vec::new()
    };
    let has_interface = level > 0 && bearing(level);
    let interfaces: &[&str] = if has_interface { &["com.example.Node"] } else { &[] };
    builder = builder.object(path, interfaces, &children);
    if has_interface {
        expected.push(path.to_string());
    }
    if level < depth {
        for name in names {
            builder = add_level(
                builder,
                &join(path, name),
                names,
                level + 1,
                depth,
                bearing,
                expected,
            );
        }
    }
    builder
}

/// A logger for commands under test.
pub fn logger() -> Logger {
    Logger::new("integration-test")
}
