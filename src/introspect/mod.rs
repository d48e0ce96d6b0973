//! Parsed introspection documents.
//!
//! A document is a tree of [`Node`]s. Each node carries the interfaces it
//! exposes locally and the child nodes it declares. Child nodes are often
//! empty stubs that only carry a name; the service must be asked again at the
//! child path to learn what it exposes.
mod parse;

pub use parse::parse_document;

use std::fmt;

use serde::Serialize;

/// Kind of an interface member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    /// A callable method.
    Method,
    /// A broadcast signal.
    Signal,
}

impl MemberKind {
    /// Direction assumed for arguments that do not declare one.
    #[must_use]
    pub const fn default_direction(self) -> Direction {
        match self {
            Self::Method => Direction::In,
            Self::Signal => Direction::Out,
        }
    }

    /// XML element name used for this kind.
    #[must_use]
    pub const fn element(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Signal => "signal",
        }
    }
}

impl fmt::Display for MemberKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element())
    }
}

/// Direction of a member argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Passed by the caller.
    In,
    /// Returned (methods) or emitted (signals).
    Out,
}

impl Direction {
    /// Parse an XML `direction` attribute value.
    #[must_use]
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "in" => Some(Self::In),
            "out" => Some(Self::Out),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::In => f.write_str("in"),
            Self::Out => f.write_str("out"),
        }
    }
}

/// One argument of a method or signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    /// Argument name; optional in the introspection format.
    pub name: Option<String>,
    /// D-Bus type signature, e.g. `s` or `a{sv}`.
    pub signature: String,
    /// Whether the argument flows in or out.
    pub direction: Direction,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{name}: {} ({})", self.signature, self.direction),
            None => write!(f, "{} ({})", self.signature, self.direction),
        }
    }
}

/// A method or signal declared by an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    /// Member name, e.g. `Introspect`.
    pub name: String,
    /// Method or signal.
    pub kind: MemberKind,
    /// Arguments in declaration order.
    pub args: Vec<Argument>,
}

impl Member {
    /// Concatenated signature of all arguments flowing in `direction`.
    #[must_use]
    pub fn signature(&self, direction: Direction) -> String {
        self.args
            .iter()
            .filter(|a| a.direction == direction)
            .map(|a| a.signature.as_str())
            .collect()
    }
}

/// An interface exposed at an object path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interface {
    /// Interface name, e.g. `org.freedesktop.DBus.Introspectable`.
    pub name: String,
    /// Methods and signals in document order.
    pub members: Vec<Member>,
}

impl Interface {
    /// Members of the given kind, in document order.
    pub fn members_of(&self, kind: MemberKind) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

/// One `<node>` element of an introspection document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Relative name of a child node; usually absent on the root.
    pub name: Option<String>,
    /// Interfaces exposed directly at this node.
    pub interfaces: Vec<Interface>,
    /// Declared child nodes.
    pub children: Vec<Self>,
}

impl Node {
    /// Whether this node exposes at least one interface itself.
    #[must_use]
    pub const fn has_interfaces(&self) -> bool {
        !self.interfaces.is_empty()
    }

    /// Interfaces with the given name, in document order.
    pub fn interfaces_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Interface> {
        self.interfaces.iter().filter(move |i| i.name == name)
    }

    /// Names of the children that can be addressed, in document order.
    ///
    /// A child without a name, or with an empty one, has no path of its own.
    pub fn child_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .iter()
            .filter_map(|c| c.name.as_deref())
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn arg(name: Option<&str>, signature: &str, direction: Direction) -> Argument {
        Argument {
            name: name.map(String::from),
            signature: signature.to_string(),
            direction,
        }
    }

    #[test]
    fn default_direction_by_kind() {
        assert_eq!(MemberKind::Method.default_direction(), Direction::In);
        assert_eq!(MemberKind::Signal.default_direction(), Direction::Out);
    }

    #[test]
    fn direction_from_attribute() {
        assert_eq!(Direction::from_attribute("in"), Some(Direction::In));
        assert_eq!(Direction::from_attribute("out"), Some(Direction::Out));
        assert_eq!(Direction::from_attribute("IN"), None);
    }

    #[test]
    fn member_signature_concatenates_by_direction() {
        let member = Member {
            name: "Call".to_string(),
            kind: MemberKind::Method,
            args: vec![
                arg(Some("a"), "s", Direction::In),
                arg(None, "as", Direction::Out),
                arg(Some("b"), "a{sv}", Direction::In),
            ],
        };
        assert_eq!(member.signature(Direction::In), "sa{sv}");
        assert_eq!(member.signature(Direction::Out), "as");
    }

    #[test]
    fn argument_display_with_and_without_name() {
        assert_eq!(arg(Some("x"), "u", Direction::In).to_string(), "x: u (in)");
        assert_eq!(arg(None, "s", Direction::Out).to_string(), "s (out)");
    }

    #[test]
    fn child_names_skip_unnamed_and_empty_children() {
        let node = Node {
            name: None,
            interfaces: vec![],
            children: vec![
                Node {
                    name: Some("a".to_string()),
                    ..Node::default()
                },
                Node::default(),
                Node {
                    name: Some(String::new()),
                    ..Node::default()
                },
                Node {
                    name: Some("b".to_string()),
                    ..Node::default()
                },
            ],
        };
        assert_eq!(node.child_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!node.has_interfaces());
    }

    #[test]
    fn members_of_filters_kind() {
        let iface = Interface {
            name: "com.example.I".to_string(),
            members: vec![
                Member {
                    name: "M".to_string(),
                    kind: MemberKind::Method,
                    args: vec![],
                },
                Member {
                    name: "S".to_string(),
                    kind: MemberKind::Signal,
                    args: vec![],
                },
            ],
        };
        let signals: Vec<_> = iface
            .members_of(MemberKind::Signal)
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(signals, vec!["S"]);
    }
}
