//! Introspection XML parser built on `quick-xml` events.
//!
//! The parser keeps a stack of open elements. Elements the model does not
//! describe (`<annotation>`, `<property>`, documentation extensions) are
//! tracked as [`Frame::Ignored`] so their whole subtree is skipped.
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Argument, Direction, Interface, Member, MemberKind, Node};
use crate::error::ParseError;

/// Partially built `<arg>`; its direction default depends on the owning member.
#[derive(Debug)]
struct PendingArg {
    name: Option<String>,
    signature: String,
    direction: Option<Direction>,
}

/// An element that has been opened but not yet closed.
#[derive(Debug)]
enum Frame {
    Node(Node),
    Interface(Interface),
    Member(Member),
    Arg(PendingArg),
    Ignored,
}

impl Frame {
    const fn describe(&self) -> &'static str {
        match self {
            Self::Node(_) => "<node>",
            Self::Interface(_) => "<interface>",
            Self::Member(m) => match m.kind {
                MemberKind::Method => "<method>",
                MemberKind::Signal => "<signal>",
            },
            Self::Arg(_) => "<arg>",
            Self::Ignored => "an ignored element",
        }
    }
}

/// Parse an introspection document into its root [`Node`].
///
/// # Errors
///
/// Returns a [`ParseError`] if the text is not well-formed XML, if the root
/// element is not `<node>`, if a schema element appears in the wrong place,
/// or if a required `name`/`type` attribute is missing.
pub fn parse_document(xml: &str) -> Result<Node, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            ParseError::Malformed(format!("at byte {}: {e}", reader.buffer_position()))
        })?;
        match event {
            Event::Start(e) => {
                let frame = open(&e, stack.last(), root.is_some())?;
                stack.push(frame);
            }
            Event::Empty(e) => {
                let frame = open(&e, stack.last(), root.is_some())?;
                close(frame, &mut stack, &mut root);
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| ParseError::Malformed("unbalanced closing tag".to_string()))?;
                close(frame, &mut stack, &mut root);
            }
            Event::Eof => break,
            // Declarations, DOCTYPE, comments, processing instructions and
            // stray text carry nothing the model needs.
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ParseError::Malformed(
            "unexpected end of document".to_string(),
        ));
    }
    root.ok_or(ParseError::NoRootNode)
}

/// Turn a start tag into a frame, checking it against its parent.
fn open(e: &BytesStart<'_>, parent: Option<&Frame>, have_root: bool) -> Result<Frame, ParseError> {
    let element = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let Some(parent) = parent else {
        if have_root || element != "node" {
            return Err(ParseError::UnexpectedElement {
                element,
                parent: "the document root".to_string(),
            });
        }
        return Ok(Frame::Node(Node {
            name: attribute(e, "name")?,
            ..Node::default()
        }));
    };

    let frame = match (element.as_str(), parent) {
        (_, Frame::Ignored) => Frame::Ignored,
        ("node", Frame::Node(_)) => Frame::Node(Node {
            name: attribute(e, "name")?,
            ..Node::default()
        }),
        ("interface", Frame::Node(_)) => Frame::Interface(Interface {
            name: required(e, &element, "name")?,
            members: Vec::new(),
        }),
        ("method" | "signal", Frame::Interface(_)) => {
            let kind = if element == "method" {
                MemberKind::Method
            } else {
                MemberKind::Signal
            };
            Frame::Member(Member {
                name: required(e, &element, "name")?,
                kind,
                args: Vec::new(),
            })
        }
        ("arg", Frame::Member(_)) => {
            let direction = match attribute(e, "direction")? {
                Some(value) => Some(
                    Direction::from_attribute(&value)
                        .ok_or(ParseError::InvalidDirection(value))?,
                ),
                None => None,
            };
            Frame::Arg(PendingArg {
                name: attribute(e, "name")?,
                signature: required(e, &element, "type")?,
                direction,
            })
        }
        ("node" | "interface" | "method" | "signal" | "arg", parent) => {
            return Err(ParseError::UnexpectedElement {
                element,
                parent: parent.describe().to_string(),
            });
        }
        _ => Frame::Ignored,
    };
    Ok(frame)
}

/// Attach a finished frame to its parent, or make it the document root.
fn close(frame: Frame, stack: &mut [Frame], root: &mut Option<Node>) {
    match (frame, stack.last_mut()) {
        (Frame::Node(node), None) => *root = Some(node),
        (Frame::Node(node), Some(Frame::Node(parent))) => parent.children.push(node),
        (Frame::Interface(iface), Some(Frame::Node(parent))) => parent.interfaces.push(iface),
        (Frame::Member(member), Some(Frame::Interface(parent))) => parent.members.push(member),
        (Frame::Arg(arg), Some(Frame::Member(parent))) => {
            let direction = arg
                .direction
                .unwrap_or_else(|| parent.kind.default_direction());
            parent.args.push(Argument {
                name: arg.name,
                signature: arg.signature,
                direction,
            });
        }
        // `open` only builds frames that fit their parent, so anything else is
        // an ignored subtree.
        _ => {}
    }
}

/// Read an optional attribute, unescaping its value.
fn attribute(e: &BytesStart<'_>, key: &str) -> Result<Option<String>, ParseError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| ParseError::Malformed(err.to_string()))?;
        if attr.key.as_ref() == key.as_bytes() {
            let value = attr
                .unescape_value()
                .map_err(|err| ParseError::Malformed(err.to_string()))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn required(e: &BytesStart<'_>, element: &str, key: &str) -> Result<String, ParseError> {
    attribute(e, key)?.ok_or_else(|| ParseError::MissingAttribute {
        element: element.to_string(),
        attribute: key.to_string(),
    })
}
