//! Minimal XML element tree and writer.
//!
//! Only what the converter needs: named elements holding text and child
//! elements, written with indentation and encoded in a chosen charset.
//!
//! ```rust
//! use pipe2xml::XmlElement;
//!
//! let mut phone = XmlElement::new("phone");
//! phone.add_child_value("mobile", "073-101801");
//!
//! let mut person = XmlElement::new("person");
//! person.add_child_value("firstname", "Elof");
//! person.add_child(phone);
//!
//! assert_eq!(
//!     person.to_xml_string(0, 2),
//!     "<person>\n  <firstname>Elof</firstname>\n  <phone>\n    <mobile>073-101801</mobile>\n  </phone>\n</person>\n"
//! );
//! ```

use encoding_rs::Encoding;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    Text(String),
    Element(XmlElement),
}

/// An XML element with text and element children, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    children: Vec<Node>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        XmlElement {
            name: name.into(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a leaf element `<name>value</name>`.
    pub fn add_child_value(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        let mut leaf = XmlElement::new(name);
        leaf.add_text(value);
        self.add_child(leaf)
    }

    pub fn add_child(&mut self, child: XmlElement) -> &mut Self {
        self.children.push(Node::Element(child));
        self
    }

    pub fn add_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|element| element.name == name)
    }

    /// Concatenated text content of this element's direct text children.
    #[must_use]
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                Node::Element(_) => None,
            })
            .collect()
    }

    /// Renders the element, starting `level` indentation steps deep, each
    /// step `indent` spaces wide. The output always ends with a newline.
    #[must_use]
    pub fn to_xml_string(&self, level: usize, indent: usize) -> String {
        let mut out = String::with_capacity(256);
        self.render(&mut out, level, indent);
        out
    }

    /// Writes the element to `sink`, encoded in `charset`.
    ///
    /// Characters the charset cannot represent are written as numeric
    /// character references.
    ///
    /// # Errors
    ///
    /// Returns any error from the sink.
    pub fn write<W: Write + ?Sized>(
        &self,
        sink: &mut W,
        charset: &'static Encoding,
        level: usize,
        indent: usize,
    ) -> io::Result<()> {
        write_encoded(sink, charset, &self.to_xml_string(level, indent))
    }

    fn render(&self, out: &mut String, level: usize, indent: usize) {
        push_indent(out, level, indent);
        out.push('<');
        out.push_str(&self.name);

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        if self.children.iter().all(|node| matches!(node, Node::Text(_))) {
            out.push('>');
            for node in &self.children {
                if let Node::Text(text) = node {
                    escape_into(out, text);
                }
            }
        } else {
            out.push_str(">\n");
            for node in &self.children {
                match node {
                    Node::Element(element) => element.render(out, level + 1, indent),
                    Node::Text(text) => {
                        push_indent(out, level + 1, indent);
                        escape_into(out, text);
                        out.push('\n');
                    }
                }
            }
            push_indent(out, level, indent);
        }

        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

/// Encodes `text` in `charset` and writes it to `sink`.
pub(crate) fn write_encoded<W: Write + ?Sized>(
    sink: &mut W,
    charset: &'static Encoding,
    text: &str,
) -> io::Result<()> {
    let (bytes, _, _) = charset.encode(text);
    sink.write_all(&bytes)
}

/// Whether `name` can be used as an element name.
///
/// Deliberately narrower than the XML grammar: ASCII letters, digits,
/// `_`, `-` and `.`, starting with a letter or `_`.
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}

#[inline]
fn push_indent(out: &mut String, level: usize, indent: usize) {
    for _ in 0..level * indent {
        out.push(' ');
    }
}

#[inline]
fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
}
