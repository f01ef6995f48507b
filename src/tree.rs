//! Lenient parse of the trimmed region into an owned node tree.
//!
//! Harness reports are parsed in HTML mode rather than strict XML: real
//! output arrives truncated mid-tag, with unterminated elements and stray
//! entities, and a strict parser rejects it outright. html5ever's tree
//! builder recovers instead (auto-closing open elements, decoding standard
//! entities, passing unknown ones through), and the resulting rcdom is
//! converted once into the crate's own [`Node`] tree so the rest of the
//! pipeline never touches reference-counted handles.

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::errors::ScrubError;

/// A parsed markup node: an element or a run of character data.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An element with its attributes in source order and its ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Depth-first, document-order search for the first element named
    /// `tag`, the receiver included.
    pub fn find_first(&self, tag: &str) -> Option<&Element> {
        if self.name == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| match child {
            Node::Element(element) => element.find_first(tag),
            Node::Text(_) => None,
        })
    }

    /// Concatenation of every descendant text node, markup stripped.
    pub fn text(&self) -> String {
        let mut buffer = String::new();
        self.collect_text(&mut buffer);
        buffer
    }

    fn collect_text(&self, buffer: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(text) => buffer.push_str(text),
                Node::Element(element) => element.collect_text(buffer),
            }
        }
    }
}

/// Parses `data` with html5ever's recovering tree builder and returns the
/// root element of the recovered document.
pub fn parse_lenient(data: &str) -> Result<Element, ScrubError> {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(data);
    convert_children(&dom.document)
        .into_iter()
        .find_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
        .ok_or_else(|| ScrubError::Parse {
            message: "recovered document contains no elements".to_string(),
        })
}

// Comments, doctypes, and processing instructions are dropped here; the
// downstream whitelist can never emit them.
fn convert_children(handle: &Handle) -> Vec<Node> {
    let mut nodes = Vec::new();
    for child in handle.children.borrow().iter() {
        match &child.data {
            NodeData::Element { name, attrs, .. } => {
                nodes.push(Node::Element(Element {
                    name: name.local.to_string(),
                    attrs: attrs
                        .borrow()
                        .iter()
                        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                        .collect(),
                    children: convert_children(child),
                }));
            }
            NodeData::Text { contents } => {
                nodes.push(Node::Text(contents.borrow().to_string()));
            }
            _ => {}
        }
    }
    nodes
}
