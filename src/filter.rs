//! Whitelist-driven re-serialization of the parsed report.
//!
//! Only tags named in the [`FilterConfig`] appear in the output; everything
//! else is discarded together with its whole subtree. The walk is
//! line-oriented: structural wrappers, verbatim dumps, and escaped-text
//! elements each end on their own newline.

use std::io::{self, Write};

use crate::tree::{Element, Node};

/// How a whitelisted tag is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// Dump the node's full parsed markup, descendants unfiltered.
    Verbatim,
    /// Emit an attribute-less wrapper around the node's escaped plain text.
    EscapedText,
    /// Reproduce the opening tag with its attributes, then filter element
    /// children recursively. Text children are dropped.
    Children,
}

/// Immutable filter configuration: the top-level tag bounding the region of
/// interest, plus the ordered tag whitelist.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub top_tag: String,
    rules: Vec<(String, EmitMode)>,
}

impl FilterConfig {
    pub fn new(top_tag: impl Into<String>, rules: Vec<(String, EmitMode)>) -> Self {
        Self {
            top_tag: top_tag.into(),
            rules,
        }
    }

    /// Rebinds the top-level tag, renaming its whitelist entry so the new
    /// tag keeps the structural-wrapper role.
    pub fn with_top_tag(mut self, tag: &str) -> Self {
        if tag != self.top_tag {
            for rule in &mut self.rules {
                if rule.0 == self.top_tag {
                    rule.0 = tag.to_string();
                }
            }
            self.top_tag = tag.to_string();
        }
        self
    }

    fn mode(&self, tag: &str) -> Option<EmitMode> {
        self.rules
            .iter()
            .find(|(name, _)| name == tag)
            .map(|(_, mode)| *mode)
    }
}

impl Default for FilterConfig {
    /// The fixed JUnit whitelist: verbatim `error`/`failure`, escaped
    /// `system-out`, structural `testsuite`/`testcase`.
    fn default() -> Self {
        Self::new(
            "testsuite",
            vec![
                ("error".to_string(), EmitMode::Verbatim),
                ("failure".to_string(), EmitMode::Verbatim),
                ("system-out".to_string(), EmitMode::EscapedText),
                ("testsuite".to_string(), EmitMode::Children),
                ("testcase".to_string(), EmitMode::Children),
            ],
        )
    }
}

// The five characters escaped in system-out text; everything else passes
// through untouched, control and non-ASCII characters included.
fn escape(ch: char) -> Option<&'static str> {
    match ch {
        '<' => Some("&lt;"),
        '&' => Some("&amp;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&apos;"),
        _ => None,
    }
}

/// Recursively serializes `element` under the whitelist.
///
/// A tag absent from the whitelist is discarded whole: the walk does not
/// look for whitelisted descendants inside a dropped subtree, so a
/// `failure` nested under an unrecognized wrapper is lost.
pub fn write_element<W: Write>(
    out: &mut W,
    element: &Element,
    config: &FilterConfig,
) -> io::Result<()> {
    let Some(mode) = config.mode(&element.name) else {
        return Ok(());
    };
    match mode {
        EmitMode::Verbatim => {
            write_markup(out, element)?;
            writeln!(out)
        }
        EmitMode::EscapedText => {
            write!(out, "<{}>", element.name)?;
            for ch in element.text().chars() {
                match escape(ch) {
                    Some(entity) => out.write_all(entity.as_bytes())?,
                    None => write!(out, "{ch}")?,
                }
            }
            writeln!(out, "</{}>", element.name)
        }
        EmitMode::Children => {
            write!(out, "<{}", element.name)?;
            for (name, value) in &element.attrs {
                // Attribute values are emitted raw, quotes included.
                write!(out, " {name}=\"{value}\"")?;
            }
            writeln!(out, ">")?;
            for child in &element.children {
                if let Node::Element(inner) = child {
                    write_element(out, inner, config)?;
                }
            }
            writeln!(out, "</{}>", element.name)
        }
    }
}

// Full markup of a parsed subtree, no filtering, no escaping.
fn write_markup<W: Write>(out: &mut W, element: &Element) -> io::Result<()> {
    write!(out, "<{}", element.name)?;
    for (name, value) in &element.attrs {
        write!(out, " {name}=\"{value}\"")?;
    }
    write!(out, ">")?;
    for child in &element.children {
        match child {
            Node::Text(text) => out.write_all(text.as_bytes())?,
            Node::Element(inner) => write_markup(out, inner)?,
        }
    }
    write!(out, "</{}>", element.name)
}
