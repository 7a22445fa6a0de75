//! Sanitization traversal engine
//!
//! The engine never edits a node in place while walking its siblings.
//! Instead each node is consumed by [`Sanitizer::process`], which returns the
//! sequence of nodes that takes its place in the parent: empty for a
//! deletion, the node itself for a keep, or the already-processed children
//! for an unwrap. A parent's new child list is the concatenation of those
//! sequences, so every original node is evaluated exactly once, removed
//! subtrees are never entered, and unwrapped children are processed once at
//! the depth they end up at.

use std::fmt;
use std::io::Read;
use std::mem;

use tracing::{debug, instrument, trace};

use crate::dom::{Document, Element, Node};
use crate::error::{Error, Result};
use crate::html::ParseOptions;
use crate::whitelist::Whitelist;

/// What happens to an element whose tag is not whitelisted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Disposition {
    /// Drop the element and everything below it
    #[default]
    Remove,
    /// Drop the element but keep its children, which are sanitized in turn
    Unwrap,
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remove => f.write_str("remove"),
            Self::Unwrap => f.write_str("unwrap"),
        }
    }
}

/// Applies one whitelist with one disposition
///
/// Holds only shared references, so a single whitelist can back any number
/// of sanitizers on different threads.
#[derive(Clone, Copy, Debug)]
pub struct Sanitizer<'w> {
    whitelist: &'w Whitelist,
    disposition: Disposition,
}

impl<'w> Sanitizer<'w> {
    pub const fn new(whitelist: &'w Whitelist, disposition: Disposition) -> Self {
        Self {
            whitelist,
            disposition,
        }
    }

    pub const fn disposition(&self) -> Disposition {
        self.disposition
    }

    /// Sanitize a whole document
    ///
    /// Fails only when the tree carries a parser error marker. The check
    /// covers the whole tree, including subtrees that would be removed, and
    /// runs before anything is rewritten.
    #[instrument(skip_all, fields(disposition = %self.disposition))]
    pub fn sanitize(&self, mut document: Document) -> Result<Document> {
        if let Some(message) = document.find_error() {
            debug!(%message, "document carries a parse error");
            return Err(Error::parse_failure(message));
        }

        let children = mem::take(&mut document.children);
        document.children = self.process_all(children);

        debug!(nodes = document.children.len(), "sanitized document");
        Ok(document)
    }

    /// Nodes that replace `node` in its parent's children
    pub fn process(&self, node: Node) -> Vec<Node> {
        match node {
            Node::Element(el) => self.process_element(el),
            Node::Text(text) => vec![Node::Text(self.process_text(text))],
            Node::Comment(_) if self.whitelist.strip_comments() => Vec::new(),
            // error markers are rejected by `sanitize` before traversal
            Node::Comment(_) | Node::Doctype(_) | Node::Error(_) => vec![node],
        }
    }

    fn process_all(&self, nodes: Vec<Node>) -> Vec<Node> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            out.extend(self.process(node));
        }
        out
    }

    fn process_element(&self, mut el: Element) -> Vec<Node> {
        let Some(allowed) = self.whitelist.allowed_attributes(&el.name) else {
            return match self.disposition {
                Disposition::Remove => {
                    trace!(tag = %el.name, "removing element");
                    Vec::new()
                }
                Disposition::Unwrap => {
                    trace!(tag = %el.name, children = el.children.len(), "unwrapping element");
                    self.process_all(el.children)
                }
            };
        };

        let before = el.attributes.len();
        el.retain_attributes(|attr| allowed.contains(&attr.name));
        if el.attributes.len() != before {
            trace!(
                tag = %el.name,
                dropped = before - el.attributes.len(),
                "stripped attributes"
            );
        }

        el.children = self.process_all(mem::take(&mut el.children));
        vec![Node::Element(el)]
    }

    fn process_text(&self, text: String) -> String {
        if !self.whitelist.strip_whitespace() {
            return text;
        }
        let trimmed = text.trim();
        if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        }
    }
}

/// Sanitize `document` against `whitelist`
pub fn sanitize(
    document: Document,
    whitelist: &Whitelist,
    disposition: Disposition,
) -> Result<Document> {
    Sanitizer::new(whitelist, disposition).sanitize(document)
}

impl Whitelist {
    /// Read a document, remove non-whitelisted elements, return the markup
    pub fn sanitize_remove<R: Read>(&self, reader: R) -> Result<String> {
        crate::sanitize_reader(reader, self, Disposition::Remove, ParseOptions::default())
    }

    /// Read a document, unwrap non-whitelisted elements, return the markup
    pub fn sanitize_unwrap<R: Read>(&self, reader: R) -> Result<String> {
        crate::sanitize_reader(reader, self, Disposition::Unwrap, ParseOptions::default())
    }
}
