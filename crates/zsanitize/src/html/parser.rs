//! html5ever-backed parser
//!
//! html5ever builds an `RcDom`, which is then copied into the owned
//! [`Document`] model. Error recovery is html5ever's own; the only failures
//! surfaced here are unreadable input, nesting past the configured depth,
//! and (in strict mode) any parse error html5ever reported.

use std::io::Read;

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::{debug, instrument};

use crate::dom::{Attribute, Doctype, Document, Element, Namespace, Node};
use crate::error::{Error, ErrorKind, Result};

/// Maximum element nesting accepted from the parser
///
/// Matches the tree depth browsers' HTML parsers stop nesting at.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Parser settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject input that html5ever had to repair
    pub strict: bool,
    /// Maximum element nesting depth (0 means unlimited)
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Default limits, but any parse error fails the parse
    pub const fn strict() -> Self {
        Self {
            strict: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parse a complete HTML document
#[instrument(skip_all, fields(len = input.len()))]
pub fn parse_document(input: &str, options: ParseOptions) -> Result<Document> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default()).one(input);
    let root = dom.document.clone();
    convert(&dom, &root, options)
}

/// Parse a complete HTML document from a byte stream
///
/// Bytes are decoded as UTF-8; invalid sequences become U+FFFD.
#[instrument(skip_all)]
pub fn parse_document_from_reader<R: Read>(mut reader: R, options: ParseOptions) -> Result<Document> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut reader)
        .map_err(|err| Error::with_message(ErrorKind::Io, format!("failed to read html: {err}")))?;
    let root = dom.document.clone();
    convert(&dom, &root, options)
}

/// Parse an HTML fragment as if it were the content of `<body>`
///
/// The returned document holds the fragment's nodes directly, without the
/// `html`/`head`/`body` scaffolding of a full document.
#[instrument(skip_all, fields(len = input.len()))]
pub fn parse_fragment(input: &str, options: ParseOptions) -> Result<Document> {
    let context = QualName::new(
        None,
        html5ever::Namespace::from(Namespace::Html.uri()),
        LocalName::from("body"),
    );
    let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .one(input);

    // html5ever hangs the fragment under a synthetic <html> element
    let root = dom
        .document
        .children
        .borrow()
        .iter()
        .find(|child| matches!(child.data, NodeData::Element { .. }))
        .cloned()
        .unwrap_or_else(|| dom.document.clone());
    convert(&dom, &root, options)
}

fn convert(dom: &RcDom, root: &Handle, options: ParseOptions) -> Result<Document> {
    debug!(errors = dom.errors.len(), "html5ever finished");
    if options.strict {
        if let Some(first) = dom.errors.first() {
            return Err(Error::parse_failure(first.to_string()));
        }
    }

    let converter = Converter {
        max_depth: options.max_depth,
    };
    Ok(Document::with_children(converter.children(root, 1)?))
}

struct Converter {
    max_depth: usize,
}

impl Converter {
    fn children(&self, handle: &Handle, depth: usize) -> Result<Vec<Node>> {
        let children = handle.children.borrow();
        let mut out = Vec::with_capacity(children.len());
        for child in children.iter() {
            if let Some(node) = self.node(child, depth)? {
                out.push(node);
            }
        }
        Ok(out)
    }

    fn node(&self, handle: &Handle, depth: usize) -> Result<Option<Node>> {
        let node = match &handle.data {
            // only ever the root, never a child
            NodeData::Document => None,
            NodeData::Doctype {
                name,
                public_id,
                system_id,
            } => Some(Node::Doctype(Doctype {
                name: name.to_string(),
                public_id: public_id.to_string(),
                system_id: system_id.to_string(),
            })),
            NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
            NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
            NodeData::ProcessingInstruction { target, contents } => {
                Some(Node::Comment(format!("?{target} {contents}")))
            }
            NodeData::Element {
                name,
                attrs,
                template_contents,
                ..
            } => {
                if self.max_depth != 0 && depth > self.max_depth {
                    return Err(Error::with_message(
                        ErrorKind::DepthLimit,
                        format!("elements nested deeper than {} levels", self.max_depth),
                    ));
                }

                let attributes = attrs
                    .borrow()
                    .iter()
                    .map(|attr| Attribute::new(qualified_name(&attr.name), attr.value.to_string()))
                    .collect();

                // <template> keeps its content in a separate fragment
                let source = template_contents
                    .borrow()
                    .clone()
                    .unwrap_or_else(|| handle.clone());

                Some(Node::Element(Element {
                    name: name.local.to_string(),
                    namespace: Namespace::from_uri(&name.ns).unwrap_or_default(),
                    attributes,
                    children: self.children(&source, depth + 1)?,
                }))
            }
        };
        Ok(node)
    }
}

fn qualified_name(name: &QualName) -> String {
    match &name.prefix {
        Some(prefix) => format!("{prefix}:{}", name.local),
        None => name.local.to_string(),
    }
}
