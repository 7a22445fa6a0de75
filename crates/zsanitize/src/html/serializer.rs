//! Markup serialization via html5ever's `HtmlSerializer`
//!
//! The tree model implements html5ever's `Serialize`, so escaping, void
//! elements and raw-text elements (`script`, `style`, ...) follow html5ever.

use std::io::{self, Write};

use html5ever::serialize::{serialize, Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::{LocalName, QualName};
use tracing::instrument;

use crate::dom::{Doctype, Document, Element, Node};
use crate::error::{Error, ErrorKind, Result};

/// Serialize a document to an HTML string
pub fn to_html(document: &Document) -> Result<String> {
    let mut buf = Vec::new();
    write_html(document, &mut buf)?;
    String::from_utf8(buf).map_err(|err| Error::with_message(ErrorKind::Io, err.to_string()))
}

/// Serialize a document into `writer`
#[instrument(skip_all)]
pub fn write_html<W: Write>(document: &Document, writer: W) -> Result<()> {
    serialize(writer, document, SerializeOpts::default()).map_err(|err| {
        let kind = match err.kind() {
            io::ErrorKind::InvalidData => ErrorKind::ParseFailure,
            _ => ErrorKind::Io,
        };
        Error::with_message(kind, err.to_string())
    })
}

// html5ever only treats an element as raw-text or void when its name is in
// the HTML namespace, so foreign `style`/`script` text stays escaped
fn element_name(el: &Element) -> QualName {
    QualName::new(
        None,
        html5ever::Namespace::from(el.namespace.uri()),
        LocalName::from(el.name.as_str()),
    )
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, html5ever::Namespace::from(""), LocalName::from(name))
}

/// Everything after `<!DOCTYPE ` in the declaration
///
/// `html PUBLIC "pub" "sys"`, `html PUBLIC "pub"`, `html SYSTEM "sys"` or
/// just the name.
fn doctype_declaration(doctype: &Doctype) -> String {
    let mut out = doctype.name.clone();
    if !doctype.public_id.is_empty() {
        out.push_str(" PUBLIC ");
        push_quoted(&mut out, &doctype.public_id);
        if !doctype.system_id.is_empty() {
            out.push(' ');
            push_quoted(&mut out, &doctype.system_id);
        }
    } else if !doctype.system_id.is_empty() {
        out.push_str(" SYSTEM ");
        push_quoted(&mut out, &doctype.system_id);
    }
    out
}

// identifiers cannot contain the quote that delimited them, so one of the
// two quote characters is always free
fn push_quoted(out: &mut String, id: &str) {
    let quote = if id.contains('"') { '\'' } else { '"' };
    out.push(quote);
    out.push_str(id);
    out.push(quote);
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: &mut S, _traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        // the root has no markup of its own
        for child in &self.children {
            child.serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let include_self = matches!(traversal_scope, TraversalScope::IncludeNode);

        if include_self {
            let names: Vec<QualName> = self
                .attributes
                .iter()
                .map(|attr| attribute_name(&attr.name))
                .collect();
            let attrs = names
                .iter()
                .zip(&self.attributes)
                .map(|(name, attr)| (name, attr.value.as_str()));
            serializer.start_elem(element_name(self), attrs)?;
        }

        for child in &self.children {
            child.serialize(serializer, TraversalScope::IncludeNode)?;
        }

        if include_self {
            serializer.end_elem(element_name(self))?;
        }
        Ok(())
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match self {
            Self::Element(el) => el.serialize(serializer, traversal_scope),
            Self::Text(text) => serializer.write_text(text),
            Self::Comment(text) => serializer.write_comment(text),
            Self::Doctype(doctype) => serializer.write_doctype(&doctype_declaration(doctype)),
            Self::Error(message) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("parse error in tree: {message}"),
            )),
        }
    }
}
