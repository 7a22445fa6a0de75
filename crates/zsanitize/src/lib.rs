//! zSanitize - whitelist-driven HTML sanitizer
//!
//! # Quick Start
//!
//! ```
//! use zsanitize::{sanitize_fragment_str, Disposition, Whitelist};
//! # fn main() -> Result<(), zsanitize::Error> {
//! let whitelist = Whitelist::from_json_str(r#"{"elements": {"a": ["href"]}}"#)?;
//! let clean = sanitize_fragment_str(
//!     r#"<a href="/x" onclick="evil()">t</a><script>alert(1)</script>"#,
//!     &whitelist,
//!     Disposition::Remove,
//! )?;
//! assert_eq!(clean, r#"<a href="/x">t</a>"#);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub use error::{Error, ErrorKind, Pos, Result};

pub mod dom;
pub use dom::{Attribute, Doctype, Document, Element, Namespace, Node, NodeKind};

pub mod whitelist;
pub use whitelist::{AttributeSet, Whitelist};

pub mod sanitize;
pub use sanitize::{sanitize, Disposition, Sanitizer};

pub mod html;
pub use html::{parse_document, parse_fragment, to_html, ParseOptions};

use std::io::Read;

/// Sanitize a full HTML document and serialize the result
pub fn sanitize_str(input: &str, whitelist: &Whitelist, disposition: Disposition) -> Result<String> {
    sanitize_str_with_options(input, whitelist, disposition, ParseOptions::default())
}

/// Sanitize a full HTML document with custom parser options
pub fn sanitize_str_with_options(
    input: &str,
    whitelist: &Whitelist,
    disposition: Disposition,
    options: ParseOptions,
) -> Result<String> {
    let document = html::parse_document(input, options)?;
    to_html(&sanitize(document, whitelist, disposition)?)
}

/// Sanitize an HTML fragment (body content) and serialize the result
pub fn sanitize_fragment_str(
    input: &str,
    whitelist: &Whitelist,
    disposition: Disposition,
) -> Result<String> {
    sanitize_fragment_str_with_options(input, whitelist, disposition, ParseOptions::default())
}

/// Sanitize an HTML fragment with custom parser options
pub fn sanitize_fragment_str_with_options(
    input: &str,
    whitelist: &Whitelist,
    disposition: Disposition,
    options: ParseOptions,
) -> Result<String> {
    let document = html::parse_fragment(input, options)?;
    to_html(&sanitize(document, whitelist, disposition)?)
}

/// Sanitize a full HTML document read from `reader`
pub fn sanitize_reader<R: Read>(
    reader: R,
    whitelist: &Whitelist,
    disposition: Disposition,
    options: ParseOptions,
) -> Result<String> {
    let document = html::parse_document_from_reader(reader, options)?;
    to_html(&sanitize(document, whitelist, disposition)?)
}
