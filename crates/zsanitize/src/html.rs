//! HTML boundary: html5ever parsing into [`crate::dom`] and serialization back

pub mod parser;
pub mod serializer;

pub use parser::{
    parse_document, parse_document_from_reader, parse_fragment, ParseOptions, DEFAULT_MAX_DEPTH,
};
pub use serializer::{to_html, write_html};
