//! Document tree model

pub mod node;
pub mod traverse;

pub use node::{Attribute, Doctype, Document, Element, Namespace, Node, NodeKind};
pub use traverse::Descendants;
