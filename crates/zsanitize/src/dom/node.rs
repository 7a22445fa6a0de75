//! Node types for the document tree
//!
//! Children are owned by their parent in a plain `Vec`. There are no parent
//! back-references: code that needs the parent carries it down the call
//! stack, and a node taken out of the tree is simply an owned value.

use std::fmt;

use crate::dom::traverse::Descendants;

/// Root of a parsed document
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Element node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    /// Namespace the parser placed the element in. Serialization depends on
    /// it: only HTML `script`/`style` and friends hold unescaped text.
    pub namespace: Namespace,
    /// Attributes in source order. Names may repeat.
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

/// Element namespaces an HTML parser can produce
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Html => "http://www.w3.org/1999/xhtml",
            Self::Svg => "http://www.w3.org/2000/svg",
            Self::MathMl => "http://www.w3.org/1998/Math/MathML",
        }
    }

    /// Namespace for `uri`, or `None` for anything other than the three above
    pub fn from_uri(uri: &str) -> Option<Self> {
        [Self::Html, Self::Svg, Self::MathMl]
            .into_iter()
            .find(|ns| ns.uri() == uri)
    }
}

/// A single `name="value"` pair on an element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Document type declaration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

/// Any node that can appear below the document root
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    Doctype(Doctype),
    /// Marker left by a parser that could not recover from malformed input
    Error(String),
}

/// Discriminant of a node, including the document root
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
    Doctype,
    Error,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Document => "document",
            Self::Element => "element",
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Doctype => "doctype",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// Replace `children[index]` with `replacement`, in place.
///
/// Nodes after `index` shift to make room (or close the gap when
/// `replacement` is empty). Returns the detached node, or `None` when
/// `index` is out of bounds, in which case `children` is left untouched.
fn splice_child(children: &mut Vec<Node>, index: usize, replacement: Vec<Node>) -> Option<Node> {
    if index >= children.len() {
        return None;
    }
    children.splice(index..=index, replacement).next()
}

impl Document {
    pub const fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    pub fn with_children(children: Vec<Node>) -> Self {
        Self { children }
    }

    /// Replace the child at `index` with an ordered sequence of nodes
    pub fn replace_child(&mut self, index: usize, replacement: Vec<Node>) -> Option<Node> {
        splice_child(&mut self.children, index, replacement)
    }

    /// All nodes below the root in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }

    /// All elements below the root in document order
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.descendants().filter_map(Node::as_element)
    }

    /// First error marker in document order, if the parser left any
    pub fn find_error(&self) -> Option<&str> {
        self.descendants().find_map(Node::as_error)
    }

    pub const fn kind(&self) -> NodeKind {
        NodeKind::Document
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: Namespace::Html,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Value of the first attribute named `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Keep only attributes for which `keep` returns true, preserving order
    pub fn retain_attributes<F>(&mut self, keep: F)
    where
        F: FnMut(&Attribute) -> bool,
    {
        self.attributes.retain(keep);
    }

    /// Replace the child at `index` with an ordered sequence of nodes
    pub fn replace_child(&mut self, index: usize, replacement: Vec<Node>) -> Option<Node> {
        splice_child(&mut self.children, index, replacement)
    }

    /// All nodes below this element in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(&self.children)
    }
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Doctype {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            public_id: String::new(),
            system_id: String::new(),
        }
    }

    pub fn with_ids(
        name: impl Into<String>,
        public_id: impl Into<String>,
        system_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            public_id: public_id.into(),
            system_id: system_id.into(),
        }
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::Doctype(_) => NodeKind::Doctype,
            Self::Error(_) => NodeKind::Error,
        }
    }

    /// Tag name for elements
    pub fn name(&self) -> Option<&str> {
        self.as_element().map(|el| el.name.as_str())
    }

    /// Children of an element; leaves have none
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Element(el) => &el.children,
            _ => &[],
        }
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

impl From<Doctype> for Node {
    fn from(doctype: Doctype) -> Self {
        Self::Doctype(doctype)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}
