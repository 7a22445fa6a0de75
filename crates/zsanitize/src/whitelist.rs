//! Allow-list policy
//!
//! A [`Whitelist`] maps each permitted tag to the attribute names permitted
//! on it. A tag missing from the map is not allowed at all; a tag mapped to
//! an empty set is allowed but loses every attribute.

pub mod loader;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Attribute names allowed on one tag, in the order they were declared
pub type AttributeSet = IndexSet<String>;

/// Sanitization policy
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Whitelist {
    /// Trim leading and trailing whitespace from every text node
    #[serde(default)]
    strip_whitespace: bool,
    /// Drop comment nodes
    #[serde(default)]
    strip_comments: bool,
    #[serde(default)]
    elements: IndexMap<String, AttributeSet>,
}

impl Whitelist {
    /// Empty whitelist: no tags allowed, both flags off
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strip_whitespace(mut self, strip: bool) -> Self {
        self.strip_whitespace = strip;
        self
    }

    pub fn with_strip_comments(mut self, strip: bool) -> Self {
        self.strip_comments = strip;
        self
    }

    /// Builder form of [`Whitelist::add_element`]
    pub fn with_element<I, S>(mut self, tag: impl Into<String>, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_element(tag, attributes);
        self
    }

    /// Allow `tag` with exactly `attributes`, replacing any previous entry
    pub fn add_element<I, S>(&mut self, tag: impl Into<String>, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = attributes.into_iter().map(Into::into).collect();
        self.elements.insert(tag.into(), attributes);
        self
    }

    /// Disallow `tag`, returning the attribute set it had
    pub fn remove_element(&mut self, tag: &str) -> Option<AttributeSet> {
        self.elements.shift_remove(tag)
    }

    pub fn set_strip_whitespace(&mut self, strip: bool) -> &mut Self {
        self.strip_whitespace = strip;
        self
    }

    pub fn set_strip_comments(&mut self, strip: bool) -> &mut Self {
        self.strip_comments = strip;
        self
    }

    pub const fn strip_whitespace(&self) -> bool {
        self.strip_whitespace
    }

    pub const fn strip_comments(&self) -> bool {
        self.strip_comments
    }

    pub fn has_element(&self, tag: &str) -> bool {
        self.elements.contains_key(tag)
    }

    /// Attribute names allowed on `tag`
    ///
    /// `None` means the tag itself is not allowed, which is distinct from
    /// `Some` of an empty set.
    pub fn allowed_attributes(&self, tag: &str) -> Option<&AttributeSet> {
        self.elements.get(tag)
    }

    pub fn has_attribute_for_element(&self, tag: &str, attribute: &str) -> bool {
        self.elements
            .get(tag)
            .is_some_and(|attrs| attrs.contains(attribute))
    }

    /// Allowed tags and their attribute sets in declaration order
    pub fn elements(&self) -> impl Iterator<Item = (&str, &AttributeSet)> {
        self.elements.iter().map(|(tag, attrs)| (tag.as_str(), attrs))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
