//! Property-based tests for the sanitization engine
//!
//! These tests use proptest to verify, over arbitrary trees and whitelists:
//! 1. Sanitizing an already sanitized tree changes nothing
//! 2. Remove keeps exactly the allowed elements with no disallowed ancestor
//! 3. Unwrap keeps every allowed element in document order
//! 4. The two flags only affect their own node kind
//! 5. A leading doctype always survives and is written back literally
//! 6. Text under foreign (SVG/MathML) elements is always escaped

use proptest::prelude::*;
use zsanitize::{sanitize, Attribute, Doctype, Document, Element, Node, Whitelist};
use zsanitize::{Disposition, Namespace, NodeKind};

const TAGS: &[&str] = &["div", "span", "p", "a", "b", "i", "script"];
const ATTRS: &[&str] = &["href", "class", "id", "onclick", "title"];
const RAW_TEXT_TAGS: &[&str] = &["style", "script", "xmp", "iframe", "noembed", "noframes"];

fn arb_text() -> impl Strategy<Value = String> {
    "[ a-z\n]{0,6}"
}

fn arb_attribute() -> impl Strategy<Value = Attribute> {
    (prop::sample::select(ATTRS), "[a-z0-9]{0,4}")
        .prop_map(|(name, value)| Attribute::new(name, value))
}

fn arb_node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        arb_text().prop_map(Node::Text),
        arb_text().prop_map(Node::Comment),
    ];

    leaf.prop_recursive(6, 64, 5, |inner| {
        (
            prop::sample::select(TAGS),
            arb_namespace(),
            prop::collection::vec(arb_attribute(), 0..4),
            prop::collection::vec(inner, 0..5),
        )
            .prop_map(|(tag, namespace, attributes, children)| {
                Node::Element(Element {
                    name: tag.to_string(),
                    namespace,
                    attributes,
                    children,
                })
            })
    })
}

fn arb_namespace() -> impl Strategy<Value = Namespace> {
    prop_oneof![
        4 => Just(Namespace::Html),
        1 => Just(Namespace::Svg),
        1 => Just(Namespace::MathMl),
    ]
}

fn arb_doctype() -> impl Strategy<Value = Doctype> {
    let id = "[A-Za-z0-9/ .:-]{0,16}";
    ("[a-z]{1,6}", id, id)
        .prop_map(|(name, public_id, system_id)| Doctype::with_ids(name, public_id, system_id))
}

fn arb_document() -> impl Strategy<Value = Document> {
    (
        prop::option::of(arb_doctype()),
        prop::collection::vec(arb_node(), 0..6),
    )
        .prop_map(|(doctype, mut nodes)| {
            if let Some(doctype) = doctype {
                nodes.insert(0, doctype.into());
            }
            Document::with_children(nodes)
        })
}

/// The literal declaration a doctype is expected to serialize to
fn doctype_literal(doctype: &Doctype) -> String {
    match (doctype.public_id.is_empty(), doctype.system_id.is_empty()) {
        (true, true) => format!("<!DOCTYPE {}>", doctype.name),
        (true, false) => format!("<!DOCTYPE {} SYSTEM \"{}\">", doctype.name, doctype.system_id),
        (false, true) => format!("<!DOCTYPE {} PUBLIC \"{}\">", doctype.name, doctype.public_id),
        (false, false) => format!(
            "<!DOCTYPE {} PUBLIC \"{}\" \"{}\">",
            doctype.name, doctype.public_id, doctype.system_id
        ),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('\u{a0}', "&nbsp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn arb_whitelist() -> impl Strategy<Value = Whitelist> {
    (
        prop::sample::subsequence(TAGS, 0..=TAGS.len()),
        prop::sample::subsequence(ATTRS, 0..=ATTRS.len()),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(tags, attrs, strip_whitespace, strip_comments)| {
            tags.into_iter()
                .fold(Whitelist::new(), |wl, tag| wl.with_element(tag, attrs.clone()))
                .with_strip_whitespace(strip_whitespace)
                .with_strip_comments(strip_comments)
        })
}

fn arb_disposition() -> impl Strategy<Value = Disposition> {
    prop_oneof![Just(Disposition::Remove), Just(Disposition::Unwrap)]
}

/// Elements as (tag, attributes) in document order
fn element_summary(doc: &Document) -> Vec<(String, Vec<Attribute>)> {
    doc.elements()
        .map(|el| (el.name.clone(), el.attributes.clone()))
        .collect()
}

/// Allowed elements with their filtered attributes, skipping the subtrees
/// of disallowed elements when `descend_into_disallowed` is false
fn expected_elements(
    nodes: &[Node],
    whitelist: &Whitelist,
    descend_into_disallowed: bool,
    out: &mut Vec<(String, Vec<Attribute>)>,
) {
    for el in nodes.iter().filter_map(Node::as_element) {
        match whitelist.allowed_attributes(&el.name) {
            Some(allowed) => {
                let attributes = el
                    .attributes
                    .iter()
                    .filter(|attr| allowed.contains(&attr.name))
                    .cloned()
                    .collect();
                out.push((el.name.clone(), attributes));
                expected_elements(&el.children, whitelist, descend_into_disallowed, out);
            }
            None if descend_into_disallowed => {
                expected_elements(&el.children, whitelist, descend_into_disallowed, out);
            }
            None => {}
        }
    }
}

fn texts(doc: &Document) -> Vec<String> {
    doc.descendants()
        .filter_map(Node::as_text)
        .map(String::from)
        .collect()
}

fn non_text_kinds(doc: &Document) -> Vec<NodeKind> {
    doc.descendants()
        .map(Node::kind)
        .filter(|kind| *kind != NodeKind::Text)
        .collect()
}

proptest! {
    /// Sanitizing the output again is a no-op
    #[test]
    fn sanitize_is_idempotent(
        doc in arb_document(),
        whitelist in arb_whitelist(),
        disposition in arb_disposition(),
    ) {
        let once = sanitize(doc, &whitelist, disposition)?;
        let twice = sanitize(once.clone(), &whitelist, disposition)?;
        prop_assert_eq!(once, twice);
    }

    /// Remove keeps allowed elements whose ancestors are all allowed
    #[test]
    fn remove_drops_whole_subtrees(doc in arb_document(), whitelist in arb_whitelist()) {
        let mut expected = Vec::new();
        expected_elements(&doc.children, &whitelist, false, &mut expected);

        let out = sanitize(doc, &whitelist, Disposition::Remove)?;
        prop_assert_eq!(element_summary(&out), expected);
    }

    /// Unwrap keeps every allowed element in its original order
    #[test]
    fn unwrap_keeps_allowed_descendants(doc in arb_document(), whitelist in arb_whitelist()) {
        let mut expected = Vec::new();
        expected_elements(&doc.children, &whitelist, true, &mut expected);
        let text_count = doc.descendants().filter(|n| n.kind() == NodeKind::Text).count();

        let out = sanitize(doc, &whitelist, Disposition::Unwrap)?;
        prop_assert_eq!(element_summary(&out), expected);

        // unwrapping never loses text
        prop_assert_eq!(texts(&out).len(), text_count);
    }

    /// strip_comments never changes text, strip_whitespace never changes structure
    #[test]
    fn flags_are_independent(
        doc in arb_document(),
        whitelist in arb_whitelist(),
        disposition in arb_disposition(),
    ) {
        let comments_on = whitelist.clone().with_strip_comments(true);
        let comments_off = whitelist.clone().with_strip_comments(false);
        prop_assert_eq!(
            texts(&sanitize(doc.clone(), &comments_on, disposition)?),
            texts(&sanitize(doc.clone(), &comments_off, disposition)?)
        );

        let ws_on = whitelist.clone().with_strip_whitespace(true);
        let ws_off = whitelist.with_strip_whitespace(false);
        let trimmed = sanitize(doc.clone(), &ws_on, disposition)?;
        let untouched = sanitize(doc, &ws_off, disposition)?;
        prop_assert_eq!(non_text_kinds(&trimmed), non_text_kinds(&untouched));
        prop_assert_eq!(element_summary(&trimmed), element_summary(&untouched));
        prop_assert!(texts(&trimmed).iter().all(|t| t.trim() == t.as_str()));
    }

    /// A doctype in front of the document is kept and written out unmodified
    #[test]
    fn doctype_survives(
        doctype in arb_doctype(),
        nodes in prop::collection::vec(arb_node(), 0..6),
        whitelist in arb_whitelist(),
        disposition in arb_disposition(),
    ) {
        let literal = doctype_literal(&doctype);
        let doctype = Node::from(doctype);
        let mut children = vec![doctype.clone()];
        children.extend(nodes);

        let out = sanitize(Document::with_children(children), &whitelist, disposition)?;
        prop_assert_eq!(out.children.first(), Some(&doctype));

        let html = zsanitize::to_html(&out)?;
        prop_assert!(html.starts_with(&literal), "{} does not start with {}", html, literal);
    }

    /// Foreign raw-text-named elements never emit their text unescaped
    #[test]
    fn foreign_text_is_escaped(
        tag in prop::sample::select(RAW_TEXT_TAGS),
        namespace in prop_oneof![Just(Namespace::Svg), Just(Namespace::MathMl)],
        text in ".{0,24}",
        disposition in arb_disposition(),
    ) {
        let root = if namespace == Namespace::Svg { "svg" } else { "math" };
        let whitelist = Whitelist::new()
            .with_element(root, Vec::<String>::new())
            .with_element(tag, Vec::<String>::new());
        let doc = Document::with_children(vec![Element::new(root)
            .with_namespace(namespace)
            .with_child(Element::new(tag).with_namespace(namespace).with_child(text.as_str()))
            .into()]);

        let html = zsanitize::to_html(&sanitize(doc, &whitelist, disposition)?)?;
        prop_assert_eq!(
            html,
            format!("<{root}><{tag}>{}</{tag}></{root}>", escape_text(&text))
        );
    }

    /// Serialized output of a sanitized tree is stable
    #[test]
    fn serialized_output_is_stable(
        doc in arb_document(),
        whitelist in arb_whitelist(),
        disposition in arb_disposition(),
    ) {
        let once = sanitize(doc, &whitelist, disposition)?;
        let html = zsanitize::to_html(&once)?;
        let again = zsanitize::to_html(&sanitize(once, &whitelist, disposition)?)?;
        prop_assert_eq!(html, again);
    }
}
