//! Pre-order traversal

use std::slice;

use crate::dom::node::Node;

/// Iterator over a forest of nodes in document order
///
/// Uses an explicit stack so deep trees cannot exhaust the call stack.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, Node>>,
}

impl<'a> Descendants<'a> {
    pub fn new(roots: &'a [Node]) -> Self {
        Self {
            stack: vec![roots.iter()],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(node) => {
                    let children = node.children();
                    if !children.is_empty() {
                        self.stack.push(children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
