//! Read-only walks over a finished [`Document`].
//!
//! Every lookup takes the node to search from and only visits its
//! descendants, never the node itself.

use crate::{Document, NodeId, NodeType};

impl Document {
    /// Pre-order iterator over all descendants of `from`.
    #[must_use]
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            document: self,
            pending: self.children(from).iter().rev().copied().collect(),
        }
    }

    /// Descendants whose name matches `tag_name`, ignoring case.
    ///
    /// The reserved node names take part too, so `"text"` selects text nodes.
    #[must_use]
    pub fn elements_by_tag_name(&self, from: NodeId, tag_name: &str) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&id| self.name(id).eq_ignore_ascii_case(tag_name))
            .collect()
    }

    /// Descendant elements carrying `class_name` in their class list.
    #[must_use]
    pub fn elements_by_class_name(&self, from: NodeId, class_name: &str) -> Vec<NodeId> {
        self.descendants(from)
            .filter(|&id| self.as_element(id).is_some_and(|e| e.has_class(class_name)))
            .collect()
    }

    /// First descendant element whose id attribute equals `id` exactly.
    #[must_use]
    pub fn element_by_id(&self, from: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(from)
            .find(|&node| self.as_element(node).and_then(|e| e.id()) == Some(id))
    }

    /// Descendants for which `predicate` holds.
    ///
    /// The predicate receives the document so it can look at parents,
    /// siblings or attributes of the candidate.
    #[must_use]
    pub fn elements_by_predicate<F>(&self, from: NodeId, mut predicate: F) -> Vec<NodeId>
    where
        F: FnMut(&Self, NodeId) -> bool,
    {
        self.descendants(from)
            .filter(|&id| predicate(self, id))
            .collect()
    }

    /// Concatenated content of every text node below `from`, in document order.
    #[must_use]
    pub fn text_content(&self, from: NodeId) -> String {
        self.descendants(from)
            .filter_map(|id| self.as_text(id))
            .collect()
    }

    /// Names from the top-level ancestor down to `id`, joined by `" > "`.
    ///
    /// The root is not part of the path; the path of the root is empty.
    #[must_use]
    pub fn path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = self
            .ancestors(id)
            .filter(|&ancestor| ancestor != NodeId::ROOT)
            .map(|ancestor| self.name(ancestor))
            .collect();
        names.reverse();
        if id != NodeId::ROOT {
            names.push(self.name(id));
        }
        names.join(" > ")
    }

    /// Structural equality of the subtree at `id` with the subtree at
    /// `other_id` in `other`.
    ///
    /// Compares names, void flags, attributes, text and comment payloads and
    /// children, recursively. Raw inner spans are not compared.
    #[must_use]
    pub fn same_tree(&self, id: NodeId, other: &Self, other_id: NodeId) -> bool {
        let (Some(a), Some(b)) = (self.get(id), other.get(other_id)) else {
            return false;
        };

        let same_payload = match (&a.node_type, &b.node_type) {
            (NodeType::Root, NodeType::Root) => true,
            (NodeType::Element(x), NodeType::Element(y)) => x == y,
            (NodeType::Text(x), NodeType::Text(y)) => x == y,
            (NodeType::Comment(x), NodeType::Comment(y)) => x == y,
            _ => false,
        };

        same_payload
            && a.children.len() == b.children.len()
            && a.children
                .iter()
                .zip(&b.children)
                .all(|(&x, &y)| self.same_tree(x, other, y))
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    document: &'a Document,
    pending: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.pending.pop()?;
        self.pending
            .extend(self.document.children(id).iter().rev().copied());
        Some(id)
    }
}
