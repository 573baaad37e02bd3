//! Element tree produced by the lax HTML parser.
//!
//! The parser builds one [`Document`] per parse. Every member of the tree
//! (elements, void elements, text runs, comments and the synthetic root) is a
//! [`Node`] stored in an arena and addressed by a [`NodeId`].
//!
//! # Design
//!
//! Children are stored as index lists and the parent link is an optional
//! index, so the tree owns its nodes exactly once and the back-reference is
//! only ever used for traversal.
//!
//! Read-only collaborators live in submodules:
//! - [`query`] - tag, class, id and predicate lookups, text extraction, paths
//! - [`render`] - single-tag stringification and indented tree rendering

use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// Traversal and lookup helpers over a finished tree.
pub mod query;
/// Serialization of nodes back to markup.
pub mod render;

/// Map of lower-cased attribute names to verbatim values.
pub type AttributesMap = HashMap<String, String>;

/// Reserved name reported by the document root.
pub const ROOT_NODE_NAME: &str = "root";
/// Reserved name reported by text nodes.
pub const TEXT_NODE_NAME: &str = "text";
/// Reserved name reported by comment nodes.
pub const COMMENT_NODE_NAME: &str = "xmlcomment";

/// A type-safe index into the [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A single member of the element tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// What kind of node this is, with its payload.
    pub node_type: NodeType,

    /// The node whose `children` contains this one. Never set on the root.
    pub parent: Option<NodeId>,

    /// Children in document order.
    pub children: Vec<NodeId>,

    /// Byte range of the source text covering this node's children region.
    pub raw_inner: Option<Range<usize>>,
}

/// The kind of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    /// The synthetic document root. Exactly one per document.
    Root,
    /// An ordinary or void element.
    Element(ElementData),
    /// A run of character data.
    Text(TextData),
    /// The data of a `<!-- ... -->` comment.
    Comment(String),
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    /// Lower-cased tag name.
    pub tag_name: String,
    /// Attributes keyed by lower-cased name. Valueless attributes map to `""`.
    pub attrs: AttributesMap,
    /// Void elements are inserted as completed leaves and never get children.
    pub void: bool,
}

impl ElementData {
    /// Create element data for `tag_name`, normalizing the name to lower case.
    #[must_use]
    pub fn new(tag_name: &str, attrs: AttributesMap, void: bool) -> Self {
        Self {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            void,
        }
    }

    /// Look up an attribute value. The name is matched case-insensitively.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .get(&name.to_lowercase())
            .map(String::as_str)
    }

    /// Returns the element's id attribute value if present.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Returns the set of lower-cased class names from the class attribute.
    #[must_use]
    pub fn classes(&self) -> HashSet<String> {
        self.attr("class")
            .map(|list| {
                list.split_whitespace()
                    .map(str::to_ascii_lowercase)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the class attribute contains `class_name`, ignoring case.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class").is_some_and(|list| {
            list.split_whitespace()
                .any(|class| class.eq_ignore_ascii_case(class_name))
        })
    }
}

/// Text-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    /// The text exactly as it appeared in the source.
    pub content: String,
    /// Set for the raw body of a `<script>` element, which is never markup.
    pub data: bool,
}

impl Node {
    const fn new(node_type: NodeType) -> Self {
        Self {
            node_type,
            parent: None,
            children: Vec::new(),
            raw_inner: None,
        }
    }

    /// The node's name: the tag name for elements, otherwise one of
    /// [`ROOT_NODE_NAME`], [`TEXT_NODE_NAME`] or [`COMMENT_NODE_NAME`].
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.node_type {
            NodeType::Root => ROOT_NODE_NAME,
            NodeType::Element(data) => &data.tag_name,
            NodeType::Text(_) => TEXT_NODE_NAME,
            NodeType::Comment(_) => COMMENT_NODE_NAME,
        }
    }

    /// Element attributes, if this node is an element.
    #[must_use]
    pub const fn attributes(&self) -> Option<&AttributesMap> {
        match &self.node_type {
            NodeType::Element(data) => Some(&data.attrs),
            _ => None,
        }
    }

    /// True for text nodes, including script bodies.
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self.node_type, NodeType::Text(_))
    }

    /// True for nodes that can never hold children: void elements, text and
    /// comments.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        match &self.node_type {
            NodeType::Element(data) => data.void,
            NodeType::Text(_) | NodeType::Comment(_) => true,
            NodeType::Root => false,
        }
    }

    /// True for comment nodes.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.node_type, NodeType::Comment(_))
    }

    /// True for the document root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        matches!(self.node_type, NodeType::Root)
    }

    /// True for raw data text, i.e. the body of a `<script>` element.
    #[must_use]
    pub const fn is_data(&self) -> bool {
        matches!(&self.node_type, NodeType::Text(text) if text.data)
    }
}

/// Arena-based element tree with O(1) node access.
///
/// Node 0 is always the root. The document also keeps the source text it
/// was parsed from so raw inner spans can be resolved without copying.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    source: String,
}

impl Document {
    /// Create a document holding just the root node.
    #[must_use]
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            nodes: vec![Node::new(NodeType::Root)],
            source: source.into(),
        }
    }

    /// Get the root node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// The source text this document was built from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the arena, the root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty (never true: the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a detached node and return its ID.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(node_type));
        id
    }

    /// Allocate a detached text node.
    pub fn alloc_text(&mut self, content: &str, data: bool) -> NodeId {
        self.alloc(NodeType::Text(TextData {
            content: content.to_string(),
            data,
        }))
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child must be detached, must not be the root, and `parent` must
    /// not be a void node.
    ///
    /// # Panics
    ///
    /// Panics if either ID is out of bounds, and in debug builds if the
    /// requirements above are violated.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(child, NodeId::ROOT, "the root cannot be a child");
        debug_assert!(
            self.nodes[child.0].parent.is_none(),
            "node {child:?} is already in the tree"
        );
        debug_assert!(
            !self.nodes[parent.0].is_void(),
            "void node {parent:?} cannot hold children"
        );

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
    }

    /// Record the byte range of the source covering `id`'s children.
    pub fn set_raw_inner(&mut self, id: NodeId, span: Range<usize>) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.raw_inner = Some(span);
        }
    }

    /// The verbatim source text of `id`'s children region, or `""`.
    #[must_use]
    pub fn raw_inner(&self, id: NodeId) -> &str {
        self.get(id)
            .and_then(|n| n.raw_inner.clone())
            .and_then(|span| self.source.get(span))
            .unwrap_or_default()
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// The node's name, or `""` for an unknown ID.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        self.get(id).map_or("", Node::name)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(text) => Some(text.content.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(data) => Some(data.as_str()),
            _ => None,
        })
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            document: self,
            current: self.parent(id),
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    document: &'a Document,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.document.parent(id);
        Some(id)
    }
}
