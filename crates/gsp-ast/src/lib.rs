//! Syntax tree for GSP documents.
//!
//! This crate provides an arena-based tree holding the result of a single
//! parse. The tree is built once by the parser and only read afterwards.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues.

/// Indented debug dump of a tree.
pub mod dump;
/// Nested JSON view of a tree.
pub mod json;

use serde::Serialize;
use strum_macros::AsRefStr;

pub use dump::dump_tree;
pub use json::TreeView;

/// A single `key="value"` attribute.
///
/// An empty value marks a boolean attribute, rendered as a bare key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attr {
    /// Attribute name; never empty.
    pub key: String,
    /// Attribute value; empty for boolean attributes.
    pub value: String,
}

impl Attr {
    /// Create an attribute with a value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create a boolean attribute (one without a value).
    #[must_use]
    pub fn boolean(key: impl Into<String>) -> Self {
        Self::new(key, String::new())
    }

    /// Whether this attribute renders as a bare key.
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        self.value.is_empty()
    }
}

/// A type-safe index into the syntax tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// A node in the tree along with its structural links.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Enclosing node, `None` for the document and for detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
}

/// The kinds of node a GSP document is made of.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    /// The root. Holds top-level elements, text groups and declarations.
    Document,
    /// `name attrs { ... }`
    Element(ElementData),
    /// Literal text. Always a leaf.
    Text(String),
    /// A text run introduced by `-` (`trim: true`) or `=` (`trim: false`).
    ///
    /// Holds [`NodeKind::Text`] children interleaved with elements embedded
    /// through `@`. When `trim` is set, leading whitespace of a first text
    /// child and trailing whitespace of a last text child are dropped on
    /// output.
    Group {
        /// Whether boundary whitespace is stripped when rendering.
        trim: bool,
    },
    /// `!doctype ... {}`, rendered as `<!DOCTYPE ...>`.
    DocType(Vec<Attr>),
    /// `?xml ... {}`, rendered as `<?xml ...?>`.
    XmlProlog(Vec<Attr>),
}

impl NodeKind {
    /// The attributes carried by this node; empty for kinds without any.
    #[must_use]
    pub fn attrs(&self) -> &[Attr] {
        match self {
            Self::Element(data) => &data.attrs,
            Self::DocType(attrs) | Self::XmlProlog(attrs) => attrs,
            Self::Document | Self::Text(_) | Self::Group { .. } => &[],
        }
    }

    /// Whether nodes of this kind may hold children.
    #[must_use]
    pub const fn can_have_children(&self) -> bool {
        matches!(self, Self::Document | Self::Element(_) | Self::Group { .. })
    }
}

/// Element-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementData {
    /// The tag name, validated against the XML name rules.
    pub tag_name: String,
    /// Attributes in source order, shorthand already expanded.
    pub attrs: Vec<Attr>,
    /// Set when the element was written with a leading `>`.
    ///
    /// Kept for a future pretty-printer; the renderer ignores it.
    pub newline: bool,
}

impl ElementData {
    /// Create element data with no attributes.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            attrs: Vec::new(),
            newline: false,
        }
    }

    /// Returns every `class` value in source order, duplicates included.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attrs
            .iter()
            .filter(|attr| attr.key == "class")
            .map(|attr| attr.value.as_str())
    }
}

/// Arena-based syntax tree with O(1) node access.
///
/// All nodes live in a contiguous vector and refer to each other by index.
/// The Document node is always at index 0 ([`NodeId::ROOT`]).
#[derive(Debug, Clone)]
pub struct AstTree {
    nodes: Vec<Node>,
}

impl AstTree {
    /// Create a new tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree, the Document included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either ID was not allocated by this tree.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[parent.0].kind.can_have_children(),
            "{:?} cannot hold children",
            self.nodes[parent.0].kind
        );
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
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

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.get(id).map(|n| &n.kind)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(data) => Some(data),
            _ => None,
        }
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The first element directly under the Document, if there is one.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }
}

impl Default for AstTree {
    fn default() -> Self {
        Self::new()
    }
}
