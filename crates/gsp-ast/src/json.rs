use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{AstTree, NodeId, NodeKind};

/// Borrowed view of a subtree that serializes as nested objects.
///
/// The arena stores children as indices; this view follows them so the
/// output reads like the source document:
///
/// ```json
/// { "type": "element", "tagName": "p", "attributes": [], "newline": false,
///   "children": [ { "type": "group", "trim": true, "children": [...] } ] }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TreeView<'a> {
    tree: &'a AstTree,
    id: NodeId,
}

impl<'a> TreeView<'a> {
    /// View the whole document.
    #[must_use]
    pub const fn new(tree: &'a AstTree) -> Self {
        Self::at(tree, NodeId::ROOT)
    }

    /// View the subtree rooted at `id`.
    #[must_use]
    pub const fn at(tree: &'a AstTree, id: NodeId) -> Self {
        Self { tree, id }
    }
}

impl Serialize for TreeView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let Some(node) = self.tree.get(self.id) else {
            return serializer.serialize_none();
        };

        let kind: &str = node.kind.as_ref();
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", kind)?;
        match &node.kind {
            NodeKind::Document => {}
            NodeKind::Element(data) => {
                map.serialize_entry("tagName", &data.tag_name)?;
                map.serialize_entry("attributes", &data.attrs)?;
                map.serialize_entry("newline", &data.newline)?;
            }
            NodeKind::Text(text) => map.serialize_entry("content", text)?,
            NodeKind::Group { trim } => map.serialize_entry("trim", trim)?,
            NodeKind::DocType(attrs) | NodeKind::XmlProlog(attrs) => {
                map.serialize_entry("attributes", attrs)?;
            }
        }
        if !node.children.is_empty() {
            let children: Vec<TreeView<'_>> = node
                .children
                .iter()
                .map(|&id| Self::at(self.tree, id))
                .collect();
            map.serialize_entry("children", &children)?;
        }
        map.end()
    }
}
