//! Tests for tree construction, navigation, dumping and the JSON view.

use gsp_ast::{AstTree, Attr, ElementData, NodeId, NodeKind, TreeView, dump_tree};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut AstTree, tag: &str, attrs: Vec<Attr>) -> NodeId {
    tree.alloc(NodeKind::Element(ElementData {
        tag_name: tag.to_string(),
        attrs,
        newline: false,
    }))
}

/// Helper to create a text node and return its NodeId.
fn alloc_text(tree: &mut AstTree, text: &str) -> NodeId {
    tree.alloc(NodeKind::Text(text.to_string()))
}

/// Builds `p {- Hi @em{-there} }` by hand.
fn sample_tree() -> (AstTree, NodeId, NodeId, NodeId) {
    let mut tree = AstTree::new();
    let p = alloc_element(&mut tree, "p", vec![Attr::new("class", "lead")]);
    tree.append_child(NodeId::ROOT, p);

    let group = tree.alloc(NodeKind::Group { trim: true });
    tree.append_child(p, group);
    let hi = alloc_text(&mut tree, " Hi ");
    tree.append_child(group, hi);

    let em = alloc_element(&mut tree, "em", Vec::new());
    tree.append_child(group, em);
    let inner = tree.alloc(NodeKind::Group { trim: true });
    tree.append_child(em, inner);
    let there = alloc_text(&mut tree, "there");
    tree.append_child(inner, there);

    (tree, p, group, em)
}

#[test]
fn test_new_tree_has_only_document() {
    let tree = AstTree::new();
    assert_eq!(tree.len(), 1);
    assert!(!tree.is_empty());
    assert_eq!(tree.kind(NodeId::ROOT), Some(&NodeKind::Document));
    assert!(tree.children(NodeId::ROOT).is_empty());
    assert_eq!(tree.document_element(), None);
}

#[test]
fn test_append_child_links_parent() {
    let (tree, p, group, em) = sample_tree();

    assert_eq!(tree.children(NodeId::ROOT), &[p]);
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
    assert_eq!(tree.parent(group), Some(p));
    assert_eq!(tree.first_child(p), Some(group));
    assert_eq!(tree.children(group).last(), Some(&em));
    assert_eq!(tree.parent(em), Some(group));
    assert_eq!(tree.parent(NodeId::ROOT), None);
}

#[test]
fn test_accessors_by_kind() {
    let (tree, p, group, _) = sample_tree();

    assert_eq!(tree.as_element(p).map(|e| e.tag_name.as_str()), Some("p"));
    assert!(tree.as_element(group).is_none());
    assert!(tree.as_text(p).is_none());

    let hi = tree.first_child(group).unwrap();
    assert_eq!(tree.as_text(hi), Some(" Hi "));
    assert_eq!(tree.document_element(), Some(p));
}

#[test]
fn test_unknown_id_is_harmless() {
    let tree = AstTree::new();
    let missing = NodeId(42);
    assert!(tree.get(missing).is_none());
    assert!(tree.children(missing).is_empty());
    assert_eq!(tree.first_child(missing), None);
    assert_eq!(tree.parent(missing), None);
}

#[test]
fn test_element_classes_keep_duplicates() {
    let data = ElementData {
        tag_name: "div".to_string(),
        attrs: vec![
            Attr::new("class", "a"),
            Attr::new("id", "first"),
            Attr::new("class", "b"),
            Attr::new("class", "a"),
            Attr::new("id", "second"),
        ],
        newline: false,
    };
    assert_eq!(data.classes().collect::<Vec<_>>(), vec!["a", "b", "a"]);
    assert_eq!(ElementData::new("div").classes().count(), 0);
}

#[test]
fn test_node_kind_attrs() {
    let attrs = vec![Attr::boolean("html")];
    assert_eq!(NodeKind::DocType(attrs.clone()).attrs(), attrs.as_slice());
    assert!(NodeKind::Text("x".into()).attrs().is_empty());
    assert!(NodeKind::Group { trim: false }.can_have_children());
    assert!(!NodeKind::XmlProlog(Vec::new()).can_have_children());
    assert!(Attr::boolean("hidden").is_boolean());
    assert!(!Attr::new("lang", "en").is_boolean());
}

#[test]
fn test_dump_tree_outline() {
    let (tree, ..) = sample_tree();
    let mut out = String::new();
    dump_tree(&tree, NodeId::ROOT, 0, &mut out).unwrap();

    let expected = "\
Document
  <p class=\"lead\">
    Group (trim)
      \"\u{b7}Hi\u{b7}\"
      <em>
        Group (trim)
          \"there\"
";
    assert_eq!(out, expected);
}

#[test]
fn test_json_view_nests_children() {
    let (tree, ..) = sample_tree();
    let value = serde_json::to_value(TreeView::new(&tree)).unwrap();

    assert_eq!(value["type"], "document");
    let p = &value["children"][0];
    assert_eq!(p["type"], "element");
    assert_eq!(p["tagName"], "p");
    assert_eq!(p["attributes"][0]["key"], "class");
    assert_eq!(p["attributes"][0]["value"], "lead");

    let group = &p["children"][0];
    assert_eq!(group["type"], "group");
    assert_eq!(group["trim"], true);
    assert_eq!(group["children"][0]["content"], " Hi ");
    assert_eq!(group["children"][1]["tagName"], "em");
}

#[test]
fn test_json_view_declarations() {
    let mut tree = AstTree::new();
    let prolog = tree.alloc(NodeKind::XmlProlog(vec![Attr::new("version", "1.0")]));
    tree.append_child(NodeId::ROOT, prolog);

    let value = serde_json::to_value(TreeView::new(&tree)).unwrap();
    let prolog = &value["children"][0];
    assert_eq!(prolog["type"], "xml_prolog");
    assert_eq!(prolog["attributes"][0]["value"], "1.0");
    assert!(prolog.get("children").is_none());
}
