//! Integration tests for the HTML/XML renderer.

use std::io::{self, Write};

use gsp_ast::{AstTree, Attr, ElementData, NodeId, NodeKind};
use gsp_common::warning::has_warned;
use gsp_render::{OutputMode, render, render_node, render_to_string};
use quickcheck_macros::quickcheck;

/// Helper to parse and render in one go
fn compile(source: &str, mode: OutputMode) -> String {
    let tree = gsp_parser::parse_str(source).expect("source should parse");
    render_to_string(&tree, mode).unwrap()
}

fn html(source: &str) -> String {
    compile(source, OutputMode::Html)
}

/// Helper to build a tree holding one childless element with `attrs`
fn element_with_attrs(attrs: Vec<Attr>) -> AstTree {
    let mut tree = AstTree::new();
    let id = tree.alloc(NodeKind::Element(ElementData {
        tag_name: "x".to_string(),
        attrs,
        newline: false,
    }));
    tree.append_child(NodeId::ROOT, id);
    tree
}

/// Helper to build a group of text nodes under the root
fn text_group(trim: bool, texts: &[&str]) -> AstTree {
    let mut tree = AstTree::new();
    let group = tree.alloc(NodeKind::Group { trim });
    tree.append_child(NodeId::ROOT, group);
    for text in texts {
        let id = tree.alloc(NodeKind::Text((*text).to_string()));
        tree.append_child(group, id);
    }
    tree
}

#[test]
fn test_full_document() {
    let source = r#"
html lang="en" {
  >head attr {
    >title {-
      My Website
    }
    meta x="y"{}
  }
  >body {
    >div #some-id{}
    div key="val" .class-1 .class-2 {
      p {- This is some @em{-emphatic} text	  }
    }

    tags key  = "Some long value" {}
  }
}"#;
    assert_eq!(
        html(source),
        concat!(
            r#"<html lang="en"><head attr><title>My Website</title><meta x="y"></head>"#,
            r#"<body><div id="some-id"></div><div class="class-1 class-2" key="val">"#,
            r#"<p>This is some <em>emphatic</em> text</p></div>"#,
            r#"<tags key="Some long value"></tags></body></html>"#,
        )
    );
}

#[test]
fn test_class_attributes_merge_first() {
    let tree = element_with_attrs(vec![
        Attr::new("class", "a"),
        Attr::new("foo", "bar"),
        Attr::new("class", "b"),
        Attr::new("class", "c"),
    ]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        r#"<x class="a b c" foo="bar"></x>"#
    );
}

#[test]
fn test_mixed_attributes_keep_relative_order() {
    let tree = element_with_attrs(vec![
        Attr::new("foo", "bar"),
        Attr::boolean("baz"),
        Attr::new("class", "foo"),
        Attr::new("hello", "world"),
        Attr::new("class", "bar"),
        Attr::new("class", "baz"),
    ]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Xml).unwrap(),
        r#"<x class="foo bar baz" foo="bar" baz hello="world"/>"#
    );
}

#[test]
fn test_attribute_values_are_escaped() {
    let tree = element_with_attrs(vec![
        Attr::new("foo", "b&r"),
        Attr::boolean("baz"),
        Attr::new("hello", "<world\""),
    ]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        r#"<x foo="b&amp;r" baz hello="&lt;world&quot;"></x>"#
    );
}

#[test]
fn test_class_values_are_escaped() {
    let tree = element_with_attrs(vec![
        Attr::new("class", "\"foo\""),
        Attr::new("class", "<bar>"),
        Attr::new("class", "b&z"),
    ]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        r#"<x class="&quot;foo&quot; &lt;bar> b&amp;z"></x>"#
    );
}

#[test]
fn test_shorthand_renders_merged() {
    assert_eq!(
        html(r#"div key="val" .class-1 .class-2 {}"#),
        r#"<div class="class-1 class-2" key="val"></div>"#
    );
    assert_eq!(html("p .a .a {}"), r#"<p class="a a"></p>"#);
    assert_eq!(
        html(r#"div.class-1.class-2 key="val" {}"#),
        r#"<div.class-1.class-2 key="val"></div.class-1.class-2>"#
    );
}

#[test]
fn test_text_is_escaped() {
    assert_eq!(
        html(r#"p {= 'Hello' <em>there</em> to you & "world"! }"#),
        "<p> &apos;Hello&apos; &lt;em&gt;there&lt;/em&gt; to you &amp; &quot;world&quot;! </p>"
    );
}

#[test]
fn test_trim_only_touches_boundaries() {
    let tree = text_group(true, &["   \t\n Hello ", " There ", " World \n\t   "]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        "Hello  There  World"
    );
}

#[test]
fn test_verbatim_group_keeps_whitespace() {
    let tree = text_group(false, &["   \t\n Hello ", " There ", " World \n\t   "]);
    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        "   \t\n Hello  There  World \n\t   "
    );
}

#[test]
fn test_trim_skips_leading_element() {
    let mut tree = AstTree::new();
    let group = tree.alloc(NodeKind::Group { trim: true });
    tree.append_child(NodeId::ROOT, group);

    let em = tree.alloc(NodeKind::Element(ElementData::new("em")));
    tree.append_child(group, em);
    let inner = tree.alloc(NodeKind::Group { trim: false });
    tree.append_child(em, inner);
    let hello = tree.alloc(NodeKind::Text(" Hello World".to_string()));
    tree.append_child(inner, hello);

    let tail = tree.alloc(NodeKind::Text("Foo Bar  ".to_string()));
    tree.append_child(group, tail);

    assert_eq!(
        render_to_string(&tree, OutputMode::Html).unwrap(),
        "<em> Hello World</em>Foo Bar"
    );
}

#[test]
fn test_trimming_does_not_modify_tree() {
    let tree = text_group(true, &["  padded  "]);
    assert_eq!(render_to_string(&tree, OutputMode::Html).unwrap(), "padded");

    let group = tree.first_child(NodeId::ROOT).unwrap();
    let text = tree.first_child(group).unwrap();
    assert_eq!(tree.as_text(text), Some("  padded  "));
}

#[test]
fn test_embedded_element_between_trimmed_text() {
    assert_eq!(
        html("p {- This is some @em{-emphatic} text }"),
        "<p>This is some <em>emphatic</em> text</p>"
    );
    assert_eq!(
        html("p {=  keep @b{- x }  }"),
        "<p>  keep <b>x</b>  </p>"
    );
}

#[test]
fn test_html_void_and_empty_elements() {
    assert_eq!(html(r#"meta charset="utf-8" {}"#), r#"<meta charset="utf-8">"#);
    assert_eq!(html("BR {}"), "<BR>");
    assert_eq!(html("div {}"), "<div></div>");
    assert_eq!(html("p {-}"), "<p></p>");
}

#[test]
fn test_xml_mode_self_closes() {
    assert_eq!(
        compile("a { b {} br {} c {- x } }", OutputMode::Xml),
        "<a><b/><br/><c>x</c></a>"
    );
}

#[test]
fn test_xml_prolog_switches_mode() {
    assert_eq!(
        html(r#"?xml version="1.0" encoding="UTF-8" {} root { br {} div {} }"#),
        r#"<?xml version="1.0" encoding="UTF-8"?><root><br/><div/></root>"#
    );
}

#[test]
fn test_late_xml_prolog_only_affects_later_elements() {
    assert_eq!(
        html(r#"a {} ?xml version="1.0" {} b {}"#),
        r#"<a></a><?xml version="1.0"?><b/>"#
    );
    assert!(has_warned("Renderer", "XML prolog appears after document content"));
}

#[test]
fn test_xml_mode_is_scoped_to_one_render() {
    let xml_tree = gsp_parser::parse_str(r#"?xml version="1.0" {} a {}"#).unwrap();
    let html_tree = gsp_parser::parse_str("a {}").unwrap();

    assert_eq!(
        render_to_string(&xml_tree, OutputMode::Html).unwrap(),
        r#"<?xml version="1.0"?><a/>"#
    );
    assert_eq!(render_to_string(&html_tree, OutputMode::Html).unwrap(), "<a></a>");
    assert_eq!(
        render_to_string(&xml_tree, OutputMode::Html).unwrap(),
        r#"<?xml version="1.0"?><a/>"#
    );
}

#[test]
fn test_doctype_declaration() {
    assert_eq!(
        html("!doctype html {} html { body {} }"),
        "<!DOCTYPE html><html><body></body></html>"
    );
}

#[test]
fn test_render_subtree() {
    let tree = gsp_parser::parse_str("html { body { p {- hi } } }").unwrap();
    let html_id = tree.document_element().unwrap();
    let body = tree.first_child(html_id).unwrap();

    let mut out = Vec::new();
    render_node(&tree, body, OutputMode::Html, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "<body><p>hi</p></body>");
}

#[test]
fn test_render_to_writer() {
    let tree = gsp_parser::parse_str("p {- hi }").unwrap();
    let mut out = Vec::new();
    render(&tree, OutputMode::Html, &mut out).unwrap();
    assert_eq!(out, b"<p>hi</p>");
}

/// A sink that rejects every write.
struct BrokenSink;

impl Write for BrokenSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_propagates() {
    let tree = gsp_parser::parse_str("p {}").unwrap();
    let err = render(&tree, OutputMode::Html, &mut BrokenSink).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
}

#[test]
fn test_output_mode_names() {
    assert_eq!(OutputMode::Html.to_string(), "html");
    assert_eq!("xml".parse::<OutputMode>().unwrap(), OutputMode::Xml);
    assert!("xhtml".parse::<OutputMode>().is_err());
    assert_eq!(OutputMode::default(), OutputMode::Html);
}

#[quickcheck]
fn prop_rendering_is_deterministic(text: String) -> bool {
    let mut tree = AstTree::new();
    let p = tree.alloc(NodeKind::Element(ElementData {
        tag_name: "p".to_string(),
        attrs: vec![Attr::new("title", text.clone())],
        newline: false,
    }));
    tree.append_child(NodeId::ROOT, p);
    let group = tree.alloc(NodeKind::Group { trim: true });
    tree.append_child(p, group);
    let body = tree.alloc(NodeKind::Text(text));
    tree.append_child(group, body);

    let first = render_to_string(&tree, OutputMode::Html).unwrap();
    let second = render_to_string(&tree, OutputMode::Html).unwrap();
    first == second && first.starts_with("<p title=\"") && first.ends_with("</p>")
}
