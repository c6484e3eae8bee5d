use std::io::{self, Write};

use gsp_ast::{AstTree, Attr, ElementData, NodeId, NodeKind};
use gsp_common::warning::warn_once;

use crate::OutputMode;
use crate::escape::{escape_attr_value, escape_text};

/// Elements that never have content in HTML and take no end tag.
///
/// <https://html.spec.whatwg.org/multipage/syntax.html#void-elements>
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Whether `tag_name` is an HTML void element (ASCII case-insensitive).
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag_name))
}

/// State for one render call.
///
/// The XML flag starts from the requested [`OutputMode`] and is switched on
/// by an XML prolog; it never outlives the renderer.
pub struct Renderer<'a, W: Write> {
    tree: &'a AstTree,
    sink: &'a mut W,
    xml: bool,
    wrote_content: bool,
}

impl<'a, W: Write> Renderer<'a, W> {
    /// Create a renderer writing to `sink`.
    #[must_use]
    pub fn new(tree: &'a AstTree, mode: OutputMode, sink: &'a mut W) -> Self {
        Self {
            tree,
            sink,
            xml: mode == OutputMode::Xml,
            wrote_content: false,
        }
    }

    /// Render the node `id` and everything below it.
    ///
    /// # Errors
    ///
    /// Returns any error from writing to the sink.
    pub fn render(&mut self, id: NodeId) -> io::Result<()> {
        let tree = self.tree;
        let Some(node) = tree.get(id) else {
            return Ok(());
        };

        match &node.kind {
            NodeKind::Document | NodeKind::Group { trim: false } => {
                self.render_children(&node.children)
            }
            NodeKind::Group { trim: true } => self.render_children_trimmed(&node.children),
            NodeKind::Text(text) => self.render_text(text),
            NodeKind::Element(data) => self.render_element(data, &node.children),
            NodeKind::DocType(attrs) => {
                self.warn_if_late("DOCTYPE declaration");
                self.sink.write_all(b"<!DOCTYPE")?;
                self.render_attrs(attrs)?;
                self.sink.write_all(b">")
            }
            NodeKind::XmlProlog(attrs) => {
                self.warn_if_late("XML prolog");
                self.sink.write_all(b"<?xml")?;
                self.render_attrs(attrs)?;
                self.sink.write_all(b"?>")?;
                self.xml = true;
                Ok(())
            }
        }
    }

    fn warn_if_late(&self, what: &str) {
        if self.wrote_content {
            warn_once(
                "Renderer",
                &format!("{what} appears after document content"),
            );
        }
    }

    fn render_children(&mut self, children: &[NodeId]) -> io::Result<()> {
        for &child in children {
            self.render(child)?;
        }
        Ok(())
    }

    /// Like [`Self::render_children`], but strips leading whitespace from a
    /// first text child and trailing whitespace from a last text child.
    ///
    /// The tree is left untouched; trimmed text is a new slice.
    fn render_children_trimmed(&mut self, children: &[NodeId]) -> io::Result<()> {
        let tree = self.tree;
        let last = children.len().saturating_sub(1);

        for (i, &child) in children.iter().enumerate() {
            let Some(mut text) = tree.as_text(child) else {
                self.render(child)?;
                continue;
            };
            if i == 0 {
                text = text.trim_start();
            }
            if i == last {
                text = text.trim_end();
            }
            self.render_text(text)?;
        }
        Ok(())
    }

    fn render_text(&mut self, text: &str) -> io::Result<()> {
        if !text.is_empty() {
            self.wrote_content = true;
        }
        self.sink.write_all(escape_text(text).as_bytes())
    }

    fn render_element(&mut self, data: &ElementData, children: &[NodeId]) -> io::Result<()> {
        self.wrote_content = true;
        write!(self.sink, "<{}", data.tag_name)?;
        self.render_classes(data.classes())?;
        self.render_attrs(data.attrs.iter().filter(|attr| attr.key != "class"))?;

        if !children.is_empty() {
            self.sink.write_all(b">")?;
            self.render_children(children)?;
            return write!(self.sink, "</{}>", data.tag_name);
        }

        if self.xml {
            self.sink.write_all(b"/>")
        } else if is_void_element(&data.tag_name) {
            self.sink.write_all(b">")
        } else {
            write!(self.sink, "></{}>", data.tag_name)
        }
    }

    /// All `class` values as one space-separated attribute, in source order.
    fn render_classes<'c>(&mut self, classes: impl Iterator<Item = &'c str>) -> io::Result<()> {
        let mut classes = classes.peekable();
        if classes.peek().is_none() {
            return Ok(());
        }
        self.sink.write_all(b" class=\"")?;
        for (i, class) in classes.enumerate() {
            if i > 0 {
                self.sink.write_all(b" ")?;
            }
            self.sink.write_all(escape_attr_value(class).as_bytes())?;
        }
        self.sink.write_all(b"\"")
    }

    fn render_attrs<'c>(&mut self, attrs: impl IntoIterator<Item = &'c Attr>) -> io::Result<()> {
        for attr in attrs {
            write!(self.sink, " {}", attr.key)?;
            if !attr.is_boolean() {
                write!(self.sink, "=\"{}\"", escape_attr_value(&attr.value))?;
            }
        }
        Ok(())
    }
}
