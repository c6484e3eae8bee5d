use std::fmt::{self, Write};

use crate::{Attr, AstTree, NodeId, NodeKind};

fn write_attrs<W: Write>(out: &mut W, attrs: &[Attr]) -> fmt::Result {
    for attr in attrs {
        if attr.is_boolean() {
            write!(out, " {}", attr.key)?;
        } else {
            write!(out, " {}=\"{}\"", attr.key, attr.value)?;
        }
    }
    Ok(())
}

/// Write an indented outline of the subtree at `id`, one node per line.
///
/// Text is quoted with newlines escaped and spaces shown as `·` so that
/// whitespace trimming is visible.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn dump_tree<W: Write>(tree: &AstTree, id: NodeId, indent: usize, out: &mut W) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    let Some(node) = tree.get(id) else {
        return Ok(());
    };
    match &node.kind {
        NodeKind::Document => writeln!(out, "{prefix}Document")?,
        NodeKind::Element(data) => {
            write!(out, "{prefix}")?;
            if data.newline {
                write!(out, ">")?;
            }
            write!(out, "<{}", data.tag_name)?;
            write_attrs(out, node.kind.attrs())?;
            writeln!(out, ">")?;
        }
        NodeKind::Text(text) => {
            let display = text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            writeln!(out, "{prefix}\"{display}\"")?;
        }
        NodeKind::Group { trim: true } => writeln!(out, "{prefix}Group (trim)")?,
        NodeKind::Group { trim: false } => writeln!(out, "{prefix}Group")?,
        NodeKind::DocType(_) => {
            write!(out, "{prefix}<!DOCTYPE")?;
            write_attrs(out, node.kind.attrs())?;
            writeln!(out, ">")?;
        }
        NodeKind::XmlProlog(_) => {
            write!(out, "{prefix}<?xml")?;
            write_attrs(out, node.kind.attrs())?;
            writeln!(out, "?>")?;
        }
    }
    for &child_id in &node.children {
        dump_tree(tree, child_id, indent + 1, out)?;
    }
    Ok(())
}
