//! HTML and XML serializer for GSP syntax trees.
//!
//! # Scope
//!
//! This crate implements:
//! - **Escaping** - separate tables for attribute values and text content
//! - **Attribute output** - every `class` attribute merged into one leading
//!   `class="..."`, boolean attributes as bare keys
//! - **Element output** - explicit end tags, HTML void elements, and `/>`
//!   once the output is XML
//! - **Trimming** - boundary whitespace removal for `-` text runs
//!
//! Rendering is a single depth-first pass. The only state is carried in a
//! per-call [`Renderer`](renderer::Renderer), so independent renders never
//! affect one another.

/// Escaping tables.
pub mod escape;
/// The depth-first renderer.
pub mod renderer;

use std::io::{self, Write};

use gsp_ast::{AstTree, NodeId};
use strum_macros::{Display, EnumString};

pub use escape::{escape_attr_value, escape_text};
pub use renderer::{Renderer, is_void_element};

/// Output flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum OutputMode {
    /// HTML: childless void elements are written as `<br>`, other childless
    /// elements get an explicit end tag. Switches to XML after `<?xml ...?>`.
    #[default]
    Html,
    /// XML: childless elements are self-closing from the start.
    Xml,
}

/// Render a whole document to `sink`.
///
/// # Errors
///
/// Returns any error from writing to `sink`.
pub fn render<W: Write>(tree: &AstTree, mode: OutputMode, sink: &mut W) -> io::Result<()> {
    render_node(tree, NodeId::ROOT, mode, sink)
}

/// Render the subtree rooted at `id` to `sink`.
///
/// # Errors
///
/// Returns any error from writing to `sink`.
pub fn render_node<W: Write>(
    tree: &AstTree,
    id: NodeId,
    mode: OutputMode,
    sink: &mut W,
) -> io::Result<()> {
    Renderer::new(tree, mode, sink).render(id)
}

/// Render a whole document into a new string.
///
/// # Errors
///
/// Only fails if the output is not UTF-8, which the renderer never produces
/// from a tree built by the parser.
pub fn render_to_string(tree: &AstTree, mode: OutputMode) -> io::Result<String> {
    let mut out = Vec::new();
    render(tree, mode, &mut out)?;
    String::from_utf8(out).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
