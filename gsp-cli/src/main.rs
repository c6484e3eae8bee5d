//! GSP compiler CLI
//!
//! Usage:
//!   gsp [FILE ...]             Compile each file (or stdin) to HTML on stdout
//!   gsp -d FILE                Leave out the leading `<!DOCTYPE html>`
//!   gsp --mode xml FILE        Self-close childless elements
//!   gsp --tree FILE            Show the parsed syntax tree
//!   gsp --json FILE            Dump the parsed syntax tree as JSON

use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use gsp_ast::{NodeId, TreeView, dump_tree};
use gsp_common::warning::clear_warnings;
use gsp_parser::ParseError;
use gsp_render::OutputMode;
use owo_colors::OwoColorize;

/// Compile GSP markup into HTML or XML
#[derive(Parser, Debug)]
#[command(name = "gsp")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Compile a page
    gsp index.gsp > index.html

    # Compile from stdin without the doctype line
    echo 'p {- Hello @em{-world} }' | gsp -d

    # Emit XML
    gsp --mode xml feed.gsp
"#)]
struct Cli {
    /// Do not write `<!DOCTYPE html>` before each rendered document
    #[arg(short = 'd', long = "no-doctype")]
    no_doctype: bool,

    /// Output flavor
    #[arg(short, long, default_value_t = OutputMode::Html)]
    mode: OutputMode,

    /// Print the parsed syntax tree instead of rendering it
    #[arg(long, conflicts_with = "json")]
    tree: bool,

    /// Print the parsed syntax tree as JSON instead of rendering it
    #[arg(long)]
    json: bool,

    /// Input files; `-` or no files at all reads standard input
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.files.is_empty() {
        process(cli, Path::new("-"), &mut out)?;
    }
    for path in &cli.files {
        process(cli, path, &mut out)?;
    }

    out.flush().context("failed to write output")
}

fn read_source(path: &Path) -> io::Result<Vec<u8>> {
    if path == Path::new("-") {
        let mut source = Vec::new();
        let _ = io::stdin().lock().read_to_end(&mut source)?;
        Ok(source)
    } else {
        fs::read(path)
    }
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn process<W: Write>(cli: &Cli, path: &Path, out: &mut W) -> Result<()> {
    let name = display_name(path);
    clear_warnings();

    let source = read_source(path).with_context(|| format!("failed to read {name}"))?;
    let tree = gsp_parser::parse_bytes(&source).with_context(|| format!("failed to parse {name}"))?;

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &TreeView::new(&tree))?;
        writeln!(out)?;
        return Ok(());
    }
    if cli.tree {
        let mut dump = String::new();
        dump_tree(&tree, NodeId::ROOT, 0, &mut dump)?;
        out.write_all(dump.as_bytes())?;
        return Ok(());
    }

    if !cli.no_doctype {
        out.write_all(b"<!DOCTYPE html>")?;
    }
    gsp_render::render(&tree, cli.mode, out).with_context(|| format!("failed to write {name}"))?;
    writeln!(out)?;
    Ok(())
}

fn report(err: &anyhow::Error) {
    eprintln!("{} {err:#}", "gsp: error:".red().bold());

    let missing_brace = err
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ParseError>())
        .any(ParseError::is_unexpected_eof);
    if missing_brace {
        eprintln!(
            "{} you are probably missing a closing brace (‘}}’) somewhere",
            "hint:".cyan().bold()
        );
    }
}
