use std::{
    fs, io,
    path::{Path, PathBuf},
    process::Command,
};

use crate::ast::AstNode;

/// What an export produced: a rasterized image, or the DOT description
/// alone when no image could be made.
#[derive(Debug, PartialEq, Eq)]
pub enum Rendered {
    Image(PathBuf),
    DotOnly(PathBuf),
}

impl Rendered {
    pub fn path(&self) -> &Path {
        match self {
            Rendered::Image(path) | Rendered::DotOnly(path) => path,
        }
    }
}

/// Renders the tree as GraphViz Dot code: one graph node per tree node,
/// labeled with its value, edges in left-then-right child order.
pub fn dot_source(root: &AstNode) -> String {
    let mut body = String::new();
    let mut counter = 0;
    write_node(root, &mut body, &mut counter);
    format!(
        "digraph AST {{\n  rankdir=TB;\n  node [shape=circle fontname=\"Courier New\"];\n{}}}\n",
        body
    )
}

fn write_node(node: &AstNode, out: &mut String, counter: &mut usize) -> usize {
    let id = *counter;
    *counter += 1;
    out.push_str(&format!(
        "  node{} [label=\"{}\"];\n",
        id,
        escape_label(node.value())
    ));
    for child in node.children() {
        let child_id = write_node(child, out, counter);
        out.push_str(&format!("  node{} -> node{};\n", id, child_id));
    }
    id
}

fn escape_label(value: char) -> String {
    match value {
        '"' => String::from("\\\""),
        '\\' => String::from("\\\\"),
        '\n' => String::from("\\n"),
        '\t' => String::from("\\t"),
        c => c.to_string(),
    }
}

/// Writes `<basename>.dot` and, when `rasterize` is set, asks the system
/// `dot` executable for a PNG. The DOT file is kept whenever no image was
/// produced, so the graph description survives a missing toolchain.
pub fn export(root: &AstNode, basename: &str, rasterize: bool) -> io::Result<Rendered> {
    let dot_path = PathBuf::from(format!("{}.dot", basename));
    let png_path = PathBuf::from(format!("{}.png", basename));
    fs::write(&dot_path, dot_source(root))?;

    if !rasterize {
        return Ok(Rendered::DotOnly(dot_path));
    }

    match Command::new("dot")
        .arg("-Tpng")
        .arg(&dot_path)
        .arg("-o")
        .arg(&png_path)
        .status()
    {
        Ok(status) if status.success() => {
            let _ = fs::remove_file(&dot_path);
            Ok(Rendered::Image(png_path))
        }
        _ => Ok(Rendered::DotOnly(dot_path)),
    }
}
