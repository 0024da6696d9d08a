//! DOT format utilities: escaping, statement writers, and the document wrapper.

use std::fmt::Write;

/// Font used for graph, node and edge text.
pub const FONT: &str = "Sans";

/// Raster resolution requested from the renderer.
pub const DPI: u32 = 100;

/// Name of the top-level digraph.
pub const GRAPH_NAME: &str = "build_structure";

/// Escape a string for use inside a double-quoted DOT id.
///
/// Line breaks become `\n` so every statement stays on one line.
pub fn escape_quoted(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Escape a string for use inside an HTML-like `<...>` label.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' => out.push_str("<BR/>"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out
}

/// Write indentation to output, two spaces per level.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// Accumulates the body of a build-structure graph: cluster blocks, module
/// nodes and edges, one statement per line.
pub struct DotBuilder {
    output: String,
}

impl DotBuilder {
    pub fn new() -> Self {
        Self {
            output: String::with_capacity(4096),
        }
    }

    /// Open a cluster for a category, with its bare label node.
    pub fn start_cluster(&mut self, key: &str, label: &str) -> &mut Self {
        let _ = writeln!(self.output, "subgraph cluster_{key} {{");
        self.output.push_str("color=blue\n");
        let _ = writeln!(self.output, "{label}");
        self
    }

    pub fn end_cluster(&mut self) -> &mut Self {
        self.output.push_str("}\n");
        self
    }

    /// Add a filled, bold-labelled box node.
    pub fn module_node(&mut self, name: &str, color: &str) -> &mut Self {
        let _ = writeln!(
            self.output,
            "\"{}\" [shape=\"box\", label=<<B>{}</B>>, color=\"{color}\", bgcolor=\"{color}\", style=\"filled\"]",
            escape_quoted(name),
            escape_html(name),
        );
        self
    }

    pub fn edge(&mut self, from: &str, to: &str, color: &str) -> &mut Self {
        let _ = writeln!(
            self.output,
            "\"{}\" -> \"{}\" [color=\"{color}\"]",
            escape_quoted(from),
            escape_quoted(to),
        );
        self
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    pub fn build(self) -> String {
        self.output
    }
}

impl Default for DotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap graph content into a complete document with the fixed global styling.
///
/// Content lines are indented one step inside the digraph; empty content
/// still yields a well-formed document.
pub fn wrap_document(content: &str) -> String {
    let mut output = String::with_capacity(content.len() + 256);
    let _ = writeln!(output, "digraph {GRAPH_NAME} {{");

    write_indent(&mut output, 2);
    let _ = writeln!(output, "graph [ dpi = {DPI}, fontname=\"{FONT}\"];");
    write_indent(&mut output, 2);
    let _ = writeln!(output, "node [fontname = \"{FONT}\"];");
    write_indent(&mut output, 2);
    let _ = writeln!(output, "edge [fontname = \"{FONT}\"];");
    output.push('\n');

    for line in content.lines() {
        if !line.is_empty() {
            write_indent(&mut output, 2);
            output.push_str(line);
        }
        output.push('\n');
    }

    output.push_str("}\n");
    output
}
