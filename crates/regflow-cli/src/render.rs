//! Graph rendering: plain text, JSON and Graphviz DOT.

use std::fmt::{self, Write};

use regflow_core::{Action, ChangeGraph, ChangeTotals, GraphResult};
use serde_json::Value;

pub const NO_CHANGES: &str = "No changes recorded.";

pub fn not_found(number: &str) -> String {
    format!("Regulation {number} not found.")
}

/// Run a writer against a fresh `String` and return what it wrote.
pub fn buffered(write: impl FnOnce(&mut String) -> fmt::Result) -> String {
    let mut out = String::new();
    // fmt::Write for String never errors.
    let _ = write(&mut out);
    out
}

/// Serialise any graph outcome, `not_found` and `empty` included, with the
/// row totals under `"totals"`.
pub fn json(result: &GraphResult, totals: &ChangeTotals) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(result)?;
    if let Value::Object(map) = &mut value {
        map.insert("totals".to_string(), serde_json::to_value(totals)?);
    }
    serde_json::to_string_pretty(&value)
}

/// Revision and revocation row counts.
pub fn totals(totals: &ChangeTotals) -> String {
    format!(
        "Total revisions: {}\nTotal revocations: {}\n",
        totals.revisions, totals.revocations
    )
}

/// Per-index descriptions, the edge list, and the colour legend.
pub fn text(graph: &ChangeGraph) -> String {
    buffered(|out| write_text(out, graph))
}

fn write_text(out: &mut impl Write, graph: &ChangeGraph) -> fmt::Result {
    writeln!(out, "Descriptions for each index:")?;
    for line in graph.descriptions() {
        writeln!(out, "  {line}")?;
    }
    writeln!(out)?;

    writeln!(out, "Changes ({}):", graph.edges.len())?;
    for edge in &graph.edges {
        writeln!(
            out,
            "  {:>3} -> {:<3} weight {:<3} {}",
            edge.source, edge.target, edge.weight, edge.color
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Legend:")?;
    for action in Action::KNOWN {
        writeln!(
            out,
            "  {:<10} {}  {}",
            action.word().unwrap_or_default(),
            action.node_color(),
            action.english()
        )?;
    }
    Ok(())
}

/// Graphviz digraph, left to right. Pen width grows with edge weight.
pub fn dot(graph: &ChangeGraph) -> String {
    buffered(|out| write_dot(out, graph))
}

fn write_dot(out: &mut impl Write, graph: &ChangeGraph) -> fmt::Result {
    writeln!(out, "digraph changes {{")?;
    writeln!(out, "    rankdir=LR;")?;
    writeln!(
        out,
        "    node [shape=box, style=\"rounded,filled\", fontname=\"Helvetica\"];"
    )?;

    for node in &graph.nodes {
        writeln!(
            out,
            "    n{} [label=\"{}: {}\", fillcolor=\"{}\"];",
            node.index,
            node.index,
            escape(&node.label),
            node.color
        )?;
    }
    for edge in &graph.edges {
        writeln!(
            out,
            "    n{} -> n{} [color=\"{}\", penwidth={:.1}, label=\"{}\"];",
            edge.source,
            edge.target,
            edge.color,
            f64::from(edge.weight) / 5.0,
            edge.weight
        )?;
    }

    writeln!(out, "    subgraph cluster_legend {{")?;
    writeln!(out, "        label=\"Legend\";")?;
    for action in Action::KNOWN {
        let word = action.word().unwrap_or_default();
        writeln!(
            out,
            "        legend_{} [label=\"{}\", fillcolor=\"{}\"];",
            word.to_lowercase(),
            word,
            action.node_color()
        )?;
    }
    writeln!(out, "    }}")?;
    writeln!(out, "}}")
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
