//! Change graph: who amended or revoked a regulation, as a single chain.
//!
//! Node 0 is the selected regulation. Every distinct statement label found
//! in its status fields becomes a new node, linked from the current chain
//! tail; the tail then moves to the new node. A label seen before (node 0's
//! label included) adds nothing and leaves the tail where it is.
//!
//! For each row, the first clause is visited on its own before all clauses
//! are visited in order. The first clause is therefore seen twice; the
//! second visit is always a no-op, but the ordering decides which node the
//! chain branches from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::action::{Action, DEFAULT_COLOR};
use crate::regulation::RegulationRow;
use crate::statement::{Statement, extract_first_statement, extract_statements_after_semicolon};

/// Outcome of [`build_graph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GraphResult {
    /// No row carries the requested regulation number.
    NotFound,
    /// Rows matched but none of their status fields produced a statement.
    Empty,
    Graph(ChangeGraph),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub index: usize,
    pub label: String,
    /// Leading word of a statement label; `None` for node 0.
    pub action_word: Option<String>,
    pub color: String,
}

impl Node {
    pub fn action(&self) -> Action {
        self.action_word
            .as_deref()
            .map_or(Action::Other, Action::from_word)
    }
}

/// Directed edge. Weight and colour come from the target node's action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeGraph {
    /// Indexed by node index; `nodes[0]` is the selected regulation.
    pub nodes: Vec<Node>,
    /// In creation order.
    pub edges: Vec<Edge>,
}

impl ChangeGraph {
    /// The selected regulation. Only `None` for a graph deserialised
    /// without nodes; [`build_graph`] always produces node 0.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// `"<index>: <label>"` for every node, in index order.
    pub fn descriptions(&self) -> impl Iterator<Item = String> + '_ {
        self.nodes
            .iter()
            .map(|n| format!("{}: {}", n.index, n.label))
    }
}

/// Build the change graph for one regulation number.
///
/// Form and number of node 0 come from the first matching row only.
pub fn build_graph(rows: &[RegulationRow], regulation_number: &str) -> GraphResult {
    let mut matching = rows
        .iter()
        .filter(|r| r.regulation_number == regulation_number)
        .peekable();

    let Some(first) = matching.peek() else {
        debug!(regulation_number, "regulation not found");
        return GraphResult::NotFound;
    };

    let mut chain = Chain::new(format!(
        "{} - {}",
        first.regulation_form, first.regulation_number
    ));

    let mut matched = 0usize;
    for row in matching {
        matched += 1;
        let status = row.status_text.as_deref();
        for statement in extract_first_statement(status) {
            chain.visit(statement);
        }
        for statement in extract_statements_after_semicolon(status) {
            chain.visit(statement);
        }
    }

    if chain.edges.is_empty() {
        debug!(regulation_number, rows = matched, "no changes recorded");
        return GraphResult::Empty;
    }

    let graph = chain.finish();
    debug!(
        regulation_number,
        rows = matched,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "built change graph"
    );
    GraphResult::Graph(graph)
}

/// Chain under construction.
struct Chain {
    labels: Vec<String>,
    /// label → node index
    seen: HashMap<String, usize>,
    /// action word per node; `None` for node 0
    actions: Vec<Option<String>>,
    tail: usize,
    edges: Vec<(usize, usize)>,
}

impl Chain {
    fn new(root_label: String) -> Self {
        let mut seen = HashMap::new();
        seen.insert(root_label.clone(), 0);
        Self {
            labels: vec![root_label],
            seen,
            actions: vec![None],
            tail: 0,
            edges: Vec::new(),
        }
    }

    fn visit(&mut self, statement: Statement) {
        let label = statement.label();
        if self.seen.contains_key(&label) {
            return;
        }
        let index = self.labels.len();
        self.seen.insert(label.clone(), index);
        self.labels.push(label);
        self.actions.push(Some(statement.action_word));
        self.edges.push((self.tail, index));
        self.tail = index;
    }

    fn finish(self) -> ChangeGraph {
        let nodes: Vec<Node> = self
            .labels
            .into_iter()
            .zip(self.actions)
            .enumerate()
            .map(|(index, (label, action_word))| {
                let color = match action_word.as_deref() {
                    Some(word) => Action::from_word(word).node_color(),
                    None => DEFAULT_COLOR,
                };
                Node {
                    index,
                    label,
                    action_word,
                    color: color.to_string(),
                }
            })
            .collect();

        let edges = self
            .edges
            .into_iter()
            .map(|(source, target)| {
                let action = nodes[target].action();
                Edge {
                    source,
                    target,
                    weight: action.weight(),
                    color: action.edge_color().to_string(),
                }
            })
            .collect();

        ChangeGraph { nodes, edges }
    }
}
