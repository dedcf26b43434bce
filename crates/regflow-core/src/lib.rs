pub mod action;
mod error;
pub mod graph;
pub mod regulation;
pub mod schema;
pub mod statement;

pub use action::Action;
pub use error::CoreError;
pub use graph::{ChangeGraph, Edge, GraphResult, Node, build_graph};
pub use regulation::{ChangeTotals, RegulationRow, change_totals};
pub use schema::{ColumnMap, regulation_schema};
pub use statement::{
    Statement, extract_first_statement, extract_reference, extract_statements_after_semicolon,
};
