//! Column layout of the regulation table.

use arrow::datatypes::{DataType, Field, Schema};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Column names of the four fields the graph builder reads.
///
/// Defaults match the JDIH KESDM export headers. Any field left out of a
/// JSON configuration keeps its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    /// Abbreviated regulation form, e.g. `UU`, `PP`, `Permen ESDM`.
    pub form: String,
    /// Regulation number; the filter key.
    pub number: String,
    pub content: String,
    /// Free-text status, `;`-separated clauses.
    pub status: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            form: "Singkatan Jenis / Bentuk Peraturan".to_string(),
            number: "Nomor Peraturan".to_string(),
            content: "Isi UU".to_string(),
            status: "Keterangan_Status".to_string(),
        }
    }
}

impl ColumnMap {
    /// Parse a JSON object such as `{"number": "nomor", "status": "status"}`.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Schema of a regulation table: four nullable Utf8 columns.
pub fn regulation_schema(columns: &ColumnMap) -> Schema {
    Schema::new(vec![
        Field::new(&columns.form, DataType::Utf8, true),
        Field::new(&columns.number, DataType::Utf8, true),
        Field::new(&columns.content, DataType::Utf8, true),
        Field::new(&columns.status, DataType::Utf8, true),
    ])
}
