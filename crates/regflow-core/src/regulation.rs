//! Regulation rows and the selection options derived from them.
//!
//! Rows are read out of Arrow RecordBatches in batch order, then row order,
//! so "table order" is preserved end to end.

use std::collections::HashSet;

use arrow::array::{Array, LargeStringArray, StringArray};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};
use serde::{Deserialize, Serialize};

use crate::CoreError;
use crate::schema::ColumnMap;

/// One row of the regulation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegulationRow {
    pub regulation_form: String,
    /// Filter key; not necessarily unique across the table.
    pub regulation_number: String,
    pub content: String,
    pub status_text: Option<String>,
}

impl RegulationRow {
    pub fn new(
        regulation_form: impl Into<String>,
        regulation_number: impl Into<String>,
        content: impl Into<String>,
        status_text: Option<&str>,
    ) -> Self {
        Self {
            regulation_form: regulation_form.into(),
            regulation_number: regulation_number.into(),
            content: content.into(),
            status_text: status_text.map(str::to_string),
        }
    }

    /// Read rows from regulation table batches.
    ///
    /// The form and number columns must exist in every batch; content and
    /// status may be absent. Null form, number and content cells read as
    /// empty strings, a null status as `None`.
    pub fn from_batches(
        batches: &[RecordBatch],
        columns: &ColumnMap,
    ) -> Result<Vec<Self>, CoreError> {
        let mut rows = Vec::with_capacity(batches.iter().map(|b| b.num_rows()).sum());

        for batch in batches {
            let form_col = batch
                .column_by_name(&columns.form)
                .ok_or_else(|| CoreError::MissingColumn(columns.form.clone()))?;
            let number_col = batch
                .column_by_name(&columns.number)
                .ok_or_else(|| CoreError::MissingColumn(columns.number.clone()))?;
            let content_col = batch.column_by_name(&columns.content);
            let status_col = batch.column_by_name(&columns.status);

            for row in 0..batch.num_rows() {
                rows.push(Self {
                    regulation_form: get_string(form_col.as_ref(), row).unwrap_or_default(),
                    regulation_number: get_string(number_col.as_ref(), row).unwrap_or_default(),
                    content: content_col
                        .and_then(|col| get_string(col.as_ref(), row))
                        .unwrap_or_default(),
                    status_text: status_col.and_then(|col| get_string(col.as_ref(), row)),
                });
            }
        }

        Ok(rows)
    }
}

/// Distinct regulation forms, in first-seen order.
pub fn forms(rows: &[RegulationRow]) -> Vec<&str> {
    distinct(rows.iter().map(|r| r.regulation_form.as_str()))
}

/// Rows of one form in table order; `None` yields every row.
pub fn rows_by_form<'a>(
    rows: &'a [RegulationRow],
    form: Option<&'a str>,
) -> impl Iterator<Item = &'a RegulationRow> + 'a {
    rows.iter()
        .filter(move |r| form.is_none_or(|f| r.regulation_form == f))
}

/// Distinct regulation numbers in first-seen order, optionally limited to
/// one form. `None` lists numbers across all forms.
pub fn numbers<'a>(rows: &'a [RegulationRow], form: Option<&'a str>) -> Vec<&'a str> {
    distinct(rows_by_form(rows, form).map(|r| r.regulation_number.as_str()))
}

/// All rows whose number equals `regulation_number`, in table order.
pub fn find<'a>(
    rows: &'a [RegulationRow],
    regulation_number: &'a str,
) -> impl Iterator<Item = &'a RegulationRow> + 'a {
    rows.iter()
        .filter(move |r| r.regulation_number == regulation_number)
}

/// Row counts for one regulation number: rows whose status mentions
/// `Diubah` (revisions) and rows whose status mentions `Dicabut`
/// (revocations). A row mentioning both counts towards both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTotals {
    pub revisions: usize,
    pub revocations: usize,
}

/// Count revision and revocation rows for `regulation_number`.
///
/// Plain case-sensitive substring match on the raw status text; rows with
/// no status count towards neither total.
pub fn change_totals(rows: &[RegulationRow], regulation_number: &str) -> ChangeTotals {
    find(rows, regulation_number)
        .filter_map(|r| r.status_text.as_deref())
        .fold(ChangeTotals::default(), |mut totals, status| {
            if status.contains("Diubah") {
                totals.revisions += 1;
            }
            if status.contains("Dicabut") {
                totals.revocations += 1;
            }
            totals
        })
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

// ── Arrow extraction helpers ──

/// Extract a cell as a string. Utf8 and LargeUtf8 are read directly; any
/// other type goes through Arrow's display formatter.
fn get_string(col: &dyn Array, row: usize) -> Option<String> {
    if col.is_null(row) {
        return None;
    }
    if let Some(arr) = col.as_any().downcast_ref::<StringArray>() {
        return Some(arr.value(row).to_string());
    }
    if let Some(arr) = col.as_any().downcast_ref::<LargeStringArray>() {
        return Some(arr.value(row).to_string());
    }
    ArrayFormatter::try_new(col, &FormatOptions::default())
        .ok()
        .map(|fmt| fmt.value(row).to_string())
}
