//! Vertical card display for regulation rows.
//!
//! Renders one row grouped into sections, with the status field split into
//! its `;`-clauses and the statements extracted from them.

use std::fmt::{self, Write};

use regflow_core::{RegulationRow, extract_statements_after_semicolon};

use crate::render::buffered;

const MAX_CONTENT_CHARS: usize = 200;
const MAX_LISTING_CHARS: usize = 60;

/// Render a single regulation row as a card.
pub fn regulation_card(row: &RegulationRow) -> String {
    buffered(|out| write_card(out, row))
}

/// Render table rows, numbered from 1, under a heading naming the form
/// filter ("All data" when there is none).
pub fn row_listing<'a>(
    form: Option<&str>,
    rows: impl IntoIterator<Item = &'a RegulationRow>,
) -> String {
    buffered(|out| {
        match form {
            Some(form) => writeln!(out, "Data {form}")?,
            None => writeln!(out, "All data")?,
        }
        for (i, row) in rows.into_iter().enumerate() {
            writeln!(
                out,
                "  {:>4}  {:<12} {:<20} {}",
                i + 1,
                row.regulation_form,
                row.regulation_number,
                truncate(&row.content, MAX_LISTING_CHARS)
            )?;
        }
        Ok(())
    })
}

fn write_card(out: &mut impl Write, row: &RegulationRow) -> fmt::Result {
    writeln!(out, "=== {} - {} ===", row.regulation_form, row.regulation_number)?;
    if !row.content.is_empty() {
        writeln!(out, "{}", truncate(&row.content, MAX_CONTENT_CHARS))?;
    }
    writeln!(out)?;

    writeln!(out, "Identity")?;
    field(out, "form", &row.regulation_form)?;
    field(out, "number", &row.regulation_number)?;
    writeln!(out)?;

    let clauses: Vec<&str> = row
        .status_text
        .as_deref()
        .map(|s| s.split(';').map(str::trim).filter(|c| !c.is_empty()).collect())
        .unwrap_or_default();
    if clauses.is_empty() {
        return Ok(());
    }

    writeln!(out, "Status ({})", clauses.len())?;
    for (i, clause) in clauses.iter().enumerate() {
        field(out, &format!("clause {}", i + 1), clause)?;
    }
    writeln!(out)?;

    let statements = extract_statements_after_semicolon(row.status_text.as_deref());
    if !statements.is_empty() {
        writeln!(out, "Statements ({})", statements.len())?;
        for statement in &statements {
            let gloss = statement.action().english();
            let value = format!("{} ({gloss})", statement.reference);
            field(out, &statement.action_word, &value)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn field(out: &mut impl Write, name: &str, value: &str) -> fmt::Result {
    writeln!(out, "  {:<26} {}", name, value)
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max.saturating_sub(3)) {
        Some((cut, _)) if s.chars().count() > max => format!("{}...", &s[..cut]),
        _ => s.to_string(),
    }
}
