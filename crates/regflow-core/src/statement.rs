//! Statement extraction from free-text status fields.
//!
//! A status field lists later regulations that changed this one, as
//! `;`-separated clauses such as
//! `"Diubah dengan Peraturan Menteri Nomor 26 Tahun 2021 tentang ..."`.
//! Each clause that names a regulation reference yields one [`Statement`]:
//! the clause's first word plus the reference.
//!
//! Nothing is deduplicated here; that happens in the graph builder.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::action::Action;

/// `Nomor`/`No.`, one whitespace, then either `<id> Tahun <year>` or a bare
/// `<id>`, then whitespace and the anchor word `tentang`/`Tentang`.
///
/// The anchor is matched but lies outside both capture groups, so it never
/// ends up in the returned reference.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Nomor|No\.)\s([\w/.]+\sTahun\s\d+|[\w/.]+)\s(?:tentang|Tentang)")
        .expect("reference pattern is valid")
});

/// One `(action word, reference)` pair extracted from a status clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    pub action_word: String,
    pub reference: String,
}

impl Statement {
    /// Node label: `"<action_word> - <reference>"`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    pub fn action(&self) -> Action {
        Action::from_word(&self.action_word)
    }

    /// Build a statement from one trimmed clause, if it names a reference.
    fn from_clause(clause: &str) -> Option<Self> {
        let action_word = clause.split_whitespace().next()?;
        let reference = extract_reference(clause)?;
        Some(Self {
            action_word: action_word.to_string(),
            reference,
        })
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.action_word, self.reference)
    }
}

/// Find the first regulation reference in `text`.
///
/// Returns the keyword and identifier joined by one space, e.g.
/// `"Nomor 5/2021"` or `"No. 12 Tahun 2020"`. `None` input yields `None`.
pub fn extract_reference<'a>(text: impl Into<Option<&'a str>>) -> Option<String> {
    let text = text.into()?;
    let caps = REFERENCE.captures(text)?;
    Some(format!("{} {}", &caps[1], &caps[2]))
}

/// Extract at most one statement from the first `;`-clause of `text`.
///
/// An empty first clause or a clause without a reference yields an empty list.
pub fn extract_first_statement<'a>(text: impl Into<Option<&'a str>>) -> Vec<Statement> {
    let Some(text) = text.into() else {
        return Vec::new();
    };
    let first = text.split(';').next().unwrap_or_default().trim();
    Statement::from_clause(first).into_iter().collect()
}

/// Extract one statement from every `;`-clause of `text` that names a
/// reference, in clause order. The first clause is included.
pub fn extract_statements_after_semicolon<'a>(text: impl Into<Option<&'a str>>) -> Vec<Statement> {
    let Some(text) = text.into() else {
        return Vec::new();
    };
    text.split(';')
        .map(str::trim)
        .filter_map(Statement::from_clause)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_CLAUSES: &str =
        "Diubah oleh Nomor 7/2019 tentang X; Dicabut oleh Nomor 8/2020 tentang Y";

    fn labels(statements: &[Statement]) -> Vec<String> {
        statements.iter().map(Statement::label).collect()
    }

    #[test]
    fn reference_with_slash_identifier() {
        assert_eq!(
            extract_reference("Nomor 5/2021 tentang Energi").as_deref(),
            Some("Nomor 5/2021")
        );
    }

    #[test]
    fn reference_with_tahun() {
        assert_eq!(
            extract_reference("No. 12 Tahun 2020 tentang Mineral").as_deref(),
            Some("No. 12 Tahun 2020")
        );
    }

    #[test]
    fn reference_capitalised_anchor() {
        assert_eq!(
            extract_reference("Diubah dengan PP Nomor 23 Tahun 2010 Tentang Pertambangan").as_deref(),
            Some("Nomor 23 Tahun 2010")
        );
    }

    #[test]
    fn reference_requires_anchor_word() {
        assert_eq!(extract_reference("Nomor 5/2021 mengenai Energi"), None);
        assert_eq!(extract_reference("Diubah oleh Nomor 7 Tahun 2019"), None);
        assert_eq!(extract_reference("Nomor 5/2021tentang Energi"), None);
        assert_eq!(extract_reference(""), None);
    }

    #[test]
    fn reference_none_input() {
        assert_eq!(extract_reference(None), None);
    }

    #[test]
    fn reference_first_match_wins() {
        let text = "Nomor 1 tentang A dan Nomor 2 tentang B";
        assert_eq!(extract_reference(text).as_deref(), Some("Nomor 1"));
    }

    #[test]
    fn reference_dotted_identifier() {
        assert_eq!(
            extract_reference("Keputusan Menteri Nomor 1453.K/29/MEM/2000 tentang Pedoman").as_deref(),
            Some("Nomor 1453.K/29/MEM/2000")
        );
    }

    #[test]
    fn first_statement_only_first_clause() {
        assert_eq!(
            labels(&extract_first_statement(TWO_CLAUSES)),
            vec!["Diubah - Nomor 7/2019"]
        );
    }

    #[test]
    fn first_statement_empty_first_clause() {
        assert!(extract_first_statement("").is_empty());
        assert!(extract_first_statement("   ").is_empty());
        assert!(extract_first_statement("; Dicabut oleh Nomor 8/2020 tentang Y").is_empty());
    }

    #[test]
    fn first_statement_without_reference() {
        assert!(extract_first_statement("Berlaku; Dicabut oleh Nomor 8/2020 tentang Y").is_empty());
    }

    #[test]
    fn first_statement_none_input() {
        assert!(extract_first_statement(None).is_empty());
    }

    #[test]
    fn all_clauses_in_order() {
        assert_eq!(
            labels(&extract_statements_after_semicolon(TWO_CLAUSES)),
            vec!["Diubah - Nomor 7/2019", "Dicabut - Nomor 8/2020"]
        );
    }

    #[test]
    fn all_clauses_skip_unparsable_and_empty() {
        let text = ";Berlaku; ;Mencabut Nomor 3 tentang Z;";
        assert_eq!(
            labels(&extract_statements_after_semicolon(text)),
            vec!["Mencabut - Nomor 3"]
        );
    }

    #[test]
    fn all_clauses_keep_duplicates() {
        let text = "Diubah Nomor 1 tentang A; Diubah Nomor 1 tentang A";
        assert_eq!(extract_statements_after_semicolon(text).len(), 2);
    }

    #[test]
    fn all_clauses_none_input() {
        assert!(extract_statements_after_semicolon(None).is_empty());
    }

    #[test]
    fn statement_parts() {
        let statements = extract_first_statement("Mengubah   PP Nomor 9 Tahun 2001 tentang Air");
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].action_word, "Mengubah");
        assert_eq!(statements[0].reference, "Nomor 9 Tahun 2001");
        assert_eq!(statements[0].action(), Action::Mengubah);
    }
}
