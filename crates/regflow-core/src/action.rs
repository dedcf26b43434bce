//! Closed palette of Indonesian legal-status verbs.
//!
//! The leading word of a status clause decides how the resulting edge is
//! weighted and how nodes and edges are coloured. Only four verbs are known;
//! everything else falls through to [`Action::Other`].

use serde::{Deserialize, Serialize};

/// Colour used for node 0 and for any unrecognised action word.
pub const DEFAULT_COLOR: &str = "grey";

/// A legal-status verb as it appears at the start of a status clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// "amended by"
    Diubah,
    /// "revoked by"
    Dicabut,
    /// "revokes"
    Mencabut,
    /// "amends"
    Mengubah,
    Other,
}

impl Action {
    /// The four recognised verbs, in legend order.
    pub const KNOWN: [Action; 4] = [
        Action::Diubah,
        Action::Dicabut,
        Action::Mencabut,
        Action::Mengubah,
    ];

    /// Exact, case-sensitive lookup of an action word.
    pub fn from_word(word: &str) -> Self {
        match word {
            "Diubah" => Action::Diubah,
            "Dicabut" => Action::Dicabut,
            "Mencabut" => Action::Mencabut,
            "Mengubah" => Action::Mengubah,
            _ => Action::Other,
        }
    }

    /// The keyword itself; `None` for [`Action::Other`].
    pub fn word(self) -> Option<&'static str> {
        match self {
            Action::Diubah => Some("Diubah"),
            Action::Dicabut => Some("Dicabut"),
            Action::Mencabut => Some("Mencabut"),
            Action::Mengubah => Some("Mengubah"),
            Action::Other => None,
        }
    }

    /// Short English gloss for legends.
    pub fn english(self) -> &'static str {
        match self {
            Action::Diubah => "amended by",
            Action::Dicabut => "revoked by",
            Action::Mencabut => "revokes",
            Action::Mengubah => "amends",
            Action::Other => "other",
        }
    }

    /// Edge weight for an edge whose target carries this action.
    pub fn weight(self) -> u32 {
        match self {
            Action::Diubah => 5,
            Action::Dicabut => 10,
            Action::Mencabut => 15,
            Action::Mengubah => 20,
            Action::Other => 10,
        }
    }

    pub fn node_color(self) -> &'static str {
        match self {
            Action::Diubah => "#C76A6A",
            Action::Dicabut => "#D6C93A",
            Action::Mencabut => "#5DAFCE",
            Action::Mengubah => "#6BBF8C",
            Action::Other => DEFAULT_COLOR,
        }
    }

    /// Lighter tone of [`node_color`](Self::node_color), used for edges.
    pub fn edge_color(self) -> &'static str {
        match self {
            Action::Diubah => "#F5B7B1",
            Action::Dicabut => "#F9E79F",
            Action::Mencabut => "#85C1AE",
            Action::Mengubah => "#A9DFBF",
            Action::Other => DEFAULT_COLOR,
        }
    }
}
