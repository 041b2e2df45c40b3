//! Color catalog data structures.
//!
//! A catalog is the ordered list of colors a layer can be dressed in. The
//! wire format is a JSON object with a `colors` array:
//!
//! ```json
//! {"colors": [{"name": "red", "label": "Red"}, {"name": "blue", "label": "Blue"}]}
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single selectable color of a layer's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorEntry {
    /// Identifier, unique within one catalog (e.g., "red").
    #[serde(rename = "name")]
    pub id: String,
    /// Human-readable name (e.g., "Red").
    #[serde(rename = "label")]
    pub display_label: String,
}

impl ColorEntry {
    /// Creates a new color entry.
    pub fn new(id: impl Into<String>, display_label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_label: display_label.into(),
        }
    }
}

/// Why a catalog payload could not be turned into entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadProblem {
    /// The payload is not valid JSON.
    InvalidJson(String),
    /// The `colors` field is missing.
    MissingColors,
    /// The `colors` field is present but not an array.
    NotAList,
    /// An element of the `colors` array is not a `{name, label}` object.
    MalformedEntry {
        /// Position of the offending element
        index: usize,
    },
}

impl std::fmt::Display for PayloadProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(reason) => write!(f, "invalid JSON: {reason}"),
            Self::MissingColors => write!(f, "payload has no \"colors\" field"),
            Self::NotAList => write!(f, "\"colors\" is not a list"),
            Self::MalformedEntry { index } => write!(f, "color entry {index} is malformed"),
        }
    }
}

/// Result of parsing a catalog payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    /// Entries in payload order, duplicates removed.
    pub entries: Vec<ColorEntry>,
    /// Ids that appeared more than once (only the first occurrence is kept).
    pub duplicates: Vec<String>,
}

/// Parses a catalog payload.
///
/// The whole payload is rejected when `colors` is not a well-formed list,
/// so a half-valid list never yields a partial catalog.
pub fn parse_catalog(payload: &str) -> Result<ParsedCatalog, PayloadProblem> {
    let value: serde_json::Value =
        serde_json::from_str(payload).map_err(|e| PayloadProblem::InvalidJson(e.to_string()))?;

    let colors = value.get("colors").ok_or(PayloadProblem::MissingColors)?;
    let items = colors.as_array().ok_or(PayloadProblem::NotAList)?;

    let mut entries = Vec::with_capacity(items.len());
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let entry = ColorEntry::deserialize(item)
            .map_err(|_| PayloadProblem::MalformedEntry { index })?;
        if seen.insert(entry.id.clone()) {
            entries.push(entry);
        } else {
            duplicates.push(entry.id);
        }
    }

    Ok(ParsedCatalog {
        entries,
        duplicates,
    })
}
