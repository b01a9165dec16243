//! Splitting a string into single-character display units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::error::FlipError;

/// What counts as one character unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Extended grapheme clusters: a base letter and its combining marks, or a
    /// whole emoji ZWJ sequence, form one unit.
    #[default]
    Graphemes,
    /// Unicode scalar values (`char`s), with no cluster merging.
    Chars,
}

impl SplitMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Graphemes => "graphemes",
            Self::Chars => "chars",
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplitMode {
    type Err = FlipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphemes" | "grapheme" => Ok(Self::Graphemes),
            "chars" | "char" | "scalars" => Ok(Self::Chars),
            _ => Err(FlipError::UnknownSplitMode(s.to_string())),
        }
    }
}

/// Split `text` into ordered display units.
///
/// Order follows the string. An empty string yields no units.
pub fn split_units(text: &str, mode: SplitMode) -> Vec<&str> {
    match mode {
        SplitMode::Graphemes => text.graphemes(true).collect(),
        SplitMode::Chars => text
            .char_indices()
            .map(|(idx, ch)| &text[idx..idx + ch.len_utf8()])
            .collect(),
    }
}
