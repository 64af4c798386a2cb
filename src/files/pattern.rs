//! Filename patterns for group deletion

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

/// How a deletion pattern is compared against a file name.
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Name starts with the pattern
    #[value(alias = "startswith")]
    Prefix,
    /// Name ends with the pattern
    #[value(alias = "endswith")]
    Suffix,
    /// Name contains the pattern anywhere
    #[value(alias = "substring")]
    Contains,
    /// Extension equals the pattern (leading dot optional)
    Extension,
}

impl PatternKind {
    /// Menu order used by the interactive deletion prompt (1-based).
    pub const ALL: [PatternKind; 4] = [
        PatternKind::Prefix,
        PatternKind::Suffix,
        PatternKind::Contains,
        PatternKind::Extension,
    ];

    pub fn matches(self, file_name: &str, pattern: &str) -> bool {
        let name = file_name.to_lowercase();
        let pattern = pattern.to_lowercase();

        match self {
            PatternKind::Prefix => name.starts_with(&pattern),
            PatternKind::Suffix => name.ends_with(&pattern),
            PatternKind::Contains => name.contains(&pattern),
            PatternKind::Extension => {
                name.ends_with(&format!(".{}", pattern.trim_start_matches('.')))
            }
        }
    }

    /// Label shown in the interactive criterion menu
    pub fn menu_label(self) -> &'static str {
        match self {
            PatternKind::Prefix => "Delete files starting with...",
            PatternKind::Suffix => "Delete files ending with...",
            PatternKind::Contains => "Delete files containing...",
            PatternKind::Extension => "Delete files by extension",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternKind::Prefix => "prefix",
            PatternKind::Suffix => "suffix",
            PatternKind::Contains => "contains",
            PatternKind::Extension => "extension",
        };
        write!(f, "{}", name)
    }
}
