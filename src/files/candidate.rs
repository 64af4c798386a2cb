//! Snapshots of files selected for an operation

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OfficeError, Result};

use super::pattern::PatternKind;
use super::size::human_readable_size;

/// A regular file captured at enumeration time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
}

impl FileCandidate {
    /// Capture a file's name and size. Fails if the path is missing or unreadable.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => OfficeError::NotFound(path.to_path_buf()),
            _ => OfficeError::io(path, e),
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            size: metadata.len(),
        })
    }

    pub fn display_size(&self) -> String {
        human_readable_size(self.size)
    }

    /// Lowercase extension without the dot, empty when there is none
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// Case-insensitive name order, ties broken by the exact name.
    pub fn name_order(a: &FileCandidate, b: &FileCandidate) -> Ordering {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    }
}

/// Files matched by a deletion pattern, awaiting confirmation.
#[derive(Debug, Clone)]
pub struct DeletionSet {
    pub directory: PathBuf,
    pub kind: PatternKind,
    pub pattern: String,
    pub candidates: Vec<FileCandidate>,
}

impl DeletionSet {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn total_size(&self) -> u64 {
        self.candidates.iter().map(|c| c.size).sum()
    }
}
