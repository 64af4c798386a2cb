//! Working directory, file enumeration and group deletion

mod candidate;
mod naming;
mod pattern;
mod size;

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use candidate::{DeletionSet, FileCandidate};
pub use naming::resolve_unique_path;
pub use pattern::PatternKind;
pub use size::human_readable_size;

use crate::error::{OfficeError, Result};
use crate::report::Reporter;

/// Extensions treated as page-layout documents
pub const PDF_EXTENSIONS: &[&str] = &["pdf"];

/// Extensions treated as word-processing documents
pub const DOCX_EXTENSIONS: &[&str] = &["docx"];

/// Raster formats the image processor recognizes
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif"];

/// Owns the working directory every batch enumeration runs against.
#[derive(Debug, Clone)]
pub struct FileManager {
    current_directory: PathBuf,
    suffix_limit: Option<u32>,
    reporter: Reporter,
}

impl FileManager {
    /// Start in the process working directory.
    pub fn new(reporter: Reporter) -> Result<Self> {
        let current_directory =
            env::current_dir().map_err(|e| OfficeError::io(PathBuf::from("."), e))?;
        Ok(Self {
            current_directory,
            suffix_limit: None,
            reporter,
        })
    }

    /// Start in `directory`, validated like [`FileManager::set_working_directory`].
    pub fn with_directory(directory: &Path, reporter: Reporter) -> Result<Self> {
        let current_directory = validate_directory(directory)?;
        Ok(Self {
            current_directory,
            suffix_limit: None,
            reporter,
        })
    }

    /// Bound the `_N` search of [`FileManager::resolve_unique_path`].
    pub fn with_suffix_limit(mut self, limit: Option<u32>) -> Self {
        self.suffix_limit = limit;
        self
    }

    pub fn current_directory(&self) -> &Path {
        &self.current_directory
    }

    /// Switch the working directory. On failure the current directory is left untouched.
    pub fn set_working_directory(&mut self, path: &Path) -> Result<&Path> {
        let resolved = validate_directory(path)?;
        tracing::info!(directory = %resolved.display(), "Working directory changed");
        self.current_directory = resolved;
        Ok(&self.current_directory)
    }

    /// Regular files in the working directory whose extension is in `extensions`
    /// (case-insensitive), sorted by lowercase name. Not recursive.
    pub fn list_by_extension(&self, extensions: &[&str]) -> Result<Vec<FileCandidate>> {
        let wanted: BTreeSet<String> = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();

        let mut files = self.regular_files(&self.current_directory)?;
        files.retain(|f| wanted.contains(&f.extension()));
        files.sort_by(FileCandidate::name_order);
        files.dedup_by(|a, b| a.path == b.path);
        Ok(files)
    }

    pub fn list_pdf_files(&self) -> Result<Vec<FileCandidate>> {
        self.list_by_extension(PDF_EXTENSIONS)
    }

    pub fn list_docx_files(&self) -> Result<Vec<FileCandidate>> {
        self.list_by_extension(DOCX_EXTENSIONS)
    }

    pub fn list_image_files(&self) -> Result<Vec<FileCandidate>> {
        self.list_by_extension(IMAGE_EXTENSIONS)
    }

    /// See [`resolve_unique_path`]; uses the configured suffix limit.
    pub fn resolve_unique_path(&self, path: &Path) -> Result<PathBuf> {
        resolve_unique_path(path, self.suffix_limit)
    }

    /// Files in `directory` (default: working directory) whose name matches.
    ///
    /// An empty set is a valid result; callers report it and stop.
    pub fn match_by_pattern(
        &self,
        kind: PatternKind,
        pattern: &str,
        directory: Option<&Path>,
    ) -> Result<DeletionSet> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Err(OfficeError::InvalidInput(
                "Pattern cannot be empty".to_string(),
            ));
        }

        let directory = match directory {
            Some(dir) => validate_existing_directory(dir)?,
            None => self.current_directory.clone(),
        };

        let mut candidates = self.regular_files(&directory)?;
        candidates.retain(|f| kind.matches(&f.name, pattern));
        candidates.sort_by(FileCandidate::name_order);

        Ok(DeletionSet {
            directory,
            kind,
            pattern: pattern.to_string(),
            candidates,
        })
    }

    /// Delete every file in the set. A failure is reported and skipped; the
    /// rest still proceed. Returns how many files were actually removed.
    pub fn delete_all(&self, set: &DeletionSet) -> usize {
        let mut deleted = 0;

        for candidate in &set.candidates {
            match fs::remove_file(&candidate.path) {
                Ok(()) => {
                    self.reporter
                        .success(format!("Deleted: {}", candidate.name));
                    deleted += 1;
                }
                Err(e) => {
                    self.reporter.error(format!(
                        "Failed to delete {}: {}",
                        candidate.name, e
                    ));
                }
            }
        }

        self.reporter
            .success(format!("Files deleted: {}/{}", deleted, set.len()));
        deleted
    }

    fn regular_files(&self, directory: &Path) -> Result<Vec<FileCandidate>> {
        let entries = fs::read_dir(directory).map_err(|e| map_dir_error(directory, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OfficeError::io(directory, e))?;
            let path = entry.path();
            // Follows symlinks, so a link to a regular file counts
            if !path.is_file() {
                continue;
            }
            match FileCandidate::from_path(&path) {
                Ok(candidate) => files.push(candidate),
                // Removed between read_dir and stat
                Err(OfficeError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(files)
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_home(input: &str) -> PathBuf {
    let trimmed = input.trim();
    if trimmed == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = trimmed
        .strip_prefix("~/")
        .or_else(|| trimmed.strip_prefix("~\\"))
    {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(trimmed)
}

fn validate_existing_directory(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(OfficeError::InvalidInput(
            "Path cannot be empty".to_string(),
        ));
    }
    if !path.exists() {
        return Err(OfficeError::NotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(OfficeError::NotADirectory(path.to_path_buf()));
    }
    fs::canonicalize(path).map_err(|e| map_dir_error(path, e))
}

/// Exists, is a directory, and is both listable and writable.
fn validate_directory(path: &Path) -> Result<PathBuf> {
    let resolved = validate_existing_directory(path)?;

    fs::read_dir(&resolved).map_err(|e| map_dir_error(path, e))?;
    // Creating (and immediately dropping) an anonymous file proves write access
    tempfile::tempfile_in(&resolved).map_err(|e| map_dir_error(path, e))?;

    Ok(resolved)
}

fn map_dir_error(path: &Path, e: io::Error) -> OfficeError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => OfficeError::PermissionDenied(path.to_path_buf()),
        io::ErrorKind::NotFound => OfficeError::NotFound(path.to_path_buf()),
        _ => OfficeError::io(path, e),
    }
}
