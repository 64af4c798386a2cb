//! Collision-free output names

use std::path::{Path, PathBuf};

use crate::error::{OfficeError, Result};

/// Return `path` if it is free, otherwise the first `<stem>_<n><ext>` (n >= 1)
/// that does not exist.
///
/// With `limit == None` the search is unbounded: a directory pre-populated
/// with every suffix would keep it running. A configured limit turns that
/// case into [`OfficeError::SuffixLimitReached`].
pub fn resolve_unique_path(path: &Path, limit: Option<u32>) -> Result<PathBuf> {
    if !path.exists() {
        return Ok(path.to_path_buf());
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter: u32 = 1;
    loop {
        if let Some(limit) = limit {
            if counter > limit {
                return Err(OfficeError::SuffixLimitReached {
                    path: path.to_path_buf(),
                    limit,
                });
            }
        }

        let candidate = parent.join(format!("{}_{}{}", stem, counter, extension));
        if !candidate.exists() {
            return Ok(candidate);
        }
        counter = counter.checked_add(1).ok_or_else(|| OfficeError::SuffixLimitReached {
            path: path.to_path_buf(),
            limit: u32::MAX,
        })?;
    }
}

