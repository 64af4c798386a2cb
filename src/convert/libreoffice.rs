//! LibreOffice-backed conversion engine
//!
//! Runs `soffice --headless --convert-to` into a staging directory next to the
//! requested output, then moves the produced file into place. The staging
//! directory keeps LibreOffice's fixed `<stem>.<ext>` naming from clobbering
//! files that already sit in the output directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use super::engine::{ConversionEngine, Direction, EngineError};

const BINARY_NAMES: &[&str] = &["soffice", "libreoffice"];

#[cfg(target_os = "macos")]
const INSTALL_PATHS: &[&str] = &["/Applications/LibreOffice.app/Contents/MacOS/soffice"];

#[cfg(target_os = "windows")]
const INSTALL_PATHS: &[&str] = &[
    r"C:\Program Files\LibreOffice\program\soffice.exe",
    r"C:\Program Files (x86)\LibreOffice\program\soffice.exe",
];

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const INSTALL_PATHS: &[&str] = &["/usr/lib/libreoffice/program/soffice", "/opt/libreoffice/program/soffice"];

/// Converter driving a local LibreOffice installation.
#[derive(Debug, Clone)]
pub struct LibreOffice {
    binary: Option<PathBuf>,
}

impl LibreOffice {
    /// Probe for the binary once: explicit path, then `PATH`, then the
    /// platform's default install location.
    pub fn locate(explicit: Option<&Path>) -> Self {
        let binary = match explicit {
            Some(path) => is_executable(path).then(|| path.to_path_buf()),
            None => find_on_path().or_else(|| {
                INSTALL_PATHS
                    .iter()
                    .map(PathBuf::from)
                    .find(|p| is_executable(p))
            }),
        };

        match &binary {
            Some(path) => tracing::debug!(binary = %path.display(), "LibreOffice found"),
            None => tracing::debug!("LibreOffice not found"),
        }

        Self { binary }
    }

    pub fn binary(&self) -> Option<&Path> {
        self.binary.as_deref()
    }

    fn convert_to_filter(direction: Direction) -> &'static str {
        match direction {
            Direction::PdfToDocx => "docx:MS Word 2007 XML",
            Direction::DocxToPdf => "pdf:writer_pdf_Export",
        }
    }
}

impl ConversionEngine for LibreOffice {
    fn name(&self) -> &str {
        "LibreOffice"
    }

    fn is_available(&self) -> bool {
        self.binary.is_some()
    }

    fn install_hint(&self) -> String {
        "Install LibreOffice and make sure `soffice` is on PATH (or pass --soffice <PATH>)"
            .to_string()
    }

    fn convert(&self, input: &Path, output: &Path, direction: Direction) -> Result<(), EngineError> {
        let binary = self.binary.as_ref().ok_or(EngineError::Unavailable)?;

        let output_dir = output
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let staging = tempfile::Builder::new()
            .prefix(".office-tweaks-")
            .tempdir_in(output_dir)
            .map_err(|e| EngineError::Failed(format!("cannot create staging directory: {}", e)))?;

        let mut command = Command::new(binary);
        command.arg("--headless").arg("--norestore");
        if direction == Direction::PdfToDocx {
            // Without the import filter LibreOffice opens PDFs in Draw
            command.arg("--infilter=writer_pdf_import");
        }
        command
            .arg("--convert-to")
            .arg(Self::convert_to_filter(direction))
            .arg("--outdir")
            .arg(staging.path())
            .arg(input);

        tracing::debug!(?command, "Running conversion engine");
        let result = command
            .output()
            .map_err(|e| EngineError::Failed(format!("cannot run {}: {}", binary.display(), e)))?;

        let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
        if !result.status.success() {
            return Err(EngineError::Failed(if stderr.is_empty() {
                format!("engine exited with {}", result.status)
            } else {
                stderr
            }));
        }

        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let produced = staging
            .path()
            .join(format!("{}.{}", stem, direction.target_extension()));
        if !produced.is_file() {
            return Err(EngineError::Failed(if stderr.is_empty() {
                "engine produced no output".to_string()
            } else {
                format!("engine produced no output: {}", stderr)
            }));
        }

        // Same filesystem as the output, so a rename is enough
        fs::rename(&produced, output)
            .map_err(|e| EngineError::Failed(format!("cannot move output into place: {}", e)))?;

        Ok(())
    }
}

fn find_on_path() -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var).find_map(|dir| {
        BINARY_NAMES.iter().find_map(|name| {
            let candidate = dir.join(name);
            if is_executable(&candidate) {
                return Some(candidate);
            }
            let with_exe = candidate.with_extension("exe");
            is_executable(&with_exe).then_some(with_exe)
        })
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_missing_binary_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let engine = LibreOffice::locate(Some(&dir.path().join("no-soffice")));
        assert!(!engine.is_available());
        assert_eq!(
            engine.convert(Path::new("a.docx"), Path::new("a.pdf"), Direction::DocxToPdf),
            Err(EngineError::Unavailable)
        );
    }

    #[cfg(unix)]
    fn make_executable(path: &Path, executable: bool) {
        use std::os::unix::fs::PermissionsExt;
        let mode = if executable { 0o755 } else { 0o644 };
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_non_executable_binary_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("soffice");
        fs::write(&fake, b"").unwrap();
        make_executable(&fake, false);

        let engine = LibreOffice::locate(Some(&fake));
        assert!(!engine.is_available());
        assert!(!is_executable(&fake));
    }

    #[test]
    fn test_directory_is_not_a_binary() {
        let dir = TempDir::new().unwrap();
        assert!(!is_executable(dir.path()));
    }

    #[test]
    fn test_explicit_binary_is_used() {
        let dir = TempDir::new().unwrap();
        let fake = dir.path().join("soffice");
        fs::write(&fake, b"").unwrap();
        #[cfg(unix)]
        make_executable(&fake, true);

        let engine = LibreOffice::locate(Some(&fake));
        assert!(engine.is_available());
        assert_eq!(engine.binary(), Some(fake.as_path()));
    }
}
