//! Image compression
//!
//! Compressed copies are written as `compressed_<name>` next to the source (or
//! into a chosen directory). The source file is never modified.

mod codec;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{OfficeError, Result};
use crate::files::FileManager;
use crate::report::{BatchSummary, Reporter};

/// Default JPEG quality when none is given
pub const DEFAULT_QUALITY: u8 = 85;

/// Outcome of compressing one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionResult {
    pub output: PathBuf,
    pub original_size: u64,
    pub new_size: u64,
}

impl CompressionResult {
    /// `original - new`; negative when re-encoding made the file larger
    pub fn savings(&self) -> i64 {
        self.original_size as i64 - self.new_size as i64
    }

    /// Savings as a percentage of the original, 0 for an empty original
    pub fn savings_percent(&self) -> f64 {
        if self.original_size == 0 {
            0.0
        } else {
            self.savings() as f64 / self.original_size as f64 * 100.0
        }
    }
}

pub struct ImageProcessor {
    codec_available: bool,
    reporter: Reporter,
}

impl ImageProcessor {
    /// Probes codec support once.
    pub fn new(reporter: Reporter) -> Self {
        let codec_available = codec::available();
        if !codec_available {
            tracing::warn!("Image codecs not compiled in; compression disabled");
        }
        Self {
            codec_available,
            reporter,
        }
    }

    pub fn is_available(&self) -> bool {
        self.codec_available
    }

    /// Fails with [`OfficeError::DependencyUnavailable`] when codecs are not compiled in.
    pub fn ensure_available(&self) -> Result<()> {
        if self.codec_available {
            Ok(())
        } else {
            Err(OfficeError::DependencyUnavailable {
                dependency: "Image codec support",
                hint: "Rebuild with the `images` feature: cargo install office-tweaks --features images"
                    .to_string(),
            })
        }
    }

    /// Compress one image with `quality` in 1..=100.
    ///
    /// Failures are reported here and returned. A Ctrl+C during the call
    /// turns the outcome into [`OfficeError::Interrupted`].
    pub fn compress(
        &self,
        files: &FileManager,
        image_path: &Path,
        quality: u8,
        output_dir: Option<&Path>,
    ) -> Result<CompressionResult> {
        let cancellation = self.reporter.cancellation();
        let result = {
            let _busy = cancellation.busy();
            self.try_compress(files, image_path, quality, output_dir)
        };

        match &result {
            Ok(outcome) => self.reporter.success(format!(
                "Compressed successfully. Savings: {:.1}%",
                outcome.savings_percent()
            )),
            Err(err) => self.report_error(err),
        }

        if cancellation.is_requested() {
            return Err(OfficeError::Interrupted);
        }
        result
    }

    fn try_compress(
        &self,
        files: &FileManager,
        image_path: &Path,
        quality: u8,
        output_dir: Option<&Path>,
    ) -> Result<CompressionResult> {
        self.ensure_available()?;
        validate_quality(quality)?;

        if !image_path.is_file() {
            return Err(OfficeError::NotFound(image_path.to_path_buf()));
        }

        let output_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => image_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };
        fs::create_dir_all(&output_dir).map_err(|e| OfficeError::io(&output_dir, e))?;

        let name = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = files.resolve_unique_path(&output_dir.join(format!("compressed_{}", name)))?;

        self.reporter
            .info(format!("Compressing: {} (quality: {}%)", name, quality));

        let original_size = fs::metadata(image_path)
            .map_err(|e| OfficeError::io(image_path, e))?
            .len();

        if let Err(reason) = codec::recompress(image_path, &output, quality) {
            // Don't leave a truncated file behind
            let _ = fs::remove_file(&output);
            return Err(OfficeError::CompressionFailed {
                path: image_path.to_path_buf(),
                reason,
            });
        }

        let new_size = fs::metadata(&output)
            .map_err(|e| OfficeError::io(&output, e))?
            .len();

        Ok(CompressionResult {
            output,
            original_size,
            new_size,
        })
    }

    /// Compress every recognized image in the working directory. Totals only
    /// include images that compressed successfully.
    pub fn compress_all(
        &self,
        files: &mut FileManager,
        directory: Option<&Path>,
        quality: u8,
    ) -> Result<BatchSummary> {
        if let Err(err) = self.ensure_available().and_then(|_| validate_quality(quality)) {
            self.report_error(&err);
            return Err(err);
        }

        if let Some(directory) = directory {
            files.set_working_directory(directory)?;
        }

        let candidates = files.list_image_files()?;
        if candidates.is_empty() {
            self.reporter
                .info("No images found in the working directory");
            return Ok(BatchSummary::new());
        }

        self.reporter.info(format!(
            "Found images: {} (quality: {}%)",
            candidates.len(),
            quality
        ));

        let _busy = self.reporter.cancellation().busy();
        let mut summary = BatchSummary::new();
        let progress = self
            .reporter
            .progress(candidates.len(), "Compressing images");

        for (index, candidate) in candidates.iter().enumerate() {
            progress.set_position(index + 1);
            match self.compress(files, &candidate.path, quality, None) {
                Ok(outcome) => summary.record_savings(outcome.savings(), outcome.original_size),
                Err(OfficeError::Interrupted) => {
                    progress.finish_and_clear();
                    return Err(OfficeError::Interrupted);
                }
                Err(_) => summary.record_failure(),
            }
        }
        progress.finish();

        summary.display(&self.reporter);
        Ok(summary)
    }

    fn report_error(&self, err: &OfficeError) {
        self.reporter.error(err.to_string());
        if let Some(hint) = err.hint() {
            self.reporter.info(hint);
        }
    }
}

/// Quality must be within 1..=100
pub fn validate_quality(quality: u8) -> Result<()> {
    if (1..=100).contains(&quality) {
        Ok(())
    } else {
        Err(OfficeError::InvalidInput(format!(
            "Quality must be between 1 and 100, got {}",
            quality
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_savings_are_preserved() {
        let result = CompressionResult {
            output: PathBuf::from("compressed_a.jpg"),
            original_size: 1000,
            new_size: 1250,
        };
        assert_eq!(result.savings(), -250);
        assert!((result.savings_percent() + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_original_size_has_zero_percent() {
        let result = CompressionResult {
            output: PathBuf::from("compressed_empty.png"),
            original_size: 0,
            new_size: 67,
        };
        assert_eq!(result.savings_percent(), 0.0);
    }

    #[test]
    fn test_quality_bounds() {
        assert!(validate_quality(1).is_ok());
        assert!(validate_quality(100).is_ok());
        assert!(matches!(validate_quality(0), Err(OfficeError::InvalidInput(_))));
        assert!(matches!(validate_quality(101), Err(OfficeError::InvalidInput(_))));
    }
}
