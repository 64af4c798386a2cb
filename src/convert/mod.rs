//! Document conversion between PDF and DOCX
//!
//! Single-file conversions resolve the output name, hand the work to a
//! [`ConversionEngine`] and report the outcome. Batch conversions run the
//! single-file path over every candidate in the working directory; a failed
//! file is counted and the batch moves on.

mod engine;
mod libreoffice;

use std::path::{Path, PathBuf};

pub use engine::{ConversionEngine, Direction, EngineError};
pub use libreoffice::LibreOffice;

use crate::error::{OfficeError, Result};
use crate::files::FileManager;
use crate::report::{BatchSummary, Reporter};

pub struct DocumentConverter {
    engine: Box<dyn ConversionEngine>,
    reporter: Reporter,
}

impl DocumentConverter {
    pub fn new(engine: Box<dyn ConversionEngine>, reporter: Reporter) -> Self {
        Self { engine, reporter }
    }

    pub fn pdf_to_docx(
        &self,
        files: &FileManager,
        pdf_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        self.convert(files, Direction::PdfToDocx, pdf_path, output_path)
    }

    pub fn docx_to_pdf(
        &self,
        files: &FileManager,
        docx_path: &Path,
        output_path: Option<&Path>,
    ) -> Result<PathBuf> {
        self.convert(files, Direction::DocxToPdf, docx_path, output_path)
    }

    pub fn convert_all_pdf_to_docx(
        &self,
        files: &mut FileManager,
        directory: Option<&Path>,
    ) -> Result<BatchSummary> {
        self.convert_all(files, Direction::PdfToDocx, directory)
    }

    pub fn convert_all_docx_to_pdf(
        &self,
        files: &mut FileManager,
        directory: Option<&Path>,
    ) -> Result<BatchSummary> {
        self.convert_all(files, Direction::DocxToPdf, directory)
    }

    /// Convert one file. The output defaults to the input with its extension
    /// swapped and never overwrites an existing file.
    ///
    /// Failures are reported here; the error is returned so callers can count it.
    /// A Ctrl+C during the call turns the outcome into [`OfficeError::Interrupted`].
    pub fn convert(
        &self,
        files: &FileManager,
        direction: Direction,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        let cancellation = self.reporter.cancellation();
        let result = {
            let _busy = cancellation.busy();
            self.try_convert(files, direction, input, output)
        };

        match &result {
            Ok(output) => self.reporter.success(format!(
                "Conversion complete: {}",
                file_name(output)
            )),
            Err(err) => {
                self.reporter.error(err.to_string());
                if let Some(hint) = err.hint() {
                    self.reporter.info(hint);
                }
            }
        }

        if cancellation.is_requested() {
            return Err(OfficeError::Interrupted);
        }
        result
    }

    fn try_convert(
        &self,
        files: &FileManager,
        direction: Direction,
        input: &Path,
        output: Option<&Path>,
    ) -> Result<PathBuf> {
        if !input.is_file() {
            return Err(OfficeError::NotFound(input.to_path_buf()));
        }
        if !self.engine.is_available() {
            return Err(self.map_engine_error(EngineError::Unavailable, direction, input));
        }

        let requested = match output {
            Some(path) => path.to_path_buf(),
            None => input.with_extension(direction.target_extension()),
        };
        let output = files.resolve_unique_path(&requested)?;

        self.reporter.info(format!(
            "Converting: {} -> {}",
            file_name(input),
            file_name(&output)
        ));

        self.engine
            .convert(input, &output, direction)
            .map_err(|err| self.map_engine_error(err, direction, input))?;

        Ok(output)
    }

    fn map_engine_error(&self, err: EngineError, direction: Direction, input: &Path) -> OfficeError {
        match (err, direction) {
            (EngineError::Unavailable, Direction::DocxToPdf) => OfficeError::EngineUnavailable {
                engine: self.engine.name().to_string(),
                hint: self.engine.install_hint(),
            },
            (EngineError::Unavailable, Direction::PdfToDocx) => OfficeError::ConversionFailed {
                path: input.to_path_buf(),
                reason: format!("{} is not available", self.engine.name()),
            },
            (EngineError::Failed(reason), _) => OfficeError::ConversionFailed {
                path: input.to_path_buf(),
                reason,
            },
        }
    }

    /// Convert every matching file in the working directory (optionally
    /// switching to `directory` first). Only a failed directory switch or
    /// listing aborts; per-file failures are counted. Ctrl+C stops the batch
    /// after the current file with [`OfficeError::Interrupted`].
    pub fn convert_all(
        &self,
        files: &mut FileManager,
        direction: Direction,
        directory: Option<&Path>,
    ) -> Result<BatchSummary> {
        if let Some(directory) = directory {
            files.set_working_directory(directory)?;
        }

        let candidates = files.list_by_extension(&[direction.source_extension()])?;
        if candidates.is_empty() {
            self.reporter.info(format!(
                "No {} files found in the working directory",
                direction.source_name()
            ));
            return Ok(BatchSummary::new());
        }

        self.reporter.info(format!(
            "Found {} file(s): {}",
            direction.source_name(),
            candidates.len()
        ));

        let _busy = self.reporter.cancellation().busy();
        let mut summary = BatchSummary::new();
        let progress = self
            .reporter
            .progress(candidates.len(), &format!("Converting {}", direction.label()));

        for (index, candidate) in candidates.iter().enumerate() {
            progress.set_position(index + 1);
            match self.convert(files, direction, &candidate.path, None) {
                Ok(_) => summary.record_success(),
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
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
