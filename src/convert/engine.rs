//! Conversion engine seam
//!
//! The byte-level PDF/DOCX conversion happens outside this crate. An engine
//! only has to turn one input file into one output file.

use std::fmt;
use std::path::Path;

/// Which way a document is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    PdfToDocx,
    DocxToPdf,
}

impl Direction {
    /// Extension of the files this direction consumes
    pub fn source_extension(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "pdf",
            Direction::DocxToPdf => "docx",
        }
    }

    /// Extension of the files this direction produces
    pub fn target_extension(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "docx",
            Direction::DocxToPdf => "pdf",
        }
    }

    /// Progress label, e.g. `PDF -> DOCX`
    pub fn label(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "PDF -> DOCX",
            Direction::DocxToPdf => "DOCX -> PDF",
        }
    }

    /// Upper-case name of the source format
    pub fn source_name(self) -> &'static str {
        match self {
            Direction::PdfToDocx => "PDF",
            Direction::DocxToPdf => "DOCX",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why an engine could not produce its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The external application is not installed
    Unavailable,
    /// The engine ran and failed
    Failed(String),
}

/// Something that can convert one document into another format.
pub trait ConversionEngine {
    /// Human-readable engine name used in messages
    fn name(&self) -> &str;

    /// Result of the capability probe taken when the engine was constructed
    fn is_available(&self) -> bool;

    /// Hint shown when the engine is unavailable
    fn install_hint(&self) -> String {
        format!("Install {} to enable document conversion", self.name())
    }

    /// Write `output` from `input`. `output` does not exist when this is called.
    fn convert(&self, input: &Path, output: &Path, direction: Direction) -> Result<(), EngineError>;
}
