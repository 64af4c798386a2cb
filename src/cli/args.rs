//! Command-line argument definitions using clap

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::files::PatternKind;
use crate::imaging::DEFAULT_QUALITY;
use crate::logging::DEFAULT_LOG_FILE;

/// Office Tweaks - convert PDF/DOCX documents, compress images and clean up files.
///
/// Without an operation flag the interactive menu starts.
#[derive(Parser, Debug)]
#[command(name = "office-tweaks")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("operation")
        .args(["pdf2docx", "docx2pdf", "compress_images", "delete"])
        .multiple(false)
))]
pub struct Cli {
    /// Working directory for all operations (defaults to the current directory)
    #[arg(short, long)]
    pub workdir: Option<PathBuf>,

    /// Convert PDF to DOCX: a file path, or "all" for every PDF in the working directory
    #[arg(long, value_name = "SRC|all")]
    pub pdf2docx: Option<String>,

    /// Convert DOCX to PDF: a file path, or "all" for every DOCX in the working directory
    #[arg(long, value_name = "SRC|all")]
    pub docx2pdf: Option<String>,

    /// Compress images: a file path, or "all" for every image in the working directory
    #[arg(long, value_name = "SRC|all")]
    pub compress_images: Option<String>,

    /// JPEG quality for image compression (1-100)
    #[arg(short, long, default_value_t = DEFAULT_QUALITY, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Output file for single-file conversion, or output directory for single-image compression
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Delete files matching --delete-mode/--delete-pattern
    #[arg(long, requires_all = ["delete_mode", "delete_pattern"])]
    pub delete: bool,

    /// Directory to delete from (defaults to the working directory)
    #[arg(long)]
    pub delete_dir: Option<PathBuf>,

    /// How --delete-pattern is matched against file names
    #[arg(long, value_enum)]
    pub delete_mode: Option<PatternKind>,

    /// Text to match (case-insensitive)
    #[arg(long)]
    pub delete_pattern: Option<String>,

    /// Confirm deletion without prompting
    #[arg(short, long, default_value = "false")]
    pub yes: bool,

    /// Stop searching for a free `_N` output name after this many attempts (unbounded by default)
    #[arg(long, env = "OFFICE_TWEAKS_SUFFIX_LIMIT")]
    pub suffix_limit: Option<u32>,

    /// Path to the LibreOffice `soffice` binary (searched on PATH by default)
    #[arg(long, env = "OFFICE_TWEAKS_SOFFICE")]
    pub soffice: Option<PathBuf>,

    /// Append-only log file
    #[arg(long, env = "OFFICE_TWEAKS_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Write the summary of an "all" batch run to this JSON file
    #[arg(long)]
    pub summary_json: Option<PathBuf>,

    /// Also print log events to stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

/// What a batch-mode source argument refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Every matching file in the working directory
    All,
    /// One file
    File(PathBuf),
}

impl Source {
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("all") {
            Source::All
        } else {
            Source::File(PathBuf::from(value))
        }
    }
}

/// Which batch operation was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    PdfToDocx(Source),
    DocxToPdf(Source),
    CompressImages(Source),
    Delete,
}

impl Cli {
    /// The requested batch operation, or `None` for interactive mode.
    pub fn operation(&self) -> Option<Operation> {
        if let Some(src) = &self.pdf2docx {
            Some(Operation::PdfToDocx(Source::parse(src)))
        } else if let Some(src) = &self.docx2pdf {
            Some(Operation::DocxToPdf(Source::parse(src)))
        } else if let Some(src) = &self.compress_images {
            Some(Operation::CompressImages(Source::parse(src)))
        } else if self.delete {
            Some(Operation::Delete)
        } else {
            None
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.operation().is_none()
    }
}
