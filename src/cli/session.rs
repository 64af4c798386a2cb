//! Wiring of the components for one run

use anyhow::{Context, Result};

use crate::convert::{DocumentConverter, LibreOffice};
use crate::files::FileManager;
use crate::imaging::ImageProcessor;
use crate::report::Reporter;

use super::args::Cli;

/// Components shared by batch mode and the interactive menu.
pub struct Session {
    pub files: FileManager,
    pub converter: DocumentConverter,
    pub images: ImageProcessor,
    pub reporter: Reporter,
}

impl Session {
    /// Build all components from parsed arguments. Engine and codec probes run here, once.
    pub fn from_cli(cli: &Cli, reporter: Reporter) -> Result<Self> {
        let files = match &cli.workdir {
            Some(dir) => FileManager::with_directory(dir, reporter.clone())
                .with_context(|| format!("Cannot use working directory {}", dir.display()))?,
            None => FileManager::new(reporter.clone())?,
        }
        .with_suffix_limit(cli.suffix_limit);

        let engine = LibreOffice::locate(cli.soffice.as_deref());
        let converter = DocumentConverter::new(Box::new(engine), reporter.clone());
        let images = ImageProcessor::new(reporter.clone());

        Ok(Self {
            files,
            converter,
            images,
            reporter,
        })
    }
}
