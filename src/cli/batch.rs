//! Non-interactive mode: one operation chosen by flags
//!
//! Relative source paths are resolved against the working directory, so
//! `--workdir docs --pdf2docx report.pdf` converts `docs/report.pdf`.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::convert::Direction;
use crate::error::OfficeError;
use crate::files::PatternKind;
use crate::report::BatchSummary;
use crate::utils::{print_banner, print_listing};

use super::args::{Cli, Operation, Source};
use super::prompts::confirm_deletion;
use super::session::Session;

/// Run the operation requested on the command line.
pub fn run_batch(cli: &Cli, operation: Operation, session: &mut Session) -> Result<()> {
    print_banner(env!("CARGO_PKG_VERSION"));
    session.reporter.info("Batch processing mode");
    session.reporter.info(format!(
        "Working directory: {}",
        session.files.current_directory().display()
    ));

    match operation {
        Operation::PdfToDocx(source) => convert(cli, session, Direction::PdfToDocx, source),
        Operation::DocxToPdf(source) => convert(cli, session, Direction::DocxToPdf, source),
        Operation::CompressImages(source) => compress(cli, session, source),
        Operation::Delete => delete(cli, session),
    }
}

fn convert(cli: &Cli, session: &mut Session, direction: Direction, source: Source) -> Result<()> {
    match source {
        Source::All => {
            warn_unused_output(cli, session);
            session.reporter.info(format!(
                "Converting all {} files ({})...",
                direction.source_name(),
                direction.label()
            ));
            let summary = session
                .converter
                .convert_all(&mut session.files, direction, None)?;
            if summary.success_count > 0 {
                session.reporter.success(format!(
                    "Converted {} of {} files",
                    summary.success_count, summary.total_count
                ));
            }
            write_summary(cli, &summary)
        }
        Source::File(path) => {
            let input = in_workdir(session, &path);
            let output = cli.output.as_deref().map(|o| in_workdir(session, o));
            session
                .reporter
                .info(format!("Converting file: {}", input.display()));

            let spinner = session.reporter.spinner(&format!("Running {}", direction.label()));
            let result = session
                .converter
                .convert(&session.files, direction, &input, output.as_deref());
            spinner.finish_and_clear();

            // Other failures were already reported by the converter
            match result {
                Ok(_) => session.reporter.success("Conversion finished successfully"),
                Err(OfficeError::Interrupted) => return Err(OfficeError::Interrupted.into()),
                Err(_) => {}
            }
            Ok(())
        }
    }
}

fn compress(cli: &Cli, session: &mut Session, source: Source) -> Result<()> {
    // Abort before touching any file when the codec is missing
    session.images.ensure_available()?;

    match source {
        Source::All => {
            warn_unused_output(cli, session);
            session.reporter.info(format!(
                "Compressing all images (quality: {}%)...",
                cli.quality
            ));
            let summary = session
                .images
                .compress_all(&mut session.files, None, cli.quality)?;
            if summary.success_count > 0 {
                session.reporter.success(format!(
                    "Compressed {} of {} images",
                    summary.success_count, summary.total_count
                ));
            }
            write_summary(cli, &summary)
        }
        Source::File(path) => {
            let input = in_workdir(session, &path);
            let output_dir = cli.output.as_deref().map(|o| in_workdir(session, o));
            session.reporter.info(format!(
                "Compressing file: {} (quality: {}%)",
                input.display(),
                cli.quality
            ));
            let result = session.images.compress(
                &session.files,
                &input,
                cli.quality,
                output_dir.as_deref(),
            );
            match result {
                Ok(_) => session.reporter.success("Compression finished successfully"),
                Err(OfficeError::Interrupted) => return Err(OfficeError::Interrupted.into()),
                Err(_) => {}
            }
            Ok(())
        }
    }
}

fn delete(cli: &Cli, session: &mut Session) -> Result<()> {
    // clap enforces both with --delete
    let kind: PatternKind = cli
        .delete_mode
        .context("--delete requires --delete-mode")?;
    let pattern = cli
        .delete_pattern
        .as_deref()
        .context("--delete requires --delete-pattern")?;
    let directory = cli.delete_dir.as_deref().map(|d| in_workdir(session, d));

    let target = directory
        .clone()
        .unwrap_or_else(|| session.files.current_directory().to_path_buf());
    session
        .reporter
        .info(format!("Deleting files in: {}", target.display()));
    session
        .reporter
        .info(format!("Mode: {}, pattern: {}", kind, pattern));

    let set = session
        .files
        .match_by_pattern(kind, pattern, directory.as_deref())?;

    if set.is_empty() {
        session
            .reporter
            .info("No files match the criterion");
        return Ok(());
    }

    session
        .reporter
        .info(format!("Files to delete: {}", set.len()));
    for (index, candidate) in set.candidates.iter().enumerate() {
        print_listing(index + 1, &candidate.name, &candidate.display_size());
    }

    let confirmed = cli.yes || confirm_deletion(set.len())?;
    if confirmed {
        session.files.delete_all(&set);
    } else {
        session.reporter.info("Deletion cancelled");
    }
    Ok(())
}

fn warn_unused_output(cli: &Cli, session: &Session) {
    if let Some(output) = &cli.output {
        session.reporter.warning(format!(
            "--output {} only applies to a single file and is ignored for \"all\"",
            output.display()
        ));
    }
}

fn in_workdir(session: &Session, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        session.files.current_directory().join(path)
    }
}

fn write_summary(cli: &Cli, summary: &BatchSummary) -> Result<()> {
    let Some(path) = &cli.summary_json else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    serde_json::to_writer_pretty(file, summary)
        .with_context(|| format!("Failed to write summary file: {}", path.display()))?;
    tracing::info!(path = %path.display(), "Summary written");
    Ok(())
}
