//! Interactive numbered menu
//!
//! Library errors inside an action are reported and the menu keeps running.
//! Only prompt failures (closed stdin, Ctrl+C in raw mode) end the loop.

use anyhow::Result;
use console::{style, Term};

use crate::convert::Direction;
use crate::error::OfficeError;
use crate::files::{expand_home, FileCandidate, PatternKind};
use crate::report::Reporter;
use crate::utils::{print_banner, print_directory, print_listing, rule};

use super::prompts::{
    confirm_deletion, pause, prompt_number, prompt_pattern, prompt_quality, prompt_text,
};
use super::session::Session;

const MENU_ITEMS: [&str; 6] = [
    "Change working directory",
    "Convert PDF to DOCX",
    "Convert DOCX to PDF",
    "Compress images",
    "Delete a group of files",
    "Exit",
];

/// A picked entry from a file listing
enum Selection {
    Cancel,
    All,
    One(usize),
}

pub struct InteractiveMenu<'a> {
    session: &'a mut Session,
    term: Term,
}

impl<'a> InteractiveMenu<'a> {
    pub fn new(session: &'a mut Session) -> Self {
        Self {
            session,
            term: Term::stdout(),
        }
    }

    /// Main loop; returns when the user picks Exit.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu();
            let choice = prompt_number("Your choice", 0, MENU_ITEMS.len() as i64 - 1)?;

            match choice {
                0 => self.change_directory()?,
                1 => self.convert_documents(Direction::PdfToDocx)?,
                2 => self.convert_documents(Direction::DocxToPdf)?,
                3 => self.compress_images()?,
                4 => self.delete_files()?,
                _ => {
                    self.session.reporter.success("Goodbye!");
                    return Ok(());
                }
            }
        }
    }

    fn display_menu(&self) {
        if self.term.is_term() {
            // A failed clear only leaves the old screen visible
            let _ = self.term.clear_screen();
        }
        print_banner(env!("CARGO_PKG_VERSION"));
        print_directory(self.session.files.current_directory());
        println!("{}", style("Choose an action:").bold());
        for (index, label) in MENU_ITEMS.iter().enumerate() {
            println!("{}. {}", index, label);
        }
        println!("{}", rule());
    }

    fn change_directory(&mut self) -> Result<()> {
        let reporter = self.session.reporter.clone();
        reporter.info(format!(
            "Current directory: {}",
            self.session.files.current_directory().display()
        ));

        let input = prompt_text("New directory path (Enter to cancel)")?;
        if input.is_empty() {
            reporter.info("Cancelled");
        } else {
            match self.session.files.set_working_directory(&expand_home(&input)) {
                Ok(dir) => reporter.success(format!("Working directory changed to: {}", dir.display())),
                Err(err) => reporter.error(err.to_string()),
            }
        }

        pause()
    }

    fn convert_documents(&mut self, direction: Direction) -> Result<()> {
        let reporter = self.session.reporter.clone();
        let candidates = match self
            .session
            .files
            .list_by_extension(&[direction.source_extension()])
        {
            Ok(candidates) => candidates,
            Err(err) => {
                reporter.error(err.to_string());
                return pause();
            }
        };

        if candidates.is_empty() {
            reporter.info(format!(
                "No {} files found in the working directory",
                direction.source_name()
            ));
            return pause();
        }

        match self.pick(&candidates, &format!("{} files", direction.source_name()), "convert")? {
            Selection::Cancel => reporter.info("Cancelled"),
            Selection::All => {
                let result =
                    self.session
                        .converter
                        .convert_all(&mut self.session.files, direction, None);
                settle(&reporter, result)?;
            }
            Selection::One(index) => {
                let result = self.session.converter.convert(
                    &self.session.files,
                    direction,
                    &candidates[index].path,
                    None,
                );
                settle_reported(result)?;
            }
        }

        pause()
    }

    fn compress_images(&mut self) -> Result<()> {
        let reporter = self.session.reporter.clone();
        if let Err(err) = self.session.images.ensure_available() {
            report(&reporter, &err);
            return pause();
        }

        let candidates = match self.session.files.list_image_files() {
            Ok(candidates) => candidates,
            Err(err) => {
                reporter.error(err.to_string());
                return pause();
            }
        };

        if candidates.is_empty() {
            reporter.info("No images found in the working directory");
            return pause();
        }

        let selection = self.pick(&candidates, "images", "compress")?;
        if matches!(selection, Selection::Cancel) {
            reporter.info("Cancelled");
            return pause();
        }

        let quality = prompt_quality()?;
        match selection {
            Selection::All => {
                let result =
                    self.session
                        .images
                        .compress_all(&mut self.session.files, None, quality);
                settle(&reporter, result)?;
            }
            Selection::One(index) => {
                let result = self.session.images.compress(
                    &self.session.files,
                    &candidates[index].path,
                    quality,
                    None,
                );
                settle_reported(result)?;
            }
            Selection::Cancel => {}
        }

        pause()
    }

    fn delete_files(&mut self) -> Result<()> {
        let reporter = self.session.reporter.clone();

        println!("{}", style("Choose a deletion criterion:").bold());
        for (index, kind) in PatternKind::ALL.iter().enumerate() {
            println!("{}. {}", index + 1, kind.menu_label());
        }
        let cancel = PatternKind::ALL.len() as i64 + 1;
        println!("{}. Cancel", cancel);

        let choice = prompt_number("Your choice", 1, cancel)?;
        if choice == cancel {
            reporter.info("Cancelled");
            return pause();
        }
        let kind = PatternKind::ALL[(choice - 1) as usize];
        let pattern = prompt_pattern()?;

        let set = match self.session.files.match_by_pattern(kind, &pattern, None) {
            Ok(set) => set,
            Err(err) => {
                reporter.error(err.to_string());
                return pause();
            }
        };

        if set.is_empty() {
            reporter.info("No files match the criterion");
            return pause();
        }

        reporter.info(format!("Files to delete: {}", set.len()));
        for (index, candidate) in set.candidates.iter().enumerate() {
            print_listing(index + 1, &candidate.name, &candidate.display_size());
        }

        if confirm_deletion(set.len())? {
            self.session.files.delete_all(&set);
        } else {
            reporter.info("Deletion cancelled");
        }

        pause()
    }

    /// List non-empty `candidates` and ask for `0` (all), `-1` (cancel) or an index.
    fn pick(&self, candidates: &[FileCandidate], noun: &str, verb: &str) -> Result<Selection> {
        self.session.reporter.info(format!("Available {}:", noun));
        for (index, candidate) in candidates.iter().enumerate() {
            print_listing(index + 1, &candidate.name, &candidate.display_size());
        }
        println!();
        println!("Enter:");
        println!("  0  - {} all files", verb);
        println!("  -1 - cancel");
        println!("  N  - {} the selected file", verb);

        let choice = prompt_number("Your choice", -1, candidates.len() as i64)?;
        Ok(match choice {
            -1 => Selection::Cancel,
            0 => Selection::All,
            n => Selection::One((n - 1) as usize),
        })
    }
}

/// Report a batch-level error and keep the menu running; an interrupt ends it.
fn settle<T>(reporter: &Reporter, result: Result<T, OfficeError>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(OfficeError::Interrupted) => Err(OfficeError::Interrupted.into()),
        Err(err) => {
            report(reporter, &err);
            Ok(())
        }
    }
}

/// Like [`settle`] for single-file calls, which report their own failures.
fn settle_reported<T>(result: Result<T, OfficeError>) -> Result<()> {
    match result {
        Err(OfficeError::Interrupted) => Err(OfficeError::Interrupted.into()),
        _ => Ok(()),
    }
}

fn report(reporter: &Reporter, err: &OfficeError) {
    reporter.error(err.to_string());
    if let Some(hint) = err.hint() {
        reporter.info(hint);
    }
}
