//! User-facing messages and progress display
//!
//! Every message is written twice: once to the console with a marker
//! (✓ success, ✗ error, ⚠ warning, ℹ info) and once as a tracing event, which
//! lands in the log file. While a progress bar is active, console lines are
//! printed above it so the bar keeps re-rendering in place.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use indicatif::ProgressBar;

use super::cancel::Cancellation;
use crate::utils::{create_progress_bar, create_spinner, error_line, info_line, success_line, warning_line};

/// Cheap-to-clone handle shared by every component.
#[derive(Clone)]
pub struct Reporter {
    inner: Rc<ReporterState>,
}

struct ReporterState {
    quiet: bool,
    cancellation: Cancellation,
    next_id: Cell<u64>,
    active: RefCell<Option<(u64, ProgressBar)>>,
}

impl Reporter {
    /// Console output enabled.
    pub fn new() -> Self {
        Self::build(false)
    }

    /// Log events only; nothing is printed. Used by tests.
    pub fn quiet() -> Self {
        Self::build(true)
    }

    fn build(quiet: bool) -> Self {
        Self {
            inner: Rc::new(ReporterState {
                quiet,
                cancellation: Cancellation::new(),
                next_id: Cell::new(0),
                active: RefCell::new(None),
            }),
        }
    }

    /// Interrupt state shared with the Ctrl+C handler
    pub fn cancellation(&self) -> &Cancellation {
        &self.inner.cancellation
    }

    pub fn success(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        self.emit(success_line(message));
    }

    pub fn error(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::error!("{}", message);
        self.emit(error_line(message));
    }

    pub fn warning(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::warn!("{}", message);
        self.emit(warning_line(message));
    }

    pub fn info(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        tracing::info!("{}", message);
        self.emit(info_line(message));
    }

    /// Unmarked console line (tables, listings); not logged.
    pub fn line(&self, text: impl Into<String>) {
        self.emit(text.into());
    }

    /// Start a batch progress bar. Only one bar is active at a time; starting
    /// another replaces it.
    pub fn progress(&self, total: usize, label: &str) -> Progress {
        let bar = if self.inner.quiet {
            ProgressBar::hidden()
        } else {
            create_progress_bar(total as u64, label)
        };
        self.activate(bar)
    }

    /// Start a spinner for a single long-running step.
    pub fn spinner(&self, message: &str) -> Progress {
        let bar = if self.inner.quiet {
            ProgressBar::hidden()
        } else {
            create_spinner(message)
        };
        self.activate(bar)
    }

    fn activate(&self, bar: ProgressBar) -> Progress {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        *self.inner.active.borrow_mut() = Some((id, bar.clone()));
        Progress {
            id,
            bar,
            owner: self.clone(),
        }
    }

    fn release(&self, id: u64) {
        let mut active = self.inner.active.borrow_mut();
        if active.as_ref().is_some_and(|(current, _)| *current == id) {
            *active = None;
        }
    }

    fn emit(&self, line: String) {
        if self.inner.quiet {
            return;
        }
        match self.inner.active.borrow().as_ref() {
            // println on a hidden bar is a no-op, so fall back to stdout
            Some((_, bar)) if !bar.is_hidden() => bar.println(line),
            _ => println!("{}", line),
        }
    }
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("quiet", &self.inner.quiet)
            .field("progress_active", &self.inner.active.borrow().is_some())
            .finish()
    }
}

/// An active progress bar or spinner. Finishing (or dropping) it releases the
/// reporter's console back to plain output.
pub struct Progress {
    id: u64,
    bar: ProgressBar,
    owner: Reporter,
}

impl Progress {
    /// Show `current` of the total as in progress.
    pub fn set_position(&self, current: usize) {
        self.bar.set_position(current as u64);
    }

    /// Leave the bar at its final state and move to a new line.
    pub fn finish(self) {
        self.bar.finish();
    }

    /// Remove the bar or spinner from the screen.
    pub fn finish_and_clear(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.abandon();
        }
        self.owner.release(self.id);
    }
}
