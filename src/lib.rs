//! Office Tweaks: document and image housekeeping
//!
//! Converts between PDF and DOCX through LibreOffice, recompresses images and
//! deletes groups of files selected by name pattern.

pub mod cli;
pub mod convert;
pub mod error;
pub mod files;
pub mod imaging;
pub mod logging;
pub mod report;
pub mod utils;
