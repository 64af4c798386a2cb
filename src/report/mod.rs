//! Report module - console messages, progress, interrupts and batch summaries

pub mod cancel;
pub mod reporter;
pub mod summary;

pub use cancel::*;
pub use reporter::*;
pub use summary::*;
