//! CLI module - argument parsing, batch mode and the interactive menu

pub mod args;
pub mod batch;
pub mod menu;
pub mod prompts;
pub mod session;

pub use args::{Cli, Operation, Source};
pub use batch::run_batch;
pub use menu::InteractiveMenu;
pub use prompts::{validate_number_input, validate_quality_input};
pub use session::Session;
