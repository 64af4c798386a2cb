//! Terminal styling utilities
//!
//! Line builders return styled strings so the reporter can route them either
//! straight to stdout or above an active progress bar.

use console::{style, Emoji};

// Emoji icons with fallbacks for terminals that don't support them
pub static SUCCESS: Emoji<'_, '_> = Emoji("✓", "[ok]");
pub static FAILURE: Emoji<'_, '_> = Emoji("✗", "[x]");
pub static WARNING: Emoji<'_, '_> = Emoji("⚠", "[!]");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ", "[*]");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");

const RULE_WIDTH: usize = 50;

pub fn success_line(message: &str) -> String {
    format!("{} {}", style(SUCCESS).green().bold(), style(message).green())
}

pub fn error_line(message: &str) -> String {
    format!("{} {}", style(FAILURE).red().bold(), style(message).red())
}

pub fn warning_line(message: &str) -> String {
    format!("{} {}", style(WARNING).yellow().bold(), style(message).yellow())
}

pub fn info_line(message: &str) -> String {
    format!("{} {}", style(INFO).cyan(), style(message).cyan())
}

/// Horizontal rule used around banners and summaries
pub fn rule() -> String {
    style("=".repeat(RULE_WIDTH)).dim().to_string()
}

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!("{}", rule());
    println!(
        "{}",
        style(format!("=== Office Tweaks v{} ===", version)).cyan().bold()
    );
    println!("{}", rule());
}

/// Print the current working directory under the banner
pub fn print_directory(directory: &std::path::Path) {
    println!(
        "{}Current directory: {}",
        FOLDER,
        style(directory.display()).white().bold()
    );
    println!("{}", rule());
}

/// Print a numbered list entry: `  3. name (1.50 KB)`
pub fn print_listing(index: usize, name: &str, size: &str) {
    println!("  {}. {} {}", index, name, style(format!("({})", size)).dim());
}
