//! Progress bar helpers using indicatif

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Visual width of the batch progress bar, in cells
pub const BAR_WIDTH: usize = 30;

/// Create a spinner for a single long-running engine call
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("    {spinner:.cyan} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Create a fixed-width batch progress bar: `label: |███░░░| 2/5 (40%)`
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(len), ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "    {{msg}}: |{{bar:{}.cyan/blue}}| {{pos}}/{{len}} ({{percent}}%)",
                BAR_WIDTH
            ))
            .unwrap()
            .progress_chars("█░"),
    );
    pb.set_message(label.to_string());
    pb
}
