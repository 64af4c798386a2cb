//! Interactive prompts using dialoguer
//!
//! The `validate_*` functions are pure so menu rules can be tested without a
//! terminal. When stdin is not a terminal (piped input, scripts) dialoguer
//! refuses to run, so each prompt falls back to reading plain lines with the
//! same validation and re-prompting.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{bail, Result};
use dialoguer::{Confirm, Input};

use crate::imaging::DEFAULT_QUALITY;
use crate::utils::error_line;

/// Parse `input` as an integer within `min..=max`.
pub fn validate_number_input(input: &str, min: i64, max: i64) -> Result<i64, String> {
    let number: i64 = input
        .trim()
        .parse()
        .map_err(|_| "Please enter a whole number".to_string())?;

    if (min..=max).contains(&number) {
        Ok(number)
    } else {
        Err(format!("Number must be between {} and {}", min, max))
    }
}

/// Empty input selects the default quality; otherwise 1..=100.
pub fn validate_quality_input(input: &str) -> Result<u8, String> {
    if input.trim().is_empty() {
        return Ok(DEFAULT_QUALITY);
    }
    let quality: i64 = input
        .trim()
        .parse()
        .map_err(|_| "Please enter a whole number".to_string())?;
    if (1..=100).contains(&quality) {
        Ok(quality as u8)
    } else {
        Err("Quality must be between 1 and 100".to_string())
    }
}

/// Non-empty after trimming.
pub fn validate_pattern_input(input: &str) -> Result<String, String> {
    let pattern = input.trim();
    if pattern.is_empty() {
        Err("Pattern cannot be empty".to_string())
    } else {
        Ok(pattern.to_string())
    }
}

/// `y`/`yes` or `n`/`no` in any case; empty input means no.
pub fn validate_confirmation(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" | "" => Ok(false),
        _ => Err("Please answer y or n".to_string()),
    }
}

fn stdin_is_terminal() -> bool {
    io::stdin().is_terminal()
}

/// Print `prompt` and read one line from stdin. End of input is an error so
/// a re-prompt loop cannot spin forever.
fn read_line(prompt: &str) -> Result<String> {
    print!("{}: ", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        println!();
        bail!("Input ended before an answer was given");
    }
    println!();
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Line-based prompt that prints the validation message and asks again.
fn read_validated<T>(prompt: &str, validate: impl Fn(&str) -> Result<T, String>) -> Result<T> {
    loop {
        let raw = read_line(prompt)?;
        match validate(&raw) {
            Ok(value) => return Ok(value),
            Err(message) => println!("{}", error_line(&message)),
        }
    }
}

/// Ask for a number in `min..=max`, re-prompting on invalid input.
pub fn prompt_number(prompt: &str, min: i64, max: i64) -> Result<i64> {
    if !stdin_is_terminal() {
        return read_validated(prompt, |input| validate_number_input(input, min, max));
    }
    let raw: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| validate_number_input(input, min, max).map(|_| ()))
        .interact_text()?;
    Ok(validate_number_input(&raw, min, max).map_err(anyhow::Error::msg)?)
}

/// Ask for a compression quality; Enter keeps the default.
pub fn prompt_quality() -> Result<u8> {
    let prompt = format!("Compression quality (1-100, default {})", DEFAULT_QUALITY);
    if !stdin_is_terminal() {
        return read_validated(&prompt, validate_quality_input);
    }
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| validate_quality_input(input).map(|_| ()))
        .interact_text()?;
    Ok(validate_quality_input(&raw).map_err(anyhow::Error::msg)?)
}

/// Ask for free text; empty input is allowed and returned as-is (trimmed).
pub fn prompt_text(prompt: &str) -> Result<String> {
    if !stdin_is_terminal() {
        return Ok(read_line(prompt)?.trim().to_string());
    }
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(raw.trim().to_string())
}

/// Ask for a non-empty search pattern.
pub fn prompt_pattern() -> Result<String> {
    let prompt = "Pattern to search for";
    if !stdin_is_terminal() {
        return read_validated(prompt, validate_pattern_input);
    }
    let raw: String = Input::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| validate_pattern_input(input).map(|_| ()))
        .interact_text()?;
    Ok(raw.trim().to_string())
}

/// Prompt user to confirm deleting `count` files
pub fn confirm_deletion(count: usize) -> Result<bool> {
    let prompt = format!("Are you sure you want to delete {} file(s)?", count);
    if !stdin_is_terminal() {
        return read_validated(&format!("{} [y/N]", prompt), validate_confirmation);
    }
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Block until Enter is pressed. End of piped input counts as Enter.
pub fn pause() -> Result<()> {
    println!();
    print!("Press Enter to continue...");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    println!();
    Ok(())
}
