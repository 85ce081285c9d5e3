use anyhow::Result;
use console::style;
use glob::MatchOptions;
use std::ffi::OsString;
use std::path::{PathBuf, MAIN_SEPARATOR};
use std::time::Duration;

use crate::cli::Args;

/// Format duration in a human-readable way
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let millis = duration.subsec_millis();

    if total_secs >= 60 {
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        format!("{}m {}s", mins, secs)
    } else if total_secs > 0 {
        format!("{}.{:03}s", total_secs, millis)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Validate command line arguments
pub fn validate_inputs(args: &Args) -> Result<()> {
    if args.suffix.is_empty() {
        return Err(anyhow::anyhow!(
            "Output suffix must not be empty, it would overwrite the input files"
        ));
    }

    if args.suffix.contains('/') || args.suffix.contains(MAIN_SEPARATOR) {
        return Err(anyhow::anyhow!(
            "Output suffix '{}' must not contain a path separator",
            args.suffix
        ));
    }

    Ok(())
}

/// Expand shell-style patterns into a flat list of candidate files.
///
/// A pattern that matches nothing (or fails to parse) is kept verbatim, so a
/// plain filename that doesn't exist still reaches the converter and gets
/// reported there. Arguments that aren't valid UTF-8 can't be patterns and
/// are kept verbatim too.
///
/// `**` is an ordinary `*` here and never descends into subdirectories.
pub fn expand_patterns(patterns: &[OsString]) -> Vec<PathBuf> {
    let options = MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: true,
    };

    let mut files = Vec::new();
    for pattern in patterns {
        let Some(text) = pattern.to_str() else {
            files.push(PathBuf::from(pattern));
            continue;
        };

        let matches: Vec<PathBuf> = match glob::glob_with(&single_level(text), options) {
            Ok(paths) => paths.filter_map(|entry| entry.ok()).collect(),
            Err(_) => Vec::new(),
        };

        if matches.is_empty() {
            files.push(PathBuf::from(pattern));
        } else {
            files.extend(matches);
        }
    }
    files
}

/// Collapse every run of `*` into one, turning `**` back into a plain wildcard
fn single_level(pattern: &str) -> String {
    let mut collapsed = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if c == '*' && collapsed.ends_with('*') {
            continue;
        }
        collapsed.push(c);
    }
    collapsed
}

/// Print verbose information if verbose mode is enabled
pub fn verbose_println(verbose: bool, message: &str) {
    if verbose {
        println!("{} {}", style("[VERBOSE]").dim(), message);
    }
}

/// Print success message
pub fn success_println(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print warning message
pub fn warn_println(message: &str) {
    println!("{} {}", style("[WARNING]").yellow().bold(), message);
}

/// Print error message
pub fn error_println(message: &str) {
    println!("{} {}", style("[ERROR]").red().bold(), message);
}
