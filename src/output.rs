//! # Output Module
//!
//! This module centralizes all user-facing output for the headerize tool.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! ## Design Goals
//!
//! - **Scannable**: One line per touched file, with a leading status symbol
//! - **Progressive**: More detail with `-v`, silence with `-q`
//! - **Scriptable**: Keep stdout predictable for piping/automation

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::mutator::Outcome;

/// Symbols used in output
pub mod symbols {
  /// Header inserted
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// File could not be processed
  pub const FAILURE: &str = "\u{2717}"; // ✗
  /// Skipped (already headered, excluded, or unsupported)
  pub const IGNORED: &str = "-";
}

/// Counters accumulated over one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSummary {
  /// Files that received a header
  pub inserted: usize,
  /// Files that already carried a copyright notice
  pub already_headered: usize,
  /// Files skipped by the style registry (no comment syntax known)
  pub ignored: usize,
  /// Files skipped by the exclusion filter
  pub excluded: usize,
  /// Files that could not be read as text
  pub unreadable: usize,
}

impl ProcessingSummary {
  /// Folds one file outcome into the counters.
  pub fn record(&mut self, outcome: Outcome) {
    match outcome {
      Outcome::Inserted => self.inserted += 1,
      Outcome::AlreadyHeadered => self.already_headered += 1,
      Outcome::Unsupported | Outcome::NotAFile => self.ignored += 1,
      Outcome::Unreadable => self.unreadable += 1,
    }
  }

  /// Counts a file the exclusion filter kept away from the mutator.
  pub fn record_excluded(&mut self) {
    self.excluded += 1;
  }
}

/// Print the per-file result line.
///
/// Inserted files always get a line (unless quiet). Skips are only shown in
/// verbose mode so default output stays focused on what changed.
pub fn print_file_result(path: &Path, outcome: Outcome) {
  if is_quiet() {
    return;
  }

  let display_path = make_display_path(path);
  match outcome {
    Outcome::Inserted => {
      println!(
        "{} {}",
        symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
        display_path
      );
    },
    Outcome::AlreadyHeadered => {
      if is_verbose() {
        println!(
          "{} {} (already has a copyright notice)",
          symbols::IGNORED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
          display_path
        );
      }
    },
    Outcome::Unsupported | Outcome::NotAFile => {
      if is_verbose() {
        println!(
          "{} {} (skipped)",
          symbols::IGNORED.if_supports_color(Stream::Stdout, |s| s.dimmed()),
          display_path
        );
      }
    },
    Outcome::Unreadable => {
      println!(
        "{} {} (not readable as text)",
        symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
        display_path
      );
    },
  }
}

/// Print the end-of-run summary line.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let inserted_str = summary.inserted.if_supports_color(Stream::Stdout, |s| s.cyan());
  let already_str = summary
    .already_headered
    .if_supports_color(Stream::Stdout, |s| s.dimmed());
  let unreadable_str = if summary.unreadable > 0 {
    summary
      .unreadable
      .if_supports_color(Stream::Stdout, |s| s.red())
      .to_string()
  } else {
    summary
      .unreadable
      .if_supports_color(Stream::Stdout, |s| s.dimmed())
      .to_string()
  };

  let mut summary_line = format!(
    "Summary: {} inserted, {} already headered, {} unreadable",
    inserted_str, already_str, unreadable_str
  );
  if is_verbose() {
    summary_line.push_str(&format!(
      ", {} skipped, {} excluded",
      summary.ignored, summary.excluded
    ));
  }
  println!("{}", summary_line);
}

/// Formats a path relative to the current directory when possible.
fn make_display_path(path: &Path) -> String {
  if let Ok(current_dir) = std::env::current_dir()
    && let Some(rel_path) = pathdiff::diff_paths(path, &current_dir)
    && !rel_path.as_os_str().is_empty()
  {
    return rel_path.to_string_lossy().to_string();
  }
  path.to_string_lossy().to_string()
}
