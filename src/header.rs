//! # Header Synthesizer
//!
//! This module builds the literal header text inserted at the top of source
//! files: a four-line content block (copyright, author, creation date,
//! description) wrapped in the comment syntax of the target file type.
//!
//! The clock is an explicit parameter of [`synthesize_on`] so tests can pin
//! the date; [`synthesize`] binds it to today.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate};

use crate::config::ConfigRecord;
use crate::styles;

/// Description line used when the caller does not supply one.
pub const DEFAULT_DESCRIPTION: &str = "A brief description of the file's purpose.";

/// Synthesizes a header for `path` using today's date and the default
/// description.
pub fn synthesize(path: &Path, config: &ConfigRecord) -> String {
  synthesize_on(path, config, DEFAULT_DESCRIPTION, Local::now().date_naive())
}

/// Synthesizes a header for `path` with an explicit description and date.
///
/// The content block is:
///
/// ```text
/// Copyright: Copyright (c) <year> <company>. All rights reserved.
/// Author: <name> <<email>>
/// Created on: <YYYY-MM-DD>
/// Description: <description>
/// ```
///
/// Line styles wrap it between bare prefix lines with every content line
/// prefixed; block styles put the delimiters on their own lines with a
/// single-space indent on the content. An unsupported style cannot be reached
/// by normal flow (callers skip those files first); if it happens anyway a
/// warning is logged and a generic triple-quote block is emitted, so this
/// function never fails.
///
/// # Returns
///
/// The header text, ending in exactly one newline.
pub fn synthesize_on(path: &Path, config: &ConfigRecord, description: &str, date: NaiveDate) -> String {
  let style = styles::style_for(path);

  let copyright_line = format!(
    "Copyright (c) {} {}. All rights reserved.",
    date.year(),
    config.company_name
  );

  let content = [
    format!("Copyright: {copyright_line}"),
    format!("Author: {} <{}>", config.author_name, config.author_email),
    format!("Created on: {}", date.format("%Y-%m-%d")),
    format!("Description: {description}"),
  ];

  match (style.line, style.block_start, style.block_end) {
    (Some(prefix), Some(start), _) if prefix == start => wrap_line_style(prefix, &content),
    (_, Some(start), Some(end)) => wrap_block_style(start, end, &content),
    _ => {
      tracing::warn!(path = %path.display(), "no comment style registered, falling back to a generic block");
      wrap_block_style("\"\"\"", "\"\"\"", &content)
    }
  }
}

fn wrap_line_style(prefix: &str, content: &[String]) -> String {
  let mut out = String::new();
  out.push_str(prefix);
  out.push('\n');
  for line in content {
    out.push_str(prefix);
    out.push(' ');
    out.push_str(line);
    out.push('\n');
  }
  out.push_str(prefix);
  out.push('\n');
  out
}

fn wrap_block_style(start: &str, end: &str, content: &[String]) -> String {
  let mut out = String::new();
  out.push_str(start);
  out.push('\n');
  for line in content {
    out.push(' ');
    out.push_str(line);
    out.push('\n');
  }
  out.push_str(end);
  out.push('\n');
  out
}
