//! # File Mutation Module
//!
//! Applies a synthesized header to a single file, exactly once. Files that
//! already carry a copyright notice, files with unsupported extensions, and
//! unreadable files are reported as distinct outcomes rather than errors so a
//! batch run can keep going.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ConfigRecord;
use crate::{header, styles, verbose_log};

/// Number of leading lines scanned for an existing copyright notice.
const DETECTION_WINDOW: usize = 10;

/// Result of attempting to apply a header to one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// A header was synthesized and written
  Inserted,
  /// The file already carries a copyright notice
  AlreadyHeadered,
  /// The file's type is not in the comment style registry
  Unsupported,
  /// The path is not a regular file
  NotAFile,
  /// The file could not be read (binary or permission problem)
  Unreadable,
}

/// Inserts a header into `path` unless one is already present.
///
/// A file whose first ten lines contain the word "copyright" (any casing) is
/// left byte-for-byte untouched. An existing `#!` line always stays line one:
/// the header goes directly below it. A file whose style carries a shebang
/// template but has none gets the template above the header.
///
/// # Errors
///
/// Returns an error only when writing the modified content fails; read
/// failures are reported as [`Outcome::Unreadable`].
pub fn insert_header_if_absent(path: &Path, config: &ConfigRecord) -> Result<Outcome> {
  if !path.is_file() {
    return Ok(Outcome::NotAFile);
  }

  let style = styles::style_for(path);
  if !style.is_supported() {
    verbose_log!("Skipping unsupported file type: {}", path.display());
    return Ok(Outcome::Unsupported);
  }

  let content = match fs::read_to_string(path) {
    Ok(content) => content,
    Err(err) => {
      tracing::debug!(path = %path.display(), error = %err, "file is not readable as text");
      return Ok(Outcome::Unreadable);
    },
  };

  if has_copyright_notice(&content) {
    return Ok(Outcome::AlreadyHeadered);
  }

  let header = header::synthesize(path, config);

  let updated = if content.starts_with("#!") {
    match content.find('\n') {
      Some(idx) => format!("{}{}{}", &content[..=idx], header, &content[idx + 1..]),
      // Shebang with no trailing newline: the whole file is the shebang line.
      None => format!("{content}\n{header}"),
    }
  } else if let Some(shebang) = style.shebang {
    format!("{shebang}\n{header}{content}")
  } else {
    format!("{header}{content}")
  };

  fs::write(path, updated).with_context(|| format!("Failed to write header to '{}'", path.display()))?;
  Ok(Outcome::Inserted)
}

/// Scans the first [`DETECTION_WINDOW`] lines for a copyright notice.
fn has_copyright_notice(content: &str) -> bool {
  content
    .lines()
    .take(DETECTION_WINDOW)
    .any(|line| line.to_lowercase().contains("copyright"))
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  fn test_config() -> ConfigRecord {
    ConfigRecord {
      company_name: "Acme".to_string(),
      author_name: "Jane Doe".to_string(),
      author_email: "jane@acme.com".to_string(),
    }
  }

  #[test]
  fn test_insert_into_plain_file() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("main.go");
    fs::write(&path, "package main\n").expect("write file");

    let outcome = insert_header_if_absent(&path, &test_config()).expect("mutation succeeds");
    assert_eq!(outcome, Outcome::Inserted);

    let content = fs::read_to_string(&path).expect("read back");
    assert!(content.starts_with("/*\n"));
    assert!(content.contains("Copyright: Copyright (c)"));
    assert!(content.ends_with("package main\n"));
  }

  #[test]
  fn test_second_run_is_idempotent() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("script.sh");
    fs::write(&path, "echo hello\n").expect("write file");

    assert_eq!(
      insert_header_if_absent(&path, &test_config()).expect("first run"),
      Outcome::Inserted
    );
    let after_first = fs::read_to_string(&path).expect("read back");

    assert_eq!(
      insert_header_if_absent(&path, &test_config()).expect("second run"),
      Outcome::AlreadyHeadered
    );
    let after_second = fs::read_to_string(&path).expect("read back");
    assert_eq!(after_first, after_second);
  }

  #[test]
  fn test_existing_shebang_stays_first() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("tool.js");
    fs::write(&path, "#!/usr/bin/env node\nconsole.log('hi');\n").expect("write file");

    let outcome = insert_header_if_absent(&path, &test_config()).expect("mutation succeeds");
    assert_eq!(outcome, Outcome::Inserted);

    let content = fs::read_to_string(&path).expect("read back");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("#!/usr/bin/env node"));
    assert_eq!(lines.next(), Some("/*"));
    assert!(content.ends_with("console.log('hi');\n"));
  }

  #[test]
  fn test_shebang_template_is_inserted() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("job.py");
    fs::write(&path, "print('hi')\n").expect("write file");

    insert_header_if_absent(&path, &test_config()).expect("mutation succeeds");

    let content = fs::read_to_string(&path).expect("read back");
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("#!/usr/bin/env python3"));
    assert_eq!(lines.next(), Some("\"\"\""));
  }

  #[test]
  fn test_unsupported_extension_is_skipped() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("notes.txt");
    fs::write(&path, "some notes\n").expect("write file");

    let outcome = insert_header_if_absent(&path, &test_config()).expect("skip is not an error");
    assert_eq!(outcome, Outcome::Unsupported);
    assert_eq!(fs::read_to_string(&path).expect("read back"), "some notes\n");
  }

  #[test]
  fn test_existing_notice_deep_in_file_is_not_detected() {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("big.c");
    let body = "int x;\n".repeat(20) + "/* Copyright (c) 2020 Old Co */\n";
    fs::write(&path, &body).expect("write file");

    // The notice sits past the detection window, so a header is added.
    let outcome = insert_header_if_absent(&path, &test_config()).expect("mutation succeeds");
    assert_eq!(outcome, Outcome::Inserted);
  }

  #[test]
  fn test_missing_path_is_not_a_file() {
    let temp = TempDir::new().expect("create temp dir");
    let outcome = insert_header_if_absent(&temp.path().join("absent.rs"), &test_config()).expect("no error");
    assert_eq!(outcome, Outcome::NotAFile);
  }
}
