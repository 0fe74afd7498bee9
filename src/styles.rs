//! # Comment-Style Registry
//!
//! This module maps a file's extension to the comment syntax used when
//! synthesizing a header for it, along with an optional shebang template for
//! script languages.
//!
//! The lookup is pure: it reads nothing from disk and never fails. Files the
//! tool does not know how to comment yield the unsupported sentinel, which
//! callers treat as a signal to skip the file entirely.

use std::path::Path;

/// Comment syntax for a file type.
///
/// Exactly one of three shapes holds:
/// - line style: `line` is set and equals `block_start` (a single repeated
///   prefix, e.g. `#`)
/// - block style: `block_start` and `block_end` are set with distinct
///   open/close delimiters (e.g. `/*` and `*/`)
/// - unsupported sentinel: all fields are `None`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStyle {
  /// Line-comment prefix, when the file type uses a repeated prefix
  pub line: Option<&'static str>,

  /// Opening delimiter of a comment block
  pub block_start: Option<&'static str>,

  /// Closing delimiter of a comment block
  pub block_end: Option<&'static str>,

  /// Shebang line to prepend to shebang-less files of this type
  pub shebang: Option<&'static str>,
}

impl CommentStyle {
  /// Create a line-comment style (prefix repeated on every header line).
  pub const fn line(prefix: &'static str) -> Self {
    Self {
      line: Some(prefix),
      block_start: Some(prefix),
      block_end: Some(prefix),
      shebang: None,
    }
  }

  /// Create a block-comment style with distinct open/close delimiters.
  pub const fn block(start: &'static str, end: &'static str) -> Self {
    Self {
      line: None,
      block_start: Some(start),
      block_end: Some(end),
      shebang: None,
    }
  }

  /// The unsupported sentinel: callers must skip the file.
  pub const fn unsupported() -> Self {
    Self {
      line: None,
      block_start: None,
      block_end: None,
      shebang: None,
    }
  }

  /// Attach a shebang template to the style.
  pub const fn with_shebang(mut self, shebang: &'static str) -> Self {
    self.shebang = Some(shebang);
    self
  }

  /// Whether this is a line-comment style (single repeated prefix).
  pub fn is_line(&self) -> bool {
    matches!((self.line, self.block_start), (Some(l), Some(b)) if l == b)
  }

  /// Whether the file type is supported at all.
  pub const fn is_supported(&self) -> bool {
    self.block_start.is_some()
  }
}

/// Extensionless filenames (matched by uppercased basename) that get a
/// default line-comment style.
const EXTENSIONLESS_WHITELIST: &[&str] = &["README", "LICENSE", "INSTALL", "MAKEFILE"];

/// Determines the comment style for a file based on its extension.
///
/// Lookup is by lowercased extension against a fixed table. Files with no
/// extension and no dot anywhere in the name are matched by exact uppercased
/// basename against a small whitelist (`README`, `LICENSE`, `INSTALL`,
/// `MAKEFILE`) and receive a `#` line style; every other extensionless file
/// and every unmapped extension yields [`CommentStyle::unsupported`].
///
/// # Parameters
///
/// * `path` - Path to the file (only the filename is examined)
///
/// # Returns
///
/// The `CommentStyle` for the file type, or the unsupported sentinel.
pub fn style_for(path: &Path) -> CommentStyle {
  let file_name = path.file_name().and_then(|name| name.to_str()).unwrap_or("");

  let extension = path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_lowercase();

  if extension.is_empty() {
    // Dotted names without an extension (".env", "config.local") are not
    // whitelisted; only plain names like "README" or "Makefile" qualify.
    if !file_name.contains('.') && EXTENSIONLESS_WHITELIST.contains(&file_name.to_uppercase().as_str()) {
      return CommentStyle::line("#");
    }
    return CommentStyle::unsupported();
  }

  match extension.as_str() {
    "py" => CommentStyle::block("\"\"\"", "\"\"\"").with_shebang("#!/usr/bin/env python3"),
    "sh" | "bash" => CommentStyle::line("#").with_shebang("#!/usr/bin/env bash"),
    "c" | "bsv" | "rs" | "cpp" | "h" | "hpp" | "java" | "cs" | "go" | "js" | "ts" => CommentStyle::block("/*", "*/"),
    "yaml" | "yml" => CommentStyle::line("#"),
    _ => CommentStyle::unsupported(),
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;

  use super::*;

  #[test]
  fn test_line_style_for_shell() {
    let style = style_for(Path::new("deploy.sh"));
    assert!(style.is_line());
    assert_eq!(style.line, Some("#"));
    assert_eq!(style.block_start, style.line);
    assert_eq!(style.shebang, Some("#!/usr/bin/env bash"));
  }

  #[test]
  fn test_block_style_for_go() {
    let style = style_for(Path::new("server.go"));
    assert!(!style.is_line());
    assert!(style.is_supported());
    assert_eq!(style.block_start, Some("/*"));
    assert_eq!(style.block_end, Some("*/"));
    assert_eq!(style.shebang, None);
  }

  #[test]
  fn test_python_uses_docstring_block_with_shebang() {
    let style = style_for(Path::new("script.py"));
    assert!(!style.is_line());
    assert_eq!(style.block_start, Some("\"\"\""));
    assert_eq!(style.block_end, Some("\"\"\""));
    assert_eq!(style.shebang, Some("#!/usr/bin/env python3"));
  }

  #[test]
  fn test_extension_lookup_is_case_insensitive() {
    let style = style_for(Path::new("Main.JAVA"));
    assert_eq!(style.block_start, Some("/*"));
  }

  #[test]
  fn test_extensionless_whitelist() {
    for name in ["README", "readme", "Makefile", "LICENSE", "install"] {
      let style = style_for(Path::new(name));
      assert!(style.is_line(), "{name} should get a line style");
      assert_eq!(style.line, Some("#"));
    }
  }

  #[test]
  fn test_extensionless_non_whitelisted_is_unsupported() {
    assert!(!style_for(Path::new("Justfile")).is_supported());
    assert!(!style_for(Path::new("CHANGELOG")).is_supported());
  }

  #[test]
  fn test_dotted_names_without_extension_are_unsupported() {
    assert!(!style_for(Path::new(".env")).is_supported());
    assert!(!style_for(Path::new(".gitignore")).is_supported());
  }

  #[test]
  fn test_unmapped_extension_is_unsupported() {
    assert!(!style_for(Path::new("notes.txt")).is_supported());
    assert!(!style_for(Path::new("data.json")).is_supported());
  }
}
