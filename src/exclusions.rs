//! # Exclusion Filter
//!
//! This module decides whether a candidate path should be skipped before any
//! file content is examined. It is the single authoritative exclusion
//! predicate for the tool: both the recursive walk and single-file mode go
//! through it.
//!
//! A path is excluded when any path component below the walked root matches
//! the fixed excluded-folder set (version control, dependency/build output,
//! IDE metadata, any hidden directory), or when its basename matches one of
//! the fixed glob exclusion patterns (logs, archives, compiled artifacts, OS
//! metadata, backup/swap files, and all dotfiles). The two checks are
//! independent boolean predicates ORed together.

use std::path::{Component, Path};

use anyhow::{Context, Result};
use glob::Pattern;

/// Folder names that should never be descended into or modified.
/// Compared case-insensitively against every path component.
const EXCLUDED_FOLDERS: &[&str] = &[
  ".git",
  ".svn",
  ".hg",
  "node_modules",
  "vendor",
  "target",
  "build",
  "dist",
  "bin",
  "out",
  ".idea",
  ".vscode",
  "__pycache__",
  "venv",
  "coverage",
  "docs",
];

/// Basename glob patterns that should never be modified.
/// Matched against the lowercased basename.
const EXCLUDED_FILE_PATTERNS: &[&str] = &[
  // General files
  "*.log",
  "*.dat",
  "*.bak",
  "*.zip",
  "*.rar",
  "*.tar",
  "*.gz",
  "*.iml",
  "*.swp",
  "*~",
  // System/IDE files
  ".ds_store",
  "thumbs.db",
  ".spotlight-v100",
  // Compiled/Binary files
  "*.pyc",
  "*.class",
  "*.o",
  "*.a",
  "*.so",
  "*.dll",
  "*.exe",
  "*.bin",
  // All dotfiles
  ".*",
];

/// Result of an exclusion check.
pub struct FilterResult {
  /// Whether the file should be processed
  pub should_process: bool,
  /// Reason why the file should not be processed (if any)
  pub reason: Option<String>,
}

impl FilterResult {
  /// Creates a new FilterResult indicating the file should be processed.
  pub const fn process() -> Self {
    Self {
      should_process: true,
      reason: None,
    }
  }

  /// Creates a new FilterResult indicating the file should be skipped.
  pub fn skip(reason: impl Into<String>) -> Self {
    Self {
      should_process: false,
      reason: Some(reason.into()),
    }
  }
}

/// The fixed exclusion predicate, with basename patterns pre-compiled.
pub struct ExclusionFilter {
  patterns: Vec<Pattern>,
}

impl ExclusionFilter {
  /// Creates the filter, compiling the fixed basename patterns.
  ///
  /// # Errors
  ///
  /// Returns an error if any of the built-in patterns fail to compile.
  pub fn new() -> Result<Self> {
    let patterns = EXCLUDED_FILE_PATTERNS
      .iter()
      .map(|p| Pattern::new(p).with_context(|| format!("Invalid exclusion pattern: {p}")))
      .collect::<Result<Vec<_>>>()?;
    Ok(Self { patterns })
  }

  /// Checks whether a path should be processed.
  ///
  /// Only components below `root` are tested against the folder set, so
  /// running the tool from inside a hidden or otherwise-excluded directory
  /// still processes that tree.
  ///
  /// # Parameters
  ///
  /// * `path` - The candidate file path
  /// * `root` - The root directory being walked (or the file's parent in
  ///   single-file mode)
  ///
  /// # Returns
  ///
  /// A `FilterResult` indicating whether the file should be processed and,
  /// if not, why.
  pub fn check(&self, path: &Path, root: &Path) -> FilterResult {
    let relative = path.strip_prefix(root).unwrap_or(path);

    for component in relative.components() {
      let Component::Normal(part) = component else {
        continue;
      };
      let part = part.to_string_lossy().to_lowercase();

      if EXCLUDED_FOLDERS.iter().any(|folder| part == folder.to_lowercase()) {
        return FilterResult::skip(format!("located in excluded folder '{part}'"));
      }

      // Hidden-directory wildcard: any dotted component below the root
      if part.starts_with('.') && part.len() > 1 {
        return FilterResult::skip(format!("hidden path component '{part}'"));
      }
    }

    let basename = path
      .file_name()
      .map(|name| name.to_string_lossy().to_lowercase())
      .unwrap_or_default();

    for pattern in &self.patterns {
      if pattern.matches(&basename) {
        return FilterResult::skip(format!("matches exclusion pattern '{}'", pattern.as_str()));
      }
    }

    FilterResult::process()
  }

  /// Convenience predicate form of [`check`](Self::check).
  pub fn is_excluded(&self, path: &Path, root: &Path) -> bool {
    !self.check(path, root).should_process
  }
}
