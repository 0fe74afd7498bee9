//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing; the single command recursively
//! applies headers to a path, with a filetype mode for printing a
//! header block to stdout.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::{ConfigError, ConfigRecord, ConfigResolver};
use crate::exclusions::ExclusionFilter;
use crate::logging::{ColorMode, init_tracing, set_quiet, set_verbose};
use crate::mutator;
use crate::output::{ProcessingSummary, print_file_result, print_summary};
use crate::prompt::ConsolePrompter;
use crate::{header, styles, verbose_log};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add headers to every supported file under the current directory
  headerize

  # Add headers under a specific directory
  headerize src/

  # Add a header to a single file
  headerize src/main.py

  # Print the header block for a filename without touching any file
  headerize --filetype deploy.sh
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  /// File or directory to process. Directories are processed recursively.
  #[arg(default_value = ".")]
  pub path: PathBuf,

  /// Print the header block for the given filename to stdout instead of
  /// modifying any file
  #[arg(long, short = 'f', value_name = "FILENAME", conflicts_with = "path")]
  pub filetype: Option<String>,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}

/// Runs the command described by the parsed arguments.
pub fn run(args: Cli) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  if let Some(filename) = &args.filetype {
    return run_filetype(filename);
  }
  run_batch(&args.path)
}

/// Prints the header block for `filename` to stdout.
///
/// Dotfiles and unsupported filenames print nothing and exit successfully, so
/// the command composes quietly in scripts.
fn run_filetype(filename: &str) -> Result<()> {
  // Test the basename, so "./deploy.sh" is not mistaken for a dotfile
  let is_dotfile = Path::new(filename)
    .file_name()
    .and_then(|name| name.to_str())
    .is_some_and(|name| name.starts_with('.'));
  if is_dotfile {
    debug!(filename, "dotfile given to filetype mode, nothing to print");
    return Ok(());
  }

  let path = std::env::current_dir()
    .context("Failed to determine the current directory")?
    .join(filename);

  if !styles::style_for(&path).is_supported() {
    debug!(filename, "unsupported filename given to filetype mode");
    return Ok(());
  }

  let config = resolve_config(&path)?;
  print!("{}", header::synthesize(&path, &config));
  Ok(())
}

/// Applies headers to one file or to every eligible file under a directory.
fn run_batch(path: &Path) -> Result<()> {
  if !path.exists() {
    eprintln!("ERROR: Path '{}' does not exist", path.display());
    process::exit(1);
  }

  let config = resolve_config(path)?;
  let filter = ExclusionFilter::new()?;
  let mut summary = ProcessingSummary::default();

  if path.is_file() {
    // The invocation directory is the exclusion root, so every directory
    // component of the given path is still tested against the folder set.
    let root = std::env::current_dir().context("Failed to determine the current directory")?;
    let result = filter.check(path, &root);
    if result.should_process {
      let outcome = mutator::insert_header_if_absent(path, &config)?;
      print_file_result(path, outcome);
      summary.record(outcome);
    } else {
      verbose_log!(
        "Skipping {}: {}",
        path.display(),
        result.reason.as_deref().unwrap_or("excluded")
      );
      summary.record_excluded();
    }
  } else {
    process_directory(path, &config, &filter, &mut summary)?;
  }

  print_summary(&summary);
  Ok(())
}

/// Walks `root` depth-first in sorted order, mutating each eligible file.
fn process_directory(
  root: &Path,
  config: &ConfigRecord,
  filter: &ExclusionFilter,
  summary: &mut ProcessingSummary,
) -> Result<()> {
  let walker = WalkDir::new(root)
    .sort_by_file_name()
    .into_iter()
    .filter_entry(|entry| {
      // Prune excluded directories so their subtrees are never visited.
      !entry.file_type().is_dir() || entry.depth() == 0 || filter.check(entry.path(), root).should_process
    });

  for entry in walker {
    let entry = entry.with_context(|| format!("Failed to walk directory '{}'", root.display()))?;
    if !entry.file_type().is_file() {
      continue;
    }

    let path = entry.path();
    let result = filter.check(path, root);
    if !result.should_process {
      verbose_log!(
        "Skipping {}: {}",
        path.display(),
        result.reason.as_deref().unwrap_or("excluded")
      );
      summary.record_excluded();
      continue;
    }

    let outcome = mutator::insert_header_if_absent(path, config)?;
    print_file_result(path, outcome);
    summary.record(outcome);
  }

  Ok(())
}

/// Resolves the effective configuration, fatally reporting incomplete setup.
fn resolve_config(target: &Path) -> Result<ConfigRecord> {
  let resolver = match ConfigResolver::from_env() {
    Ok(resolver) => resolver,
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    },
  };

  let mut prompter = ConsolePrompter::new();
  match resolver.resolve(target, &mut prompter) {
    Ok(config) => Ok(config),
    Err(ConfigError::Incomplete) => {
      eprintln!("ERROR: Configuration setup is incomplete. Re-run headerize interactively to finish it.");
      process::exit(1);
    },
    Err(e) => {
      eprintln!("ERROR: {e}");
      process::exit(1);
    },
  }
}
