//! # headerize
//!
//! A tool that stamps source files with a copyright and author header by scanning a directory recursively.
//!
//! `headerize` modifies source files in place and never adds a header to a file whose opening lines already
//! mention a copyright. Comment syntax is chosen per file extension, shebang lines are preserved or added
//! where the file type calls for one, and the identity placed in the header comes from a layered
//! configuration: per-user company profiles plus a per-repository config created interactively on first use.
//!
//! ## Features
//!
//! * Recursively scan a directory and add headers to supported source files
//! * Automatic comment style per extension, with line or block wrapping
//! * Idempotent: files that already carry a copyright notice are untouched
//! * Shebang aware: `#!` lines stay first, and script types get one added
//! * Built-in exclusions for dependency, build, and VCS directories
//! * Layered config with named company profiles and per-repo overrides
//! * `--filetype` mode to print a header block for any filename
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use headerize::config::ConfigRecord;
//! use headerize::mutator::{Outcome, insert_header_if_absent};
//!
//! fn main() -> anyhow::Result<()> {
//!   let config = ConfigRecord {
//!     company_name: "Acme".to_string(),
//!     author_name: "Jane Doe".to_string(),
//!     author_email: "jane@acme.com".to_string(),
//!   };
//!
//!   match insert_header_if_absent(Path::new("src/main.py"), &config)? {
//!     Outcome::Inserted => println!("header added"),
//!     Outcome::AlreadyHeadered => println!("already done"),
//!     _ => println!("skipped"),
//!   }
//!
//!   Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod exclusions;
pub mod header;
pub mod logging;
pub mod mutator;
pub mod output;
pub mod prompt;
pub mod styles;
