//! # headerize
//!
//! A tool that stamps source files with copyright and author headers.

use anyhow::Result;
use headerize::cli::{self, Cli};

fn main() -> Result<()> {
  let args = Cli::parse_args();
  cli::run(args)
}
