//! # Prompt Module
//!
//! This module contains the interfaces and implementations for interactive
//! prompting during configuration bootstrap. The bootstrap algorithm only
//! talks to the [`Prompter`] trait, so it can be exercised in tests with a
//! scripted provider instead of real console I/O.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use owo_colors::{OwoColorize, Stream};

/// Error type for prompt operations.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
  /// Standard input ended before the prompt was answered.
  #[error("unexpected end of input while prompting")]
  Eof,

  /// Reading from or writing to the terminal failed.
  #[error("terminal I/O failed: {0}")]
  Io(#[from] io::Error),
}

/// Trait for interactive prompt providers.
///
/// Implementations are responsible for asking the user free-text questions
/// and numbered-menu choices. Both operations can fail with
/// [`PromptError::Eof`] when input runs out mid-bootstrap.
pub trait Prompter {
  /// Asks a free-text question.
  ///
  /// # Parameters
  ///
  /// * `prompt` - The question to display
  /// * `default` - Value returned when the user submits a blank answer
  ///
  /// # Returns
  ///
  /// The trimmed answer, or the default (if any) for a blank answer. A blank
  /// answer with no default is returned as an empty string; callers that
  /// require a value should re-ask.
  fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError>;

  /// Asks the user to pick one entry from a numbered list.
  ///
  /// Invalid selections (non-numeric or out of range) re-prompt indefinitely
  /// rather than failing.
  ///
  /// # Returns
  ///
  /// The zero-based index of the chosen option.
  fn ask_choice(&mut self, prompt: &str, options: &[String]) -> Result<usize, PromptError>;
}

/// Asks a free-text question repeatedly until a non-blank answer is given.
pub fn ask_required_text(prompter: &mut dyn Prompter, prompt: &str) -> Result<String, PromptError> {
  loop {
    let answer = prompter.ask_text(prompt, None)?;
    if !answer.is_empty() {
      return Ok(answer);
    }
  }
}

/// Prompt provider backed by the real terminal.
///
/// Questions go to stdout and answers are read line-by-line from stdin.
#[derive(Debug, Default)]
pub struct ConsolePrompter;

impl ConsolePrompter {
  /// Creates a new console prompter.
  pub const fn new() -> Self {
    Self
  }

  /// Reads one trimmed line from stdin; EOF becomes [`PromptError::Eof`].
  fn read_line(&self) -> Result<String, PromptError> {
    let mut line = String::new();
    let bytes_read = io::stdin().lock().read_line(&mut line)?;
    if bytes_read == 0 {
      return Err(PromptError::Eof);
    }
    Ok(line.trim().to_string())
  }
}

impl Prompter for ConsolePrompter {
  fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
    match default {
      Some(default_value) => print!(
        "{} (default: {}): ",
        prompt.if_supports_color(Stream::Stdout, |p| p.blue()),
        default_value
      ),
      None => print!("{}: ", prompt.if_supports_color(Stream::Stdout, |p| p.blue())),
    }
    io::stdout().flush()?;

    let answer = self.read_line()?;
    if answer.is_empty()
      && let Some(default_value) = default
    {
      return Ok(default_value.to_string());
    }
    Ok(answer)
  }

  fn ask_choice(&mut self, prompt: &str, options: &[String]) -> Result<usize, PromptError> {
    println!("{}", prompt.if_supports_color(Stream::Stdout, |p| p.blue()));
    for (i, option) in options.iter().enumerate() {
      println!("[{}] {}", i + 1, option);
    }

    loop {
      print!("Enter choice (1-{}): ", options.len());
      io::stdout().flush()?;

      let answer = self.read_line()?;
      match answer.parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
        _ => println!("Invalid choice. Please try again."),
      }
    }
  }
}

/// Prompt provider that replays a fixed sequence of answers.
///
/// Used by tests and by any caller that wants to drive the bootstrap flow
/// non-interactively. Running out of scripted answers behaves like end of
/// input on a real terminal.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
  answers: VecDeque<String>,
}

impl ScriptedPrompter {
  /// Creates a scripted prompter from a sequence of answers.
  pub fn new<I, S>(answers: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      answers: answers.into_iter().map(Into::into).collect(),
    }
  }

  fn next_answer(&mut self) -> Result<String, PromptError> {
    self.answers.pop_front().ok_or(PromptError::Eof)
  }
}

impl Prompter for ScriptedPrompter {
  fn ask_text(&mut self, _prompt: &str, default: Option<&str>) -> Result<String, PromptError> {
    let answer = self.next_answer()?;
    let answer = answer.trim().to_string();
    if answer.is_empty()
      && let Some(default_value) = default
    {
      return Ok(default_value.to_string());
    }
    Ok(answer)
  }

  fn ask_choice(&mut self, _prompt: &str, options: &[String]) -> Result<usize, PromptError> {
    // Same re-prompt discipline as the console: invalid answers are consumed
    // and the next one is tried.
    loop {
      let answer = self.next_answer()?;
      match answer.trim().parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
        _ => continue,
      }
    }
  }
}
