//! # Configuration Module
//!
//! This module implements the layered configuration protocol: a per-user
//! global profile store and a per-repository config, both JSON.
//!
//! The global config lives at `<config-dir>/headerize/config.json` (the path
//! can be overridden via the `HEADERIZE_CONFIG` environment variable) and is
//! created interactively on first run. The repository config
//! (`.headerize.config`) is created once per repository root and reused
//! verbatim on later runs; it is private and must never be committed, so the
//! bootstrap also ensures a `.gitignore` entry for it.
//!
//! All interactive steps go through the [`Prompter`] seam so the whole
//! bootstrap protocol is testable with scripted input.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::prompt::{PromptError, Prompter, ask_required_text};
use crate::{info_log, verbose_log};

/// Environment variable overriding the global config file path.
pub const GLOBAL_CONFIG_ENV_VAR: &str = "HEADERIZE_CONFIG";

/// Directory name under the per-user config directory.
pub const APP_CONFIG_DIR: &str = "headerize";

/// Filename of the global config inside [`APP_CONFIG_DIR`].
pub const GLOBAL_CONFIG_FILENAME: &str = "config.json";

/// Filename of the per-repository config, stored at the repository root.
pub const REPO_CONFIG_FILENAME: &str = ".headerize.config";

/// Filename of the copyright notice created at the repository root.
pub const COPYRIGHT_NOTICE_FILENAME: &str = "COPYRIGHT.md";

/// Version-control marker directory identifying a repository root.
const REPO_MARKER: &str = ".git";

/// Menu entry for creating a new profile during repository bootstrap.
const ADD_NEW_COMPANY: &str = "Add New Company";

/// Menu entry for a one-off, unpersisted configuration.
const CONTINUE_WITHOUT_COMPANY: &str = "Continue Without Company";

/// A named company identity stored in the global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  /// Company name used in copyright lines
  pub company_name: String,
  /// Author name used when none is given for a repository
  pub default_author_name: String,
  /// Author email used when none is given for a repository
  pub default_author_email: String,
}

/// The per-user global configuration.
///
/// Profiles are keyed by company name. A `BTreeMap` keeps the bootstrap menu
/// order deterministic across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalConfig {
  /// Key of the profile used outside tracked repositories
  pub default_company: String,
  /// All known profiles, keyed by company name
  pub profiles: BTreeMap<String, Profile>,
}

/// The effective configuration for one invocation.
///
/// Also the on-disk shape of the repository config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
  /// Company name for the copyright line
  pub company_name: String,
  /// Author name for the author line
  pub author_name: String,
  /// Author email for the author line
  pub author_email: String,
}

impl From<&Profile> for ConfigRecord {
  fn from(profile: &Profile) -> Self {
    Self {
      company_name: profile.company_name.clone(),
      author_name: profile.default_author_name.clone(),
      author_email: profile.default_author_email.clone(),
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// Input ended before an interactive bootstrap finished. Callers should
  /// advise the user to re-run interactively and exit nonzero.
  #[error("configuration setup was interrupted before completing")]
  Incomplete,

  /// The terminal itself failed during prompting.
  #[error("prompting failed: {0}")]
  Prompt(#[source] std::io::Error),

  /// A configuration file could not be read or written.
  #[error("failed to access '{path}': {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// A configuration file contains invalid JSON.
  #[error("failed to parse '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  /// The per-user configuration directory could not be determined.
  #[error("could not determine the user configuration directory")]
  NoConfigDir,

  /// The global config names a default profile that does not exist.
  #[error("global config is missing its default profile '{company}'")]
  MissingDefaultProfile { company: String },
}

impl From<PromptError> for ConfigError {
  fn from(err: PromptError) -> Self {
    match err {
      PromptError::Eof => ConfigError::Incomplete,
      PromptError::Io(source) => ConfigError::Prompt(source),
    }
  }
}

/// Searches upward from `start` for the repository root.
///
/// The root is the first ancestor (including `start` itself) containing a
/// `.git` marker directory. Only marker presence is checked; the repository
/// contents are never opened.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
  let start = start.canonicalize().ok()?;
  let mut current = start.as_path();
  loop {
    if current.join(REPO_MARKER).is_dir() {
      return Some(current.to_path_buf());
    }
    current = current.parent()?;
  }
}

/// Resolver producing the effective [`ConfigRecord`] for a target path.
pub struct ConfigResolver {
  global_config_path: PathBuf,
}

impl ConfigResolver {
  /// Creates a resolver using the standard global config location, honoring
  /// the `HEADERIZE_CONFIG` environment variable override.
  ///
  /// # Errors
  ///
  /// Returns [`ConfigError::NoConfigDir`] if no per-user config directory can
  /// be determined and no override is set.
  pub fn from_env() -> Result<Self, ConfigError> {
    if let Ok(path) = std::env::var(GLOBAL_CONFIG_ENV_VAR) {
      verbose_log!("Using global config from {}: {}", GLOBAL_CONFIG_ENV_VAR, path);
      return Ok(Self {
        global_config_path: PathBuf::from(path),
      });
    }

    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(Self {
      global_config_path: config_dir.join(APP_CONFIG_DIR).join(GLOBAL_CONFIG_FILENAME),
    })
  }

  /// Creates a resolver with an explicit global config path.
  pub const fn with_global_path(global_config_path: PathBuf) -> Self {
    Self { global_config_path }
  }

  /// Resolves the effective configuration for `target`.
  ///
  /// 1. Loads (or interactively bootstraps) the global config.
  /// 2. Searches upward from `target`'s containing directory for a repository
  ///    root.
  /// 3. Inside a repository: loads the persisted repo config verbatim, or
  ///    runs the repository bootstrap menu.
  /// 4. Outside any repository: returns the global default profile with no
  ///    persistence.
  ///
  /// # Errors
  ///
  /// [`ConfigError::Incomplete`] when input ends mid-bootstrap; I/O and parse
  /// errors for unreadable or corrupt config files.
  pub fn resolve(&self, target: &Path, prompter: &mut dyn Prompter) -> Result<ConfigRecord, ConfigError> {
    let global = self.load_or_init_global(prompter)?;

    let start = if target.is_dir() {
      target.to_path_buf()
    } else {
      target.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."))
    };

    if let Some(root) = find_repo_root(&start) {
      let repo_config_path = root.join(REPO_CONFIG_FILENAME);
      if repo_config_path.exists() {
        verbose_log!("Using repository config: {}", repo_config_path.display());
        return load_json(&repo_config_path);
      }
      return self.bootstrap_repo(&root, global, prompter);
    }

    let profile = global
      .profiles
      .get(&global.default_company)
      .ok_or_else(|| ConfigError::MissingDefaultProfile {
        company: global.default_company.clone(),
      })?;
    info_log!("Outside of a tracked repository. Using default profile: {}", global.default_company);
    Ok(ConfigRecord::from(profile))
  }

  /// Loads the global config, bootstrapping it interactively on first run.
  fn load_or_init_global(&self, prompter: &mut dyn Prompter) -> Result<GlobalConfig, ConfigError> {
    if self.global_config_path.exists() {
      return load_json(&self.global_config_path);
    }

    info_log!(
      "First run initialization: creating global config at {}",
      self.global_config_path.display()
    );

    let company_name = ask_required_text(prompter, "Enter the name for your default company/profile (e.g., Acme Corp)")?;
    let author_name = ask_required_text(prompter, "Enter your default author name")?;
    let author_email = ask_required_text(prompter, "Enter your default author email")?;

    let profile = Profile {
      company_name: company_name.clone(),
      default_author_name: author_name,
      default_author_email: author_email,
    };

    let config = GlobalConfig {
      default_company: company_name.clone(),
      profiles: BTreeMap::from([(company_name, profile)]),
    };

    if let Some(parent) = self.global_config_path.parent() {
      fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
        path: parent.to_path_buf(),
        source,
      })?;
    }
    save_json(&self.global_config_path, &config)?;
    info_log!("Global configuration saved.");

    Ok(config)
  }

  /// Runs the interactive repository bootstrap menu.
  ///
  /// Persists the chosen record as the repo config (plus the `.gitignore`
  /// entry and copyright notice) unless the user chose to continue without a
  /// company, in which case the record is used for this run only.
  fn bootstrap_repo(
    &self,
    root: &Path,
    mut global: GlobalConfig,
    prompter: &mut dyn Prompter,
  ) -> Result<ConfigRecord, ConfigError> {
    info_log!("Repository setup at {}", root.display());

    let mut options: Vec<String> = global.profiles.keys().cloned().collect();
    options.push(ADD_NEW_COMPANY.to_string());
    options.push(CONTINUE_WITHOUT_COMPANY.to_string());

    let choice = prompter.ask_choice("Select a company profile for this repository:", &options)?;
    let selected = options[choice].as_str();

    if selected == CONTINUE_WITHOUT_COMPANY {
      info_log!("Continuing without saving a company profile for this repository.");
      let default_profile = global
        .profiles
        .get(&global.default_company)
        .ok_or_else(|| ConfigError::MissingDefaultProfile {
          company: global.default_company.clone(),
        })?;

      let company_name = ask_required_text(prompter, "Enter company name for copyright")?;
      let author_name = prompter.ask_text("Enter author name", Some(&default_profile.default_author_name))?;
      let author_email = prompter.ask_text("Enter author email", Some(&default_profile.default_author_email))?;

      return Ok(ConfigRecord {
        company_name,
        author_name,
        author_email,
      });
    }

    let record = if selected == ADD_NEW_COMPANY {
      let company_name = ask_required_text(prompter, "Enter NEW company name")?;
      let author_name = ask_required_text(prompter, "Enter author name")?;
      let author_email = ask_required_text(prompter, "Enter author email")?;

      global.profiles.insert(
        company_name.clone(),
        Profile {
          company_name: company_name.clone(),
          default_author_name: author_name.clone(),
          default_author_email: author_email.clone(),
        },
      );
      save_json(&self.global_config_path, &global)?;
      info_log!("New company '{company_name}' added to global config.");

      ConfigRecord {
        company_name,
        author_name,
        author_email,
      }
    } else {
      let profile = global
        .profiles
        .get(selected)
        .ok_or_else(|| ConfigError::MissingDefaultProfile {
          company: selected.to_string(),
        })?;
      info_log!("Selected existing profile: {selected}");
      ConfigRecord::from(profile)
    };

    let repo_config_path = root.join(REPO_CONFIG_FILENAME);
    save_json(&repo_config_path, &record)?;
    info_log!("Repository config saved to {REPO_CONFIG_FILENAME}. Do not commit this file.");

    ensure_gitignore_entry(root)?;
    ensure_copyright_notice(root, &record.company_name)?;

    Ok(record)
  }
}

/// Ensures the repository's `.gitignore` references the repo config file.
///
/// Appends a comment plus the filename once; a `.gitignore` that already
/// mentions the filename is left untouched. A repository without a
/// `.gitignore` is also left untouched.
fn ensure_gitignore_entry(root: &Path) -> Result<(), ConfigError> {
  let gitignore_path = root.join(".gitignore");
  if !gitignore_path.exists() {
    verbose_log!("No .gitignore at {}, skipping ignore entry", root.display());
    return Ok(());
  }

  let content = fs::read_to_string(&gitignore_path).map_err(|source| ConfigError::Io {
    path: gitignore_path.clone(),
    source,
  })?;

  if content.contains(REPO_CONFIG_FILENAME) {
    return Ok(());
  }

  let entry = format!("\n# headerize private configuration\n{REPO_CONFIG_FILENAME}\n");
  fs::write(&gitignore_path, content + &entry).map_err(|source| ConfigError::Io {
    path: gitignore_path,
    source,
  })?;

  Ok(())
}

/// Creates `COPYRIGHT.md` at the repository root if it does not exist.
fn ensure_copyright_notice(root: &Path, company_name: &str) -> Result<(), ConfigError> {
  let notice_path = root.join(COPYRIGHT_NOTICE_FILENAME);
  if notice_path.exists() {
    return Ok(());
  }

  let year = chrono::Local::now().year();
  let notice = format!("# Copyright Notice\n\nCopyright (c) {year} {company_name}. All rights reserved.\n");
  fs::write(&notice_path, notice).map_err(|source| ConfigError::Io {
    path: notice_path,
    source,
  })?;
  info_log!("Created {COPYRIGHT_NOTICE_FILENAME} at the repository root.");

  Ok(())
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
  let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
    path: path.to_path_buf(),
    source,
  })?;
  serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
  let content = serde_json::to_string_pretty(value).map_err(|source| ConfigError::Parse {
    path: path.to_path_buf(),
    source,
  })?;
  fs::write(path, content + "\n").map_err(|source| ConfigError::Io {
    path: path.to_path_buf(),
    source,
  })
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;
  use crate::prompt::ScriptedPrompter;

  fn write_global(dir: &Path) -> PathBuf {
    let path = dir.join("config.json");
    let config = GlobalConfig {
      default_company: "Acme".to_string(),
      profiles: BTreeMap::from([(
        "Acme".to_string(),
        Profile {
          company_name: "Acme".to_string(),
          default_author_name: "Jane Doe".to_string(),
          default_author_email: "jane@acme.com".to_string(),
        },
      )]),
    };
    save_json(&path, &config).expect("write global config");
    path
  }

  fn make_repo(dir: &Path) -> PathBuf {
    let root = dir.join("repo");
    fs::create_dir_all(root.join(".git")).expect("create repo marker");
    root
  }

  #[test]
  fn test_global_bootstrap_on_first_run() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = temp.path().join("nested").join("config.json");
    let resolver = ConfigResolver::with_global_path(global_path.clone());

    let mut prompter = ScriptedPrompter::new(["Acme Corp", "Jane Doe", "jane@acme.com"]);
    let record = resolver
      .resolve(temp.path(), &mut prompter)
      .expect("bootstrap succeeds");

    assert_eq!(record.company_name, "Acme Corp");
    assert_eq!(record.author_name, "Jane Doe");
    assert_eq!(record.author_email, "jane@acme.com");

    // Persisted with parent directories created
    let saved: GlobalConfig = load_json(&global_path).expect("global config saved");
    assert_eq!(saved.default_company, "Acme Corp");
    assert!(saved.profiles.contains_key("Acme Corp"));
  }

  #[test]
  fn test_global_bootstrap_eof_is_incomplete() {
    let temp = TempDir::new().expect("create temp dir");
    let resolver = ConfigResolver::with_global_path(temp.path().join("config.json"));

    let mut prompter = ScriptedPrompter::new(["Acme Corp"]); // runs out after the first answer
    let err = resolver
      .resolve(temp.path(), &mut prompter)
      .expect_err("interrupted bootstrap");
    assert!(matches!(err, ConfigError::Incomplete));
  }

  #[test]
  fn test_outside_repo_uses_default_profile() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let resolver = ConfigResolver::with_global_path(global_path);

    let target = temp.path().join("plain");
    fs::create_dir_all(&target).expect("create target dir");

    let mut prompter = ScriptedPrompter::default();
    let record = resolver.resolve(&target, &mut prompter).expect("resolve succeeds");

    assert_eq!(record.company_name, "Acme");
    assert_eq!(record.author_name, "Jane Doe");
    // No repo config appears anywhere
    assert!(!target.join(REPO_CONFIG_FILENAME).exists());
  }

  #[test]
  fn test_existing_repo_config_is_loaded_verbatim() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let root = make_repo(temp.path());

    let persisted = ConfigRecord {
      company_name: "Persisted Co".to_string(),
      author_name: "Old Author".to_string(),
      author_email: "old@example.com".to_string(),
    };
    save_json(&root.join(REPO_CONFIG_FILENAME), &persisted).expect("write repo config");

    let resolver = ConfigResolver::with_global_path(global_path);
    let mut prompter = ScriptedPrompter::default(); // no prompting expected
    let record = resolver.resolve(&root, &mut prompter).expect("resolve succeeds");

    assert_eq!(record, persisted);
  }

  #[test]
  fn test_repo_bootstrap_existing_profile() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let root = make_repo(temp.path());
    fs::write(root.join(".gitignore"), "target/\n").expect("seed gitignore");

    let resolver = ConfigResolver::with_global_path(global_path);
    // Menu: [1] Acme, [2] Add New Company, [3] Continue Without Company
    let mut prompter = ScriptedPrompter::new(["1"]);
    let record = resolver.resolve(&root, &mut prompter).expect("resolve succeeds");

    assert_eq!(record.company_name, "Acme");

    // Repo config persisted and ignored
    let saved: ConfigRecord = load_json(&root.join(REPO_CONFIG_FILENAME)).expect("repo config saved");
    assert_eq!(saved, record);
    let gitignore = fs::read_to_string(root.join(".gitignore")).expect("read gitignore");
    assert!(gitignore.contains(REPO_CONFIG_FILENAME));

    // Copyright notice created
    let notice = fs::read_to_string(root.join(COPYRIGHT_NOTICE_FILENAME)).expect("notice created");
    assert!(notice.contains("Acme. All rights reserved."));
  }

  #[test]
  fn test_repo_bootstrap_invalid_menu_input_re_prompts() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let root = make_repo(temp.path());

    let resolver = ConfigResolver::with_global_path(global_path);
    let mut prompter = ScriptedPrompter::new(["abc", "0", "42", "1"]);
    let record = resolver.resolve(&root, &mut prompter).expect("eventually valid choice");
    assert_eq!(record.company_name, "Acme");
  }

  #[test]
  fn test_repo_bootstrap_add_new_company_updates_global() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let root = make_repo(temp.path());

    let resolver = ConfigResolver::with_global_path(global_path.clone());
    let mut prompter = ScriptedPrompter::new(["2", "Beta LLC", "Bob", "bob@beta.io"]);
    let record = resolver.resolve(&root, &mut prompter).expect("resolve succeeds");

    assert_eq!(record.company_name, "Beta LLC");
    assert_eq!(record.author_name, "Bob");

    let global: GlobalConfig = load_json(&global_path).expect("global config re-read");
    assert!(global.profiles.contains_key("Beta LLC"));
    assert_eq!(global.default_company, "Acme"); // default unchanged

    let saved: ConfigRecord = load_json(&root.join(REPO_CONFIG_FILENAME)).expect("repo config saved");
    assert_eq!(saved, record);
  }

  #[test]
  fn test_repo_bootstrap_continue_without_company_persists_nothing() {
    let temp = TempDir::new().expect("create temp dir");
    let global_path = write_global(temp.path());
    let root = make_repo(temp.path());
    fs::write(root.join(".gitignore"), "target/\n").expect("seed gitignore");

    let resolver = ConfigResolver::with_global_path(global_path.clone());
    // Menu choice 3, then company name, blank author name/email take defaults
    let mut prompter = ScriptedPrompter::new(["3", "One Off Inc", "", ""]);
    let record = resolver.resolve(&root, &mut prompter).expect("resolve succeeds");

    assert_eq!(record.company_name, "One Off Inc");
    assert_eq!(record.author_name, "Jane Doe");
    assert_eq!(record.author_email, "jane@acme.com");

    // Nothing written to the repository
    assert!(!root.join(REPO_CONFIG_FILENAME).exists());
    assert!(!root.join(COPYRIGHT_NOTICE_FILENAME).exists());
    let gitignore = fs::read_to_string(root.join(".gitignore")).expect("read gitignore");
    assert!(!gitignore.contains(REPO_CONFIG_FILENAME));

    // Global config untouched
    let global: GlobalConfig = load_json(&global_path).expect("global config re-read");
    assert_eq!(global.profiles.len(), 1);
  }

  #[test]
  fn test_gitignore_entry_is_not_duplicated() {
    let temp = TempDir::new().expect("create temp dir");
    let root = make_repo(temp.path());
    fs::write(
      root.join(".gitignore"),
      format!("target/\n{REPO_CONFIG_FILENAME}\n"),
    )
    .expect("seed gitignore");

    ensure_gitignore_entry(&root).expect("no-op");

    let gitignore = fs::read_to_string(root.join(".gitignore")).expect("read gitignore");
    assert_eq!(gitignore.matches(REPO_CONFIG_FILENAME).count(), 1);
  }

  #[test]
  fn test_find_repo_root_walks_upward() {
    let temp = TempDir::new().expect("create temp dir");
    let root = make_repo(temp.path());
    let nested = root.join("src").join("deep");
    fs::create_dir_all(&nested).expect("create nested dirs");

    let found = find_repo_root(&nested).expect("root found");
    assert_eq!(found, root.canonicalize().expect("canonical root"));

    assert!(find_repo_root(&temp.path().join("missing")).is_none());
  }
}
