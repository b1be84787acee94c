//! Error types for quartermaster with contextual messages and exit codes
//!
//! One unified error type, categorized by where the failure came from
//! (config, git, GitHub API, project board, validation). Errors that have an
//! actionable fix carry a help message shown under the error itself.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for quartermaster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing credential)
  User = 1,
  /// System error (git, network, I/O)
  System = 2,
  /// Validation failure (version not bumped, packaging, PR template)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for quartermaster
#[derive(Debug)]
pub enum QmError {
  /// Configuration errors
  Config(ConfigError),

  /// Git operation errors
  Git(GitError),

  /// GitHub API transport/response errors
  Api(ApiError),

  /// Project-board errors (auth, project resolution, schema)
  Board(BoardError),

  /// Validation errors (release checks, packaging, PR template)
  Validation(ValidationError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl QmError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    QmError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    QmError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Categorized errors keep their category (and exit code); only generic
  /// messages accumulate context text.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      QmError::Message { message, context, help } => QmError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      QmError::Config(_) => ExitCode::User,
      QmError::Git(_) => ExitCode::System,
      QmError::Api(_) => ExitCode::System,
      QmError::Board(BoardError::AuthMissing) => ExitCode::User,
      QmError::Board(_) => ExitCode::System,
      QmError::Validation(_) => ExitCode::Validation,
      QmError::Io(_) => ExitCode::System,
      QmError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      QmError::Config(e) => e.help_message(),
      QmError::Git(e) => e.help_message(),
      QmError::Board(e) => e.help_message(),
      QmError::Validation(e) => e.help_message(),
      QmError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for QmError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      QmError::Config(e) => write!(f, "{}", e),
      QmError::Git(e) => write!(f, "{}", e),
      QmError::Api(e) => write!(f, "{}", e),
      QmError::Board(e) => write!(f, "{}", e),
      QmError::Validation(e) => write!(f, "{}", e),
      QmError::Io(e) => write!(f, "I/O error: {}", e),
      QmError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for QmError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      QmError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for QmError {
  fn from(err: io::Error) -> Self {
    QmError::Io(err)
  }
}

impl From<String> for QmError {
  fn from(msg: String) -> Self {
    QmError::message(msg)
  }
}

impl From<&str> for QmError {
  fn from(msg: &str) -> Self {
    QmError::message(msg)
  }
}

impl From<toml_edit::TomlError> for QmError {
  fn from(err: toml_edit::TomlError) -> Self {
    QmError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for QmError {
  fn from(err: toml_edit::de::Error) -> Self {
    QmError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<toml_edit::ser::Error> for QmError {
  fn from(err: toml_edit::ser::Error) -> Self {
    QmError::message(format!("TOML serialization error: {}", err))
  }
}

impl From<serde_json::Error> for QmError {
  fn from(err: serde_json::Error) -> Self {
    QmError::message(format!("JSON error: {}", err))
  }
}

impl From<std::num::ParseIntError> for QmError {
  fn from(err: std::num::ParseIntError) -> Self {
    QmError::message(format!("Parse error: {}", err))
  }
}

impl From<std::str::Utf8Error> for QmError {
  fn from(err: std::str::Utf8Error) -> Self {
    QmError::message(format!("UTF-8 error: {}", err))
  }
}

impl From<std::string::FromUtf8Error> for QmError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    QmError::message(format!("UTF-8 conversion error: {}", err))
  }
}

impl From<std::env::VarError> for QmError {
  fn from(err: std::env::VarError) -> Self {
    QmError::message(format!("Environment variable error: {}", err))
  }
}

impl From<ureq::Error> for QmError {
  fn from(err: ureq::Error) -> Self {
    match err {
      ureq::Error::Status(code, response) => {
        let body = response.into_string().unwrap_or_default();
        QmError::Api(ApiError::Status { status: code, body })
      }
      ureq::Error::Transport(t) => QmError::Api(ApiError::Request {
        detail: t.to_string(),
      }),
    }
  }
}

/// Convert anyhow::Error to QmError (integration-test harness boundary)
impl From<anyhow::Error> for QmError {
  fn from(err: anyhow::Error) -> Self {
    QmError::message(err.to_string())
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A value is not supplied by flag, environment, or config file
  MissingValue {
    field: String,
    flag: Option<String>,
    env: Option<String>,
  },

  /// A supplied value fails validation
  Invalid { field: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::MissingValue { flag, env, .. } => {
        let mut ways = Vec::new();
        if let Some(flag) = flag {
          ways.push(format!("pass {}", flag));
        }
        if let Some(var) = env {
          ways.push(format!("set the {} environment variable", var));
        }
        ways.push("add the value to quartermaster.toml (see `quartermaster init`)".to_string());
        Some(format!("You can {}.", ways.join(", or ")))
      }
      ConfigError::Invalid { .. } => None,
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::MissingValue { field, .. } => {
        write!(f, "No {} configured", field)
      }
      ConfigError::Invalid { field, reason } => {
        write!(f, "Invalid config value for {}: {}", field, reason)
      }
    }
  }
}

/// Git operation errors
#[derive(Debug)]
pub enum GitError {
  /// Git command failed
  CommandFailed { command: String, stderr: String },

  /// Repository not found
  RepoNotFound { path: PathBuf },
}

impl GitError {
  fn help_message(&self) -> Option<String> {
    match self {
      GitError::RepoNotFound { path } => Some(format!(
        "Run quartermaster from inside a git checkout, or check the path: {}",
        path.display()
      )),
      _ => None,
    }
  }
}

impl fmt::Display for GitError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      GitError::CommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr)
      }
      GitError::RepoNotFound { path } => {
        write!(f, "Git repository not found at: {}", path.display())
      }
    }
  }
}

/// GitHub API errors (transport and payload)
#[derive(Debug)]
pub enum ApiError {
  /// Request never produced a response (DNS, TLS, connect)
  Request { detail: String },

  /// Non-success HTTP status
  Status { status: u16, body: String },

  /// The GraphQL layer reported errors
  GraphQl { message: String },

  /// Response parsed but is missing an expected shape
  Malformed { detail: String },
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Request { detail } => {
        write!(f, "GitHub API request failed: {}", detail)
      }
      ApiError::Status { status, body } => {
        write!(f, "GitHub API returned HTTP {}: {}", status, body.trim())
      }
      ApiError::GraphQl { message } => {
        write!(f, "GraphQL error: {}", message)
      }
      ApiError::Malformed { detail } => {
        write!(f, "Unexpected GitHub API response: {}", detail)
      }
    }
  }
}

/// Project-board errors
#[derive(Debug)]
pub enum BoardError {
  /// No credential supplied; nothing board-related can run
  AuthMissing,

  /// Neither the user nor the organization lookup found the project
  ProjectNotFound { owner: String, number: u64, last_error: String },

  /// The project has no single-select field named "Status"
  StatusFieldMissing { project_id: String },

  /// The remote rejected or failed a status write
  MutationFailed { detail: String },
}

impl BoardError {
  fn help_message(&self) -> Option<String> {
    match self {
      BoardError::AuthMissing => {
        Some("Set the GITHUB_TOKEN environment variable with a token that has `project` scope.".to_string())
      }
      BoardError::ProjectNotFound { owner, number, .. } => Some(format!(
        "Check that project {} exists for '{}' and that the token can see it.",
        number, owner
      )),
      BoardError::StatusFieldMissing { .. } => {
        Some("Add a single-select field named 'Status' to the project board.".to_string())
      }
      BoardError::MutationFailed { .. } => None,
    }
  }
}

impl fmt::Display for BoardError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BoardError::AuthMissing => {
        write!(f, "No GitHub token supplied")
      }
      BoardError::ProjectNotFound { owner, number, last_error } => {
        write!(
          f,
          "Project {} not found for '{}' (tried user and organization lookups): {}",
          number, owner, last_error
        )
      }
      BoardError::StatusFieldMissing { project_id } => {
        write!(f, "Project {} has no single-select field named 'Status'", project_id)
      }
      BoardError::MutationFailed { detail } => {
        write!(f, "Status update rejected: {}", detail)
      }
    }
  }
}

/// Validation errors
#[derive(Debug)]
pub enum ValidationError {
  /// TOC version unchanged relative to the base ref
  VersionNotBumped { version: String, base_ref: String },

  /// TOC file is missing required metadata
  TocInvalid { path: String, reason: String },

  /// A release with this version already exists
  DuplicateRelease { tag: String, suggestion: String },

  /// Prerelease proposed for a base version that already shipped stable
  BetaAfterStable { version: String, stable: String },

  /// Packaging structure checks failed
  Packaging { problems: Vec<String> },

  /// PR body does not satisfy the template
  PrTemplate { problems: Vec<String> },

  /// Documentation build failed
  DocsBuild { detail: String },

  /// Live interface build not listed in the TOC
  InterfaceMismatch { expected: String, toc: String },
}

impl ValidationError {
  fn help_message(&self) -> Option<String> {
    match self {
      ValidationError::VersionNotBumped { .. } => {
        Some("Bump `## Version:` in the addon TOC before merging.".to_string())
      }
      ValidationError::DuplicateRelease { suggestion, .. } => {
        Some(format!("Bump the version, e.g. to {}.", suggestion))
      }
      ValidationError::BetaAfterStable { stable, .. } => Some(format!(
        "{} already shipped; start a new beta line from a higher base version.",
        stable
      )),
      ValidationError::InterfaceMismatch { expected, .. } => Some(format!(
        "Add {} to `## Interface:` in the addon TOC.",
        expected
      )),
      _ => None,
    }
  }
}

impl fmt::Display for ValidationError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ValidationError::VersionNotBumped { version, base_ref } => {
        write!(f, "TOC version {} is unchanged relative to {}", version, base_ref)
      }
      ValidationError::TocInvalid { path, reason } => {
        write!(f, "Invalid TOC file {}: {}", path, reason)
      }
      ValidationError::DuplicateRelease { tag, .. } => {
        write!(f, "Release {} already exists", tag)
      }
      ValidationError::BetaAfterStable { version, stable } => {
        write!(f, "Prerelease {} conflicts with existing stable release {}", version, stable)
      }
      ValidationError::Packaging { problems } => {
        write!(f, "Packaging validation failed:")?;
        for p in problems {
          write!(f, "\n  - {}", p)?;
        }
        Ok(())
      }
      ValidationError::PrTemplate { problems } => {
        write!(f, "PR template validation failed:")?;
        for p in problems {
          write!(f, "\n  - {}", p)?;
        }
        Ok(())
      }
      ValidationError::DocsBuild { detail } => {
        write!(f, "Documentation build failed: {}", detail)
      }
      ValidationError::InterfaceMismatch { expected, toc } => {
        write!(f, "Interface {} is live but the TOC lists {}", expected, toc)
      }
    }
  }
}

/// Result type alias for quartermaster
pub type QmResult<T> = Result<T, QmError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> QmResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> QmResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<QmError>,
{
  fn context(self, ctx: impl Into<String>) -> QmResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> QmResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &QmError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
