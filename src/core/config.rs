use crate::core::error::{ConfigError, QmError, QmResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for quartermaster
/// Searched in order: quartermaster.toml, .quartermaster.toml, .config/quartermaster.toml
///
/// Every section is optional; commands that need a value not supplied by any
/// layer (flag, environment, config) fail with help naming all three.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QmConfig {
  #[serde(default)]
  pub addon: AddonConfig,
  #[serde(default)]
  pub repository: RepositoryConfig,
  #[serde(default)]
  pub board: BoardConfig,
  #[serde(default)]
  pub release: ReleaseConfig,
}

/// The addon under management
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonConfig {
  /// Addon directory name; also the zip top-level and the TOC stem
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
  /// `owner/repo` slug (REPOSITORY env and --repo flag override)
  #[serde(default)]
  pub slug: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
  /// Projects-v2 board number (PROJECT_NUMBER env and --project flag override)
  #[serde(default)]
  pub project_number: Option<u64>,
}

/// Release and packaging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Changelog path relative to the repo root
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,

  /// Directory release zips are written into
  #[serde(default = "default_build_dir")]
  pub build_dir: PathBuf,

  /// Branches never deleted by `branch cleanup`
  #[serde(default = "default_protected_branches")]
  pub protected_branches: Vec<String>,
}

fn default_changelog() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_build_dir() -> PathBuf {
  PathBuf::from("build")
}

fn default_protected_branches() -> Vec<String> {
  vec!["main".to_string(), "beta".to_string()]
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      changelog: default_changelog(),
      build_dir: default_build_dir(),
      protected_branches: default_protected_branches(),
    }
  }
}

impl QmConfig {
  /// Find config file in search order: quartermaster.toml, .quartermaster.toml, .config/quartermaster.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join("quartermaster.toml"),
      path.join(".quartermaster.toml"),
      path.join(".config").join("quartermaster.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config if one exists, defaults otherwise
  pub fn load(path: &Path) -> QmResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: QmConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    Ok(config)
  }

  /// Validate supplied values (absent values are fine; they fail at point of use)
  pub fn validate(&self) -> QmResult<()> {
    if let Some(name) = &self.addon.name
      && name.trim().is_empty()
    {
      return Err(QmError::Config(ConfigError::Invalid {
        field: "addon.name".to_string(),
        reason: "must not be empty".to_string(),
      }));
    }

    if let Some(slug) = &self.repository.slug
      && slug.split('/').filter(|part| !part.is_empty()).count() != 2
    {
      return Err(QmError::Config(ConfigError::Invalid {
        field: "repository.slug".to_string(),
        reason: format!("'{}' is not an owner/repo pair", slug),
      }));
    }

    if let Some(number) = self.board.project_number
      && number == 0
    {
      return Err(QmError::Config(ConfigError::Invalid {
        field: "board.project_number".to_string(),
        reason: "project numbers start at 1".to_string(),
      }));
    }

    Ok(())
  }

  /// Addon directory name (config only)
  pub fn addon_name(&self) -> QmResult<&str> {
    self.addon.name.as_deref().ok_or_else(|| {
      QmError::Config(ConfigError::MissingValue {
        field: "addon name".to_string(),
        flag: None,
        env: None,
      })
    })
  }

  /// `owner/repo` slug with flag/env override applied by the caller
  pub fn repository(&self, flag: Option<String>) -> QmResult<String> {
    flag.or_else(|| self.repository.slug.clone()).ok_or_else(|| {
      QmError::Config(ConfigError::MissingValue {
        field: "repository".to_string(),
        flag: Some("--repo".to_string()),
        env: Some("REPOSITORY".to_string()),
      })
    })
  }

  /// Board number with flag/env override applied by the caller
  pub fn project_number(&self, flag: Option<u64>) -> QmResult<u64> {
    flag.or(self.board.project_number).ok_or_else(|| {
      QmError::Config(ConfigError::MissingValue {
        field: "project number".to_string(),
        flag: Some("--project".to_string()),
        env: Some("PROJECT_NUMBER".to_string()),
      })
    })
  }

  /// Path to the addon TOC file: `<Addon>/<Addon>.toc`
  pub fn toc_path(&self) -> QmResult<PathBuf> {
    let name = self.addon_name()?;
    Ok(PathBuf::from(name).join(format!("{}.toc", name)))
  }
}

/// Commented template written by `quartermaster init`
pub fn default_config_template() -> String {
  "\
# quartermaster configuration

[addon]
# Addon directory name; also the zip top-level and the TOC stem.
name = \"MyAddon\"

[repository]
# owner/repo on GitHub. Overridden by --repo or the REPOSITORY env var.
slug = \"owner/repo\"

[board]
# Projects-v2 board number. Overridden by --project or PROJECT_NUMBER.
project_number = 1

[release]
changelog = \"CHANGELOG.md\"
build_dir = \"build\"
protected_branches = [\"main\", \"beta\"]
"
  .to_string()
}
