//! Referee configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no file
//! at all) yields the built-in table with warn-level linting.
//!
//! ```
//! use referee::config::{OutputFormat, RefereeConfig};
//! use referee::table::LintPolicy;
//!
//! let config = RefereeConfig::from_toml_str(r#"
//!     output = "json"
//!
//!     [lint]
//!     policy = "deny"
//! "#).unwrap();
//!
//! assert_eq!(config.output, OutputFormat::Json);
//! assert_eq!(config.lint.policy, LintPolicy::Deny);
//! assert!(config.rule_table.is_none());
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, RefereeResult};
use crate::table::{LintPolicy, RuleTable};

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "referee=info";

/// How the CLI prints results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable report.
    #[default]
    Text,
    /// Pretty JSON.
    Json,
}

/// Language lint settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LintConfig {
    /// Applied to tables loaded from files.
    pub policy: LintPolicy,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RefereeConfig {
    /// JSON rule table to load instead of the built-in one.
    pub rule_table: Option<PathBuf>,
    /// Tracing filter directive.
    pub log_filter: String,
    /// Output format.
    pub output: OutputFormat,
    /// Lint settings.
    pub lint: LintConfig,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            rule_table: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            output: OutputFormat::default(),
            lint: LintConfig::default(),
        }
    }
}

impl RefereeConfig {
    /// Creates a default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.log_filter.trim().is_empty() {
            return Err(ConfigError::Invalid("log_filter must not be empty".into()));
        }
        if let Some(path) = &self.rule_table {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Invalid("rule_table path is empty".into()));
            }
        }
        Ok(())
    }

    /// Sets the rule table path.
    #[must_use]
    pub fn with_rule_table(mut self, path: impl Into<PathBuf>) -> Self {
        self.rule_table = Some(path.into());
        self
    }

    /// Sets the lint policy.
    #[must_use]
    pub fn with_lint_policy(mut self, policy: LintPolicy) -> Self {
        self.lint.policy = policy;
        self
    }

    /// The configured table, or the built-in one.
    pub fn load_rule_table(&self) -> RefereeResult<Arc<RuleTable>> {
        match &self.rule_table {
            Some(path) => Ok(Arc::new(RuleTable::from_json_file(path, self.lint.policy)?)),
            None => Ok(RuleTable::builtin()),
        }
    }
}
