//! Configuration management for WikiQA.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config files (.wikiqa/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources override earlier ones.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Upstream providers the client factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 3] = ["mediawiki", "wikipedia", "sqlite"];

/// Offline article database location, relative to the workspace.
pub const DEFAULT_DATABASE_PATH: &str = "data/wikipedia.db";

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the workspace root (contains .wikiqa/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,

    /// Encyclopedia service settings
    pub wiki: WikiConfig,

    /// Answer pipeline settings
    pub answer: AnswerConfig,
}

/// Encyclopedia service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WikiConfig {
    /// Provider identifier ("mediawiki", its alias "wikipedia", or "sqlite")
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Language edition, e.g. "en" or "de"
    #[serde(default = "default_language")]
    pub language: String,

    /// Explicit `api.php` endpoint; derived from `language` when absent
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Offline article database used by the sqlite provider
    #[serde(default)]
    pub database: Option<PathBuf>,
}

fn default_provider() -> String {
    "mediawiki".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    format!("wikiqa/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            language: default_language(),
            endpoint: None,
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            database: None,
        }
    }
}

impl WikiConfig {
    /// The `api.php` URL requests are sent to.
    pub fn api_endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}.wikipedia.org/w/api.php", self.language),
        }
    }

    /// Base URL that article paths are appended to.
    pub fn article_base_url(&self) -> String {
        format!("https://{}.wikipedia.org/wiki/", self.language)
    }
}

/// How many passages the extractor keeps for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStyle {
    /// Full answer: top three passages
    #[default]
    Full,
    /// Single-article chat panel: top two passages
    Compact,
}

impl AnswerStyle {
    /// Parse a style name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "full" => Some(Self::Full),
            "compact" | "panel" => Some(Self::Compact),
            _ => None,
        }
    }

    /// Number of passages kept when at least one paragraph matched.
    pub fn passage_count(&self) -> usize {
        match self {
            Self::Full => 3,
            Self::Compact => 2,
        }
    }
}

/// Answer pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerConfig {
    /// Number of search candidates requested (1..=10)
    #[serde(default = "default_search_limit")]
    pub search_limit: u32,

    /// Passage selection style
    #[serde(default)]
    pub style: AnswerStyle,

    /// Chance that a rewritten sentence gets a connector phrase
    #[serde(default = "default_connector_probability")]
    pub connector_probability: f64,

    /// Chance that a long sentence is wrapped in emphasis
    #[serde(default = "default_emphasis_probability")]
    pub emphasis_probability: f64,

    /// Sentences longer than this many characters are emphasis candidates
    #[serde(default = "default_emphasis_min_length")]
    pub emphasis_min_length: usize,
}

fn default_search_limit() -> u32 {
    3
}

fn default_connector_probability() -> f64 {
    0.3
}

fn default_emphasis_probability() -> f64 {
    0.5
}

fn default_emphasis_min_length() -> usize {
    100
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            search_limit: default_search_limit(),
            style: AnswerStyle::default(),
            connector_probability: default_connector_probability(),
            emphasis_probability: default_emphasis_probability(),
            emphasis_min_length: default_emphasis_min_length(),
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    wiki: Option<WikiConfig>,
    answer: Option<AnswerConfig>,
    workspace: Option<WorkspaceConfig>,
    logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceConfig {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingConfig {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            log_level: None,
            verbose: false,
            no_color: false,
            wiki: WikiConfig::default(),
            answer: AnswerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and environment variables.
    ///
    /// Environment variables:
    /// - `WIKIQA_WORKSPACE`: Override workspace path
    /// - `WIKIQA_CONFIG`: Path to config file
    /// - `WIKIQA_LANGUAGE`: Encyclopedia language edition
    /// - `WIKIQA_ENDPOINT`: Explicit `api.php` endpoint
    /// - `WIKIQA_DATABASE`: Offline article database path
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use wikiqa_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Endpoint: {}", config.wiki.api_endpoint());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_for(None, None)
    }

    /// Load configuration, locating the workspace and config file from the
    /// given paths before falling back to the environment.
    ///
    /// The CLI passes its `--workspace` and `--config` flags here so the YAML
    /// file they point at is the one merged.
    pub fn load_for(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("WIKIQA_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if let Some(config_file) =
            config_file.or_else(|| std::env::var("WIKIQA_CONFIG").ok().map(PathBuf::from))
        {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = match config.config_file {
            Some(ref cf) => cf.clone(),
            None => config.config_dir().join("config.yaml"),
        };

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(language) = std::env::var("WIKIQA_LANGUAGE") {
            config.wiki.language = language;
        }

        if let Ok(endpoint) = std::env::var("WIKIQA_ENDPOINT") {
            config.wiki.endpoint = Some(endpoint);
        }

        if let Ok(database) = std::env::var("WIKIQA_DATABASE") {
            config.wiki.database = Some(PathBuf::from(database));
        }

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        config.wiki.database = Some(config.database_path());

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(&self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let config_file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        let mut result = self.clone();

        if let Some(ws) = config_file.workspace {
            if let Some(path) = ws.path {
                result.workspace = PathBuf::from(path);
            }
        }

        if let Some(logging) = config_file.logging {
            if let Some(level) = logging.level {
                result.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                result.no_color = !color;
            }
        }

        if let Some(wiki) = config_file.wiki {
            result.wiki = wiki;
        }

        if let Some(answer) = config_file.answer {
            result.answer = answer;
        }

        Ok(result)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// Command-line flags take precedence over environment variables and
    /// the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        language: Option<String>,
        endpoint: Option<String>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(language) = language {
            self.wiki.language = language;
        }

        if let Some(endpoint) = endpoint {
            self.wiki.endpoint = Some(endpoint);
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .wikiqa directory.
    pub fn config_dir(&self) -> PathBuf {
        self.workspace.join(".wikiqa")
    }

    /// Offline article database path; relative paths resolve against the
    /// workspace.
    pub fn database_path(&self) -> PathBuf {
        let path = self
            .wiki
            .database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        if path.is_absolute() {
            path
        } else {
            self.workspace.join(path)
        }
    }

    /// Validate the merged configuration.
    pub fn validate(&self) -> AppResult<()> {
        let provider = self.wiki.provider.to_lowercase();
        if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.wiki.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.wiki.language.trim().is_empty() {
            return Err(AppError::Config("Language must not be empty".to_string()));
        }

        if self.wiki.timeout_secs == 0 {
            return Err(AppError::Config(
                "timeoutSecs must be greater than zero".to_string(),
            ));
        }

        if !(1..=10).contains(&self.answer.search_limit) {
            return Err(AppError::Config(format!(
                "searchLimit must be between 1 and 10, got {}",
                self.answer.search_limit
            )));
        }

        for (name, value) in [
            ("connectorProbability", self.answer.connector_probability),
            ("emphasisProbability", self.answer.emphasis_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AppError::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
