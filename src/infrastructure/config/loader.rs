use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::adapters::github::client::{DEFAULT_API_URL, DEFAULT_GRAPHQL_URL};
use crate::adapters::github::GitHubClientConfig;
use crate::domain::models::{Settings, LEGACY_KEYS};
use crate::infrastructure::logging::LogConfig;

/// Config file read when `--config` is not given; it is optional.
pub const DEFAULT_CONFIG_PATH: &str = ".github/contributor-triage.yaml";

/// Prefix GitHub Actions uses to pass action inputs.
const INPUT_PREFIX: &str = "INPUT_";

/// Prefix for local overrides; `__` nests, `_` becomes `-`.
const OVERRIDE_PREFIX: &str = "TRIAGE_";

/// Runner variables mapped onto configuration keys.
const RUNNER_VARIABLES: [(&str, &str); 3] = [
    ("GITHUB_TOKEN", "github-token"),
    ("GITHUB_API_URL", "api-url"),
    ("GITHUB_GRAPHQL_URL", "graphql-url"),
];

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("github-token is required: set the action input or GITHUB_TOKEN")]
    MissingToken,

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid timeout-secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Config file not found: {}", .0.display())]
    FileNotFound(PathBuf),
}

/// Connection settings for the GitHub API.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// Token used for every API call.
    #[serde(default)]
    pub github_token: String,

    /// REST base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// GraphQL endpoint.
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_graphql_url() -> String {
    DEFAULT_GRAPHQL_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            github_token: String::new(),
            api_url: default_api_url(),
            graphql_url: default_graphql_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl fmt::Debug for GitHubConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubConfig")
            .field("github_token", &"[REDACTED]")
            .field("api_url", &self.api_url)
            .field("graphql_url", &self.graphql_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl GitHubConfig {
    /// Settings for [`GitHubClient`](crate::adapters::github::GitHubClient).
    pub fn client_config(&self) -> GitHubClientConfig {
        GitHubClientConfig {
            token: self.github_token.clone(),
            api_url: self.api_url.clone(),
            graphql_url: self.graphql_url.clone(),
            timeout_secs: self.timeout_secs,
            ..GitHubClientConfig::default()
        }
    }
}

/// Everything a run needs, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Triage behaviour.
    pub settings: Settings,
    /// API connection.
    pub github: GitHubConfig,
    /// Logging.
    pub logging: LogConfig,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML file (`path`, or `.github/contributor-triage.yaml` if present)
    /// 3. Runner environment (`GITHUB_TOKEN`, `GITHUB_API_URL`, `GITHUB_GRAPHQL_URL`)
    /// 4. Action inputs (`INPUT_*`)
    /// 5. `TRIAGE_*` overrides (highest priority)
    pub fn load(path: Option<&Path>) -> Result<AppConfig> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()).into());
            }
        }
        let figment = Self::figment(path, std::env::vars());
        Self::extract(&figment)
    }

    /// Build the provider stack from an explicit set of process variables.
    pub fn figment<I>(path: Option<&Path>, vars: I) -> Figment
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let file = path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH), Path::to_path_buf);
        let (runner, inputs) = split_environment(vars);

        Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Settings::default()))
            .merge(Serialized::defaults(GitHubConfig::default()))
            .merge(Serialized::default("logging", LogConfig::default()))
            // 2. Merge the YAML file, if any
            .merge(LegacyKeys(Yaml::file(file)))
            // 3. Runner-provided variables
            .merge(Serialized::defaults(runner))
            // 4. Action inputs
            .merge(LegacyKeys(Serialized::defaults(inputs)))
            // 5. Local overrides (highest priority)
            .merge(LegacyKeys(
                Env::prefixed(OVERRIDE_PREFIX)
                    .map(|key| key.as_str().replace("__", ".").replace('_', "-").into()),
            ))
    }

    /// Extract and validate the configuration from a provider stack.
    pub fn extract(figment: &Figment) -> Result<AppConfig> {
        let settings: Settings = figment
            .extract()
            .context("Failed to extract triage settings")?;
        let github: GitHubConfig = figment
            .extract()
            .context("Failed to extract GitHub connection settings")?;
        let logging: LogConfig = figment
            .extract_inner("logging")
            .context("Failed to extract logging settings")?;

        let config = AppConfig {
            settings,
            github,
            logging,
        };
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
        if config.github.github_token.trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        if config.github.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.github.timeout_secs));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

/// Rewrites older input names to their current key inside one layer, so
/// that a legacy name in a higher layer overrides the current name below it.
/// When a layer carries both spellings, the current one wins.
struct LegacyKeys<P>(P);

impl<P: Provider> Provider for LegacyKeys<P> {
    fn metadata(&self) -> Metadata {
        self.0.metadata()
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut data = self.0.data()?;
        for dict in data.values_mut() {
            rename_legacy_keys(dict);
        }
        Ok(data)
    }

    fn profile(&self) -> Option<Profile> {
        self.0.profile()
    }
}

fn rename_legacy_keys(dict: &mut Dict) {
    for (legacy, key) in LEGACY_KEYS {
        if let Some(value) = dict.remove(legacy) {
            dict.entry(key.to_string()).or_insert(value);
        }
    }
}

/// Pick runner variables and action inputs out of the process environment.
///
/// Input names are lowercased the way the Actions toolkit reads them. An
/// empty input counts as unset, so the default (or a lower layer) applies.
fn split_environment<I>(vars: I) -> (BTreeMap<String, String>, BTreeMap<String, String>)
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut runner = BTreeMap::new();
    let mut inputs = BTreeMap::new();

    for (name, value) in vars {
        if value.is_empty() {
            continue;
        }
        if let Some(input) = name.strip_prefix(INPUT_PREFIX) {
            inputs.insert(input.to_lowercase(), value);
        } else if let Some((_, key)) = RUNNER_VARIABLES.iter().find(|(var, _)| *var == name) {
            runner.insert((*key).to_string(), value);
        }
    }

    (runner, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::logging::LogFormat;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn missing_file() -> PathBuf {
        PathBuf::from("/nonexistent/contributor-triage.yaml")
    }

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let path = missing_file();
        ConfigLoader::extract(&ConfigLoader::figment(Some(&path), vars(pairs)))
    }

    #[test]
    fn test_defaults_with_token() {
        let config = load(&[("INPUT_GITHUB-TOKEN", "ghp_input")]).unwrap();
        assert_eq!(config.github.github_token, "ghp_input");
        assert_eq!(config.github.api_url, DEFAULT_API_URL);
        assert_eq!(config.github.timeout_secs, 30);
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_missing_token_is_rejected() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn test_runner_token_is_fallback() {
        let config = load(&[("GITHUB_TOKEN", "ghs_runner")]).unwrap();
        assert_eq!(config.github.github_token, "ghs_runner");

        let config = load(&[
            ("GITHUB_TOKEN", "ghs_runner"),
            ("INPUT_GITHUB-TOKEN", "ghp_input"),
        ])
        .unwrap();
        assert_eq!(config.github.github_token, "ghp_input");
    }

    #[test]
    fn test_runner_api_urls() {
        let config = load(&[
            ("GITHUB_TOKEN", "t"),
            ("GITHUB_API_URL", "https://ghe.example.com/api/v3"),
            ("GITHUB_GRAPHQL_URL", "https://ghe.example.com/api/graphql"),
        ])
        .unwrap();
        assert_eq!(config.github.api_url, "https://ghe.example.com/api/v3");
        assert_eq!(config.github.graphql_url, "https://ghe.example.com/api/graphql");
    }

    #[test]
    fn test_action_inputs() {
        let config = load(&[
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_REPLY-TO-ISSUES", "false"),
            ("INPUT_MESSAGE-PR", "Thanks for the PR!"),
            ("INPUT_WARN-MISSING-ISSUE", "TRUE"),
            ("INPUT_PR-ASSIGNEE-FROM-ISSUE", "42"),
            ("INPUT_EXTERNAL-CONTRIBUTOR-LABEL", "community"),
        ])
        .unwrap();
        assert!(!config.settings.reply_to_issues);
        assert!(config.settings.reply_to_prs);
        assert_eq!(config.settings.message_pr, "Thanks for the PR!");
        assert!(config.settings.warn_missing_issue);
        assert_eq!(config.settings.pr_assignee_from_issue, "42");
        assert_eq!(config.settings.external_contributor_label, "community");
    }

    #[test]
    fn test_legacy_input_names() {
        let config = load(&[
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_REPLY-TO-PULL-REQUEST", "False"),
            ("INPUT_PULL-REQUEST-ASSIGNEE-ISSUE", "9"),
        ])
        .unwrap();
        assert!(!config.settings.reply_to_prs);
        assert_eq!(config.settings.pr_assignee_from_issue, "9");
    }

    #[test]
    fn test_every_legacy_input_name() {
        let config = load(&[
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_REPLY-TO-ISSUE", "false"),
            ("INPUT_REPLY-TO-PULL-REQUEST", "FALSE"),
            ("INPUT_MESSAGE-PULL-REQUEST", "Legacy template"),
            ("INPUT_PULL-REQUEST-ASSIGNEE-ISSUE", "7"),
        ])
        .unwrap();
        assert!(!config.settings.reply_to_issues);
        assert!(!config.settings.reply_to_prs);
        assert_eq!(config.settings.message_pr, "Legacy template");
        assert_eq!(config.settings.pr_assignee_from_issue, "7");
    }

    #[test]
    fn test_current_name_wins_within_a_layer() {
        let config = load(&[
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_MESSAGE-PR", "Current"),
            ("INPUT_MESSAGE-PULL-REQUEST", "Legacy"),
        ])
        .unwrap();
        assert_eq!(config.settings.message_pr, "Current");
    }

    #[test]
    fn test_legacy_yaml_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "reply-to-issue: false\nmessage-pull-request: From file\npull-request-assignee-issue: 12"
        )
        .unwrap();

        let figment = ConfigLoader::figment(
            Some(file.path()),
            vars(&[("INPUT_GITHUB-TOKEN", "t"), ("INPUT_REPLY-TO-ISSUES", "true")]),
        );
        let config = ConfigLoader::extract(&figment).unwrap();
        assert!(config.settings.reply_to_issues);
        assert_eq!(config.settings.message_pr, "From file");
        assert_eq!(config.settings.pr_assignee_from_issue, "12");
    }

    #[test]
    fn test_legacy_input_overrides_current_yaml_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reply-to-prs: true").unwrap();

        let figment = ConfigLoader::figment(
            Some(file.path()),
            vars(&[
                ("INPUT_GITHUB-TOKEN", "t"),
                ("INPUT_REPLY-TO-PULL-REQUEST", "false"),
            ]),
        );
        let config = ConfigLoader::extract(&figment).unwrap();
        assert!(!config.settings.reply_to_prs);
    }

    #[test]
    fn test_empty_input_is_unset() {
        let config = load(&[
            ("INPUT_GITHUB-TOKEN", "t"),
            ("INPUT_WARN-MISSING-ISSUE", ""),
            ("INPUT_RELEASE-NOTES-LABEL", ""),
        ])
        .unwrap();
        assert!(!config.settings.warn_missing_issue);
        assert_eq!(config.settings.release_notes_label, "release-notes");
    }

    #[test]
    fn test_invalid_boolean_input_fails() {
        let result = load(&[("INPUT_GITHUB-TOKEN", "t"), ("INPUT_REPLY-TO-PRS", "maybe")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_file_below_inputs() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "message-issue: From file\nrelease-notes-label: changelog\nlogging:\n  level: debug\n  format: json"
        )
        .unwrap();

        let figment = ConfigLoader::figment(
            Some(file.path()),
            vars(&[
                ("INPUT_GITHUB-TOKEN", "t"),
                ("INPUT_RELEASE-NOTES-LABEL", "notes"),
            ]),
        );
        let config = ConfigLoader::extract(&figment).unwrap();
        assert_eq!(config.settings.message_issue, "From file");
        assert_eq!(config.settings.release_notes_label, "notes");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = missing_file();
        let err = ConfigLoader::load(Some(&path)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = load(&[("GITHUB_TOKEN", "t")]).unwrap();
        config.logging.level = "loud".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = load(&[("GITHUB_TOKEN", "ghs_secret")]).unwrap();
        assert!(!format!("{config:?}").contains("ghs_secret"));
    }

    #[test]
    fn test_client_config_carries_connection_settings() {
        let config = load(&[("GITHUB_TOKEN", "ghs_runner")]).unwrap();
        let client = config.github.client_config();
        assert_eq!(client.token, "ghs_runner");
        assert_eq!(client.api_url, DEFAULT_API_URL);
        assert_eq!(client.timeout_secs, 30);
    }
}
