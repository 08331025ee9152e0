use std::env;

use thiserror::Error;

const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
const DEFAULT_GITHUB_OWNER: &str = "zotbins";
const DEFAULT_MONITORED_REPOS: &str = "waste_watcher,zbceblog,zbce_api";
const DEFAULT_POLL_INTERVAL: u64 = 60 * 60 * 24;
const DEFAULT_HTTP_TIMEOUT: u64 = 10;

/// Errors that can occur while reading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    /// An environment variable is set but cannot be parsed.
    #[error("invalid value for {var}: {value}")]
    InvalidValue {
        /// The offending variable name.
        var: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// Represents the application configuration.
///
/// Loaded once at startup and held immutably for the process lifetime.
#[derive(Debug)]
pub struct Config {
    /// The Telegram bot token.
    pub telegram_bot_token: String,
    /// Base URL of the GitHub REST API.
    pub github_api_url: String,
    /// The GitHub owner/organization all monitored repositories live under.
    pub github_owner: String,
    /// Base URL of the ZBCE telemetry API.
    pub zbce_base_url: String,
    /// API key for the ZBCE telemetry API.
    pub zbce_api_key: String,
    /// The chat the scheduled issue reports are posted to.
    pub channel_id: i64,
    /// The monitored repositories, in posting order.
    pub monitored_repos: Vec<String>,
    /// The interval in seconds between scheduled issue checks.
    pub poll_interval: u64,
    /// Timeout in seconds applied to every outbound HTTP request.
    pub http_timeout: u64,
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::MissingVar(var))
}

fn parsed_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let channel_id = required("CHANNEL_ID")?;
        let channel_id = channel_id
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var: "CHANNEL_ID", value: channel_id })?;

        let monitored_repos = env::var("MONITORED_REPOS")
            .unwrap_or_else(|_| DEFAULT_MONITORED_REPOS.to_string())
            .split(',')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect::<Vec<_>>();

        // The monitored set must be non-empty for the lifetime of the process.
        if monitored_repos.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MONITORED_REPOS",
                value: env::var("MONITORED_REPOS").unwrap_or_default(),
            });
        }

        Ok(Self {
            telegram_bot_token: required("TELOXIDE_TOKEN")?,
            github_api_url: env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_GITHUB_API_URL.to_string()),
            github_owner: env::var("GITHUB_OWNER")
                .unwrap_or_else(|_| DEFAULT_GITHUB_OWNER.to_string()),
            zbce_base_url: required("ZBCE_BASE_URL")?,
            zbce_api_key: required("ZBCE_API_KEY")?,
            channel_id,
            monitored_repos,
            poll_interval: parsed_or("POLL_INTERVAL", DEFAULT_POLL_INTERVAL)?,
            http_timeout: parsed_or("HTTP_TIMEOUT", DEFAULT_HTTP_TIMEOUT)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use temp_env::with_vars;

    use super::*;

    const REQUIRED_VARS: [(&str, Option<&str>); 4] = [
        ("TELOXIDE_TOKEN", Some("test telegram bot token")),
        ("ZBCE_BASE_URL", Some("https://api.zbce.test")),
        ("ZBCE_API_KEY", Some("test api key")),
        ("CHANNEL_ID", Some("773326709797027850")),
    ];

    #[test]
    fn test_from_env() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars.push(("GITHUB_API_URL", Some("https://github.test")));
        vars.push(("GITHUB_OWNER", Some("test-owner")));
        vars.push(("MONITORED_REPOS", Some("alpha, beta")));
        vars.push(("POLL_INTERVAL", Some("100")));

        with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.telegram_bot_token, "test telegram bot token");
            assert_eq!(config.github_api_url, "https://github.test");
            assert_eq!(config.github_owner, "test-owner");
            assert_eq!(config.zbce_base_url, "https://api.zbce.test");
            assert_eq!(config.zbce_api_key, "test api key");
            assert_eq!(config.channel_id, 773326709797027850);
            assert_eq!(config.monitored_repos, vec!["alpha", "beta"]);
            assert_eq!(config.poll_interval, 100);
        });
    }

    #[test]
    fn test_missing_telegram_bot_token_error() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars[0] = ("TELOXIDE_TOKEN", None);

        with_vars(vars, || {
            let config = Config::from_env();
            assert!(matches!(config, Err(ConfigError::MissingVar("TELOXIDE_TOKEN"))));
        });
    }

    #[test]
    fn test_missing_api_key_error() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars[2] = ("ZBCE_API_KEY", None);

        with_vars(vars, || {
            let config = Config::from_env();
            assert!(matches!(config, Err(ConfigError::MissingVar("ZBCE_API_KEY"))));
        });
    }

    #[test]
    fn test_invalid_channel_id_error() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars[3] = ("CHANNEL_ID", Some("not-a-number"));

        with_vars(vars, || {
            let config = Config::from_env();
            assert!(matches!(config, Err(ConfigError::InvalidValue { var: "CHANNEL_ID", .. })));
        });
    }

    #[test]
    fn test_default_monitored_repos() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars.push(("MONITORED_REPOS", None));

        with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.monitored_repos, vec!["waste_watcher", "zbceblog", "zbce_api"]);
        });
    }

    #[test]
    fn test_empty_monitored_repos_error() {
        let mut vars = REQUIRED_VARS.to_vec();
        vars.push(("MONITORED_REPOS", Some(" , ,")));

        with_vars(vars, || {
            let config = Config::from_env();
            assert!(matches!(
                config,
                Err(ConfigError::InvalidValue { var: "MONITORED_REPOS", .. })
            ));
        });
    }

    #[test]
    fn test_missing_optional_vars_defaults() {
        with_vars(REQUIRED_VARS, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);
            assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
            assert_eq!(config.github_api_url, DEFAULT_GITHUB_API_URL);
            assert_eq!(config.github_owner, DEFAULT_GITHUB_OWNER);
        });
    }
}
