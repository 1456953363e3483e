//! Configuration loading and credential resolution.
//!
//! Two sources feed a run:
//!
//! - An optional TOML file (`branch-protection-audit.toml` in the working
//!   directory, or an explicit path) with API, rate-limit and report
//!   settings. Every field has a default, so the file can be omitted.
//! - The token and organization, taken from command-line flags with the
//!   `GITHUB_TOKEN` / `ORG_NAME` environment variables as fallback. See
//!   [`Credentials::resolve_with`].
//!
//! ```rust,no_run
//! use branch_protection_audit::config::Config;
//!
//! let config = Config::load(None).expect("failed to load config");
//! assert!(config.api.base_url.starts_with("https://"));
//! ```

use crate::error::{Error, Result};
use crate::rate_limit::RetryPolicy;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the token.
pub const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable holding the organization name.
pub const ORG_ENV: &str = "ORG_NAME";

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "branch-protection-audit.toml";

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Settings for one audit run.
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub rate_limit: RateLimitConfig,
    pub report: ReportConfig,
}

/// How to reach the GitHub REST API.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, e.g. `https://api.github.com` or
    /// `https://ghe.example.com/api/v3` for GitHub Enterprise Server.
    pub base_url: String,
    /// Value of the `User-Agent` header (GitHub rejects requests without one).
    pub user_agent: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
        }
    }
}

/// Rate-limit backoff bound.
///
/// ```toml
/// [rate_limit]
/// max_waits = 10   # omit for no limit
/// ```
#[derive(Debug, Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_waits: Option<u32>,
}

impl RateLimitConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_waits: self.max_waits,
        }
    }
}

/// Where the CSV report is written.
#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Resolution order:
    /// 1. If `path` is `Some`, load from that file (error if missing).
    /// 2. Otherwise try [`DEFAULT_CONFIG_FILE`] in the current directory.
    /// 3. If that does not exist either, return [`Config::default()`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the explicit path does not exist, or the
    /// file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config_path = match path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                return Err(Error::Config(format!(
                    "config file not found: {}",
                    p.display()
                )))
            }
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let Some(path) = config_path else {
            return Ok(Config::default());
        };

        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::Config(format!("failed to read config {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse config {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// API root with any trailing slash removed.
    pub fn api_base(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

/// Token and organization for one run.
///
/// The token is never printed by the `Debug` implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub org: String,
}

impl Credentials {
    /// Takes each value from its flag, falling back to `env` when the flag
    /// is absent or empty (`--orgName ""` still picks up `ORG_NAME`).
    ///
    /// # Examples
    ///
    /// ```
    /// use branch_protection_audit::config::Credentials;
    ///
    /// let env = |key: &str| (key == "ORG_NAME").then(|| "acme".to_string());
    /// let creds = Credentials::resolve_with(Some("ghp_x".into()), Some(String::new()), env).unwrap();
    /// assert_eq!(creds.org, "acme");
    /// ```
    pub fn resolve_with(
        token: Option<String>,
        org: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials> {
        let token = token.filter(|t| !t.is_empty()).or_else(|| env(TOKEN_ENV));
        let org = org.filter(|o| !o.is_empty()).or_else(|| env(ORG_ENV));
        Credentials::resolve(token, org)
    }

    /// Builds credentials from already-merged flag/environment values.
    ///
    /// Empty strings count as missing, so `GITHUB_TOKEN=` in a `.env` file
    /// does not slip through as a valid token.
    ///
    /// # Errors
    ///
    /// [`Error::MissingCredentials`] naming the first missing parameter.
    ///
    /// # Examples
    ///
    /// ```
    /// use branch_protection_audit::config::Credentials;
    ///
    /// let creds = Credentials::resolve(Some("ghp_x".into()), Some("acme".into())).unwrap();
    /// assert_eq!(creds.org, "acme");
    ///
    /// assert!(Credentials::resolve(None, Some("acme".into())).is_err());
    /// assert!(Credentials::resolve(Some(String::new()), Some("acme".into())).is_err());
    /// ```
    pub fn resolve(token: Option<String>, org: Option<String>) -> Result<Credentials> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingCredentials("token"))?;
        let org = org
            .filter(|o| !o.is_empty())
            .ok_or(Error::MissingCredentials("organization"))?;
        Ok(Credentials { token, org })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("org", &self.org)
            .finish()
    }
}
