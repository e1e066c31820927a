//! Application configuration structures.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, Result};

/// Upper bound on records rendered per run; the feed page lists fewer.
pub const MAX_LINES: usize = 100;

/// Root application configuration, as read from `p2000.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Bot credentials
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// Feed location
    #[serde(default)]
    pub global: GlobalConfig,

    /// `region<N>` keys mapped to URL suffixes
    #[serde(default)]
    pub regions: BTreeMap<String, String>,

    /// HTTP client behavior
    #[serde(default)]
    pub http: HttpConfig,

    /// Relevance rules
    #[serde(default)]
    pub filter: FilterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.telegram.token.trim().is_empty() {
            return Err(AppError::config("telegram.token is missing"));
        }
        if self.telegram.chatid.trim().is_empty() {
            return Err(AppError::config("telegram.chatid is missing"));
        }
        if self.global.baseurl.trim().is_empty() {
            return Err(AppError::config("global.baseurl is missing"));
        }
        if self.regions.is_empty() {
            return Err(AppError::config("No regions defined"));
        }
        if self.http.timeout_secs == 0 {
            return Err(AppError::config("http.timeout_secs must be > 0"));
        }
        Ok(())
    }

    /// Look up the URL suffix for a numeric region code.
    pub fn region_suffix(&self, region: &str) -> Result<&str> {
        let key = format!("region{region}");
        self.regions.get(&key).map(String::as_str).ok_or_else(|| {
            let known: Vec<_> = self.regions.keys().map(String::as_str).collect();
            AppError::config(format!(
                "regions.{key} is missing (known: {})",
                known.join(", ")
            ))
        })
    }

    /// Resolve everything a single run needs into plain values.
    ///
    /// Validates the file first so a run never fetches with a half-filled
    /// configuration.
    pub fn resolve(&self, options: RunOptions) -> Result<RunSettings> {
        self.validate()?;
        if options.lines > MAX_LINES {
            return Err(AppError::config(format!(
                "lines must be at most {MAX_LINES}, got {}",
                options.lines
            )));
        }

        let suffix = self.region_suffix(&options.region)?;
        let url = url::Url::parse(&format!(
            "{}{}",
            self.global.baseurl.trim(),
            suffix.trim()
        ))?;

        Ok(RunSettings {
            url: url.to_string(),
            token: self.telegram.token.trim().to_string(),
            chat_id: self.telegram.chatid.trim().to_string(),
            lines: options.lines,
            telegram: options.telegram,
            state_dir: options.state_dir,
        })
    }
}

/// Telegram bot credentials.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelegramConfig {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub chatid: String,
}

/// Feed location settings.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GlobalConfig {
    /// Base URL the region suffix is joined onto
    #[serde(default)]
    pub baseurl: String,
}

/// HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Telegram Bot API base URL
    #[serde(default = "defaults::telegram_api")]
    pub telegram_api: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            telegram_api: defaults::telegram_api(),
        }
    }
}

/// Relevance filter settings.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    /// Case-insensitive patterns matched against the message text
    #[serde(default = "defaults::patterns")]
    pub patterns: Vec<String>,

    /// Case-insensitive pattern matched against the call type
    #[serde(default = "defaults::lifeliner")]
    pub lifeliner: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            patterns: defaults::patterns(),
            lifeliner: defaults::lifeliner(),
        }
    }
}

/// Per-invocation options coming from the command line.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub region: String,
    pub lines: usize,
    pub telegram: bool,
    pub state_dir: PathBuf,
}

/// Fully resolved settings handed to the pipeline.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Feed URL (base URL joined with the region suffix)
    pub url: String,
    pub token: String,
    pub chat_id: String,
    /// Number of leading records rendered per run
    pub lines: usize,
    /// Deliver through Telegram instead of stdout
    pub telegram: bool,
    /// Directory holding the state files
    pub state_dir: PathBuf,
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; p2000/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn telegram_api() -> String {
        "https://api.telegram.org".into()
    }

    pub fn patterns() -> Vec<String> {
        vec![
            r"^A\s?1\b".into(),
            "A12".into(),
            "A15".into(),
            "A50".into(),
            "[AN]325".into(),
            "ZEV".into(),
            "ZV".into(),
            "690[0-9]".into(),
            r"^P\s?1\b".into(),
            "prio".into(),
        ]
    }
    pub fn lifeliner() -> String {
        "Lifeliner".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[telegram]
token = "123:abc"
chatid = "-1001"

[global]
baseurl = "http://p2000mobiel.nl/"

[regions]
region40 = "40/amsterdam-amstelland.html"
region13 = "13/kennemerland.html"
"#;

    fn options(region: &str) -> RunOptions {
        RunOptions {
            region: region.to_string(),
            lines: 5,
            telegram: false,
            state_dir: PathBuf::from("."),
        }
    }

    #[test]
    fn parses_sample_and_fills_defaults() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.telegram.token, "123:abc");
        assert_eq!(config.regions.len(), 2);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(!config.filter.patterns.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn resolve_joins_region_suffix() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let settings = config.resolve(options("40")).unwrap();
        assert_eq!(
            settings.url,
            "http://p2000mobiel.nl/40/amsterdam-amstelland.html"
        );
        assert_eq!(settings.chat_id, "-1001");
        assert_eq!(settings.lines, 5);
    }

    #[test]
    fn resolve_rejects_unknown_region() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let err = config.resolve(options("99")).unwrap_err();
        assert!(err.to_string().contains("regions.region99"));
    }

    #[test]
    fn resolve_rejects_excessive_lines() {
        let config: Config = toml::from_str(SAMPLE).unwrap();
        let mut opts = options("40");
        opts.lines = MAX_LINES + 1;
        assert!(matches!(config.resolve(opts), Err(AppError::Config(_))));

        let mut opts = options("40");
        opts.lines = MAX_LINES;
        assert!(config.resolve(opts).is_ok());
    }

    #[test]
    fn validate_rejects_missing_token() {
        let mut config: Config = toml::from_str(SAMPLE).unwrap();
        config.telegram.token = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_missing_baseurl() {
        let config: Config = toml::from_str(
            r#"
[telegram]
token = "123:abc"
chatid = "-1001"

[regions]
region40 = "40/amsterdam-amstelland.html"
"#,
        )
        .unwrap();

        let err = config.resolve(options("40")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("global.baseurl"));
    }

    #[test]
    fn validate_rejects_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.validate().is_err());
    }
}
