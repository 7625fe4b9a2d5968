//! Site configuration, read from Spin application variables.

use std::fmt;
use std::time::Duration;

use edge_sdk::edge_cache::{RouteCachePolicy, VaryRule};
use edge_sdk::edge_observability::{LogFormat, LogLevel};

/// Variable holding the episodes API base URL.
pub const VAR_API_BASE_URL: &str = "api_base_url";
/// Variable holding the regeneration interval in seconds.
pub const VAR_REVALIDATE_SECONDS: &str = "revalidate_seconds";
pub const VAR_LOG_LEVEL: &str = "log_level";
pub const VAR_LOG_FORMAT: &str = "log_format";

/// Runtime configuration of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    /// Base URL of the episodes API.
    pub api_base_url: String,
    /// How many episodes to request.
    pub episode_limit: u32,
    /// How many of them are highlighted as latest.
    pub latest_count: usize,
    /// How often the page is regenerated.
    pub revalidate: Duration,
    /// How long a stale page may be served when regeneration fails.
    pub stale_if_error: Duration,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:3333".to_string(),
            episode_limit: 12,
            latest_count: 2,
            revalidate: Duration::from_secs(60 * 60 * 8),
            stale_if_error: Duration::from_secs(60 * 60 * 24),
            log_level: LogLevel::Info,
            log_format: LogFormat::Json,
        }
    }
}

/// A variable whose value could not be used. The default was kept instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub variable: &'static str,
    pub value: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value {:?} for {}", self.value, self.variable)
    }
}

impl SiteConfig {
    /// Build the configuration from a variable lookup.
    ///
    /// Missing or blank variables keep their default. Unusable values keep
    /// their default too and are reported back.
    pub fn from_variables<F>(lookup: F) -> (Self, Vec<ConfigIssue>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut issues = Vec::new();

        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(url) = get(VAR_API_BASE_URL) {
            let trimmed = url.trim();
            if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
                config.api_base_url = trimmed.to_string();
            } else {
                issues.push(ConfigIssue {
                    variable: VAR_API_BASE_URL,
                    value: url,
                });
            }
        }

        if let Some(value) = get(VAR_REVALIDATE_SECONDS) {
            match value.trim().parse::<u64>() {
                Ok(seconds) if seconds > 0 => config.revalidate = Duration::from_secs(seconds),
                _ => issues.push(ConfigIssue {
                    variable: VAR_REVALIDATE_SECONDS,
                    value,
                }),
            }
        }

        if let Some(value) = get(VAR_LOG_LEVEL) {
            match LogLevel::parse(&value) {
                Some(level) => config.log_level = level,
                None => issues.push(ConfigIssue {
                    variable: VAR_LOG_LEVEL,
                    value,
                }),
            }
        }

        if let Some(value) = get(VAR_LOG_FORMAT) {
            match LogFormat::parse(&value) {
                Some(format) => config.log_format = format,
                None => issues.push(ConfigIssue {
                    variable: VAR_LOG_FORMAT,
                    value,
                }),
            }
        }

        (config, issues)
    }

    /// Read the configuration from the component's Spin variables.
    #[cfg(target_arch = "wasm32")]
    pub fn from_spin() -> (Self, Vec<ConfigIssue>) {
        Self::from_variables(|name| spin_sdk::variables::get(name).ok())
    }

    /// Cache policy for a page regenerated every `revalidate`.
    pub fn cache_policy(&self, revalidate: Duration) -> RouteCachePolicy {
        RouteCachePolicy::revalidate(revalidate)
            .with_stale_if_error(self.stale_if_error)
            .vary_on(VaryRule::header("Accept-Encoding"))
            .with_tag("episodes")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let (config, issues) = SiteConfig::from_variables(|_| None);
        assert!(issues.is_empty());
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.api_base_url, "http://localhost:3333");
        assert_eq!(config.episode_limit, 12);
        assert_eq!(config.latest_count, 2);
        assert_eq!(config.revalidate, Duration::from_secs(28_800));
    }

    #[test]
    fn test_variables_override_defaults() {
        let (config, issues) = SiteConfig::from_variables(lookup(&[
            ("api_base_url", " https://api.devcastr.test "),
            ("revalidate_seconds", "600"),
            ("log_level", "debug"),
            ("log_format", "human"),
        ]));
        assert!(issues.is_empty());
        assert_eq!(config.api_base_url, "https://api.devcastr.test");
        assert_eq!(config.revalidate, Duration::from_secs(600));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.log_format, LogFormat::Human);
    }

    #[test]
    fn test_invalid_values_keep_defaults() {
        let (config, issues) = SiteConfig::from_variables(lookup(&[
            ("api_base_url", "localhost:3333"),
            ("revalidate_seconds", "0"),
            ("log_level", "chatty"),
            ("log_format", ""),
        ]));
        assert_eq!(config, SiteConfig::default());

        let variables: Vec<&str> = issues.iter().map(|i| i.variable).collect();
        assert_eq!(variables, ["api_base_url", "revalidate_seconds", "log_level"]);
        assert_eq!(
            issues[1].to_string(),
            "invalid value \"0\" for revalidate_seconds"
        );
    }

    #[test]
    fn test_cache_policy_header() {
        let config = SiteConfig::default();
        let policy = config.cache_policy(config.revalidate);
        assert_eq!(
            policy.cache_control_header(),
            "public, max-age=0, s-maxage=28800, stale-while-revalidate=31536000, stale-if-error=86400"
        );
        assert_eq!(policy.vary_header().as_deref(), Some("Accept-Encoding"));
        assert_eq!(policy.tags, ["episodes"]);
    }
}
