//! Route-level cache policies.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How long shared caches may keep serving a stale page while a fresh one is
/// generated. Effectively "until regenerated".
pub const STALE_FOREVER: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Cache scope determining who can cache the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    /// Cacheable by CDN and browser (shared cache).
    Public,
    /// Cacheable by browser only (private cache).
    Private,
    /// No caching.
    #[default]
    None,
}

impl CacheScope {
    /// Get the Cache-Control directive for this scope.
    pub fn cache_control_directive(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::None => "no-store",
        }
    }

    /// Check if this scope allows CDN caching.
    pub fn allows_cdn_caching(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Vary rule for cache key variance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum VaryRule {
    /// Vary by HTTP header.
    Header(String),
    /// Vary by cookie.
    Cookie(String),
}

impl VaryRule {
    /// Create a header vary rule.
    pub fn header(name: impl Into<String>) -> Self {
        Self::Header(name.into())
    }
}

/// Route-level cache policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteCachePolicy {
    /// Whether caching is enabled.
    pub enabled: bool,
    /// Cache scope.
    pub scope: CacheScope,
    /// Browser time-to-live (`max-age`).
    pub ttl: Duration,
    /// Shared cache time-to-live (`s-maxage`), if it differs from `ttl`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_ttl: Option<Duration>,
    /// Stale-while-revalidate window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<Duration>,
    /// Stale-if-error window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stale_if_error: Option<Duration>,
    /// Vary rules for cache key.
    pub vary: Vec<VaryRule>,
    /// Custom cache tags for invalidation.
    pub tags: Vec<String>,
}

impl Default for RouteCachePolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            scope: CacheScope::None,
            ttl: Duration::from_secs(0),
            shared_ttl: None,
            stale_while_revalidate: None,
            stale_if_error: None,
            vary: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl RouteCachePolicy {
    /// Create an incremental-revalidation policy.
    ///
    /// Browsers always revalidate. Shared caches treat the page as fresh for
    /// `interval`, then keep serving it while the next generation runs.
    pub fn revalidate(interval: Duration) -> Self {
        Self {
            enabled: true,
            scope: CacheScope::Public,
            ttl: Duration::ZERO,
            shared_ttl: Some(interval),
            stale_while_revalidate: Some(STALE_FOREVER),
            ..Default::default()
        }
    }

    /// Set stale-if-error window.
    pub fn with_stale_if_error(mut self, duration: Duration) -> Self {
        self.stale_if_error = Some(duration);
        self
    }

    /// Add a vary rule.
    pub fn vary_on(mut self, rule: VaryRule) -> Self {
        self.vary.push(rule);
        self
    }

    /// Add a cache tag for invalidation.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Generate Cache-Control header value.
    pub fn cache_control_header(&self) -> String {
        if !self.enabled || self.scope == CacheScope::None {
            return "no-store".to_string();
        }

        let mut parts = vec![self.scope.cache_control_directive().to_string()];

        parts.push(format!("max-age={}", self.ttl.as_secs()));

        // s-maxage is meaningless for private responses.
        if let (Some(shared), true) = (self.shared_ttl, self.scope.allows_cdn_caching()) {
            parts.push(format!("s-maxage={}", shared.as_secs()));
        }

        if let Some(swr) = self.stale_while_revalidate {
            parts.push(format!("stale-while-revalidate={}", swr.as_secs()));
        }

        if let Some(sie) = self.stale_if_error {
            parts.push(format!("stale-if-error={}", sie.as_secs()));
        }

        parts.join(", ")
    }

    /// Generate Vary header value.
    pub fn vary_header(&self) -> Option<String> {
        let mut headers: Vec<String> = Vec::new();
        for rule in &self.vary {
            let name = match rule {
                VaryRule::Header(h) => h.clone(),
                VaryRule::Cookie(_) => "Cookie".to_string(),
            };
            if !headers.iter().any(|h| h.eq_ignore_ascii_case(&name)) {
                headers.push(name);
            }
        }

        if headers.is_empty() {
            None
        } else {
            Some(headers.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EIGHT_HOURS: Duration = Duration::from_secs(28_800);

    fn cached(scope: CacheScope, ttl: Duration) -> RouteCachePolicy {
        RouteCachePolicy {
            enabled: true,
            scope,
            ttl,
            ..Default::default()
        }
    }

    #[test]
    fn test_none_policy_is_no_store() {
        assert_eq!(RouteCachePolicy::default().cache_control_header(), "no-store");
    }

    #[test]
    fn test_disabled_policy_is_no_store() {
        let mut policy = RouteCachePolicy::revalidate(EIGHT_HOURS);
        policy.enabled = false;
        assert_eq!(policy.cache_control_header(), "no-store");
    }

    #[test]
    fn test_public_policy_header() {
        let policy = RouteCachePolicy {
            stale_while_revalidate: Some(Duration::from_secs(60)),
            ..cached(CacheScope::Public, Duration::from_secs(300))
        };
        assert_eq!(
            policy.cache_control_header(),
            "public, max-age=300, stale-while-revalidate=60"
        );
    }

    #[test]
    fn test_revalidate_policy_header() {
        let policy = RouteCachePolicy::revalidate(EIGHT_HOURS)
            .with_stale_if_error(Duration::from_secs(86_400));
        assert_eq!(
            policy.cache_control_header(),
            "public, max-age=0, s-maxage=28800, stale-while-revalidate=31536000, stale-if-error=86400"
        );
        assert_eq!(policy.shared_ttl, Some(EIGHT_HOURS));
    }

    #[test]
    fn test_private_policy_drops_shared_ttl() {
        let policy = RouteCachePolicy {
            shared_ttl: Some(EIGHT_HOURS),
            ..cached(CacheScope::Private, Duration::from_secs(60))
        };
        assert_eq!(policy.cache_control_header(), "private, max-age=60");
    }

    #[test]
    fn test_vary_header_deduplicates() {
        let policy = RouteCachePolicy::revalidate(EIGHT_HOURS)
            .vary_on(VaryRule::header("Accept-Encoding"))
            .vary_on(VaryRule::Cookie("session".to_string()))
            .vary_on(VaryRule::Cookie("theme".to_string()))
            .vary_on(VaryRule::header("accept-encoding"));
        assert_eq!(policy.vary_header().as_deref(), Some("Accept-Encoding, Cookie"));
        assert_eq!(RouteCachePolicy::default().vary_header(), None);
    }

    #[test]
    fn test_policy_serializes_scope_lowercase() {
        let policy = RouteCachePolicy::revalidate(EIGHT_HOURS).with_tag("home");
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["scope"], "public");
        assert_eq!(json["tags"][0], "home");
        assert!(json.get("stale_if_error").is_none());
    }
}
