//! Cache response headers and conditional requests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::policy::RouteCachePolicy;

/// Header names, lowercase as Spin's `Fields` expects them.
pub mod header_names {
    pub const CACHE_CONTROL: &str = "cache-control";
    pub const VARY: &str = "vary";
    pub const ETAG: &str = "etag";
    pub const IF_NONE_MATCH: &str = "if-none-match";
    /// Cache tags for CDN invalidation.
    pub const X_CACHE_TAGS: &str = "x-cache-tags";
    /// Request ID for tracing.
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Builder for cache response headers.
#[derive(Debug, Default)]
pub struct CacheHeadersBuilder {
    cache_control: Option<String>,
    vary: Option<String>,
    etag: Option<String>,
    tags: Vec<String>,
}

impl CacheHeadersBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set Cache-Control header.
    pub fn cache_control(mut self, value: impl Into<String>) -> Self {
        self.cache_control = Some(value.into());
        self
    }

    /// Set Cache-Control, Vary and cache tags from a policy.
    pub fn cache_control_from_policy(mut self, policy: &RouteCachePolicy) -> Self {
        self.cache_control = Some(policy.cache_control_header());
        self.vary = policy.vary_header();
        self.tags = policy.tags.clone();
        self
    }

    /// Set ETag header from an already-computed tag (without quotes).
    pub fn etag(mut self, value: impl Into<String>) -> Self {
        self.etag = Some(value.into());
        self
    }

    /// Build the headers.
    pub fn build(self) -> Vec<(String, String)> {
        let mut headers = Vec::new();

        if let Some(cc) = self.cache_control {
            headers.push((header_names::CACHE_CONTROL.to_string(), cc));
        }

        if let Some(vary) = self.vary {
            headers.push((header_names::VARY.to_string(), vary));
        }

        if let Some(etag) = self.etag {
            headers.push((header_names::ETAG.to_string(), format!("\"{}\"", etag)));
        }

        if !self.tags.is_empty() {
            headers.push((header_names::X_CACHE_TAGS.to_string(), self.tags.join(", ")));
        }

        headers
    }
}

/// Generate a strong ETag (without quotes) from rendered content.
pub fn generate_etag(content: &str) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Check an `If-None-Match` header value against an ETag (without quotes).
///
/// Handles `*`, comma-separated lists and weak validators.
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    if_none_match.split(',').map(str::trim).any(|candidate| {
        if candidate == "*" {
            return true;
        }
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        candidate.trim_matches('"') == etag
    })
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::policy::VaryRule;

    #[test]
    fn test_builder_from_policy() {
        let policy = RouteCachePolicy::revalidate(Duration::from_secs(28_800))
            .vary_on(VaryRule::header("Accept-Encoding"))
            .with_tag("home")
            .with_tag("episodes");

        let headers = CacheHeadersBuilder::new()
            .cache_control_from_policy(&policy)
            .etag("abc")
            .build();

        let get = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str())
        };
        assert!(get("cache-control").unwrap().contains("s-maxage=28800"));
        assert_eq!(get("vary"), Some("Accept-Encoding"));
        assert_eq!(get("etag"), Some("\"abc\""));
        assert_eq!(get("x-cache-tags"), Some("home, episodes"));
    }

    #[test]
    fn test_builder_empty() {
        assert!(CacheHeadersBuilder::new().build().is_empty());
        let headers = CacheHeadersBuilder::new().cache_control("no-store").build();
        assert_eq!(headers, vec![("cache-control".to_string(), "no-store".to_string())]);
    }

    #[test]
    fn test_etag_is_stable_and_content_sensitive() {
        let a = generate_etag("<html>a</html>");
        assert_eq!(a, generate_etag("<html>a</html>"));
        assert_ne!(a, generate_etag("<html>b</html>"));
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_etag_matches() {
        assert!(etag_matches("\"abc\"", "abc"));
        assert!(etag_matches("W/\"abc\"", "abc"));
        assert!(etag_matches("\"x\", \"abc\"", "abc"));
        assert!(etag_matches("*", "abc"));
        assert!(!etag_matches("\"abd\"", "abc"));
        assert!(!etag_matches("", "abc"));
    }
}
