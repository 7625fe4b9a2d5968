//! Status, headers and body for a home page request.
//!
//! Everything here is independent of the Spin runtime: `handler` only turns
//! a [`PageResponse`] into an outgoing response and streams the page into its
//! body.

use std::fmt::Display;

use futures::Sink;

use edge_sdk::edge_cache::{etag_matches, generate_etag, header_names, CacheHeadersBuilder};
use edge_sdk::edge_core::{Method, RequestContext, WorkloadError};
use edge_sdk::edge_observability::StructuredLogger;
use edge_sdk::edge_streaming::StreamingSink;

use crate::config::SiteConfig;
use crate::data::{HomeProps, StaticProps};
use crate::page::HomePage;
use crate::player::PlayerContext;

/// Methods the home route answers.
pub const ALLOWED_METHODS: &str = "GET, HEAD";

pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// What to send back for one request.
#[derive(Debug)]
pub struct PageResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    /// Page to stream as the body. `None` when the response has no body.
    pub page: Option<HomePage>,
}

impl PageResponse {
    fn empty(status: u16, headers: Vec<(String, String)>) -> Self {
        Self {
            status,
            headers,
            page: None,
        }
    }

    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Answer methods other than GET and HEAD with 405, before any data is loaded.
pub fn reject_method(ctx: &RequestContext, logger: &StructuredLogger) -> Option<PageResponse> {
    if matches!(ctx.method, Method::Get | Method::Head) {
        return None;
    }

    logger
        .info_builder("Method not allowed")
        .field("method", ctx.method.as_str())
        .emit();
    let headers = vec![
        ("allow".to_string(), ALLOWED_METHODS.to_string()),
        request_id_header(ctx),
    ];
    Some(PageResponse::empty(405, headers))
}

/// Decide the response once the page props are loaded (or not).
///
/// A failed load is never cached: the CDN keeps serving its last good copy
/// under `stale-if-error`. A successful one is tagged with a strong ETag over
/// the exact bytes [`stream_page`] writes.
pub fn respond(
    ctx: &RequestContext,
    loaded: Result<StaticProps<HomeProps>, WorkloadError>,
    config: &SiteConfig,
    logger: &StructuredLogger,
) -> PageResponse {
    let loaded = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            logger
                .error_builder("Failed to load episodes")
                .field("api_base_url", config.api_base_url.as_str())
                .error(&e)
                .emit();
            let mut headers = CacheHeadersBuilder::new().cache_control("no-store").build();
            headers.push(request_id_header(ctx));
            return PageResponse::empty(502, headers);
        }
    };

    logger
        .info_builder("Episodes loaded")
        .field_u64("count", loaded.props.all_episodes.len() as u64)
        .duration_ms("revalidate_ms", loaded.revalidate)
        .emit();

    let page = HomePage::new(&loaded.props, &PlayerContext::default());
    let etag = generate_etag(&page.render());

    let mut headers = CacheHeadersBuilder::new()
        .cache_control_from_policy(&config.cache_policy(loaded.revalidate))
        .etag(etag.as_str())
        .build();
    headers.push(request_id_header(ctx));

    if ctx
        .header(header_names::IF_NONE_MATCH)
        .is_some_and(|value| etag_matches(value, &etag))
    {
        logger.info_builder("Not modified").field("etag", etag.as_str()).emit();
        return PageResponse::empty(304, headers);
    }

    headers.push(("content-type".to_string(), CONTENT_TYPE_HTML.to_string()));

    let head_only = ctx.method == Method::Head;
    logger
        .info_builder("Serving page")
        .field("etag", etag.as_str())
        .field_bool("head_only", head_only)
        .emit();

    PageResponse {
        status: 200,
        headers,
        page: (!head_only).then_some(page),
    }
}

/// Stream the shell, then every section in page order, then close the body.
pub async fn stream_page<S, E>(
    sink: &mut StreamingSink<S, E>,
    page: &HomePage,
    logger: &StructuredLogger,
) -> Result<(), WorkloadError>
where
    S: Sink<Vec<u8>, Error = E> + Unpin,
    E: Display,
{
    sink.send_shell(&page.shell_opening()).await?;
    logger.debug("Shell sent");

    for section in page.sections() {
        sink.send_section(section.name, &section.html).await?;
        logger
            .debug_builder("Section sent")
            .field("section", section.name)
            .field_u64("bytes", section.html.len() as u64)
            .emit();
    }
    sink.complete().await?;

    let timing = sink.timing();
    let mut summary = logger
        .info_builder("Page streamed")
        .field_u64("sections", sink.sections_sent().len() as u64)
        .field_u64("bytes", sink.bytes_sent() as u64)
        .duration_ms("total_ms", timing.elapsed());
    if let Some(ttfb) = timing.time_to_shell() {
        summary = summary.duration_ms("time_to_shell_ms", ttfb);
    }
    if let Some(first) = timing.time_to_first_section() {
        summary = summary.duration_ms("time_to_first_section_ms", first);
    }
    summary.emit();

    Ok(())
}

fn request_id_header(ctx: &RequestContext) -> (String, String) {
    (
        header_names::X_REQUEST_ID.to_string(),
        ctx.request_id.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::time::Duration;

    use edge_sdk::edge_core::{RequestId, TimingContext};
    use edge_sdk::edge_observability::LogLevel;
    use futures::executor::block_on;

    use super::*;
    use crate::data::fixtures::episode;

    fn ctx(method: Method) -> RequestContext {
        RequestContext::new(method, "/").with_header("X-Request-Id", "req-9")
    }

    fn logger() -> StructuredLogger {
        StructuredLogger::new(RequestId::from_string("req-9")).with_min_level(LogLevel::Error)
    }

    fn loaded() -> Result<StaticProps<HomeProps>, WorkloadError> {
        Ok(StaticProps {
            props: HomeProps::new(vec![episode("a", "First"), episode("b", "Second")], 2),
            revalidate: Duration::from_secs(28_800),
        })
    }

    fn failed() -> Result<StaticProps<HomeProps>, WorkloadError> {
        let cause = anyhow::anyhow!("connection refused").context("loading home page props");
        Err(WorkloadError::from(cause))
    }

    fn streamed(page: &HomePage) -> String {
        let mut sink: StreamingSink<Vec<Vec<u8>>, Infallible> =
            StreamingSink::new(Vec::new(), TimingContext::new());
        block_on(stream_page(&mut sink, page, &logger())).unwrap();
        let bytes: Vec<u8> = sink.into_inner().concat();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_get_and_head_are_allowed() {
        assert!(reject_method(&ctx(Method::Get), &logger()).is_none());
        assert!(reject_method(&ctx(Method::Head), &logger()).is_none());
    }

    #[test]
    fn test_other_methods_get_405() {
        for method in [Method::Post, Method::Put, Method::Delete, Method::Options] {
            let response = reject_method(&ctx(method), &logger()).unwrap();
            assert_eq!(response.status, 405);
            assert_eq!(response.header("allow"), Some("GET, HEAD"));
            assert_eq!(response.header("x-request-id"), Some("req-9"));
            assert!(response.page.is_none());
        }
    }

    #[test]
    fn test_load_failure_is_502_no_store() {
        let response = respond(&ctx(Method::Get), failed(), &SiteConfig::default(), &logger());
        assert_eq!(response.status, 502);
        assert_eq!(response.header("cache-control"), Some("no-store"));
        assert_eq!(response.header("x-request-id"), Some("req-9"));
        assert_eq!(response.header("etag"), None);
        assert!(response.page.is_none());
    }

    #[test]
    fn test_ok_response_headers() {
        let response = respond(&ctx(Method::Get), loaded(), &SiteConfig::default(), &logger());
        assert_eq!(response.status, 200);
        assert_eq!(
            response.header("cache-control"),
            Some("public, max-age=0, s-maxage=28800, stale-while-revalidate=31536000, stale-if-error=86400")
        );
        assert_eq!(response.header("vary"), Some("Accept-Encoding"));
        assert_eq!(response.header("x-cache-tags"), Some("episodes"));
        assert_eq!(response.header("content-type"), Some("text/html; charset=utf-8"));
        assert_eq!(response.header("x-request-id"), Some("req-9"));

        let etag = response.header("etag").unwrap();
        assert!(etag.starts_with('"') && etag.ends_with('"'));
        assert!(response.page.is_some());
    }

    #[test]
    fn test_etag_covers_streamed_bytes() {
        let response = respond(&ctx(Method::Get), loaded(), &SiteConfig::default(), &logger());
        let page = response.page.as_ref().unwrap();

        let body = streamed(page);
        assert_eq!(body, page.render());
        assert_eq!(
            response.header("etag"),
            Some(format!("\"{}\"", generate_etag(&body)).as_str())
        );
    }

    #[test]
    fn test_matching_if_none_match_is_304() {
        let first = respond(&ctx(Method::Get), loaded(), &SiteConfig::default(), &logger());
        let etag = first.header("etag").unwrap().to_string();

        let conditional = ctx(Method::Get).with_header("If-None-Match", format!("W/{etag}"));
        let response = respond(&conditional, loaded(), &SiteConfig::default(), &logger());
        assert_eq!(response.status, 304);
        assert_eq!(response.header("etag"), Some(etag.as_str()));
        assert!(response.header("cache-control").is_some());
        assert_eq!(response.header("content-type"), None);
        assert!(response.page.is_none());

        let stale = ctx(Method::Get).with_header("If-None-Match", "\"0000000000000000\"");
        assert_eq!(respond(&stale, loaded(), &SiteConfig::default(), &logger()).status, 200);
    }

    #[test]
    fn test_head_has_get_headers_and_no_body() {
        let get = respond(&ctx(Method::Get), loaded(), &SiteConfig::default(), &logger());
        let head = respond(&ctx(Method::Head), loaded(), &SiteConfig::default(), &logger());
        assert_eq!(head.status, 200);
        assert_eq!(head.headers, get.headers);
        assert!(head.page.is_none());
    }

    #[test]
    fn test_stream_page_order() {
        let page = respond(&ctx(Method::Get), loaded(), &SiteConfig::default(), &logger())
            .page
            .unwrap();
        let mut sink: StreamingSink<Vec<Vec<u8>>, Infallible> =
            StreamingSink::new(Vec::new(), TimingContext::new());
        block_on(stream_page(&mut sink, &page, &logger())).unwrap();

        assert_eq!(sink.sections_sent(), ["toggle", "latest", "all", "closing"]);
        assert!(sink.timing().has_mark("complete"));
        let chunks = sink.into_inner();
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0], page.shell_opening().into_bytes());
    }
}
