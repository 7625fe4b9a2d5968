//! The network seam under `FetchClient`.

use async_trait::async_trait;

use crate::{FetchError, Response};

/// A fully-resolved outbound GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Absolute URL including the query string.
    pub url: String,
    /// Request headers, in insertion order.
    pub headers: Vec<(String, String)>,
}

impl FetchRequest {
    /// Get a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends a request and hands back whatever upstream answered.
///
/// Implementations must not interpret the status code; `FetchClient` does that.
/// Spin's outbound futures are not `Send`, hence `?Send`.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: &FetchRequest) -> Result<Response, FetchError>;
}

/// Transport backed by Spin's outbound HTTP.
///
/// The target host must be listed in the component's `allowed_outbound_hosts`,
/// otherwise every send fails with `FetchError::Request`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinTransport;

#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
impl Transport for SpinTransport {
    async fn send(&self, request: &FetchRequest) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method, Request};

        let mut builder = Request::builder();
        builder.method(Method::Get);
        builder.uri(request.url.as_str());
        for (key, value) in &request.headers {
            builder.header(key.as_str(), value.as_str());
        }
        let outgoing = builder.build();

        let resp: spin_sdk::http::Response =
            spin_sdk::http::send(outgoing)
                .await
                .map_err(|e| FetchError::Request {
                    url: request.url.clone(),
                    message: e.to_string(),
                })?;

        let status = *resp.status();
        // Non-UTF-8 header values are skipped.
        let headers = resp
            .headers()
            .filter_map(|(name, value)| {
                value.as_str().map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        Ok(Response::new(
            request.url.clone(),
            status,
            headers,
            resp.into_body(),
        ))
    }
}
