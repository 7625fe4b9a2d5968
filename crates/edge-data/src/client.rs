//! Base-URL bound fetch client.

use edge_core::RequestId;
use serde::de::DeserializeOwned;

use crate::transport::{FetchRequest, Transport};
use crate::{FetchError, Response};

/// Platform fetch client bound to one upstream API.
///
/// Every request is a GET against `base_url` joined with a path, with query
/// parameters percent-encoded in the order given.
pub struct FetchClient<T> {
    transport: T,
    base_url: String,
    request_id: Option<RequestId>,
    default_headers: Vec<(String, String)>,
}

impl<T: Transport> FetchClient<T> {
    /// Create a new fetch client.
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            request_id: None,
            default_headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Forward this request ID upstream as `x-request-id`.
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((key.into(), value.into()));
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for `path` and `query`.
    pub fn url_for(&self, path: &str, query: &[(&str, &str)]) -> Result<String, FetchError> {
        let base = self.base_url.trim_end_matches('/');
        let has_host = base
            .strip_prefix("https://")
            .or_else(|| base.strip_prefix("http://"))
            .map(|rest| !rest.is_empty())
            .unwrap_or(false);
        if !has_host {
            return Err(FetchError::InvalidUrl(self.base_url.clone()));
        }

        let mut url = format!("{}/{}", base, path.trim_start_matches('/'));
        if !query.is_empty() {
            let encoded: Vec<String> = query
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect();
            url.push('?');
            url.push_str(&encoded.join("&"));
        }
        Ok(url)
    }

    /// Issue a GET and fail on any non-2xx status.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Response, FetchError> {
        let url = self.url_for(path, query)?;

        let mut headers = self.default_headers.clone();
        if let Some(id) = &self.request_id {
            headers.push(("x-request-id".to_string(), id.to_string()));
        }

        let request = FetchRequest { url, headers };
        self.transport.send(&request).await?.error_for_status()
    }

    /// Issue a GET and decode the JSON body.
    ///
    /// A body declared as anything but JSON is rejected before decoding.
    pub async fn get_json<D: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<D, FetchError> {
        let response = self.get(path, query).await?;
        if !response.is_json() {
            return Err(FetchError::UnexpectedContentType {
                url: response.url.clone(),
                content_type: response.content_type().unwrap_or_default().to_string(),
            });
        }
        response.json()
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
