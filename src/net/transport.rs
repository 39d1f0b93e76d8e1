//! Transport seam beneath the HTTP client.
//!
//! DESIGN
//! ======
//! The client builds a fully-described `HttpRequest` (method, url, headers,
//! body) and hands it to a `Transport`. The browser implementation sends it
//! with `gloo-net`; tests send it nowhere and script the response. The
//! transport never retries and never interprets status codes.

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;

use async_trait::async_trait;

use crate::net::envelope::Envelope;

/// Fixed overall request timeout. There is no per-call override and no
/// cancellation; a call that outlives this fails as a transport error.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Outgoing request body.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

impl RequestBody {
    /// Serialize to the on-wire string matching the body's content type.
    pub fn encode(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Form(fields) => fields
                .iter()
                .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
                .collect::<Vec<_>>()
                .join("&"),
        }
    }
}

/// A request as handed to the transport. Headers are already complete;
/// the transport adds nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// A raw transport-level response: status plus unparsed body text.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Error surface of the client. `Network` means the request never produced
/// an HTTP response; `Status` carries the failed response and whatever
/// envelope could be read from its body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request failed with status {status}")]
    Status { status: u16, envelope: Option<Envelope> },

    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Sends one prepared request and yields the raw response.
#[async_trait(?Send)]
pub trait Transport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

/// Percent-encode for query strings and form bodies. Unreserved characters
/// pass through; everything else becomes `%XX` per UTF-8 byte.
pub(crate) fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Browser transport backed by `gloo-net`, with the fixed overall timeout.
#[cfg(feature = "browser")]
#[derive(Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "browser")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        use futures::future::{Either, select};
        use std::pin::pin;

        let fetch = pin!(send_via_gloo(request));
        let timeout = pin!(gloo_timers::future::TimeoutFuture::new(REQUEST_TIMEOUT_MS));
        match select(fetch, timeout).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => Err(ApiError::Network("request timed out".to_owned())),
        }
    }
}

#[cfg(feature = "browser")]
async fn send_via_gloo(request: HttpRequest) -> Result<HttpResponse, ApiError> {
    use gloo_net::http::{Method, RequestBuilder};

    let method = match request.method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    };

    let mut builder = RequestBuilder::new(&request.url).method(method);
    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }

    let prepared = match &request.body {
        Some(body) => builder.body(body.encode()),
        None => builder.build(),
    }
    .map_err(|err| ApiError::Network(err.to_string()))?;

    let response = prepared
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Ok(HttpResponse { status, body })
}
