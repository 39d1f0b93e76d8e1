//! The authenticated HTTP client: single chokepoint for all REST calls.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every outgoing request passes through here so the bearer token and CSRF
//! header are attached in exactly one place, and so a server-side session
//! invalidation is handled in exactly one place.
//!
//! ERROR HANDLING
//! ==============
//! A 2xx response yields the full `{code, data, msg}` envelope; callers
//! branch on `.code`. Non-2xx yields `ApiError::Status`; the only special
//! case is a 401 whose body carries the envelope marker `code: 401` — that
//! clears the stored access token and force-navigates to `/login`. Nothing
//! is ever retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::rc::Rc;

use crate::net::envelope::Envelope;
use crate::net::transport::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, percent_encode,
};
use crate::util::browser::Browser;
use crate::util::storage::{SessionStore, keys};

/// Cookie the backend sets for CSRF protection; echoed back as `X-CSRFTOKEN`.
pub const CSRF_COOKIE: &str = "csrftoken";

/// API origin, overridable at build time.
pub fn default_base_url() -> &'static str {
    option_env!("VOYAGO_API_BASE_URL").unwrap_or("http://localhost:8000")
}

/// Authenticated REST client for the booking backend.
pub struct ApiClient {
    base_url: String,
    transport: Rc<dyn Transport>,
    store: Rc<dyn SessionStore>,
    browser: Rc<dyn Browser>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        transport: Rc<dyn Transport>,
        store: Rc<dyn SessionStore>,
        browser: Rc<dyn Browser>,
    ) -> Self {
        Self { base_url: base_url.into(), transport, store, browser }
    }

    /// Client wired to the real browser: `gloo-net` transport, cookie and
    /// location access through the window, default base URL.
    #[cfg(feature = "browser")]
    pub fn in_browser(store: Rc<dyn SessionStore>) -> Self {
        Self::new(
            default_base_url(),
            Rc::new(crate::net::transport::GlooTransport),
            store,
            Rc::new(crate::util::browser::WindowBrowser),
        )
    }

    /// GET with optional query parameters.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<Envelope, ApiError> {
        self.send(HttpMethod::Get, path, params, None).await
    }

    /// POST a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn post(&self, path: &str, body: serde_json::Value) -> Result<Envelope, ApiError> {
        self.send(HttpMethod::Post, path, &[], Some(RequestBody::Json(body))).await
    }

    /// POST form-urlencoded fields. Only the token endpoint uses this shape.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<Envelope, ApiError> {
        let fields = fields
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        self.send(HttpMethod::Post, path, &[], Some(RequestBody::Form(fields))).await
    }

    /// PUT a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn put(&self, path: &str, body: serde_json::Value) -> Result<Envelope, ApiError> {
        self.send(HttpMethod::Put, path, &[], Some(RequestBody::Json(body))).await
    }

    /// PATCH a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn patch(&self, path: &str, body: serde_json::Value) -> Result<Envelope, ApiError> {
        self.send(HttpMethod::Patch, path, &[], Some(RequestBody::Json(body))).await
    }

    /// DELETE.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a non-2xx status.
    pub async fn delete(&self, path: &str) -> Result<Envelope, ApiError> {
        self.send(HttpMethod::Delete, path, &[], None).await
    }

    async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        params: &[(&str, &str)],
        body: Option<RequestBody>,
    ) -> Result<Envelope, ApiError> {
        // Token and cookie are read per call, never cached, so a token
        // update mid-session takes effect on the very next request.
        let token = self.store.get(keys::ACCESS_TOKEN);
        let csrf = self.browser.cookie(CSRF_COOKIE);
        let request = HttpRequest {
            method,
            url: join_url(&self.base_url, path, params),
            headers: build_headers(token.as_deref(), csrf.as_deref(), body.as_ref()),
            body,
        };
        let response = self.transport.send(request).await?;
        self.unwrap_response(&response)
    }

    fn unwrap_response(&self, response: &HttpResponse) -> Result<Envelope, ApiError> {
        let envelope = serde_json::from_str::<Envelope>(&response.body).ok();
        if (200..300).contains(&response.status) {
            return envelope
                .ok_or_else(|| ApiError::Decode("response was not a {code, data, msg} envelope".to_owned()));
        }
        if response.status == 401 && envelope.as_ref().is_some_and(|e| e.code == 401) {
            // The envelope marker distinguishes a dead session from a
            // transient 401 on an unrelated endpoint. Only the former tears
            // the session down; the failed restore after reload purges the
            // remaining keys.
            self.store.remove(keys::ACCESS_TOKEN);
            log::warn!("session rejected by server, returning to login");
            self.browser.redirect_to_login();
        }
        Err(ApiError::Status { status: response.status, envelope })
    }
}

fn build_headers(
    token: Option<&str>,
    csrf: Option<&str>,
    body: Option<&RequestBody>,
) -> Vec<(String, String)> {
    let mut headers = vec![("Accept".to_owned(), "application/json".to_owned())];
    if let Some(token) = token {
        headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
    }
    if let Some(csrf) = csrf {
        headers.push(("X-CSRFTOKEN".to_owned(), csrf.to_owned()));
    }
    match body {
        Some(RequestBody::Json(_)) => {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        Some(RequestBody::Form(_)) => {
            headers.push((
                "Content-Type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            ));
        }
        None => {}
    }
    headers
}

fn join_url(base: &str, path: &str, params: &[(&str, &str)]) -> String {
    let mut url = format!("{}{path}", base.trim_end_matches('/'));
    if !params.is_empty() {
        let query: Vec<String> = params
            .iter()
            .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
            .collect();
        url.push('?');
        url.push_str(&query.join("&"));
    }
    url
}
