//! Browser environment seam: cookie reads and the login redirect.
//!
//! SYSTEM CONTEXT
//! ==============
//! The HTTP client needs two things from its host environment: the CSRF
//! cookie for outgoing headers, and a way to force-navigate to `/login`
//! when the server invalidates the session. Both go through this trait so
//! tests can observe them without a real window.

#[cfg(feature = "browser")]
use crate::util::cookie::parse_cookie;

/// Host-environment capabilities the networking layer depends on.
pub trait Browser {
    /// Read a named cookie, if present.
    fn cookie(&self, name: &str) -> Option<String>;

    /// Hard-navigate to the login page. Full reload semantics: in-memory
    /// state does not survive this call in a real browser.
    fn redirect_to_login(&self);
}

/// A host with no cookies and nowhere to navigate. Used by native embeddings
/// that drive the client outside a browser.
#[derive(Debug, Default)]
pub struct NullBrowser;

impl Browser for NullBrowser {
    fn cookie(&self, _name: &str) -> Option<String> {
        None
    }

    fn redirect_to_login(&self) {}
}

/// The real browser window.
#[cfg(feature = "browser")]
#[derive(Debug, Default)]
pub struct WindowBrowser;

#[cfg(feature = "browser")]
impl Browser for WindowBrowser {
    fn cookie(&self, name: &str) -> Option<String> {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        let html_document = document.dyn_into::<web_sys::HtmlDocument>().ok()?;
        let cookies = html_document.cookie().ok()?;
        parse_cookie(&cookies, name)
    }

    fn redirect_to_login(&self) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href("/login");
        }
    }
}
