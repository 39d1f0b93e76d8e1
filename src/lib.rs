//! # voyago-client
//!
//! Client core for the Voyago travel-booking single-page app: the
//! authenticated HTTP client and the session lifecycle (login, register,
//! logout, cold-start restore). View components consume this crate and are
//! not part of it.
//!
//! The `browser` feature wires in the real environment (`gloo-net`,
//! `localStorage`, `document.cookie`, `window.location`); without it the
//! crate compiles natively and runs its test suite against injected fakes.

pub mod net;
pub mod state;
pub mod util;

/// Route log output to the browser console. Call once at startup.
#[cfg(feature = "browser")]
pub fn init_logging() {
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Build the session manager wired to the real browser environment.
#[cfg(feature = "browser")]
pub fn browser_session() -> std::rc::Rc<state::session::SessionManager> {
    use std::rc::Rc;

    let store: Rc<dyn util::storage::SessionStore> = Rc::new(util::storage::LocalStore);
    let api = Rc::new(net::api::ApiClient::in_browser(Rc::clone(&store)));
    Rc::new(state::session::SessionManager::new(
        api,
        store,
        Rc::new(util::notify::LogNotifier),
    ))
}
