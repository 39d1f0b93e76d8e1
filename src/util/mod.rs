//! Host-environment utilities: durable storage, cookies, navigation, and
//! notifications.
//!
//! DESIGN
//! ======
//! Everything here is a seam. The networking and session layers only see
//! traits, so native tests run against in-memory fakes while the `browser`
//! feature wires in `localStorage`, `document.cookie`, and
//! `window.location`.

pub mod browser;
pub mod cookie;
pub mod notify;
pub mod storage;
