//! Shared client-side state.
//!
//! Only the session lives here; view state belongs to whichever UI layer
//! embeds this crate.

pub mod session;
