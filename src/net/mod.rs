//! Networking: transport seam, response envelope, the authenticated HTTP
//! client, and typed endpoint wrappers.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` sends bytes, `envelope` defines the server's `{code, data,
//! msg}` convention, `api` is the single authenticated chokepoint, and
//! `booking` layers typed calls on top. Session semantics live in
//! `crate::state`.

pub mod api;
pub mod booking;
pub mod envelope;
pub mod transport;
pub mod types;
