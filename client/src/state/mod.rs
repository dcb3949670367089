//! Client-side state shared across the router and the API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! `session` is the only mutable state in the crate: the stored token and
//! user record, behind a storage trait with memory and file backends.

pub mod session;
