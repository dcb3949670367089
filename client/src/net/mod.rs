//! Networking modules for the monitoring REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` owns the HTTP client and its request/response interceptors,
//! `endpoints` maps operation groups onto verbs and paths, `error` is the
//! failure surface callers see, and `types` defines the typed payloads.

pub mod api;
pub mod endpoints;
pub mod error;
pub mod types;
