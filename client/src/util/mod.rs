//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure display helpers with no I/O, kept apart from the network and state
//! modules so views and the CLI can format backend payloads uniformly.

pub mod format;
