//! Client layer for the netwatch network-monitoring backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns capture, monitoring and alerting. This crate is the thin
//! boundary in front of it: a route table with an auth guard, a REST client
//! that injects the bearer token and purges the session on 401, the session
//! storage both of them share, and display formatters.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use netwatch_client::config::ClientConfig;
//! use netwatch_client::net::api::ApiClient;
//! use netwatch_client::router::Router;
//! use netwatch_client::state::session::{MemoryStorage, Session};
//!
//! # async fn demo() -> Result<(), netwatch_client::net::error::ApiError> {
//! let session = Session::new(Arc::new(MemoryStorage::default()));
//! let router = Arc::new(Router::new(session.clone()));
//! let api = ApiClient::new(&ClientConfig::default(), session, router)?;
//! let devices = api.devices().list().await?;
//! println!("{devices}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;
