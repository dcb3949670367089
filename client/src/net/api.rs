//! REST client for the monitoring backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `reqwest::Client` with a fixed base URL and timeout. Two interceptors
//! wrap every call:
//! - request: attach `Authorization: Bearer <token>` when the session holds one;
//! - response: on 401, clear the session and send the navigator to `/login`.
//!
//! Operation groups in [`super::endpoints`] only pick a verb, a path and an
//! optional body or query, then hand the request to [`ApiClient::send`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;
use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::endpoints::{AnalysisApi, AuthApi, DevicesApi, MonitoringApi};
use super::error::{ApiError, error_message};
use crate::config::{ClientConfig, normalize_base_url};
use crate::router::{LOGIN_PATH, Navigator};
use crate::state::session::Session;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build the client from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not absolute or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ClientConfig, session: Session, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&config.base_url);
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidBaseUrl { url: base_url.clone(), reason: e.to_string() })?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ApiError::HttpClientBuild)?;

        Ok(Self { http, base_url, session, navigator })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    #[must_use]
    pub fn devices(&self) -> DevicesApi<'_> {
        DevicesApi::new(self)
    }

    #[must_use]
    pub fn monitoring(&self) -> MonitoringApi<'_> {
        MonitoringApi::new(self)
    }

    #[must_use]
    pub fn analysis(&self) -> AnalysisApi<'_> {
        AnalysisApi::new(self)
    }

    /// `GET /health` liveness probe.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable or answers non-2xx.
    pub async fn health(&self) -> Result<Value, ApiError> {
        self.send(self.request(Method::GET, "/health")).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request against `path`, with the bearer token attached when
    /// the session holds one.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "api request");
        let builder = self.http.request(method, self.endpoint(path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a prepared request and decode the JSON body.
    ///
    /// An empty success body decodes as JSON `null`. A 401 expires the
    /// session on its status alone, even if its body cannot be read.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            let message = match response.bytes().await {
                Ok(body) => error_message(status, &body),
                Err(e) => {
                    tracing::debug!(error = %e, "unreadable 401 body");
                    error_message(status, &[])
                }
            };
            self.expire_session(&message);
            return Err(ApiError::Unauthorized { message });
        }

        let body = response.bytes().await?;
        if !status.is_success() {
            let message = error_message(status, &body);
            tracing::debug!(status = status.as_u16(), %message, "api error response");
            return Err(ApiError::Status { status: status.as_u16(), message });
        }
        decode(&body)
    }

    fn expire_session(&self, reason: &str) {
        tracing::warn!(%reason, "backend rejected credentials; clearing session");
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear session after 401");
        }
        self.navigator.redirect(LOGIN_PATH);
    }
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let result = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_slice(body)
    };
    result.map_err(|e| ApiError::Decode(e.to_string()))
}
