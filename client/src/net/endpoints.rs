//! Operation groups over [`ApiClient`].
//!
//! Each method maps one backend operation to a verb, a path and an optional
//! body or query. Responses are relayed as JSON except where the client needs
//! a typed field (the login token).

#[cfg(test)]
#[path = "endpoints_test.rs"]
mod endpoints_test;

use reqwest::Method;
use serde_json::Value;

use super::api::ApiClient;
use super::error::ApiError;
use super::types::{
    AlertQuery, CaptureRequest, Credentials, DeviceUpdate, HistoryQuery, LoginResponse, NewDevice, PacketQuery,
    RecordId, Registration, WindowQuery,
};

fn device_path(id: RecordId) -> String {
    format!("/devices/{id}")
}

fn resolve_alert_path(id: RecordId) -> String {
    format!("/monitoring/alerts/{id}/resolve")
}

// =============================================================================
// AUTH
// =============================================================================

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /auth/register`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn register(&self, body: &Registration) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/auth/register").json(body))
            .await
    }

    /// `POST /auth/login`. Storing the returned token is the caller's call;
    /// see [`Session::sign_in`](crate::state::session::Session::sign_in).
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures; a 401 here also clears any
    /// previously stored session.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/auth/login").json(credentials))
            .await
    }

    /// `GET /auth/me`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn current_user(&self) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, "/auth/me")).await
    }
}

// =============================================================================
// DEVICES
// =============================================================================

pub struct DevicesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> DevicesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /devices`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn list(&self) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, "/devices")).await
    }

    /// `GET /devices/{id}`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn get(&self, id: RecordId) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, &device_path(id))).await
    }

    /// `POST /devices`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn add(&self, device: &NewDevice) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/devices").json(device))
            .await
    }

    /// `PUT /devices/{id}`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn update(&self, id: RecordId, update: &DeviceUpdate) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::PUT, &device_path(id)).json(update))
            .await
    }

    /// `DELETE /devices/{id}`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn delete(&self, id: RecordId) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::DELETE, &device_path(id))).await
    }
}

// =============================================================================
// MONITORING
// =============================================================================

pub struct MonitoringApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MonitoringApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `GET /monitoring/traffic`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn traffic(&self) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, "/monitoring/traffic")).await
    }

    /// `GET /monitoring/system`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn system(&self) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, "/monitoring/system")).await
    }

    /// `POST /monitoring/speed-test`. Slow on the backend side; callers may
    /// want a longer timeout than the default.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn speed_test(&self) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/monitoring/speed-test"))
            .await
    }

    /// `GET /monitoring/history`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn history(&self, query: &HistoryQuery) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/monitoring/history").query(query))
            .await
    }

    /// `GET /monitoring/system-history`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn system_history(&self, query: &WindowQuery) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/monitoring/system-history").query(query))
            .await
    }

    /// `GET /monitoring/alerts`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn alerts(&self, query: &AlertQuery) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/monitoring/alerts").query(query))
            .await
    }

    /// `PUT /monitoring/alerts/{id}/resolve`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn resolve_alert(&self, id: RecordId) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::PUT, &resolve_alert_path(id)))
            .await
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

pub struct AnalysisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalysisApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `POST /analysis/capture`. The backend blocks until the capture
    /// finishes, so `timeout` should stay below the client timeout.
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn capture(&self, request: &CaptureRequest) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::POST, "/analysis/capture").json(request))
            .await
    }

    /// `GET /analysis/packets`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn packets(&self, query: &PacketQuery) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/analysis/packets").query(query))
            .await
    }

    /// `GET /analysis/stats`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn stats(&self, query: &WindowQuery) -> Result<Value, ApiError> {
        self.client
            .send(self.client.request(Method::GET, "/analysis/stats").query(query))
            .await
    }

    /// `GET /analysis/protocols`
    ///
    /// # Errors
    ///
    /// Propagates transport and status failures from [`ApiClient`].
    pub async fn protocols(&self) -> Result<Value, ApiError> {
        self.client.send(self.client.request(Method::GET, "/analysis/protocols")).await
    }
}
