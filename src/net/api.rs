//! REST API helpers for the hospital back end.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: calls fail with
//! [`FetchError::Unavailable`] since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every call returns a typed [`FetchError`] instead of swallowing failures,
//! so the session store and pages decide what the user sees.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::de::DeserializeOwned;

use super::types::{ApiEnvelope, Credentials, DoctorRecord, LoginResult, PatientRecord};
#[cfg(feature = "hydrate")]
use crate::config;

/// Message the back end returns when the signed-in user has no patient record yet.
pub const PATIENT_NOT_FOUND_MSG: &str = "未找到患者信息";

/// Request header carrying the session token.
pub const TOKEN_HEADER: &str = "token";

pub const LOGIN_ENDPOINT: &str = "/user/login";
pub const CURRENT_DOCTOR_ENDPOINT: &str = "/doctor/current";
pub const CURRENT_PATIENT_ENDPOINT: &str = "/patient/current";

/// Failure of a REST call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("api error {code}: {msg}")]
    Api { code: String, msg: String },
    #[error("record not found")]
    NotFound,
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("session changed before the response arrived")]
    Superseded,
    #[error("not available on server")]
    Unavailable,
}

/// Profile lookups for the signed-in account.
///
/// The session store only talks to the network through this trait so tests
/// can script responses.
#[allow(async_fn_in_trait)]
pub trait ProfileApi {
    /// Fetch the doctor record linked to the current token.
    async fn current_doctor(&self) -> Result<DoctorRecord, FetchError>;

    /// Fetch the patient record linked to the current token.
    ///
    /// Returns [`FetchError::NotFound`] when the account has no patient record.
    async fn current_patient(&self) -> Result<PatientRecord, FetchError>;
}

/// [`ProfileApi`] over HTTP, authenticated with the session token.
#[derive(Clone, Debug)]
pub struct HttpProfileApi {
    token: String,
}

impl HttpProfileApi {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }
}

impl ProfileApi for HttpProfileApi {
    async fn current_doctor(&self) -> Result<DoctorRecord, FetchError> {
        get_json(CURRENT_DOCTOR_ENDPOINT, &self.token).await
    }

    async fn current_patient(&self) -> Result<PatientRecord, FetchError> {
        get_json(CURRENT_PATIENT_ENDPOINT, &self.token).await
    }
}

/// Sign in via `POST /user/login`.
///
/// # Errors
///
/// Returns a [`FetchError`] if the request fails, the server rejects the
/// credentials (the envelope message is kept in [`FetchError::Api`]), or the
/// payload is not a user record.
pub async fn login(credentials: &Credentials) -> Result<LoginResult, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post(&config::api_url(LOGIN_ENDPOINT))
            .json(credentials)
            .map_err(|e| FetchError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let payload: serde_json::Value = decode_response(status, &body)?;
        LoginResult::from_payload(payload).map_err(|e| FetchError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = credentials;
        Err(FetchError::Unavailable)
    }
}

async fn get_json<T: DeserializeOwned>(endpoint: &str, token: &str) -> Result<T, FetchError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get(&config::api_url(endpoint))
            .header(TOKEN_HEADER, token)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode_response(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (endpoint, token);
        Err(FetchError::Unavailable)
    }
}

/// Decode an HTTP response carrying an [`ApiEnvelope`] into its `data` payload.
///
/// A 404 status or the patient-not-found message maps to
/// [`FetchError::NotFound`]; a successful envelope without `data` also counts
/// as not found.
///
/// # Errors
///
/// Returns the [`FetchError`] describing the first failure encountered.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, FetchError> {
    if status == 404 {
        return Err(FetchError::NotFound);
    }
    let envelope: ApiEnvelope = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(_) if !(200..300).contains(&status) => return Err(FetchError::Status(status)),
        Err(e) => return Err(FetchError::Decode(e.to_string())),
    };
    if !envelope.is_success() {
        return Err(classify_api_error(envelope.code, envelope.msg.unwrap_or_default()));
    }
    match envelope.data {
        None | Some(serde_json::Value::Null) => Err(FetchError::NotFound),
        Some(data) => serde_json::from_value(data).map_err(|e| FetchError::Decode(e.to_string())),
    }
}

fn classify_api_error(code: String, msg: String) -> FetchError {
    if msg.contains(PATIENT_NOT_FOUND_MSG) {
        FetchError::NotFound
    } else {
        FetchError::Api { code, msg }
    }
}
