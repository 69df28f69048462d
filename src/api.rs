// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Account, AccountCreate, AppState, ErrorResponse, Event, EventCreate};
use crate::utils::http_client;

/// Failures surfaced to the store. Beyond the message string no further
/// detail is available to callers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Network(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

/// The REST surface the client relies on. Object-safe so the store can
/// hold any backend; implementations are blocking and single-threaded.
pub trait BackendApi {
    fn app_state(&self) -> Result<AppState, ApiError>;
    fn accounts(&self) -> Result<Vec<Account>, ApiError>;
    fn create_account(&self, account: &AccountCreate) -> Result<Account, ApiError>;
    fn events(&self) -> Result<Vec<Event>, ApiError>;
    fn create_event(&self, event: &EventCreate) -> Result<Event, ApiError>;
    fn delete_event(&self, id: &str) -> Result<(), ApiError>;
}

pub type DynBackendApi = Box<dyn BackendApi>;

pub struct HttpBackend {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(HttpBackend {
            client: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn check_status(
    resp: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    // Error bodies are `{"error": "..."}`; anything else falls back to the
    // bare status.
    let message = resp
        .json::<ErrorResponse>()
        .map(|e| e.error)
        .unwrap_or_else(|_| format!("request failed with status {}", status));
    if status == reqwest::StatusCode::NOT_FOUND {
        Err(ApiError::NotFound(message))
    } else {
        Err(ApiError::Network(message))
    }
}

fn decode<T: DeserializeOwned>(resp: reqwest::blocking::Response) -> Result<T, ApiError> {
    Ok(check_status(resp)?.json()?)
}

impl BackendApi for HttpBackend {
    fn app_state(&self) -> Result<AppState, ApiError> {
        decode(self.client.get(self.url("/api/state")).send()?)
    }

    fn accounts(&self) -> Result<Vec<Account>, ApiError> {
        decode(self.client.get(self.url("/api/accounts")).send()?)
    }

    fn create_account(&self, account: &AccountCreate) -> Result<Account, ApiError> {
        decode(
            self.client
                .post(self.url("/api/accounts"))
                .json(account)
                .send()?,
        )
    }

    fn events(&self) -> Result<Vec<Event>, ApiError> {
        decode(self.client.get(self.url("/api/events")).send()?)
    }

    fn create_event(&self, event: &EventCreate) -> Result<Event, ApiError> {
        decode(
            self.client
                .post(self.url("/api/events"))
                .json(event)
                .send()?,
        )
    }

    fn delete_event(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/events/{}", id)))
            .send()?;
        check_status(resp)?;
        Ok(())
    }
}
