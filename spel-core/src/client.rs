//! HTTP client for the remote expression evaluation service.
//!
//! The service is opaque: it receives the expression together with the
//! variable bindings and answers with a result string or an error.

use log::{error, info};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::EvaluatorConfig;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Server error: {status}")]
    ServerError { status: u16 },
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub expression: String,
    /// Null bindings serialize as JSON `null`.
    pub keys: BTreeMap<String, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    pub result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResponse {
    /// The response shown to the user when the service could not be reached.
    pub fn connection_failure(err: &ClientError) -> Self {
        Self {
            result: String::new(),
            error: Some(format!("Failed to connect to the server: {}", err)),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct EvaluationClient {
    client: Client,
    url: String,
}

impl EvaluationClient {
    pub fn new(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.to_string(),
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Submit one request. There is no retry; a second call while the first
    /// is outstanding is simply a second request.
    pub async fn evaluate(&self, request: &EvaluationRequest) -> Result<EvaluationResponse> {
        info!(
            "submitting expression with {} variable(s) to {}",
            request.keys.len(),
            self.url
        );

        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            error!("evaluation service returned {}", status);
            return Err(ClientError::ServerError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let decoded: EvaluationResponse = serde_json::from_str(&body)?;
        Ok(decoded)
    }
}
