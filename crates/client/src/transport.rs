//! Delivery of one prediction request to the inference service.

use reqwest::Url;
use vetta_core::{PredictionRequest, PredictionResult};

use crate::error::PredictionError;

/// One round-trip to the inference service.
///
/// Implementations never retry; every failure is reported through the
/// [`PredictionError`] taxonomy.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait PredictionTransport {
    async fn send(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError>;
}

/// `POST`s the payload as JSON to a fixed endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(client: reqwest::Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl PredictionTransport for HttpTransport {
    async fn send(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PredictionError::Service {
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| PredictionError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| PredictionError::Parse(e.to_string()))
    }
}
