//! DataPipe-style upload of the final CSV document.
//!
//! One fire-and-forget POST at the end of a session. A transport failure
//! is an error; a reachable endpoint answering `success=false` is an
//! outcome, carried back as data so the caller can log it. Neither changes
//! the participant-visible flow.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::UploadError;

/// Default collection endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://pipe.jspsych.org/api/data/";

/// Experiment identifier registered with the collection service.
pub const DEFAULT_EXPERIMENT_ID: &str = "tBDDwCetE993";

#[derive(Debug, Serialize)]
struct SaveRequest<'a> {
    #[serde(rename = "experimentID")]
    experiment_id: &'a str,
    filename: &'a str,
    data: &'a str,
}

/// What the endpoint reported. `success=false` is logged, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Thin stateless client for the collection endpoint.
#[derive(Debug)]
pub struct DataPipeClient {
    endpoint: Url,
    experiment_id: String,
}

impl DataPipeClient {
    pub fn new(endpoint: &str, experiment_id: &str) -> Result<Self, UploadError> {
        let endpoint = Url::parse(endpoint).map_err(|e| UploadError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            endpoint,
            experiment_id: experiment_id.to_string(),
        })
    }

    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Upload one CSV document under the given filename.
    pub async fn save(&self, filename: &str, data: &str) -> Result<SaveOutcome, UploadError> {
        let body = SaveRequest {
            experiment_id: &self.experiment_id,
            filename,
            data,
        };
        let resp = reqwest::Client::new()
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let success = resp.status().is_success();
        let message = resp.text().await.ok().filter(|t| !t.is_empty());
        Ok(SaveOutcome { success, message })
    }
}

impl Default for DataPipeClient {
    fn default() -> Self {
        // The compiled-in defaults are known-valid URLs.
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is valid"),
            experiment_id: DEFAULT_EXPERIMENT_ID.to_string(),
        }
    }
}
