use super::TextDetector;
use crate::components::regions::Detection;
use crate::config::Config;
use crate::error::{config_error, detection_error, ScheduleResult};
use async_trait::async_trait;
use base64::engine::{general_purpose::STANDARD, Engine};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct DetectionRequest {
    /// Base64-encoded image bytes
    image: String,
}

/// Client for a text detection service reachable over HTTP.
///
/// Posts `{"image": "<base64>"}` and expects a JSON array of
/// `{"box": [[x, y], ...], "text": "...", "confidence": 0.9}`.
pub struct HttpTextDetector {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpTextDetector {
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key,
        }
    }

    /// Build from the deployment configuration
    pub fn from_config(config: &Config) -> ScheduleResult<Self> {
        let url = config
            .detection_url
            .clone()
            .ok_or_else(|| config_error("DETECTION_URL is not set"))?;

        Ok(Self::new(url, config.detection_api_key.clone()))
    }
}

#[async_trait]
impl TextDetector for HttpTextDetector {
    async fn detect(&self, image: &[u8]) -> ScheduleResult<Vec<Detection>> {
        info!("Sending {} bytes to text detection at {}", image.len(), self.url);

        let body = DetectionRequest {
            image: STANDARD.encode(image),
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(detection_error(&format!(
                "Service returned {}: {}",
                status, error_text
            )));
        }

        let detections: Vec<Detection> = response.json().await?;
        info!("Text detection returned {} fragments", detections.len());

        Ok(detections)
    }
}
