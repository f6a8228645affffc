//! Boundary to the external text detection service.

mod http;
pub mod validation;

pub use self::http::HttpTextDetector;
pub use self::validation::{validate_image, ImageInfo};

use crate::components::regions::Detection;
use crate::error::ScheduleResult;
use async_trait::async_trait;

/// Anything that turns image bytes into recognized text fragments
#[async_trait]
pub trait TextDetector: Send + Sync + 'static {
    /// Detect every text fragment in the image. Order is not significant.
    async fn detect(&self, image: &[u8]) -> ScheduleResult<Vec<Detection>>;
}

/// Detector that returns a fixed set of fragments, for offline runs
#[derive(Debug, Clone, Default)]
pub struct StaticDetector {
    detections: Vec<Detection>,
}

impl StaticDetector {
    pub fn new(detections: Vec<Detection>) -> Self {
        Self { detections }
    }

    /// Load a detection dump saved as JSON
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl TextDetector for StaticDetector {
    async fn detect(&self, _image: &[u8]) -> ScheduleResult<Vec<Detection>> {
        Ok(self.detections.clone())
    }
}
