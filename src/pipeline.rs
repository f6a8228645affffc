//! End-to-end parse of a schedule screenshot.

use crate::components::detection::{validate_image, TextDetector};
use crate::components::extractor::{self, ShiftTable};
use crate::components::regions::{self, Detection};
use crate::config::Config;
use crate::error::{Error, ScheduleResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Runs detection, row grouping and extraction for one image at a time.
/// Holds no per-parse state, so one parser can serve concurrent calls.
#[derive(Clone)]
pub struct ScheduleParser {
    detector: Arc<dyn TextDetector>,
    y_tolerance: f64,
    timeout: Duration,
}

impl ScheduleParser {
    pub fn new(detector: Arc<dyn TextDetector>, y_tolerance: f64, timeout: Duration) -> Self {
        Self {
            detector,
            y_tolerance,
            timeout,
        }
    }

    pub fn from_config(detector: Arc<dyn TextDetector>, config: &Config) -> Self {
        Self::new(
            detector,
            config.y_tolerance,
            Duration::from_secs(config.detection_timeout_secs),
        )
    }

    /// Parse a screenshot into a shift table. Any failure of the image or
    /// the detection service fails the whole parse.
    pub async fn parse_image(&self, image: &[u8]) -> ScheduleResult<ShiftTable> {
        validate_image(image)?;

        let detections = tokio::time::timeout(self.timeout, self.detector.detect(image))
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_secs()))??;

        self.parse_detections(&detections)
    }

    /// Group and extract already-detected fragments
    pub fn parse_detections(&self, detections: &[Detection]) -> ScheduleResult<ShiftTable> {
        let rows = regions::rows_from_detections(detections, self.y_tolerance)?;

        for (i, row) in rows.iter().enumerate() {
            let lowest = row
                .regions()
                .iter()
                .map(|r| r.confidence)
                .fold(1.0_f64, f64::min);
            debug!("Row {}: {} (lowest confidence {:.2})", i, row.text(), lowest);
        }

        let table = extractor::extract(&rows);
        info!(
            "Parsed {} fragments into {} rows and {} shifts",
            detections.len(),
            rows.len(),
            table.shift_count()
        );

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::detection::StaticDetector;
    use crate::components::extractor::DayLabel;

    fn detection(x: f64, y: f64, text: &str) -> Detection {
        Detection {
            polygon: vec![[x, y], [x + 50.0, y], [x + 50.0, y + 20.0], [x, y + 20.0]],
            text: text.to_string(),
            confidence: 0.9,
        }
    }

    fn parser() -> ScheduleParser {
        ScheduleParser::new(
            Arc::new(StaticDetector::default()),
            15.0,
            Duration::from_secs(5),
        )
    }

    #[test]
    fn test_parse_detections() {
        let detections = vec![
            detection(200.0, 10.0, "2pm-10pm"),
            detection(10.0, 12.0, "Mon"),
            detection(60.0, 8.0, "3"),
            detection(60.0, 60.0, "4"),
            detection(200.0, 61.0, "2pm-10pm"),
        ];

        let table = parser().parse_detections(&detections).unwrap();
        assert_eq!(table.get(DayLabel::Mon).to_string(), "2pm - 10pm");
        assert_eq!(table.get(DayLabel::Tue).to_string(), "2pm - 10pm");
        assert!(table.get(DayLabel::Wed).is_day_off());
    }

    #[test]
    fn test_malformed_detection_fails() {
        let mut bad = detection(0.0, 0.0, "Mon");
        bad.polygon.truncate(2);
        assert!(parser().parse_detections(&[bad]).is_err());
    }

    #[tokio::test]
    async fn test_invalid_image_fails_before_detection() {
        let result = parser().parse_image(b"definitely not an image").await;
        assert!(matches!(result, Err(Error::Image(_))));
    }
}
