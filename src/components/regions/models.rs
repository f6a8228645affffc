use crate::error::{detection_error, ScheduleResult};
use serde::{Deserialize, Serialize};

/// A single record returned by the text detection service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Corner points, clockwise from the top-left
    #[serde(rename = "box")]
    pub polygon: Vec<[f64; 2]>,
    pub text: String,
    pub confidence: f64,
}

/// A recognized text fragment with its axis-aligned bounding box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub confidence: f64,
}

impl TextRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64, text: impl Into<String>) -> Self {
        Self {
            x,
            y,
            width,
            height,
            text: text.into(),
            confidence: 1.0,
        }
    }

    /// Derive the box from the first and third polygon corners
    pub fn from_detection(detection: &Detection) -> ScheduleResult<Self> {
        if detection.polygon.len() < 3 {
            return Err(detection_error(&format!(
                "Polygon for '{}' has {} corners, expected at least 3",
                detection.text,
                detection.polygon.len()
            )));
        }

        let [x0, y0] = detection.polygon[0];
        let [x2, y2] = detection.polygon[2];

        Ok(Self {
            x: x0,
            y: y0,
            width: x2 - x0,
            height: y2 - y0,
            text: detection.text.clone(),
            confidence: detection.confidence.clamp(0.0, 1.0),
        })
    }
}

/// Fragments sharing a line, ordered left to right
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    regions: Vec<TextRegion>,
}

impl Row {
    /// Build a row, sorting its members by horizontal position
    pub fn new(mut regions: Vec<TextRegion>) -> Self {
        regions.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { regions }
    }

    /// A row holding one fragment per string, laid out left to right
    pub fn from_texts<S: AsRef<str>>(texts: &[S]) -> Self {
        let regions = texts
            .iter()
            .enumerate()
            .map(|(i, text)| TextRegion::new(i as f64 * 100.0, 0.0, 90.0, 20.0, text.as_ref()))
            .collect();
        Self { regions }
    }

    pub fn regions(&self) -> &[TextRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Fragment texts joined by single spaces
    pub fn text(&self) -> String {
        self.regions
            .iter()
            .map(|r| r.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
