//! Region grouping: clusters detected fragments into reading-order rows.

pub mod models;

pub use models::{Detection, Row, TextRegion};

use crate::config::DEFAULT_Y_TOLERANCE;
use crate::error::ScheduleResult;
use tracing::debug;

/// Group regions into rows, top to bottom, each row left to right.
///
/// Regions are walked in vertical order. A region joins the open row when
/// its `y` differs from the last region added by less than `y_tolerance`;
/// otherwise the row is closed and a new one starts.
pub fn group_into_rows(regions: Vec<TextRegion>, y_tolerance: f64) -> Vec<Row> {
    let mut sorted = regions;
    sorted.sort_by(|a, b| a.y.total_cmp(&b.y));

    let mut rows = Vec::new();
    let mut current: Vec<TextRegion> = Vec::new();
    let mut last_y: Option<f64> = None;

    for region in sorted {
        let joins = last_y.is_some_and(|y| (region.y - y).abs() < y_tolerance);

        if !joins && !current.is_empty() {
            rows.push(Row::new(std::mem::take(&mut current)));
        }

        last_y = Some(region.y);
        current.push(region);
    }

    if !current.is_empty() {
        rows.push(Row::new(current));
    }

    debug!("Grouped fragments into {} rows", rows.len());
    rows
}

/// Group with the default tolerance
pub fn group_with_default_tolerance(regions: Vec<TextRegion>) -> Vec<Row> {
    group_into_rows(regions, DEFAULT_Y_TOLERANCE)
}

/// Convert raw detections and group them
pub fn rows_from_detections(detections: &[Detection], y_tolerance: f64) -> ScheduleResult<Vec<Row>> {
    let regions = detections
        .iter()
        .map(TextRegion::from_detection)
        .collect::<ScheduleResult<Vec<_>>>()?;

    Ok(group_into_rows(regions, y_tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(x: f64, y: f64, text: &str) -> TextRegion {
        TextRegion::new(x, y, 40.0, 18.0, text)
    }

    fn texts(rows: &[Row]) -> Vec<String> {
        rows.iter().map(Row::text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(group_into_rows(Vec::new(), 15.0).is_empty());
    }

    #[test]
    fn test_rows_in_reading_order() {
        let rows = group_with_default_tolerance(vec![
            region(200.0, 62.0, "3pm-11pm"),
            region(10.0, 10.0, "Mon"),
            region(10.0, 60.0, "Tue"),
            region(200.0, 12.0, "9am-5pm"),
            region(90.0, 8.0, "3"),
        ]);

        assert_eq!(texts(&rows), vec!["Mon 3 9am-5pm", "Tue 3pm-11pm"]);

        let xs: Vec<f64> = rows[0].regions().iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![10.0, 90.0, 200.0]);
    }

    #[test]
    fn test_stable_under_input_shuffle() {
        let ordered = vec![
            region(10.0, 10.0, "Wed"),
            region(60.0, 11.0, "5"),
            region(120.0, 12.0, "5am-1am"),
            region(10.0, 50.0, "Thu"),
        ];
        let mut shuffled = ordered.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);

        assert_eq!(
            texts(&group_into_rows(ordered, 15.0)),
            texts(&group_into_rows(shuffled, 15.0))
        );
    }

    #[test]
    fn test_tolerance_boundary_is_strict() {
        // Just inside the tolerance: same row
        let rows = group_into_rows(vec![region(0.0, 0.0, "a"), region(50.0, 14.9, "b")], 15.0);
        assert_eq!(texts(&rows), vec!["a b"]);

        // Exactly at the tolerance: new row
        let rows = group_into_rows(vec![region(0.0, 0.0, "a"), region(50.0, 15.0, "b")], 15.0);
        assert_eq!(texts(&rows), vec!["a", "b"]);
    }

    #[test]
    fn test_compares_against_last_region() {
        // Each step is within tolerance even though the ends are not
        let rows = group_into_rows(
            vec![
                region(0.0, 0.0, "a"),
                region(10.0, 10.0, "b"),
                region(20.0, 20.0, "c"),
            ],
            15.0,
        );
        assert_eq!(texts(&rows), vec!["a b c"]);
    }

    #[test]
    fn test_rows_from_detections() {
        let detections = vec![
            Detection {
                polygon: vec![[100.0, 5.0], [160.0, 5.0], [160.0, 25.0], [100.0, 25.0]],
                text: "2pm-10pm".to_string(),
                confidence: 0.9,
            },
            Detection {
                polygon: vec![[5.0, 3.0], [40.0, 3.0], [40.0, 24.0], [5.0, 24.0]],
                text: "Mon".to_string(),
                confidence: 0.99,
            },
        ];

        let rows = rows_from_detections(&detections, 15.0).unwrap();
        assert_eq!(texts(&rows), vec!["Mon 2pm-10pm"]);
    }
}
