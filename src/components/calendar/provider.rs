//! Request bodies for a remote calendar provider's event-creation call.

use super::models::CalendarEvent;
use serde_json::{json, Value};

/// Body for a single event insert
pub fn event_body(event: &CalendarEvent, zone_name: &str) -> Value {
    json!({
        "summary": event.summary,
        "start": {
            "dateTime": event.start.to_rfc3339(),
            "timeZone": zone_name,
        },
        "end": {
            "dateTime": event.end.to_rfc3339(),
            "timeZone": zone_name,
        },
        "colorId": event.category.color_id(),
    })
}

/// One body per event, in the same order
pub fn event_bodies(events: &[CalendarEvent], zone_name: &str) -> Vec<Value> {
    events.iter().map(|e| event_body(e, zone_name)).collect()
}
