use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use schedule_snap::components::storage::{InMemoryStore, ScheduleStore, StoredSchedule};
use schedule_snap::components::extractor::extract_lines;
use schedule_snap::error::{storage_error, Error, ScheduleResult};
use schedule_snap::{DayLabel, EventCategory};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Mock of the Redis layout: JSON strings under per-week keys
#[derive(Debug, Clone, Default)]
pub struct MockRedisStore {
    data: Arc<Mutex<HashMap<String, String>>>,
}

impl MockRedisStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(user_id: &str, week: NaiveDate) -> String {
        format!("schedule_snap:schedule:{}:{}", user_id, week)
    }

    /// Raw value as it would sit in Redis
    pub async fn raw(&self, user_id: &str, week: NaiveDate) -> Option<String> {
        self.data.lock().await.get(&Self::key(user_id, week)).cloned()
    }
}

#[async_trait]
impl ScheduleStore for MockRedisStore {
    async fn save(&self, schedule: &StoredSchedule) -> ScheduleResult<()> {
        let json = serde_json::to_string(schedule)
            .map_err(|e| storage_error(&format!("Failed to serialize schedule: {e}")))?;
        let mut data = self.data.lock().await;
        data.insert(Self::key(&schedule.user_id, schedule.week_start_date), json);
        Ok(())
    }

    async fn get(&self, user_id: &str, week: NaiveDate) -> ScheduleResult<Option<StoredSchedule>> {
        let data = self.data.lock().await;
        match data.get(&Self::key(user_id, week)) {
            Some(json) => Ok(Some(serde_json::from_str(json)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, user_id: &str) -> ScheduleResult<Vec<StoredSchedule>> {
        let prefix = format!("schedule_snap:schedule:{}:", user_id);
        let data = self.data.lock().await;

        let mut schedules = data
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, json)| serde_json::from_str(json).map_err(Error::from))
            .collect::<ScheduleResult<Vec<StoredSchedule>>>()?;
        schedules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(schedules)
    }

    async fn delete(&self, user_id: &str, week: NaiveDate) -> ScheduleResult<bool> {
        let mut data = self.data.lock().await;
        Ok(data.remove(&Self::key(user_id, week)).is_some())
    }
}

fn week(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, day).unwrap()
}

/// Behavior every store must share
async fn exercise_store(store: Arc<dyn ScheduleStore>) {
    let mut older = StoredSchedule::new("alice", week(6), "w41.png", extract_lines(["Sat 8am-4pm"]));
    older.created_at -= Duration::days(7);
    let newer = StoredSchedule::new("alice", week(13), "w42.png", extract_lines(["Mon 2pm-10pm"]));

    store.save(&older).await.unwrap();
    store.save(&newer).await.unwrap();

    let listed = store.list("alice").await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].week_start_date, week(13));
    assert!(store.list("nobody").await.unwrap().is_empty());

    let found = store.get("alice", week(6)).await.unwrap().unwrap();
    assert_eq!(found, older);

    assert!(store.delete("alice", week(6)).await.unwrap());
    assert!(store.get("alice", week(6)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_in_memory_store_contract() {
    exercise_store(Arc::new(InMemoryStore::new())).await;
}

#[tokio::test]
async fn test_mock_redis_store_contract() {
    exercise_store(Arc::new(MockRedisStore::new())).await;
}

#[tokio::test]
async fn test_stored_schedule_feeds_calendar() {
    let store = MockRedisStore::new();
    let schedule = StoredSchedule::new(
        "alice",
        week(13),
        "w42.png",
        extract_lines(["Monday 13 2pm-10pm", "Tue Not Scheduled"]),
    );
    store.save(&schedule).await.unwrap();

    let raw = store.raw("alice", week(13)).await.unwrap();
    assert!(raw.contains("\"Mon\":\"2pm - 10pm\""));
    assert!(raw.contains("\"Tue\":\"Not Scheduled\""));

    let loaded = store.get("alice", week(13)).await.unwrap().unwrap();
    let events = loaded
        .weekly_schedule()
        .events(chrono_tz::America::Chicago)
        .unwrap();

    assert_eq!(events.len(), 7);
    let monday = events.iter().find(|e| e.day == DayLabel::Mon).unwrap();
    assert_eq!(monday.category, EventCategory::WorkShift);
    assert_eq!(monday.date, week(13));
    assert_eq!(
        events.iter().filter(|e| e.category == EventCategory::DayOff).count(),
        6
    );
}
