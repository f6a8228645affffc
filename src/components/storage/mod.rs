//! Persistence of parsed weekly schedules, keyed by user and week start.

mod redis_store;

pub use redis_store::RedisStore;

use crate::components::calendar::WeeklySchedule;
use crate::components::extractor::ShiftTable;
use crate::error::ScheduleResult;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// A parsed schedule as it is stored. `parsed_data` is written as plain
/// text entries ("9am - 5pm", "Not Scheduled").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSchedule {
    pub user_id: String,
    pub week_start_date: NaiveDate,
    pub image_filename: String,
    pub parsed_data: ShiftTable,
    pub created_at: DateTime<Utc>,
}

impl StoredSchedule {
    pub fn new(
        user_id: impl Into<String>,
        week_start_date: NaiveDate,
        image_filename: impl Into<String>,
        parsed_data: ShiftTable,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            week_start_date,
            image_filename: image_filename.into(),
            parsed_data,
            created_at: Utc::now(),
        }
    }

    /// The schedule anchored to its week, ready for event generation
    pub fn weekly_schedule(&self) -> WeeklySchedule {
        WeeklySchedule::new(self.week_start_date, self.parsed_data.clone())
    }
}

/// Storage for parsed schedules
#[async_trait]
pub trait ScheduleStore: Send + Sync + 'static {
    /// Store a schedule, replacing any earlier one for the same user and week
    async fn save(&self, schedule: &StoredSchedule) -> ScheduleResult<()>;

    /// Get the schedule for a user's week
    async fn get(
        &self,
        user_id: &str,
        week_start_date: NaiveDate,
    ) -> ScheduleResult<Option<StoredSchedule>>;

    /// All schedules of a user, newest first
    async fn list(&self, user_id: &str) -> ScheduleResult<Vec<StoredSchedule>>;

    /// Delete a user's week. Returns whether anything was removed.
    async fn delete(&self, user_id: &str, week_start_date: NaiveDate) -> ScheduleResult<bool>;
}

/// Newest `created_at` first
pub(crate) fn sort_newest_first(schedules: &mut [StoredSchedule]) {
    schedules.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// In-memory implementation of the store
#[derive(Debug, Default)]
pub struct InMemoryStore {
    schedules: RwLock<HashMap<(String, NaiveDate), StoredSchedule>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScheduleStore for InMemoryStore {
    async fn save(&self, schedule: &StoredSchedule) -> ScheduleResult<()> {
        let mut schedules = self.schedules.write().await;
        schedules.insert(
            (schedule.user_id.clone(), schedule.week_start_date),
            schedule.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        user_id: &str,
        week_start_date: NaiveDate,
    ) -> ScheduleResult<Option<StoredSchedule>> {
        let schedules = self.schedules.read().await;
        Ok(schedules
            .get(&(user_id.to_string(), week_start_date))
            .cloned())
    }

    async fn list(&self, user_id: &str) -> ScheduleResult<Vec<StoredSchedule>> {
        let schedules = self.schedules.read().await;
        let mut found: Vec<StoredSchedule> = schedules
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut found);
        Ok(found)
    }

    async fn delete(&self, user_id: &str, week_start_date: NaiveDate) -> ScheduleResult<bool> {
        let mut schedules = self.schedules.write().await;
        Ok(schedules
            .remove(&(user_id.to_string(), week_start_date))
            .is_some())
    }
}
