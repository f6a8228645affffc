use super::{sort_newest_first, ScheduleStore, StoredSchedule};
use crate::config::Config;
use crate::error::{storage_error, ScheduleResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use redis::{AsyncCommands, Client as RedisClient};
use tracing::info;

/// Redis keys
mod keys {
    pub const SCHEDULE_PREFIX: &str = "schedule_snap:schedule:";
    pub const WEEKS_PREFIX: &str = "schedule_snap:weeks:";
}

fn schedule_key(user_id: &str, week_start_date: NaiveDate) -> String {
    format!(
        "{}{}:{}",
        keys::SCHEDULE_PREFIX,
        user_id,
        week_start_date.format("%Y-%m-%d")
    )
}

fn weeks_key(user_id: &str) -> String {
    format!("{}{}", keys::WEEKS_PREFIX, user_id)
}

/// Member of the per-user week index
fn week_member(week_start_date: NaiveDate) -> String {
    week_start_date.format("%Y-%m-%d").to_string()
}

/// Record and index entry written in one transaction
fn save_pipeline(user_id: &str, week_start_date: NaiveDate, json: &str) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .set(schedule_key(user_id, week_start_date), json)
        .ignore()
        .sadd(weeks_key(user_id), week_member(week_start_date))
        .ignore();
    pipe
}

/// Record and index entry removed in one transaction; yields the DEL count
fn delete_pipeline(user_id: &str, week_start_date: NaiveDate) -> redis::Pipeline {
    let mut pipe = redis::pipe();
    pipe.atomic()
        .del(schedule_key(user_id, week_start_date))
        .srem(weeks_key(user_id), week_member(week_start_date))
        .ignore();
    pipe
}

/// Redis-backed schedule store. Each schedule is a JSON string; a set per
/// user indexes the stored weeks.
pub struct RedisStore {
    client: RedisClient,
}

impl RedisStore {
    pub fn new(redis_url: &str) -> ScheduleResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = RedisClient::open(redis_url)
            .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;

        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> ScheduleResult<Self> {
        Self::new(&config.redis_url)
    }

    /// Get a Redis connection from the client
    pub async fn get_connection(&self) -> ScheduleResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| storage_error(&format!("Failed to connect to Redis: {}", e)))
    }
}

#[async_trait]
impl ScheduleStore for RedisStore {
    async fn save(&self, schedule: &StoredSchedule) -> ScheduleResult<()> {
        let mut conn = self.get_connection().await?;

        let json = serde_json::to_string(schedule)?;
        save_pipeline(&schedule.user_id, schedule.week_start_date, &json)
            .query_async::<()>(&mut conn)
            .await?;

        info!(
            "Stored schedule for {} week of {}",
            schedule.user_id, schedule.week_start_date
        );
        Ok(())
    }

    async fn get(
        &self,
        user_id: &str,
        week_start_date: NaiveDate,
    ) -> ScheduleResult<Option<StoredSchedule>> {
        let mut conn = self.get_connection().await?;

        let data: Option<String> = conn.get(schedule_key(user_id, week_start_date)).await?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn list(&self, user_id: &str) -> ScheduleResult<Vec<StoredSchedule>> {
        let mut conn = self.get_connection().await?;

        let weeks: Vec<String> = conn.smembers(weeks_key(user_id)).await?;

        let mut schedules = Vec::with_capacity(weeks.len());
        for week in weeks {
            let Ok(date) = NaiveDate::parse_from_str(&week, "%Y-%m-%d") else {
                continue;
            };
            let data: Option<String> = conn.get(schedule_key(user_id, date)).await?;
            if let Some(json) = data {
                schedules.push(serde_json::from_str(&json)?);
            }
        }

        sort_newest_first(&mut schedules);
        Ok(schedules)
    }

    async fn delete(&self, user_id: &str, week_start_date: NaiveDate) -> ScheduleResult<bool> {
        let mut conn = self.get_connection().await?;

        let (removed,): (usize,) = delete_pipeline(user_id, week_start_date)
            .query_async(&mut conn)
            .await?;

        info!("Deleted schedule for {} week of {}", user_id, week_start_date);
        Ok(removed > 0)
    }
}
