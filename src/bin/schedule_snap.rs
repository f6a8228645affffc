use chrono::Utc;
use clap::Parser;
use schedule_snap::cli::CliArgs;
use schedule_snap::components::calendar::ics;
use schedule_snap::components::detection::{HttpTextDetector, StaticDetector};
use schedule_snap::components::storage::{InMemoryStore, RedisStore, ScheduleStore, StoredSchedule};
use schedule_snap::components::regions::Detection;
use schedule_snap::error::Error;
use schedule_snap::pipeline::ScheduleParser;
use schedule_snap::startup;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = CliArgs::parse();

    startup::init_logging()?;
    let config = startup::load_config()?;
    let zone = config.zone()?;

    let shifts = if args.regions {
        let json = tokio::fs::read_to_string(&args.input)
            .await
            .map_err(Error::from)?;
        let detections: Vec<Detection> = serde_json::from_str(&json).map_err(Error::from)?;
        let parser = ScheduleParser::from_config(Arc::new(StaticDetector::default()), &config);
        parser.parse_detections(&detections)?
    } else {
        let image = tokio::fs::read(&args.input).await.map_err(Error::from)?;
        let detector = Arc::new(HttpTextDetector::from_config(&config)?);
        let parser = ScheduleParser::from_config(detector, &config);
        parser.parse_image(&image).await?
    };

    println!("Week of {}", args.week_start);
    print!("{}", shifts);

    // Persist, falling back to memory when Redis is unavailable
    let user_id = std::env::var("SCHEDULE_USER").unwrap_or_else(|_| "local".to_string());
    let store: Arc<dyn ScheduleStore> = match RedisStore::from_config(&config) {
        Ok(redis) => match redis.get_connection().await {
            Ok(_) => {
                info!("Connected to Redis successfully");
                Arc::new(redis)
            }
            Err(e) => {
                warn!("Failed to connect to Redis: {}", e);
                info!("Using in-memory store as fallback");
                Arc::new(InMemoryStore::new())
            }
        },
        Err(e) => {
            warn!("Failed to create Redis client: {}", e);
            Arc::new(InMemoryStore::new())
        }
    };

    let stored = StoredSchedule::new(
        user_id,
        args.week_start,
        args.input_file_name(),
        shifts,
    );
    store.save(&stored).await?;

    let events = stored.weekly_schedule().events(zone)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(ics::file_name(args.week_start)));

    tokio::fs::write(&output, ics::write_calendar(&events, Utc::now()))
        .await
        .map_err(Error::from)?;

    println!("Wrote {} events to {}", events.len(), output.display());
    Ok(())
}
