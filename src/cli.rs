use chrono::NaiveDate;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(
    name = "schedule_snap",
    about = "Read a weekly schedule screenshot and export it as calendar events",
    disable_help_subcommand = true
)]
pub struct CliArgs {
    /// Schedule screenshot, or a saved detection dump with --regions
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// First day of the week shown, as YYYY-MM-DD
    #[arg(value_name = "WEEK_START", value_parser = parse_week_start)]
    pub week_start: NaiveDate,

    /// Calendar file to write [default: schedule_<WEEK_START>.ics]
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Treat INPUT as a JSON detection dump and skip the detection service
    #[arg(long = "regions")]
    pub regions: bool,
}

impl CliArgs {
    /// File name recorded with the stored schedule
    pub fn input_file_name(&self) -> String {
        file_name(&self.input)
    }
}

fn parse_week_start(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
