//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

use dashboard_core::{GameStatus, MediaStatus, MediaType, Partition, Priority};

#[derive(Debug, Parser)]
#[command(
    name = "dashboard",
    version,
    about = "Terminal front-end for the personal tracker API"
)]
pub struct Cli {
    /// Configuration file (TOML). Defaults and DASHBOARD_* variables apply without one.
    #[arg(long, global = true, env = "DASHBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print Prometheus metrics to stderr on exit.
    #[arg(long, global = true)]
    pub metrics: bool,

    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the backend answers.
    Health,
    /// List the backend's geckodriver instances.
    Geckodrivers,
    #[command(subcommand)]
    Jobs(JobsCommand),
    #[command(subcommand)]
    Games(GamesCommand),
    #[command(subcommand)]
    Medias(MediasCommand),
}

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// Show all jobs, most recent first.
    List,
    /// Delete every job.
    Clear,
    /// Keep refreshing the job list until Ctrl-C.
    Watch {
        /// Seconds between refreshes; overrides the configured interval.
        #[arg(long)]
        interval: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum GamesCommand {
    List(ListArgs),
    Show { name: String },
    Delete { name: String },
    Add(GameArgs),
    Update(GameArgs),
    /// Add the game to the notion database instead of the tracker.
    NotionAdd(GameArgs),
}

#[derive(Debug, Subcommand)]
pub enum MediasCommand {
    List(ListArgs),
    Show { name: String },
    Delete { name: String },
    Add(MediaArgs),
    Update(MediaArgs),
    /// Add the media to the notion database instead of the tracker.
    NotionAdd(MediaArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Collection to list: all, in-progress (playing / watching-reading),
    /// to-be-released, not-started, finished, dropped.
    #[arg(long, default_value = "all", value_parser = parse_partition)]
    pub status: Partition,
}

#[derive(Debug, Args)]
pub struct GameArgs {
    /// Store page to scrape the game from.
    #[arg(long, default_value = "")]
    pub url: String,
    /// Game name; required by update and manual add.
    #[arg(long)]
    pub name: Option<String>,
    /// Add without scraping (needs --name).
    #[arg(long)]
    pub manual: bool,
    #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
    #[arg(long, value_enum, default_value_t = GameStatusArg::NotStarted)]
    pub status: GameStatusArg,
    #[arg(long, default_value_t = 0)]
    pub stars: u8,
    /// Purchased, or available on Game Pass.
    #[arg(long)]
    pub purchased: bool,
    #[arg(long, value_parser = parse_date)]
    pub started: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub finished: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub release_date: Option<NaiveDate>,
    #[arg(long)]
    pub commentary: Option<String>,
}

#[derive(Debug, Args)]
pub struct MediaArgs {
    #[arg(long, default_value = "")]
    pub url: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "type", value_enum, default_value_t = MediaTypeArg::Series)]
    pub media_type: MediaTypeArg,
    #[arg(long, value_enum, default_value_t = PriorityArg::Medium)]
    pub priority: PriorityArg,
    #[arg(long, value_enum, default_value_t = MediaStatusArg::NotStarted)]
    pub status: MediaStatusArg,
    #[arg(long, default_value_t = 0)]
    pub stars: u8,
    #[arg(long, value_parser = parse_date)]
    pub started: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    pub finished: Option<NaiveDate>,
    /// Only sent by update; adds take it from the scraped page.
    #[arg(long, value_parser = parse_date)]
    pub release_date: Option<NaiveDate>,
    #[arg(long)]
    pub commentary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GameStatusArg {
    ToBeReleased,
    NotStarted,
    Playing,
    Finished,
    Dropped,
}

impl From<GameStatusArg> for GameStatus {
    fn from(arg: GameStatusArg) -> Self {
        match arg {
            GameStatusArg::ToBeReleased => GameStatus::ToBeReleased,
            GameStatusArg::NotStarted => GameStatus::NotStarted,
            GameStatusArg::Playing => GameStatus::Playing,
            GameStatusArg::Finished => GameStatus::Finished,
            GameStatusArg::Dropped => GameStatus::Dropped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaStatusArg {
    NotStarted,
    ToBeReleased,
    WatchingReading,
    Finished,
    Dropped,
}

impl From<MediaStatusArg> for MediaStatus {
    fn from(arg: MediaStatusArg) -> Self {
        match arg {
            MediaStatusArg::NotStarted => MediaStatus::NotStarted,
            MediaStatusArg::ToBeReleased => MediaStatus::ToBeReleased,
            MediaStatusArg::WatchingReading => MediaStatus::WatchingReading,
            MediaStatusArg::Finished => MediaStatus::Finished,
            MediaStatusArg::Dropped => MediaStatus::Dropped,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaTypeArg {
    Series,
    Movie,
    Book,
    ComicBook,
}

impl From<MediaTypeArg> for MediaType {
    fn from(arg: MediaTypeArg) -> Self {
        match arg {
            MediaTypeArg::Series => MediaType::Series,
            MediaTypeArg::Movie => MediaType::Movie,
            MediaTypeArg::Book => MediaType::Book,
            MediaTypeArg::ComicBook => MediaType::ComicBook,
        }
    }
}

fn parse_partition(raw: &str) -> Result<Partition, String> {
    Partition::parse(raw).ok_or_else(|| format!("unknown collection '{raw}'"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
