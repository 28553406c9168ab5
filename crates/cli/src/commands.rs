//! Command dispatch.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use tokio::signal;
use tracing::info;

use dashboard_core::{
    render_jobs, Config, GameProperties, JobPoller, MediaProperties, NotionGameProperties,
    TrackerClient, UpdateMediaProperties,
};

use crate::cli::{
    Command, GameArgs, GamesCommand, JobsCommand, MediaArgs, MediasCommand, OutputFormat,
};
use crate::output::{self, TerminalSink};

pub async fn dispatch(
    command: Command,
    client: &TrackerClient,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    match command {
        Command::Health => {
            let text = client.health_check().await?;
            println!("{text}");
        }
        Command::Geckodrivers => {
            let addresses = client.get_geckodriver_addresses().await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&addresses)?),
                OutputFormat::Table => addresses.iter().for_each(|a| println!("{a}")),
            }
        }
        Command::Jobs(command) => jobs(command, client, config, format).await?,
        Command::Games(command) => games(command, client, format).await?,
        Command::Medias(command) => medias(command, client, format).await?,
    }
    Ok(())
}

async fn jobs(
    command: JobsCommand,
    client: &TrackerClient,
    config: &Config,
    format: OutputFormat,
) -> Result<()> {
    match command {
        JobsCommand::List => {
            let jobs = client.get_all_jobs().await?;
            output::render_job_views(&render_jobs(&jobs), format)?;
        }
        JobsCommand::Clear => {
            client.delete_all_jobs().await?;
            println!("All jobs deleted");
        }
        JobsCommand::Watch { interval } => {
            let interval = match interval {
                Some(0) => bail!("--interval must be at least 1 second"),
                Some(seconds) => Duration::from_secs(seconds),
                None => config.poller.interval(),
            };

            let poller = client.job_poller(Arc::new(TerminalSink::new(format)));
            watch_until(&poller, interval, signal::ctrl_c()).await?;
        }
    }
    Ok(())
}

/// Poll until `shutdown` resolves. The poller is stopped even when
/// waiting for the shutdown signal fails.
async fn watch_until(
    poller: &JobPoller,
    interval: Duration,
    shutdown: impl Future<Output = io::Result<()>>,
) -> Result<()> {
    poller.start(interval).await;
    let signal = shutdown.await;
    info!("Stopping job watch");
    poller.stop().await;
    signal.context("failed to listen for Ctrl-C")
}

async fn games(command: GamesCommand, client: &TrackerClient, format: OutputFormat) -> Result<()> {
    match command {
        GamesCommand::List(args) => {
            let games = client.get_games(args.status).await?;
            output::render_games(&games, format)?;
        }
        GamesCommand::Show { name } => {
            let game = client.get_game(&name).await?;
            output::render_game(&game, format)?;
        }
        GamesCommand::Delete { name } => {
            let outcome = client.delete_game(&name).await?;
            output::render_outcome(&format!("delete '{name}'"), &outcome);
        }
        GamesCommand::Add(args) => {
            let manual = args.manual;
            if manual && args.name.is_none() {
                bail!("--manual requires --name");
            }
            if !manual && args.url.is_empty() {
                bail!("--url is required unless --manual is set");
            }
            let props = game_properties(args);
            let outcome = if manual {
                client.add_game_manually(&props).await?
            } else {
                client.add_game(&props).await?
            };
            output::render_outcome("add game", &outcome);
        }
        GamesCommand::Update(args) => {
            if args.name.is_none() {
                bail!("update requires --name");
            }
            let outcome = client.update_game(&game_properties(args)).await?;
            output::render_outcome("update game", &outcome);
        }
        GamesCommand::NotionAdd(args) => {
            let props = game_properties(args);
            let notion = NotionGameProperties::from_tracker(&props)
                .context("game priority or status has no notion label")?;
            client.notion_add_game(&notion).await?;
            println!("add game to notion: done");
        }
    }
    Ok(())
}

async fn medias(command: MediasCommand, client: &TrackerClient, format: OutputFormat) -> Result<()> {
    match command {
        MediasCommand::List(args) => {
            let medias = client.get_medias(args.status).await?;
            output::render_medias(&medias, format)?;
        }
        MediasCommand::Show { name } => {
            let media = client.get_media(&name).await?;
            output::render_media(&media, format)?;
        }
        MediasCommand::Delete { name } => {
            let outcome = client.delete_media(&name).await?;
            output::render_outcome(&format!("delete '{name}'"), &outcome);
        }
        MediasCommand::Add(args) => {
            if args.url.is_empty() {
                bail!("--url is required");
            }
            let outcome = client.add_media(&media_properties(args)).await?;
            output::render_outcome("add media", &outcome);
        }
        MediasCommand::Update(args) => {
            let outcome = client.update_media(&update_media_properties(args)?).await?;
            output::render_outcome("update media", &outcome);
        }
        MediasCommand::NotionAdd(args) => {
            client.notion_add_media(&media_properties(args)).await?;
            println!("add media to notion: done");
        }
    }
    Ok(())
}

fn game_properties(args: GameArgs) -> GameProperties {
    let mut props = GameProperties::new(args.url, args.priority.into(), args.status.into())
        .with_stars(args.stars)
        .with_purchased(args.purchased);
    if let Some(name) = args.name {
        props = props.with_name(name);
    }
    if let Some(date) = args.started {
        props = props.with_started_date(date);
    }
    if let Some(date) = args.finished {
        props = props.with_finished_dropped_date(date);
    }
    if let Some(date) = args.release_date {
        props = props.with_release_date(date);
    }
    if let Some(commentary) = args.commentary {
        props = props.with_commentary(commentary);
    }
    props
}

fn media_properties(args: MediaArgs) -> MediaProperties {
    let mut props = MediaProperties::new(
        args.url,
        args.media_type.into(),
        args.priority.into(),
        args.status.into(),
    )
    .with_stars(args.stars);
    if let Some(name) = args.name {
        props = props.with_name(name);
    }
    if let Some(date) = args.started {
        props = props.with_started_date(date);
    }
    if let Some(date) = args.finished {
        props = props.with_finished_dropped_date(date);
    }
    if let Some(commentary) = args.commentary {
        props = props.with_commentary(commentary);
    }
    props
}

fn update_media_properties(args: MediaArgs) -> Result<UpdateMediaProperties> {
    let Some(name) = args.name else {
        bail!("update requires --name");
    };
    let mut props = UpdateMediaProperties::new(
        name,
        args.media_type.into(),
        args.priority.into(),
        args.status.into(),
    )
    .with_stars(args.stars);
    if let Some(date) = args.started {
        props = props.with_started_date(date);
    }
    if let Some(date) = args.finished {
        props = props.with_finished_dropped_date(date);
    }
    if let Some(date) = args.release_date {
        props = props.with_release_date(date);
    }
    if let Some(commentary) = args.commentary {
        props = props.with_commentary(commentary);
    }
    Ok(props)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GameStatusArg, MediaStatusArg, MediaTypeArg, PriorityArg};
    use chrono::NaiveDate;
    use dashboard_core::testing::{fixtures, MockTransport, RecordingSink};
    use dashboard_core::Method;

    #[test]
    fn test_game_properties_from_args() {
        let args = GameArgs {
            url: String::new(),
            name: Some("Celeste".to_string()),
            manual: true,
            priority: PriorityArg::Low,
            status: GameStatusArg::Finished,
            stars: 5,
            purchased: true,
            started: NaiveDate::from_ymd_opt(2023, 1, 2),
            finished: None,
            release_date: None,
            commentary: Some("great".to_string()),
        };
        let props = game_properties(args);
        assert_eq!(props.name.as_deref(), Some("Celeste"));
        assert_eq!(props.priority, 3);
        assert_eq!(props.status, 4);
        assert!(props.purchased_or_gamepass);
        assert_eq!(props.started_date, NaiveDate::from_ymd_opt(2023, 1, 2));
        assert_eq!(props.commentary.as_deref(), Some("great"));
    }

    fn media_args(name: Option<&str>) -> MediaArgs {
        MediaArgs {
            url: String::new(),
            name: name.map(str::to_string),
            media_type: MediaTypeArg::Book,
            priority: PriorityArg::High,
            status: MediaStatusArg::Dropped,
            stars: 2,
            started: None,
            finished: NaiveDate::from_ymd_opt(2024, 5, 6),
            release_date: NaiveDate::from_ymd_opt(1965, 8, 1),
            commentary: None,
        }
    }

    #[test]
    fn test_update_media_properties_from_args() {
        let props = update_media_properties(media_args(Some("Dune"))).unwrap();
        assert_eq!(props.name, "Dune");
        assert_eq!(props.media_type, 3);
        assert_eq!(props.priority, 1);
        assert_eq!(props.status, 5);
        assert_eq!(props.finished_dropped_date, NaiveDate::from_ymd_opt(2024, 5, 6));
        assert_eq!(props.release_date, NaiveDate::from_ymd_opt(1965, 8, 1));
    }

    #[test]
    fn test_update_media_requires_name() {
        assert!(update_media_properties(media_args(None)).is_err());
    }

    #[tokio::test]
    async fn test_watch_stops_poller_when_signal_fails() {
        let transport = MockTransport::new();
        transport
            .respond_json(
                Method::Get,
                "/v1/jobs/get_all",
                200,
                fixtures::jobs_body(vec![fixtures::job_json("Scrape", "Executing")]),
            )
            .await;
        let poller = JobPoller::new(Arc::new(transport), Arc::new(RecordingSink::default()));

        let failed = async { Err::<(), _>(io::Error::other("no signal handler")) };
        let result = watch_until(&poller, Duration::from_secs(60), failed).await;

        assert!(result.is_err());
        assert!(!poller.is_running().await);
    }
}
