//! Output renderers for CLI commands.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use dashboard_core::{
    ClientError, Collection, Game, JobStatusSink, JobView, Media, MutationOutcome,
};

use crate::cli::OutputFormat;

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("failed to format JSON")?;
    println!("{text}");
    Ok(())
}

fn stars(count: i64) -> String {
    if count <= 0 {
        return "-".to_string();
    }
    "★".repeat(count.min(5) as usize)
}

pub(crate) fn render_games(games: &Collection<Game>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&games.iter().collect::<Vec<_>>()),
        OutputFormat::Table => {
            println!("{:<40} {:<15} {:<8} {:<6}", "NAME", "STATUS", "PRIORITY", "STARS");
            for game in games.iter() {
                println!(
                    "{:<40} {:<15} {:<8} {:<6}",
                    game.name,
                    game.status_kind().map(|s| s.label()).unwrap_or("?"),
                    game.priority_kind().map(|p| p.label()).unwrap_or("?"),
                    stars(game.stars)
                );
            }
            println!("{} games", games.len());
            Ok(())
        }
    }
}

pub(crate) fn render_game(game: &Game, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(game),
        OutputFormat::Table => {
            println!("name: {}", game.name);
            println!("url: {}", game.url);
            if let Some(status) = game.status_kind() {
                println!("status: {}", status.label());
            }
            if let Some(priority) = game.priority_kind() {
                println!("priority: {}", priority.label());
            }
            println!("stars: {}", stars(game.stars));
            println!("purchased / game pass: {}", game.purchased_or_game_pass);
            if let Some(date) = game.release_date {
                println!("released: {}", date.date_naive());
            }
            if let Some(date) = game.started_date {
                println!("started: {}", date.date_naive());
            }
            if let Some(date) = game.finished_dropped_date {
                println!("finished/dropped: {}", date.date_naive());
            }
            if !game.tags.is_empty() {
                println!("tags: {}", game.tags.join(", "));
            }
            if !game.developers.is_empty() {
                println!("developers: {}", game.developers.join(", "));
            }
            if !game.commentary.is_empty() {
                println!("\n{}", game.commentary);
            }
            Ok(())
        }
    }
}

pub(crate) fn render_medias(medias: &Collection<Media>, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&medias.iter().collect::<Vec<_>>()),
        OutputFormat::Table => {
            println!(
                "{:<40} {:<11} {:<17} {:<8} {:<6}",
                "NAME", "TYPE", "STATUS", "PRIORITY", "STARS"
            );
            for media in medias.iter() {
                println!(
                    "{:<40} {:<11} {:<17} {:<8} {:<6}",
                    media.name,
                    media.media_type_kind().map(|t| t.label()).unwrap_or("?"),
                    media.status_kind().map(|s| s.label()).unwrap_or("?"),
                    media.priority_kind().map(|p| p.label()).unwrap_or("?"),
                    stars(media.stars)
                );
            }
            println!("{} medias", medias.len());
            Ok(())
        }
    }
}

pub(crate) fn render_media(media: &Media, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(media),
        OutputFormat::Table => {
            println!("name: {}", media.name);
            println!("url: {}", media.url);
            if let Some(kind) = media.media_type_kind() {
                println!("type: {}", kind.label());
            }
            if let Some(status) = media.status_kind() {
                println!("status: {}", status.label());
            }
            if let Some(priority) = media.priority_kind() {
                println!("priority: {}", priority.label());
            }
            println!("stars: {}", stars(media.stars));
            if let Some(date) = media.release_date {
                println!("released: {}", date.date_naive());
            }
            if let Some(date) = media.started_date {
                println!("started: {}", date.date_naive());
            }
            if let Some(date) = media.finished_dropped_date {
                println!("finished/dropped: {}", date.date_naive());
            }
            if !media.genres.is_empty() {
                println!("genres: {}", media.genres.join(", "));
            }
            if !media.commentary.is_empty() {
                println!("\n{}", media.commentary);
            }
            Ok(())
        }
    }
}

pub(crate) fn render_outcome(action: &str, outcome: &MutationOutcome) {
    if outcome.is_rejected() {
        let reason = outcome.message().unwrap_or_else(|| outcome.body.clone());
        println!("{action}: rejected by the backend: {reason}");
    } else {
        println!("{action}: done");
    }
}

pub(crate) fn render_job_views(views: &[JobView], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let rows: Vec<_> = views
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "task": v.task,
                        "state": v.state.as_str(),
                        "status": v.status.as_str(),
                        "description": v.description.as_ref().map(|(_, d)| d),
                        "value": v.value,
                        "created_at": v.created_at,
                        "finished_at": v.finished_at,
                    })
                })
                .collect();
            print_json(&rows)
        }
        OutputFormat::Table => {
            if views.is_empty() {
                println!("No jobs");
            }
            for view in views {
                print!("{view}");
            }
            Ok(())
        }
    }
}

/// Job sink redrawing the list on the terminal.
pub(crate) struct TerminalSink {
    format: OutputFormat,
}

impl TerminalSink {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl JobStatusSink for TerminalSink {
    fn render(&self, jobs: &[JobView]) {
        if self.format == OutputFormat::Table {
            // Clear screen and move the cursor home
            print!("\x1b[2J\x1b[H");
            println!("Jobs ({})\n", chrono::Local::now().format("%H:%M:%S"));
        }
        if let Err(e) = render_job_views(jobs, self.format) {
            eprintln!("error: {e:#}");
        }
        let _ = std::io::stdout().flush();
    }

    fn render_error(&self, error: &ClientError) {
        eprintln!("error: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stars() {
        assert_eq!(stars(0), "-");
        assert_eq!(stars(3), "★★★");
        assert_eq!(stars(9), "★★★★★");
    }
}
