//! Games tracker records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dates::{backend_date, null_as_default};
use super::{GameStatus, Priority, Resource, TrackedRecord};

/// A game as returned by the games tracker.
///
/// Fields the client does not know about are kept in `extra` and written
/// back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Game {
    pub name: String,
    #[serde(rename = "URL", default, deserialize_with = "null_as_default")]
    pub url: String,
    /// Base64 encoded cover image.
    #[serde(default)]
    pub cover_img: Option<String>,
    #[serde(default, with = "backend_date")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub developers: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub purchased_or_game_pass: bool,
    #[serde(default, with = "backend_date")]
    pub started_date: Option<DateTime<Utc>>,
    #[serde(default, with = "backend_date")]
    pub finished_dropped_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commentary: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Game {
    pub fn status_kind(&self) -> Option<GameStatus> {
        GameStatus::from_code(self.status)
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        Priority::from_code(self.priority)
    }
}

impl TrackedRecord for Game {
    const RESOURCE: Resource = Resource::Games;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    fn backend_game() -> Value {
        json!({
            "Name": "Outer Wilds",
            "URL": "https://store.steampowered.com/app/753640",
            "CoverImg": "aGVsbG8=",
            "ReleaseDate": "2019-05-28T00:00:00Z",
            "TagsStr": "Exploration,Space",
            "Tags": ["Exploration", "Space"],
            "Developers": ["Mobius Digital"],
            "Publishers": null,
            "Priority": 1,
            "Status": 3,
            "Stars": 5,
            "PurchasedOrGamePass": true,
            "StartedDate": "2024-02-01T00:00:00Z",
            "FinishedDroppedDate": "0001-01-01T00:00:00Z",
            "Commentary": ""
        })
    }

    #[test]
    fn test_decode_backend_game() {
        let game: Game = serde_json::from_value(backend_game()).unwrap();
        assert_eq!(game.name, "Outer Wilds");
        assert_eq!(game.release_date.unwrap().year(), 2019);
        assert_eq!(game.finished_dropped_date, None);
        assert!(game.publishers.is_empty());
        assert_eq!(game.status_kind(), Some(GameStatus::Playing));
        assert_eq!(game.priority_kind(), Some(Priority::High));
        assert!(game.purchased_or_game_pass);
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let game: Game = serde_json::from_value(backend_game()).unwrap();
        assert_eq!(game.extra.get("TagsStr"), Some(&json!("Exploration,Space")));

        let encoded = serde_json::to_value(&game).unwrap();
        assert_eq!(encoded["TagsStr"], json!("Exploration,Space"));
        assert_eq!(encoded["FinishedDroppedDate"], json!("0001-01-01T00:00:00Z"));
        assert_eq!(encoded["ReleaseDate"], json!("2019-05-28T00:00:00Z"));
    }

    #[test]
    fn test_minimal_game() {
        let game: Game = serde_json::from_value(json!({"Name": "Celeste"})).unwrap();
        assert_eq!(game.name, "Celeste");
        assert_eq!(game.started_date, None);
        assert_eq!(game.status_kind(), None);
    }

    #[test]
    fn test_unreadable_date_keeps_list() {
        let games: Vec<Game> = serde_json::from_value(json!([
            {"Name": "Hades", "ReleaseDate": "2020-09-17T00:00:00Z"},
            {"Name": "Tunic", "ReleaseDate": "16 March 2022", "StartedDate": "2022-03-20T00:00:00Z"}
        ]))
        .unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].release_date, None);
        assert_eq!(games[1].started_date.map(|d| d.year()), Some(2022));
    }
}
