//! Request bodies for tracker writes.

use chrono::NaiveDate;
use serde::Serialize;

use super::dates::request_date;
use super::{GameStatus, MediaStatus, MediaType, Priority};

/// Body of the games tracker add/update requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameProperties {
    /// Required by update and manual add; the scraper derives it otherwise.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    pub priority: u8,
    pub status: u8,
    pub stars: u8,
    pub purchased_or_gamepass: bool,
    #[serde(serialize_with = "request_date::serialize")]
    pub started_date: Option<NaiveDate>,
    #[serde(serialize_with = "request_date::serialize")]
    pub finished_dropped_date: Option<NaiveDate>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "request_date::serialize"
    )]
    pub release_date: Option<NaiveDate>,
    pub commentary: Option<String>,
}

impl GameProperties {
    pub fn new(url: impl Into<String>, priority: Priority, status: GameStatus) -> Self {
        Self {
            name: None,
            url: url.into(),
            priority: priority.code(),
            status: status.code(),
            stars: 0,
            purchased_or_gamepass: false,
            started_date: None,
            finished_dropped_date: None,
            release_date: None,
            commentary: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Stars are clamped to 0..=5 (0 means "not rated").
    pub fn with_stars(mut self, stars: u8) -> Self {
        self.stars = stars.min(5);
        self
    }

    pub fn with_purchased(mut self, purchased: bool) -> Self {
        self.purchased_or_gamepass = purchased;
        self
    }

    pub fn with_started_date(mut self, date: NaiveDate) -> Self {
        self.started_date = Some(date);
        self
    }

    pub fn with_finished_dropped_date(mut self, date: NaiveDate) -> Self {
        self.finished_dropped_date = Some(date);
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = Some(commentary.into());
        self
    }
}

/// Body of the medias tracker add request (and the notion media add).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub priority: String,
    pub status: String,
    pub stars: u8,
    #[serde(serialize_with = "request_date::serialize")]
    pub started_date: Option<NaiveDate>,
    #[serde(serialize_with = "request_date::serialize")]
    pub finished_dropped_date: Option<NaiveDate>,
    pub commentary: Option<String>,
}

impl MediaProperties {
    pub fn new(
        url: impl Into<String>,
        media_type: MediaType,
        priority: Priority,
        status: MediaStatus,
    ) -> Self {
        Self {
            name: None,
            url: url.into(),
            media_type: media_type.code().to_string(),
            priority: priority.code().to_string(),
            status: status.code().to_string(),
            stars: 0,
            started_date: None,
            finished_dropped_date: None,
            commentary: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_stars(mut self, stars: u8) -> Self {
        self.stars = stars.min(5);
        self
    }

    pub fn with_started_date(mut self, date: NaiveDate) -> Self {
        self.started_date = Some(date);
        self
    }

    pub fn with_finished_dropped_date(mut self, date: NaiveDate) -> Self {
        self.finished_dropped_date = Some(date);
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = Some(commentary.into());
        self
    }
}

/// Body of the medias tracker update request.
///
/// Unlike the add body, codes are numbers, the type key is `media_type`,
/// and the record is found by name rather than by URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMediaProperties {
    pub name: String,
    pub media_type: u8,
    pub priority: u8,
    pub status: u8,
    pub stars: u8,
    #[serde(serialize_with = "request_date::serialize")]
    pub started_date: Option<NaiveDate>,
    #[serde(serialize_with = "request_date::serialize")]
    pub finished_dropped_date: Option<NaiveDate>,
    #[serde(serialize_with = "request_date::serialize")]
    pub release_date: Option<NaiveDate>,
    pub commentary: Option<String>,
}

impl UpdateMediaProperties {
    pub fn new(
        name: impl Into<String>,
        media_type: MediaType,
        priority: Priority,
        status: MediaStatus,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.code(),
            priority: priority.code(),
            status: status.code(),
            stars: 0,
            started_date: None,
            finished_dropped_date: None,
            release_date: None,
            commentary: None,
        }
    }

    pub fn with_stars(mut self, stars: u8) -> Self {
        self.stars = stars.min(5);
        self
    }

    pub fn with_started_date(mut self, date: NaiveDate) -> Self {
        self.started_date = Some(date);
        self
    }

    pub fn with_finished_dropped_date(mut self, date: NaiveDate) -> Self {
        self.finished_dropped_date = Some(date);
        self
    }

    pub fn with_release_date(mut self, date: NaiveDate) -> Self {
        self.release_date = Some(date);
        self
    }

    pub fn with_commentary(mut self, commentary: impl Into<String>) -> Self {
        self.commentary = Some(commentary.into());
        self
    }
}

/// Body of the notion games tracker add request, which uses option labels
/// instead of numeric codes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotionGameProperties {
    pub url: String,
    pub priority: String,
    pub status: String,
    pub purchased_or_gamepass: bool,
    pub stars: u8,
    #[serde(serialize_with = "request_date::serialize")]
    pub started_date: Option<NaiveDate>,
    #[serde(serialize_with = "request_date::serialize")]
    pub finished_dropped_date: Option<NaiveDate>,
    pub commentary: Option<String>,
}

impl NotionGameProperties {
    pub fn new(url: impl Into<String>, priority: Priority, status: GameStatus) -> Self {
        Self {
            url: url.into(),
            priority: priority.label().to_string(),
            status: status.label().to_string(),
            purchased_or_gamepass: false,
            stars: 0,
            started_date: None,
            finished_dropped_date: None,
            commentary: None,
        }
    }

    /// Same content as a tracker request, with labels in place of codes.
    pub fn from_tracker(props: &GameProperties) -> Option<Self> {
        let priority = Priority::from_code(props.priority.into())?;
        let status = GameStatus::from_code(props.status.into())?;
        Some(Self {
            purchased_or_gamepass: props.purchased_or_gamepass,
            stars: props.stars,
            started_date: props.started_date,
            finished_dropped_date: props.finished_dropped_date,
            commentary: props.commentary.clone(),
            ..Self::new(props.url.clone(), priority, status)
        })
    }
}

/// Body of the single-record requests (get/delete).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct NameBody<'a> {
    pub name: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_game_properties_body() {
        let props = GameProperties::new(
            "https://store.steampowered.com/app/753640",
            Priority::High,
            GameStatus::Playing,
        )
        .with_stars(9)
        .with_started_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());

        let body = serde_json::to_value(&props).unwrap();
        assert_eq!(
            body,
            json!({
                "url": "https://store.steampowered.com/app/753640",
                "priority": 1,
                "status": 3,
                "stars": 5,
                "purchased_or_gamepass": false,
                "started_date": "2024-02-01",
                "finished_dropped_date": "",
                "commentary": null
            })
        );
    }

    #[test]
    fn test_update_body_carries_name_and_release_date() {
        let props = GameProperties::new("", Priority::Low, GameStatus::Finished)
            .with_name("Celeste")
            .with_release_date(NaiveDate::from_ymd_opt(2018, 1, 25).unwrap());
        let body = serde_json::to_value(&props).unwrap();
        assert_eq!(body["name"], json!("Celeste"));
        assert_eq!(body["release_date"], json!("2018-01-25"));
    }

    #[test]
    fn test_media_properties_body() {
        let props = MediaProperties::new(
            "https://www.imdb.com/title/tt1160419/",
            MediaType::Movie,
            Priority::Medium,
            MediaStatus::NotStarted,
        )
        .with_commentary("rewatch");
        let body = serde_json::to_value(&props).unwrap();
        assert_eq!(body["type"], json!("2"));
        assert_eq!(body["priority"], json!("2"));
        assert_eq!(body["status"], json!("1"));
        assert_eq!(body["started_date"], json!(""));
        assert_eq!(body["commentary"], json!("rewatch"));
        assert!(body.get("name").is_none());
    }

    #[test]
    fn test_media_update_body_uses_numeric_codes() {
        let props = UpdateMediaProperties::new(
            "Arrival",
            MediaType::Movie,
            Priority::Medium,
            MediaStatus::Finished,
        )
        .with_stars(4)
        .with_release_date(NaiveDate::from_ymd_opt(2016, 11, 11).unwrap());
        let body = serde_json::to_value(&props).unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Arrival",
                "media_type": 2,
                "priority": 2,
                "status": 4,
                "stars": 4,
                "started_date": "",
                "finished_dropped_date": "",
                "release_date": "2016-11-11",
                "commentary": null
            })
        );
        assert!(body.get("type").is_none());
        assert!(body.get("url").is_none());
    }

    #[test]
    fn test_notion_body_uses_labels() {
        let props = GameProperties::new(
            "https://store.example.com/tunic",
            Priority::High,
            GameStatus::Playing,
        )
        .with_stars(4);
        let notion = NotionGameProperties::from_tracker(&props).unwrap();
        let body = serde_json::to_value(&notion).unwrap();
        assert_eq!(body["priority"], json!("High"));
        assert_eq!(body["status"], json!("Playing"));
        assert_eq!(body["stars"], json!(4));
    }
}
