//! Medias tracker records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dates::{backend_date, null_as_default};
use super::status::parse_code;
use super::{MediaStatus, MediaType, Priority, Resource, TrackedRecord};

/// A media (series, movie, book...) as returned by the medias tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Media {
    pub name: String,
    #[serde(rename = "URL", default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: String,
    #[serde(default)]
    pub cover_img: Option<String>,
    #[serde(default, with = "backend_date")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub staff: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub stars: i64,
    #[serde(default, with = "backend_date")]
    pub started_date: Option<DateTime<Utc>>,
    #[serde(default, with = "backend_date")]
    pub finished_dropped_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commentary: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Media {
    pub fn status_kind(&self) -> Option<MediaStatus> {
        parse_code(&self.status).and_then(MediaStatus::from_code)
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        parse_code(&self.priority).and_then(Priority::from_code)
    }

    pub fn media_type_kind(&self) -> Option<MediaType> {
        parse_code(&self.media_type).and_then(MediaType::from_code)
    }
}

impl TrackedRecord for Media {
    const RESOURCE: Resource = Resource::Medias;

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_media() {
        let media: Media = serde_json::from_value(json!({
            "Name": "Dune",
            "URL": "https://www.imdb.com/title/tt1160419/",
            "MediaType": "2",
            "CoverImg": null,
            "ReleaseDate": "2021-10-22T00:00:00Z",
            "Genres": ["Sci-Fi"],
            "Staff": null,
            "Priority": "1",
            "Status": "4",
            "Stars": 4,
            "StartedDate": "0001-01-01T00:00:00Z",
            "FinishedDroppedDate": "2021-11-01T00:00:00Z",
            "Commentary": null,
            "GenresStr": "Sci-Fi"
        }))
        .unwrap();

        assert_eq!(media.media_type_kind(), Some(MediaType::Movie));
        assert_eq!(media.status_kind(), Some(MediaStatus::Finished));
        assert_eq!(media.priority_kind(), Some(Priority::High));
        assert_eq!(media.started_date, None);
        assert!(media.finished_dropped_date.is_some());
        assert!(media.staff.is_empty());
        assert_eq!(media.commentary, "");
        assert_eq!(media.extra.get("GenresStr"), Some(&json!("Sci-Fi")));
    }
}
