//! Resource families and their collection partitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A backend-owned entity family that the client caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Games,
    Medias,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Games, Resource::Medias];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Games => "games",
            Resource::Medias => "medias",
        }
    }

    /// Singular form used in endpoint names and single-record responses.
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Games => "game",
            Resource::Medias => "media",
        }
    }

    /// Path segment of the resource's tracker.
    pub fn tracker(&self) -> &'static str {
        match self {
            Resource::Games => "games_tracker",
            Resource::Medias => "medias_tracker",
        }
    }

    /// Path of a tracker action, e.g. `/v1/trackers/games_tracker/add_game`.
    pub fn tracker_path(&self, action: &str) -> String {
        format!("/v1/trackers/{}/{}", self.tracker(), action)
    }

    /// Path listing one partition of this resource.
    pub fn list_path(&self, partition: Partition) -> String {
        self.tracker_path(&format!(
            "get_{}_{}",
            partition.segment(*self),
            self.as_str()
        ))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status filter selecting one collection of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    All,
    /// Games being played, medias being watched or read.
    InProgress,
    ToBeReleased,
    NotStarted,
    Finished,
    Dropped,
}

impl Partition {
    pub const ALL: [Partition; 6] = [
        Partition::All,
        Partition::InProgress,
        Partition::ToBeReleased,
        Partition::NotStarted,
        Partition::Finished,
        Partition::Dropped,
    ];

    /// Name of the partition in the given resource's endpoints.
    pub fn segment(&self, resource: Resource) -> &'static str {
        match (self, resource) {
            (Partition::All, _) => "all",
            (Partition::InProgress, Resource::Games) => "playing",
            (Partition::InProgress, Resource::Medias) => "watching_reading",
            (Partition::ToBeReleased, _) => "to_be_released",
            (Partition::NotStarted, _) => "not_started",
            (Partition::Finished, _) => "finished",
            (Partition::Dropped, _) => "dropped",
        }
    }

    /// Parse a partition from either resource's naming.
    pub fn parse(raw: &str) -> Option<Partition> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Some(Partition::All),
            "in_progress" | "playing" | "watching_reading" | "watching" | "reading" => {
                Some(Partition::InProgress)
            }
            "to_be_released" => Some(Partition::ToBeReleased),
            "not_started" => Some(Partition::NotStarted),
            "finished" => Some(Partition::Finished),
            "dropped" => Some(Partition::Dropped),
            _ => None,
        }
    }
}

/// Identifies one cached collection, displayed as `resource:partition`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollectionKey {
    pub resource: Resource,
    pub partition: Partition,
}

impl CollectionKey {
    pub fn new(resource: Resource, partition: Partition) -> Self {
        Self {
            resource,
            partition,
        }
    }

    pub fn path(&self) -> String {
        self.resource.list_path(self.partition)
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.resource,
            self.partition.segment(self.resource)
        )
    }
}
