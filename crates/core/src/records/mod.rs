//! Typed backend records and request bodies.
//!
//! Records mirror the backend's JSON (PascalCase keys) and keep unknown
//! fields, so a newer backend does not break an older client.

mod collection;
pub mod dates;
mod game;
mod job;
mod media;
mod properties;
mod resource;
mod status;

pub use collection::Collection;
pub use dates::{parse_backend_date, parse_job_timestamp, UNSET_DATE_SENTINEL};
pub use game::Game;
pub use job::{Job, JobState};
pub use media::Media;
pub(crate) use properties::NameBody;
pub use properties::{
    GameProperties, MediaProperties, NotionGameProperties, UpdateMediaProperties,
};
pub use resource::{CollectionKey, Partition, Resource};
pub use status::{parse_code, GameStatus, MediaStatus, MediaType, Priority};

use serde::de::DeserializeOwned;

/// A record that lives in a cached, name-indexed collection.
pub trait TrackedRecord: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Resource family the record belongs to.
    const RESOURCE: Resource;

    /// Unique display name the collection is indexed by.
    fn name(&self) -> &str;
}
