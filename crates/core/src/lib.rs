pub mod cache;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod jobs;
pub mod metrics;
pub mod records;
pub mod testing;
pub mod translator;
pub mod transport;

pub use cache::{CacheEntry, CacheFlag, CollectionCache, SessionCache};
pub use client::{MutationOutcome, TrackerClient};
pub use config::{
    load_config, load_config_from_env, load_config_from_str, validate_config, BackendConfig,
    Config, ConfigError, PollerConfig,
};
pub use endpoint::Endpoint;
pub use error::ClientError;
pub use jobs::{render_jobs, JobPoller, JobStatus, JobStatusSink, JobView, Tone};
pub use records::{
    Collection, CollectionKey, Game, GameProperties, GameStatus, Job, JobState, Media,
    MediaProperties, MediaStatus, MediaType, NotionGameProperties, Partition, Priority, Resource,
    TrackedRecord, UpdateMediaProperties,
};
pub use translator::{translate, AcceptableStatus, ApiError, RequestInfo};
pub use transport::{
    HttpTransport, Method, Transport, TransportError, TransportRequest, TransportResponse,
};
