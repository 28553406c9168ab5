//! Tracker client: typed operations over the backend API.
//!
//! Reads of tracker collections go through the session cache. Every
//! accepted write to a resource invalidates all of that resource's cached
//! collections before returning.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::SessionCache;
use crate::config::BackendConfig;
use crate::endpoint::{take_field, Endpoint};
use crate::error::ClientError;
use crate::jobs::{self, JobPoller, JobStatusSink};
use crate::records::{
    Collection, Game, GameProperties, GameStatus, Job, Media, MediaProperties, MediaStatus,
    NameBody, NotionGameProperties, Partition, Resource, UpdateMediaProperties,
};
use crate::transport::{HttpTransport, Transport, TransportResponse};

/// Result of a tracker write the backend accepted.
///
/// A 400 is an accepted outcome: the backend reports business-rule
/// rejections (duplicate entry, invalid date) that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub status: u16,
    pub body: String,
}

impl MutationOutcome {
    fn from_response(response: &TransportResponse) -> Self {
        Self {
            status: response.status,
            body: response.text(),
        }
    }

    /// Whether the backend rejected the write on validation grounds.
    pub fn is_rejected(&self) -> bool {
        self.status == 400
    }

    /// Backend message, from the `message` or `error` field when present.
    pub fn message(&self) -> Option<String> {
        let body: Value = serde_json::from_str(&self.body).ok()?;
        ["message", "error"].iter().find_map(|key| {
            take_field(body.clone(), key).and_then(|v| v.as_str().map(str::to_string))
        })
    }
}

/// Client for the trackers, jobs and system APIs.
///
/// Owns one session cache; clones of the client created with `Clone` share it.
#[derive(Clone)]
pub struct TrackerClient {
    transport: Arc<dyn Transport>,
    cache: Arc<SessionCache>,
}

impl TrackerClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let cache = Arc::new(SessionCache::new(Arc::clone(&transport)));
        Self { transport, cache }
    }

    /// Create a client talking HTTP to the configured backend.
    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        let transport = HttpTransport::new(config)?;
        info!("Using backend at {}", transport.base_url());
        Ok(Self::new(Arc::new(transport)))
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    // =========================================================================
    // System
    // =========================================================================

    /// Returns the backend's health text ("OK").
    pub async fn health_check(&self) -> Result<String, ClientError> {
        let response = Endpoint::health().call(self.transport.as_ref(), None).await?;
        Ok(response.text())
    }

    pub async fn get_geckodriver_addresses(&self) -> Result<Vec<String>, ClientError> {
        let endpoint = Endpoint::geckodrivers();
        let response = endpoint.call(self.transport.as_ref(), None).await?;
        let body: Value = endpoint.decode(self.transport.as_ref(), &response)?;
        match take_field(body, "addresses") {
            Some(addresses) => self.decode_value(&endpoint, addresses),
            None => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // Games tracker
    // =========================================================================

    pub async fn add_game(&self, game: &GameProperties) -> Result<MutationOutcome, ClientError> {
        self.write(Endpoint::add(Resource::Games), Resource::Games, game)
            .await
    }

    /// Add a game without scraping; the name must be set.
    pub async fn add_game_manually(
        &self,
        game: &GameProperties,
    ) -> Result<MutationOutcome, ClientError> {
        self.write(Endpoint::add_manually(Resource::Games), Resource::Games, game)
            .await
    }

    pub async fn update_game(
        &self,
        game: &GameProperties,
    ) -> Result<MutationOutcome, ClientError> {
        self.write(Endpoint::update(Resource::Games), Resource::Games, game)
            .await
    }

    pub async fn delete_game(&self, name: &str) -> Result<MutationOutcome, ClientError> {
        self.write(
            Endpoint::delete(Resource::Games),
            Resource::Games,
            &NameBody { name },
        )
        .await
    }

    /// Fetch one game directly, never from the cache.
    pub async fn get_game(&self, name: &str) -> Result<Game, ClientError> {
        self.cache.games.get_single(name).await
    }

    pub async fn get_all_games(&self) -> Result<Arc<Collection<Game>>, ClientError> {
        self.get_games(Partition::All).await
    }

    pub async fn get_games_by_status(
        &self,
        status: GameStatus,
    ) -> Result<Arc<Collection<Game>>, ClientError> {
        self.get_games(status.partition()).await
    }

    pub async fn get_games(
        &self,
        partition: Partition,
    ) -> Result<Arc<Collection<Game>>, ClientError> {
        self.cache.games.get_collection(partition).await
    }

    // =========================================================================
    // Medias tracker
    // =========================================================================

    pub async fn add_media(&self, media: &MediaProperties) -> Result<MutationOutcome, ClientError> {
        self.write(Endpoint::add(Resource::Medias), Resource::Medias, media)
            .await
    }

    pub async fn update_media(
        &self,
        media: &UpdateMediaProperties,
    ) -> Result<MutationOutcome, ClientError> {
        self.write(Endpoint::update(Resource::Medias), Resource::Medias, media)
            .await
    }

    pub async fn delete_media(&self, name: &str) -> Result<MutationOutcome, ClientError> {
        self.write(
            Endpoint::delete(Resource::Medias),
            Resource::Medias,
            &NameBody { name },
        )
        .await
    }

    /// Fetch one media directly, never from the cache.
    pub async fn get_media(&self, name: &str) -> Result<Media, ClientError> {
        self.cache.medias.get_single(name).await
    }

    pub async fn get_all_medias(&self) -> Result<Arc<Collection<Media>>, ClientError> {
        self.get_medias(Partition::All).await
    }

    pub async fn get_medias_by_status(
        &self,
        status: MediaStatus,
    ) -> Result<Arc<Collection<Media>>, ClientError> {
        self.get_medias(status.partition()).await
    }

    pub async fn get_medias(
        &self,
        partition: Partition,
    ) -> Result<Arc<Collection<Media>>, ClientError> {
        self.cache.medias.get_collection(partition).await
    }

    // =========================================================================
    // Notion
    // =========================================================================

    /// Add a game to the notion database. The tracker cache is not affected.
    pub async fn notion_add_game(&self, game: &NotionGameProperties) -> Result<(), ClientError> {
        let body = encode(game)?;
        Endpoint::notion_add(Resource::Games)
            .call(self.transport.as_ref(), Some(body))
            .await?;
        Ok(())
    }

    /// Add a media to the notion database. The tracker cache is not affected.
    pub async fn notion_add_media(&self, media: &MediaProperties) -> Result<(), ClientError> {
        let body = encode(media)?;
        Endpoint::notion_add(Resource::Medias)
            .call(self.transport.as_ref(), Some(body))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Jobs
    // =========================================================================

    /// All jobs, oldest first.
    pub async fn get_all_jobs(&self) -> Result<Vec<Job>, ClientError> {
        jobs::fetch_jobs(self.transport.as_ref()).await
    }

    pub async fn delete_all_jobs(&self) -> Result<(), ClientError> {
        jobs::delete_all_jobs(self.transport.as_ref()).await
    }

    /// Create a job poller rendering to `sink`. It is not started.
    pub fn job_poller(&self, sink: Arc<dyn JobStatusSink>) -> JobPoller {
        JobPoller::new(Arc::clone(&self.transport), sink)
    }

    async fn write<B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        resource: Resource,
        body: &B,
    ) -> Result<MutationOutcome, ClientError> {
        let body = encode(body)?;
        let response = endpoint.call(self.transport.as_ref(), Some(body)).await?;
        let outcome = MutationOutcome::from_response(&response);
        if outcome.is_rejected() {
            warn!(
                "Backend rejected {}: {}",
                endpoint.path,
                outcome.message().unwrap_or_else(|| outcome.body.clone())
            );
        }

        self.cache.invalidate(resource).await;
        Ok(outcome)
    }

    fn decode_value<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        value: Value,
    ) -> Result<T, ClientError> {
        serde_json::from_value(value).map_err(|e| ClientError::Decode {
            url: self.transport.url_for(&endpoint.path),
            message: e.to_string(),
        })
    }
}

fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Value, ClientError> {
    serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheFlag;
    use crate::records::{CollectionKey, MediaType, Priority};
    use chrono::NaiveDate;
    use crate::testing::{fixtures, MockTransport};
    use crate::transport::Method;
    use serde_json::json;

    const ALL_GAMES: &str = "/v1/trackers/games_tracker/get_all_games";
    const ADD_GAME: &str = "/v1/trackers/games_tracker/add_game";

    async fn client_with_games() -> (MockTransport, TrackerClient) {
        let transport = MockTransport::new();
        transport
            .respond_json(
                Method::Get,
                ALL_GAMES,
                200,
                fixtures::games_body(vec![fixtures::game_json("Hades", 4)]),
            )
            .await;
        let client = TrackerClient::new(Arc::new(transport.clone()));
        (transport, client)
    }

    fn hades() -> GameProperties {
        GameProperties::new(
            "https://store.steampowered.com/app/1145360",
            Priority::High,
            GameStatus::Playing,
        )
    }

    #[tokio::test]
    async fn test_add_game_invalidates_games() {
        let (transport, client) = client_with_games().await;
        transport.respond(Method::Post, ADD_GAME, 200, r#"{"message":"ok"}"#).await;

        client.get_all_games().await.unwrap();
        let outcome = client.add_game(&hades()).await.unwrap();
        assert!(!outcome.is_rejected());

        let key = CollectionKey::new(Resource::Games, Partition::All);
        assert_eq!(client.cache().flag(key).await, Some(CacheFlag::Stale));
    }

    #[tokio::test]
    async fn test_rejected_write_is_success_and_invalidates() {
        let (transport, client) = client_with_games().await;
        transport
            .respond(Method::Post, ADD_GAME, 400, r#"{"error":"duplicate"}"#)
            .await;
        client.get_all_games().await.unwrap();

        let outcome = client.add_game(&hades()).await.unwrap();
        assert!(outcome.is_rejected());
        assert_eq!(outcome.message().as_deref(), Some("duplicate"));

        client.get_all_games().await.unwrap();
        assert_eq!(transport.request_count(Method::Get, ALL_GAMES).await, 2);
    }

    #[tokio::test]
    async fn test_failed_write_propagates_without_invalidating() {
        let (transport, client) = client_with_games().await;
        transport.respond(Method::Post, ADD_GAME, 500, "boom").await;
        client.get_all_games().await.unwrap();

        let err = client.add_game(&hades()).await.unwrap_err();
        assert_eq!(err.status(), Some(500));

        let key = CollectionKey::new(Resource::Games, Partition::All);
        assert_eq!(client.cache().flag(key).await, Some(CacheFlag::Fresh));
    }

    #[tokio::test]
    async fn test_media_write_leaves_games_fresh() {
        let (transport, client) = client_with_games().await;
        transport
            .respond(Method::Post, "/v1/trackers/medias_tracker/delete_media", 200, "{}")
            .await;
        client.get_all_games().await.unwrap();

        client.delete_media("Dark").await.unwrap();

        let body = transport.requests().await.last().unwrap().request.body.clone();
        assert_eq!(body, Some(json!({"name": "Dark"})));
        let key = CollectionKey::new(Resource::Games, Partition::All);
        assert_eq!(client.cache().flag(key).await, Some(CacheFlag::Fresh));
    }

    #[tokio::test]
    async fn test_update_media_sends_update_body() {
        let (transport, client) = client_with_games().await;
        transport
            .respond(Method::Post, "/v1/trackers/medias_tracker/update_media", 200, "{}")
            .await;

        let media = UpdateMediaProperties::new(
            "Dark",
            MediaType::Series,
            Priority::High,
            MediaStatus::WatchingReading,
        )
        .with_release_date(NaiveDate::from_ymd_opt(2017, 12, 1).unwrap());
        let outcome = client.update_media(&media).await.unwrap();
        assert!(!outcome.is_rejected());

        let body = transport.requests().await.last().unwrap().request.body.clone().unwrap();
        assert_eq!(body["name"], json!("Dark"));
        assert_eq!(body["media_type"], json!(1));
        assert_eq!(body["status"], json!(3));
        assert_eq!(body["release_date"], json!("2017-12-01"));
        assert!(body.get("type").is_none());
    }

    #[tokio::test]
    async fn test_games_by_status_uses_partition() {
        let (transport, client) = client_with_games().await;
        transport
            .respond_json(
                Method::Get,
                "/v1/trackers/games_tracker/get_to_be_released_games",
                200,
                fixtures::games_body(vec![fixtures::game_json("Hollow Knight Silksong", 1)]),
            )
            .await;

        let games = client
            .get_games_by_status(GameStatus::ToBeReleased)
            .await
            .unwrap();
        assert!(games.contains("Hollow Knight Silksong"));
    }

    #[tokio::test]
    async fn test_notion_add_requires_200_and_skips_cache() {
        let (transport, client) = client_with_games().await;
        transport
            .respond(Method::Post, "/v1/notion/medias_tracker/add_media", 400, "bad")
            .await;
        client.get_all_games().await.unwrap();

        let media = MediaProperties::new(
            "https://www.imdb.com/title/tt5753856/",
            MediaType::Series,
            Priority::Low,
            MediaStatus::NotStarted,
        );
        let err = client.notion_add_media(&media).await.unwrap_err();
        assert_eq!(err.status(), Some(400));
    }

    #[tokio::test]
    async fn test_system_endpoints() {
        let (transport, client) = client_with_games().await;
        transport.respond(Method::Get, "/v1/health", 200, "OK").await;
        transport
            .respond_json(
                Method::Get,
                "/v1/system/get_geckodrivers",
                200,
                json!({"addresses": ["http://gecko-1:4444", "http://gecko-2:4444"]}),
            )
            .await;

        assert_eq!(client.health_check().await.unwrap(), "OK");
        assert_eq!(client.get_geckodriver_addresses().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_jobs_are_not_cached() {
        let (transport, client) = client_with_games().await;
        transport
            .respond_json(
                Method::Get,
                "/v1/jobs/get_all",
                200,
                fixtures::jobs_body(vec![fixtures::job_json("Scrape", "Starting")]),
            )
            .await;

        assert_eq!(client.get_all_jobs().await.unwrap().len(), 1);
        assert_eq!(client.get_all_jobs().await.unwrap().len(), 1);
        assert_eq!(transport.request_count(Method::Get, "/v1/jobs/get_all").await, 2);
    }
}
