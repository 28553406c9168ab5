//! Per-resource collection cache.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::endpoint::{take_field, Endpoint};
use crate::error::ClientError;
use crate::metrics;
use crate::records::{Collection, CollectionKey, NameBody, Partition, TrackedRecord};
use crate::transport::{Transport, TransportResponse};

use super::types::{CacheEntry, CacheFlag};

/// Cached collections of one resource, keyed by partition.
///
/// All reads and invalidations are serialized by one lock; a fetch runs
/// while holding it, so two concurrent readers of a stale collection cause
/// a single backend request.
pub struct CollectionCache<R: TrackedRecord> {
    transport: Arc<dyn Transport>,
    entries: Mutex<HashMap<Partition, CacheEntry<R>>>,
}

impl<R: TrackedRecord> CollectionCache<R> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Get a collection, fetching it unless the cached copy is fresh.
    ///
    /// On failure the entry keeps its previous data and flag.
    pub async fn get_collection(
        &self,
        partition: Partition,
    ) -> Result<Arc<Collection<R>>, ClientError> {
        let key = CollectionKey::new(R::RESOURCE, partition);
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(partition).or_insert_with(CacheEntry::unknown);

        if !entry.flag.needs_fetch() {
            metrics::CACHE_LOOKUPS
                .with_label_values(&[R::RESOURCE.as_str(), "hit"])
                .inc();
            debug!("Serving {} from cache", key);
            return Ok(Arc::clone(&entry.data));
        }

        metrics::CACHE_LOOKUPS
            .with_label_values(&[R::RESOURCE.as_str(), "miss"])
            .inc();
        debug!("Fetching {} (flag: {})", key, entry.flag);

        let collection = Arc::new(self.fetch(key).await?);
        entry.data = Arc::clone(&collection);
        entry.flag = CacheFlag::Fresh;
        Ok(collection)
    }

    /// Mark every cached collection of this resource stale.
    ///
    /// Returns the number of entries marked.
    pub async fn invalidate(&self) -> usize {
        let mut entries = self.entries.lock().await;
        for entry in entries.values_mut() {
            entry.flag = CacheFlag::Stale;
        }
        metrics::CACHE_INVALIDATIONS
            .with_label_values(&[R::RESOURCE.as_str()])
            .inc();
        debug!("Invalidated {} {} collections", entries.len(), R::RESOURCE);
        entries.len()
    }

    /// Flag of a partition, `None` before its first read.
    pub async fn flag(&self, partition: Partition) -> Option<CacheFlag> {
        self.entries.lock().await.get(&partition).map(|e| e.flag)
    }

    /// Fetch one record by name, bypassing the cache.
    pub async fn get_single(&self, name: &str) -> Result<R, ClientError> {
        let endpoint = Endpoint::get_single(R::RESOURCE);
        let body = serde_json::to_value(NameBody { name })
            .map_err(|e| ClientError::Encode(e.to_string()))?;
        let response = endpoint.call(self.transport.as_ref(), Some(body)).await?;

        let body: Value = if response.status == 200 {
            endpoint.decode(self.transport.as_ref(), &response)?
        } else {
            warn!(
                "Backend rejected {} lookup for '{}': {}",
                R::RESOURCE.singular(),
                name,
                response.text()
            );
            response.json().unwrap_or(Value::Null)
        };

        let not_found = || ClientError::NotFound {
            resource: R::RESOURCE,
            name: name.to_string(),
        };
        let record = take_field(body, R::RESOURCE.singular()).ok_or_else(not_found)?;
        serde_json::from_value(record).map_err(|e| ClientError::Decode {
            url: self.transport.url_for(&endpoint.path),
            message: e.to_string(),
        })
    }

    async fn fetch(&self, key: CollectionKey) -> Result<Collection<R>, ClientError> {
        let endpoint = Endpoint::list(key);
        let response = endpoint.call(self.transport.as_ref(), None).await?;
        self.decode_list(&endpoint, &response)
    }

    fn decode_list(
        &self,
        endpoint: &Endpoint,
        response: &TransportResponse,
    ) -> Result<Collection<R>, ClientError> {
        if response.status != 200 {
            warn!(
                "Backend rejected listing {} ({}): {}",
                endpoint.path,
                response.status,
                response.text()
            );
            return Ok(Collection::new());
        }

        let body: Value = endpoint.decode(self.transport.as_ref(), response)?;
        let Some(records) = take_field(body, R::RESOURCE.as_str()) else {
            return Ok(Collection::new());
        };
        let records: Vec<R> = serde_json::from_value(records).map_err(|e| ClientError::Decode {
            url: self.transport.url_for(&endpoint.path),
            message: e.to_string(),
        })?;
        Ok(records.into_iter().collect())
    }
}
