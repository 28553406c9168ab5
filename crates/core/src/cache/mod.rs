//! Session-scoped collection cache with invalidation flags.
//!
//! Each resource owns a `CollectionCache` keyed by partition. Reads serve
//! fresh entries without touching the backend; a write to a resource marks
//! all of its collections stale, so the next read of any of them refetches.

mod store;
mod types;

pub use store::CollectionCache;
pub use types::{CacheEntry, CacheFlag};

use std::sync::Arc;

use crate::records::{CollectionKey, Game, Media, Resource};
use crate::transport::Transport;

/// All cached collections of one session.
///
/// Owned by the client that created it; dropping it ends the session.
pub struct SessionCache {
    pub games: CollectionCache<Game>,
    pub medias: CollectionCache<Media>,
}

impl SessionCache {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            games: CollectionCache::new(Arc::clone(&transport)),
            medias: CollectionCache::new(transport),
        }
    }

    /// Mark every collection of `resource` stale.
    pub async fn invalidate(&self, resource: Resource) -> usize {
        match resource {
            Resource::Games => self.games.invalidate().await,
            Resource::Medias => self.medias.invalidate().await,
        }
    }

    /// Flag of one collection, `None` before its first read.
    pub async fn flag(&self, key: CollectionKey) -> Option<CacheFlag> {
        match key.resource {
            Resource::Games => self.games.flag(key.partition).await,
            Resource::Medias => self.medias.flag(key.partition).await,
        }
    }
}
