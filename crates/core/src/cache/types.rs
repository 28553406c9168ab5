//! Types for the collection cache.

use std::fmt;
use std::sync::Arc;

use crate::records::Collection;

/// Whether a cached collection can be served without a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheFlag {
    /// Entry created, first fetch of the session not yet successful.
    Unknown,
    /// Data mirrors the last successful fetch.
    Fresh,
    /// A write to the resource happened since the last fetch.
    Stale,
}

impl CacheFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheFlag::Unknown => "unknown",
            CacheFlag::Fresh => "fresh",
            CacheFlag::Stale => "stale",
        }
    }

    /// Whether a read must go to the backend.
    pub fn needs_fetch(&self) -> bool {
        !matches!(self, CacheFlag::Fresh)
    }
}

impl fmt::Display for CacheFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached data of one collection plus its invalidation flag.
#[derive(Debug, Clone)]
pub struct CacheEntry<R> {
    pub data: Arc<Collection<R>>,
    pub flag: CacheFlag,
}

impl<R> CacheEntry<R> {
    pub(crate) fn unknown() -> Self {
        Self {
            data: Arc::new(Collection::default()),
            flag: CacheFlag::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_fresh_skips_fetch() {
        assert!(CacheFlag::Unknown.needs_fetch());
        assert!(CacheFlag::Stale.needs_fetch());
        assert!(!CacheFlag::Fresh.needs_fetch());
    }
}
