//! Versioned cache of employee collections
//!
//! One entry per [`Collection`]. Entries are replaced whole and never edited
//! in place; readers get a clone of the entry with shared record handles.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::models::Employee;
use tokio::sync::RwLock;

/// Employee collection shown by the People view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Employees,
    MyTeam,
    Terminated,
}

/// Cached snapshot of one collection
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub records: Vec<Arc<Employee>>,
    /// Cache-wide version at the time the entry was stored
    pub version: u64,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<Collection, CacheEntry>,
    version: u64,
}

/// Shared directory cache
///
/// Cloning yields another handle onto the same entries.
#[derive(Debug, Clone, Default)]
pub struct DirectoryCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, collection: Collection) -> Option<CacheEntry> {
        self.inner.read().await.entries.get(&collection).cloned()
    }

    /// Store a fresh snapshot, returning its version
    pub async fn put(&self, collection: Collection, records: Vec<Arc<Employee>>) -> u64 {
        let mut inner = self.inner.write().await;
        inner.version += 1;
        let version = inner.version;
        inner.entries.insert(
            collection,
            CacheEntry {
                records,
                version,
                fetched_at: Utc::now(),
            },
        );
        version
    }

    pub async fn invalidate(&self, collection: Collection) {
        let mut inner = self.inner.write().await;
        if inner.entries.remove(&collection).is_some() {
            inner.version += 1;
        }
    }

    /// Drop every entry
    pub async fn invalidate_all(&self) {
        let mut inner = self.inner.write().await;
        inner.entries.clear();
        inner.version += 1;
        tracing::debug!(version = inner.version, "Directory cache invalidated");
    }

    /// Current cache-wide version; any write bumps it
    pub async fn version(&self) -> u64 {
        self.inner.read().await.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(emp_id: i64) -> Arc<Employee> {
        Arc::new(Employee {
            emp_id,
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_put_and_get_share_records() {
        let cache = DirectoryCache::new();
        assert!(cache.get(Collection::Employees).await.is_none());

        let stored = vec![record(1), record(2)];
        let version = cache.put(Collection::Employees, stored.clone()).await;

        let entry = cache.get(Collection::Employees).await.unwrap();
        assert_eq!(entry.version, version);
        assert_eq!(entry.records.len(), 2);
        assert!(Arc::ptr_eq(&entry.records[0], &stored[0]));
    }

    #[tokio::test]
    async fn test_invalidate_all_clears_every_collection() {
        let cache = DirectoryCache::new();
        cache.put(Collection::Employees, vec![record(1)]).await;
        cache.put(Collection::Terminated, vec![record(2)]).await;
        let before = cache.version().await;

        cache.invalidate_all().await;

        assert!(cache.get(Collection::Employees).await.is_none());
        assert!(cache.get(Collection::Terminated).await.is_none());
        assert!(cache.version().await > before);
    }

    #[tokio::test]
    async fn test_clones_see_the_same_entries() {
        let cache = DirectoryCache::new();
        let other = cache.clone();
        cache.put(Collection::MyTeam, vec![record(7)]).await;
        assert_eq!(other.get(Collection::MyTeam).await.unwrap().records[0].emp_id, 7);

        other.invalidate(Collection::MyTeam).await;
        assert!(cache.get(Collection::MyTeam).await.is_none());
    }
}
