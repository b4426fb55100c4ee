pub mod coordinator;

pub use coordinator::CacheCoordinator;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::future::Cache;
use tracing::debug;

use crate::news::{Article, ArticleNumber, Page};

/// Shape of a cached read request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Article(ArticleNumber),
    Page(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    generation: u64,
    query: Query,
}

#[derive(Debug, Clone)]
pub enum Cached {
    Article(Article),
    Page(Page),
}

/// Values that can live in the shared namespace.
pub trait CacheValue: Clone + Sized {
    fn into_cached(self) -> Cached;
    fn from_cached(cached: Cached) -> Option<Self>;
}

impl CacheValue for Article {
    fn into_cached(self) -> Cached {
        Cached::Article(self)
    }

    fn from_cached(cached: Cached) -> Option<Self> {
        match cached {
            Cached::Article(article) => Some(article),
            Cached::Page(_) => None,
        }
    }
}

impl CacheValue for Page {
    fn into_cached(self) -> Cached {
        Cached::Page(self)
    }

    fn from_cached(cached: Cached) -> Option<Self> {
        match cached {
            Cached::Page(page) => Some(page),
            Cached::Article(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Single eviction namespace shared by every cached read.
///
/// Keys carry the generation they were computed under. `evict_all` advances
/// the generation before discarding entries, so a load that started before an
/// eviction can only insert under a key no later lookup will ask for.
pub struct NewsCache {
    entries: Cache<CacheKey, Cached>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new()
    }
}

impl NewsCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
            generation: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn get<T: CacheValue>(&self, generation: u64, query: Query) -> Option<T> {
        let cached = self.entries.get(&CacheKey { generation, query }).await?;
        T::from_cached(cached)
    }

    pub async fn insert<T: CacheValue>(&self, generation: u64, query: Query, value: T) {
        self.entries
            .insert(CacheKey { generation, query }, value.into_cached())
            .await;
    }

    /// Returns the cached value for `query`, or runs `load` and caches its
    /// result. Errors from `load` are returned as-is and never cached.
    pub async fn get_or_load<T, E, F, Fut>(&self, query: Query, load: F) -> Result<T, E>
    where
        T: CacheValue,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let generation = self.generation();

        if let Some(value) = self.get(generation, query).await {
            self.hits.fetch_add(1, Ordering::Relaxed);
            debug!("cache hit for {:?}", query);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        debug!("cache miss for {:?}", query);

        let value = load().await?;
        if self.generation() == generation {
            self.insert(generation, query, value.clone()).await;
        } else {
            debug!("not caching {:?}, evicted while loading", query);
        }
        Ok(value)
    }

    /// Discards every entry in the namespace.
    pub fn evict_all(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.entries.invalidate_all();
        self.evictions.fetch_add(1, Ordering::Relaxed);
        debug!("evicted news cache, now at generation {}", generation);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
        }
    }
}
