use std::convert::Infallible;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{NewsCache, Query};
use crate::news::{paginate, Article, ArticleNumber, NewArticle, NewsError, Page};
use crate::store::ArticleStore;

/// Front door to the catalog: cached reads, evicting writes.
///
/// Single articles and pages are cached. Text and author lookups always go to
/// the store. Every write that succeeds evicts the whole namespace before it
/// returns, so a read issued after the write has completed never sees the
/// pre-write state.
pub struct CacheCoordinator {
    store: Arc<dyn ArticleStore>,
    cache: NewsCache,
}

impl CacheCoordinator {
    pub fn new(store: Arc<dyn ArticleStore>, cache: NewsCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &NewsCache {
        &self.cache
    }

    pub async fn get_article(&self, number: ArticleNumber) -> Result<Article, NewsError> {
        self.cache
            .get_or_load(Query::Article(number), move || async move {
                self.store
                    .find(number)
                    .await
                    .ok_or(NewsError::NotFound(number))
            })
            .await
    }

    pub async fn get_text(&self, number: ArticleNumber) -> Result<String, NewsError> {
        self.store
            .find(number)
            .await
            .map(|article| article.text)
            .ok_or(NewsError::NotFound(number))
    }

    pub async fn get_author(&self, number: ArticleNumber) -> Result<String, NewsError> {
        self.store
            .find(number)
            .await
            .map(|article| article.author)
            .ok_or(NewsError::NotFound(number))
    }

    /// Missing indexes are looked up, and cached, as page 0.
    pub async fn get_page(&self, page_index: Option<i64>) -> Page {
        let page_index = page_index.unwrap_or(0);

        self.cache
            .get_or_load(Query::Page(page_index), move || async move {
                let articles = self.store.load_all().await;
                Ok::<_, Infallible>(paginate(articles, Some(page_index)))
            })
            .await
            .unwrap_or_else(|never| match never {})
    }

    pub async fn create(&self, article: NewArticle) -> Article {
        let article = self.store.save(article).await;
        self.cache.evict_all();
        debug!("created article {}", article.number);
        article
    }

    /// Fails with `NotFound`, leaving the cache untouched, when no article
    /// carries the payload's number.
    pub async fn update(&self, article: Article) -> Result<(), NewsError> {
        let number = article.number;
        self.store.update(article).await?;
        self.cache.evict_all();
        debug!("updated article {}", number);
        Ok(())
    }

    pub async fn delete(&self, number: ArticleNumber) -> bool {
        let removed = self.store.delete(number).await;
        self.cache.evict_all();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheStats;
    use crate::store::InMemoryStore;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper counting how often reads reach the backing collection.
    struct CountingStore {
        inner: InMemoryStore,
        loads: AtomicUsize,
        finds: AtomicUsize,
    }

    impl CountingStore {
        fn seeded(count: ArticleNumber) -> Self {
            Self {
                inner: InMemoryStore::seeded(count),
                loads: AtomicUsize::new(0),
                finds: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ArticleStore for CountingStore {
        async fn load_all(&self) -> Vec<Article> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load_all().await
        }

        async fn find(&self, number: ArticleNumber) -> Option<Article> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            self.inner.find(number).await
        }

        async fn save(&self, article: NewArticle) -> Article {
            self.inner.save(article).await
        }

        async fn update(&self, article: Article) -> Result<(), NewsError> {
            self.inner.update(article).await
        }

        async fn delete(&self, number: ArticleNumber) -> bool {
            self.inner.delete(number).await
        }
    }

    fn coordinator(count: ArticleNumber) -> (Arc<CountingStore>, CacheCoordinator) {
        let store = Arc::new(CountingStore::seeded(count));
        let coordinator = CacheCoordinator::new(store.clone(), NewsCache::new());
        (store, coordinator)
    }

    #[tokio::test]
    async fn test_repeated_get_article_served_from_cache() {
        let (store, coordinator) = coordinator(3);

        let first = coordinator.get_article(2).await.unwrap();
        let second = coordinator.get_article(2).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(store.finds.load(Ordering::SeqCst), 1);
        assert_eq!(coordinator.cache().stats().hits, 1);
    }

    #[tokio::test]
    async fn test_missing_page_index_shares_page_zero_entry() {
        let (store, coordinator) = coordinator(25);

        let implicit = coordinator.get_page(None).await;
        let explicit = coordinator.get_page(Some(0)).await;

        assert_eq!(implicit, explicit);
        assert_eq!(implicit.page_index, 0);
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_create_is_visible_in_next_page() {
        let (_, coordinator) = coordinator(10);

        let before = coordinator.get_page(Some(1)).await;
        assert!(before.content.is_empty());

        let created = coordinator
            .create(NewArticle::new("fresh", "fresh text", "reporter"))
            .await;
        let after = coordinator.get_page(Some(1)).await;

        assert_eq!(created.number, 11);
        assert_eq!(after.content, vec![created]);
        assert_eq!(after.total_item_count, 11);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let (_, coordinator) = coordinator(5);
        coordinator.get_article(5).await.unwrap();

        assert!(coordinator.delete(5).await);

        assert_eq!(coordinator.get_article(5).await, Err(NewsError::NotFound(5)));
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let (_, coordinator) = coordinator(1);

        assert!(!coordinator.delete(42).await);
    }

    #[tokio::test]
    async fn test_update_evicts_cached_article() {
        let (_, coordinator) = coordinator(3);
        coordinator.get_article(1).await.unwrap();

        coordinator
            .update(Article::new(1, "edited", "edited text", "editor"))
            .await
            .unwrap();

        let article = coordinator.get_article(1).await.unwrap();
        assert_eq!(article.title, "edited");
        assert_eq!(coordinator.get_text(1).await.unwrap(), "edited text");
        assert_eq!(coordinator.get_author(1).await.unwrap(), "editor");
    }

    #[tokio::test]
    async fn test_failed_update_keeps_cache() {
        let (store, coordinator) = coordinator(3);
        coordinator.get_article(1).await.unwrap();

        let result = coordinator
            .update(Article::new(99, "t", "body", "a"))
            .await;
        coordinator.get_article(1).await.unwrap();

        assert_eq!(result, Err(NewsError::NotFound(99)));
        assert_eq!(store.finds.load(Ordering::SeqCst), 1);
        assert_eq!(
            coordinator.cache().stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let (store, coordinator) = coordinator(0);

        assert_eq!(coordinator.get_article(1).await, Err(NewsError::NotFound(1)));
        assert_eq!(coordinator.get_article(1).await, Err(NewsError::NotFound(1)));
        assert_eq!(store.finds.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_text_and_author_are_not_cached() {
        let (store, coordinator) = coordinator(2);

        coordinator.get_text(1).await.unwrap();
        coordinator.get_text(1).await.unwrap();
        coordinator.get_author(1).await.unwrap();

        assert_eq!(store.finds.load(Ordering::SeqCst), 3);
        assert_eq!(coordinator.get_text(3).await, Err(NewsError::NotFound(3)));
        assert_eq!(coordinator.get_author(3).await, Err(NewsError::NotFound(3)));
    }

    #[tokio::test]
    async fn test_write_evicts_unrelated_entries() {
        let (store, coordinator) = coordinator(30);
        coordinator.get_page(Some(2)).await;
        coordinator.get_article(3).await.unwrap();

        coordinator.delete(30).await;
        let page = coordinator.get_page(Some(2)).await;
        coordinator.get_article(3).await.unwrap();

        assert_eq!(page.returned_count, 9);
        assert_eq!(page.page_count, 2);
        assert_eq!(store.loads.load(Ordering::SeqCst), 2);
        assert_eq!(store.finds.load(Ordering::SeqCst), 2);
    }
}
