use std::collections::HashMap;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::news::{Article, ArticleNumber, NewArticle, NewsError};
use crate::store::ArticleStore;

#[derive(Debug, Default)]
struct Inner {
    articles: HashMap<ArticleNumber, Article>,
    last_number: ArticleNumber,
}

/// Process-local store. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    inner: RwLock<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `count` generated articles numbered `1..=count`.
    pub fn seeded(count: ArticleNumber) -> Self {
        let articles: HashMap<_, _> = (1..=count)
            .map(|number| (number, generated_article(number)))
            .collect();
        let last_number = count;

        info!("Seeded article store with {} articles", articles.len());

        Self {
            inner: RwLock::new(Inner {
                articles,
                last_number,
            }),
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn generated_article(number: ArticleNumber) -> Article {
    Article::new(
        number,
        format!("News #{number}"),
        format!("Text of news #{number}"),
        format!("Author #{number}"),
    )
}

#[async_trait::async_trait]
impl ArticleStore for InMemoryStore {
    async fn load_all(&self) -> Vec<Article> {
        self.inner.read().await.articles.values().cloned().collect()
    }

    async fn find(&self, number: ArticleNumber) -> Option<Article> {
        self.inner.read().await.articles.get(&number).cloned()
    }

    async fn save(&self, article: NewArticle) -> Article {
        let mut inner = self.inner.write().await;
        inner.last_number += 1;

        let article = article.with_number(inner.last_number);
        inner.articles.insert(article.number, article.clone());

        debug!("saved article {}", article.number);
        article
    }

    async fn update(&self, article: Article) -> Result<(), NewsError> {
        let mut inner = self.inner.write().await;
        let slot = inner
            .articles
            .get_mut(&article.number)
            .ok_or(NewsError::NotFound(article.number))?;

        debug!("updated article {}", article.number);
        *slot = article;
        Ok(())
    }

    async fn delete(&self, number: ArticleNumber) -> bool {
        let removed = self.inner.write().await.articles.remove(&number).is_some();
        debug!("delete article {}: removed={}", number, removed);
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_seeded_store_numbers_from_one() {
        let store = InMemoryStore::seeded(5);

        let mut numbers: Vec<_> = store.load_all().await.iter().map(|a| a.number).collect();
        numbers.sort();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.find(3).await.unwrap().title, "News #3");
    }

    #[tokio::test]
    async fn test_save_numbers_follow_store_size() {
        let store = InMemoryStore::seeded(3);

        let saved = store.save(NewArticle::new("t", "body", "a")).await;

        assert_eq!(saved.number, 4);
        assert_eq!(saved.number as usize, store.len().await);
        assert_eq!(store.find(4).await, Some(saved));
    }

    #[tokio::test]
    async fn test_numbers_are_not_reused_after_delete() {
        let store = InMemoryStore::seeded(3);

        assert!(store.delete(3).await);
        let saved = store.save(NewArticle::new("t", "body", "a")).await;

        assert_eq!(saved.number, 4);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let store = InMemoryStore::seeded(2);

        store
            .update(Article::new(2, "new title", "new text", "new author"))
            .await
            .unwrap();

        assert_eq!(
            store.find(2).await,
            Some(Article::new(2, "new title", "new text", "new author"))
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemoryStore::new();

        let result = store.update(Article::new(9, "t", "body", "a")).await;

        assert_eq!(result, Err(NewsError::NotFound(9)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let store = InMemoryStore::seeded(1);

        assert!(!store.delete(2).await);
        assert!(store.delete(1).await);
        assert!(!store.delete(1).await);
    }
}
