pub mod memory;

pub use memory::InMemoryStore;

use crate::news::{Article, ArticleNumber, NewArticle, NewsError};

/// Backing collection of articles.
///
/// Implementations must allow concurrent reads and serialise mutations of the
/// same article.
#[async_trait::async_trait]
pub trait ArticleStore: Send + Sync {
    /// Every stored article, in no particular order.
    async fn load_all(&self) -> Vec<Article>;

    async fn find(&self, number: ArticleNumber) -> Option<Article>;

    /// Stores a new article and returns it with its assigned number.
    async fn save(&self, article: NewArticle) -> Article;

    /// Replaces the article with the same number.
    async fn update(&self, article: Article) -> Result<(), NewsError>;

    /// Returns whether an article was removed.
    async fn delete(&self, number: ArticleNumber) -> bool;
}
