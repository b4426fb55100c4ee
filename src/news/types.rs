use serde::{Deserialize, Serialize};

/// Unique, stable identifier of an article.
pub type ArticleNumber = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub number: ArticleNumber,
    pub title: String,
    pub text: String,
    pub author: String,
}

/// Article contents before the store has assigned a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub text: String,
    pub author: String,
}

/// Wire form accepted by create and update. `number` is ignored on create and
/// identifies the target on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<ArticleNumber>,
    pub title: String,
    pub text: String,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub content: Vec<Article>,
    pub page_size: usize,
    pub page_index: i64,
    pub page_count: usize,
    pub returned_count: usize,
    pub total_item_count: usize,
}

impl Article {
    pub fn new(
        number: ArticleNumber,
        title: impl Into<String>,
        text: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            number,
            title: title.into(),
            text: text.into(),
            author: author.into(),
        }
    }
}

impl NewArticle {
    pub fn new(title: impl Into<String>, text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            author: author.into(),
        }
    }

    pub fn with_number(self, number: ArticleNumber) -> Article {
        Article {
            number,
            title: self.title,
            text: self.text,
            author: self.author,
        }
    }
}

impl From<ArticleDto> for NewArticle {
    fn from(dto: ArticleDto) -> Self {
        Self {
            title: dto.title,
            text: dto.text,
            author: dto.author,
        }
    }
}

impl ArticleDto {
    /// Converts an update payload into the full replacement record, if it
    /// names its target.
    pub fn into_article(self) -> Option<Article> {
        let number = self.number?;
        Some(NewArticle::from(self).with_number(number))
    }
}
