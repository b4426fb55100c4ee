use thiserror::Error;

use crate::news::types::ArticleNumber;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NewsError {
    #[error("No article with number {0}")]
    NotFound(ArticleNumber),
}
