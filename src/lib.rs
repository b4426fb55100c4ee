pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod news;
pub mod store;

pub use cache::{CacheCoordinator, NewsCache};
pub use error::RestError;
pub use news::{Article, NewsError, Page};
