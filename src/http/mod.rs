// HTTP surface of the news catalog

pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::{CacheCoordinator, NewsCache};
use crate::store::ArticleStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CacheCoordinator>,
}

impl AppState {
    /// Wraps `store` in a coordinator with a fresh, empty cache.
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self {
            catalog: Arc::new(CacheCoordinator::new(store, NewsCache::new())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/news",
            get(routes::get_page)
                .post(routes::create_news)
                .patch(routes::update_news),
        )
        .route(
            "/news/{id}",
            get(routes::get_news).delete(routes::delete_news),
        )
        .route("/news/{id}/text", get(routes::get_news_text))
        .route("/news/{id}/author", get(routes::get_news_author))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
