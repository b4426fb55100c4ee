use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::info;

use crate::error::RestError;
use crate::http::AppState;
use crate::news::{Article, ArticleDto, ArticleNumber, NewArticle, Page};

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(rename = "pageNumber", default, deserialize_with = "blank_as_none")]
    pub page_number: Option<i64>,
}

/// `?pageNumber=` with no value is treated as if the parameter were absent.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)?.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<ArticleDto>, JsonRejection>,
) -> Result<impl IntoResponse, RestError> {
    let Json(dto) = payload?;
    let article = state.catalog.create(NewArticle::from(dto)).await;

    info!("Created article {}", article.number);
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn delete_news(
    id: Result<Path<ArticleNumber>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<bool>, RestError> {
    let Path(id) = id?;
    let removed = state.catalog.delete(id).await;

    info!("Delete article {}: removed={}", id, removed);
    Ok(Json(removed))
}

pub async fn get_news(
    id: Result<Path<ArticleNumber>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<Article>, RestError> {
    let Path(id) = id?;
    Ok(Json(state.catalog.get_article(id).await?))
}

pub async fn get_page(
    State(state): State<AppState>,
    params: Result<Query<PageParams>, QueryRejection>,
) -> Result<Json<Page>, RestError> {
    let Query(params) = params?;
    Ok(Json(state.catalog.get_page(params.page_number).await))
}

pub async fn update_news(
    State(state): State<AppState>,
    payload: Result<Json<ArticleDto>, JsonRejection>,
) -> Result<StatusCode, RestError> {
    let Json(dto) = payload?;
    let article = dto.into_article().ok_or(RestError::MissingNumber)?;
    let number = article.number;

    state.catalog.update(article).await?;

    info!("Updated article {}", number);
    Ok(StatusCode::CREATED)
}

pub async fn get_news_text(
    id: Result<Path<ArticleNumber>, PathRejection>,
    State(state): State<AppState>,
) -> Result<String, RestError> {
    let Path(id) = id?;
    Ok(state.catalog.get_text(id).await?)
}

pub async fn get_news_author(
    id: Result<Path<ArticleNumber>, PathRejection>,
    State(state): State<AppState>,
) -> Result<String, RestError> {
    let Path(id) = id?;
    Ok(state.catalog.get_author(id).await?)
}
