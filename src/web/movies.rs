use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::Query;
use serde_json::Value;

use super::error::ApiError;
use crate::logic::movies::{
    ByGenreQuery, DetailsQuery, GenreListQuery, MoviesService, SearchQuery, TrendingQuery,
};

#[tracing::instrument(skip(movies))]
pub async fn details(
    State(movies): State<MoviesService>,
    Path(movie_id): Path<i64>,
    Query(query): Query<DetailsQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(movies.details(movie_id, query).await?))
}

#[tracing::instrument(skip(movies))]
pub async fn search(
    State(movies): State<MoviesService>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(movies.search(query).await?))
}

#[tracing::instrument(skip(movies))]
pub async fn trending(
    State(movies): State<MoviesService>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(movies.trending(query).await?))
}

#[tracing::instrument(skip(movies))]
pub async fn genre_list(
    State(movies): State<MoviesService>,
    Query(query): Query<GenreListQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(movies.genre_list(query).await?))
}

#[tracing::instrument(skip(movies))]
pub async fn by_genre(
    State(movies): State<MoviesService>,
    Query(query): Query<ByGenreQuery>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(movies.by_genre(query).await?))
}
