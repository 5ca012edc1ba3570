use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::tmdb::{cache::CacheKey, TimeWindow, TmdbClient, TmdbError, TmdbRequest};

pub const DEFAULT_LANGUAGE: &str = "fr-FR";
pub const DEFAULT_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieOperation {
    Details,
    Search,
    Trending,
    GenreList,
    ByGenre,
}

impl MovieOperation {
    /// Message shown to API clients when the catalog call fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            MovieOperation::Details => "Erreur lors de la récupération des détails du film",
            MovieOperation::Search => "Erreur lors de la recherche du film",
            MovieOperation::Trending => "Erreur lors de la récupération des films en tendance",
            MovieOperation::GenreList => "Erreur lors de la liste des genres de films",
            MovieOperation::ByGenre => "Erreur lors de la récupération des films par genre",
        }
    }
}

#[derive(Error, Debug)]
#[error("{operation:?} request failed")]
pub struct MovieError {
    pub operation: MovieOperation,
    #[source]
    pub source: TmdbError,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct DetailsQuery {
    pub language: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SearchQuery {
    pub title: Option<String>,
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct TrendingQuery {
    pub language: Option<String>,
    pub time_window: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct GenreListQuery {
    pub language: Option<String>,
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct ByGenreQuery {
    pub language: Option<String>,
    pub genre_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_page")]
    pub page: Option<u32>,
}

/// Anything that is not a non-negative integer counts as no page at all.
fn lenient_page<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|p| p.trim().parse::<u32>().ok()))
}

fn language_or_default(language: Option<String>) -> String {
    language
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

fn page_or_default(page: Option<u32>) -> u32 {
    page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE)
}

pub fn details_request(movie_id: i64, query: DetailsQuery) -> TmdbRequest {
    let language = language_or_default(query.language);
    TmdbRequest {
        path: format!("/movie/{movie_id}"),
        params: vec![("language", language.clone())],
        cache_key: CacheKey::Details { movie_id, language },
    }
}

pub fn search_request(query: SearchQuery) -> TmdbRequest {
    let title = query.title.unwrap_or_default();
    let language = language_or_default(query.language);
    let page = page_or_default(query.page);
    TmdbRequest {
        path: "/search/movie".into(),
        params: vec![
            ("query", title.clone()),
            ("language", language.clone()),
            ("page", page.to_string()),
        ],
        cache_key: CacheKey::Search {
            title,
            language,
            page,
        },
    }
}

pub fn trending_request(query: TrendingQuery) -> TmdbRequest {
    let language = language_or_default(query.language);
    let time_window = TimeWindow::parse_or_default(query.time_window.as_deref());
    TmdbRequest {
        path: format!("/trending/movie/{time_window}"),
        params: vec![("language", language.clone())],
        cache_key: CacheKey::Trending {
            language,
            time_window,
        },
    }
}

pub fn genre_list_request(query: GenreListQuery) -> TmdbRequest {
    let language = language_or_default(query.language);
    let page = page_or_default(query.page);
    TmdbRequest {
        path: "/genre/movie/list".into(),
        params: vec![("language", language.clone()), ("page", page.to_string())],
        cache_key: CacheKey::GenreList { language, page },
    }
}

/// `genre_id` is forwarded as `with_genres`: `28,12` matches any of the
/// genres, `28|12` all of them.
pub fn by_genre_request(query: ByGenreQuery) -> TmdbRequest {
    let language = language_or_default(query.language);
    let page = page_or_default(query.page);
    let genres = query.genre_id.filter(|g| !g.is_empty());

    let mut params = vec![("language", language.clone())];
    if let Some(genres) = &genres {
        params.push(("with_genres", genres.clone()));
    }
    params.extend([
        ("include_adult", "false".to_string()),
        ("include_video", "false".to_string()),
        ("page", page.to_string()),
        ("sort_by", "popularity.desc".to_string()),
    ]);

    TmdbRequest {
        path: "/discover/movie".into(),
        params,
        cache_key: CacheKey::ByGenre {
            genres,
            language,
            page,
        },
    }
}

#[derive(Clone)]
pub struct MoviesService {
    client: Arc<TmdbClient>,
}

impl MoviesService {
    pub fn new(client: Arc<TmdbClient>) -> Self {
        MoviesService { client }
    }

    async fn fetch(
        &self,
        operation: MovieOperation,
        request: TmdbRequest,
    ) -> Result<Value, MovieError> {
        self.client
            .fetch(&request)
            .await
            .map_err(|source| MovieError { operation, source })
    }

    pub async fn details(&self, movie_id: i64, query: DetailsQuery) -> Result<Value, MovieError> {
        self.fetch(MovieOperation::Details, details_request(movie_id, query))
            .await
    }

    pub async fn search(&self, query: SearchQuery) -> Result<Value, MovieError> {
        self.fetch(MovieOperation::Search, search_request(query))
            .await
    }

    pub async fn trending(&self, query: TrendingQuery) -> Result<Value, MovieError> {
        self.fetch(MovieOperation::Trending, trending_request(query))
            .await
    }

    pub async fn genre_list(&self, query: GenreListQuery) -> Result<Value, MovieError> {
        self.fetch(MovieOperation::GenreList, genre_list_request(query))
            .await
    }

    pub async fn by_genre(&self, query: ByGenreQuery) -> Result<Value, MovieError> {
        self.fetch(MovieOperation::ByGenre, by_genre_request(query))
            .await
    }
}
