pub mod cache;

use std::{fmt::Display, sync::Arc};

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use self::cache::{CacheKey, InMemoryCache, MovieCache};
use crate::configuration::TmdbSettings;

#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Request to the movie catalog failed")]
    Request(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeWindow {
    #[default]
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }

    /// Anything the catalog does not know falls back to a day.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value {
            Some("week") => TimeWindow::Week,
            _ => TimeWindow::Day,
        }
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One GET against the catalog API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbRequest {
    pub path: String,
    pub params: Vec<(&'static str, String)>,
    pub cache_key: CacheKey,
}

impl TmdbRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

pub struct TmdbClient {
    http: reqwest::Client,
    base_url: String,
    access_token: SecretString,
    cache: Arc<dyn MovieCache>,
}

impl TmdbClient {
    pub fn new(settings: &TmdbSettings) -> Result<Self, TmdbError> {
        let cache = InMemoryCache::new(settings.cache_ttl(), settings.cache_capacity);
        Self::with_cache(settings, Arc::new(cache))
    }

    pub fn with_cache(
        settings: &TmdbSettings,
        cache: Arc<dyn MovieCache>,
    ) -> Result<Self, TmdbError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()?;
        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            access_token: settings.access_token.clone(),
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<dyn MovieCache> {
        &self.cache
    }

    #[tracing::instrument(skip_all, fields(key = %request.cache_key))]
    pub async fn fetch(&self, request: &TmdbRequest) -> Result<Value, TmdbError> {
        if let Some(hit) = self.cache.get(&request.cache_key).await {
            debug!("Cache hit");
            return Ok(hit);
        }
        debug!(path = %request.path, "Cache miss, querying catalog");

        let mut builder = self
            .http
            .get(format!("{}{}", self.base_url, request.path))
            .query(&request.params);
        let token = self.access_token.expose_secret();
        if !token.is_empty() {
            builder = builder.bearer_auth(token);
        }
        let body: Value = builder.send().await?.error_for_status()?.json().await?;

        self.cache
            .set(request.cache_key.clone(), body.clone())
            .await;
        Ok(body)
    }
}
