use std::{
    fmt::Display,
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use serde_json::Value;

use super::TimeWindow;

/// Identifies one cached upstream response: the operation plus every
/// parameter that changes what the catalog returns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Details {
        movie_id: i64,
        language: String,
    },
    Search {
        title: String,
        language: String,
        page: u32,
    },
    Trending {
        language: String,
        time_window: TimeWindow,
    },
    GenreList {
        language: String,
        page: u32,
    },
    ByGenre {
        genres: Option<String>,
        language: String,
        page: u32,
    },
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::Details { movie_id, language } => write!(f, "details:{movie_id}:{language}"),
            CacheKey::Search {
                title,
                language,
                page,
            } => write!(f, "search:{title}:{language}:{page}"),
            CacheKey::Trending {
                language,
                time_window,
            } => write!(f, "trending:{language}:{time_window}"),
            CacheKey::GenreList { language, page } => write!(f, "genres:{language}:{page}"),
            CacheKey::ByGenre {
                genres,
                language,
                page,
            } => write!(
                f,
                "by_genre:{}:{language}:{page}",
                genres.as_deref().unwrap_or("*")
            ),
        }
    }
}

/// Storage for catalog responses, consulted before every upstream call.
#[async_trait]
pub trait MovieCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Option<Value>;
    async fn set(&self, key: CacheKey, value: Value);
    /// Returns whether an entry was removed.
    async fn evict(&self, key: &CacheKey) -> bool;
}

struct Entry {
    value: Value,
    stored_at: DateTime<Utc>,
    seq: u64,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        now - self.stored_at >= ttl
    }
}

/// Process-local cache with a fixed time to live and a bounded number of
/// entries. When full, expired entries go first, then the oldest one.
pub struct InMemoryCache {
    entries: DashMap<CacheKey, Entry>,
    ttl: TimeDelta,
    capacity: usize,
    next_seq: AtomicU64,
}

impl InMemoryCache {
    pub fn new(ttl: TimeDelta, capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            capacity,
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes the entry only if it is still expired at `now`.
    fn remove_expired(&self, key: &CacheKey, now: DateTime<Utc>) -> bool {
        self.entries
            .remove_if(key, |_, e| e.is_expired(now, self.ttl))
            .is_some()
    }

    fn make_room(&self, now: DateTime<Utc>) {
        self.entries.retain(|_, e| !e.is_expired(now, self.ttl));
        if self.entries.len() < self.capacity {
            return;
        }
        let oldest = self
            .entries
            .iter()
            .min_by_key(|e| e.seq)
            .map(|e| e.key().clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

#[async_trait]
impl MovieCache for InMemoryCache {
    async fn get(&self, key: &CacheKey) -> Option<Value> {
        let now = Utc::now();
        if let Some(entry) = self.entries.get(key) {
            if !entry.is_expired(now, self.ttl) {
                return Some(entry.value.clone());
            }
        }
        self.remove_expired(key, now);
        None
    }

    async fn set(&self, key: CacheKey, value: Value) {
        if self.capacity == 0 {
            return;
        }
        let now = Utc::now();
        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.make_room(now);
        }
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            key,
            Entry {
                value,
                stored_at: now,
                seq,
            },
        );
    }

    async fn evict(&self, key: &CacheKey) -> bool {
        self.entries.remove(key).is_some()
    }
}
