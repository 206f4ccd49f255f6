//! Rendered-page cache.
//!
//! Public pages are cached by path and query string until a change to the
//! content they show revalidates the path.
//!
//! Every path carries a generation that [`PageCache::invalidate`] bumps. A
//! render records the generation before reading the database and stores its
//! result with [`PageCache::insert_if_current`], so a page built from data
//! that changed mid-render is never cached.

use std::sync::Arc;

use dashmap::DashMap;

#[derive(Clone, Default)]
pub struct PageCache {
    pages: Arc<DashMap<String, String>>,
    generations: Arc<DashMap<String, u64>>,
}

/// Cache key for a request: the path plus the raw query, if any.
pub fn cache_key(path: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!("{}?{}", path, q),
        None => path.to_string(),
    }
}

fn key_path(key: &str) -> &str {
    key.split_once('?').map_or(key, |(path, _)| path)
}

impl PageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.pages.get(key).map(|html| html.clone())
    }

    /// Current generation of the path `key` belongs to.
    pub fn generation(&self, key: &str) -> u64 {
        self.generations
            .get(key_path(key))
            .map_or(0, |generation| *generation)
    }

    pub fn insert(&self, key: String, html: String) {
        self.pages.insert(key, html);
    }

    /// Store a rendering unless its path was invalidated since `generation`
    /// was read. Returns whether the page was stored.
    pub fn insert_if_current(&self, key: String, html: String, generation: u64) -> bool {
        // The generation entry stays locked until the page is in, so an
        // invalidation either happens before the check or removes the page.
        let current = self
            .generations
            .entry(key_path(&key).to_string())
            .or_insert(0);
        if *current != generation {
            return false;
        }
        self.pages.insert(key, html);
        true
    }

    /// Drop every cached variant of the given paths. Returns how many
    /// entries were removed.
    pub fn invalidate(&self, paths: &[&str]) -> usize {
        for path in paths {
            *self.generations.entry(path.to_string()).or_insert(0) += 1;
        }

        let mut dropped = 0;
        self.pages.retain(|key, _| {
            let keep = !paths.contains(&key_path(key));
            if !keep {
                dropped += 1;
            }
            keep
        });
        dropped
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
