//! Application state for the API server.

use std::sync::Arc;

use tracing::debug;

use super::cache::PageCache;
use super::notifier::{ChangeNotifier, UpdateMessage};
use crate::auth::SessionConfig;
use crate::db::Database;

/// Shared application state.
///
/// Generic over `D: Database` so tests can run against an in-memory SQLite
/// database and the server against a file.
pub struct AppState<D: Database> {
    db: Arc<D>,
    notifier: ChangeNotifier,
    pages: PageCache,
    sessions: SessionConfig,
}

// Manual Clone impl - only the Arc needs cloning, not D
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            notifier: self.notifier.clone(),
            pages: self.pages.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    pub fn new(db: D, notifier: ChangeNotifier, sessions: SessionConfig) -> Self {
        Self {
            db: Arc::new(db),
            notifier,
            pages: PageCache::new(),
            sessions,
        }
    }

    /// Get a reference to the database.
    pub fn db(&self) -> &D {
        &self.db
    }

    /// Get a reference to the change notifier.
    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// Get a reference to the rendered-page cache.
    pub fn pages(&self) -> &PageCache {
        &self.pages
    }

    pub fn session_config(&self) -> &SessionConfig {
        &self.sessions
    }

    /// Announce a change and revalidate the public pages it affects.
    pub fn publish(&self, msg: UpdateMessage) {
        let paths = msg.entity().map(|e| e.public_paths()).unwrap_or_default();
        self.notifier.notify(msg);
        self.revalidate(paths);
    }

    /// Drop cached renderings of `paths` and broadcast the revalidation.
    pub fn revalidate(&self, paths: &[&str]) {
        if paths.is_empty() {
            return;
        }
        let dropped = self.pages.invalidate(paths);
        debug!(?paths, dropped, "Revalidated pages");
        self.notifier.notify(UpdateMessage::Revalidated {
            paths: paths.iter().map(|p| p.to_string()).collect(),
        });
    }
}
