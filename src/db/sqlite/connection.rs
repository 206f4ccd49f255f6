//! SQLite database connection and migration management.

use std::path::Path;
use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use super::{
    SqliteContactRepository, SqliteEventRepository, SqliteFabricRepository, SqliteFaqRepository,
    SqliteGalleryRepository, SqliteServiceRepository, SqliteSessionRepository,
    SqliteSettingRepository, SqliteTestimonialRepository, SqliteUserRepository,
};
use crate::db::{Database, DbError, DbResult};

/// Migrations embedded from `migrations/` at compile time.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// SQLite database implementation.
///
/// Provides access to repositories via associated types, avoiding dynamic dispatch.
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    /// Open (creating if missing) a database file at the given path.
    pub async fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Create an in-memory database (useful for testing).
    ///
    /// Every connection to `:memory:` is a separate database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> DbResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Connection {
                message: e.to_string(),
            })?;

        Ok(Self { pool })
    }

    /// Direct access to the pool, for tests and maintenance tasks.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Database for SqliteDatabase {
    type Users<'a> = SqliteUserRepository<'a>;
    type Sessions<'a> = SqliteSessionRepository<'a>;
    type Contacts<'a> = SqliteContactRepository<'a>;
    type Events<'a> = SqliteEventRepository<'a>;
    type Fabrics<'a> = SqliteFabricRepository<'a>;
    type Faqs<'a> = SqliteFaqRepository<'a>;
    type Gallery<'a> = SqliteGalleryRepository<'a>;
    type Services<'a> = SqliteServiceRepository<'a>;
    type Testimonials<'a> = SqliteTestimonialRepository<'a>;
    type Settings<'a> = SqliteSettingRepository<'a>;

    async fn migrate(&self) -> DbResult<()> {
        MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| DbError::Migration {
                message: e.to_string(),
            })
    }

    fn users(&self) -> Self::Users<'_> {
        SqliteUserRepository { pool: &self.pool }
    }

    fn sessions(&self) -> Self::Sessions<'_> {
        SqliteSessionRepository { pool: &self.pool }
    }

    fn contacts(&self) -> Self::Contacts<'_> {
        SqliteContactRepository { pool: &self.pool }
    }

    fn events(&self) -> Self::Events<'_> {
        SqliteEventRepository { pool: &self.pool }
    }

    fn fabrics(&self) -> Self::Fabrics<'_> {
        SqliteFabricRepository { pool: &self.pool }
    }

    fn faqs(&self) -> Self::Faqs<'_> {
        SqliteFaqRepository { pool: &self.pool }
    }

    fn gallery(&self) -> Self::Gallery<'_> {
        SqliteGalleryRepository { pool: &self.pool }
    }

    fn services(&self) -> Self::Services<'_> {
        SqliteServiceRepository { pool: &self.pool }
    }

    fn testimonials(&self) -> Self::Testimonials<'_> {
        SqliteTestimonialRepository { pool: &self.pool }
    }

    fn settings(&self) -> Self::Settings<'_> {
        SqliteSettingRepository { pool: &self.pool }
    }
}
