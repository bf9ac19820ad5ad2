//! Postgres-backed photo store.
//!
//! Pagination is keyset-based: the cursor carries the full sort key and the
//! next page is selected with a row comparison `(created_at, id) <
//! ($cursor_ts, $cursor_id)`, so pages never duplicate or skip records even
//! when timestamps collide.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::StoreError;

use super::{Photo, PhotoDraft, PhotoQuery, PhotoStore};

/// Postgres error code for `insufficient_privilege`.
const PG_INSUFFICIENT_PRIVILEGE: &str = "42501";

/// Photo store backed by a Postgres database.
#[derive(Clone)]
pub struct PgPhotoStore {
    pool: PgPool,
}

impl PgPhotoStore {
    /// Create a store over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

/// Connect a pool to the given database URL.
pub async fn connect_pool(database_url: &str) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .map_err(map_sqlx_error)
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(PG_INSUFFICIENT_PRIVILEGE) => {
            StoreError::PermissionDenied(db.message().to_string())
        }
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            StoreError::Connection(err.to_string())
        }
        _ => StoreError::Backend(err.to_string()),
    }
}

#[async_trait]
impl PhotoStore for PgPhotoStore {
    async fn query(&self, query: PhotoQuery) -> Result<Vec<Photo>, StoreError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT id, image_url, comment, location, created_at FROM photos");

        let mut has_where = false;
        if let Some(ref location) = query.location {
            builder.push(" WHERE location = ").push_bind(location);
            has_where = true;
        }
        if let Some(after) = query.after {
            builder.push(if has_where { " AND " } else { " WHERE " });
            builder
                .push("(created_at, id) < (")
                .push_bind(after.created_at)
                .push(", ")
                .push_bind(after.id)
                .push(")");
        }
        builder.push(" ORDER BY created_at DESC, id DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(i64::from(limit));
        }

        let photos = builder
            .build_query_as::<Photo>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        debug!(
            returned = photos.len(),
            location = query.location.as_deref().unwrap_or("<any>"),
            "photo query"
        );
        Ok(photos)
    }

    async fn insert(&self, draft: PhotoDraft) -> Result<Photo, StoreError> {
        sqlx::query_as::<_, Photo>(
            "INSERT INTO photos (image_url, comment, location) \
             VALUES ($1, $2, $3) \
             RETURNING id, image_url, comment, location, created_at",
        )
        .bind(&draft.image_url)
        .bind(&draft.comment)
        .bind(&draft.location)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn locations(&self) -> Result<Vec<String>, StoreError> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT DISTINCT location FROM photos ORDER BY location")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(|(location,)| location).collect())
    }
}
