//! The persistence seam used by the item service.
//!
//! Handlers never hold a pool directly; they go through an injected
//! `Arc<dyn ItemStore>` so tests can swap in an in-memory store.

use async_trait::async_trait;
use lostfound_core::types::DbId;

use crate::models::item::{CreateItem, Item, UpdateItem};
use crate::repositories::ItemRepo;
use crate::DbPool;

/// Async access to item records.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    async fn list_all(&self) -> Result<Vec<Item>, sqlx::Error>;

    async fn list_limited(&self, limit: i64) -> Result<Vec<Item>, sqlx::Error>;

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Item>, sqlx::Error>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, sqlx::Error>;

    /// Exact name match; the lowest id wins when names collide.
    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, sqlx::Error>;

    async fn create(&self, input: &CreateItem) -> Result<Item, sqlx::Error>;

    /// Partial update. `None` when the id does not exist.
    async fn update(&self, id: DbId, input: &UpdateItem) -> Result<Option<Item>, sqlx::Error>;

    /// `true` when a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Number of records whose `image_url` is exactly `url`.
    async fn count_by_image_url(&self, url: &str) -> Result<i64, sqlx::Error>;
}

/// [`ItemStore`] backed by PostgreSQL through [`ItemRepo`].
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: DbPool,
}

impl PgItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn list_all(&self) -> Result<Vec<Item>, sqlx::Error> {
        ItemRepo::list_all(&self.pool).await
    }

    async fn list_limited(&self, limit: i64) -> Result<Vec<Item>, sqlx::Error> {
        ItemRepo::list_limited(&self.pool, limit).await
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Item>, sqlx::Error> {
        ItemRepo::list_by_user(&self.pool, user_id).await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        ItemRepo::find_by_id(&self.pool, id).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Item>, sqlx::Error> {
        ItemRepo::find_by_name(&self.pool, name).await
    }

    async fn create(&self, input: &CreateItem) -> Result<Item, sqlx::Error> {
        ItemRepo::create(&self.pool, input).await
    }

    async fn update(&self, id: DbId, input: &UpdateItem) -> Result<Option<Item>, sqlx::Error> {
        ItemRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, sqlx::Error> {
        ItemRepo::delete(&self.pool, id).await
    }

    async fn count_by_image_url(&self, url: &str) -> Result<i64, sqlx::Error> {
        ItemRepo::count_by_image_url(&self.pool, url).await
    }
}
