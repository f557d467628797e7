//! Repository for the `tbl_123_posts` table.

use lostfound_core::item::ItemStatus;
use lostfound_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::{CreateItem, Item, UpdateItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, item_name, status, location_lost, location_found, lost_date, \
    found_date, category, color, description, contact_email, contact_phone, \
    security_question, security_answer, image_url, user_id, created_at, updated_at";

/// Provides CRUD operations for item records.
pub struct ItemRepo;

impl ItemRepo {
    /// Insert a new item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateItem) -> Result<Item, sqlx::Error> {
        let query = format!(
            "INSERT INTO tbl_123_posts (item_name, status, location_lost, location_found, \
                lost_date, found_date, category, color, description, contact_email, \
                contact_phone, security_question, security_answer, image_url, user_id) \
             VALUES ($1, COALESCE($2, 'Lost'), $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(&input.item_name)
            .bind(input.status.map(ItemStatus::as_str))
            .bind(&input.location_lost)
            .bind(&input.location_found)
            .bind(&input.lost_date)
            .bind(&input.found_date)
            .bind(&input.category)
            .bind(&input.color)
            .bind(&input.description)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.security_question)
            .bind(&input.security_answer)
            .bind(&input.image_url)
            .bind(&input.user_id)
            .fetch_one(pool)
            .await
    }

    /// Find an item by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tbl_123_posts WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an item by exact name. When several share the name, the lowest id wins.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tbl_123_posts WHERE item_name = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List every item, ordered by id.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tbl_123_posts ORDER BY id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// List the first `limit` items, ordered by id.
    pub async fn list_limited(pool: &PgPool, limit: i64) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tbl_123_posts ORDER BY id LIMIT $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// List the items reported by one user, ordered by id.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tbl_123_posts WHERE user_id = $1 ORDER BY id");
        sqlx::query_as::<_, Item>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an item. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateItem,
    ) -> Result<Option<Item>, sqlx::Error> {
        let query = format!(
            "UPDATE tbl_123_posts SET \
                item_name = COALESCE($2, item_name), \
                status = COALESCE($3, status), \
                location_lost = COALESCE($4, location_lost), \
                location_found = COALESCE($5, location_found), \
                lost_date = COALESCE($6, lost_date), \
                found_date = COALESCE($7, found_date), \
                category = COALESCE($8, category), \
                color = COALESCE($9, color), \
                description = COALESCE($10, description), \
                contact_email = COALESCE($11, contact_email), \
                contact_phone = COALESCE($12, contact_phone), \
                security_question = COALESCE($13, security_question), \
                security_answer = COALESCE($14, security_answer), \
                image_url = COALESCE($15, image_url), \
                user_id = COALESCE($16, user_id), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .bind(&input.item_name)
            .bind(input.status.map(ItemStatus::as_str))
            .bind(&input.location_lost)
            .bind(&input.location_found)
            .bind(&input.lost_date)
            .bind(&input.found_date)
            .bind(&input.category)
            .bind(&input.color)
            .bind(&input.description)
            .bind(&input.contact_email)
            .bind(&input.contact_phone)
            .bind(&input.security_question)
            .bind(&input.security_answer)
            .bind(&input.image_url)
            .bind(&input.user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tbl_123_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the items pointing at an image URL.
    pub async fn count_by_image_url(pool: &PgPool, url: &str) -> Result<i64, sqlx::Error> {
        let query = "SELECT COUNT(*) FROM tbl_123_posts WHERE image_url = $1";
        sqlx::query_scalar::<_, i64>(query)
            .bind(url)
            .fetch_one(pool)
            .await
    }
}
