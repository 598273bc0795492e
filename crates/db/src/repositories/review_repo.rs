//! Repository for `video_reviews`.

use reviewniverse_core::search::Page;
use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use super::counters;
use crate::models::review::{CreateVideoReview, UpdateVideoReview, VideoReview};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_id, user_id, title, content, rating, like_count, is_spoiler, \
                       is_expect, is_private, is_block, user_nickname, user_profile_image, \
                       video_title, created_at, updated_at";

/// Provides CRUD operations for video reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review and recount the video and author.
    ///
    /// Returns `None` if the video is missing or deleted, or the author no
    /// longer exists.
    pub async fn create(
        pool: &PgPool,
        input: &CreateVideoReview,
    ) -> Result<Option<VideoReview>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if counters::lock_video(&mut *tx, input.video_id).await?.is_none()
            || !counters::lock_user(&mut *tx, input.user_id).await?
        {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO video_reviews
                (video_id, user_id, title, content, rating, is_spoiler, is_expect,
                 is_private, user_nickname, user_profile_image, video_title)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, VideoReview>(&query)
            .bind(input.video_id)
            .bind(input.user_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.rating)
            .bind(input.is_spoiler)
            .bind(input.is_expect)
            .bind(input.is_private)
            .bind(&input.user_nickname)
            .bind(&input.user_profile_image)
            .bind(&input.video_title)
            .fetch_one(&mut *tx)
            .await?;

        counters::recount_video_reviews(&mut *tx, input.video_id).await?;
        counters::recount_user(&mut *tx, input.user_id).await?;
        tx.commit().await?;

        Ok(Some(review))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<VideoReview>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM video_reviews WHERE id = $1");
        sqlx::query_as::<_, VideoReview>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public reviews of a video, newest first, with the total count.
    ///
    /// Private and blocked reviews are excluded.
    pub async fn list_public(
        pool: &PgPool,
        video_id: DbId,
        page: Page,
    ) -> Result<(i64, Vec<VideoReview>), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM video_reviews
             WHERE video_id = $1 AND is_private = false AND is_block = false",
        )
        .bind(video_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM video_reviews
             WHERE video_id = $1 AND is_private = false AND is_block = false
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let reviews = sqlx::query_as::<_, VideoReview>(&query)
            .bind(video_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((total, reviews))
    }

    /// Update a review. Only non-`None` fields in `input` are applied.
    ///
    /// The video's review count is recounted since `is_private` may change.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        video_id: DbId,
        input: &UpdateVideoReview,
    ) -> Result<Option<VideoReview>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        counters::lock_video_row(&mut *tx, video_id).await?;

        let query = format!(
            "UPDATE video_reviews SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                rating = COALESCE($5, rating),
                is_spoiler = COALESCE($6, is_spoiler),
                is_expect = COALESCE($7, is_expect),
                is_private = COALESCE($8, is_private)
             WHERE id = $1 AND video_id = $2
             RETURNING {COLUMNS}"
        );
        let review = sqlx::query_as::<_, VideoReview>(&query)
            .bind(id)
            .bind(video_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.rating)
            .bind(input.is_spoiler)
            .bind(input.is_expect)
            .bind(input.is_private)
            .fetch_optional(&mut *tx)
            .await?;

        if review.is_some() {
            counters::recount_video_reviews(&mut *tx, video_id).await?;
        }
        tx.commit().await?;
        Ok(review)
    }

    /// Delete a review and recount the video and author.
    ///
    /// Returns `true` if the row was deleted.
    pub async fn delete(
        pool: &PgPool,
        id: DbId,
        video_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        counters::lock_video_row(&mut *tx, video_id).await?;
        counters::lock_user(&mut *tx, user_id).await?;

        let result = sqlx::query("DELETE FROM video_reviews WHERE id = $1 AND video_id = $2")
            .bind(id)
            .bind(video_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        counters::recount_video_reviews(&mut *tx, video_id).await?;
        counters::recount_user(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}
