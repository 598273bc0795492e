//! Repository for `video_ratings`.

use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use super::counters;
use crate::models::rating::VideoRating;

const COLUMNS: &str = "id, video_id, user_id, rating, created_at, updated_at";

pub struct RatingRepo;

impl RatingRepo {
    pub async fn find(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
    ) -> Result<Option<VideoRating>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM video_ratings WHERE video_id = $1 AND user_id = $2");
        sqlx::query_as::<_, VideoRating>(&query)
            .bind(video_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace a user's rating, returning it with the recounted
    /// video average.
    ///
    /// Returns `None` if the video or user does not exist.
    pub async fn upsert(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
        rating: f64,
    ) -> Result<Option<(VideoRating, f64)>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if counters::lock_video(&mut *tx, video_id).await?.is_none()
            || !counters::lock_user(&mut *tx, user_id).await?
        {
            tx.rollback().await?;
            return Ok(None);
        }

        let query = format!(
            "INSERT INTO video_ratings (video_id, user_id, rating)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_video_ratings_video_id_user_id
             DO UPDATE SET rating = EXCLUDED.rating
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, VideoRating>(&query)
            .bind(video_id)
            .bind(user_id)
            .bind(rating)
            .fetch_one(&mut *tx)
            .await?;

        let average = counters::recount_video_rating(&mut *tx, video_id).await?;
        counters::recount_user(&mut *tx, user_id).await?;
        tx.commit().await?;

        tracing::debug!(video_id, user_id, rating, average, "Stored video rating");
        Ok(Some((row, average)))
    }

    /// Remove a user's rating and recount. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, video_id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;
        counters::lock_video_row(&mut *tx, video_id).await?;
        counters::lock_user(&mut *tx, user_id).await?;

        let result = sqlx::query("DELETE FROM video_ratings WHERE video_id = $1 AND user_id = $2")
            .bind(video_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        counters::recount_video_rating(&mut *tx, video_id).await?;
        counters::recount_user(&mut *tx, user_id).await?;
        tx.commit().await?;
        Ok(true)
    }
}
