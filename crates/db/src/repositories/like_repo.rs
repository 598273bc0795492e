//! Repository for `video_likes`.

use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use super::counters;
use crate::models::like::{LikeToggle, VideoLike};

const COLUMNS: &str = "id, video_id, user_id, video_title, is_like, created_at, updated_at";

pub struct LikeRepo;

impl LikeRepo {
    /// The like row for a user and video, if the user ever toggled it.
    pub async fn find(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
    ) -> Result<Option<VideoLike>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM video_likes WHERE video_id = $1 AND user_id = $2");
        sqlx::query_as::<_, VideoLike>(&query)
            .bind(video_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the like state for a user and video.
    ///
    /// The first toggle inserts a liked row; later toggles flip `is_like`.
    /// Video and user counters are recounted in the same transaction.
    /// Returns `None` if the video or user does not exist.
    pub async fn toggle(
        pool: &PgPool,
        video_id: DbId,
        user_id: DbId,
    ) -> Result<Option<LikeToggle>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let Some(video_title) = counters::lock_video(&mut *tx, video_id).await? else {
            tx.rollback().await?;
            return Ok(None);
        };
        if !counters::lock_user(&mut *tx, user_id).await? {
            tx.rollback().await?;
            return Ok(None);
        }

        let is_like = sqlx::query_scalar::<_, bool>(
            "INSERT INTO video_likes (video_id, user_id, video_title, is_like)
             VALUES ($1, $2, $3, true)
             ON CONFLICT ON CONSTRAINT uq_video_likes_video_id_user_id
             DO UPDATE SET is_like = NOT video_likes.is_like
             RETURNING is_like",
        )
        .bind(video_id)
        .bind(user_id)
        .bind(&video_title)
        .fetch_one(&mut *tx)
        .await?;

        let like_count = counters::recount_video_likes(&mut *tx, video_id).await?;
        counters::recount_user(&mut *tx, user_id).await?;
        tx.commit().await?;

        tracing::debug!(video_id, user_id, is_like, like_count, "Toggled video like");
        Ok(Some(LikeToggle {
            is_like,
            like_count,
        }))
    }
}
