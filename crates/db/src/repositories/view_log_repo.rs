//! Repository for `video_view_logs`.

use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use super::counters;

pub struct ViewLogRepo;

impl ViewLogRepo {
    /// Record a view and return the recounted `view_count`.
    ///
    /// At most one log is written per client IP, video and calendar day;
    /// repeat views on the same day only return the current count. A view
    /// without a client IP is always recorded. Returns `None` if the video
    /// does not exist or is deleted.
    pub async fn record_view(
        pool: &PgPool,
        video_id: DbId,
        user_id: Option<DbId>,
        client_ip: Option<&str>,
    ) -> Result<Option<i32>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if counters::lock_video(&mut *tx, video_id).await?.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let inserted = sqlx::query(
            "INSERT INTO video_view_logs (video_id, user_id, client_ip)
             SELECT $1, $2, $3
             WHERE $3::TEXT IS NULL OR NOT EXISTS (
                 SELECT 1 FROM video_view_logs
                 WHERE video_id = $1
                   AND client_ip = $3
                   AND created_at::date = CURRENT_DATE
             )",
        )
        .bind(video_id)
        .bind(user_id)
        .bind(client_ip)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let view_count = counters::recount_video_views(&mut *tx, video_id).await?;
        tx.commit().await?;

        if inserted > 0 {
            tracing::debug!(video_id, view_count, "Recorded video view");
        }
        Ok(Some(view_count))
    }

    /// Number of view logs stored for a video.
    pub async fn count_for_video(pool: &PgPool, video_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM video_view_logs WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(pool)
            .await
    }
}
