//! Denormalized counter maintenance.
//!
//! Counters are recomputed from the source rows after every mutation, inside
//! the mutating transaction. Callers lock the video row first and the user
//! row second (see [`lock_video`] / [`lock_user`]) so concurrent writers for
//! the same video or user serialize and recounts never go stale.

use reviewniverse_core::types::DbId;
use sqlx::PgConnection;

/// Lock a video row for the rest of the transaction, returning its title.
///
/// Returns `None` if the video does not exist or is soft-deleted.
pub(crate) async fn lock_video(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT title FROM videos WHERE id = $1 AND is_delete = false FOR UPDATE",
    )
    .bind(video_id)
    .fetch_optional(conn)
    .await
}

/// Lock a video row whatever its visibility. Used when removing rows that
/// must stay removable after the video is soft-deleted.
pub(crate) async fn lock_video_row(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, DbId>("SELECT id FROM videos WHERE id = $1 FOR UPDATE")
        .bind(video_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Lock a user row for the rest of the transaction.
///
/// Returns `false` if the user does not exist.
pub(crate) async fn lock_user(conn: &mut PgConnection, user_id: DbId) -> Result<bool, sqlx::Error> {
    let row = sqlx::query_scalar::<_, DbId>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
        .bind(user_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

pub(crate) async fn recount_video_views(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "UPDATE videos
         SET view_count = (SELECT COUNT(*) FROM video_view_logs WHERE video_id = $1)
         WHERE id = $1
         RETURNING view_count",
    )
    .bind(video_id)
    .fetch_one(conn)
    .await
}

pub(crate) async fn recount_video_likes(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "UPDATE videos
         SET like_count = (SELECT COUNT(*) FROM video_likes WHERE video_id = $1 AND is_like)
         WHERE id = $1
         RETURNING like_count",
    )
    .bind(video_id)
    .fetch_one(conn)
    .await
}

/// Only public, unblocked reviews count towards a video's review total.
pub(crate) async fn recount_video_reviews(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<i32, sqlx::Error> {
    sqlx::query_scalar::<_, i32>(
        "UPDATE videos
         SET review_count = (
             SELECT COUNT(*) FROM video_reviews
             WHERE video_id = $1 AND is_private = false AND is_block = false
         )
         WHERE id = $1
         RETURNING review_count",
    )
    .bind(video_id)
    .fetch_one(conn)
    .await
}

/// Recompute the average rating, rounded to one decimal place.
pub(crate) async fn recount_video_rating(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<f64, sqlx::Error> {
    sqlx::query_scalar::<_, f64>(
        "UPDATE videos
         SET rating = COALESCE(
             (SELECT ROUND(AVG(rating)::NUMERIC, 1)::FLOAT8 FROM video_ratings WHERE video_id = $1),
             0
         )
         WHERE id = $1
         RETURNING rating",
    )
    .bind(video_id)
    .fetch_one(conn)
    .await
}

/// Recompute every counter on a video.
pub(crate) async fn recount_video(
    conn: &mut PgConnection,
    video_id: DbId,
) -> Result<(), sqlx::Error> {
    recount_video_views(&mut *conn, video_id).await?;
    recount_video_likes(&mut *conn, video_id).await?;
    recount_video_reviews(&mut *conn, video_id).await?;
    recount_video_rating(&mut *conn, video_id).await?;
    Ok(())
}

/// Recompute the like, review and rating counters on a user.
pub(crate) async fn recount_user(conn: &mut PgConnection, user_id: DbId) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE users SET
            like_count = (SELECT COUNT(*) FROM video_likes WHERE user_id = $1 AND is_like),
            review_count = (SELECT COUNT(*) FROM video_reviews WHERE user_id = $1),
            rating_count = (SELECT COUNT(*) FROM video_ratings WHERE user_id = $1)
         WHERE id = $1",
    )
    .bind(user_id)
    .execute(conn)
    .await?;
    Ok(())
}
