//! Repository for the `videos` table and its link tables.

use reviewniverse_core::search::{Page, VideoOrder};
use reviewniverse_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use super::contains_pattern;
use super::{ActorRepo, GenreRepo, StaffRepo};
use crate::models::video::{
    ActorCredit, CreateVideo, CreateVideoThumbnail, CreateVideoWatch, StaffCredit, UpdateVideo,
    Video, VideoDetail, VideoSearch, VideoThumbnail, VideoWatch,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_type, title, synopsis, release, runtime, notice_age, rating, \
                       like_count, view_count, review_count, platform_code, platform_id, \
                       is_confirm, is_delete, created_at, updated_at";

const WATCH_COLUMNS: &str = "id, video_id, watch_type, url";

const THUMBNAIL_COLUMNS: &str = "id, video_id, thumbnail_type, url, extension, size";

/// Filter shared by the search count and page queries. Only confirmed,
/// non-deleted videos match.
const SEARCH_FILTER: &str = "($1::BIGINT IS NULL OR id = $1)
               AND ($2::TEXT IS NULL OR video_type = $2)
               AND ($3::TEXT IS NULL OR platform_id = $3)
               AND ($4::TEXT IS NULL OR title ILIKE $4)
               AND ($5::BIGINT IS NULL OR EXISTS (
                   SELECT 1 FROM video_actors va WHERE va.video_id = videos.id AND va.actor_id = $5))
               AND ($6::BIGINT IS NULL OR EXISTS (
                   SELECT 1 FROM video_staff vs WHERE vs.video_id = videos.id AND vs.staff_id = $6))
               AND ($7::BIGINT IS NULL OR EXISTS (
                   SELECT 1 FROM video_genres vg WHERE vg.video_id = videos.id AND vg.genre_id = $7))
               AND is_delete = false AND is_confirm = true";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a video and all of its links in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO videos
                (video_type, title, synopsis, release, runtime, notice_age,
                 platform_code, platform_id, is_confirm)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(&input.video_type)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.release)
            .bind(&input.runtime)
            .bind(&input.notice_age)
            .bind(&input.platform_code)
            .bind(&input.platform_id)
            .bind(input.is_confirm)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_genres_inner(&mut tx, video.id, &input.genre_ids).await?;
        Self::set_actors_inner(&mut tx, video.id, &input.actors).await?;
        Self::set_staff_inner(&mut tx, video.id, &input.staff).await?;
        Self::set_watches_inner(&mut tx, video.id, &input.watches).await?;
        for thumbnail in &input.thumbnails {
            Self::insert_thumbnail_inner(&mut tx, video.id, thumbnail).await?;
        }

        tx.commit().await?;
        Ok(video)
    }

    /// Find a publicly visible video (confirmed and not deleted).
    pub async fn find_visible(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM videos
             WHERE id = $1 AND is_delete = false AND is_confirm = true"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video regardless of its visibility flags.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Load every related collection for a video.
    pub async fn load_detail(pool: &PgPool, video: Video) -> Result<VideoDetail, sqlx::Error> {
        let genres = GenreRepo::list_for_video(pool, video.id).await?;
        let actors = ActorRepo::list_for_video(pool, video.id).await?;
        let staff = StaffRepo::list_for_video(pool, video.id).await?;
        let watches = Self::list_watches(pool, video.id).await?;
        let thumbnails = Self::list_thumbnails(pool, video.id).await?;

        Ok(VideoDetail {
            video,
            genres,
            actors,
            staff,
            watches,
            thumbnails,
        })
    }

    /// Search visible videos, returning the total match count and the
    /// requested page.
    pub async fn search(
        pool: &PgPool,
        params: &VideoSearch,
        page: Page,
        order: VideoOrder,
    ) -> Result<(i64, Vec<Video>), sqlx::Error> {
        let keyword = params.keyword.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM videos WHERE {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(params.video_id)
            .bind(&params.video_type)
            .bind(&params.platform_id)
            .bind(&keyword)
            .bind(params.actor_id)
            .bind(params.staff_id)
            .bind(params.genre_id)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM videos WHERE {SEARCH_FILTER}
             ORDER BY {}
             LIMIT $8 OFFSET $9",
            order.to_sql()
        );
        let videos = sqlx::query_as::<_, Video>(&query)
            .bind(params.video_id)
            .bind(&params.video_type)
            .bind(&params.platform_id)
            .bind(&keyword)
            .bind(params.actor_id)
            .bind(params.staff_id)
            .bind(params.genre_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((total, videos))
    }

    /// Update a video. Scalar fields are applied when `Some`; link lists
    /// replace the existing links when `Some`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE videos SET
                video_type = COALESCE($2, video_type),
                title = COALESCE($3, title),
                synopsis = COALESCE($4, synopsis),
                release = COALESCE($5, release),
                runtime = COALESCE($6, runtime),
                notice_age = COALESCE($7, notice_age),
                platform_code = COALESCE($8, platform_code),
                platform_id = COALESCE($9, platform_id),
                is_confirm = COALESCE($10, is_confirm)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let video = sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.video_type)
            .bind(&input.title)
            .bind(&input.synopsis)
            .bind(&input.release)
            .bind(&input.runtime)
            .bind(&input.notice_age)
            .bind(&input.platform_code)
            .bind(&input.platform_id)
            .bind(input.is_confirm)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(video) = video else {
            tx.rollback().await?;
            return Ok(None);
        };

        if let Some(genre_ids) = &input.genre_ids {
            Self::set_genres_inner(&mut tx, id, genre_ids).await?;
        }
        if let Some(actors) = &input.actors {
            Self::set_actors_inner(&mut tx, id, actors).await?;
        }
        if let Some(staff) = &input.staff {
            Self::set_staff_inner(&mut tx, id, staff).await?;
        }
        if let Some(watches) = &input.watches {
            Self::set_watches_inner(&mut tx, id, watches).await?;
        }

        tx.commit().await?;
        Ok(Some(video))
    }

    /// Soft-delete a video by setting `is_delete = true`.
    ///
    /// Returns `true` if the row was updated.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE videos SET is_delete = true WHERE id = $1 AND is_delete = false")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record a thumbnail for a video.
    pub async fn add_thumbnail(
        pool: &PgPool,
        video_id: DbId,
        input: &CreateVideoThumbnail,
    ) -> Result<VideoThumbnail, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::insert_thumbnail_inner(&mut conn, video_id, input).await
    }

    pub async fn list_watches(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoWatch>, sqlx::Error> {
        let query = format!(
            "SELECT {WATCH_COLUMNS} FROM video_watches WHERE video_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, VideoWatch>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_thumbnails(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoThumbnail>, sqlx::Error> {
        let query = format!(
            "SELECT {THUMBNAIL_COLUMNS} FROM video_thumbnails WHERE video_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, VideoThumbnail>(&query)
            .bind(video_id)
            .fetch_all(pool)
            .await
    }

    /// Thumbnails for several videos at once, grouped by the caller.
    pub async fn list_thumbnails_for(
        pool: &PgPool,
        video_ids: &[DbId],
    ) -> Result<Vec<VideoThumbnail>, sqlx::Error> {
        if video_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {THUMBNAIL_COLUMNS} FROM video_thumbnails
             WHERE video_id = ANY($1)
             ORDER BY video_id, id"
        );
        sqlx::query_as::<_, VideoThumbnail>(&query)
            .bind(video_ids)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Link helpers (run inside the caller's transaction)
    // -----------------------------------------------------------------------

    async fn set_genres_inner(
        conn: &mut PgConnection,
        video_id: DbId,
        genre_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM video_genres WHERE video_id = $1")
            .bind(video_id)
            .execute(&mut *conn)
            .await?;
        if genre_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO video_genres (video_id, genre_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT (video_id, genre_id) DO NOTHING",
        )
        .bind(video_id)
        .bind(genre_ids)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn set_actors_inner(
        conn: &mut PgConnection,
        video_id: DbId,
        actors: &[ActorCredit],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM video_actors WHERE video_id = $1")
            .bind(video_id)
            .execute(&mut *conn)
            .await?;
        for credit in actors {
            sqlx::query(
                "INSERT INTO video_actors (video_id, actor_id, role, sort_order)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (video_id, actor_id) DO NOTHING",
            )
            .bind(video_id)
            .bind(credit.actor_id)
            .bind(&credit.role)
            .bind(credit.sort_order)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn set_staff_inner(
        conn: &mut PgConnection,
        video_id: DbId,
        staff: &[StaffCredit],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM video_staff WHERE video_id = $1")
            .bind(video_id)
            .execute(&mut *conn)
            .await?;
        for credit in staff {
            sqlx::query(
                "INSERT INTO video_staff (video_id, staff_id, role)
                 VALUES ($1, $2, $3)
                 ON CONFLICT (video_id, staff_id) DO NOTHING",
            )
            .bind(video_id)
            .bind(credit.staff_id)
            .bind(&credit.role)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn set_watches_inner(
        conn: &mut PgConnection,
        video_id: DbId,
        watches: &[CreateVideoWatch],
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM video_watches WHERE video_id = $1")
            .bind(video_id)
            .execute(&mut *conn)
            .await?;
        for watch in watches {
            sqlx::query("INSERT INTO video_watches (video_id, watch_type, url) VALUES ($1, $2, $3)")
                .bind(video_id)
                .bind(&watch.watch_type)
                .bind(&watch.url)
                .execute(&mut *conn)
                .await?;
        }
        Ok(())
    }

    async fn insert_thumbnail_inner(
        conn: &mut PgConnection,
        video_id: DbId,
        input: &CreateVideoThumbnail,
    ) -> Result<VideoThumbnail, sqlx::Error> {
        let query = format!(
            "INSERT INTO video_thumbnails (video_id, thumbnail_type, url, extension, size)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {THUMBNAIL_COLUMNS}"
        );
        sqlx::query_as::<_, VideoThumbnail>(&query)
            .bind(video_id)
            .bind(&input.thumbnail_type)
            .bind(&input.url)
            .bind(&input.extension)
            .bind(input.size)
            .fetch_one(conn)
            .await
    }
}
