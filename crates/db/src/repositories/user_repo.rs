//! Repository for the `users` table.

use reviewniverse_core::search::Page;
use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use super::contains_pattern;
use super::counters;
use crate::models::user::{CreateUser, UpdateUser, User, UserSearch};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_type, email, password_hash, nickname, profile_image, \
                       profile_text, birth_year, level, mileage, like_count, review_count, \
                       rating_count, is_active, is_block, is_admin, is_email_verify, \
                       is_privacy_agree, is_terms_agree, is_age_agree, is_marketing_agree, \
                       created_at, updated_at";

/// Filter shared by the search count and page queries.
const SEARCH_FILTER: &str = "($1::BIGINT IS NULL OR id = $1)
               AND ($2::TEXT IS NULL OR nickname ILIKE $2)
               AND ($3::TEXT IS NULL OR email ILIKE $3)";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users
                (user_type, email, password_hash, nickname,
                 is_privacy_agree, is_terms_agree, is_age_agree, is_marketing_agree)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.user_type)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.nickname)
            .bind(input.is_privacy_agree)
            .bind(input.is_terms_agree)
            .bind(input.is_age_agree)
            .bind(input.is_marketing_agree)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email and account type, as the login verifier does.
    pub async fn find_by_email_and_type(
        pool: &PgPool,
        email: &str,
        user_type: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1 AND user_type = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(user_type)
            .fetch_optional(pool)
            .await
    }

    /// Whether a nickname is taken by anyone other than `exclude_id`.
    pub async fn nickname_exists(
        pool: &PgPool,
        nickname: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(
                SELECT 1 FROM users
                WHERE nickname = $1 AND ($2::BIGINT IS NULL OR id <> $2)
             )",
        )
        .bind(nickname)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Search users, returning the total match count and the requested page.
    pub async fn search(
        pool: &PgPool,
        params: &UserSearch,
        page: Page,
    ) -> Result<(i64, Vec<User>), sqlx::Error> {
        let nickname = params.nickname.as_deref().map(contains_pattern);
        let email = params.email.as_deref().map(contains_pattern);

        let count_query = format!("SELECT COUNT(*) FROM users WHERE {SEARCH_FILTER}");
        let total = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(params.user_id)
            .bind(&nickname)
            .bind(&email)
            .fetch_one(pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM users WHERE {SEARCH_FILTER}
             ORDER BY id DESC
             LIMIT $4 OFFSET $5"
        );
        let users = sqlx::query_as::<_, User>(&query)
            .bind(params.user_id)
            .bind(&nickname)
            .bind(&email)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((total, users))
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateUser,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET
                nickname = COALESCE($2, nickname),
                password_hash = COALESCE($3, password_hash),
                birth_year = COALESCE($4, birth_year),
                profile_image = COALESCE($5, profile_image),
                profile_text = COALESCE($6, profile_text),
                is_marketing_agree = COALESCE($7, is_marketing_agree)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(&input.nickname)
            .bind(&input.password_hash)
            .bind(input.birth_year)
            .bind(&input.profile_image)
            .bind(&input.profile_text)
            .bind(input.is_marketing_agree)
            .fetch_optional(pool)
            .await
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password(
        pool: &PgPool,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete a user.
    ///
    /// Likes, ratings and reviews cascade with the user, so every video the
    /// user touched has its counters recomputed in the same transaction.
    /// Returns `true` if the row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        // Lock affected videos in id order before the user row, matching the
        // video-then-user order used by every other counter mutation.
        let video_ids = sqlx::query_scalar::<_, DbId>(
            "SELECT id FROM videos
             WHERE id IN (
                 SELECT video_id FROM video_likes WHERE user_id = $1
                 UNION SELECT video_id FROM video_reviews WHERE user_id = $1
                 UNION SELECT video_id FROM video_ratings WHERE user_id = $1
             )
             ORDER BY id
             FOR UPDATE",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        for video_id in &video_ids {
            counters::recount_video(&mut *tx, *video_id).await?;
        }

        tx.commit().await?;
        tracing::debug!(user_id = id, videos = video_ids.len(), "Deleted user and recounted videos");
        Ok(true)
    }
}
