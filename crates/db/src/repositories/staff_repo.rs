//! Repository for the `staff` table.

use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::{Staff, CreateStaff, VideoStaff};

const COLUMNS: &str = "id, name, picture, profile, created_at, updated_at";

pub struct StaffRepo;

impl StaffRepo {
    pub async fn create(pool: &PgPool, input: &CreateStaff) -> Result<Staff, sqlx::Error> {
        let query = format!(
            "INSERT INTO staff (name, picture, profile)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Staff>(&query)
            .bind(&input.name)
            .bind(&input.picture)
            .bind(&input.profile)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the picture key. Returns the updated row, or `None` if missing.
    pub async fn update_picture(
        pool: &PgPool,
        id: DbId,
        picture: &str,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("UPDATE staff SET picture = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .bind(picture)
            .fetch_optional(pool)
            .await
    }

    /// Staff credited on a video.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoStaff>, sqlx::Error> {
        sqlx::query_as::<_, VideoStaff>(
            "SELECT s.id, s.name, s.picture, s.profile, vs.role
             FROM staff s
             JOIN video_staff vs ON vs.staff_id = s.id
             WHERE vs.video_id = $1
             ORDER BY s.id",
        )
        .bind(video_id)
        .fetch_all(pool)
        .await
    }
}
