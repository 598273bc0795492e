//! Repository for the `actors` table.

use reviewniverse_core::types::DbId;
use sqlx::PgPool;

use crate::models::actor::{Actor, CreateActor, VideoActor};

const COLUMNS: &str = "id, name, picture, profile, created_at, updated_at";

pub struct ActorRepo;

impl ActorRepo {
    pub async fn create(pool: &PgPool, input: &CreateActor) -> Result<Actor, sqlx::Error> {
        let query = format!(
            "INSERT INTO actors (name, picture, profile)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Actor>(&query)
            .bind(&input.name)
            .bind(&input.picture)
            .bind(&input.profile)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actors WHERE id = $1");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Replace the picture key. Returns the updated row, or `None` if missing.
    pub async fn update_picture(
        pool: &PgPool,
        id: DbId,
        picture: &str,
    ) -> Result<Option<Actor>, sqlx::Error> {
        let query = format!("UPDATE actors SET picture = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Actor>(&query)
            .bind(id)
            .bind(picture)
            .fetch_optional(pool)
            .await
    }

    /// Actors credited on a video, in billing order.
    pub async fn list_for_video(
        pool: &PgPool,
        video_id: DbId,
    ) -> Result<Vec<VideoActor>, sqlx::Error> {
        sqlx::query_as::<_, VideoActor>(
            "SELECT a.id, a.name, a.picture, a.profile, va.role, va.sort_order
             FROM actors a
             JOIN video_actors va ON va.actor_id = a.id
             WHERE va.video_id = $1
             ORDER BY va.sort_order, a.id",
        )
        .bind(video_id)
        .fetch_all(pool)
        .await
    }
}
