//! Repository for the `user_login_logs` table.

use sqlx::PgPool;

use crate::models::login_log::{CreateUserLoginLog, UserLoginLog};

const COLUMNS: &str = "id, status, code, message, path, input_id, client_ip, client_host, \
                       user_agent, created_at";

pub struct LoginLogRepo;

impl LoginLogRepo {
    /// Record a login attempt.
    pub async fn create(
        pool: &PgPool,
        input: &CreateUserLoginLog,
    ) -> Result<UserLoginLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_login_logs
                (status, code, message, path, input_id, client_ip, client_host, user_agent)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserLoginLog>(&query)
            .bind(input.status)
            .bind(&input.code)
            .bind(&input.message)
            .bind(&input.path)
            .bind(&input.input_id)
            .bind(&input.client_ip)
            .bind(&input.client_host)
            .bind(&input.user_agent)
            .fetch_one(pool)
            .await
    }

    /// List attempts for an email, newest first.
    pub async fn list_by_input_id(
        pool: &PgPool,
        input_id: &str,
    ) -> Result<Vec<UserLoginLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_login_logs
             WHERE input_id = $1
             ORDER BY id DESC"
        );
        sqlx::query_as::<_, UserLoginLog>(&query)
            .bind(input_id)
            .fetch_all(pool)
            .await
    }
}
