//! User repository. Backs both the connection-admission principal
//! check and the dashboard user count.

use crate::Result as DbErrorResult;

use chrono::Utc;
use sqlx::SqlitePool;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, username: &str, tenant_id: &str) -> DbErrorResult<i64> {
        let created_at = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                INSERT INTO lh_users (username, tenant_id, created_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(username)
        .bind(tenant_id)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// True when the user exists and belongs to the given tenant.
    pub async fn exists_in_tenant(&self, username: &str, tenant_id: &str) -> DbErrorResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM lh_users
                WHERE username = ? AND tenant_id = ?
            "#,
        )
        .bind(username)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    pub async fn find_tenant(&self, username: &str) -> DbErrorResult<Option<String>> {
        let tenant: Option<String> = sqlx::query_scalar(
            r#"
                SELECT tenant_id
                FROM lh_users
                WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tenant)
    }

    pub async fn count_for_tenant(&self, tenant_id: &str) -> DbErrorResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
                SELECT COUNT(*)
                FROM lh_users
                WHERE tenant_id = ?
            "#,
        )
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
