//! Admin user repository backed by `PostgreSQL`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use deposit_core::AdminUserId;

use super::{AdminRepository, RepositoryError, map_unique_violation};
use crate::models::AdminUser;

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<AdminUserRow> for AdminUser {
    fn from(row: AdminUserRow) -> Self {
        Self {
            id: AdminUserId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            created_at: row.created_at,
        }
    }
}

/// Admin repository for the `admin_user` table.
#[derive(Debug, Clone)]
pub struct PgAdminRepository {
    pool: PgPool,
}

impl PgAdminRepository {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PgAdminRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, username, password_hash, created_at
            FROM admin_user
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_if_absent(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            INSERT INTO admin_user (username, password_hash)
            VALUES ($1, $2)
            ON CONFLICT (username) DO NOTHING
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "admin user"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_password_hash(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE admin_user
            SET password_hash = $2
            WHERE username = $1
            ",
        )
        .bind(username)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
