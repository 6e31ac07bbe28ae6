//! Repository for the `users` table.
//!
//! Account management is external; the engine only reads user rows for
//! ownership checks (and inserts them in tests).

use canvass_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::User;

/// Column list for user queries.
const COLUMNS: &str = "id, email, display_name, role, created_at";

/// Read access to user records.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by their ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user record. Test/seed helper; production accounts are
    /// provisioned by the external auth service.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        display_name: &str,
        role: &str,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, display_name, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .bind(display_name)
            .bind(role)
            .fetch_one(pool)
            .await
    }
}
