//! Minimal user model: only what ownership checks need.
//!
//! Authentication and account management live in an external collaborator;
//! this table exists so the engine can verify the caller's record and
//! campaign ownership.

use canvass_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Role name granted full access to any campaign.
pub const ROLE_ADMIN: &str = "admin";

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: Timestamp,
}
