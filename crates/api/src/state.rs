use std::sync::Arc;

use crate::config::ServerConfig;
use crate::rewards::RewardClient;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: canvass_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// External reward-redemption provider client.
    pub rewards: Arc<RewardClient>,
}
